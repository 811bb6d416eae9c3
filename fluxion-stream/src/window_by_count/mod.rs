// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Window-by-count operator: re-chunks a stream into a stream of windows.
//!
//! This module provides the [`window_by_count`](WindowByCountExt::window_by_count)
//! operator. Unlike a plain batching combinator that buffers a `Vec` and emits it
//! once full, each window here is itself a live sub-stream (a [`WindowStream`])
//! with its own independent backpressure: the outer subscriber receives a handle
//! to a window as soon as it opens, and may start draining it before the window
//! has finished filling.
//!
//! # Strategies
//!
//! Which of the three window shapes applies is decided from `size` (elements per
//! window) and `skip` (stride between window starts):
//!
//! - **Exact** (`skip == size`): contiguous, non-overlapping windows.
//! - **Skip** (`skip > size`): gapped windows; `skip - size` elements are dropped
//!   between consecutive windows.
//! - **Overlap** (`skip < size`): overlapping windows, up to `ceil(size / skip)`
//!   open at any one time.
//!
//! # Basic Usage
//!
//! ```
//! use fluxion_stream::prelude::*;
//! use fluxion_test_utils::test_channel;
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let (tx, stream) = test_channel::<i32>();
//! let mut windows = stream.window_by_count(WindowByCountOptions::exact(3));
//!
//! tx.send(1).unwrap();
//! tx.send(2).unwrap();
//! tx.send(3).unwrap(); // window complete
//! tx.send(4).unwrap();
//! drop(tx); // partial window [4] closes on upstream completion
//!
//! let mut window1 = windows.next().await.unwrap().unwrap();
//! assert_eq!(window1.next().await.unwrap().unwrap(), 1);
//! assert_eq!(window1.next().await.unwrap().unwrap(), 2);
//! assert_eq!(window1.next().await.unwrap().unwrap(), 3);
//! assert!(window1.next().await.is_none());
//!
//! let mut window2 = windows.next().await.unwrap().unwrap();
//! assert_eq!(window2.next().await.unwrap().unwrap(), 4);
//! assert!(window2.next().await.is_none());
//! assert!(windows.next().await.is_none());
//! # }
//! ```
//!
//! # Cancellation
//!
//! Upstream is cancelled exactly once: when the outer subscriber and every
//! currently open window have all released interest. Dropping the outer stream
//! without dropping open windows keeps pulling upstream alive until those
//! windows are also dropped or complete naturally.
//!
//! # Error Handling
//!
//! An upstream error closes every currently open window with the same error and
//! is forwarded to the outer subscriber, then upstream is not polled again.

mod common;
mod exact;
mod lifetime;
mod options;
mod overlap;
mod skip;
mod window_stream;

pub use options::{QueueSupplier, WindowByCountOptions, WindowWireItem};
pub use window_stream::{OuterStream, WindowStream};

use crate::window_by_count::lifetime::ActiveLifetime;
use crate::window_by_count::options::Strategy;
use crate::window_by_count::window_stream::TaskGuard;
use alloc::sync::Arc;
use fluxion_core::{FluxionTask, StreamItem};
use fluxion_error::FluxionError;
use futures::Stream;

/// Extension trait providing the [`window_by_count`](Self::window_by_count) operator.
///
/// Implemented for every stream of [`StreamItem<T>`] whose items can be handed
/// to a background driving task (`Send + 'static`) and, for the Overlap
/// strategy, fanned out to more than one open window at once (`Clone`).
pub trait WindowByCountExt<T>: Stream<Item = StreamItem<T>> + Sized
where
    T: Clone + Send + Sync + Unpin + 'static,
{
    /// Re-chunks `self` into a stream of windows per `options`.
    ///
    /// Spawns a background task that drives `self` to completion (or until
    /// cancelled) and routes its elements into the windows it opens; the
    /// returned [`OuterStream`] is the stream of those windows.
    fn window_by_count(self, options: WindowByCountOptions<T>) -> OuterStream<T>;
}

impl<S, T> WindowByCountExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Unpin + Send + 'static,
    T: Clone + Send + Sync + Unpin + 'static,
{
    fn window_by_count(self, options: WindowByCountOptions<T>) -> OuterStream<T> {
        let strategy = options.strategy();
        info!(
            "window_by_count: strategy={:?} size={} skip={}",
            strategy, options.size, options.skip
        );
        let capacity = if strategy == Strategy::Overlap {
            options.overflow_queue_capacity()
        } else {
            1
        };
        let supplier = options.overflow_supplier();

        let lifetime = ActiveLifetime::new();
        let outer_guard = lifetime.outer_guard();

        let Some((outer_tx, outer_rx)) = supplier(capacity) else {
            error!("window_by_count: outer ready-queue supplier returned no queue");
            return OuterStream::new(immediate_failure(), outer_guard, None);
        };

        let upstream = self;
        let driver_lifetime = lifetime.clone();
        let task = FluxionTask::spawn(move |task_cancel| async move {
            match strategy {
                Strategy::Exact => {
                    exact::run(upstream, outer_tx, options, driver_lifetime, task_cancel).await;
                }
                Strategy::Skip => {
                    skip::run(upstream, outer_tx, options, driver_lifetime, task_cancel).await;
                }
                Strategy::Overlap => {
                    overlap::run(upstream, outer_tx, options, driver_lifetime, task_cancel).await;
                }
            }
        });

        OuterStream::new(outer_rx, outer_guard, Some(Arc::new(TaskGuard::new(task))))
    }
}

/// Builds an `OuterStream` receiver that immediately yields a single error
/// and then ends, for the construction-time supplier failure path where no
/// window driving task is ever spawned.
fn immediate_failure<T>() -> async_channel::Receiver<StreamItem<WindowStream<T>>>
where
    T: Send + Sync + 'static,
{
    let (tx, rx) = async_channel::bounded(1);
    let _ = tx.try_send(StreamItem::Error(FluxionError::resource_limit(
        "window_by_count outer ready-queue",
        0,
    )));
    rx
}
