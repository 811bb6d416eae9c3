// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Overlap strategy: `skip < size`, up to `ceil(size / skip)` windows open
//! at once. The trickiest of the three strategies: every element is routed
//! into every currently open window, and windows close in FIFO order as each
//! one accumulates `size` elements.

use crate::window_by_count::common::{
    any_cancelled, close_window, duplicate_error, fail_window, open_window, route_value,
};
use crate::window_by_count::lifetime::{ActiveLifetime, ReleaseGuard};
use crate::window_by_count::options::WindowByCountOptions;
use crate::window_by_count::window_stream::WindowStream;
use alloc::collections::VecDeque;
use async_channel::Sender;
use fluxion_core::{CancellationToken, StreamItem};
use futures::{future, Stream, StreamExt};

/// Drives the overlap loop. `open_windows` is FIFO: the head is always the
/// oldest window, the one next to reach its `size`-th element.
///
/// There is no separate outer-demand counter or serialized drain loop here:
/// the outer channel this driver sends into is bounded at `ceil(size / skip)`
/// (the number of windows that can be open at once), so `Sender::send`
/// blocking until the outer subscriber has room already gives the same
/// "never deliver more windows than the subscriber can hold" guarantee,
/// expressed as ordinary channel backpressure instead of hand-rolled demand
/// bookkeeping.
pub(crate) async fn run<S, T>(
    mut upstream: S,
    outer: Sender<StreamItem<WindowStream<T>>>,
    options: WindowByCountOptions<T>,
    lifetime: ActiveLifetime,
    task_cancel: CancellationToken,
) where
    S: Stream<Item = StreamItem<T>> + Unpin,
    T: Clone + Send + Sync + Unpin + 'static,
{
    let size = options.size;
    let skip = options.skip;
    let mut open_windows: VecDeque<(Sender<StreamItem<T>>, ReleaseGuard)> = VecDeque::new();
    let mut index: usize = 0;
    let mut produced: usize = 0;
    let lifetime_cancel = lifetime.cancel_token();

    loop {
        let next =
            future::select(upstream.next(), any_cancelled(&lifetime_cancel, &task_cancel)).await;
        let item = match next {
            future::Either::Left((item, _)) => item,
            future::Either::Right(_) => break,
        };

        match item {
            Some(StreamItem::Value(value)) => {
                if index == 0 {
                    match open_window(&options, &lifetime) {
                        Ok((sender, window, guard)) => {
                            if outer.send(StreamItem::Value(window)).await.is_err() {
                                // Outer is gone for good; this window can never be
                                // observed, so it closes right away instead of
                                // artificially keeping upstream alive for it. Windows
                                // already open keep running until `active` drains.
                                close_window(sender, guard);
                            } else {
                                open_windows.push_back((sender, guard));
                            }
                        }
                        Err(error) => {
                            // No partial window is ever observable for the
                            // failed one; windows already delivered are
                            // closed out rather than left dangling.
                            for (sender, guard) in open_windows.drain(..) {
                                close_window(sender, guard);
                            }
                            let _ = outer.send(StreamItem::Error(error)).await;
                            break;
                        }
                    }
                }

                for (sender, _) in &open_windows {
                    route_value(sender, value.clone()).await;
                }

                let produced_next = produced + 1;
                if produced_next == size {
                    if let Some((sender, guard)) = open_windows.pop_front() {
                        close_window(sender, guard);
                    }
                    produced = produced_next - skip;
                } else {
                    produced = produced_next;
                }

                let next_index = index + 1;
                index = if next_index == skip { 0 } else { next_index };
            }
            Some(StreamItem::Error(error)) => {
                for (sender, guard) in open_windows.drain(..) {
                    fail_window(sender, guard, duplicate_error(&error)).await;
                }
                let _ = outer.send(StreamItem::Error(error)).await;
                break;
            }
            None => {
                for (sender, guard) in open_windows.drain(..) {
                    close_window(sender, guard);
                }
                break;
            }
        }
    }
}
