// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Helpers shared by the Exact, Skip and Overlap drivers.

use crate::window_by_count::lifetime::{ActiveLifetime, ReleaseGuard};
use crate::window_by_count::options::WindowByCountOptions;
use crate::window_by_count::window_stream::WindowStream;
use async_channel::Sender;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use fluxion_core::{CancellationToken, StreamItem};
use fluxion_error::FluxionError;

/// Resolves as soon as either of two [`CancellationToken`]s is cancelled.
///
/// The driving loop watches two independent sources of cancellation: the
/// `active`-count-driven one ([`ActiveLifetime`], the graceful path) and the
/// driving task's own token (the `Arc<TaskGuard>`-refcount backstop
/// described on [`TaskGuard`]). Either is sufficient to stop pulling from
/// upstream.
struct AnyCancelled<'a> {
    lifetime: fluxion_core::cancellation_token::Cancelled<'a>,
    task: fluxion_core::cancellation_token::Cancelled<'a>,
}

impl Future for AnyCancelled<'_> {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if Pin::new(&mut self.lifetime).poll(cx).is_ready() {
            return Poll::Ready(());
        }
        Pin::new(&mut self.task).poll(cx)
    }
}

pub(crate) fn any_cancelled<'a>(
    lifetime: &'a CancellationToken,
    task: &'a CancellationToken,
) -> impl Future<Output = ()> + Unpin + 'a {
    AnyCancelled {
        lifetime: lifetime.cancelled(),
        task: task.cancelled(),
    }
}

/// Opens a fresh window: requests a buffer from the configured supplier,
/// wraps it as a [`WindowStream`], and acquires one `active` unit for it.
///
/// Returns the `Sender` half the driver routes elements into, the
/// `WindowStream` to hand to the outer subscriber, and the driver's own copy
/// of the window's [`ReleaseGuard`] (released once the window is completed
/// by the driver, racing harmlessly against the subscriber dropping its
/// copy first). `Err` models the supplier failing to produce a buffer — the
/// driver must cancel upstream and signal an error to outer without this
/// window ever becoming observable.
pub(crate) fn open_window<T>(
    options: &WindowByCountOptions<T>,
    lifetime: &ActiveLifetime,
) -> Result<(Sender<StreamItem<T>>, WindowStream<T>, ReleaseGuard), FluxionError>
where
    T: Send + Sync + 'static,
{
    let capacity = options.processor_queue_capacity();
    let supplier = options.processor_supplier();
    let Some((sender, receiver)) = supplier(capacity) else {
        error!("window_by_count: processor queue supplier returned no queue");
        return Err(FluxionError::resource_limit(
            "window_by_count processor queue",
            capacity,
        ));
    };
    let driver_guard = lifetime.acquire();
    let subscriber_guard = driver_guard.clone();
    let window = WindowStream::new(receiver, subscriber_guard);
    Ok((sender, window, driver_guard))
}

/// Routes a value into a window's buffer. The buffer is sized at `size`,
/// so this send completes without waiting on the window's own subscriber to
/// drain under normal operation; if the subscriber has already dropped the
/// window the send fails harmlessly and is logged.
pub(crate) async fn route_value<T>(sender: &Sender<StreamItem<T>>, value: T)
where
    T: Send + 'static,
{
    if sender.send(StreamItem::Value(value)).await.is_err() {
        warn!("window_by_count: dropping element for a window whose subscriber has gone away");
    }
}

/// Closes a window normally: drops the sender so the window's `Stream`
/// yields `None` next, then releases the driver's `active` unit for it.
pub(crate) fn close_window<T>(sender: Sender<StreamItem<T>>, guard: ReleaseGuard) {
    drop(sender);
    guard.release();
}

/// `FluxionError` does not implement `Clone` (it can carry an opaque boxed
/// user error), but an upstream error must reach both an open window and
/// the outer subscriber. Re-wraps the error's display text so both
/// recipients see an equivalent failure without requiring the original to
/// be duplicated structurally.
pub(crate) fn duplicate_error(error: &FluxionError) -> FluxionError {
    FluxionError::stream_error(error.to_string())
}

/// Forwards an upstream error into a window and closes it.
pub(crate) async fn fail_window<T>(
    sender: Sender<StreamItem<T>>,
    guard: ReleaseGuard,
    error: FluxionError,
) where
    T: Send + 'static,
{
    let _ = sender.send(StreamItem::Error(error)).await;
    drop(sender);
    guard.release();
}
