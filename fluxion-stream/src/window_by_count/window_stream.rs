// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The per-window sub-stream handed to the outer subscriber.
//!
//! A [`WindowStream`] is a hot, single-subscriber publisher backed by a
//! bounded queue of capacity `size`. It is hot because elements are pushed
//! into its buffer by the driving task as they arrive, whether or not
//! anything is currently polling the `WindowStream`; it is cold only in the
//! sense that the outer subscriber receives a handle rather than past
//! elements.

use crate::window_by_count::lifetime::ReleaseGuard;
use alloc::sync::Arc;
use async_channel::Receiver;
use core::fmt::Debug;
use core::pin::Pin;
use core::task::{Context, Poll};
use fluxion_core::{FluxionTask, StreamItem};
use futures::Stream;

/// A bounded channel wrapped as a `Stream`, paired with a one-shot release
/// guard for the operator's `active` count.
///
/// This backs both the per-window publisher ([`WindowStream`]) and the outer
/// stream of windows: both are "a receiver the subscriber can drop early to
/// signal cancellation, wired into the same `active` count". Dropping a
/// `GuardedStream` before it completes releases its unit of interest in the
/// operator's `active` count — the equivalent of its subscriber cancelling
/// it.
pub struct GuardedStream<Item> {
    receiver: Receiver<Item>,
    guard: ReleaseGuard,
}

impl<Item> GuardedStream<Item> {
    pub(crate) fn new(receiver: Receiver<Item>, guard: ReleaseGuard) -> Self {
        Self { receiver, guard }
    }
}

impl<Item> Debug for GuardedStream<Item> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GuardedStream").finish_non_exhaustive()
    }
}

impl<Item> Stream for GuardedStream<Item>
where
    Item: Unpin,
{
    type Item = Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.receiver).poll_next(cx)
    }
}

impl<Item> Drop for GuardedStream<Item> {
    fn drop(&mut self) {
        // A subscriber that stops polling before natural completion is
        // cancelling; release its `active` unit. If already completed
        // normally (the driving task released first) this is a no-op.
        self.guard.release();
    }
}

/// A single window: a bounded sub-sequence of the upstream stream, delivered
/// to the outer subscriber as its own `Stream`.
///
/// A window's lifetime is governed entirely by the `active` count (via its
/// [`ReleaseGuard`]) — it does not need to keep the driving task alive
/// itself, since the task only stops once every window (and the outer
/// stream) has released its interest anyway.
pub struct WindowStream<T>(GuardedStream<StreamItem<T>>);

impl<T> WindowStream<T> {
    pub(crate) fn new(receiver: Receiver<StreamItem<T>>, guard: ReleaseGuard) -> Self {
        Self(GuardedStream::new(receiver, guard))
    }
}

impl<T> Debug for WindowStream<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowStream").finish_non_exhaustive()
    }
}

impl<T> Stream for WindowStream<T>
where
    T: Unpin,
{
    type Item = StreamItem<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.0).poll_next(cx)
    }
}

/// The outer stream of windows handed back to the caller of
/// [`WindowByCountExt::window_by_count`](crate::WindowByCountExt::window_by_count).
///
/// Unlike [`WindowStream`], the outer stream also holds an `Arc<TaskGuard>`
/// when a driving task was actually spawned (the immediate-failure
/// construction path in `mod.rs` spawns none): this is the backstop of
/// `TaskGuard`'s own documentation — it keeps the task from being aborted
/// out from under the outer subscriber even in corner cases the `active`
/// count does not otherwise cover, mirroring how `fluxion-stream-core`'s
/// `partition`/`share` share a `TaskGuard` across every handle they hand out.
pub struct OuterStream<T> {
    inner: GuardedStream<StreamItem<WindowStream<T>>>,
    _task: Option<Arc<TaskGuard>>,
}

impl<T> OuterStream<T> {
    pub(crate) fn new(
        receiver: Receiver<StreamItem<WindowStream<T>>>,
        guard: ReleaseGuard,
        task: Option<Arc<TaskGuard>>,
    ) -> Self {
        Self {
            inner: GuardedStream::new(receiver, guard),
            _task: task,
        }
    }
}

impl<T> Debug for OuterStream<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OuterStream").finish_non_exhaustive()
    }
}

impl<T> Stream for OuterStream<T>
where
    T: Unpin,
{
    type Item = StreamItem<WindowStream<T>>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

/// Keeps the window driving task alive for as long as the outer stream
/// handle exists.
///
/// Mirrors the `TaskGuard` pattern `fluxion-stream-core::partition` uses for
/// the same "fan one source out to several subscribers" shape: the task is
/// aborted once its `TaskGuard` is dropped, which is a backstop on top of
/// (not a replacement for) the `active`-count-driven graceful shutdown in
/// `lifetime.rs`.
pub(crate) struct TaskGuard {
    #[allow(dead_code)]
    task: FluxionTask,
}

impl TaskGuard {
    pub(crate) fn new(task: FluxionTask) -> Self {
        Self { task }
    }
}
