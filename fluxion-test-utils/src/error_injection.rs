// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for error injection in streams.
//!
//! This module provides stream wrappers that can inject `StreamItem::Error` values
//! into streams for testing error propagation behavior in stream operators.

use fluxion_core::{StreamItem, Timestamped};
use fluxion_error::FluxionError;
use futures::Stream;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

/// A stream wrapper that injects errors at specified positions.
///
/// This wrapper takes a stream that produces ordered values and wraps them in
/// `StreamItem::Value`, optionally injecting `StreamItem::Error` at a specified position.
///
/// # Examples
///
/// ```rust
/// use fluxion_test_utils::Sequenced;
/// use fluxion_test_utils::ErrorInjectingStream;
/// use fluxion_core::{StreamItem, Timestamped};
/// use futures::{stream, StreamExt};
///
/// # async fn example() {
/// let items = vec![
///     <Sequenced<i32>>::with_timestamp(1, 1),
///     <Sequenced<i32>>::with_timestamp(2, 2),
///     <Sequenced<i32>>::with_timestamp(3, 3),
/// ];
///
/// let base_stream = stream::iter(items);
/// let mut error_stream = ErrorInjectingStream::new(base_stream, 1);
///
/// // First item is a value
/// let first = error_stream.next().await.unwrap();
/// assert!(matches!(first, StreamItem::Value(_)));
///
/// // Second item is the injected error
/// let second = error_stream.next().await.unwrap();
/// assert!(matches!(second, StreamItem::Error(_)));
///
/// // Third item is a value again
/// let third = error_stream.next().await.unwrap();
/// assert!(matches!(third, StreamItem::Value(_)));
/// # }
/// ```
pub struct ErrorInjectingStream<S> {
    inner: S,
    inject_error_at: Option<usize>,
    count: usize,
}

impl<S> ErrorInjectingStream<S> {
    /// Creates a new error-injecting stream wrapper.
    ///
    /// # Arguments
    ///
    /// * `inner` - The base stream to wrap
    /// * `inject_error_at` - The position (0-indexed) at which to inject an error
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluxion_test_utils::{Sequenced, ErrorInjectingStream};
    /// use futures::stream;
    ///
    /// let items = vec![Sequenced::new(1), Sequenced::new(2)];
    /// let base = stream::iter(items);
    /// let error_stream = ErrorInjectingStream::new(base, 1);
    /// // Will inject error at position 1 (after first value)
    /// ```
    pub fn new(inner: S, inject_error_at: usize) -> Self {
        Self {
            inner,
            inject_error_at: Some(inject_error_at),
            count: 0,
        }
    }
}

impl<S> Stream for ErrorInjectingStream<S>
where
    S: Stream + Unpin,
    S::Item: Timestamped,
{
    type Item = StreamItem<S::Item>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        // Check if we should inject an error at this position
        if let Some(error_pos) = self.inject_error_at {
            if self.count == error_pos {
                self.inject_error_at = None; // Only inject once
                self.count += 1;
                return Poll::Ready(Some(StreamItem::Error(FluxionError::lock_error(
                    "Injected test error",
                ))));
            }
        }

        // Otherwise, poll the inner stream and wrap in StreamItem::Value
        match Pin::new(&mut self.inner).poll_next(cx) {
            Poll::Ready(Some(item)) => {
                self.count += 1;
                Poll::Ready(Some(StreamItem::Value(item)))
            }
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// A shared counter incremented each time a [`CountingDropStream`] it is
/// paired with is dropped.
///
/// Used to assert "upstream is cancelled/dropped exactly once" claims — e.g.
/// for `window_by_count`, where outer cancellation must cause exactly one
/// upstream drop/cancel regardless of how many windows were still open.
#[derive(Clone, Default)]
pub struct DropCounter(Arc<AtomicUsize>);

impl DropCounter {
    /// Creates a counter starting at zero.
    pub fn new() -> Self {
        Self(Arc::new(AtomicUsize::new(0)))
    }

    /// Number of drops observed so far.
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// A stream wrapper that records exactly one drop into a shared
/// [`DropCounter`] when it goes out of scope.
///
/// Wrap an upstream test stream in this to verify operators under test drop
/// (and therefore stop polling / release) their upstream subscription
/// exactly once, never zero times (a leak) and never more than once (a
/// double-cancel bug).
///
/// # Examples
///
/// ```rust
/// use fluxion_test_utils::error_injection::{CountingDropStream, DropCounter};
/// use futures::stream;
///
/// let counter = DropCounter::new();
/// let wrapped = CountingDropStream::new(stream::iter(vec![1, 2, 3]), counter.clone());
/// assert_eq!(counter.count(), 0);
/// drop(wrapped);
/// assert_eq!(counter.count(), 1);
/// ```
pub struct CountingDropStream<S> {
    inner: S,
    counter: DropCounter,
}

impl<S> CountingDropStream<S> {
    /// Wraps `inner`, recording one drop into `counter` when this wrapper
    /// itself is dropped.
    pub fn new(inner: S, counter: DropCounter) -> Self {
        Self { inner, counter }
    }
}

impl<S> Stream for CountingDropStream<S>
where
    S: Stream + Unpin,
{
    type Item = S::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

impl<S> Drop for CountingDropStream<S> {
    fn drop(&mut self) {
        self.counter.0.fetch_add(1, Ordering::SeqCst);
    }
}
