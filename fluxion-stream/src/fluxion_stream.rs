// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::Ordered;
use futures::Stream;
use pin_project::pin_project;
use std::fmt::Debug;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A concrete wrapper type that provides all fluxion stream extensions.
///
/// This type wraps any stream of ordered items and provides all the fluxion
/// extension methods directly, allowing easy chaining and composition.
///
/// `FluxionStream` is designed for **pure, functional stream operations** with no
/// mutation. For testing scenarios where you need to push values into a stream,
/// use `TestChannel` from the `fluxion-test-utils` crate instead.
///
/// # Design Philosophy
///
/// - **Production code**: Uses `FluxionStream` for composable, immutable stream transformations
/// - **Test code**: Uses `TestChannel` which wraps this and adds push capabilities
///
/// This separation solves the fundamental conflict between:
/// - Consuming operations (stream extensions that take `self`)
/// - Mutation operations (push that needs `&self`)
#[pin_project]
pub struct FluxionStream<S> {
    #[pin]
    inner: S,
}

impl<S> FluxionStream<S> {
    /// Wrap a stream in a `FluxionStream` wrapper
    pub const fn new(stream: S) -> Self {
        Self { inner: stream }
    }

    /// Unwrap to get the inner stream
    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Creates a `FluxionStream` from any existing stream.
    ///
    /// Use this when you have a stream from another library or source and want
    /// to apply fluxion's extension methods.
    ///
    /// This is just an alias for `FluxionStream::new()` but may be more discoverable.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fluxion_stream::FluxionStream;
    /// use futures::stream;
    ///
    /// let existing_stream = stream::iter(vec![1, 2, 3]);
    /// let stream = FluxionStream::from_stream(existing_stream);
    /// ```
    pub fn from_stream(stream: S) -> Self {
        FluxionStream::new(stream)
    }
}

// Separate impl for the constructor that changes the type parameter
impl FluxionStream<()> {
    /// Creates a `FluxionStream` from a tokio unbounded receiver.
    ///
    /// This is the most common constructor for production code that receives
    /// values from other async tasks or components.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fluxion_stream::FluxionStream;
    /// use tokio::sync::mpsc;
    ///
    /// let (tx, rx) = mpsc::unbounded_channel::<i32>();
    /// let stream = FluxionStream::from_unbounded_receiver(rx);
    /// ```
    pub fn from_unbounded_receiver<T>(
        receiver: tokio::sync::mpsc::UnboundedReceiver<T>,
    ) -> FluxionStream<tokio_stream::wrappers::UnboundedReceiverStream<T>> {
        FluxionStream::new(tokio_stream::wrappers::UnboundedReceiverStream::new(
            receiver,
        ))
    }
}

impl<T> From<tokio_stream::wrappers::UnboundedReceiverStream<T>>
    for FluxionStream<tokio_stream::wrappers::UnboundedReceiverStream<T>>
{
    fn from(stream: tokio_stream::wrappers::UnboundedReceiverStream<T>) -> Self {
        FluxionStream::new(stream)
    }
}

impl<S> Stream for FluxionStream<S>
where
    S: Stream,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.project().inner.poll_next(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<S, T> FluxionStream<S>
where
    S: Stream<Item = T>,
    T: Ordered<Inner = T> + Clone + Debug + Ord + Send + Sync + Unpin + 'static,
{
    /// Enables ordered stream operations on items that are self-ordered.
    ///
    /// This method is a convenience for streams where the items implement `Ordered`
    /// with `Inner = Self`. It simply returns the FluxionStream itself, but makes
    /// the code more expressive and enables ordered operations.
    ///
    /// # When to use
    ///
    /// Use this when your domain types directly implement `Ordered` (e.g., they have
    /// a timestamp field) and you want to use ordered stream operations such as
    /// [`WindowByCountExt::window_by_count`](crate::WindowByCountExt::window_by_count).
    pub fn auto_ordered(self) -> Self {
        self
    }
}
