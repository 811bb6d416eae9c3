// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Operator parameters for [`WindowByCountExt::window_by_count`](crate::WindowByCountExt::window_by_count).

use alloc::sync::Arc;
use async_channel::{Receiver, Sender};
use fluxion_core::StreamItem;

/// Which of the three window shapes applies, chosen from `size`/`skip`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Strategy {
    /// `skip == size`: contiguous, non-overlapping windows.
    Exact,
    /// `skip > size`: gapped windows, `skip - size` elements dropped between them.
    Skip,
    /// `skip < size`: overlapping windows, up to `ceil(size / skip)` open at once.
    Overlap,
}

/// A fallible factory for the bounded queue backing one window, or the
/// outer ready-queue (overlap only). Returns `None` to model a supplier that
/// cannot produce a queue.
pub type QueueSupplier<T> =
    Arc<dyn Fn(usize) -> Option<(Sender<StreamItem<T>>, Receiver<StreamItem<T>>)> + Send + Sync>;

fn default_supplier<T>() -> QueueSupplier<T>
where
    T: Send + Sync + 'static,
{
    Arc::new(|capacity: usize| Some(async_channel::bounded(capacity)))
}

/// Configuration for the window-by-count operator: element count per
/// window (`size`), stride between window starts (`skip`), and optional
/// overrides for queue capacity/construction.
///
/// Construct with [`WindowByCountOptions::exact`], [`WindowByCountOptions::skip`]
/// or [`WindowByCountOptions::overlap`] when the shape is known statically, or
/// [`WindowByCountOptions::new`] to dispatch on `size`/`skip` at runtime.
pub struct WindowByCountOptions<T> {
    pub(crate) size: usize,
    pub(crate) skip: usize,
    pub(crate) processor_queue_capacity: Option<usize>,
    pub(crate) overflow_queue_capacity: Option<usize>,
    pub(crate) processor_queue_supplier: Option<QueueSupplier<T>>,
    pub(crate) overflow_queue_supplier: Option<QueueSupplier<WindowWireItem<T>>>,
}

/// The item type carried over the outer ready-queue: a window publisher.
///
/// Aliased so `QueueSupplier<WindowWireItem<T>>` reads naturally; the outer
/// channel's element type is whatever `window_by_count` ultimately wraps a
/// `WindowStream<T>` as, but the supplier abstraction only needs to know it
/// is some `Send + Sync + 'static` payload, so we erase it behind this marker
/// type and let `mod.rs` supply the concrete `WindowStream<T>` at the call
/// site via `Box::new`/`Arc::new` adapters rather than here.
pub type WindowWireItem<T> = super::window_stream::WindowStream<T>;

impl<T> WindowByCountOptions<T>
where
    T: Send + Sync + 'static,
{
    /// `size == skip`: contiguous, non-overlapping windows.
    ///
    /// # Panics
    /// Panics if `size == 0`.
    #[must_use]
    pub fn exact(size: usize) -> Self {
        Self::new(size, size)
    }

    /// `skip > size`: gapped windows; `skip - size` elements are dropped
    /// between consecutive windows.
    ///
    /// # Panics
    /// Panics if `size == 0`, `skip == 0`, or `skip <= size`.
    #[must_use]
    pub fn skip(size: usize, skip: usize) -> Self {
        assert!(
            skip > size,
            "WindowByCountOptions::skip requires skip > size (got size={size}, skip={skip}); use `exact` or `overlap` otherwise"
        );
        Self::new(size, skip)
    }

    /// `skip < size`: overlapping windows, up to `ceil(size / skip)` open at once.
    ///
    /// # Panics
    /// Panics if `size == 0`, `skip == 0`, or `skip >= size`.
    #[must_use]
    pub fn overlap(size: usize, skip: usize) -> Self {
        assert!(
            skip < size,
            "WindowByCountOptions::overlap requires skip < size (got size={size}, skip={skip}); use `exact` or `skip` otherwise"
        );
        Self::new(size, skip)
    }

    /// Constructs options from raw `size`/`skip`, dispatching the strategy
    /// from their relationship: `Exact` when `skip == size`, `Skip` when
    /// `skip > size`, `Overlap` otherwise.
    ///
    /// # Panics
    /// Panics if `size == 0` or `skip == 0`.
    #[must_use]
    pub fn new(size: usize, skip: usize) -> Self {
        assert!(size > 0, "window_by_count: size must be at least 1");
        assert!(skip > 0, "window_by_count: skip must be at least 1");
        Self {
            size,
            skip,
            processor_queue_capacity: None,
            overflow_queue_capacity: None,
            processor_queue_supplier: None,
            overflow_queue_supplier: None,
        }
    }

    pub(crate) fn strategy(&self) -> Strategy {
        if self.skip == self.size {
            Strategy::Exact
        } else if self.skip > self.size {
            Strategy::Skip
        } else {
            Strategy::Overlap
        }
    }

    /// Overrides a window's buffer capacity. Defaults to `size`, which is the
    /// only capacity that is guaranteed never to block a send regardless of
    /// how slowly the window's own subscriber drains it (a window never
    /// receives more than `size` elements over its lifetime).
    #[must_use]
    pub fn with_processor_queue_capacity(mut self, capacity: usize) -> Self {
        self.processor_queue_capacity = Some(capacity);
        self
    }

    /// Overrides the outer ready-queue capacity (Overlap strategy only).
    /// Defaults to `ceil(size / skip)`, the number of windows that can be
    /// open at once.
    #[must_use]
    pub fn with_overflow_queue_capacity(mut self, capacity: usize) -> Self {
        self.overflow_queue_capacity = Some(capacity);
        self
    }

    /// Supplies a (possibly fallible) factory for each window's buffer, in
    /// place of the default `async_channel::bounded`. A supplier returning
    /// `None` models a queue allocation that failed, which fails the outer
    /// subscriber rather than this call.
    #[must_use]
    pub fn with_processor_queue_supplier(mut self, supplier: QueueSupplier<T>) -> Self {
        self.processor_queue_supplier = Some(supplier);
        self
    }

    /// Supplies a (possibly fallible) factory for the outer ready-queue
    /// (Overlap strategy only), in place of the default `async_channel::bounded`.
    #[must_use]
    pub fn with_overflow_queue_supplier(
        mut self,
        supplier: QueueSupplier<WindowWireItem<T>>,
    ) -> Self {
        self.overflow_queue_supplier = Some(supplier);
        self
    }

    pub(crate) fn processor_queue_capacity(&self) -> usize {
        self.processor_queue_capacity.unwrap_or(self.size)
    }

    pub(crate) fn overflow_queue_capacity(&self) -> usize {
        self.overflow_queue_capacity
            .unwrap_or_else(|| self.size.div_ceil(self.skip))
    }

    pub(crate) fn processor_supplier(&self) -> QueueSupplier<T> {
        self.processor_queue_supplier
            .clone()
            .unwrap_or_else(default_supplier)
    }

    pub(crate) fn overflow_supplier(&self) -> QueueSupplier<WindowWireItem<T>> {
        self.overflow_queue_supplier
            .clone()
            .unwrap_or_else(default_supplier)
    }
}
