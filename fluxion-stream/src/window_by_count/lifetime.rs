// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Shared lifecycle primitives for the window-by-count driver.
//!
//! `ActiveLifetime` is the `active` counter of the operator: a baseline unit
//! held by the outer subscriber plus one unit per currently open window.
//! Upstream is cancelled exactly once, on the transition from `1` to `0`.

use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use fluxion_core::CancellationToken;

/// Tracks how many parties still require the upstream subscription.
///
/// Starts at `1` (the outer subscriber's baseline unit). Each open window
/// acquires one more unit via [`ActiveLifetime::acquire`]. Upstream is
/// cancelled via the shared [`CancellationToken`] the instant the count
/// reaches zero, and never again afterwards.
#[derive(Clone)]
pub(crate) struct ActiveLifetime {
    active: Arc<AtomicUsize>,
    cancel: CancellationToken,
}

impl ActiveLifetime {
    pub(crate) fn new() -> Self {
        Self {
            active: Arc::new(AtomicUsize::new(1)),
            cancel: CancellationToken::new(),
        }
    }

    pub(crate) fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Acquires one unit of interest (a newly opened window) and returns a
    /// one-shot guard that releases it exactly once, whichever side (the
    /// driver completing the window, or the subscriber dropping it) lets go
    /// first.
    pub(crate) fn acquire(&self) -> ReleaseGuard {
        self.active.fetch_add(1, Ordering::AcqRel);
        ReleaseGuard {
            lifetime: self.clone(),
            released: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns the baseline guard for the outer subscriber. Does not acquire
    /// a unit — the baseline `1` is already accounted for at construction.
    pub(crate) fn outer_guard(&self) -> ReleaseGuard {
        ReleaseGuard {
            lifetime: self.clone(),
            released: Arc::new(AtomicBool::new(false)),
        }
    }

    fn release_one(&self) {
        let previous = self.active.fetch_sub(1, Ordering::AcqRel);
        debug_assert!(previous >= 1, "active count underflowed");
        if previous == 1 {
            self.cancel.cancel();
        }
    }
}

/// Releases one unit of [`ActiveLifetime`] interest exactly once.
///
/// Cloning a `ReleaseGuard` shares the same one-shot latch: whichever clone
/// is released (or dropped) first performs the decrement, every other clone
/// becomes a no-op. This is what lets both the driving task (on normal
/// window completion) and the window's `Stream` impl (on early drop by its
/// subscriber) race to release the same window's unit safely.
#[derive(Clone)]
pub(crate) struct ReleaseGuard {
    lifetime: ActiveLifetime,
    released: Arc<AtomicBool>,
}

impl ReleaseGuard {
    pub(crate) fn release(&self) {
        if self.released.compare_exchange(
            false,
            true,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) == Ok(false)
        {
            self.lifetime.release_one();
        }
    }
}

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        self.release();
    }
}
