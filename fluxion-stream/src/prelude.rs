// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prelude module re-exporting all commonly used traits and types.
//!
//! Import this module for convenient access to the Fluxion stream operator:
//!
//! ```ignore
//! use fluxion_stream::prelude::*;
//!
//! let windowed = stream.window_by_count(WindowByCountOptions::exact(3));
//! ```
//!
//! # Contents
//!
//! - [`WindowByCountExt`] - Split a stream into fixed-size (or overlapping/skipping)
//!   sub-stream windows
//! - [`WindowByCountOptions`] - Builder describing window size, skip and queue suppliers
//! - [`WindowStream`] - The per-window sub-stream handed to subscribers
//! - [`FluxionStream`] - Concrete wrapper adding fluxion stream extensions to any stream

pub use crate::window_by_count::{OuterStream, WindowByCountExt, WindowByCountOptions, WindowStream};
pub use crate::FluxionStream;
pub use fluxion_core::{CompareByInner, Ordered, OrderedWrapper};
