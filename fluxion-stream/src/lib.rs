// Copyright 2025 Umberto Gotti
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]

extern crate alloc;

#[macro_use]
mod logging;
pub mod fluxion_stream;
pub mod prelude;
pub mod window_by_count;

// Re-export commonly used types
pub use fluxion_core::{CompareByInner, Ordered, OrderedWrapper};
pub use fluxion_stream::FluxionStream;
pub use window_by_count::{
    OuterStream, QueueSupplier, WindowByCountExt, WindowByCountOptions, WindowStream, WindowWireItem,
};
