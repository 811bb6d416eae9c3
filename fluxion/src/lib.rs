// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Fluxion
//!
//! A reactive stream processing library with ordered semantics, friendly interface, and bullet-proof, state-of-the art test coverage and examples.
//!
//! ## Overview
//!
//! Fluxion provides a high-level API for working with ordered, reactive streams.
//! It builds on top of the Rust async ecosystem (tokio, futures) and currently
//! ships the `window_by_count` operator, which re-chunks a stream into a stream
//! of windows (sub-streams) using exact, skip, or overlap strategies.
//!
//! ## Quick Start
//!
//! ```rust
//! use fluxion::prelude::*;
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
//! drop(tx);
//!
//! let mut window = windows.next().await.unwrap().unwrap();
//! assert_eq!(window.next().await.unwrap().unwrap(), 1);
//! # }
//! ```

// Re-export core types
pub use fluxion_core::{CompareByInner, Ordered, OrderedWrapper};
pub use fluxion_error::{FluxionError, Result};

// Re-export the main FluxionStream type
pub use fluxion_stream::FluxionStream;

// Re-export the window_by_count operator
pub use fluxion_stream::{OuterStream, WindowByCountExt, WindowByCountOptions, WindowStream};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::FluxionStream;
    pub use fluxion_core::Ordered;
    pub use fluxion_stream::{OuterStream, WindowByCountExt, WindowByCountOptions, WindowStream};
}
