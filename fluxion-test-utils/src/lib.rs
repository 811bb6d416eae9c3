// Copyright 2025 Umberto Gotti
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
pub mod animal;
pub mod error_injection;
pub mod helpers;
pub mod person;
pub mod plant;
pub mod sequenced;
pub mod test_data;

// Re-export commonly used test utilities
pub use error_injection::{CountingDropStream, DropCounter, ErrorInjectingStream};
pub use helpers::{
    assert_no_element_emitted, assert_stream_ended, test_channel, test_channel_with_errors,
    unwrap_stream, unwrap_value,
};
pub use sequenced::Sequenced;
pub use test_data::{push, send_variant, DataVariant, TestData};
