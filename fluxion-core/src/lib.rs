// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]

extern crate alloc;

pub mod cancellation_token;
pub mod compare_by_inner;
pub mod fluxion;
pub mod fluxion_mutex;
pub mod fluxion_task;
pub mod has_timestamp;
pub mod ordered;
pub mod stream_item;
pub mod timestamped;

pub use cancellation_token::CancellationToken;
pub use compare_by_inner::CompareByInner;
pub use fluxion::Fluxion;
pub use fluxion_error::{FluxionError, IntoFluxionError, Result, ResultExt};
pub use fluxion_task::FluxionTask;
pub use has_timestamp::HasTimestamp;
pub use ordered::{Ordered, OrderedWrapper};
pub use stream_item::StreamItem;
pub use timestamped::Timestamped;
