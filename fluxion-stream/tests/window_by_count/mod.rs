// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub mod window_by_count_cancellation_tests;
pub mod window_by_count_error_tests;
pub mod window_by_count_exact_tests;
