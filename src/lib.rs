// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transparent OpenTelemetry instrumentation for key-value data-store
//! clients.
//!
//! Wrap any backend implementing the object traits in [`objects`] and every
//! operation, synchronous or asynchronous, runs inside a client span with
//! consistent attributes, error tagging, and trace-context propagation
//! across async completion. Results and failures reach the caller exactly
//! as the unwrapped client would return them.

pub mod errors;
mod future;
mod instrument;
pub mod objects;
mod span;
pub mod tags;

pub use errors::StoreError;
pub use future::TracedFuture;
pub use instrument::{Instrumenter, InstrumenterBuilder, COMPONENT_NAME, DB_TYPE};
pub use span::StoreSpan;
