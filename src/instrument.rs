// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! The instrumentation engine.
//!
//! An [`Instrumenter`] owns the whole span lifecycle for a wrapped
//! data-store operation: it decides whether to create a span, builds and
//! tags it consistently, runs the unit of work inside the span's active
//! scope, finishes the span exactly once regardless of success, failure, or
//! asynchronous deferral, and re-attaches the originating trace context
//! when an asynchronous operation completes on another thread.
//!
//! The engine is stateless apart from two values fixed at construction (an
//! optional tracer and the trace-only-if-active gate), holds no locks, and
//! is shared via `Arc` across arbitrarily many traced objects and threads.
//!
//! # Examples
//!
//! ```rust,ignore
//! use semiotrace::Instrumenter;
//!
//! let instr = Instrumenter::builder().trace_only_if_active(true).build();
//! let span = instr.span_for("get", "k1");
//! let value = instr.decorate(span, || client.get("k1"))?;
//! ```

use std::error::Error;
use std::future::Future;

use opentelemetry::global::{self, BoxedTracer};
use opentelemetry::trace::{SpanBuilder, SpanKind, TraceContextExt, Tracer};
use opentelemetry::{Context, KeyValue};

use crate::future::TracedFuture;
use crate::span::StoreSpan;

/// Component identity tagged on every span.
pub const COMPONENT_NAME: &str = "semiotrace";

/// Backing-store type tagged on every span.
pub const DB_TYPE: &str = "redis";

/// Builds, activates, and finishes spans around wrapped operations.
#[derive(Debug)]
pub struct Instrumenter {
    /// Explicitly injected tracer; `None` means resolve the process-wide
    /// global tracer at each use.
    tracer: Option<BoxedTracer>,
    /// When set, operations invoked without an active ambient span get a
    /// no-op span instead of starting an orphan root span.
    trace_only_if_active: bool,
}

impl Instrumenter {
    /// Engine using the global tracer with the gate disabled.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start building an engine.
    pub fn builder() -> InstrumenterBuilder {
        InstrumenterBuilder::default()
    }

    /// Whether the trace-only-if-active gate is enabled.
    pub fn trace_only_if_active(&self) -> bool {
        self.trace_only_if_active
    }

    /// Build a span for a store-global operation (no target object).
    pub fn span(&self, operation: &'static str) -> StoreSpan {
        self.build(operation)
    }

    /// Build a span for an operation on a named target object.
    pub fn span_for(&self, operation: &'static str, target: &str) -> StoreSpan {
        let span = self.build(operation);
        span.set_tag("name", target.to_string());
        span
    }

    /// Run `work` inside the span's active scope.
    ///
    /// The scope is released on every exit path; the span is finished
    /// exactly once, after the scope release. A failure is recorded on the
    /// span and then returned unchanged: never swallowed, never wrapped,
    /// and with the caller's concrete error type preserved.
    pub fn decorate<T, E, F>(&self, span: StoreSpan, work: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: Error,
    {
        let result = {
            let _scope = span.activate();
            work()
        };
        if let Err(err) = &result {
            span.record_failure(err);
        }
        span.end();
        result
    }

    /// Issue an asynchronous operation and wrap its handle.
    ///
    /// `start` is invoked immediately. If it fails before producing a
    /// handle, the span is finished with that failure and the error is
    /// returned directly. Otherwise the returned [`TracedFuture`] finishes
    /// the span when the operation resolves and re-attaches the trace
    /// context that was current here, so downstream continuations observe
    /// the same active span as the issuing code did, no matter which
    /// thread completes the operation, and regardless of whether the span
    /// is a no-op.
    pub fn prepare_future<F, Fut, T, E>(
        &self,
        span: StoreSpan,
        start: F,
    ) -> Result<TracedFuture<Fut>, E>
    where
        F: FnOnce() -> Result<Fut, E>,
        Fut: Future<Output = Result<T, E>>,
        E: Error,
    {
        // Captured before dispatch: in nested calls the ambient span here
        // can differ from `span` itself.
        let issued_cx = Context::current();
        match start() {
            Ok(inner) => Ok(TracedFuture::new(inner, span, issued_cx)),
            Err(err) => {
                span.record_failure(&err);
                span.end();
                Err(err)
            }
        }
    }

    fn build(&self, operation: &'static str) -> StoreSpan {
        if self.trace_only_if_active && !Context::current().has_active_span() {
            tracing::trace!(operation, "no active ambient span, declining to trace");
            return StoreSpan::noop();
        }
        let mut builder = SpanBuilder::from_name(operation);
        builder.span_kind = Some(SpanKind::Client);
        builder.attributes = Some(vec![
            KeyValue::new("component", COMPONENT_NAME),
            KeyValue::new("db.type", DB_TYPE),
        ]);
        self.with_tracer(|tracer| StoreSpan::real(tracer.build(builder)))
    }

    /// Single seam for the process-wide global tracer fallback.
    fn with_tracer<R>(&self, f: impl FnOnce(&BoxedTracer) -> R) -> R {
        match &self.tracer {
            Some(tracer) => f(tracer),
            // Resolved per call so a tracer provider installed after this
            // engine was constructed is still picked up.
            None => f(&global::tracer(COMPONENT_NAME)),
        }
    }
}

impl Default for Instrumenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Instrumenter`].
///
/// Both settings are immutable once built.
#[derive(Debug, Default)]
pub struct InstrumenterBuilder {
    tracer: Option<BoxedTracer>,
    trace_only_if_active: bool,
}

impl InstrumenterBuilder {
    /// Inject an explicit tracer instead of the global fallback.
    pub fn with_tracer(mut self, tracer: BoxedTracer) -> Self {
        self.tracer = Some(tracer);
        self
    }

    /// Only trace operations invoked while a span is already active.
    pub fn trace_only_if_active(mut self, gate: bool) -> Self {
        self.trace_only_if_active = gate;
        self
    }

    /// Finish building.
    pub fn build(self) -> Instrumenter {
        Instrumenter {
            tracer: self.tracer,
            trace_only_if_active: self.trace_only_if_active,
        }
    }
}
