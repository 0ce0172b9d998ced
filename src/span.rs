// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span handle used by the instrumentation engine.
//!
//! A [`StoreSpan`] is either a *real* span bound to an OpenTelemetry
//! [`Context`], or an inert no-op produced when the trace-only-if-active
//! gate declines tracing. All tagging, error recording, activation, and
//! finishing goes through this handle, so call sites never need to care
//! which of the two they hold: every operation on a no-op span is a silent,
//! side-effect-free no-op, for any call count.

use std::error::Error;
use std::fmt::Display;

use opentelemetry::trace::{Status, TraceContextExt};
use opentelemetry::{global::BoxedSpan, Context, ContextGuard, Value};

/// Handle to one instrumented operation's span.
///
/// Real spans are carried inside a [`Context`] so that activation
/// (`attach`) and late mutation (tags, error status, `end`) share the same
/// synchronized span storage. The handle finishes its span at most once:
/// [`StoreSpan::end`] consumes the handle, and an unfinished real span is
/// still closed by OpenTelemetry's own drop glue if the handle unwinds.
#[derive(Debug)]
pub struct StoreSpan {
    cx: Option<Context>,
}

impl StoreSpan {
    /// A span handle that discards every operation.
    pub(crate) fn noop() -> Self {
        Self { cx: None }
    }

    /// Wrap a freshly started span.
    pub(crate) fn real(span: BoxedSpan) -> Self {
        Self {
            cx: Some(Context::current_with_span(span)),
        }
    }

    /// Whether this handle is the inert no-op variant.
    pub fn is_noop(&self) -> bool {
        self.cx.is_none()
    }

    /// Set a tag on the span. Inert on no-op spans.
    pub fn set_tag(&self, key: &'static str, value: impl Into<Value>) {
        if let Some(cx) = &self.cx {
            cx.span()
                .set_attribute(opentelemetry::KeyValue::new(key, value.into()));
        }
    }

    /// Set a tag rendered through [`Display`].
    ///
    /// Convenience for argument values that are not already
    /// `Into<Value>`; rendering is total and never panics.
    pub fn set_display_tag(&self, key: &'static str, value: &dyn Display) {
        self.set_tag(key, value.to_string());
    }

    /// Mark the span errored and attach the failure as a structured
    /// exception event. The failure itself is untouched; propagation is the
    /// caller's job.
    pub fn record_failure(&self, err: &dyn Error) {
        if let Some(cx) = &self.cx {
            let span = cx.span();
            span.set_status(Status::error(err.to_string()));
            span.record_error(err);
        }
    }

    /// Mark the span errored because the operation was dropped before it
    /// resolved. Cancellation has no failure object to attach, so only the
    /// status carries the reason.
    pub(crate) fn record_cancelled(&self) {
        if let Some(cx) = &self.cx {
            cx.span()
                .set_status(Status::error("operation cancelled before completion"));
        }
    }

    /// Activate the span for the current scope.
    ///
    /// Returns a guard that restores the previous context when dropped.
    /// No-op spans leave the ambient context untouched and return `None`.
    pub fn activate(&self) -> Option<ContextGuard> {
        self.cx.as_ref().map(|cx| cx.clone().attach())
    }

    /// Finish the span. Consumes the handle, so a span is finished at most
    /// once through it.
    pub fn end(self) {
        if let Some(cx) = &self.cx {
            cx.span().end();
        }
    }
}
