// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Traced wrapper around an in-flight asynchronous operation.
//!
//! [`TracedFuture`] composes the two completion behaviors of the engine:
//!
//! 1. **Finish-on-completion**: when the underlying future resolves, a
//!    failure is recorded on the span and the span is finished, exactly
//!    once, no matter what downstream code does with the result.
//! 2. **Scope continuation**: every poll runs with the trace context that
//!    was current when the operation was issued, so continuation code
//!    chained onto the handle observes the same active span as the caller
//!    did, even when the executor resumes it on a different thread.
//!
//! A handle dropped before completion (cancellation) takes neither path
//! above; its drop glue marks the span errored-as-cancelled and finishes
//! it, keeping the exactly-once guarantee.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;
use std::task::{self, Poll};

use futures::ready;
use opentelemetry::Context;
use pin_project::{pin_project, pinned_drop};

use crate::span::StoreSpan;

/// Future returned by [`crate::Instrumenter::prepare_future`].
///
/// Resolves to the underlying operation's output, moved through unchanged.
#[pin_project(PinnedDrop)]
#[must_use = "futures do nothing unless polled"]
pub struct TracedFuture<Fut> {
    #[pin]
    inner: Fut,
    /// Present until the span has been finished.
    span: Option<StoreSpan>,
    /// Trace context captured when the operation was issued.
    issued_cx: Context,
}

impl<Fut> TracedFuture<Fut> {
    pub(crate) fn new(inner: Fut, span: StoreSpan, issued_cx: Context) -> Self {
        Self {
            inner,
            span: Some(span),
            issued_cx,
        }
    }
}

impl<Fut, T, E> Future for TracedFuture<Fut>
where
    Fut: Future<Output = Result<T, E>>,
    E: Error,
{
    type Output = Result<T, E>;

    fn poll(self: Pin<&mut Self>, task_cx: &mut task::Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let _scope = this.issued_cx.clone().attach();
        let output = ready!(this.inner.poll(task_cx));
        if let Some(span) = this.span.take() {
            if let Err(err) = &output {
                span.record_failure(err);
            }
            span.end();
        }
        Poll::Ready(output)
    }
}

#[pinned_drop]
impl<Fut> PinnedDrop for TracedFuture<Fut> {
    fn drop(self: Pin<&mut Self>) {
        let this = self.project();
        // Only reachable when the future was dropped mid-flight; completion
        // disarms the span first.
        if let Some(span) = this.span.take() {
            span.record_cancelled();
            span.end();
        }
    }
}
