// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! FIFO queue object family.

use std::fmt::Display;
use std::sync::Arc;

use async_trait::async_trait;

use super::StoreObject;
use crate::errors::StoreError;
use crate::instrument::Instrumenter;
use crate::tags;

/// Operations on a named FIFO queue.
#[async_trait]
pub trait QueueOps<V>: StoreObject {
    fn size(&self) -> Result<u64, StoreError>;
    /// Enqueue; `Ok(false)` means the queue refused the element (bounded
    /// queue at capacity).
    fn offer(&self, value: V) -> Result<bool, StoreError>;
    /// Dequeue the head, if any.
    fn poll(&self) -> Result<Option<V>, StoreError>;
    /// Inspect the head without removing it.
    fn peek(&self) -> Result<Option<V>, StoreError>;
    fn offer_all(&self, values: Vec<V>) -> Result<bool, StoreError>;

    async fn offer_async(&self, value: V) -> Result<bool, StoreError>;
    async fn poll_async(&self) -> Result<Option<V>, StoreError>;
}

/// Traced decorator over any [`QueueOps`] backend.
pub struct TracedQueue<B> {
    inner: B,
    instr: Arc<Instrumenter>,
}

impl<B> TracedQueue<B> {
    pub fn new(inner: B, instr: Arc<Instrumenter>) -> Self {
        Self { inner, instr }
    }

    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B: StoreObject> StoreObject for TracedQueue<B> {
    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[async_trait]
impl<B, V> QueueOps<V> for TracedQueue<B>
where
    B: QueueOps<V> + Send + Sync,
    V: Display + Send + Sync + 'static,
{
    fn size(&self) -> Result<u64, StoreError> {
        let span = self.instr.span_for("size", self.inner.name());
        self.instr.decorate(span, || self.inner.size())
    }

    fn offer(&self, value: V) -> Result<bool, StoreError> {
        let span = self.instr.span_for("offer", self.inner.name());
        span.set_display_tag("element", &value);
        self.instr.decorate(span, || self.inner.offer(value))
    }

    fn poll(&self) -> Result<Option<V>, StoreError> {
        let span = self.instr.span_for("poll", self.inner.name());
        self.instr.decorate(span, || self.inner.poll())
    }

    fn peek(&self) -> Result<Option<V>, StoreError> {
        let span = self.instr.span_for("peek", self.inner.name());
        self.instr.decorate(span, || self.inner.peek())
    }

    fn offer_all(&self, values: Vec<V>) -> Result<bool, StoreError> {
        let span = self.instr.span_for("offer_all", self.inner.name());
        span.set_tag("elements", tags::collection_to_string(&values));
        self.instr.decorate(span, || self.inner.offer_all(values))
    }

    async fn offer_async(&self, value: V) -> Result<bool, StoreError> {
        let span = self.instr.span_for("offer_async", self.inner.name());
        span.set_display_tag("element", &value);
        self.instr
            .prepare_future(span, || Ok(self.inner.offer_async(value)))?
            .await
    }

    async fn poll_async(&self) -> Result<Option<V>, StoreError> {
        let span = self.instr.span_for("poll_async", self.inner.name());
        self.instr
            .prepare_future(span, || Ok(self.inner.poll_async()))?
            .await
    }
}
