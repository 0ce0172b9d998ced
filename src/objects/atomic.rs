// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Distributed atomic counter object family.

use std::sync::Arc;

use async_trait::async_trait;

use super::StoreObject;
use crate::errors::StoreError;
use crate::instrument::Instrumenter;

/// Operations on a named signed 64-bit counter.
#[async_trait]
pub trait AtomicCounterOps: StoreObject {
    fn get(&self) -> Result<i64, StoreError>;
    fn set(&self, value: i64) -> Result<(), StoreError>;
    fn get_and_delete(&self) -> Result<i64, StoreError>;
    fn increment_and_get(&self) -> Result<i64, StoreError>;
    fn decrement_and_get(&self) -> Result<i64, StoreError>;
    fn add_and_get(&self, delta: i64) -> Result<i64, StoreError>;
    fn get_and_add(&self, delta: i64) -> Result<i64, StoreError>;
    fn get_and_set(&self, value: i64) -> Result<i64, StoreError>;
    fn compare_and_set(&self, expect: i64, update: i64) -> Result<bool, StoreError>;

    async fn get_async(&self) -> Result<i64, StoreError>;
    async fn set_async(&self, value: i64) -> Result<(), StoreError>;
    async fn increment_and_get_async(&self) -> Result<i64, StoreError>;
    async fn add_and_get_async(&self, delta: i64) -> Result<i64, StoreError>;
    async fn compare_and_set_async(&self, expect: i64, update: i64) -> Result<bool, StoreError>;
}

/// Traced decorator over any [`AtomicCounterOps`] backend.
pub struct TracedAtomicCounter<B> {
    inner: B,
    instr: Arc<Instrumenter>,
}

impl<B> TracedAtomicCounter<B> {
    pub fn new(inner: B, instr: Arc<Instrumenter>) -> Self {
        Self { inner, instr }
    }

    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B: StoreObject> StoreObject for TracedAtomicCounter<B> {
    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[async_trait]
impl<B> AtomicCounterOps for TracedAtomicCounter<B>
where
    B: AtomicCounterOps + Send + Sync,
{
    fn get(&self) -> Result<i64, StoreError> {
        let span = self.instr.span_for("get", self.inner.name());
        self.instr.decorate(span, || self.inner.get())
    }

    fn set(&self, value: i64) -> Result<(), StoreError> {
        let span = self.instr.span_for("set", self.inner.name());
        span.set_tag("new_value", value);
        self.instr.decorate(span, || self.inner.set(value))
    }

    fn get_and_delete(&self) -> Result<i64, StoreError> {
        let span = self.instr.span_for("get_and_delete", self.inner.name());
        self.instr.decorate(span, || self.inner.get_and_delete())
    }

    fn increment_and_get(&self) -> Result<i64, StoreError> {
        let span = self.instr.span_for("increment_and_get", self.inner.name());
        self.instr.decorate(span, || self.inner.increment_and_get())
    }

    fn decrement_and_get(&self) -> Result<i64, StoreError> {
        let span = self.instr.span_for("decrement_and_get", self.inner.name());
        self.instr.decorate(span, || self.inner.decrement_and_get())
    }

    fn add_and_get(&self, delta: i64) -> Result<i64, StoreError> {
        let span = self.instr.span_for("add_and_get", self.inner.name());
        span.set_tag("delta", delta);
        self.instr.decorate(span, || self.inner.add_and_get(delta))
    }

    fn get_and_add(&self, delta: i64) -> Result<i64, StoreError> {
        let span = self.instr.span_for("get_and_add", self.inner.name());
        span.set_tag("delta", delta);
        self.instr.decorate(span, || self.inner.get_and_add(delta))
    }

    fn get_and_set(&self, value: i64) -> Result<i64, StoreError> {
        let span = self.instr.span_for("get_and_set", self.inner.name());
        span.set_tag("new_value", value);
        self.instr.decorate(span, || self.inner.get_and_set(value))
    }

    fn compare_and_set(&self, expect: i64, update: i64) -> Result<bool, StoreError> {
        let span = self.instr.span_for("compare_and_set", self.inner.name());
        span.set_tag("expect", expect);
        span.set_tag("update", update);
        self.instr
            .decorate(span, || self.inner.compare_and_set(expect, update))
    }

    async fn get_async(&self) -> Result<i64, StoreError> {
        let span = self.instr.span_for("get_async", self.inner.name());
        self.instr
            .prepare_future(span, || Ok(self.inner.get_async()))?
            .await
    }

    async fn set_async(&self, value: i64) -> Result<(), StoreError> {
        let span = self.instr.span_for("set_async", self.inner.name());
        span.set_tag("new_value", value);
        self.instr
            .prepare_future(span, || Ok(self.inner.set_async(value)))?
            .await
    }

    async fn increment_and_get_async(&self) -> Result<i64, StoreError> {
        let span = self.instr.span_for("increment_and_get_async", self.inner.name());
        self.instr
            .prepare_future(span, || Ok(self.inner.increment_and_get_async()))?
            .await
    }

    async fn add_and_get_async(&self, delta: i64) -> Result<i64, StoreError> {
        let span = self.instr.span_for("add_and_get_async", self.inner.name());
        span.set_tag("delta", delta);
        self.instr
            .prepare_future(span, || Ok(self.inner.add_and_get_async(delta)))?
            .await
    }

    async fn compare_and_set_async(&self, expect: i64, update: i64) -> Result<bool, StoreError> {
        let span = self.instr.span_for("compare_and_set_async", self.inner.name());
        span.set_tag("expect", expect);
        span.set_tag("update", update);
        self.instr
            .prepare_future(span, || Ok(self.inner.compare_and_set_async(expect, update)))?
            .await
    }
}
