// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Single-value holder ("bucket") object family.

use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::StoreObject;
use crate::errors::StoreError;
use crate::instrument::Instrumenter;
use crate::tags;

/// Operations on a named single-value holder.
///
/// Setting `None` clears the held value.
#[async_trait]
pub trait BucketOps<V>: StoreObject {
    /// Size of the held value in bytes.
    fn size(&self) -> Result<u64, StoreError>;
    fn get(&self) -> Result<Option<V>, StoreError>;
    fn get_and_delete(&self) -> Result<Option<V>, StoreError>;
    fn set(&self, value: Option<V>) -> Result<(), StoreError>;
    fn set_with_ttl(&self, value: Option<V>, ttl: Duration) -> Result<(), StoreError>;
    /// Set only if no value is currently held.
    fn try_set(&self, value: Option<V>) -> Result<bool, StoreError>;
    fn compare_and_set(&self, expect: Option<V>, update: Option<V>) -> Result<bool, StoreError>;
    fn get_and_set(&self, value: Option<V>) -> Result<Option<V>, StoreError>;

    async fn get_async(&self) -> Result<Option<V>, StoreError>;
    async fn set_async(&self, value: Option<V>) -> Result<(), StoreError>;
    async fn get_and_set_async(&self, value: Option<V>) -> Result<Option<V>, StoreError>;
    async fn compare_and_set_async(
        &self,
        expect: Option<V>,
        update: Option<V>,
    ) -> Result<bool, StoreError>;
}

/// Traced decorator over any [`BucketOps`] backend.
pub struct TracedBucket<B> {
    inner: B,
    instr: Arc<Instrumenter>,
}

impl<B> TracedBucket<B> {
    pub fn new(inner: B, instr: Arc<Instrumenter>) -> Self {
        Self { inner, instr }
    }

    /// Unwrap the underlying backend.
    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B: StoreObject> StoreObject for TracedBucket<B> {
    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[async_trait]
impl<B, V> BucketOps<V> for TracedBucket<B>
where
    B: BucketOps<V> + Send + Sync,
    V: Display + Send + Sync + 'static,
{
    fn size(&self) -> Result<u64, StoreError> {
        let span = self.instr.span_for("size", self.inner.name());
        self.instr.decorate(span, || self.inner.size())
    }

    fn get(&self) -> Result<Option<V>, StoreError> {
        let span = self.instr.span_for("get", self.inner.name());
        self.instr.decorate(span, || self.inner.get())
    }

    fn get_and_delete(&self) -> Result<Option<V>, StoreError> {
        let span = self.instr.span_for("get_and_delete", self.inner.name());
        self.instr.decorate(span, || self.inner.get_and_delete())
    }

    fn set(&self, value: Option<V>) -> Result<(), StoreError> {
        let span = self.instr.span_for("set", self.inner.name());
        span.set_tag("value", tags::nullable(value.as_ref()));
        self.instr.decorate(span, || self.inner.set(value))
    }

    fn set_with_ttl(&self, value: Option<V>, ttl: Duration) -> Result<(), StoreError> {
        let span = self.instr.span_for("set", self.inner.name());
        span.set_tag("value", tags::nullable(value.as_ref()));
        span.set_tag("ttl_ms", ttl.as_millis() as i64);
        self.instr.decorate(span, || self.inner.set_with_ttl(value, ttl))
    }

    fn try_set(&self, value: Option<V>) -> Result<bool, StoreError> {
        let span = self.instr.span_for("try_set", self.inner.name());
        span.set_tag("value", tags::nullable(value.as_ref()));
        self.instr.decorate(span, || self.inner.try_set(value))
    }

    fn compare_and_set(&self, expect: Option<V>, update: Option<V>) -> Result<bool, StoreError> {
        let span = self.instr.span_for("compare_and_set", self.inner.name());
        span.set_tag("expect", tags::nullable(expect.as_ref()));
        span.set_tag("update", tags::nullable(update.as_ref()));
        self.instr
            .decorate(span, || self.inner.compare_and_set(expect, update))
    }

    fn get_and_set(&self, value: Option<V>) -> Result<Option<V>, StoreError> {
        let span = self.instr.span_for("get_and_set", self.inner.name());
        span.set_tag("value", tags::nullable(value.as_ref()));
        self.instr.decorate(span, || self.inner.get_and_set(value))
    }

    async fn get_async(&self) -> Result<Option<V>, StoreError> {
        let span = self.instr.span_for("get_async", self.inner.name());
        self.instr
            .prepare_future(span, || Ok(self.inner.get_async()))?
            .await
    }

    async fn set_async(&self, value: Option<V>) -> Result<(), StoreError> {
        let span = self.instr.span_for("set_async", self.inner.name());
        span.set_tag("value", tags::nullable(value.as_ref()));
        self.instr
            .prepare_future(span, || Ok(self.inner.set_async(value)))?
            .await
    }

    async fn get_and_set_async(&self, value: Option<V>) -> Result<Option<V>, StoreError> {
        let span = self.instr.span_for("get_and_set_async", self.inner.name());
        span.set_tag("value", tags::nullable(value.as_ref()));
        self.instr
            .prepare_future(span, || Ok(self.inner.get_and_set_async(value)))?
            .await
    }

    async fn compare_and_set_async(
        &self,
        expect: Option<V>,
        update: Option<V>,
    ) -> Result<bool, StoreError> {
        let span = self.instr.span_for("compare_and_set_async", self.inner.name());
        span.set_tag("expect", tags::nullable(expect.as_ref()));
        span.set_tag("update", tags::nullable(update.as_ref()));
        self.instr
            .prepare_future(span, || Ok(self.inner.compare_and_set_async(expect, update)))?
            .await
    }
}
