// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Distributed semaphore object family.

use std::sync::Arc;

use async_trait::async_trait;

use super::StoreObject;
use crate::errors::StoreError;
use crate::instrument::Instrumenter;

/// Operations on a named counting semaphore.
#[async_trait]
pub trait SemaphoreOps: StoreObject {
    fn available_permits(&self) -> Result<u32, StoreError>;
    /// Block until `permits` can be taken.
    fn acquire(&self, permits: u32) -> Result<(), StoreError>;
    fn try_acquire(&self, permits: u32) -> Result<bool, StoreError>;
    fn release(&self, permits: u32) -> Result<(), StoreError>;
    /// Reset the permit count.
    fn set_permits(&self, permits: u32) -> Result<(), StoreError>;

    async fn acquire_async(&self, permits: u32) -> Result<(), StoreError>;
    async fn release_async(&self, permits: u32) -> Result<(), StoreError>;
}

/// Traced decorator over any [`SemaphoreOps`] backend.
pub struct TracedSemaphore<B> {
    inner: B,
    instr: Arc<Instrumenter>,
}

impl<B> TracedSemaphore<B> {
    pub fn new(inner: B, instr: Arc<Instrumenter>) -> Self {
        Self { inner, instr }
    }

    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B: StoreObject> StoreObject for TracedSemaphore<B> {
    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[async_trait]
impl<B> SemaphoreOps for TracedSemaphore<B>
where
    B: SemaphoreOps + Send + Sync,
{
    fn available_permits(&self) -> Result<u32, StoreError> {
        let span = self.instr.span_for("available_permits", self.inner.name());
        self.instr.decorate(span, || self.inner.available_permits())
    }

    fn acquire(&self, permits: u32) -> Result<(), StoreError> {
        let span = self.instr.span_for("acquire", self.inner.name());
        span.set_tag("permits", i64::from(permits));
        self.instr.decorate(span, || self.inner.acquire(permits))
    }

    fn try_acquire(&self, permits: u32) -> Result<bool, StoreError> {
        let span = self.instr.span_for("try_acquire", self.inner.name());
        span.set_tag("permits", i64::from(permits));
        self.instr.decorate(span, || self.inner.try_acquire(permits))
    }

    fn release(&self, permits: u32) -> Result<(), StoreError> {
        let span = self.instr.span_for("release", self.inner.name());
        span.set_tag("permits", i64::from(permits));
        self.instr.decorate(span, || self.inner.release(permits))
    }

    fn set_permits(&self, permits: u32) -> Result<(), StoreError> {
        let span = self.instr.span_for("set_permits", self.inner.name());
        span.set_tag("permits", i64::from(permits));
        self.instr.decorate(span, || self.inner.set_permits(permits))
    }

    async fn acquire_async(&self, permits: u32) -> Result<(), StoreError> {
        let span = self.instr.span_for("acquire_async", self.inner.name());
        span.set_tag("permits", i64::from(permits));
        self.instr
            .prepare_future(span, || Ok(self.inner.acquire_async(permits)))?
            .await
    }

    async fn release_async(&self, permits: u32) -> Result<(), StoreError> {
        let span = self.instr.span_for("release_async", self.inner.name());
        span.set_tag("permits", i64::from(permits));
        self.instr
            .prepare_future(span, || Ok(self.inner.release_async(permits)))?
            .await
    }
}
