// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Distributed lock object family.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::StoreObject;
use crate::errors::StoreError;
use crate::instrument::Instrumenter;

/// Operations on a named distributed lock.
///
/// Blocking acquisition failures (wait expired, connection lost) surface as
/// [`StoreError`]; non-blocking attempts report denial through `Ok(false)`.
#[async_trait]
pub trait LockOps: StoreObject {
    fn lock(&self) -> Result<(), StoreError>;
    /// Acquire with an automatic release after `lease`.
    fn lock_with_lease(&self, lease: Duration) -> Result<(), StoreError>;
    fn try_lock(&self) -> Result<bool, StoreError>;
    fn try_lock_wait(&self, wait: Duration, lease: Option<Duration>) -> Result<bool, StoreError>;
    fn unlock(&self) -> Result<(), StoreError>;
    fn force_unlock(&self) -> Result<bool, StoreError>;
    fn is_locked(&self) -> Result<bool, StoreError>;

    async fn lock_async(&self) -> Result<(), StoreError>;
    async fn try_lock_async(&self) -> Result<bool, StoreError>;
    async fn unlock_async(&self) -> Result<(), StoreError>;
}

/// Traced decorator over any [`LockOps`] backend.
pub struct TracedLock<B> {
    inner: B,
    instr: Arc<Instrumenter>,
}

impl<B> TracedLock<B> {
    pub fn new(inner: B, instr: Arc<Instrumenter>) -> Self {
        Self { inner, instr }
    }

    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B: StoreObject> StoreObject for TracedLock<B> {
    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[async_trait]
impl<B> LockOps for TracedLock<B>
where
    B: LockOps + Send + Sync,
{
    fn lock(&self) -> Result<(), StoreError> {
        let span = self.instr.span_for("lock", self.inner.name());
        self.instr.decorate(span, || self.inner.lock())
    }

    fn lock_with_lease(&self, lease: Duration) -> Result<(), StoreError> {
        let span = self.instr.span_for("lock", self.inner.name());
        span.set_tag("lease_ms", lease.as_millis() as i64);
        self.instr.decorate(span, || self.inner.lock_with_lease(lease))
    }

    fn try_lock(&self) -> Result<bool, StoreError> {
        let span = self.instr.span_for("try_lock", self.inner.name());
        self.instr.decorate(span, || self.inner.try_lock())
    }

    fn try_lock_wait(&self, wait: Duration, lease: Option<Duration>) -> Result<bool, StoreError> {
        let span = self.instr.span_for("try_lock", self.inner.name());
        span.set_tag("wait_ms", wait.as_millis() as i64);
        if let Some(lease) = lease {
            span.set_tag("lease_ms", lease.as_millis() as i64);
        }
        self.instr
            .decorate(span, || self.inner.try_lock_wait(wait, lease))
    }

    fn unlock(&self) -> Result<(), StoreError> {
        let span = self.instr.span_for("unlock", self.inner.name());
        self.instr.decorate(span, || self.inner.unlock())
    }

    fn force_unlock(&self) -> Result<bool, StoreError> {
        let span = self.instr.span_for("force_unlock", self.inner.name());
        self.instr.decorate(span, || self.inner.force_unlock())
    }

    fn is_locked(&self) -> Result<bool, StoreError> {
        let span = self.instr.span_for("is_locked", self.inner.name());
        self.instr.decorate(span, || self.inner.is_locked())
    }

    async fn lock_async(&self) -> Result<(), StoreError> {
        let span = self.instr.span_for("lock_async", self.inner.name());
        self.instr
            .prepare_future(span, || Ok(self.inner.lock_async()))?
            .await
    }

    async fn try_lock_async(&self) -> Result<bool, StoreError> {
        let span = self.instr.span_for("try_lock_async", self.inner.name());
        self.instr
            .prepare_future(span, || Ok(self.inner.try_lock_async()))?
            .await
    }

    async fn unlock_async(&self) -> Result<(), StoreError> {
        let span = self.instr.span_for("unlock_async", self.inner.name());
        self.instr
            .prepare_future(span, || Ok(self.inner.unlock_async()))?
            .await
    }
}
