// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Administrative keyspace operations.
//!
//! These are store-global: there is no single target object, so spans carry
//! no `name` tag and key arguments appear as ordinary argument tags.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::StoreError;
use crate::instrument::Instrumenter;
use crate::tags;

/// Operations over the whole keyspace.
#[async_trait]
pub trait KeysOps {
    fn count(&self) -> Result<u64, StoreError>;
    /// Delete the named objects, returning how many existed.
    fn delete(&self, names: &[String]) -> Result<u64, StoreError>;
    fn rename(&self, current_name: &str, new_name: &str) -> Result<(), StoreError>;
    fn flush_all(&self) -> Result<(), StoreError>;

    async fn count_async(&self) -> Result<u64, StoreError>;
    async fn delete_async(&self, names: &[String]) -> Result<u64, StoreError>;
}

/// Traced decorator over any [`KeysOps`] backend.
pub struct TracedKeys<B> {
    inner: B,
    instr: Arc<Instrumenter>,
}

impl<B> TracedKeys<B> {
    pub fn new(inner: B, instr: Arc<Instrumenter>) -> Self {
        Self { inner, instr }
    }

    pub fn into_inner(self) -> B {
        self.inner
    }
}

#[async_trait]
impl<B> KeysOps for TracedKeys<B>
where
    B: KeysOps + Send + Sync,
{
    fn count(&self) -> Result<u64, StoreError> {
        let span = self.instr.span("count");
        self.instr.decorate(span, || self.inner.count())
    }

    fn delete(&self, names: &[String]) -> Result<u64, StoreError> {
        let span = self.instr.span("delete");
        span.set_tag("keys", tags::slice_to_string(names));
        self.instr.decorate(span, || self.inner.delete(names))
    }

    fn rename(&self, current_name: &str, new_name: &str) -> Result<(), StoreError> {
        let span = self.instr.span("rename");
        span.set_tag("current_name", current_name.to_string());
        span.set_tag("new_name", new_name.to_string());
        self.instr
            .decorate(span, || self.inner.rename(current_name, new_name))
    }

    fn flush_all(&self) -> Result<(), StoreError> {
        let span = self.instr.span("flush_all");
        self.instr.decorate(span, || self.inner.flush_all())
    }

    async fn count_async(&self) -> Result<u64, StoreError> {
        let span = self.instr.span("count_async");
        self.instr
            .prepare_future(span, || Ok(self.inner.count_async()))?
            .await
    }

    async fn delete_async(&self, names: &[String]) -> Result<u64, StoreError> {
        let span = self.instr.span("delete_async");
        span.set_tag("keys", tags::slice_to_string(names));
        self.instr
            .prepare_future(span, || Ok(self.inner.delete_async(names)))?
            .await
    }
}
