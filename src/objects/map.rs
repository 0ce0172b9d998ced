// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Hash map object family.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::sync::Arc;

use async_trait::async_trait;

use super::StoreObject;
use crate::errors::StoreError;
use crate::instrument::Instrumenter;
use crate::tags;

/// Operations on a named hash map.
#[async_trait]
pub trait MapOps<K, V>: StoreObject {
    fn size(&self) -> Result<u64, StoreError>;
    fn contains_key(&self, key: &K) -> Result<bool, StoreError>;
    fn get(&self, key: &K) -> Result<Option<V>, StoreError>;
    /// Insert, returning the previous value under the key.
    fn put(&self, key: K, value: V) -> Result<Option<V>, StoreError>;
    fn remove(&self, key: &K) -> Result<Option<V>, StoreError>;
    fn get_all(&self, keys: &[K]) -> Result<HashMap<K, V>, StoreError>;
    fn put_all(&self, entries: HashMap<K, V>) -> Result<(), StoreError>;

    async fn get_async(&self, key: &K) -> Result<Option<V>, StoreError>;
    async fn put_async(&self, key: K, value: V) -> Result<Option<V>, StoreError>;
    async fn remove_async(&self, key: &K) -> Result<Option<V>, StoreError>;
}

/// Traced decorator over any [`MapOps`] backend.
pub struct TracedMap<B> {
    inner: B,
    instr: Arc<Instrumenter>,
}

impl<B> TracedMap<B> {
    pub fn new(inner: B, instr: Arc<Instrumenter>) -> Self {
        Self { inner, instr }
    }

    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B: StoreObject> StoreObject for TracedMap<B> {
    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[async_trait]
impl<B, K, V> MapOps<K, V> for TracedMap<B>
where
    B: MapOps<K, V> + Send + Sync,
    K: Display + Eq + Hash + Send + Sync + 'static,
    V: Display + Send + Sync + 'static,
{
    fn size(&self) -> Result<u64, StoreError> {
        let span = self.instr.span_for("size", self.inner.name());
        self.instr.decorate(span, || self.inner.size())
    }

    fn contains_key(&self, key: &K) -> Result<bool, StoreError> {
        let span = self.instr.span_for("contains_key", self.inner.name());
        span.set_display_tag("key", key);
        self.instr.decorate(span, || self.inner.contains_key(key))
    }

    fn get(&self, key: &K) -> Result<Option<V>, StoreError> {
        let span = self.instr.span_for("get", self.inner.name());
        span.set_display_tag("key", key);
        self.instr.decorate(span, || self.inner.get(key))
    }

    fn put(&self, key: K, value: V) -> Result<Option<V>, StoreError> {
        let span = self.instr.span_for("put", self.inner.name());
        span.set_display_tag("key", &key);
        span.set_display_tag("value", &value);
        self.instr.decorate(span, || self.inner.put(key, value))
    }

    fn remove(&self, key: &K) -> Result<Option<V>, StoreError> {
        let span = self.instr.span_for("remove", self.inner.name());
        span.set_display_tag("key", key);
        self.instr.decorate(span, || self.inner.remove(key))
    }

    fn get_all(&self, keys: &[K]) -> Result<HashMap<K, V>, StoreError> {
        let span = self.instr.span_for("get_all", self.inner.name());
        span.set_tag("keys", tags::collection_to_string(keys));
        self.instr.decorate(span, || self.inner.get_all(keys))
    }

    fn put_all(&self, entries: HashMap<K, V>) -> Result<(), StoreError> {
        let span = self.instr.span_for("put_all", self.inner.name());
        span.set_tag("map", tags::map_to_string(entries.iter()));
        self.instr.decorate(span, || self.inner.put_all(entries))
    }

    async fn get_async(&self, key: &K) -> Result<Option<V>, StoreError> {
        let span = self.instr.span_for("get_async", self.inner.name());
        span.set_display_tag("key", key);
        self.instr
            .prepare_future(span, || Ok(self.inner.get_async(key)))?
            .await
    }

    async fn put_async(&self, key: K, value: V) -> Result<Option<V>, StoreError> {
        let span = self.instr.span_for("put_async", self.inner.name());
        span.set_display_tag("key", &key);
        span.set_display_tag("value", &value);
        self.instr
            .prepare_future(span, || Ok(self.inner.put_async(key, value)))?
            .await
    }

    async fn remove_async(&self, key: &K) -> Result<Option<V>, StoreError> {
        let span = self.instr.span_for("remove_async", self.inner.name());
        span.set_display_tag("key", key);
        self.instr
            .prepare_future(span, || Ok(self.inner.remove_async(key)))?
            .await
    }
}
