// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for semiotrace integration tests
//!
//! Provides an in-memory tracing fixture plus mock backend implementations
//! of the object traits, so tests can observe exported spans without a real
//! data store or collector.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use opentelemetry::global::BoxedTracer;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::{InMemorySpanExporter, SdkTracerProvider, SpanData};

use semiotrace::errors::StoreError;
use semiotrace::objects::{
    AtomicCounterOps, BucketOps, KeysOps, LockOps, MapOps, QueueOps, SemaphoreOps, StoreObject,
};

/// In-memory tracer pipeline: spans finished through tracers from this
/// fixture land in `exporter` immediately.
pub struct TraceFixture {
    pub exporter: InMemorySpanExporter,
    pub provider: SdkTracerProvider,
}

/// Install a fmt subscriber once so library diagnostics show up under
/// `RUST_LOG` when debugging tests.
fn init_logging() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

impl TraceFixture {
    pub fn new() -> Self {
        init_logging();
        let exporter = InMemorySpanExporter::default();
        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(exporter.clone())
            .build();
        Self { exporter, provider }
    }

    /// A boxed tracer suitable for `InstrumenterBuilder::with_tracer`.
    pub fn tracer(&self) -> BoxedTracer {
        BoxedTracer::new(Box::new(self.provider.tracer("semiotrace-tests")))
    }

    pub fn finished_spans(&self) -> Vec<SpanData> {
        self.exporter
            .get_finished_spans()
            .expect("in-memory exporter never fails")
    }
}

/// Look up a span attribute's rendered string value.
pub fn attr_str(span: &SpanData, key: &str) -> Option<String> {
    span.attributes
        .iter()
        .find(|kv| kv.key.as_str() == key)
        .map(|kv| kv.value.as_str().into_owned())
}

/// Queued failure injection shared by the mock backends.
///
/// `arm` loads exactly one failure; the next operation takes and returns
/// it, later operations succeed again.
#[derive(Default)]
pub struct FailureSlot(Mutex<Option<StoreError>>);

impl FailureSlot {
    pub fn arm(&self, err: StoreError) {
        *self.0.lock().unwrap() = Some(err);
    }

    fn take(&self) -> Result<(), StoreError> {
        match self.0.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Mock single-value holder over `String` values.
pub struct MockBucket {
    name: String,
    value: Mutex<Option<String>>,
    pub failure: FailureSlot,
}

impl MockBucket {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Mutex::new(None),
            failure: FailureSlot::default(),
        }
    }

    pub fn with_value(self, value: impl Into<String>) -> Self {
        *self.value.lock().unwrap() = Some(value.into());
        self
    }

    pub fn fail_next(&self, err: StoreError) {
        self.failure.arm(err);
    }
}

impl StoreObject for MockBucket {
    fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl BucketOps<String> for MockBucket {
    fn size(&self) -> Result<u64, StoreError> {
        self.failure.take()?;
        Ok(self
            .value
            .lock()
            .unwrap()
            .as_ref()
            .map_or(0, |v| v.len() as u64))
    }

    fn get(&self) -> Result<Option<String>, StoreError> {
        self.failure.take()?;
        Ok(self.value.lock().unwrap().clone())
    }

    fn get_and_delete(&self) -> Result<Option<String>, StoreError> {
        self.failure.take()?;
        Ok(self.value.lock().unwrap().take())
    }

    fn set(&self, value: Option<String>) -> Result<(), StoreError> {
        self.failure.take()?;
        *self.value.lock().unwrap() = value;
        Ok(())
    }

    fn set_with_ttl(
        &self,
        value: Option<String>,
        _ttl: std::time::Duration,
    ) -> Result<(), StoreError> {
        self.set(value)
    }

    fn try_set(&self, value: Option<String>) -> Result<bool, StoreError> {
        self.failure.take()?;
        let mut held = self.value.lock().unwrap();
        if held.is_none() {
            *held = value;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn compare_and_set(
        &self,
        expect: Option<String>,
        update: Option<String>,
    ) -> Result<bool, StoreError> {
        self.failure.take()?;
        let mut held = self.value.lock().unwrap();
        if *held == expect {
            *held = update;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn get_and_set(&self, value: Option<String>) -> Result<Option<String>, StoreError> {
        self.failure.take()?;
        let mut held = self.value.lock().unwrap();
        let previous = held.take();
        *held = value;
        Ok(previous)
    }

    async fn get_async(&self) -> Result<Option<String>, StoreError> {
        self.get()
    }

    async fn set_async(&self, value: Option<String>) -> Result<(), StoreError> {
        self.set(value)
    }

    async fn get_and_set_async(
        &self,
        value: Option<String>,
    ) -> Result<Option<String>, StoreError> {
        self.get_and_set(value)
    }

    async fn compare_and_set_async(
        &self,
        expect: Option<String>,
        update: Option<String>,
    ) -> Result<bool, StoreError> {
        self.compare_and_set(expect, update)
    }
}

/// Mock signed counter.
pub struct MockCounter {
    name: String,
    value: Mutex<i64>,
    pub failure: FailureSlot,
}

impl MockCounter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Mutex::new(0),
            failure: FailureSlot::default(),
        }
    }
}

impl StoreObject for MockCounter {
    fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl AtomicCounterOps for MockCounter {
    fn get(&self) -> Result<i64, StoreError> {
        self.failure.take()?;
        Ok(*self.value.lock().unwrap())
    }

    fn set(&self, value: i64) -> Result<(), StoreError> {
        self.failure.take()?;
        *self.value.lock().unwrap() = value;
        Ok(())
    }

    fn get_and_delete(&self) -> Result<i64, StoreError> {
        self.failure.take()?;
        let mut held = self.value.lock().unwrap();
        let previous = *held;
        *held = 0;
        Ok(previous)
    }

    fn increment_and_get(&self) -> Result<i64, StoreError> {
        self.add_and_get(1)
    }

    fn decrement_and_get(&self) -> Result<i64, StoreError> {
        self.add_and_get(-1)
    }

    fn add_and_get(&self, delta: i64) -> Result<i64, StoreError> {
        self.failure.take()?;
        let mut held = self.value.lock().unwrap();
        *held += delta;
        Ok(*held)
    }

    fn get_and_add(&self, delta: i64) -> Result<i64, StoreError> {
        self.failure.take()?;
        let mut held = self.value.lock().unwrap();
        let previous = *held;
        *held += delta;
        Ok(previous)
    }

    fn get_and_set(&self, value: i64) -> Result<i64, StoreError> {
        self.failure.take()?;
        let mut held = self.value.lock().unwrap();
        let previous = *held;
        *held = value;
        Ok(previous)
    }

    fn compare_and_set(&self, expect: i64, update: i64) -> Result<bool, StoreError> {
        self.failure.take()?;
        let mut held = self.value.lock().unwrap();
        if *held == expect {
            *held = update;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn get_async(&self) -> Result<i64, StoreError> {
        self.get()
    }

    async fn set_async(&self, value: i64) -> Result<(), StoreError> {
        self.set(value)
    }

    async fn increment_and_get_async(&self) -> Result<i64, StoreError> {
        self.increment_and_get()
    }

    async fn add_and_get_async(&self, delta: i64) -> Result<i64, StoreError> {
        self.add_and_get(delta)
    }

    async fn compare_and_set_async(&self, expect: i64, update: i64) -> Result<bool, StoreError> {
        self.compare_and_set(expect, update)
    }
}

/// Mock hash map over `String` keys and values.
pub struct MockMap {
    name: String,
    entries: Mutex<HashMap<String, String>>,
    pub failure: FailureSlot,
}

impl MockMap {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Mutex::new(HashMap::new()),
            failure: FailureSlot::default(),
        }
    }
}

impl StoreObject for MockMap {
    fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl MapOps<String, String> for MockMap {
    fn size(&self) -> Result<u64, StoreError> {
        self.failure.take()?;
        Ok(self.entries.lock().unwrap().len() as u64)
    }

    fn contains_key(&self, key: &String) -> Result<bool, StoreError> {
        self.failure.take()?;
        Ok(self.entries.lock().unwrap().contains_key(key))
    }

    fn get(&self, key: &String) -> Result<Option<String>, StoreError> {
        self.failure.take()?;
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn put(&self, key: String, value: String) -> Result<Option<String>, StoreError> {
        self.failure.take()?;
        Ok(self.entries.lock().unwrap().insert(key, value))
    }

    fn remove(&self, key: &String) -> Result<Option<String>, StoreError> {
        self.failure.take()?;
        Ok(self.entries.lock().unwrap().remove(key))
    }

    fn get_all(&self, keys: &[String]) -> Result<HashMap<String, String>, StoreError> {
        self.failure.take()?;
        let entries = self.entries.lock().unwrap();
        Ok(keys
            .iter()
            .filter_map(|k| entries.get(k).map(|v| (k.clone(), v.clone())))
            .collect())
    }

    fn put_all(&self, new_entries: HashMap<String, String>) -> Result<(), StoreError> {
        self.failure.take()?;
        self.entries.lock().unwrap().extend(new_entries);
        Ok(())
    }

    async fn get_async(&self, key: &String) -> Result<Option<String>, StoreError> {
        self.get(key)
    }

    async fn put_async(&self, key: String, value: String) -> Result<Option<String>, StoreError> {
        self.put(key, value)
    }

    async fn remove_async(&self, key: &String) -> Result<Option<String>, StoreError> {
        self.remove(key)
    }
}

/// Mock lock. Acquisition is non-reentrant; a blocking acquire on a held
/// lock fails with a timeout so tests never actually block.
pub struct MockLock {
    name: String,
    held: Mutex<bool>,
    pub failure: FailureSlot,
}

impl MockLock {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            held: Mutex::new(false),
            failure: FailureSlot::default(),
        }
    }
}

impl StoreObject for MockLock {
    fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl LockOps for MockLock {
    fn lock(&self) -> Result<(), StoreError> {
        self.failure.take()?;
        let mut held = self.held.lock().unwrap();
        if *held {
            return Err(StoreError::timeout(format!("lock {}", self.name)));
        }
        *held = true;
        Ok(())
    }

    fn lock_with_lease(&self, _lease: std::time::Duration) -> Result<(), StoreError> {
        self.lock()
    }

    fn try_lock(&self) -> Result<bool, StoreError> {
        self.failure.take()?;
        let mut held = self.held.lock().unwrap();
        if *held {
            Ok(false)
        } else {
            *held = true;
            Ok(true)
        }
    }

    fn try_lock_wait(
        &self,
        _wait: std::time::Duration,
        _lease: Option<std::time::Duration>,
    ) -> Result<bool, StoreError> {
        self.try_lock()
    }

    fn unlock(&self) -> Result<(), StoreError> {
        self.failure.take()?;
        *self.held.lock().unwrap() = false;
        Ok(())
    }

    fn force_unlock(&self) -> Result<bool, StoreError> {
        self.failure.take()?;
        let mut held = self.held.lock().unwrap();
        let was_held = *held;
        *held = false;
        Ok(was_held)
    }

    fn is_locked(&self) -> Result<bool, StoreError> {
        self.failure.take()?;
        Ok(*self.held.lock().unwrap())
    }

    async fn lock_async(&self) -> Result<(), StoreError> {
        self.lock()
    }

    async fn try_lock_async(&self) -> Result<bool, StoreError> {
        self.try_lock()
    }

    async fn unlock_async(&self) -> Result<(), StoreError> {
        self.unlock()
    }
}

/// Mock FIFO queue over `String` elements.
pub struct MockQueue {
    name: String,
    items: Mutex<VecDeque<String>>,
    pub failure: FailureSlot,
}

impl MockQueue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Mutex::new(VecDeque::new()),
            failure: FailureSlot::default(),
        }
    }
}

impl StoreObject for MockQueue {
    fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl QueueOps<String> for MockQueue {
    fn size(&self) -> Result<u64, StoreError> {
        self.failure.take()?;
        Ok(self.items.lock().unwrap().len() as u64)
    }

    fn offer(&self, value: String) -> Result<bool, StoreError> {
        self.failure.take()?;
        self.items.lock().unwrap().push_back(value);
        Ok(true)
    }

    fn poll(&self) -> Result<Option<String>, StoreError> {
        self.failure.take()?;
        Ok(self.items.lock().unwrap().pop_front())
    }

    fn peek(&self) -> Result<Option<String>, StoreError> {
        self.failure.take()?;
        Ok(self.items.lock().unwrap().front().cloned())
    }

    fn offer_all(&self, values: Vec<String>) -> Result<bool, StoreError> {
        self.failure.take()?;
        self.items.lock().unwrap().extend(values);
        Ok(true)
    }

    async fn offer_async(&self, value: String) -> Result<bool, StoreError> {
        self.offer(value)
    }

    async fn poll_async(&self) -> Result<Option<String>, StoreError> {
        self.poll()
    }
}

/// Mock counting semaphore.
pub struct MockSemaphore {
    name: String,
    permits: Mutex<u32>,
    pub failure: FailureSlot,
}

impl MockSemaphore {
    pub fn new(name: impl Into<String>, permits: u32) -> Self {
        Self {
            name: name.into(),
            permits: Mutex::new(permits),
            failure: FailureSlot::default(),
        }
    }
}

impl StoreObject for MockSemaphore {
    fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl SemaphoreOps for MockSemaphore {
    fn available_permits(&self) -> Result<u32, StoreError> {
        self.failure.take()?;
        Ok(*self.permits.lock().unwrap())
    }

    fn acquire(&self, permits: u32) -> Result<(), StoreError> {
        self.failure.take()?;
        let mut available = self.permits.lock().unwrap();
        if *available < permits {
            return Err(StoreError::timeout(format!("acquire {}", self.name)));
        }
        *available -= permits;
        Ok(())
    }

    fn try_acquire(&self, permits: u32) -> Result<bool, StoreError> {
        self.failure.take()?;
        let mut available = self.permits.lock().unwrap();
        if *available < permits {
            Ok(false)
        } else {
            *available -= permits;
            Ok(true)
        }
    }

    fn release(&self, permits: u32) -> Result<(), StoreError> {
        self.failure.take()?;
        *self.permits.lock().unwrap() += permits;
        Ok(())
    }

    fn set_permits(&self, permits: u32) -> Result<(), StoreError> {
        self.failure.take()?;
        *self.permits.lock().unwrap() = permits;
        Ok(())
    }

    async fn acquire_async(&self, permits: u32) -> Result<(), StoreError> {
        self.acquire(permits)
    }

    async fn release_async(&self, permits: u32) -> Result<(), StoreError> {
        self.release(permits)
    }
}

/// Mock keyspace admin surface.
pub struct MockKeys {
    names: Mutex<HashSet<String>>,
    pub failure: FailureSlot,
}

impl MockKeys {
    pub fn new(names: &[&str]) -> Self {
        Self {
            names: Mutex::new(names.iter().map(|n| n.to_string()).collect()),
            failure: FailureSlot::default(),
        }
    }
}

#[async_trait]
impl KeysOps for MockKeys {
    fn count(&self) -> Result<u64, StoreError> {
        self.failure.take()?;
        Ok(self.names.lock().unwrap().len() as u64)
    }

    fn delete(&self, names: &[String]) -> Result<u64, StoreError> {
        self.failure.take()?;
        let mut held = self.names.lock().unwrap();
        Ok(names.iter().filter(|n| held.remove(*n)).count() as u64)
    }

    fn rename(&self, current_name: &str, new_name: &str) -> Result<(), StoreError> {
        self.failure.take()?;
        let mut held = self.names.lock().unwrap();
        if !held.remove(current_name) {
            return Err(StoreError::InvalidArgument {
                reason: format!("no such key: {current_name}"),
            });
        }
        held.insert(new_name.to_string());
        Ok(())
    }

    fn flush_all(&self) -> Result<(), StoreError> {
        self.failure.take()?;
        self.names.lock().unwrap().clear();
        Ok(())
    }

    async fn count_async(&self) -> Result<u64, StoreError> {
        self.count()
    }

    async fn delete_async(&self, names: &[String]) -> Result<u64, StoreError> {
        self.delete(names)
    }
}
