//! Test lookups — mock `DescriptionLookup` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use doclink_core::code::{ErrorCode, InvocationContext};
use doclink_core::error::ServiceError;
use doclink_core::location::ErrorDescriptionLocation;
use doclink_core::repository::DescriptionLookup;
use tokio::sync::Semaphore;

/// A lookup that answers from a fixed table and records every call.
#[derive(Debug, Default)]
pub struct CountingLookup {
    known: HashMap<ErrorCode, ErrorDescriptionLocation>,
    calls: Mutex<Vec<(ErrorCode, InvocationContext)>>,
}

impl CountingLookup {
    /// A lookup that never finds anything.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A lookup that knows exactly `known`.
    #[must_use]
    pub fn with_entries(
        known: impl IntoIterator<Item = (ErrorCode, ErrorDescriptionLocation)>,
    ) -> Self {
        Self {
            known: known.into_iter().collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Number of times `lookup` was invoked.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns a snapshot of the arguments of every call.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<(ErrorCode, InvocationContext)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DescriptionLookup for CountingLookup {
    async fn lookup(
        &self,
        code: &ErrorCode,
        context: &InvocationContext,
    ) -> Result<Option<ErrorDescriptionLocation>, ServiceError> {
        self.calls
            .lock()
            .unwrap()
            .push((code.clone(), context.clone()));
        Ok(self.known.get(code).cloned())
    }
}

/// A lookup that always fails.
#[derive(Debug)]
pub struct FailingLookup;

#[async_trait]
impl DescriptionLookup for FailingLookup {
    async fn lookup(
        &self,
        _code: &ErrorCode,
        _context: &InvocationContext,
    ) -> Result<Option<ErrorDescriptionLocation>, ServiceError> {
        Err(ServiceError::Lookup("upstream unavailable".into()))
    }
}

/// A lookup that parks every call until `open` is invoked, then answers with
/// the configured result. Used to hold invocations in flight.
#[derive(Debug)]
pub struct GatedLookup {
    gate: Semaphore,
    started: AtomicUsize,
    result: Option<ErrorDescriptionLocation>,
}

impl GatedLookup {
    /// A closed gate that will answer with `result` once opened.
    #[must_use]
    pub fn new(result: Option<ErrorDescriptionLocation>) -> Self {
        Self {
            gate: Semaphore::new(0),
            started: AtomicUsize::new(0),
            result,
        }
    }

    /// Releases every parked and future call.
    pub fn open(&self) {
        self.gate.close();
    }

    /// Number of calls that have reached the gate.
    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Yields to the runtime until at least `count` calls reached the gate.
    pub async fn wait_for_started(&self, count: usize) {
        while self.started() < count {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl DescriptionLookup for GatedLookup {
    async fn lookup(
        &self,
        _code: &ErrorCode,
        _context: &InvocationContext,
    ) -> Result<Option<ErrorDescriptionLocation>, ServiceError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        // A closed semaphore rejects acquisition, which is the open state.
        let _ = self.gate.acquire().await;
        Ok(self.result.clone())
    }
}
