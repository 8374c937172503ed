//! In-memory check source for tests.

use super::{Check, CheckParameters, CheckResult, CheckSource, SourceError};

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeSource {
    checks: Mutex<Option<Result<HashMap<String, Check>, SourceError>>>,
    results: Mutex<HashMap<String, Result<CheckResult, SourceError>>>,
    pub result_calls: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a check together with the result its lookup returns.
    pub fn with_check(
        self,
        (id, check): (String, Check),
        result: Result<CheckResult, SourceError>,
    ) -> Self {
        {
            let mut checks = self.checks.lock().unwrap();
            let map = checks.get_or_insert_with(|| Ok(HashMap::new()));
            if let Ok(map) = map {
                map.insert(id.clone(), check);
            }
        }
        self.set_result(&id, result);
        self
    }

    /// Make the list call fail.
    pub fn with_list_error(self, err: SourceError) -> Self {
        self.set_list(Err(err));
        self
    }

    pub fn set_list(&self, checks: Result<HashMap<String, Check>, SourceError>) {
        *self.checks.lock().unwrap() = Some(checks);
    }

    pub fn set_result(&self, check_id: &str, result: Result<CheckResult, SourceError>) {
        self.results
            .lock()
            .unwrap()
            .insert(check_id.to_string(), result);
    }

    /// The checks currently registered, for restoring a list after a failure.
    pub fn checks(&self) -> HashMap<String, Check> {
        match self.checks.lock().unwrap().as_ref() {
            Some(Ok(map)) => map.clone(),
            _ => HashMap::new(),
        }
    }
}

impl CheckSource for FakeSource {
    async fn list_checks(&self) -> Result<HashMap<String, Check>, SourceError> {
        self.checks
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(HashMap::new()))
    }

    async fn latest_result(&self, check_id: &str) -> Result<CheckResult, SourceError> {
        self.result_calls.fetch_add(1, Ordering::SeqCst);
        self.results
            .lock()
            .unwrap()
            .get(check_id)
            .cloned()
            .unwrap_or_else(|| Err(SourceError::EmptyResult(check_id.to_string())))
    }

    async fn verify_access(&self) -> Result<(), SourceError> {
        Ok(())
    }
}

/// A check and the identifier it is listed under.
pub fn check(id: &str, label: &str, check_type: &str, target: &str) -> (String, Check) {
    let check = Check {
        label: label.to_string(),
        check_type: check_type.to_string(),
        parameters: CheckParameters {
            target: target.to_string(),
        },
    };
    (id.to_string(), check)
}

pub fn result(check_type: &str, target: &str, success: bool, duration_ms: u64) -> CheckResult {
    CheckResult {
        check_type: check_type.to_string(),
        target: target.to_string(),
        result: if success { "200" } else { "500" }.to_string(),
        message: String::new(),
        success,
        duration_ms,
    }
}

pub fn unavailable() -> SourceError {
    SourceError::Unavailable {
        url: "http://nodeping.test/checks".to_string(),
        reason: "got status code 500".to_string(),
    }
}
