//! Mock creation client for testing.

use crate::api::{ApiError, CreateItemPayload, ItemsApi};
use crate::types::Item;
use std::future::Future;
use todo_widget_testing::CallRecorder;

/// One call received by [`MockItemsApi`]
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedCall {
    /// Path the call was made to
    pub path: String,
    /// Payload as it would go over the wire
    pub payload: serde_json::Value,
}

impl RecordedCall {
    /// Whether the payload has every field of `expected` with the same value
    ///
    /// Extra fields in the payload are ignored.
    #[must_use]
    pub fn payload_contains(&self, expected: &serde_json::Value) -> bool {
        match (&self.payload, expected) {
            (serde_json::Value::Object(actual), serde_json::Value::Object(expected)) => expected
                .iter()
                .all(|(key, value)| actual.get(key) == Some(value)),
            (actual, expected) => actual == expected,
        }
    }
}

/// Mock creation client
///
/// Resolves every call to the same pre-declared outcome and records what it
/// was called with. Clones share the record.
#[derive(Debug, Clone)]
pub struct MockItemsApi {
    outcome: Result<Item, ApiError>,
    calls: CallRecorder<RecordedCall>,
}

impl MockItemsApi {
    /// Mock whose every call resolves to `item`
    #[must_use]
    pub fn resolving(item: Item) -> Self {
        Self {
            outcome: Ok(item),
            calls: CallRecorder::new(),
        }
    }

    /// Mock whose every call fails with `error`
    #[must_use]
    pub fn failing(error: ApiError) -> Self {
        Self {
            outcome: Err(error),
            calls: CallRecorder::new(),
        }
    }

    /// Every call received, oldest first
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.calls()
    }

    /// Number of calls received
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.call_count()
    }

    /// Whether some call went to `path` with a payload containing `expected`
    #[must_use]
    pub fn was_called_with(&self, path: &str, expected: &serde_json::Value) -> bool {
        self.calls
            .calls()
            .iter()
            .any(|call| call.path == path && call.payload_contains(expected))
    }
}

impl ItemsApi for MockItemsApi {
    fn create_item(
        &self,
        path: &str,
        payload: &CreateItemPayload,
    ) -> impl Future<Output = Result<Item, ApiError>> + Send {
        let payload = serde_json::to_value(payload)
            .unwrap_or_else(|error| serde_json::Value::String(error.to_string()));
        self.calls.record(RecordedCall {
            path: path.to_string(),
            payload,
        });
        let outcome = self.outcome.clone();
        async move { outcome }
    }
}
