//! The item-creation client.
//!
//! The widget never talks to a service directly. It calls
//! [`ItemsApi::create_item`] on whatever implementation its environment was
//! built with: [`InMemoryItemsApi`] for the demo, a mock in tests, an HTTP
//! client in a real deployment.

use crate::types::{Item, ItemId};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;

/// Resource path items are created under
pub const ITEMS_PATH: &str = "/items";

/// Body of a creation call
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateItemPayload {
    /// Text of the new item, exactly as typed
    pub text: String,
}

impl CreateItemPayload {
    /// Creates a payload
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Errors from the creation client
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The call never reached the service or its answer was unreadable
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service refused to create the item
    #[error("Rejected ({status}): {message}")]
    Rejected {
        /// Status code reported by the service
        status: u16,
        /// Reason given by the service
        message: String,
    },

    /// Nothing is served at the requested path
    #[error("Unknown path: {0}")]
    UnknownPath(String),
}

/// Client able to create items on a service
///
/// Implementations are shared across effects through an `Arc`, so they must
/// be `Send + Sync`.
pub trait ItemsApi: Send + Sync + 'static {
    /// Create an item at `path` from `payload`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the service refuses it.
    fn create_item(
        &self,
        path: &str,
        payload: &CreateItemPayload,
    ) -> impl Future<Output = Result<Item, ApiError>> + Send;
}

/// In-process creation service
///
/// Assigns sequential ids starting at 1, optionally waits before answering,
/// and refuses blank text the way a real backend would.
#[derive(Debug)]
pub struct InMemoryItemsApi {
    next_id: AtomicU64,
    latency: Duration,
}

impl InMemoryItemsApi {
    /// Creates a service that answers immediately
    #[must_use]
    pub const fn new() -> Self {
        Self::with_latency(Duration::ZERO)
    }

    /// Creates a service that waits `latency` before every answer
    #[must_use]
    pub const fn with_latency(latency: Duration) -> Self {
        Self {
            next_id: AtomicU64::new(1),
            latency,
        }
    }

    fn create(&self, path: &str, payload: &CreateItemPayload) -> Result<Item, ApiError> {
        if path != ITEMS_PATH {
            return Err(ApiError::UnknownPath(path.to_string()));
        }
        if payload.text.trim().is_empty() {
            return Err(ApiError::Rejected {
                status: 422,
                message: "text must not be blank".to_string(),
            });
        }
        let id = ItemId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        Ok(Item::new(id, payload.text.clone()))
    }
}

impl Default for InMemoryItemsApi {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemsApi for InMemoryItemsApi {
    fn create_item(
        &self,
        path: &str,
        payload: &CreateItemPayload,
    ) -> impl Future<Output = Result<Item, ApiError>> + Send {
        let outcome = self.create(path, payload);
        let latency = self.latency;
        async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            match &outcome {
                Ok(item) => tracing::debug!(id = %item.id, "Item created"),
                Err(error) => tracing::debug!(error = %error, "Item creation refused"),
            }
            outcome
        }
    }
}
