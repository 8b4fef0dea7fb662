//! The to-do widget.
//!
//! A heading, a list of created items, a text input with its label, and a
//! submit button whose label announces the ordinal of the next item
//! ("Add #1", "Add #2", ...). Submitting hands the typed text to an
//! [`ItemsApi`]; once the call resolves the item is appended and the label
//! advances.
//!
//! - Domain model and actions (`#[derive(Action)]`)
//! - Reducer with the creation call as an effect
//! - View rendering state into a virtual DOM with event handlers
//! - Creation client seam, injected through the environment
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use todo_app::{InMemoryItemsApi, TodoAction, TodoEnvironment, TodoReducer, TodoState, TodoView};
//! use todo_widget_core::view::View;
//! use todo_widget_runtime::Store;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = TodoEnvironment::new(Arc::new(InMemoryItemsApi::new()));
//! let store = Store::new(TodoState::new(), TodoReducer::<InMemoryItemsApi>::new(), env);
//!
//! store.send(TodoAction::DraftChanged { value: "Buy milk".to_string() }).await?;
//! let mut handle = store.send(TodoAction::Submit).await?;
//! handle.wait_with_timeout(Duration::from_secs(1)).await?;
//!
//! let html = store.state(|state| TodoView.render(state).to_html()).await;
//! assert!(html.contains("Add #2"));
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
#[cfg(feature = "test-utils")]
pub mod mocks;
pub mod reducer;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use api::{ApiError, CreateItemPayload, ITEMS_PATH, InMemoryItemsApi, ItemsApi};
pub use config::{Config, ConfigError};
pub use reducer::{TodoEnvironment, TodoReducer};
pub use types::{Item, ItemId, TodoAction, TodoState};
pub use view::TodoView;
