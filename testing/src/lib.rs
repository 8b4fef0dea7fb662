//! # Todo Widget Testing
//!
//! Testing utilities for stores and views built on the to-do widget runtime.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then reducer tests that never run effects
//! - [`queries`]: find elements in a rendered tree by text, label, or role
//! - [`Screen`]: mount a store through its view and fire user events
//! - [`wait_for`]: bounded retry for outcomes that arrive asynchronously
//! - [`CallRecorder`]: capture calls made to mock collaborators
//!
//! ## Example
//!
//! ```ignore
//! use todo_widget_testing::Screen;
//!
//! #[tokio::test]
//! async fn adds_an_item() {
//!     let screen = Screen::render(store, TodoView);
//!
//!     let input = screen.get_by_label_text("What needs to be done?").await?;
//!     screen.change(&input, "Learn RTL").await?;
//!     screen.click(&screen.get_by_text("Add #1").await?).await?;
//!
//!     screen.find_by_text("Learn RTL").await?;
//! }
//! ```

pub mod queries;
pub mod screen;
pub mod wait;

mod reducer_test;

/// Mock building blocks for collaborators injected through an environment.
pub mod mocks {
    use std::sync::{Arc, Mutex, PoisonError};

    /// Thread-safe record of the calls a mock received
    ///
    /// Clones share the same record, so a test can keep one clone while the
    /// mock moves into the environment.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_widget_testing::mocks::CallRecorder;
    ///
    /// let recorder = CallRecorder::new();
    /// let mock_side = recorder.clone();
    /// mock_side.record(("/items", "Learn RTL"));
    ///
    /// assert_eq!(recorder.call_count(), 1);
    /// assert_eq!(recorder.last_call(), Some(("/items", "Learn RTL")));
    /// ```
    #[derive(Debug)]
    pub struct CallRecorder<T> {
        calls: Arc<Mutex<Vec<T>>>,
    }

    impl<T> CallRecorder<T> {
        /// Create an empty recorder
        #[must_use]
        pub fn new() -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        /// Append a call
        pub fn record(&self, call: T) {
            // A panicking test thread must not hide the calls made before it
            self.calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(call);
        }

        /// Number of calls recorded
        #[must_use]
        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
        }

        /// Forget every recorded call
        pub fn clear(&self) {
            self.calls.lock().unwrap_or_else(PoisonError::into_inner).clear();
        }
    }

    impl<T: Clone> CallRecorder<T> {
        /// Every call, oldest first
        #[must_use]
        pub fn calls(&self) -> Vec<T> {
            self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
        }

        /// The most recent call
        #[must_use]
        pub fn last_call(&self) -> Option<T> {
            self.calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .last()
                .cloned()
        }
    }

    impl<T> Default for CallRecorder<T> {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<T> Clone for CallRecorder<T> {
        fn clone(&self) -> Self {
            Self {
                calls: Arc::clone(&self.calls),
            }
        }
    }
}

/// Test helpers and utilities.
pub mod helpers {
    use tracing_subscriber::EnvFilter;

    /// Route `tracing` output through the test harness
    ///
    /// Honors `RUST_LOG`, defaulting to `warn`. Safe to call from every test;
    /// only the first call installs the subscriber.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
            .with_test_writer()
            .try_init();
    }
}

/// Property-based testing strategies for user input.
pub mod properties {
    use proptest::prelude::*;

    /// Text a user might submit: at least one non-whitespace character
    pub fn item_text() -> impl Strategy<Value = String> {
        "[ ]{0,2}[A-Za-z0-9][A-Za-z0-9 .,!?#-]{0,30}"
    }

    /// Input that contains nothing but whitespace (possibly nothing at all)
    pub fn blank_text() -> impl Strategy<Value = String> {
        "[ \t\n]{0,6}"
    }
}

// Re-export commonly used items
pub use mocks::CallRecorder;
pub use reducer_test::{assertions, ReducerTest};
pub use screen::{Screen, ScreenError};
pub use wait::{wait_for, wait_for_changes, WaitConfig, WaitError};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn recorder_clones_share_calls() {
        let recorder = CallRecorder::new();
        let clone = recorder.clone();

        clone.record(1);
        recorder.record(2);

        assert_eq!(recorder.calls(), vec![1, 2]);
        assert_eq!(clone.last_call(), Some(2));

        recorder.clear();
        assert_eq!(clone.call_count(), 0);
        assert_eq!(clone.last_call(), None);
    }

    #[test]
    fn init_test_tracing_is_idempotent() {
        helpers::init_test_tracing();
        helpers::init_test_tracing();
    }

    proptest! {
        #[test]
        fn item_text_is_never_blank(text in properties::item_text()) {
            prop_assert!(!text.trim().is_empty());
        }

        #[test]
        fn blank_text_is_always_blank(text in properties::blank_text()) {
            prop_assert!(text.trim().is_empty());
        }
    }
}
