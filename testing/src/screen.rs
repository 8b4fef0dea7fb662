//! Render a store through a view and drive it like a user would.
//!
//! [`Screen`] owns a [`Store`] and a [`View`]. Every query renders the current
//! state, events fire the actions attached to the rendered elements, and the
//! `find_*` queries wait (bounded) for the tree to catch up with effects that
//! are still running.

use crate::queries::{self, QueryError};
use crate::wait::{self, WaitConfig, WaitError};
use std::cell::RefCell;
use std::time::Duration;
use thiserror::Error;
use todo_widget_core::reducer::Reducer;
use todo_widget_core::view::{Element, Node, View};
use todo_widget_runtime::{EffectHandle, Store, StoreError};

/// Errors from interacting with a [`Screen`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScreenError {
    /// A query did not match exactly one element
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The store refused the dispatched action
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The target element is disabled and ignores user events
    #[error("<{tag}> is disabled")]
    Disabled {
        /// Tag of the target element
        tag: String,
    },

    /// The target element has no handler for the event
    #[error("<{tag}> has no {event} handler")]
    NoHandler {
        /// Event that was fired
        event: &'static str,
        /// Tag of the target element
        tag: String,
    },

    /// A `find_*` query never matched
    #[error("Timed out after {timeout:?}: {last}")]
    Timeout {
        /// How long the query retried
        timeout: Duration,
        /// Error from the last attempt
        last: QueryError,
    },
}

impl From<WaitError<QueryError>> for ScreenError {
    fn from(error: WaitError<QueryError>) -> Self {
        let WaitError::TimedOut {
            timeout,
            last_error,
        } = error;
        Self::Timeout {
            timeout,
            last: last_error,
        }
    }
}

/// A rendered store that tests interact with through its view
///
/// # Example
///
/// ```ignore
/// let screen = Screen::render(store, TodoView);
///
/// let input = screen.get_by_label_text("What needs to be done?").await?;
/// screen.change(&input, "Learn RTL").await?;
/// screen.click(&screen.get_by_text("Add #1").await?).await?;
///
/// screen.find_by_text("Learn RTL").await?;
/// screen.find_by_text("Add #2").await?;
/// ```
pub struct Screen<S, A, E, R, V>
where
    R: Reducer<State = S, Action = A, Environment = E>,
    V: View<State = S, Action = A>,
{
    store: Store<S, A, E, R>,
    view: V,
    config: WaitConfig,
}

impl<S, A, E, R, V> Screen<S, A, E, R, V>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
    V: View<State = S, Action = A>,
    A: Send + Clone + 'static,
    S: Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Mount `view` over `store` with the default wait configuration
    #[must_use]
    pub fn render(store: Store<S, A, E, R>, view: V) -> Self {
        Self::with_config(store, view, WaitConfig::default())
    }

    /// Mount with a custom wait configuration for the `find_*` queries
    #[must_use]
    pub const fn with_config(store: Store<S, A, E, R>, view: V, config: WaitConfig) -> Self {
        Self {
            store,
            view,
            config,
        }
    }

    /// The store behind the screen
    #[must_use]
    pub const fn store(&self) -> &Store<S, A, E, R> {
        &self.store
    }

    /// Render the current state
    pub async fn container(&self) -> Node<A> {
        self.store.state(|state| self.view.render(state)).await
    }

    /// First element with the given tag
    pub async fn query_selector(&self, tag: &str) -> Option<Element<A>> {
        queries::query_selector(&self.container().await, tag).cloned()
    }

    /// The single element whose own text equals `text`
    ///
    /// # Errors
    ///
    /// [`ScreenError::Query`] unless exactly one element matches.
    pub async fn get_by_text(&self, text: &str) -> Result<Element<A>, ScreenError> {
        Ok(queries::get_by_text(&self.container().await, text)?.clone())
    }

    /// The single control labelled `label`
    ///
    /// # Errors
    ///
    /// [`ScreenError::Query`] unless exactly one control matches.
    pub async fn get_by_label_text(&self, label: &str) -> Result<Element<A>, ScreenError> {
        Ok(queries::get_by_label_text(&self.container().await, label)?.clone())
    }

    /// The single element with `role` (and accessible `name`, if given)
    ///
    /// # Errors
    ///
    /// [`ScreenError::Query`] unless exactly one element matches.
    pub async fn get_by_role(&self, role: &str, name: Option<&str>) -> Result<Element<A>, ScreenError> {
        Ok(queries::get_by_role(&self.container().await, role, name)?.clone())
    }

    /// Every element with `role`
    pub async fn query_all_by_role(&self, role: &str) -> Vec<Element<A>> {
        queries::query_all_by_role(&self.container().await, role, None)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Wait until `probe` matches against a fresh render
    ///
    /// Re-renders whenever the store's state changes, and at least every
    /// retry interval, until the timeout.
    ///
    /// # Errors
    ///
    /// [`ScreenError::Timeout`] with the last query error.
    pub async fn wait_for<T, F>(&self, probe: F) -> Result<T, ScreenError>
    where
        F: FnMut(&Node<A>) -> Result<T, QueryError>,
    {
        let probe = &RefCell::new(probe);
        let mut changes = self.store.subscribe_state();
        let found = wait::wait_for_changes(&self.config, &mut changes, move || async move {
            let tree = self.container().await;
            let mut probe = probe.borrow_mut();
            (*probe)(&tree)
        })
        .await?;
        Ok(found)
    }

    /// Wait for the single element whose own text equals `text`
    ///
    /// # Errors
    ///
    /// [`ScreenError::Timeout`] if it never appears.
    pub async fn find_by_text(&self, text: &str) -> Result<Element<A>, ScreenError> {
        self.wait_for(|tree| queries::get_by_text(tree, text).cloned())
            .await
    }

    /// Wait for the single element with `role` (and accessible `name`, if given)
    ///
    /// # Errors
    ///
    /// [`ScreenError::Timeout`] if it never appears.
    pub async fn find_by_role(&self, role: &str, name: Option<&str>) -> Result<Element<A>, ScreenError> {
        self.wait_for(|tree| queries::get_by_role(tree, role, name).cloned())
            .await
    }

    /// Fire a change event: set the control's whole value at once
    ///
    /// # Errors
    ///
    /// [`ScreenError::Disabled`], [`ScreenError::NoHandler`], or
    /// [`ScreenError::Store`] if the store rejects the action.
    pub async fn change(&self, target: &Element<A>, value: impl Into<String>) -> Result<EffectHandle, ScreenError> {
        if target.is_disabled() {
            return Err(ScreenError::Disabled {
                tag: target.tag().to_string(),
            });
        }
        let action = target
            .input_action(value.into())
            .ok_or_else(|| ScreenError::NoHandler {
                event: "input",
                tag: target.tag().to_string(),
            })?;
        Ok(self.store.send(action).await?)
    }

    /// Fire a click event
    ///
    /// # Errors
    ///
    /// [`ScreenError::Disabled`], [`ScreenError::NoHandler`], or
    /// [`ScreenError::Store`] if the store rejects the action.
    pub async fn click(&self, target: &Element<A>) -> Result<EffectHandle, ScreenError> {
        if target.is_disabled() {
            return Err(ScreenError::Disabled {
                tag: target.tag().to_string(),
            });
        }
        let action = target.click_action().cloned().ok_or_else(|| ScreenError::NoHandler {
            event: "click",
            tag: target.tag().to_string(),
        })?;
        Ok(self.store.send(action).await?)
    }

    /// Type `text` one character at a time, appending to the current value
    ///
    /// Fires one change event per character, like a user typing.
    ///
    /// # Errors
    ///
    /// Same as [`Screen::change`].
    pub async fn type_text(&self, target: &Element<A>, text: &str) -> Result<EffectHandle, ScreenError> {
        let mut value = target.attribute("value").unwrap_or_default().to_string();
        let mut last = EffectHandle::completed();
        for c in text.chars() {
            value.push(c);
            last = self.change(target, value.clone()).await?;
        }
        Ok(last)
    }
}
