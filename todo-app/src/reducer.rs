//! Reducer logic for the to-do widget.
//!
//! Commands are validated against the current state. A valid submission
//! marks the draft as pending and hands the creation call to the runtime as
//! an effect; the call's outcome comes back as an event.

use crate::api::{CreateItemPayload, ITEMS_PATH, ItemsApi};
use crate::types::{TodoAction, TodoState};
use std::marker::PhantomData;
use std::sync::Arc;
use todo_widget_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

/// Message shown when the user submits an empty draft
pub const NOTHING_TO_ADD: &str = "Nothing to add";

/// Environment dependencies for the to-do reducer
pub struct TodoEnvironment<A: ItemsApi> {
    /// Client used to create items
    pub api: Arc<A>,
}

impl<A: ItemsApi> TodoEnvironment<A> {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub const fn new(api: Arc<A>) -> Self {
        Self { api }
    }
}

impl<A: ItemsApi> Clone for TodoEnvironment<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

/// Reducer for the to-do widget
pub struct TodoReducer<A> {
    _api: PhantomData<fn() -> A>,
}

impl<A: ItemsApi> TodoReducer<A> {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self { _api: PhantomData }
    }

    /// Validates a `Submit` command
    fn validate_submit(state: &TodoState) -> Result<(), String> {
        if state.draft.trim().is_empty() {
            return Err(NOTHING_TO_ADD.to_string());
        }

        Ok(())
    }

    /// Applies an event to state
    fn apply_event(state: &mut TodoState, action: &TodoAction) {
        match action {
            TodoAction::ItemCreated { item } => {
                state.items.push(item.clone());
                state.draft.clear();
                state.pending = None;
                state.last_error = None;
            },
            TodoAction::CreateFailed { error } => {
                state.pending = None;
                state.last_error = Some(error.clone());
            },
            TodoAction::SubmissionRejected { reason } => {
                state.last_error = Some(reason.clone());
            },
            // Commands are not applied to state
            TodoAction::DraftChanged { .. } | TodoAction::Submit => {},
        }
    }

    /// Effect calling the creation client with `text` as typed
    fn create_item(env: &TodoEnvironment<A>, text: String) -> Effect<TodoAction> {
        let api = Arc::clone(&env.api);
        Effect::future(async move {
            let payload = CreateItemPayload { text };
            match api.create_item(ITEMS_PATH, &payload).await {
                Ok(item) => Some(TodoAction::ItemCreated { item }),
                Err(error) => {
                    tracing::warn!(error = %error, "Item creation failed");
                    Some(TodoAction::CreateFailed {
                        error: error.to_string(),
                    })
                },
            }
        })
    }
}

impl<A: ItemsApi> Default for TodoReducer<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for TodoReducer<A> {
    fn clone(&self) -> Self {
        Self { _api: PhantomData }
    }
}

impl<A> std::fmt::Debug for TodoReducer<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoReducer").finish()
    }
}

impl<A: ItemsApi> Reducer for TodoReducer<A> {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment<A>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        tracing::debug!(action = action.name(), "Reducing");

        match action {
            // ========== Commands ==========
            TodoAction::DraftChanged { value } => {
                state.draft = value;
                SmallVec::new()
            },

            TodoAction::Submit => {
                // One creation call at a time keeps ordinals in submission order
                if state.is_pending() {
                    tracing::debug!("Submit ignored, creation already in flight");
                    return SmallVec::new();
                }

                if let Err(reason) = Self::validate_submit(state) {
                    Self::apply_event(state, &TodoAction::SubmissionRejected { reason });
                    return SmallVec::new();
                }

                let text = state.draft.clone();
                state.pending = Some(text.clone());
                state.last_error = None;

                smallvec![Self::create_item(env, text)]
            },

            // ========== Events ==========
            event @ (TodoAction::ItemCreated { .. }
            | TodoAction::CreateFailed { .. }
            | TodoAction::SubmissionRejected { .. }) => {
                Self::apply_event(state, &event);
                SmallVec::new()
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can unwrap
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::mocks::MockItemsApi;
    use crate::types::{Item, ItemId};
    use serde_json::json;
    use std::time::Duration;
    use todo_widget_runtime::Store;
    use todo_widget_testing::{ReducerTest, assertions};

    fn learn_rtl() -> Item {
        Item::new(ItemId::new(123), "Learn RTL")
    }

    fn reducer() -> TodoReducer<MockItemsApi> {
        TodoReducer::new()
    }

    fn test_env() -> TodoEnvironment<MockItemsApi> {
        TodoEnvironment::new(Arc::new(MockItemsApi::resolving(learn_rtl())))
    }

    fn typed(draft: &str) -> TodoState {
        TodoState {
            draft: draft.to_string(),
            ..TodoState::default()
        }
    }

    #[test]
    fn test_draft_changed_replaces_draft_verbatim() {
        ReducerTest::new(reducer())
            .with_env(test_env())
            .given_state(typed("old"))
            .when_action(TodoAction::DraftChanged {
                value: "  Learn RTL ".to_string(),
            })
            .then_state(|state| assert_eq!(state.draft, "  Learn RTL "))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_submit_marks_draft_pending() {
        ReducerTest::new(reducer())
            .with_env(test_env())
            .given_state(TodoState {
                last_error: Some("stale".to_string()),
                ..typed("Learn RTL")
            })
            .when_action(TodoAction::Submit)
            .then_state(|state| {
                assert_eq!(state.pending.as_deref(), Some("Learn RTL"));
                assert_eq!(state.draft, "Learn RTL");
                assert!(state.last_error.is_none());
                assert!(state.items.is_empty());
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn test_submit_while_pending_is_ignored() {
        ReducerTest::new(reducer())
            .with_env(test_env())
            .given_state(typed("Learn RTL"))
            .when_action(TodoAction::Submit)
            .when_action(TodoAction::Submit)
            .then_state(|state| assert_eq!(state.pending.as_deref(), Some("Learn RTL")))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_blank_submit_is_rejected() {
        ReducerTest::new(reducer())
            .with_env(test_env())
            .given_state(typed("   "))
            .when_action(TodoAction::Submit)
            .then_state(|state| {
                assert_eq!(state.last_error.as_deref(), Some(NOTHING_TO_ADD));
                assert_eq!(state.draft, "   ");
                assert!(state.pending.is_none());
                assert_eq!(state.submit_label(), "Add #1");
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_item_created_appends_and_clears() {
        ReducerTest::new(reducer())
            .with_env(test_env())
            .given_state(typed("Learn RTL"))
            .when_action(TodoAction::Submit)
            .when_action(TodoAction::ItemCreated { item: learn_rtl() })
            .then_state(|state| {
                assert_eq!(state.items, vec![learn_rtl()]);
                assert!(state.draft.is_empty());
                assert!(state.pending.is_none());
                assert_eq!(state.submit_label(), "Add #2");
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_create_failed_keeps_draft_for_retry() {
        ReducerTest::new(reducer())
            .with_env(test_env())
            .given_state(typed("Learn RTL"))
            .when_action(TodoAction::Submit)
            .when_action(TodoAction::CreateFailed {
                error: "offline".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.draft, "Learn RTL");
                assert!(state.pending.is_none());
                assert_eq!(state.last_error.as_deref(), Some("offline"));
                assert!(state.items.is_empty());
            })
            .run();
    }

    #[tokio::test]
    async fn test_effect_calls_client_and_feeds_back_result() {
        let api = Arc::new(MockItemsApi::resolving(learn_rtl()));
        let store = Store::new(
            typed("Learn RTL"),
            reducer(),
            TodoEnvironment::new(Arc::clone(&api)),
        );

        let mut handle = store.send(TodoAction::Submit).await.unwrap();
        handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

        assert_eq!(api.call_count(), 1);
        assert!(api.was_called_with(ITEMS_PATH, &json!({ "text": "Learn RTL" })));
        let state = store.state(Clone::clone).await;
        assert_eq!(state.items, vec![learn_rtl()]);
        assert!(state.pending.is_none());
    }

    #[tokio::test]
    async fn test_failed_call_becomes_create_failed() {
        let api = Arc::new(MockItemsApi::failing(ApiError::Rejected {
            status: 500,
            message: "boom".to_string(),
        }));
        let store = Store::new(typed("Learn RTL"), reducer(), TodoEnvironment::new(api));

        let outcome = store
            .send_and_wait_for(
                TodoAction::Submit,
                |action| matches!(action, TodoAction::CreateFailed { .. }),
                Duration::from_secs(1),
            )
            .await
            .unwrap();

        assert_eq!(
            outcome,
            TodoAction::CreateFailed {
                error: "Rejected (500): boom".to_string()
            }
        );
        assert_eq!(store.state(|s| s.last_error.clone()).await.as_deref(), Some("Rejected (500): boom"));
    }
}
