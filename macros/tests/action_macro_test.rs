//! Tests for #[derive(Action)] macro

use todo_widget_macros::Action;

#[derive(Action, Clone, Debug, PartialEq)]
enum WidgetAction {
    #[command]
    DraftChanged { value: String },

    #[command]
    Submit,

    #[event]
    ItemCreated(u64, String),

    #[event]
    CreateFailed { error: String },

    Tick,
}

#[test]
fn test_is_command() {
    let action = WidgetAction::DraftChanged {
        value: "Learn RTL".to_string(),
    };
    assert!(action.is_command());
    assert!(!action.is_event());
}

#[test]
fn test_unit_command() {
    assert!(WidgetAction::Submit.is_command());
    assert!(!WidgetAction::Submit.is_event());
}

#[test]
fn test_is_event() {
    let action = WidgetAction::ItemCreated(123, "Learn RTL".to_string());
    assert!(!action.is_command());
    assert!(action.is_event());
}

#[test]
fn test_unmarked_variant_is_neither() {
    assert!(!WidgetAction::Tick.is_command());
    assert!(!WidgetAction::Tick.is_event());
}

#[test]
fn test_names_cover_every_variant() {
    let actions = vec![
        (
            WidgetAction::DraftChanged {
                value: String::new(),
            },
            "DraftChanged",
        ),
        (WidgetAction::Submit, "Submit"),
        (WidgetAction::ItemCreated(1, String::new()), "ItemCreated"),
        (
            WidgetAction::CreateFailed {
                error: "offline".to_string(),
            },
            "CreateFailed",
        ),
        (WidgetAction::Tick, "Tick"),
    ];

    for (action, expected) in actions {
        assert_eq!(action.name(), expected, "wrong name for {action:?}");
    }
}
