//! Rendering of the to-do widget.

use crate::types::{Item, TodoAction, TodoState};
use todo_widget_core::view::{Element, Node, View};

/// Heading shown above the list
pub const HEADING: &str = "TODOS";

/// Label of the text input
pub const INPUT_LABEL: &str = "What needs to be done?";

/// Id linking the input to its label
pub const INPUT_ID: &str = "new-todo";

/// The to-do widget's view
///
/// ```text
/// div.todo-app
///   h1 "TODOS"
///   ul > li[data-id] ...
///   form
///     label[for=new-todo] "What needs to be done?"
///     input#new-todo[type=text][value=draft]
///     button[type=submit] "Add #N"      (disabled while a call is in flight)
///   p[role=alert]                        (only after a failed submission)
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoView;

impl TodoView {
    fn item(item: &Item) -> Element<TodoAction> {
        Element::new("li")
            .attr("data-id", item.id.to_string())
            .text(item.text.clone())
    }

    fn form(state: &TodoState) -> Element<TodoAction> {
        Element::new("form")
            .child(Element::new("label").attr("for", INPUT_ID).text(INPUT_LABEL))
            .child(
                Element::new("input")
                    .attr("id", INPUT_ID)
                    .attr("type", "text")
                    .attr("value", state.draft.clone())
                    .on_input(|value| TodoAction::DraftChanged { value }),
            )
            .child(
                Element::new("button")
                    .attr("type", "submit")
                    .flag("disabled", state.is_pending())
                    .on_click(TodoAction::Submit)
                    .text(state.submit_label()),
            )
    }
}

impl View for TodoView {
    type State = TodoState;
    type Action = TodoAction;

    fn render(&self, state: &TodoState) -> Node<TodoAction> {
        let mut root = Element::new("div")
            .attr("class", "todo-app")
            .child(Element::new("h1").text(HEADING))
            .child(Element::new("ul").children(state.items.iter().map(Self::item)))
            .child(Self::form(state));

        if let Some(error) = &state.last_error {
            root = root.child(Element::new("p").attr("role", "alert").text(error.clone()));
        }

        root.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemId;

    fn with_items(texts: &[&str]) -> TodoState {
        TodoState {
            items: texts
                .iter()
                .zip(1..)
                .map(|(text, id)| Item::new(ItemId::new(id), *text))
                .collect(),
            ..TodoState::default()
        }
    }

    #[test]
    fn renders_empty_widget() {
        let html = TodoView.render(&TodoState::default()).to_html();
        assert_eq!(
            html,
            concat!(
                r#"<div class="todo-app"><h1>TODOS</h1><ul></ul><form>"#,
                r#"<label for="new-todo">What needs to be done?</label>"#,
                r#"<input id="new-todo" type="text" value="">"#,
                r#"<button type="submit">Add #1</button>"#,
                "</form></div>",
            )
        );
    }

    #[test]
    fn renders_items_in_order_with_next_ordinal() {
        let tree = TodoView.render(&with_items(&["a", "b"]));

        let items: Vec<_> = tree
            .elements()
            .into_iter()
            .filter(|element| element.tag() == "li")
            .map(|element| (element.attribute("data-id").map(str::to_string), element.text_content()))
            .collect();
        assert_eq!(items, vec![(Some("1".into()), "a".into()), (Some("2".into()), "b".into())]);

        let button = tree.elements().into_iter().find(|element| element.tag() == "button");
        assert_eq!(button.map(Element::text_content), Some("Add #3".to_string()));
    }

    #[test]
    fn pending_disables_button_and_error_shows_alert() {
        let state = TodoState {
            pending: Some("x".into()),
            last_error: Some("offline".into()),
            ..TodoState::default()
        };
        let tree = TodoView.render(&state);

        let button = tree.elements().into_iter().find(|element| element.tag() == "button");
        assert!(button.is_some_and(Element::is_disabled));

        let alert = tree
            .elements()
            .into_iter()
            .find(|element| element.attribute("role") == Some("alert"));
        assert_eq!(alert.map(Element::text_content), Some("offline".to_string()));
    }

    #[test]
    fn handlers_dispatch_widget_actions() {
        let tree = TodoView.render(&TodoState::default());

        let input = tree.element_by_id(INPUT_ID);
        assert_eq!(
            input.and_then(|input| input.input_action("milk".into())),
            Some(TodoAction::DraftChanged { value: "milk".into() })
        );

        let button = tree.elements().into_iter().find(|element| element.tag() == "button");
        assert_eq!(button.and_then(Element::click_action), Some(&TodoAction::Submit));
    }
}
