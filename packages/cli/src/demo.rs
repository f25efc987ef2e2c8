//! Sample todo list used by `trellis run`.

use trellis_core::{
    create_element, Attributes, Child, Component, Event, Node, RenderScope, UpdateQueue, Value,
};

/// State: `{ items: [string], done: { "<index>": bool }, draft: string }`
pub struct TodoList {
    updates: UpdateQueue,
}

impl TodoList {
    pub fn new(updates: UpdateQueue) -> Self {
        Self { updates }
    }

    fn item(&self, index: usize, label: &Value, done: bool) -> Node {
        let key = index.to_string();
        let toggle = self.updates.listener(format!("toggle-{}", index), move |_, state| {
            let done = state
                .get("done")
                .and_then(|done| done.get(&key))
                .and_then(Value::as_bool)
                .unwrap_or(false);
            Value::from_fields([(
                "done",
                Value::from_fields([(key.clone(), Value::from(!done))]),
            )])
        });

        let mut attributes: Attributes = vec![("onClick".to_string(), Value::from(toggle))];
        if done {
            attributes.push(("className".to_string(), Value::from("done")));
        }
        create_element("li", attributes, vec![Child::from(label.clone())])
    }
}

impl Component for TodoList {
    fn kind(&self) -> &str {
        "TodoList"
    }

    fn render(&self, scope: &RenderScope<'_>) -> Node {
        let title = scope
            .prop("title")
            .map(Value::to_string)
            .unwrap_or_else(|| "Todos".to_string());
        let items = scope.get("items").and_then(Value::as_array).unwrap_or(&[]);
        let done = |index: usize| {
            scope
                .get("done")
                .and_then(|done| done.get(&index.to_string()))
                .and_then(Value::as_bool)
                .unwrap_or(false)
        };
        let remaining = (0..items.len()).filter(|index| !done(*index)).count();
        let draft = scope.get("draft").cloned().unwrap_or_else(|| Value::from(""));

        let edit = self.updates.listener("edit-draft", |event: &Event, _| {
            Value::from_fields([("draft", Value::from(event.detail.to_string()))])
        });
        let add = self.updates.listener("add-item", |_, state| {
            let draft = state.get("draft").map(Value::to_string).unwrap_or_default();
            if draft.trim().is_empty() {
                return Value::object();
            }
            let mut items = state
                .get("items")
                .and_then(Value::as_array)
                .map(<[Value]>::to_vec)
                .unwrap_or_default();
            items.push(Value::from(draft));
            Value::from_fields([("items", Value::from(items)), ("draft", Value::from(""))])
        });

        let rows: Vec<Node> = items
            .iter()
            .enumerate()
            .map(|(index, label)| self.item(index, label, done(index)))
            .collect();

        create_element(
            "div",
            vec![("className".to_string(), Value::from("todo-app"))],
            vec![
                Child::from(create_element(
                    "h1",
                    Attributes::new(),
                    vec![Child::from(format!("{} ({} left)", title, remaining))],
                )),
                Child::from(create_element(
                    "ul",
                    vec![("id".to_string(), Value::from("items"))],
                    vec![Child::from(rows)],
                )),
                Child::from(create_element(
                    "input",
                    vec![
                        ("id".to_string(), Value::from("draft")),
                        ("value".to_string(), draft),
                        ("onInput".to_string(), Value::from(edit)),
                    ],
                    vec![],
                )),
                Child::from(create_element(
                    "button",
                    vec![
                        ("id".to_string(), Value::from("add")),
                        ("onClick".to_string(), Value::from(add)),
                    ],
                    vec![Child::from("Add")],
                )),
            ],
        )
    }
}
