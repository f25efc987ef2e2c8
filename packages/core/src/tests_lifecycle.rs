/// Lifecycle and state-update protocol tests
/// Tests phase transitions, merge semantics, callback ordering and reentrancy
use crate::test_host::RecordingHost;
use crate::*;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

type Journal = Rc<RefCell<Vec<String>>>;

/// Renders `<div><span>{count}</span>{children}</div>` and journals every hook
struct Counter {
    journal: Journal,
    /// Keep bumping `count` from `did_update` until it reaches this value
    chase: Option<f64>,
}

impl Counter {
    fn new(journal: &Journal) -> Self {
        Self {
            journal: Rc::clone(journal),
            chase: None,
        }
    }
}

impl Component for Counter {
    fn render(&self, scope: &RenderScope<'_>) -> Node {
        self.journal.borrow_mut().push("render".to_string());
        let count = scope.get("count").map(Value::to_string).unwrap_or_default();
        create_element(
            "div",
            Attributes::new(),
            vec![
                Child::from(create_element("span", Attributes::new(), vec![Child::from(count)])),
                Child::from(scope.children().to_vec()),
            ],
        )
    }

    fn will_update(&self, prev: &Value, next: &Value) {
        self.journal.borrow_mut().push(format!(
            "will_update {} -> {}",
            serde_json::to_string(prev).unwrap_or_default(),
            serde_json::to_string(next).unwrap_or_default()
        ));
    }

    fn did_update(&self, ctx: &mut UpdateContext<'_>) -> ReconcileResult<()> {
        self.journal.borrow_mut().push("did_update".to_string());
        if let Some(target) = self.chase {
            let count = ctx.state().get("count").and_then(Value::as_f64).unwrap_or(0.0);
            if count < target {
                ctx.set_state(Value::from_fields([("count", Value::from(count + 1.0))]))?;
            }
        }
        Ok(())
    }

    fn will_unmount(&self) {
        self.journal.borrow_mut().push("will_unmount".to_string());
    }
}

#[cfg(test)]
mod lifecycle_tests {
    use super::*;

    fn journal() -> Journal {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn entries(journal: &Journal) -> Vec<String> {
        journal.borrow().clone()
    }

    fn mount_counter(host: &mut RecordingHost, journal: &Journal) -> RenderRoot {
        let container = host.container();
        let root = render(Node::composite(Counter::new(journal)), container, host)
            .expect("Failed to render");
        journal.borrow_mut().clear();
        host.clear_ops();
        root
    }

    #[test]
    fn test_mount_moves_init_to_mounted() {
        let journal = journal();
        let mut host = RecordingHost::new();
        let container = host.container();
        let mut node = Node::composite(Counter::new(&journal));

        let composite = node.as_composite_mut().unwrap();
        assert_eq!(composite.phase(), LifecyclePhase::Init);

        let slot = host.append_location(container).unwrap();
        let stats = composite.mount_to(slot, &mut host).expect("Failed to mount");

        assert_eq!(composite.phase(), LifecyclePhase::Mounted);
        assert_eq!(composite.location(), Some(slot));
        assert_eq!(stats.mounted, 3);
        assert_eq!(composite.mounted_tree().unwrap().kind(), "div");
        assert_eq!(entries(&journal), vec!["render"]);
    }

    #[test]
    fn test_second_mount_is_rejected() {
        let journal = journal();
        let mut host = RecordingHost::new();
        let container = host.container();
        let mut root = render(Node::composite(Counter::new(&journal)), container, &mut host)
            .expect("Failed to render");

        let slot = host.append_location(container).unwrap();
        let result = root.composite_mut().unwrap().mount_to(slot, &mut host);

        assert!(matches!(result, Err(ReconcileError::AlreadyMounted { .. })));
    }

    #[test]
    fn test_update_requires_location() {
        let journal = journal();
        let mut host = RecordingHost::new();
        let mut composite = Composite::new(Rc::new(Counter::new(&journal)));

        let result = composite.update(&mut host);
        assert!(matches!(result, Err(ReconcileError::NotMounted { .. })));
    }

    #[test]
    fn test_state_change_runs_hooks_in_order() {
        let journal = journal();
        let mut host = RecordingHost::new();
        let mut root = mount_counter(&mut host, &journal);

        let change = root
            .set_state(&mut host, json!({"count": 1}))
            .expect("Failed to set state");

        assert!(matches!(change, StateChange::Applied(stats) if stats.replaced == 1));
        assert_eq!(
            entries(&journal),
            vec![
                r#"will_update {} -> {"count":1}"#,
                "render",
                "did_update",
            ]
        );
        assert_eq!(root.tree().unwrap().text_content(), "1");
    }

    #[test]
    fn test_noop_state_update_skips_everything() {
        let journal = journal();
        let mut host = RecordingHost::new();
        let mut root = mount_counter(&mut host, &journal);
        root.set_state(&mut host, json!({"count": 1})).unwrap();
        journal.borrow_mut().clear();
        host.clear_ops();

        let change = root
            .set_state(&mut host, json!({"count": 1}))
            .expect("Failed to set state");

        assert_eq!(change, StateChange::Unchanged);
        assert!(entries(&journal).is_empty());
        assert_eq!(host.mutation_count(), 0);
    }

    #[test]
    fn test_absent_or_scalar_updates_are_ignored() {
        let journal = journal();
        let mut host = RecordingHost::new();
        let mut root = mount_counter(&mut host, &journal);

        for partial in [Value::Null, Value::from(3), Value::from("x")] {
            let change = root.set_state(&mut host, partial).unwrap();
            assert_eq!(change, StateChange::Unchanged);
        }
        assert!(entries(&journal).is_empty());
        assert_eq!(root.composite().unwrap().state(), &Value::object());
    }

    #[test]
    fn test_state_merge_preserves_untouched_keys() {
        let journal = journal();
        let mut host = RecordingHost::new();
        let mut root = mount_counter(&mut host, &journal);

        root.set_state(&mut host, json!({"a": 1, "b": {"c": 2}})).unwrap();
        root.set_state(&mut host, json!({"b": {"d": 3}})).unwrap();

        assert_eq!(
            root.composite().unwrap().state(),
            &Value::from(json!({"a": 1, "b": {"c": 2, "d": 3}}))
        );
    }

    #[test]
    fn test_unchanged_render_output_touches_nothing() {
        let journal = journal();
        let mut host = RecordingHost::new();
        let mut root = mount_counter(&mut host, &journal);

        // `other` is not rendered, so the new tree equals the mounted one
        let change = root.set_state(&mut host, json!({"other": true})).unwrap();

        assert!(matches!(change, StateChange::Applied(stats) if stats.is_noop()));
        assert_eq!(host.mutation_count(), 0);
        assert_eq!(entries(&journal), vec![r#"will_update {} -> {"other":true}"#, "render", "did_update"]);
    }

    #[test]
    fn test_state_before_mount_is_deferred() {
        let journal = journal();
        let mut host = RecordingHost::new();
        let container = host.container();
        let mut node = Node::composite(Counter::new(&journal));

        let change = node
            .as_composite_mut()
            .unwrap()
            .set_state(&mut host, json!({"count": 7}))
            .unwrap();
        assert_eq!(change, StateChange::Deferred);
        assert!(entries(&journal).is_empty());
        assert_eq!(host.mutation_count(), 0);

        let root = render(node, container, &mut host).unwrap();
        assert_eq!(root.tree().unwrap().text_content(), "7");
        assert_eq!(entries(&journal), vec!["render"]);
    }

    #[test]
    fn test_reentrant_set_state_from_did_update() {
        let journal = journal();
        let mut host = RecordingHost::new();
        let container = host.container();
        let counter = Counter {
            journal: Rc::clone(&journal),
            chase: Some(3.0),
        };
        let mut root = render(Node::composite(counter), container, &mut host).unwrap();
        journal.borrow_mut().clear();

        root.set_state(&mut host, json!({"count": 1})).unwrap();

        assert_eq!(root.composite().unwrap().state(), &Value::from(json!({"count": 3})));
        assert_eq!(root.tree().unwrap().text_content(), "3");
        let renders = entries(&journal).iter().filter(|e| *e == "render").count();
        let did_updates = entries(&journal).iter().filter(|e| *e == "did_update").count();
        assert_eq!(renders, 3);
        assert_eq!(did_updates, 3);
    }

    #[test]
    fn test_unmount_notifies_only_mounted_composites() {
        let journal = journal();
        let mut host = RecordingHost::new();

        Composite::new(Rc::new(Counter::new(&journal))).unmount();
        assert!(entries(&journal).is_empty());

        let root = mount_counter(&mut host, &journal);
        root.unmount();
        assert_eq!(entries(&journal), vec!["will_unmount"]);
    }

    #[test]
    fn test_rerender_replacing_root_composite_unmounts_it() {
        let journal = journal();
        let mut host = RecordingHost::new();
        let mut root = mount_counter(&mut host, &journal);

        root.rerender(create_element("p", Attributes::new(), vec![]), &mut host)
            .unwrap();

        assert!(entries(&journal).contains(&"will_unmount".to_string()));
        assert!(root.composite().is_none());
        assert_eq!(root.tree().unwrap().kind(), "p");
        let result = root.set_state(&mut host, json!({"count": 1}));
        assert!(matches!(result, Err(ReconcileError::NotAComponent { .. })));
    }

    #[test]
    fn test_nested_composites_resolve_transitively() {
        struct Label;
        impl Component for Label {
            fn render(&self, scope: &RenderScope<'_>) -> Node {
                let text = scope.prop("text").map(Value::to_string).unwrap_or_default();
                Node::element("label").with_child(Node::text(text))
            }
        }

        struct Wrapper;
        impl Component for Wrapper {
            fn render(&self, _scope: &RenderScope<'_>) -> Node {
                Node::composite(Label).with_attr("text", "inner")
            }
        }

        let journal = journal();
        let tree = create_element(
            NodeType::component(Counter::new(&journal)),
            Attributes::new(),
            vec![Child::from(Node::composite(Wrapper))],
        )
        .resolve();

        assert_eq!(tree.kind(), "div");
        assert_eq!(tree.children().len(), 2);
        assert_eq!(tree.children()[1].kind(), "label");
        assert_eq!(tree.text_content(), "inner");
    }

    #[test]
    fn test_clone_is_a_fresh_instance() {
        let journal = journal();
        let mut host = RecordingHost::new();
        let mut root = mount_counter(&mut host, &journal);
        root.set_state(&mut host, json!({"count": 2})).unwrap();

        let copy = root.composite().unwrap().clone();

        assert_eq!(copy.phase(), LifecyclePhase::Init);
        assert!(copy.mounted_tree().is_none());
        assert_eq!(copy.state(), root.composite().unwrap().state());
    }

    #[test]
    fn test_repeated_nan_state_is_unchanged() {
        let journal = journal();
        let mut host = RecordingHost::new();
        let mut root = mount_counter(&mut host, &journal);
        let nan = || Value::from_fields([("count", Value::from(f64::NAN))]);

        root.set_state(&mut host, nan()).unwrap();
        journal.borrow_mut().clear();
        host.clear_ops();

        let change = root.set_state(&mut host, nan()).unwrap();

        assert_eq!(change, StateChange::Unchanged);
        assert!(entries(&journal).is_empty());
        assert_eq!(host.mutation_count(), 0);
    }

    #[test]
    fn test_failed_pass_restores_previous_state() {
        let journal = journal();
        let mut host = RecordingHost::new();
        let mut root = mount_counter(&mut host, &journal);
        root.set_state(&mut host, json!({"count": 1})).unwrap();
        journal.borrow_mut().clear();

        host.reject_inserts = true;
        let result = root.set_state(&mut host, json!({"count": 2}));

        assert!(matches!(result, Err(ReconcileError::Host(HostError::UnknownSlot(_)))));
        assert_eq!(root.composite().unwrap().state(), &Value::from(json!({"count": 1})));
        assert_eq!(root.tree().unwrap().text_content(), "1");
        assert!(!entries(&journal).contains(&"did_update".to_string()));

        host.reject_inserts = false;
        let change = root.set_state(&mut host, json!({"count": 2})).unwrap();
        assert!(matches!(change, StateChange::Applied(_)));
        assert_eq!(root.tree().unwrap().text_content(), "2");
    }
}
