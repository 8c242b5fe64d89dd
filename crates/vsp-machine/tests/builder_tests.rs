use pretty_assertions::assert_eq;
use serde_json::json;
use vsp_machine::{BuilderError, FocusHooks, Notification, ParameterContext, ParameterEvent as E, ParameterState, StageBuilder};
use vsp_test_utils::{registry, signature};
use vsp_types::ParamValue;

fn limit_stage() -> StageBuilder {
    StageBuilder::new("fiftyone.core.stages.Limit", registry())
}

fn param(name: &str, type_: &str) -> ParameterContext {
    ParameterContext::new(name, signature(type_))
}

#[test]
fn at_most_one_active_editor() {
    let mut stage = limit_stage();
    let (a, _) = stage.add_parameter(param("a", "int")).unwrap();
    let (b, _) = stage.add_parameter(param("b", "str")).unwrap();

    stage.dispatch(a, E::Edit).unwrap();
    stage.dispatch(a, E::Change("9".into())).unwrap();
    assert_eq!(stage.active_editor(), Some(a));
    assert_eq!(stage.focus().holder(), Some(a));

    let notification = stage.dispatch(b, E::Edit).unwrap();
    assert!(matches!(notification, Some(Notification::Edit { .. })));
    assert_eq!(stage.active_editor(), Some(b));
    assert_eq!(stage.focus().holder(), Some(b));

    // a was abandoned, its edit reverted
    let a_machine = stage.get(a).unwrap();
    assert_eq!(a_machine.state(), ParameterState::ReadingPending);
    assert_eq!(a_machine.context().value, None);
}

#[test]
fn focus_on_init_field_blurs_current_editor() {
    let mut stage = limit_stage();
    let (a, _) = stage.add_parameter(param("a", "int")).unwrap();
    stage.dispatch(a, E::Edit).unwrap();

    let (b, notification) = stage
        .add_parameter(param("b", "int").with_focus_on_init(true))
        .unwrap();
    assert!(matches!(notification, Some(Notification::Edit { .. })));
    assert_eq!(stage.active_editor(), Some(b));
    assert_eq!(stage.get(a).unwrap().state(), ParameterState::ReadingPending);
}

#[test]
fn arguments_follow_insertion_order() {
    let mut stage = limit_stage();
    let (size, _) = stage.add_parameter(param("size", "int")).unwrap();
    let (label, _) = stage.add_parameter(param("label", "NoneType|str")).unwrap();

    for (id, text) in [(label, "x"), (size, "2500")] {
        stage.dispatch(id, E::Edit).unwrap();
        stage.dispatch(id, E::Change(text.into())).unwrap();
        stage.dispatch(id, E::Commit).unwrap();
    }

    assert_eq!(
        stage.arguments().unwrap(),
        vec![
            ("size".to_string(), ParamValue::Int(2500)),
            ("label".to_string(), ParamValue::Str("x".into())),
        ]
    );
    assert_eq!(
        stage.to_stage_json().unwrap(),
        json!({
            "_cls": "fiftyone.core.stages.Limit",
            "kwargs": [["size", 2500], ["label", "x"]],
        })
    );
}

#[test]
fn uncommitted_fields_are_listed() {
    let mut stage = limit_stage();
    let (size, _) = stage.add_parameter(param("size", "int")).unwrap();
    let (done, _) = stage
        .add_parameter(param("done", "bool").with_value("false").with_submitted(true))
        .unwrap();

    match stage.arguments() {
        Err(BuilderError::Incomplete(missing)) => assert_eq!(missing, vec![size]),
        other => panic!("expected incomplete, got {other:?}"),
    }
    assert_eq!(stage.committed(done), Some(&ParamValue::Bool(false)));

    // a rejected commit does not count
    stage.dispatch(size, E::Edit).unwrap();
    stage.dispatch(size, E::Change("lots".into())).unwrap();
    assert_eq!(stage.dispatch(size, E::Commit).unwrap(), None);
    assert!(stage.to_stage_json().is_err());
}

#[test]
fn remove_releases_focus() {
    let mut stage = limit_stage();
    let (a, _) = stage
        .add_parameter(param("a", "int").with_focus_on_init(true))
        .unwrap();
    assert_eq!(stage.focus().holder(), Some(a));

    let context = stage.remove_parameter(a).unwrap();
    assert_eq!(context.name, "a");
    assert_eq!(context.stage, "fiftyone.core.stages.Limit");
    assert_eq!(stage.focus().holder(), None);
    assert!(stage.is_empty());

    assert!(matches!(
        stage.remove_parameter(a),
        Err(BuilderError::UnknownParameter(_))
    ));
}

#[test]
fn recommit_replaces_value() {
    let mut stage = limit_stage();
    let (id, _) = stage
        .add_parameter(param("ratio", "float").with_value("0.5").with_submitted(true))
        .unwrap();
    assert_eq!(stage.get(id).unwrap().state(), ParameterState::ReadingSubmitted);

    stage.dispatch(id, E::Edit).unwrap();
    stage.dispatch(id, E::Change("1234.25".into())).unwrap();
    stage.dispatch(id, E::Commit).unwrap();

    assert_eq!(stage.get(id).unwrap().context().value.as_deref(), Some("1,234.25"));
    assert_eq!(stage.committed(id), Some(&ParamValue::Float(1234.25)));
    assert_eq!(stage.len(), 1);
    assert_eq!(stage.ids().collect::<Vec<_>>(), vec![id]);
}

#[test]
fn focus_slot_is_shared_hooks() {
    let stage = limit_stage();
    let id = vsp_machine::ParameterId::new();
    stage.focus().acquire(id);
    assert_eq!(stage.focus().holder(), Some(id));
    stage.focus().release(id);
    assert_eq!(stage.focus().holder(), None);
}
