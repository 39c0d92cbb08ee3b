//! Integration tests for dynform

use dynform::{
    Border, Control, FieldList, FieldValue, FieldValues, Form, FormError, FormEvent,
    FormHandlers, JsonFileStore, KeyValueStore, MemoryStore, Phase, Readiness, RecordingSink,
    SubmitEvent, dispatch, persist, render_form,
};

const SIGNUP: &str = r#"{
  "fields": [
    { "id": "name", "type": "text", "label": "Name", "required": true },
    {
      "id": "email", "type": "email", "label": "Email",
      "validation": { "pattern": "^[^@\\s]+@[^@\\s]+$" }
    },
    {
      "id": "age", "type": "number", "label": "Age", "required": true,
      "validation": { "min": 18, "max": 65 }
    },
    {
      "id": "plan", "type": "select", "label": "Plan",
      "validation": { "options": ["Basic", "Pro"] }
    },
    { "id": "news", "type": "checkbox", "label": "Newsletter", "defaultValue": true },
    {
      "id": "address", "type": "group", "label": "Address",
      "fields": [
        { "id": "street", "type": "text", "label": "Street", "required": true },
        { "id": "zip", "type": "text", "label": "Zip", "validation": { "pattern": "^[0-9]{5}$" } }
      ]
    }
  ]
}"#;

fn signup() -> FieldList {
    FieldList::from_json_str(SIGNUP).unwrap()
}

fn ready_form<S: KeyValueStore>(store: S) -> Form<S, RecordingSink> {
    Phase::loading()
        .complete(Readiness::Ready, signup(), store, RecordingSink::new())
        .unwrap()
        .into_form()
        .unwrap()
}

fn error_of<S: KeyValueStore>(form: &Form<S, RecordingSink>, id: &str) -> Option<String> {
    form.view()
        .field(id)
        .and_then(|field| field.error_message())
        .map(str::to_string)
}

#[test]
fn test_age_scenario() {
    let mut form = ready_form(MemoryStore::new());
    form.on_input("name", FieldValue::from("Ada")).unwrap();
    form.on_input("street", FieldValue::from("Main St 1")).unwrap();

    let cases = [
        ("15", Some("Age should be at least 18.")),
        ("70", Some("Age should be at most 65.")),
        ("", Some("Age is required.")),
        ("30", None),
    ];

    for (input, expected) in cases {
        form.on_input("age", FieldValue::from(input)).unwrap();
        let outcome = form.on_submit(&mut SubmitEvent::new()).unwrap();

        assert_eq!(error_of(&form, "age").as_deref(), expected, "input {input:?}");
        assert_eq!(outcome.is_submitted(), expected.is_none());
    }

    let submission = form.sink().last().unwrap();
    assert_eq!(submission.get("age"), Some(&FieldValue::from("30")));
    assert_eq!(form.sink().submissions().len(), 1);
}

#[test]
fn test_bounds_pass_on_the_bound_itself() {
    let mut form = ready_form(MemoryStore::new());
    form.on_input("name", FieldValue::from("Ada")).unwrap();
    form.on_input("street", FieldValue::from("Main St 1")).unwrap();

    for bound in ["18", "65"] {
        form.on_input("age", FieldValue::from(bound)).unwrap();
        let outcome = form.on_submit(&mut SubmitEvent::new()).unwrap();
        assert!(outcome.is_submitted(), "bound {bound} rejected");
    }
}

#[test]
fn test_required_blocks_submission() {
    let mut form = ready_form(MemoryStore::new());
    let mut event = SubmitEvent::new();

    let outcome = form.on_submit(&mut event).unwrap();

    assert!(event.default_prevented());
    assert!(!outcome.is_submitted());
    assert_eq!(error_of(&form, "name").as_deref(), Some("Name is required."));
    assert_eq!(error_of(&form, "street").as_deref(), Some("Street is required."));
    assert_eq!(form.view().field("name").unwrap().border(), Border::Error);
    assert!(form.sink().submissions().is_empty());
}

#[test]
fn test_pattern_mismatch_blocks_submission() {
    let mut form = ready_form(MemoryStore::new());
    form.on_input("name", FieldValue::from("Ada")).unwrap();
    form.on_input("age", FieldValue::from("30")).unwrap();
    form.on_input("street", FieldValue::from("Main St 1")).unwrap();
    form.on_input("email", FieldValue::from("not-an-email")).unwrap();

    let outcome = form.on_submit(&mut SubmitEvent::new()).unwrap();

    assert!(!outcome.is_submitted());
    assert_eq!(
        error_of(&form, "email").as_deref(),
        Some("Please match the requested format for Email.")
    );
}

#[test]
fn test_plan_scenario() {
    let form = ready_form(MemoryStore::new());

    match &form.view().field("plan").unwrap().control {
        Control::Choice { options, .. } => assert_eq!(options, &["Basic", "Pro"]),
        other => panic!("Expected choice, got {other:?}"),
    }
    assert_eq!(form.values().text("plan"), "Basic");
}

#[test]
fn test_plan_outside_options_is_never_submitted() {
    let mut store = MemoryStore::new();
    store.set("plan", "Gold").unwrap();
    let mut form = ready_form(store);
    assert_eq!(form.values().text("plan"), "Basic");

    assert!(matches!(
        form.on_input("plan", FieldValue::from("Platinum")),
        Err(FormError::UnknownOption { .. })
    ));

    form.on_input("name", FieldValue::from("Ada")).unwrap();
    form.on_input("age", FieldValue::from("30")).unwrap();
    form.on_input("street", FieldValue::from("Main St 1")).unwrap();
    let outcome = form.on_submit(&mut SubmitEvent::new()).unwrap();

    assert!(outcome.is_submitted());
    assert_eq!(
        form.sink().last().unwrap().get("plan"),
        Some(&FieldValue::from("Basic"))
    );
}

#[test]
fn test_radio_scenario() {
    let fields = FieldList::from_json_str(
        r#"{"fields":[{"id":"x","type":"radio","label":"X"}]}"#,
    )
    .unwrap();

    let result = Phase::loading().complete(
        Readiness::Ready,
        fields.clone(),
        MemoryStore::new(),
        RecordingSink::new(),
    );
    assert!(matches!(result, Err(FormError::Render(_))));

    let mut view = dynform::FormContainer::new();
    let err = dynform::render_field(&fields.fields()[0], &mut view).unwrap_err();
    assert!(err.to_string().contains("radio"));
    assert_eq!(view.notices()[0].text, "Not expected input type: radio");
    assert!(view.fields().is_empty());
}

#[test]
fn test_scalar_roundtrip_through_store() {
    let mut form = ready_form(MemoryStore::new());
    form.on_input("age", FieldValue::from("42")).unwrap();
    form.on_input("news", FieldValue::Flag(false)).unwrap();
    let (_, _, store, _) = form.into_parts();

    let reloaded = ready_form(store);
    assert_eq!(reloaded.values().text("age"), "42");
    assert!(!reloaded.values().flag("news"));
}

#[test]
fn test_group_roundtrip_through_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("signup.json");

    let mut form = ready_form(JsonFileStore::open(&path).unwrap());
    form.on_input("street", FieldValue::from("Elm 2")).unwrap();
    form.on_input("zip", FieldValue::from("12345")).unwrap();
    drop(form);

    let reloaded = ready_form(JsonFileStore::open(&path).unwrap());
    assert_eq!(reloaded.values().text("street"), "Elm 2");
    assert_eq!(reloaded.values().text("zip"), "12345");
}

#[test]
fn test_reset_clears_store_and_restores_defaults() {
    let mut store = MemoryStore::new();
    let fields = signup();
    let mut values = FieldValues::from_defaults(&fields);
    values.set("name", "Ada");
    persist::persist(&mut store, fields.find("name").unwrap(), &values).unwrap();

    let mut form = ready_form(store);
    assert_eq!(form.values().text("name"), "Ada");
    form.on_submit(&mut SubmitEvent::new()).unwrap();

    dispatch(&mut form, FormEvent::Reset).unwrap();

    assert!(form.store().is_empty());
    assert_eq!(form.values(), &FieldValues::from_defaults(&fields));
    assert!(form.values().flag("news"));
    assert!(form.view().field("age").unwrap().error_message().is_none());

    let (_, _, store, _) = form.into_parts();
    let reloaded = ready_form(store);
    assert_eq!(reloaded.values(), &FieldValues::from_defaults(&fields));
}

#[test]
fn test_clearing_twice_is_idempotent() {
    let mut view = render_form(&signup()).unwrap();
    let field = view.field_mut("age").unwrap();

    dynform::show_error(field, "Age is required.");
    dynform::clear_error(field);
    dynform::clear_error(field);

    assert!(field.error_message().is_none());
    assert_eq!(field.border(), Border::Default);
}

#[test]
fn test_failed_readiness_shows_message() {
    let phase = Phase::loading()
        .complete(Readiness::Failed, signup(), MemoryStore::new(), RecordingSink::new())
        .unwrap();

    assert_eq!(
        phase.status_message(),
        Some("Failed to load form data. Please try again later.")
    );
    assert!(phase.into_form().is_none());
}
