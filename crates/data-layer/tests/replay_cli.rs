use data_layer::cli::{replay, CliError, ReplayOptions};
use data_layer::events::{CHANGE, EVENT, READY};
use serde_json::json;

#[test]
fn replay_merges_queue_into_state() {
    let input = json!([
        {"data": {"page": {"id": 1, "tags": ["a", "b"]}}},
        {"event": "page:view", "data": {"page": {"tags": ["c"]}}},
        {"unrelated": true}
    ])
    .to_string();

    let output = replay(&input, &ReplayOptions::default()).unwrap();
    assert_eq!(output.state, json!({"page": {"id": 1, "tags": ["c"]}}));
    assert_eq!(output.queued, 3);
}

#[test]
fn replay_records_dispatches_in_order() {
    let input = json!([
        {"data": {"a": 1}},
        {"event": "cta:click", "info": {"id": "buy"}}
    ])
    .to_string();

    let output = replay(&input, &ReplayOptions { events: true, strict: false }).unwrap();
    let dispatched: Vec<&str> = output
        .dispatched
        .iter()
        .map(|r| r["dispatch"].as_str().unwrap())
        .collect();
    assert_eq!(dispatched, vec![CHANGE, EVENT, READY]);
    assert_eq!(
        output.dispatched[1]["payload"],
        json!({"event": "cta:click", "info": {"id": "buy"}, "name": "cta:click"})
    );

    let rendered = output.render(&ReplayOptions { events: true, strict: false });
    assert_eq!(rendered.lines().count(), 4);
    assert_eq!(rendered.lines().last(), Some(r#"{"a":1}"#));
}

#[test]
fn replay_rejects_non_array_input() {
    let err = replay(r#"{"data": {}}"#, &ReplayOptions::default()).unwrap_err();
    assert!(matches!(err, CliError::NotAQueue));

    let err = replay("not json", &ReplayOptions::default()).unwrap_err();
    assert!(matches!(err, CliError::Json(_)));
}

#[test]
fn strict_replay_rejects_inert_items() {
    let input = json!([{"data": {"a": 1}}, {"on": "x"}]).to_string();
    let err = replay(&input, &ReplayOptions { events: false, strict: true }).unwrap_err();
    assert!(err.to_string().contains("malformed item"));

    let output = replay(&input, &ReplayOptions::default()).unwrap();
    assert_eq!(output.state, json!({"a": 1}));
}
