use super::*;

#[test]
fn search_result_decodes_wire_field_names() {
    let raw = r#"{
        "id": 7,
        "link": "https://example.com/v/7",
        "img": "https://example.com/t/7.jpg",
        "result": {
            "success": true,
            "data": { "heart": true, "favorite": false, "comment": true }
        }
    }"#;

    let result: SearchResult = serde_json::from_str(raw).expect("decode search result");
    assert_eq!(result.id, ResultId(7));
    assert_eq!(result.thumbnail, "https://example.com/t/7.jpg");
    let outcome = result.outcome.expect("bundled outcome");
    assert!(outcome.succeeded);
    let metrics = outcome.metrics.expect("metrics");
    assert!(metrics.liked);
    assert!(!metrics.favorited);
    assert!(metrics.commented);
}

#[test]
fn search_result_without_outcome_decodes() {
    let raw = r#"{ "id": 1, "link": "https://example.com/v/1", "img": "t.jpg" }"#;
    let result: SearchResult = serde_json::from_str(raw).expect("decode search result");
    assert!(result.outcome.is_none());
}

#[test]
fn envelope_tolerates_missing_data_and_message() {
    let envelope: ApiEnvelope<Vec<Account>> =
        serde_json::from_str(r#"{ "status": false }"#).expect("decode envelope");
    assert!(!envelope.status);
    assert!(envelope.data.is_none());
    assert!(envelope.message.is_none());
}

#[test]
fn envelope_decodes_payloads_that_cannot_be_defaulted() {
    // ActionOutcome has no Default; the envelope must not require one.
    let raw = r#"{ "status": true, "data": { "success": true } }"#;
    let envelope: ApiEnvelope<ActionOutcome> =
        serde_json::from_str(raw).expect("decode envelope");
    assert!(envelope.data.expect("payload").succeeded);
}

#[test]
fn action_outcome_encodes_wire_field_names() {
    let outcome = ActionOutcome {
        succeeded: false,
        message: Some("login expired".to_string()),
        metrics: Some(ActionMetrics {
            liked: true,
            favorited: true,
            commented: false,
        }),
    };

    let value = serde_json::to_value(&outcome).expect("encode outcome");
    assert_eq!(value["success"], false);
    assert_eq!(value["message"], "login expired");
    assert_eq!(value["data"]["heart"], true);
    assert_eq!(value["data"]["favorite"], true);
    assert_eq!(value["data"]["comment"], false);
}

#[test]
fn search_query_omits_absent_comment() {
    let query = SearchQuery {
        keyword: "cats".to_string(),
        username: "alice".to_string(),
        comment: None,
    };
    let value = serde_json::to_value(&query).expect("encode query");
    assert!(value.get("comment").is_none());
}
