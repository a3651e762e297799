//! Verify request building and response parsing against JSON test vectors
//! stored in `test-vectors/`.
//!
//! Comparing parsed JSON (not raw strings) avoids false negatives from
//! field-ordering differences.

use todo_core::{
    ApiError, HttpMethod, HttpResponse, Mutation, MutationStatus, TodoClient, TodoItem,
};

const BASE_URL: &str = "http://localhost:8000";

fn client() -> TodoClient {
    TodoClient::new(BASE_URL)
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_mutation(value: &serde_json::Value) -> Mutation {
    let text = || value["text"].as_str().unwrap().to_string();
    let id = || value["id"].as_str().unwrap().to_string();
    match value["kind"].as_str().unwrap() {
        "create" => Mutation::Create { text: text() },
        "update" => Mutation::Update { id: id(), text: text() },
        "delete" => Mutation::Delete { id: id() },
        other => panic!("unknown mutation kind: {other}"),
    }
}

fn response(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        headers: Vec::new(),
        body: body.to_string(),
    }
}

#[test]
fn list_test_vectors() {
    let raw = include_str!("../../test-vectors/list.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected_req = &case["expected_request"];

        let req = c.build_list();
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.path, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: path");
        assert!(req.body.is_none(), "{name}: body should be None");

        let sim = &case["simulated_response"];
        let result = c.parse_list(response(
            sim["status"].as_u64().unwrap() as u16,
            sim["body"].as_str().unwrap(),
        ));

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "HttpError" => assert!(matches!(err, ApiError::HttpError { .. }), "{name}"),
                "DeserializationError" => {
                    assert!(matches!(err, ApiError::DeserializationError(_)), "{name}")
                }
                other => panic!("{name}: unknown expected_error: {other}"),
            }
        } else {
            let expected: Vec<TodoItem> =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

#[test]
fn mutation_test_vectors() {
    let raw = include_str!("../../test-vectors/mutations.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let mutation = parse_mutation(&case["mutation"]);
        let expected_req = &case["expected_request"];

        let req = mutation.to_request(&c).unwrap();
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.path, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: path");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())],
            "{name}: headers"
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, expected_req["body"], "{name}: body");

        let status = case["simulated_status"].as_u64().unwrap() as u16;
        let outcome = c.parse_mutation(&response(status, ""));
        match case["expected_outcome"].as_str().unwrap() {
            "applied" => assert_eq!(outcome, MutationStatus::Applied, "{name}"),
            "rejected" => assert_eq!(outcome, MutationStatus::Rejected { status }, "{name}"),
            other => panic!("{name}: unknown expected_outcome: {other}"),
        }
    }
}
