//! Verify the client against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector describes the call, the request it should produce, a simulated
//! response, and either the expected records or the expected failure.
//! Expected records are decoded through the same types, so `"30"`, `30` and
//! `"30.00"` or `"2015-06-20"` and `"2015-06-20 00:00:00"` compare equal.

use std::fmt::Debug;

use eactivities_core::{
    ApiError, ApiKey, Client, CommitteeMember, CspInfo, FakeTransport, HttpResponse, Member,
    OnlineSale, TransactionLine, API_KEY_HEADER,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

fn body_text(body: &Value) -> String {
    match body {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn client_for(path: &str, sim: &Value, api_key: &str) -> Client<FakeTransport> {
    let status = sim["status"].as_u64().unwrap() as u16;
    let response = HttpResponse::new(status, body_text(&sim["body"]));
    let fake = FakeTransport::new(BASE_URL).with_response(path, response);
    Client::with_transport(BASE_URL, ApiKey::new(api_key).unwrap(), fake)
}

fn assert_result<R>(name: &str, got: Result<R, ApiError>, expected: &Value)
where
    R: DeserializeOwned + PartialEq + Debug,
{
    let got = got.unwrap_or_else(|e| panic!("{name}: unexpected error: {e:?}"));
    let want: R = serde_json::from_value(expected.clone()).unwrap();
    assert_eq!(got, want, "{name}: parsed result");
}

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

#[test]
fn endpoint_test_vectors() {
    let raw = include_str!("../../test-vectors/endpoints.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let api_key = vectors["api_key"].as_str().unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected_req = &case["expected_request"];
        let path = expected_req["path"].as_str().unwrap();
        let c = client_for(path, &case["simulated_response"], api_key);
        let centre = case["centre"].as_str().unwrap_or_default();
        let year = case["year"].as_str().unwrap_or_default();
        let expected = &case["expected_result"];

        match case["endpoint"].as_str().unwrap() {
            "list_csps" => assert_result::<Vec<CspInfo>>(name, c.list_csps(), expected),
            "csp_details" => assert_result::<CspInfo>(name, c.csp_details(centre), expected),
            "committee" => {
                assert_result::<Vec<CommitteeMember>>(name, c.committee(centre, year), expected)
            }
            "members" => assert_result::<Vec<Member>>(name, c.members(centre, year), expected),
            "online_sales" => {
                assert_result::<Vec<OnlineSale>>(name, c.online_sales(centre, year), expected)
            }
            "transaction_lines" => assert_result::<Vec<TransactionLine>>(
                name,
                c.transaction_lines(centre, year),
                expected,
            ),
            other => panic!("{name}: unknown endpoint: {other}"),
        }

        // Verify the request that went out
        let requests = c.transport().requests();
        assert_eq!(requests.len(), 1, "{name}: request count");
        assert_eq!(requests[0].url, format!("{BASE_URL}{path}"), "{name}: url");
        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(requests[0].headers, expected_headers, "{name}: headers");
        assert_eq!(requests[0].header(API_KEY_HEADER), Some(api_key), "{name}: key");
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn error_test_vectors() {
    let raw = include_str!("../../test-vectors/errors.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let path = case["path"].as_str().unwrap();
        let c = client_for(path, &case["simulated_response"], "fakeAPIKey");
        let err = c.fetch::<Vec<CspInfo>>(path).unwrap_err();
        let expected = &case["expected_error"];

        match expected["kind"].as_str().unwrap() {
            "Application" => {
                let app = err
                    .application()
                    .unwrap_or_else(|| panic!("{name}: expected application error, got {err:?}"));
                assert_eq!(
                    u64::from(app.http_code),
                    expected["http_code"].as_u64().unwrap(),
                    "{name}: http code"
                );
                assert_eq!(app.message, expected["message"].as_str().unwrap(), "{name}: message");
                assert_eq!(err.to_string(), app.message, "{name}: display");
            }
            "Decode" => assert!(
                matches!(err, ApiError::Decode(_)),
                "{name}: expected Decode, got {err:?}"
            ),
            other => panic!("{name}: unknown expected_error kind: {other}"),
        }
        assert_eq!(c.transport().requests().len(), 1, "{name}: request count");
    }
}
