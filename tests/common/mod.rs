//! Shared helpers for integration tests: JSON fixtures and a scripted
//! transport that records every request it is asked to send.
#![allow(dead_code)]

use notionkit::api::{WireRequest, WireResponse};
use notionkit::{ClientConfig, NotionClient, Result, Transport};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;

pub type RequestLog = Arc<Mutex<Vec<WireRequest>>>;

/// Answers requests from a fixed script, in order.
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<WireResponse>>,
    requests: RequestLog,
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &WireRequest) -> Result<WireResponse> {
        self.requests.lock().push(request.clone());
        Ok(self.responses.lock().pop_front().unwrap_or_else(|| WireResponse {
            status: 599,
            headers: vec![],
            body: "script exhausted".to_string(),
        }))
    }
}

/// A client whose transport replays `responses` and logs what it was sent.
pub fn scripted_client(responses: Vec<WireResponse>) -> (NotionClient, RequestLog) {
    let requests = RequestLog::default();
    let transport = ScriptedTransport {
        responses: Mutex::new(responses.into()),
        requests: Arc::clone(&requests),
    };
    (
        NotionClient::with_transport(transport, ClientConfig::default()),
        requests,
    )
}

pub fn ok(body: impl Into<String>) -> WireResponse {
    respond(200, body)
}

pub fn respond(status: u16, body: impl Into<String>) -> WireResponse {
    WireResponse {
        status,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: body.into(),
    }
}

pub fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/api_responses")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

pub fn fixture_json(name: &str) -> serde_json::Value {
    serde_json::from_str(&fixture(name)).expect("fixture is valid JSON")
}
