//! In-memory [`SessionClient`] for unit tests.
//!
//! Stores route documents keyed by their single-route path and records
//! every call so tests can assert on the exact requests sent.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::session::SessionClient;
use crate::ClientError;

pub(crate) const MOCK_AUTH_URL: &str = "http://keystone.test:5000/v3";
pub(crate) const MOCK_TOKEN: &str = "mock-token";

/// One request seen by the mock.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
pub(crate) struct MockSession {
    routes: Mutex<BTreeMap<String, Value>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockSession {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Seed a route document at its single-route path.
    pub(crate) fn insert_route(&self, route_url: &str, document: Value) {
        self.routes
            .lock()
            .expect("mock routes lock poisoned")
            .insert(route_url.to_owned(), document);
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("mock calls lock poisoned").clone()
    }

    fn record(&self, method: &'static str, path: &str, body: Option<&Value>) {
        self.calls.lock().expect("mock calls lock poisoned").push(RecordedCall {
            method,
            path: path.to_owned(),
            body: body.cloned(),
        });
    }

    fn is_execution(path: &str) -> bool {
        path.starts_with("/r/") || path.starts_with("/v1/r/")
    }
}

#[async_trait]
impl SessionClient for MockSession {
    async fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.record("GET", path, None);
        let routes = self.routes.lock().expect("mock routes lock poisoned");
        if path.ends_with("/routes") {
            let prefix = format!("{path}/");
            let listed: Vec<Value> = routes
                .iter()
                .filter(|(key, _)| key.starts_with(&prefix))
                .map(|(_, doc)| doc.clone())
                .collect();
            return Ok(Value::Array(listed));
        }
        routes.get(path).cloned().ok_or_else(|| ClientError::NotFound(path.to_owned()))
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        self.record("POST", path, Some(body));
        if Self::is_execution(path) {
            return Ok(json!({"called": path, "payload": body}));
        }
        let route = body.get("route").cloned().unwrap_or(Value::Null);
        let route_path = route.get("path").and_then(Value::as_str).unwrap_or_default();
        let key = format!("{path}{route_path}");
        self.routes.lock().expect("mock routes lock poisoned").insert(key, route.clone());
        Ok(route)
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        self.record("PUT", path, Some(body));
        let mut routes = self.routes.lock().expect("mock routes lock poisoned");
        let doc = routes.get_mut(path).ok_or_else(|| ClientError::NotFound(path.to_owned()))?;
        if let (Value::Object(existing), Value::Object(overlay)) = (doc, body) {
            for (key, value) in overlay {
                existing.insert(key.clone(), value.clone());
            }
        }
        Ok(routes.get(path).cloned().unwrap_or(Value::Null))
    }

    async fn delete(&self, path: &str) -> Result<Value, ClientError> {
        self.record("DELETE", path, None);
        match self.routes.lock().expect("mock routes lock poisoned").remove(path) {
            Some(_) => Ok(json!({"message": "Route deleted"})),
            None => Err(ClientError::NotFound(path.to_owned())),
        }
    }

    async fn get_token(&self) -> Result<String, ClientError> {
        Ok(MOCK_TOKEN.to_owned())
    }

    fn auth_url(&self) -> &str {
        MOCK_AUTH_URL
    }
}
