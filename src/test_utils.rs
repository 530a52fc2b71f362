// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use crate::kubernetes::ResourceClient;
use crate::resources::SyncTarget;
use async_trait::async_trait;
use http::{Request, Response};
use kube::client::Body;
use kube::core::ErrorResponse;
use kube::{Client, ResourceExt};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A request seen by [`MockService`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub content_type: Option<String>,
}

/// A mock HTTP service that returns predefined responses based on request paths
/// and records every request it receives.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Add a response for GET requests matching the path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    /// Add a response for POST requests matching the path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, status, body)
    }

    /// Add a response for PATCH requests matching the path
    pub fn on_patch(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PATCH", path, status, body)
    }

    /// Every request received so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "karmada-system")
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let responses = self.responses.lock().unwrap();

        if let Some(resp) = responses.get(&(method.to_string(), path.to_string())) {
            return Some(resp.clone());
        }

        // Prefix match for paths like /api/v1/namespaces/foo
        for ((m, p), resp) in responses.iter() {
            if m == method && path.starts_with(p) {
                return Some(resp.clone());
            }
        }

        None
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.clone(),
            path: path.clone(),
            query: req.uri().query().unwrap_or_default().to_string(),
            content_type: req
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        });

        let (status, body) = self
            .find_response(&method, &path)
            .unwrap_or_else(|| (404, not_found_json("resource", &path)));

        Box::pin(async move {
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Create a mock namespace JSON response
pub fn namespace_json(name: &str) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Namespace",
        "metadata": {
            "name": name,
            "uid": "test-uid"
        }
    })
    .to_string()
}

/// Create a failure Status response
pub fn status_json(code: u16, reason: &str, message: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}

/// Collection path of the Secrets in a namespace
pub fn secret_list_path(namespace: &str) -> String {
    format!("/api/v1/namespaces/{}/secrets", namespace)
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    status_json(
        404,
        "NotFound",
        &format!("{} \"{}\" not found", resource, name),
    )
}

/// A call received by [`InMemoryClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Create { name: String, field_manager: String },
    Apply { name: String, field_manager: String },
}

/// In-memory object store for one kind in one namespace.
///
/// Create assigns server fields (uid, resourceVersion, a cluster IP for
/// Services) and rejects duplicates; apply merges the sent fields into the
/// stored object and keeps everything it does not send.
pub struct InMemoryClient<K> {
    namespace: String,
    objects: Mutex<Vec<K>>,
    calls: Mutex<Vec<Call>>,
    failing: Option<Call>,
    fail_list: bool,
}

impl<K: SyncTarget> InMemoryClient<K> {
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            objects: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            failing: None,
            fail_list: false,
        }
    }

    /// Seed the store with an object as if another writer created it
    pub fn with_object(self, object: K) -> Self {
        self.objects.lock().unwrap().push(object);
        self
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.failing = Some(Call::Create {
            name: String::new(),
            field_manager: String::new(),
        });
        self
    }

    pub fn failing_apply(mut self) -> Self {
        self.failing = Some(Call::Apply {
            name: String::new(),
            field_manager: String::new(),
        });
        self
    }

    pub fn objects(&self) -> Vec<K> {
        self.objects.lock().unwrap().clone()
    }

    pub fn get(&self, name: &str) -> Option<K> {
        self.objects()
            .into_iter()
            .find(|o| o.name_any() == name)
    }

    /// Change a stored object the way another writer would
    pub fn modify(&self, name: &str, f: impl FnOnce(&mut K)) {
        let mut objects = self.objects.lock().unwrap();
        if let Some(object) = objects.iter_mut().find(|o| o.name_any() == name) {
            f(object);
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls that wrote to the store
    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| *c != Call::List)
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn fails(&self, call: &Call) -> bool {
        matches!(
            (&self.failing, call),
            (Some(Call::Create { .. }), Call::Create { .. })
                | (Some(Call::Apply { .. }), Call::Apply { .. })
        )
    }
}

fn api_error(code: u16, reason: &str, message: String) -> kube::Error {
    kube::Error::Api(ErrorResponse {
        status: "Failure".to_string(),
        message,
        reason: reason.to_string(),
        code,
    })
}

fn to_value<K: SyncTarget>(object: &K) -> Value {
    serde_json::to_value(object).unwrap()
}

fn from_value<K: SyncTarget>(value: Value) -> K {
    serde_json::from_value(value).unwrap()
}

/// Merge `patch` into `base`: objects merge key by key, anything else is replaced
fn merge(base: &mut Value, patch: &Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                merge(base.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (base, patch) => *base = patch.clone(),
    }
}

#[async_trait]
impl<K: SyncTarget> ResourceClient<K> for InMemoryClient<K> {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn list(&self) -> Result<Vec<K>, kube::Error> {
        self.record(Call::List);
        if self.fail_list {
            return Err(api_error(
                503,
                "ServiceUnavailable",
                "the server is currently unable to handle the request".to_string(),
            ));
        }
        Ok(self.objects())
    }

    async fn create(&self, field_manager: &str, object: &K) -> Result<K, kube::Error> {
        let name = object.name_any();
        let call = Call::Create {
            name: name.clone(),
            field_manager: field_manager.to_string(),
        };
        let fails = self.fails(&call);
        self.record(call);
        if fails {
            return Err(api_error(
                422,
                "Invalid",
                format!("{} \"{}\" is invalid", K::KIND, name),
            ));
        }

        let mut objects = self.objects.lock().unwrap();
        if objects.iter().any(|o| o.name_any() == name) {
            return Err(api_error(
                409,
                "AlreadyExists",
                format!("{} \"{}\" already exists", K::KIND, name),
            ));
        }

        let serial = objects.len() + 1;
        let mut value = to_value(object);
        value["metadata"]["uid"] = Value::String(format!("uid-{}", serial));
        value["metadata"]["resourceVersion"] = Value::String("1".to_string());
        if value["kind"] == "Service" && value["spec"]["clusterIP"].is_null() {
            let ip = format!("10.96.0.{}", serial);
            value["spec"]["clusterIP"] = Value::String(ip.clone());
            value["spec"]["clusterIPs"] = serde_json::json!([ip]);
        }

        let created: K = from_value(value);
        objects.push(created.clone());
        Ok(created)
    }

    async fn apply(&self, name: &str, field_manager: &str, object: &K) -> Result<K, kube::Error> {
        let call = Call::Apply {
            name: name.to_string(),
            field_manager: field_manager.to_string(),
        };
        let fails = self.fails(&call);
        self.record(call);
        if fails {
            return Err(api_error(
                409,
                "Conflict",
                format!("Apply failed with 1 conflict: {}", name),
            ));
        }

        let mut objects = self.objects.lock().unwrap();
        let patch = to_value(object);
        let merged = match objects.iter_mut().find(|o| o.name_any() == name) {
            Some(existing) => {
                let mut value = to_value(&*existing);
                merge(&mut value, &patch);
                let version = value["metadata"]["resourceVersion"]
                    .as_str()
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(0);
                value["metadata"]["resourceVersion"] = Value::String((version + 1).to_string());
                let merged: K = from_value(value);
                *existing = merged.clone();
                merged
            }
            None => {
                objects.push(object.clone());
                object.clone()
            }
        };
        Ok(merged)
    }
}
