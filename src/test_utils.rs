// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities: a mock API server for the kube client, and an in-memory cluster.

use crate::error::{ApiError, ApiErrorKind, ApiResult};
use crate::kubernetes::ClusterApi;
use crate::types::{ResourceCoordinate, ResourceKind};
use async_trait::async_trait;
use http::{Request, Response};
use http_body_util::BodyExt;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{APIResource, APIResourceList, Time};
use k8s_openapi::chrono::Utc;
use kube::api::DynamicObject;
use kube::client::Body;
use kube::Client;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A request as seen by [`MockService`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: String,
}

/// A mock HTTP service that returns predefined responses based on request paths.
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

    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    pub fn on_delete(self, path: &str, status: u16, body: &str) -> Self {
        self.on("DELETE", path, status, body)
    }

    pub fn on_patch(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PATCH", path, status, body)
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "https://kubernetes.default.svc")
    }

    /// Every request received so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let responses = self.responses.lock().unwrap();

        if let Some(resp) = responses.get(&(method.to_string(), path.to_string())) {
            return Some(resp.clone());
        }

        // Longest registered parent path, e.g. /api/v1/namespaces for /api/v1/namespaces/foo
        responses
            .iter()
            .filter(|((m, p), _)| {
                m == method && path.strip_prefix(p.as_str()).is_some_and(|rest| rest.starts_with('/'))
            })
            .max_by_key(|((_, p), _)| p.len())
            .map(|(_, resp)| resp.clone())
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
        let content_type = req
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let response = self.find_response(&method, &path);
        let requests = self.requests.clone();

        Box::pin(async move {
            let bytes = match req.into_body().collect().await {
                Ok(collected) => collected.to_bytes(),
                Err(e) => return Err(tower::BoxError::from(e)),
            };
            requests.lock().unwrap().push(RecordedRequest {
                method,
                path: path.clone(),
                content_type,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });

            let (status, body) =
                response.unwrap_or_else(|| (404, not_found_json("resource", &path)));
            Ok::<_, tower::BoxError>(
                Response::builder()
                    .status(status)
                    .header("content-type", "application/json")
                    .body(Body::from(body.into_bytes()))
                    .unwrap(),
            )
        })
    }
}

/// A `Status` response body
pub fn status_json(code: u16, reason: &str, message: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": if code < 400 { "Success" } else { "Failure" },
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    status_json(404, "NotFound", &format!("{} \"{}\" not found", resource, name))
}

/// A discovery list; entries are (plural, kind, namespaced)
pub fn resource_list(group_version: &str, resources: &[(&str, &str, bool)]) -> APIResourceList {
    APIResourceList {
        group_version: group_version.to_string(),
        resources: resources
            .iter()
            .map(|(name, kind, namespaced)| APIResource {
                name: name.to_string(),
                kind: kind.to_string(),
                namespaced: *namespaced,
                singular_name: kind.to_lowercase(),
                verbs: vec!["list".to_string(), "delete".to_string(), "patch".to_string()],
                ..Default::default()
            })
            .collect(),
    }
}

pub fn configmap_kind() -> ResourceKind {
    ResourceKind::new("", "v1", "ConfigMap", "configmaps", "configmap")
}

/// A custom resource kind, the usual owner of stubborn finalizers
pub fn widget_kind() -> ResourceKind {
    ResourceKind::new("example.com", "v1", "Widget", "widgets", "widget")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Discover,
    List,
    Delete,
    Patch,
}

struct Stored {
    coordinate: ResourceCoordinate,
    object: DynamicObject,
}

#[derive(Default)]
struct FakeState {
    objects: Vec<Stored>,
    discovery: Vec<APIResourceList>,
    discovery_failure: Option<String>,
    /// (operation, plural for lists or object name otherwise, failure)
    failures: Vec<(Op, String, ApiErrorKind)>,
    calls: Vec<(Op, String)>,
}

impl FakeState {
    fn injected(&self, op: Op, key: &str) -> Option<ApiError> {
        self.failures
            .iter()
            .find(|(o, k, _)| *o == op && k == key)
            .map(|(_, _, kind)| ApiError::new(*kind, format!("injected {:?} failure for {}", op, key)))
    }

    fn position(&self, target: &ResourceCoordinate) -> Option<usize> {
        self.objects.iter().position(|s| &s.coordinate == target)
    }
}

/// An in-memory cluster with Kubernetes-like deletion semantics: deleting an
/// object that has finalizers only stamps a deletion timestamp, and removing
/// the finalizers of a terminating object removes it.
#[derive(Clone, Default)]
pub struct FakeCluster {
    state: Arc<Mutex<FakeState>>,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(self, kind: &ResourceKind, namespace: Option<&str>, mut object: DynamicObject, finalizers: &[&str]) -> Self {
        if !finalizers.is_empty() {
            object.metadata.finalizers = Some(finalizers.iter().map(|f| f.to_string()).collect());
        }
        let coordinate = kind.coordinate(namespace, &object.metadata.name.clone().unwrap_or_default());
        self.state
            .lock()
            .unwrap()
            .objects
            .push(Stored { coordinate, object });
        self
    }

    pub fn with_namespace(self, name: &str, terminating: bool, finalizers: &[&str]) -> Self {
        let kind = ResourceKind::namespaces();
        let mut object = DynamicObject::new(name, &kind.api_resource());
        if terminating {
            object.metadata.deletion_timestamp = Some(Time(Utc::now()));
        }
        self.insert(&kind, None, object, finalizers)
    }

    pub fn with_object(self, kind: &ResourceKind, namespace: &str, name: &str, finalizers: &[&str]) -> Self {
        let object = DynamicObject::new(name, &kind.api_resource()).within(namespace);
        self.insert(kind, Some(namespace), object, finalizers)
    }

    pub fn with_api_service(self, name: &str, status: Option<serde_json::Value>) -> Self {
        let kind = ResourceKind::api_services();
        let mut object = DynamicObject::new(name, &kind.api_resource());
        if let Some(status) = status {
            object.data = serde_json::json!({ "status": status });
        }
        self.insert(&kind, None, object, &[])
    }

    pub fn with_resource_lists(self, lists: Vec<APIResourceList>) -> Self {
        self.state.lock().unwrap().discovery = lists;
        self
    }

    pub fn with_discovery_failure(self, message: &str) -> Self {
        self.state.lock().unwrap().discovery_failure = Some(message.to_string());
        self
    }

    /// Make every `op` on `key` fail; `key` is the plural for lists and the object name otherwise
    pub fn fail_on(self, op: Op, key: &str, kind: ApiErrorKind) -> Self {
        self.state
            .lock()
            .unwrap()
            .failures
            .push((op, key.to_string(), kind));
        self
    }

    pub fn exists(&self, target: &ResourceCoordinate) -> bool {
        self.state.lock().unwrap().position(target).is_some()
    }

    /// Journal of calls, each with the coordinate (or kind) it addressed
    pub fn calls(&self) -> Vec<(Op, String)> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, op: Op) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|(o, _)| *o == op)
            .count()
    }
}

#[async_trait]
impl ClusterApi for FakeCluster {
    async fn server_preferred_namespaced_resources(&self) -> ApiResult<Vec<APIResourceList>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push((Op::Discover, String::new()));
        match &state.discovery_failure {
            Some(message) => Err(ApiError::new(ApiErrorKind::Other, message.clone())),
            None => Ok(state.discovery.clone()),
        }
    }

    async fn list(&self, kind: &ResourceKind, namespace: Option<&str>) -> ApiResult<Vec<DynamicObject>> {
        let mut state = self.state.lock().unwrap();
        state
            .calls
            .push((Op::List, format!("{} {}", kind, namespace.unwrap_or_default())));
        if let Some(err) = state.injected(Op::List, &kind.plural) {
            return Err(err);
        }

        Ok(state
            .objects
            .iter()
            .filter(|s| s.coordinate.is_of(kind))
            .filter(|s| namespace.is_none() || s.coordinate.namespace.as_deref() == namespace)
            .map(|s| s.object.clone())
            .collect())
    }

    async fn delete(&self, target: &ResourceCoordinate) -> ApiResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push((Op::Delete, target.to_string()));
        if let Some(err) = state.injected(Op::Delete, &target.name) {
            return Err(err);
        }

        let Some(index) = state.position(target) else {
            return Err(ApiError::new(ApiErrorKind::NotFound, format!("{} not found", target)));
        };
        let is_namespace = target.is_of(&ResourceKind::namespaces());
        let metadata = &mut state.objects[index].object.metadata;

        if metadata.deletion_timestamp.is_some() {
            if is_namespace {
                return Err(ApiError::new(
                    ApiErrorKind::Conflict,
                    "The system is ensuring all content is removed from this namespace",
                ));
            }
            return Ok(());
        }
        if metadata.finalizers.as_ref().is_some_and(|f| !f.is_empty()) {
            metadata.deletion_timestamp = Some(Time(Utc::now()));
        } else {
            state.objects.remove(index);
        }
        Ok(())
    }

    async fn patch(&self, target: &ResourceCoordinate, json_patch: &serde_json::Value) -> ApiResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push((Op::Patch, target.to_string()));
        if let Some(err) = state.injected(Op::Patch, &target.name) {
            return Err(err);
        }

        let Some(index) = state.position(target) else {
            return Err(ApiError::new(ApiErrorKind::NotFound, format!("{} not found", target)));
        };
        let removes_finalizers = json_patch.as_array().is_some_and(|ops| {
            ops.iter().all(|op| {
                op["op"] == "remove" && op["path"] == crate::constants::patch::FINALIZERS_PATH
            })
        });
        if !removes_finalizers {
            return Err(ApiError::new(ApiErrorKind::Invalid, "unsupported patch"));
        }

        let metadata = &mut state.objects[index].object.metadata;
        if metadata.finalizers.take().is_none() {
            return Err(ApiError::new(
                ApiErrorKind::Invalid,
                "the server rejected our request due to an error in our request",
            ));
        }
        if metadata.deletion_timestamp.is_some() {
            state.objects.remove(index);
        }
        Ok(())
    }
}
