//! In-memory stand-in for the broadpeak.io API

#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::{Json, Router};
use bpkio_plugin::{ProviderServer, Request, Response};
use bpkio_provider::BpkioProvider;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const API_KEY: &str = "test-api-key";

/// Kind of stored object, named after its collection path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    AdServer,
    Slate,
    Live,
    AdInsertion,
    TranscodingProfile,
}

impl Kind {
    fn type_name(self) -> &'static str {
        match self {
            Kind::AdServer => "ad-server",
            Kind::Slate => "slate",
            Kind::Live => "live",
            Kind::AdInsertion => "ad-insertion",
            Kind::TranscodingProfile => "transcoding-profile",
        }
    }

    fn is_source(self) -> bool {
        matches!(self, Kind::AdServer | Kind::Slate | Kind::Live)
    }
}

#[derive(Default)]
pub struct ApiState {
    objects: Mutex<BTreeMap<u64, (Kind, Value)>>,
    next_id: AtomicU64,
    clock: AtomicU64,
    requests: AtomicUsize,
    fail_next_get: AtomicBool,
}

type Reply = (StatusCode, Json<Value>);

fn reply(status: StatusCode, body: Value) -> Reply {
    (status, Json(body))
}

fn message(status: StatusCode, text: &str) -> Reply {
    reply(status, json!({"message": text}))
}

impl ApiState {
    fn tick(&self) -> String {
        let t = self.clock.fetch_add(1, Ordering::SeqCst);
        format!("2025-01-01T00:00:{t:02}Z")
    }

    fn find(&self, id: u64) -> Option<(Kind, Value)> {
        self.objects.lock().unwrap().get(&id).cloned()
    }

    /// Replaces `{"id": n}` links with the stored objects, as the API does
    fn expand_links(&self, mut record: Value) -> Value {
        let link = |value: &mut Value| {
            if let Some(id) = value.get("id").and_then(Value::as_u64) {
                if let Some((_, stored)) = self.find(id) {
                    *value = stored;
                }
            }
        };
        for key in ["source", "transcodingProfile"] {
            if let Some(value) = record.get_mut(key) {
                link(value);
            }
        }
        for (block, key) in [
            ("liveAdPreRoll", "adServer"),
            ("liveAdReplacement", "adServer"),
            ("liveAdReplacement", "gapFiller"),
        ] {
            if let Some(value) = record.get_mut(block).and_then(|b| b.get_mut(key)) {
                link(value);
            }
        }
        record
    }

    fn computed(&self, kind: Kind, id: u64, body: &Value, previous: Option<&Value>) -> Value {
        let mut record = body.clone();
        let now = self.tick();
        let map = record.as_object_mut().expect("object body");
        map.insert("id".into(), json!(id));
        map.insert("type".into(), json!(kind.type_name()));
        map.entry("description").or_insert(json!(""));
        match kind {
            Kind::Slate => {
                let url = map.get("url").and_then(Value::as_str).unwrap_or_default();
                let format = url.rsplit('.').next().unwrap_or_default().to_string();
                map.insert("format".into(), json!(format));
            }
            Kind::Live => {
                map.insert("format".into(), json!("hls"));
            }
            Kind::AdInsertion => {
                map.remove("description");
                map.insert(
                    "url".into(),
                    json!(format!("https://stream.example.com/{id}/index.m3u8")),
                );
                map.insert("state".into(), json!("enabled"));
                let created = previous
                    .and_then(|p| p.get("creationDate"))
                    .cloned()
                    .unwrap_or_else(|| json!(now));
                map.insert("creationDate".into(), created);
                map.insert("updateDate".into(), json!(now));
            }
            _ => {}
        }
        record
    }

    fn validate(kind: Kind, body: &Value) -> Option<Reply> {
        let name = body.get("name").and_then(Value::as_str).unwrap_or_default();
        if name.is_empty() {
            return Some(reply(
                StatusCode::BAD_REQUEST,
                json!({"message": ["name should not be empty"]}),
            ));
        }
        if kind.is_source() {
            let url = body.get("url").and_then(Value::as_str).unwrap_or_default();
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Some(reply(
                    StatusCode::BAD_REQUEST,
                    json!({"message": ["url must be an URL address"]}),
                ));
            }
        }
        None
    }

    fn list(&self, filter: impl Fn(Kind) -> bool) -> Reply {
        let objects = self.objects.lock().unwrap();
        let items: Vec<Value> = objects
            .values()
            .filter(|(kind, _)| filter(*kind))
            .map(|(_, v)| v.clone())
            .collect();
        reply(StatusCode::OK, Value::Array(items))
    }

    fn collection(&self, kind: Kind, method: &Method, body: &[u8]) -> Reply {
        if *method != Method::POST {
            return message(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
        }
        let Ok(body) = serde_json::from_slice::<Value>(body) else {
            return message(StatusCode::BAD_REQUEST, "invalid JSON");
        };
        if let Some(error) = Self::validate(kind, &body) {
            return error;
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let record = self.computed(kind, id, &body, None);
        self.objects
            .lock()
            .unwrap()
            .insert(id, (kind, record.clone()));
        reply(StatusCode::CREATED, record)
    }

    fn item(&self, kind: Kind, id: u64, method: &Method, body: &[u8]) -> Reply {
        let stored = match self.find(id) {
            Some((k, v)) if k == kind => v,
            _ => return message(StatusCode::NOT_FOUND, "Not Found"),
        };
        match *method {
            Method::GET => {
                if self.fail_next_get.swap(false, Ordering::SeqCst) {
                    return message(StatusCode::INTERNAL_SERVER_ERROR, "internal error");
                }
                reply(StatusCode::OK, self.expand_links(stored))
            }
            Method::PUT => {
                let Ok(body) = serde_json::from_slice::<Value>(body) else {
                    return message(StatusCode::BAD_REQUEST, "invalid JSON");
                };
                if let Some(error) = Self::validate(kind, &body) {
                    return error;
                }
                let record = self.computed(kind, id, &body, Some(&stored));
                self.objects
                    .lock()
                    .unwrap()
                    .insert(id, (kind, record.clone()));
                reply(StatusCode::OK, record)
            }
            Method::DELETE => {
                self.objects.lock().unwrap().remove(&id);
                reply(StatusCode::OK, json!({}))
            }
            _ => message(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed"),
        }
    }
}

async fn handle(
    State(state): State<Arc<ApiState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Reply {
    state.requests.fetch_add(1, Ordering::SeqCst);

    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {API_KEY}"));
    if !authorized {
        return message(StatusCode::UNAUTHORIZED, "Unauthorized");
    }

    let segments: Vec<&str> = uri.path().trim_matches('/').split('/').collect();
    match segments.as_slice() {
        ["v1", "sources"] => state.list(Kind::is_source),
        ["v1", "services"] => state.list(|k| k == Kind::AdInsertion),
        ["v1", "transcoding-profiles"] => state.list(|k| k == Kind::TranscodingProfile),
        ["v1", "adservers"] => state.collection(Kind::AdServer, &method, &body),
        ["v1", "sources", "slate"] => state.collection(Kind::Slate, &method, &body),
        ["v1", "sources", "live"] => state.collection(Kind::Live, &method, &body),
        ["v1", "services", "ad-insertion"] => state.collection(Kind::AdInsertion, &method, &body),
        [collection @ .., id] => {
            let kind = match collection {
                ["v1", "adservers"] => Kind::AdServer,
                ["v1", "sources", "slate"] => Kind::Slate,
                ["v1", "sources", "live"] => Kind::Live,
                ["v1", "services", "ad-insertion"] => Kind::AdInsertion,
                ["v1", "transcoding-profiles"] => Kind::TranscodingProfile,
                _ => return message(StatusCode::NOT_FOUND, "Cannot GET"),
            };
            match id.parse::<u64>() {
                Ok(id) => state.item(kind, id, &method, &body),
                Err(_) => message(StatusCode::BAD_REQUEST, "id must be a number"),
            }
        }
        _ => message(StatusCode::NOT_FOUND, "Cannot GET"),
    }
}

pub struct FakeApi {
    pub endpoint: String,
    state: Arc<ApiState>,
}

impl FakeApi {
    pub async fn start() -> Self {
        let state = Arc::new(ApiState::default());
        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&state));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            endpoint: format!("http://{addr}"),
            state,
        }
    }

    pub fn requests(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }

    pub fn fail_next_get(&self) {
        self.state.fail_next_get.store(true, Ordering::SeqCst);
    }

    /// Stored record, as last written
    pub fn stored(&self, id: u64) -> Option<Value> {
        self.state.find(id).map(|(_, v)| v)
    }

    /// Deletes an object behind the provider's back
    pub fn remove(&self, id: u64) {
        self.state.objects.lock().unwrap().remove(&id);
    }

    pub fn insert(&self, kind: Kind, body: Value) -> u64 {
        let id = self.state.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let record = self.state.computed(kind, id, &body, None);
        self.state
            .objects
            .lock()
            .unwrap()
            .insert(id, (kind, record));
        id
    }

    pub fn seed_transcoding_profile(&self, name: &str) -> u64 {
        let id = self.insert(
            Kind::TranscodingProfile,
            json!({"name": name, "internalId": format!("tp-{name}"), "content": {"ladder": []}}),
        );
        if let Some((_, record)) = self.state.objects.lock().unwrap().get_mut(&id) {
            if let Some(map) = record.as_object_mut() {
                map.remove("type");
                map.remove("description");
            }
        }
        id
    }
}

pub async fn call(server: &ProviderServer<BpkioProvider>, request: Value) -> Response {
    let request: Request = serde_json::from_value(request).unwrap();
    server.handle(request).await
}

pub async fn configured(api: &FakeApi) -> ProviderServer<BpkioProvider> {
    configured_with_key(api, API_KEY).await
}

pub async fn configured_with_key(api: &FakeApi, api_key: &str) -> ProviderServer<BpkioProvider> {
    let server = ProviderServer::new(BpkioProvider::new());
    let response = call(
        &server,
        json!({
            "method": "configure_provider",
            "params": {"config": {"endpoint": api.endpoint, "api_key": api_key}}
        }),
    )
    .await;
    assert!(
        !response.diagnostics.has_error(),
        "{:?}",
        response.diagnostics
    );
    server
}

pub fn assert_ok(response: &Response) {
    assert!(
        !response.diagnostics.has_error(),
        "unexpected diagnostics: {:?}",
        response.diagnostics
    );
}

/// Plans `config` against `prior` and applies the plan
pub async fn apply(
    server: &ProviderServer<BpkioProvider>,
    type_name: &str,
    prior: &Value,
    config: Value,
) -> Response {
    let plan = call(
        server,
        json!({
            "method": "plan_resource_change",
            "params": {"type_name": type_name, "prior_state": prior, "config": config}
        }),
    )
    .await;
    assert_ok(&plan);
    let planned = plan.planned_state.unwrap();
    call(
        server,
        json!({
            "method": "apply_resource_change",
            "params": {"type_name": type_name, "prior_state": prior, "planned_state": planned}
        }),
    )
    .await
}

pub async fn destroy(
    server: &ProviderServer<BpkioProvider>,
    type_name: &str,
    prior: &Value,
) -> Response {
    call(
        server,
        json!({
            "method": "apply_resource_change",
            "params": {"type_name": type_name, "prior_state": prior, "planned_state": null}
        }),
    )
    .await
}

pub async fn read(
    server: &ProviderServer<BpkioProvider>,
    type_name: &str,
    state: &Value,
) -> Response {
    call(
        server,
        json!({
            "method": "read_resource",
            "params": {"type_name": type_name, "current_state": state}
        }),
    )
    .await
}

pub async fn read_data_source(
    server: &ProviderServer<BpkioProvider>,
    type_name: &str,
    config: Value,
) -> Response {
    call(
        server,
        json!({
            "method": "read_data_source",
            "params": {"type_name": type_name, "config": config}
        }),
    )
    .await
}
