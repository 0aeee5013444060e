#![allow(dead_code)]

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
    routing::post,
};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use tlumacz::api::OpenAiClient;
use tlumacz::config::{Config, PromptFallback};
use tlumacz::db::TranslatorStorage;
use tlumacz::prompt::PromptTemplateStore;
use tlumacz::router::TranslatorState;
use tlumacz::TranslationService;
use tokio::net::TcpListener;
use tower::ServiceExt;
use url::Url;

pub fn temp_path(tag: &str, ext: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("tlumacz-it-{tag}-{}-{nanos}.{ext}", std::process::id()));
    path
}

/// Local stand-in for the completion API; remembers the last request body.
pub struct FakeCompletionApi {
    pub base: Url,
    pub last_request: Arc<Mutex<Option<Value>>>,
}

impl FakeCompletionApi {
    pub async fn spawn(status: StatusCode, body: Value) -> Self {
        let last_request = Arc::new(Mutex::new(None));
        let seen = last_request.clone();
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move |Json(req): Json<Value>| {
                let body = body.clone();
                let seen = seen.clone();
                async move {
                    *seen.lock().expect("poisoned") = Some(req);
                    (status, Json(body))
                }
            }),
        );
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind fake api");
        let addr = listener.local_addr().expect("no local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake api crashed");
        });
        Self {
            base: Url::parse(&format!("http://{addr}/v1/")).expect("bad fake url"),
            last_request,
        }
    }

    pub async fn replying(text: &str) -> Self {
        Self::spawn(
            StatusCode::OK,
            serde_json::json!({
                "choices": [{"index": 0, "message": {"role": "assistant", "content": text}}]
            }),
        )
        .await
    }

    pub fn last_request(&self) -> Option<Value> {
        self.last_request.lock().expect("poisoned").clone()
    }

    /// Text of the single content part of the last request.
    pub fn last_payload(&self) -> Option<String> {
        self.last_request()
            .and_then(|v| v["messages"][0]["content"][0]["text"].as_str().map(str::to_owned))
    }
}

/// Database file, prompt file and the state wired to them.
pub struct Harness {
    pub state: TranslatorState,
    pub storage: Option<TranslatorStorage>,
    pub prompt_path: PathBuf,
    db_path: PathBuf,
}

pub struct HarnessOptions<'a> {
    pub tag: &'a str,
    pub api_base: Url,
    pub prompt: Option<&'a str>,
    pub fallback: PromptFallback,
    pub with_store: bool,
    pub max_body_bytes: usize,
}

impl<'a> HarnessOptions<'a> {
    pub fn new(tag: &'a str, api_base: Url) -> Self {
        Self {
            tag,
            api_base,
            prompt: Some("Translate: "),
            fallback: PromptFallback::Fail,
            with_store: true,
            max_body_bytes: 1024 * 1024,
        }
    }
}

impl Harness {
    pub async fn build(opts: HarnessOptions<'_>) -> Self {
        let db_path = temp_path(opts.tag, "sqlite");
        let prompt_path = temp_path(opts.tag, "txt");

        let cfg = Config {
            database_url: format!("sqlite:{}", db_path.display()),
            openai_base_url: opts.api_base,
            openai_api_key: "test-key".to_string(),
            prompt_path: prompt_path.clone(),
            prompt_fallback: opts.fallback,
            max_body_bytes: opts.max_body_bytes,
            ..Config::default()
        };

        let storage = if opts.with_store {
            Some(
                TranslatorStorage::connect(&cfg.database_url)
                    .await
                    .expect("failed to open temp database"),
            )
        } else {
            None
        };

        let templates = PromptTemplateStore::new(cfg.prompt_path.clone(), cfg.prompt_fallback);
        if let Some(prompt) = opts.prompt {
            templates.save(prompt).await.expect("failed to write prompt");
        }

        let client = OpenAiClient::new(&cfg).expect("failed to build client");
        let service = TranslationService::new(storage.clone(), templates, client);
        Self {
            state: TranslatorState::new(service, cfg.max_body_bytes),
            storage,
            prompt_path,
            db_path,
        }
    }

    pub fn storage(&self) -> &TranslatorStorage {
        self.storage.as_ref().expect("harness built without store")
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_path);
        let _ = std::fs::remove_file(&self.prompt_path);
    }
}

/// Send one request through `app`; returns status and JSON body (`Null` when empty).
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let resp = app
        .clone()
        .oneshot(builder.body(body).expect("failed to build request"))
        .await
        .expect("request failed");

    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body was not json")
    };
    (status, value)
}
