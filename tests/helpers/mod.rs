use axum::body::{to_bytes, Body};
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Router;
use notedesk::infrastructure::HttpApi;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use tokio::sync::oneshot;
use url::Url;

/// Canned answer for one method and path
#[derive(Debug, Clone)]
pub struct Stub {
    method: &'static str,
    path: String,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
}

impl Stub {
    pub fn json(method: &'static str, path: &str, status: u16, body: Value) -> Self {
        Self {
            method,
            path: path.to_string(),
            status,
            content_type: "application/json",
            body: body.to_string().into_bytes(),
        }
    }

    pub fn raw(method: &'static str, path: &str, status: u16, body: &[u8]) -> Self {
        Self {
            method,
            path: path.to_string(),
            status,
            content_type: "application/octet-stream",
            body: body.to_vec(),
        }
    }
}

/// A multipart part the backend received
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedPart {
    pub name: String,
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: Vec<u8>,
    pub parts: Vec<UploadedPart>,
}

#[allow(dead_code)]
impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }
}

struct Shared {
    stubs: Vec<Stub>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// HTTP server on an ephemeral port, answering from stubs and recording
/// every request; shuts down when dropped.
pub struct FakeBackend {
    addr: SocketAddr,
    shared: Arc<Shared>,
    shutdown: Option<oneshot::Sender<()>>,
}

#[allow(dead_code)]
impl FakeBackend {
    pub fn start(stubs: Vec<Stub>) -> Self {
        let shared = Arc::new(Shared {
            stubs,
            requests: Mutex::new(Vec::new()),
        });
        let (addr_tx, addr_rx) = mpsc::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let state = Arc::clone(&shared);
        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
                .expect("Failed to build tokio runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("Failed to bind fake backend");
                addr_tx
                    .send(listener.local_addr().expect("No local address"))
                    .expect("Test thread gone");
                let app = Router::new().fallback(handle).with_state(state);
                axum::serve(listener, app)
                    .with_graceful_shutdown(async {
                        let _ = shutdown_rx.await;
                    })
                    .await
                    .expect("Fake backend failed");
            });
        });

        let addr = addr_rx.recv().expect("Fake backend did not start");
        Self {
            addr,
            shared,
            shutdown: Some(shutdown_tx),
        }
    }

    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).expect("Invalid fake backend URL")
    }

    pub fn api(&self) -> HttpApi {
        HttpApi::new(self.base_url(), None).expect("Failed to build HttpApi")
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.shared.requests.lock().expect("Poisoned").clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("No request recorded")
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

async fn handle(State(shared): State<Arc<Shared>>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let method = parts.method.to_string();
    let path = parts.uri.path().to_string();
    let query = parts.uri.query().map(str::to_string);
    let is_multipart = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));
    let bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();

    let mut uploaded = Vec::new();
    if is_multipart {
        let rebuilt = Request::from_parts(parts, Body::from(bytes.clone()));
        if let Ok(mut multipart) = Multipart::from_request(rebuilt, &()).await {
            while let Ok(Some(field)) = multipart.next_field().await {
                let name = field.name().unwrap_or_default().to_string();
                let file_name = field.file_name().map(str::to_string);
                let data = field.bytes().await.unwrap_or_default();
                uploaded.push(UploadedPart {
                    name,
                    file_name,
                    bytes: data.to_vec(),
                });
            }
        }
    }

    shared
        .requests
        .lock()
        .expect("Poisoned")
        .push(RecordedRequest {
            method: method.clone(),
            path: path.clone(),
            query,
            body: bytes.to_vec(),
            parts: uploaded,
        });

    match shared
        .stubs
        .iter()
        .find(|s| s.method == method && s.path == path)
    {
        Some(stub) => (
            StatusCode::from_u16(stub.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            [(CONTENT_TYPE, stub.content_type)],
            stub.body.clone(),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            [(CONTENT_TYPE, "application/json")],
            r#"{"detail":"Not Found"}"#,
        )
            .into_response(),
    }
}
