#![allow(dead_code)] // each integration test binary uses a subset of these helpers

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use uuid::Uuid;

use nest_api::auth::{AuthConfig, Claims};
use nest_api::config::ServerConfig;
use nest_api::routes;
use nest_api::state::AppState;
use nest_mailer::{ContactData, MailError, Notifier};
use nest_storage::{ObjectStore, StorageError};

/// HMAC secret test tokens are signed with.
pub const TEST_JWT_SECRET: &str = "test-secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        auth: AuthConfig {
            jwt_secret: TEST_JWT_SECRET.to_string(),
        },
    }
}

/// Sign a Bearer token for `actor` with the test secret, valid for an hour.
pub fn make_token(actor: Uuid) -> String {
    let claims = Claims {
        sub: actor,
        exp: chrono::Utc::now().timestamp() + 3600,
        email: Some("admin@nest.agency".to_string()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// Object-store calls observed by [`RecordingBlobs`].
#[derive(Debug, Clone, PartialEq)]
pub enum BlobCall {
    Upload(String),
    Delete(String),
}

/// In-memory object store that records every call and can be told to fail.
#[derive(Default)]
pub struct RecordingBlobs {
    pub calls: Mutex<Vec<BlobCall>>,
    pub fail_upload: bool,
}

impl RecordingBlobs {
    pub fn calls(&self) -> Vec<BlobCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn uploaded_keys(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BlobCall::Upload(k) => Some(k),
                BlobCall::Delete(_) => None,
            })
            .collect()
    }
}

#[async_trait]
impl ObjectStore for RecordingBlobs {
    async fn upload(
        &self,
        key: &str,
        _bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), StorageError> {
        self.calls
            .lock()
            .unwrap()
            .push(BlobCall::Upload(key.to_string()));
        if self.fail_upload {
            return Err(StorageError::Backend("upload rejected".to_string()));
        }
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://cdn.test/{key}")
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.calls
            .lock()
            .unwrap()
            .push(BlobCall::Delete(key.to_string()));
        Ok(())
    }
}

/// Notification sends observed by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq)]
pub enum SentMail {
    UserConfirmation { to: String },
    AdminNotification { contact_name: String },
}

/// Notifier that records every send. `fail_with` makes all sends fail with
/// the given error builder (the production error type is not `Clone`).
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<SentMail>>,
    pub fail_mode: Option<FailMode>,
}

/// Which error a failing [`RecordingNotifier`] produces.
#[derive(Debug, Clone, Copy)]
pub enum FailMode {
    BadAddress,
    NotConfigured,
}

impl RecordingNotifier {
    pub fn failing(mode: FailMode) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_mode: Some(mode),
        }
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }

    fn error(&self, mode: FailMode) -> MailError {
        match mode {
            FailMode::BadAddress => {
                MailError::Address("not an address".parse::<lettre::Address>().unwrap_err())
            }
            FailMode::NotConfigured => MailError::NotConfigured,
        }
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_user_confirmation(
        &self,
        to: &str,
        _user_name: &str,
    ) -> Result<String, MailError> {
        if let Some(mode) = self.fail_mode {
            return Err(self.error(mode));
        }
        self.sent.lock().unwrap().push(SentMail::UserConfirmation {
            to: to.to_string(),
        });
        Ok(format!("<{}@test.nest.agency>", Uuid::new_v4()))
    }

    async fn send_admin_notification(&self, contact: &ContactData) -> Result<String, MailError> {
        if let Some(mode) = self.fail_mode {
            return Err(self.error(mode));
        }
        self.sent
            .lock()
            .unwrap()
            .push(SentMail::AdminNotification {
                contact_name: contact.name.clone(),
            });
        Ok(format!("<{}@test.nest.agency>", Uuid::new_v4()))
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build the full application router with all middleware layers, using the
/// given pool and fakes for the object store and notifier.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(
    pool: PgPool,
    blobs: Arc<dyn ObjectStore>,
    notifier: Arc<dyn Notifier>,
) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config),
        blobs,
        notifier,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:3001".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .nest("/api", routes::dispatch_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Convenience: build the app with fresh default fakes.
pub fn build_app(pool: PgPool) -> Router {
    build_test_app(
        pool,
        Arc::new(RecordingBlobs::default()),
        Arc::new(RecordingNotifier::default()),
    )
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::post(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::get(uri)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::delete(uri)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::delete(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Decode a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Multipart helpers
// ---------------------------------------------------------------------------

pub const MULTIPART_BOUNDARY: &str = "nesttestboundary";

/// Minimal multipart/form-data body builder for project submissions.
#[derive(Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}

/// POST a multipart body without authentication.
pub async fn post_multipart(app: Router, uri: &str, body: Vec<u8>) -> Response<Body> {
    app.oneshot(
        Request::post(uri)
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// POST a multipart body with a Bearer token.
pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: Vec<u8>,
) -> Response<Body> {
    app.oneshot(
        Request::post(uri)
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}
