use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderValue, Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use std::time::Instant;

/// Allowed browser origins; `*` allows any
#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn new(allowed_origins: Vec<String>) -> Self {
        Self { allowed_origins }
    }

    pub fn allows(&self, origin: &str) -> bool {
        self.allowed_origins
            .iter()
            .any(|allowed| allowed == "*" || allowed == origin)
    }
}

const ALLOWED_METHODS: &str = "GET,POST,PUT,PATCH,DELETE,OPTIONS";
const ALLOWED_HEADERS: &str = "content-type";

fn request_origin(req: &Request<Body>) -> Option<String> {
    req.headers()
        .get("origin")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty() && value.len() <= 256)
}

fn allow_origin(resp: &mut Response, origin: &str) {
    if let Ok(value) = HeaderValue::from_str(origin) {
        resp.headers_mut()
            .insert("access-control-allow-origin", value);
        resp.headers_mut()
            .insert("vary", HeaderValue::from_static("origin"));
    }
}

/// Answers preflight requests and echoes allowed origins on responses
pub async fn cors_middleware(
    State(cors): State<Arc<CorsConfig>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let origin = request_origin(&req).filter(|origin| cors.allows(origin));

    if req.method() == Method::OPTIONS {
        let mut resp = StatusCode::NO_CONTENT.into_response();
        if let Some(origin) = origin {
            allow_origin(&mut resp, &origin);
            resp.headers_mut().insert(
                "access-control-allow-methods",
                HeaderValue::from_static(ALLOWED_METHODS),
            );
            resp.headers_mut().insert(
                "access-control-allow-headers",
                HeaderValue::from_static(ALLOWED_HEADERS),
            );
        }
        return resp;
    }

    let mut resp = next.run(req).await;
    if let Some(origin) = origin {
        allow_origin(&mut resp, &origin);
    }
    resp
}

/// One log line per request
pub async fn request_log_middleware(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let resp = next.run(req).await;

    tracing::info!(
        method = %method,
        path = %path,
        status = resp.status().as_u16(),
        latency_ms = started.elapsed().as_millis() as u64,
        "request handled"
    );
    resp
}
