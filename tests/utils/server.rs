/// Spawns the full router on an ephemeral port
use listo_lib::http::build_router;
use listo_lib::infrastructure::local::LocalStore;
use listo_lib::{local_state, serve};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

pub const TEST_ORIGIN: &str = "http://localhost:19006";

pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
    shutdown: CancellationToken,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

pub async fn spawn_app() -> TestApp {
    let state = local_state(
        Arc::new(LocalStore::in_memory()),
        vec![TEST_ORIGIN.to_string()],
    );
    let app = build_router(state, 64 * 1024);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = CancellationToken::new();

    tokio::spawn(serve(listener, app, shutdown.clone()));

    TestApp {
        base_url: format!("http://{}", addr),
        client: reqwest::Client::new(),
        shutdown,
    }
}
