// tests/shell_tests.rs
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use webview_shell::config::{BackendConfig, Config, ContentConfig, MessagingConfig};
use webview_shell::messaging::{MessagingError, RealtimeClient};
use webview_shell::shell::Shell;

struct TempRoot(PathBuf);

impl TempRoot {
    fn new() -> Self {
        let root = std::env::temp_dir().join(format!("webview-shell-it-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("index.html"), "<html>bundled app</html>").unwrap();
        Self(root)
    }
}

impl Drop for TempRoot {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

fn shell_config(backend_url: &str, web_root: &TempRoot) -> Config {
    Config {
        backend: BackendConfig {
            base_url: backend_url.parse().unwrap(),
            health_path: "api/health".to_string(),
            request_timeout_secs: 2,
        },
        content: ContentConfig {
            bind_addr: ([127, 0, 0, 1], 0).into(),
            web_root: web_root.0.clone(),
        },
        messaging: MessagingConfig::default(),
    }
}

async fn wait_for_health_report(shell: &Shell) {
    for _ in 0..100 {
        if shell.health().last_report().is_some() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("health check never completed");
}

struct CountingClient {
    connects: AtomicUsize,
    disconnects: AtomicUsize,
}

impl CountingClient {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            connects: AtomicUsize::new(0),
            disconnects: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl RealtimeClient for CountingClient {
    async fn connect(&self) -> Result<(), MessagingError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), MessagingError> {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connects.load(Ordering::SeqCst) > self.disconnects.load(Ordering::SeqCst)
    }
}

#[tokio::test]
async fn startup_issues_exactly_one_health_request() {
    let mut backend = mockito::Server::new_async().await;
    let mock = backend
        .mock("GET", "/api/health")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":"ok","server":"srv-1"}"#)
        .expect(1)
        .create_async()
        .await;

    let root = TempRoot::new();
    let shell = Shell::builder(shell_config(&backend.url(), &root))
        .start()
        .await
        .unwrap();

    wait_for_health_report(&shell).await;
    let report = shell.health().last_report().unwrap();
    assert!(report.reachable);
    assert_eq!(report.server.as_deref(), Some("srv-1"));

    // Nothing re-issues the check on its own.
    tokio::time::sleep(Duration::from_millis(200)).await;
    mock.assert_async().await;

    shell.shutdown().await;
}

#[tokio::test]
async fn backend_failure_never_blocks_startup() {
    let mut backend = mockito::Server::new_async().await;
    let _mock = backend
        .mock("GET", "/api/health")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let root = TempRoot::new();
    let shell = Shell::builder(shell_config(&backend.url(), &root))
        .start()
        .await
        .unwrap();

    wait_for_health_report(&shell).await;
    assert!(!shell.health().last_report().unwrap().reachable);

    // The shell keeps working: the bridge still answers.
    let result = shell.bridge().dispatch("configureForInputs").await;
    assert!(result.is_success());

    shell.shutdown().await;
}

#[tokio::test]
async fn bridge_operations_work_end_to_end() {
    let mut backend = mockito::Server::new_async().await;
    let _mock = backend
        .mock("GET", "/api/health")
        .with_status(200)
        .with_body(r#"{"status":"ok","server":"srv-1"}"#)
        .create_async()
        .await;

    let root = TempRoot::new();
    let shell = Shell::builder(shell_config(&backend.url(), &root))
        .start()
        .await
        .unwrap();

    // Startup already configured the surface; a second call is idempotent.
    assert!(shell.bridge().dispatch("configureForInputs").await.is_success());
    assert!(shell.bridge().dispatch("forceEnableInputs").await.is_success());
    assert!(shell.bridge().dispatch("forceEnableInputs").await.is_success());

    let snapshot = shell.surface().snapshot().await.unwrap();
    assert!(snapshot.settings.javascript_enabled);
    assert_eq!(snapshot.scripts.len(), 2);
    assert!(snapshot.scripts[1].contains("removeAttribute('disabled')"));

    let unknown = shell.bridge().dispatch("openSettings").await;
    assert!(unknown.reason().unwrap().contains("openSettings"));

    shell.shutdown().await;
}

#[tokio::test]
async fn content_origin_serves_the_bundle() {
    let mut backend = mockito::Server::new_async().await;
    let _mock = backend
        .mock("GET", "/api/health")
        .with_status(200)
        .with_body(r#"{"status":"ok","server":"srv-1"}"#)
        .create_async()
        .await;

    let root = TempRoot::new();
    let shell = Shell::builder(shell_config(&backend.url(), &root))
        .start()
        .await
        .unwrap();

    let origin = format!("http://{}", shell.content_addr());
    let index = reqwest::get(&origin).await.unwrap();
    assert!(index.status().is_success());
    assert!(index.text().await.unwrap().contains("bundled app"));

    // Client-side routes resolve to the same document.
    let route = reqwest::get(format!("{origin}/profile/settings"))
        .await
        .unwrap();
    assert!(route.status().is_success());

    shell.shutdown().await;
}

#[tokio::test]
async fn teardown_releases_messaging_exactly_once() {
    let mut backend = mockito::Server::new_async().await;
    let _mock = backend
        .mock("GET", "/api/health")
        .with_status(200)
        .with_body(r#"{"status":"ok","server":"srv-1"}"#)
        .create_async()
        .await;

    let root = TempRoot::new();
    let mut config = shell_config(&backend.url(), &root);
    config.messaging.enabled = true;
    config.messaging.endpoint = Some("wss://realtime.example.com".parse().unwrap());

    let client = CountingClient::new();
    let shell = Shell::builder(config)
        .with_realtime_client(client.clone())
        .start()
        .await
        .unwrap();

    assert!(shell.has_messaging());
    assert_eq!(client.connects.load(Ordering::SeqCst), 1);

    shell.shutdown().await;
    assert_eq!(client.disconnects.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn teardown_without_messaging_performs_no_messaging_action() {
    let mut backend = mockito::Server::new_async().await;
    let _mock = backend
        .mock("GET", "/api/health")
        .with_status(200)
        .with_body(r#"{"status":"ok","server":"srv-1"}"#)
        .create_async()
        .await;

    let root = TempRoot::new();
    // messaging stays disabled in config, so the injected client is never
    // touched.
    let client = CountingClient::new();
    let shell = Shell::builder(shell_config(&backend.url(), &root))
        .with_realtime_client(client.clone())
        .start()
        .await
        .unwrap();

    assert!(!shell.has_messaging());
    shell.shutdown().await;

    assert_eq!(client.connects.load(Ordering::SeqCst), 0);
    assert_eq!(client.disconnects.load(Ordering::SeqCst), 0);
}
