//! Integration tests for the plugin lifecycle.
//!
//! These tests exercise the full install → list → resolve → remove flow
//! against a temp directory store and a mock HTTP server.

use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tsuru_client::plugin::{self, PluginError, PluginStore};

// =============================================================================
// Test Fixtures
// =============================================================================

/// Test fixture holding a temp plugin store and a mock download server.
struct PluginFixture {
    _dir: TempDir,
    store: PluginStore,
    server: MockServer,
}

impl PluginFixture {
    async fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let store = PluginStore::with_dir(dir.path().join("plugins"));
        let server = MockServer::start().await;
        Self {
            _dir: dir,
            store,
            server,
        }
    }

    /// Serve `body` with `status` at `/dl/<name>`.
    async fn serve(&self, name: &str, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/dl/{}", name)))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    fn url(&self, name: &str) -> String {
        format!("{}/dl/{}", self.server.uri(), name)
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn install_then_list_includes_the_plugin() {
    let fx = PluginFixture::new().await;
    fx.serve("deploy", 200, "#!/bin/sh\necho deploy\n").await;

    plugin::install(&fx.store, "deploy", &fx.url("deploy"))
        .await
        .expect("install failed");

    assert_eq!(fx.store.list(), vec!["deploy".to_string()]);
}

#[tokio::test]
async fn remove_then_list_excludes_the_plugin() {
    let fx = PluginFixture::new().await;
    fx.serve("deploy", 200, "#!/bin/sh\n").await;

    plugin::install(&fx.store, "deploy", &fx.url("deploy"))
        .await
        .expect("install failed");
    fx.store.remove("deploy").expect("remove failed");

    assert!(fx.store.list().is_empty());
}

#[tokio::test]
async fn reinstall_overwrites_the_previous_version() {
    let fx = PluginFixture::new().await;
    fx.serve("v", 200, "second version").await;
    fx.store.ensure_dir().unwrap();
    std::fs::write(fx.store.path_of("v"), "first version, much longer than the second").unwrap();

    plugin::install(&fx.store, "v", &fx.url("v")).await.unwrap();

    let content = std::fs::read_to_string(fx.store.path_of("v")).unwrap();
    assert_eq!(content, "second version");
}

// =============================================================================
// Failure modes
// =============================================================================

#[tokio::test]
async fn install_fails_on_http_error_statuses() {
    for status in [404u16, 500] {
        let fx = PluginFixture::new().await;
        fx.serve("x", status, "server said no").await;

        let err = plugin::install(&fx.store, "x", &fx.url("x"))
            .await
            .unwrap_err();
        match err {
            PluginError::Download { status: got, body } => {
                assert_eq!(got, status);
                assert_eq!(body, "server said no");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

#[tokio::test]
async fn install_network_failure_is_a_network_error() {
    let fx = PluginFixture::new().await;
    // Nothing listens on this port.
    let err = plugin::install(&fx.store, "x", "http://127.0.0.1:1/x")
        .await
        .unwrap_err();
    assert!(matches!(err, PluginError::Network(_)));
}

// =============================================================================
// Resolution
// =============================================================================

#[tokio::test]
async fn resolution_matrix() {
    let fx = PluginFixture::new().await;
    fx.store.ensure_dir().unwrap();
    std::fs::write(fx.store.path_of("foo"), "").unwrap();
    std::fs::write(fx.store.path_of("bar.sh"), "").unwrap();
    std::fs::write(fx.store.path_of("baz.sh"), "").unwrap();
    std::fs::write(fx.store.path_of("baz.py"), "").unwrap();

    // Exact match.
    assert_eq!(fx.store.resolve("foo").unwrap(), fx.store.path_of("foo"));
    // Single wildcard match.
    assert_eq!(fx.store.resolve("bar").unwrap(), fx.store.path_of("bar.sh"));
    // Ambiguous wildcard match fails.
    assert!(matches!(
        fx.store.resolve("baz"),
        Err(PluginError::NotFound(_))
    ));
    // No match fails.
    assert!(matches!(
        fx.store.resolve("qux"),
        Err(PluginError::NotFound(_))
    ));
}

#[test]
fn self_invocation_guard_fires_before_filesystem_access() {
    // The store holds a plugin that would resolve; the guard must win anyway.
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("self"), "").unwrap();
    let store = PluginStore::with_dir(dir.path().to_path_buf());

    let err = plugin::exec::resolve_guarded(&store, "self", Some("self")).unwrap_err();
    assert!(matches!(err, PluginError::NotFound(name) if name == "self"));

    // Without the marker the same name resolves fine.
    assert!(plugin::exec::resolve_guarded(&store, "self", None).is_ok());
}
