//! Update flow contract tests.
//!
//! Exercise the manifest check and the package download against a mock
//! update server: comparison semantics, progress reporting, the
//! skip-on-existing-file shortcut, and error surfaces.

use futures_util::{StreamExt, pin_mut};
use serde_json::json;
use sideload_updater::flow::UP_TO_DATE_TEXT;
use sideload_updater::{
    DownloadEvent, UpdateClient, UpdateConfig, UpdateError, UpdateFlow, download_package,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(base_url: &str, dir: &std::path::Path) -> UpdateConfig {
    UpdateConfig::new(base_url, dir).with_current_version(3, "1.0.0")
}

async fn mount_manifest(server: &MockServer, code: u32, name: &str, url: &str) {
    Mock::given(method("GET"))
        .and(path("/version.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "versionCode": code,
            "versionName": name,
            "url": url,
        })))
        .mount(server)
        .await;
}

// ────────────────────────────────────────────────────────────────────────────
// Version check
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn newer_manifest_opens_update_dialog() {
    let server = MockServer::start().await;
    mount_manifest(&server, 5, "1.2.0", "http://x/app.apk").await;

    let dir = tempfile::tempdir().unwrap();
    let client = UpdateClient::new(test_config(&server.uri(), dir.path())).unwrap();

    let mut flow = UpdateFlow::default();
    flow.start_check();
    flow.finish_check(client.check_for_update().await);

    assert_eq!(flow.dialog_title(), Some("Update Available"));
    assert!(flow.dialog_text().unwrap().contains("1.2.0"));
}

#[tokio::test]
async fn equal_manifest_reports_up_to_date() {
    let server = MockServer::start().await;
    mount_manifest(&server, 3, "1.0.0", "http://x/app.apk").await;

    let dir = tempfile::tempdir().unwrap();
    let client = UpdateClient::new(test_config(&server.uri(), dir.path())).unwrap();

    let mut flow = UpdateFlow::default();
    flow.start_check();
    flow.finish_check(client.check_for_update().await);

    assert_eq!(flow.toast().as_deref(), Some(UP_TO_DATE_TEXT));
    assert!(flow.dialog_title().is_none());
}

#[tokio::test]
async fn older_manifest_reports_up_to_date() {
    let server = MockServer::start().await;
    mount_manifest(&server, 2, "0.9.0", "http://x/app.apk").await;

    let dir = tempfile::tempdir().unwrap();
    let client = UpdateClient::new(test_config(&server.uri(), dir.path())).unwrap();

    assert_eq!(client.check_for_update().await.unwrap(), None);
}

#[tokio::test]
async fn check_is_idempotent_against_unchanged_manifest() {
    let server = MockServer::start().await;
    mount_manifest(&server, 5, "1.2.0", "http://x/app.apk").await;

    let dir = tempfile::tempdir().unwrap();
    let client = UpdateClient::new(test_config(&server.uri(), dir.path())).unwrap();

    let first = client.fetch_latest().await.unwrap();
    let second = client.fetch_latest().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn check_server_error_propagates_then_presents_as_up_to_date() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/version.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let client = UpdateClient::new(test_config(&server.uri(), dir.path())).unwrap();

    let result = client.check_for_update().await;
    assert!(matches!(result, Err(UpdateError::Server { status: 500 })));

    // The flow swallows the failure into the up-to-date presentation.
    let mut flow = UpdateFlow::default();
    flow.start_check();
    flow.finish_check(result);
    assert_eq!(flow.toast().as_deref(), Some(UP_TO_DATE_TEXT));
}

#[tokio::test]
async fn check_garbage_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/version.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let client = UpdateClient::new(test_config(&server.uri(), dir.path())).unwrap();

    assert!(matches!(
        client.fetch_latest().await,
        Err(UpdateError::JsonParse(_))
    ));
}

// ────────────────────────────────────────────────────────────────────────────
// Package download
// ────────────────────────────────────────────────────────────────────────────

fn manifest_for_package(server: &MockServer, code: u32) -> sideload_updater::VersionInfo {
    sideload_updater::VersionInfo {
        version_code: code,
        version_name: "1.2.0".to_string(),
        url: format!("{}/app.apk", server.uri()),
    }
}

#[tokio::test]
async fn fresh_download_writes_file_and_reports_monotone_progress() {
    let server = MockServer::start().await;
    let payload = vec![0xA5u8; 64 * 1024];
    Mock::given(method("GET"))
        .and(path("/app.apk"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(payload.clone()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&server.uri(), dir.path());
    let info = manifest_for_package(&server, 5);

    let events = download_package(&config, &info);
    pin_mut!(events);

    let mut fractions = Vec::new();
    let mut completed = None;
    while let Some(event) = events.next().await {
        match event.unwrap() {
            DownloadEvent::Progress(p) => fractions.push(p.fraction()),
            DownloadEvent::Complete(path) => completed = Some(path),
        }
    }

    assert!(!fractions.is_empty());
    assert!(fractions.windows(2).all(|w| w[0] <= w[1]));
    assert!((fractions.last().unwrap() - 1.0).abs() < 1e-9);

    let path = completed.expect("download should complete");
    assert_eq!(path, dir.path().join("app_v5.apk"));
    assert_eq!(std::fs::read(&path).unwrap(), payload);
}

#[tokio::test]
async fn existing_package_skips_the_network() {
    let server = MockServer::start().await;
    // Any hit on the package URL fails the test.
    Mock::given(method("GET"))
        .and(path("/app.apk"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&server.uri(), dir.path());
    let info = manifest_for_package(&server, 5);

    // Plant a file whose content cannot have come from the server: the
    // shortcut performs no integrity check, so stale bytes are reported
    // complete as-is.
    let planted = b"stale partial write".to_vec();
    std::fs::write(config.package_path(&info), &planted).unwrap();

    let events = download_package(&config, &info);
    pin_mut!(events);

    let first = events.next().await.unwrap().unwrap();
    match first {
        DownloadEvent::Progress(p) => assert!((p.fraction() - 1.0).abs() < 1e-9),
        DownloadEvent::Complete(_) => panic!("progress must precede completion"),
    }

    let second = events.next().await.unwrap().unwrap();
    let DownloadEvent::Complete(path) = second else {
        panic!("expected completion after full progress");
    };
    assert!(events.next().await.is_none());

    assert_eq!(std::fs::read(&path).unwrap(), planted);
}

#[tokio::test]
async fn non_success_download_surfaces_the_status_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/app.apk"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&server.uri(), dir.path());
    let info = manifest_for_package(&server, 5);

    let events = download_package(&config, &info);
    pin_mut!(events);

    let err = events.next().await.unwrap().unwrap_err();
    assert!(err.to_string().contains("404"));
    assert!(events.next().await.is_none());
}

#[tokio::test]
async fn empty_body_download_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/app.apk"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(Vec::new()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&server.uri(), dir.path());
    let info = manifest_for_package(&server, 5);

    let events = download_package(&config, &info);
    pin_mut!(events);

    let mut last_err = None;
    while let Some(event) = events.next().await {
        if let Err(err) = event {
            last_err = Some(err);
        }
    }
    assert!(matches!(last_err, Some(UpdateError::EmptyBody)));
}

#[tokio::test]
async fn failed_download_returns_flow_to_not_downloading() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/app.apk"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&server.uri(), dir.path());
    let info = manifest_for_package(&server, 5);

    let mut flow = UpdateFlow::default();
    flow.start_check();
    flow.finish_check(Ok(Some(info.clone())));
    flow.start_download();
    assert!(flow.is_downloading());

    let events = download_package(&config, &info);
    pin_mut!(events);
    while let Some(event) = events.next().await {
        flow.apply_download_event(event);
    }

    assert!(!flow.is_downloading());
    let toast = flow.toast().expect("failure should surface a notification");
    assert!(toast.contains("503"));
}
