//! Integration tests for `sah notify`.
//!
//! A plain `TcpListener` thread stands in for the control plane.

use predicates::prelude::*;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use crate::common::{ServiceFixture, TestProject};

/// Accept one request, answer with `status`, and return the request text.
fn serve_once(status: &'static str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/deployments", listener.local_addr().unwrap());
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = stream.read(&mut buf).unwrap();
            request.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&request);
            if n == 0 || (text.contains("\r\n\r\n") && text.ends_with("{}")) {
                break;
            }
        }
        let response = format!("HTTP/1.1 {status}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n");
        stream.write_all(response.as_bytes()).unwrap();
        String::from_utf8_lossy(&request).into_owned()
    });
    (url, handle)
}

#[test]
fn test_notify_delivers() {
    let (url, server) = serve_once("200 OK");
    let project = TestProject::new().unwrap();
    project.write_service(&ServiceFixture::with_notify(&url, "deploy-token").content).unwrap();

    project
        .sah()
        .arg("notify")
        .assert()
        .success()
        .stdout(predicate::str::contains("Notification delivered (HTTP 200)"));

    let request = server.join().unwrap();
    assert!(request.starts_with("POST /deployments"), "{request}");
    assert!(request.to_lowercase().contains("authorization: bearer deploy-token"), "{request}");
}

#[test]
fn test_notify_token_from_environment() {
    let (url, server) = serve_once("204 No Content");
    let project = TestProject::new().unwrap();
    project.write_service(&ServiceFixture::active().content).unwrap();

    project
        .sah()
        .args(["notify", "--url", &url])
        .env("SAH_TOKEN", "env-token")
        .assert()
        .success()
        .stdout(predicate::str::contains("Notification delivered (HTTP 204)"));

    let request = server.join().unwrap();
    assert!(request.to_lowercase().contains("authorization: bearer env-token"), "{request}");
}

#[test]
fn test_notify_server_error_does_not_fail() {
    let (url, server) = serve_once("503 Service Unavailable");
    let project = TestProject::new().unwrap();
    project.write_service(&ServiceFixture::with_notify(&url, "deploy-token").content).unwrap();

    project
        .sah()
        .arg("notify")
        .assert()
        .success()
        .stdout(predicate::str::contains("Notification failed: HTTP 503"));
    server.join().unwrap();
}

#[test]
fn test_notify_unreachable_does_not_fail() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let project = TestProject::new().unwrap();
    project
        .write_service(&ServiceFixture::with_notify(&format!("http://{addr}/"), "token").content)
        .unwrap();

    project
        .sah()
        .args(["notify", "--timeout", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Notification failed"))
        .stderr(predicate::str::contains("Failed to notify"));
}

#[test]
fn test_notify_skipped_without_endpoint() {
    let project = TestProject::new().unwrap();
    project.write_service(&ServiceFixture::active().content).unwrap();

    project
        .sah()
        .arg("notify")
        .assert()
        .success()
        .stdout(predicate::str::contains("Notification skipped"));
}

#[test]
fn test_notify_requires_configuration() {
    let project = TestProject::new().unwrap();
    project.write_service(&ServiceFixture::missing_custom().content).unwrap();

    project
        .sah()
        .arg("notify")
        .assert()
        .failure()
        .stderr(predicate::str::contains("sah-plugin: ERROR: Missing custom configuration object"));
}
