#![allow(clippy::unwrap_used)]
// End-to-end tests for `HealthCheck` against a mocked APIC.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use aci_core::{CoreError, FabricConfig, HealthCheck, NodeStatus, Severity, TlsVerification};

// ── Helpers ─────────────────────────────────────────────────────────

fn config(server: &MockServer) -> FabricConfig {
    FabricConfig {
        url: server.uri().parse().unwrap(),
        username: "admin".into(),
        password: "s3cret".to_string().into(),
        tls: TlsVerification::DangerAcceptInvalid,
        timeout: Duration::from_secs(5),
    }
}

fn envelope(class: &str, objects: Vec<Value>) -> Value {
    let imdata: Vec<Value> = objects
        .into_iter()
        .map(|attrs| {
            let mut entry = serde_json::Map::new();
            entry.insert(class.to_owned(), json!({ "attributes": attrs }));
            Value::Object(entry)
        })
        .collect();
    json!({ "totalCount": imdata.len().to_string(), "imdata": imdata })
}

async fn mount_get(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_session(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/aaaLogin.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            "aaaLogin",
            vec![json!({ "token": "abc", "version": "6.0(2h)" })],
        )))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/aaaLogout.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope("aaaLogout", vec![])))
        .expect(1)
        .mount(server)
        .await;
}

fn fault(severity: &str, descr: &str) -> Value {
    json!({
        "severity": severity,
        "descr": descr,
        "dn": "topology/pod-1/node-101/sys/fault-F0000",
        "created": "2024-06-15T10:30:00.000+00:00"
    })
}

// ── Tests ───────────────────────────────────────────────────────────

#[tokio::test]
async fn oneshot_builds_report() {
    let server = MockServer::start().await;
    mount_session(&server).await;

    mount_get(
        &server,
        "/api/class/faultInst.json",
        envelope(
            "faultInst",
            vec![
                fault("warning", "NTP not synchronized"),
                fault("critical", "Power supply failed"),
                fault("cleared", "Link recovered"),
                fault("major", "Port is down"),
                fault("minor", "Fan speed high"),
            ],
        ),
    )
    .await;

    mount_get(
        &server,
        "/api/class/fabricNode.json",
        envelope(
            "fabricNode",
            vec![
                json!({ "id": "1", "name": "apic1", "role": "controller", "fabricSt": "unknown" }),
                json!({ "id": "201", "name": "spine-201", "role": "spine", "fabricSt": "active" }),
                json!({ "id": "101", "name": "leaf-101", "role": "leaf", "fabricSt": "inactive" }),
            ],
        ),
    )
    .await;

    mount_get(
        &server,
        "/api/class/infraWiNode.json",
        envelope(
            "infraWiNode",
            vec![json!({ "nodeName": "apic1", "health": "fully-fit" })],
        ),
    )
    .await;

    let report = HealthCheck::oneshot(config(&server)).await.unwrap();

    assert_eq!(report.total, 4);
    assert_eq!(report.count(Severity::Critical), 1);
    assert_eq!(report.count(Severity::Major), 1);
    assert_eq!(report.count(Severity::Minor), 1);
    assert_eq!(report.count(Severity::Warning), 1);

    let details: Vec<&str> = report
        .critical_major
        .iter()
        .map(|f| f.description.as_str())
        .collect();
    assert_eq!(details, vec!["Power supply failed", "Port is down"]);

    let statuses: Vec<(&str, NodeStatus)> = report
        .nodes
        .iter()
        .map(|n| (n.name.as_str(), n.status.clone()))
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("apic1", NodeStatus::Ok),
            ("spine-201", NodeStatus::Ok),
            ("leaf-101", NodeStatus::Down),
        ]
    );
    assert_eq!(report.unhealthy_nodes.len(), 1);
}

#[tokio::test]
async fn login_failure_is_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/aaaLogin.json"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "totalCount": "1",
            "imdata": [{ "error": { "attributes": {
                "code": "401",
                "text": "Username or password is incorrect - FAILED local authentication"
            } } }]
        })))
        .mount(&server)
        .await;

    let result = HealthCheck::oneshot(config(&server)).await;

    assert!(
        matches!(result, Err(CoreError::AuthenticationFailed { ref message }) if message.contains("incorrect")),
        "expected AuthenticationFailed, got: {result:?}"
    );
}

#[tokio::test]
async fn query_failure_still_logs_out() {
    let server = MockServer::start().await;
    mount_session(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/class/faultInst.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = HealthCheck::oneshot(config(&server)).await;

    assert!(
        matches!(result, Err(CoreError::Api { status: Some(500), .. })),
        "expected Api error, got: {result:?}"
    );
    // `expect(1)` on the logout mock is verified when the server drops.
}

#[tokio::test]
async fn unreachable_controller_is_connection_failure() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let cfg = FabricConfig {
        url: format!("http://127.0.0.1:{port}").parse().unwrap(),
        username: "admin".into(),
        password: "pw".to_string().into(),
        tls: TlsVerification::default(),
        timeout: Duration::from_secs(5),
    };

    let result = HealthCheck::oneshot(cfg).await;
    assert!(
        matches!(result, Err(CoreError::ConnectionFailed { .. })),
        "expected ConnectionFailed, got: {result:?}"
    );
}

#[tokio::test]
async fn login_timeout_reports_configured_seconds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/aaaLogin.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(3))
                .set_body_json(envelope("aaaLogin", vec![json!({ "token": "abc" })])),
        )
        .mount(&server)
        .await;

    let cfg = FabricConfig {
        timeout: Duration::from_secs(1),
        ..config(&server)
    };

    let result = HealthCheck::oneshot(cfg).await;
    assert!(
        matches!(result, Err(CoreError::Timeout { timeout_secs: 1 })),
        "expected Timeout, got: {result:?}"
    );
}

#[test]
fn unreadable_ca_file_is_config_error() {
    let cfg = FabricConfig {
        url: "https://apic1.example.com".parse().unwrap(),
        username: "admin".into(),
        password: "pw".to_string().into(),
        tls: TlsVerification::CustomCa("/nonexistent/ca.pem".into()),
        timeout: Duration::from_secs(5),
    };

    let err = HealthCheck::new(cfg).err().unwrap();
    assert!(
        matches!(err, CoreError::Config { ref message } if message.contains("CA cert")),
        "expected Config error, got: {err:?}"
    );
}
