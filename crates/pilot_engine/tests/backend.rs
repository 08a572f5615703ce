use std::time::Duration;

use pilot_core::{AgentKind, AgentReport, RecordId, ReviewInput, REVIEW_TRIGGER_TEXT};
use pilot_engine::{Backend, BackendSettings, FailureKind, ReqwestBackend};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer) -> ReqwestBackend {
    ReqwestBackend::new(BackendSettings {
        base_url: server.uri(),
        ..BackendSettings::default()
    })
    .expect("backend")
}

#[tokio::test]
async fn lists_interviews_from_backend_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/interviews"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 2,
                "created_at": "2024-03-01T08:00:00",
                "interview_data": {
                    "company": {"name": "Acme"},
                    "position": {"title": "SRE"},
                    "process": {"timeline": [
                        {"date": "2024-03-15", "time": "10:00", "stage": "Onsite", "status": "待定"}
                    ]}
                }
            },
            {"id": 1, "interview_data": {"company": {"name": "Globex"}}}
        ])))
        .mount(&server)
        .await;

    let records = backend_for(&server).list_interviews().await.expect("list ok");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, RecordId::from(2));
    assert_eq!(records[0].company_name(), "Acme");
    assert_eq!(records[0].timeline()[0].time.as_deref(), Some("10:00"));
    assert_eq!(records[1].company_name(), "Globex");
}

#[tokio::test]
async fn submits_interview_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/interviews"))
        .and(body_json(json!({"text": "Onsite next Monday"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 3})))
        .expect(1)
        .mount(&server)
        .await;

    backend_for(&server)
        .submit_interview("Onsite next Monday")
        .await
        .expect("submit ok");
}

#[tokio::test]
async fn submits_review_for_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/interviews/7/review"))
        .and(body_json(json!({"summary": "solid", "score": 4})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let review = ReviewInput {
        summary: "solid".to_string(),
        score: Some(4),
        improvement: None,
    };
    backend_for(&server)
        .submit_review(&RecordId::from(7), &review)
        .await
        .expect("review ok");
}

#[tokio::test]
async fn review_agent_sends_trigger_text_and_parses_schema() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/agents/review/5"))
        .and(body_json(json!({"text": REVIEW_TRIGGER_TEXT})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "skills": {"coding": 4},
            "weakness": "nerves",
            "actions": ["mock interviews"]
        })))
        .mount(&server)
        .await;

    let report = backend_for(&server)
        .run_agent(AgentKind::Review, &RecordId::from(5))
        .await
        .expect("agent ok");
    let AgentReport::Review(review) = report else {
        panic!("wrong kind");
    };
    assert_eq!(review.weakness, "nerves");
    assert_eq!(review.actions, vec!["mock interviews"]);
}

#[tokio::test]
async fn other_agents_send_empty_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/agents/progress/5"))
        .and(body_json(json!({})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"reminders": ["today"], "conflicts": []})),
        )
        .mount(&server)
        .await;

    let report = backend_for(&server)
        .run_agent(AgentKind::Progress, &RecordId::from(5))
        .await
        .expect("agent ok");
    assert_eq!(report.kind(), AgentKind::Progress);
}

#[tokio::test]
async fn non_success_status_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/agents/decision/1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "boom"})))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .run_agent(AgentKind::Decision, &RecordId::from(1))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn body_not_matching_schema_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/interviews"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = backend_for(&server).list_interviews().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn slow_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/interviews"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;

    let backend = ReqwestBackend::new(BackendSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..BackendSettings::default()
    })
    .expect("backend");
    let err = backend.list_interviews().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn base_url_path_prefix_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/interviews"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let backend = ReqwestBackend::new(BackendSettings {
        base_url: format!("{}/api/", server.uri()),
        ..BackendSettings::default()
    })
    .expect("backend");
    assert!(backend.list_interviews().await.expect("list ok").is_empty());
}

#[test]
fn invalid_base_url_is_rejected() {
    let err = ReqwestBackend::new(BackendSettings {
        base_url: "not a url".to_string(),
        ..BackendSettings::default()
    })
    .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);

    let err = ReqwestBackend::new(BackendSettings {
        base_url: "mailto:someone@example.com".to_string(),
        ..BackendSettings::default()
    })
    .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
