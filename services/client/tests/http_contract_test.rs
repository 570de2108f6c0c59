//! Integration tests for the planner components against a mock planner service.

use client_lib::{
    adapters::{HttpPlanAdapter, ServiceClient},
    config::Config,
    planner::{AppState, ChatError, ChatMode, ExportError, GenerationState, PlanError},
};
use serde_json::json;
use std::path::Path;
use std::time::Duration;
use travel_planner_core::{
    ports::{PlanGenerationService, PortError},
    ConversationTurn, RawPreferences,
};
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn krakow_form() -> RawPreferences {
    RawPreferences {
        destination: "Kraków".to_string(),
        budget: "Niski".to_string(),
        recreation_type: "Zwiedzanie".to_string(),
        interests: "sushi, gry planszowe".to_string(),
        date_range: "10-12 październik".to_string(),
        travelers_count: "2".to_string(),
        diet: String::new(),
        additional_info: String::new(),
    }
}

fn krakow_plan() -> serde_json::Value {
    json!({
        "destination": "Kraków",
        "summary": "Weekend pełen sushi i planszówek.",
        "itinerary": [
            {"day": 1, "theme": "Stare Miasto", "activities": ["Rynek Główny", "Sushi na Kazimierzu"]},
            {"day": 2, "theme": "Planszówki", "activities": ["Kawiarnia z grami"]}
        ]
    })
}

fn app(server: &MockServer, export_dir: &Path) -> AppState {
    let uri = server.uri();
    let dir = export_dir.to_string_lossy().into_owned();
    let config = Config::from_lookup(|key| match key {
        "PLANNER_API_URL" => Some(uri.clone()),
        "REQUEST_TIMEOUT_SECS" => Some("5".to_string()),
        "EXPORT_DIR" => Some(dir.clone()),
        _ => None,
    })
    .expect("config");
    AppState::from_config(&config).expect("app state")
}

async fn mount_plan(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/generate-plan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(krakow_plan()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn generate_plan_sends_normalized_preferences() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-plan"))
        .and(body_json(json!({
            "destination": "Kraków",
            "budget": "Niski",
            "recreation_type": "Zwiedzanie",
            "interests": ["sushi", "gry planszowe"],
            "date_range": "10-12 październik",
            "travelers_count": 2,
            "diet": "",
            "additional_info": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(krakow_plan()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let app = app(&server, dir.path());

    let plan = app
        .planner
        .submit(krakow_form().collect().unwrap())
        .await
        .unwrap();

    assert_eq!(plan.destination(), "Kraków");
    assert_eq!(plan.days().len(), 2);
    assert_eq!(plan.days()[0].theme, "Stare Miasto");
    assert_eq!(plan.days()[1].activities, vec!["Kawiarnia z grami"]);
    assert!(matches!(app.planner.state(), GenerationState::Succeeded(_)));
}

#[tokio::test]
async fn server_error_leaves_the_planner_failed_without_a_plan() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-plan"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"detail": "Nie udało się wygenerować planu. Spróbuj ponownie."})),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let app = app(&server, dir.path());

    let result = app.planner.submit(krakow_form().collect().unwrap()).await;

    match result {
        Err(PlanError::Request(PortError::Service { status, message })) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Nie udało się wygenerować planu. Spróbuj ponownie.");
        }
        other => panic!("unexpected result {:?}", other),
    }
    assert!(matches!(app.planner.state(), GenerationState::Failed { .. }));
    assert!(app.planner.current_itinerary().is_none());
}

#[tokio::test]
async fn unreadable_plan_body_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-plan"))
        .respond_with(ResponseTemplate::new(200).set_body_string("to nie jest JSON"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let app = app(&server, dir.path());

    let result = app.planner.submit(krakow_form().collect().unwrap()).await;
    assert!(matches!(
        result,
        Err(PlanError::Request(PortError::Malformed(_)))
    ));
    assert!(app.planner.current_itinerary().is_none());
}

#[tokio::test]
async fn plan_with_repeated_day_is_refused() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-plan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "destination": "Kraków",
            "summary": "",
            "itinerary": [{"day": 1, "theme": "A", "activities": []}, {"day": 1, "theme": "B", "activities": []}]
        })))
        .mount(&server)
        .await;

    let client = ServiceClient::new(server.uri(), Duration::from_secs(5)).unwrap();
    let adapter = HttpPlanAdapter::new(client);

    let result = adapter
        .generate_plan(&krakow_form().collect().unwrap())
        .await;
    assert!(matches!(result, Err(PortError::Malformed(_))));
}

#[tokio::test]
async fn slow_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-plan"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(krakow_plan())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = ServiceClient::new(server.uri(), Duration::from_millis(200)).unwrap();
    let adapter = HttpPlanAdapter::new(client);

    let result = adapter
        .generate_plan(&krakow_form().collect().unwrap())
        .await;
    assert_eq!(result, Err(PortError::Timeout(Duration::from_millis(200))));
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() {
    let client = ServiceClient::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
    let adapter = HttpPlanAdapter::new(client);

    let result = adapter
        .generate_plan(&krakow_form().collect().unwrap())
        .await;
    assert!(matches!(result, Err(PortError::Network(_))));
}

#[tokio::test]
async fn chat_threads_plan_history_and_question() {
    let server = MockServer::start().await;
    mount_plan(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_json(json!({
            "plan": krakow_plan(),
            "history": [{"role": "user", "content": "Czy jest tam hotel?"}],
            "question": "Czy jest tam hotel?"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "Tak, przy Rynku."})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({
            "history": [
                {"role": "user", "content": "Czy jest tam hotel?"},
                {"role": "assistant", "content": "Tak, przy Rynku."},
                {"role": "user", "content": "A ile kosztuje?"}
            ],
            "question": "A ile kosztuje?"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "Około 300 zł."})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let app = app(&server, dir.path());
    app.planner
        .submit(krakow_form().collect().unwrap())
        .await
        .unwrap();

    assert_eq!(
        app.conversation.ask("Czy jest tam hotel?").await.unwrap(),
        "Tak, przy Rynku."
    );
    assert_eq!(
        app.conversation.ask("A ile kosztuje?").await.unwrap(),
        "Około 300 zł."
    );
    assert_eq!(
        app.conversation.transcript().await,
        vec![
            ConversationTurn::user("Czy jest tam hotel?"),
            ConversationTurn::assistant("Tak, przy Rynku."),
            ConversationTurn::user("A ile kosztuje?"),
            ConversationTurn::assistant("Około 300 zł."),
        ]
    );
}

#[tokio::test]
async fn chat_failure_orphans_the_question() {
    let server = MockServer::start().await;
    mount_plan(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let app = app(&server, dir.path());
    app.planner
        .submit(krakow_form().collect().unwrap())
        .await
        .unwrap();

    let result = app.conversation.ask("Czy jest tam hotel?").await;
    assert!(matches!(
        result,
        Err(ChatError::Request(PortError::Service { status: 502, .. }))
    ));

    let transcript = app.conversation.transcript().await;
    assert_eq!(transcript.len() % 2, 1);
    assert_eq!(transcript, vec![ConversationTurn::user("Czy jest tam hotel?")]);
    assert_eq!(app.conversation.mode().await, ChatMode::Idle);
}

#[tokio::test]
async fn export_saves_the_returned_document() {
    let server = MockServer::start().await;
    mount_plan(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/save-pdf"))
        .and(body_json(json!({"plan": krakow_plan()})))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/pdf")
                .set_body_bytes(b"%PDF-1.4 plan".to_vec()),
        )
        .expect(2)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let app = app(&server, dir.path());
    app.planner
        .submit(krakow_form().collect().unwrap())
        .await
        .unwrap();

    let first = app.exporter.export_current().await.unwrap();
    let second = app.exporter.export_current().await.unwrap();

    assert_eq!(first.path, dir.path().join("Moj_Plan_Podrozy.pdf"));
    assert_eq!(second.path, first.path);
    assert_eq!(std::fs::read(&first.path).unwrap(), b"%PDF-1.4 plan");
    assert!(app.planner.current_itinerary().is_some());
}

#[tokio::test]
async fn failed_export_alerts_and_writes_nothing() {
    let server = MockServer::start().await;
    mount_plan(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/save-pdf"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"detail": "Błąd generowania pliku PDF"})),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let app = app(&server, dir.path());
    app.planner
        .submit(krakow_form().collect().unwrap())
        .await
        .unwrap();

    let err = app.exporter.export_current().await.unwrap_err();
    match &err {
        ExportError::Request(PortError::Service { status, message }) => {
            assert_eq!(*status, 500);
            assert_eq!(message, "Błąd generowania pliku PDF");
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(err.notice(), "Nie udało się pobrać PDF");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
