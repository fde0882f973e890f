//! `/api/generate` 端到端测试
//!
//! 使用脚本化网关驱动真实路由，再用客户端会话消费透传回来的流。

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use common::{frame, generate_request, router, RouterGateway, ScriptedGateway};
use promptforge::api::error::GenerationError;
use promptforge::api::request::ApplicationType;
use promptforge::client::{consume_response, GenerationSession};

const IMAGE: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==";

fn request_json(application_type: &str, temperature: f32) -> String {
    serde_json::json!({
        "image": IMAGE,
        "applicationType": application_type,
        "temperature": temperature,
    })
    .to_string()
}

#[tokio::test]
async fn test_answer_only_stream_is_reproduced_verbatim() {
    let gateway = Arc::new(ScriptedGateway::streaming(vec![
        frame("Create a pricing page ", false),
        frame("with three tiers.\n\n", false),
        frame("- Highlight the middle tier", false),
    ]));
    let mut session = GenerationSession::new();
    session.select_image(IMAGE);

    let client = RouterGateway { router: router(gateway.clone()) };
    session
        .run(&client, ApplicationType::Web, 0.2, |_| {})
        .await
        .unwrap();

    assert_eq!(
        session.final_text(),
        Some("Create a pricing page with three tiers.\n\n- Highlight the middle tier")
    );
    assert_eq!(session.error(), None);

    let forwarded = gateway.last_request().unwrap();
    assert_eq!(forwarded.image, IMAGE);
    assert_eq!(forwarded.application_type, ApplicationType::Web);
    assert_eq!(forwarded.temperature, 0.2);
}

#[tokio::test]
async fn test_thoughts_become_blockquotes() {
    let body = format!("{}{}", frame("a\nb", true), frame("c", false));
    // 按不规则的边界拆分，模拟网络读取
    let chunks = vec![body[..9].to_string(), body[9..40].to_string(), body[40..].to_string()];
    let gateway = Arc::new(ScriptedGateway::streaming(chunks));

    let response = router(gateway)
        .oneshot(generate_request(&request_json("mobile", 0.5)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/event-stream");

    let mut display = String::new();
    consume_response(common::into_gateway_response(response), |f| display.push_str(f))
        .await
        .unwrap();
    assert_eq!(display, "> a\n> b\n\nc");
}

#[tokio::test]
async fn test_body_is_passed_through_unmodified() {
    let chunks = vec![frame("思考", true), frame("答案", false)];
    let expected = chunks.concat();
    let gateway = Arc::new(ScriptedGateway::streaming(chunks));

    let response = router(gateway)
        .oneshot(generate_request(&request_json("desktop", 0.9)))
        .await
        .unwrap();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(body, expected.as_bytes());
}

#[tokio::test]
async fn test_gateway_rejection_surfaces_message() {
    let error_body = r#"{"error":{"code":400,"message":"Unable to process input image.","status":"INVALID_ARGUMENT"}}"#;
    let gateway = Arc::new(ScriptedGateway::rejecting(StatusCode::BAD_REQUEST, error_body));

    let response = router(gateway.clone())
        .oneshot(generate_request(&request_json("web", 0.2)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(body, error_body.as_bytes());

    let mut session = GenerationSession::new();
    session.select_image(IMAGE);
    let client = RouterGateway { router: router(gateway) };
    let result = session.run(&client, ApplicationType::Web, 0.2, |_| {}).await;

    assert_eq!(
        result,
        Err(GenerationError::Gateway {
            status: 400,
            message: "Unable to process input image.".to_string()
        })
    );
    assert_eq!(session.error(), Some("Unable to process input image."));
    assert_eq!(session.display_text(), "");
    assert!(session.can_generate());
}

#[tokio::test]
async fn test_unreachable_gateway_is_bad_gateway() {
    let gateway = Arc::new(ScriptedGateway::unreachable());
    let response = router(gateway)
        .oneshot(generate_request(&request_json("web", 0.2)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("connection refused"));
}

#[tokio::test]
async fn test_invalid_request_bodies() {
    let gateway = Arc::new(ScriptedGateway::streaming(vec![]));

    for body in [
        r#"{"image":"aGVsbG8=","applicationType":"watch","temperature":0.2}"#.to_string(),
        r#"{"applicationType":"web","temperature":0.2}"#.to_string(),
        r#"{"image":"","applicationType":"web","temperature":0.2}"#.to_string(),
        "not json".to_string(),
    ] {
        let response = router(gateway.clone())
            .oneshot(generate_request(&body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(json["error"]["message"].is_string());
    }

    assert!(gateway.last_request().is_none());
}

#[tokio::test]
async fn test_out_of_range_temperature_is_clamped() {
    let gateway = Arc::new(ScriptedGateway::streaming(vec![frame("ok", false)]));
    let response = router(gateway.clone())
        .oneshot(generate_request(&request_json("web", 3.0)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(gateway.last_request().unwrap().clamped_temperature(), 1.0);
}

#[tokio::test]
async fn test_health() {
    let gateway = Arc::new(ScriptedGateway::streaming(vec![]));
    let response = router(gateway)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], promptforge::VERSION);
}
