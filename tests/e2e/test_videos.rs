use crate::e2e::helpers;

use helpers::{TestContext, TEST_IMAGE_URL, TEST_MAX_ATTEMPTS, TEST_TOKEN};
use httpmock::prelude::*;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_the_video_url_once_the_talk_is_done(ctx: &TestContext) {
    let create = ctx
        .upstream
        .mock_async(|when, then| {
            when.method(POST)
                .path("/talks")
                .header("authorization", format!("Bearer {}", TEST_TOKEN))
                .header("accept", "application/json")
                .json_body_includes(
                    r#"{
                        "script": {
                            "type": "text",
                            "ssml": false,
                            "input": "Hello World, I'm your AI News Anchor.",
                            "provider": {"type": "microsoft", "voice_id": "en-US-JennyNeural"}
                        },
                        "config": {"fluent": false},
                        "source_url": "https://i.ibb.co/hYcxXTW/anchor.png"
                    }"#,
                );
            then.status(201)
                .header("content-type", "application/json")
                .body(r#"{"id":"tlk_1","status":"created"}"#);
        })
        .await;
    let status = ctx
        .upstream
        .mock_async(|when, then| {
            when.method(GET)
                .path("/talks/tlk_1")
                .header("authorization", format!("Bearer {}", TEST_TOKEN));
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"id":"tlk_1","status":"done","result_url":"https://cdn.example.com/tlk_1.mp4"}"#);
        })
        .await;

    let response = ctx
        .client
        .post(
            "/api/videos",
            &json!({
                "script": "Hello World, I'm your AI News Anchor.",
                "image_url": TEST_IMAGE_URL
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.body,
        Some(json!({
            "job_id": "tlk_1",
            "result_url": "https://cdn.example.com/tlk_1.mp4",
            "attempts": 1
        }))
    );
    create.assert_async().await;
    status.assert_async().await;
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_requests_without_a_visual_source(ctx: &TestContext) {
    let create = ctx
        .upstream
        .mock_async(|when, then| {
            when.method(POST).path("/talks");
            then.status(201).body(r#"{"id":"tlk_1"}"#);
        })
        .await;

    let response = ctx
        .client
        .post("/api/videos", &json!({ "script": "Hello" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("image URL or a presenter id");
    create.assert_calls_async(0).await;
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_requests_with_both_visual_sources(ctx: &TestContext) {
    let create = ctx
        .upstream
        .mock_async(|when, then| {
            when.method(POST).path("/talks");
            then.status(201).body(r#"{"id":"tlk_1"}"#);
        })
        .await;

    let response = ctx
        .client
        .post(
            "/api/videos",
            &json!({
                "script": "Hello",
                "image_url": TEST_IMAGE_URL,
                "presenter_id": "amy-jcwCkr1grs"
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    create.assert_calls_async(0).await;
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_surface_payment_required_without_polling(ctx: &TestContext) {
    ctx.upstream
        .mock_async(|when, then| {
            when.method(POST).path("/talks");
            then.status(402)
                .header("content-type", "application/json")
                .body(r#"{"kind":"InsufficientCreditsError","description":"not enough credits"}"#);
        })
        .await;
    let status = ctx
        .upstream
        .mock_async(|when, then| {
            when.method(GET).path_prefix("/talks/");
            then.status(200).body(r#"{"status":"done"}"#);
        })
        .await;

    let response = ctx
        .client
        .post(
            "/api/videos",
            &json!({ "script": "Hello", "image_url": TEST_IMAGE_URL }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::PAYMENT_REQUIRED)
        .assert_error_message("InsufficientCreditsError")
        .assert_has_hint();
    status.assert_calls_async(0).await;
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_map_rejected_credentials_to_unauthorized(ctx: &TestContext) {
    ctx.upstream
        .mock_async(|when, then| {
            when.method(POST).path("/talks");
            then.status(401).body(r#"{"message":"Unauthorized"}"#);
        })
        .await;

    let response = ctx
        .client
        .post(
            "/api/videos",
            &json!({ "script": "Hello", "image_url": TEST_IMAGE_URL }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::UNAUTHORIZED)
        .assert_has_hint();
    assert!(response
        .field("hint")
        .as_str()
        .unwrap()
        .contains("BEARER_TOKEN"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_time_out_when_the_talk_never_finishes(ctx: &TestContext) {
    ctx.upstream
        .mock_async(|when, then| {
            when.method(POST).path("/talks");
            then.status(201)
                .header("content-type", "application/json")
                .body(r#"{"id":"tlk_slow"}"#);
        })
        .await;
    let status = ctx
        .upstream
        .mock_async(|when, then| {
            when.method(GET).path("/talks/tlk_slow");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"id":"tlk_slow","status":"processing"}"#);
        })
        .await;

    let response = ctx
        .client
        .post(
            "/api/videos",
            &json!({ "script": "Hello", "image_url": TEST_IMAGE_URL }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::GATEWAY_TIMEOUT)
        .assert_error_message("tlk_slow")
        .assert_has_hint();
    status.assert_calls_async(TEST_MAX_ATTEMPTS as usize).await;
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_failed_talks_as_bad_gateway(ctx: &TestContext) {
    ctx.upstream
        .mock_async(|when, then| {
            when.method(POST).path("/talks");
            then.status(201)
                .header("content-type", "application/json")
                .body(r#"{"id":"tlk_bad"}"#);
        })
        .await;
    let status = ctx
        .upstream
        .mock_async(|when, then| {
            when.method(GET).path("/talks/tlk_bad");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"id":"tlk_bad","status":"error","error":{"kind":"FaceError"}}"#);
        })
        .await;

    let response = ctx
        .client
        .post(
            "/api/videos",
            &json!({ "script": "Hello", "image_url": TEST_IMAGE_URL }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_message("status 'error'")
        .assert_error_message("FaceError");
    status.assert_async().await;
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_send_markup_for_styled_scripts(ctx: &TestContext) {
    let create = ctx
        .upstream
        .mock_async(|when, then| {
            when.method(POST)
                .path("/talks")
                .json_body_includes(
                    r#"{"script":{"ssml":true,"provider":{"voice_id":"hi-IN-SwaraNeural"}},"presenter_id":"amy-jcwCkr1grs"}"#,
                );
            then.status(201)
                .header("content-type", "application/json")
                .body(r#"{"id":"tlk_styled"}"#);
        })
        .await;
    ctx.upstream
        .mock_async(|when, then| {
            when.method(GET).path("/talks/tlk_styled");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"status":"done","result_url":"https://cdn.example.com/styled.mp4"}"#);
        })
        .await;

    let response = ctx
        .client
        .post(
            "/api/videos",
            &json!({
                "script": "नमस्कार दोस्तों",
                "voice_id": "hi-IN-SwaraNeural",
                "style": "newscast",
                "presenter_id": "amy-jcwCkr1grs"
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    create.assert_async().await;
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_use_the_updated_default_voice(ctx: &TestContext) {
    let response = ctx.client.get("/api/voices/default").await.unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(response.field("voice_id").as_str(), Some("en-US-JennyNeural"));

    let response = ctx
        .client
        .put(
            "/api/voices/default",
            &json!({ "voice_id": "en-IN-NeerjaNeural" }),
        )
        .await
        .unwrap();
    response.assert_status(StatusCode::NO_CONTENT);

    let response = ctx.client.get("/api/voices/default").await.unwrap();
    assert_eq!(response.field("voice_id").as_str(), Some("en-IN-NeerjaNeural"));

    let create = ctx
        .upstream
        .mock_async(|when, then| {
            when.method(POST)
                .path("/talks")
                .json_body_includes(r#"{"script":{"provider":{"voice_id":"en-IN-NeerjaNeural"}}}"#);
            then.status(201)
                .header("content-type", "application/json")
                .body(r#"{"id":"tlk_voice"}"#);
        })
        .await;
    ctx.upstream
        .mock_async(|when, then| {
            when.method(GET).path("/talks/tlk_voice");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"status":"done","result_url":"https://cdn.example.com/voice.mp4"}"#);
        })
        .await;

    let response = ctx
        .client
        .post(
            "/api/videos",
            &json!({ "script": "Hello", "image_url": TEST_IMAGE_URL }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    create.assert_async().await;
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_a_blank_default_voice(ctx: &TestContext) {
    let response = ctx
        .client
        .put("/api/voices/default", &json!({ "voice_id": "  " }))
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);

    let response = ctx.client.get("/api/voices/default").await.unwrap();
    assert_eq!(response.field("voice_id").as_str(), Some("en-US-JennyNeural"));
}
