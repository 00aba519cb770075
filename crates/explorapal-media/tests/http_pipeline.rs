// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The full pipeline over real HTTP against a wiremock gateway.

use std::sync::Arc;

use explorapal_config::MediaConfig;
use explorapal_core::{AppCredentials, GenerationRequest};
use explorapal_media::fallback::placeholder_mp4;
use explorapal_media::{AsyncJobClient, MediaGenerator, Timeouts};
use secrecy::SecretString;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn generator(server: &MockServer, media: MediaConfig) -> MediaGenerator {
    let creds = AppCredentials::new("app", SecretString::from("key"));
    let client =
        AsyncJobClient::new(&creds, server.uri(), "seedance-i2v", Timeouts::from(&media)).unwrap();
    MediaGenerator::new(Arc::new(client), "seedance-i2v", media)
}

#[tokio::test]
async fn submit_poll_download_round_trip() {
    let server = MockServer::start().await;
    let artifact = placeholder_mp4("rendered by the gateway");

    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(header("api-key", "app:key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "task-42"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/results/task-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "task-42",
            "status": 3,
            "response": {
                "video_url": format!("{}/files/task-42.mp4", server.uri()),
                "code": 0,
                "message": "ok"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/task-42.mp4"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(artifact.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let request = GenerationRequest::from_script("Why do leaves change color?")
        .with_scenes(["summer", "autumn"]);
    let outcome = generator(&server, MediaConfig::default())
        .generate(&request, &CancellationToken::new())
        .await
        .unwrap();

    assert!(!outcome.degraded, "{}", outcome.message);
    assert_eq!(outcome.value.artifact, artifact);
    assert_eq!(outcome.value.format, "mp4");
    assert_eq!(outcome.value.metadata.scenes, vec!["summer", "autumn"]);
}

#[tokio::test]
async fn gateway_failure_code_degrades() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "task-7"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/results/task-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "task-7",
            "status": 4,
            "response": {"video_url": "", "code": 1001, "message": "content policy"}
        })))
        .mount(&server)
        .await;

    let outcome = generator(&server, MediaConfig::default())
        .generate(&GenerationRequest::from_script("s"), &CancellationToken::new())
        .await
        .unwrap();

    assert!(outcome.degraded);
    assert!(outcome.message.contains("content policy"), "{}", outcome.message);
}
