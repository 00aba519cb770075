// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI-compatible chat completion client.

use std::time::Duration;

use async_trait::async_trait;
use explorapal_config::ExplorapalConfig;
use explorapal_core::text::{non_blank, sanitize_utf8};
use explorapal_core::{AppCredentials, ChatProvider, ChatRequest, ContentPart, ExploraError};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

// --- Wire format ---

#[derive(Debug, Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: WireContent<'a>,
}

/// Plain text when a message is a single text part, a part array otherwise.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum WireContent<'a> {
    Text(&'a str),
    Parts(Vec<WirePart<'a>>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WirePart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: WireUrl<'a> },
    VideoUrl { video_url: WireUrl<'a> },
    InputAudio { input_audio: WireAudio<'a> },
}

#[derive(Debug, Serialize)]
struct WireUrl<'a> {
    url: &'a str,
}

#[derive(Debug, Serialize)]
struct WireAudio<'a> {
    data: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl<'a> From<&'a explorapal_core::ChatMessage> for WireMessage<'a> {
    fn from(message: &'a explorapal_core::ChatMessage) -> Self {
        let content = match message.parts.as_slice() {
            [ContentPart::Text(text)] => WireContent::Text(text),
            parts => WireContent::Parts(
                parts
                    .iter()
                    .map(|part| match part {
                        ContentPart::Text(text) => WirePart::Text { text },
                        ContentPart::ImageUrl(url) => WirePart::ImageUrl {
                            image_url: WireUrl { url },
                        },
                        ContentPart::VideoUrl(url) => WirePart::VideoUrl {
                            video_url: WireUrl { url },
                        },
                        ContentPart::InputAudio { data, format } => WirePart::InputAudio {
                            input_audio: WireAudio { data, format },
                        },
                    })
                    .collect(),
            ),
        };
        Self {
            role: &message.role,
            content,
        }
    }
}

// --- Client ---

/// [`ChatProvider`] backed by a `/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ChatClient {
    pub fn new(
        credentials: &AppCredentials,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ExploraError> {
        let mut auth = HeaderValue::from_str(&credentials.bearer())
            .map_err(|e| ExploraError::Config(format!("invalid credential header value: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ExploraError::transport("failed to build HTTP client", e))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn from_config(config: &ExplorapalConfig) -> Result<Self, ExploraError> {
        let credentials = config.provider.credentials()?;
        Self::new(
            &credentials,
            config.provider.base_url.clone(),
            config.provider.request_timeout(),
        )
    }
}

#[async_trait]
impl ChatProvider for ChatClient {
    async fn complete(&self, request: ChatRequest) -> Result<String, ExploraError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = CompletionBody {
            model: &request.model,
            messages: request.messages.iter().map(WireMessage::from).collect(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| ExploraError::transport(format!("completion request failed: {e}"), e))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ExploraError::transport(format!("failed to read completion: {e}"), e))?;
        debug!(model = %request.model, status = %status, len = bytes.len(), "completion received");

        if !status.is_success() {
            return Err(ExploraError::Transport {
                message: format!("completion returned {status}: {}", sanitize_utf8(&bytes)),
                source: None,
            });
        }

        let parsed: CompletionResponse = serde_json::from_str(&sanitize_utf8(&bytes))
            .map_err(|e| ExploraError::decode(format!("unparseable completion: {e}"), e))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ExploraError::Decode {
                message: "completion carried no choices".into(),
                source: None,
            })?
            .message
            .content;

        match non_blank(content.as_deref()) {
            Some(text) => Ok(text.to_string()),
            None => Err(ExploraError::Decode {
                message: "completion content is empty".into(),
                source: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use explorapal_core::ChatMessage;
    use secrecy::SecretString;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> ChatClient {
        let creds = AppCredentials::new("app", SecretString::from("key"));
        ChatClient::new(&creds, base_url, Duration::from_secs(5)).unwrap()
    }

    fn request(messages: Vec<ChatMessage>) -> ChatRequest {
        ChatRequest {
            model: "qwen-flash".into(),
            messages,
            max_tokens: 100,
            temperature: 0.5,
        }
    }

    fn reply(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        })
    }

    #[tokio::test]
    async fn complete_sends_bearer_and_text_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer app:key"))
            .and(body_partial_json(serde_json::json!({
                "model": "qwen-flash",
                "max_tokens": 100,
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": "hello"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply("hi there")))
            .expect(1)
            .mount(&server)
            .await;

        let text = test_client(&server.uri())
            .complete(request(vec![ChatMessage::system("be brief"), ChatMessage::user("hello")]))
            .await
            .unwrap();
        assert_eq!(text, "hi there");
    }

    #[tokio::test]
    async fn image_parts_use_typed_content_array() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "messages": [{
                    "role": "user",
                    "content": [
                        {"type": "text", "text": "what is this?"},
                        {"type": "image_url", "image_url": {"url": "https://img.example/t-rex.jpg"}}
                    ]
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply("a dinosaur")))
            .expect(1)
            .mount(&server)
            .await;

        let message = ChatMessage {
            role: "user".into(),
            parts: vec![
                ContentPart::Text("what is this?".into()),
                ContentPart::ImageUrl("https://img.example/t-rex.jpg".into()),
            ],
        };
        let text = test_client(&server.uri())
            .complete(request(vec![message]))
            .await
            .unwrap();
        assert_eq!(text, "a dinosaur");
    }

    #[tokio::test]
    async fn media_parts_use_video_url_and_input_audio() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "messages": [{
                    "role": "user",
                    "content": [
                        {"type": "video_url", "video_url": {"url": "data:video/mp4;base64,AAAA"}},
                        {"type": "input_audio", "input_audio": {"data": "UklGRg==", "format": "wav"}}
                    ]
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply("ok")))
            .expect(1)
            .mount(&server)
            .await;

        let message = ChatMessage {
            role: "user".into(),
            parts: vec![
                ContentPart::VideoUrl("data:video/mp4;base64,AAAA".into()),
                ContentPart::InputAudio {
                    data: "UklGRg==".into(),
                    format: "wav".into(),
                },
            ],
        };
        let text = test_client(&server.uri())
            .complete(request(vec![message]))
            .await
            .unwrap();
        assert_eq!(text, "ok");
    }

    #[tokio::test]
    async fn empty_choices_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .complete(request(vec![ChatMessage::user("x")]))
            .await
            .unwrap_err();
        assert_eq!(err.stage(), "decode");
    }

    #[tokio::test]
    async fn server_error_is_transport() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .complete(request(vec![ChatMessage::user("x")]))
            .await
            .unwrap_err();
        assert!(matches!(&err, ExploraError::Transport { message, .. } if message.contains("boom")));
    }

    #[tokio::test]
    async fn invalid_utf8_in_content_is_repaired() {
        let server = MockServer::start().await;
        let mut body = br#"{"choices":[{"message":{"content":"T-Rex "#.to_vec();
        body.push(0xC3);
        body.extend_from_slice(br#" fossil"}}]}"#);
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
            .mount(&server)
            .await;

        let text = test_client(&server.uri())
            .complete(request(vec![ChatMessage::user("x")]))
            .await
            .unwrap();
        assert_eq!(text, "T-Rex \u{FFFD} fossil");
    }
}
