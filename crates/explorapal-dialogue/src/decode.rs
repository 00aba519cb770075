// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structured decoding of model replies.
//!
//! Models are asked for JSON but do not always answer with bare JSON. The
//! strategies in [`DecodeStrategy::ORDER`] are tried in turn; the first one
//! that yields a value of the requested type wins.

use explorapal_core::ExploraError;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::types::Question;

/// One way of locating the JSON document inside a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStrategy {
    /// The reply is the document. The model followed the format instruction.
    Whole,
    /// The document sits in a Markdown code fence, optionally tagged `json`.
    /// Chat-tuned models wrap code this way out of habit.
    FencedBlock,
    /// The document is the outermost `{...}` or `[...]` span in surrounding
    /// prose ("Sure! Here is the JSON: {...} Hope this helps").
    EmbeddedSpan,
}

impl DecodeStrategy {
    pub const ORDER: [DecodeStrategy; 3] = [Self::Whole, Self::FencedBlock, Self::EmbeddedSpan];

    /// Returns the candidate document this strategy finds, if any.
    pub fn locate(self, reply: &str) -> Option<&str> {
        let trimmed = reply.trim();
        let candidate = match self {
            Self::Whole => Some(trimmed),
            Self::FencedBlock => fenced_block(trimmed),
            Self::EmbeddedSpan => embedded_span(trimmed),
        }?;
        let candidate = candidate.trim();
        (!candidate.is_empty()).then_some(candidate)
    }
}

/// A decoded value and the strategy that found it.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub value: T,
    pub strategy: DecodeStrategy,
}

/// Decodes `reply` into `T` using the first strategy that succeeds.
pub fn decode_reply<T: DeserializeOwned>(reply: &str) -> Result<Decoded<T>, ExploraError> {
    let mut last_error = None;
    for strategy in DecodeStrategy::ORDER {
        let Some(candidate) = strategy.locate(reply) else {
            continue;
        };
        match serde_json::from_str::<T>(candidate) {
            Ok(value) => {
                debug!(?strategy, "model reply decoded");
                return Ok(Decoded { value, strategy });
            }
            Err(e) => last_error = Some(e),
        }
    }
    Err(match last_error {
        Some(e) => ExploraError::decode(format!("no JSON document in model reply: {e}"), e),
        None => ExploraError::Decode {
            message: "model reply is empty".into(),
            source: None,
        },
    })
}

fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_fence = &text[open + 3..];
    // Skip the info string (`json`, `JSON`, ...) up to the end of the line.
    let body_start = after_fence.find('\n').map_or(0, |i| i + 1);
    let body = &after_fence[body_start..];
    let close = body.find("```")?;
    Some(&body[..close])
}

fn embedded_span(text: &str) -> Option<&str> {
    let start = text.find(['{', '['])?;
    let closer = if text[start..].starts_with('{') { '}' } else { ']' };
    let end = text.rfind(closer)?;
    (end > start).then(|| &text[start..=end])
}

/// Question lists arrive either wrapped in an object or bare.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum QuestionsPayload {
    Wrapped { questions: Vec<Question> },
    Bare(Vec<Question>),
}

impl QuestionsPayload {
    pub fn into_questions(self) -> Vec<Question> {
        match self {
            Self::Wrapped { questions } | Self::Bare(questions) => questions,
        }
    }
}

/// Speech replies carry base64 audio under one of a few field names.
#[derive(Debug, Deserialize)]
pub struct SpeechPayload {
    #[serde(alias = "audio", alias = "audio_base64", alias = "data")]
    pub audio_data: String,
    #[serde(default)]
    pub format: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImageDescription;

    #[test]
    fn bare_json_uses_whole() {
        let decoded: Decoded<serde_json::Value> = decode_reply(r#" {"a": 1} "#).unwrap();
        assert_eq!(decoded.strategy, DecodeStrategy::Whole);
        assert_eq!(decoded.value["a"], 1);
    }

    #[test]
    fn fenced_json_uses_fenced_block() {
        let reply = "Here you go:\n```json\n{\"object_name\": \"T-Rex\", \"category\": \"dinosaur\"}\n```\nEnjoy!";
        let decoded: Decoded<ImageDescription> = decode_reply(reply).unwrap();
        assert_eq!(decoded.strategy, DecodeStrategy::FencedBlock);
        assert_eq!(decoded.value.object_name, "T-Rex");
        assert_eq!(decoded.value.confidence, 0.95);
    }

    #[test]
    fn prose_wrapped_json_uses_embedded_span() {
        let reply = "Sure! {\"questions\": [{\"content\": \"Why?\", \"type\": \"reasoning\"}]} Hope this helps.";
        let decoded: Decoded<QuestionsPayload> = decode_reply(reply).unwrap();
        assert_eq!(decoded.strategy, DecodeStrategy::EmbeddedSpan);
        let questions = decoded.value.into_questions();
        assert_eq!(questions[0].question_type, "reasoning");
    }

    #[test]
    fn bare_question_array_is_accepted() {
        let decoded: Decoded<QuestionsPayload> =
            decode_reply(r#"[{"content": "What color?", "difficulty": "basic"}]"#).unwrap();
        assert_eq!(decoded.value.into_questions()[0].difficulty, "basic");
    }

    #[test]
    fn pure_prose_is_a_decode_error() {
        let err = decode_reply::<ImageDescription>("I think it is a rock.").unwrap_err();
        assert_eq!(err.stage(), "decode");
        let err = decode_reply::<ImageDescription>("   ").unwrap_err();
        assert_eq!(err.stage(), "decode");
    }

    #[test]
    fn unterminated_fence_is_skipped() {
        assert_eq!(DecodeStrategy::FencedBlock.locate("```json\n{\"a\":1}"), None);
        assert_eq!(
            DecodeStrategy::EmbeddedSpan.locate("```json\n{\"a\":1}"),
            Some("{\"a\":1}")
        );
    }

    #[test]
    fn speech_payload_accepts_field_aliases() {
        let payload: SpeechPayload = serde_json::from_str(r#"{"audio": "UklGRg==", "format": "wav"}"#).unwrap();
        assert_eq!(payload.audio_data, "UklGRg==");
        assert_eq!(payload.format.as_deref(), Some("wav"));
    }
}
