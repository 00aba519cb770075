// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-round-trip assistant operations.
//!
//! Each operation sends one completion request and decodes the reply. Only
//! blank input is an error; a failed call or an undecodable reply yields
//! the matching placeholder from [`fallback`] with `degraded` set.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use explorapal_config::{ExplorapalConfig, ModelsConfig};
use explorapal_core::text::non_blank;
use explorapal_core::{
    ChatMessage, ChatProvider, ChatRequest, ContentPart, ExploraError, Outcome, ValidationError,
};
use tracing::{debug, info, warn};

use crate::client::ChatClient;
use crate::decode::{QuestionsPayload, SpeechPayload, decode_reply};
use crate::fallback;
use crate::types::{
    ImageDescription, PolishedNote, Question, ResearchReport, Speech, SpeechRequest, Transcription,
    TranscriptionRequest, VideoAnalysis, VideoAnalysisRequest,
};

const DEFAULT_IMAGE_PROMPT: &str = "What is in this picture? Explain it for a curious child.";
const DEFAULT_AUDIO_FORMAT: &str = "wav";
const DEFAULT_VIDEO_FORMAT: &str = "mp4";
const DEFAULT_ANALYSIS_TYPE: &str = "comprehensive";

const IMAGE_FORMAT: &str = r#"Answer with a single JSON object with the fields
"object_name", "category", "confidence" (0 to 1), "description",
"key_features" (array of strings) and "scientific_name"."#;

const QUESTIONS_SYSTEM: &str = "You are an education assistant who designs exploration \
questions for children. Reply with a JSON object holding a \"questions\" array.";

const NOTE_FORMAT: &str = r#"Reply only with this JSON object:
{"title": "...", "summary": "...", "key_points": ["..."], "scientific_concepts": ["..."],
 "questions": ["..."], "connections": ["..."], "formatted_text": "..."}"#;

const REPORT_FORMAT: &str = r#"Reply only with a JSON object with the fields "title", "abstract",
"introduction", "methodology", "findings" (array of {"title", "description", "evidence",
"significance"}), "discussion", "conclusion", "references" (array of {"title", "type",
"url", "credit"}), "child_insights", "next_steps" and "content"."#;

const VIDEO_FORMAT: &str = r#"Reply only with a JSON object with the fields
"scenes" (array of {"timestamp", "scene_type", "description", "confidence"}),
"objects" (array of {"timestamp", "object_name", "confidence", "bbox": {"x", "y", "width", "height"}}),
"emotions" (array of {"timestamp", "emotion", "confidence"}),
"texts" (array of {"timestamp", "text", "language", "confidence", "bbox"}),
"audio" (array of {"timestamp", "transcription", "language", "confidence"}) and
"summary" ({"title", "description", "keywords", "category", "duration"}).
Timestamps and durations are in seconds."#;

const TRANSCRIPTION_FORMAT: &str =
    r#"Reply only with {"text": "<what was said>", "confidence": <0 to 1>}."#;

/// Chat-backed assistant for the exploration workflow.
pub struct Assistant {
    provider: Arc<dyn ChatProvider>,
    models: ModelsConfig,
    max_tokens: u32,
    temperature: f32,
    default_voice: String,
    default_language: String,
}

impl Assistant {
    /// Uses `provider` with the models, sampling and media defaults of `config`.
    pub fn new(provider: Arc<dyn ChatProvider>, config: &ExplorapalConfig) -> Self {
        Self {
            provider,
            models: config.models.clone(),
            max_tokens: config.provider.max_tokens,
            temperature: config.provider.temperature,
            default_voice: config.media.default_voice.clone(),
            default_language: config.media.default_language.clone(),
        }
    }

    /// Wires a [`ChatClient`] from configuration.
    pub fn from_config(config: &ExplorapalConfig) -> Result<Self, ExploraError> {
        let client = ChatClient::from_config(config)?;
        Ok(Self::new(Arc::new(client), config))
    }

    async fn ask(&self, model: &str, messages: Vec<ChatMessage>) -> Result<String, ExploraError> {
        let request = ChatRequest {
            model: model.to_string(),
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };
        let reply = self.provider.complete(request).await?;
        debug!(model, len = reply.len(), "assistant reply received");
        Ok(reply)
    }

    /// Identifies what an image shows.
    ///
    /// A reply naming no object at all counts as undecodable. Fields the
    /// model left blank are filled from the URL-keyword guess.
    pub async fn describe_image(
        &self,
        image_url: &str,
        prompt: Option<&str>,
    ) -> Result<Outcome<ImageDescription>, ValidationError> {
        let image_url =
            non_blank(Some(image_url)).ok_or(ValidationError::EmptyField("image_url"))?;
        let prompt = non_blank(prompt).unwrap_or(DEFAULT_IMAGE_PROMPT);

        let message = ChatMessage {
            role: "user".into(),
            parts: vec![
                ContentPart::Text(format!("{prompt}\n\n{IMAGE_FORMAT}")),
                ContentPart::ImageUrl(image_url.to_string()),
            ],
        };
        let result = self
            .ask(&self.models.image_analysis, vec![message])
            .await
            .and_then(|reply| decode_reply::<ImageDescription>(&reply))
            .and_then(|decoded| {
                let found = decoded.value;
                let named = [&found.object_name, &found.category, &found.description]
                    .iter()
                    .any(|field| !field.trim().is_empty());
                if named {
                    Ok(fallback::complete_image_description(found, image_url))
                } else {
                    Err(ExploraError::Decode {
                        message: "image reply named no object".into(),
                        source: None,
                    })
                }
            });

        Ok(match result {
            Ok(found) => {
                info!(category = %found.category, "image described");
                Outcome::genuine(found, "image described")
            }
            Err(err) => degrade("describe_image", fallback::image_description(image_url), &err),
        })
    }

    /// Produces three guiding questions about `context`.
    pub async fn generate_questions(
        &self,
        context: &str,
        category: &str,
    ) -> Result<Outcome<Vec<Question>>, ValidationError> {
        let context = non_blank(Some(context)).ok_or(ValidationError::EmptyField("context"))?;

        let prompt = format!(
            "Write 3 exploration questions for a child.\n\n\
             Context: {context}\nCategory: {category}\n\n\
             The questions must be easy to understand, spark curiosity and go from simple \
             to deep. Each question has the fields \"content\", \"type\" (observation, \
             reasoning, experiment or comparison), \"difficulty\" (basic, intermediate or \
             advanced) and \"purpose\"."
        );
        let messages = vec![ChatMessage::system(QUESTIONS_SYSTEM), ChatMessage::user(prompt)];

        let result = self
            .ask(&self.models.text_generation, messages)
            .await
            .and_then(|reply| decode_reply::<QuestionsPayload>(&reply))
            .and_then(|decoded| {
                let questions = decoded.value.into_questions();
                if questions.is_empty() {
                    Err(ExploraError::Decode {
                        message: "reply contained no questions".into(),
                        source: None,
                    })
                } else {
                    Ok(questions)
                }
            });

        Ok(match result {
            Ok(questions) => {
                info!(count = questions.len(), "questions generated");
                Outcome::genuine(questions, "questions generated")
            }
            Err(err) => degrade("generate_questions", fallback::questions(category), &err),
        })
    }

    /// Rewrites a child's note while keeping its voice.
    ///
    /// A reply without JSON still counts as a real answer: the prose is kept
    /// and summarized instead of being replaced by a placeholder.
    pub async fn polish_note(
        &self,
        raw: &str,
        context: &str,
    ) -> Result<Outcome<PolishedNote>, ValidationError> {
        let raw = non_blank(Some(raw)).ok_or(ValidationError::EmptyField("raw_content"))?;

        let prompt = format!(
            "Help a child polish their exploration note. Keep their meaning and voice, make \
             it clearer, explain the science involved and point out what to explore next.\n\n\
             Note: {raw}\n\nContext: {context}\n\n{NOTE_FORMAT}"
        );

        let reply = match self
            .ask(&self.models.text_generation, vec![ChatMessage::user(prompt)])
            .await
        {
            Ok(reply) => reply,
            Err(err) => return Ok(degrade("polish_note", fallback::polished_note(raw), &err)),
        };

        let note = match decode_reply::<PolishedNote>(&reply) {
            Ok(decoded) => decoded.value,
            Err(err) => {
                debug!(error = %err, "note reply is prose, keeping it as text");
                fallback::prose_note(&reply)
            }
        };
        info!("note polished");
        Ok(Outcome::genuine(
            fallback::complete_note(note, raw, &reply),
            "note polished",
        ))
    }

    /// Writes a research report from a project's records.
    pub async fn generate_report(
        &self,
        project_data: &str,
    ) -> Result<Outcome<ResearchReport>, ValidationError> {
        let project_data =
            non_blank(Some(project_data)).ok_or(ValidationError::EmptyField("project_data"))?;

        let prompt = format!(
            "Write a research report for a child's exploration project. Use simple words \
             and celebrate the child's own ideas.\n\nProject records:\n{project_data}\n\n\
             {REPORT_FORMAT}"
        );

        let result = self
            .ask(&self.models.advanced_reasoning, vec![ChatMessage::user(prompt)])
            .await
            .and_then(|reply| {
                decode_reply::<ResearchReport>(&reply)
                    .map(|decoded| fallback::complete_report(decoded.value, &reply))
            });

        Ok(match result {
            Ok(report) => {
                info!(findings = report.findings.len(), "report generated");
                Outcome::genuine(report, "report generated")
            }
            Err(err) => degrade("generate_report", fallback::research_report(), &err),
        })
    }

    /// Reads `request.text` aloud.
    pub async fn synthesize_speech(
        &self,
        request: &SpeechRequest,
    ) -> Result<Outcome<Speech>, ValidationError> {
        let text = non_blank(Some(request.text.as_str()))
            .ok_or(ValidationError::EmptyField("text"))?;
        let voice = non_blank(request.voice.as_deref()).unwrap_or(self.default_voice.as_str());
        let language =
            non_blank(request.language.as_deref()).unwrap_or(self.default_language.as_str());
        let speed = if request.speed.is_finite() && request.speed > 0.0 {
            request.speed
        } else {
            1.0
        };

        let prompt = format!(
            "Convert this text to speech.\n\nText: {text}\nVoice: {voice}\nLanguage: \
             {language}\nSpeed: {speed:.1}x\n\nSpeak naturally in a child-friendly tone. \
             Reply only with {{\"audio_data\": \"<base64 audio>\", \"format\": \"wav\"}}."
        );

        let result = self
            .ask(&self.models.voice, vec![ChatMessage::user(prompt)])
            .await
            .and_then(|reply| decode_speech(&reply));

        Ok(match result {
            Ok(speech) => {
                info!(bytes = speech.audio.len(), format = %speech.format, "speech synthesized");
                Outcome::genuine(speech, "speech synthesized")
            }
            Err(err) => {
                let speech = Speech {
                    audio: fallback::placeholder_wav(),
                    format: DEFAULT_AUDIO_FORMAT.into(),
                };
                degrade("synthesize_speech", speech, &err)
            }
        })
    }

    /// Transcribes a recording of the child.
    ///
    /// Like notes, a plain-text reply is kept as the transcription.
    pub async fn speech_to_text(
        &self,
        request: &TranscriptionRequest,
    ) -> Result<Outcome<Transcription>, ValidationError> {
        if request.audio.is_empty() {
            return Err(ValidationError::EmptyField("audio"));
        }
        let format = media_format(request.format.as_deref(), DEFAULT_AUDIO_FORMAT);
        let language =
            non_blank(request.language.as_deref()).unwrap_or(self.default_language.as_str());

        let message = ChatMessage {
            role: "user".into(),
            parts: vec![
                ContentPart::Text(format!(
                    "Transcribe this recording of a child speaking. Language: {language}.\n\n\
                     {TRANSCRIPTION_FORMAT}"
                )),
                ContentPart::InputAudio {
                    data: STANDARD.encode(&request.audio),
                    format,
                },
            ],
        };
        let result = self
            .ask(&self.models.voice, vec![message])
            .await
            .and_then(|reply| decode_transcription(&reply, language));

        Ok(match result {
            Ok(transcription) => {
                info!(chars = transcription.text.chars().count(), "speech transcribed");
                Outcome::genuine(transcription, "speech transcribed")
            }
            Err(err) => degrade("speech_to_text", fallback::transcription(language), &err),
        })
    }

    /// Builds a timeline of scenes, objects, emotions, on-screen text and
    /// speech for a video clip.
    pub async fn analyze_video(
        &self,
        request: &VideoAnalysisRequest,
    ) -> Result<Outcome<VideoAnalysis>, ValidationError> {
        if request.video.is_empty() {
            return Err(ValidationError::EmptyField("video"));
        }
        let format = media_format(request.format.as_deref(), DEFAULT_VIDEO_FORMAT);
        let analysis_type =
            non_blank(request.analysis_type.as_deref()).unwrap_or(DEFAULT_ANALYSIS_TYPE);
        let duration = request.duration_secs.filter(|d| d.is_finite() && *d > 0.0);
        let length = match duration {
            Some(secs) => format!("{secs:.1} seconds"),
            None => "unknown".to_string(),
        };

        let message = ChatMessage {
            role: "user".into(),
            parts: vec![
                ContentPart::Text(format!(
                    "Analyze this video from a child's exploration project.\n\n\
                     Format: {format}\nAnalysis type: {analysis_type}\nLength: {length}\n\n\
                     {VIDEO_FORMAT}"
                )),
                ContentPart::VideoUrl(format!(
                    "data:video/{format};base64,{}",
                    STANDARD.encode(&request.video)
                )),
            ],
        };
        let result = self
            .ask(&self.models.video_analysis, vec![message])
            .await
            .and_then(|reply| decode_reply::<VideoAnalysis>(&reply))
            .and_then(|decoded| {
                let mut analysis = decoded.value;
                if analysis.is_empty() {
                    return Err(ExploraError::Decode {
                        message: "video reply carried no analysis".into(),
                        source: None,
                    });
                }
                let reported = analysis.summary.duration;
                let reported_ok = reported.is_finite() && reported > 0.0;
                if let Some(secs) = duration.filter(|_| !reported_ok) {
                    analysis.summary.duration = secs;
                }
                Ok(analysis)
            });

        Ok(match result {
            Ok(analysis) => {
                info!(
                    scenes = analysis.scenes.len(),
                    objects = analysis.objects.len(),
                    "video analyzed"
                );
                Outcome::genuine(analysis, "video analyzed")
            }
            Err(err) => degrade("analyze_video", fallback::video_analysis(duration), &err),
        })
    }
}

fn media_format(requested: Option<&str>, default: &str) -> String {
    non_blank(requested)
        .unwrap_or(default)
        .trim_start_matches('.')
        .to_ascii_lowercase()
}

fn degrade<T>(operation: &'static str, value: T, err: &ExploraError) -> Outcome<T> {
    warn!(operation, stage = err.stage(), error = %err, "assistant degraded to placeholder");
    Outcome::fallback(value, err)
}

/// Extracts audio from a speech reply.
///
/// The reply is either the requested JSON object or, when the model skips
/// the wrapper, the bare base64 payload.
fn decode_speech(reply: &str) -> Result<Speech, ExploraError> {
    let (encoded, format) = match decode_reply::<SpeechPayload>(reply) {
        Ok(decoded) => (decoded.value.audio_data, decoded.value.format),
        Err(_) => (strip_wrapping(reply).to_string(), None),
    };
    let encoded = encoded.trim().trim_matches(|c| c == '"' || c == '`');
    if encoded.is_empty() {
        return Err(ExploraError::Decode {
            message: "speech reply carried no audio".into(),
            source: None,
        });
    }

    let audio = STANDARD
        .decode(encoded)
        .or_else(|_| URL_SAFE.decode(encoded))
        .map_err(|e| ExploraError::decode(format!("audio is not base64: {e}"), e))?;
    if audio.is_empty() {
        return Err(ExploraError::Decode {
            message: "decoded audio is empty".into(),
            source: None,
        });
    }

    let format = non_blank(format.as_deref())
        .unwrap_or(DEFAULT_AUDIO_FORMAT)
        .to_ascii_lowercase();
    Ok(Speech { audio, format })
}

/// Reads a transcription from JSON or, failing that, from the prose itself.
fn decode_transcription(reply: &str, language: &str) -> Result<Transcription, ExploraError> {
    let mut transcription = match decode_reply::<Transcription>(reply) {
        Ok(decoded) => decoded.value,
        Err(err) => {
            debug!(error = %err, "transcription reply is prose, keeping it as text");
            Transcription::from_text(strip_wrapping(reply).trim_matches('"'))
        }
    };
    transcription.text = transcription.text.trim().to_string();
    if transcription.text.is_empty() {
        return Err(ExploraError::Decode {
            message: "transcription is empty".into(),
            source: None,
        });
    }
    if transcription.language.trim().is_empty() {
        transcription.language = language.to_string();
    }
    Ok(transcription)
}

fn strip_wrapping(reply: &str) -> &str {
    let trimmed = reply.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    trimmed.strip_suffix("```").unwrap_or(trimmed).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use explorapal_test_utils::{ChatStep, MockChatProvider};

    fn assistant(mock: Arc<MockChatProvider>) -> Assistant {
        Assistant::new(mock, &ExplorapalConfig::default())
    }

    fn prompt_text(request: &ChatRequest) -> &str {
        match &request.messages[0].parts[0] {
            ContentPart::Text(text) => text.as_str(),
            other => panic!("expected a text part first, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn describe_image_sends_text_and_image_parts() {
        let mock = Arc::new(MockChatProvider::with_replies([
            r#"{"object_name": "Triceratops", "category": "dinosaur", "confidence": 0.9}"#,
        ]));
        let outcome = assistant(mock.clone())
            .describe_image("https://img.example/tri.jpg", None)
            .await
            .unwrap();
        assert!(!outcome.degraded);
        assert_eq!(outcome.value.object_name, "Triceratops");

        let requests = mock.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, ModelsConfig::default().image_analysis);
        assert!(matches!(
            requests[0].messages[0].parts.as_slice(),
            [ContentPart::Text(_), ContentPart::ImageUrl(url)] if url == "https://img.example/tri.jpg"
        ));
    }

    #[tokio::test]
    async fn describe_image_prose_reply_degrades_by_url_keyword() {
        let mock = Arc::new(MockChatProvider::new());
        let outcome = assistant(mock)
            .describe_image("https://img.example/rocket.png", Some("what is it"))
            .await
            .unwrap();
        assert!(outcome.degraded);
        assert_eq!(outcome.value.category, "rocket");
        assert!(outcome.message.contains("decode"), "{}", outcome.message);
    }

    #[tokio::test]
    async fn describe_image_empty_object_degrades() {
        let mock = Arc::new(MockChatProvider::with_replies(["{}"]));
        let outcome = assistant(mock)
            .describe_image("https://img.example/dinosaur.jpg", None)
            .await
            .unwrap();
        assert!(outcome.degraded);
        assert_eq!(outcome.value, fallback::image_description("https://img.example/dinosaur.jpg"));
        assert!(outcome.message.contains("named no object"), "{}", outcome.message);
    }

    #[tokio::test]
    async fn describe_image_partial_reply_is_completed_from_url() {
        let mock = Arc::new(MockChatProvider::with_replies([r#"{"object_name": "Stegosaurus"}"#]));
        let outcome = assistant(mock)
            .describe_image("https://img.example/dinosaur.jpg", None)
            .await
            .unwrap();
        assert!(!outcome.degraded);
        assert_eq!(outcome.value.object_name, "Stegosaurus");
        assert_eq!(outcome.value.category, "dinosaur");
        assert!(!outcome.value.description.is_empty());
    }

    #[tokio::test]
    async fn blank_inputs_are_rejected_without_calls() {
        let mock = Arc::new(MockChatProvider::new());
        let assistant = assistant(mock.clone());

        assert_eq!(
            assistant.generate_questions("  ", "dinosaur").await.unwrap_err(),
            ValidationError::EmptyField("context")
        );
        assert_eq!(
            assistant.polish_note("", "ctx").await.unwrap_err(),
            ValidationError::EmptyField("raw_content")
        );
        assert_eq!(
            assistant
                .synthesize_speech(&SpeechRequest::new("\n"))
                .await
                .unwrap_err(),
            ValidationError::EmptyField("text")
        );
        assert!(assistant.describe_image(" ", None).await.is_err());
        assert!(assistant.generate_report("").await.is_err());
        assert_eq!(
            assistant
                .speech_to_text(&TranscriptionRequest::new(Vec::new()))
                .await
                .unwrap_err(),
            ValidationError::EmptyField("audio")
        );
        assert_eq!(
            assistant
                .analyze_video(&VideoAnalysisRequest::new(Vec::new()))
                .await
                .unwrap_err(),
            ValidationError::EmptyField("video")
        );
        assert!(mock.requests().await.is_empty());
    }

    #[tokio::test]
    async fn empty_question_list_falls_back() {
        let mock = Arc::new(MockChatProvider::with_replies([r#"{"questions": []}"#]));
        let outcome = assistant(mock)
            .generate_questions("a fossil in a museum", "dinosaur")
            .await
            .unwrap();
        assert!(outcome.degraded);
        assert_eq!(outcome.value, fallback::questions("dinosaur"));
    }

    #[tokio::test]
    async fn polish_note_keeps_prose_reply_as_genuine() {
        let reply = "Your note says magma rises through cracks. That is how volcanoes grow!";
        let mock = Arc::new(MockChatProvider::with_replies([reply]));
        let outcome = assistant(mock)
            .polish_note("volcano go boom", "volcano trip")
            .await
            .unwrap();
        assert!(!outcome.degraded);
        assert_eq!(outcome.value.formatted_text, reply);
        assert_eq!(outcome.value.title, "Polished note");
        assert_eq!(outcome.value.key_points.len(), 2);
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn polish_note_transport_failure_keeps_raw_text() {
        let mock = Arc::new(MockChatProvider::with_steps([ChatStep::Fail]));
        let outcome = assistant(mock)
            .polish_note("I saw a beetle", "garden")
            .await
            .unwrap();
        assert!(outcome.degraded);
        assert_eq!(outcome.value.formatted_text, "I saw a beetle");
        assert!(outcome.message.contains("transport"));
        assert!(logs_contain("assistant degraded to placeholder"));
    }

    #[tokio::test]
    async fn report_fills_content_from_reply() {
        let reply = r#"```json
{"title": "", "findings": [{"title": "Bees like blue"}]}
```"#;
        let mock = Arc::new(MockChatProvider::with_replies([reply]));
        let outcome = assistant(mock.clone()).generate_report("bee notes").await.unwrap();
        assert!(!outcome.degraded);
        assert_eq!(outcome.value.title, "Exploration report");
        assert_eq!(outcome.value.findings[0].title, "Bees like blue");
        assert_eq!(outcome.value.content, reply);
        assert_eq!(
            mock.requests().await[0].model,
            ModelsConfig::default().advanced_reasoning
        );
    }

    #[test]
    fn speech_decodes_json_and_bare_payloads() {
        let speech = decode_speech(r#"{"audio_data": "UklGRg==", "format": "MP3"}"#).unwrap();
        assert_eq!(speech.audio, b"RIFF");
        assert_eq!(speech.format, "mp3");

        let speech = decode_speech("```\n\"UklGRg==\"\n```").unwrap();
        assert_eq!(speech.audio, b"RIFF");
        assert_eq!(speech.format, "wav");
    }

    #[test]
    fn speech_accepts_url_safe_alphabet() {
        // 0xFB 0xFF encodes to "-_8=" in the URL-safe alphabet.
        let speech = decode_speech(r#"{"audio_data": "-_8="}"#).unwrap();
        assert_eq!(speech.audio, [0xFB, 0xFF]);
    }

    #[tokio::test]
    async fn undecodable_speech_yields_placeholder_wav() {
        let mock = Arc::new(MockChatProvider::with_replies(["I cannot produce audio, sorry!"]));
        let outcome = assistant(mock)
            .synthesize_speech(&SpeechRequest::new("hello"))
            .await
            .unwrap();
        assert!(outcome.degraded);
        assert_eq!(outcome.value.format, "wav");
        assert_eq!(&outcome.value.audio[..4], b"RIFF");
    }

    #[tokio::test]
    async fn speech_defaults_come_from_media_config() {
        let mut config = ExplorapalConfig::default();
        config.media.default_voice = "male".into();
        config.media.default_language = "en-US".into();
        let mock = Arc::new(MockChatProvider::with_replies([r#"{"audio_data": "UklGRg=="}"#]));

        let outcome = Assistant::new(mock.clone(), &config)
            .synthesize_speech(&SpeechRequest::new("hello"))
            .await
            .unwrap();
        assert!(!outcome.degraded);

        let requests = mock.requests().await;
        let prompt = prompt_text(&requests[0]);
        assert!(prompt.contains("Voice: male"), "{prompt}");
        assert!(prompt.contains("Language: en-US"), "{prompt}");
    }

    #[tokio::test]
    async fn speech_to_text_sends_audio_and_reads_json() {
        let mock = Arc::new(MockChatProvider::with_replies([
            r#"{"text": " I found a frog ", "confidence": 0.7}"#,
        ]));
        let request = TranscriptionRequest {
            audio: b"RIFF".to_vec(),
            format: Some(".MP3".into()),
            language: None,
        };
        let outcome = assistant(mock.clone()).speech_to_text(&request).await.unwrap();

        assert!(!outcome.degraded);
        assert_eq!(outcome.value.text, "I found a frog");
        assert_eq!(outcome.value.confidence, 0.7);
        assert_eq!(outcome.value.language, "zh-CN");

        let requests = mock.requests().await;
        assert_eq!(requests[0].model, ModelsConfig::default().voice);
        assert!(matches!(
            &requests[0].messages[0].parts[1],
            ContentPart::InputAudio { data, format } if data == "UklGRg==" && format == "mp3"
        ));
    }

    #[tokio::test]
    async fn speech_to_text_keeps_prose_reply() {
        let mock = Arc::new(MockChatProvider::with_replies(["The child said: look, a rainbow!"]));
        let outcome = assistant(mock)
            .speech_to_text(&TranscriptionRequest::new(vec![1, 2, 3]))
            .await
            .unwrap();
        assert!(!outcome.degraded);
        assert_eq!(outcome.value.text, "The child said: look, a rainbow!");
        assert_eq!(outcome.value.confidence, 0.95);
    }

    #[tokio::test]
    async fn speech_to_text_failure_yields_placeholder() {
        let mock = Arc::new(MockChatProvider::failing());
        let mut request = TranscriptionRequest::new(vec![1, 2, 3]);
        request.language = Some("en-US".into());
        let outcome = assistant(mock).speech_to_text(&request).await.unwrap();
        assert!(outcome.degraded);
        assert_eq!(outcome.value, fallback::transcription("en-US"));
        assert_eq!(outcome.value.confidence, fallback::FALLBACK_TRANSCRIPTION_CONFIDENCE);
    }

    #[tokio::test]
    async fn analyze_video_sends_data_url_and_fills_duration() {
        let reply = r#"Here you go:
{"scenes": [{"timestamp": 0.0, "scene_type": "outdoor", "description": "A pond", "confidence": 0.9}],
 "objects": [{"timestamp": 2.5, "object_name": "frog", "confidence": 0.8,
              "bbox": {"x": 10, "y": 20, "width": 30, "height": 40}}],
 "summary": {"title": "Pond visit", "keywords": ["frog"]}}"#;
        let mock = Arc::new(MockChatProvider::with_replies([reply]));
        let request = VideoAnalysisRequest {
            video: vec![0, 0, 0, 0x18],
            format: None,
            analysis_type: Some("objects".into()),
            duration_secs: Some(30.0),
        };
        let outcome = assistant(mock.clone()).analyze_video(&request).await.unwrap();

        assert!(!outcome.degraded, "{}", outcome.message);
        let analysis = outcome.value;
        assert_eq!(analysis.scenes[0].scene_type, "outdoor");
        assert_eq!(analysis.objects[0].bbox.width, 30.0);
        assert_eq!(analysis.summary.title, "Pond visit");
        assert_eq!(analysis.summary.duration, 30.0);

        let requests = mock.requests().await;
        assert_eq!(requests[0].model, ModelsConfig::default().video_analysis);
        assert!(prompt_text(&requests[0]).contains("Analysis type: objects"));
        assert!(matches!(
            &requests[0].messages[0].parts[1],
            ContentPart::VideoUrl(url) if url == "data:video/mp4;base64,AAAAGA=="
        ));
    }

    #[tokio::test]
    async fn analyze_video_empty_reply_degrades() {
        let mock = Arc::new(MockChatProvider::with_replies([r#"{"scenes": []}"#]));
        let mut request = VideoAnalysisRequest::new(vec![1]);
        request.duration_secs = Some(12.0);
        let outcome = assistant(mock).analyze_video(&request).await.unwrap();
        assert!(outcome.degraded);
        assert_eq!(outcome.value, fallback::video_analysis(Some(12.0)));
        assert!(outcome.message.contains("no analysis"), "{}", outcome.message);
    }

    #[test]
    fn blank_transcription_is_a_decode_error() {
        let err = decode_transcription(r#"{"text": "  "}"#, "zh-CN").unwrap_err();
        assert_eq!(err.stage(), "decode");
        let found = decode_transcription(r#"{"text": "hi", "language": "fr"}"#, "zh-CN").unwrap();
        assert_eq!(found.language, "fr");
    }
}
