// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic stand-ins for assistant answers.
//!
//! None of these perform I/O or fail. Equal input gives equal output.

use explorapal_core::text::{ellipsize, truncate_chars};

use crate::types::{
    AnalysisSummary, AudioAnalysis, BoundingBox, EmotionAnalysis, Finding, ImageDescription,
    ObjectDetection, PolishedNote, Question, Reference, ResearchReport, SceneAnalysis,
    TextRecognition, Transcription, VideoAnalysis,
};

/// Characters of the reply kept as a prose note's summary.
pub const SUMMARY_CHARS: usize = 100;

/// Sentences kept as a prose note's key points.
pub const MAX_KEY_POINTS: usize = 3;

/// Confidence reported with a placeholder transcription.
pub const FALLBACK_TRANSCRIPTION_CONFIDENCE: f64 = 0.85;

/// Clip length assumed when the caller did not give one.
pub const DEFAULT_CLIP_SECS: f64 = 60.0;

const WAV_SAMPLE_RATE: u32 = 16_000;
const WAV_CHANNELS: u16 = 1;
const WAV_BITS_PER_SAMPLE: u16 = 16;
const WAV_DATA_LEN: usize = 2048;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    let lower = haystack.to_lowercase();
    needles.iter().any(|n| lower.contains(n))
}

/// Image description guessed from keywords in the image URL.
pub fn image_description(image_url: &str) -> ImageDescription {
    if contains_any(image_url, &["dinosaur", "恐龙", "fossil", "t-rex"]) {
        return ImageDescription {
            object_name: "Dinosaur fossil".into(),
            category: "dinosaur".into(),
            confidence: 0.8,
            description: "This looks like a dinosaur fossil, the remains of an ancient animal.".into(),
            key_features: strings(&["Bone structure", "Fossil texture", "Very old"]),
            scientific_name: "Dinosauria".into(),
        };
    }
    if contains_any(image_url, &["rocket", "火箭"]) {
        return ImageDescription {
            object_name: "Rocket".into(),
            category: "rocket".into(),
            confidence: 0.8,
            description: "This looks like a rocket, a vehicle that carries things into space.".into(),
            key_features: strings(&["Tall body", "Engines at the base", "Pointed nose cone"]),
            scientific_name: "Launch vehicle".into(),
        };
    }
    if contains_any(image_url, &["minecraft", "我的世界"]) {
        return ImageDescription {
            object_name: "Minecraft build".into(),
            category: "minecraft".into(),
            confidence: 0.8,
            description: "This looks like something built from blocks in Minecraft.".into(),
            key_features: strings(&["Square blocks", "Pixel textures", "Built by hand"]),
            scientific_name: "Unknown".into(),
        };
    }
    ImageDescription {
        object_name: "Unknown object".into(),
        category: "general".into(),
        confidence: 0.8,
        description: "The image service is unavailable, so this is a placeholder description."
            .into(),
        key_features: strings(&["Shape", "Color", "Texture"]),
        scientific_name: "Unknown".into(),
    }
}

/// Fills fields a model left blank from the URL-keyword guess.
pub fn complete_image_description(mut found: ImageDescription, image_url: &str) -> ImageDescription {
    let guess = image_description(image_url);
    if found.object_name.trim().is_empty() {
        found.object_name = guess.object_name;
    }
    if found.category.trim().is_empty() {
        found.category = guess.category;
    }
    if found.description.trim().is_empty() {
        found.description = guess.description;
    }
    if found.key_features.is_empty() {
        found.key_features = guess.key_features;
    }
    if found.scientific_name.trim().is_empty() {
        found.scientific_name = guess.scientific_name;
    }
    found
}

fn question(content: &str, question_type: &str, difficulty: &str, purpose: &str) -> Question {
    Question {
        content: content.into(),
        question_type: question_type.into(),
        difficulty: difficulty.into(),
        purpose: purpose.into(),
    }
}

/// Three questions of rising difficulty for `category`.
pub fn questions(category: &str) -> Vec<Question> {
    match category.trim().to_ascii_lowercase().as_str() {
        "dinosaur" => vec![
            question(
                "Which part of the dinosaur looks the most interesting to you?",
                "observation",
                "basic",
                "Practice careful observation",
            ),
            question(
                "When do you think this dinosaur lived? Why?",
                "reasoning",
                "intermediate",
                "Practice reasoning from evidence",
            ),
            question(
                "If you could meet a living dinosaur, what would you ask it?",
                "experiment",
                "advanced",
                "Spark imagination and curiosity",
            ),
        ],
        _ => vec![
            question(
                "What interesting thing did you notice?",
                "observation",
                "basic",
                "Spark interest in observing",
            ),
            question("Why do you think it happens?", "reasoning", "intermediate", "Practice thinking"),
            question(
                "Could we do a small experiment to check?",
                "experiment",
                "advanced",
                "Encourage hands-on exploration",
            ),
        ],
    }
}

/// Placeholder note keeping the child's text untouched.
pub fn polished_note(raw: &str) -> PolishedNote {
    PolishedNote {
        title: "Exploration note".into(),
        summary: "The note service is unavailable, so the original note is shown.".into(),
        key_points: strings(&["Observations", "Thinking process"]),
        scientific_concepts: strings(&["Observation", "Recording"]),
        questions: strings(&["What did you find?", "What do you want to know?"]),
        connections: strings(&["Scientific exploration", "Learning process"]),
        formatted_text: raw.to_string(),
    }
}

/// Note built from a prose reply that carried no JSON.
pub fn prose_note(reply: &str) -> PolishedNote {
    let reply = reply.trim();
    PolishedNote {
        title: "Polished note".into(),
        summary: ellipsize(reply, SUMMARY_CHARS),
        key_points: key_points(reply),
        formatted_text: reply.to_string(),
        ..PolishedNote::default()
    }
}

fn key_points(text: &str) -> Vec<String> {
    let points: Vec<String> = text
        .split(['。', '.', '!', '?', '！', '？', '\n'])
        .map(str::trim)
        .filter(|s| s.chars().count() > 5)
        .take(MAX_KEY_POINTS)
        .map(str::to_string)
        .collect();
    if points.is_empty() {
        strings(&["Note processed", "Contains useful information"])
    } else {
        points
    }
}

/// Fills fields a model left blank.
pub fn complete_note(mut note: PolishedNote, raw: &str, reply: &str) -> PolishedNote {
    if note.title.trim().is_empty() {
        note.title = "Exploration note".into();
    }
    if note.summary.trim().is_empty() {
        let subject = truncate_chars(raw.trim(), 20).trim_end();
        note.summary = format!("A learning note about {subject}");
    }
    if note.key_points.is_empty() {
        note.key_points = strings(&["Learned something new", "Noticed something interesting"]);
    }
    if note.formatted_text.trim().is_empty() {
        note.formatted_text = reply.to_string();
    }
    note
}

/// Template report used when the model is unavailable.
pub fn research_report() -> ResearchReport {
    ResearchReport {
        title: "Exploration report".into(),
        r#abstract: "A summary of the child's exploration.".into(),
        introduction: "The child explored by observing, asking and describing.".into(),
        methodology: "Observation, questions and notes.".into(),
        findings: vec![Finding {
            title: "Discoveries".into(),
            description: "The child noticed interesting things and asked their own questions."
                .into(),
            evidence: strings(&["Observation notes", "Questions asked"]),
            significance: "Builds observation and thinking skills".into(),
        }],
        discussion: "The exploration helped build observation and thinking skills.".into(),
        conclusion: "Learning by exploring works.".into(),
        references: vec![
            Reference {
                title: "Scientific observation methods".into(),
                kind: "Educational resource".into(),
                url: None,
                credit: "Education experts".into(),
            },
            Reference {
                title: "How children learn".into(),
                kind: "Research literature".into(),
                url: None,
                credit: "Education researchers".into(),
            },
        ],
        child_insights: "The child's own point of view and creative thinking.".into(),
        next_steps: strings(&["Keep exploring", "Dig deeper", "Share the findings"]),
        content: "The report service is unavailable, so this is a template report.".into(),
    }
}

/// Fills fields a model left blank.
pub fn complete_report(mut report: ResearchReport, reply: &str) -> ResearchReport {
    if report.title.trim().is_empty() {
        report.title = "Exploration report".into();
    }
    if report.content.trim().is_empty() {
        report.content = reply.to_string();
    }
    report
}

/// Generic timeline for a clip the model could not analyze.
pub fn video_analysis(duration_secs: Option<f64>) -> VideoAnalysis {
    let duration = duration_secs
        .filter(|d| d.is_finite() && *d > 0.0)
        .unwrap_or(DEFAULT_CLIP_SECS);
    VideoAnalysis {
        scenes: vec![
            SceneAnalysis {
                timestamp: 0.0,
                scene_type: "educational".into(),
                description: "An educational scene".into(),
                confidence: 0.85,
            },
            SceneAnalysis {
                timestamp: 15.0,
                scene_type: "demonstration".into(),
                description: "A demonstration".into(),
                confidence: 0.78,
            },
        ],
        objects: vec![ObjectDetection {
            timestamp: 5.0,
            object_name: "main object".into(),
            confidence: 0.82,
            bbox: BoundingBox {
                x: 100.0,
                y: 50.0,
                width: 200.0,
                height: 150.0,
            },
        }],
        emotions: vec![EmotionAnalysis {
            timestamp: 10.0,
            emotion: "interested".into(),
            confidence: 0.75,
        }],
        texts: vec![TextRecognition {
            timestamp: 8.0,
            text: "educational content".into(),
            language: "zh-CN".into(),
            confidence: 0.88,
            bbox: BoundingBox {
                x: 50.0,
                y: 30.0,
                width: 150.0,
                height: 40.0,
            },
        }],
        audio: vec![AudioAnalysis {
            timestamp: 12.0,
            transcription: "The video analysis service is unavailable.".into(),
            language: "zh-CN".into(),
            confidence: 0.80,
        }],
        summary: AnalysisSummary {
            title: "AI-analyzed video content".into(),
            description: "The video analysis service is unavailable, so this is a generic \
                          timeline."
                .into(),
            keywords: strings(&["education", "demonstration", "learning"]),
            category: "educational".into(),
            duration,
        },
    }
}

/// Placeholder transcription in `language`.
pub fn transcription(language: &str) -> Transcription {
    Transcription {
        text: "Speech recognition is unavailable, so this is a placeholder transcription.".into(),
        confidence: FALLBACK_TRANSCRIPTION_CONFIDENCE,
        language: language.to_string(),
    }
}

/// Short 16 kHz mono 16-bit PCM WAV that any player accepts.
pub fn placeholder_wav() -> Vec<u8> {
    let data_len = WAV_DATA_LEN as u32;
    let block_align = WAV_CHANNELS * WAV_BITS_PER_SAMPLE / 8;
    let byte_rate = WAV_SAMPLE_RATE * u32::from(block_align);

    let mut wav = Vec::with_capacity(44 + WAV_DATA_LEN);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&WAV_CHANNELS.to_le_bytes());
    wav.extend_from_slice(&WAV_SAMPLE_RATE.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&WAV_BITS_PER_SAMPLE.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    wav.extend((0..WAV_DATA_LEN).map(|i| ((i * 37) % 256) as u8));
    wav
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_fallback_follows_url_keywords() {
        assert_eq!(image_description("https://x/dinosaur-42.jpg").category, "dinosaur");
        assert_eq!(image_description("https://x/Rocket.png").category, "rocket");
        assert_eq!(image_description("https://x/minecraft/house.png").category, "minecraft");
        let generic = image_description("https://x/cat.png");
        assert_eq!(generic.category, "general");
        assert_eq!(generic.confidence, 0.8);
    }

    #[test]
    fn partial_image_description_keeps_model_fields() {
        let partial = ImageDescription {
            object_name: "Stegosaurus".into(),
            category: String::new(),
            confidence: 0.9,
            description: " ".into(),
            key_features: Vec::new(),
            scientific_name: String::new(),
        };
        let done = complete_image_description(partial, "https://x/dinosaur.jpg");
        assert_eq!(done.object_name, "Stegosaurus");
        assert_eq!(done.confidence, 0.9);
        assert_eq!(done.category, "dinosaur");
        assert_eq!(done.scientific_name, "Dinosauria");
        assert_eq!(done.key_features.len(), 3);
    }

    #[test]
    fn video_analysis_fallback_uses_known_duration() {
        let analysis = video_analysis(Some(42.0));
        assert!(!analysis.is_empty());
        assert_eq!(analysis.summary.duration, 42.0);
        assert_eq!(analysis.scenes.len(), 2);
        assert_eq!(video_analysis(Some(f64::NAN)).summary.duration, DEFAULT_CLIP_SECS);
        assert_eq!(video_analysis(None), video_analysis(Some(-1.0)));
    }

    #[test]
    fn question_sets_rise_in_difficulty() {
        for category in ["dinosaur", "volcano"] {
            let set = questions(category);
            let levels: Vec<_> = set.iter().map(|q| q.difficulty.as_str()).collect();
            assert_eq!(levels, ["basic", "intermediate", "advanced"], "{category}");
        }
        assert_ne!(questions("dinosaur"), questions("volcano"));
        assert_eq!(questions("Dinosaur"), questions("dinosaur"));
    }

    #[test]
    fn prose_note_keeps_reply_and_extracts_sentences() {
        let reply = "Volcanoes form where magma rises. Lava cools into rock! Some islands are volcanoes? Ok.";
        let note = prose_note(reply);
        assert_eq!(note.formatted_text, reply);
        assert_eq!(
            note.key_points,
            ["Volcanoes form where magma rises", "Lava cools into rock", "Some islands are volcanoes"]
        );
        assert_eq!(note.summary, reply);
    }

    #[test]
    fn prose_note_summary_is_truncated() {
        let reply = "a".repeat(150);
        let note = prose_note(&reply);
        assert_eq!(note.summary.chars().count(), SUMMARY_CHARS + 3);
        assert!(note.summary.ends_with("..."));
        assert_eq!(note.key_points, [reply.as_str()]);
    }

    #[test]
    fn complete_note_fills_only_blank_fields() {
        let note = PolishedNote {
            title: "Mine".into(),
            ..PolishedNote::default()
        };
        let done = complete_note(note, "I saw a big volcano today", "reply");
        assert_eq!(done.title, "Mine");
        assert_eq!(done.summary, "A learning note about I saw a big volcano");
        assert_eq!(done.key_points.len(), 2);
        assert_eq!(done.formatted_text, "reply");
    }

    #[test]
    fn placeholder_wav_header_is_consistent() {
        let wav = placeholder_wav();
        assert_eq!(wav.len(), 44 + WAV_DATA_LEN);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32::from_le_bytes(wav[4..8].try_into().unwrap()) as usize, wav.len() - 8);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(u32::from_le_bytes(wav[24..28].try_into().unwrap()), 16_000);
        assert_eq!(u16::from_le_bytes(wav[22..24].try_into().unwrap()), 1);
        assert_eq!(u32::from_le_bytes(wav[40..44].try_into().unwrap()) as usize, WAV_DATA_LEN);
        assert_eq!(placeholder_wav(), wav);
    }
}
