use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Emotion {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
}

pub static EMOTIONS: [Emotion; 5] = [
    Emotion { id: "happy", name: "Happy", emoji: "😊" },
    Emotion { id: "sad", name: "Sad", emoji: "😢" },
    Emotion { id: "angry", name: "Angry", emoji: "😠" },
    Emotion { id: "excited", name: "Excited", emoji: "🤩" },
    Emotion { id: "thoughtful", name: "Thoughtful", emoji: "🤔" },
];

pub static DEFAULT_EMOTION: &Emotion = &EMOTIONS[0];

pub fn find(id: &str) -> Option<&'static Emotion> {
    let id = id.trim();
    EMOTIONS.iter().find(|emotion| emotion.id.eq_ignore_ascii_case(id))
}

// Known ids are normalized, other tones pass through, blank means the default.
pub fn resolve_tone(requested: Option<&str>) -> String {
    match requested.map(str::trim).filter(|tone| !tone.is_empty()) {
        Some(tone) => find(tone)
            .map(|emotion| emotion.id.to_string())
            .unwrap_or_else(|| tone.to_string()),
        None => DEFAULT_EMOTION.id.to_string(),
    }
}
