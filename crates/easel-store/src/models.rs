use serde::{Deserialize, Serialize};

/// One successful generation, as persisted in the history document.
///
/// Records are immutable once written and are only ever removed in bulk,
/// either by falling off the capped log or by an explicit clear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub prompt: String,
    pub timestamp: String,
    pub image_url: String,
}

impl GenerationRecord {
    /// Build a record stamped with the current local time at second
    /// precision (`2026-08-05T14:03:09`), the format the frontend renders.
    pub fn new(prompt: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            timestamp: chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
            image_url: image_url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptCount {
    pub prompt: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentPrompt {
    pub prompt: String,
    pub timestamp: String,
}

/// Usage summary derived from the history log; computed on demand, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total: usize,
    pub top_prompts: Vec<PromptCount>,
    pub recent: Vec<RecentPrompt>,
}
