//! Result types for the four studio tools, plus the script tone selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::llm_client::Citation;

/// Search-grounded trend report. `narrative` may embed markdown.
///
/// `citation_url` / `citation_title` mirror the first grounding citation;
/// `citations` keeps the full ordered list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendResult {
    pub topic: String,
    pub narrative: String,
    pub citation_url: Option<String>,
    pub citation_title: Option<String>,
    pub citations: Vec<Citation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoIdea {
    pub title: String,
    pub hook: String,
    /// Always within 1..=100.
    pub viral_score: u8,
    pub target_audience: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMetadata {
    pub titles: Vec<String>,
    pub description: String,
    pub tags: Vec<String>,
    pub thumbnail_prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptSection {
    pub heading: String,
    pub content: String,
    /// Free-form label such as "0:00-0:30". Never parsed.
    pub duration: String,
}

/// A generated script. Usually intro, three body sections and a conclusion,
/// but the section count is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullScript {
    pub title: String,
    pub sections: Vec<ScriptSection>,
}

/// Script tone, selected from a fixed set. (De)serialized by its display label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Tone {
    #[default]
    #[serde(rename = "Engaging and High Energy")]
    EngagingHighEnergy,
    #[serde(rename = "Serious and Informative")]
    SeriousInformative,
    #[serde(rename = "Funny and Sarcastic")]
    FunnySarcastic,
    #[serde(rename = "Relaxed and Storytelling")]
    RelaxedStorytelling,
}

impl Tone {
    pub const ALL: [Tone; 4] = [
        Tone::EngagingHighEnergy,
        Tone::SeriousInformative,
        Tone::FunnySarcastic,
        Tone::RelaxedStorytelling,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tone::EngagingHighEnergy => "Engaging and High Energy",
            Tone::SeriousInformative => "Serious and Informative",
            Tone::FunnySarcastic => "Funny and Sarcastic",
            Tone::RelaxedStorytelling => "Relaxed and Storytelling",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tone::ALL
            .into_iter()
            .find(|t| t.label() == s.trim())
            .ok_or_else(|| format!("unknown tone '{s}'"))
    }
}

impl<'de> Deserialize<'de> for Tone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}
