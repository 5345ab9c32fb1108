use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawDocument {
    #[serde(default)]
    pub(super) sections: Vec<RawSection>,
    #[serde(default)]
    pub(super) categories: Vec<RawCategory>,
    #[serde(rename = "defaultCategory")]
    pub(super) default_category: String,
    #[serde(default)]
    pub(super) links: Vec<RawLink>,
    #[serde(default)]
    pub(super) posts: Vec<RawPost>,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawSection {
    pub(super) id: String,
    pub(super) title: String,
    pub(super) label: String,
    #[serde(default)]
    pub(super) summary: String,
    #[serde(default)]
    pub(super) tags: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawCategory {
    pub(super) key: String,
    pub(super) name: String,
    #[serde(default)]
    pub(super) sections: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawLink {
    pub(super) source: String,
    pub(super) target: String,
    #[serde(default)]
    pub(super) reason: String,
    #[serde(default = "default_link_weight")]
    pub(super) weight: f32,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawPost {
    pub(super) id: String,
    pub(super) title: String,
    pub(super) label: String,
    pub(super) url: String,
    #[serde(default)]
    pub(super) tags: Vec<String>,
}

fn default_link_weight() -> f32 {
    1.0
}

pub(super) fn parse_document(raw: &str) -> Result<RawDocument> {
    serde_json::from_str(raw).context("invalid portfolio document JSON")
}

/// Tags are matched across sections and posts, so they are compared in a
/// normalized form: trimmed, lowercased, sorted, deduplicated.
pub(super) fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut tags = tags
        .into_iter()
        .map(|tag| tag.trim().to_ascii_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect::<Vec<_>>();
    tags.sort_unstable();
    tags.dedup();
    tags
}

pub(super) fn normalize_id(id: &str) -> String {
    id.trim().to_string()
}
