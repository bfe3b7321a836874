use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};

pub const NO_DESCRIPTION: &str = "No description available";
pub const UNKNOWN_LANGUAGE: &str = "Unknown";
pub const DEFAULT_COLOR: &str = "#667eea";

/// One element of `GET /users/{account}/repos`. Only the fields the feed
/// shows are kept.
#[derive(Deserialize, Clone, Debug)]
pub struct Repository {
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: Option<u64>,
    pub forks_count: Option<u64>,
    pub html_url: String,
    pub topics: Option<Vec<String>>,
    /// Kept raw; a value that is not RFC 3339 must not sink the fetch.
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub language: String,
    pub stars: u64,
    pub forks: u64,
    pub url: String,
    pub topics: Vec<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

fn or_placeholder(value: Option<String>, placeholder: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => placeholder.to_string(),
    }
}

fn parse_updated(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value?;
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            log::debug!("ignoring updated_at {:?}: {}", value, e);
            None
        }
    }
}

impl From<Repository> for Project {
    fn from(repo: Repository) -> Self {
        Project {
            name: repo.name,
            description: or_placeholder(repo.description, NO_DESCRIPTION),
            language: or_placeholder(repo.language, UNKNOWN_LANGUAGE),
            stars: repo.stargazers_count.unwrap_or(0),
            forks: repo.forks_count.unwrap_or(0),
            url: repo.html_url,
            topics: repo.topics.unwrap_or_default(),
            updated_at: parse_updated(repo.updated_at.as_deref()),
        }
    }
}

/// Language name to swatch color, with one color for everything unmapped.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LanguageColors {
    #[serde(rename = "language_colors")]
    pub languages: BTreeMap<String, String>,
    #[serde(rename = "default_color")]
    pub default: String,
}

impl Default for LanguageColors {
    fn default() -> Self {
        let languages = [
            ("JavaScript", "#f1e05a"),
            ("Python", "#3572A5"),
            ("Java", "#b07219"),
            ("HTML", "#e34c26"),
            ("CSS", "#1572B6"),
            ("TypeScript", "#2b7489"),
            ("C++", "#f34b7d"),
            ("C", "#555555"),
            ("PHP", "#4F5D95"),
            ("Ruby", "#701516"),
            ("Go", "#00ADD8"),
            ("Rust", "#dea584"),
            ("Swift", "#ffac45"),
            ("Jupyter Notebook", "#DA5B0B"),
        ]
        .into_iter()
        .map(|(name, color)| (name.to_string(), color.to_string()))
        .collect();

        LanguageColors {
            languages,
            default: DEFAULT_COLOR.to_string(),
        }
    }
}

impl LanguageColors {
    pub fn color_for(&self, language: &str) -> &str {
        self.languages
            .get(language)
            .map(String::as_str)
            .unwrap_or(self.default.as_str())
    }
}

#[cfg(test)]
pub(crate) fn project(name: &str, description: &str, language: &str, topics: &[&str]) -> Project {
    Project {
        name: name.to_string(),
        description: description.to_string(),
        language: language.to_string(),
        stars: 0,
        forks: 0,
        url: format!("https://github.com/someone/{}", name),
        topics: topics.iter().map(|t| t.to_string()).collect(),
        updated_at: None,
    }
}
