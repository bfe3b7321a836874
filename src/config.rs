use std::env;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde_derive::{Deserialize, Serialize};

use crate::category::{default_rules, known_tags, CategoryRule};
use crate::feed::Filter;
use crate::project::LanguageColors;

pub const DEFAULT_ACCOUNT: &str = "Prajwalpraju17";
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_WEB_URL: &str = "https://github.com";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct FeedConfig {
    pub account: String,
    pub api_url: String,
    /// Where profile links point; the API host serves JSON only.
    pub web_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Cards per page and per "load more".
    pub page_size: usize,
    /// Repositories requested in the single fetch.
    pub per_page: usize,
    pub categories: Vec<CategoryRule>,
    #[serde(flatten)]
    pub colors: LanguageColors,
}

impl Default for FeedConfig {
    fn default() -> Self {
        FeedConfig {
            account: DEFAULT_ACCOUNT.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            web_url: DEFAULT_WEB_URL.to_string(),
            token: None,
            page_size: 9,
            per_page: 100,
            categories: default_rules(),
            colors: LanguageColors::default(),
        }
    }
}

impl FeedConfig {
    pub fn repos_url(&self) -> String {
        format!(
            "{}/users/{}/repos",
            self.api_url.trim_end_matches('/'),
            self.account
        )
    }

    pub fn profile_url(&self) -> String {
        format!("{}/{}", self.web_url.trim_end_matches('/'), self.account)
    }

    /// Rejects filter keys that no category rule can produce.
    pub fn check_filter(&self, filter: &Filter) -> Result<()> {
        let Filter::Category(tag) = filter else {
            return Ok(());
        };
        let known = known_tags(&self.categories);
        if !known.iter().any(|k| k == tag) {
            bail!(
                "unknown filter {:?}, expected one of: all, {}",
                tag,
                known.join(", ")
            );
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.account.trim().is_empty() {
            bail!("account must not be empty");
        }
        if self.page_size == 0 {
            bail!("page_size must be at least 1");
        }
        if self.per_page == 0 || self.per_page > 100 {
            bail!("per_page must be between 1 and 100, got {}", self.per_page);
        }
        Ok(())
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let home_dir = env::var("HOME").context("Could not find home directory")?;
    Ok(Path::new(&home_dir).join(".pfeed.yaml"))
}

/// Reads the config file. A missing file at the default location means
/// defaults; a missing file that was asked for by name is an error.
pub fn load_config(path: Option<&Path>) -> Result<FeedConfig> {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (default_config_path()?, false),
    };

    if !explicit && !path.exists() {
        log::debug!("no config at {}, using defaults", path.display());
        return Ok(FeedConfig::default());
    }

    let file = File::open(&path)
        .with_context(|| format!("Failed to open config file at {}", path.display()))?;
    let reader = BufReader::new(file);
    let config: FeedConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

pub fn save_config(path: &Path, config: &FeedConfig) -> Result<()> {
    config.validate()?;
    let yaml = serde_yaml::to_string(config).context("Failed to serialize config")?;
    fs::write(path, yaml)
        .with_context(|| format!("Failed to write config file at {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = write_config("account: octocat\npage_size: 6\n");
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.account, "octocat");
        assert_eq!(config.page_size, 6);
        assert_eq!(config.per_page, 100);
        assert_eq!(config.categories, default_rules());
        assert_eq!(config.colors, LanguageColors::default());
        assert_eq!(config.token, None);
    }

    #[test]
    fn tables_can_be_replaced() {
        let file = write_config(
            "categories:\n  - tag: web\n    keywords: [react, vue]\n\
             language_colors:\n  Elm: '#60B5CC'\n\
             default_color: '#000000'\n",
        );
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.categories.len(), 1);
        assert_eq!(config.categories[0].tag, "web");
        assert_eq!(config.colors.color_for("Elm"), "#60B5CC");
        assert_eq!(config.colors.color_for("Rust"), "#000000");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("nope.yaml"))).is_err());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let file = write_config("page_size: 0\n");
        assert!(load_config(Some(file.path())).is_err());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pfeed.yaml");
        let config = FeedConfig {
            account: "octocat".to_string(),
            token: Some("secret".to_string()),
            ..FeedConfig::default()
        };
        save_config(&path, &config).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), config);
    }

    #[test]
    fn filter_keys_are_checked_against_the_table() {
        let config = FeedConfig::default();
        assert!(config.check_filter(&Filter::All).is_ok());
        assert!(config.check_filter(&"python".parse().unwrap()).is_ok());
        assert!(config.check_filter(&"other".parse().unwrap()).is_ok());

        let err = config.check_filter(&"pyhton".parse().unwrap()).unwrap_err();
        assert!(err.to_string().contains("pyhton"));
        assert!(err.to_string().contains("gen-ai"));
    }

    #[test]
    fn urls() {
        let config = FeedConfig {
            account: "octocat".to_string(),
            api_url: "http://127.0.0.1:1234/".to_string(),
            ..FeedConfig::default()
        };
        assert_eq!(config.repos_url(), "http://127.0.0.1:1234/users/octocat/repos");
        assert_eq!(config.profile_url(), "https://github.com/octocat");
    }
}
