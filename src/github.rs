use serde_json::Value;

use crate::config::FeedConfig;
use crate::error::FeedError;
use crate::project::{Project, Repository};

const USER_AGENT: &str = concat!("pfeed/", env!("CARGO_PKG_VERSION"));

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Turns a response body into projects. Anything but a JSON list of
/// well-formed repositories is an error; there are no partial results.
pub fn parse_projects(raw_json: &str) -> Result<Vec<Project>, FeedError> {
    let value: Value = serde_json::from_str(raw_json)?;
    let records = match value {
        Value::Array(records) => records,
        other => {
            log::debug!("unexpected response body:\n{:#}", other);
            return Err(FeedError::NotAList(kind(&other)));
        }
    };

    records
        .into_iter()
        .map(|record| {
            serde_json::from_value::<Repository>(record)
                .map(Project::from)
                .map_err(FeedError::Record)
        })
        .collect()
}

/// The one network call: the account's repositories, most recently updated
/// first.
pub async fn fetch_projects(config: &FeedConfig) -> Result<Vec<Project>, FeedError> {
    let url = config.repos_url();
    let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

    let mut request = client
        .get(&url)
        .header(reqwest::header::ACCEPT, "application/vnd.github+json")
        .query(&[
            ("sort", "updated".to_string()),
            ("per_page", config.per_page.to_string()),
        ]);
    if let Some(token) = &config.token {
        request = request.bearer_auth(token);
    }

    log::debug!("GET {}", url);
    let response = request.send().await?;
    let status = response.status();
    let raw_json = response.text().await?;
    if !status.is_success() {
        log::debug!("response body: {}", raw_json);
        return Err(FeedError::Status(status));
    }

    let projects = parse_projects(&raw_json)?;
    log::info!("fetched {} repositories for {}", projects.len(), config.account);
    Ok(projects)
}
