use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;

use crate::config::{load_config, save_config, FeedConfig};

fn prompt_token() -> io::Result<Option<String>> {
    println!("A token is optional. Without one the API allows 60 requests per hour.");
    println!("Create one at https://github.com/settings/tokens (no scopes needed for public repositories).");
    print!("Token (empty for none): ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();
    Ok((!input.is_empty()).then(|| input.to_string()))
}

/// Merges the given settings into whatever is already stored at `path`.
pub fn apply_settings(
    mut config: FeedConfig,
    account: &str,
    api_url: Option<String>,
    token: Option<String>,
) -> FeedConfig {
    config.account = account.to_string();
    if let Some(api_url) = api_url {
        config.api_url = api_url;
    }
    if token.is_some() {
        config.token = token;
    }
    config
}

pub fn configure(
    path: &Path,
    account: &str,
    api_url: Option<String>,
    token: Option<String>,
    ask_token: bool,
) -> Result<()> {
    let existing = if path.exists() {
        load_config(Some(path))?
    } else {
        FeedConfig::default()
    };

    let token = match token {
        Some(t) => Some(t),
        None if ask_token => prompt_token()?,
        None => None,
    };

    let config = apply_settings(existing, account, api_url, token);
    save_config(path, &config)?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}
