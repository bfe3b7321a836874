use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::category::known_tags;
use crate::commands::session::{open, Session};
use crate::config::FeedConfig;
use crate::feed::Filter;
use crate::page::Page;

pub fn session_html(session: &Session) -> Result<String> {
    let mut page = Page::new(known_tags(session.feed.rules()));
    for update in &session.updates {
        page.apply(update).context("Failed to render project cards")?;
    }
    log::debug!(
        "{} of {} projects rendered, load more {}",
        page.card_count(),
        session.feed.projects().len(),
        if page.load_more_visible() { "shown" } else { "hidden" }
    );
    page.to_html(session.feed.active_filter())
        .context("Failed to render projects section")
}

pub async fn render_page(
    config: &FeedConfig,
    filter: Filter,
    more: usize,
    output: Option<&Path>,
) -> Result<()> {
    let session = open(config, filter, more).await;
    let html = session_html(&session)?;

    match output {
        Some(path) => {
            fs::write(path, &html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("wrote {} bytes to {}", html.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(html.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
