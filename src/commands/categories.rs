use anyhow::Result;
use prettytable::{format, row, Table};

use crate::category::known_tags;
use crate::config::FeedConfig;
use crate::feed::{Feed, Filter};
use crate::github::fetch_projects;

/// Filter keys with the number of projects each one selects, `all` first.
pub fn category_counts(feed: &Feed) -> Vec<(Filter, usize)> {
    std::iter::once(Filter::All)
        .chain(known_tags(feed.rules()).into_iter().map(Filter::Category))
        .map(|filter| {
            let count = feed.select(&filter).len();
            (filter, count)
        })
        .collect()
}

pub async fn list_categories(config: &FeedConfig) -> Result<()> {
    let (feed, _) = Feed::from_fetch(fetch_projects(config).await, config);
    if feed.is_unavailable() {
        anyhow::bail!(
            "Unable to load projects, see {} instead",
            config.profile_url()
        );
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(row!["Filter", "Projects"]);
    for (filter, count) in category_counts(&feed) {
        table.add_row(row![filter, count]);
    }
    table.printstd();

    Ok(())
}
