use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::*;
use prettytable::{format, row, Table};

use crate::commands::session::open;
use crate::config::FeedConfig;
use crate::feed::{Feed, Filter};
use crate::format::{format_age, format_count, format_language};

pub fn project_table(feed: &Feed, now: DateTime<Utc>) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(row![
        "Name",
        "Language",
        "Stars",
        "Forks",
        "Updated",
        "Categories",
        "URL"
    ]);

    for card in feed.view().cards {
        let project = card.project;
        table.add_row(row![
            &project.name,
            &format_language(&project.language, &card.color),
            &format_count(project.stars),
            &format_count(project.forks),
            &format_age(project.updated_at, now),
            &card.categories.join(", "),
            &project.url,
        ]);
    }

    table
}

pub fn status_line(feed: &Feed) -> String {
    let view = feed.view();
    let mut line = format!(
        "Showing {} of {} (filter: {})",
        view.cards.len(),
        view.total,
        feed.active_filter()
    );
    if view.load_more {
        line.push_str(&format!("  [load more: --more {}]", next_click(feed)));
    }
    line
}

fn next_click(feed: &Feed) -> usize {
    // clicks needed to reach the current window, plus one
    feed.displayed().div_ceil(feed.page_size())
}

pub async fn list_projects(config: &FeedConfig, filter: Filter, more: usize) -> Result<()> {
    let session = open(config, filter, more).await;
    let feed = session.feed;

    if feed.is_unavailable() {
        println!("{}", "Unable to load projects".red().bold());
        println!(
            "Please visit the GitHub profile directly to view all projects: {}",
            config.profile_url()
        );
        return Ok(());
    }

    project_table(&feed, Utc::now()).printstd();
    println!("{}", status_line(&feed));

    Ok(())
}
