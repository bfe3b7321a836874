use askama::Template;

use crate::feed::{Card, Filter, Update};

#[derive(Template)]
#[template(path = "card.html")]
struct CardTemplate<'a> {
    card: &'a Card,
}

#[derive(Template)]
#[template(path = "fallback.html")]
struct FallbackTemplate<'a> {
    profile_url: &'a str,
}

struct FilterButton {
    key: String,
    active: bool,
}

#[derive(Template)]
#[template(path = "section.html")]
struct SectionTemplate<'a> {
    buttons: Vec<FilterButton>,
    cards: &'a [String],
    load_more: bool,
}

pub fn card_html(card: &Card) -> askama::Result<String> {
    CardTemplate { card }.render()
}

pub fn fallback_html(profile_url: &str) -> askama::Result<String> {
    FallbackTemplate { profile_url }.render()
}

/// Card markup as the portfolio page lays it out.
pub struct Page {
    cards: Vec<String>,
    load_more: bool,
    filters: Vec<String>,
}

impl Page {
    /// `filters` are the category keys offered next to `all`.
    pub fn new(filters: Vec<String>) -> Self {
        Page {
            cards: Vec::new(),
            load_more: false,
            filters,
        }
    }

    pub fn apply(&mut self, update: &Update) -> askama::Result<()> {
        match update {
            Update::Replace { cards, .. } => {
                self.cards = cards.iter().map(card_html).collect::<askama::Result<_>>()?;
            }
            Update::Append { cards, .. } => {
                for card in cards {
                    self.cards.push(card_html(card)?);
                }
            }
            Update::Unavailable { profile_url } => {
                self.cards = vec![fallback_html(profile_url)?];
            }
        }
        self.load_more = update.load_more_visible();
        Ok(())
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn load_more_visible(&self) -> bool {
        self.load_more
    }

    /// The whole projects section: filter bar, card container, load-more.
    pub fn to_html(&self, active: &Filter) -> askama::Result<String> {
        let buttons = std::iter::once(Filter::All)
            .chain(self.filters.iter().map(|f| Filter::Category(f.clone())))
            .map(|key| FilterButton {
                active: &key == active,
                key: key.to_string(),
            })
            .collect();

        SectionTemplate {
            buttons,
            cards: &self.cards,
            load_more: self.load_more,
        }
        .render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedConfig;
    use crate::error::FeedError;
    use crate::feed::Feed;
    use crate::project::project;

    fn filters() -> Vec<String> {
        vec!["python".to_string(), "other".to_string()]
    }

    #[test]
    fn card_shows_project_fields_escaped() {
        let mut p = project("a<b>&", "uses \"quotes\" & more", "C++", &[]);
        p.stars = 42;
        p.forks = 7;
        let card = Card {
            project: p,
            categories: vec!["other".to_string()],
            color: "#f34b7d".to_string(),
            position: 3,
        };
        let html = card_html(&card).unwrap();
        assert!(html.starts_with(r#"<div class="project-card other" style="animation-delay: 0.3s">"#));
        assert!(html.contains("<h3>a&lt;b&gt;&amp;</h3>"));
        assert!(html.contains("uses &quot;quotes&quot; &amp; more"));
        assert!(html.contains("<span>C++</span>"));
        assert!(html.contains("background: #f34b7d"));
        assert!(html.contains("</i> 42</span>"));
        assert!(html.contains("</i> 7</span>"));
        assert!(html.contains("View Project"));
    }

    #[test]
    fn fallback_replaces_everything() {
        let config = FeedConfig {
            account: "octocat".to_string(),
            ..FeedConfig::default()
        };
        let (_, update) = Feed::from_fetch(Err(FeedError::NotAList("a string")), &config);
        let mut page = Page::new(filters());
        page.apply(&update).unwrap();

        assert_eq!(page.card_count(), 1);
        assert!(!page.load_more_visible());
        let html = page.to_html(&Filter::All).unwrap();
        assert!(html.contains("Unable to load projects"));
        assert!(html.contains("github.com"));
        assert!(html.contains("octocat\" target=\"_blank\""));
        assert!(html.contains("display: none"));
    }

    #[test]
    fn page_follows_feed_updates() {
        let projects = (0..20)
            .map(|i| project(&format!("repo-{}", i), "a utility", "Go", &[]))
            .collect();
        let (mut feed, first) = Feed::from_fetch(Ok(projects), &FeedConfig::default());
        let mut page = Page::new(filters());

        page.apply(&first).unwrap();
        assert_eq!(page.card_count(), 9);
        assert!(page.load_more_visible());

        page.apply(&feed.load_more()).unwrap();
        assert_eq!(page.card_count(), 18);
        assert!(page.load_more_visible());

        page.apply(&feed.load_more()).unwrap();
        assert_eq!(page.card_count(), 20);
        assert!(!page.load_more_visible());
        assert_eq!(page.card_count(), feed.view().cards.len());

        page.apply(&feed.filter(Filter::Category("python".to_string()))).unwrap();
        assert_eq!(page.card_count(), 0);
        assert!(!page.load_more_visible());
    }

    #[test]
    fn filter_bar_marks_active_key() {
        let page = Page::new(filters());
        let html = page.to_html(&Filter::Category("python".to_string())).unwrap();
        assert!(html.contains(r#"<button class="filter-btn" data-filter="all">all</button>"#));
        assert!(html.contains(r#"<button class="filter-btn active" data-filter="python">python</button>"#));
        assert!(html.contains(r#"<div id="projects-container" class="projects-grid">"#));
    }
}
