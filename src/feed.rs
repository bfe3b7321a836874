use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::category::{categorize, CategoryRule};
use crate::config::FeedConfig;
use crate::error::FeedError;
use crate::project::{LanguageColors, Project};

/// Reveal delay between consecutive cards of one render, in seconds.
pub const STAGGER_SECS: f64 = 0.1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Filter {
    All,
    Category(String),
}

impl Filter {
    pub fn admits(&self, categories: &[String]) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(tag) => categories.iter().any(|c| c == tag),
        }
    }
}

impl FromStr for Filter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "all" => Filter::All,
            tag => Filter::Category(tag.to_string()),
        })
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("all"),
            Filter::Category(tag) => f.write_str(tag),
        }
    }
}

/// Everything needed to draw one project card.
#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    pub project: Project,
    pub categories: Vec<String>,
    pub color: String,
    /// Position within the render that produced the card.
    pub position: usize,
}

impl Card {
    pub fn delay_secs(&self) -> f64 {
        self.position as f64 * STAGGER_SECS
    }
}

/// What the display has to do after a feed operation.
#[derive(Clone, Debug, PartialEq)]
pub enum Update {
    /// Clear the container, then show `cards`.
    Replace { cards: Vec<Card>, load_more: bool },
    /// Add `cards` after the ones already shown.
    Append { cards: Vec<Card>, load_more: bool },
    /// Project data could not be loaded; show the single fallback card.
    Unavailable { profile_url: String },
}

impl Update {
    pub fn load_more_visible(&self) -> bool {
        match self {
            Update::Replace { load_more, .. } | Update::Append { load_more, .. } => *load_more,
            Update::Unavailable { .. } => false,
        }
    }
}

/// The visible state as a pure function of list, filter and displayed-count.
#[derive(Clone, Debug, PartialEq)]
pub struct View {
    pub cards: Vec<Card>,
    pub total: usize,
    pub load_more: bool,
}

/// Page-lifetime state of the project panel. The project list is fixed at
/// construction; filter and load-more only move the window over it.
#[derive(Clone, Debug)]
pub struct Feed {
    projects: Vec<Project>,
    displayed: usize,
    filter: Filter,
    page_size: usize,
    rules: Vec<CategoryRule>,
    colors: LanguageColors,
    unavailable: Option<String>,
}

impl Feed {
    pub fn new(projects: Vec<Project>, config: &FeedConfig) -> Self {
        Feed {
            projects,
            displayed: 0,
            filter: Filter::All,
            page_size: config.page_size.max(1),
            rules: config.categories.clone(),
            colors: config.colors.clone(),
            unavailable: None,
        }
    }

    /// Builds the feed from the outcome of the single fetch and returns the
    /// first render: page one of everything, or the fallback card.
    pub fn from_fetch(
        fetched: Result<Vec<Project>, FeedError>,
        config: &FeedConfig,
    ) -> (Self, Update) {
        match fetched {
            Ok(projects) => {
                let mut feed = Feed::new(projects, config);
                let update = feed.filter(Filter::All);
                (feed, update)
            }
            Err(e) => {
                log::error!("Error fetching projects for {}: {}", config.account, e);
                let mut feed = Feed::new(Vec::new(), config);
                let profile_url = config.profile_url();
                feed.unavailable = Some(profile_url.clone());
                (feed, Update::Unavailable { profile_url })
            }
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn displayed(&self) -> usize {
        self.displayed
    }

    pub fn active_filter(&self) -> &Filter {
        &self.filter
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn is_unavailable(&self) -> bool {
        self.unavailable.is_some()
    }

    pub fn categories(&self, project: &Project) -> Vec<String> {
        categorize(project, &self.rules)
    }

    /// Projects admitted by the active filter, in fetch order.
    pub fn active_view(&self) -> Vec<&Project> {
        self.select(&self.filter)
    }

    pub fn select(&self, filter: &Filter) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|p| filter.admits(&self.categories(p)))
            .collect()
    }

    pub fn load_more_visible(&self) -> bool {
        self.displayed < self.active_view().len()
    }

    pub fn view(&self) -> View {
        let active = self.active_view();
        View {
            cards: self.cards(&active[..self.displayed]),
            total: active.len(),
            load_more: self.displayed < active.len(),
        }
    }

    /// Switches the active view and re-renders its first page.
    pub fn filter(&mut self, filter: Filter) -> Update {
        if let Some(profile_url) = &self.unavailable {
            return Update::Unavailable {
                profile_url: profile_url.clone(),
            };
        }

        self.filter = filter;
        let active = self.active_view();
        let shown = self.page_size.min(active.len());
        let cards = self.cards(&active[..shown]);
        let load_more = shown < active.len();
        self.displayed = shown;

        Update::Replace { cards, load_more }
    }

    /// Appends the next page of the active view. A no-op once exhausted.
    pub fn load_more(&mut self) -> Update {
        if let Some(profile_url) = &self.unavailable {
            return Update::Unavailable {
                profile_url: profile_url.clone(),
            };
        }

        let active = self.active_view();
        let start = self.displayed.min(active.len());
        let end = (start + self.page_size).min(active.len());
        let cards = self.cards(&active[start..end]);
        let load_more = end < active.len();
        self.displayed = end;

        Update::Append { cards, load_more }
    }

    fn cards(&self, projects: &[&Project]) -> Vec<Card> {
        projects
            .iter()
            .enumerate()
            .map(|(position, project)| Card {
                project: (*project).clone(),
                categories: self.categories(project),
                color: self.colors.color_for(&project.language).to_string(),
                position,
            })
            .collect()
    }
}
