use crate::config::FeedConfig;
use crate::feed::{Feed, Filter, Update};
use crate::github::fetch_projects;

/// A feed after the fetch and the requested clicks, with every display
/// update in the order it happened.
pub struct Session {
    pub feed: Feed,
    pub updates: Vec<Update>,
}

/// Selects `filter`, then presses load-more up to `more` times. Clicks stop
/// once the button is hidden.
pub fn replay(feed: &mut Feed, filter: Filter, more: usize) -> Vec<Update> {
    let mut updates = Vec::new();
    if feed.is_unavailable() {
        return updates;
    }
    if &filter != feed.active_filter() {
        updates.push(feed.filter(filter));
    }
    for _ in 0..more {
        if !feed.load_more_visible() {
            break;
        }
        updates.push(feed.load_more());
    }
    updates
}

pub async fn open(config: &FeedConfig, filter: Filter, more: usize) -> Session {
    let fetched = fetch_projects(config).await;
    let (mut feed, first) = Feed::from_fetch(fetched, config);
    let mut updates = vec![first];
    updates.extend(replay(&mut feed, filter, more));
    Session { feed, updates }
}
