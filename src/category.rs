use itertools::Itertools;
use serde_derive::{Deserialize, Serialize};

use crate::project::Project;

/// Tag given to projects no rule matches.
pub const OTHER: &str = "other";

/// One row of the keyword table. A project gets `tag` when any keyword is a
/// substring of its lowercased text, or when its language is listed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CategoryRule {
    pub tag: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
    /// Tags that come along whenever this rule matches.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implies: Vec<String>,
}

impl CategoryRule {
    fn new(tag: &str, keywords: &[&str]) -> Self {
        CategoryRule {
            tag: tag.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            languages: Vec::new(),
            implies: Vec::new(),
        }
    }

    fn matches(&self, content: &str, language: &str) -> bool {
        self.languages.iter().any(|l| l == language)
            || self
                .keywords
                .iter()
                .filter(|k| !k.is_empty())
                .any(|k| content.contains(&k.to_lowercase()))
    }
}

pub fn default_rules() -> Vec<CategoryRule> {
    let mut deep_learning = CategoryRule::new(
        "deep-learning",
        &["deep learning", "neural", "tensorflow", "pytorch", "keras"],
    );
    deep_learning.implies = vec!["machine-learning".to_string()];

    let mut python = CategoryRule::new("python", &["python"]);
    python.languages = vec!["Python".to_string()];

    vec![
        CategoryRule::new(
            "machine-learning",
            &[
                "machine learning",
                "ml",
                "sklearn",
                "classification",
                "regression",
            ],
        ),
        deep_learning,
        CategoryRule::new(
            "gen-ai",
            &["gen ai", "generative", "gpt", "llm", "chatbot"],
        ),
        python,
    ]
}

fn searchable_text(project: &Project) -> String {
    format!(
        "{} {} {}",
        project.name,
        project.description,
        project.topics.join(" ")
    )
    .to_lowercase()
}

/// Tags for `project`, each once, in table order. Never empty.
pub fn categorize(project: &Project, rules: &[CategoryRule]) -> Vec<String> {
    let content = searchable_text(project);

    let mut tags: Vec<&str> = rules
        .iter()
        .filter(|rule| rule.matches(&content, &project.language))
        .flat_map(|rule| std::iter::once(&rule.tag).chain(rule.implies.iter()))
        .map(String::as_str)
        .collect();

    // implied tags without a rule of their own sort last
    tags.sort_by_key(|tag| {
        rules
            .iter()
            .position(|rule| rule.tag == *tag)
            .unwrap_or(rules.len())
    });

    let tags: Vec<String> = tags.into_iter().unique().map(String::from).collect();
    if tags.is_empty() {
        vec![OTHER.to_string()]
    } else {
        tags
    }
}

/// Every tag `categorize` can produce with `rules`, in table order.
pub fn known_tags(rules: &[CategoryRule]) -> Vec<String> {
    rules
        .iter()
        .flat_map(|rule| std::iter::once(&rule.tag).chain(rule.implies.iter()))
        .map(String::as_str)
        .chain(std::iter::once(OTHER))
        .unique()
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::project;

    fn tags(name: &str, description: &str, language: &str, topics: &[&str]) -> Vec<String> {
        categorize(&project(name, description, language, topics), &default_rules())
    }

    #[test]
    fn deep_learning_python_project() {
        let t = tags("nn-trainer", "deep learning image classifier", "Python", &[]);
        assert_eq!(t, vec!["machine-learning", "deep-learning", "python"]);
    }

    #[test]
    fn unmatched_project_is_other() {
        assert_eq!(tags("cli-tool", "a utility", "Go", &[]), vec![OTHER]);
    }

    #[test]
    fn python_language_alone_is_enough() {
        assert_eq!(tags("scraper", "fetches pages", "Python", &[]), vec!["python"]);
    }

    #[test]
    fn topics_and_case_are_searched() {
        let t = tags("Assistant", "Talks back", "TypeScript", &["ChatBot", "LLM"]);
        assert_eq!(t, vec!["gen-ai"]);
        let t = tags("GPT-Notes", "", "Rust", &[]);
        assert_eq!(t, vec!["gen-ai"]);
    }

    #[test]
    fn short_keywords_match_inside_words() {
        // "html" contains "ml"
        assert_eq!(tags("site", "plain html page", "HTML", &[]), vec!["machine-learning"]);
    }

    #[test]
    fn categorize_is_deterministic() {
        let p = project("llm-bench", "neural regression with python", "Python", &["gpt"]);
        let rules = default_rules();
        let first = categorize(&p, &rules);
        assert_eq!(first, categorize(&p, &rules));
        assert_eq!(
            first,
            vec!["machine-learning", "deep-learning", "gen-ai", "python"]
        );
    }

    #[test]
    fn custom_rules_and_orphan_implications() {
        let rules = vec![CategoryRule {
            tag: "web".to_string(),
            keywords: vec!["React".to_string(), "".to_string()],
            languages: vec![],
            implies: vec!["frontend".to_string()],
        }];
        let p = project("dash", "a react dashboard", "JavaScript", &[]);
        assert_eq!(categorize(&p, &rules), vec!["web", "frontend"]);
        // an empty keyword never matches
        let p = project("x", "y", "Go", &[]);
        assert_eq!(categorize(&p, &rules), vec![OTHER]);
        assert_eq!(known_tags(&rules), vec!["web", "frontend", OTHER]);
    }

    #[test]
    fn known_tags_of_default_table() {
        assert_eq!(
            known_tags(&default_rules()),
            vec!["machine-learning", "deep-learning", "gen-ai", "python", OTHER]
        );
    }
}
