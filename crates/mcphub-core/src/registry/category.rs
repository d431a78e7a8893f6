//! Heuristic category derivation
//!
//! Derives a coarse display category from a server's name and description.
//! The rule table is ordered and the first match wins, so a record matching
//! both the Dev Tools and Database vocabularies lands in Dev Tools.

use lazy_static::lazy_static;
use regex::Regex;

use super::types::McpServer;

/// Category assigned when no rule matches
pub const DEFAULT_CATEGORY: &str = "General";

lazy_static! {
    /// Ordered (pattern, label) rules; order is part of the contract.
    static ref CATEGORY_RULES: Vec<(Regex, &'static str)> = [
        (r"github|gitlab|git\b|version control|repository", "Dev Tools"),
        (r"database|postgres|mysql|sqlite|sql|mongo|redis", "Database"),
        (r"search|web|browser|fetch|crawl|scrape", "Web & Search"),
        (r"file|filesystem|storage|s3|blob", "Files & Storage"),
        (r"slack|discord|email|gmail|calendar|notion|linear|jira", "Productivity"),
        (r"aws|azure|gcp|cloud|kubernetes|docker", "Cloud & Infra"),
        (r"ai|llm|openai|anthropic|image|vision|audio", "AI & ML"),
        (r"finance|payment|stripe|crypto|blockchain", "Finance"),
        (r"map|location|geo|weather", "Data & APIs"),
        (r"memory|knowledge|graph", "Memory"),
    ]
    .into_iter()
    .map(|(pattern, label)| (Regex::new(pattern).expect("invalid category pattern"), label))
    .collect();
}

/// Derive the display category for a name + description pair.
///
/// Total function: always returns a label, defaulting to
/// [`DEFAULT_CATEGORY`]. Deterministic for identical text.
pub fn derive_category(name: &str, description: &str) -> &'static str {
    let text = format!("{} {}", name, description).to_lowercase();
    for (pattern, label) in CATEGORY_RULES.iter() {
        if pattern.is_match(&text) {
            return label;
        }
    }
    DEFAULT_CATEGORY
}

impl McpServer {
    /// Assign the derived category in place.
    pub fn categorize(&mut self) {
        self.category = Some(derive_category(&self.name, &self.description).to_string());
    }
}
