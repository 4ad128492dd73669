use crate::error::ConfigError;
use crate::results::Category;
use regex::Regex;
use std::collections::HashSet;

/// Decides which discovered categories are worth crawling
///
/// Exclude patterns take precedence over include patterns. A category whose URL was already
/// accepted is dropped, since the URL is what identifies a category.
#[derive(Debug, Default)]
pub struct CategoryFilter {
    include_regexes: Vec<Regex>,
    exclude_regexes: Vec<Regex>,
}

impl CategoryFilter {
    /// Compile include and exclude patterns
    pub fn new(include_patterns: &[String], exclude_patterns: &[String]) -> Result<Self, ConfigError> {
        Ok(Self {
            include_regexes: compile_all(include_patterns)?,
            exclude_regexes: compile_all(exclude_patterns)?,
        })
    }

    /// Whether a single category URL passes the patterns
    pub fn allows(&self, url: &str) -> bool {
        if self.exclude_regexes.iter().any(|regex| regex.is_match(url)) {
            return false;
        }

        self.include_regexes.is_empty() || self.include_regexes.iter().any(|r| r.is_match(url))
    }

    /// Keep allowed categories with distinct URLs, preserving discovery order
    pub fn apply(&self, categories: Vec<Category>) -> Vec<Category> {
        let mut seen = HashSet::new();
        categories
            .into_iter()
            .filter(|category| {
                if !self.allows(&category.url) {
                    ::log::debug!("Category filter rejected: {}", category.url);
                    return false;
                }
                if !seen.insert(category.url.clone()) {
                    ::log::debug!("Skipping duplicate category: {}", category.url);
                    return false;
                }
                true
            })
            .collect()
    }
}

fn compile_all(patterns: &[String]) -> Result<Vec<Regex>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}
