use serde::{Deserialize, Serialize};

/// A category page discovered on the root listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Visible link text, trimmed
    pub title: String,

    /// Absolute URL of the category listing (identity of the category)
    pub url: String,
}

impl Category {
    /// Create a new category
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// A single job listing extracted from a rendered card
///
/// Every field falls back to an empty value when its element is missing from the card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub title: String,
    pub link: String,
    pub description: String,
    pub hourly_rate: String,
    pub hours_needed: String,
    pub duration: String,
    pub expert_level: String,
    pub skills: Vec<String>,
}

/// All records collected for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResult {
    /// Category title as shown on the root page
    pub category: String,

    /// Deduplicated records in first-seen order
    pub jobs: Vec<JobRecord>,
}

impl CategoryResult {
    pub fn new(category: impl Into<String>, jobs: Vec<JobRecord>) -> Self {
        Self {
            category: category.into(),
            jobs,
        }
    }
}

/// Output of a full run: one entry per crawled category, in discovery order
///
/// Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CrawlReport {
    pub categories: Vec<CategoryResult>,
}

impl CrawlReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finished category
    pub fn push(&mut self, result: CategoryResult) {
        self.categories.push(result);
    }

    /// Number of crawled categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of records across all categories
    pub fn total_jobs(&self) -> usize {
        self.categories.iter().map(|c| c.jobs.len()).sum()
    }
}
