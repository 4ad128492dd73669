pub mod cards;
pub mod categories;

#[cfg(test)]
mod tests;

use crate::config::SelectorConfig;
use crate::error::ConfigError;
use crate::utils::collapse_whitespace;
use scraper::{ElementRef, Selector};

/// Selectors compiled once per run
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub category_link: Selector,
    pub card: Selector,
    pub title: Selector,
    pub description: Selector,
    pub hourly_rate: Selector,
    pub hours_needed: Selector,
    pub duration: Selector,
    pub expert_level: Selector,
    pub skill: Selector,
}

impl CompiledSelectors {
    /// Compile every selector in `config`
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            category_link: compile("category_link", &config.category_link)?,
            card: compile("card", &config.card)?,
            title: compile("title", &config.title)?,
            description: compile("description", &config.description)?,
            hourly_rate: compile("hourly_rate", &config.hourly_rate)?,
            hours_needed: compile("hours_needed", &config.hours_needed)?,
            duration: compile("duration", &config.duration)?,
            expert_level: compile("expert_level", &config.expert_level)?,
            skill: compile("skill", &config.skill)?,
        })
    }
}

fn compile(field: &'static str, selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|_| ConfigError::InvalidSelector {
        field,
        selector: selector.to_string(),
    })
}

/// Whitespace-collapsed text of an element
///
/// Text nodes are concatenated as-is, so inline markup does not introduce spaces.
pub fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Text of the first descendant matching `selector`, or `""` when there is none
pub fn text_or_default(parent: ElementRef<'_>, selector: &Selector) -> String {
    parent
        .select(selector)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

/// Attribute of the first descendant matching `selector`, or `""`
pub fn attr_or_default(parent: ElementRef<'_>, selector: &Selector, attr: &str) -> String {
    parent
        .select(selector)
        .next()
        .and_then(|e| e.value().attr(attr))
        .map(str::to_string)
        .unwrap_or_default()
}

/// Text of every descendant matching `selector`, in document order
pub fn all_texts(parent: ElementRef<'_>, selector: &Selector) -> Vec<String> {
    parent.select(selector).map(element_text).collect()
}
