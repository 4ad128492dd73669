use crate::browser::Browser;
use crate::error::CrawlError;
use crate::parsers::{CompiledSelectors, all_texts, attr_or_default, text_or_default};
use crate::results::JobRecord;
use crate::utils::resolve_link;
use scraper::{ElementRef, Html};
use url::Url;

/// Extracts a record from every listing card currently rendered in `page`
///
/// Takes a single snapshot of the DOM and does no waiting.
pub async fn extract_visible_records<B: Browser + ?Sized>(
    page: &mut B,
    selectors: &CompiledSelectors,
) -> Result<Vec<JobRecord>, CrawlError> {
    let html = page.source().await?;
    let base = page.current_url().await?;
    Ok(parse_cards(&html, &base, selectors))
}

/// Parses all listing cards out of an HTML snapshot
pub fn parse_cards(html: &str, base: &Url, selectors: &CompiledSelectors) -> Vec<JobRecord> {
    let doc = Html::parse_document(html);
    let records = doc
        .select(&selectors.card)
        .map(|card| parse_card(card, base, selectors))
        .collect::<Vec<_>>();

    ::log::debug!("Extracted {} records from rendered cards", records.len());
    records
}

/// Maps one card to a record, defaulting any field whose element is missing
pub fn parse_card(card: ElementRef<'_>, base: &Url, selectors: &CompiledSelectors) -> JobRecord {
    let href = attr_or_default(card, &selectors.title, "href");

    JobRecord {
        title: text_or_default(card, &selectors.title),
        link: resolve_link(base, &href),
        description: text_or_default(card, &selectors.description),
        hourly_rate: text_or_default(card, &selectors.hourly_rate),
        hours_needed: text_or_default(card, &selectors.hours_needed),
        duration: text_or_default(card, &selectors.duration),
        expert_level: text_or_default(card, &selectors.expert_level),
        skills: all_texts(card, &selectors.skill),
    }
}
