use crate::browser::Browser;
use crate::error::CrawlError;
use crate::parsers::{CompiledSelectors, element_text};
use crate::results::Category;
use crate::utils::resolve_link;
use scraper::Html;
use url::Url;

/// Reads the category links from a loaded root page, in DOM order
pub async fn discover_categories<B: Browser + ?Sized>(
    page: &mut B,
    selectors: &CompiledSelectors,
) -> Result<Vec<Category>, CrawlError> {
    let html = page.source().await?;
    let base = page.current_url().await?;
    Ok(parse_categories(&html, &base, selectors))
}

/// Parses category links out of an HTML snapshot
pub fn parse_categories(html: &str, base: &Url, selectors: &CompiledSelectors) -> Vec<Category> {
    let doc = Html::parse_document(html);
    doc.select(&selectors.category_link)
        .map(|link| {
            let href = link.value().attr("href").unwrap_or_default();
            Category::new(element_text(link), resolve_link(base, href))
        })
        .collect()
}
