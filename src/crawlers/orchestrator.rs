use crate::browser::{Browser, WebDriverSession};
use crate::config::{CrawlConfig, RevealTimeoutPolicy};
use crate::crawlers::navigate_with_retry;
use crate::crawlers::pagination::{PaginationController, PaginationSettings};
use crate::error::CrawlError;
use crate::filter::CategoryFilter;
use crate::output;
use crate::parsers::CompiledSelectors;
use crate::parsers::categories::discover_categories;
use crate::results::{CategoryResult, CrawlReport};

/// Runs a complete crawl on a fresh WebDriver session and writes the report
pub async fn run(config: &CrawlConfig) -> Result<CrawlReport, CrawlError> {
    ::log::info!("Starting crawl of {}", config.root_url);

    let mut session = WebDriverSession::connect(&config.webdriver_url, config.headless).await?;
    run_with(&mut session, config).await
}

/// Crawls with `session`, closes it, then writes the report to `config.output_path`
///
/// The session is closed whether or not the crawl succeeds. Nothing is written when the
/// crawl fails.
pub async fn run_with<B: Browser + ?Sized>(
    session: &mut B,
    config: &CrawlConfig,
) -> Result<CrawlReport, CrawlError> {
    let result = crawl(&mut *session, config).await;

    if let Err(e) = session.close().await {
        ::log::warn!("Failed to close browser session: {}", e);
    }

    let report = result?;
    output::write_report(&report, &config.output_path)?;
    ::log::info!(
        "Wrote {} categories ({} jobs) to {}",
        report.len(),
        report.total_jobs(),
        config.output_path.display()
    );
    Ok(report)
}

/// Discovers categories on the root page and drains each one in order
pub async fn crawl<B: Browser + ?Sized>(
    page: &mut B,
    config: &CrawlConfig,
) -> Result<CrawlReport, CrawlError> {
    config.validate()?;
    let selectors = CompiledSelectors::compile(&config.selectors)?;
    let filter = CategoryFilter::new(&config.include_patterns, &config.exclude_patterns)?;
    let settings = PaginationSettings::from_config(config);

    navigate_with_retry(
        &mut *page,
        &config.root_url,
        &settings.navigation,
        config.navigation_attempts,
    )
    .await?;

    let discovered = discover_categories(&mut *page, &selectors).await?;
    ::log::info!("Discovered {} categories", discovered.len());

    let categories = filter
        .apply(discovered)
        .into_iter()
        .take(config.max_categories)
        .collect::<Vec<_>>();

    let mut report = CrawlReport::new();
    for category in &categories {
        ::log::info!("Crawling category: {}", category.title);

        let mut controller = PaginationController::new(&mut *page, category, &selectors, &settings);
        let jobs = match controller.run().await {
            Ok(()) => controller.into_records(),
            Err(e)
                if e.is_reveal_timeout()
                    && config.on_reveal_timeout == RevealTimeoutPolicy::KeepPartial =>
            {
                ::log::warn!("{}; keeping {} records", e, controller.records().len());
                controller.into_records()
            }
            Err(e) => return Err(e),
        };

        ::log::info!("Collected {} jobs from {}", jobs.len(), category.title);
        report.push(CategoryResult::new(category.title.clone(), jobs));
    }

    ::log::info!("Crawl finished: {} categories", report.len());
    Ok(report)
}
