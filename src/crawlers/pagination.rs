//! The "load more" loop for a single category
//!
//! ```text
//! InitialLoad --(navigate, extract)--> Stable --(no reveal element)--> Exhausted
//!                                        ^  |
//!                                        |  (click, wait for cards, settle, extract, merge)
//!                                        +--+
//! ```

use crate::browser::Browser;
use crate::config::{CrawlConfig, NavigationWait};
use crate::crawlers::navigate_with_retry;
use crate::error::{BrowserError, CrawlError};
use crate::parsers::CompiledSelectors;
use crate::parsers::cards::extract_visible_records;
use crate::results::{Category, JobRecord};
use std::collections::HashSet;
use std::time::Duration;

/// Where the controller is in its load / reveal cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationState {
    /// Category page not loaded yet
    InitialLoad,
    /// Page loaded; more results may be revealed
    Stable,
    /// The reveal element is gone; nothing left to load
    Exhausted,
}

/// Timing and selector settings for the reveal loop
#[derive(Debug, Clone)]
pub struct PaginationSettings {
    pub card_selector: String,
    pub reveal_selector: String,
    pub wait_timeout: Duration,
    pub stabilization_delay: Duration,
    pub navigation: NavigationWait,
    pub navigation_attempts: u32,
}

impl PaginationSettings {
    pub fn from_config(config: &CrawlConfig) -> Self {
        Self {
            card_selector: config.selectors.card.clone(),
            reveal_selector: config.selectors.reveal_more.clone(),
            wait_timeout: config.wait_timeout(),
            stabilization_delay: config.stabilization_delay(),
            navigation: config.navigation_wait(),
            navigation_attempts: config.navigation_attempts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum RecordKey {
    Link(String),
    /// Records without a link are only duplicates of identical records
    Content(JobRecord),
}

impl RecordKey {
    fn of(record: &JobRecord) -> Self {
        if record.link.is_empty() {
            RecordKey::Content(record.clone())
        } else {
            RecordKey::Link(record.link.clone())
        }
    }
}

/// Ordered, duplicate-free collection of records keyed by listing link
///
/// The first instance of a listing wins; later sightings are ignored.
#[derive(Debug, Default)]
pub struct RecordAccumulator {
    seen: HashSet<RecordKey>,
    records: Vec<JobRecord>,
}

impl RecordAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the unseen records from `batch`, returning how many were new
    pub fn merge(&mut self, batch: Vec<JobRecord>) -> usize {
        let before = self.records.len();
        for record in batch {
            if self.seen.insert(RecordKey::of(&record)) {
                self.records.push(record);
            }
        }
        self.records.len() - before
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[JobRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<JobRecord> {
        self.records
    }
}

/// Drives one category from first load until the reveal element disappears
///
/// There is no cap on reveal cycles: the loop ends only when the page stops offering more.
pub struct PaginationController<'a, B: Browser + ?Sized> {
    page: &'a mut B,
    category: &'a Category,
    selectors: &'a CompiledSelectors,
    settings: &'a PaginationSettings,
    state: PaginationState,
    records: RecordAccumulator,
    reveal_cycles: usize,
}

impl<'a, B: Browser + ?Sized> PaginationController<'a, B> {
    pub fn new(
        page: &'a mut B,
        category: &'a Category,
        selectors: &'a CompiledSelectors,
        settings: &'a PaginationSettings,
    ) -> Self {
        Self {
            page,
            category,
            selectors,
            settings,
            state: PaginationState::InitialLoad,
            records: RecordAccumulator::new(),
            reveal_cycles: 0,
        }
    }

    pub fn state(&self) -> PaginationState {
        self.state
    }

    /// Records gathered so far
    pub fn records(&self) -> &[JobRecord] {
        self.records.records()
    }

    /// Number of completed reveal clicks
    pub fn reveal_cycles(&self) -> usize {
        self.reveal_cycles
    }

    /// Gathered records, including those from a run that stopped on an error
    pub fn into_records(self) -> Vec<JobRecord> {
        self.records.into_records()
    }

    /// Run until exhausted
    pub async fn run(&mut self) -> Result<(), CrawlError> {
        while self.step().await? != PaginationState::Exhausted {}

        ::log::debug!(
            "Category {} exhausted after {} reveal cycles with {} records",
            self.category.title,
            self.reveal_cycles,
            self.records.len()
        );
        Ok(())
    }

    /// Perform one transition and return the new state
    ///
    /// On error the state and the records gathered so far are left untouched.
    pub async fn step(&mut self) -> Result<PaginationState, CrawlError> {
        self.state = match self.state {
            PaginationState::InitialLoad => {
                self.initial_load().await?;
                PaginationState::Stable
            }
            PaginationState::Stable => self.reveal().await?,
            PaginationState::Exhausted => PaginationState::Exhausted,
        };
        Ok(self.state)
    }

    async fn initial_load(&mut self) -> Result<(), CrawlError> {
        navigate_with_retry(
            &mut *self.page,
            &self.category.url,
            &self.settings.navigation,
            self.settings.navigation_attempts,
        )
        .await?;

        let batch = extract_visible_records(&mut *self.page, self.selectors).await?;
        let added = self.records.merge(batch);
        ::log::debug!("Initial load of {} found {} records", self.category.url, added);
        Ok(())
    }

    async fn reveal(&mut self) -> Result<PaginationState, CrawlError> {
        let Some(reveal) = self.page.find(&self.settings.reveal_selector).await? else {
            return Ok(PaginationState::Exhausted);
        };

        self.page.click(reveal).await?;

        match self
            .page
            .wait_for(&self.settings.card_selector, self.settings.wait_timeout)
            .await
        {
            Ok(()) => {}
            Err(BrowserError::Timeout { timeout_ms, .. }) => {
                return Err(CrawlError::RevealTimeout {
                    category: self.category.title.clone(),
                    timeout_ms,
                });
            }
            Err(e) => return Err(e.into()),
        }

        self.page.sleep(self.settings.stabilization_delay).await;

        let batch = extract_visible_records(&mut *self.page, self.selectors).await?;
        let seen = batch.len();
        let added = self.records.merge(batch);
        self.reveal_cycles += 1;
        ::log::debug!(
            "Reveal cycle {} for {}: {} cards rendered, {} new",
            self.reveal_cycles,
            self.category.title,
            seen,
            added
        );

        Ok(PaginationState::Stable)
    }
}
