use farescope_core::itinerary::RawItinerary;
use farescope_core::repository::ItinerarySource;
use farescope_core::search::SearchCriteria;

use crate::filter::{FilterConfig, FilterEngine, FilterUpdate};
use crate::normalize::normalize;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsState {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Drives one results session: load -> normalize/filter -> paginate.
/// Load failures land in `Failed` with an empty result set and are
/// recoverable by calling `load` again; they are never returned as errors.
pub struct ResultsController {
    criteria: SearchCriteria,
    engine: FilterEngine,
    state: ResultsState,
    all: Vec<RawItinerary>,
    /// Indices into `all`, recomputed in full on every config change.
    filtered: Vec<usize>,
    current_page: usize,
    page_size: usize,
    last_error: Option<String>,
}

impl ResultsController {
    /// The criteria context is handed in explicitly by the search stage and
    /// seeds the initial filter state (non-stop toggle, preferred airline,
    /// transit airport to avoid).
    pub fn new(criteria: SearchCriteria) -> Self {
        Self::with_page_size(criteria, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(criteria: SearchCriteria, page_size: usize) -> Self {
        let config = FilterConfig::from_criteria(&criteria);
        Self {
            criteria,
            engine: FilterEngine::new(config),
            state: ResultsState::Idle,
            all: Vec::new(),
            filtered: Vec::new(),
            current_page: 1,
            page_size: page_size.max(1),
            last_error: None,
        }
    }

    pub fn state(&self) -> ResultsState {
        self.state
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn filter_config(&self) -> &FilterConfig {
        self.engine.config()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Fetches the itinerary collection. Retry after a failure re-enters
    /// `Loading`; a successful fetch idempotently replaces the collection.
    pub async fn load(&mut self, source: &dyn ItinerarySource) {
        self.state = ResultsState::Loading;

        match source.fetch_itineraries().await {
            Ok(itineraries) => {
                tracing::info!("Loaded {} itineraries", itineraries.len());
                self.all = itineraries;
                self.last_error = None;
                self.state = ResultsState::Ready;
                self.recompute();
            }
            Err(e) => {
                tracing::error!("Itinerary load failed: {}", e);
                self.all.clear();
                self.filtered.clear();
                self.current_page = 1;
                self.last_error = Some(e.to_string());
                self.state = ResultsState::Failed;
            }
        }
    }

    /// Merges a partial filter change and recomputes the filtered set from
    /// scratch. The page resets to 1.
    pub fn update_filter(&mut self, update: FilterUpdate) {
        self.engine.apply(update);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.filtered = self
            .all
            .iter()
            .enumerate()
            .filter(|(_, itin)| self.engine.passes(&normalize(itin)))
            .map(|(i, _)| i)
            .collect();
        self.current_page = 1;
        tracing::debug!(
            "Filter pass kept {} of {} itineraries",
            self.filtered.len(),
            self.all.len()
        );
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn filtered(&self) -> Vec<&RawItinerary> {
        self.filtered.iter().map(|&i| &self.all[i]).collect()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        self.filtered.len().div_ceil(self.page_size).max(1)
    }

    /// Moves to page `n` (1-based). Out-of-range requests are silently
    /// ignored and the current page stays put.
    pub fn set_page(&mut self, n: usize) {
        if n >= 1 && n <= self.total_pages() {
            self.current_page = n;
        }
    }

    /// The current page's slice of the filtered set.
    pub fn page(&self) -> Vec<&RawItinerary> {
        let start = (self.current_page - 1) * self.page_size;
        self.filtered
            .iter()
            .skip(start)
            .take(self.page_size)
            .map(|&i| &self.all[i])
            .collect()
    }
}
