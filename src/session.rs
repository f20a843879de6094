//! Interaction state shared by the handlers: the selected place, the visible
//! suggestions, the current result and the two concurrency guards.

use std::{
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use tokio::sync::RwLock;
use tracing::debug;

use crate::{
    places::{
        dto::PlaceCandidate,
        services::{GeocodeError, PlaceSearch},
    },
    view::ViewModel,
};

/// Quiet period before a place query is sent.
pub const DEBOUNCE: Duration = Duration::from_millis(300);
/// Shorter queries clear the suggestions without a network call.
pub const MIN_QUERY_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Fresh(Vec<PlaceCandidate>),
    /// A newer query started before this one finished.
    Superseded,
}

#[derive(Debug, Default)]
pub struct Session {
    selected_place: RwLock<Option<PlaceCandidate>>,
    suggestions: RwLock<Vec<PlaceCandidate>>,
    current: RwLock<Option<Arc<ViewModel>>>,
    search_generation: AtomicU64,
    calculating: AtomicBool,
}

/// Held for the duration of one calculation; clears the in-flight flag on drop.
#[derive(Debug)]
pub struct CalculationGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for CalculationGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl Session {
    fn is_latest(&self, generation: u64) -> bool {
        self.search_generation.load(Ordering::SeqCst) == generation
    }

    /// Debounced place search. Only the latest query may update the visible
    /// suggestions; older ones report [`SearchOutcome::Superseded`].
    pub async fn search_places(
        &self,
        geocoder: &dyn PlaceSearch,
        query: &str,
    ) -> Result<SearchOutcome, GeocodeError> {
        let generation = self.search_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            self.suggestions.write().await.clear();
            return Ok(SearchOutcome::Fresh(Vec::new()));
        }

        tokio::time::sleep(DEBOUNCE).await;
        if !self.is_latest(generation) {
            debug!(generation, query, "place query superseded during debounce");
            return Ok(SearchOutcome::Superseded);
        }

        let result = geocoder.search(query).await;
        if !self.is_latest(generation) {
            debug!(generation, query, "place response arrived after a newer query");
            return Ok(SearchOutcome::Superseded);
        }
        let candidates = result?;
        *self.suggestions.write().await = candidates.clone();
        Ok(SearchOutcome::Fresh(candidates))
    }

    pub async fn suggestions(&self) -> Vec<PlaceCandidate> {
        self.suggestions.read().await.clone()
    }

    /// Replaces any earlier selection and closes the suggestion list.
    pub async fn select_place(&self, candidate: PlaceCandidate) {
        *self.selected_place.write().await = Some(candidate);
        self.suggestions.write().await.clear();
    }

    pub async fn selected_place(&self) -> Option<PlaceCandidate> {
        self.selected_place.read().await.clone()
    }

    /// `None` while another calculation holds the guard.
    pub fn begin_calculation(&self) -> Option<CalculationGuard<'_>> {
        self.calculating
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| CalculationGuard {
                flag: &self.calculating,
            })
    }

    pub fn is_calculating(&self) -> bool {
        self.calculating.load(Ordering::Acquire)
    }

    pub async fn store_result(&self, model: ViewModel) -> Arc<ViewModel> {
        let model = Arc::new(model);
        *self.current.write().await = Some(Arc::clone(&model));
        model
    }

    pub async fn current_result(&self) -> Option<Arc<ViewModel>> {
        self.current.read().await.clone()
    }

    /// Returns whether there was a result to clear.
    pub async fn clear_result(&self) -> bool {
        self.current.write().await.take().is_some()
    }
}
