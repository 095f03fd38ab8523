//! Superseding search session.
//!
//! A UI that re-runs a search (refresh, moved location) must not let a slow
//! earlier run overwrite the newer result set. [`SearchSession`] cancels the
//! previous run whenever a new one starts; the superseded call resolves to
//! [`PlacesError::Cancelled`].

use std::sync::{Mutex, PoisonError};

use nearby_core::{PlaceRecord, SearchQuery};
use tokio_util::sync::CancellationToken;

use crate::aggregate::{Aggregator, NearbySearch};
use crate::error::PlacesError;

pub struct SearchSession<S> {
    aggregator: Aggregator<S>,
    current: Mutex<CancellationToken>,
}

impl<S: NearbySearch> SearchSession<S> {
    #[must_use]
    pub fn new(aggregator: Aggregator<S>) -> Self {
        Self {
            aggregator,
            current: Mutex::new(CancellationToken::new()),
        }
    }

    #[must_use]
    pub fn aggregator(&self) -> &Aggregator<S> {
        &self.aggregator
    }

    /// Runs `query`, cancelling whatever search this session had in flight.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Cancelled`] if another search started on this session
    ///   before this one finished.
    /// - Any error from [`Aggregator::aggregate`].
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<PlaceRecord>, PlacesError> {
        let token = self.begin();

        tokio::select! {
            biased;
            () = token.cancelled() => {
                tracing::debug!("search superseded before completion");
                Err(PlacesError::Cancelled)
            }
            result = self.aggregator.aggregate(query) => {
                if token.is_cancelled() {
                    return Err(PlacesError::Cancelled);
                }
                result
            }
        }
    }

    /// Cancels the in-flight search, if any.
    pub fn cancel(&self) {
        self.lock().cancel();
    }

    fn begin(&self) -> CancellationToken {
        let mut current = self.lock();
        current.cancel();
        *current = CancellationToken::new();
        current.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CancellationToken> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
