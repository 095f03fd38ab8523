//! Multi-category nearby search.
//!
//! The upstream API accepts one place type per call, so a search over N
//! categories issues N calls. They are polled concurrently and joined before
//! anything is aggregated; the joined results are then de-duplicated by place
//! id, enriched with their distance from the query origin, and ordered by
//! rating.

use std::collections::HashMap;
use std::future::Future;

use futures::future::join_all;
use nearby_core::{Category, Coordinate, PlaceRecord, SearchQuery, SortKey};

use crate::client::PlacesClient;
use crate::error::PlacesError;

/// Source of single-category nearby results.
pub trait NearbySearch {
    fn search_nearby(
        &self,
        origin: Coordinate,
        radius_meters: u32,
        category: Category,
    ) -> impl Future<Output = Result<Vec<PlaceRecord>, PlacesError>> + Send;
}

impl NearbySearch for PlacesClient {
    fn search_nearby(
        &self,
        origin: Coordinate,
        radius_meters: u32,
        category: Category,
    ) -> impl Future<Output = Result<Vec<PlaceRecord>, PlacesError>> + Send {
        PlacesClient::search_nearby(self, origin, radius_meters, category)
    }
}

/// Fans a [`SearchQuery`] out over its categories and merges the results.
pub struct Aggregator<S> {
    source: S,
}

impl<S: NearbySearch> Aggregator<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self { source }
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Runs one search per category, waits for all of them, and returns the
    /// unique places sorted by rating (highest first).
    ///
    /// **All-or-nothing semantics**: if any category call fails, the whole
    /// aggregation fails and results from the other categories are discarded.
    /// All calls still run to completion first; the error reported is the
    /// first one in category order, so the outcome does not depend on which
    /// response arrived first.
    ///
    /// # Errors
    ///
    /// Propagates the first (in category order) error from
    /// [`NearbySearch::search_nearby`].
    pub async fn aggregate(&self, query: &SearchQuery) -> Result<Vec<PlaceRecord>, PlacesError> {
        if query.categories.is_empty() {
            return Ok(Vec::new());
        }

        let calls = query.categories.iter().map(|&category| async move {
            let result = self
                .source
                .search_nearby(query.origin, query.radius_meters, category)
                .await;
            (category, result)
        });
        let settled = join_all(calls).await;

        let mut combined = Vec::new();
        for (category, result) in settled {
            match result {
                Ok(places) => combined.extend(places),
                Err(err) => {
                    tracing::warn!(%category, error = %err, "category search failed; aborting aggregation");
                    return Err(err);
                }
            }
        }

        let raw_count = combined.len();
        let mut places = dedupe_by_id(combined);
        enrich_with_distance(&mut places, query.origin);
        SortKey::Rating.sort(&mut places);

        tracing::info!(
            categories = query.categories.len(),
            raw_count,
            unique_count = places.len(),
            "aggregated nearby places"
        );
        Ok(places)
    }
}

/// Collapses records sharing an id into the first occurrence, whose
/// `categories` become the union of every duplicate's tags.
pub(crate) fn dedupe_by_id(places: Vec<PlaceRecord>) -> Vec<PlaceRecord> {
    let mut index: HashMap<String, usize> = HashMap::with_capacity(places.len());
    let mut unique: Vec<PlaceRecord> = Vec::with_capacity(places.len());

    for place in places {
        if let Some(&pos) = index.get(&place.id) {
            if let Some(kept) = unique.get_mut(pos) {
                kept.categories.extend(place.categories);
            }
        } else {
            index.insert(place.id.clone(), unique.len());
            unique.push(place);
        }
    }
    unique
}

pub(crate) fn enrich_with_distance(places: &mut [PlaceRecord], origin: Coordinate) {
    for place in places {
        place.distance_meters = Some(origin.distance_to(&place.coordinate));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    enum Script {
        Places(Vec<PlaceRecord>),
        Status(u16),
    }

    /// Scripted source: fixed responses per category, each after a delay.
    struct ScriptedSearch {
        scripts: HashMap<Category, (u64, Script)>,
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl ScriptedSearch {
        fn new(scripts: Vec<(Category, u64, Script)>) -> Self {
            Self {
                scripts: scripts
                    .into_iter()
                    .map(|(c, delay, s)| (c, (delay, s)))
                    .collect(),
                calls: AtomicUsize::new(0),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
            }
        }
    }

    impl NearbySearch for ScriptedSearch {
        fn search_nearby(
            &self,
            _origin: Coordinate,
            _radius_meters: u32,
            category: Category,
        ) -> impl Future<Output = Result<Vec<PlaceRecord>, PlacesError>> + Send {
            async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                self.max_in_flight.fetch_max(now, Ordering::SeqCst);

                let (delay_ms, script) = self
                    .scripts
                    .get(&category)
                    .expect("category should be scripted");
                tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
                self.in_flight.fetch_sub(1, Ordering::SeqCst);

                match script {
                    Script::Places(places) => Ok(places.clone()),
                    Script::Status(status) => Err(PlacesError::RemoteStatus {
                        status: *status,
                        path: format!("/nearby/{category}"),
                    }),
                }
            }
        }
    }

    fn place(id: &str, rating: Option<f64>, lat: f64, lng: f64) -> PlaceRecord {
        let mut p = PlaceRecord::new(id, format!("place {id}"), Coordinate::new(lat, lng));
        p.rating = rating;
        p
    }

    fn tagged(mut p: PlaceRecord, tag: &str) -> PlaceRecord {
        p.categories.insert(tag.to_owned());
        p
    }

    fn amsterdam_query() -> SearchQuery {
        SearchQuery::new(Coordinate::new(52.378, 4.8996), 1000, Category::ALL)
    }

    #[tokio::test]
    async fn merges_dedupes_enriches_and_sorts() {
        let a = place("a", Some(4.0), 52.379, 4.900);
        let b = place("b", Some(4.7), 52.375, 4.895);
        let c = place("c", None, 52.372, 4.890);
        let source = ScriptedSearch::new(vec![
            (Category::Bar, 5, Script::Places(vec![tagged(a.clone(), "bar")])),
            (
                Category::Cafe,
                1,
                Script::Places(vec![tagged(a, "cafe"), tagged(b, "cafe")]),
            ),
            (Category::Restaurant, 3, Script::Places(vec![c])),
        ]);

        let places = Aggregator::new(source)
            .aggregate(&amsterdam_query())
            .await
            .expect("aggregation should succeed");

        let ids: Vec<&str> = places.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert!(places.iter().all(|p| p.distance_meters.is_some()));

        let a = places.iter().find(|p| p.id == "a").unwrap();
        let tags: Vec<&str> = a.categories.iter().map(String::as_str).collect();
        assert_eq!(tags, vec!["bar", "cafe"]);
    }

    #[tokio::test]
    async fn category_calls_run_concurrently() {
        let source = ScriptedSearch::new(vec![
            (Category::Bar, 20, Script::Places(vec![])),
            (Category::Cafe, 20, Script::Places(vec![])),
            (Category::Restaurant, 20, Script::Places(vec![])),
        ]);
        let aggregator = Aggregator::new(source);
        aggregator.aggregate(&amsterdam_query()).await.unwrap();

        assert_eq!(aggregator.source().calls.load(Ordering::SeqCst), 3);
        assert_eq!(aggregator.source().max_in_flight.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn one_failing_category_fails_the_run_after_all_settle() {
        let source = ScriptedSearch::new(vec![
            (Category::Bar, 1, Script::Status(503)),
            (Category::Cafe, 10, Script::Places(vec![place("b", Some(4.0), 0.0, 0.0)])),
            (Category::Restaurant, 10, Script::Places(vec![])),
        ]);
        let aggregator = Aggregator::new(source);
        let err = aggregator.aggregate(&amsterdam_query()).await.unwrap_err();

        assert_eq!(err.status_code(), Some(503));
        assert_eq!(aggregator.source().calls.load(Ordering::SeqCst), 3);
        assert_eq!(aggregator.source().in_flight.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn reported_error_follows_category_order_not_completion_order() {
        let source = ScriptedSearch::new(vec![
            (Category::Bar, 15, Script::Status(500)),
            (Category::Cafe, 1, Script::Status(429)),
        ]);
        let query = SearchQuery::new(
            Coordinate::new(0.0, 0.0),
            500,
            [Category::Cafe, Category::Bar],
        );
        let err = Aggregator::new(source).aggregate(&query).await.unwrap_err();
        assert_eq!(err.status_code(), Some(500));
    }

    #[tokio::test]
    async fn empty_category_set_makes_no_calls() {
        let source = ScriptedSearch::new(vec![]);
        let aggregator = Aggregator::new(source);
        let query = SearchQuery::new(Coordinate::new(0.0, 0.0), 500, Vec::<Category>::new());
        let places = aggregator.aggregate(&query).await.unwrap();
        assert!(places.is_empty());
        assert_eq!(aggregator.source().calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn dedupe_keeps_first_occurrence_and_unions_tags() {
        let first = tagged(place("a", Some(3.0), 0.0, 0.0), "bar");
        let mut second = tagged(place("a", Some(5.0), 1.0, 1.0), "cafe");
        second.name = "renamed".to_owned();
        let other = place("b", None, 0.0, 0.0);

        let unique = dedupe_by_id(vec![first, other, second]);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].name, "place a");
        assert_eq!(unique[0].rating, Some(3.0));
        assert!(unique[0].categories.contains("bar"));
        assert!(unique[0].categories.contains("cafe"));
        assert_eq!(unique[1].id, "b");
    }

    #[test]
    fn enrichment_sets_distance_from_origin() {
        let origin = Coordinate::new(0.0, 0.0);
        let mut places = vec![place("here", None, 0.0, 0.0), place("north", None, 1.0, 0.0)];
        enrich_with_distance(&mut places, origin);
        assert_eq!(places[0].distance_meters, Some(0.0));
        let north = places[1].distance_meters.unwrap();
        assert!((north - 111_195.0).abs() < 100.0, "got {north}");
    }
}
