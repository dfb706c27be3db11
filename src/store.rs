use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::models::review::Review;
use crate::sentiment::SentimentScorer;

/// In-memory review collection shared by all request handlers.
///
/// Reviews keep load order followed by append order. The set of valid locations is fixed when
/// the store is initialized and only ever read afterwards. Cloning is cheap and every clone
/// sees the same reviews.
#[derive(Debug, Clone)]
pub struct ReviewStore {
    reviews: Arc<RwLock<Vec<Review>>>,
    valid_locations: Arc<HashSet<String>>,
}

impl ReviewStore {
    /// Score every raw review and collect the valid locations.
    ///
    /// Runs to completion before the store can be shared, so no reader ever observes an
    /// unscored preloaded review.
    pub fn initialize(mut raw_reviews: Vec<Review>, scorer: &dyn SentimentScorer) -> Self {
        let mut valid_locations = HashSet::new();

        for review in raw_reviews.iter_mut() {
            review.sentiment = Some(scorer.score(&review.review_body));
            valid_locations.insert(review.location.clone());
        }

        info!(
            "[STORE] Initialized with {} reviews across {} locations",
            raw_reviews.len(),
            valid_locations.len()
        );

        ReviewStore {
            reviews: Arc::new(RwLock::new(raw_reviews)),
            valid_locations: Arc::new(valid_locations),
        }
    }

    /// Snapshot of every review in store order.
    pub async fn all(&self) -> Vec<Review> {
        self.reviews.read().await.clone()
    }

    /// Add a review at the end. Callers validate the location beforehand.
    pub async fn append(&self, review: Review) {
        let mut reviews = self.reviews.write().await;
        debug!("[STORE] Appending review {:?}", review.review_id);
        reviews.push(review);
    }

    pub fn valid_locations(&self) -> &HashSet<String> {
        &self.valid_locations
    }

    pub async fn len(&self) -> usize {
        self.reviews.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.reviews.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::review::{parse_timestamp, SentimentScores};

    // Scores by body length so tests can tell which body was scored
    struct LengthScorer;

    impl SentimentScorer for LengthScorer {
        fn score(&self, text: &str) -> SentimentScores {
            SentimentScores {
                compound: text.len() as f64 / 100.0,
                ..SentimentScores::default()
            }
        }
    }

    fn raw(location: &str, body: &str) -> Review {
        Review::new(
            location.into(),
            body.into(),
            parse_timestamp("2020-01-01 10:00:00").unwrap(),
        )
    }

    fn create_test_store() -> ReviewStore {
        ReviewStore::initialize(
            vec![
                raw("San Diego, California", "Great!"),
                raw("Austin, Texas", "Meh"),
                raw("San Diego, California", "Lovely tacos"),
            ],
            &LengthScorer,
        )
    }

    #[tokio::test]
    async fn test_initialize_scores_every_review() {
        let store = create_test_store();
        let reviews = store.all().await;

        assert_eq!(reviews.len(), 3);
        for review in &reviews {
            let sentiment = review.sentiment.expect("preloaded review must be scored");
            assert_eq!(sentiment.compound, review.review_body.len() as f64 / 100.0);
        }
    }

    #[tokio::test]
    async fn test_valid_locations_are_distinct_dataset_locations() {
        let store = create_test_store();
        let expected: HashSet<String> = ["San Diego, California", "Austin, Texas"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(store.valid_locations(), &expected);
    }

    #[tokio::test]
    async fn test_append_keeps_order_and_locations() {
        let store = create_test_store();
        let before = store.valid_locations().clone();

        store
            .append(raw("Austin, Texas", "Submitted").with_id("new-id"))
            .await;

        let reviews = store.all().await;
        assert_eq!(store.len().await, 4);
        assert_eq!(reviews[0].review_body, "Great!");
        assert_eq!(reviews[2].review_body, "Lovely tacos");
        assert_eq!(reviews[3].review_id.as_deref(), Some("new-id"));
        assert!(reviews[3].sentiment.is_none());
        assert_eq!(store.valid_locations(), &before);
    }

    #[tokio::test]
    async fn test_clones_share_reviews() {
        let store = create_test_store();
        let handle = store.clone();

        handle.append(raw("Austin, Texas", "From a clone")).await;
        assert_eq!(store.len().await, 4);
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_all_kept() {
        let store = create_test_store();

        let tasks: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .append(raw("Austin, Texas", &format!("review {i}")))
                        .await;
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(store.len().await, 35);
    }

    #[tokio::test]
    async fn test_empty_dataset() {
        let store = ReviewStore::initialize(Vec::new(), &LengthScorer);
        assert!(store.is_empty().await);
        assert!(store.valid_locations().is_empty());
    }

    #[tokio::test]
    async fn test_bundled_dataset_scores_within_bounds() {
        use crate::dataset::load_reviews;
        use crate::sentiment::LexiconScorer;

        let raw = load_reviews(concat!(env!("CARGO_MANIFEST_DIR"), "/data/reviews.csv")).unwrap();
        let locations: HashSet<String> = raw.iter().map(|r| r.location.clone()).collect();
        let count = raw.len();

        let store = ReviewStore::initialize(raw, &LexiconScorer::new());
        let reviews = store.all().await;
        assert_eq!(reviews.len(), count);
        assert_eq!(store.valid_locations(), &locations);

        for review in reviews {
            let scores = review.sentiment.unwrap();
            assert!(
                (-1.0..=1.0).contains(&scores.compound),
                "{:?}: {}",
                review.review_id,
                scores.compound
            );
        }
    }
}
