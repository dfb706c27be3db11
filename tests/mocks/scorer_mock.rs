use std::sync::atomic::{AtomicUsize, Ordering};

use reviewware::models::review::SentimentScores;
use reviewware::sentiment::SentimentScorer;

/// Scorer returning a fixed result and counting how often it was asked.
pub struct FixedScorer {
    pub scores: SentimentScores,
    calls: AtomicUsize,
}

impl FixedScorer {
    pub fn new(compound: f64) -> Self {
        FixedScorer {
            scores: SentimentScores {
                negative: 0.1,
                neutral: 0.2,
                positive: 0.7,
                compound,
            },
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SentimentScorer for FixedScorer {
    fn score(&self, _text: &str) -> SentimentScores {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.scores
    }
}
