//! Sentiment scoring of review text.
//!
//! The store only depends on the [`SentimentScorer`] trait so that tests can plug in a stub.
//! [`LexiconScorer`] is the implementation used by the service: a rule-based valence scorer in
//! the style of VADER, with a small built-in lexicon tuned for restaurant and shop reviews.
use std::collections::{HashMap, HashSet};

use crate::models::review::SentimentScores;

pub trait SentimentScorer: Send + Sync {
    /// Score `text`. Must be deterministic, and must return all zeros for blank text.
    fn score(&self, text: &str) -> SentimentScores;
}

const BOOSTER_INCREMENT: f64 = 0.293;
const BOOSTER_DECREMENT: f64 = -0.293;
const CAPS_EMPHASIS: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const NORMALIZATION_ALPHA: f64 = 15.0;
const LOOKBACK_DECAY: [f64; 3] = [1.0, 0.95, 0.9];
const EXCLAMATION_EMPHASIS: f64 = 0.292;
const QUESTION_EMPHASIS: f64 = 0.18;

pub struct LexiconScorer {
    lexicon: HashMap<&'static str, f64>,
    boosters: HashMap<&'static str, f64>,
    negations: HashSet<&'static str>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            lexicon: Self::build_lexicon(),
            boosters: Self::build_boosters(),
            negations: Self::build_negations(),
        }
    }

    fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word) || word.ends_with("n't")
    }

    /// Valence of the token at `index`, adjusted by emphasis, boosters and negation.
    fn valence_at(&self, tokens: &[&str], lowered: &[String], index: usize, caps_differential: bool) -> f64 {
        let word = lowered[index].as_str();
        if self.boosters.contains_key(word) {
            return 0.0;
        }
        let Some(&base) = self.lexicon.get(word) else {
            return 0.0;
        };

        let mut valence = base;
        if caps_differential && is_all_caps(tokens[index]) {
            valence += CAPS_EMPHASIS.copysign(valence);
        }

        let mut negated = false;
        for (offset, decay) in LOOKBACK_DECAY.iter().enumerate() {
            let Some(prior_index) = index.checked_sub(offset + 1) else {
                break;
            };
            let prior = lowered[prior_index].as_str();

            if let Some(&boost) = self.boosters.get(prior) {
                let directed = if valence < 0.0 { -boost } else { boost };
                valence += directed * decay;
            }
            if self.is_negation(prior) {
                negated = true;
            }
        }

        if negated {
            valence *= NEGATION_SCALAR;
        }
        valence
    }

    fn build_lexicon() -> HashMap<&'static str, f64> {
        [
            // Praise
            ("amazing", 2.8), ("awesome", 3.1), ("beautiful", 2.9), ("best", 3.2),
            ("better", 1.9), ("brilliant", 2.8), ("charming", 2.2), ("clean", 1.7),
            ("comfortable", 1.5), ("cozy", 1.9), ("delicious", 2.7), ("delight", 2.9),
            ("delightful", 2.9), ("enjoy", 2.2), ("enjoyed", 2.3), ("excellent", 2.7),
            ("exceptional", 2.5), ("fabulous", 2.4), ("fantastic", 2.6), ("favorite", 2.0),
            ("fine", 0.8), ("fresh", 1.3), ("friendly", 2.2), ("fun", 2.3),
            ("glad", 2.0), ("good", 1.9), ("gorgeous", 3.0), ("great", 3.1),
            ("happy", 2.7), ("helpful", 1.8), ("impressive", 2.3), ("incredible", 2.2),
            ("like", 1.5), ("liked", 1.8), ("love", 3.2), ("loved", 2.9),
            ("lovely", 2.8), ("nice", 1.8), ("outstanding", 3.0), ("perfect", 2.7),
            ("pleasant", 2.3), ("pleased", 1.9), ("polite", 1.5), ("recommend", 1.5),
            ("recommended", 1.6), ("reliable", 1.6), ("satisfied", 1.8), ("spotless", 1.9),
            ("superb", 3.1), ("tasty", 2.0), ("terrific", 2.7), ("thank", 1.5),
            ("thanks", 1.9), ("welcoming", 2.1), ("win", 2.8), ("wonderful", 2.7),
            ("worth", 0.9), ("yummy", 2.4),
            // Complaints
            ("annoyed", -1.6), ("annoying", -1.8), ("angry", -2.3), ("awful", -2.0),
            ("bad", -2.5), ("bland", -1.2), ("boring", -1.3), ("broken", -1.9),
            ("cold", -0.4), ("complain", -1.5), ("crowded", -1.0), ("dirty", -1.9),
            ("disappointed", -1.9), ("disappointing", -2.2), ("disgusting", -2.4), ("dislike", -1.6),
            ("expensive", -0.9), ("fail", -2.5), ("failed", -2.3), ("filthy", -2.5),
            ("gross", -2.1), ("hate", -2.7), ("hated", -3.2), ("horrible", -2.5),
            ("inedible", -2.0), ("lousy", -2.5), ("mediocre", -1.0), ("mess", -1.5),
            ("nasty", -2.6), ("overpriced", -1.5), ("poor", -2.1), ("problem", -1.7),
            ("rude", -2.0), ("sad", -2.1), ("slow", -0.7), ("stale", -1.5),
            ("terrible", -2.1), ("unfriendly", -1.5), ("unhappy", -1.8), ("upset", -1.6),
            ("waste", -1.8), ("worse", -2.1), ("worst", -3.1), ("wrong", -2.1),
            ("yuck", -1.5),
        ]
        .into_iter()
        .collect()
    }

    fn build_boosters() -> HashMap<&'static str, f64> {
        [
            ("absolutely", BOOSTER_INCREMENT), ("completely", BOOSTER_INCREMENT),
            ("extremely", BOOSTER_INCREMENT), ("highly", BOOSTER_INCREMENT),
            ("incredibly", BOOSTER_INCREMENT), ("really", BOOSTER_INCREMENT),
            ("so", BOOSTER_INCREMENT), ("super", BOOSTER_INCREMENT),
            ("totally", BOOSTER_INCREMENT), ("truly", BOOSTER_INCREMENT),
            ("very", BOOSTER_INCREMENT),
            ("barely", BOOSTER_DECREMENT), ("hardly", BOOSTER_DECREMENT),
            ("marginally", BOOSTER_DECREMENT), ("slightly", BOOSTER_DECREMENT),
            ("somewhat", BOOSTER_DECREMENT), ("sort", BOOSTER_DECREMENT),
        ]
        .into_iter()
        .collect()
    }

    fn build_negations() -> HashSet<&'static str> {
        [
            "aint", "cannot", "dont", "doesnt", "didnt", "isnt", "never", "no", "nobody",
            "none", "nor", "not", "nothing", "nowhere", "wasnt", "without", "wont",
        ]
        .into_iter()
        .collect()
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> SentimentScores {
        let tokens: Vec<&str> = text
            .split_whitespace()
            .map(|token| token.trim_matches(|c: char| c.is_ascii_punctuation()))
            .filter(|token| !token.is_empty())
            .collect();
        if tokens.is_empty() {
            return SentimentScores::default();
        }

        let lowered: Vec<String> = tokens.iter().map(|token| token.to_lowercase()).collect();
        let caps_differential = has_caps_differential(&tokens);

        let mut valences: Vec<f64> = (0..tokens.len())
            .map(|index| self.valence_at(&tokens, &lowered, index, caps_differential))
            .collect();

        // Contrastive "but": what follows it outweighs what precedes it.
        if let Some(pivot) = lowered.iter().position(|word| word == "but") {
            for (index, valence) in valences.iter_mut().enumerate() {
                if index < pivot {
                    *valence *= 0.5;
                } else if index > pivot {
                    *valence *= 1.5;
                }
            }
        }

        let emphasis = punctuation_emphasis(text);
        let mut sum: f64 = valences.iter().sum();
        if sum > 0.0 {
            sum += emphasis;
        } else if sum < 0.0 {
            sum -= emphasis;
        }

        let mut positive_sum = 0.0;
        let mut negative_sum = 0.0;
        let mut neutral_count = 0.0;
        for &valence in &valences {
            if valence > 0.0 {
                positive_sum += valence + 1.0;
            } else if valence < 0.0 {
                negative_sum += valence - 1.0;
            } else {
                neutral_count += 1.0;
            }
        }
        if positive_sum > negative_sum.abs() {
            positive_sum += emphasis;
        } else if positive_sum < negative_sum.abs() {
            negative_sum -= emphasis;
        }

        let total = positive_sum + negative_sum.abs() + neutral_count;
        SentimentScores {
            negative: round_to((negative_sum / total).abs(), 3),
            neutral: round_to((neutral_count / total).abs(), 3),
            positive: round_to((positive_sum / total).abs(), 3),
            compound: round_to(normalize(sum), 4),
        }
    }
}

fn normalize(sum: f64) -> f64 {
    (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn is_all_caps(token: &str) -> bool {
    token.chars().any(char::is_alphabetic)
        && token
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(char::is_uppercase)
}

/// True when some, but not all, tokens are shouted.
fn has_caps_differential(tokens: &[&str]) -> bool {
    let worded: Vec<&&str> = tokens
        .iter()
        .filter(|token| token.chars().any(char::is_alphabetic))
        .collect();
    let shouted = worded.iter().filter(|token| is_all_caps(token)).count();
    shouted > 0 && shouted < worded.len()
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4) as f64;
    let questions = text.matches('?').count();
    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_EMPHASIS,
        _ => 0.96,
    };
    exclamations * EXCLAMATION_EMPHASIS + question_emphasis
}
