//! Local NLP sentiment scoring for market headlines
//!
//! VADER (Valence Aware Dictionary and sEntiment Reasoner) with a
//! financial keyword boost layered on top: general-purpose lexicons miss
//! much of the jargon that moves markets ("rate cut", "downgrade",
//! "beats estimates").

use crate::domain::market::Sentiment;
use vader_sentiment::SentimentIntensityAnalyzer;

/// Financial phrases VADER's general lexicon underweights, with the boost
/// each contributes to the compound score.
const POSITIVE_KEYWORDS: &[(&str, f64)] = &[
    ("rate cut", 0.4),
    ("beats estimates", 0.5),
    ("beat estimates", 0.5),
    ("record high", 0.4),
    ("all-time high", 0.5),
    ("upgrade", 0.3),
    ("upgraded", 0.3),
    ("dividend increase", 0.4),
    ("buyback", 0.3),
    ("strong recovery", 0.4),
    ("surge", 0.4),
    ("surges", 0.4),
    ("rally", 0.4),
    ("rallies", 0.4),
    ("outperform", 0.3),
    ("attractive", 0.2),
    ("expansion", 0.2),
    ("upward trend", 0.3),
];

const NEGATIVE_KEYWORDS: &[(&str, f64)] = &[
    ("rate hike", -0.3),
    ("misses estimates", -0.5),
    ("missed estimates", -0.5),
    ("downgrade", -0.4),
    ("downgraded", -0.4),
    ("default", -0.5),
    ("bankruptcy", -0.6),
    ("lawsuit", -0.4),
    ("recession", -0.4),
    ("sell-off", -0.4),
    ("selloff", -0.4),
    ("plunge", -0.5),
    ("plunges", -0.5),
    ("crash", -0.5),
    ("dividend cut", -0.5),
    ("demand down", -0.3),
    ("inflation concerns", -0.3),
    ("underperform", -0.3),
];

/// Scores headline text into a compound value in [-1, 1]
pub struct HeadlineAnalyzer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl HeadlineAnalyzer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    fn financial_boost(&self, text: &str) -> f64 {
        let text_lower = text.to_lowercase();
        let mut boost = 0.0;

        for (keyword, score) in POSITIVE_KEYWORDS {
            if text_lower.contains(keyword) {
                boost += score;
            }
        }
        for (keyword, score) in NEGATIVE_KEYWORDS {
            if text_lower.contains(keyword) {
                boost += score; // score is already negative
            }
        }

        boost
    }

    /// Compound sentiment score for a piece of text, clamped to [-1, 1]
    pub fn score(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }

        let scores = self.analyzer.polarity_scores(text);
        let vader_score = scores.get("compound").copied().unwrap_or(0.0);
        let boost = self.financial_boost(text);

        (vader_score + boost * 0.5).clamp(-1.0, 1.0)
    }

    /// Score a headline with an optional summary, title weighted 70/30
    pub fn score_article(&self, headline: &str, summary: Option<&str>) -> f64 {
        let headline_score = self.score(headline);
        match summary {
            Some(body) if !body.trim().is_empty() => {
                headline_score * 0.7 + self.score(body) * 0.3
            }
            _ => headline_score,
        }
    }

    /// Convenience: score and classify in one step
    pub fn classify(&self, headline: &str, summary: Option<&str>) -> Sentiment {
        Sentiment::from_compound(self.score_article(headline, summary))
    }
}

impl Default for HeadlineAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
