//! Utterance classification.
//!
//! Decides whether a message asks for a new batch of course
//! recommendations, and how many.

use regex::Regex;
use std::sync::LazyLock;

/// Quick-action labels that always count as a recommendation request.
const EXPLICIT_REQUESTS: [&str; 2] = ["rekomendasi kursus", "rekomendasi"];

const RECOMMENDATION_STEM: &str = "rekomendasi";

/// Request verbs. Matched as substrings, so "berikanlah" also counts.
const REQUEST_VERBS: [&str; 6] = ["berikan", "tampilkan", "ambil", "minta", "cari", "dapatkan"];

pub const DEFAULT_COUNT: u32 = 5;
pub const MIN_COUNT: u32 = 1;
pub const MAX_COUNT: u32 = 20;

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("Invalid digit regex"));

/// What a user utterance asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// A fresh list of course recommendations.
    Recommendation,
    /// Anything else, including follow-ups about shown recommendations.
    General,
}

/// Classify an utterance.
pub fn classify(utterance: &str) -> Intent {
    let lower = utterance.to_lowercase();

    if EXPLICIT_REQUESTS.contains(&lower.trim()) {
        return Intent::Recommendation;
    }

    let has_stem = lower.contains(RECOMMENDATION_STEM);
    let has_verb = REQUEST_VERBS.iter().any(|verb| lower.contains(verb));

    if has_stem && has_verb {
        Intent::Recommendation
    } else {
        Intent::General
    }
}

/// Requested number of recommendations: the first digit run, clamped to
/// `MIN_COUNT..=MAX_COUNT`, or `DEFAULT_COUNT` when there is none.
pub fn extract_count(utterance: &str) -> u32 {
    let Some(run) = DIGIT_RUN.find(utterance) else {
        return DEFAULT_COUNT;
    };

    // Runs too long for u64 are far above the cap anyway.
    match run.as_str().parse::<u64>() {
        Ok(n) => n.clamp(MIN_COUNT as u64, MAX_COUNT as u64) as u32,
        Err(_) => MAX_COUNT,
    }
}
