//! Resume-to-job skill matching.
//!
//! Combines the freelancer's free-text profile fields with whatever text
//! could be pulled out of the uploaded resume, extracts phrase candidates,
//! and scores the overlap against the job's comma-separated required
//! skills: 100 * |required ∩ candidates| / |required|, 0 when the job
//! lists no skills.

use std::collections::HashSet;

/// Longest phrase, in words, considered a single skill candidate.
const MAX_PHRASE_WORDS: usize = 3;

fn is_word_char(c: char) -> bool {
    // '+' and '#' keep skills like c++ and c# intact
    c.is_alphanumeric() || c == '+' || c == '#'
}

fn words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|w| !w.is_empty())
        .map(|w| w.to_string())
        .collect()
}

/// Collapses a phrase to its word tokens joined by single spaces, so both
/// sides of the comparison normalize the same way ("Node.js" == "node js").
fn normalize_phrase(phrase: &str) -> Option<String> {
    let tokens = words(phrase);
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}

pub fn required_skills(raw: &str) -> HashSet<String> {
    raw.split(',').filter_map(normalize_phrase).collect()
}

/// Word n-grams up to [`MAX_PHRASE_WORDS`] long, the stand-in for
/// noun-phrase chunking: multi-word skills match without a parser.
pub fn phrase_candidates(text: &str) -> HashSet<String> {
    let tokens = words(text);
    let mut candidates = HashSet::new();
    for size in 1..=MAX_PHRASE_WORDS {
        for window in tokens.windows(size) {
            candidates.insert(window.join(" "));
        }
    }
    candidates
}

pub fn match_score(required: &HashSet<String>, candidates: &HashSet<String>) -> f64 {
    if required.is_empty() {
        return 0.0;
    }
    let matches = required.intersection(candidates).count();
    let score = (matches as f64 / required.len() as f64) * 100.0;
    (score * 100.0).round() / 100.0
}

/// One-shot score for a proposal submission. Runs in the request cycle;
/// `resume_text` is empty when extraction failed or no file was uploaded.
pub fn score_profile(
    skills: &str,
    experience: &str,
    education: &str,
    resume_text: &str,
    required_raw: &str,
) -> f64 {
    let combined = [skills, experience, education, resume_text].join(" ");
    let required = required_skills(required_raw);
    let candidates = phrase_candidates(&combined);
    match_score(&required, &candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_required_skills_scores_zero() {
        assert_eq!(score_profile("rust, sql", "", "", "", ""), 0.0);
        assert_eq!(score_profile("rust, sql", "", "", "", " , ,"), 0.0);
    }

    #[test]
    fn full_overlap_scores_hundred() {
        let score = score_profile("Rust, Postgres", "", "", "", "rust, postgres");
        assert_eq!(score, 100.0);
    }

    #[test]
    fn partial_overlap_is_a_ratio_of_required() {
        // 2 of 4 required skills present
        let score = score_profile(
            "python, django",
            "built web apps",
            "",
            "",
            "python, django, kubernetes, terraform",
        );
        assert_eq!(score, 50.0);
    }

    #[test]
    fn score_rounds_to_two_decimals() {
        let score = score_profile("rust", "", "", "", "rust, go, zig");
        assert_eq!(score, 33.33);
    }

    #[test]
    fn multiword_skills_match_via_ngrams() {
        let score = score_profile(
            "",
            "five years of machine learning work",
            "",
            "",
            "machine learning",
        );
        assert_eq!(score, 100.0);
    }

    #[test]
    fn punctuated_skills_normalize_on_both_sides() {
        let score = score_profile("Node.js, C++", "", "", "", "node.js, c++");
        assert_eq!(score, 100.0);
    }

    #[test]
    fn resume_text_contributes_to_the_candidate_set() {
        let score = score_profile("", "", "", "shipped rust services", "rust");
        assert_eq!(score, 100.0);
    }

    #[test]
    fn candidates_only_match_listed_skills() {
        let required = required_skills("rust, embedded systems");
        let candidates = phrase_candidates("I write Rust for embedded systems daily");
        assert_eq!(match_score(&required, &candidates), 100.0);

        let unrelated = phrase_candidates("I write marketing copy");
        assert_eq!(match_score(&required, &unrelated), 0.0);
    }
}
