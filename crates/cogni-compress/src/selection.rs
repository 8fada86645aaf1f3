//! Dual-threshold sentence selection (spec §4.8 step 6): partition survivors
//! into four relevance/noise quadrants and fill a keep-quota quadrant by
//! quadrant, highest score first, breaking ties by original index.

use crate::scoring::SentenceScore;

const MIN_RELEVANCE: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quadrant {
    /// High relevance, low noise.
    P1,
    /// High relevance, high noise.
    P2,
    /// Low relevance, low noise.
    P3,
    /// Low relevance, high noise.
    P4,
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn quadrant_of(score: SentenceScore, relevance_median: f64, noise_median: f64) -> Quadrant {
    match (score.relevance >= relevance_median, score.noise <= noise_median) {
        (true, true) => Quadrant::P1,
        (true, false) => Quadrant::P2,
        (false, true) => Quadrant::P3,
        (false, false) => Quadrant::P4,
    }
}

/// Indices (into `scores`/`auto_keep`) of sentences to keep, in original
/// order. `auto_keep[i]` forces sentence `i` into the result regardless of
/// score. `target_ratio` and `min_sentences` set the keep-quota.
#[must_use]
pub fn select_sentences(scores: &[SentenceScore], auto_keep: &[bool], target_ratio: f64, min_sentences: usize) -> Vec<usize> {
    let total = scores.len();
    if total == 0 {
        return Vec::new();
    }

    let mut kept = vec![false; total];
    let mut survivor_indices = Vec::new();
    for i in 0..total {
        if auto_keep[i] {
            kept[i] = true;
        } else if scores[i].relevance >= MIN_RELEVANCE {
            survivor_indices.push(i);
        }
    }

    let quota = min_sentences.max((total as f64 * target_ratio).ceil() as usize);
    let already_kept = kept.iter().filter(|&&k| k).count();
    if already_kept >= quota || survivor_indices.is_empty() {
        return (0..total).filter(|&i| kept[i]).collect();
    }

    let relevances: Vec<f64> = survivor_indices.iter().map(|&i| scores[i].relevance).collect();
    let noises: Vec<f64> = survivor_indices.iter().map(|&i| scores[i].noise).collect();
    let relevance_median = median(&relevances);
    let noise_median = median(&noises);

    let mut by_quadrant: Vec<Vec<usize>> = vec![Vec::new(); 4];
    for &i in &survivor_indices {
        let quadrant = quadrant_of(scores[i], relevance_median, noise_median);
        let bucket = match quadrant {
            Quadrant::P1 => 0,
            Quadrant::P2 => 1,
            Quadrant::P3 => 2,
            Quadrant::P4 => 3,
        };
        by_quadrant[bucket].push(i);
    }
    for bucket in &mut by_quadrant {
        bucket.sort_by(|&a, &b| {
            scores[b].relevance.partial_cmp(&scores[a].relevance).unwrap_or(std::cmp::Ordering::Equal).then_with(|| a.cmp(&b))
        });
    }

    let mut remaining = quota.saturating_sub(already_kept);
    for bucket in &by_quadrant {
        for &i in bucket {
            if remaining == 0 {
                break;
            }
            if !kept[i] {
                kept[i] = true;
                remaining -= 1;
            }
        }
    }

    (0..total).filter(|&i| kept[i]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(relevance: f64, noise: f64) -> SentenceScore {
        SentenceScore { relevance, noise }
    }

    #[test]
    fn auto_kept_sentences_are_always_included() {
        let scores = vec![score(0.0, 1.0), score(0.0, 1.0)];
        let auto_keep = vec![true, false];
        let kept = select_sentences(&scores, &auto_keep, 0.1, 0);
        assert!(kept.contains(&0));
    }

    #[test]
    fn fills_quota_with_highest_scoring_low_noise_sentences_first() {
        let scores = vec![score(0.9, 0.1), score(0.8, 0.1), score(0.1, 0.9), score(0.1, 0.9)];
        let auto_keep = vec![false; 4];
        let kept = select_sentences(&scores, &auto_keep, 0.5, 0);
        assert!(kept.contains(&0));
        assert!(kept.contains(&1));
    }

    #[test]
    fn below_min_relevance_sentences_are_dropped_unless_auto_kept() {
        let scores = vec![score(0.01, 0.5)];
        let auto_keep = vec![false];
        let kept = select_sentences(&scores, &auto_keep, 1.0, 0);
        assert!(kept.is_empty());
    }

    #[test]
    fn min_sentences_forces_a_larger_quota_than_the_ratio_would() {
        let scores = vec![score(0.9, 0.1), score(0.8, 0.1), score(0.7, 0.1)];
        let auto_keep = vec![false; 3];
        let kept = select_sentences(&scores, &auto_keep, 0.1, 2);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn empty_input_selects_nothing() {
        assert!(select_sentences(&[], &[], 0.5, 1).is_empty());
    }
}
