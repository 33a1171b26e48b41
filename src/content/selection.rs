use super::ContentSet;
use std::cmp::Ordering;

/// Candidates ordered best-first.
///
/// The sort is stable, so candidates with equal scores keep the order the
/// service returned them in. Scores compare numerically (`-0.0 == 0.0`);
/// non-finite scores never get this far.
pub fn rank(candidates: &[ContentSet]) -> Vec<&ContentSet> {
    let mut ranked: Vec<&ContentSet> = candidates.iter().collect();
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    ranked
}

/// The highest-scoring candidate; ties go to the earliest one.
pub fn select_best(candidates: &[ContentSet]) -> Option<&ContentSet> {
    rank(candidates).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::super::types::candidate;
    use super::*;

    #[test]
    fn empty_batch_has_no_winner() {
        assert!(select_best(&[]).is_none());
    }

    #[test]
    fn picks_strict_maximum() {
        let scores = [42.0, 87.5, 12.0, 99.1, 63.0, 5.0, 77.7, 98.9, 0.0, 50.0];
        let batch: Vec<ContentSet> = scores
            .iter()
            .enumerate()
            .map(|(i, s)| candidate(&format!("c{i}"), *s))
            .collect();

        assert_eq!(select_best(&batch).unwrap().id, "c3");
    }

    #[test]
    fn ties_go_to_earliest_candidate() {
        let batch = vec![
            candidate("a", 60.0),
            candidate("b", 91.0),
            candidate("c", 91.0),
            candidate("d", 91.0),
        ];
        for _ in 0..5 {
            assert_eq!(select_best(&batch).unwrap().id, "b");
        }
    }

    #[test]
    fn signed_zero_scores_are_a_tie() {
        let batch = crate::content::retain_valid(vec![
            candidate("first", -0.0),
            candidate("second", 0.0),
        ]);
        assert_eq!(batch.len(), 2);
        assert_eq!(select_best(&batch).unwrap().id, "first");

        let reversed = vec![candidate("first", 0.0), candidate("second", -0.0)];
        assert_eq!(select_best(&reversed).unwrap().id, "first");
    }

    #[test]
    fn rank_is_descending_and_stable() {
        let batch = vec![
            candidate("a", 10.0),
            candidate("b", 30.0),
            candidate("c", 10.0),
            candidate("d", 20.0),
        ];
        let ids: Vec<&str> = rank(&batch).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn rank_does_not_reorder_input() {
        let batch = vec![candidate("a", 1.0), candidate("b", 2.0)];
        let _ = rank(&batch);
        assert_eq!(batch[0].id, "a");
    }
}
