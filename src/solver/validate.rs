//! Certificate validation (C13, §4.13): check a candidate model against
//! every clause this solver ever asserted as irredundant, independent of
//! whatever inprocessing has since rewritten the live clause database.
use crate::types::Lit;

/// Does every clause in `original_clauses` have at least one literal
/// satisfied by `model` (indexed by variable, 1-based, matching DIMACS
/// polarity)? Returns the first clause found to be falsified, or `None` if
/// the model satisfies the whole formula (§4.13 "returns the offending
/// clause, if any"). Checking against the as-asserted clauses, rather than
/// the live `ClauseDB`, means a clause wrongly garbage-collected by a buggy
/// inprocessing pass (elimination, subsumption, vivification) is still
/// caught instead of silently excluded.
pub fn validate(original_clauses: &[Vec<Lit>], model: &[i32]) -> Option<Vec<Lit>> {
    let value = |l: Lit| -> bool {
        let vi = l.vi();
        if vi == 0 || vi > model.len() {
            return false;
        }
        let v = model[vi - 1];
        (v > 0) != l.is_negative()
    };
    for clause in original_clauses {
        if !clause.iter().any(|&l| value(l)) {
            return Some(clause.clone());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Lit;

    fn lits(raw: &[i32]) -> Vec<Lit> {
        raw.iter().map(|&i| Lit::try_from(i).unwrap()).collect()
    }

    #[test]
    fn model_satisfying_every_clause_validates() {
        let clauses = vec![lits(&[1, 2]), lits(&[-1, 3])];
        assert_eq!(validate(&clauses, &[1, -2, 3]), None);
    }

    #[test]
    fn falsified_clause_is_returned() {
        let clauses = vec![lits(&[1, 2]), lits(&[-1, -2])];
        assert_eq!(validate(&clauses, &[1, 2]), Some(lits(&[-1, -2])));
    }
}
