//! Crate `processor`: bounded variable elimination and backward
//! subsumption/strengthening (C10, C11).
pub mod eliminate;
pub mod heap;
pub mod subsume;

pub use {eliminate::Eliminator, heap::ElimHeap};

use crate::types::Lit;

/// The extension stack (§4.10 "Extension stack"): a flat sequence of
/// blocks, each `[eliminated_lit, rest-of-clause-lits...]`, walked in
/// reverse by `extend_solution` to reconstruct eliminated variables' values.
#[derive(Clone, Debug, Default)]
pub struct ExtensionStack {
    blocks: Vec<Vec<Lit>>,
}

impl ExtensionStack {
    pub fn push_block(&mut self, eliminated_lit: Lit, rest: Vec<Lit>) {
        let mut block = Vec::with_capacity(rest.len() + 1);
        block.push(eliminated_lit);
        block.extend(rest);
        self.blocks.push(block);
    }

    /// Walk blocks in reverse; for each, if none of the trailing literals is
    /// already satisfied under `model`, flip the eliminated literal to true
    /// (§4.10 "Extension stack").
    pub fn extend_solution(&self, model: &mut [Option<bool>]) {
        for block in self.blocks.iter().rev() {
            let (elim, rest) = block.split_first().expect("extension block is never empty");
            let satisfied = rest.iter().any(|&l| {
                model
                    .get(l.vi())
                    .and_then(|v| *v)
                    .map(|val| val == l.is_positive())
                    .unwrap_or(false)
            });
            if !satisfied {
                if let Some(slot) = model.get_mut(elim.vi()) {
                    *slot = Some(elim.is_positive());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsatisfied_block_flips_eliminated_literal_true() {
        // v1 eliminated, resolvent remainder was just `v2`; model leaves
        // v2 false, so v1 must be forced true to satisfy the recorded
        // clause `(v1 v v2)`.
        let mut stack = ExtensionStack::default();
        let v1 = Lit::from_var_index(1, false);
        let v2 = Lit::from_var_index(2, false);
        stack.push_block(v1, vec![v2]);
        let mut model: Vec<Option<bool>> = vec![None, None, Some(false)];
        stack.extend_solution(&mut model);
        assert_eq!(model[1], Some(true));
    }

    #[test]
    fn satisfied_block_leaves_eliminated_literal_untouched() {
        let mut stack = ExtensionStack::default();
        let v1 = Lit::from_var_index(1, false);
        let v2 = Lit::from_var_index(2, false);
        stack.push_block(v1, vec![v2]);
        let mut model: Vec<Option<bool>> = vec![None, None, Some(true)];
        stack.extend_solution(&mut model);
        assert_eq!(model[1], None);
    }

    #[test]
    fn blocks_are_replayed_in_reverse_order() {
        // second-eliminated variable's block must be applied before the
        // first's, since later eliminations may have resolved against
        // clauses containing earlier-eliminated literals.
        let mut stack = ExtensionStack::default();
        let v1 = Lit::from_var_index(1, false);
        let v2 = Lit::from_var_index(2, false);
        stack.push_block(v1, vec![v2]);
        stack.push_block(v2, vec![]);
        let mut model: Vec<Option<bool>> = vec![None, None, None];
        stack.extend_solution(&mut model);
        assert_eq!(model[2], Some(true));
        assert_eq!(model[1], Some(true));
    }
}
