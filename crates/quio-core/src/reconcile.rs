//! Merge-on-extract.
//!
//! Extracted items are folded into the list by case-insensitive name:
//! a match only accumulates quantity, anything else is appended in
//! extraction order. Lists are shopping-list sized, so a linear scan
//! per item is all this needs.

use quio_types::product::ProductItem;

/// What a merge did to the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    /// New rows appended
    pub added: usize,
    /// Items folded into an existing row
    pub merged: usize,
}

pub fn merge_products(list: &mut Vec<ProductItem>, incoming: Vec<ProductItem>) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();

    for item in incoming {
        match list.iter_mut().find(|existing| existing.same_name(&item.name)) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
                outcome.merged += 1;
            }
            None => {
                list.push(item);
                outcome.added += 1;
            }
        }
    }

    outcome
}
