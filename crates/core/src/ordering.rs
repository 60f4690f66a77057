//! Manual ordering of content rows (drag-and-drop reordering).
//!
//! Every sortable table stores an integer `sort_order`. The admin UI sends
//! either the complete new order of a table (after a drag-and-drop) or a
//! single "move this row to position N" request. Both are resolved here into
//! a dense, zero-based renumbering which the repository layer writes back in
//! one transaction.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/// The `sort_order` value to write for a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortAssignment {
    pub id: DbId,
    pub sort_order: i32,
}

/// Check that `requested` names every id in `existing` exactly once.
///
/// `existing` is the set of live (non-deleted) rows in the table, in any
/// order. Errors list the offending ids so the client can resync.
pub fn validate_permutation(existing: &[DbId], requested: &[DbId]) -> Result<(), CoreError> {
    let mut seen = HashSet::with_capacity(requested.len());
    let mut duplicates: Vec<DbId> = requested
        .iter()
        .copied()
        .filter(|id| !seen.insert(*id))
        .collect();
    duplicates.sort_unstable();
    duplicates.dedup();
    if !duplicates.is_empty() {
        return Err(CoreError::Validation(format!(
            "Duplicate ids in order: {}",
            join_ids(&duplicates)
        )));
    }

    let known: HashSet<DbId> = existing.iter().copied().collect();

    let mut unknown: Vec<DbId> = requested
        .iter()
        .copied()
        .filter(|id| !known.contains(id))
        .collect();
    if !unknown.is_empty() {
        unknown.sort_unstable();
        return Err(CoreError::Validation(format!(
            "Unknown ids in order: {}",
            join_ids(&unknown)
        )));
    }

    let mut missing: Vec<DbId> = existing
        .iter()
        .copied()
        .filter(|id| !seen.contains(id))
        .collect();
    if !missing.is_empty() {
        missing.sort_unstable();
        return Err(CoreError::Validation(format!(
            "Order must include every item; missing ids: {}",
            join_ids(&missing)
        )));
    }

    Ok(())
}

/// Assign dense zero-based sort orders following the order of `ids`.
pub fn renumber(ids: &[DbId]) -> Vec<SortAssignment> {
    ids.iter()
        .enumerate()
        .map(|(index, &id)| SortAssignment {
            id,
            sort_order: index as i32,
        })
        .collect()
}

/// Move `id` to `to_index` within `ids`, shifting the rows in between.
///
/// `to_index` past the end moves the row to the last position.
pub fn move_item(ids: &[DbId], id: DbId, to_index: usize) -> Result<Vec<DbId>, CoreError> {
    let from = ids.iter().position(|&x| x == id).ok_or_else(|| {
        CoreError::Validation(format!("Item {id} is not part of this ordering"))
    })?;

    let mut reordered = ids.to_vec();
    let moved = reordered.remove(from);
    let target = to_index.min(reordered.len());
    reordered.insert(target, moved);
    Ok(reordered)
}

/// Sort order for a newly created row: one past the current maximum.
pub fn next_position(current_max: Option<i32>) -> i32 {
    current_max.map_or(0, |max| max.saturating_add(1))
}

fn join_ids(ids: &[DbId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
