//! Candidate staging for extractor suggestions.
//!
//! When the extractor proposes N candidate entities, they are staged here
//! for curation before anything is persisted. Removing a candidate is not
//! the same as deselecting it: removed items leave the pool entirely and
//! can never be confirmed.

use crate::domain::foundation::{DomainError, ErrorCode};

/// A staged suggestion with its selection flag.
#[derive(Debug, Clone, PartialEq)]
struct Candidate<T> {
    item: T,
    selected: bool,
}

/// An ordered pool of candidate entities under curation.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSet<T> {
    candidates: Vec<Candidate<T>>,
}

impl<T> CandidateSet<T> {
    /// Stages suggestions with the first `preselect` items selected.
    pub fn stage(items: Vec<T>, preselect: usize) -> Self {
        let candidates = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| Candidate {
                item,
                selected: i < preselect,
            })
            .collect();
        Self { candidates }
    }

    /// Stages items with explicit selection flags.
    pub fn from_flagged(items: Vec<(T, bool)>) -> Self {
        let candidates = items
            .into_iter()
            .map(|(item, selected)| Candidate { item, selected })
            .collect();
        Self { candidates }
    }

    /// Number of candidates in the pool.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns true when the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Number of currently selected candidates.
    pub fn selected_count(&self) -> usize {
        self.candidates.iter().filter(|c| c.selected).count()
    }

    /// Flips the selection flag of one candidate, returning the new flag.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if the index is outside the pool
    pub fn toggle(&mut self, index: usize) -> Result<bool, DomainError> {
        let candidate = self.get_mut(index)?;
        candidate.selected = !candidate.selected;
        Ok(candidate.selected)
    }

    /// Edits one candidate in place.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if the index is outside the pool
    pub fn edit(&mut self, index: usize, f: impl FnOnce(&mut T)) -> Result<(), DomainError> {
        let candidate = self.get_mut(index)?;
        f(&mut candidate.item);
        Ok(())
    }

    /// Adds an ad-hoc candidate to the end of the pool, selected.
    pub fn push(&mut self, item: T) {
        self.candidates.push(Candidate {
            item,
            selected: true,
        });
    }

    /// Drops a candidate from the pool entirely.
    ///
    /// Unlike deselection, a removed candidate cannot be confirmed later.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if the index is outside the pool
    pub fn remove(&mut self, index: usize) -> Result<T, DomainError> {
        if index >= self.candidates.len() {
            return Err(self.out_of_range(index));
        }
        Ok(self.candidates.remove(index).item)
    }

    /// Iterates the selected candidates in insertion order.
    pub fn selected(&self) -> impl Iterator<Item = &T> {
        self.candidates
            .iter()
            .filter(|c| c.selected)
            .map(|c| &c.item)
    }

    /// Consumes the set, yielding the selected items in insertion order.
    pub fn into_selected(self) -> Vec<T> {
        self.candidates
            .into_iter()
            .filter(|c| c.selected)
            .map(|c| c.item)
            .collect()
    }

    /// Iterates every candidate with its selection flag.
    pub fn iter(&self) -> impl Iterator<Item = (&T, bool)> {
        self.candidates.iter().map(|c| (&c.item, c.selected))
    }

    fn get_mut(&mut self, index: usize) -> Result<&mut Candidate<T>, DomainError> {
        let len = self.candidates.len();
        self.candidates
            .get_mut(index)
            .ok_or_else(|| out_of_range_error(index, len))
    }

    fn out_of_range(&self, index: usize) -> DomainError {
        out_of_range_error(index, self.candidates.len())
    }
}

fn out_of_range_error(index: usize, len: usize) -> DomainError {
    DomainError::new(
        ErrorCode::OutOfRange,
        format!("Candidate index {} out of range (pool size {})", index, len),
    )
}
