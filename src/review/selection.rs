use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Sentinel written to the index cell when nothing is selected.
pub const NO_SELECTION: i64 = -1;

/// Where the current index lives. `Owned` keeps it inside the controller;
/// `Shared` reads and writes a cell supplied by an external owner so the
/// host can drive selection (and observe changes) without a second copy of
/// the fact existing anywhere.
enum SelectionSource {
    Owned(i64),
    Shared(Arc<AtomicI64>),
}

/// Current-candidate index with safe navigation. Every read goes through
/// `current()` at call time; handlers never hold a captured index.
pub struct SelectionController {
    source: SelectionSource,
    len: usize,
}

impl SelectionController {
    pub fn internal(len: usize) -> Self {
        let initial = if len > 0 { 0 } else { NO_SELECTION };
        Self {
            source: SelectionSource::Owned(initial),
            len,
        }
    }

    pub fn external(cell: Arc<AtomicI64>, len: usize) -> Self {
        Self {
            source: SelectionSource::Shared(cell),
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn raw(&self) -> i64 {
        match &self.source {
            SelectionSource::Owned(v) => *v,
            SelectionSource::Shared(cell) => cell.load(Ordering::Relaxed),
        }
    }

    fn store(&mut self, v: i64) {
        match &mut self.source {
            SelectionSource::Owned(slot) => *slot = v,
            SelectionSource::Shared(cell) => cell.store(v, Ordering::Relaxed),
        }
    }

    /// The authoritative index, validated against the list length. An
    /// external owner may have written anything into the cell; out-of-range
    /// values read as no selection rather than panicking downstream.
    pub fn current(&self) -> Option<usize> {
        let raw = self.raw();
        (raw >= 0 && (raw as usize) < self.len).then_some(raw as usize)
    }

    pub fn select(&mut self, index: usize) -> bool {
        if index < self.len {
            self.store(index as i64);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.store(NO_SELECTION);
    }

    /// No-op at the last index.
    pub fn next(&mut self) -> bool {
        match self.current() {
            Some(i) if i + 1 < self.len => {
                self.store(i as i64 + 1);
                true
            }
            Some(_) => false,
            None if self.len > 0 => {
                self.store(0);
                true
            }
            None => false,
        }
    }

    /// No-op at index zero.
    pub fn previous(&mut self) -> bool {
        match self.current() {
            Some(i) if i > 0 => {
                self.store(i as i64 - 1);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_stays_in_range() {
        let mut sel = SelectionController::internal(3);
        assert_eq!(sel.current(), Some(0));
        assert!(!sel.previous());
        assert!(sel.next());
        assert!(sel.next());
        assert_eq!(sel.current(), Some(2));
        assert!(!sel.next());
        assert_eq!(sel.current(), Some(2));
    }

    #[test]
    fn empty_list_has_no_selection() {
        let mut sel = SelectionController::internal(0);
        assert_eq!(sel.current(), None);
        assert!(!sel.next());
        assert!(!sel.previous());
        assert!(!sel.select(0));
    }

    #[test]
    fn external_cell_is_read_at_call_time() {
        let cell = Arc::new(AtomicI64::new(1));
        let mut sel = SelectionController::external(cell.clone(), 4);
        assert_eq!(sel.current(), Some(1));
        // Owner moves the index out from under the controller.
        cell.store(3, Ordering::Relaxed);
        assert_eq!(sel.current(), Some(3));
        assert!(!sel.next());
        sel.previous();
        assert_eq!(cell.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn out_of_range_external_value_reads_as_none() {
        let cell = Arc::new(AtomicI64::new(17));
        let sel = SelectionController::external(cell, 2);
        assert_eq!(sel.current(), None);
    }
}
