//! # Pending Solution Store
//!
//! Mutex-guarded collection shared by producers and verification workers.
//! Entries are moved in on push and moved out on pop.

use super::entities::PendingSolution;
use super::errors::{Result, VerificationError};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Which end of the store workers pop from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PopOrder {
    /// Most recently pushed first.
    #[default]
    Lifo,
    /// Oldest first.
    Fifo,
}

/// Shared pending-solution collection.
#[derive(Debug, Default)]
pub struct PendingSolutionStore {
    entries: Mutex<VecDeque<PendingSolution>>,
    order: PopOrder,
}

impl PendingSolutionStore {
    /// LIFO store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order(order: PopOrder) -> Self {
        Self {
            entries: Mutex::new(VecDeque::new()),
            order,
        }
    }

    pub fn order(&self) -> PopOrder {
        self.order
    }

    pub fn push(&self, entry: PendingSolution) {
        self.entries.lock().push_back(entry);
    }

    /// Remove the most recently pushed entry regardless of pop order.
    ///
    /// # Errors
    ///
    /// [`VerificationError::EmptyStore`] when nothing is pending.
    pub fn pop_most_recent(&self) -> Result<PendingSolution> {
        self.entries
            .lock()
            .pop_back()
            .ok_or(VerificationError::EmptyStore)
    }

    /// Remove the next entry in this store's pop order.
    pub fn pop(&self) -> Option<PendingSolution> {
        let mut entries = self.entries.lock();
        match self.order {
            PopOrder::Lifo => entries.pop_back(),
            PopOrder::Fifo => entries.pop_front(),
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.entries.lock().is_empty()
    }

    pub fn size(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}
