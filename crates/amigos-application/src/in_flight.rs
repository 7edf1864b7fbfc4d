//! Guard against submitting the same write twice.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use amigos_core::contract::PlanTier;

/// Identity of a write for de-duplication purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteOperation {
    Register,
    ActivatePlan(PlanTier),
    ClaimDividends,
    UpdateServiceAddress,
}

impl fmt::Display for WriteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register => f.write_str("Register"),
            Self::ActivatePlan(tier) => write!(f, "ActivatePlan({tier})"),
            Self::ClaimDividends => f.write_str("ClaimDividends"),
            Self::UpdateServiceAddress => f.write_str("UpdateServiceAddress"),
        }
    }
}

/// Set of writes currently running.
///
/// The lock is only held to insert or remove an entry, never across an
/// await point.
#[derive(Debug, Clone, Default)]
pub struct InFlightTracker {
    active: Arc<Mutex<HashSet<WriteOperation>>>,
}

impl InFlightTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `operation` as running. Returns `None` if it already is.
    pub fn try_acquire(&self, operation: WriteOperation) -> Option<InFlightGuard> {
        if !self.lock().insert(operation) {
            return None;
        }
        Some(InFlightGuard {
            active: Arc::clone(&self.active),
            operation,
        })
    }

    pub fn is_active(&self, operation: WriteOperation) -> bool {
        self.lock().contains(&operation)
    }

    pub fn active_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<WriteOperation>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Releases the operation when dropped.
#[derive(Debug)]
pub struct InFlightGuard {
    active: Arc<Mutex<HashSet<WriteOperation>>>,
    operation: WriteOperation,
}

impl InFlightGuard {
    pub fn operation(&self) -> WriteOperation {
        self.operation
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.operation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_rejected_until_released() {
        let tracker = InFlightTracker::new();
        let guard = tracker.try_acquire(WriteOperation::Register).unwrap();
        assert!(tracker.try_acquire(WriteOperation::Register).is_none());
        assert!(tracker.is_active(WriteOperation::Register));

        drop(guard);
        assert!(!tracker.is_active(WriteOperation::Register));
        assert!(tracker.try_acquire(WriteOperation::Register).is_some());
    }

    #[test]
    fn test_distinct_operations_run_together() {
        let tracker = InFlightTracker::new();
        let _basic = tracker
            .try_acquire(WriteOperation::ActivatePlan(PlanTier::Basic))
            .unwrap();
        let _premium = tracker
            .try_acquire(WriteOperation::ActivatePlan(PlanTier::Premium))
            .unwrap();
        let _claim = tracker.try_acquire(WriteOperation::ClaimDividends).unwrap();
        assert_eq!(tracker.active_count(), 3);
        assert!(
            tracker
                .try_acquire(WriteOperation::ActivatePlan(PlanTier::Basic))
                .is_none()
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            WriteOperation::ActivatePlan(PlanTier::Master).to_string(),
            "ActivatePlan(master)"
        );
        assert_eq!(WriteOperation::ClaimDividends.to_string(), "ClaimDividends");
    }
}
