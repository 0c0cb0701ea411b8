use std::collections::TryReserveError;

use thiserror::Error;

/// Failure of a fallible allocation (`try_with_capacity`, `try_insert`).
///
/// Lookups and removals never fail; only growing the backing buffer can.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SparseArrayError {
    /// Doubling the capacity would overflow `usize`.
    #[error("sparse array capacity overflow (current capacity {capacity})")]
    CapacityOverflow { capacity: usize },

    /// The allocator refused the request.
    #[error("sparse array allocation failed: {0}")]
    AllocFailed(#[from] TryReserveError),
}
