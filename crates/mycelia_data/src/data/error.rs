use thiserror::Error;

/// Errors raised when constructing data types from invalid parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// The trait budget cannot be satisfied by seven capped weights.
    #[error("Invalid trait budget: total {total} with per-trait cap {cap}")]
    InvalidTraitBudget { total: u32, cap: u32 },
    /// Stored weights that no budget can hold.
    #[error("Invalid trait vector: weights are empty or overflow")]
    InvalidTraitVector,
}
