use thiserror::Error;

/// Caller-input errors for the range operations. The store is never mutated
/// before validation, so a returned error implies the store is unchanged.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum RangeError {
    #[error("empty range: from ({from}) must be less than to ({to})")]
    EmptyRange { from: i64, to: i64 },
    #[error("amount of an additive update must not be zero")]
    ZeroAmount
}
