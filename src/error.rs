use crate::expression::ExprId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    #[error("Invalid value: expected {expected}, got {found}")]
    InvalidValue {
        expected: &'static str,
        found: String,
    },
    #[error("Unsupported operand: {0}")]
    UnsupportedOperand(String),
    #[error("Unsupported operation on {kind}: {reason}")]
    UnsupportedOperation {
        kind: &'static str,
        reason: String,
    },
    #[error("Unknown node: {0}")]
    UnknownNode(ExprId),
    #[error("Pool is full: {0} nodes")]
    PoolExhausted(usize),
}

pub type Result<T> = std::result::Result<T, ExprError>;
