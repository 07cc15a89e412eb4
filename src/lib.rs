mod builder;
mod differentiation;
mod error;
mod expression;
mod fold;
mod pool;
mod printer;

pub use builder::Value;
pub use error::ExprError;
pub use expression::{BinOp, Expr, ExprId, TERMINAL_PRECEDENCE};
pub use pool::ExprPool;
pub use printer::Style;
