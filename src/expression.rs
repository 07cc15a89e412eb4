use std::fmt;

/// Index of a node inside an [`ExprPool`](crate::ExprPool).
///
/// Two ids are equal only if they name the same node; structurally equal
/// nodes built separately get different ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(pub(crate) u32);

impl ExprId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Binary operators, in the order they appear in the renderer's precedence table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Pow => "^",
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            BinOp::Add | BinOp::Sub => 1,
            BinOp::Mul | BinOp::Div => 2,
            BinOp::Pow => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BinOp::Add => "Add",
            BinOp::Sub => "Sub",
            BinOp::Mul => "Mul",
            BinOp::Div => "Div",
            BinOp::Pow => "Pow",
        }
    }
}

/// Precedence of terminals; higher than any operator.
pub const TERMINAL_PRECEDENCE: u8 = 4;

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(f64),
    Symbol(String),
    Op(BinOp, [ExprId; 2]),
}

impl Expr {
    /// Children in left-to-right order. Empty for terminals.
    pub fn operands(&self) -> &[ExprId] {
        match self {
            Expr::Number(_) | Expr::Symbol(_) => &[],
            Expr::Op(_, operands) => operands,
        }
    }

    pub fn precedence(&self) -> u8 {
        match self {
            Expr::Number(_) | Expr::Symbol(_) => TERMINAL_PRECEDENCE,
            Expr::Op(op, _) => op.precedence(),
        }
    }

    /// Kind name as used by the debug form and in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Number(_) => "Number",
            Expr::Symbol(_) => "Symbol",
            Expr::Op(op, _) => op.name(),
        }
    }
}
