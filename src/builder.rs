use std::fmt;

use crate::{
    error::{ExprError, Result},
    expression::{BinOp, Expr, ExprId},
    pool::ExprPool,
};

/// Operand accepted by the construction methods of [`ExprPool`].
///
/// Raw numbers are wrapped into `Number` nodes on the way in; anything that
/// is neither a number nor an existing node is rejected by the builders.
/// Only integer types that `f64` holds exactly convert into numbers.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Expr(ExprId),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(v) => write!(f, "number {}", v),
            Value::Text(s) => write!(f, "text {:?}", s),
            Value::Expr(id) => write!(f, "expression {}", id),
        }
    }
}

impl From<ExprId> for Value {
    fn from(id: ExprId) -> Self {
        Value::Expr(id)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Number(v.into())
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Number(v.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

enum Operand {
    Node(ExprId),
    Literal(f64),
}

impl ExprPool {
    fn operand(&self, value: Value) -> Result<Operand> {
        match value {
            Value::Expr(id) => Ok(Operand::Node(self.check(id)?)),
            Value::Number(v) => Ok(Operand::Literal(v)),
            Value::Text(_) => Err(ExprError::UnsupportedOperand(value.to_string())),
        }
    }

    fn materialize(&mut self, operand: Operand) -> Result<ExprId> {
        match operand {
            Operand::Node(id) => Ok(id),
            Operand::Literal(v) => self.new_expr(Expr::Number(v)),
        }
    }

    /// Combines two operands with `op`, wrapping raw numbers into `Number`
    /// nodes. Both operands are validated before any node is created.
    pub fn binary(
        &mut self,
        op: BinOp,
        lhs: impl Into<Value>,
        rhs: impl Into<Value>,
    ) -> Result<ExprId> {
        let lhs = self.operand(lhs.into())?;
        let rhs = self.operand(rhs.into())?;
        let lhs = self.materialize(lhs)?;
        let rhs = self.materialize(rhs)?;
        self.operator(op, lhs, rhs)
    }

    /// ```
    /// use symdiff::ExprPool;
    /// let mut pool = ExprPool::new();
    /// let x = pool.symbol("x").unwrap();
    /// let e = pool.add(1, x).unwrap();
    /// assert_eq!(pool.render(e).unwrap(), "1 + x");
    /// ```
    pub fn add(&mut self, lhs: impl Into<Value>, rhs: impl Into<Value>) -> Result<ExprId> {
        self.binary(BinOp::Add, lhs, rhs)
    }

    pub fn sub(&mut self, lhs: impl Into<Value>, rhs: impl Into<Value>) -> Result<ExprId> {
        self.binary(BinOp::Sub, lhs, rhs)
    }

    pub fn mul(&mut self, lhs: impl Into<Value>, rhs: impl Into<Value>) -> Result<ExprId> {
        self.binary(BinOp::Mul, lhs, rhs)
    }

    pub fn div(&mut self, lhs: impl Into<Value>, rhs: impl Into<Value>) -> Result<ExprId> {
        self.binary(BinOp::Div, lhs, rhs)
    }

    pub fn pow(&mut self, lhs: impl Into<Value>, rhs: impl Into<Value>) -> Result<ExprId> {
        self.binary(BinOp::Pow, lhs, rhs)
    }

    /// Builds a polynomial in `var` from its coefficients, highest degree
    /// first.
    ///
    /// ```
    /// use symdiff::ExprPool;
    /// let mut pool = ExprPool::new();
    /// let p = pool.polynomial("x", &[3.0, 0.0, 1.0]).unwrap();
    /// assert_eq!(pool.render(p).unwrap(), "3 * x ^ 2 + 0 * x + 1");
    /// ```
    pub fn polynomial(&mut self, var: &str, coefficients: &[f64]) -> Result<ExprId> {
        if coefficients.is_empty() {
            return self.number(0);
        }
        let x = self.symbol(var)?;
        let degree = coefficients.len() - 1;
        let mut sum: Option<ExprId> = None;
        for (i, &c) in coefficients.iter().enumerate() {
            let term = match degree - i {
                0 => self.number(c)?,
                1 => self.mul(c, x)?,
                k => {
                    let power = self.pow(x, k as u32)?;
                    self.mul(c, power)?
                }
            };
            sum = match sum {
                Some(sum) => Some(self.add(sum, term)?),
                None => Some(term),
            };
        }
        sum.map_or_else(|| self.number(0), Ok)
    }
}
