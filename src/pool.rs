use crate::{
    builder::Value,
    error::{ExprError, Result},
    expression::{BinOp, Expr, ExprId},
};

// Ids are `u32`; a pool never hands out an id that does not fit.
fn next_id(len: usize) -> Result<ExprId> {
    u32::try_from(len)
        .map(ExprId)
        .map_err(|_| ExprError::PoolExhausted(len))
}

/// Append-only arena owning every node of one or more expression graphs.
///
/// Nodes are never edited after they are pushed. Operators may only point at
/// nodes that already exist, so a child id is always smaller than its parent
/// id and the graph cannot contain cycles.
#[derive(Clone, Default)]
pub struct ExprPool {
    e: Vec<Expr>,
}

impl ExprPool {
    pub fn new() -> Self {
        Self { e: Vec::new() }
    }

    /// Number of nodes stored in the pool.
    pub fn len(&self) -> usize {
        self.e.len()
    }

    pub fn is_empty(&self) -> bool {
        self.e.is_empty()
    }

    pub(crate) fn new_expr(&mut self, expr: Expr) -> Result<ExprId> {
        let ans = next_id(self.e.len())?;
        self.e.push(expr);
        Ok(ans)
    }

    /// Returns the node with the given id.
    ///
    /// Panics if `expr_id` was not produced by this pool; use
    /// [`try_get_expr`](Self::try_get_expr) for ids of unknown origin.
    pub fn get_expr(&self, expr_id: ExprId) -> &Expr {
        &self.e[expr_id.index()]
    }

    pub fn try_get_expr(&self, expr_id: ExprId) -> Result<&Expr> {
        self.e
            .get(expr_id.index())
            .ok_or(ExprError::UnknownNode(expr_id))
    }

    pub(crate) fn check(&self, expr_id: ExprId) -> Result<ExprId> {
        self.try_get_expr(expr_id).map(|_| expr_id)
    }

    /// Creates a `Number` terminal.
    ///
    /// ```
    /// use symdiff::{ExprError, ExprPool};
    /// let mut pool = ExprPool::new();
    /// let two = pool.number(2).unwrap();
    /// assert_eq!(pool.render(two).unwrap(), "2");
    /// assert!(matches!(pool.number("two"), Err(ExprError::InvalidValue { .. })));
    /// ```
    pub fn number(&mut self, value: impl Into<Value>) -> Result<ExprId> {
        match value.into() {
            Value::Number(v) => self.new_expr(Expr::Number(v)),
            other => Err(ExprError::InvalidValue {
                expected: "a number",
                found: other.to_string(),
            }),
        }
    }

    /// Creates a `Symbol` terminal from a non-empty name.
    pub fn symbol(&mut self, name: impl Into<Value>) -> Result<ExprId> {
        match name.into() {
            Value::Text(name) if !name.is_empty() => self.new_expr(Expr::Symbol(name)),
            other => Err(ExprError::InvalidValue {
                expected: "a non-empty symbol name",
                found: other.to_string(),
            }),
        }
    }

    /// Creates an operator node over two existing nodes.
    pub fn operator(&mut self, op: BinOp, lhs: ExprId, rhs: ExprId) -> Result<ExprId> {
        let lhs = self.check(lhs)?;
        let rhs = self.check(rhs)?;
        self.new_expr(Expr::Op(op, [lhs, rhs]))
    }

    /// Checks whether two subgraphs have the same shape, operators and leaves,
    /// regardless of node identity.
    pub fn same_structure(&self, a: ExprId, b: ExprId) -> bool {
        let mut stack = vec![(a, b)];
        while let Some((a, b)) = stack.pop() {
            if a == b {
                continue;
            }
            let (Ok(lhs), Ok(rhs)) = (self.try_get_expr(a), self.try_get_expr(b)) else {
                return false;
            };
            match (lhs, rhs) {
                (Expr::Number(x), Expr::Number(y)) if x == y => {}
                (Expr::Symbol(x), Expr::Symbol(y)) if x == y => {}
                (Expr::Op(op1, [l1, r1]), Expr::Op(op2, [l2, r2])) if op1 == op2 => {
                    stack.push((*l1, *l2));
                    stack.push((*r1, *r2));
                }
                _ => return false,
            }
        }
        true
    }
}
