use tracing::debug;

use crate::{
    error::{ExprError, Result},
    expression::{BinOp, Expr, ExprId},
    pool::ExprPool,
};

/// Per-node result of the derivative fold.
struct Derivative {
    expr: ExprId,
    /// Whether the differentiated subtree mentions the variable at all.
    depends: bool,
}

/// Per-node result when the derivative is written into another pool.
struct Imported {
    /// The node itself, copied into the output pool.
    copy: ExprId,
    derivative: Derivative,
}

/// What a rule needs to know about a node. Operand ids refer to the pool the
/// derivative is written into.
enum Shape {
    Constant,
    Variable,
    Op(BinOp, ExprId, ExprId),
}

impl Shape {
    fn of(expr: &Expr, var: &str) -> Self {
        match expr {
            Expr::Number(_) => Shape::Constant,
            Expr::Symbol(name) if name == var => Shape::Variable,
            Expr::Symbol(_) => Shape::Constant,
            Expr::Op(op, [a, b]) => Shape::Op(*op, *a, *b),
        }
    }
}

fn derivative_of(
    pool: &mut ExprPool,
    expr_id: ExprId,
    d: &[&Derivative],
    var: &str,
) -> Result<Derivative> {
    let shape = Shape::of(pool.get_expr(expr_id), var);
    apply_rule(pool, shape, d, var)
}

fn apply_rule(
    pool: &mut ExprPool,
    shape: Shape,
    d: &[&Derivative],
    var: &str,
) -> Result<Derivative> {
    let (op, a, b) = match shape {
        Shape::Constant => {
            return Ok(Derivative {
                expr: pool.number(0)?,
                depends: false,
            })
        }
        Shape::Variable => {
            return Ok(Derivative {
                expr: pool.number(1)?,
                depends: true,
            })
        }
        Shape::Op(op, a, b) => (op, a, b),
    };
    let (da, db) = (d[0], d[1]);
    let expr = match op {
        BinOp::Add => pool.add(da.expr, db.expr)?,
        BinOp::Sub => pool.sub(da.expr, db.expr)?,
        BinOp::Mul => {
            let lhs = pool.mul(da.expr, b)?;
            let rhs = pool.mul(a, db.expr)?;
            pool.add(lhs, rhs)?
        }
        BinOp::Div => {
            let lhs = pool.mul(da.expr, b)?;
            let rhs = pool.mul(a, db.expr)?;
            let numerator = pool.sub(lhs, rhs)?;
            let denominator = pool.pow(b, 2)?;
            pool.div(numerator, denominator)?
        }
        BinOp::Pow => {
            if db.depends {
                return Err(ExprError::UnsupportedOperation {
                    kind: op.name(),
                    reason: format!("exponent depends on {:?}", var),
                });
            }
            let exponent = pool.sub(b, 1)?;
            let power = pool.pow(a, exponent)?;
            let scaled = pool.mul(b, power)?;
            pool.mul(scaled, da.expr)?
        }
    };
    Ok(Derivative {
        expr,
        depends: da.depends || db.depends,
    })
}

impl ExprPool {
    /// Differentiates `expr_id` with respect to `var`.
    ///
    /// The result is a new, unsimplified graph appended to this pool. It may
    /// share the original operands of products, quotients and powers.
    ///
    /// A `Pow` whose exponent mentions `var` fails with
    /// [`ExprError::UnsupportedOperation`]. The check looks at the symbols in
    /// the exponent, not at its value, so `x ^ (x - x)` is rejected as well.
    ///
    /// ```
    /// use symdiff::ExprPool;
    /// let mut pool = ExprPool::new();
    /// let x = pool.symbol("x").unwrap();
    /// let e = pool.pow(x, 3).unwrap();
    /// let de = pool.differentiate(e, "x").unwrap();
    /// assert_eq!(pool.render(de).unwrap(), "3 * x ^ (3 - 1) * 1");
    /// ```
    pub fn differentiate(&mut self, expr_id: ExprId, var: &str) -> Result<ExprId> {
        let before = self.len();
        let derivative = self.fold_mut(expr_id, var, derivative_of)?;
        debug!(
            var,
            expr = %expr_id,
            derivative = %derivative.expr,
            created = self.len() - before,
            "differentiated"
        );
        Ok(derivative.expr)
    }

    /// Differentiates `expr_id` with respect to `var`, writing the result into
    /// `out` instead of this pool.
    ///
    /// Only reads `self`, so several threads may differentiate the same graph
    /// at once, each into its own output pool. The reachable part of the
    /// input is copied into `out` alongside the derivative, so the result
    /// refers to `out` only. Rules and errors are those of
    /// [`differentiate`](Self::differentiate).
    ///
    /// ```
    /// use symdiff::ExprPool;
    /// let mut pool = ExprPool::new();
    /// let x = pool.symbol("x").unwrap();
    /// let e = pool.mul(x, x).unwrap();
    /// let mut out = ExprPool::new();
    /// let de = pool.differentiate_into(&mut out, e, "x").unwrap();
    /// assert_eq!(out.render(de).unwrap(), "1 * x + x * 1");
    /// ```
    pub fn differentiate_into(
        &self,
        out: &mut ExprPool,
        expr_id: ExprId,
        var: &str,
    ) -> Result<ExprId> {
        let before = out.len();
        let imported = self.fold(expr_id, var, |pool, expr_id, args: &[&Imported], var| {
            let expr = pool.get_expr(expr_id);
            let (copy, shape) = match Shape::of(expr, var) {
                Shape::Op(op, _, _) => {
                    let (a, b) = (args[0].copy, args[1].copy);
                    (out.operator(op, a, b)?, Shape::Op(op, a, b))
                }
                shape => (out.new_expr(expr.clone())?, shape),
            };
            let d: Vec<&Derivative> = args.iter().map(|arg| &arg.derivative).collect();
            let derivative = apply_rule(out, shape, &d, var)?;
            Ok::<_, ExprError>(Imported { copy, derivative })
        })?;
        debug!(
            var,
            expr = %expr_id,
            derivative = %imported.derivative.expr,
            created = out.len() - before,
            "differentiated into output pool"
        );
        Ok(imported.derivative.expr)
    }

    /// Differentiates `order` times in a row. An order of zero returns
    /// `expr_id` itself.
    pub fn nth_derivative(&mut self, expr_id: ExprId, var: &str, order: usize) -> Result<ExprId> {
        let mut current = self.check(expr_id)?;
        for _ in 0..order {
            current = self.differentiate(current, var)?;
        }
        Ok(current)
    }
}
