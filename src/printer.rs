use crate::{
    error::Result,
    expression::{Expr, ExprId},
    pool::ExprPool,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Style {
    /// Infix text with minimal parentheses, e.g. `(a + b) * c`.
    #[default]
    Text,
    /// Unambiguous constructor form, e.g. `Mul(Add(Symbol("a"), Symbol("b")), Symbol("c"))`.
    Debug,
}

/// Pending output of a printer: a node still to be printed, or literal text.
enum Token {
    Expr(ExprId),
    Text(&'static str),
}

// Drives a printer with an explicit stack, so depth is not bounded by the
// call stack. Everything is written into a single output buffer.
fn print_tokens<F>(pool: &ExprPool, expr_id: ExprId, mut print_expr: F) -> Result<String>
where
    F: FnMut(ExprId, &mut String, &mut Vec<Token>),
{
    pool.check(expr_id)?;
    let mut output = String::new();
    let mut stack = vec![Token::Expr(expr_id)];
    while let Some(token) = stack.pop() {
        match token {
            Token::Text(text) => output.push_str(text),
            Token::Expr(expr_id) => print_expr(expr_id, &mut output, &mut stack),
        }
    }
    Ok(output)
}

/// Prints expressions in infix notation.
///
/// A child is parenthesized only when its parent binds strictly tighter.
/// Operand position is not taken into account, so `a - (b - c)` prints as
/// `a - b - c`.
pub(crate) struct TextPrinter<'a> {
    pool: &'a ExprPool,
}

impl<'a> TextPrinter<'a> {
    pub(crate) fn new(pool: &'a ExprPool) -> Self {
        Self { pool }
    }

    pub(crate) fn print(&self, expr_id: ExprId) -> Result<String> {
        print_tokens(self.pool, expr_id, |expr_id, output, stack| {
            self.print_expr(expr_id, output, stack)
        })
    }

    // Operator pieces are pushed in reverse, so the left operand pops first.
    fn print_expr(&self, expr_id: ExprId, output: &mut String, stack: &mut Vec<Token>) {
        match self.pool.get_expr(expr_id) {
            Expr::Number(v) => output.push_str(&v.to_string()),
            Expr::Symbol(name) => output.push_str(name),
            Expr::Op(op, [lhs, rhs]) => {
                self.push_operand(op.precedence(), *rhs, stack);
                stack.push(Token::Text(" "));
                stack.push(Token::Text(op.symbol()));
                stack.push(Token::Text(" "));
                self.push_operand(op.precedence(), *lhs, stack);
            }
        }
    }

    fn push_operand(&self, precedence: u8, child: ExprId, stack: &mut Vec<Token>) {
        if precedence > self.pool.get_expr(child).precedence() {
            stack.push(Token::Text(")"));
            stack.push(Token::Expr(child));
            stack.push(Token::Text("("));
        } else {
            stack.push(Token::Expr(child));
        }
    }
}

/// Prints expressions as nested constructor calls.
pub(crate) struct DebugPrinter<'a> {
    pool: &'a ExprPool,
}

impl<'a> DebugPrinter<'a> {
    pub(crate) fn new(pool: &'a ExprPool) -> Self {
        Self { pool }
    }

    pub(crate) fn print(&self, expr_id: ExprId) -> Result<String> {
        print_tokens(self.pool, expr_id, |expr_id, output, stack| {
            match self.pool.get_expr(expr_id) {
                Expr::Number(v) => output.push_str(&format!("Number({})", v)),
                Expr::Symbol(name) => output.push_str(&format!("Symbol({:?})", name)),
                Expr::Op(op, [lhs, rhs]) => {
                    stack.push(Token::Text(")"));
                    stack.push(Token::Expr(*rhs));
                    stack.push(Token::Text(", "));
                    stack.push(Token::Expr(*lhs));
                    stack.push(Token::Text("("));
                    stack.push(Token::Text(op.name()));
                }
            }
        })
    }
}

impl ExprPool {
    /// Produces text for the expression in the given style.
    ///
    /// ```
    /// use symdiff::{ExprPool, Style};
    /// let mut pool = ExprPool::new();
    /// let x = pool.symbol("x").unwrap();
    /// let e = pool.add(x, 2).unwrap();
    /// assert_eq!(pool.print(e, Style::Text).unwrap(), "x + 2");
    /// assert_eq!(pool.print(e, Style::Debug).unwrap(), "Add(Symbol(\"x\"), Number(2))");
    /// ```
    pub fn print(&self, expr_id: ExprId, style: Style) -> Result<String> {
        match style {
            Style::Text => TextPrinter::new(self).print(expr_id),
            Style::Debug => DebugPrinter::new(self).print(expr_id),
        }
    }

    pub fn render(&self, expr_id: ExprId) -> Result<String> {
        self.print(expr_id, Style::Text)
    }

    pub fn render_debug(&self, expr_id: ExprId) -> Result<String> {
        self.print(expr_id, Style::Debug)
    }
}
