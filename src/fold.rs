use std::borrow::Borrow;
use std::collections::HashMap;

use tracing::trace;

use crate::{
    error::ExprError,
    expression::ExprId,
    pool::ExprPool,
};

fn nodes<P: Borrow<ExprPool>>(pool: &P) -> &ExprPool {
    <P as Borrow<ExprPool>>::borrow(pool)
}

// Shared by `fold` and `fold_mut`: `P` is either `&ExprPool` or `ExprPool`.
// Results are memoized by node id, so a node reachable through several
// parents is combined once.
fn post_order<P, C, R, E, F>(pool: &mut P, root: ExprId, config: &C, mut f: F) -> Result<R, E>
where
    P: Borrow<ExprPool>,
    C: ?Sized,
    E: From<ExprError>,
    F: FnMut(&mut P, ExprId, &[&R], &C) -> Result<R, E>,
{
    nodes(&*pool).check(root)?;

    // Only visited nodes get an entry, so the cost follows the reachable
    // graph rather than the size of the pool.
    let mut memo: HashMap<ExprId, R> = HashMap::new();
    let mut stack = vec![root];
    while let Some(expr_id) = stack.pop() {
        if memo.contains_key(&expr_id) {
            continue;
        }
        let operands = nodes(&*pool).get_expr(expr_id).operands().to_vec();
        let pending: Vec<ExprId> = operands
            .iter()
            .copied()
            .filter(|o| !memo.contains_key(o))
            .collect();
        if pending.is_empty() {
            let args: Vec<&R> = operands.iter().filter_map(|o| memo.get(o)).collect();
            let result = f(&mut *pool, expr_id, &args, config)?;
            memo.insert(expr_id, result);
        } else {
            // Not ready yet, children go on top.
            stack.push(expr_id);
            stack.extend(pending);
        }
    }
    trace!(root = %root, visited = memo.len(), "fold finished");

    memo.remove(&root).ok_or_else(|| ExprError::UnknownNode(root).into())
}

impl ExprPool {
    /// Folds the graph under `root` bottom-up.
    ///
    /// `f` receives the pool, the node being combined, the results already
    /// computed for its operands (left to right) and `config`. Every distinct
    /// reachable node is combined exactly once, after all of its operands.
    /// The traversal keeps its work stack on the heap, so depth is not bounded
    /// by the call stack.
    ///
    /// ```
    /// use symdiff::{ExprError, ExprPool};
    /// let mut pool = ExprPool::new();
    /// let x = pool.symbol("x").unwrap();
    /// let e = pool.add(x, x).unwrap();
    /// let mut calls = 0;
    /// let size = pool
    ///     .fold(e, &(), |_, _, args: &[&usize], _| {
    ///         calls += 1;
    ///         Ok::<_, ExprError>(1 + args.iter().copied().sum::<usize>())
    ///     })
    ///     .unwrap();
    /// assert_eq!(size, 3);
    /// assert_eq!(calls, 2);
    /// ```
    pub fn fold<C, R, E, F>(&self, root: ExprId, config: &C, mut f: F) -> Result<R, E>
    where
        C: ?Sized,
        E: From<ExprError>,
        F: FnMut(&ExprPool, ExprId, &[&R], &C) -> Result<R, E>,
    {
        let mut pool = self;
        post_order(&mut pool, root, config, |pool, expr_id, args, config| {
            f(*pool, expr_id, args, config)
        })
    }

    /// Like [`fold`](Self::fold), but `f` may append new nodes to the pool.
    /// Only nodes that existed when the fold started are visited.
    pub fn fold_mut<C, R, E, F>(&mut self, root: ExprId, config: &C, f: F) -> Result<R, E>
    where
        C: ?Sized,
        E: From<ExprError>,
        F: FnMut(&mut ExprPool, ExprId, &[&R], &C) -> Result<R, E>,
    {
        post_order(self, root, config, f)
    }
}
