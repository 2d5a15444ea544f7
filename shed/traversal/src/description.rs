/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use crate::Arg;
use crate::Related;
use crate::TraversalIter;
use crate::condition::Condition;
use crate::condition::Named;
use crate::condition::Relation;
use crate::error::Missing;
use crate::error::Result;
use crate::error::TraversalError;

/// Order in which a [`Description`] walks the graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Order {
    /// Pre-order: a node's relations are walked before its next sibling.
    #[default]
    DepthFirst,
    /// Strict level order: every node at depth `d` is visited before any
    /// node at depth `d + 1`.
    BreadthFirst,
}

/// Declarative description of a traversal.
///
/// A description is built with chained calls and then walked any number of
/// times, every walk using a fresh [`TraversalIter`].  It carries no
/// traversal progress itself.
///
/// Filters registered by separate calls combine as follows:
///
/// * a node is *included* in the output if it matches every `include_only`
///   group and no `exclude` group,
/// * a node is *expanded* if it matches every `expand_only` group and no
///   `prune` group,
/// * the walk halts *before* a node matching any `stop_before` group and
///   right *after* a node matching any `stop_after` group.
///
/// Arguments passed to a single call always form a disjunction.
///
/// ```
/// # use traversal::{Arg, Description};
/// let mut description = Description::new();
/// description
///     .traverse(1u32)
///     .follow_with(|n: &u32| if *n < 8 { vec![n * 2, n * 2 + 1] } else { vec![] })
///     .exclude([Arg::value(2), Arg::value(3)])?
///     .breadth_first();
///
/// assert_eq!(description.to_vec()?, vec![1, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]);
/// # Ok::<(), traversal::TraversalError>(())
/// ```
#[derive(Clone)]
pub struct Description<N> {
    start_node: Option<N>,
    relations: Vec<Relation<N>>,
    exclude: Vec<Rc<Condition<N>>>,
    include_only: Vec<Rc<Condition<N>>>,
    prune: Vec<Rc<Condition<N>>>,
    expand_only: Vec<Rc<Condition<N>>>,
    stop_before: Vec<Rc<Condition<N>>>,
    stop_after: Vec<Rc<Condition<N>>>,
    order: Order,
    uniq: bool,
}

impl<N> Default for Description<N> {
    fn default() -> Self {
        Self {
            start_node: None,
            relations: Vec::new(),
            exclude: Vec::new(),
            include_only: Vec::new(),
            prune: Vec::new(),
            expand_only: Vec::new(),
            stop_before: Vec::new(),
            stop_after: Vec::new(),
            order: Order::default(),
            uniq: true,
        }
    }
}

fn condition<N, I>(call: &'static str, args: I) -> Result<Rc<Condition<N>>>
where
    I: IntoIterator<Item = Arg<N>>,
{
    let checks = args
        .into_iter()
        .map(|arg| arg.into_check(call))
        .collect::<Result<Vec<_>>>()?;
    if checks.is_empty() {
        return Err(TraversalError::ArgumentsExpected { call });
    }
    Ok(Rc::new(Condition::new(checks)))
}

impl<N> Description<N> {
    /// Create a blank description: no start node, no relations, depth first,
    /// unique.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the node the traversal starts from.
    pub fn traverse(&mut self, start_node: N) -> &mut Self {
        self.start_node = Some(start_node);
        self
    }

    /// Declare the relations to follow.  Each argument must be an
    /// [`Arg::Accessor`] or an [`Arg::Name`]; relations are tried in
    /// registration order for every expanded node.
    ///
    /// A relation that a node does not support is skipped for that node.
    pub fn follow<I>(&mut self, relations: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Arg<N>>,
    {
        let relations = relations
            .into_iter()
            .map(|arg| arg.into_relation("follow"))
            .collect::<Result<Vec<_>>>()?;
        if relations.is_empty() {
            return Err(TraversalError::ArgumentsExpected { call: "follow" });
        }
        self.relations.extend(relations);
        Ok(self)
    }

    pub(crate) fn follow_named(&mut self, relation: Named<N>) -> &mut Self {
        self.relations.push(Relation::Named(relation));
        self
    }

    /// Closure form of [`follow`](Self::follow).
    pub fn follow_with<F, R>(&mut self, accessor: F) -> &mut Self
    where
        F: Fn(&N) -> R + 'static,
        R: Into<Related<N>>,
    {
        self.relations.push(Relation::from_fn(accessor));
        self
    }

    /// Exclude matching nodes from the output.  Their relations are still
    /// walked.
    pub fn exclude<I>(&mut self, nodes: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Arg<N>>,
    {
        self.exclude.push(condition("exclude", nodes)?);
        Ok(self)
    }

    /// Closure form of [`exclude`](Self::exclude).
    pub fn exclude_if<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&N) -> bool + 'static,
    {
        self.exclude.push(Rc::new(Condition::from_fn(predicate)));
        self
    }

    /// Keep only matching nodes in the output.  Separate calls must all
    /// match.
    pub fn include_only<I>(&mut self, nodes: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Arg<N>>,
    {
        self.include_only.push(condition("include_only", nodes)?);
        Ok(self)
    }

    /// Closure form of [`include_only`](Self::include_only).
    pub fn include_only_if<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&N) -> bool + 'static,
    {
        self.include_only
            .push(Rc::new(Condition::from_fn(predicate)));
        self
    }

    /// Alias of [`include_only`](Self::include_only).
    pub fn exclude_unless<I>(&mut self, nodes: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Arg<N>>,
    {
        self.include_only.push(condition("exclude_unless", nodes)?);
        Ok(self)
    }

    /// Alias of [`include_only_if`](Self::include_only_if).
    pub fn exclude_unless_if<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&N) -> bool + 'static,
    {
        self.include_only_if(predicate)
    }

    /// Expand only matching nodes, every other node is pruned.  Separate
    /// calls must all match.
    pub fn expand_only<I>(&mut self, nodes: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Arg<N>>,
    {
        self.expand_only.push(condition("expand_only", nodes)?);
        Ok(self)
    }

    /// Closure form of [`expand_only`](Self::expand_only).
    pub fn expand_only_if<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&N) -> bool + 'static,
    {
        self.expand_only.push(Rc::new(Condition::from_fn(predicate)));
        self
    }

    /// Do not walk the relations of matching nodes.  The nodes themselves
    /// are still part of the output.
    pub fn prune<I>(&mut self, nodes: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Arg<N>>,
    {
        self.prune.push(condition("prune", nodes)?);
        Ok(self)
    }

    /// Closure form of [`prune`](Self::prune).
    pub fn prune_if<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&N) -> bool + 'static,
    {
        self.prune.push(Rc::new(Condition::from_fn(predicate)));
        self
    }

    /// Exclude matching nodes together with everything only reachable
    /// through them.
    pub fn exclude_and_prune<I>(&mut self, nodes: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Arg<N>>,
    {
        let condition = condition("exclude_and_prune", nodes)?;
        self.exclude.push(condition.clone());
        self.prune.push(condition);
        Ok(self)
    }

    /// Closure form of [`exclude_and_prune`](Self::exclude_and_prune).
    pub fn exclude_and_prune_if<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&N) -> bool + 'static,
    {
        let condition = Rc::new(Condition::from_fn(predicate));
        self.exclude.push(condition.clone());
        self.prune.push(condition);
        self
    }

    /// Alias of [`exclude_and_prune`](Self::exclude_and_prune).
    pub fn prune_and_exclude<I>(&mut self, nodes: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Arg<N>>,
    {
        self.exclude_and_prune(nodes)
    }

    /// Alias of [`exclude_and_prune_if`](Self::exclude_and_prune_if).
    pub fn prune_and_exclude_if<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&N) -> bool + 'static,
    {
        self.exclude_and_prune_if(predicate)
    }

    /// Halt the whole traversal when a matching node is reached.  The node
    /// itself is not yielded.
    pub fn stop_before<I>(&mut self, nodes: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Arg<N>>,
    {
        self.stop_before.push(condition("stop_before", nodes)?);
        Ok(self)
    }

    /// Closure form of [`stop_before`](Self::stop_before).
    pub fn stop_before_if<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&N) -> bool + 'static,
    {
        self.stop_before.push(Rc::new(Condition::from_fn(predicate)));
        self
    }

    /// Halt the whole traversal right after a matching node.  The node is
    /// yielded if it passes the inclusion filters.
    pub fn stop_after<I>(&mut self, nodes: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Arg<N>>,
    {
        self.stop_after.push(condition("stop_after", nodes)?);
        Ok(self)
    }

    /// Closure form of [`stop_after`](Self::stop_after).
    pub fn stop_after_if<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&N) -> bool + 'static,
    {
        self.stop_after.push(Rc::new(Condition::from_fn(predicate)));
        self
    }

    /// Walk depth first (the default).
    pub fn depth_first(&mut self) -> &mut Self {
        self.order = Order::DepthFirst;
        self
    }

    /// Walk breadth first.
    pub fn breadth_first(&mut self) -> &mut Self {
        self.order = Order::BreadthFirst;
        self
    }

    /// Whether a node may be yielded and expanded more than once.  Enabled
    /// by default; disabling it on a cyclic graph requires a stop condition.
    pub fn uniq(&mut self, uniq: bool) -> &mut Self {
        self.uniq = uniq;
        self
    }

    pub fn start_node(&self) -> Option<&N> {
        self.start_node.as_ref()
    }

    pub fn order(&self) -> Order {
        self.order
    }

    pub fn is_breadth_first(&self) -> bool {
        self.order == Order::BreadthFirst
    }

    pub fn is_uniq(&self) -> bool {
        self.uniq
    }

    /// Number of registered relations.
    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    /// Fails with [`TraversalError::IncompleteDescription`] unless both a
    /// start node and at least one relation were declared.
    pub fn check_complete(&self) -> Result<()> {
        if self.start_node.is_none() {
            return Err(TraversalError::IncompleteDescription(Missing::StartNode));
        }
        if self.relations.is_empty() {
            return Err(TraversalError::IncompleteDescription(Missing::Relations));
        }
        Ok(())
    }

    /// Invoke every relation on `node`, in registration order, paired with
    /// the relation's index.
    pub(crate) fn related(&self, node: &N) -> impl Iterator<Item = (usize, Related<N>)> {
        self.relations
            .iter()
            .enumerate()
            .map(move |(index, relation)| (index, relation.related(node)))
    }
}

impl<N: PartialEq> Description<N> {
    /// Whether `node` matches one of the `stop_before` conditions.
    pub fn stops_before(&self, node: &N) -> bool {
        self.stop_before.iter().any(|cond| cond.matches(node))
    }

    /// Whether `node` matches one of the `stop_after` conditions.
    pub fn stops_after(&self, node: &N) -> bool {
        self.stop_after.iter().any(|cond| cond.matches(node))
    }

    pub fn include_node(&self, node: &N) -> bool {
        self.include_only.iter().all(|cond| cond.matches(node))
            && !self.exclude.iter().any(|cond| cond.matches(node))
    }

    pub fn exclude_node(&self, node: &N) -> bool {
        !self.include_node(node)
    }

    pub fn expand_node(&self, node: &N) -> bool {
        self.expand_only.iter().all(|cond| cond.matches(node))
            && !self.prune.iter().any(|cond| cond.matches(node))
    }

    pub fn prune_node(&self, node: &N) -> bool {
        !self.expand_node(node)
    }
}

impl<N: Clone + Eq + Hash> Description<N> {
    /// Lazily walk the described graph.
    pub fn iter(&self) -> Result<TraversalIter<'_, N>> {
        TraversalIter::new(self)
    }

    /// Walk the described graph, calling `f` for every node.
    pub fn each<F>(&self, mut f: F) -> Result<()>
    where
        F: FnMut(N),
    {
        for node in self.iter()? {
            f(node);
        }
        Ok(())
    }

    /// Collect the whole walk.
    pub fn to_vec(&self) -> Result<Vec<N>> {
        Ok(self.iter()?.collect())
    }

    pub fn first(&self) -> Result<Option<N>> {
        Ok(self.iter()?.next())
    }

    pub fn last(&self) -> Result<Option<N>> {
        Ok(self.iter()?.last())
    }

    /// Node at `index` in the walk.
    pub fn at(&self, index: usize) -> Result<Option<N>> {
        Ok(self.iter()?.nth(index))
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.iter()?.count())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.first()?.is_none())
    }

    /// Index of `node` in the walk.
    pub fn position(&self, node: &N) -> Result<Option<usize>> {
        Ok(self.iter()?.position(|visited| &visited == node))
    }

    /// Nodes at each of `indices`, `None` for indices past the end.
    pub fn values_at(&self, indices: &[usize]) -> Result<Vec<Option<N>>> {
        let nodes = self.to_vec()?;
        Ok(indices.iter().map(|index| nodes.get(*index).cloned()).collect())
    }

    /// The whole walk, last node first.
    pub fn reversed(&self) -> Result<Vec<N>> {
        let mut nodes = self.to_vec()?;
        nodes.reverse();
        Ok(nodes)
    }
}

impl<N: PartialEq> PartialEq for Description<N> {
    fn eq(&self, other: &Self) -> bool {
        self.start_node == other.start_node
            && self.relations == other.relations
            && self.include_only == other.include_only
            && self.exclude == other.exclude
            && self.prune == other.prune
            && self.expand_only == other.expand_only
            && self.stop_before == other.stop_before
            && self.stop_after == other.stop_after
            && self.order == other.order
            && self.uniq == other.uniq
    }
}

impl<N: fmt::Debug> fmt::Debug for Description<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Description")
            .field("start_node", &self.start_node)
            .field("relations", &self.relations.len())
            .field("exclude", &self.exclude.len())
            .field("include_only", &self.include_only.len())
            .field("prune", &self.prune.len())
            .field("expand_only", &self.expand_only.len())
            .field("stop_before", &self.stop_before.len())
            .field("stop_after", &self.stop_after.len())
            .field("order", &self.order)
            .field("uniq", &self.uniq)
            .finish()
    }
}
