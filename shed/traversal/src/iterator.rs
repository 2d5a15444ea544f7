/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use std::collections::HashSet;
use std::collections::VecDeque;
use std::hash::Hash;
use std::iter::FusedIterator;

use crate::Description;
use crate::Order;
use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    NotStarted,
    Yielding,
    Halted,
}

/// Pending work on the frontier.
enum Frame<N> {
    /// The start node.  It is always expanded, whatever the prune and
    /// expand_only conditions say.
    Start(N),
    /// A node whose relations have not been fetched yet.
    Unexpanded(N),
    /// Relations of an expanded node that still have to be visited.
    Candidates(std::vec::IntoIter<N>),
}

/// Outcome of visiting a single candidate.
enum Visit<N> {
    Yield(N),
    Skip,
    Halt(Option<N>),
}

/// Lazy walk over the graph described by a [`Description`].
///
/// Nothing is fetched from the graph until the first call to `next`, and
/// every call does only the work needed to produce one more node.  Relation
/// accessors of a node are invoked when the walk reaches that node's
/// relations, not when the node itself is yielded, so infinite graphs can be
/// walked as long as the consumer stops pulling or a stop condition fires.
///
/// Depth first and breadth first share one frontier: expanded nodes are
/// pushed to its front for depth first and to its back for breadth first.
///
/// An iterator is single use; walk the description again to start over.
pub struct TraversalIter<'a, N> {
    description: &'a Description<N>,
    state: State,
    frontier: VecDeque<Frame<N>>,
    /// Nodes already yielded.  Only maintained when `uniq` is set.
    visited: HashSet<N>,
    /// Nodes already scheduled for expansion.  Only maintained when `uniq`
    /// is set.
    expanded: HashSet<N>,
    yielded: usize,
}

impl<'a, N: Clone + Eq + Hash> TraversalIter<'a, N> {
    /// Create an iterator over `description`.  Fails if the description has
    /// no start node or no relation.
    pub fn new(description: &'a Description<N>) -> Result<Self> {
        description.check_complete()?;
        Ok(Self {
            description,
            state: State::NotStarted,
            frontier: VecDeque::new(),
            visited: HashSet::new(),
            expanded: HashSet::new(),
            yielded: 0,
        })
    }

    /// Whether the walk is over, either exhausted or stopped.
    pub fn is_halted(&self) -> bool {
        self.state == State::Halted
    }

    /// Number of nodes yielded so far.
    pub fn yielded(&self) -> usize {
        self.yielded
    }

    fn start(&mut self) {
        self.state = State::Yielding;
        if let Some(start_node) = self.description.start_node() {
            self.frontier.push_back(Frame::Start(start_node.clone()));
        }
    }

    fn halt(&mut self) {
        self.state = State::Halted;
        self.frontier.clear();
    }

    /// Candidates for `node`: the flattened results of every relation, in
    /// registration order, minus nodes already yielded.
    fn relations_for(&self, node: &N) -> std::vec::IntoIter<N> {
        let uniq = self.description.is_uniq();
        let mut candidates = Vec::new();
        for (relation, related) in self.description.related(node) {
            if related.is_unsupported() {
                tracing::trace!(relation, "relation not supported by node, skipping");
                continue;
            }
            candidates.extend(
                related
                    .into_nodes()
                    .into_iter()
                    .filter(|candidate| !uniq || !self.visited.contains(candidate)),
            );
        }
        candidates.into_iter()
    }

    fn schedule(&mut self, node: N) {
        match self.description.order() {
            Order::DepthFirst => self.frontier.push_front(Frame::Unexpanded(node)),
            Order::BreadthFirst => self.frontier.push_back(Frame::Unexpanded(node)),
        }
    }

    fn visit(&mut self, node: N, always_expand: bool) -> Visit<N> {
        let description = self.description;
        let uniq = description.is_uniq();

        if description.stops_before(&node) {
            tracing::debug!(yielded = self.yielded, "stop_before matched, halting traversal");
            return Visit::Halt(None);
        }

        let include = (!uniq || !self.visited.contains(&node)) && description.include_node(&node);
        if include && uniq {
            self.visited.insert(node.clone());
        }

        if description.stops_after(&node) {
            tracing::debug!(yielded = self.yielded, "stop_after matched, halting traversal");
            return Visit::Halt(include.then_some(node));
        }

        if (always_expand || description.expand_node(&node))
            && (!uniq || self.expanded.insert(node.clone()))
        {
            self.schedule(node.clone());
        }

        if include { Visit::Yield(node) } else { Visit::Skip }
    }
}

impl<N: Clone + Eq + Hash> Iterator for TraversalIter<'_, N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        loop {
            match self.state {
                State::Halted => return None,
                State::NotStarted => self.start(),
                State::Yielding => {}
            }

            let Some(frame) = self.frontier.pop_front() else {
                tracing::debug!(yielded = self.yielded, "traversal frontier exhausted");
                self.halt();
                return None;
            };

            let visit = match frame {
                Frame::Start(node) => self.visit(node, true),
                Frame::Unexpanded(node) => {
                    let candidates = self.relations_for(&node);
                    self.frontier.push_front(Frame::Candidates(candidates));
                    continue;
                }
                Frame::Candidates(mut candidates) => {
                    let Some(candidate) = candidates.next() else {
                        continue;
                    };
                    // Remaining siblings go back first so that a depth first
                    // expansion of `candidate` lands in front of them.
                    self.frontier.push_front(Frame::Candidates(candidates));
                    self.visit(candidate, false)
                }
            };

            match visit {
                Visit::Yield(node) => {
                    self.yielded += 1;
                    return Some(node);
                }
                Visit::Skip => {}
                Visit::Halt(node) => {
                    self.halt();
                    if node.is_some() {
                        self.yielded += 1;
                    }
                    return node;
                }
            }
        }
    }
}

impl<N: Clone + Eq + Hash> FusedIterator for TraversalIter<'_, N> {}
