/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

/// What a relation accessor returned for one node.
///
/// Accessors may produce a collection, a single (possibly absent) node, or
/// report that the node has no such relation at all.  The latter is not an
/// error: the walker treats it exactly like an empty collection, which
/// allows heterogeneous graphs where leaves have no `children` relation and
/// roots have no `parent` relation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Related<N> {
    /// Zero or more related nodes, in order.
    Many(Vec<N>),
    /// A single related node, if any.
    One(Option<N>),
    /// The node does not support this relation.
    Unsupported,
}

impl<N> Related<N> {
    /// Whether the accessor reported the relation as unsupported.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Related::Unsupported)
    }

    /// Flatten into candidate nodes. Absent single values and unsupported
    /// relations produce nothing.
    pub fn into_nodes(self) -> Vec<N> {
        match self {
            Related::Many(nodes) => nodes,
            Related::One(node) => node.into_iter().collect(),
            Related::Unsupported => Vec::new(),
        }
    }
}

impl<N> From<Vec<N>> for Related<N> {
    fn from(nodes: Vec<N>) -> Self {
        Related::Many(nodes)
    }
}

impl<N: Clone> From<&[N]> for Related<N> {
    fn from(nodes: &[N]) -> Self {
        Related::Many(nodes.to_vec())
    }
}

impl<N> From<Option<N>> for Related<N> {
    fn from(node: Option<N>) -> Self {
        Related::One(node)
    }
}
