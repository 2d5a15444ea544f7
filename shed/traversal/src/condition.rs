/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

use crate::Related;
use crate::Traversable;

pub type PredicateFn<N> = Rc<dyn Fn(&N) -> bool>;
pub type AccessorFn<N> = Rc<dyn Fn(&N) -> Related<N>>;

/// A name resolved against the node itself through [`Traversable`], either
/// as a relation or as a predicate depending on where it is registered.
pub struct Named<N> {
    name: Cow<'static, str>,
    relation: fn(&N, &str) -> Option<Related<N>>,
    test: fn(&N, &str) -> Option<bool>,
}

impl<N: Traversable> Named<N> {
    pub(crate) fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            relation: N::relation,
            test: N::test,
        }
    }
}

impl<N> Named<N> {
    /// The name being resolved.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn related(&self, node: &N) -> Related<N> {
        (self.relation)(node, &self.name).unwrap_or(Related::Unsupported)
    }

    // Nodes that do not know the name never match.
    fn matches(&self, node: &N) -> bool {
        (self.test)(node, &self.name).unwrap_or(false)
    }
}

impl<N> Clone for Named<N> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            relation: self.relation,
            test: self.test,
        }
    }
}

impl<N> PartialEq for Named<N> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<N> fmt::Debug for Named<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Named").field(&self.name).finish()
    }
}

/// A single test applied to a node.
pub(crate) enum Check<N> {
    Callable(PredicateFn<N>),
    Named(Named<N>),
    Equals(N),
}

impl<N: PartialEq> Check<N> {
    fn matches(&self, node: &N) -> bool {
        match self {
            Check::Callable(predicate) => predicate(node),
            Check::Named(named) => named.matches(node),
            Check::Equals(value) => value == node,
        }
    }
}

impl<N: Clone> Clone for Check<N> {
    fn clone(&self) -> Self {
        match self {
            Check::Callable(predicate) => Check::Callable(predicate.clone()),
            Check::Named(named) => Check::Named(named.clone()),
            Check::Equals(value) => Check::Equals(value.clone()),
        }
    }
}

impl<N: PartialEq> PartialEq for Check<N> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Check::Callable(a), Check::Callable(b)) => Rc::ptr_eq(a, b),
            (Check::Named(a), Check::Named(b)) => a == b,
            (Check::Equals(a), Check::Equals(b)) => a == b,
            _ => false,
        }
    }
}

/// The group of checks registered by one configuration call.  It matches a
/// node when any of its checks does.
pub(crate) struct Condition<N> {
    checks: Vec<Check<N>>,
}

impl<N> Condition<N> {
    pub(crate) fn new(checks: Vec<Check<N>>) -> Self {
        Self { checks }
    }

    pub(crate) fn from_fn<F>(predicate: F) -> Self
    where
        F: Fn(&N) -> bool + 'static,
    {
        Self::new(vec![Check::Callable(Rc::new(predicate))])
    }
}

impl<N: PartialEq> Condition<N> {
    pub(crate) fn matches(&self, node: &N) -> bool {
        self.checks.iter().any(|check| check.matches(node))
    }
}

impl<N: PartialEq> PartialEq for Condition<N> {
    fn eq(&self, other: &Self) -> bool {
        self.checks == other.checks
    }
}

/// A registered relation accessor.
pub(crate) enum Relation<N> {
    Callable(AccessorFn<N>),
    Named(Named<N>),
}

impl<N> Relation<N> {
    pub(crate) fn from_fn<F, R>(accessor: F) -> Self
    where
        F: Fn(&N) -> R + 'static,
        R: Into<Related<N>>,
    {
        Relation::Callable(Rc::new(move |node: &N| accessor(node).into()))
    }

    pub(crate) fn related(&self, node: &N) -> Related<N> {
        match self {
            Relation::Callable(accessor) => accessor(node),
            Relation::Named(named) => named.related(node),
        }
    }
}

impl<N> Clone for Relation<N> {
    fn clone(&self) -> Self {
        match self {
            Relation::Callable(accessor) => Relation::Callable(accessor.clone()),
            Relation::Named(named) => Relation::Named(named.clone()),
        }
    }
}

impl<N> PartialEq for Relation<N> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Relation::Callable(a), Relation::Callable(b)) => Rc::ptr_eq(a, b),
            (Relation::Named(a), Relation::Named(b)) => a == b,
            _ => false,
        }
    }
}
