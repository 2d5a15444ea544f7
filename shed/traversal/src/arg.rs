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
use crate::condition::AccessorFn;
use crate::condition::Check;
use crate::condition::Named;
use crate::condition::PredicateFn;
use crate::condition::Relation;
use crate::error::Result;

/// An argument to one of the [`Description`](crate::Description)
/// configuration calls.
///
/// Which variants a call accepts depends on what it registers:
///
/// | call                    | `Predicate` | `Accessor` | `Name`    | `Value`  |
/// |-------------------------|-------------|------------|-----------|----------|
/// | `follow`                | error       | relation   | relation  | error    |
/// | filters and stop calls  | predicate   | error      | predicate | equality |
///
/// Unsupported combinations fail with
/// [`TraversalError::UnsupportedArgument`](crate::TraversalError::UnsupportedArgument)
/// naming the call.
pub enum Arg<N> {
    /// A closure deciding whether a node matches.
    Predicate(PredicateFn<N>),
    /// A closure returning the nodes related to a node.
    Accessor(AccessorFn<N>),
    /// A relation or predicate looked up by name on the node, see
    /// [`Traversable`].
    Name(Named<N>),
    /// A node compared with `==`.
    Value(N),
}

impl<N> Arg<N> {
    /// Wrap a predicate closure.
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&N) -> bool + 'static,
    {
        Arg::Predicate(Rc::new(predicate))
    }

    /// Wrap a relation accessor closure.  Anything convertible into
    /// [`Related`] may be returned, e.g. a `Vec<N>` or an `Option<N>`.
    pub fn accessor<F, R>(accessor: F) -> Self
    where
        F: Fn(&N) -> R + 'static,
        R: Into<Related<N>>,
    {
        Arg::Accessor(Rc::new(move |node: &N| accessor(node).into()))
    }

    /// Match nodes equal to `node`.
    pub fn value(node: N) -> Self {
        Arg::Value(node)
    }

    /// Short human readable name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Arg::Predicate(_) => "predicate",
            Arg::Accessor(_) => "relation accessor",
            Arg::Name(_) => "name",
            Arg::Value(_) => "plain value",
        }
    }

    pub(crate) fn into_check(self, call: &'static str) -> Result<Check<N>> {
        match self {
            Arg::Predicate(predicate) => Ok(Check::Callable(predicate)),
            Arg::Name(named) => Ok(Check::Named(named)),
            Arg::Value(value) => Ok(Check::Equals(value)),
            arg @ Arg::Accessor(_) => Err(unsupported_argument!(call, arg)),
        }
    }

    pub(crate) fn into_relation(self, call: &'static str) -> Result<Relation<N>> {
        match self {
            Arg::Accessor(accessor) => Ok(Relation::Callable(accessor)),
            Arg::Name(named) => Ok(Relation::Named(named)),
            arg @ (Arg::Predicate(_) | Arg::Value(_)) => Err(unsupported_argument!(call, arg)),
        }
    }
}

impl<N: Traversable> Arg<N> {
    /// Look up a relation or predicate by name, see [`Traversable`].
    pub fn name(name: impl Into<Cow<'static, str>>) -> Self {
        Arg::Name(Named::new(name))
    }
}

impl<N: Traversable> From<&'static str> for Arg<N> {
    fn from(name: &'static str) -> Self {
        Arg::name(name)
    }
}

impl<N: Traversable> From<String> for Arg<N> {
    fn from(name: String) -> Self {
        Arg::name(name)
    }
}

impl<N: fmt::Debug> fmt::Debug for Arg<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Predicate(_) => f.write_str("Predicate(..)"),
            Arg::Accessor(_) => f.write_str("Accessor(..)"),
            Arg::Name(named) => f.debug_tuple("Name").field(&named.name()).finish(),
            Arg::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}
