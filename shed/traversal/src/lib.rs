/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

//! Lazy traversal of trees and graphs.
//!
//! This crate walks arbitrary graphs given a start node and one or more
//! relation accessors (children, parents, siblings, ...).  What to walk is
//! declared up front on a [`Description`]: the order (depth first or
//! breadth first), which nodes to include or exclude, which subtrees to
//! prune, and where to stop.  Walking is done by a [`TraversalIter`], which
//! only does as much work as the consumer pulls.
//!
//! With uniqueness enabled (the default) no node is yielded twice, which
//! makes cyclic graphs safe to walk.
//!
//! ```
//! # use std::collections::HashMap;
//! # use traversal::{Arg, Description};
//! let children: HashMap<&str, Vec<&str>> = [
//!     ("root", vec!["a", "b"]),
//!     ("a", vec!["c", "d"]),
//!     ("b", vec!["f"]),
//! ]
//! .into_iter()
//! .collect();
//!
//! let mut description = Description::new();
//! description
//!     .traverse("root")
//!     .follow_with(move |node: &&str| children.get(node).cloned().unwrap_or_default())
//!     .prune([Arg::value("a")])?;
//!
//! assert_eq!(description.to_vec()?, vec!["root", "a", "b", "f"]);
//! # Ok::<(), traversal::TraversalError>(())
//! ```

use std::borrow::Cow;

#[macro_use]
mod error;
pub use error::Missing;
pub use error::Result;
pub use error::TraversalError;

mod related;
pub use related::Related;

mod condition;
pub use condition::AccessorFn;
pub use condition::Named;
pub use condition::PredicateFn;

mod arg;
pub use arg::Arg;

mod description;
pub use description::Description;
pub use description::Order;

mod iterator;
pub use iterator::TraversalIter;

/// Nodes that can be walked by name and can start a traversal of
/// themselves.
///
/// Both lookups default to "unsupported", so an empty impl is enough to get
/// the [`traverse`](Traversable::traverse) shortcut.
///
/// ```
/// # use traversal::{Related, Traversable};
/// #[derive(Clone, PartialEq, Eq, Hash)]
/// struct Dir(&'static str);
///
/// impl Traversable for Dir {
///     fn relation(&self, name: &str) -> Option<Related<Self>> {
///         match (self.0, name) {
///             ("/", "children") => Some(vec![Dir("/etc"), Dir("/usr")].into()),
///             (_, "children") => Some(Vec::new().into()),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(Dir("/").traverse_by("children").count()?, 3);
/// # Ok::<(), traversal::TraversalError>(())
/// ```
pub trait Traversable: Sized {
    /// Nodes related to `self` through the relation called `name`, or
    /// `None` if `self` has no such relation.
    fn relation(&self, _name: &str) -> Option<Related<Self>> {
        None
    }

    /// Value of the predicate called `name` for `self`, or `None` if `self`
    /// has no such predicate.
    fn test(&self, _name: &str) -> Option<bool> {
        None
    }

    /// A description starting at `self`, with nothing to follow yet.
    fn traverse(&self) -> Description<Self>
    where
        Self: Clone,
    {
        let mut description = Description::new();
        description.traverse(self.clone());
        description
    }

    /// A description starting at `self` and following the relation called
    /// `relation`.
    fn traverse_by(&self, relation: impl Into<Cow<'static, str>>) -> Description<Self>
    where
        Self: Clone,
    {
        let mut description = self.traverse();
        description.follow_named(Named::new(relation));
        description
    }
}
