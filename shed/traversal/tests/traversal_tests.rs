/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

//! Walks over a small fixed tree.
//!
//! ```text
//!          root
//!         /    \
//!        a      b
//!       / \      \
//!      c   d      f
//!     /          / \
//!    e          g   h
//! ```

use std::hash::Hash;
use std::hash::Hasher;
use std::rc::Rc;

use anyhow::Result;
use pretty_assertions::assert_eq;
use traversal::Arg;
use traversal::Description;
use traversal::Missing;
use traversal::Related;
use traversal::Traversable;
use traversal::TraversalError;

#[derive(Debug)]
struct TreeNode {
    name: &'static str,
    level: u32,
    children: Vec<Node>,
}

#[derive(Clone, Debug)]
struct Node(Rc<TreeNode>);

impl Node {
    fn new(name: &'static str, level: u32, children: Vec<Node>) -> Self {
        Node(Rc::new(TreeNode {
            name,
            level,
            children,
        }))
    }

    fn name(&self) -> &'static str {
        self.0.name
    }

    fn level(&self) -> u32 {
        self.0.level
    }

    fn children(&self) -> Vec<Node> {
        self.0.children.clone()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.0.name == other.0.name
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name.hash(state)
    }
}

impl Traversable for Node {
    fn relation(&self, name: &str) -> Option<Related<Self>> {
        match name {
            "children" => Some(self.children().into()),
            _ => None,
        }
    }

    fn test(&self, name: &str) -> Option<bool> {
        match name {
            "leaf" => Some(self.0.children.is_empty()),
            _ => None,
        }
    }
}

struct Tree {
    root: Node,
}

impl Tree {
    fn new() -> Self {
        let e = Node::new("e", 3, vec![]);
        let c = Node::new("c", 2, vec![e]);
        let d = Node::new("d", 2, vec![]);
        let a = Node::new("a", 1, vec![c, d]);
        let g = Node::new("g", 3, vec![]);
        let h = Node::new("h", 3, vec![]);
        let f = Node::new("f", 2, vec![g, h]);
        let b = Node::new("b", 1, vec![f]);
        let root = Node::new("root", 0, vec![a, b]);
        Self { root }
    }

    fn find(&self, name: &str) -> Node {
        let mut stack = vec![self.root.clone()];
        while let Some(node) = stack.pop() {
            if node.name() == name {
                return node;
            }
            stack.extend(node.children());
        }
        panic!("no node named {}", name);
    }

    fn description(&self) -> Description<Node> {
        let mut description = Description::new();
        description
            .traverse(self.root.clone())
            .follow_with(|node: &Node| node.children());
        description
    }
}

fn names(description: &Description<Node>) -> Result<Vec<&'static str>> {
    Ok(description.iter()?.map(|node| node.name()).collect())
}

#[test]
fn traverse_all_descendants() -> Result<()> {
    let tree = Tree::new();
    assert_eq!(
        names(&tree.description())?,
        vec!["root", "a", "c", "e", "d", "b", "f", "g", "h"]
    );
    Ok(())
}

#[test]
fn exclude_some_nodes() -> Result<()> {
    let tree = Tree::new();
    let c = tree.find("c");
    let mut description = tree.description();
    description.exclude_if(move |node| *node == c);
    assert_eq!(
        names(&description)?,
        vec!["root", "a", "e", "d", "b", "f", "g", "h"]
    );
    Ok(())
}

#[test]
fn exclude_by_value() -> Result<()> {
    let tree = Tree::new();
    let mut description = tree.description();
    description.exclude([Arg::value(tree.find("c"))])?;
    assert_eq!(
        names(&description)?,
        vec!["root", "a", "e", "d", "b", "f", "g", "h"]
    );
    Ok(())
}

#[test]
fn disjunct_excludes() -> Result<()> {
    let tree = Tree::new();
    let mut description = tree.description();
    description
        .exclude_if(|node| node.name() == "c")
        .exclude_if(|node| node.name() == "d");
    assert_eq!(names(&description)?, vec!["root", "a", "e", "b", "f", "g", "h"]);
    Ok(())
}

#[test]
fn prune_some_nodes() -> Result<()> {
    let tree = Tree::new();
    let mut description = tree.description();
    description.prune([Arg::value(tree.find("c"))])?;
    assert_eq!(
        names(&description)?,
        vec!["root", "a", "c", "d", "b", "f", "g", "h"]
    );
    Ok(())
}

#[test]
fn disjunct_prunes() -> Result<()> {
    let tree = Tree::new();
    let mut description = tree.description();
    description
        .prune_if(|node| node.name() == "c")
        .prune_if(|node| node.name() == "f");
    assert_eq!(names(&description)?, vec!["root", "a", "c", "d", "b", "f"]);
    Ok(())
}

#[test]
fn exclude_and_prune_some_nodes() -> Result<()> {
    let tree = Tree::new();
    let mut description = tree.description();
    description.exclude_and_prune_if(|node| node.name() == "c");
    assert_eq!(names(&description)?, vec!["root", "a", "d", "b", "f", "g", "h"]);

    let mut alias = tree.description();
    alias.prune_and_exclude([Arg::value(tree.find("c"))])?;
    assert_eq!(names(&alias)?, names(&description)?);
    Ok(())
}

#[test]
fn stop_after_condition() -> Result<()> {
    let tree = Tree::new();
    let mut description = tree.description();
    description.stop_after_if(|node| node.name() == "d");
    assert_eq!(names(&description)?, vec!["root", "a", "c", "e", "d"]);
    Ok(())
}

#[test]
fn stop_before_condition() -> Result<()> {
    let tree = Tree::new();
    let mut description = tree.description();
    description.stop_before_if(|node| node.name() == "d");
    assert_eq!(names(&description)?, vec!["root", "a", "c", "e"]);
    Ok(())
}

#[test]
fn stop_at_start_node() -> Result<()> {
    let tree = Tree::new();

    let mut before = tree.description();
    before.stop_before([Arg::value(tree.root.clone())])?;
    assert!(before.is_empty()?);

    let mut after = tree.description();
    after.stop_after([Arg::value(tree.root.clone())])?;
    assert_eq!(names(&after)?, vec!["root"]);
    Ok(())
}

#[test]
fn pruning_start_node_still_walks_its_relations() -> Result<()> {
    let tree = Tree::new();

    let mut pruned = tree.description();
    pruned.prune([Arg::value(tree.root.clone())])?;
    assert_eq!(names(&pruned)?, names(&tree.description())?);

    let mut removed = tree.description();
    removed.exclude_and_prune_if(|node| node.name() == "root");
    assert_eq!(
        names(&removed)?,
        vec!["a", "c", "e", "d", "b", "f", "g", "h"]
    );
    Ok(())
}

#[test]
fn stop_is_global_in_breadth_first() -> Result<()> {
    let tree = Tree::new();
    let mut description = tree.description();
    description
        .breadth_first()
        .stop_after_if(|node| node.name() == "c");
    assert_eq!(names(&description)?, vec!["root", "a", "b", "c"]);
    Ok(())
}

#[test]
fn depth_first_strategy() -> Result<()> {
    let tree = Tree::new();
    let mut description = tree.description();
    description
        .depth_first()
        .exclude_if(|node| node.level() == 3);
    assert_eq!(names(&description)?, vec!["root", "a", "c", "d", "b", "f"]);
    Ok(())
}

#[test]
fn breadth_first_strategy() -> Result<()> {
    let tree = Tree::new();
    let mut description = tree.description();
    description
        .breadth_first()
        .exclude_if(|node| node.level() == 3);
    assert_eq!(names(&description)?, vec!["root", "a", "b", "c", "d", "f"]);
    Ok(())
}

#[test]
fn breadth_first_is_level_order() -> Result<()> {
    let tree = Tree::new();
    let mut description = tree.description();
    description.breadth_first();
    assert_eq!(
        names(&description)?,
        vec!["root", "a", "b", "c", "d", "f", "e", "g", "h"]
    );
    Ok(())
}

#[test]
fn include_only_within_call_is_any_across_calls_is_all() -> Result<()> {
    let tree = Tree::new();
    let mut description = tree.description();
    description
        .include_only([
            Arg::value(tree.find("a")),
            Arg::value(tree.find("c")),
            Arg::value(tree.find("d")),
        ])?
        .include_only_if(|node| node.level() == 2);
    assert_eq!(names(&description)?, vec!["c", "d"]);

    let mut alias = tree.description();
    alias
        .exclude_unless([
            Arg::value(tree.find("a")),
            Arg::value(tree.find("c")),
            Arg::value(tree.find("d")),
        ])?
        .exclude_unless_if(|node| node.level() == 2);
    assert_eq!(names(&alias)?, vec!["c", "d"]);
    Ok(())
}

#[test]
fn expand_only_limits_depth() -> Result<()> {
    let tree = Tree::new();
    let mut description = tree.description();
    description.expand_only_if(|node| node.level() < 2);
    assert_eq!(names(&description)?, vec!["root", "a", "c", "d", "b", "f"]);

    description.expand_only([Arg::value(tree.root.clone()), Arg::value(tree.find("b"))])?;
    assert_eq!(names(&description)?, vec!["root", "a", "b", "f"]);
    Ok(())
}

#[test]
fn named_relations_and_predicates() -> Result<()> {
    let tree = Tree::new();
    let mut description = Description::new();
    description
        .traverse(tree.root.clone())
        .follow(["children".into(), Arg::name("parent")])?
        .exclude([Arg::name("leaf")])?;
    assert_eq!(names(&description)?, vec!["root", "a", "c", "b", "f"]);

    let mut unknown = tree.description();
    unknown.exclude([Arg::name("unknown")])?;
    assert_eq!(unknown.count()?, 9);
    Ok(())
}

#[test]
fn shortcut() -> Result<()> {
    let tree = Tree::new();
    assert_eq!(tree.root.traverse_by("children").count()?, 9);

    let shortcut = tree.root.traverse();
    assert_eq!(shortcut.start_node(), Some(&tree.root));
    assert_eq!(shortcut.relation_count(), 0);
    Ok(())
}

#[test]
fn lazy_sequence_reads() -> Result<()> {
    let tree = Tree::new();
    let description = tree.description();

    let mut iter = description.iter()?;
    assert_eq!(iter.next().map(|node| node.name()), Some("root"));
    assert_eq!(iter.nth(2).map(|node| node.name()), Some("e"));
    assert_eq!(iter.last().map(|node| node.name()), Some("h"));

    assert_eq!(description.at(5)?.map(|node| node.name()), Some("b"));
    assert_eq!(description.position(&tree.find("f"))?, Some(6));
    assert_eq!(description.first()?.map(|node| node.name()), Some("root"));
    assert_eq!(description.last()?.map(|node| node.name()), Some("h"));
    Ok(())
}

#[test]
fn walking_twice_is_idempotent() -> Result<()> {
    let tree = Tree::new();
    let mut description = tree.description();
    description.breadth_first().prune_if(|node| node.name() == "a");
    assert_eq!(names(&description)?, names(&description)?);
    Ok(())
}

#[test]
fn incomplete_description() {
    let tree = Tree::new();

    let mut no_start = Description::<Node>::new();
    no_start.follow_with(|node: &Node| node.children());
    assert_eq!(
        no_start.to_vec().err(),
        Some(TraversalError::IncompleteDescription(Missing::StartNode))
    );

    let mut no_relations = Description::new();
    no_relations.traverse(tree.root.clone());
    assert_eq!(
        no_relations.to_vec().err(),
        Some(TraversalError::IncompleteDescription(Missing::Relations))
    );
    assert!(tree.root.traverse().count().is_err());
}

#[test]
fn invalid_arguments() {
    let tree = Tree::new();
    let mut description = tree.description();

    assert_eq!(
        description
            .follow([Arg::value(tree.root.clone())])
            .err(),
        Some(TraversalError::UnsupportedArgument {
            call: "follow",
            kind: "plain value",
        })
    );
    assert_eq!(
        description.exclude(Vec::new()).err(),
        Some(TraversalError::ArgumentsExpected { call: "exclude" })
    );
    assert_eq!(
        description
            .expand_only([Arg::accessor(|node: &Node| node.children())])
            .err(),
        Some(TraversalError::UnsupportedArgument {
            call: "expand_only",
            kind: "relation accessor",
        })
    );
}
