//! Breadth-first queries over a parsed HTML document
//!
//! The document tree is owned by [`scraper::Html`]; everything here works on borrowed
//! [`NodeRef`]s and never mutates the tree. Traversal is level order: the first match
//! returned by [`find_first`] is the shallowest one, and [`find_all`] yields matches level
//! by level rather than in reading order.

use crate::error::{Error, Result};
use std::collections::VecDeque;

/// Borrowed handle to a node of a parsed document
pub type NodeRef<'a> = ego_tree::NodeRef<'a, scraper::Node>;

/// Return the first node, in breadth-first order starting at `root`, matching `predicate`
///
/// `root` itself is tested first.
///
/// # Errors
///
/// Returns [`Error::NodeNotFound`] when nothing in the subtree matches.
pub fn find_first<'a, F>(root: NodeRef<'a>, mut predicate: F) -> Result<NodeRef<'a>>
where
    F: FnMut(NodeRef<'a>) -> bool,
{
    let mut queue = VecDeque::from([root]);
    while let Some(node) = queue.pop_front() {
        if predicate(node) {
            return Ok(node);
        }
        queue.extend(node.children());
    }
    Err(Error::NodeNotFound)
}

/// Collect every node matching `predicate`, in breadth-first order starting at `root`
pub fn find_all<'a, F>(root: NodeRef<'a>, mut predicate: F) -> Vec<NodeRef<'a>>
where
    F: FnMut(NodeRef<'a>) -> bool,
{
    let mut queue = VecDeque::from([root]);
    let mut nodes = Vec::new();
    while let Some(node) = queue.pop_front() {
        if predicate(node) {
            nodes.push(node);
        }
        queue.extend(node.children());
    }
    nodes
}

/// True when the first attribute named `key` has exactly `value`
pub fn attr_equals(node: NodeRef<'_>, key: &str, value: &str) -> bool {
    get_attr(node, key) == Some(value)
}

/// Value of the first attribute named `key`, if the node is an element carrying it
pub fn get_attr<'a>(node: NodeRef<'a>, key: &str) -> Option<&'a str> {
    let element = node.value().as_element()?;
    element
        .attrs()
        .find(|(name, _)| *name == key)
        .map(|(_, value)| value)
}

/// True when `node` is an element named `tag`
pub fn is_element(node: NodeRef<'_>, tag: &str) -> bool {
    node.value()
        .as_element()
        .is_some_and(|element| element.name() == tag)
}

/// Text content of a text node, `None` for any other node type
pub fn text<'a>(node: NodeRef<'a>) -> Option<&'a str> {
    node.value().as_text().map(|t| &**t)
}

/// True when `node` is a direct child of `parent`
pub fn is_child_of(node: NodeRef<'_>, parent: NodeRef<'_>) -> bool {
    node.parent().is_some_and(|p| p.id() == parent.id())
}

/// True when `node`'s parent is an element named `tag`
pub fn parent_is(node: NodeRef<'_>, tag: &str) -> bool {
    node.parent().is_some_and(|p| is_element(p, tag))
}
