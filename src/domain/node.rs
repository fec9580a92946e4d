//! Object form of a tree node: direct `value`/`left`/`right` fields.

use crate::domain::assoc::AssocTree;
use crate::domain::generator::Side;

/// Tree node with exclusively owned children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<T> {
    pub value: T,
    pub left: Option<Box<Node<T>>>,
    pub right: Option<Box<Node<T>>>,
}

impl<T> Node<T> {
    pub fn leaf(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    pub fn with_children(value: T, left: Option<Node<T>>, right: Option<Node<T>>) -> Self {
        Self {
            value,
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    #[inline]
    pub fn child(&self, side: Side) -> Option<&Node<T>> {
        match side {
            Side::Left => self.left.as_deref(),
            Side::Right => self.right.as_deref(),
        }
    }
}

impl<T: Clone> Node<T> {
    /// Rebuild this (sub)tree in associative form.
    pub fn to_associative(&self) -> AssocTree<T> {
        AssocTree::with_children(
            self.value.clone(),
            self.left.as_ref().map(|child| child.to_associative()),
            self.right.as_ref().map(|child| child.to_associative()),
        )
    }
}
