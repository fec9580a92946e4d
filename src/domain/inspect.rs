//! Read-only traversals over any binary tree representation.

use std::collections::VecDeque;

use crate::domain::assoc::AssocTree;
use crate::domain::generator::Side;
use crate::domain::node::Node;

/// Uniform read access to a binary tree node.
pub trait BinaryTree {
    type Value;

    fn value(&self) -> &Self::Value;
    fn child(&self, side: Side) -> Option<&Self>;

    fn left(&self) -> Option<&Self> {
        self.child(Side::Left)
    }

    fn right(&self) -> Option<&Self> {
        self.child(Side::Right)
    }
}

impl<T> BinaryTree for Node<T> {
    type Value = T;

    fn value(&self) -> &T {
        &self.value
    }

    fn child(&self, side: Side) -> Option<&Self> {
        Node::child(self, side)
    }
}

impl<T> BinaryTree for AssocTree<T> {
    type Value = T;

    fn value(&self) -> &T {
        AssocTree::value(self)
    }

    fn child(&self, side: Side) -> Option<&Self> {
        AssocTree::child(self, side)
    }
}

/// Breadth-first iterator yielding `(depth, node)`, root at depth 1.
pub struct LevelOrder<'a, B> {
    queue: VecDeque<(usize, &'a B)>,
}

impl<'a, B: BinaryTree> LevelOrder<'a, B> {
    pub fn new(tree: Option<&'a B>) -> Self {
        Self {
            queue: tree.map(|root| (1, root)).into_iter().collect(),
        }
    }
}

impl<'a, B: BinaryTree> Iterator for LevelOrder<'a, B> {
    type Item = (usize, &'a B);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.queue.pop_front()?;
        for side in Side::BOTH {
            if let Some(child) = node.child(side) {
                self.queue.push_back((depth + 1, child));
            }
        }
        Some((depth, node))
    }
}

/// Level-order values with `None` for absent children; trailing `None`s are
/// stripped. An absent tree flattens to an empty vector.
pub fn flatten_level_order<B>(tree: Option<&B>) -> Vec<Option<B::Value>>
where
    B: BinaryTree,
    B::Value: Clone,
{
    let mut result = Vec::new();
    let mut queue: VecDeque<Option<&B>> = tree.into_iter().map(Some).collect();

    while let Some(slot) = queue.pop_front() {
        match slot {
            Some(node) => {
                result.push(Some(node.value().clone()));
                queue.push_back(node.left());
                queue.push_back(node.right());
            }
            None => result.push(None),
        }
    }

    while matches!(result.last(), Some(None)) {
        result.pop();
    }
    result
}

/// Maximum depth reached by a breadth-first walk; 0 for an absent tree.
pub fn height_of<B: BinaryTree>(tree: Option<&B>) -> usize {
    LevelOrder::new(tree).map(|(depth, _)| depth).max().unwrap_or(0)
}

pub fn node_count<B: BinaryTree>(tree: Option<&B>) -> usize {
    LevelOrder::new(tree).count()
}

/// Values of childless nodes, in level order.
pub fn leaf_values<B>(tree: Option<&B>) -> Vec<B::Value>
where
    B: BinaryTree,
    B::Value: Clone,
{
    LevelOrder::new(tree)
        .filter(|(_, node)| node.left().is_none() && node.right().is_none())
        .map(|(_, node)| node.value().clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    //    1
    //   / \
    //  2   3
    //   \
    //    5
    fn lopsided() -> Node<i32> {
        Node::with_children(
            1,
            Some(Node::with_children(2, None, Some(Node::leaf(5)))),
            Some(Node::leaf(3)),
        )
    }

    #[test]
    fn test_flatten_keeps_inner_gaps() {
        assert_eq!(
            flatten_level_order(Some(&lopsided())),
            vec![Some(1), Some(2), Some(3), None, Some(5)]
        );
    }

    #[test]
    fn test_flatten_absent_tree() {
        assert!(flatten_level_order::<Node<i32>>(None).is_empty());
    }

    #[test]
    fn test_flatten_single_node() {
        assert_eq!(flatten_level_order(Some(&Node::leaf('a'))), vec![Some('a')]);
    }

    #[test]
    fn test_height_and_counts() {
        let tree = lopsided();
        assert_eq!(height_of(Some(&tree)), 3);
        assert_eq!(height_of::<Node<i32>>(None), 0);
        assert_eq!(node_count(Some(&tree)), 4);
        assert_eq!(leaf_values(Some(&tree)), vec![3, 5]);
    }

    #[test]
    fn test_inspectors_agree_across_forms() {
        let node = lopsided();
        let assoc = node.to_associative();
        assert_eq!(flatten_level_order(Some(&node)), flatten_level_order(Some(&assoc)));
        assert_eq!(height_of(Some(&node)), height_of(Some(&assoc)));
        assert_eq!(leaf_values(Some(&node)), leaf_values(Some(&assoc)));
    }

    #[test]
    fn test_level_order_depths() {
        let depths: Vec<(usize, i32)> = LevelOrder::new(Some(&lopsided()))
            .map(|(d, n)| (d, n.value))
            .collect();
        assert_eq!(depths, vec![(1, 1), (2, 2), (2, 3), (3, 5)]);
    }
}
