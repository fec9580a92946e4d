use std::collections::HashMap;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::generator::Side;
use crate::domain::node::Node;

/// Tree node in the arena-based build workspace.
#[derive(Debug)]
pub struct ArenaNode<T> {
    pub value: T,
    /// Index of the left child in the arena
    pub left: Option<Index>,
    /// Index of the right child in the arena
    pub right: Option<Index>,
}

/// Arena-based binary tree used while a tree is being grown.
///
/// Nodes are addressed by generational indices, so the builder can attach
/// children to any queued node without holding borrows into the structure.
/// [`TreeArena::into_tree`] materializes the owned [`Node`] form.
#[derive(Debug)]
pub struct TreeArena<T> {
    arena: Arena<ArenaNode<T>>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
}

impl<T> Default for TreeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TreeArena<T> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Insert a node. Without a parent the node becomes the root; with a
    /// parent it is attached on the given side, replacing nothing: the slot
    /// must be empty.
    pub fn insert_node(&mut self, value: T, parent: Option<(Index, Side)>) -> Index {
        let node = ArenaNode {
            value,
            left: None,
            right: None,
        };
        let node_idx = self.arena.insert(node);

        if let Some((parent_idx, side)) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                let slot = match side {
                    Side::Left => &mut parent.left,
                    Side::Right => &mut parent.right,
                };
                debug_assert!(slot.is_none(), "child slot already occupied");
                *slot = Some(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&ArenaNode<T>> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_, T> {
        PostOrderIterator::new(self)
    }

    /// Move every value out of the arena into an owned [`Node`] tree.
    ///
    /// Children are assembled before their parents (post-order), so no
    /// recursion is involved.
    #[instrument(level = "debug", skip(self))]
    pub fn into_tree(mut self) -> Option<Node<T>> {
        let root = self.root?;
        let order: Vec<Index> = self.iter_postorder().map(|(idx, _)| idx).collect();
        let mut built: HashMap<Index, Node<T>> = HashMap::with_capacity(order.len());

        for idx in order {
            if let Some(node) = self.arena.remove(idx) {
                let mut take = |child: Option<Index>| child.and_then(|c| built.remove(&c));
                let left = take(node.left);
                let right = take(node.right);
                built.insert(idx, Node::with_children(node.value, left, right));
            }
        }

        built.remove(&root)
    }
}

/// Post-order iterator, left subtree before right subtree before parent.
pub struct PostOrderIterator<'a, T> {
    arena: &'a TreeArena<T>,
    stack: Vec<(Index, bool)>,
}

impl<'a, T> PostOrderIterator<'a, T> {
    fn new(arena: &'a TreeArena<T>) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push((root, false));
        }
        Self { arena, stack }
    }
}

impl<'a, T> Iterator for PostOrderIterator<'a, T> {
    type Item = (Index, &'a ArenaNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    if let Some(right) = node.right {
                        self.stack.push((right, false));
                    }
                    if let Some(left) = node.left {
                        self.stack.push((left, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //      a
    //     / \
    //    b   c
    //   /
    //  d
    fn sample() -> TreeArena<&'static str> {
        let mut tree = TreeArena::new();
        let a = tree.insert_node("a", None);
        let b = tree.insert_node("b", Some((a, Side::Left)));
        tree.insert_node("c", Some((a, Side::Right)));
        tree.insert_node("d", Some((b, Side::Left)));
        tree
    }

    #[test]
    fn test_empty_arena() {
        let tree: TreeArena<i32> = TreeArena::new();
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
        assert_eq!(tree.iter_postorder().count(), 0);
        assert!(tree.into_tree().is_none());
    }

    #[test]
    fn test_postorder_visits_children_first() {
        let tree = sample();
        assert_eq!(tree.len(), 4);
        let post: Vec<_> = tree.iter_postorder().map(|(_, n)| n.value).collect();
        assert_eq!(post, ["d", "b", "c", "a"]);
    }

    #[test]
    fn test_into_tree_preserves_sides() {
        let node = sample().into_tree().unwrap();
        assert_eq!(node.value, "a");
        let b = node.left.as_deref().unwrap();
        assert_eq!(b.value, "b");
        assert_eq!(b.left.as_deref().map(|d| d.value), Some("d"));
        assert!(b.right.is_none());
        assert_eq!(node.right.as_deref().map(|c| c.value), Some("c"));
    }
}
