/*
Text rendering of binary trees via termtree.
Children are labelled with their side so a lone right child is unambiguous.
 */
use std::fmt;

use termtree::Tree;
use tracing::instrument;

use crate::domain::assoc::AssocTree;
use crate::domain::generator::Side;
use crate::domain::inspect::BinaryTree;
use crate::domain::node::Node;

pub trait TreeRender {
    fn to_termtree(&self) -> Tree<String>;
}

impl<B> TreeRender for B
where
    B: BinaryTree,
    B::Value: fmt::Display,
{
    #[instrument(level = "debug", skip(self))]
    fn to_termtree(&self) -> Tree<String> {
        render(self, self.value().to_string())
    }
}

fn render<B>(node: &B, label: String) -> Tree<String>
where
    B: BinaryTree,
    B::Value: fmt::Display,
{
    let leaves: Vec<Tree<String>> = Side::BOTH
        .iter()
        .filter_map(|&side| {
            node.child(side)
                .map(|child| render(child, format!("{}: {}", side.tag(), child.value())))
        })
        .collect();

    Tree::new(label).with_leaves(leaves)
}

impl<T: fmt::Display> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_termtree())
    }
}

impl<T: fmt::Display> fmt::Display for AssocTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_termtree())
    }
}
