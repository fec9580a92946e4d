//! Tree builder: bounded breadth-first expansion from a root value.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use tracing::{debug, instrument, trace};

use crate::domain::arena::TreeArena;
use crate::domain::assoc::AssocTree;
use crate::domain::error::{DomainError, TreeResult};
use crate::domain::generator::{GeneratorPair, Scalar, Side};
use crate::domain::node::Node;

/// Height used when none is given.
pub const DEFAULT_HEIGHT: i64 = 4;
/// Root value used when none is given.
pub const DEFAULT_ROOT: i64 = 12;

/// Upper bound for the arena pre-allocation; taller trees grow on demand.
const MAX_PREALLOC: usize = 1 << 16;

/// Builds complete binary trees from a pair of generators.
#[derive(Debug)]
pub struct TreeBuilder<T> {
    generators: GeneratorPair<T>,
}

impl<T: Scalar> Default for TreeBuilder<T> {
    fn default() -> Self {
        Self::new(GeneratorPair::default())
    }
}

impl<T: Scalar> TreeBuilder<T> {
    /// Builder whose generators are given as rule text.
    pub fn from_rules(left: &str, right: &str) -> TreeResult<Self> {
        Ok(Self::new(GeneratorPair::from_rules(left, right)?))
    }
}

impl<T: Clone> TreeBuilder<T> {
    pub fn new(generators: GeneratorPair<T>) -> Self {
        Self { generators }
    }

    /// Build a tree of `height` levels rooted at `root`.
    ///
    /// Returns `Ok(None)` for height 0 and `InvalidArgument` for a negative
    /// height.
    #[instrument(level = "debug", skip(self, root))]
    pub fn build(&self, height: i64, root: T) -> TreeResult<Option<Node<T>>> {
        grow(height, root, |side, parent| self.generators.apply(side, parent))
    }

    /// Same as [`TreeBuilder::build`], converted to the associative form.
    pub fn build_associative(&self, height: i64, root: T) -> TreeResult<Option<AssocTree<T>>> {
        Ok(self.build(height, root)?.map(|node| node.to_associative()))
    }
}

impl<T: Clone + Eq + Hash> TreeBuilder<T> {
    /// Build while caching generator results for repeated parent values.
    ///
    /// The cache belongs to this call only and is dropped when it returns.
    #[instrument(level = "debug", skip(self, root))]
    pub fn build_memoized(&self, height: i64, root: T) -> TreeResult<Option<Node<T>>> {
        let mut cache = CallCache::default();
        let tree = grow(height, root, |side, parent| {
            cache.get_or_insert_with(side, parent, |value| self.generators.apply(side, value))
        })?;
        debug!(hits = cache.hits, misses = cache.misses, "dropping call cache");
        Ok(tree)
    }
}

/// Build a tree from two closures.
pub fn build<T, L, R>(height: i64, root: T, left: L, right: R) -> TreeResult<Option<Node<T>>>
where
    T: Clone,
    L: Fn(&T) -> T,
    R: Fn(&T) -> T,
{
    grow(height, root, |side, parent| match side {
        Side::Left => left(parent),
        Side::Right => right(parent),
    })
}

/// Build a tree whose generators are given as rule text.
///
/// The height is validated before the rules are resolved.
pub fn build_from_rules<T: Scalar>(
    height: i64,
    root: T,
    left: &str,
    right: &str,
) -> TreeResult<Option<Node<T>>> {
    validate_height(height)?;
    TreeBuilder::from_rules(left, right)?.build(height, root)
}

/// The default tree: height 4, root 12, `x³` and `(x × 2) − 1`.
pub fn build_default() -> TreeResult<Option<Node<i128>>> {
    TreeBuilder::<i128>::default().build(DEFAULT_HEIGHT, i128::from(DEFAULT_ROOT))
}

/// Convert a requested height into a level count.
pub fn validate_height(height: i64) -> TreeResult<usize> {
    usize::try_from(height).map_err(|_| DomainError::InvalidArgument(height))
}

/// Core expansion shared by every entry point.
///
/// A FIFO queue of `(node, depth)` seeded with `(root, 1)`; a node at
/// `depth >= height` stays childless.
fn grow<T, F>(height: i64, root: T, mut child: F) -> TreeResult<Option<Node<T>>>
where
    F: FnMut(Side, &T) -> T,
{
    let height = validate_height(height)?;
    if height == 0 {
        debug!("height 0: no tree");
        return Ok(None);
    }

    let capacity = u32::try_from(height)
        .ok()
        .and_then(|h| 1usize.checked_shl(h))
        .map_or(MAX_PREALLOC, |n| (n - 1).min(MAX_PREALLOC));
    let mut tree = TreeArena::with_capacity(capacity);
    let root_idx = tree.insert_node(root, None);

    let mut queue = VecDeque::new();
    queue.push_back((root_idx, 1usize));

    while let Some((idx, depth)) = queue.pop_front() {
        if depth >= height {
            continue;
        }

        let (left_value, right_value) = match tree.get_node(idx) {
            Some(node) => (child(Side::Left, &node.value), child(Side::Right, &node.value)),
            None => continue,
        };

        let left_idx = tree.insert_node(left_value, Some((idx, Side::Left)));
        let right_idx = tree.insert_node(right_value, Some((idx, Side::Right)));
        queue.push_back((left_idx, depth + 1));
        queue.push_back((right_idx, depth + 1));
        trace!(depth, queued = queue.len(), "expanded node");
    }

    debug!(height, nodes = tree.len(), "tree built");
    Ok(tree.into_tree())
}

/// Generator results keyed by side and parent value, scoped to one build.
struct CallCache<T> {
    entries: HashMap<(Side, T), T>,
    hits: usize,
    misses: usize,
}

impl<T> Default for CallCache<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }
}

impl<T: Clone + Eq + Hash> CallCache<T> {
    fn get_or_insert_with<F>(&mut self, side: Side, parent: &T, compute: F) -> T
    where
        F: FnOnce(&T) -> T,
    {
        let key = (side, parent.clone());
        if let Some(value) = self.entries.get(&key) {
            self.hits += 1;
            return value.clone();
        }
        self.misses += 1;
        let value = compute(parent);
        self.entries.insert(key, value.clone());
        value
    }
}
