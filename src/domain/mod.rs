//! Domain layer: tree construction, representations and traversals
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod assoc;
pub mod builder;
pub mod error;
pub mod generator;
pub mod inspect;
pub mod node;
pub mod render;

pub use arena::TreeArena;
pub use assoc::{AssocTree, Key, Slot};
pub use builder::{build, build_default, build_from_rules, validate_height, TreeBuilder, DEFAULT_HEIGHT, DEFAULT_ROOT};
pub use error::{DomainError, TreeResult};
pub use generator::{cube, double_minus_one, Generator, GeneratorPair, Rule, Scalar, Side};
pub use inspect::{flatten_level_order, height_of, leaf_values, node_count, BinaryTree, LevelOrder};
pub use node::Node;
pub use render::TreeRender;
