//! # bintree
//!
//! Builds complete binary trees of bounded height from a root value and two
//! child rules, one per side. Every non-root value is a pure function of its
//! parent's value.
//!
//! ```
//! use bintree::domain::{build, flatten_level_order, height_of};
//!
//! let tree = build(2, 1, |x: &i64| x * 2, |x: &i64| x + 3).unwrap();
//! assert_eq!(height_of(tree.as_ref()), 2);
//! assert_eq!(flatten_level_order(tree.as_ref()), vec![Some(1), Some(2), Some(4)]);
//! ```
//!
//! Layers, innermost first: `domain` (builder, node forms, inspectors),
//! `application` (tree service), `config` (layered settings) and `cli`.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{
    build, build_default, build_from_rules, flatten_level_order, height_of, AssocTree,
    DomainError, Node, TreeBuilder, TreeResult,
};
