//! Associative form of a tree: a mapping with exactly the keys
//! `value`, `left` and `right`.
//!
//! Absent children are stored as [`Slot::Nil`]; a key is never missing.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

use crate::domain::generator::Side;

/// The three keys of an associative node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Value,
    Left,
    Right,
}

impl Key {
    pub const ALL: [Key; 3] = [Key::Value, Key::Left, Key::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            Key::Value => "value",
            Key::Left => "left",
            Key::Right => "right",
        }
    }
}

impl From<Side> for Key {
    fn from(side: Side) -> Self {
        match side {
            Side::Left => Key::Left,
            Side::Right => Key::Right,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry stored under a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<T> {
    Scalar(T),
    Child(Box<AssocTree<T>>),
    Nil,
}

impl<T> Slot<T> {
    fn from_child(child: Option<AssocTree<T>>) -> Self {
        child.map_or(Slot::Nil, |c| Slot::Child(Box::new(c)))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Slot::Nil)
    }

    pub fn as_child(&self) -> Option<&AssocTree<T>> {
        match self {
            Slot::Child(child) => Some(child),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&T> {
        match self {
            Slot::Scalar(value) => Some(value),
            _ => None,
        }
    }
}

/// Tree node in associative form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssocTree<T> {
    fields: BTreeMap<Key, Slot<T>>,
}

impl<T> AssocTree<T> {
    /// Node without children: both child keys hold `Nil`.
    pub fn new(value: T) -> Self {
        Self::with_children(value, None, None)
    }

    pub fn with_children(value: T, left: Option<AssocTree<T>>, right: Option<AssocTree<T>>) -> Self {
        let fields = BTreeMap::from([
            (Key::Value, Slot::Scalar(value)),
            (Key::Left, Slot::from_child(left)),
            (Key::Right, Slot::from_child(right)),
        ]);
        Self { fields }
    }

    pub fn value(&self) -> &T {
        match self.fields.get(&Key::Value) {
            Some(Slot::Scalar(value)) => value,
            _ => unreachable!("associative node always holds a scalar under `value`"),
        }
    }

    pub fn child(&self, side: Side) -> Option<&AssocTree<T>> {
        self.fields.get(&Key::from(side)).and_then(Slot::as_child)
    }

    pub fn left(&self) -> Option<&AssocTree<T>> {
        self.child(Side::Left)
    }

    pub fn right(&self) -> Option<&AssocTree<T>> {
        self.child(Side::Right)
    }

    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.fields.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Key, &Slot<T>)> + '_ {
        self.fields.iter().map(|(key, slot)| (*key, slot))
    }
}

impl<T> Index<Key> for AssocTree<T> {
    type Output = Slot<T>;

    fn index(&self, key: Key) -> &Self::Output {
        // every key is inserted by the constructor and never removed
        &self.fields[&key]
    }
}
