//! Value generators: pure rules deriving a child value from its parent value.
//!
//! Typed closures are always invocable. Rules coming from configuration or the
//! command line are parsed into [`Rule`] first; text that does not name a rule
//! is rejected with [`DomainError::TypeMismatch`] before any node is built.
//!
//! Overflow policy: integer scalars use two's-complement wrapping arithmetic,
//! `f64` follows IEEE-754 and saturates to infinity. Rule constants are parsed
//! as `i64` and wrap into narrower scalars the same way, so `mul:5000000000`
//! on `i32` multiplies by `705032704`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::{DomainError, TreeResult};

/// A boxed generator, shareable across threads.
pub type Generator<T> = Box<dyn Fn(&T) -> T + Send + Sync>;

static PARAM_RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(add|mul|pow):(-?\d+)$").expect("valid rule pattern"));
static AFFINE_RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^affine:(-?\d+):(-?\d+)$").expect("valid rule pattern"));

/// Child side of a binary node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Both sides in construction order.
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// One-letter tag used when rendering.
    pub fn tag(&self) -> &'static str {
        match self {
            Side::Left => "L",
            Side::Right => "R",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Numeric operations the built-in rules need.
pub trait Scalar: Clone + fmt::Debug + Send + Sync + 'static {
    /// Convert a rule constant; narrower integers keep the low bits.
    fn from_i64(value: i64) -> Self;
    fn add(&self, rhs: &Self) -> Self;
    fn mul(&self, rhs: &Self) -> Self;
    fn neg(&self) -> Self;
    fn pow(&self, exp: u32) -> Self;
}

macro_rules! impl_wrapping_scalar {
    ($($t:ty),*) => {
        $(
            impl Scalar for $t {
                fn from_i64(value: i64) -> Self {
                    value as $t
                }
                fn add(&self, rhs: &Self) -> Self {
                    self.wrapping_add(*rhs)
                }
                fn mul(&self, rhs: &Self) -> Self {
                    self.wrapping_mul(*rhs)
                }
                fn neg(&self) -> Self {
                    self.wrapping_neg()
                }
                fn pow(&self, exp: u32) -> Self {
                    self.wrapping_pow(exp)
                }
            }
        )*
    };
}

impl_wrapping_scalar!(i32, i64, i128);

impl Scalar for f64 {
    fn from_i64(value: i64) -> Self {
        value as f64
    }
    fn add(&self, rhs: &Self) -> Self {
        self + rhs
    }
    fn mul(&self, rhs: &Self) -> Self {
        self * rhs
    }
    fn neg(&self) -> Self {
        -self
    }
    fn pow(&self, exp: u32) -> Self {
        self.powf(f64::from(exp))
    }
}

/// Default left rule: `x³`.
pub fn cube<T: Scalar>(x: &T) -> T {
    x.pow(3)
}

/// Default right rule: `(x × 2) − 1`.
pub fn double_minus_one<T: Scalar>(x: &T) -> T {
    x.mul(&T::from_i64(2)).add(&T::from_i64(-1))
}

/// A named generator, as written in config files and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Identity,
    Negate,
    Square,
    Cube,
    Double,
    DoubleMinusOne,
    Add(i64),
    Mul(i64),
    Pow(u32),
    /// `x * a + b`
    Affine(i64, i64),
}

impl Rule {
    /// Parse rule text for the given side.
    ///
    /// Accepted forms: `identity`, `negate`, `square`, `cube`, `double`,
    /// `double-minus-one`, `add:N`, `mul:N`, `pow:N`, `affine:A:B`.
    pub fn parse(side: Side, text: &str) -> TreeResult<Self> {
        let mismatch = || DomainError::TypeMismatch {
            side,
            found: text.to_string(),
        };
        let trimmed = text.trim();

        let rule = match trimmed.to_ascii_lowercase().as_str() {
            "identity" => Rule::Identity,
            "negate" => Rule::Negate,
            "square" => Rule::Square,
            "cube" => Rule::Cube,
            "double" => Rule::Double,
            "double-minus-one" => Rule::DoubleMinusOne,
            other => {
                if let Some(caps) = PARAM_RULE.captures(other) {
                    let arg = &caps[2];
                    match &caps[1] {
                        "add" => Rule::Add(arg.parse().map_err(|_| mismatch())?),
                        "mul" => Rule::Mul(arg.parse().map_err(|_| mismatch())?),
                        _ => Rule::Pow(arg.parse().map_err(|_| mismatch())?),
                    }
                } else if let Some(caps) = AFFINE_RULE.captures(other) {
                    Rule::Affine(
                        caps[1].parse().map_err(|_| mismatch())?,
                        caps[2].parse().map_err(|_| mismatch())?,
                    )
                } else {
                    return Err(mismatch());
                }
            }
        };
        Ok(rule)
    }

    pub fn apply<T: Scalar>(&self, x: &T) -> T {
        match *self {
            Rule::Identity => x.clone(),
            Rule::Negate => x.neg(),
            Rule::Square => x.pow(2),
            Rule::Cube => cube(x),
            Rule::Double => x.mul(&T::from_i64(2)),
            Rule::DoubleMinusOne => double_minus_one(x),
            Rule::Add(n) => x.add(&T::from_i64(n)),
            Rule::Mul(n) => x.mul(&T::from_i64(n)),
            Rule::Pow(n) => x.pow(n),
            Rule::Affine(a, b) => x.mul(&T::from_i64(a)).add(&T::from_i64(b)),
        }
    }

    pub fn into_generator<T: Scalar>(self) -> Generator<T> {
        Box::new(move |x: &T| self.apply(x))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Identity => write!(f, "identity"),
            Rule::Negate => write!(f, "negate"),
            Rule::Square => write!(f, "square"),
            Rule::Cube => write!(f, "cube"),
            Rule::Double => write!(f, "double"),
            Rule::DoubleMinusOne => write!(f, "double-minus-one"),
            Rule::Add(n) => write!(f, "add:{n}"),
            Rule::Mul(n) => write!(f, "mul:{n}"),
            Rule::Pow(n) => write!(f, "pow:{n}"),
            Rule::Affine(a, b) => write!(f, "affine:{a}:{b}"),
        }
    }
}

/// The left and right generators of one tree.
pub struct GeneratorPair<T> {
    left: Generator<T>,
    right: Generator<T>,
}

impl<T> GeneratorPair<T> {
    pub fn new<L, R>(left: L, right: R) -> Self
    where
        L: Fn(&T) -> T + Send + Sync + 'static,
        R: Fn(&T) -> T + Send + Sync + 'static,
    {
        Self {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[inline]
    pub fn apply(&self, side: Side, parent: &T) -> T {
        match side {
            Side::Left => (self.left)(parent),
            Side::Right => (self.right)(parent),
        }
    }
}

impl<T: Scalar> GeneratorPair<T> {
    /// Resolve both rules; the left side is checked first.
    pub fn from_rules(left: &str, right: &str) -> TreeResult<Self> {
        let left = Rule::parse(Side::Left, left)?;
        let right = Rule::parse(Side::Right, right)?;
        Ok(Self {
            left: left.into_generator(),
            right: right.into_generator(),
        })
    }
}

impl<T: Scalar> Default for GeneratorPair<T> {
    fn default() -> Self {
        Self::new(cube::<T>, double_minus_one::<T>)
    }
}

impl<T> fmt::Debug for GeneratorPair<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorPair").finish_non_exhaustive()
    }
}
