//! Static shape classification.
//!
//! Every type the codec handles carries a [`Shape`] as an associated constant.
//! The shape decides the wire representation and is fixed at compile time:
//! asking for the shape of a type never requires a value, and a type with no
//! [`Shaped`] impl cannot be encoded or decoded at all.
//!
//! # Precedence
//!
//! A type could structurally fit more than one category. The rule, highest
//! first:
//!
//! ```text
//! Composite (registered)
//!   > Primitive (bitwise-copyable, padding-free)
//!   > Optional
//!   > Sequence(Contiguous)   text, or elements that are Primitive
//!   > Sequence(General)
//!   > FixedSequence          [T; N] with non-Primitive T
//! ```
//!
//! In Rust each type has exactly one impl, so the precedence is realised by
//! which impl a type receives. The places where two rules meet are:
//!
//! - `[T; N]` with a Primitive `T` is itself Primitive (`N * size_of::<T>()`
//!   raw bytes), not a FixedSequence. The bytes are the same either way.
//! - `Vec<T>` is Contiguous exactly when `T::SHAPE` is Primitive.
//! - A struct that is both padding-free and registered with `composite!` is
//!   Composite. It cannot also be registered with `primitive!`.

/// How a variable-length sequence lays out its elements after the count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceLayout {
    /// Elements are Primitive and written as one raw block.
    Contiguous,
    /// Each element is written through its own codec.
    General,
}

/// How a composite type was registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositeStyle {
    /// Ordered field list; the wire form is the concatenation of the fields.
    Fields {
        /// Field names in wire order.
        names: &'static [&'static str],
    },
    /// A hand-written routine. Any declared field list is kept as metadata
    /// only; the routine decides the wire form.
    Custom {
        /// Field list declared alongside the routine, possibly empty.
        fields: &'static [&'static str],
    },
}

/// Wire representation category of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// User-registered structure or tuple.
    Composite(CompositeStyle),
    /// Fixed-size raw host layout.
    Primitive {
        /// Encoded width in bytes (`size_of::<T>()`).
        size: usize,
    },
    /// Presence flag followed by an optional payload.
    Optional,
    /// `usize` element count followed by the elements.
    Sequence(SequenceLayout),
    /// `len` element encodings, no count.
    FixedSequence {
        /// Element count, part of the type.
        len: usize,
    },
}

impl Shape {
    /// Whether values of this shape are raw fixed-size bytes.
    pub const fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive { .. })
    }

    /// Encoded width when it is known from the type alone.
    pub const fn fixed_size(&self) -> Option<usize> {
        match self {
            Self::Primitive { size } => Some(*size),
            _ => None,
        }
    }

    /// Layout a `Vec` of elements with this shape uses.
    pub const fn sequence_layout(&self) -> SequenceLayout {
        if self.is_primitive() { SequenceLayout::Contiguous } else { SequenceLayout::General }
    }

    /// Shape of `[T; len]` for an element of this shape.
    pub const fn array_of(&self, len: usize) -> Self {
        match self {
            Self::Primitive { size } => Self::Primitive { size: *size * len },
            _ => Self::FixedSequence { len },
        }
    }
}

/// Static shape classification of a type.
///
/// Implemented alongside [`Encode`](crate::Encode) and
/// [`Decode`](crate::Decode); the `primitive!` and `composite!` macros
/// implement all three.
pub trait Shaped {
    /// The category this type encodes as.
    const SHAPE: Shape;
}

/// Shape of `T`.
pub const fn classify<T: Shaped + ?Sized>() -> Shape {
    T::SHAPE
}
