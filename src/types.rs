//! Type definitions

mod point;

pub use point::{PhysicalPoint, ReferencePoint};

use crate::element_type::ElementType;

/// An interpolation family
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(u8)]
pub enum ElementFamily {
    /// Nodal Lagrange elements
    ///
    /// This is the default family: families that do not implement a cell fall back to it.
    #[default]
    Lagrange = 0,
    /// Hierarchic elements built from vertex functions and integrated Legendre-type bubbles
    Hierarchic = 1,
    /// Discontinuous elements spanned by the monomials of the reference coordinates
    Monomial = 2,
}

impl ElementFamily {
    /// Create an element family from a u8
    pub fn from(i: u8) -> Option<ElementFamily> {
        match i {
            0 => Some(ElementFamily::Lagrange),
            1 => Some(ElementFamily::Hierarchic),
            2 => Some(ElementFamily::Monomial),
            _ => None,
        }
    }
}

/// An interpolation family together with a polynomial degree
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct FEType {
    /// The family
    pub family: ElementFamily,
    /// The polynomial degree
    pub degree: usize,
}

impl FEType {
    /// Create a finite element type
    pub fn new(family: ElementFamily, degree: usize) -> Self {
        Self { family, degree }
    }

    /// A Lagrange element type of the given degree
    pub fn lagrange(degree: usize) -> Self {
        Self::new(ElementFamily::Lagrange, degree)
    }
}

impl Default for FEType {
    fn default() -> Self {
        Self::lagrange(1)
    }
}

/// Error type
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// No evaluator (and no applicable default) exists for the requested combination
    #[error("No evaluator for {fe_type:?} on {element_type:?} in dimension {dim}")]
    UnsupportedCombination {
        /// The requested dimension
        dim: usize,
        /// The requested family and degree
        fe_type: FEType,
        /// The requested element type
        element_type: ElementType,
    },
    /// The element type has no finite reference cell
    #[error("Unsupported geometry: {0:?}")]
    UnsupportedGeometry(ElementType),
    /// A shape function or node index is out of range
    #[error("Index {index} out of range (must be less than {bound})")]
    IndexOutOfRange {
        /// The index that was passed
        index: usize,
        /// The number of valid indices
        bound: usize,
    },
    /// A vector had the wrong length
    #[error("Size mismatch: expected {expected}, got {actual}")]
    SizeMismatch {
        /// The expected length
        expected: usize,
        /// The length that was passed
        actual: usize,
    },
    /// The Newton iteration of the inverse map reached its iteration cap
    #[error("Inverse map did not converge after {iterations} iterations (last estimate {estimate:?})")]
    InverseMapDidNotConverge {
        /// The number of iterations performed
        iterations: usize,
        /// The last iterate
        estimate: ReferencePoint,
    },
    /// The Jacobian of the reference map is singular
    #[error("Degenerate element of type {0:?}: the map Jacobian is singular")]
    DegenerateElement(ElementType),
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
