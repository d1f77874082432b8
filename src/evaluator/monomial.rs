//! Monomial elements
//!
//! Discontinuous elements spanned by the monomials of total degree at most `k` in the reference
//! coordinates, ordered by total degree. All degrees of freedom are interior.

use crate::element_type::ElementType;
use crate::reference_cell;
use crate::traits::FiniteElementEvaluator;
use crate::types::{ElementFamily, ReferencePoint};
use itertools::iproduct;

/// The highest degree of the monomial elements
pub const MAX_DEGREE: usize = 6;

/// A monomial evaluator
pub struct MonomialEvaluator {
    element_type: ElementType,
    tdim: usize,
    degree: usize,
    nodes: Vec<ReferencePoint>,
    exponents: Vec<[usize; 3]>,
}

/// The exponents of the monomials of total degree at most `degree` in `tdim` variables
fn exponents(tdim: usize, degree: usize) -> Vec<[usize; 3]> {
    let mut e = vec![];
    for total in 0..=degree {
        for (a, b) in iproduct!((0..=total).rev(), (0..=total).rev()) {
            if a + b > total {
                continue;
            }
            let c = total - a - b;
            let exponent = [a, b, c];
            if exponent.iter().skip(tdim).all(|i| *i == 0) {
                e.push(exponent);
            }
        }
    }
    e
}

impl MonomialEvaluator {
    /// Create a monomial evaluator
    pub fn new(element_type: ElementType, degree: usize) -> Option<Self> {
        if degree > MAX_DEGREE {
            return None;
        }
        let tdim = reference_cell::dim(element_type.reference_cell().ok()?);
        Some(Self {
            element_type,
            tdim,
            degree,
            nodes: element_type.reference_nodes().ok()?,
            exponents: exponents(tdim, degree),
        })
    }
}

impl FiniteElementEvaluator for MonomialEvaluator {
    fn family(&self) -> ElementFamily {
        ElementFamily::Monomial
    }
    fn element_type(&self) -> ElementType {
        self.element_type
    }
    fn degree(&self) -> usize {
        self.degree
    }
    fn reference_nodes(&self) -> &[ReferencePoint] {
        &self.nodes
    }
    fn shape_function_count(&self) -> usize {
        self.exponents.len()
    }
    fn dof_count_at_node(&self, _node: usize) -> usize {
        0
    }
    fn interior_dof_count(&self) -> usize {
        self.exponents.len()
    }
    fn shape(&self, index: usize, point: &ReferencePoint) -> f64 {
        let e = &self.exponents[index];
        (0..self.tdim).map(|d| point[d].powi(e[d] as i32)).product()
    }
    fn shape_derivative(&self, index: usize, axis: usize, point: &ReferencePoint) -> f64 {
        let e = &self.exponents[index];
        if axis >= self.tdim || e[axis] == 0 {
            return 0.0;
        }
        (0..self.tdim)
            .map(|d| {
                if d == axis {
                    e[d] as f64 * point[d].powi(e[d] as i32 - 1)
                } else {
                    point[d].powi(e[d] as i32)
                }
            })
            .product()
    }
}
