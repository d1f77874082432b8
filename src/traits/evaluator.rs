//! Finite element evaluators

use crate::element_type::ElementType;
use crate::types::{ElementFamily, ReferencePoint};

/// The step used by the default implementation of
/// [`shape_derivative`](FiniteElementEvaluator::shape_derivative)
const DIFFERENCE_STEP: f64 = 1e-7;

pub trait FiniteElementEvaluator: Send + Sync {
    //! The shape functions of one family and degree on one element type
    //!
    //! Indices passed to the methods of this trait are assumed to be in range: the
    //! [`interface`](crate::interface) functions check them before forwarding.

    /// The family
    fn family(&self) -> ElementFamily;

    /// The element type
    fn element_type(&self) -> ElementType;

    /// The polynomial degree
    fn degree(&self) -> usize;

    /// The positions of the element type's nodes on the reference cell
    fn reference_nodes(&self) -> &[ReferencePoint];

    /// The number of shape functions
    fn shape_function_count(&self) -> usize;

    /// The number of degrees of freedom
    fn dof_count(&self) -> usize {
        self.shape_function_count()
    }

    /// The number of degrees of freedom associated with a node
    fn dof_count_at_node(&self, node: usize) -> usize;

    /// The number of degrees of freedom not associated with any node
    fn interior_dof_count(&self) -> usize;

    /// The value of shape function `index` at a point
    fn shape(&self, index: usize, point: &ReferencePoint) -> f64;

    /// The derivative of shape function `index` in the direction of reference axis `axis`
    ///
    /// The default implementation uses a central difference.
    fn shape_derivative(&self, index: usize, axis: usize, point: &ReferencePoint) -> f64 {
        let mut forward = *point;
        forward[axis] += DIFFERENCE_STEP;
        let mut backward = *point;
        backward[axis] -= DIFFERENCE_STEP;
        (self.shape(index, &forward) - self.shape(index, &backward)) / (2.0 * DIFFERENCE_STEP)
    }

    /// Compute one value per node from the coefficients of a finite element function
    ///
    /// `solution` has one entry per degree of freedom. The default implementation evaluates
    /// the finite element function at the reference position of each node.
    fn nodal_solution(&self, solution: &[f64]) -> Vec<f64> {
        self.reference_nodes()
            .iter()
            .map(|p| {
                solution
                    .iter()
                    .enumerate()
                    .map(|(i, c)| c * self.shape(i, p))
                    .sum()
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// The functions `1` and `x^2 y` on a triangle
    struct Quadratic {
        nodes: Vec<ReferencePoint>,
    }

    impl FiniteElementEvaluator for Quadratic {
        fn family(&self) -> ElementFamily {
            ElementFamily::Monomial
        }
        fn element_type(&self) -> ElementType {
            ElementType::Triangle3
        }
        fn degree(&self) -> usize {
            3
        }
        fn reference_nodes(&self) -> &[ReferencePoint] {
            &self.nodes
        }
        fn shape_function_count(&self) -> usize {
            2
        }
        fn dof_count_at_node(&self, _node: usize) -> usize {
            0
        }
        fn interior_dof_count(&self) -> usize {
            2
        }
        fn shape(&self, index: usize, point: &ReferencePoint) -> f64 {
            if index == 0 {
                1.0
            } else {
                point.x() * point.x() * point.y()
            }
        }
    }

    fn quadratic() -> Quadratic {
        Quadratic {
            nodes: ElementType::Triangle3.reference_nodes().unwrap(),
        }
    }

    #[test]
    fn test_difference_derivative() {
        let e = quadratic();
        let p = ReferencePoint::from([0.3, 0.4]);
        assert_abs_diff_eq!(e.shape_derivative(0, 0, &p), 0.0, epsilon = 1e-8);
        assert_abs_diff_eq!(e.shape_derivative(1, 0, &p), 0.24, epsilon = 1e-7);
        assert_abs_diff_eq!(e.shape_derivative(1, 1, &p), 0.09, epsilon = 1e-7);
    }

    #[test]
    fn test_default_nodal_solution() {
        let e = quadratic();
        assert_eq!(e.dof_count(), 2);
        let nodal = e.nodal_solution(&[2.0, 1.0]);
        assert_eq!(nodal.len(), 3);
        assert_abs_diff_eq!(nodal[0], 2.0);
        assert_abs_diff_eq!(nodal[1], 2.0);
        assert_abs_diff_eq!(nodal[2], 2.0);
    }
}
