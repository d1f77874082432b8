//! Hierarchic elements
//!
//! The one-dimensional basis on [0, 1] is made of the two vertex functions `1 - x` and `x`
//! followed by one bubble of each degree `k >= 2`: with `t = 2x - 1`, the bubble is
//! `(t^k - 1) / k!` for even `k` and `(t^k - t) / k!` for odd `k`. Quadrilateral functions are
//! tensor products ordered vertices first, then edges, then interior.

use crate::element_type::ElementType;
use crate::reference_cell::{self, ReferenceCellType};
use crate::traits::FiniteElementEvaluator;
use crate::types::{ElementFamily, ReferencePoint};
use itertools::iproduct;

/// The highest degree of the hierarchic elements
pub const MAX_DEGREE: usize = 10;

/// A hierarchic evaluator
pub struct HierarchicEvaluator {
    element_type: ElementType,
    cell_type: ReferenceCellType,
    degree: usize,
    nodes: Vec<ReferencePoint>,
    /// The one-dimensional function on each axis of each shape function
    axis_functions: Vec<[usize; 2]>,
}

impl HierarchicEvaluator {
    /// Create a hierarchic evaluator
    ///
    /// Only intervals and quadrilaterals are implemented.
    pub fn new(element_type: ElementType, degree: usize) -> Option<Self> {
        if degree == 0 || degree > MAX_DEGREE {
            return None;
        }
        let cell_type = element_type.reference_cell().ok()?;
        let axis_functions = match cell_type {
            ReferenceCellType::Interval => (0..=degree).map(|k| [k, 0]).collect(),
            ReferenceCellType::Quadrilateral => {
                let mut f = vec![[0, 0], [1, 0], [0, 1], [1, 1]];
                let bubbles = 2..=degree;
                f.extend(bubbles.clone().map(|k| [k, 0]));
                f.extend(bubbles.clone().map(|k| [0, k]));
                f.extend(bubbles.clone().map(|k| [1, k]));
                f.extend(bubbles.clone().map(|k| [k, 1]));
                f.extend(iproduct!(bubbles.clone(), bubbles).map(|(j, i)| [i, j]));
                f
            }
            _ => {
                return None;
            }
        };
        Some(Self {
            element_type,
            cell_type,
            degree,
            nodes: element_type.reference_nodes().ok()?,
            axis_functions,
        })
    }
}

impl FiniteElementEvaluator for HierarchicEvaluator {
    fn family(&self) -> ElementFamily {
        ElementFamily::Hierarchic
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
        self.axis_functions.len()
    }
    fn dof_count_at_node(&self, node: usize) -> usize {
        let nvertices = reference_cell::vertices(self.cell_type).len();
        let nedges = reference_cell::edges(self.cell_type).len();
        let bubbles = self.degree - 1;
        if node >= self.element_type.node_count() {
            0
        } else if node < nvertices {
            1
        } else if node < nvertices + nedges {
            bubbles
        } else {
            bubbles * bubbles
        }
    }
    fn interior_dof_count(&self) -> usize {
        self.dof_count()
            - (0..self.element_type.node_count())
                .map(|n| self.dof_count_at_node(n))
                .sum::<usize>()
    }
    fn shape(&self, index: usize, point: &ReferencePoint) -> f64 {
        let tdim = reference_cell::dim(self.cell_type);
        (0..tdim)
            .map(|d| hierarchic(self.axis_functions[index][d], point[d]))
            .product()
    }
    fn shape_derivative(&self, index: usize, axis: usize, point: &ReferencePoint) -> f64 {
        let tdim = reference_cell::dim(self.cell_type);
        if axis >= tdim {
            return 0.0;
        }
        (0..tdim)
            .map(|d| {
                if d == axis {
                    hierarchic_derivative(self.axis_functions[index][d], point[d])
                } else {
                    hierarchic(self.axis_functions[index][d], point[d])
                }
            })
            .product()
    }
}

fn factorial(k: usize) -> f64 {
    (1..=k).map(|i| i as f64).product()
}

/// One-dimensional hierarchic function `k` on [0, 1]
fn hierarchic(k: usize, x: f64) -> f64 {
    match k {
        0 => 1.0 - x,
        1 => x,
        _ => {
            let t = 2.0 * x - 1.0;
            let offset = if k % 2 == 0 { 1.0 } else { t };
            (t.powi(k as i32) - offset) / factorial(k)
        }
    }
}

fn hierarchic_derivative(k: usize, x: f64) -> f64 {
    match k {
        0 => -1.0,
        1 => 1.0,
        _ => {
            let t = 2.0 * x - 1.0;
            let offset = if k % 2 == 0 { 0.0 } else { 1.0 };
            2.0 * (k as f64 * t.powi(k as i32 - 1) - offset) / factorial(k)
        }
    }
}
