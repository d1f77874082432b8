//! Lagrange elements
//!
//! Shape function `i` is attached to node `i` of the element type, so the shape functions of a
//! degree `k` element are attached to the first nodes of the element type (the nodes of the
//! degree `k` node layout). Interval, quadrilateral and hexahedron shape functions are tensor
//! products of the one-dimensional functions on the nodes `[0, 1, 0.5]`.

use crate::element_type::ElementType;
use crate::reference_cell::{self, ReferenceCellType};
use crate::traits::FiniteElementEvaluator;
use crate::types::{ElementFamily, ReferencePoint};
use approx::abs_diff_eq;

/// The highest degree of the Lagrange elements
pub const MAX_DEGREE: usize = 2;

/// Values of (1 - z) below this are clamped when evaluating pyramid shape functions
const PYRAMID_APEX_GUARD: f64 = 1e-14;

/// A Lagrange evaluator
pub struct LagrangeEvaluator {
    element_type: ElementType,
    cell_type: ReferenceCellType,
    degree: usize,
    nodes: Vec<ReferencePoint>,
    count: usize,
    /// For tensor product cells, the one-dimensional node on each axis of each shape function
    axis_nodes: Vec<[usize; 3]>,
}

impl LagrangeEvaluator {
    /// Create a Lagrange evaluator
    ///
    /// Returns `None` if the degree is not between 1 and [`MAX_DEGREE`] or the element type does
    /// not have enough nodes for the degree.
    pub fn new(element_type: ElementType, degree: usize) -> Option<Self> {
        if degree == 0 || degree > MAX_DEGREE {
            return None;
        }
        let cell_type = element_type.reference_cell().ok()?;
        let layout = ElementType::from_cell(cell_type, degree)?;
        if layout.node_count() > element_type.node_count() {
            return None;
        }
        let nodes = element_type.reference_nodes().ok()?;
        let count = layout.node_count();
        let tdim = reference_cell::dim(cell_type);

        let axis_nodes = if reference_cell::is_tensor_product(cell_type) {
            nodes[..count]
                .iter()
                .map(|p| {
                    let mut a = [0; 3];
                    for (d, ad) in a.iter_mut().enumerate().take(tdim) {
                        *ad = interval_node(p[d]);
                    }
                    a
                })
                .collect()
        } else {
            vec![]
        };

        Some(Self {
            element_type,
            cell_type,
            degree,
            nodes,
            count,
            axis_nodes,
        })
    }

    /// The geometric evaluator of an element type: the Lagrange element of its default degree
    pub fn geometric(element_type: ElementType) -> Option<Self> {
        Self::new(element_type, element_type.default_degree())
    }

    /// The highest degree supported on an element type
    pub fn max_degree(element_type: ElementType) -> Option<usize> {
        let cell_type = element_type.reference_cell().ok()?;
        (1..=MAX_DEGREE).rev().find(|d| {
            ElementType::from_cell(cell_type, *d)
                .map_or(false, |layout| layout.node_count() <= element_type.node_count())
        })
    }

    fn tensor_shape(&self, index: usize, point: &ReferencePoint) -> f64 {
        let tdim = reference_cell::dim(self.cell_type);
        (0..tdim)
            .map(|d| interval_shape(self.degree, self.axis_nodes[index][d], point[d]))
            .product()
    }

    fn tensor_shape_derivative(&self, index: usize, axis: usize, point: &ReferencePoint) -> f64 {
        let tdim = reference_cell::dim(self.cell_type);
        (0..tdim)
            .map(|d| {
                if d == axis {
                    interval_shape_derivative(self.degree, self.axis_nodes[index][d], point[d])
                } else {
                    interval_shape(self.degree, self.axis_nodes[index][d], point[d])
                }
            })
            .product()
    }

    fn simplex_shape(&self, index: usize, point: &ReferencePoint) -> f64 {
        let tdim = reference_cell::dim(self.cell_type);
        let nvertices = tdim + 1;
        if self.degree == 1 {
            barycentric(tdim, index, point)
        } else if index < nvertices {
            let l = barycentric(tdim, index, point);
            l * (2.0 * l - 1.0)
        } else {
            let [a, b] = reference_cell::edges(self.cell_type)[index - nvertices];
            4.0 * barycentric(tdim, a, point) * barycentric(tdim, b, point)
        }
    }

    fn simplex_shape_derivative(&self, index: usize, axis: usize, point: &ReferencePoint) -> f64 {
        let tdim = reference_cell::dim(self.cell_type);
        let nvertices = tdim + 1;
        if self.degree == 1 {
            barycentric_derivative(index, axis)
        } else if index < nvertices {
            let l = barycentric(tdim, index, point);
            (4.0 * l - 1.0) * barycentric_derivative(index, axis)
        } else {
            let [a, b] = reference_cell::edges(self.cell_type)[index - nvertices];
            4.0 * (barycentric_derivative(a, axis) * barycentric(tdim, b, point)
                + barycentric(tdim, a, point) * barycentric_derivative(b, axis))
        }
    }

    fn prism_shape(&self, index: usize, point: &ReferencePoint) -> f64 {
        let height = if index < 3 {
            1.0 - point.z()
        } else {
            point.z()
        };
        barycentric(2, index % 3, point) * height
    }

    fn prism_shape_derivative(&self, index: usize, axis: usize, point: &ReferencePoint) -> f64 {
        let (height, height_derivative) = if index < 3 {
            (1.0 - point.z(), -1.0)
        } else {
            (point.z(), 1.0)
        };
        if axis == 2 {
            barycentric(2, index % 3, point) * height_derivative
        } else {
            barycentric_derivative(index % 3, axis) * height
        }
    }

    fn pyramid_shape(&self, index: usize, point: &ReferencePoint) -> f64 {
        let (x, y, z) = (point.x(), point.y(), point.z());
        let w = (1.0 - z).max(PYRAMID_APEX_GUARD);
        match index {
            0 => (w - x) * (w - y) / w,
            1 => x * (w - y) / w,
            2 => (w - x) * y / w,
            3 => x * y / w,
            _ => z,
        }
    }

    fn pyramid_shape_derivative(&self, index: usize, axis: usize, point: &ReferencePoint) -> f64 {
        let (x, y, z) = (point.x(), point.y(), point.z());
        let w = (1.0 - z).max(PYRAMID_APEX_GUARD);
        let xy = x * y / (w * w);
        match (index, axis) {
            (0, 0) => -(w - y) / w,
            (0, 1) => -(w - x) / w,
            (0, _) => xy - 1.0,
            (1, 0) => (w - y) / w,
            (1, 1) => -x / w,
            (1, _) => -xy,
            (2, 0) => -y / w,
            (2, 1) => (w - x) / w,
            (2, _) => -xy,
            (3, 0) => y / w,
            (3, 1) => x / w,
            (3, _) => xy,
            (_, 2) => 1.0,
            _ => 0.0,
        }
    }
}

impl FiniteElementEvaluator for LagrangeEvaluator {
    fn family(&self) -> ElementFamily {
        ElementFamily::Lagrange
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
        self.count
    }
    fn dof_count_at_node(&self, node: usize) -> usize {
        if node < self.count {
            1
        } else {
            0
        }
    }
    fn interior_dof_count(&self) -> usize {
        0
    }
    fn shape(&self, index: usize, point: &ReferencePoint) -> f64 {
        match self.cell_type {
            ReferenceCellType::Point => 1.0,
            ReferenceCellType::Interval
            | ReferenceCellType::Quadrilateral
            | ReferenceCellType::Hexahedron => self.tensor_shape(index, point),
            ReferenceCellType::Triangle | ReferenceCellType::Tetrahedron => {
                self.simplex_shape(index, point)
            }
            ReferenceCellType::Prism => self.prism_shape(index, point),
            ReferenceCellType::Pyramid => self.pyramid_shape(index, point),
        }
    }
    fn shape_derivative(&self, index: usize, axis: usize, point: &ReferencePoint) -> f64 {
        if axis >= reference_cell::dim(self.cell_type) {
            return 0.0;
        }
        match self.cell_type {
            ReferenceCellType::Point => 0.0,
            ReferenceCellType::Interval
            | ReferenceCellType::Quadrilateral
            | ReferenceCellType::Hexahedron => self.tensor_shape_derivative(index, axis, point),
            ReferenceCellType::Triangle | ReferenceCellType::Tetrahedron => {
                self.simplex_shape_derivative(index, axis, point)
            }
            ReferenceCellType::Prism => self.prism_shape_derivative(index, axis, point),
            ReferenceCellType::Pyramid => self.pyramid_shape_derivative(index, axis, point),
        }
    }
}

/// The index of a coordinate in the one-dimensional node list `[0, 1, 0.5]`
fn interval_node(c: f64) -> usize {
    if abs_diff_eq!(c, 0.0) {
        0
    } else if abs_diff_eq!(c, 1.0) {
        1
    } else {
        2
    }
}

/// One-dimensional Lagrange function on the nodes `[0, 1, 0.5]`
fn interval_shape(degree: usize, node: usize, x: f64) -> f64 {
    match (degree, node) {
        (1, 0) => 1.0 - x,
        (1, 1) => x,
        (2, 0) => (1.0 - x) * (1.0 - 2.0 * x),
        (2, 1) => x * (2.0 * x - 1.0),
        (2, 2) => 4.0 * x * (1.0 - x),
        _ => {
            panic!("Unsupported Lagrange degree");
        }
    }
}

fn interval_shape_derivative(degree: usize, node: usize, x: f64) -> f64 {
    match (degree, node) {
        (1, 0) => -1.0,
        (1, 1) => 1.0,
        (2, 0) => 4.0 * x - 3.0,
        (2, 1) => 4.0 * x - 1.0,
        (2, 2) => 4.0 - 8.0 * x,
        _ => {
            panic!("Unsupported Lagrange degree");
        }
    }
}

/// Barycentric coordinate `index` of a point in the reference simplex of dimension `tdim`
fn barycentric(tdim: usize, index: usize, point: &ReferencePoint) -> f64 {
    if index == 0 {
        1.0 - (0..tdim).map(|d| point[d]).sum::<f64>()
    } else {
        point[index - 1]
    }
}

fn barycentric_derivative(index: usize, axis: usize) -> f64 {
    if index == 0 {
        -1.0
    } else if axis == index - 1 {
        1.0
    } else {
        0.0
    }
}
