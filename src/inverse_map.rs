//! Maps between reference and physical coordinates
//!
//! The geometry of an element is the Lagrange map of the element type's default degree:
//! `x(r) = sum_i phi_i(r) node_i`. The inverse map solves `x(r) = p` in the least squares sense,
//! so points off an embedded manifold element map to the reference point of their projection.

use crate::element_type::ElementType;
use crate::evaluator::LagrangeEvaluator;
use crate::reference_cell;
use crate::traits::{FiniteElementEvaluator, MeshElement};
use crate::types::{Error, PhysicalPoint, ReferencePoint, Result};
use log::{debug, warn};
use nalgebra::{DMatrix, DVector};

/// Relative tolerance used to decide whether an element map is affine
const AFFINE_TOLERANCE: f64 = 1e-10;

/// Options for the Newton iteration of the inverse map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseMapOptions {
    /// The iteration stops when the update or the residual is smaller than this
    pub tolerance: f64,
    /// The maximum number of Newton iterations
    pub max_iterations: usize,
}

impl Default for InverseMapOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 20,
        }
    }
}

fn geometry(element_type: ElementType) -> Result<LagrangeEvaluator> {
    element_type.reference_cell()?;
    LagrangeEvaluator::geometric(element_type).ok_or(Error::UnsupportedGeometry(element_type))
}

fn forward<E: MeshElement + ?Sized>(
    geometry: &LagrangeEvaluator,
    element: &E,
    point: &ReferencePoint,
) -> PhysicalPoint {
    let mut x = PhysicalPoint::origin();
    for i in 0..geometry.shape_function_count() {
        let phi = geometry.shape(i, point);
        let node = element.node(i);
        for d in 0..3 {
            x[d] += phi * node[d];
        }
    }
    x
}

/// The 3 by tdim Jacobian of the element map
fn jacobian<E: MeshElement + ?Sized>(
    geometry: &LagrangeEvaluator,
    element: &E,
    point: &ReferencePoint,
    tdim: usize,
) -> DMatrix<f64> {
    let mut j = DMatrix::zeros(3, tdim);
    for i in 0..geometry.shape_function_count() {
        let node = element.node(i);
        for axis in 0..tdim {
            let dphi = geometry.shape_derivative(i, axis, point);
            for row in 0..3 {
                j[(row, axis)] += dphi * node[row];
            }
        }
    }
    j
}

fn residual(target: &PhysicalPoint, x: &PhysicalPoint) -> DVector<f64> {
    DVector::from_iterator(3, (0..3).map(|d| target[d] - x[d]))
}

fn translate(point: &ReferencePoint, step: &DVector<f64>) -> ReferencePoint {
    let mut p = *point;
    for (d, s) in step.iter().enumerate() {
        p[d] += s;
    }
    p
}

/// Solve the normal equations `J^T J step = J^T residual`
///
/// Returns `None` if `J^T J` is singular.
fn gauss_newton_step(jacobian: &DMatrix<f64>, residual: &DVector<f64>) -> Option<DVector<f64>> {
    let jt = jacobian.transpose();
    let normal = &jt * jacobian;
    let scale = normal.norm().powi(normal.nrows() as i32);
    if normal.determinant().abs() <= f64::EPSILON * scale {
        return None;
    }
    normal.lu().solve(&(jt * residual))
}

/// Check that an element provides one node per node of its type
fn check_node_count<E: MeshElement + ?Sized>(element: &E) -> Result<()> {
    let expected = element.element_type().node_count();
    let actual = element.node_count();
    if actual == expected {
        Ok(())
    } else {
        Err(Error::SizeMismatch { expected, actual })
    }
}

/// If the element map is affine, its Jacobian
fn affine_jacobian<E: MeshElement + ?Sized>(
    geometry: &LagrangeEvaluator,
    element: &E,
    centre: &ReferencePoint,
    tdim: usize,
) -> Option<DMatrix<f64>> {
    let x_centre = forward(geometry, element, centre);
    let j = jacobian(geometry, element, centre, tdim);
    let count = geometry.shape_function_count();
    let diameter = (0..count)
        .map(|i| element.node(i).distance(&x_centre))
        .fold(0.0, f64::max);

    for (i, r) in geometry.reference_nodes().iter().take(count).enumerate() {
        let offset = DVector::from_iterator(tdim, (0..tdim).map(|d| r[d] - centre[d]));
        let predicted = &j * offset;
        let node = element.node(i);
        let error = (0..3)
            .map(|d| (x_centre[d] + predicted[d] - node[d]).powi(2))
            .sum::<f64>()
            .sqrt();
        if error > AFFINE_TOLERANCE * (1.0 + diameter) {
            return None;
        }
    }
    Some(j)
}

/// Map a reference point to physical coordinates
pub fn map<E: MeshElement + ?Sized>(element: &E, point: &ReferencePoint) -> Result<PhysicalPoint> {
    let geometry = geometry(element.element_type())?;
    check_node_count(element)?;
    Ok(forward(&geometry, element, point))
}

/// Find the reference point that an element maps to a physical point
///
/// Affine elements are inverted directly. Other elements use a Gauss-Newton iteration started
/// at the centroid of the reference cell. A Jacobian that is singular at the centroid means the
/// element is degenerate. If it becomes singular at a later iterate, as it can for points outside
/// the image of the element, the iteration stops and the current estimate is returned in
/// [`Error::InverseMapDidNotConverge`].
pub fn inverse_map<E: MeshElement + ?Sized>(
    element: &E,
    point: &PhysicalPoint,
    options: &InverseMapOptions,
) -> Result<ReferencePoint> {
    let element_type = element.element_type();
    let cell = element_type.reference_cell()?;
    let tdim = reference_cell::dim(cell);
    check_node_count(element)?;
    if tdim == 0 {
        return Ok(ReferencePoint::origin());
    }
    let geometry = geometry(element_type)?;
    let centre = reference_cell::midpoint(cell);

    if let Some(j) = affine_jacobian(&geometry, element, &centre, tdim) {
        debug!("Inverting affine {element_type:?} element directly");
        let r = residual(point, &forward(&geometry, element, &centre));
        let step =
            gauss_newton_step(&j, &r).ok_or(Error::DegenerateElement(element_type))?;
        return Ok(translate(&centre, &step));
    }

    let mut estimate = centre;
    for iteration in 0..options.max_iterations {
        let r = residual(point, &forward(&geometry, element, &estimate));
        if r.norm() <= options.tolerance {
            return Ok(estimate);
        }
        let j = jacobian(&geometry, element, &estimate, tdim);
        let Some(step) = gauss_newton_step(&j, &r) else {
            if iteration == 0 {
                return Err(Error::DegenerateElement(element_type));
            }
            warn!("Inverse map on {element_type:?} element stalled at a singular Jacobian");
            return Err(Error::InverseMapDidNotConverge {
                iterations: iteration,
                estimate,
            });
        };
        estimate = translate(&estimate, &step);
        if step.norm() <= options.tolerance {
            return Ok(estimate);
        }
    }
    warn!(
        "Inverse map on {element_type:?} element did not converge after {} iterations",
        options.max_iterations
    );
    Err(Error::InverseMapDidNotConverge {
        iterations: options.max_iterations,
        estimate,
    })
}
