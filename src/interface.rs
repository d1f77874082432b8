//! Family- and geometry-agnostic entry points
//!
//! Every function here takes the spatial dimension, an [`FEType`] and an element type (or an
//! element), finds the evaluator that serves the combination, and forwards the request to it.
//! A family that does not implement a cell is served by the Lagrange family at the same degree.

use crate::element_type::ElementType;
use crate::evaluator;
use crate::inverse_map::{self as solver, InverseMapOptions};
use crate::reference_cell;
use crate::traits::MeshElement;
use crate::types::{Error, FEType, PhysicalPoint, ReferencePoint, Result};
use rayon::prelude::*;

/// The default slack used by [`on_reference_element`]
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Is support for infinite elements compiled in?
pub const INFINITE_ELEMENTS_ENABLED: bool = cfg!(feature = "infinite_elements");

fn check_index(index: usize, bound: usize) -> Result<()> {
    if index < bound {
        Ok(())
    } else {
        Err(Error::IndexOutOfRange { index, bound })
    }
}

/// The number of shape functions
pub fn n_shape_functions(dim: usize, fe_type: FEType, element_type: ElementType) -> Result<usize> {
    Ok(evaluator::create_evaluator(dim, fe_type, element_type)?.shape_function_count())
}

/// The number of degrees of freedom
pub fn n_dofs(dim: usize, fe_type: FEType, element_type: ElementType) -> Result<usize> {
    Ok(evaluator::create_evaluator(dim, fe_type, element_type)?.dof_count())
}

/// The number of degrees of freedom associated with a node
pub fn n_dofs_at_node(
    dim: usize,
    fe_type: FEType,
    element_type: ElementType,
    node: usize,
) -> Result<usize> {
    let e = evaluator::create_evaluator(dim, fe_type, element_type)?;
    check_index(node, element_type.node_count())?;
    Ok(e.dof_count_at_node(node))
}

/// The number of degrees of freedom not associated with any node
pub fn n_dofs_per_element(dim: usize, fe_type: FEType, element_type: ElementType) -> Result<usize> {
    Ok(evaluator::create_evaluator(dim, fe_type, element_type)?.interior_dof_count())
}

/// The values at the nodes of an element of a finite element function
///
/// `solution` holds one coefficient per degree of freedom. The result holds one value per node.
pub fn nodal_solution<E: MeshElement + ?Sized>(
    dim: usize,
    fe_type: FEType,
    element: &E,
    solution: &[f64],
) -> Result<Vec<f64>> {
    let e = evaluator::create_evaluator(dim, fe_type, element.element_type())?;
    if solution.len() != e.dof_count() {
        return Err(Error::SizeMismatch {
            expected: e.dof_count(),
            actual: solution.len(),
        });
    }
    Ok(e.nodal_solution(solution))
}

/// The value of shape function `i` at a reference point
pub fn shape(
    dim: usize,
    fe_type: FEType,
    element_type: ElementType,
    i: usize,
    point: &ReferencePoint,
) -> Result<f64> {
    let e = evaluator::create_evaluator(dim, fe_type, element_type)?;
    check_index(i, e.shape_function_count())?;
    Ok(e.shape(i, point))
}

/// The value of shape function `i` at a reference point, taking the element type from an element
pub fn shape_on_element<E: MeshElement + ?Sized>(
    dim: usize,
    fe_type: FEType,
    element: &E,
    i: usize,
    point: &ReferencePoint,
) -> Result<f64> {
    shape(dim, fe_type, element.element_type(), i, point)
}

/// The derivative of shape function `i` along reference axis `axis`
pub fn shape_derivative(
    dim: usize,
    fe_type: FEType,
    element_type: ElementType,
    i: usize,
    axis: usize,
    point: &ReferencePoint,
) -> Result<f64> {
    let e = evaluator::create_evaluator(dim, fe_type, element_type)?;
    check_index(i, e.shape_function_count())?;
    check_index(axis, dim.max(1))?;
    Ok(e.shape_derivative(i, axis, point))
}

/// Is a reference point inside the reference cell of an element type?
///
/// Every inequality defining the cell is relaxed by `eps`. Negative values of `eps` are treated
/// as zero.
pub fn on_reference_element(
    point: &ReferencePoint,
    element_type: ElementType,
    eps: f64,
) -> Result<bool> {
    Ok(reference_cell::contains(
        element_type.reference_cell()?,
        point,
        eps,
    ))
}

/// [`on_reference_element`] with the slack [`DEFAULT_TOLERANCE`]
pub fn on_reference_element_default(
    point: &ReferencePoint,
    element_type: ElementType,
) -> Result<bool> {
    on_reference_element(point, element_type, DEFAULT_TOLERANCE)
}

/// Map a reference point to physical coordinates
///
/// The map is the geometric map of the element, which does not depend on `fe_type`; the
/// combination is still validated.
pub fn map<E: MeshElement + ?Sized>(
    dim: usize,
    fe_type: FEType,
    element: &E,
    point: &ReferencePoint,
) -> Result<PhysicalPoint> {
    evaluator::create_evaluator(dim, fe_type, element.element_type())?;
    solver::map(element, point)
}

/// Find the reference point that an element maps to a physical point
pub fn inverse_map<E: MeshElement + ?Sized>(
    dim: usize,
    fe_type: FEType,
    element: &E,
    point: &PhysicalPoint,
) -> Result<ReferencePoint> {
    inverse_map_with_options(dim, fe_type, element, point, &InverseMapOptions::default())
}

/// [`inverse_map`] with a custom tolerance and iteration cap
pub fn inverse_map_with_options<E: MeshElement + ?Sized>(
    dim: usize,
    fe_type: FEType,
    element: &E,
    point: &PhysicalPoint,
    options: &InverseMapOptions,
) -> Result<ReferencePoint> {
    evaluator::create_evaluator(dim, fe_type, element.element_type())?;
    solver::inverse_map(element, point, options)
}

/// Inverse map a batch of points on one element
///
/// The points are processed in parallel. If any point fails, the error of the first failing
/// point (in input order) is returned.
pub fn inverse_map_points<E: MeshElement + Sync + ?Sized>(
    dim: usize,
    fe_type: FEType,
    element: &E,
    points: &[PhysicalPoint],
) -> Result<Vec<ReferencePoint>> {
    evaluator::create_evaluator(dim, fe_type, element.element_type())?;
    let options = InverseMapOptions::default();
    let results = points
        .par_iter()
        .map(|p| solver::inverse_map(element, p, &options))
        .collect::<Vec<_>>();
    results.into_iter().collect()
}

/// The highest degree available for a family on an element type
///
/// The degree of `fe_type` is ignored.
pub fn max_degree(fe_type: FEType, element_type: ElementType) -> Result<usize> {
    evaluator::max_degree(fe_type.family, element_type)
}

/// Is the element type an infinite element?
#[cfg(feature = "infinite_elements")]
pub fn is_infinite_element(element_type: ElementType) -> bool {
    element_type.is_infinite()
}

/// Is the element type an infinite element?
///
/// Support for infinite elements is not compiled in, so this is always false.
#[cfg(not(feature = "infinite_elements"))]
pub fn is_infinite_element(_element_type: ElementType) -> bool {
    false
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::element::PhysicalElement;
    use crate::types::ElementFamily;
    use approx::assert_relative_eq;

    #[test]
    fn test_node_index_bound() {
        let t = ElementType::Quadrilateral4;
        assert_eq!(n_dofs_at_node(2, FEType::lagrange(1), t, 3), Ok(1));
        assert_eq!(
            n_dofs_at_node(2, FEType::lagrange(1), t, 4),
            Err(Error::IndexOutOfRange { index: 4, bound: 4 })
        );
    }

    #[test]
    fn test_shape_index_bound() {
        let p = ReferencePoint::from([0.2, 0.2]);
        assert_eq!(
            shape(2, FEType::lagrange(1), ElementType::Triangle6, 3, &p),
            Err(Error::IndexOutOfRange { index: 3, bound: 3 })
        );
        assert!(shape(2, FEType::lagrange(2), ElementType::Triangle6, 5, &p).is_ok());
    }

    #[test]
    fn test_derivative_axis_bound() {
        let p = ReferencePoint::from([0.2]);
        assert_eq!(
            shape_derivative(1, FEType::lagrange(1), ElementType::Interval2, 0, 1, &p),
            Err(Error::IndexOutOfRange { index: 1, bound: 1 })
        );
        assert_eq!(
            shape_derivative(1, FEType::lagrange(1), ElementType::Interval2, 0, 0, &p),
            Ok(-1.0)
        );
    }

    #[test]
    fn test_nodal_solution_size() {
        let e = PhysicalElement::reference(ElementType::Triangle3).unwrap();
        assert_eq!(
            nodal_solution(2, FEType::lagrange(1), &e, &[1.0, 2.0]),
            Err(Error::SizeMismatch {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(
            nodal_solution(2, FEType::lagrange(1), &e, &[1.0, 2.0, 3.0]),
            Ok(vec![1.0, 2.0, 3.0])
        );
    }

    #[test]
    fn test_shape_on_element() {
        let e = PhysicalElement::reference(ElementType::Interval2).unwrap();
        let p = ReferencePoint::from([0.25]);
        assert_relative_eq!(
            shape_on_element(1, FEType::lagrange(1), &e, 0, &p).unwrap(),
            0.75
        );
    }

    #[test]
    fn test_max_degree() {
        assert_eq!(
            max_degree(FEType::lagrange(1), ElementType::Tetrahedron10),
            Ok(2)
        );
        assert_eq!(
            max_degree(
                FEType::new(ElementFamily::Monomial, 1),
                ElementType::Pyramid5
            ),
            Ok(6)
        );
    }

    #[test]
    fn test_is_infinite_element() {
        assert!(!is_infinite_element(ElementType::Hexahedron8));
        assert_eq!(
            is_infinite_element(ElementType::InfiniteHexahedron8),
            INFINITE_ELEMENTS_ENABLED
        );
    }
}
