//! Finite element evaluators and the table of family support
//!
//! A family either implements a reference cell, is restricted on it (no evaluator exists), or
//! omits it. Omitted cells are served by the default family at the same degree.

mod hierarchic;
mod lagrange;
mod monomial;

pub use hierarchic::HierarchicEvaluator;
pub use lagrange::LagrangeEvaluator;
pub use monomial::MonomialEvaluator;

use crate::element_type::ElementType;
use crate::reference_cell::ReferenceCellType;
use crate::traits::FiniteElementEvaluator;
use crate::types::{ElementFamily, Error, FEType, Result};
use log::debug;
use std::collections::HashMap;

/// How a family supports a reference cell
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Support {
    /// The family has its own evaluator on the cell
    Implemented,
    /// The family is deliberately unavailable on the cell
    Restricted,
}

const FINITE_CELLS: [ReferenceCellType; 8] = [
    ReferenceCellType::Point,
    ReferenceCellType::Interval,
    ReferenceCellType::Triangle,
    ReferenceCellType::Quadrilateral,
    ReferenceCellType::Tetrahedron,
    ReferenceCellType::Hexahedron,
    ReferenceCellType::Prism,
    ReferenceCellType::Pyramid,
];

lazy_static! {
    static ref SUPPORT: HashMap<(ElementFamily, ReferenceCellType), Support> = {
        let mut table = HashMap::new();
        for cell in FINITE_CELLS {
            table.insert((ElementFamily::Lagrange, cell), Support::Implemented);
            table.insert((ElementFamily::Monomial, cell), Support::Implemented);
        }
        table.insert(
            (ElementFamily::Hierarchic, ReferenceCellType::Interval),
            Support::Implemented,
        );
        table.insert(
            (ElementFamily::Hierarchic, ReferenceCellType::Quadrilateral),
            Support::Implemented,
        );
        table.insert(
            (ElementFamily::Hierarchic, ReferenceCellType::Prism),
            Support::Restricted,
        );
        table.insert(
            (ElementFamily::Hierarchic, ReferenceCellType::Pyramid),
            Support::Restricted,
        );
        table
    };
}

/// How a family supports a reference cell, or `None` if the family omits the cell
pub fn support(family: ElementFamily, cell: ReferenceCellType) -> Option<Support> {
    SUPPORT.get(&(family, cell)).copied()
}

/// The family that serves requests for `family` on `cell`
///
/// Returns `None` if the family is restricted on the cell.
pub fn effective_family(family: ElementFamily, cell: ReferenceCellType) -> Option<ElementFamily> {
    match support(family, cell) {
        Some(Support::Implemented) => Some(family),
        Some(Support::Restricted) => None,
        None => {
            debug!(
                "{family:?} elements are not implemented on {cell:?} cells; using {:?}",
                ElementFamily::default()
            );
            Some(ElementFamily::default())
        }
    }
}

/// Create the evaluator for a family and degree on an element type
pub fn create_evaluator(
    dim: usize,
    fe_type: FEType,
    element_type: ElementType,
) -> Result<Box<dyn FiniteElementEvaluator>> {
    let unsupported = Error::UnsupportedCombination {
        dim,
        fe_type,
        element_type,
    };
    if element_type.is_infinite() || element_type.dim() != dim {
        return Err(unsupported);
    }
    let cell = element_type.reference_cell()?;
    let Some(family) = effective_family(fe_type.family, cell) else {
        return Err(unsupported);
    };
    let evaluator: Option<Box<dyn FiniteElementEvaluator>> = match family {
        ElementFamily::Lagrange => LagrangeEvaluator::new(element_type, fe_type.degree)
            .map(|e| Box::new(e) as Box<dyn FiniteElementEvaluator>),
        ElementFamily::Hierarchic => HierarchicEvaluator::new(element_type, fe_type.degree)
            .map(|e| Box::new(e) as Box<dyn FiniteElementEvaluator>),
        ElementFamily::Monomial => MonomialEvaluator::new(element_type, fe_type.degree)
            .map(|e| Box::new(e) as Box<dyn FiniteElementEvaluator>),
    };
    evaluator.ok_or(unsupported)
}

/// The highest degree available for a family on an element type
pub fn max_degree(family: ElementFamily, element_type: ElementType) -> Result<usize> {
    let unsupported = Error::UnsupportedCombination {
        dim: element_type.dim(),
        fe_type: FEType::new(family, 0),
        element_type,
    };
    if element_type.is_infinite() {
        return Err(unsupported);
    }
    let cell = element_type.reference_cell()?;
    match effective_family(family, cell) {
        Some(ElementFamily::Lagrange) => LagrangeEvaluator::max_degree(element_type),
        Some(ElementFamily::Hierarchic) => Some(hierarchic::MAX_DEGREE),
        Some(ElementFamily::Monomial) => Some(monomial::MAX_DEGREE),
        None => None,
    }
    .ok_or(unsupported)
}

#[cfg(test)]
mod test {
    use super::*;
    use paste::paste;

    #[test]
    fn test_support_table() {
        assert_eq!(
            support(ElementFamily::Lagrange, ReferenceCellType::Pyramid),
            Some(Support::Implemented)
        );
        assert_eq!(
            support(ElementFamily::Hierarchic, ReferenceCellType::Triangle),
            None
        );
        assert_eq!(
            support(ElementFamily::Hierarchic, ReferenceCellType::Prism),
            Some(Support::Restricted)
        );
        assert_eq!(
            effective_family(ElementFamily::Hierarchic, ReferenceCellType::Tetrahedron),
            Some(ElementFamily::Lagrange)
        );
        assert_eq!(
            effective_family(ElementFamily::Hierarchic, ReferenceCellType::Pyramid),
            None
        );
    }

    macro_rules! test_dof_sums {

        ($(($family:ident, $etype:ident, $degree:expr)),+) => {

        $(
            paste! {

                #[test]
                fn [<test_dof_sum_ $family:lower _ $etype:lower _ $degree>]() {
                    let t = ElementType::[<$etype>];
                    let e = create_evaluator(
                        t.dim(),
                        FEType::new(ElementFamily::[<$family>], $degree),
                        t,
                    )
                    .unwrap();
                    let at_nodes = (0..t.node_count())
                        .map(|n| e.dof_count_at_node(n))
                        .sum::<usize>();
                    assert_eq!(at_nodes + e.interior_dof_count(), e.dof_count());
                }

            }
        )*
        };
    }

    test_dof_sums!(
        (Lagrange, Point1, 1),
        (Lagrange, Interval3, 2),
        (Lagrange, Triangle6, 1),
        (Lagrange, Quadrilateral9, 2),
        (Lagrange, Tetrahedron10, 2),
        (Lagrange, Hexahedron27, 2),
        (Lagrange, Prism6, 1),
        (Lagrange, Pyramid5, 1),
        (Hierarchic, Interval2, 5),
        (Hierarchic, Interval3, 3),
        (Hierarchic, Quadrilateral4, 4),
        (Hierarchic, Quadrilateral9, 3),
        (Hierarchic, Triangle6, 2),
        (Hierarchic, Hexahedron8, 1),
        (Monomial, Triangle3, 3),
        (Monomial, Hexahedron8, 2)
    );

    #[test]
    fn test_fallback_matches_lagrange() {
        let t = ElementType::Tetrahedron10;
        let h = create_evaluator(3, FEType::new(ElementFamily::Hierarchic, 2), t).unwrap();
        let l = create_evaluator(3, FEType::lagrange(2), t).unwrap();
        assert_eq!(h.family(), ElementFamily::Lagrange);
        assert_eq!(h.shape_function_count(), l.shape_function_count());
    }

    #[test]
    fn test_unsupported() {
        for (dim, fe_type, t) in [
            (2, FEType::new(ElementFamily::Hierarchic, 1), ElementType::Prism6),
            (3, FEType::new(ElementFamily::Hierarchic, 1), ElementType::Pyramid5),
            (2, FEType::lagrange(1), ElementType::Tetrahedron4),
            (2, FEType::lagrange(2), ElementType::Triangle3),
            (2, FEType::lagrange(1), ElementType::InfiniteQuadrilateral4),
        ] {
            assert_eq!(
                create_evaluator(dim, fe_type, t).err(),
                Some(Error::UnsupportedCombination {
                    dim,
                    fe_type,
                    element_type: t
                })
            );
        }
    }

    #[test]
    fn test_max_degree() {
        assert_eq!(
            max_degree(ElementFamily::Lagrange, ElementType::Quadrilateral9),
            Ok(2)
        );
        assert_eq!(
            max_degree(ElementFamily::Hierarchic, ElementType::Triangle3),
            Ok(1)
        );
        assert_eq!(
            max_degree(ElementFamily::Hierarchic, ElementType::Interval2),
            Ok(hierarchic::MAX_DEGREE)
        );
        assert!(max_degree(ElementFamily::Hierarchic, ElementType::Prism6).is_err());

        let max = max_degree(ElementFamily::Lagrange, ElementType::Point1).unwrap();
        assert!(create_evaluator(0, FEType::lagrange(max), ElementType::Point1).is_ok());
        assert!(create_evaluator(0, FEType::lagrange(max + 1), ElementType::Point1).is_err());
        assert!(max_degree(ElementFamily::Monomial, ElementType::InfiniteInterval2).is_err());
    }
}
