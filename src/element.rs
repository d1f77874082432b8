//! Mesh elements with explicitly stored nodes

use crate::element_type::ElementType;
use crate::traits::MeshElement;
use crate::types::{Error, PhysicalPoint, Result};

/// An element that owns the physical positions of its nodes
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalElement {
    element_type: ElementType,
    nodes: Vec<PhysicalPoint>,
}

impl PhysicalElement {
    /// Create an element
    ///
    /// `nodes` must contain one point per node of `element_type`, ordered as the reference
    /// nodes of the element type. Quadrilaterals and hexahedra use tensor numbering, not the
    /// order around the boundary: the corners of a `Quadrilateral4` are ordered
    /// (0,0), (1,0), (0,1), (1,1). Listing them anticlockwise gives a twisted element.
    pub fn new(element_type: ElementType, nodes: Vec<PhysicalPoint>) -> Result<Self> {
        if nodes.len() != element_type.node_count() {
            return Err(Error::SizeMismatch {
                expected: element_type.node_count(),
                actual: nodes.len(),
            });
        }
        Ok(Self {
            element_type,
            nodes,
        })
    }

    /// Create an element from a flat list of coordinates with `gdim` values per node
    pub fn from_coordinates(
        element_type: ElementType,
        gdim: usize,
        coordinates: &[f64],
    ) -> Result<Self> {
        if gdim == 0 || gdim > 3 || coordinates.len() != gdim * element_type.node_count() {
            return Err(Error::SizeMismatch {
                expected: gdim * element_type.node_count(),
                actual: coordinates.len(),
            });
        }
        Self::new(
            element_type,
            coordinates
                .chunks(gdim)
                .map(PhysicalPoint::from_slice)
                .collect(),
        )
    }

    /// The element whose nodes sit at the reference nodes of its type
    pub fn reference(element_type: ElementType) -> Result<Self> {
        Self::new(
            element_type,
            element_type
                .reference_nodes()?
                .iter()
                .map(|p| PhysicalPoint::new(*p.coords()))
                .collect(),
        )
    }

    /// The nodes
    pub fn nodes(&self) -> &[PhysicalPoint] {
        &self.nodes
    }
}

impl MeshElement for PhysicalElement {
    fn element_type(&self) -> ElementType {
        self.element_type
    }
    fn node(&self, local_index: usize) -> PhysicalPoint {
        self.nodes[local_index]
    }
    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_wrong_node_count() {
        let e = PhysicalElement::new(
            ElementType::Triangle3,
            vec![PhysicalPoint::origin(), PhysicalPoint::from([1.0, 0.0])],
        );
        assert_eq!(
            e,
            Err(Error::SizeMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_from_coordinates() {
        let e = PhysicalElement::from_coordinates(
            ElementType::Interval2,
            2,
            &[0.0, 1.0, 2.0, 3.0],
        )
        .unwrap();
        assert_eq!(e.node(1), PhysicalPoint::from([2.0, 3.0]));
        assert_eq!(e.node_count(), 2);
        assert!(PhysicalElement::from_coordinates(ElementType::Interval2, 2, &[0.0; 3]).is_err());
    }

    #[test]
    fn test_reference() {
        let e = PhysicalElement::reference(ElementType::Quadrilateral4).unwrap();
        assert_eq!(e.nodes()[3], PhysicalPoint::from([1.0, 1.0]));
        assert_eq!(
            PhysicalElement::reference(ElementType::InfiniteInterval2),
            Err(Error::UnsupportedGeometry(ElementType::InfiniteInterval2))
        );
    }
}
