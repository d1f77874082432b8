//! Element types
//!
//! An element type is a reference cell together with a node layout. Nodes are numbered
//! vertices first, then edge midpoints, then face centroids, then the cell centroid, each
//! group in the order given by [`reference_cell`](crate::reference_cell).

use crate::reference_cell::{self, ReferenceCellType};
use crate::types::{Error, ReferencePoint, Result};

/// The type of a mesh element
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(u8)]
pub enum ElementType {
    /// A single node
    Point1 = 0,
    /// An interval with two vertex nodes
    Interval2 = 1,
    /// An interval with two vertex nodes and a midpoint node
    Interval3 = 2,
    /// A triangle with three vertex nodes
    Triangle3 = 3,
    /// A triangle with vertex and edge nodes
    Triangle6 = 4,
    /// A quadrilateral with four vertex nodes
    Quadrilateral4 = 5,
    /// A quadrilateral with vertex, edge and centre nodes
    Quadrilateral9 = 6,
    /// A tetrahedron with four vertex nodes
    Tetrahedron4 = 7,
    /// A tetrahedron with vertex and edge nodes
    Tetrahedron10 = 8,
    /// A hexahedron with eight vertex nodes
    Hexahedron8 = 9,
    /// A hexahedron with vertex, edge, face and centre nodes
    Hexahedron27 = 10,
    /// A triangular prism with six vertex nodes
    Prism6 = 11,
    /// A square-based pyramid with five vertex nodes
    Pyramid5 = 12,
    /// A semi-infinite interval
    InfiniteInterval2 = 13,
    /// A quadrilateral extending to infinity in one direction
    InfiniteQuadrilateral4 = 14,
    /// A hexahedron extending to infinity in one direction
    InfiniteHexahedron8 = 15,
}

impl ElementType {
    /// Create an element type from a u8
    pub fn from(i: u8) -> Option<ElementType> {
        match i {
            0 => Some(ElementType::Point1),
            1 => Some(ElementType::Interval2),
            2 => Some(ElementType::Interval3),
            3 => Some(ElementType::Triangle3),
            4 => Some(ElementType::Triangle6),
            5 => Some(ElementType::Quadrilateral4),
            6 => Some(ElementType::Quadrilateral9),
            7 => Some(ElementType::Tetrahedron4),
            8 => Some(ElementType::Tetrahedron10),
            9 => Some(ElementType::Hexahedron8),
            10 => Some(ElementType::Hexahedron27),
            11 => Some(ElementType::Prism6),
            12 => Some(ElementType::Pyramid5),
            13 => Some(ElementType::InfiniteInterval2),
            14 => Some(ElementType::InfiniteQuadrilateral4),
            15 => Some(ElementType::InfiniteHexahedron8),
            _ => None,
        }
    }

    /// The element type whose nodes are exactly the Lagrange nodes of the given degree
    pub fn from_cell(cell: ReferenceCellType, degree: usize) -> Option<ElementType> {
        match (cell, degree) {
            (ReferenceCellType::Point, _) => Some(ElementType::Point1),
            (ReferenceCellType::Interval, 1) => Some(ElementType::Interval2),
            (ReferenceCellType::Interval, 2) => Some(ElementType::Interval3),
            (ReferenceCellType::Triangle, 1) => Some(ElementType::Triangle3),
            (ReferenceCellType::Triangle, 2) => Some(ElementType::Triangle6),
            (ReferenceCellType::Quadrilateral, 1) => Some(ElementType::Quadrilateral4),
            (ReferenceCellType::Quadrilateral, 2) => Some(ElementType::Quadrilateral9),
            (ReferenceCellType::Tetrahedron, 1) => Some(ElementType::Tetrahedron4),
            (ReferenceCellType::Tetrahedron, 2) => Some(ElementType::Tetrahedron10),
            (ReferenceCellType::Hexahedron, 1) => Some(ElementType::Hexahedron8),
            (ReferenceCellType::Hexahedron, 2) => Some(ElementType::Hexahedron27),
            (ReferenceCellType::Prism, 1) => Some(ElementType::Prism6),
            (ReferenceCellType::Pyramid, 1) => Some(ElementType::Pyramid5),
            _ => None,
        }
    }

    /// The topological dimension
    pub fn dim(self) -> usize {
        match self {
            ElementType::Point1 => 0,
            ElementType::Interval2 | ElementType::Interval3 | ElementType::InfiniteInterval2 => 1,
            ElementType::Triangle3
            | ElementType::Triangle6
            | ElementType::Quadrilateral4
            | ElementType::Quadrilateral9
            | ElementType::InfiniteQuadrilateral4 => 2,
            ElementType::Tetrahedron4
            | ElementType::Tetrahedron10
            | ElementType::Hexahedron8
            | ElementType::Hexahedron27
            | ElementType::Prism6
            | ElementType::Pyramid5
            | ElementType::InfiniteHexahedron8 => 3,
        }
    }

    /// The number of nodes
    pub fn node_count(self) -> usize {
        match self {
            ElementType::Point1 => 1,
            ElementType::Interval2 => 2,
            ElementType::Interval3 => 3,
            ElementType::Triangle3 => 3,
            ElementType::Triangle6 => 6,
            ElementType::Quadrilateral4 => 4,
            ElementType::Quadrilateral9 => 9,
            ElementType::Tetrahedron4 => 4,
            ElementType::Tetrahedron10 => 10,
            ElementType::Hexahedron8 => 8,
            ElementType::Hexahedron27 => 27,
            ElementType::Prism6 => 6,
            ElementType::Pyramid5 => 5,
            ElementType::InfiniteInterval2 => 2,
            ElementType::InfiniteQuadrilateral4 => 4,
            ElementType::InfiniteHexahedron8 => 8,
        }
    }

    /// Does this element extend to infinity?
    pub fn is_infinite(self) -> bool {
        matches!(
            self,
            ElementType::InfiniteInterval2
                | ElementType::InfiniteQuadrilateral4
                | ElementType::InfiniteHexahedron8
        )
    }

    /// The reference cell of the element
    ///
    /// Infinite elements have no bounded reference cell.
    pub fn reference_cell(self) -> Result<ReferenceCellType> {
        match self {
            ElementType::Point1 => Ok(ReferenceCellType::Point),
            ElementType::Interval2 | ElementType::Interval3 => Ok(ReferenceCellType::Interval),
            ElementType::Triangle3 | ElementType::Triangle6 => Ok(ReferenceCellType::Triangle),
            ElementType::Quadrilateral4 | ElementType::Quadrilateral9 => {
                Ok(ReferenceCellType::Quadrilateral)
            }
            ElementType::Tetrahedron4 | ElementType::Tetrahedron10 => {
                Ok(ReferenceCellType::Tetrahedron)
            }
            ElementType::Hexahedron8 | ElementType::Hexahedron27 => {
                Ok(ReferenceCellType::Hexahedron)
            }
            ElementType::Prism6 => Ok(ReferenceCellType::Prism),
            ElementType::Pyramid5 => Ok(ReferenceCellType::Pyramid),
            ElementType::InfiniteInterval2
            | ElementType::InfiniteQuadrilateral4
            | ElementType::InfiniteHexahedron8 => Err(Error::UnsupportedGeometry(self)),
        }
    }

    /// The degree of the Lagrange map that the nodes of this element define
    pub fn default_degree(self) -> usize {
        match self {
            ElementType::Interval3
            | ElementType::Triangle6
            | ElementType::Quadrilateral9
            | ElementType::Tetrahedron10
            | ElementType::Hexahedron27 => 2,
            _ => 1,
        }
    }

    /// The highest dimension of sub-entity that carries a node
    fn node_entity_dim(self) -> usize {
        match self {
            ElementType::Interval3 | ElementType::Triangle6 | ElementType::Tetrahedron10 => 1,
            ElementType::Quadrilateral9 => 2,
            ElementType::Hexahedron27 => 3,
            _ => 0,
        }
    }

    /// The positions of the nodes on the reference cell
    pub fn reference_nodes(self) -> Result<Vec<ReferencePoint>> {
        let cell = self.reference_cell()?;
        let v = reference_cell::vertices(cell);
        let centroid = |vs: &[usize]| {
            let mut c = ReferencePoint::origin();
            for i in vs {
                for j in 0..3 {
                    c[j] += v[*i][j];
                }
            }
            for j in 0..3 {
                c[j] /= vs.len() as f64;
            }
            c
        };

        let mut nodes = v.clone();
        let top = self.node_entity_dim();
        if top >= 1 {
            nodes.extend(reference_cell::edges(cell).iter().map(|e| centroid(&e[..])));
        }
        if top >= 2 {
            nodes.extend(reference_cell::faces(cell).iter().map(|f| centroid(*f)));
        }
        if top >= 3 {
            nodes.push(centroid(&(0..v.len()).collect::<Vec<_>>()));
        }
        Ok(nodes)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use paste::paste;

    #[test]
    fn test_element_type_from_u8() {
        for i in 0..16 {
            let t = ElementType::from(i).unwrap();
            assert_eq!(t as u8, i);
        }
        assert_eq!(ElementType::from(16), None);
    }

    macro_rules! test_element_type {

        ($($etype:ident),+) => {

        $(
            paste! {

                #[test]
                fn [<test_ $etype:lower>]() {
                    let t = ElementType::[<$etype>];
                    let cell = t.reference_cell().unwrap();
                    assert_eq!(t.dim(), reference_cell::dim(cell));
                    assert!(!t.is_infinite());

                    let nodes = t.reference_nodes().unwrap();
                    assert_eq!(nodes.len(), t.node_count());
                    for (i, n) in nodes.iter().enumerate() {
                        assert!(reference_cell::contains(cell, n, 0.0));
                        for m in nodes.iter().skip(i + 1) {
                            assert!(n.distance(m) > 1e-12);
                        }
                    }
                    assert_eq!(ElementType::from_cell(cell, t.default_degree()), Some(t));
                }

            }
        )*
        };
    }

    test_element_type!(
        Point1,
        Interval2,
        Interval3,
        Triangle3,
        Triangle6,
        Quadrilateral4,
        Quadrilateral9,
        Tetrahedron4,
        Tetrahedron10,
        Hexahedron8,
        Hexahedron27,
        Prism6,
        Pyramid5
    );

    #[test]
    fn test_infinite_elements() {
        for t in [
            ElementType::InfiniteInterval2,
            ElementType::InfiniteQuadrilateral4,
            ElementType::InfiniteHexahedron8,
        ] {
            assert!(t.is_infinite());
            assert_eq!(t.reference_cell(), Err(Error::UnsupportedGeometry(t)));
            assert_eq!(t.reference_nodes(), Err(Error::UnsupportedGeometry(t)));
        }
        assert_eq!(ElementType::InfiniteHexahedron8.dim(), 3);
    }

    #[test]
    fn test_quadratic_nodes() {
        let nodes = ElementType::Triangle6.reference_nodes().unwrap();
        assert_eq!(nodes[3], ReferencePoint::from([0.5, 0.5]));
        assert_eq!(nodes[4], ReferencePoint::from([0.0, 0.5]));
        assert_eq!(nodes[5], ReferencePoint::from([0.5, 0.0]));

        let nodes = ElementType::Quadrilateral9.reference_nodes().unwrap();
        assert_eq!(nodes[8], ReferencePoint::from([0.5, 0.5]));

        let nodes = ElementType::Hexahedron27.reference_nodes().unwrap();
        assert_eq!(nodes[26], ReferencePoint::from([0.5, 0.5, 0.5]));
    }
}
