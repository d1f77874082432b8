//! Reference cell definitions
//!
//! Every reference cell is a closed polytope with vertices in `{0, 1}^d`. Quadrilaterals and
//! hexahedra use tensor-product vertex numbering: vertex `i` has coordinate `j` equal to bit
//! `j` of `i`.

use crate::types::ReferencePoint;

/// The type of a reference cell
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(u8)]
pub enum ReferenceCellType {
    /// A point
    Point = 0,
    /// A line interval
    Interval = 1,
    /// A triangle
    Triangle = 2,
    /// A quadrilateral
    Quadrilateral = 3,
    /// A tetrahedron (whose faces are all triangles)
    Tetrahedron = 4,
    /// A hexahedron (whose faces are all quadrilaterals)
    Hexahedron = 5,
    /// A triangular prism
    Prism = 6,
    /// A square-based pyramid
    Pyramid = 7,
}

impl ReferenceCellType {
    /// Create a reference cell type from a u8
    pub fn from(i: u8) -> Option<ReferenceCellType> {
        match i {
            0 => Some(ReferenceCellType::Point),
            1 => Some(ReferenceCellType::Interval),
            2 => Some(ReferenceCellType::Triangle),
            3 => Some(ReferenceCellType::Quadrilateral),
            4 => Some(ReferenceCellType::Tetrahedron),
            5 => Some(ReferenceCellType::Hexahedron),
            6 => Some(ReferenceCellType::Prism),
            7 => Some(ReferenceCellType::Pyramid),
            _ => None,
        }
    }
}

/// The topological dimension of the cell
pub fn dim(cell: ReferenceCellType) -> usize {
    match cell {
        ReferenceCellType::Point => 0,
        ReferenceCellType::Interval => 1,
        ReferenceCellType::Triangle => 2,
        ReferenceCellType::Quadrilateral => 2,
        ReferenceCellType::Tetrahedron => 3,
        ReferenceCellType::Hexahedron => 3,
        ReferenceCellType::Prism => 3,
        ReferenceCellType::Pyramid => 3,
    }
}

/// Is the cell a tensor product of intervals?
pub fn is_tensor_product(cell: ReferenceCellType) -> bool {
    matches!(
        cell,
        ReferenceCellType::Interval
            | ReferenceCellType::Quadrilateral
            | ReferenceCellType::Hexahedron
    )
}

/// The vertices of the reference cell
pub fn vertices(cell: ReferenceCellType) -> Vec<ReferencePoint> {
    let v: &[[f64; 3]] = match cell {
        ReferenceCellType::Point => &[[0.0, 0.0, 0.0]],
        ReferenceCellType::Interval => &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
        ReferenceCellType::Triangle => &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        ReferenceCellType::Quadrilateral => &[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
        ],
        ReferenceCellType::Tetrahedron => &[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ],
        ReferenceCellType::Hexahedron => &[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [0.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
        ],
        ReferenceCellType::Prism => &[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [0.0, 1.0, 1.0],
        ],
        ReferenceCellType::Pyramid => &[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ],
    };
    v.iter().map(|c| ReferencePoint::new(*c)).collect()
}

/// The midpoint of the cell
///
/// This is the centroid of the cell's volume, used as the starting point of the inverse map.
pub fn midpoint(cell: ReferenceCellType) -> ReferencePoint {
    let half = 0.5;
    let third = 1.0 / 3.0;
    match cell {
        ReferenceCellType::Point => ReferencePoint::origin(),
        ReferenceCellType::Interval => ReferencePoint::from([half]),
        ReferenceCellType::Triangle => ReferencePoint::from([third, third]),
        ReferenceCellType::Quadrilateral => ReferencePoint::from([half, half]),
        ReferenceCellType::Tetrahedron => ReferencePoint::from([0.25, 0.25, 0.25]),
        ReferenceCellType::Hexahedron => ReferencePoint::from([half, half, half]),
        ReferenceCellType::Prism => ReferencePoint::from([third, third, half]),
        ReferenceCellType::Pyramid => ReferencePoint::from([0.375, 0.375, 0.25]),
    }
}

/// The edges of the reference cell, as pairs of vertex numbers
pub fn edges(cell: ReferenceCellType) -> &'static [[usize; 2]] {
    match cell {
        ReferenceCellType::Point => &[],
        ReferenceCellType::Interval => &[[0, 1]],
        ReferenceCellType::Triangle => &[[1, 2], [0, 2], [0, 1]],
        ReferenceCellType::Quadrilateral => &[[0, 1], [0, 2], [1, 3], [2, 3]],
        ReferenceCellType::Tetrahedron => &[[2, 3], [1, 3], [1, 2], [0, 3], [0, 2], [0, 1]],
        ReferenceCellType::Hexahedron => &[
            [0, 1],
            [0, 2],
            [0, 4],
            [1, 3],
            [1, 5],
            [2, 3],
            [2, 6],
            [3, 7],
            [4, 5],
            [4, 6],
            [5, 7],
            [6, 7],
        ],
        ReferenceCellType::Prism => &[
            [0, 1],
            [0, 2],
            [0, 3],
            [1, 2],
            [1, 4],
            [2, 5],
            [3, 4],
            [3, 5],
            [4, 5],
        ],
        ReferenceCellType::Pyramid => &[
            [0, 1],
            [0, 2],
            [0, 4],
            [1, 3],
            [1, 4],
            [2, 3],
            [2, 4],
            [3, 4],
        ],
    }
}

/// The two-dimensional faces of the reference cell, as lists of vertex numbers
pub fn faces(cell: ReferenceCellType) -> &'static [&'static [usize]] {
    match cell {
        ReferenceCellType::Point => &[],
        ReferenceCellType::Interval => &[],
        ReferenceCellType::Triangle => &[&[0, 1, 2]],
        ReferenceCellType::Quadrilateral => &[&[0, 1, 2, 3]],
        ReferenceCellType::Tetrahedron => &[&[1, 2, 3], &[0, 2, 3], &[0, 1, 3], &[0, 1, 2]],
        ReferenceCellType::Hexahedron => &[
            &[0, 1, 2, 3],
            &[0, 1, 4, 5],
            &[0, 2, 4, 6],
            &[1, 3, 5, 7],
            &[2, 3, 6, 7],
            &[4, 5, 6, 7],
        ],
        ReferenceCellType::Prism => &[
            &[0, 1, 2],
            &[0, 1, 3, 4],
            &[0, 2, 3, 5],
            &[1, 2, 4, 5],
            &[3, 4, 5],
        ],
        ReferenceCellType::Pyramid => &[
            &[0, 1, 2, 3],
            &[0, 1, 4],
            &[0, 2, 4],
            &[1, 3, 4],
            &[2, 3, 4],
        ],
    }
}

/// Check whether a point lies in the closed reference cell, up to a tolerance
///
/// Each cell is described by a set of linear inequalities on the first `dim(cell)`
/// coordinates. Every inequality is relaxed by `eps` in the permissive direction, eg
/// `x <= 1` becomes `x <= 1 + eps`. A negative `eps` is treated as zero, so the cell is never
/// shrunk.
pub fn contains(cell: ReferenceCellType, point: &ReferencePoint, eps: f64) -> bool {
    let eps = eps.max(0.0);
    let lower = -eps;
    let upper = 1.0 + eps;
    let (x, y, z) = (point.x(), point.y(), point.z());
    match cell {
        ReferenceCellType::Point => true,
        ReferenceCellType::Interval => x >= lower && x <= upper,
        ReferenceCellType::Triangle => x >= lower && y >= lower && x + y <= upper,
        ReferenceCellType::Quadrilateral => {
            x >= lower && x <= upper && y >= lower && y <= upper
        }
        ReferenceCellType::Tetrahedron => {
            x >= lower && y >= lower && z >= lower && x + y + z <= upper
        }
        ReferenceCellType::Hexahedron => {
            x >= lower && x <= upper && y >= lower && y <= upper && z >= lower && z <= upper
        }
        ReferenceCellType::Prism => {
            x >= lower && y >= lower && x + y <= upper && z >= lower && z <= upper
        }
        ReferenceCellType::Pyramid => {
            x >= lower && y >= lower && z >= lower && x + z <= upper && y + z <= upper
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use paste::paste;

    const ALL_CELLS: [ReferenceCellType; 8] = [
        ReferenceCellType::Point,
        ReferenceCellType::Interval,
        ReferenceCellType::Triangle,
        ReferenceCellType::Quadrilateral,
        ReferenceCellType::Tetrahedron,
        ReferenceCellType::Hexahedron,
        ReferenceCellType::Prism,
        ReferenceCellType::Pyramid,
    ];

    #[test]
    fn test_reference_cell_type() {
        for cell in ALL_CELLS {
            assert_eq!(cell, ReferenceCellType::from(cell as u8).unwrap());
        }
        assert_eq!(ReferenceCellType::from(8), None);
    }

    macro_rules! test_cell {

        ($($cell:ident),+) => {

        $(
            paste! {

                #[test]
                fn [<test_ $cell:lower>]() {
                    let cell = ReferenceCellType::[<$cell>];
                    let d = dim(cell);
                    let v = vertices(cell);

                    for p in &v {
                        for i in d..3 {
                            assert_eq!(p[i], 0.0);
                        }
                        assert!(contains(cell, p, 0.0));
                    }
                    assert!(contains(cell, &midpoint(cell), 0.0));

                    for e in edges(cell) {
                        assert!(e[0] < e[1]);
                        assert!(e[1] < v.len());
                        let mut mid = ReferencePoint::origin();
                        for i in 0..3 {
                            mid[i] = 0.5 * (v[e[0]][i] + v[e[1]][i]);
                        }
                        assert!(contains(cell, &mid, 0.0));
                    }
                    for f in faces(cell) {
                        for i in f.iter() {
                            assert!(*i < v.len());
                        }
                    }

                    // Scaling a vertex away from the midpoint leaves the cell
                    let m = midpoint(cell);
                    for p in &v {
                        let mut outside = ReferencePoint::origin();
                        for i in 0..d {
                            outside[i] = m[i] + 1.01 * (p[i] - m[i]);
                        }
                        assert!(!contains(cell, &outside, 1e-6));
                    }
                }

            }
        )*
        };
    }

    test_cell!(
        Interval,
        Triangle,
        Quadrilateral,
        Tetrahedron,
        Hexahedron,
        Prism,
        Pyramid
    );

    #[test]
    fn test_point() {
        assert_eq!(vertices(ReferenceCellType::Point).len(), 1);
        assert!(contains(
            ReferenceCellType::Point,
            &ReferencePoint::from([3.0, 4.0, 5.0]),
            0.0
        ));
    }

    #[test]
    fn test_triangle_hypotenuse() {
        let cell = ReferenceCellType::Triangle;
        assert!(contains(cell, &ReferencePoint::from([0.5, 0.5]), 1e-6));
        assert!(contains(cell, &ReferencePoint::from([0.5, 0.5]), 0.0));
        assert!(!contains(cell, &ReferencePoint::from([0.6, 0.6]), 1e-6));
    }

    #[test]
    fn test_tolerance_band() {
        let eps = 1e-4;
        let cell = ReferenceCellType::Quadrilateral;
        assert!(contains(cell, &ReferencePoint::from([1.0, 0.5]), 0.0));
        assert!(contains(cell, &ReferencePoint::from([1.0 + eps / 2.0, 0.5]), eps));
        assert!(!contains(cell, &ReferencePoint::from([1.0 + 2.0 * eps, 0.5]), eps));
        assert!(contains(cell, &ReferencePoint::from([0.5, -eps / 2.0]), eps));
        assert!(!contains(cell, &ReferencePoint::from([0.5, -2.0 * eps]), eps));
    }

    #[test]
    fn test_negative_tolerance_does_not_shrink() {
        let cell = ReferenceCellType::Tetrahedron;
        let p = ReferencePoint::from([0.0, 0.0, 1.0]);
        assert!(contains(cell, &p, -1.0));
        assert!(!contains(cell, &ReferencePoint::from([0.0, 0.0, 1.1]), -1.0));
    }

    #[test]
    fn test_pyramid_apex_region() {
        let cell = ReferenceCellType::Pyramid;
        assert!(contains(cell, &ReferencePoint::from([0.0, 0.0, 1.0]), 0.0));
        assert!(contains(cell, &ReferencePoint::from([0.5, 0.5, 0.5]), 0.0));
        assert!(!contains(cell, &ReferencePoint::from([0.6, 0.1, 0.5]), 1e-6));
    }
}
