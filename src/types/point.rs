//! Reference and physical points
//!
//! Points always carry three coordinates. Coordinates beyond the dimension of the cell or
//! space they live in are zero and ignored by every algorithm in this crate.

use std::ops::{Index, IndexMut};

macro_rules! point_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Default, PartialEq, Clone, Copy)]
        pub struct $name([f64; 3]);

        impl $name {
            /// Create a point from three coordinates
            pub fn new(coords: [f64; 3]) -> Self {
                Self(coords)
            }

            /// The point with all coordinates equal to zero
            pub fn origin() -> Self {
                Self([0.0; 3])
            }

            /// Create a point from the first (at most three) entries of a slice
            ///
            /// Missing coordinates are set to zero.
            pub fn from_slice(coords: &[f64]) -> Self {
                let mut p = [0.0; 3];
                for (pi, ci) in p.iter_mut().zip(coords) {
                    *pi = *ci;
                }
                Self(p)
            }

            /// The coordinates of the point
            pub fn coords(&self) -> &[f64; 3] {
                &self.0
            }

            /// The first coordinate
            pub fn x(&self) -> f64 {
                self.0[0]
            }

            /// The second coordinate
            pub fn y(&self) -> f64 {
                self.0[1]
            }

            /// The third coordinate
            pub fn z(&self) -> f64 {
                self.0[2]
            }

            /// The Euclidean distance to another point
            pub fn distance(&self, other: &Self) -> f64 {
                self.0
                    .iter()
                    .zip(other.0.iter())
                    .map(|(a, b)| (a - b).powi(2))
                    .sum::<f64>()
                    .sqrt()
            }
        }

        impl Index<usize> for $name {
            type Output = f64;
            fn index(&self, i: usize) -> &f64 {
                &self.0[i]
            }
        }

        impl IndexMut<usize> for $name {
            fn index_mut(&mut self, i: usize) -> &mut f64 {
                &mut self.0[i]
            }
        }

        impl From<[f64; 1]> for $name {
            fn from(c: [f64; 1]) -> Self {
                Self([c[0], 0.0, 0.0])
            }
        }

        impl From<[f64; 2]> for $name {
            fn from(c: [f64; 2]) -> Self {
                Self([c[0], c[1], 0.0])
            }
        }

        impl From<[f64; 3]> for $name {
            fn from(c: [f64; 3]) -> Self {
                Self(c)
            }
        }
    };
}

point_type!(
    /// A point given in the coordinates of a reference cell
    ReferencePoint
);

point_type!(
    /// A point given in physical coordinates
    PhysicalPoint
);
