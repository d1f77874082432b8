//! Fedispatch
//!
//! Family- and geometry-agnostic access to finite element shape functions, degree-of-freedom
//! counts, reference-element containment and inverse reference maps.
//!
//! The functions in [`interface`] take an interpolation family and degree, a spatial
//! dimension and an element type, and route each request to the evaluator that serves that
//! combination.
#![cfg_attr(feature = "strict", deny(warnings))]
#![warn(missing_docs)]

#[macro_use]
extern crate lazy_static;

pub mod element;
pub mod element_type;
pub mod evaluator;
pub mod interface;
pub mod inverse_map;
pub mod reference_cell;
pub mod traits;
pub mod types;
