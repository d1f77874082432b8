//! Trait definitions

mod element;
mod evaluator;

pub use element::MeshElement;
pub use evaluator::FiniteElementEvaluator;
