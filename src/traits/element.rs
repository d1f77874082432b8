//! Mesh elements

use crate::element_type::ElementType;
use crate::types::PhysicalPoint;

pub trait MeshElement {
    //! A read-only view of one mesh element
    //!
    //! The crate never stores an element beyond the call it is passed to. The maps in
    //! [`inverse_map`](crate::inverse_map) reject elements whose `node_count` differs from the
    //! node count of their type.

    /// The type of the element
    fn element_type(&self) -> ElementType;

    /// The physical position of the node with local index `local_index`
    ///
    /// `local_index` is less than `self.node_count()`.
    fn node(&self, local_index: usize) -> PhysicalPoint;

    /// The number of nodes
    fn node_count(&self) -> usize {
        self.element_type().node_count()
    }
}
