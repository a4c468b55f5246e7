pub mod error;
pub mod hierarchy;
pub mod node;
pub mod transform;
pub mod traversal;

// Re-export main types for convenience
pub use error::{HierarchyError, Result};
pub use hierarchy::Hierarchy;
pub use node::{Node, NodeId, Parent};
pub use transform::{axis_angle, Transform};
pub use traversal::{DrawItem, DrawStyle, InstanceData, Renderer};
