//! Named transform hierarchies for articulated models.
//!
//! A [`Hierarchy`] owns a forest of named nodes. Each node has a local
//! [`Transform`] relative to its parent and an opaque payload (typically a mesh
//! with its shading state). Per frame, calling code edits local transforms by
//! name, calls [`Hierarchy::update_world_transforms`], and hands the resulting
//! [`DrawItem`]s to a [`Renderer`].
//!
//! ```
//! use articulate::{Hierarchy, Transform};
//! use glam::Vec3;
//!
//! let mut hierarchy = Hierarchy::new();
//! hierarchy.add_root("body mesh", "body")?;
//! hierarchy.add_child("head mesh", "head", "body", Vec3::new(0.0, 0.0, 1.8))?;
//!
//! hierarchy["body"].transform = Transform::from_translation(Vec3::Y);
//! hierarchy.update_world_transforms();
//!
//! let head = hierarchy["head"].world_translation();
//! assert!(head.abs_diff_eq(Vec3::new(0.0, 1.0, 1.8), 1e-6));
//! # Ok::<(), articulate::HierarchyError>(())
//! ```

pub mod scene_graph;

pub use scene_graph::*;
