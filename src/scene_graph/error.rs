//! Errors reported by the node registry.

use thiserror::Error;

/// Scene description errors. These come from a malformed setup (a typo in a
/// node name, nodes added in the wrong order) rather than from transient
/// conditions, so callers usually bail out on them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    /// `add` was given a name that is already registered.
    #[error("a node named '{0}' already exists")]
    DuplicateName(String),

    /// `add` or `reparent` referenced a parent that is not registered.
    #[error("parent '{parent}' of node '{name}' does not exist")]
    UnknownParent { name: String, parent: String },

    /// A lookup by name missed.
    #[error("no node named '{0}'")]
    UnknownNode(String),

    /// `reparent` would make a node its own ancestor.
    #[error("cannot attach '{name}' under '{parent}': '{parent}' is '{name}' or one of its descendants")]
    Cycle { name: String, parent: String },
}

pub type Result<T> = std::result::Result<T, HierarchyError>;
