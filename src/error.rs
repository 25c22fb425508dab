//! The error taxonomy: caller mistakes (`InvalidArgument`) versus internal invariant violations
//! (`InvalidTreeStructure`, which should never actually surface through the public API).

use thiserror::Error as ThisError;

use crate::id::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum TreeError {
    #[error("ratio {ratio} is out of range [0, 1]")]
    RatioOutOfRange { ratio: f64 },

    #[error("level must be >= 1, got {level}")]
    LevelBelowOne { level: i32 },

    #[error("level {level} exceeds the number of ancestor tab containers ({available}) for this pane")]
    LevelExceedsAncestors { level: i32, available: i32 },

    #[error("`at_pane` was given but the tree is empty")]
    AtPaneOnEmptyTree,

    #[error("`new_level` or `level` requires `at_pane`")]
    AncestorTargetWithoutAtPane,

    #[error("config key {key:?} does not accept this kind of value")]
    ConfigValueKindMismatch { key: &'static str },

    #[error("width and height must both be positive, got {width}x{height}")]
    NonPositiveDimension { width: i32, height: i32 },

    #[error("internal invariant violated: {0}")]
    InvalidTreeStructure(String),
}

pub type TreeResult<T> = Result<T, TreeError>;

/// Logs an [`TreeError::InvalidTreeStructure`] at `warn!` before returning it. Internal callers
/// use this instead of constructing the variant directly so every place that would indicate a
/// bug in this crate (not the caller's) is observable in logs.
pub(crate) fn invalid_tree_structure(detail: impl Into<String>) -> TreeError {
    let detail = detail.into();
    log::warn!("invalid tree structure encountered: {detail}");
    TreeError::InvalidTreeStructure(detail)
}

pub(crate) fn missing_node(id: NodeId) -> TreeError {
    invalid_tree_structure(format!("node {id} is not in the arena"))
}
