use crate::node::NodeId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("node {0:?} does not exist in this tree")]
    UnknownNode(NodeId),

    #[error(
        "native and logical children of {node:?} disagree: {native} native, {logical} logical"
    )]
    Inconsistent {
        node: NodeId,
        native: usize,
        logical: usize,
    },

    #[error("child {child:?} of {node:?} is at position {position} but records index {index}")]
    IndexMismatch {
        node: NodeId,
        child: NodeId,
        position: usize,
        index: usize,
    },

    #[error("child {child:?} of {node:?} does not point back to its parent")]
    ParentMismatch { node: NodeId, child: NodeId },

    #[error("native child {position} of {node:?} is not the widget of the logical child there")]
    NativeOrderMismatch { node: NodeId, position: usize },

    #[error("invalid node construction: {0}")]
    InvalidInit(&'static str),
}

pub type Result<T> = std::result::Result<T, ViewError>;
