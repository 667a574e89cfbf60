mod arena;
mod binding;
mod types;

pub(crate) use arena::NodeArena;
pub use binding::DataBinder;
pub use types::{Layout, NodeId, NodeInit, ViewNode};
