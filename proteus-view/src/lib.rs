//! Dual view tree for JSON-driven native UI.
//!
//! A [`ViewTree`] keeps a logical model tree (layout source, styles, ordered children)
//! in lockstep with a native widget tree driven through the [`NativeTree`] trait.
//! Every structural edit goes through the tree so both sides stay in the same order.

pub mod config;
pub mod error;
pub mod native;
pub mod node;
pub mod style;
pub mod tree;

pub use config::{ConsistencyMode, TreeConfig};
pub use error::{Result, ViewError};
pub use native::{NativeTree, StubNativeTree, WidgetId};
pub use node::{DataBinder, Layout, NodeId, NodeInit, ViewNode};
pub use style::Styles;
pub use tree::ViewTree;
