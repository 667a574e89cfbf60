use super::binding::DataBinder;
use crate::native::NativeTree;
use crate::style::Styles;
use serde_json::{Map, Value};
use smallvec::SmallVec;
use std::fmt;
use std::rc::Rc;

/// JSON layout description a node was built from.
pub type Layout = Map<String, Value>;

pub(crate) type Children = SmallVec<[NodeId; 4]>;

/// Generational handle to a node in a [`crate::ViewTree`].
///
/// A reclaimed slot bumps its generation, so ids held past `reclaim` never alias the
/// node that reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) slot: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    pub(crate) fn new(slot: u32, generation: u32) -> Self {
        Self { slot, generation }
    }

    pub fn slot(self) -> usize {
        self.slot as usize
    }
}

/// One node of the view tree: a native widget plus its logical model.
pub struct ViewNode<N: NativeTree> {
    pub(crate) native: Option<N::Handle>,
    pub(crate) layout: Option<Layout>,
    pub(crate) index: usize,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Option<Children>,
    pub(crate) styles: Option<Styles>,
    pub(crate) binder: Option<Rc<dyn DataBinder<N>>>,
}

impl<N: NativeTree> ViewNode<N> {
    /// The widget this node wraps. `None` once destroyed.
    pub fn native(&self) -> Option<N::Handle> {
        self.native
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in render order. Empty when none were ever allocated.
    pub fn children(&self) -> &[NodeId] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn styles(&self) -> Option<&Styles> {
        self.styles.as_ref()
    }

    pub fn has_binder(&self) -> bool {
        self.binder.is_some()
    }

    pub fn is_destroyed(&self) -> bool {
        self.native.is_none()
    }

    pub(crate) fn child_count(&self) -> usize {
        self.children.as_ref().map_or(0, |c| c.len())
    }
}

impl<N: NativeTree> fmt::Debug for ViewNode<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewNode")
            .field("native", &self.native)
            .field("index", &self.index)
            .field("parent", &self.parent)
            .field("children", &self.children())
            .field("has_layout", &self.layout.is_some())
            .field("has_styles", &self.styles.is_some())
            .field("has_binder", &self.binder.is_some())
            .finish()
    }
}

/// Everything the layout builder hands over when it materializes a node.
///
/// Covers the three ways a node is built: bare widget with a position, widget with its
/// layout source, and a container whose children were built first.
pub struct NodeInit<N: NativeTree> {
    pub(crate) native: N::Handle,
    pub(crate) layout: Option<Layout>,
    pub(crate) index: usize,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Option<Vec<NodeId>>,
    pub(crate) styles: Option<Styles>,
    pub(crate) binder: Option<Rc<dyn DataBinder<N>>>,
}

impl<N: NativeTree> NodeInit<N> {
    pub fn new(native: N::Handle) -> Self {
        Self {
            native,
            layout: None,
            index: 0,
            parent: None,
            children: None,
            styles: None,
            binder: None,
        }
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// Record a parent back-reference. The builder is responsible for listing the node
    /// among the parent's children; prefer `ViewTree::add_view` when it is not.
    pub fn parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Children whose widgets already sit under `native`, in the same order.
    pub fn children(mut self, children: Vec<NodeId>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn styles(mut self, styles: Styles) -> Self {
        self.styles = Some(styles);
        self
    }

    pub fn binder(mut self, binder: Rc<dyn DataBinder<N>>) -> Self {
        self.binder = Some(binder);
        self
    }
}
