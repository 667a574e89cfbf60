use super::{Attachment, ViewTree};
use crate::error::Result;
use crate::native::NativeTree;
use crate::node::NodeId;
use smallvec::SmallVec;
use tracing::{debug, trace};

impl<N: NativeTree> ViewTree<N> {
    /// Append `child` to `parent`.
    pub fn add_view(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.add_view_at(parent, child, usize::MAX)
    }

    /// Insert `child` under `parent` at `index`, on both the logical and the native side.
    ///
    /// An index past the current child count appends. Does nothing when either node has
    /// lost its widget, or when the insert would put a node inside its own subtree.
    pub fn add_view_at(&mut self, parent: NodeId, child: NodeId, index: usize) -> Result<()> {
        let parent_native = self.get(parent)?.native;
        let child_native = self.get(child)?.native;
        let (Some(parent_native), Some(child_native)) = (parent_native, child_native) else {
            trace!(?parent, ?child, "add_view skipped: missing native handle");
            return Ok(());
        };
        if self.is_ancestor(child, parent) {
            trace!(?parent, ?child, "add_view skipped: child is an ancestor of parent");
            return Ok(());
        }

        if let Attachment::Tracked { parent: previous, .. } = self.attachment(child) {
            self.remove_view(previous, child)?;
        }
        if let Some(native_parent) = self.native.parent(child_native) {
            self.native.remove_child(native_parent, child_native);
        }

        let node = self.get_mut(parent)?;
        let children = node.children.get_or_insert_with(SmallVec::new);
        let position = index.min(children.len());
        children.insert(position, child);
        self.native.add_child(parent_native, child_native, Some(position));

        let child_node = self.get_mut(child)?;
        child_node.parent = Some(parent);
        self.reindex_from(parent, position);

        debug!(?parent, ?child, position, "view added");
        Ok(())
    }
}
