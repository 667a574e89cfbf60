use super::{Attachment, ViewTree};
use crate::error::Result;
use crate::native::NativeTree;
use crate::node::NodeId;
use tracing::{debug, trace, warn};

impl<N: NativeTree> ViewTree<N> {
    /// Detach the child at `child_index` from `parent` and hand it back.
    ///
    /// The returned node keeps its widget and subtree but loses its parent reference.
    /// In strict mode a parent whose native and logical child counts differ is refused
    /// before anything is touched; in lenient mode each side is bounds-checked on its own.
    pub fn remove_view_at(&mut self, parent: NodeId, child_index: usize) -> Result<Option<NodeId>> {
        let node = self.get(parent)?;
        let Some(parent_native) = node.native else {
            trace!(?parent, "remove_view_at skipped: parent destroyed");
            return Ok(None);
        };
        self.check_consistent(parent)?;

        let logical = self.get(parent)?.child_count();
        let native_count = self.native.child_count(parent_native);
        if logical != native_count {
            warn!(?parent, native = native_count, logical, "child lists disagree, removing leniently");
        }

        if child_index < native_count {
            self.native.remove_child_at(parent_native, child_index);
        }
        if child_index >= logical {
            return Ok(None);
        }

        let node = self.get_mut(parent)?;
        let Some(child) = node.children.as_mut().map(|c| c.remove(child_index)) else {
            return Ok(None);
        };
        self.reindex_from(parent, child_index);
        self.unset_parent(child)?;

        debug!(?parent, ?child, child_index, "view removed");
        Ok(Some(child))
    }

    /// Detach `child` from `parent` on whichever side lists it.
    ///
    /// Neither destroys `child` nor clears its parent reference, so the node can be added
    /// somewhere else afterwards with its widget and children intact. Unknown children are
    /// ignored.
    pub fn remove_view(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let node = self.get(parent)?;
        let parent_native = node.native;
        let position = node.children().iter().position(|&c| c == child);
        let child_native = self.nodes.get(child).and_then(|c| c.native);

        if let Some(position) = position {
            if let Some(children) = self.get_mut(parent)?.children.as_mut() {
                children.remove(position);
            }
            self.reindex_from(parent, position);
        }
        if let (Some(parent_native), Some(child_native)) = (parent_native, child_native) {
            if let Some(index) = self.native.index_of_child(parent_native, child_native) {
                self.native.remove_child_at(parent_native, index);
            }
        }

        trace!(?parent, ?child, logical = position.is_some(), "view detached");
        Ok(())
    }

    /// Remove the node from wherever it hangs and release it. Same as [`Self::destroy`].
    pub fn remove_self(&mut self, id: NodeId) -> Result<()> {
        self.destroy(id)
    }

    /// Take the node out of its parent and release its widget, children, layout and
    /// styles. The id stays valid as a destroyed node until [`Self::reclaim`]; the ids of
    /// its descendants stop resolving right away.
    ///
    /// Destroying an already destroyed node does nothing.
    pub fn destroy(&mut self, id: NodeId) -> Result<()> {
        let own_native = match self.get(id)?.native {
            Some(handle) => handle,
            None => {
                trace!(node = ?id, "destroy skipped: already destroyed");
                return Ok(());
            }
        };

        match self.attachment(id) {
            Attachment::Tracked { parent, position } => {
                self.detach_at(parent, position);
            }
            Attachment::NativeOnly { native_parent } => {
                self.native.remove_child(native_parent, own_native);
            }
            Attachment::Detached => {}
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.parent = None;
        }
        self.release_content(id);

        debug!(node = ?id, "node destroyed");
        Ok(())
    }

    /// Paired removal of a child known to sit at `position` in `parent`'s list.
    /// The native side is located by handle so a disagreeing native order cannot
    /// take out a sibling.
    pub(super) fn detach_at(&mut self, parent: NodeId, position: usize) {
        let parent_native = self.nodes.get(parent).and_then(|p| p.native);
        let Some(child) = self
            .nodes
            .get_mut(parent)
            .and_then(|p| p.children.as_mut())
            .filter(|c| position < c.len())
            .map(|c| c.remove(position))
        else {
            return;
        };
        self.reindex_from(parent, position);

        let child_native = self.nodes.get(child).and_then(|c| c.native);
        if let (Some(parent_native), Some(child_native)) = (parent_native, child_native) {
            self.native.remove_child(parent_native, child_native);
        }
    }
}
