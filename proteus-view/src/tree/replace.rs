use super::{Attachment, ViewTree};
use crate::error::Result;
use crate::native::NativeTree;
use crate::node::{NodeId, ViewNode};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

impl<N: NativeTree> ViewTree<N> {
    /// Swap the content of `id` for `replacement`, keeping `id` at the same position.
    ///
    /// `id` keeps its identity: afterwards it wraps the replacement's widget and owns its
    /// children, layout, styles and binder, while its previous widget and subtree are
    /// released. The `replacement` id is consumed: its slot is freed.
    ///
    /// A node listed by a live parent is swapped through that parent. A node that only
    /// hangs in the native tree is swapped natively: its widget is removed, the new one
    /// is appended to the same native parent, and the logical node owning that native
    /// parent (if any) gets `id` patched into its child list at the old native position.
    /// A node attached nowhere is left alone.
    pub fn replace_view(&mut self, id: NodeId, replacement: NodeId) -> Result<()> {
        let own_native = self.get(id)?.native;
        let replacement_native = self.get(replacement)?.native;
        let (Some(own_native), Some(replacement_native)) = (own_native, replacement_native) else {
            trace!(node = ?id, ?replacement, "replace_view skipped: missing native handle");
            return Ok(());
        };
        if self.is_ancestor(id, replacement) || self.is_ancestor(replacement, id) {
            trace!(node = ?id, ?replacement, "replace_view skipped: nodes share a subtree");
            return Ok(());
        }

        let attachment = self.attachment(id);
        match attachment {
            Attachment::Tracked { parent, .. } => self.check_consistent(parent)?,
            Attachment::NativeOnly { .. } => {}
            Attachment::Detached => {
                trace!(node = ?id, "replace_view skipped: node has no parent on either side");
                return Ok(());
            }
        }

        self.detach_replacement(replacement, replacement_native)?;

        match attachment {
            Attachment::Tracked { parent, .. } => {
                self.replace_tracked(id, parent, replacement)?;
            }
            Attachment::NativeOnly { native_parent } => {
                self.replace_native_only(id, own_native, native_parent, replacement, replacement_native);
            }
            Attachment::Detached => {}
        }

        debug!(node = ?id, ?replacement, native = ?replacement_native, "view replaced");
        Ok(())
    }

    /// A widget has at most one native parent, and the replacement leaves any logical
    /// parent it still has.
    fn detach_replacement(&mut self, replacement: NodeId, replacement_native: N::Handle) -> Result<()> {
        if let Attachment::Tracked { parent, .. } = self.attachment(replacement) {
            self.remove_view(parent, replacement)?;
        }
        self.unset_parent(replacement)?;
        if let Some(native_parent) = self.native.parent(replacement_native) {
            self.native.remove_child(native_parent, replacement_native);
        }
        Ok(())
    }

    fn replace_tracked(&mut self, id: NodeId, parent: NodeId, replacement: NodeId) -> Result<()> {
        // Detaching the replacement may have shifted our position among siblings.
        let Some(position) = self.get(parent)?.children().iter().position(|&c| c == id) else {
            trace!(node = ?id, ?parent, "replace_view skipped: node left its parent");
            return Ok(());
        };
        self.detach_at(parent, position);
        self.unset_parent(id)?;

        self.release_content(id);
        self.adopt(id, replacement);
        self.add_view_at(parent, id, position)
    }

    fn replace_native_only(
        &mut self,
        id: NodeId,
        own_native: N::Handle,
        native_parent: N::Handle,
        replacement: NodeId,
        replacement_native: N::Handle,
    ) {
        let position = self.native.index_of_child(native_parent, own_native);
        self.native.remove_child(native_parent, own_native);
        self.native.add_child(native_parent, replacement_native, None);

        self.release_content(id);
        self.adopt(id, replacement);

        let Some(owner) = self.find_by_native(native_parent) else {
            return;
        };
        let Some(node) = self.nodes.get_mut(owner) else {
            return;
        };
        let children = node.children.get_or_insert_with(SmallVec::new);
        let inserted = match position {
            Some(position) if position < children.len() => position,
            _ => children.len(),
        };
        children.insert(inserted, id);
        self.reindex_from(owner, inserted);
        warn!(node = ?id, ?owner, position = inserted, "patched child list of untracked node's native parent");
    }

    /// Move the replacement's content into `id` and free the replacement's slot.
    fn adopt(&mut self, id: NodeId, replacement: NodeId) {
        let Some(source) = self.nodes.remove(replacement) else {
            return;
        };
        let ViewNode {
            native,
            children,
            layout,
            styles,
            binder,
            ..
        } = source;

        if let Some(handle) = native {
            self.owners.insert(handle, id);
        }
        for &child in children.iter().flatten() {
            if let Some(node) = self.nodes.get_mut(child) {
                node.parent = Some(id);
            }
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.native = native;
            node.children = children;
            node.layout = layout;
            node.styles = styles;
            node.binder = binder;
        }
    }
}
