mod insert;
mod remove;
mod replace;

use crate::config::TreeConfig;
use crate::error::{Result, ViewError};
use crate::native::NativeTree;
use crate::node::{DataBinder, Layout, NodeArena, NodeId, NodeInit, ViewNode};
use crate::style::Styles;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use tracing::{debug, trace};

/// How a node hangs in the trees, resolved once at the start of `destroy`/`replace_view`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Attachment<H> {
    /// Listed by a live logical parent at `position`, whether or not the node's own
    /// parent reference points there.
    Tracked { parent: NodeId, position: usize },
    /// No logical parent lists it, but its widget sits under `native_parent`.
    NativeOnly { native_parent: H },
    Detached,
}

/// The logical model tree and the native widget tree, kept in the same shape.
///
/// All structural edits go through this type. Each edit touches both sides at the same
/// position, so `children[i]` of a node is always the `i`-th native child of its widget.
pub struct ViewTree<N: NativeTree> {
    nodes: NodeArena<N>,
    native: N,
    /// Which node currently wraps a given widget
    owners: HashMap<N::Handle, NodeId>,
    config: TreeConfig,
}

impl<N: NativeTree> ViewTree<N> {
    pub fn new(native: N) -> Self {
        Self::with_config(native, TreeConfig::default())
    }

    pub fn with_config(native: N, config: TreeConfig) -> Self {
        debug!(consistency = config.consistency.as_str(), "view tree created");
        Self {
            nodes: NodeArena::new(),
            native,
            owners: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn backend(&self) -> &N {
        &self.native
    }

    pub fn backend_mut(&mut self) -> &mut N {
        &mut self.native
    }

    /// Register a node built by the layout builder.
    pub fn create_node(&mut self, init: NodeInit<N>) -> Result<NodeId> {
        if self.owners.contains_key(&init.native) {
            return Err(ViewError::InvalidInit(
                "native handle already belongs to another node",
            ));
        }
        if let Some(parent) = init.parent {
            self.get(parent)?;
        }

        let children = init.children.unwrap_or_default();
        let mut seen = HashSet::with_capacity(children.len());
        for &child in &children {
            let node = self.get(child)?;
            if node.is_destroyed() {
                return Err(ViewError::InvalidInit("child node is destroyed"));
            }
            if !seen.insert(child) {
                return Err(ViewError::InvalidInit("child listed twice"));
            }
        }
        if self.config.verify_children_on_create && !children.is_empty() {
            let mirrored = self.native.child_count(init.native) == children.len()
                && children.iter().enumerate().all(|(i, &child)| {
                    self.native.child_at(init.native, i) == self.nodes.get(child).and_then(|c| c.native)
                });
            if !mirrored {
                return Err(ViewError::InvalidInit(
                    "children do not mirror the native widget tree",
                ));
            }
        }

        let has_children = !children.is_empty();
        let id = self.nodes.insert(ViewNode {
            native: Some(init.native),
            layout: init.layout,
            index: init.index,
            parent: init.parent,
            children: has_children.then(|| children.iter().copied().collect()),
            styles: init.styles,
            binder: init.binder,
        });
        self.owners.insert(init.native, id);
        for (i, &child) in children.iter().enumerate() {
            if let Some(node) = self.nodes.get_mut(child) {
                node.parent = Some(id);
                node.index = i;
            }
        }

        debug!(node = ?id, native = ?init.native, children = children.len(), "node created");
        Ok(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&ViewNode<N>> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(id)
    }

    /// Nodes held by the tree, destroyed ones included until reclaimed.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn native(&self, id: NodeId) -> Option<N::Handle> {
        self.nodes.get(id)?.native
    }

    pub fn index(&self, id: NodeId) -> Option<usize> {
        Some(self.nodes.get(id)?.index)
    }

    pub fn set_index(&mut self, id: NodeId, index: usize) -> Result<()> {
        self.get_mut(id)?.index = index;
        Ok(())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id)?.parent
    }

    /// Clear the parent back-reference only. Widgets and children are untouched.
    pub fn unset_parent(&mut self, id: NodeId) -> Result<()> {
        self.get_mut(id)?.parent = None;
        Ok(())
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map(|n| n.children()).unwrap_or(&[])
    }

    pub fn layout(&self, id: NodeId) -> Option<&Layout> {
        self.nodes.get(id)?.layout()
    }

    pub fn styles(&self, id: NodeId) -> Option<&Styles> {
        self.nodes.get(id)?.styles()
    }

    pub fn set_styles(&mut self, id: NodeId, styles: Option<Styles>) -> Result<()> {
        self.get_mut(id)?.styles = styles;
        Ok(())
    }

    pub fn set_binder(&mut self, id: NodeId, binder: Option<Rc<dyn DataBinder<N>>>) -> Result<()> {
        self.get_mut(id)?.binder = binder;
        Ok(())
    }

    /// Apply a data payload to the node and return the widget that now represents it.
    ///
    /// Without a binder this is the identity: the current handle comes back unchanged.
    pub fn update_data(&mut self, id: NodeId, data: &Value) -> Result<Option<N::Handle>> {
        let node = self.nodes.get(id).ok_or(ViewError::UnknownNode(id))?;
        match node.binder.clone() {
            Some(binder) => {
                trace!(node = ?id, "applying data through binder");
                Ok(binder.update_data(node, data, &mut self.native))
            }
            None => Ok(node.native),
        }
    }

    /// The node wrapping `handle`, if any.
    pub fn find_by_native(&self, handle: N::Handle) -> Option<NodeId> {
        self.owners.get(&handle).copied()
    }

    /// Free the slot of a destroyed node. Live nodes are left alone.
    pub fn reclaim(&mut self, id: NodeId) -> bool {
        match self.nodes.get(id) {
            Some(node) if node.is_destroyed() => {
                self.nodes.remove(id);
                trace!(node = ?id, "slot reclaimed");
                true
            }
            _ => false,
        }
    }

    /// Check that every node under `root` mirrors its widget's children and that the
    /// parent/index bookkeeping agrees with each child list.
    pub fn verify(&self, root: NodeId) -> Result<()> {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = self.get(id)?;
            let Some(native) = node.native else {
                continue;
            };
            let children = node.children();
            let native_count = self.native.child_count(native);
            if native_count != children.len() {
                return Err(ViewError::Inconsistent {
                    node: id,
                    native: native_count,
                    logical: children.len(),
                });
            }
            for (position, &child_id) in children.iter().enumerate() {
                let child = self.get(child_id)?;
                if child.index != position {
                    return Err(ViewError::IndexMismatch {
                        node: id,
                        child: child_id,
                        position,
                        index: child.index,
                    });
                }
                if child.parent != Some(id) {
                    return Err(ViewError::ParentMismatch {
                        node: id,
                        child: child_id,
                    });
                }
                if child.native.is_none() || self.native.child_at(native, position) != child.native {
                    return Err(ViewError::NativeOrderMismatch { node: id, position });
                }
                stack.push(child_id);
            }
        }
        Ok(())
    }

    fn get(&self, id: NodeId) -> Result<&ViewNode<N>> {
        self.nodes.get(id).ok_or(ViewError::UnknownNode(id))
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut ViewNode<N>> {
        self.nodes.get_mut(id).ok_or(ViewError::UnknownNode(id))
    }

    pub(crate) fn attachment(&self, id: NodeId) -> Attachment<N::Handle> {
        let Some(node) = self.nodes.get(id) else {
            return Attachment::Detached;
        };

        if let Some(parent_id) = node.parent {
            if let Some(parent) = self.nodes.get(parent_id).filter(|p| !p.is_destroyed()) {
                let children = parent.children();
                let position = if children.get(node.index) == Some(&id) {
                    Some(node.index)
                } else {
                    children.iter().position(|&c| c == id)
                };
                if let Some(position) = position {
                    return Attachment::Tracked {
                        parent: parent_id,
                        position,
                    };
                }
                trace!(node = ?id, parent = ?parent_id, "stale parent reference");
            }
        }

        let Some(native_parent) = node.native.and_then(|h| self.native.parent(h)) else {
            return Attachment::Detached;
        };
        // Patched in by a native-only replace: listed, but without a back-reference.
        let listed = self.find_by_native(native_parent).and_then(|owner| {
            let position = self.nodes.get(owner)?.children().iter().position(|&c| c == id)?;
            Some((owner, position))
        });
        match listed {
            Some((parent, position)) => Attachment::Tracked { parent, position },
            None => Attachment::NativeOnly { native_parent },
        }
    }

    /// Refuse to edit `parent` in strict mode when its two child lists disagree.
    pub(crate) fn check_consistent(&self, parent: NodeId) -> Result<()> {
        if !self.config.is_strict() {
            return Ok(());
        }
        let node = self.get(parent)?;
        let Some(native) = node.native else {
            return Ok(());
        };
        let native_count = self.native.child_count(native);
        let logical = node.child_count();
        if native_count != logical {
            return Err(ViewError::Inconsistent {
                node: parent,
                native: native_count,
                logical,
            });
        }
        Ok(())
    }

    /// Rewrite `index` of every child of `parent` from `start` on.
    pub(crate) fn reindex_from(&mut self, parent: NodeId, start: usize) {
        let Some(children) = self.nodes.get(parent).and_then(|p| p.children.clone()) else {
            return;
        };
        for (position, &child) in children.iter().enumerate().skip(start) {
            if let Some(node) = self.nodes.get_mut(child) {
                node.index = position;
            }
        }
    }

    /// True when `ancestor` is `node` or sits on the parent chain above it.
    pub(crate) fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        let mut steps = 0;
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.nodes.len() {
                return false;
            }
            current = self.nodes.get(id).and_then(|n| n.parent).or_else(|| match self.attachment(id) {
                Attachment::Tracked { parent, .. } => Some(parent),
                _ => None,
            });
        }
        false
    }

    /// Drop everything the node owns: widget, child subtree, layout, styles, binder.
    /// The node stays addressable as a destroyed tombstone. Its descendants are freed.
    pub(crate) fn release_content(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let native = node.native.take();
        let children = node.children.take();
        node.layout = None;
        node.styles = None;
        node.binder = None;

        if let Some(handle) = native {
            if self.owners.get(&handle) == Some(&id) {
                self.owners.remove(&handle);
            }
            self.native.release(handle);
        }
        for child in children.into_iter().flatten() {
            self.release_content(child);
            self.nodes.remove(child);
        }
    }
}
