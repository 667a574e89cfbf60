use super::types::{NodeId, ViewNode};
use crate::native::NativeTree;

/// Slot storage for view nodes with generation-checked ids.
pub(crate) struct NodeArena<N: NativeTree> {
    nodes: Vec<Option<ViewNode<N>>>,
    /// Last generation per slot, kept across frees
    generations: Vec<u32>,
    free_list: Vec<u32>,
}

impl<N: NativeTree> NodeArena<N> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    pub fn insert(&mut self, node: ViewNode<N>) -> NodeId {
        if let Some(slot) = self.free_list.pop() {
            let idx = slot as usize;
            let generation = self.generations[idx].wrapping_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(node);
            NodeId::new(slot, generation)
        } else {
            let slot = self.nodes.len() as u32;
            self.nodes.push(Some(node));
            self.generations.push(0);
            NodeId::new(slot, 0)
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&ViewNode<N>> {
        let idx = id.slot();
        if self.generations.get(idx).copied() != Some(id.generation) {
            return None;
        }
        self.nodes.get(idx)?.as_ref()
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut ViewNode<N>> {
        let idx = id.slot();
        if self.generations.get(idx).copied() != Some(id.generation) {
            return None;
        }
        self.nodes.get_mut(idx)?.as_mut()
    }

    /// Free the slot. The id, and every copy of it, stops resolving.
    pub fn remove(&mut self, id: NodeId) -> Option<ViewNode<N>> {
        let idx = id.slot();
        if self.generations.get(idx).copied() != Some(id.generation) {
            return None;
        }
        let node = self.nodes.get_mut(idx)?.take();
        if node.is_some() {
            self.free_list.push(id.slot);
        }
        node
    }

    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<N: NativeTree> Default for NodeArena<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::{StubNativeTree, WidgetId};

    fn node(native: WidgetId) -> ViewNode<StubNativeTree> {
        ViewNode {
            native: Some(native),
            layout: None,
            index: 0,
            parent: None,
            children: None,
            styles: None,
            binder: None,
        }
    }

    #[test]
    fn test_node_arena_insert() {
        let mut widgets = StubNativeTree::new();
        let mut arena = NodeArena::new();
        let id = arena.insert(node(widgets.create("TextView")));

        assert_eq!(id, NodeId::new(0, 0));
        assert!(arena.contains(id));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_node_arena_remove_reuse_bumps_generation() {
        let mut widgets = StubNativeTree::new();
        let mut arena = NodeArena::new();
        let first = arena.insert(node(widgets.create("TextView")));

        assert!(arena.remove(first).is_some());
        assert!(arena.get(first).is_none());
        assert!(arena.remove(first).is_none());
        assert!(arena.is_empty());

        // Next insert reuses the slot under a new generation
        let second = arena.insert(node(widgets.create("ImageView")));
        assert_eq!(second.slot(), first.slot());
        assert_ne!(second, first);
        assert!(arena.get(first).is_none());
        assert!(arena.get(second).is_some());
    }
}
