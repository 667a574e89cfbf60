use super::traits::NativeTree;
use smartstring::{LazyCompact, SmartString};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Handle into a [`StubNativeTree`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u32);

impl WidgetId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct Widget {
    kind: SmartString<LazyCompact>,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
}

/// Headless widget tree.
///
/// Behaves like a platform view-group hierarchy: every widget has at most one parent,
/// adding a widget that is already attached moves it. Released widgets are gone for
/// good; their ids are never handed out again.
pub struct StubNativeTree {
    widgets: Vec<Option<Widget>>,
    /// Optional log buffer for testing
    log_buffer: Option<Rc<RefCell<Vec<String>>>>,
}

impl StubNativeTree {
    pub fn new() -> Self {
        Self {
            widgets: Vec::new(),
            log_buffer: None,
        }
    }

    /// Create a stub tree that records every structural operation into `buffer`
    pub fn with_buffer(buffer: Rc<RefCell<Vec<String>>>) -> Self {
        Self {
            widgets: Vec::new(),
            log_buffer: Some(buffer),
        }
    }

    fn log(&self, msg: String) {
        tracing::trace!(target: "proteus_view::stub", "{}", msg);
        if let Some(buffer) = &self.log_buffer {
            buffer.borrow_mut().push(msg);
        }
    }

    /// Create a detached widget of the given kind ("LinearLayout", "TextView", ...).
    pub fn create(&mut self, kind: &str) -> WidgetId {
        let id = WidgetId(self.widgets.len() as u32);
        self.widgets.push(Some(Widget {
            kind: SmartString::from(kind),
            parent: None,
            children: Vec::new(),
        }));
        self.log(format!("create {:?} {}", id, kind));
        id
    }

    pub fn kind(&self, id: WidgetId) -> Option<&str> {
        self.widget(id).map(|w| w.kind.as_str())
    }

    pub fn is_alive(&self, id: WidgetId) -> bool {
        self.widget(id).is_some()
    }

    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.widget(id).map(|w| w.children.as_slice()).unwrap_or(&[])
    }

    /// Number of widgets that have not been released
    pub fn live_count(&self) -> usize {
        self.widgets.iter().filter(|w| w.is_some()).count()
    }

    fn widget(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.get(id.index())?.as_ref()
    }

    fn widget_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.widgets.get_mut(id.index())?.as_mut()
    }

    fn detach(&mut self, child: WidgetId) {
        let Some(old_parent) = self.widget(child).and_then(|w| w.parent) else {
            return;
        };
        if let Some(parent) = self.widget_mut(old_parent) {
            parent.children.retain(|&c| c != child);
        }
        if let Some(child) = self.widget_mut(child) {
            child.parent = None;
        }
    }
}

impl Default for StubNativeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeTree for StubNativeTree {
    type Handle = WidgetId;

    fn parent(&self, handle: WidgetId) -> Option<WidgetId> {
        self.widget(handle)?.parent
    }

    fn child_count(&self, handle: WidgetId) -> usize {
        self.children(handle).len()
    }

    fn child_at(&self, parent: WidgetId, index: usize) -> Option<WidgetId> {
        self.children(parent).get(index).copied()
    }

    fn index_of_child(&self, parent: WidgetId, child: WidgetId) -> Option<usize> {
        self.children(parent).iter().position(|&c| c == child)
    }

    fn add_child(&mut self, parent: WidgetId, child: WidgetId, index: Option<usize>) {
        if parent == child || !self.is_alive(parent) || !self.is_alive(child) {
            return;
        }
        self.detach(child);

        let Some(group) = self.widget_mut(parent) else {
            return;
        };
        let position = match index {
            Some(i) if i < group.children.len() => i,
            _ => group.children.len(),
        };
        group.children.insert(position, child);
        if let Some(child) = self.widget_mut(child) {
            child.parent = Some(parent);
        }
        self.log(format!("add {:?} -> {:?} @{}", child, parent, position));
    }

    fn remove_child_at(&mut self, parent: WidgetId, index: usize) {
        let Some(group) = self.widget_mut(parent) else {
            return;
        };
        if index >= group.children.len() {
            return;
        }
        let child = group.children.remove(index);
        if let Some(child) = self.widget_mut(child) {
            child.parent = None;
        }
        self.log(format!("remove {:?} from {:?} @{}", child, parent, index));
    }

    fn release(&mut self, handle: WidgetId) {
        if !self.is_alive(handle) {
            return;
        }
        self.detach(handle);
        if let Some(widget) = self.widgets.get_mut(handle.index()).and_then(Option::take) {
            for child in widget.children {
                if let Some(child) = self.widget_mut(child) {
                    child.parent = None;
                }
            }
        }
        self.log(format!("release {:?}", handle));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_position() {
        let mut tree = StubNativeTree::new();
        let group = tree.create("LinearLayout");
        let a = tree.create("TextView");
        let b = tree.create("TextView");
        let c = tree.create("TextView");

        tree.add_child(group, a, None);
        tree.add_child(group, b, Some(0));
        tree.add_child(group, c, Some(99));

        assert_eq!(tree.children(group), &[b, a, c]);
        assert_eq!(tree.parent(a), Some(group));
        assert_eq!(tree.index_of_child(group, c), Some(2));
    }

    #[test]
    fn test_add_moves_attached_child() {
        let mut tree = StubNativeTree::new();
        let first = tree.create("FrameLayout");
        let second = tree.create("FrameLayout");
        let child = tree.create("ImageView");

        tree.add_child(first, child, None);
        tree.add_child(second, child, None);

        assert!(tree.children(first).is_empty());
        assert_eq!(tree.children(second), &[child]);
        assert_eq!(tree.parent(child), Some(second));
    }

    #[test]
    fn test_remove_child_at_out_of_range() {
        let mut tree = StubNativeTree::new();
        let group = tree.create("LinearLayout");
        let a = tree.create("TextView");
        tree.add_child(group, a, None);

        tree.remove_child_at(group, 5);
        assert_eq!(tree.child_count(group), 1);

        tree.remove_child(group, a);
        assert_eq!(tree.child_count(group), 0);
        assert_eq!(tree.parent(a), None);
    }

    #[test]
    fn test_release_detaches_and_orphans() {
        let mut tree = StubNativeTree::new();
        let root = tree.create("FrameLayout");
        let group = tree.create("LinearLayout");
        let leaf = tree.create("TextView");
        tree.add_child(root, group, None);
        tree.add_child(group, leaf, None);

        tree.release(group);
        tree.release(group);

        assert!(!tree.is_alive(group));
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.parent(leaf), None);
        assert_eq!(tree.live_count(), 2);
    }

    #[test]
    fn test_log_buffer() {
        let buffer = Rc::new(RefCell::new(Vec::new()));
        let mut tree = StubNativeTree::with_buffer(buffer.clone());
        let group = tree.create("LinearLayout");
        let a = tree.create("TextView");
        tree.add_child(group, a, None);
        tree.remove_child_at(group, 0);

        let log = buffer.borrow();
        assert_eq!(log.len(), 4);
        assert_eq!(log[2], "add #1 -> #0 @0");
        assert_eq!(log[3], "remove #1 from #0 @0");
    }
}
