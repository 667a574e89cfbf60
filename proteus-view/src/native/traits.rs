use std::fmt::Debug;
use std::hash::Hash;

/// Platform widget hierarchy driven by the view tree.
///
/// Implementations wrap the platform's view-group API (Android `ViewGroup`, UIKit
/// subviews, a test double, ...). The view tree is the only caller and always keeps
/// the logical side in the same order as what it asks for here.
pub trait NativeTree {
    /// Opaque reference to one platform widget.
    type Handle: Copy + Eq + Hash + Debug;

    /// The widget's current native parent, if it is attached anywhere.
    fn parent(&self, handle: Self::Handle) -> Option<Self::Handle>;

    fn child_count(&self, handle: Self::Handle) -> usize;

    fn child_at(&self, parent: Self::Handle, index: usize) -> Option<Self::Handle>;

    fn index_of_child(&self, parent: Self::Handle, child: Self::Handle) -> Option<usize> {
        (0..self.child_count(parent)).find(|&i| self.child_at(parent, i) == Some(child))
    }

    /// Insert `child` under `parent`. `None`, or an index past the end, appends.
    fn add_child(&mut self, parent: Self::Handle, child: Self::Handle, index: Option<usize>);

    /// Remove the child at `index`. Out-of-range indices are ignored.
    fn remove_child_at(&mut self, parent: Self::Handle, index: usize);

    fn remove_child(&mut self, parent: Self::Handle, child: Self::Handle) {
        if let Some(index) = self.index_of_child(parent, child) {
            self.remove_child_at(parent, index);
        }
    }

    /// Called once the logical tree drops its last reference to `handle`.
    fn release(&mut self, _handle: Self::Handle) {}
}
