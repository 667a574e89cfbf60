use super::types::ViewNode;
use crate::native::NativeTree;
use serde_json::Value;

/// Per-node data binding.
///
/// Plain nodes ignore data updates and keep their widget. Specialized nodes (list rows,
/// recycled cells) attach a binder that applies data-bound attributes to the native
/// widget and returns the handle that now represents the node.
pub trait DataBinder<N: NativeTree> {
    fn update_data(&self, node: &ViewNode<N>, data: &Value, native: &mut N) -> Option<N::Handle>;
}

impl<N, F> DataBinder<N> for F
where
    N: NativeTree,
    F: Fn(&ViewNode<N>, &Value, &mut N) -> Option<N::Handle>,
{
    fn update_data(&self, node: &ViewNode<N>, data: &Value, native: &mut N) -> Option<N::Handle> {
        self(node, data, native)
    }
}
