mod stub;
mod traits;

pub use stub::{StubNativeTree, WidgetId};
pub use traits::NativeTree;
