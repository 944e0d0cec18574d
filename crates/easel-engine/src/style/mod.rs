//! Drawing style: the per-draw attribute snapshot and its save/restore stack.

mod stack;
mod value;

pub use stack::StyleStack;
pub use value::{BitmapTextMode, BlendMode, FillMode, PolyWindingMode, RectMode, Style};
