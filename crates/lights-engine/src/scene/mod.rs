//! Per-frame draw stream.
//!
//! Commands are renderer-agnostic. Each renderer walks the list in paint
//! order (z ascending, then insertion order) and picks the commands it owns.

mod cmd;
mod list;

pub use cmd::{DrawCmd, QuadCmd, TextCmd};
pub use list::{DrawItem, DrawList, SortKey, ZIndex};
