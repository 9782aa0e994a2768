use crate::coords::Rect;
use crate::paint::Color;

use super::cmd::{DrawCmd, QuadCmd, TextCmd};

/// Draw layer. Higher values paint on top.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ZIndex(pub i32);

/// Paint-order key: layer first, then insertion order within the layer.
///
/// Field order matters: the derived `Ord` compares `z` before `order`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SortKey {
    pub z: ZIndex,
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
}

/// Draw commands recorded for one frame.
///
/// The sorted index buffer is kept between frames so a warmed-up list paints
/// without allocating.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,
    sorted: Vec<usize>,
    dirty: bool,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all commands, keeping capacity.
    pub fn clear(&mut self) {
        self.items.clear();
        self.sorted.clear();
        self.next_order = 0;
        self.dirty = false;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Commands in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let key = SortKey {
            z,
            order: self.next_order,
        };
        self.next_order = self.next_order.wrapping_add(1);
        self.items.push(DrawItem { key, cmd });
        self.dirty = true;
    }

    #[inline]
    pub fn push_quad(&mut self, z: ZIndex, rect: Rect, color: Color) {
        self.push(z, DrawCmd::Quad(QuadCmd { rect, color }));
    }

    #[inline]
    pub fn push_text(&mut self, z: ZIndex, text: TextCmd) {
        self.push(z, DrawCmd::Text(text));
    }

    /// Commands back-to-front.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.dirty {
            self.sorted.clear();
            self.sorted.extend(0..self.items.len());
            let items = &self.items;
            self.sorted.sort_by_key(|&i| items[i].key);
            self.dirty = false;
        }
        self.sorted.iter().map(|&i| &self.items[i])
    }

    /// Quads back-to-front.
    pub fn quads(&mut self) -> impl Iterator<Item = &QuadCmd> {
        self.iter_in_paint_order().filter_map(|item| match &item.cmd {
            DrawCmd::Quad(q) => Some(q),
            _ => None,
        })
    }

    /// Text runs back-to-front.
    pub fn texts(&mut self) -> impl Iterator<Item = &TextCmd> {
        self.iter_in_paint_order().filter_map(|item| match &item.cmd {
            DrawCmd::Text(t) => Some(t),
            _ => None,
        })
    }
}
