//! 2D layout helpers shared by game UI code.
//!
//! Deliberately tiny: an integer `Rect`, a `Size`, and the couple of layout
//! operations the menus actually need (uniform insets and centered stacks).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn from_size(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x
            && px < self.x.saturating_add(self.w)
            && py >= self.y
            && py < self.y.saturating_add(self.h)
    }

    /// The rect shrunk by `pad` on every side; saturates to zero size.
    pub fn inset(&self, pad: u32) -> Self {
        Self {
            x: self.x.saturating_add(pad),
            y: self.y.saturating_add(pad),
            w: self.w.saturating_sub(pad.saturating_mul(2)),
            h: self.h.saturating_sub(pad.saturating_mul(2)),
        }
    }

    /// A rect of `size` centered inside this one, clamped to fit.
    pub fn centered(&self, size: Size) -> Self {
        let w = size.w.min(self.w);
        let h = size.h.min(self.h);
        Self {
            x: self.x.saturating_add((self.w - w) / 2),
            y: self.y.saturating_add((self.h - h) / 2),
            w,
            h,
        }
    }

    pub fn center_x(&self) -> u32 {
        self.x.saturating_add(self.w / 2)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }
}

/// Lays out `count` rects of `item` size as a vertical stack centered inside
/// `within`, with `gap` pixels between neighbours. Items are clamped to the
/// container width; a stack taller than the container keeps its first item at
/// the container top rather than overflowing upward.
pub fn vstack(within: Rect, item: Size, count: u32, gap: u32) -> Vec<Rect> {
    let w = item.w.min(within.w);
    let total_h = item
        .h
        .saturating_mul(count)
        .saturating_add(gap.saturating_mul(count.saturating_sub(1)));
    let top = within
        .y
        .saturating_add(within.h.saturating_sub(total_h) / 2);
    let x = within.x.saturating_add(within.w.saturating_sub(w) / 2);

    (0..count)
        .map(|i| Rect {
            x,
            y: top.saturating_add(item.h.saturating_add(gap).saturating_mul(i)),
            w,
            h: item.h,
        })
        .collect()
}
