//! Integer pixel geometry.
//!
//! All rectangles are half-open: a rect covers columns `x..x + width` and rows
//! `y..y + height`. Arithmetic saturates instead of wrapping so that a
//! degenerate rectangle can never alias the far side of the screen.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self { Self { width, height } }

    pub fn area(&self) -> u64 { u64::from(self.width) * u64::from(self.height) }

    /// The whole surface as a rectangle anchored at the origin.
    pub fn bounds(&self) -> Rect { Rect::new(0, 0, self.width, self.height) }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> u32 { self.x.saturating_add(self.width) }

    pub fn bottom(&self) -> u32 { self.y.saturating_add(self.height) }

    pub fn is_empty(&self) -> bool { self.width == 0 || self.height == 0 }

    pub fn size(&self) -> Size { Size::new(self.width, self.height) }

    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x0 < x1 && y0 < y1 {
            Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
        } else {
            None
        }
    }

    pub fn intersects(&self, other: &Rect) -> bool { self.intersection(other).is_some() }

    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Shrinks the rect by `amount` on every side, collapsing to an empty rect
    /// at the center when it does not fit.
    pub fn inset(&self, amount: u32) -> Rect {
        let twice = amount.saturating_mul(2);
        if self.width <= twice || self.height <= twice {
            return Rect::new(
                self.x.saturating_add(self.width / 2),
                self.y.saturating_add(self.height / 2),
                0,
                0,
            );
        }
        Rect::new(
            self.x + amount,
            self.y + amount,
            self.width - twice,
            self.height - twice,
        )
    }
}
