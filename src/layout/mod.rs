pub mod dampen;
pub mod squarify;

pub use dampen::{dampen_weights, DampenParams};
pub use squarify::squarify;

/// A positioned rectangle in viewport pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Area in px².
    pub fn area(self) -> f32 {
        self.w * self.h
    }

    /// Shrink the rectangle by `pad` on all four sides.
    /// Dimensions are clamped at zero so a heavy pad never flips signs.
    pub fn inset(self, pad: f32) -> Self {
        Self {
            x: self.x + pad,
            y: self.y + pad,
            w: (self.w - 2.0 * pad).max(0.0),
            h: (self.h - 2.0 * pad).max(0.0),
        }
    }

    /// Remove a strip of the given height from the top edge and return
    /// what is left. Used for label bars.
    pub fn cut_top(self, strip_h: f32) -> Self {
        let taken = strip_h.min(self.h);
        Self {
            x: self.x,
            y: self.y + taken,
            w: self.w,
            h: self.h - taken,
        }
    }
}

/// One weighted input to the squarify engine. The payload travels through
/// layout untouched and comes back attached to a rectangle.
#[derive(Debug, Clone)]
pub struct WeightedItem<T> {
    pub weight: f64,
    pub payload: T,
}

impl<T> WeightedItem<T> {
    pub fn new(weight: f64, payload: T) -> Self {
        Self { weight, payload }
    }
}

/// One output of the squarify engine: a rectangle bound to its payload.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutItem<T> {
    pub rect: Rect,
    pub payload: T,
}
