// SPDX-License-Identifier: LGPL-3.0-only
use nalgebra::{Point2, Vector2};
use std::ops::Add;

/// An axis aligned rectangle, usually expressed in the coordinates of the parent actor.
///
/// Boxes built through [ActorBox::new] never have a negative extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActorBox {
    /// Left edge.
    pub x1: f32,
    /// Top edge.
    pub y1: f32,
    /// Right edge.
    pub x2: f32,
    /// Bottom edge.
    pub y2: f32,
}

impl ActorBox {
    /// Create a new box. The far edges are clamped so that the box is never inverted.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x1,
            y1,
            x2: x2.max(x1),
            y2: y2.max(y1),
        }
    }

    /// Create a box from its origin and size.
    pub fn from_origin_size(origin: Point2<f32>, size: Vector2<f32>) -> Self {
        Self::new(origin.x, origin.y, origin.x + size.x, origin.y + size.y)
    }

    /// Create a box at the origin with the given size.
    pub fn from_size(size: Vector2<f32>) -> Self {
        Self::from_origin_size(Point2::origin(), size)
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        (self.x2 - self.x1).max(0.0)
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        (self.y2 - self.y1).max(0.0)
    }

    /// Top left corner.
    pub fn origin(&self) -> Point2<f32> {
        Point2::new(self.x1, self.y1)
    }

    /// Width and height.
    pub fn size(&self) -> Vector2<f32> {
        Vector2::new(self.width(), self.height())
    }

    /// Returns true if the point lies inside the box.
    ///
    /// Near edges are inclusive and far edges exclusive, so an empty box contains nothing.
    pub fn contains(&self, point: Point2<f32>) -> bool {
        point.x >= self.x1 && point.x < self.x2 && point.y >= self.y1 && point.y < self.y2
    }

    /// Move the box by the given offset.
    pub fn translate(&self, offset: Vector2<f32>) -> Self {
        Self {
            x1: self.x1 + offset.x,
            y1: self.y1 + offset.y,
            x2: self.x2 + offset.x,
            y2: self.y2 + offset.y,
        }
    }

    /// Remove the insets from every side, never going below an empty box.
    pub fn shrink(&self, insets: &Padding) -> Self {
        let x1 = self.x1 + insets.left;
        let y1 = self.y1 + insets.top;
        Self::new(x1, y1, self.x2 - insets.right, self.y2 - insets.bottom)
    }

    /// Clamp a point into the box, edges included.
    ///
    /// Unlike [`contains`](Self::contains) the far edges are inclusive, so a
    /// point clamped onto `x2` or `y2` is not itself contained. Inverted boxes
    /// built through the public fields are treated as their normalised form.
    pub fn clamp_point(&self, point: Point2<f32>) -> Point2<f32> {
        let (x1, x2) = (self.x1.min(self.x2), self.x1.max(self.x2));
        let (y1, y2) = (self.y1.min(self.y2), self.y1.max(self.y2));
        Point2::new(point.x.max(x1).min(x2), point.y.max(y1).min(y2))
    }
}

/// Insets on each side of an actor. Values are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    /// Top inset.
    pub top: f32,
    /// Right inset.
    pub right: f32,
    /// Bottom inset.
    pub bottom: f32,
    /// Left inset.
    pub left: f32,
}

impl Padding {
    /// No padding at all.
    pub const ZERO: Self = Self {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    /// Create a padding, clamping negative insets to zero.
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top: top.max(0.0),
            right: right.max(0.0),
            bottom: bottom.max(0.0),
            left: left.max(0.0),
        }
    }

    /// The same inset on every side.
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Sum of the left and right insets.
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Sum of the top and bottom insets.
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

impl Add for Padding {
    type Output = Padding;

    fn add(self, rhs: Self) -> Self::Output {
        Padding::new(
            self.top + rhs.top,
            self.right + rhs.right,
            self.bottom + rhs.bottom,
            self.left + rhs.left,
        )
    }
}

/// Alignment of a child inside the space it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Align {
    /// Left or top.
    #[default]
    Start,
    /// Centered.
    Middle,
    /// Right or bottom.
    End,
}

impl Align {
    /// The fraction of the leftover space placed before the child.
    pub fn factor(&self) -> f32 {
        match self {
            Align::Start => 0.0,
            Align::Middle => 0.5,
            Align::End => 1.0,
        }
    }

    /// Convert a continuous alignment factor, snapping to thirds.
    pub fn from_factor(factor: f64) -> Self {
        if factor < 1.0 / 3.0 {
            Align::Start
        } else if factor > 2.0 / 3.0 {
            Align::End
        } else {
            Align::Middle
        }
    }
}

/// Direction in which containers lay out their children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Left to right.
    #[default]
    Horizontal,
    /// Top to bottom.
    Vertical,
}
