use duo_wire::Point;

/// Axis-aligned box in canvas pixels.
///
/// `width` and `height` are expected to be non-negative; nothing here checks
/// it, the recorder passes whatever the caller built straight through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BBox {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub const fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub const fn bottom_right(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    /// Same box moved by `(dx, dy)`
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Box of the same width directly under this one, `thickness` pixels tall
    pub const fn underline(&self, thickness: i32) -> Self {
        Self::new(self.x, self.bottom(), self.width, thickness)
    }

    /// Shrink by `amount` on every side
    pub const fn inset(&self, amount: i32) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            self.width - 2 * amount,
            self.height - 2 * amount,
        )
    }
}
