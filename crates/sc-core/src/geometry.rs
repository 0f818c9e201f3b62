//! Resize-handle geometry and coordinate mapping.
//!
//! All gesture math runs in canvas coordinates. Pointer events arrive in
//! screen coordinates and are mapped through one explicit view transform;
//! a degenerate transform (zero determinant) falls back to raw screen
//! coordinates in exactly one place, `canvas_point`.

use kurbo::{Affine, Point, Rect};

/// Determinants below this are treated as degenerate.
const DET_EPSILON: f64 = 1e-9;

/// The eight resize handles around a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardinalPoint {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CardinalPoint {
    /// The handle diagonally or directly opposite, whose position stays
    /// fixed during the resize.
    pub fn opposite(self) -> Self {
        match self {
            Self::N => Self::S,
            Self::NE => Self::SW,
            Self::E => Self::W,
            Self::SE => Self::NW,
            Self::S => Self::N,
            Self::SW => Self::NE,
            Self::W => Self::E,
            Self::NW => Self::SE,
        }
    }

    /// Whether dragging this handle changes the width.
    pub fn affects_width(self) -> bool {
        !matches!(self, Self::N | Self::S)
    }

    /// Whether dragging this handle changes the height.
    pub fn affects_height(self) -> bool {
        !matches!(self, Self::E | Self::W)
    }

    /// Whether this is a corner handle (resizes both axes).
    pub fn is_corner(self) -> bool {
        matches!(self, Self::NE | Self::SE | Self::SW | Self::NW)
    }

    /// The point on `rect` this handle sits at. Edge handles sit at the
    /// edge midpoint.
    pub fn point_on(self, rect: Rect) -> Point {
        let cx = (rect.x0 + rect.x1) / 2.0;
        let cy = (rect.y0 + rect.y1) / 2.0;
        match self {
            Self::N => Point::new(cx, rect.y0),
            Self::NE => Point::new(rect.x1, rect.y0),
            Self::E => Point::new(rect.x1, cy),
            Self::SE => Point::new(rect.x1, rect.y1),
            Self::S => Point::new(cx, rect.y1),
            Self::SW => Point::new(rect.x0, rect.y1),
            Self::W => Point::new(rect.x0, cy),
            Self::NW => Point::new(rect.x0, rect.y0),
        }
    }
}

/// Map a screen point to canvas coordinates through the view transform.
///
/// A transform that cannot be inverted (determinant ~ 0) yields the raw
/// screen point, so gestures keep working — with screen deltas — even
/// when the host collapses the view to a zero scale.
pub fn canvas_point(view: Affine, screen: Point) -> Point {
    if view.determinant().abs() < DET_EPSILON {
        screen
    } else {
        view.inverse() * screen
    }
}

/// Candidate bounds for a handle drag: the opposite handle's position is
/// the anchor, the dragged edge(s) follow the pointer. Resizing from a
/// non-anchor side repositions the rect as well as sizing it. The result
/// is normalized, so dragging past the anchor flips rather than producing
/// a negative extent.
pub fn resize_rect(start: Rect, handle: CardinalPoint, pointer: Point) -> Rect {
    let anchor = handle.opposite().point_on(start);

    let (x0, x1) = if handle.affects_width() {
        (anchor.x.min(pointer.x), anchor.x.max(pointer.x))
    } else {
        (start.x0, start.x1)
    };
    let (y0, y1) = if handle.affects_height() {
        (anchor.y.min(pointer.y), anchor.y.max(pointer.y))
    } else {
        (start.y0, start.y1)
    };
    Rect::new(x0, y0, x1, y1)
}

/// Snap `candidate` to the aspect ratio of `start`, keeping the anchor
/// point of `handle` fixed. For corner handles the larger relative growth
/// wins; for edge handles the dragged axis drives the other, centered on
/// the anchor edge.
pub fn constrain_aspect(start: Rect, candidate: Rect, handle: CardinalPoint) -> Rect {
    if start.width() <= 0.0 || start.height() <= 0.0 {
        return candidate;
    }
    let anchor = handle.opposite().point_on(start);

    let (w, h) = if handle.is_corner() {
        let sx = candidate.width() / start.width();
        let sy = candidate.height() / start.height();
        let s = sx.max(sy);
        (start.width() * s, start.height() * s)
    } else if handle.affects_width() {
        let w = candidate.width();
        (w, w * start.height() / start.width())
    } else {
        let h = candidate.height();
        (h * start.width() / start.height(), h)
    };

    // Grow away from the anchor; edge handles keep the orthogonal axis
    // centered on the anchor point.
    let grows_right = matches!(
        handle,
        CardinalPoint::E | CardinalPoint::NE | CardinalPoint::SE
    );
    let grows_down = matches!(
        handle,
        CardinalPoint::S | CardinalPoint::SE | CardinalPoint::SW
    );

    let (x0, x1) = if !handle.affects_width() {
        (anchor.x - w / 2.0, anchor.x + w / 2.0)
    } else if grows_right {
        (anchor.x, anchor.x + w)
    } else {
        (anchor.x - w, anchor.x)
    };
    let (y0, y1) = if !handle.affects_height() {
        (anchor.y - h / 2.0, anchor.y + h / 2.0)
    } else if grows_down {
        (anchor.y, anchor.y + h)
    } else {
        (anchor.y - h, anchor.y)
    };
    Rect::new(x0, y0, x1, y1)
}

/// Whether two rects overlap with positive area on both axes.
pub fn rects_intersect(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}
