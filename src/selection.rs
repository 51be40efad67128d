use log::debug;

use crate::viewport::Point;

pub const SELECTION_POINTS: usize = 4;

/// Axis-aligned rectangle in slice coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Smallest rectangle containing all `points`.
    pub fn bounding(points: &[Point]) -> Option<Rect> {
        let first = points.first()?;
        let (min_x, max_x, min_y, max_y) = points.iter().fold(
            (first.x, first.x, first.y, first.y),
            |(min_x, max_x, min_y, max_y), p| {
                (min_x.min(p.x), max_x.max(p.x), min_y.min(p.y), max_y.max(p.y))
            },
        );
        Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    /// Zero width or height; drawing such a region covers nothing.
    pub fn is_degenerate(&self) -> bool {
        !(self.w > 0.0 && self.h > 0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Accumulating(Vec<Point>),
    Resolved(Rect),
}

/// Collects four picked points and reduces them to their bounding box.
///
/// The points are not checked for forming a sensible quadrilateral; any
/// four points resolve, collinear ones to a degenerate rectangle.
#[derive(Debug, Clone, Default)]
pub struct SelectionEngine {
    state: SelectionState,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Add a point. Returns the rectangle if this was the fourth point.
    /// Picks after resolution are ignored until [`cancel`](Self::cancel).
    pub fn pick(&mut self, point: Point) -> Option<Rect> {
        let mut points = match std::mem::take(&mut self.state) {
            SelectionState::Idle => Vec::with_capacity(SELECTION_POINTS),
            SelectionState::Accumulating(points) => points,
            SelectionState::Resolved(rect) => {
                debug!("selection already resolved, ignoring pick at {point:?}");
                self.state = SelectionState::Resolved(rect);
                return None;
            }
        };

        points.push(point);
        if points.len() < SELECTION_POINTS {
            self.state = SelectionState::Accumulating(points);
            return None;
        }

        let rect = Rect::bounding(&points)?;
        debug!("selection resolved to {rect:?}");
        self.state = SelectionState::Resolved(rect);
        Some(rect)
    }

    pub fn cancel(&mut self) {
        self.state = SelectionState::Idle;
    }

    pub fn points(&self) -> &[Point] {
        match &self.state {
            SelectionState::Accumulating(points) => points.as_slice(),
            _ => &[],
        }
    }

    pub fn rect(&self) -> Option<Rect> {
        match self.state {
            SelectionState::Resolved(rect) => Some(rect),
            _ => None,
        }
    }
}
