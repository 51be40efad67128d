use std::ops::Sub;

pub const ZOOM_STEP: f32 = 0.1;
/// Zoom never drops below this, so the transform stays invertible.
pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Pan and zoom of the slice on the display surface.
///
/// A slice position `p` lands on screen at `p * zoom + pan`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    zoom: f32,
    pan: Point,
    anchor: Option<Point>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Point::ZERO,
            anchor: None,
        }
    }
}

impl Viewport {
    pub fn new(zoom: f32, pan: Point) -> Self {
        Self {
            zoom: zoom.max(MIN_ZOOM).min(MAX_ZOOM),
            pan,
            anchor: None,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - ZOOM_STEP).max(MIN_ZOOM);
    }

    pub fn begin_pan(&mut self, anchor: Point) {
        self.anchor = Some(anchor);
    }

    /// Move the pan to `point - anchor`. Returns false if no pan gesture is
    /// in progress.
    pub fn update_pan(&mut self, point: Point) -> bool {
        match self.anchor {
            Some(anchor) => {
                self.pan = point - anchor;
                true
            }
            None => false,
        }
    }

    pub fn end_pan(&mut self) {
        self.anchor = None;
    }

    pub fn is_panning(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn source_to_screen(&self, p: Point) -> Point {
        Point::new(p.x * self.zoom + self.pan.x, p.y * self.zoom + self.pan.y)
    }

    pub fn screen_to_source(&self, p: Point) -> Point {
        Point::new((p.x - self.pan.x) / self.zoom, (p.y - self.pan.y) / self.zoom)
    }
}
