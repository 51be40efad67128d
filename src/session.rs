use log::{debug, info, warn};

use crate::{
    compose::{Surface, render_slice},
    error::Result,
    read::Volume,
    render::{Raster, blank},
    selection::{Rect, SelectionEngine},
    viewport::{Point, Viewport},
    write::{encode_png, export_filename},
};

/// What a pointer press on the surface does. Drag and select exclude each
/// other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    Drag,
    Select,
}

/// Everything the viewer mutates between frames.
///
/// Nothing is redrawn implicitly: after any mutation the caller asks for a
/// new frame with [`ViewerSession::render`].
///
/// Selection points are converted from screen to slice coordinates through
/// the viewport at the moment they are picked, so the resolved rectangle
/// always addresses the untransformed slice the crop is taken from.
#[derive(Debug, Default)]
pub struct ViewerSession {
    volume: Option<Volume>,
    current_slice: usize,
    viewport: Viewport,
    selection: SelectionEngine,
    mode: InteractionMode,
    surface: Option<Surface>,
}

impl ViewerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, volume: Volume) {
        let header = volume.header();
        info!(
            "new volume: {}x{}x{}",
            header.slices(),
            header.height(),
            header.width()
        );
        self.volume = Some(volume);
        self.set_slice(self.current_slice);
    }

    pub fn volume(&self) -> Option<&Volume> {
        self.volume.as_ref()
    }

    pub fn current_slice(&self) -> usize {
        self.current_slice
    }

    /// Select slice `index`, clamped into the volume. Returns the slice that
    /// is now current.
    pub fn set_slice(&mut self, index: usize) -> usize {
        let last = self
            .volume
            .as_ref()
            .map_or(0, |v| v.header().slices().saturating_sub(1));
        self.current_slice = index.min(last);
        self.current_slice
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn enable_drag(&mut self) {
        self.mode = InteractionMode::Drag;
    }

    pub fn enable_select(&mut self) {
        self.viewport.end_pan();
        self.mode = InteractionMode::Select;
    }

    pub fn selection(&self) -> &SelectionEngine {
        &self.selection
    }

    pub fn selection_rect(&self) -> Option<Rect> {
        self.selection.rect()
    }

    /// Top-left and bottom-right corners of the resolved selection in
    /// surface coordinates, for drawing its outline.
    pub fn selection_outline(&self) -> Option<(Point, Point)> {
        let r = self.selection.rect()?;
        Some((
            self.viewport.source_to_screen(Point::new(r.x, r.y)),
            self.viewport.source_to_screen(Point::new(r.x + r.w, r.y + r.h)),
        ))
    }

    pub fn cancel_selection(&mut self) {
        self.selection.cancel();
        if self.mode == InteractionMode::Select {
            self.mode = InteractionMode::Idle;
        }
    }

    pub fn surface(&self) -> Option<Surface> {
        self.surface
    }

    pub fn set_surface(&mut self, surface: Option<Surface>) {
        self.surface = surface;
    }

    /// Pointer pressed at `point` (surface coordinates). Returns true if the
    /// frame needs to be redrawn.
    pub fn pointer_down(&mut self, point: Point) -> bool {
        let Some(surface) = self.surface else {
            return false;
        };
        if !surface.contains(point.x, point.y) {
            return false;
        }

        match self.mode {
            InteractionMode::Select => {
                if self.selection.rect().is_some() {
                    return false;
                }
                let source = self.viewport.screen_to_source(point);
                if self.selection.pick(source).is_some() {
                    self.mode = InteractionMode::Idle;
                }
                true
            }
            InteractionMode::Drag => {
                self.viewport.begin_pan(point);
                false
            }
            InteractionMode::Idle => false,
        }
    }

    pub fn pointer_move(&mut self, point: Point) -> bool {
        self.mode == InteractionMode::Drag && self.viewport.update_pan(point)
    }

    pub fn pointer_up(&mut self) {
        self.viewport.end_pan();
    }

    /// The current frame, or `None` without a surface to draw on. Missing
    /// data or a broken slice give a blank frame.
    pub fn render(&self) -> Option<Raster> {
        let surface = self.surface?;
        let Some(volume) = &self.volume else {
            return Some(blank(surface.width, surface.height));
        };

        let rect = self.selection.rect();
        match render_slice(
            volume,
            self.current_slice,
            &self.viewport,
            rect.as_ref(),
            Some(surface),
        ) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("could not render slice {}: {e}", self.current_slice);
                Some(blank(surface.width, surface.height))
            }
        }
    }

    /// The current frame as PNG, with its download name.
    pub fn export_png(&self) -> Result<Option<(String, Vec<u8>)>> {
        let Some(frame) = self.render() else {
            debug!("nothing to export without a surface");
            return Ok(None);
        };
        let name = export_filename(self.current_slice);
        let bytes = encode_png(&frame)?;
        info!("exported {name} ({} bytes)", bytes.len());
        Ok(Some((name, bytes)))
    }

    pub fn header_table(&self) -> Vec<(String, String)> {
        self.volume
            .as_ref()
            .map(|v| v.header().display_table())
            .unwrap_or_default()
    }
}
