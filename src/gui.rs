use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
};

use clap::Parser;
use eframe::egui::{
    self, Color32, ColorImage, Pos2, Sense, Slider, Stroke, StrokeKind, TextureHandle,
    TextureOptions, pos2, vec2,
};
use log::{error, info};
use slice_viewer::{InteractionMode, Point, Surface, ViewerSession, common::LayoutArgs};

#[derive(Parser, Debug)]
struct Args {
    /// Path to the input volume: int16 samples without any header.
    raw_path: Option<PathBuf>,
    #[command(flatten)]
    layout: LayoutArgs,
    #[arg(long, default_value_t = 512)]
    canvas_width: u32,
    #[arg(long, default_value_t = 512)]
    canvas_height: u32,
}

struct ViewerApp {
    layout: LayoutArgs,
    source_path: Option<PathBuf>,
    session: ViewerSession,
    texture: Option<TextureHandle>,
    dirty: bool,
}

impl ViewerApp {
    fn new(layout: LayoutArgs, surface: Surface) -> Self {
        let mut session = ViewerSession::new();
        session.set_surface(Some(surface));
        Self {
            layout,
            source_path: None,
            session,
            texture: None,
            dirty: true,
        }
    }

    fn open(&mut self, path: &Path) {
        match self.layout.open(path) {
            Ok(volume) => {
                self.session.load(volume);
                self.source_path = Some(path.to_owned());
                self.dirty = true;
            }
            Err(e) => error!("could not load {path:?}: {e}"),
        }
    }

    fn download(&self) {
        let (name, bytes) = match self.session.export_png() {
            Ok(Some(export)) => export,
            Ok(None) => return,
            Err(e) => {
                error!("export failed: {e}");
                return;
            }
        };
        if let Some(path) = rfd::FileDialog::new().set_file_name(&name).save_file() {
            match fs::write(&path, bytes) {
                Ok(()) => info!("saved {path:?}"),
                Err(e) => error!("could not write {path:?}: {e}"),
            }
        }
    }

    fn show_canvas(&mut self, ui: &mut egui::Ui) {
        let Some(surface) = self.session.surface() else {
            return;
        };
        let size = vec2(surface.width as f32, surface.height as f32);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
        let to_surface = |pos: Pos2| Point::new(pos.x - rect.min.x, pos.y - rect.min.y);

        let (pressed, released, pointer) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
            )
        });
        if let Some(pos) = pointer {
            if pressed && response.hovered() {
                self.dirty |= self.session.pointer_down(to_surface(pos));
            }
            if response.dragged() {
                self.dirty |= self.session.pointer_move(to_surface(pos));
            }
        }
        if released {
            self.session.pointer_up();
        }

        if (self.dirty || self.texture.is_none())
            && let Some(frame) = self.session.render()
        {
            let size = [frame.width() as usize, frame.height() as usize];
            let image = ColorImage::from_rgba_unmultiplied(size, frame.as_raw());
            match &mut self.texture {
                Some(texture) => texture.set(image, TextureOptions::LINEAR),
                None => {
                    let texture = ui.ctx().load_texture("slice", image, TextureOptions::LINEAR);
                    self.texture = Some(texture);
                }
            }
            self.dirty = false;
        }

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, Color32::BLACK);
        if let Some(texture) = &self.texture {
            let uv = egui::Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
            painter.image(texture.id(), rect, uv, Color32::WHITE);
        }
        for p in self.session.selection().points() {
            let on_screen = self.session.viewport().source_to_screen(*p);
            painter.circle_filled(rect.min + vec2(on_screen.x, on_screen.y), 3.0, Color32::RED);
        }
        if let Some((min, max)) = self.session.selection_outline() {
            let outline = egui::Rect::from_two_pos(
                rect.min + vec2(min.x, min.y),
                rect.min + vec2(max.x, max.y),
            );
            painter.rect_stroke(outline, 0.0, Stroke::new(2.0, Color32::RED), StrokeKind::Middle);
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let env = env_logger::Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1024.0, 1024.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Slice viewer",
        options,
        Box::new(move |_cc| {
            let surface = Surface::new(args.canvas_width, args.canvas_height);
            let mut app = ViewerApp::new(args.layout, surface);
            if let Some(path) = &args.raw_path {
                app.open(path);
            }
            Ok(Box::new(app))
        }),
    )?;

    Ok(())
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if ui.button("Load...").clicked()
                && let Some(new_path) = rfd::FileDialog::new().pick_file()
            {
                self.open(&new_path);
            }
            let Some(header) = self.session.volume().map(|v| v.header().clone()) else {
                return;
            };
            if let Some(path) = &self.source_path {
                ui.label("Input path: ");
                ui.monospace(path.to_string_lossy());
            }
            ui.label(format!(
                "Input size: {}x{}x{}",
                header.slices(),
                header.height(),
                header.width()
            ));

            ui.horizontal(|ui| {
                let mode = self.session.mode();
                if ui
                    .selectable_label(mode == InteractionMode::Select, "Select On")
                    .clicked()
                {
                    self.session.enable_select();
                }
                if ui
                    .selectable_label(mode == InteractionMode::Drag, "Drag")
                    .clicked()
                {
                    self.session.enable_drag();
                }
                if ui.button("Cancel").clicked() {
                    self.session.cancel_selection();
                    self.dirty = true;
                }
            });

            self.show_canvas(ui);

            ui.horizontal(|ui| {
                if ui.button("Zoom Out").clicked() {
                    self.session.zoom_out();
                    self.dirty = true;
                }
                if ui.button("Zoom In").clicked() {
                    self.session.zoom_in();
                    self.dirty = true;
                }
                if ui.button("Download").clicked() {
                    self.download();
                }
            });

            // 1-indexed position in the UI:
            let mut slider_value = self.session.current_slice() + 1;
            ui.add(
                Slider::new(&mut slider_value, 1..=header.slices().max(1))
                    .text("Slide to view Image"),
            );
            if slider_value - 1 != self.session.current_slice() {
                self.session.set_slice(slider_value - 1);
                self.dirty = true;
            }

            egui::CollapsingHeader::new("Header data").show(ui, |ui| {
                egui::Grid::new("header_table").striped(true).show(ui, |ui| {
                    for (key, value) in self.session.header_table() {
                        ui.label(format!("{key}:"));
                        ui.label(value);
                        ui.end_row();
                    }
                });
            });
        });

        if self.dirty {
            ctx.request_repaint();
        }
    }
}
