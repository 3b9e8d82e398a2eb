//! Modal eframe windows: one drawing session, or the committed image.

use crate::config::AppConfig;
use crate::shortcuts::ShortcutRegistry;
use imgmark_core::{
    PixelPoint, PointerEvent, SessionController, SessionOutcome, Surface, ToolKind,
};
use image::RgbaImage;

/// Uploads presented buffers into an egui texture.
pub struct TextureSurface {
    ctx: egui::Context,
    texture: Option<egui::TextureHandle>,
    size: egui::Vec2,
}

impl TextureSurface {
    pub fn new(ctx: &egui::Context) -> Self {
        Self {
            ctx: ctx.clone(),
            texture: None,
            size: egui::Vec2::ZERO,
        }
    }

    /// Paint the last presented buffer at the top-left of `ui`, scaled
    /// down to fit. Returns the screen rect the image covers.
    fn paint(&self, ui: &mut egui::Ui) -> Option<egui::Rect> {
        let texture = self.texture.as_ref()?;
        let available = ui.available_size();
        let scale = (available.x / self.size.x)
            .min(available.y / self.size.y)
            .min(1.0);
        let rect = egui::Rect::from_min_size(ui.max_rect().min, self.size * scale);
        ui.painter().image(
            texture.id(),
            rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
        Some(rect)
    }
}

impl Surface for TextureSurface {
    fn present(&mut self, buffer: &RgbaImage) {
        let size = [buffer.width() as usize, buffer.height() as usize];
        let image = egui::ColorImage::from_rgba_unmultiplied(size, buffer.as_raw());
        self.size = egui::vec2(buffer.width() as f32, buffer.height() as f32);
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
            None => {
                self.texture =
                    Some(self.ctx.load_texture("canvas", image, egui::TextureOptions::NEAREST));
            }
        }
    }
}

/// Map a screen position inside `image_rect` to image pixels.
fn screen_to_image(image_rect: egui::Rect, image_size: egui::Vec2, pos: egui::Pos2) -> PixelPoint {
    let rel = pos - image_rect.min;
    let scale_x = image_size.x / image_rect.width().max(f32::EPSILON);
    let scale_y = image_size.y / image_rect.height().max(f32::EPSILON);
    PixelPoint::new(
        (rel.x * scale_x).floor() as i32,
        (rel.y * scale_y).floor() as i32,
    )
}

fn native_options(config: &AppConfig, title: &str, image: &RgbaImage) -> eframe::NativeOptions {
    let width = (image.width() as f32).min(config.width);
    let height = (image.height() as f32).min(config.height);
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width, height])
            .with_title(title),
        ..Default::default()
    }
}

/// Window driving one drawing session of the controller.
struct SessionView<'a> {
    controller: &'a mut SessionController,
    outcome: &'a mut Option<SessionOutcome>,
    surface: TextureSurface,
    image_rect: Option<egui::Rect>,
}

impl SessionView<'_> {
    fn pointer_events(&self, ctx: &egui::Context) -> Vec<PointerEvent> {
        let (Some(image_rect), size) = (self.image_rect, self.surface.size) else {
            return Vec::new();
        };
        ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::PointerButton {
                        pos,
                        button: egui::PointerButton::Primary,
                        pressed,
                        ..
                    } => {
                        let point = screen_to_image(image_rect, size, *pos);
                        Some(if *pressed {
                            PointerEvent::Down(point)
                        } else {
                            PointerEvent::Up(point)
                        })
                    }
                    egui::Event::PointerMoved(pos) => {
                        Some(PointerEvent::Move(screen_to_image(image_rect, size, *pos)))
                    }
                    _ => None,
                })
                .collect()
        })
    }
}

impl eframe::App for SessionView<'_> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut changed = false;
        for event in self.pointer_events(ctx) {
            changed |= self.controller.handle_pointer(event);
        }

        let keys: Vec<egui::Key> = ShortcutRegistry::session()
            .into_iter()
            .map(|shortcut| shortcut.key)
            .filter(|key| ctx.input(|i| i.key_pressed(*key)))
            .collect();
        for action in keys.into_iter().filter_map(ShortcutRegistry::action_for) {
            if let Some(outcome) = self.controller.handle_key(action) {
                *self.outcome = Some(outcome);
            }
        }

        if ctx.input(|i| i.viewport().close_requested()) {
            if let Some(outcome) = self.controller.cancel() {
                *self.outcome = Some(outcome);
            }
        }
        if self.controller.is_idle() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        if changed || self.surface.texture.is_none() {
            self.controller.present(&mut self.surface);
        }
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.image_rect = self.surface.paint(ui);
            });
    }
}

/// Window showing a fixed image until any key is pressed.
struct ImageView<'a> {
    image: &'a RgbaImage,
    surface: TextureSurface,
}

impl eframe::App for ImageView<'_> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let any_key = ctx.input(|i| {
            i.events
                .iter()
                .any(|event| matches!(event, egui::Event::Key { pressed: true, .. }))
        });
        if any_key {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        if self.surface.texture.is_none() {
            self.surface.present(self.image);
        }
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.surface.paint(ui);
            });
    }
}

/// Run `tool`'s session in a window until it is confirmed or cancelled.
///
/// The session must already have been started on `controller`.
pub fn run_session(
    config: &AppConfig,
    controller: &mut SessionController,
    tool: ToolKind,
) -> Result<SessionOutcome, eframe::Error> {
    let title = config.window_title(tool);
    let options = native_options(config, &title, controller.display_buffer());
    let mut outcome = None;
    let result = eframe::run_native(
        &title,
        options,
        Box::new(|cc| {
            Ok(Box::new(SessionView {
                surface: TextureSurface::new(&cc.egui_ctx),
                controller: &mut *controller,
                outcome: &mut outcome,
                image_rect: None,
            }))
        }),
    );
    // The window can close before the session retires.
    let cancelled = controller.cancel();
    result?;
    Ok(outcome.or(cancelled).unwrap_or(SessionOutcome::Cancelled))
}

/// Show `image` in a window until a key is pressed or the window closes.
pub fn show_image(config: &AppConfig, image: &RgbaImage) -> Result<(), eframe::Error> {
    let title = config.window_title("Image");
    let options = native_options(config, &title, image);
    eframe::run_native(
        &title,
        options,
        Box::new(|cc| {
            Ok(Box::new(ImageView {
                image,
                surface: TextureSurface::new(&cc.egui_ctx),
            }))
        }),
    )
}
