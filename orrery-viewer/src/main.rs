//! Orrery Viewer - desktop window for orrery scenes
//!
//! Every body runs on its own worker thread inside [`orrery::Scene`]; this
//! app only samples the published state, paints it and forwards input.

mod ui;

use eframe::egui;
use glam::DVec2;
use log::{error, info, warn};
use orrery::prelude::*;
use orrery::{presets::PRESETS, RateMeter, MAX_SPEED_SCALE};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use ui::{canvas_events, paint_frame, render_details_window};

/// How long a status message stays in the status bar.
const STATUS_TIMEOUT_SECS: u64 = 5;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (config, current_file) = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => match SystemConfig::load(&path) {
            Ok(config) => {
                info!("loaded {}", path.display());
                (config, Some(path.display().to_string()))
            }
            Err(e) => {
                error!("could not load {}: {}; using the solar system", path.display(), e);
                (SystemConfig::default(), None)
            }
        },
        None => (SystemConfig::default(), None),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_title("Solar System Model"),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    eframe::run_native(
        "Solar System Model",
        options,
        Box::new(move |cc| Ok(Box::new(ViewerApp::new(cc, config, current_file)))),
    )
}

struct ViewerApp {
    config: SystemConfig,
    scene: Scene,
    input: Input,
    view: ViewOptions,
    /// Generated on first paint, and again whenever the canvas is resized
    stars: StarField,
    /// Size of the canvas on the last frame
    canvas_size: Option<DVec2>,
    /// Asks the window to repaint from worker threads
    repaint: Arc<dyn Redraw>,
    tick_rate: RateMeter,
    current_file: Option<String>,
    status_message: Option<(String, Instant)>,
    show_details: bool,
    show_about: bool,
}

impl ViewerApp {
    fn new(cc: &eframe::CreationContext<'_>, config: SystemConfig, current_file: Option<String>) -> Self {
        let ctx = cc.egui_ctx.clone();
        let repaint: Arc<dyn Redraw> = Arc::new(move || ctx.request_repaint());

        let mut app = Self {
            input: Input::new(config.pan),
            scene: Scene::new(config.initial_reference_point(), config.scene_settings()),
            config: SystemConfig::default(),
            view: ViewOptions::default(),
            stars: StarField::default(),
            canvas_size: None,
            repaint,
            tick_rate: RateMeter::default(),
            current_file,
            status_message: None,
            show_details: false,
            show_about: false,
        };
        app.apply_config(config);
        app
    }

    fn show_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Replace the running scene with one built from `config`.
    fn apply_config(&mut self, config: SystemConfig) {
        let reference = match self.canvas_size {
            Some(size) => size / 2.0,
            None => config.initial_reference_point(),
        };

        let mut scene = match Scene::from_config(&config, reference) {
            Ok(scene) => scene,
            Err(e) => {
                error!("rejected configuration '{}': {}", config.name, e);
                self.show_status(format!("Load failed: {}", e));
                return;
            }
        };

        self.scene.shutdown();
        if let Err(e) = scene.start(Arc::clone(&self.repaint)) {
            error!("could not start '{}': {}", config.name, e);
            self.show_status(format!("Start failed: {}", e));
        }

        self.input = Input::new(config.pan);
        self.scene = scene;
        // Force a fresh star field at the next paint.
        self.stars = StarField::default();
        self.view.reset_zoom();
        self.config = config;
    }

    // ========================================================================
    // File operations (using rfd)
    // ========================================================================

    fn open_config(&mut self) {
        if let Some(path) = rfd::FileDialog::new().add_filter("JSON", &["json"]).pick_file() {
            let path_str = path.display().to_string();
            match SystemConfig::load(&path) {
                Ok(config) => {
                    self.apply_config(config);
                    self.current_file = Some(path_str.clone());
                    self.show_status(format!("Loaded {}", path_str));
                }
                Err(e) => {
                    warn!("load of {} failed: {}", path_str, e);
                    self.show_status(format!("Load failed: {}", e));
                }
            }
        }
    }

    fn save_config_as(&mut self) {
        self.config.speed_scale = self.scene.speed_scale();

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(format!("{}.json", self.config.name))
            .save_file()
        {
            let path_str = path.display().to_string();
            match self.config.save(&path) {
                Ok(()) => {
                    self.show_status(format!("Saved to {}", path_str));
                    self.current_file = Some(path_str);
                }
                Err(e) => self.show_status(format!("Save failed: {}", e)),
            }
        }
    }

    fn apply_action(&mut self, action: Action) {
        match action {
            Action::Pan(delta) => self.scene.pan(delta),
            Action::ToggleFreeze => {
                let frozen = self.scene.toggle_freeze();
                self.show_status(if frozen { "Universe frozen" } else { "Universe unfrozen" });
            }
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open...").clicked() {
                        self.open_config();
                        ui.close_menu();
                    }
                    if ui.button("Save As...").clicked() {
                        self.save_config_as();
                        ui.close_menu();
                    }
                    ui.menu_button("Presets", |ui| {
                        for preset in PRESETS {
                            if ui.button(preset.name).on_hover_text(preset.description).clicked() {
                                self.apply_config((preset.config)());
                                self.current_file = None;
                                self.show_status(format!("Loaded preset: {}", preset.name));
                                ui.close_menu();
                            }
                        }
                    });
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Tools", |ui| {
                    if ui.button("Freeze universe").clicked() {
                        self.scene.freeze();
                        ui.close_menu();
                    }
                    if ui.button("Unfreeze universe").clicked() {
                        self.scene.unfreeze();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Zoom in").clicked() {
                        self.view.zoom_in();
                        ui.close_menu();
                    }
                    if ui.button("Zoom out").clicked() {
                        self.view.zoom_out();
                        ui.close_menu();
                    }
                    if ui.button("Reset zoom").clicked() {
                        self.view.reset_zoom();
                        ui.close_menu();
                    }
                });

                ui.menu_button("Options", |ui| {
                    ui.menu_button("Modify speed", |ui| {
                        let mut speed = self.scene.speed_scale();
                        if ui
                            .add(egui::Slider::new(&mut speed, 0.0..=MAX_SPEED_SCALE).text("Speed scale"))
                            .changed()
                        {
                            self.scene.set_speed_scale(speed);
                        }
                        if ui.button("Reset").clicked() {
                            self.scene.set_speed_scale(1.0);
                        }
                    });
                    ui.checkbox(&mut self.show_details, "Show planet details");
                    ui.checkbox(&mut self.view.show_orbits, "Show orbits");
                    ui.checkbox(&mut self.view.show_stars, "Show night sky");
                    ui.checkbox(&mut self.view.show_labels, "Show labels");
                });

                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.show_about = true;
                        ui.close_menu();
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let frozen = self.scene.is_frozen();
                    let btn_text = if frozen { "▶ Unfreeze" } else { "⏸ Freeze" };
                    if ui.button(btn_text).clicked() {
                        self.scene.set_frozen(!frozen);
                    }
                });
            });
        });
    }

    fn status_bar(&mut self, ctx: &egui::Context) {
        let ticks_per_sec = self.tick_rate.update(self.scene.tick_count());

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some((msg, time)) = &self.status_message {
                    if time.elapsed().as_secs() < STATUS_TIMEOUT_SECS {
                        ui.label(msg);
                    } else {
                        self.status_message = None;
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("{:.0} FPS", 1.0 / ctx.input(|i| i.stable_dt)));
                    ui.separator();
                    ui.label(format!("{:.0} ticks/s", ticks_per_sec));
                    ui.separator();
                    ui.label(format!("zoom {:.2}×", self.view.zoom));
                    ui.separator();
                    if self.scene.is_frozen() {
                        ui.label(egui::RichText::new("FROZEN").color(egui::Color32::LIGHT_BLUE));
                        ui.separator();
                    }
                    match &self.current_file {
                        Some(file) => ui.label(egui::RichText::new(file).small().weak()),
                        None => ui.label(egui::RichText::new(&self.config.name).small().weak()),
                    };
                });
            });
        });
    }

    fn canvas(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
                let rect = response.rect;
                let size = DVec2::new(rect.width() as f64, rect.height() as f64);

                if self.stars.size() != size {
                    self.stars = StarField::random(self.config.star_count, size);
                }
                self.canvas_size = Some(size);

                for event in canvas_events(ctx, &response, rect.min) {
                    if let Some(action) = self.input.handle_event(event) {
                        self.apply_action(action);
                    }
                }

                response.context_menu(|ui| {
                    if ui.button("Freeze").clicked() {
                        self.scene.freeze();
                        ui.close_menu();
                    }
                    if ui.button("Unfreeze").clicked() {
                        self.scene.unfreeze();
                        ui.close_menu();
                    }
                });

                let frame = compose_frame(
                    &self.scene.snapshot(),
                    self.scene.reference_point(),
                    &self.stars,
                    &self.view,
                );
                paint_frame(&painter, rect.min, &frame);
            });
    }

    fn about_window(&mut self, ctx: &egui::Context) {
        egui::Window::new("About")
            .open(&mut self.show_about)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading("Solar System Model");
                ui.label(format!("orrery-viewer {}", env!("CARGO_PKG_VERSION")));
                ui.add_space(4.0);
                ui.label("Arrow keys or left-drag pan the view. Space freezes the universe.");
                ui.label("Right-click the sky to freeze or unfreeze.");
            });
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.viewport().close_requested()) {
            info!("close requested, stopping workers");
            self.scene.shutdown();
            return;
        }

        self.menu_bar(ctx);
        self.status_bar(ctx);

        let mut show_details = self.show_details;
        render_details_window(ctx, &mut show_details, &self.scene.snapshot());
        self.show_details = show_details;

        self.about_window(ctx);
        self.canvas(ctx);
    }
}
