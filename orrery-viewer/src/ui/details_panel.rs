//! Floating window listing every body's live state

use eframe::egui;
use orrery::BodySnapshot;

pub fn render_details_window(ctx: &egui::Context, open: &mut bool, bodies: &[BodySnapshot]) {
    egui::Window::new("Planet details")
        .open(open)
        .resizable(false)
        .default_pos([20.0, 60.0])
        .show(ctx, |ui| {
            egui::Grid::new("planet_details")
                .striped(true)
                .num_columns(5)
                .show(ui, |ui| {
                    for heading in ["Name", "x", "y", "Orbit radius", "Phase"] {
                        ui.strong(heading);
                    }
                    ui.end_row();

                    for body in bodies {
                        let [r, g, b] = body.color();
                        ui.label(egui::RichText::new(body.name()).color(egui::Color32::from_rgb(r, g, b)));
                        ui.label(format!("{}", body.position.x as i64));
                        ui.label(format!("{}", body.position.y as i64));
                        ui.label(format!("{:.1}", body.info.orbit_radius));
                        ui.label(format!("{:.1}°", body.phase.to_degrees()));
                        ui.end_row();
                    }
                });
        });
}
