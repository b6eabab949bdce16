//! Frame composition.
//!
//! Turns a scene snapshot into an ordered list of [`Shape`]s in screen
//! coordinates. The viewer only has to paint them in order; nothing here
//! touches body state.
//!
//! Draw order: background stars, orbit rings, then for every body in
//! insertion order its disk followed by two labels (name, then integer
//! coordinates) offset up and to the right of the disk.

use crate::body::Rgb;
use crate::scene::BodySnapshot;
use crate::stars::StarField;
use glam::DVec2;

pub const STAR_COLOR: Rgb = [255, 255, 255];

/// Horizontal gap between a disk's edge and its labels.
pub const LABEL_GAP: f64 = 8.0;
/// Vertical offset of the name label above the disk's top edge.
pub const NAME_RISE: f64 = 20.0;
/// Vertical offset of the coordinate label above the disk's top edge.
pub const COORDS_RISE: f64 = 5.0;

pub const ZOOM_STEP: f64 = 1.25;
pub const MIN_ZOOM: f64 = 0.05;
pub const MAX_ZOOM: f64 = 20.0;

/// A primitive to paint.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Filled circle.
    Disk { center: DVec2, radius: f64, color: Rgb },
    /// Circle outline.
    Ring { center: DVec2, radius: f64, color: Rgb },
    /// Text whose bottom-left corner sits at `anchor`.
    Label { anchor: DVec2, text: String, color: Rgb },
}

/// Rendering toggles owned by the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOptions {
    pub show_stars: bool,
    pub show_orbits: bool,
    pub show_labels: bool,
    /// Scale applied about the reference point.
    pub zoom: f64,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            show_stars: true,
            show_orbits: false,
            show_labels: true,
            zoom: 1.0,
        }
    }
}

impl ViewOptions {
    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * ZOOM_STEP).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / ZOOM_STEP).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
    }
}

/// Maps scene coordinates to screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub reference_point: DVec2,
    pub zoom: f64,
}

impl View {
    #[inline]
    pub fn to_screen(&self, point: DVec2) -> DVec2 {
        self.reference_point + (point - self.reference_point) * self.zoom
    }

    #[inline]
    pub fn scale(&self, length: f64) -> f64 {
        length * self.zoom
    }
}

/// Text of a body's coordinate label.
pub fn coordinate_label(position: DVec2) -> String {
    format!("x: {} y: {}", position.x as i64, position.y as i64)
}

/// Compose one frame from a snapshot taken around `reference_point`.
pub fn compose_frame(
    bodies: &[BodySnapshot],
    reference_point: DVec2,
    stars: &StarField,
    options: &ViewOptions,
) -> Vec<Shape> {
    let view = View {
        reference_point,
        zoom: options.zoom,
    };
    let mut shapes = Vec::with_capacity(stars.len() + bodies.len() * 4);

    if options.show_stars {
        shapes.extend(stars.stars().iter().map(|star| Shape::Disk {
            center: star.position,
            radius: star.diameter / 2.0,
            color: STAR_COLOR,
        }));
    }

    if options.show_orbits {
        shapes.extend(
            bodies
                .iter()
                .filter(|body| body.info.orbit_radius > 0.0)
                .map(|body| Shape::Ring {
                    center: view.to_screen(body.orbit_center(reference_point)),
                    radius: view.scale(body.info.orbit_radius),
                    color: body.color(),
                }),
        );
    }

    for body in bodies {
        let center = view.to_screen(body.position);
        let radius = view.scale(body.draw_radius());
        shapes.push(Shape::Disk {
            center,
            radius,
            color: body.color(),
        });

        if options.show_labels {
            let x = center.x + radius + LABEL_GAP;
            shapes.push(Shape::Label {
                anchor: DVec2::new(x, center.y - radius - NAME_RISE),
                text: body.name().to_owned(),
                color: body.color(),
            });
            shapes.push(Shape::Label {
                anchor: DVec2::new(x, center.y - radius - COORDS_RISE),
                text: coordinate_label(body.position),
                color: body.color(),
            });
        }
    }

    shapes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Body;
    use crate::scene::{Scene, SceneSettings};

    fn snapshot() -> (Vec<BodySnapshot>, DVec2) {
        let reference = DVec2::new(200.0, 100.0);
        let mut scene = Scene::new(reference, SceneSettings::default());
        scene.add_body(Body::new("Sun", [255, 69, 0], DVec2::ZERO, 20.0)).unwrap();
        scene
            .add_body(Body::new("Earth", [0, 191, 255], DVec2::new(50.0, 0.0), 6.0).with_angular_speed(1.0))
            .unwrap();
        (scene.snapshot(), reference)
    }

    fn disks(shapes: &[Shape]) -> Vec<(DVec2, f64)> {
        shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Disk { center, radius, .. } => Some((*center, *radius)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_bodies_drawn_in_order_with_labels() {
        let (bodies, reference) = snapshot();
        let shapes = compose_frame(&bodies, reference, &StarField::default(), &ViewOptions::default());

        assert_eq!(shapes.len(), 6);
        assert_eq!(
            shapes[0],
            Shape::Disk {
                center: DVec2::new(200.0, 100.0),
                radius: 10.0,
                color: [255, 69, 0]
            }
        );
        assert_eq!(
            shapes[1],
            Shape::Label {
                anchor: DVec2::new(218.0, 70.0),
                text: "Sun".into(),
                color: [255, 69, 0]
            }
        );
        assert_eq!(
            shapes[5],
            Shape::Label {
                anchor: DVec2::new(261.0, 92.0),
                text: "x: 250 y: 100".into(),
                color: [0, 191, 255]
            }
        );
    }

    #[test]
    fn test_stars_come_first() {
        let (bodies, reference) = snapshot();
        let stars = StarField::generate(10, DVec2::new(400.0, 200.0), 1);
        let shapes = compose_frame(&bodies, reference, &stars, &ViewOptions::default());

        assert_eq!(shapes.len(), 16);
        assert!(shapes[..10]
            .iter()
            .all(|s| matches!(s, Shape::Disk { color, .. } if *color == STAR_COLOR)));
    }

    #[test]
    fn test_orbit_rings_skip_static_bodies() {
        let (bodies, reference) = snapshot();
        let options = ViewOptions {
            show_orbits: true,
            show_labels: false,
            ..ViewOptions::default()
        };
        let shapes = compose_frame(&bodies, reference, &StarField::default(), &options);

        let rings: Vec<_> = shapes.iter().filter(|s| matches!(s, Shape::Ring { .. })).collect();
        assert_eq!(rings.len(), 1);
        assert_eq!(
            *rings[0],
            Shape::Ring {
                center: reference,
                radius: 50.0,
                color: [0, 191, 255]
            }
        );
    }

    #[test]
    fn test_zoom_scales_about_reference() {
        let (bodies, reference) = snapshot();
        let options = ViewOptions {
            zoom: 2.0,
            show_labels: false,
            ..ViewOptions::default()
        };
        let shapes = compose_frame(&bodies, reference, &StarField::default(), &options);

        let disks = disks(&shapes);
        assert_eq!(disks[0], (reference, 20.0));
        assert!((disks[1].0 - DVec2::new(300.0, 100.0)).length() < 1e-9);
        assert_eq!(disks[1].1, 6.0);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut options = ViewOptions::default();
        for _ in 0..100 {
            options.zoom_in();
        }
        assert_eq!(options.zoom, MAX_ZOOM);
        for _ in 0..100 {
            options.zoom_out();
        }
        assert_eq!(options.zoom, MIN_ZOOM);
        options.reset_zoom();
        assert_eq!(options.zoom, 1.0);
    }

    #[test]
    fn test_coordinate_label_truncates() {
        assert_eq!(coordinate_label(DVec2::new(12.9, -3.7)), "x: 12 y: -3");
    }
}
