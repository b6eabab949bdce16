//! Orbiting bodies.
//!
//! A [`Body`] keeps its orbital geometry fixed from construction and only
//! ever mutates two things: its phase angle and the position projected
//! from it. The orbit radius is derived once from the offset between the
//! body and its orbit centre; the phase is wrapped every revolution.
//!
//! ```ignore
//! use orrery::{Body, DVec2};
//!
//! let mut earth = Body::new("Earth", [0, 191, 255], DVec2::new(30.0, 0.0), 12.7)
//!     .with_angular_speed(1.01);
//!
//! earth.advance(1.0);
//! earth.project(DVec2::new(600.0, 400.0));
//! println!("{} at {:?}", earth.name(), earth.position());
//! ```

use glam::DVec2;
use std::f64::consts::TAU;

/// An RGB colour triple.
pub type Rgb = [u8; 3];

/// Phase increment of one tick at angular speed 1.0, in radians.
///
/// One degree per tick, so a body with speed 1.0 completes a revolution in
/// 360 ticks.
pub const PHASE_STEP: f64 = TAU / 360.0;

/// A rendered orbiting entity: a planet, a moon or a static star.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    name: String,
    color: Rgb,
    diameter: f64,
    orbit_radius: f64,
    angular_speed: f64,
    reference_offset: DVec2,
    phase: f64,
    position: DVec2,
}

impl Body {
    /// Create a body orbiting `orbit_offset` away from its orbit centre.
    ///
    /// The orbit radius is the length of `orbit_offset` and the starting
    /// phase is its angle, so the body starts exactly where the offset puts
    /// it. Angular speed defaults to zero (a static body) and the orbit
    /// centre defaults to the shared reference point.
    pub fn new(name: impl Into<String>, color: Rgb, orbit_offset: DVec2, diameter: f64) -> Self {
        let phase = if orbit_offset == DVec2::ZERO {
            0.0
        } else {
            wrap_phase(orbit_offset.y.atan2(orbit_offset.x))
        };

        let mut body = Self {
            name: name.into(),
            color,
            diameter,
            orbit_radius: orbit_offset.length(),
            angular_speed: 0.0,
            reference_offset: DVec2::ZERO,
            phase,
            position: DVec2::ZERO,
        };
        body.project(DVec2::ZERO);
        body
    }

    /// Set the angular speed in revolutions per reference period.
    ///
    /// Negative speeds orbit in the opposite direction.
    pub fn with_angular_speed(mut self, angular_speed: f64) -> Self {
        self.angular_speed = angular_speed;
        self
    }

    /// Offset the orbit centre from the shared reference point.
    pub fn with_reference_offset(mut self, reference_offset: DVec2) -> Self {
        self.reference_offset = reference_offset;
        self.project(DVec2::ZERO);
        self
    }

    /// Advance the phase by one tick scaled by `tick_delta`.
    ///
    /// The phase snaps back to zero once it reaches a full turn.
    pub fn advance(&mut self, tick_delta: f64) {
        self.phase = wrap_phase(self.phase + self.angular_speed * PHASE_STEP * tick_delta);
    }

    /// Recompute the position from the current phase around `reference_point`.
    pub fn project(&mut self, reference_point: DVec2) {
        let (sin, cos) = self.phase.sin_cos();
        self.position = self.orbit_center(reference_point) + self.orbit_radius * DVec2::new(cos, sin);
    }

    /// One tick of the update loop: advance unless frozen, then project.
    ///
    /// A frozen body still re-projects so that panning moves it.
    pub fn tick(&mut self, frozen: bool, tick_delta: f64, reference_point: DVec2) {
        if !frozen {
            self.advance(tick_delta);
        }
        self.project(reference_point);
    }

    /// Centre of this body's orbit for the given reference point.
    #[inline]
    pub fn orbit_center(&self, reference_point: DVec2) -> DVec2 {
        reference_point + self.reference_offset
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn color(&self) -> Rgb {
        self.color
    }

    #[inline]
    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    /// Radius of the rendered disk.
    #[inline]
    pub fn draw_radius(&self) -> f64 {
        self.diameter / 2.0
    }

    #[inline]
    pub fn orbit_radius(&self) -> f64 {
        self.orbit_radius
    }

    #[inline]
    pub fn angular_speed(&self) -> f64 {
        self.angular_speed
    }

    #[inline]
    pub fn reference_offset(&self) -> DVec2 {
        self.reference_offset
    }

    /// Current phase in radians, always in `[0, 2π)`.
    #[inline]
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Position computed by the most recent [`project`](Self::project).
    #[inline]
    pub fn position(&self) -> DVec2 {
        self.position
    }
}

/// Fold an angle into `[0, 2π)`.
///
/// Angles at or past a full turn snap to zero rather than keeping the
/// overshoot; negative angles wrap around from the top.
fn wrap_phase(phase: f64) -> f64 {
    if phase >= TAU {
        return 0.0;
    }
    if phase < 0.0 {
        let wrapped = phase.rem_euclid(TAU);
        // rem_euclid can round a tiny negative up to exactly TAU
        return if wrapped >= TAU { 0.0 } else { wrapped };
    }
    phase
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn speed_for_step(radians_per_tick: f64) -> f64 {
        radians_per_tick / PHASE_STEP
    }

    #[test]
    fn test_orbit_radius_from_offset() {
        let body = Body::new("Probe", [255, 255, 255], DVec2::new(3.0, 4.0), 1.0);
        assert!((body.orbit_radius() - 5.0).abs() < EPS);
    }

    #[test]
    fn test_initial_position_matches_offset() {
        let body = Body::new("Moon", [200, 200, 200], DVec2::new(0.0, 10.0), 2.0)
            .with_reference_offset(DVec2::new(50.0, -20.0));

        assert!((body.phase() - std::f64::consts::FRAC_PI_2).abs() < EPS);
        assert!((body.position() - DVec2::new(50.0, -10.0)).length() < EPS);
    }

    #[test]
    fn test_phase_wraps_into_range() {
        let mut body = Body::new("Fast", [0, 0, 0], DVec2::new(10.0, 0.0), 1.0)
            .with_angular_speed(speed_for_step(0.7));

        for _ in 0..10_000 {
            body.advance(1.0);
            assert!(body.phase() >= 0.0 && body.phase() < TAU);
        }
    }

    #[test]
    fn test_phase_snaps_to_zero_at_full_turn() {
        let mut body = Body::new("Quarter", [0, 0, 0], DVec2::new(10.0, 0.0), 1.0)
            .with_angular_speed(speed_for_step(TAU / 4.0 + 1e-6));

        for _ in 0..3 {
            body.advance(1.0);
        }
        assert!((body.phase() - 3.0 * TAU / 4.0).abs() < 1e-5);

        body.advance(1.0);
        assert_eq!(body.phase(), 0.0);
    }

    #[test]
    fn test_negative_speed_wraps_from_top() {
        let mut body = Body::new("Retro", [0, 0, 0], DVec2::new(10.0, 0.0), 1.0)
            .with_angular_speed(speed_for_step(-0.5));

        body.advance(1.0);
        assert!((body.phase() - (TAU - 0.5)).abs() < EPS);

        for _ in 0..1_000 {
            body.advance(1.0);
            assert!(body.phase() >= 0.0 && body.phase() < TAU);
        }
    }

    #[test]
    fn test_static_body_never_moves() {
        let mut sun = Body::new("Sun", [255, 69, 0], DVec2::ZERO, 12.7);
        let reference = DVec2::new(600.0, 400.0);
        sun.project(reference);
        let start = (sun.phase(), sun.position());

        for _ in 0..500 {
            sun.tick(false, 1.0, reference);
        }

        assert_eq!((sun.phase(), sun.position()), start);
        assert_eq!(sun.position(), reference);
    }

    #[test]
    fn test_project_is_deterministic() {
        let mut a = Body::new("A", [1, 2, 3], DVec2::new(7.0, 1.0), 1.0).with_angular_speed(3.0);
        let mut b = a.clone();
        let reference = DVec2::new(-12.5, 88.0);

        a.advance(1.0);
        b.advance(1.0);
        a.project(reference);
        b.project(reference);
        a.project(reference);

        assert!((a.position() - b.position()).length() < EPS);
    }

    #[test]
    fn test_frozen_tick_holds_phase_but_follows_reference() {
        let mut body = Body::new("Held", [0, 0, 0], DVec2::new(10.0, 0.0), 1.0).with_angular_speed(5.0);
        body.project(DVec2::ZERO);
        let phase = body.phase();
        let before = body.position();

        body.tick(true, 1.0, DVec2::new(4.0, -3.0));

        assert_eq!(body.phase(), phase);
        assert!((body.position() - (before + DVec2::new(4.0, -3.0))).length() < EPS);
    }

    #[test]
    fn test_ten_ticks_of_a_tenth_radian() {
        let reference = DVec2::new(300.0, 200.0);
        let mut body = Body::new("Earth", [0, 191, 255], DVec2::new(100.0, 0.0), 10.0)
            .with_angular_speed(speed_for_step(0.1));

        for _ in 0..10 {
            body.tick(false, 1.0, reference);
        }

        let expected = reference + 100.0 * DVec2::new(1.0_f64.cos(), 1.0_f64.sin());
        assert!((body.phase() - 1.0).abs() < 1e-9);
        assert!((body.position() - expected).length() < 1e-6);
    }

    #[test]
    fn test_draw_radius_is_half_diameter() {
        let body = Body::new("Jupiter", [255, 239, 213], DVec2::new(155.0, 0.0), 143.0);
        assert_eq!(body.draw_radius(), 71.5);
    }
}
