//! Built-in systems.
//!
//! Sizes and distances use two separate pixel scales because a true-scale
//! solar system would show nothing but the Sun.

use crate::config::{BodyConfig, PanConfig, SystemConfig};
use crate::time::TickPolicy;

/// Kilometres per pixel for body diameters.
pub const SIZE_SCALE_KM: f64 = 1_000.0;
/// Kilometres per pixel for orbit distances.
pub const DISTANCE_SCALE_KM: f64 = 5_000_000.0;
/// Earth's diameter in kilometres.
pub const EARTH_DIAMETER_KM: f64 = 12_756.0;
/// One astronomical unit in kilometres.
pub const AU_KM: f64 = 149_597_871.0;
/// Revolutions per reference period of a body with a one-year orbit.
pub const EARTH_ANGULAR_SPEED: f64 = 1.01;

pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub config: fn() -> SystemConfig,
}

pub static PRESETS: &[Preset] = &[
    Preset {
        name: "Solar System",
        description: "The Sun and the eight planets, sizes relative to Earth",
        config: solar_system,
    },
    Preset {
        name: "Inner Planets",
        description: "Mercury to Mars only, drawn at three times the distance scale",
        config: inner_planets,
    },
    Preset {
        name: "Binary Star",
        description: "Two stars offset from the reference point, each with its own planet",
        config: binary_star,
    },
];

/// A planet orbiting the reference point.
///
/// `distance_au` in astronomical units, `diameter_earths` relative to
/// Earth, `period_years` in Earth years.
fn planet(name: &str, color: [u8; 3], distance_au: f64, diameter_earths: f64, period_years: f64) -> BodyConfig {
    BodyConfig {
        name: name.into(),
        color,
        orbit_offset: [distance_au * AU_KM / DISTANCE_SCALE_KM, 0.0],
        diameter: diameter_earths * EARTH_DIAMETER_KM / SIZE_SCALE_KM,
        angular_speed: EARTH_ANGULAR_SPEED / period_years,
        reference_offset: [0.0, 0.0],
    }
}

fn sun() -> BodyConfig {
    BodyConfig {
        name: "Sun".into(),
        color: [255, 69, 0],
        orbit_offset: [0.0, 0.0],
        diameter: EARTH_DIAMETER_KM / SIZE_SCALE_KM,
        angular_speed: 0.0,
        reference_offset: [0.0, 0.0],
    }
}

fn base(name: &str, bodies: Vec<BodyConfig>) -> SystemConfig {
    SystemConfig {
        name: name.into(),
        tick_interval_ms: 5,
        tick_policy: TickPolicy::Fixed,
        speed_scale: 1.0,
        pan: PanConfig::default(),
        star_count: 200,
        window_size: [1200.0, 800.0],
        bodies,
    }
}

/// The nine-body solar system used when no configuration is given.
pub fn solar_system() -> SystemConfig {
    base(
        "Solar System",
        vec![
            sun(),
            planet("Mercury", [238, 232, 170], 0.3871, 0.3825, 0.2408),
            planet("Venus", [255, 140, 0], 0.7233, 0.9489, 0.6152),
            planet("Earth", [0, 191, 255], 1.0, 1.0, 1.0),
            planet("Mars", [220, 20, 60], 1.5237, 0.5335, 1.8808),
            planet("Jupiter", [255, 239, 213], 5.2034, 11.2092, 11.8637),
            planet("Saturn", [240, 230, 140], 9.5371, 9.4494, 29.4484),
            planet("Uranus", [65, 105, 225], 19.1913, 4.0074, 84.0711),
            planet("Neptune", [0, 0, 205], 30.0690, 3.8827, 164.8799),
        ],
    )
}

pub fn inner_planets() -> SystemConfig {
    let mut config = solar_system();
    config.name = "Inner Planets".into();
    config.bodies.truncate(5);
    for body in &mut config.bodies {
        body.orbit_offset[0] *= 3.0;
    }
    config
}

/// Two static stars, each with a planet orbiting it; one orbits backwards.
pub fn binary_star() -> SystemConfig {
    let star = |name: &str, color, x: f64| BodyConfig {
        name: name.into(),
        color,
        orbit_offset: [0.0, 0.0],
        diameter: 24.0,
        angular_speed: 0.0,
        reference_offset: [x, 0.0],
    };
    let world = |name: &str, color, radius: f64, speed: f64, x: f64| BodyConfig {
        name: name.into(),
        color,
        orbit_offset: [radius, 0.0],
        diameter: 8.0,
        angular_speed: speed,
        reference_offset: [x, 0.0],
    };

    let mut config = base(
        "Binary Star",
        vec![
            star("Alpha", [255, 214, 170], -220.0),
            star("Beta", [170, 190, 255], 220.0),
            world("Alpha I", [120, 200, 120], 90.0, 1.5, -220.0),
            world("Beta I", [200, 120, 200], 120.0, -0.8, 220.0),
        ],
    );
    config.star_count = 120;
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for preset in PRESETS {
            let config = (preset.config)();
            assert!(config.validate().is_ok(), "preset '{}' is invalid", preset.name);
            assert_eq!(config.name, preset.name);
        }
    }

    #[test]
    fn test_solar_system_layout() {
        let config = solar_system();
        let names: Vec<_> = config.bodies.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(
            names,
            ["Sun", "Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune"]
        );

        let sun = &config.bodies[0];
        assert_eq!(sun.angular_speed, 0.0);
        assert_eq!(sun.orbit_offset, [0.0, 0.0]);

        let earth = &config.bodies[3];
        assert!((earth.angular_speed - EARTH_ANGULAR_SPEED).abs() < 1e-12);
        assert!((earth.orbit_offset[0] - AU_KM / DISTANCE_SCALE_KM).abs() < 1e-9);
        assert!((earth.diameter - 12.756).abs() < 1e-9);
    }

    #[test]
    fn test_binary_star_orbit_centres() {
        let config = binary_star();
        let alpha_world = config.bodies[2].to_body();
        let beta_world = config.bodies[3].to_body();

        assert_eq!(alpha_world.reference_offset().x, -220.0);
        assert_eq!(beta_world.reference_offset().x, 220.0);
        assert!(beta_world.angular_speed() < 0.0);
    }

    #[test]
    fn test_outer_planets_are_slower() {
        let config = solar_system();
        let speeds: Vec<f64> = config.bodies[1..].iter().map(|b| b.angular_speed).collect();
        assert!(speeds.windows(2).all(|w| w[0] > w[1]));
    }
}
