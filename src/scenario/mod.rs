//! Scenario definitions: TOML files and seeded random generation
//!
//! A scenario file carries an optional `[config]` table (missing fields fall
//! back to defaults) and one `[[vessels]]` table per vessel:
//!
//! ```toml
//! [config]
//! horizon_nm = 5.0
//!
//! [[vessels]]
//! source = { x = 0.0, y = 0.0 }
//! destination = { x = 10.0, y = 0.0 }
//! max_speed_kn = 20.0
//! ```

use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SearoomError};
use crate::core::types::{Vec2, VesselId};
use crate::world::state::WorldState;
use crate::world::vessel::Vessel;

/// One vessel's route as declared in a scenario file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VesselSpec {
    pub source: Vec2,
    pub destination: Vec2,
    pub max_speed_kn: f64,
}

/// A complete runnable scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: SimulationConfig,
    pub vessels: Vec<VesselSpec>,
}

impl Scenario {
    /// Load and validate a scenario from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let scenario: Scenario = toml::from_str(&text)?;
        scenario.validate()?;
        tracing::info!(
            path = %path.as_ref().display(),
            vessels = scenario.vessels.len(),
            "loaded scenario"
        );
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<()> {
        self.config.validate()?;
        if self.vessels.is_empty() {
            return Err(SearoomError::InvalidScenario(
                "scenario declares no vessels".into(),
            ));
        }
        for (i, spec) in self.vessels.iter().enumerate() {
            if spec.max_speed_kn <= 0.0 {
                return Err(SearoomError::InvalidScenario(format!(
                    "vessel {} has non-positive max speed {}",
                    i, spec.max_speed_kn
                )));
            }
            if !spec.source.x.is_finite()
                || !spec.source.y.is_finite()
                || !spec.destination.x.is_finite()
                || !spec.destination.y.is_finite()
            {
                return Err(SearoomError::InvalidScenario(format!(
                    "vessel {} has a non-finite coordinate",
                    i
                )));
            }
        }
        Ok(())
    }

    /// Instantiate the world; vessel ids follow declaration order
    pub fn build_world(&self) -> WorldState {
        let vessels = self
            .vessels
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                Vessel::new(
                    VesselId(i as u32),
                    spec.source,
                    spec.destination,
                    spec.max_speed_kn,
                )
            })
            .collect();
        WorldState::new(vessels)
    }
}

/// Bounds of the square area random routes are drawn from, in NM
const RANDOM_AREA_NM: f64 = 20.0;

/// Generate `count` vessels with random routes across a shared area
///
/// Seeded for reproducibility. Routes shorter than 2 NM are redrawn so
/// every vessel has meaningful transit time.
pub fn random_scenario(count: usize, seed: u64) -> Scenario {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut vessels = Vec::with_capacity(count);
    while vessels.len() < count {
        let source = Vec2::new(
            rng.gen_range(0.0..RANDOM_AREA_NM),
            rng.gen_range(0.0..RANDOM_AREA_NM),
        );
        let destination = Vec2::new(
            rng.gen_range(0.0..RANDOM_AREA_NM),
            rng.gen_range(0.0..RANDOM_AREA_NM),
        );
        if source.distance(&destination) < 2.0 {
            continue;
        }
        vessels.push(VesselSpec {
            source,
            destination,
            max_speed_kn: rng.gen_range(8.0..25.0),
        });
    }
    Scenario {
        config: SimulationConfig::default(),
        vessels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEAD_ON_TOML: &str = r#"
        [config]
        horizon_nm = 5.0
        step_duration_seconds = 30.0

        [[vessels]]
        source = { x = 0.0, y = 0.0 }
        destination = { x = 10.0, y = 0.0 }
        max_speed_kn = 20.0

        [[vessels]]
        source = { x = 10.0, y = 0.0 }
        destination = { x = 0.0, y = 0.0 }
        max_speed_kn = 20.0
    "#;

    #[test]
    fn test_parse_scenario_toml() {
        let scenario: Scenario = toml::from_str(HEAD_ON_TOML).unwrap();
        assert_eq!(scenario.vessels.len(), 2);
        assert_eq!(scenario.config.horizon_nm, 5.0);
        // Unlisted config fields fall back to defaults
        assert_eq!(scenario.config.red_turn_deg, 20.0);
        assert!(scenario.validate().is_ok());
    }

    #[test]
    fn test_missing_config_table_uses_defaults() {
        let scenario: Scenario = toml::from_str(
            r#"
            [[vessels]]
            source = { x = 0.0, y = 0.0 }
            destination = { x = 5.0, y = 0.0 }
            max_speed_kn = 10.0
        "#,
        )
        .unwrap();
        assert_eq!(scenario.config.safety_zone_radius_m, 200.0);
    }

    #[test]
    fn test_empty_scenario_rejected() {
        let scenario = Scenario {
            config: SimulationConfig::default(),
            vessels: vec![],
        };
        assert!(scenario.validate().is_err());
    }

    #[test]
    fn test_non_positive_speed_rejected() {
        let scenario = Scenario {
            config: SimulationConfig::default(),
            vessels: vec![VesselSpec {
                source: Vec2::new(0.0, 0.0),
                destination: Vec2::new(5.0, 0.0),
                max_speed_kn: 0.0,
            }],
        };
        assert!(scenario.validate().is_err());
    }

    #[test]
    fn test_build_world_assigns_sequential_ids() {
        let scenario: Scenario = toml::from_str(HEAD_ON_TOML).unwrap();
        let world = scenario.build_world();
        assert_eq!(world.len(), 2);
        assert_eq!(world.vessels[0].id, VesselId(0));
        assert_eq!(world.vessels[1].id, VesselId(1));
        assert_eq!(world.vessels[1].position, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_random_scenario_is_reproducible() {
        let a = random_scenario(6, 42);
        let b = random_scenario(6, 42);
        assert_eq!(a.vessels.len(), 6);
        for (va, vb) in a.vessels.iter().zip(b.vessels.iter()) {
            assert_eq!(va.source, vb.source);
            assert_eq!(va.destination, vb.destination);
            assert_eq!(va.max_speed_kn, vb.max_speed_kn);
        }
    }

    #[test]
    fn test_random_scenario_routes_are_meaningful() {
        let scenario = random_scenario(10, 7);
        assert!(scenario.validate().is_ok());
        for spec in &scenario.vessels {
            assert!(spec.source.distance(&spec.destination) >= 2.0);
        }
    }
}
