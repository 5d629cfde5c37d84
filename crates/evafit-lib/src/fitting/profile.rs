//! Damage and target profiles.
//!
//! A [`DamageProfile`] is a quadruple over the four damage types; depending
//! on context it carries a damage amount, a damage rate, or a resistance
//! fraction. A [`TargetProfile`] describes the opposing entity a report is
//! evaluated against; it has no relationship to the fitting itself.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Per-damage-type quadruple.
///
/// When representing a resistance, each field lies in [0, 1); when
/// representing damage or a damage rate, all fields are non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageProfile {
    pub em: f64,
    pub thermal: f64,
    pub kinetic: f64,
    pub explosive: f64,
}

impl DamageProfile {
    pub const ZERO: DamageProfile = DamageProfile {
        em: 0.0,
        thermal: 0.0,
        kinetic: 0.0,
        explosive: 0.0,
    };

    pub fn new(em: f64, thermal: f64, kinetic: f64, explosive: f64) -> Self {
        Self {
            em,
            thermal,
            kinetic,
            explosive,
        }
    }

    /// Uniform profile with the same value in every damage type.
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn total(&self) -> f64 {
        self.em + self.thermal + self.kinetic + self.explosive
    }

    pub fn is_zero(&self) -> bool {
        self.total() == 0.0
    }

    /// Scale every damage type by the same factor.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.em * factor,
            self.thermal * factor,
            self.kinetic * factor,
            self.explosive * factor,
        )
    }

    pub fn add(&self, other: &DamageProfile) -> Self {
        Self::new(
            self.em + other.em,
            self.thermal + other.thermal,
            self.kinetic + other.kinetic,
            self.explosive + other.explosive,
        )
    }

    /// Reduce this damage profile by a resistance profile, type by type.
    pub fn resisted(&self, resistances: &DamageProfile) -> Self {
        Self::new(
            self.em * (1.0 - resistances.em),
            self.thermal * (1.0 - resistances.thermal),
            self.kinetic * (1.0 - resistances.kinetic),
            self.explosive * (1.0 - resistances.explosive),
        )
    }

    /// Normalized shares per damage type. `None` for an all-zero profile.
    pub fn shares(&self) -> Option<DamageProfile> {
        let total = self.total();
        if total <= 0.0 {
            return None;
        }
        Some(self.scaled(1.0 / total))
    }

    /// Validate as a resistance profile: each field in [0, 1).
    pub fn validate_resistances(&self) -> Result<()> {
        for (value, name) in [
            (self.em, "em"),
            (self.thermal, "thermal"),
            (self.kinetic, "kinetic"),
            (self.explosive, "explosive"),
        ] {
            if !value.is_finite() || !(0.0..1.0).contains(&value) {
                return Err(Error::DegenerateInput {
                    message: format!("{name} resistance must lie in [0, 1), got {value}"),
                });
            }
        }
        Ok(())
    }

    /// Validate as a damage amount or rate: every field finite and >= 0.
    pub fn validate_damage(&self) -> Result<()> {
        for (value, name) in [
            (self.em, "em"),
            (self.thermal, "thermal"),
            (self.kinetic, "kinetic"),
            (self.explosive, "explosive"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::DegenerateInput {
                    message: format!("{name} damage must be finite and non-negative, got {value}"),
                });
            }
        }
        Ok(())
    }
}

/// The opposing entity a report is applied against. Caller-supplied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetProfile {
    /// Signature radius in meters. Must be positive.
    pub signature_radius: f64,
    /// Velocity transverse to the attacker, in meters per second.
    pub transverse_velocity: f64,
    /// Range to the target in meters.
    pub range: f64,
    /// Target resistances, each in [0, 1).
    #[serde(default)]
    pub resistances: DamageProfile,
}

impl TargetProfile {
    /// A stationary, unresisted target at the given range and signature.
    pub fn stationary(signature_radius: f64, range: f64) -> Self {
        Self {
            signature_radius,
            transverse_velocity: 0.0,
            range,
            resistances: DamageProfile::ZERO,
        }
    }

    /// Validate the profile for correctness.
    pub fn validate(&self) -> Result<()> {
        if !self.signature_radius.is_finite() || self.signature_radius <= 0.0 {
            return Err(Error::DegenerateInput {
                message: format!(
                    "signature_radius must be finite and positive, got {}",
                    self.signature_radius
                ),
            });
        }
        if !self.transverse_velocity.is_finite() || self.transverse_velocity < 0.0 {
            return Err(Error::DegenerateInput {
                message: format!(
                    "transverse_velocity must be finite and non-negative, got {}",
                    self.transverse_velocity
                ),
            });
        }
        if !self.range.is_finite() || self.range < 0.0 {
            return Err(Error::DegenerateInput {
                message: format!("range must be finite and non-negative, got {}", self.range),
            });
        }
        self.resistances.validate_resistances()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resisted_reduces_per_type() {
        let damage = DamageProfile::new(100.0, 50.0, 0.0, 25.0);
        let resists = DamageProfile::new(0.5, 0.2, 0.9, 0.0);
        let landed = damage.resisted(&resists);
        assert_eq!(landed.em, 50.0);
        assert_eq!(landed.thermal, 40.0);
        assert_eq!(landed.kinetic, 0.0);
        assert_eq!(landed.explosive, 25.0);
    }

    #[test]
    fn shares_normalize_to_one() {
        let mix = DamageProfile::new(60.0, 20.0, 20.0, 0.0);
        let shares = mix.shares().expect("non-zero mix");
        assert!((shares.total() - 1.0).abs() < 1e-12);
        assert!((shares.em - 0.6).abs() < 1e-12);
        assert!(DamageProfile::ZERO.shares().is_none());
    }

    #[test]
    fn target_profile_rejects_zero_signature() {
        let target = TargetProfile::stationary(0.0, 1000.0);
        assert!(target.validate().is_err());
    }

    #[test]
    fn resistance_validation_rejects_full_immunity() {
        let resists = DamageProfile::uniform(1.0);
        assert!(resists.validate_resistances().is_err());
        assert!(DamageProfile::uniform(0.75).validate_resistances().is_ok());
    }
}
