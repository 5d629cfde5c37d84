//! Diminishing-returns stacking of same-category percentage modifiers.
//!
//! Same-category bonuses do not stack linearly: the strongest bonus applies
//! in full and each additional bonus is scaled by `exp(-i^2 / 7.1289)` where
//! `i` is its zero-based position in descending order of deviation from
//! neutral. The exponent is `i^2`: position 0 carries no penalty.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dogma::TypeId;

/// Divisor in the stacking penalty exponent. `exp(-1 / 7.1289)` puts the
/// second module at ~86.9% effectiveness, the third at ~57.1%.
pub const STACKING_PENALTY_DIVISOR: f64 = 7.1289;

/// Stacking groups the aggregator reduces independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StackingCategory {
    Damage,
    RateOfFire,
    Tracking,
}

/// A single module's contribution to one stacking group. Ephemeral:
/// constructed per aggregation pass, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModifierContribution {
    pub category: StackingCategory,
    /// Raw multiplicative amount, e.g. 1.10 for +10% or 0.90 for -10%.
    pub multiplier: f64,
    /// Owning module type.
    pub source: TypeId,
}

/// Penalty factor for the bonus at zero-based position `position`.
pub fn stacking_factor(position: usize) -> f64 {
    let i = position as f64;
    (-(i * i) / STACKING_PENALTY_DIVISOR).exp()
}

/// Combine same-category multiplicative bonuses under the stacking penalty.
///
/// Bonuses are ordered by magnitude of deviation from neutral (1.0),
/// descending, so the strongest applies unpenalized. The combined multiplier
/// is the product of each bonus's effective contribution
/// `1 + (raw - 1) * factor(i)`.
pub fn combine_stacked(bonuses: &[f64]) -> f64 {
    let mut ordered: Vec<f64> = bonuses.to_vec();
    ordered.sort_by(|a, b| (b - 1.0).abs().total_cmp(&(a - 1.0).abs()));

    ordered
        .iter()
        .enumerate()
        .map(|(position, raw)| 1.0 + (raw - 1.0) * stacking_factor(position))
        .product()
}

/// Group contributions by category and reduce each group.
pub fn reduce_contributions(
    contributions: &[ModifierContribution],
) -> BTreeMap<StackingCategory, f64> {
    let mut grouped: BTreeMap<StackingCategory, Vec<f64>> = BTreeMap::new();
    for contribution in contributions {
        grouped
            .entry(contribution.category)
            .or_default()
            .push(contribution.multiplier);
    }

    grouped
        .into_iter()
        .map(|(category, bonuses)| (category, combine_stacked(&bonuses)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_position_is_unpenalized() {
        assert_eq!(stacking_factor(0), 1.0);
        assert_eq!(combine_stacked(&[1.25]), 1.25);
    }

    #[test]
    fn penalty_factors_match_canonical_values() {
        assert!((stacking_factor(1) - 0.869).abs() < 1e-3);
        assert!((stacking_factor(2) - 0.571).abs() < 1e-3);
        assert!((stacking_factor(3) - 0.283).abs() < 1e-3);
    }

    #[test]
    fn strongest_bonus_applies_first_regardless_of_input_order() {
        let a = combine_stacked(&[1.05, 1.20]);
        let b = combine_stacked(&[1.20, 1.05]);
        assert_eq!(a, b);
        // 1.20 unpenalized, 1.05 at position 1.
        let expected = 1.20 * (1.0 + 0.05 * stacking_factor(1));
        assert!((a - expected).abs() < 1e-12);
    }

    #[test]
    fn reductions_stack_by_deviation_magnitude() {
        // 0.85 deviates more than 1.10, so it takes position 0.
        let combined = combine_stacked(&[1.10, 0.85]);
        let expected = 0.85 * (1.0 + 0.10 * stacking_factor(1));
        assert!((combined - expected).abs() < 1e-12);
    }

    #[test]
    fn reduce_groups_by_category() {
        let contributions = [
            ModifierContribution {
                category: StackingCategory::Damage,
                multiplier: 1.10,
                source: 1,
            },
            ModifierContribution {
                category: StackingCategory::RateOfFire,
                multiplier: 0.90,
                source: 2,
            },
            ModifierContribution {
                category: StackingCategory::Damage,
                multiplier: 1.10,
                source: 3,
            },
        ];
        let reduced = reduce_contributions(&contributions);
        assert_eq!(reduced.len(), 2);
        assert_eq!(reduced[&StackingCategory::RateOfFire], 0.90);
        let damage = reduced[&StackingCategory::Damage];
        let expected = 1.10 * (1.0 + 0.10 * stacking_factor(1));
        assert!((damage - expected).abs() < 1e-12);
    }
}
