//! Buff categories, their sources, and the aggregated buff vector.
//!
//! Buffs are additive bonuses: a total of `0.25` for [`BuffKind::Efficiency`]
//! means a multiplier of `1.25`. Every contribution keeps its [`BuffSource`]
//! so display collaborators can show where a total came from; computations
//! only ever read [`BuffVector::total`].

use strum::IntoEnumIterator;

/// Category of a non-combat buff.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BuffKind {
    /// Shortens the time per repetition.
    ActionSpeed,
    /// Adds repetitions without shortening each one.
    Efficiency,
    /// Multiplies the count range of common drops.
    Gathering,
    /// Experience gain; carried for completeness, unused by profit.
    Wisdom,
    /// Multiplies the probability of rare drops.
    RareFind,
    /// Multiplies the probability of essence drops.
    EssenceFind,
    /// Enhancing success chance; carried for completeness, unused by profit.
    EnhancingSuccess,
}

/// Where a buff contribution comes from.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BuffSource {
    Equipment,
    MooPass,
    Community,
    Room,
    House,
    Tea,
    /// Passive bonus for skill level above an action's requirement.
    Level,
}

/// One sourced contribution to a buff total.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuffContribution {
    pub source: BuffSource,
    pub kind: BuffKind,
    pub value: f64,
}

impl BuffContribution {
    pub const fn new(source: BuffSource, kind: BuffKind, value: f64) -> Self {
        Self {
            source,
            kind,
            value,
        }
    }
}

/// Aggregated buffs acting on one action type.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuffVector {
    contributions: Vec<BuffContribution>,
}

impl BuffVector {
    /// Efficiency granted per skill level above the action requirement.
    pub const LEVEL_EFFICIENCY_PER_LEVEL: f64 = 0.01;

    /// Creates an empty buff vector (every total is zero).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_contributions(contributions: impl IntoIterator<Item = BuffContribution>) -> Self {
        Self {
            contributions: contributions.into_iter().collect(),
        }
    }

    /// Adds a contribution (builder pattern).
    #[must_use]
    pub fn with(mut self, source: BuffSource, kind: BuffKind, value: f64) -> Self {
        self.push(BuffContribution::new(source, kind, value));
        self
    }

    pub fn push(&mut self, contribution: BuffContribution) {
        self.contributions.push(contribution);
    }

    /// Adds the passive level efficiency bonus for `level` against `requirement`.
    ///
    /// Levels at or below the requirement add nothing; callers decide what a
    /// level below the requirement means (the profit aggregator reports zero
    /// repetitions).
    #[must_use]
    pub fn with_level_bonus(self, level: u32, requirement: u32) -> Self {
        let above = level.saturating_sub(requirement);
        if above == 0 {
            return self;
        }
        self.with(
            BuffSource::Level,
            BuffKind::Efficiency,
            above as f64 * Self::LEVEL_EFFICIENCY_PER_LEVEL,
        )
    }

    /// Sum of all contributions of `kind`.
    pub fn total(&self, kind: BuffKind) -> f64 {
        self.contributions
            .iter()
            .filter(|c| c.kind == kind)
            .map(|c| c.value)
            .sum()
    }

    /// `1 + total(kind)`.
    #[inline]
    pub fn multiplier(&self, kind: BuffKind) -> f64 {
        1.0 + self.total(kind)
    }

    /// Kinds with a non-zero total, in declaration order.
    pub fn active_totals(&self) -> impl Iterator<Item = (BuffKind, f64)> + '_ {
        BuffKind::iter()
            .map(|kind| (kind, self.total(kind)))
            .filter(|(_, total)| *total != 0.0)
    }

    /// Provenance of the total for `kind`.
    pub fn contributions(&self, kind: BuffKind) -> impl Iterator<Item = &BuffContribution> + '_ {
        self.contributions.iter().filter(move |c| c.kind == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.contributions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn totals_sum_across_sources() {
        let buffs = BuffVector::new()
            .with(BuffSource::Equipment, BuffKind::Efficiency, 0.10)
            .with(BuffSource::Tea, BuffKind::Efficiency, 0.05)
            .with(BuffSource::House, BuffKind::RareFind, 0.2);

        assert!((buffs.total(BuffKind::Efficiency) - 0.15).abs() < 1e-12);
        assert!((buffs.multiplier(BuffKind::RareFind) - 1.2).abs() < 1e-12);
        assert_eq!(buffs.total(BuffKind::Gathering), 0.0);
        assert_eq!(buffs.contributions(BuffKind::Efficiency).count(), 2);
    }

    #[test]
    fn level_bonus_is_recorded_as_level_source() {
        let buffs = BuffVector::new().with_level_bonus(45, 30);
        let level: Vec<_> = buffs.contributions(BuffKind::Efficiency).collect();
        assert_eq!(level.len(), 1);
        assert_eq!(level[0].source, BuffSource::Level);
        assert!((level[0].value - 0.15).abs() < 1e-12);

        assert!(BuffVector::new().with_level_bonus(10, 30).is_empty());
    }

    #[test]
    fn kinds_parse_from_snake_case() {
        assert_eq!(BuffKind::from_str("rare_find").unwrap(), BuffKind::RareFind);
        assert_eq!(BuffKind::from_str("ACTION_SPEED").unwrap(), BuffKind::ActionSpeed);
        assert_eq!(BuffKind::EssenceFind.to_string(), "essence_find");
        assert_eq!(BuffSource::MooPass.as_ref(), "moo_pass");
    }

    #[test]
    fn active_totals_skip_zero_kinds() {
        let buffs = BuffVector::new().with(BuffSource::Community, BuffKind::Gathering, 0.3);
        let active: Vec<_> = buffs.active_totals().map(|(kind, _)| kind).collect();
        assert_eq!(active, vec![BuffKind::Gathering]);
    }
}
