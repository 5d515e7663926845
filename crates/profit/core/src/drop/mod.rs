//! Drop-table evaluation.
//!
//! A [`DropSpec`] is one drop-table entry applied to a number of trials. The
//! [`DropCalculator`] buff-adjusts it according to its [`DropTier`], realizes
//! a count (expected value or quantile, see [`EvaluationMode`]) and values it
//! at the market. Openable containers are expanded into the lines of their
//! contents.

mod calculator;

pub use calculator::DropCalculator;

use crate::buff::{BuffKind, BuffVector};
use crate::distribution::ModelParams;
use crate::env::{DropEntry, ItemId};
use crate::error::ParameterError;

/// Which table of an action an entry comes from.
///
/// The tier decides which buff adjusts the entry:
///
/// | Tier | Buff | Effect |
/// |---|---|---|
/// | `Output` | none | |
/// | `Common` | [`BuffKind::Gathering`] | count range × `1 + gathering` |
/// | `Essence` | [`BuffKind::EssenceFind`] | probability × `1 + essence_find` |
/// | `Rare` | [`BuffKind::RareFind`] | probability × `1 + rare_find` |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum DropTier {
    Output,
    Common,
    Essence,
    Rare,
}

impl DropTier {
    pub const fn buff_kind(self) -> Option<BuffKind> {
        match self {
            Self::Output => None,
            Self::Common => Some(BuffKind::Gathering),
            Self::Essence => Some(BuffKind::EssenceFind),
            Self::Rare => Some(BuffKind::RareFind),
        }
    }

    /// Applies this tier's buff to an unbuffed rate. Probabilities are capped at one.
    pub fn apply(self, rate: DropRate, buffs: &BuffVector) -> DropRate {
        let Some(kind) = self.buff_kind() else {
            return rate;
        };
        let multiplier = buffs.multiplier(kind);
        match self {
            Self::Common => DropRate {
                min_count: rate.min_count * multiplier,
                max_count: rate.max_count * multiplier,
                ..rate
            },
            _ => DropRate {
                probability: (rate.probability * multiplier).min(1.0),
                ..rate
            },
        }
    }
}

/// Probability and count range of one roll.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropRate {
    pub probability: f64,
    pub min_count: f64,
    pub max_count: f64,
}

impl DropRate {
    pub const fn new(probability: f64, min_count: f64, max_count: f64) -> Self {
        Self {
            probability,
            min_count,
            max_count,
        }
    }

    /// Certain drop of exactly `count` items.
    pub const fn fixed(count: f64) -> Self {
        Self::new(1.0, count, count)
    }
}

impl From<&DropEntry> for DropRate {
    fn from(entry: &DropEntry) -> Self {
        Self::new(entry.probability, entry.min_count, entry.max_count)
    }
}

/// One drop-table entry applied `trials` times.
#[derive(Clone, Debug, PartialEq)]
pub struct DropSpec {
    pub item_id: ItemId,
    pub rate: DropRate,
    pub trials: f64,
}

impl DropSpec {
    pub fn new(item_id: impl Into<ItemId>, rate: DropRate, trials: f64) -> Self {
        Self {
            item_id: item_id.into(),
            rate,
            trials,
        }
    }

    /// Validated distribution parameters of this spec.
    ///
    /// # Errors
    ///
    /// See [`ModelParams::new`].
    pub fn params(&self) -> Result<ModelParams, ParameterError> {
        ModelParams::new(
            self.trials,
            self.rate.probability,
            self.rate.min_count,
            self.rate.max_count,
        )
    }
}

/// How a count is realized from its distribution.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EvaluationMode {
    /// Expected value.
    #[default]
    Average,
    /// Count at the given luck, strictly between 0 and 1.
    Quantile(f64),
}

impl EvaluationMode {
    /// # Errors
    ///
    /// Returns [`ParameterError::QuantileOutOfRange`] unless `0 < p < 1`.
    pub fn validate(self) -> Result<Self, ParameterError> {
        match self {
            Self::Quantile(p) if !(p > 0.0 && p < 1.0) => {
                Err(ParameterError::QuantileOutOfRange(p))
            }
            mode => Ok(mode),
        }
    }
}

/// One valued output line.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropIncome {
    pub item_id: ItemId,
    pub tier: DropTier,
    /// Realized count over all trials.
    pub count: f64,
    /// Unit price; for containers, `income / count`.
    pub price: f64,
    pub income: f64,
    /// Catalog rate before buffs.
    pub origin: DropRate,
    /// Rate the count was realized from.
    pub buffed: DropRate,
    /// Lines of a container's contents, empty for ordinary items.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub contents: Vec<DropIncome>,
}

impl DropIncome {
    pub fn is_container(&self) -> bool {
        !self.contents.is_empty()
    }
}
