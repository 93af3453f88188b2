use std::collections::BTreeMap;

use rand::{Rng, seq::IndexedRandom};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    #[error("{name} must be between 0 and 1, got {value}")]
    OutOfRange { name: &'static str, value: f64 },
    #[error("No style named {0}")]
    UnknownStyle(String),
    #[error("The style table is empty")]
    EmptyTable,
}

/// How a synthetic player plays: `tightness` narrows the range of hands it
/// continues with and `aggression` is how often it bets or raises instead
/// of checking or calling. Both are in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BotStyle {
    pub tightness: f64,
    pub aggression: f64,
}

impl BotStyle {
    /// Tight aggressive.
    pub const TAG: BotStyle = BotStyle {
        tightness: 0.75,
        aggression: 0.85,
    };
    /// Loose aggressive.
    pub const LAG: BotStyle = BotStyle {
        tightness: 0.35,
        aggression: 0.80,
    };
    /// Calling station.
    pub const CTR: BotStyle = BotStyle {
        tightness: 0.55,
        aggression: 0.40,
    };
    pub const NIT: BotStyle = BotStyle {
        tightness: 0.90,
        aggression: 0.50,
    };
    pub const FISH: BotStyle = BotStyle {
        tightness: 0.30,
        aggression: 0.20,
    };

    pub fn new(tightness: f64, aggression: f64) -> Result<Self, StyleError> {
        let style = Self {
            tightness,
            aggression,
        };
        style.validate()?;
        Ok(style)
    }

    pub fn validate(&self) -> Result<(), StyleError> {
        for (name, value) in [
            ("tightness", self.tightness),
            ("aggression", self.aggression),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(StyleError::OutOfRange { name, value });
            }
        }
        Ok(())
    }
}

/// The five built in styles in their canonical order.
pub const CANONICAL_STYLES: [(&str, BotStyle); 5] = [
    ("TAG", BotStyle::TAG),
    ("LAG", BotStyle::LAG),
    ("CTR", BotStyle::CTR),
    ("NIT", BotStyle::NIT),
    ("FISH", BotStyle::FISH),
];

/// Named playing styles. Starts with the canonical five; more can be added
/// but every entry is validated.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleTable {
    styles: BTreeMap<String, BotStyle>,
}

impl Default for StyleTable {
    fn default() -> Self {
        Self {
            styles: CANONICAL_STYLES
                .iter()
                .map(|(name, style)| (name.to_string(), *style))
                .collect(),
        }
    }
}

impl StyleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a style.
    pub fn insert(&mut self, name: impl Into<String>, style: BotStyle) -> Result<(), StyleError> {
        style.validate()?;
        self.styles.insert(name.into(), style);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<BotStyle, StyleError> {
        self.styles
            .get(name)
            .copied()
            .ok_or_else(|| StyleError::UnknownStyle(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BotStyle)> {
        self.styles.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// One style per bot cycling through the canonical names.
    pub fn assign_round_robin(&self, bots: usize) -> Result<Vec<(String, BotStyle)>, StyleError> {
        (0..bots)
            .map(|i| {
                let name = CANONICAL_STYLES[i % CANONICAL_STYLES.len()].0;
                Ok((name.to_string(), self.get(name)?))
            })
            .collect()
    }

    /// One style per bot picked uniformly from every entry in the table,
    /// custom ones included. All randomness comes from `rng`.
    pub fn assign_random<R: Rng + ?Sized>(
        &self,
        bots: usize,
        rng: &mut R,
    ) -> Result<Vec<(String, BotStyle)>, StyleError> {
        let entries: Vec<(&String, &BotStyle)> = self.styles.iter().collect();
        (0..bots)
            .map(|_| {
                entries
                    .choose(rng)
                    .map(|(name, style)| ((*name).clone(), **style))
                    .ok_or(StyleError::EmptyTable)
            })
            .collect()
    }
}
