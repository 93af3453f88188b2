//! Table and bot settings.
//!
//! ```
//! use holdem_bots::config::GameConfig;
//!
//! let config = GameConfig::from_json(r#"{ "seats": 4, "seed": 11 }"#).unwrap();
//! assert_eq!(4, config.seats);
//! assert_eq!(1000, config.starting_stack);
//! let game_state = config.game_state();
//! assert_eq!(4, game_state.num_players());
//! ```
use std::collections::BTreeMap;
use std::time::Duration;

use rand::{Rng, SeedableRng, rngs::StdRng};
use thiserror::Error;

use crate::arena::GameState;
use crate::arena::agent::{AgentGenerator, BotAgentGenerator};
use crate::arena::tournament::SingleTableTournamentBuilder;
use crate::bot::{BotStyle, StyleError, StyleTable};
use crate::holdem::EquityCalculator;

/// Two hole cards per seat plus a full board have to fit in one deck.
pub const MAX_SEATS: usize = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Seat count must be between 2 and {MAX_SEATS}, got {0}")]
    SeatCount(usize),
    #[error("Blinds must be positive")]
    ZeroBlind,
    #[error("Big blind {big} is smaller than small blind {small}")]
    BlindOrder { small: u32, big: u32 },
    #[error("Starting stack must be positive")]
    ZeroStack,
    #[error("Trial counts must be positive")]
    ZeroTrials,
    #[error(transparent)]
    Style(#[from] StyleError),
    #[cfg(feature = "serde")]
    #[error("Unable to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub seats: usize,
    pub starting_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    /// Trials for equity shown to players.
    pub equity_trials: usize,
    /// Trials each bot runs per decision.
    pub bot_trials: usize,
    pub equity_timeout_ms: Option<u64>,
    /// Style for bots that aren't given one.
    pub default_style: String,
    /// Extra styles on top of the canonical five. Same names replace them.
    pub custom_styles: BTreeMap<String, BotStyle>,
    /// Pick each bot's style at random from the table instead of cycling
    /// through the canonical names.
    pub random_styles: bool,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seats: 6,
            starting_stack: 1000,
            small_blind: 5,
            big_blind: 10,
            equity_trials: 5000,
            bot_trials: 1000,
            equity_timeout_ms: None,
            default_style: "TAG".to_string(),
            custom_styles: BTreeMap::new(),
            random_styles: false,
            seed: None,
        }
    }
}

impl GameConfig {
    #[cfg(feature = "serde")]
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=MAX_SEATS).contains(&self.seats) {
            return Err(ConfigError::SeatCount(self.seats));
        }
        if self.small_blind == 0 || self.big_blind == 0 {
            return Err(ConfigError::ZeroBlind);
        }
        if self.big_blind < self.small_blind {
            return Err(ConfigError::BlindOrder {
                small: self.small_blind,
                big: self.big_blind,
            });
        }
        if self.starting_stack == 0 {
            return Err(ConfigError::ZeroStack);
        }
        if self.equity_trials == 0 || self.bot_trials == 0 {
            return Err(ConfigError::ZeroTrials);
        }
        let table = self.style_table()?;
        table.get(&self.default_style)?;
        Ok(())
    }

    /// The canonical styles plus the custom ones.
    pub fn style_table(&self) -> Result<StyleTable, StyleError> {
        let mut table = StyleTable::default();
        for (name, style) in &self.custom_styles {
            table.insert(name.clone(), *style)?;
        }
        Ok(table)
    }

    pub fn default_bot_style(&self) -> Result<BotStyle, StyleError> {
        self.style_table()?.get(&self.default_style)
    }

    fn with_timeout(&self, calculator: EquityCalculator) -> EquityCalculator {
        match self.equity_timeout_ms {
            Some(ms) => calculator.with_timeout(Duration::from_millis(ms)),
            None => calculator,
        }
    }

    pub fn equity_calculator(&self) -> EquityCalculator {
        self.with_timeout(EquityCalculator::new(self.equity_trials))
    }

    pub fn bot_calculator(&self) -> EquityCalculator {
        self.with_timeout(EquityCalculator::new(self.bot_trials))
    }

    /// A fresh hand with everyone on the starting stack and the button on
    /// seat 0.
    pub fn game_state(&self) -> GameState {
        GameState::new(
            vec![self.starting_stack; self.seats],
            self.big_blind,
            self.small_blind,
            0,
        )
    }

    /// One bot per seat with styles assigned round robin, or drawn from
    /// the seed when `random_styles` is set. Seat `i` is seeded with
    /// `seed + i`.
    pub fn bot_generators(&self) -> Result<Vec<Box<dyn AgentGenerator>>, ConfigError> {
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        let calculator = self.bot_calculator();
        let table = self.style_table()?;
        let styles = if self.random_styles {
            table.assign_random(self.seats, &mut StdRng::seed_from_u64(seed))?
        } else {
            table.assign_round_robin(self.seats)?
        };
        Ok(styles
            .into_iter()
            .enumerate()
            .map(|(seat, (_, style))| {
                Box::new(BotAgentGenerator::new(
                    style,
                    calculator,
                    seed.wrapping_add(seat as u64),
                )) as Box<dyn AgentGenerator>
            })
            .collect())
    }

    /// A tournament of bots at this table.
    pub fn tournament_builder(&self) -> Result<SingleTableTournamentBuilder, ConfigError> {
        self.validate()?;
        let mut builder = SingleTableTournamentBuilder::default()
            .agent_generators(self.bot_generators()?)
            .starting_game_state(self.game_state());
        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }
        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        config.validate().unwrap();
        assert_eq!(BotStyle::TAG, config.default_bot_style().unwrap());
        assert_eq!(5000, config.equity_calculator().trials());
        assert_eq!(1000, config.bot_calculator().trials());
        assert_eq!(None, config.bot_calculator().timeout());
    }

    #[test]
    fn test_rejects_bad_tables() {
        let bad = GameConfig {
            seats: 11,
            ..Default::default()
        };
        assert!(matches!(bad.validate(), Err(ConfigError::SeatCount(11))));

        let bad = GameConfig {
            seats: 1,
            ..Default::default()
        };
        assert!(matches!(bad.validate(), Err(ConfigError::SeatCount(1))));

        let bad = GameConfig {
            small_blind: 20,
            big_blind: 10,
            ..Default::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(ConfigError::BlindOrder { small: 20, big: 10 })
        ));

        let bad = GameConfig {
            small_blind: 0,
            ..Default::default()
        };
        assert!(matches!(bad.validate(), Err(ConfigError::ZeroBlind)));

        let bad = GameConfig {
            default_style: "SHARK".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(ConfigError::Style(StyleError::UnknownStyle(_)))
        ));
    }

    #[test]
    fn test_custom_styles() {
        let mut config = GameConfig::default();
        config.custom_styles.insert(
            "SHARK".to_string(),
            BotStyle {
                tightness: 0.6,
                aggression: 0.9,
            },
        );
        config.default_style = "SHARK".to_string();
        config.validate().unwrap();
        assert_eq!(0.9, config.default_bot_style().unwrap().aggression);
        assert_eq!(6, config.style_table().unwrap().len());

        config.custom_styles.insert(
            "BROKEN".to_string(),
            BotStyle {
                tightness: 0.5,
                aggression: 2.0,
            },
        );
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Style(StyleError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_timeout_is_applied() {
        let config = GameConfig {
            equity_timeout_ms: Some(250),
            ..Default::default()
        };
        assert_eq!(
            Some(Duration::from_millis(250)),
            config.equity_calculator().timeout()
        );
    }

    #[test]
    fn test_bot_generators_per_seat() {
        let config = GameConfig {
            seats: 3,
            seed: Some(5),
            ..Default::default()
        };
        assert_eq!(3, config.bot_generators().unwrap().len());
        let state = config.game_state();
        assert_eq!(vec![1000; 3], state.stacks());
        assert_eq!(10, state.big_blind);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json() {
        let config = GameConfig::from_json(
            r#"{
                "seats": 3,
                "small_blind": 10,
                "big_blind": 20,
                "custom_styles": { "ROCK": { "tightness": 0.95, "aggression": 0.1 } }
            }"#,
        )
        .unwrap();
        assert_eq!(20, config.big_blind);
        assert_eq!(1000, config.starting_stack);
        assert_eq!(0.95, config.style_table().unwrap().get("ROCK").unwrap().tightness);

        assert!(matches!(
            GameConfig::from_json(r#"{ "seats": 0 }"#),
            Err(ConfigError::SeatCount(0))
        ));
        assert!(matches!(
            GameConfig::from_json("not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_tournament_from_config() {
        let config = GameConfig {
            seats: 2,
            bot_trials: 50,
            seed: Some(21),
            ..Default::default()
        };
        let result = config
            .tournament_builder()
            .unwrap()
            .max_hands(3)
            .build()
            .unwrap()
            .run()
            .unwrap();
        assert!(result.hands_played <= 3);
        assert_eq!(2000, result.final_stacks.iter().sum::<u32>());
    }

    #[test]
    fn test_random_styles_replay() {
        let config = GameConfig {
            seats: 4,
            bot_trials: 50,
            random_styles: true,
            seed: Some(77),
            ..Default::default()
        };
        let run = || {
            config
                .tournament_builder()
                .unwrap()
                .max_hands(3)
                .build()
                .unwrap()
                .run()
                .unwrap()
        };
        let first = run();
        assert_eq!(first, run());
        assert_eq!(4000, first.final_stacks.iter().sum::<u32>());
    }
}
