use serde::{Deserialize, Serialize};

pub const DEFAULT_STARTING_STACK: u64 = 2000;
pub const DEFAULT_SMALL_BLIND: u64 = 5;
pub const DEFAULT_BIG_BLIND: u64 = 10;
pub const MIN_SEATS: usize = 2;
pub const MAX_SEATS: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stakes {
    pub small_blind: u64,
    pub big_blind: u64,
}

impl Default for Stakes {
    fn default() -> Self {
        Self { small_blind: DEFAULT_SMALL_BLIND, big_blind: DEFAULT_BIG_BLIND }
    }
}

/// Who drives the seats. The engine only records it for its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Every seat is automated.
    #[default]
    Simulate,
    /// One seat (`user_seat`) belongs to a person.
    Play,
    /// A person controls every seat.
    Test,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    pub player_names: Vec<String>,
    /// Zero means [`DEFAULT_STARTING_STACK`].
    pub starting_stack: u64,
    /// Zero blinds fall back to the 5/10 defaults.
    pub stakes: Stakes,
    pub mode: GameMode,
    #[serde(alias = "userSeatIdx")]
    pub user_seat: usize,
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("table needs 2 to 9 seats, got {0}")]
    SeatCount(usize),
    #[error("user seat {seat} is outside a {seats}-seat table")]
    UserSeat { seat: usize, seats: usize },
    #[error("small blind {small} exceeds big blind {big}")]
    Blinds { small: u64, big: u64 },
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
}

impl GameConfig {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { player_names: names.into_iter().map(Into::into).collect(), ..Self::default() }
    }

    pub fn with_stack(mut self, starting_stack: u64) -> Self {
        self.starting_stack = starting_stack;
        self
    }

    pub fn with_blinds(mut self, small_blind: u64, big_blind: u64) -> Self {
        self.stakes = Stakes { small_blind, big_blind };
        self
    }

    pub fn with_mode(mut self, mode: GameMode, user_seat: usize) -> Self {
        self.mode = mode;
        self.user_seat = user_seat;
        self
    }

    /// Parse, apply defaults and validate in one step.
    ///
    /// ```
    /// use holdem_table::config::GameConfig;
    ///
    /// let cfg = GameConfig::from_json(r#"{"playerNames":["a","b","c"],"startingStack":0}"#).unwrap();
    /// assert_eq!(cfg.starting_stack, 2000);
    /// assert_eq!(cfg.stakes.big_blind, 10);
    /// ```
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig = serde_json::from_str(s)?;
        let cfg = cfg.normalized();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Replace zero stack and blinds with the defaults.
    pub fn normalized(mut self) -> Self {
        if self.starting_stack == 0 {
            self.starting_stack = DEFAULT_STARTING_STACK;
        }
        if self.stakes.small_blind == 0 {
            self.stakes.small_blind = DEFAULT_SMALL_BLIND;
        }
        if self.stakes.big_blind == 0 {
            self.stakes.big_blind = DEFAULT_BIG_BLIND;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let seats = self.player_names.len();
        if !(MIN_SEATS..=MAX_SEATS).contains(&seats) {
            return Err(ConfigError::SeatCount(seats));
        }
        if self.mode == GameMode::Play && self.user_seat >= seats {
            return Err(ConfigError::UserSeat { seat: self.user_seat, seats });
        }
        if self.stakes.small_blind > self.stakes.big_blind {
            return Err(ConfigError::Blinds {
                small: self.stakes.small_blind,
                big: self.stakes.big_blind,
            });
        }
        Ok(())
    }
}
