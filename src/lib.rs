//! holdem-table: a No-Limit Texas Hold'em table engine
//!
//! Goals:
//! - Deterministic, synchronous rules engine: no I/O, no clocks driving play
//! - Seedable dealing for reproducible games and tests
//! - Rules violations come back as typed errors; the only panic is an exhausted deck
//!
//! ## Quick start: play a hand
//! ```
//! use holdem_table::action::Action;
//! use holdem_table::config::GameConfig;
//! use holdem_table::game::GameState;
//!
//! let mut table = GameState::with_seed(GameConfig::new(["Ann", "Bo", "Cy"]), 7).unwrap();
//! table.start_hand().unwrap();
//!
//! // everyone folds to the big blind
//! while table.count_in_hand() > 1 {
//!     let seat = table.current_seat().unwrap();
//!     table.process_action(Action::fold(seat)).unwrap();
//! }
//! table.advance_street().unwrap();
//! assert!(table.is_hand_complete());
//! assert_eq!(table.winners()[0].description, "uncontested");
//! ```
//!
//! ## Evaluate a hand
//! ```
//! use holdem_table::evaluator::{evaluate_holdem, HandCategory};
//! use holdem_table::hand::{Board, HoleCards};
//!
//! let hole: HoleCards = "As Ah".parse().unwrap();
//! let board: Board = "Kc Qd Jh 3s 2c".parse().unwrap();
//! let eval = evaluate_holdem(&hole, &board).unwrap();
//! assert_eq!(eval.category, HandCategory::OnePair);
//! ```

pub mod action;
pub mod betting;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod evaluator;
pub mod game;
pub mod hand;
pub mod history;
pub mod player;
pub mod pot;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
