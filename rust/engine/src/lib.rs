//! # holdem-engine: Texas Hold'em Rules Engine
//!
//! A deterministic no-limit Texas Hold'em engine for 2 to 22 seats.
//! Provides card and deck handling, hand evaluation, Monte-Carlo equity,
//! betting validation and a round controller that runs a hand from the
//! deal to the payout, with seeded RNG for reproducible play.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and text parsing
//! - [`deck`] - Seeded deck shuffling with ChaCha20 RNG
//! - [`hand`] - Best-of-seven hand evaluation and strength comparison
//! - [`equity`] - Monte-Carlo win probability estimation
//! - [`rules`] - Action validation and blind structure
//! - [`player`] - Player state, actions and chip movement
//! - [`pot`] - Main pot and side pot construction
//! - [`game`] - Betting state machine and stage transitions
//! - [`engine`] - Round controller: dealing, showdown and payouts
//! - [`events`] - Listener hooks for stage, bet and round notifications
//! - [`logger`] - HandRecord serialization to JSONL
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::hand::{best_hand, Category};
//!
//! let cards = parse_cards("AH KH QH JH TH 2C 3D").unwrap();
//! let best = best_hand(&cards).unwrap();
//! assert_eq!(best.strength.category, Category::RoyalFlush);
//! ```
//!
//! ## Running a Hand
//!
//! ```rust
//! use holdem_engine::engine::{Engine, EngineConfig};
//!
//! let config = EngineConfig { seed: Some(42), ..EngineConfig::default() };
//! let mut engine = Engine::with_stacks(config, &[1000, 1000]).unwrap();
//! engine.start_new_round().unwrap();
//!
//! // call or check whatever comes until the hand is over
//! while let Some(seat) = engine.to_act() {
//!     if engine.to_call(seat) > 0 {
//!         engine.call(seat).unwrap();
//!     } else {
//!         engine.check(seat).unwrap();
//!     }
//! }
//! let total: u32 = engine.players().iter().map(|p| p.chips()).sum();
//! assert_eq!(total, 2000);
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod equity;
pub mod errors;
pub mod events;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod pot;
pub mod rules;
