//! Holdem Bots is a Texas Hold'em library.
//!
//! It ranks seven card hands, runs a no limit betting engine with side
//! pots, estimates win probability by Monte Carlo simulation and plays
//! synthetic opponents whose style is plain data.

/// Allow all the core poker functionality to be used
/// externally. Everything in core should be agnostic
/// to poker style.
pub mod core;
/// Allow all the holdem specific code to be used externally.
pub mod holdem;
/// Small helpers shared by the engine.
pub mod utils;
/// The betting engine, agents and tournaments.
pub mod arena;
/// Style driven synthetic opponents.
pub mod bot;
/// Table and bot settings.
pub mod config;
