//! Reproducible Monte Carlo generator for hypothetical conflict scenarios.
//!
//! ```no_run
//! use wargame_core::synthesizer::ScenarioSynthesizer;
//!
//! let mut synthesizer = ScenarioSynthesizer::build(42);
//! let table = synthesizer.generate_conflict_scenarios(1000)?;
//! assert_eq!(table.len(), 1000);
//! # Ok::<(), wargame_core::error::SimError>(())
//! ```

pub mod capabilities;
pub mod config;
pub mod error;
pub mod rng;
pub mod scenario;
pub mod synthesizer;
pub mod weapons;
