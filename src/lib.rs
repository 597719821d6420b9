//! # Wayfarer
//!
//! A trip-planning pipeline that runs a small set of dependent computation
//! stages over a single planning record, with routing between stages decided
//! by data computed earlier in the same run.
//!
//! ## Modules
//!
//! - `budget` - Budget feasibility analysis and the four-way breakdown
//! - `config` - TOML + environment configuration for the generation service
//! - `generation` - External text-generation client with timeout and fallback contract
//! - `record` - The planning record threaded through all stages
//! - `regions` - Ordered keyword rules classifying destinations into regions
//! - `search` - Search provider boundary and the built-in catalog provider
//! - `selector` - Deterministic candidate scoring and selection under a ceiling
//! - `stages` - Terminal stage bodies and their pure fallback templates
//! - `workflow` - Stage graph, routing table, and the sequential driver
//! - `testing` - Mock collaborators for tests

pub mod budget;
pub mod config;
pub mod error;
pub mod generation;
pub mod record;
pub mod regions;
pub mod search;
pub mod selector;
pub mod stages;
pub mod workflow;

pub mod testing;
