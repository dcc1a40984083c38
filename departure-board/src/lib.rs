//! Nearest BART station departure board.
//!
//! Finds the BART station closest to a position and builds a snapshot of
//! its upcoming departures: trains grouped by platform, soonest first,
//! with a summary of any delays.

pub mod bart;
pub mod board;
pub mod config;
pub mod domain;
pub mod error;
pub mod location;
pub mod service;
pub mod stations;
pub mod transport;
pub mod web;
