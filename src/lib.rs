//! Humance - HR Performance & KPI Scoring Engine
//!
//! This crate runs monthly performance reviews, processes department KPI
//! results and resolves the bonus tiers that both feed into.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
