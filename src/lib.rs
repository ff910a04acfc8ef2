//! ICER Engine - Incremental cost-effectiveness evaluation
//!
//! This crate compares a health intervention against a comparator: it
//! classifies simple dominance, computes the incremental cost-effectiveness
//! ratio and net monetary benefit against a versioned willingness-to-pay
//! threshold, decides accept/reject/inconclusive, and optionally estimates
//! the probability of cost-effectiveness by Monte Carlo sampling.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
