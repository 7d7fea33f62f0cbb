//! CLI infrastructure for the tabular RL toolkit
//!
//! This module provides the command-line interface for training, comparing
//! and evaluating tabular agents.

pub mod commands;
pub mod output;
