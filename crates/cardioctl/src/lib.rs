//! Cardio Control - CLI client for the cardiod risk service

pub mod client;
pub mod commands;
pub mod display;
pub mod errors;
