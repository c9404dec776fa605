//! Core components, types, and utilities for the clinic desk.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - Typed domain errors.
//! - The appointment data model and common result types.

pub mod config;
pub mod error;
pub mod types;
