//! User-facing side of the clinic desk.
//!
//! This module provides:
//! - Parsing of text commands
//! - The desk session that routes commands to the queue and identity provider
//! - Rendering of the ordered queue as a table or JSON

pub mod command;
pub mod desk;
pub mod render;
