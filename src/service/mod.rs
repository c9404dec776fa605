//! Services backing the check-in desk.
//!
//! This module contains the collaborators the desk talks to:
//! - The triage queue (pending appointment requests)
//! - The identity provider (patient and staff accounts)
//! - The clock (submission timestamps)
//!
//! Each service module defines both a generic trait and a concrete in-memory
//! implementation, allowing for extensibility and easy testing.

pub mod clock;
pub mod identity;
pub mod queue;
