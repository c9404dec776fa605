pub use crate::base::{
    config::Config,
    error::{DeskError, IdentityError, QueueError},
    types::{Account, AppointmentRequest, Err, Priority, Res, Role, Void},
};
pub use crate::service::{clock::Clock, identity::IdentityClient, queue::QueueClient};
pub use anyhow::anyhow;
pub use tracing::{debug, error, info, instrument, warn};
