//! The triage queue: pending appointment requests in serving order.

pub mod memory;

use std::{ops::Deref, sync::Arc};

use crate::base::{error::QueueError, types::AppointmentRequest};

// Traits.

/// Generic triage queue trait that stores must implement.
///
/// Serving order is `(priority, submitted_at)` ascending, with exact ties kept
/// in submission order. Every method observes one consistent snapshot of the
/// pending set, so the duplicate check in `submit` cannot race an insert.
pub trait GenericTriageQueue: Send + Sync + 'static {
    /// Adds a request to the pending set.
    ///
    /// Fails with [`QueueError::DuplicateRequest`] if the patient already has a
    /// pending request; the pending set is left untouched in that case.
    fn submit(&self, request: AppointmentRequest) -> Result<(), QueueError>;

    /// All pending requests in serving order.
    ///
    /// Calling this twice without an intervening mutation yields identical results.
    fn ordered_view(&self) -> Vec<AppointmentRequest>;

    /// Removes and returns the patient's request as served.
    fn serve(&self, patient_id: &str) -> Result<AppointmentRequest, QueueError>;

    /// Removes and returns the head of the serving order, if any.
    fn serve_next(&self) -> Option<AppointmentRequest>;

    /// Withdraws the patient's request without serving it.
    fn cancel(&self, patient_id: &str) -> Result<AppointmentRequest, QueueError>;

    /// 1-based position of the patient in the serving order.
    fn position(&self, patient_id: &str) -> Option<usize>;

    /// Number of pending requests.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Structs.

/// Queue client for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct QueueClient {
    inner: Arc<dyn GenericTriageQueue>,
}

impl Deref for QueueClient {
    type Target = dyn GenericTriageQueue;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl QueueClient {
    pub fn new(inner: Arc<dyn GenericTriageQueue>) -> Self {
        Self { inner }
    }
}
