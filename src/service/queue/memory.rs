//! In-memory triage queue, alive for the lifetime of the process.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Local};
use parking_lot::Mutex;
use tracing::{debug, info, instrument};

use crate::base::{
    error::QueueError,
    types::{AppointmentRequest, Priority},
};

use super::{GenericTriageQueue, QueueClient};

// Extra methods on `QueueClient` applied by the in-memory implementation.

impl QueueClient {
    /// Creates an empty in-memory queue.
    pub fn memory() -> Self {
        Self::new(std::sync::Arc::new(MemoryTriageQueue::default()))
    }
}

// Structs.

/// Sort key of a pending request. The sequence number keeps exact ties stable.
type SlotKey = (Priority, DateTime<Local>, u64);

#[derive(Default)]
struct Pending {
    /// Requests in serving order.
    slots: BTreeMap<SlotKey, AppointmentRequest>,
    /// Patient id to slot, one entry per pending patient.
    index: HashMap<String, SlotKey>,
    next_seq: u64,
}

impl Pending {
    fn remove(&mut self, patient_id: &str) -> Result<AppointmentRequest, QueueError> {
        let key = self.index.remove(patient_id).ok_or_else(|| QueueError::NotFound {
            patient_id: patient_id.to_string(),
        })?;

        // The index and the slots are only ever updated together.
        self.slots.remove(&key).ok_or_else(|| QueueError::NotFound {
            patient_id: patient_id.to_string(),
        })
    }
}

/// Triage queue backed by an ordered map behind a single lock.
#[derive(Default)]
pub struct MemoryTriageQueue {
    pending: Mutex<Pending>,
}

impl GenericTriageQueue for MemoryTriageQueue {
    #[instrument(skip_all, fields(patient_id = request.patient_id(), priority = %request.priority()))]
    fn submit(&self, request: AppointmentRequest) -> Result<(), QueueError> {
        let mut pending = self.pending.lock();

        if pending.index.contains_key(request.patient_id()) {
            debug!("Rejecting duplicate request.");

            return Err(QueueError::DuplicateRequest {
                patient_id: request.patient_id().to_string(),
            });
        }

        let key = (request.priority(), request.submitted_at(), pending.next_seq);
        pending.next_seq += 1;
        pending.index.insert(request.patient_id().to_string(), key);
        pending.slots.insert(key, request);

        info!("Request queued ({} pending).", pending.slots.len());

        Ok(())
    }

    fn ordered_view(&self) -> Vec<AppointmentRequest> {
        self.pending.lock().slots.values().cloned().collect()
    }

    #[instrument(skip(self))]
    fn serve(&self, patient_id: &str) -> Result<AppointmentRequest, QueueError> {
        let served = self.pending.lock().remove(patient_id)?;

        info!("Patient served.");

        Ok(served)
    }

    #[instrument(skip(self))]
    fn serve_next(&self) -> Option<AppointmentRequest> {
        let mut pending = self.pending.lock();

        let (_, served) = pending.slots.pop_first()?;
        pending.index.remove(served.patient_id());

        info!(patient_id = served.patient_id(), "Serving next patient.");

        Some(served)
    }

    #[instrument(skip(self))]
    fn cancel(&self, patient_id: &str) -> Result<AppointmentRequest, QueueError> {
        let withdrawn = self.pending.lock().remove(patient_id)?;

        info!("Request withdrawn.");

        Ok(withdrawn)
    }

    fn position(&self, patient_id: &str) -> Option<usize> {
        let pending = self.pending.lock();
        let key = pending.index.get(patient_id)?;

        Some(pending.slots.range(..*key).count() + 1)
    }

    fn len(&self) -> usize {
        self.pending.lock().slots.len()
    }
}

// Tests.
