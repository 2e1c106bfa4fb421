//! Append-only in-memory appointment store.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::model::Appointment;
use crate::ports::{AppointmentStore, PortError};

/// Appointment list guarded by a mutex; appends from concurrent requests are
/// serialized, their relative order is unspecified.
#[derive(Debug, Default)]
pub struct InMemoryAppointmentStore {
    appointments: Mutex<Vec<Appointment>>,
}

impl InMemoryAppointmentStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Appointment> {
        self.appointments.lock().clone()
    }

    /// Number of recorded appointments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.appointments.lock().len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.appointments.lock().is_empty()
    }
}

#[async_trait]
impl AppointmentStore for InMemoryAppointmentStore {
    async fn append(&self, appointment: Appointment) -> Result<(), PortError> {
        self.appointments.lock().push(appointment);
        Ok(())
    }
}
