//! Traits describing the external collaborators and shared helper types.

use async_trait::async_trait;
use reqwest::Error as ReqwestError;

use crate::model::Appointment;

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while talking to external collaborators.
pub enum PortError {
    /// Network layer failed.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// The call did not finish within its deadline.
    #[error("Timed out after {0} ms")]
    Timeout(u128),
    /// Response body did not have the expected shape.
    #[error("Malformed response: {0}")]
    Malformed(String),
    /// Lookup succeeded but returned no places.
    #[error("No places returned for postal code {0}")]
    NoPlaces(String),
    /// Appointment store rejected the write.
    #[error("Storage error: {0}")]
    Storage(String),
    /// Internal adapter error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[async_trait]
/// Postal-code geocoding backend.
pub trait RegionLookupPort: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Resolve a postal code to the administrative region of its first place.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request fails or the response carries no
    /// usable region.
    async fn region_for(&self, country: &str, postal_code: &str) -> Result<String, PortError>;
}

#[async_trait]
/// Append-only sink for created appointments.
pub trait AppointmentStore: Send + Sync {
    /// Record an appointment.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the backend rejects the write.
    async fn append(&self, appointment: Appointment) -> Result<(), PortError>;
}
