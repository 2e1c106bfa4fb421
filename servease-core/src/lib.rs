//! Core types and service wiring for the ServEase technician scheduler.

/// Appointment assembly and the policy for unmatched requests.
pub mod appointment;
/// Read-only reference data: technician directory and postal fallback table.
pub mod directory;
/// Errors surfaced to callers of the scheduling service.
pub mod error;
/// Technician filtering by appliance, skill, and region.
pub mod matcher;
/// Domain models shared by all crates.
pub mod model;
/// Traits describing the external collaborators.
pub mod ports;
/// Postal code to region label resolution.
pub mod region;
/// High-level service facade used by clients.
pub mod service;
/// Required skill derivation from job details.
pub mod skill;
/// Appointment window selection.
pub mod slot;
/// In-memory appointment store.
pub mod store;

pub use appointment::*;
pub use directory::*;
pub use error::*;
pub use matcher::*;
pub use model::*;
pub use ports::*;
pub use region::*;
pub use service::*;
pub use skill::*;
pub use slot::*;
pub use store::*;
