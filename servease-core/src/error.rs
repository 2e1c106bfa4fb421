//! Errors surfaced by the scheduling service.

use crate::model::AppointmentStatus;
use crate::ports::PortError;

#[derive(thiserror::Error, Debug)]
/// Failures a caller of [`crate::service::SchedulingService`] can observe.
pub enum SchedulingError {
    /// No technician satisfies the matching predicate.
    #[error(
        "No technician found for appliance '{appliance_type}' with skill '{skill}' in region '{region}'"
    )]
    NoTechnicianMatch {
        /// Requested appliance type.
        appliance_type: String,
        /// Inferred skill token.
        skill: String,
        /// Resolved region label.
        region: String,
    },
    /// The appointment store rejected the record.
    #[error("Failed to store appointment: {0}")]
    Store(#[from] PortError),
}

impl SchedulingError {
    /// Status the boundary layer reports for this error.
    #[must_use]
    pub fn status(&self) -> Option<AppointmentStatus> {
        match self {
            SchedulingError::NoTechnicianMatch { .. } => Some(AppointmentStatus::NotFound),
            SchedulingError::Store(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_match_carries_retry_context() {
        let err = SchedulingError::NoTechnicianMatch {
            appliance_type: "Dishwasher".to_owned(),
            skill: "dishwasher".to_owned(),
            region: "Delhi".to_owned(),
        };
        let message = err.to_string();
        assert!(message.contains("Dishwasher"), "appliance in message");
        assert!(message.contains("dishwasher"), "skill in message");
        assert!(message.contains("Delhi"), "region in message");
        assert_eq!(err.status(), Some(AppointmentStatus::NotFound));
    }

    #[test]
    fn store_failures_have_no_status() {
        let err = SchedulingError::from(PortError::Storage("disk full".to_owned()));
        assert_eq!(err.status(), None);
    }
}
