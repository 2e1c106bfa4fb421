//! Appointment assembly.

use serde::{Deserialize, Serialize};

use crate::error::SchedulingError;
use crate::matcher::MatchCriteria;
use crate::model::{Appointment, AppointmentStatus, Customer, Job, Technician, TimeWindow};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// What to do when no technician qualifies.
pub enum UnmatchedPolicy {
    /// Fail with [`SchedulingError::NoTechnicianMatch`]; nothing is recorded.
    #[default]
    Reject,
    /// Record a `pending` appointment with empty technician fields.
    Pending,
}

/// Builds appointments from the pipeline's results.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppointmentBuilder {
    unmatched: UnmatchedPolicy,
}

impl AppointmentBuilder {
    /// Builder applying `unmatched` when nobody qualifies.
    #[must_use]
    pub fn new(unmatched: UnmatchedPolicy) -> Self {
        Self { unmatched }
    }

    /// Assemble the appointment record.
    ///
    /// A technician with a slot is `confirmed`. A technician without any
    /// availability is `pending` with an empty slot.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulingError::NoTechnicianMatch`] when `technician` is
    /// `None` and the policy is [`UnmatchedPolicy::Reject`].
    pub fn build(
        &self,
        customer: &Customer,
        job: &Job,
        criteria: &MatchCriteria<'_>,
        technician: Option<&Technician>,
        slot: Option<TimeWindow>,
    ) -> Result<Appointment, SchedulingError> {
        let Some(technician) = technician else {
            return match self.unmatched {
                UnmatchedPolicy::Reject => Err(SchedulingError::NoTechnicianMatch {
                    appliance_type: criteria.appliance_type.to_owned(),
                    skill: criteria.skill.to_owned(),
                    region: criteria.region.to_owned(),
                }),
                UnmatchedPolicy::Pending => Ok(Appointment {
                    customer: customer.clone(),
                    job: job.clone(),
                    region_label: criteria.region.to_owned(),
                    technician_id: None,
                    technician_name: None,
                    slot: None,
                    status: AppointmentStatus::Pending,
                }),
            };
        };

        let status = if slot.is_some() {
            AppointmentStatus::Confirmed
        } else {
            AppointmentStatus::Pending
        };

        Ok(Appointment {
            customer: customer.clone(),
            job: job.clone(),
            region_label: criteria.region.to_owned(),
            technician_id: Some(technician.id.clone()),
            technician_name: Some(technician.name.clone()),
            slot,
            status,
        })
    }
}
