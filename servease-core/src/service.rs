//! High-level service facade wiring the assignment pipeline together.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::appointment::{AppointmentBuilder, UnmatchedPolicy};
use crate::directory::{RegionTable, TechnicianDirectory};
use crate::error::SchedulingError;
use crate::matcher::{MatchCriteria, MatchMode, TechnicianMatcher};
use crate::model::{Appointment, Customer, Job};
use crate::ports::{AppointmentStore, RegionLookupPort};
use crate::region::RegionResolver;
use crate::skill::infer_skill;
use crate::slot::allocate_slot;

const DEFAULT_COUNTRY: &str = "IN";
const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 2_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Tunables of the scheduling pipeline.
pub struct SchedulingOptions {
    /// Technician matching policy.
    pub match_mode: MatchMode,
    /// Handling of requests nobody can take.
    pub unmatched: UnmatchedPolicy,
    /// Country code sent to the region lookup.
    pub country: String,
    /// Deadline for the region lookup in milliseconds.
    pub lookup_timeout_ms: u64,
}

impl Default for SchedulingOptions {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::default(),
            unmatched: UnmatchedPolicy::default(),
            country: DEFAULT_COUNTRY.to_owned(),
            lookup_timeout_ms: DEFAULT_LOOKUP_TIMEOUT_MS,
        }
    }
}

impl SchedulingOptions {
    /// Lookup deadline as a [`Duration`].
    #[must_use]
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }
}

/// Public entry point for creating appointments.
pub struct SchedulingService {
    directory: Arc<TechnicianDirectory>,
    resolver: RegionResolver,
    matcher: TechnicianMatcher,
    builder: AppointmentBuilder,
    store: Arc<dyn AppointmentStore>,
}

impl SchedulingService {
    /// Service over the given reference data.
    ///
    /// Without a `lookup`, regions come from `regions` alone.
    #[must_use]
    pub fn new(
        directory: Arc<TechnicianDirectory>,
        regions: RegionTable,
        lookup: Option<Arc<dyn RegionLookupPort>>,
        store: Arc<dyn AppointmentStore>,
        options: &SchedulingOptions,
    ) -> Self {
        let resolver = match lookup {
            Some(lookup) => RegionResolver::new(
                lookup,
                regions,
                options.country.clone(),
                options.lookup_timeout(),
            ),
            None => RegionResolver::offline(regions),
        };

        Self {
            directory,
            resolver,
            matcher: TechnicianMatcher::new(options.match_mode),
            builder: AppointmentBuilder::new(options.unmatched),
            store,
        }
    }

    /// Technicians this service assigns from.
    #[must_use]
    pub fn directory(&self) -> &TechnicianDirectory {
        &self.directory
    }

    /// Resolve, match, allocate, build, and store one appointment.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulingError::NoTechnicianMatch`] when nobody qualifies and
    /// unmatched requests are rejected, or [`SchedulingError::Store`] when the
    /// store refuses the record.
    pub async fn create_appointment(
        &self,
        customer: &Customer,
        job: &Job,
    ) -> Result<Appointment, SchedulingError> {
        let region = self.resolver.resolve(&customer.postal_code).await;
        let skill = infer_skill(job);
        let criteria = MatchCriteria {
            appliance_type: &job.appliance_type,
            skill: &skill,
            region: &region.label,
        };
        debug!(
            appliance_type = criteria.appliance_type,
            skill = criteria.skill,
            region = criteria.region,
            region_source = ?region.source,
            mode = ?self.matcher.mode(),
            "Matching technicians"
        );

        let candidates = self.matcher.candidates(&self.directory, &criteria);
        let technician = candidates.first().copied();
        if technician.is_none() {
            warn!(
                appliance_type = criteria.appliance_type,
                skill = criteria.skill,
                region = criteria.region,
                "No technician matches request"
            );
        }

        let slot = technician.and_then(|tech| allocate_slot(tech, &customer.preferred_windows));
        let appointment = self.builder.build(
            customer,
            job,
            &criteria,
            technician,
            slot.map(|allocated| allocated.window),
        )?;

        self.store.append(appointment.clone()).await?;

        info!(
            status = %appointment.status,
            technician = ?appointment.technician_id,
            slot = ?slot.map(|allocated| allocated.window.to_string()),
            slot_source = ?slot.map(|allocated| allocated.source),
            candidates = candidates.len(),
            "Appointment created"
        );

        Ok(appointment)
    }
}
