//! Domain data structures for customers, jobs, technicians, and appointments.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A window whose start is not strictly before its end.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid time window: start {start} is not before end {end}")]
pub struct WindowError {
    /// Offending start instant.
    pub start: DateTime<FixedOffset>,
    /// Offending end instant.
    pub end: DateTime<FixedOffset>,
}

#[derive(Debug, Deserialize)]
struct RawWindow {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
}

/// Half-open time interval `[start, end)` with `start < end`.
///
/// Instants keep the offset they were written with; ordering compares the
/// absolute instant, so `10:00+05:30` and `04:30Z` are the same point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct TimeWindow {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
}

impl TimeWindow {
    /// Build a window.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError`] when `start` is not strictly before `end`.
    pub fn new(
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Result<Self, WindowError> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(WindowError { start, end })
        }
    }

    /// Inclusive start instant.
    #[must_use]
    pub fn start(&self) -> DateTime<FixedOffset> {
        self.start
    }

    /// Exclusive end instant.
    #[must_use]
    pub fn end(&self) -> DateTime<FixedOffset> {
        self.end
    }

    /// Overlap of two windows, or `None` when they are disjoint or only touch.
    ///
    /// The result takes the later start and the earlier end, each with the
    /// offset of the window it came from.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let latest_start = self.start.max(other.start);
        let earliest_end = self.end.min(other.end);
        (latest_start < earliest_end).then_some(Self {
            start: latest_start,
            end: earliest_end,
        })
    }
}

impl TryFrom<RawWindow> for TimeWindow {
    type Error = WindowError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "[{}, {})",
            self.start.to_rfc3339(),
            self.end.to_rfc3339()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Customer submitting a request.
pub struct Customer {
    /// Full name.
    pub full_name: String,
    /// Contact phone number.
    pub phone: String,
    /// Contact email address.
    pub email: String,
    /// Free-form street address.
    pub address_text: String,
    /// Postal code used to resolve the service region.
    #[serde(alias = "pincode")]
    pub postal_code: String,
    /// Preferred windows in order of preference.
    #[serde(default, alias = "preferred_time_slots")]
    pub preferred_windows: Vec<TimeWindow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Kind of work requested.
pub enum RequestType {
    /// Repair of an installed appliance.
    Service,
    /// Installation of a new appliance.
    Installation,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// How soon the customer needs a visit.
pub enum Urgency {
    /// Regular scheduling.
    #[default]
    Normal,
    /// Customer flagged the request as urgent.
    Urgent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Work order attached to a request.
pub struct Job {
    /// Service or installation.
    pub request_type: RequestType,
    /// Appliance token such as `AC` or `WashingMachine`.
    pub appliance_type: String,
    /// Model name when the customer knows it.
    #[serde(default, alias = "model_if_known")]
    pub model: Option<String>,
    /// Reported fault symptom tokens, empty for installations.
    #[serde(default)]
    pub fault_symptoms: Vec<String>,
    /// Installation detail tokens.
    #[serde(default)]
    pub installation_details: Vec<String>,
    /// Requested urgency.
    #[serde(default)]
    pub urgency: Urgency,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
/// Identifier of a technician.
pub struct TechnicianId(pub String);

impl fmt::Display for TechnicianId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Field technician record.
pub struct Technician {
    /// Unique identifier.
    pub id: TechnicianId,
    /// Display name.
    pub name: String,
    /// Skill tokens the technician is qualified for.
    pub skills: BTreeSet<String>,
    /// Appliance types the technician works on.
    #[serde(alias = "appliances_supported")]
    pub appliances: BTreeSet<String>,
    /// Region labels the technician covers.
    pub regions: BTreeSet<String>,
    /// Open windows in the order they were registered.
    #[serde(default, alias = "availability_slots")]
    pub availability: Vec<TimeWindow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Postal prefix fallback entry, e.g. `560xxx` → `Bengaluru Urban`.
///
/// Trailing `x` characters are wildcards.
pub struct RegionEntry {
    /// Prefix pattern.
    #[serde(alias = "pincode_prefix")]
    pub postal_prefix: String,
    /// Label returned on match.
    pub region_label: String,
}

impl RegionEntry {
    /// Literal part of the prefix before any wildcard.
    #[must_use]
    pub fn literal_prefix(&self) -> &str {
        self.postal_prefix.trim_end_matches(['x', 'X'])
    }

    /// Whether the postal code falls under this entry.
    #[must_use]
    pub fn matches(&self, postal_code: &str) -> bool {
        let literal = self.literal_prefix();
        !literal.is_empty() && postal_code.trim().starts_with(literal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Outcome of a request.
pub enum AppointmentStatus {
    /// Technician and window assigned.
    Confirmed,
    /// Recorded without a full assignment.
    Pending,
    /// No technician could take the request.
    NotFound,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::NotFound => "not_found",
        };
        write!(formatter, "{tag}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Immutable result of a scheduling request.
pub struct Appointment {
    /// Customer as submitted.
    pub customer: Customer,
    /// Job as submitted.
    pub job: Job,
    /// Resolved region label.
    pub region_label: String,
    /// Assigned technician id.
    pub technician_id: Option<TechnicianId>,
    /// Assigned technician display name.
    pub technician_name: Option<String>,
    /// Assigned window.
    pub slot: Option<TimeWindow>,
    /// Final status.
    pub status: AppointmentStatus,
}
