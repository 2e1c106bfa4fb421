//! Appointment window selection.
//!
//! Preferred windows are scanned in the customer's order, each against the
//! technician's windows in registration order, and the first strictly
//! positive overlap is taken as-is. When nothing overlaps, the technician's
//! first window is offered unchanged.

use serde::Serialize;
use tracing::{debug, warn};

use crate::model::{Technician, TimeWindow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// How a slot was chosen.
pub enum SlotSource {
    /// Overlap of a preferred window and an availability window.
    Intersection,
    /// Technician's first availability window.
    FirstAvailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// Selected appointment window.
pub struct AllocatedSlot {
    /// Assigned window.
    pub window: TimeWindow,
    /// How the window was chosen.
    pub source: SlotSource,
}

/// Pick a window for `technician` given the customer's `preferred` windows.
///
/// Returns `None` only when the technician has no availability at all.
#[must_use]
pub fn allocate_slot(technician: &Technician, preferred: &[TimeWindow]) -> Option<AllocatedSlot> {
    let overlap = preferred.iter().find_map(|wanted| {
        technician
            .availability
            .iter()
            .find_map(|open| wanted.intersect(open))
    });

    if let Some(window) = overlap {
        return Some(AllocatedSlot {
            window,
            source: SlotSource::Intersection,
        });
    }

    if preferred.is_empty() {
        debug!(technician = %technician.id, "No preferred windows, offering first availability");
    } else {
        warn!(
            technician = %technician.id,
            preferred = preferred.len(),
            "No overlap with preferred windows, offering first availability"
        );
    }
    technician.availability.first().map(|window| AllocatedSlot {
        window: *window,
        source: SlotSource::FirstAvailable,
    })
}
