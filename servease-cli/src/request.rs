use std::fs;
use std::io::{self, Read as _};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use servease_core::{Appointment, AppointmentStatus, Customer, Job};

/// Body of a "create appointment" call.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AppointmentRequest {
    pub customer: Customer,
    pub job: Job,
}

/// Document written to stdout.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum AppointmentResponse {
    Created {
        appointment: Appointment,
    },
    Rejected {
        status: AppointmentStatus,
        error: String,
    },
}

pub(crate) fn read_request(source: &Path) -> Result<AppointmentRequest> {
    let raw = if source == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read request from stdin")?;
        buffer
    } else {
        fs::read_to_string(source)
            .with_context(|| format!("Failed to read request {}", source.display()))?
    };

    serde_json::from_str(&raw).context("Request is not a valid appointment request")
}
