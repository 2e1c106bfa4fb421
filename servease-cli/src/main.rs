//! Command line front end for the ServEase scheduler: reads one request and
//! prints the resulting appointment.

mod cli;
mod config;
mod logger;
mod request;

use std::io::{self, Write as _};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use servease_core::{
    AppointmentStore, InMemoryAppointmentStore, RegionLookupPort, SchedulingService,
};
use servease_provider_zippopotam::{self as zippopotam, ZippopotamLookupPort};
use tracing::{info, warn};

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::request::{AppointmentResponse, read_request};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logger::init(cli.verbose, cli.log_format);

    let config = AppConfig::load(cli.config.as_deref())?.with_overrides(&cli);
    let (directory, regions) = config.reference_data()?.into_parts();
    let region_count = regions.entries().len();

    let lookup = if config.lookup.enabled {
        let client = zippopotam::client(config.scheduling.lookup_timeout())?;
        let port: Arc<dyn RegionLookupPort> = Arc::new(ZippopotamLookupPort::new(
            client,
            config.lookup.base_url.as_str(),
        ));
        Some(port)
    } else {
        info!("Region lookup disabled, using fallback table only");
        None
    };

    let store: Arc<dyn AppointmentStore> = Arc::new(InMemoryAppointmentStore::new());
    let service = SchedulingService::new(
        Arc::new(directory),
        regions,
        lookup,
        store,
        &config.scheduling,
    );
    info!(
        technicians = service.directory().len(),
        regions = region_count,
        appliances = ?service.directory().appliance_types(),
        mode = ?config.scheduling.match_mode,
        unmatched = ?config.scheduling.unmatched,
        "Reference data loaded"
    );

    let request = read_request(&cli.request)?;

    let (response, code) = match service
        .create_appointment(&request.customer, &request.job)
        .await
    {
        Ok(appointment) => (
            AppointmentResponse::Created { appointment },
            ExitCode::SUCCESS,
        ),
        Err(err) => {
            let Some(status) = err.status() else {
                return Err(err.into());
            };
            warn!(%status, error = %err, "Request rejected");
            (
                AppointmentResponse::Rejected {
                    status,
                    error: err.to_string(),
                },
                ExitCode::from(2),
            )
        }
    };

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &response)?;
    writeln!(stdout)?;

    Ok(code)
}
