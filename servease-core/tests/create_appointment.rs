use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use servease_core::{
    AppointmentStatus, AppointmentStore, Customer, InMemoryAppointmentStore, Job, MatchMode,
    PortError, ReferenceData, RegionLookupPort, RequestType, SchedulingError, SchedulingOptions,
    SchedulingService, TechnicianId, TimeWindow, UNKNOWN_REGION, UnmatchedPolicy, Urgency,
};

struct UnreachableLookup;

#[async_trait]
impl RegionLookupPort for UnreachableLookup {
    fn name(&self) -> &str {
        "unreachable"
    }

    async fn region_for(&self, _country: &str, _postal_code: &str) -> Result<String, PortError> {
        Err(PortError::Internal("connection refused".to_owned()))
    }
}

struct StalledLookup;

#[async_trait]
impl RegionLookupPort for StalledLookup {
    fn name(&self) -> &str {
        "stalled"
    }

    async fn region_for(&self, _country: &str, _postal_code: &str) -> Result<String, PortError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok("Karnataka".to_owned())
    }
}

struct StateLookup(&'static str);

#[async_trait]
impl RegionLookupPort for StateLookup {
    fn name(&self) -> &str {
        "state"
    }

    async fn region_for(&self, _country: &str, _postal_code: &str) -> Result<String, PortError> {
        Ok(self.0.to_owned())
    }
}

struct BrokenStore;

#[async_trait]
impl AppointmentStore for BrokenStore {
    async fn append(&self, _appointment: servease_core::Appointment) -> Result<(), PortError> {
        Err(PortError::Storage("read-only".to_owned()))
    }
}

fn window(start: &str, end: &str) -> TimeWindow {
    TimeWindow::new(
        DateTime::parse_from_rfc3339(start).expect("start"),
        DateTime::parse_from_rfc3339(end).expect("end"),
    )
    .expect("ordered window")
}

fn customer(postal_code: &str, preferred_windows: Vec<TimeWindow>) -> Customer {
    Customer {
        full_name: "Meera R".to_owned(),
        phone: "+91-9000000000".to_owned(),
        email: "meera@example.com".to_owned(),
        address_text: "12 MG Road, Bengaluru".to_owned(),
        postal_code: postal_code.to_owned(),
        preferred_windows,
    }
}

fn service_job(appliance: &str, symptoms: &[&str]) -> Job {
    Job {
        request_type: RequestType::Service,
        appliance_type: appliance.to_owned(),
        model: Some("WM-7000".to_owned()),
        fault_symptoms: symptoms.iter().map(|symptom| (*symptom).to_owned()).collect(),
        installation_details: Vec::new(),
        urgency: Urgency::Normal,
    }
}

fn service(
    lookup: Option<Arc<dyn RegionLookupPort>>,
    store: Arc<dyn AppointmentStore>,
    options: &SchedulingOptions,
) -> SchedulingService {
    let (directory, regions) = ReferenceData::builtin()
        .expect("builtin reference data")
        .into_parts();
    SchedulingService::new(Arc::new(directory), regions, lookup, store, options)
}

#[tokio::test]
async fn bengaluru_washing_machine_is_confirmed_with_asha() {
    let store = Arc::new(InMemoryAppointmentStore::new());
    let service = service(
        Some(Arc::new(UnreachableLookup)),
        Arc::clone(&store) as Arc<dyn AppointmentStore>,
        &SchedulingOptions::default(),
    );
    let customer = customer(
        "560001",
        vec![window("2025-09-20T11:00:00+05:30", "2025-09-20T13:00:00+05:30")],
    );
    let job = service_job("WashingMachine", &["wm_vibration"]);

    let appointment = service
        .create_appointment(&customer, &job)
        .await
        .expect("appointment");

    assert_eq!(appointment.region_label, "Bengaluru Urban");
    assert_eq!(
        appointment.technician_id,
        Some(TechnicianId("tech_01".to_owned()))
    );
    assert_eq!(appointment.technician_name.as_deref(), Some("Asha K"));
    assert_eq!(appointment.status, AppointmentStatus::Confirmed);
    assert_eq!(
        appointment.slot,
        Some(window("2025-09-20T11:00:00+05:30", "2025-09-20T12:00:00+05:30"))
    );
    assert_eq!(store.snapshot(), vec![appointment]);
}

#[tokio::test]
async fn outer_bengaluru_pincode_still_reaches_asha() {
    let service = service(
        Some(Arc::new(UnreachableLookup)),
        Arc::new(InMemoryAppointmentStore::new()),
        &SchedulingOptions::default(),
    );
    let job = service_job("WashingMachine", &["wm_vibration"]);

    let appointment = service
        .create_appointment(&customer("560103", Vec::new()), &job)
        .await
        .expect("appointment");

    assert_eq!(appointment.region_label, "Bengaluru Urban");
    assert_eq!(
        appointment.technician_id,
        Some(TechnicianId("tech_01".to_owned()))
    );
    assert_eq!(appointment.status, AppointmentStatus::Confirmed);
}

#[tokio::test]
async fn stalled_lookup_is_cut_off_and_falls_back() {
    let options = SchedulingOptions {
        lookup_timeout_ms: 50,
        ..SchedulingOptions::default()
    };
    let service = service(
        Some(Arc::new(StalledLookup)),
        Arc::new(InMemoryAppointmentStore::new()),
        &options,
    );
    let job = service_job("WashingMachine", &["wm_vibration"]);

    let appointment = tokio::time::timeout(
        Duration::from_secs(5),
        service.create_appointment(&customer("560034", Vec::new()), &job),
    )
    .await
    .expect("pipeline finished within the deadline")
    .expect("appointment");

    assert_eq!(appointment.region_label, "Bengaluru Urban");
    // No preference given: Asha's first window verbatim.
    assert_eq!(
        appointment.slot,
        Some(window("2025-09-20T10:00:00+05:30", "2025-09-20T12:00:00+05:30"))
    );
}

#[tokio::test]
async fn lookup_region_is_used_verbatim() {
    let service = service(
        Some(Arc::new(StateLookup("Central"))),
        Arc::new(InMemoryAppointmentStore::new()),
        &SchedulingOptions::default(),
    );
    let job = service_job("WaterPurifier", &["waterpurifier_filter"]);

    let appointment = service
        .create_appointment(&customer("452001", Vec::new()), &job)
        .await
        .expect("appointment");

    assert_eq!(appointment.region_label, "Central");
    assert_eq!(
        appointment.technician_id,
        Some(TechnicianId("tech_06".to_owned()))
    );
}

#[tokio::test]
async fn unsupported_appliance_is_rejected_by_default() {
    let store = Arc::new(InMemoryAppointmentStore::new());
    let service = service(
        Some(Arc::new(UnreachableLookup)),
        Arc::clone(&store) as Arc<dyn AppointmentStore>,
        &SchedulingOptions::default(),
    );
    let job = service_job("Dishwasher", &[]);

    let err = service
        .create_appointment(&customer("560001", Vec::new()), &job)
        .await
        .expect_err("no technician");

    match err {
        SchedulingError::NoTechnicianMatch {
            appliance_type,
            skill,
            region,
        } => {
            assert_eq!(appliance_type, "Dishwasher");
            assert_eq!(skill, "dishwasher");
            assert_eq!(region, "Bengaluru Urban");
        }
        other @ SchedulingError::Store(_) => panic!("unexpected error: {other}"),
    }
    assert!(store.is_empty(), "rejected requests are not recorded");
}

#[tokio::test]
async fn unsupported_appliance_is_pending_when_configured() {
    let store = Arc::new(InMemoryAppointmentStore::new());
    let options = SchedulingOptions {
        unmatched: UnmatchedPolicy::Pending,
        ..SchedulingOptions::default()
    };
    let service = service(
        None,
        Arc::clone(&store) as Arc<dyn AppointmentStore>,
        &options,
    );
    let job = service_job("Dishwasher", &[]);

    let appointment = service
        .create_appointment(&customer("999999", Vec::new()), &job)
        .await
        .expect("pending appointment");

    assert_eq!(appointment.status, AppointmentStatus::Pending);
    assert_eq!(appointment.region_label, UNKNOWN_REGION);
    assert_eq!(appointment.technician_id, None);
    assert_eq!(appointment.slot, None);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn lenient_mode_ignores_the_symptom() {
    let options = SchedulingOptions {
        match_mode: MatchMode::Lenient,
        ..SchedulingOptions::default()
    };
    let service = service(
        Some(Arc::new(StateLookup("West"))),
        Arc::new(InMemoryAppointmentStore::new()),
        &options,
    );
    // Nobody in the West lists this skill, but Priya covers AC there.
    let job = service_job("AC", &["ac_compressor_noise"]);

    let appointment = service
        .create_appointment(&customer("400050", Vec::new()), &job)
        .await
        .expect("appointment");

    assert_eq!(
        appointment.technician_id,
        Some(TechnicianId("tech_03".to_owned()))
    );
    assert_eq!(appointment.status, AppointmentStatus::Confirmed);
}

#[tokio::test]
async fn store_failure_is_surfaced() {
    let service = service(None, Arc::new(BrokenStore), &SchedulingOptions::default());
    let job = service_job("WashingMachine", &["wm_vibration"]);

    let err = service
        .create_appointment(&customer("560001", Vec::new()), &job)
        .await
        .expect_err("store refused");

    assert!(matches!(err, SchedulingError::Store(PortError::Storage(_))));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn concurrent_requests_all_land_in_the_store() {
    let store = Arc::new(InMemoryAppointmentStore::new());
    let service = Arc::new(service(
        Some(Arc::new(UnreachableLookup)),
        Arc::clone(&store) as Arc<dyn AppointmentStore>,
        &SchedulingOptions::default(),
    ));

    let mut handles = Vec::new();
    for postal_code in ["560001", "560002", "560003", "560004", "560005", "560006"] {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            let job = service_job("AC", &["ac_leak"]);
            service
                .create_appointment(&customer(postal_code, Vec::new()), &job)
                .await
        }));
    }
    for handle in handles {
        let appointment = handle.await.expect("task").expect("appointment");
        assert_eq!(appointment.status, AppointmentStatus::Confirmed);
    }

    let mut recorded: Vec<String> = store
        .snapshot()
        .into_iter()
        .map(|appointment| appointment.customer.postal_code)
        .collect();
    recorded.sort();
    assert_eq!(
        recorded,
        ["560001", "560002", "560003", "560004", "560005", "560006"]
    );
}
