//! Skill token inference from job details.

use crate::model::Job;

/// Skill token a technician needs for `job`.
///
/// Only the first fault symptom is consulted, verbatim; later symptoms do not
/// influence matching. Jobs without symptoms (installations, typically) fall
/// back to the lowercased appliance type.
#[must_use]
pub fn infer_skill(job: &Job) -> String {
    job.fault_symptoms
        .first()
        .cloned()
        .unwrap_or_else(|| job.appliance_type.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RequestType, Urgency};

    fn job(appliance: &str, symptoms: &[&str]) -> Job {
        Job {
            request_type: if symptoms.is_empty() {
                RequestType::Installation
            } else {
                RequestType::Service
            },
            appliance_type: appliance.to_owned(),
            model: None,
            fault_symptoms: symptoms.iter().map(|symptom| (*symptom).to_owned()).collect(),
            installation_details: Vec::new(),
            urgency: Urgency::Normal,
        }
    }

    #[test]
    fn first_symptom_wins_and_later_ones_are_ignored() {
        let job = job("WashingMachine", &["wm_vibration", "wm_drum"]);
        assert_eq!(infer_skill(&job), "wm_vibration");
    }

    #[test]
    fn symptom_is_not_normalized() {
        let job = job("AC", &["AC_Leak"]);
        assert_eq!(infer_skill(&job), "AC_Leak");
    }

    #[test]
    fn installation_uses_lowercased_appliance() {
        let job = job("WaterPurifier", &[]);
        assert_eq!(infer_skill(&job), "waterpurifier");
    }
}
