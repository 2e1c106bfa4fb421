//! Technician filtering by appliance, skill, and region coverage.

use serde::{Deserialize, Serialize};

use crate::directory::TechnicianDirectory;
use crate::model::Technician;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Matching policy.
pub enum MatchMode {
    /// Appliance, skill, and region must all match; every candidate is returned.
    #[default]
    Strict,
    /// Appliance and region must match, skill is ignored; stops at the first hit.
    Lenient,
}

#[derive(Debug, Clone, Copy)]
/// What a request needs from a technician.
pub struct MatchCriteria<'a> {
    /// Appliance type token.
    pub appliance_type: &'a str,
    /// Inferred skill token.
    pub skill: &'a str,
    /// Resolved region label.
    pub region: &'a str,
}

/// Filters a directory according to a [`MatchMode`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TechnicianMatcher {
    mode: MatchMode,
}

impl TechnicianMatcher {
    /// Matcher using `mode`.
    #[must_use]
    pub fn new(mode: MatchMode) -> Self {
        Self { mode }
    }

    /// Active policy.
    #[must_use]
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Qualifying technicians in directory order.
    ///
    /// Availability is not considered here.
    #[must_use]
    pub fn candidates<'d>(
        &self,
        directory: &'d TechnicianDirectory,
        criteria: &MatchCriteria<'_>,
    ) -> Vec<&'d Technician> {
        let mut matches = directory
            .iter()
            .filter(|technician| self.qualifies(technician, criteria));

        match self.mode {
            MatchMode::Strict => matches.collect(),
            MatchMode::Lenient => matches.next().into_iter().collect(),
        }
    }

    fn qualifies(&self, technician: &Technician, criteria: &MatchCriteria<'_>) -> bool {
        let covers = technician.appliances.contains(criteria.appliance_type)
            && technician.regions.contains(criteria.region);

        match self.mode {
            MatchMode::Strict => covers && technician.skills.contains(criteria.skill),
            MatchMode::Lenient => covers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::ReferenceData;

    fn directory() -> TechnicianDirectory {
        ReferenceData::builtin().expect("builtin").into_parts().0
    }

    fn ids(technicians: &[&Technician]) -> Vec<String> {
        technicians.iter().map(|tech| tech.id.0.clone()).collect()
    }

    #[test]
    fn strict_requires_skill_as_well() {
        let directory = directory();
        let criteria = MatchCriteria {
            appliance_type: "AC",
            skill: "ac_leak",
            region: "South",
        };
        let found = TechnicianMatcher::new(MatchMode::Strict).candidates(&directory, &criteria);
        assert_eq!(ids(&found), ["tech_01"]);
        assert_eq!(found.first().map(|tech| tech.name.as_str()), Some("Asha K"));
    }

    #[test]
    fn strict_returns_every_candidate_in_directory_order() {
        let directory = directory();
        let criteria = MatchCriteria {
            appliance_type: "TV",
            skill: "tv_display",
            region: "Central",
        };
        let found = TechnicianMatcher::new(MatchMode::Strict).candidates(&directory, &criteria);
        assert_eq!(ids(&found), ["tech_02"]);

        let criteria = MatchCriteria {
            appliance_type: "WashingMachine",
            skill: "wm_vibration",
            region: "Central",
        };
        let found = TechnicianMatcher::new(MatchMode::Strict).candidates(&directory, &criteria);
        assert_eq!(ids(&found), ["tech_01", "tech_06"]);
    }

    #[test]
    fn lenient_ignores_skill_and_short_circuits() {
        let directory = directory();
        let criteria = MatchCriteria {
            appliance_type: "AC",
            skill: "not_a_skill",
            region: "South",
        };
        let found = TechnicianMatcher::new(MatchMode::Lenient).candidates(&directory, &criteria);
        // tech_03 also covers AC in the South but comes later.
        assert_eq!(ids(&found), ["tech_01"]);
    }

    #[test]
    fn no_candidate_for_unsupported_appliance() {
        let directory = directory();
        let criteria = MatchCriteria {
            appliance_type: "Dishwasher",
            skill: "dishwasher",
            region: "South",
        };
        for mode in [MatchMode::Strict, MatchMode::Lenient] {
            assert!(
                TechnicianMatcher::new(mode)
                    .candidates(&directory, &criteria)
                    .is_empty(),
                "{mode:?} should find nobody"
            );
        }
    }

    #[test]
    fn default_mode_is_strict() {
        assert_eq!(TechnicianMatcher::default().mode(), MatchMode::Strict);
    }
}
