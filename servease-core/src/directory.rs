//! Read-only reference data loaded once at startup.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::model::{RegionEntry, Technician, TechnicianId};

const BUILTIN_REFERENCE: &str = include_str!("../data/reference.json");

#[derive(thiserror::Error, Debug)]
/// Problems found while loading reference data.
pub enum ReferenceDataError {
    /// The document is not valid reference JSON.
    #[error("Failed to parse reference data: {0}")]
    Parse(#[from] serde_json::Error),
    /// Two technicians share an id.
    #[error("Duplicate technician id: {0}")]
    DuplicateTechnician(TechnicianId),
    /// A fallback entry has nothing to match on.
    #[error("Region '{0}' has an empty postal prefix")]
    EmptyPrefix(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Technicians plus the postal fallback table, as shipped in configuration.
pub struct ReferenceData {
    /// Technicians in registration order.
    pub technicians: Vec<Technician>,
    /// Postal prefix table in priority order.
    #[serde(default)]
    pub regions: Vec<RegionEntry>,
}

impl ReferenceData {
    /// Parse and validate a JSON reference document.
    ///
    /// # Errors
    ///
    /// Returns a [`ReferenceDataError`] when the JSON is malformed or breaks a
    /// directory invariant.
    pub fn from_json(raw: &str) -> Result<Self, ReferenceDataError> {
        let data: Self = serde_json::from_str(raw)?;
        data.validate()?;
        Ok(data)
    }

    /// Six technicians and three metro regions bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns a [`ReferenceDataError`] if the bundled document is corrupt.
    pub fn builtin() -> Result<Self, ReferenceDataError> {
        Self::from_json(BUILTIN_REFERENCE)
    }

    fn validate(&self) -> Result<(), ReferenceDataError> {
        let mut seen = HashSet::with_capacity(self.technicians.len());
        for technician in &self.technicians {
            if !seen.insert(&technician.id) {
                return Err(ReferenceDataError::DuplicateTechnician(
                    technician.id.clone(),
                ));
            }
        }
        if let Some(entry) = self
            .regions
            .iter()
            .find(|entry| entry.literal_prefix().is_empty())
        {
            return Err(ReferenceDataError::EmptyPrefix(entry.region_label.clone()));
        }
        Ok(())
    }

    /// Split into the two read-only lookup structures.
    #[must_use]
    pub fn into_parts(self) -> (TechnicianDirectory, RegionTable) {
        (
            TechnicianDirectory::new(self.technicians),
            RegionTable::new(self.regions),
        )
    }
}

/// Ordered, queryable set of technicians.
#[derive(Debug, Clone, Default)]
pub struct TechnicianDirectory {
    technicians: Vec<Technician>,
    by_id: HashMap<TechnicianId, usize>,
}

impl TechnicianDirectory {
    /// Build a directory; iteration follows the given order.
    ///
    /// When ids repeat, [`Self::get`] returns the first registration.
    #[must_use]
    pub fn new(technicians: Vec<Technician>) -> Self {
        let mut by_id = HashMap::with_capacity(technicians.len());
        for (position, technician) in technicians.iter().enumerate() {
            by_id.entry(technician.id.clone()).or_insert(position);
        }
        Self { technicians, by_id }
    }

    /// Iterator in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Technician> {
        self.technicians.iter()
    }

    /// Look up a technician by id.
    #[must_use]
    pub fn get(&self, id: &TechnicianId) -> Option<&Technician> {
        self.by_id
            .get(id)
            .and_then(|position| self.technicians.get(*position))
    }

    /// Number of technicians.
    #[must_use]
    pub fn len(&self) -> usize {
        self.technicians.len()
    }

    /// Whether the directory has no technicians.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.technicians.is_empty()
    }

    /// Distinct appliance types supported by anyone, sorted.
    #[must_use]
    pub fn appliance_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self
            .technicians
            .iter()
            .flat_map(|technician| technician.appliances.iter().map(String::as_str))
            .collect();
        types.sort_unstable();
        types.dedup();
        types
    }
}

/// Postal prefix fallback table.
#[derive(Debug, Clone, Default)]
pub struct RegionTable {
    entries: Vec<RegionEntry>,
}

impl RegionTable {
    /// Build a table; order decides ties between equally long prefixes.
    #[must_use]
    pub fn new(entries: Vec<RegionEntry>) -> Self {
        Self { entries }
    }

    /// Label of the longest matching prefix, first entry winning ties.
    #[must_use]
    pub fn label_for(&self, postal_code: &str) -> Option<&str> {
        let mut best: Option<&RegionEntry> = None;
        for entry in self.entries.iter().filter(|entry| entry.matches(postal_code)) {
            let longer = best.is_none_or(|current| {
                entry.literal_prefix().len() > current.literal_prefix().len()
            });
            if longer {
                best = Some(entry);
            }
        }
        best.map(|entry| entry.region_label.as_str())
    }

    /// Entries in table order.
    #[must_use]
    pub fn entries(&self) -> &[RegionEntry] {
        &self.entries
    }
}
