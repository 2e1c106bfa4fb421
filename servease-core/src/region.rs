//! Postal code to region label resolution with a local fallback table.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use crate::directory::RegionTable;
use crate::ports::{PortError, RegionLookupPort};

/// Label returned when neither the lookup nor the fallback table knows the code.
pub const UNKNOWN_REGION: &str = "Unknown Region";

/// Default deadline for the external lookup.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// Where a region label came from.
pub enum RegionSource {
    /// External geocoding service.
    Lookup,
    /// Local postal prefix table.
    Fallback,
    /// Nothing matched; the label is [`UNKNOWN_REGION`].
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A resolved region label and its provenance.
pub struct ResolvedRegion {
    /// Region label used for technician coverage.
    pub label: String,
    /// Provenance of the label.
    pub source: RegionSource,
}

/// Resolves postal codes, preferring the external lookup and never failing.
pub struct RegionResolver {
    lookup: Option<Arc<dyn RegionLookupPort>>,
    fallback: RegionTable,
    country: String,
    timeout: Duration,
}

impl RegionResolver {
    /// Resolver that queries `lookup` first and falls back to `fallback`.
    #[must_use]
    pub fn new(
        lookup: Arc<dyn RegionLookupPort>,
        fallback: RegionTable,
        country: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            lookup: Some(lookup),
            fallback,
            country: country.into(),
            timeout,
        }
    }

    /// Resolver that only consults the local table.
    #[must_use]
    pub fn offline(fallback: RegionTable) -> Self {
        Self {
            lookup: None,
            fallback,
            country: String::new(),
            timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    /// Resolve a postal code to a region label.
    ///
    /// Lookup failures of any kind fall through to the prefix table exactly
    /// once; an unmatched code yields [`UNKNOWN_REGION`].
    pub async fn resolve(&self, postal_code: &str) -> ResolvedRegion {
        let postal_code = postal_code.trim();

        if let Some(lookup) = self.lookup.as_deref()
            && !postal_code.is_empty()
        {
            match self.query(lookup, postal_code).await {
                Ok(label) => {
                    debug!(postal_code, %label, lookup = lookup.name(), "Region resolved by lookup");
                    return ResolvedRegion {
                        label,
                        source: RegionSource::Lookup,
                    };
                }
                Err(err) => {
                    warn!(
                        postal_code,
                        lookup = lookup.name(),
                        error = %err,
                        "Region lookup unavailable, using fallback table"
                    );
                }
            }
        }

        self.from_table(postal_code)
    }

    fn from_table(&self, postal_code: &str) -> ResolvedRegion {
        if let Some(label) = self.fallback.label_for(postal_code) {
            debug!(postal_code, label, "Region resolved by fallback table");
            return ResolvedRegion {
                label: label.to_owned(),
                source: RegionSource::Fallback,
            };
        }

        warn!(postal_code, "No fallback region for postal code");
        ResolvedRegion {
            label: UNKNOWN_REGION.to_owned(),
            source: RegionSource::Unknown,
        }
    }

    async fn query(
        &self,
        lookup: &dyn RegionLookupPort,
        postal_code: &str,
    ) -> Result<String, PortError> {
        let label = tokio::time::timeout(self.timeout, lookup.region_for(&self.country, postal_code))
            .await
            .map_err(|_elapsed| PortError::Timeout(self.timeout.as_millis()))??;

        let label = label.trim();
        if label.is_empty() {
            return Err(PortError::Malformed("empty region name".to_owned()));
        }
        Ok(label.to_owned())
    }
}
