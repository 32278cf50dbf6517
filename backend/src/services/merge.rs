//! Merges reasoning-service estimates back onto vessel records
//!
//! Correlation is driven solely by the `(vessel_id, nearest_dock)` pair.
//! The nearest dock is recomputed here rather than threaded through from
//! the payload build; `GeoIndex::nearest` is deterministic, so both sides
//! of the round trip agree, and the merger stays testable with nothing but
//! a registry and inputs.

use std::collections::HashMap;
use std::sync::Arc;

use shared::{EnrichedVessel, Eta, EtaEstimate, VesselPosition};

use crate::services::geo::GeoIndex;
use crate::services::payload::round_distance_km;

/// Composite correlation key. A matching vessel id with a mismatched dock
/// name must not correlate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EstimateKey {
    pub vessel_id: String,
    pub nearest_dock: String,
}

#[derive(Debug, Clone)]
pub struct ResultMerger {
    geo: Arc<GeoIndex>,
}

impl ResultMerger {
    pub fn new(geo: Arc<GeoIndex>) -> Self {
        Self { geo }
    }

    /// Attach estimates to vessels. Exactly one `EnrichedVessel` per input
    /// vessel; a vessel with no matching estimate gets the null-ETA
    /// fallback instead of being dropped.
    pub fn merge(
        &self,
        vessels: Vec<VesselPosition>,
        estimates: &[EtaEstimate],
    ) -> Vec<EnrichedVessel> {
        let by_key: HashMap<EstimateKey, &EtaEstimate> = estimates
            .iter()
            .map(|estimate| {
                (
                    EstimateKey {
                        vessel_id: estimate.vessel_id.clone(),
                        nearest_dock: estimate.nearest_dock.clone(),
                    },
                    estimate,
                )
            })
            .collect();

        vessels
            .into_iter()
            .map(|vessel| {
                let nearest = self.geo.nearest(vessel.latitude, vessel.longitude);
                let key = EstimateKey {
                    vessel_id: vessel.vessel_id.clone(),
                    nearest_dock: nearest.name.clone(),
                };
                let eta = match by_key.get(&key) {
                    Some(estimate) => Eta::from(*estimate),
                    None => Eta::fallback("no estimate returned for this vessel"),
                };
                EnrichedVessel {
                    position: vessel,
                    nearest_dock: nearest.name,
                    distance_km: round_distance_km(nearest.distance_km),
                    eta,
                }
            })
            .collect()
    }

    /// Synthesize the degraded result for every vessel, skipping the keyed
    /// lookup entirely. Used when the reasoning call fails as a whole.
    pub fn fallback(&self, vessels: Vec<VesselPosition>, reason: &str) -> Vec<EnrichedVessel> {
        vessels
            .into_iter()
            .map(|vessel| {
                let nearest = self.geo.nearest(vessel.latitude, vessel.longitude);
                EnrichedVessel {
                    position: vessel,
                    nearest_dock: nearest.name,
                    distance_km: round_distance_km(nearest.distance_km),
                    eta: Eta::fallback(reason),
                }
            })
            .collect()
    }
}
