//! Villages and their derived alert state.

use serde::{Deserialize, Serialize};

use super::cell::RiskBucket;
use super::geo::LatLng;

/// Alert urgency bucket derived from a village's ETA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertLevel {
    /// Fire front expected within half an hour.
    High,
    /// Fire front expected within two hours.
    Moderate,
    /// Fire front more than two hours out.
    Low,
}

impl AlertLevel {
    /// Bucket an ETA in hours.
    pub fn from_eta_hours(eta_hours: f32) -> Self {
        if eta_hours < 0.5 {
            Self::High
        } else if eta_hours < 2.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Moderate => "MODERATE",
            Self::Low => "LOW",
        }
    }
}

/// Evacuation lifecycle of a village. Variants are ordered so that
/// escalation is `max`; a village never de-escalates within a session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum EvacuationStatus {
    /// Initial state; the village is being watched.
    Monitoring,
    /// Half the ETA has elapsed; residents are notified.
    Alerted,
    /// The ETA has elapsed; evacuation is underway. Terminal.
    Evacuating,
}

impl EvacuationStatus {
    /// Stage the clock alone demands for a village with the given ETA.
    /// Callers combine this with the previous stage via `max` so that a
    /// shrinking ETA can only escalate.
    pub fn demanded(elapsed_hours: f32, eta_hours: f32) -> Self {
        if elapsed_hours >= eta_hours {
            Self::Evacuating
        } else if elapsed_hours >= 0.5 * eta_hours {
            Self::Alerted
        } else {
            Self::Monitoring
        }
    }

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Monitoring => "MONITORING",
            Self::Alerted => "ALERTED",
            Self::Evacuating => "EVACUATING",
        }
    }
}

/// A settlement tracked by the deployment. Position, population and the
/// static survey risk are fixed per deployment; everything else is derived
/// from the current ignition field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Village {
    /// Village name.
    pub name: String,
    /// Geographic position.
    pub location: LatLng,
    /// Resident population.
    pub population: u32,
    /// Static surveyed fire-risk score in `[0, 100]`.
    pub survey_risk: f32,
}

impl Village {
    /// Create a village record.
    pub fn new(name: &str, lat: f64, lng: f64, population: u32, survey_risk: f32) -> Self {
        Self {
            name: name.to_owned(),
            location: LatLng::new(lat, lng),
            population,
            survey_risk,
        }
    }

    /// Risk bucket of the static survey score.
    pub fn risk_bucket(&self) -> RiskBucket {
        RiskBucket::from_score(self.survey_risk)
    }

    /// The fixed Chamoli-district roster the deployment ships with.
    pub fn chamoli_roster() -> Vec<Village> {
        vec![
            Village::new("Bair Bagar", 30.2833, 79.1833, 847, 72.0),
            Village::new("Gadora", 30.35, 79.25, 623, 58.0),
            Village::new("Tapovan", 30.4333, 79.3, 1205, 45.0),
            Village::new("Pindawali", 30.3167, 79.4, 934, 63.0),
            Village::new("Joshimath", 30.5556, 79.5639, 2847, 38.0),
        ]
    }
}

/// Derived status for one village at one assessment instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VillageStatus {
    /// Village name.
    pub name: String,
    /// Resident population.
    pub population: u32,
    /// Great-circle distance from the fire origin, km.
    pub distance_km: f64,
    /// Hours until the fire front reaches the village.
    pub eta_hours: f32,
    /// Alert bucket for the ETA.
    pub alert_level: AlertLevel,
    /// Evacuation lifecycle stage (escalate-only).
    pub status: EvacuationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_level_thresholds() {
        assert_eq!(AlertLevel::from_eta_hours(0.0), AlertLevel::High);
        assert_eq!(AlertLevel::from_eta_hours(0.49), AlertLevel::High);
        assert_eq!(AlertLevel::from_eta_hours(0.5), AlertLevel::Moderate);
        assert_eq!(AlertLevel::from_eta_hours(1.99), AlertLevel::Moderate);
        assert_eq!(AlertLevel::from_eta_hours(2.0), AlertLevel::Low);
    }

    #[test]
    fn test_demanded_status_transitions() {
        assert_eq!(
            EvacuationStatus::demanded(0.0, 2.0),
            EvacuationStatus::Monitoring
        );
        assert_eq!(
            EvacuationStatus::demanded(1.0, 2.0),
            EvacuationStatus::Alerted
        );
        assert_eq!(
            EvacuationStatus::demanded(2.0, 2.0),
            EvacuationStatus::Evacuating
        );
    }

    #[test]
    fn test_status_ordering_supports_escalation() {
        assert!(EvacuationStatus::Monitoring < EvacuationStatus::Alerted);
        assert!(EvacuationStatus::Alerted < EvacuationStatus::Evacuating);
        let held = EvacuationStatus::Evacuating;
        assert_eq!(held.max(EvacuationStatus::Monitoring), held);
    }

    #[test]
    fn test_chamoli_roster_is_fixed() {
        let roster = Village::chamoli_roster();
        assert_eq!(roster.len(), 5);
        assert_eq!(roster[0].name, "Bair Bagar");
        assert_eq!(roster[0].risk_bucket(), RiskBucket::High);
        assert_eq!(roster[4].name, "Joshimath");
        assert_eq!(roster[4].risk_bucket(), RiskBucket::Low);
    }
}
