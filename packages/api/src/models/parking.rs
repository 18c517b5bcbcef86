//! # Parking models
//!
//! [`VehicleType`] is the tariff table row shown on the dashboard; [`ParkingRecord`]
//! is one stay of one vehicle. Both are read-only snapshots of server state.
//!
//! A record is **open** while `exit_time` is absent. Billing figures
//! (`total_charge`, `calculated_hours`) are computed by the server when the exit
//! is registered and are only ever displayed here; [`ParkingRecord::billing`]
//! reports them as a pair or not at all.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which record set the dashboard is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Current,
    History,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Current, Tab::History];

    /// Path segment under `/parking/`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Current => "current",
            Tab::History => "history",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Current => "Vigentes",
            Tab::History => "Historial",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tariff for one kind of vehicle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleType {
    pub id: String,
    pub name: String,
    pub hourly_rate: f64,
    #[serde(default)]
    pub description: String,
}

/// One vehicle stay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParkingRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    pub vehicle_type_id: String,
    pub license_plate: String,
    pub entry_time: DateTime<Utc>,
    #[serde(default)]
    pub exit_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_charge: Option<f64>,
    #[serde(default)]
    pub calculated_hours: Option<i64>,
}

impl ParkingRecord {
    pub fn is_open(&self) -> bool {
        self.exit_time.is_none()
    }

    /// `(total_charge, calculated_hours)` when the server supplied both.
    pub fn billing(&self) -> Option<(f64, i64)> {
        match (self.total_charge, self.calculated_hours) {
            (Some(charge), Some(hours)) => Some((charge, hours)),
            _ => None,
        }
    }

    /// Stable key for list rendering; falls back to plate + entry time when the
    /// server omits the id.
    pub fn key(&self) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("{}@{}", self.license_plate, self.entry_time.to_rfc3339()),
        }
    }
}

/// Body of `POST /parking/entry`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EntryRequest {
    pub license_plate: String,
    pub vehicle_type_id: String,
}

/// Body of `POST /parking/exit`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExitRequest {
    pub license_plate: String,
}
