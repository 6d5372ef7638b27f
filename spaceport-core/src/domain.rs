//! Domain entities for the Spaceport ship registry.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kind of ship stored in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipType {
    /// Cargo and passenger transport.
    Transport,
    /// Combat vessel.
    Military,
    /// Trading vessel.
    Merchant,
}

impl ShipType {
    /// Stable storage name for the ship type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transport => "TRANSPORT",
            Self::Military => "MILITARY",
            Self::Merchant => "MERCHANT",
        }
    }
}

impl std::str::FromStr for ShipType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "TRANSPORT" => Ok(Self::Transport),
            "MILITARY" => Ok(Self::Military),
            "MERCHANT" => Ok(Self::Merchant),
            other => Err(format!("unknown ship type: {other}")),
        }
    }
}

/// Sort key for ship listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShipOrder {
    /// Ascending by identifier.
    #[default]
    Id,
    /// Ascending by speed.
    Speed,
    /// Ascending by derived rating.
    Rating,
    /// Ascending by production date.
    Date,
}

/// A stored ship with its storage-assigned identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    /// Positive identifier assigned by the store.
    pub id: i64,
    /// Ship name, non-empty and at most 50 characters.
    pub name: String,
    /// Home planet, non-empty and at most 50 characters.
    pub planet: String,
    /// Kind of ship.
    pub ship_type: ShipType,
    /// Production date; only the calendar year is semantically used.
    pub prod_date: DateTime<Utc>,
    /// Whether the ship is second-hand.
    pub is_used: bool,
    /// Speed in [0.01, 0.99], stored rounded to two decimals.
    pub speed: f64,
    /// Crew size in [1, 9999].
    pub crew_size: i32,
    /// Derived rating, recomputed on every create and update.
    pub rating: f64,
}

impl Ship {
    /// Calendar year the ship was produced (UTC).
    pub fn prod_year(&self) -> i32 {
        self.prod_date.year()
    }
}

/// Incoming ship fields; every field is optional.
///
/// The same shape serves creation (required fields are checked by the
/// validation layer) and partial update (present fields overwrite).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipDraft {
    /// Ship name.
    pub name: Option<String>,
    /// Home planet.
    pub planet: Option<String>,
    /// Kind of ship.
    pub ship_type: Option<ShipType>,
    /// Production date.
    pub prod_date: Option<DateTime<Utc>>,
    /// Whether the ship is second-hand.
    pub is_used: Option<bool>,
    /// Speed before rounding.
    pub speed: Option<f64>,
    /// Crew size.
    pub crew_size: Option<i32>,
}

/// A fully validated ship ready for insertion, without an identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShip {
    /// Ship name.
    pub name: String,
    /// Home planet.
    pub planet: String,
    /// Kind of ship.
    pub ship_type: ShipType,
    /// Production date.
    pub prod_date: DateTime<Utc>,
    /// Whether the ship is second-hand.
    pub is_used: bool,
    /// Speed, already rounded to two decimals.
    pub speed: f64,
    /// Crew size.
    pub crew_size: i32,
    /// Derived rating.
    pub rating: f64,
}
