//! Database models for the Spaceport server.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use spaceport_core::{NewShip, Ship, ShipType};

use crate::schema::ships;

#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = ships)]
/// Ship database record.
pub struct ShipRow {
    /// Storage-assigned identifier.
    pub id: i64,
    /// Ship name.
    pub name: String,
    /// Home planet.
    pub planet: String,
    /// Ship type storage name.
    pub ship_type: String,
    /// Production date.
    pub prod_date: DateTime<Utc>,
    /// Whether the ship is second-hand.
    pub is_used: bool,
    /// Speed, rounded to two decimals.
    pub speed: f64,
    /// Crew size.
    pub crew_size: i32,
    /// Derived rating.
    pub rating: f64,
}

impl ShipRow {
    /// Convert a stored row into the domain entity.
    pub fn into_domain(self) -> Result<Ship, String> {
        let ship_type = self.ship_type.parse::<ShipType>()?;
        Ok(Ship {
            id: self.id,
            name: self.name,
            planet: self.planet,
            ship_type,
            prod_date: self.prod_date,
            is_used: self.is_used,
            speed: self.speed,
            crew_size: self.crew_size,
            rating: self.rating,
        })
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = ships)]
/// Insertable and updatable ship attributes.
pub struct NewShipRow {
    /// Ship name.
    pub name: String,
    /// Home planet.
    pub planet: String,
    /// Ship type storage name.
    pub ship_type: String,
    /// Production date.
    pub prod_date: DateTime<Utc>,
    /// Whether the ship is second-hand.
    pub is_used: bool,
    /// Speed, rounded to two decimals.
    pub speed: f64,
    /// Crew size.
    pub crew_size: i32,
    /// Derived rating.
    pub rating: f64,
}

impl From<&NewShip> for NewShipRow {
    fn from(ship: &NewShip) -> Self {
        Self {
            name: ship.name.clone(),
            planet: ship.planet.clone(),
            ship_type: ship.ship_type.as_str().to_string(),
            prod_date: ship.prod_date,
            is_used: ship.is_used,
            speed: ship.speed,
            crew_size: ship.crew_size,
            rating: ship.rating,
        }
    }
}

impl From<&Ship> for NewShipRow {
    fn from(ship: &Ship) -> Self {
        Self {
            name: ship.name.clone(),
            planet: ship.planet.clone(),
            ship_type: ship.ship_type.as_str().to_string(),
            prod_date: ship.prod_date,
            is_used: ship.is_used,
            speed: ship.speed,
            crew_size: ship.crew_size,
            rating: ship.rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::ShipRow;
    use spaceport_core::ShipType;

    fn row(ship_type: &str) -> ShipRow {
        ShipRow {
            id: 1,
            name: "Test".to_string(),
            planet: "Earth".to_string(),
            ship_type: ship_type.to_string(),
            prod_date: Utc.with_ymd_and_hms(3000, 1, 1, 0, 0, 0).single().expect("date"),
            is_used: false,
            speed: 0.50,
            crew_size: 10,
            rating: 2.00,
        }
    }

    #[test]
    fn row_converts_to_domain_ship() {
        let ship = row("MILITARY").into_domain().expect("convert");
        assert_eq!(ship.ship_type, ShipType::Military);
        assert_eq!(ship.prod_year(), 3000);
    }

    #[test]
    fn row_with_unknown_type_fails_conversion() {
        let result = row("DINGHY").into_domain();
        assert!(result.is_err());
    }
}
