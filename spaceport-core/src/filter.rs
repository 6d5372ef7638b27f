//! Conjunctive ship filtering.

use chrono::{DateTime, Utc};

use crate::domain::{Ship, ShipType};

/// Optional criteria combined with logical AND.
///
/// Omitted criteria impose no constraint, so the default filter is the
/// identity. Date bounds compare raw timestamps inclusively, never
/// calendar-year buckets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipFilter {
    /// Case-sensitive substring of the name.
    pub name: Option<String>,
    /// Case-sensitive substring of the planet.
    pub planet: Option<String>,
    /// Exact ship type.
    pub ship_type: Option<ShipType>,
    /// Inclusive lower bound on the production date.
    pub after: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the production date.
    pub before: Option<DateTime<Utc>>,
    /// Exact used flag.
    pub is_used: Option<bool>,
    /// Inclusive lower bound on speed.
    pub min_speed: Option<f64>,
    /// Inclusive upper bound on speed.
    pub max_speed: Option<f64>,
    /// Inclusive lower bound on crew size.
    pub min_crew_size: Option<i32>,
    /// Inclusive upper bound on crew size.
    pub max_crew_size: Option<i32>,
    /// Inclusive lower bound on rating.
    pub min_rating: Option<f64>,
    /// Inclusive upper bound on rating.
    pub max_rating: Option<f64>,
}

impl ShipFilter {
    /// Whether a ship satisfies every supplied criterion.
    pub fn matches(&self, ship: &Ship) -> bool {
        if let Some(name) = &self.name {
            if !ship.name.contains(name.as_str()) {
                return false;
            }
        }
        if let Some(planet) = &self.planet {
            if !ship.planet.contains(planet.as_str()) {
                return false;
            }
        }
        if let Some(ship_type) = self.ship_type {
            if ship.ship_type != ship_type {
                return false;
            }
        }
        if let Some(after) = self.after {
            if ship.prod_date < after {
                return false;
            }
        }
        if let Some(before) = self.before {
            if ship.prod_date > before {
                return false;
            }
        }
        if let Some(is_used) = self.is_used {
            if ship.is_used != is_used {
                return false;
            }
        }
        if let Some(min_speed) = self.min_speed {
            if ship.speed < min_speed {
                return false;
            }
        }
        if let Some(max_speed) = self.max_speed {
            if ship.speed > max_speed {
                return false;
            }
        }
        if let Some(min_crew_size) = self.min_crew_size {
            if ship.crew_size < min_crew_size {
                return false;
            }
        }
        if let Some(max_crew_size) = self.max_crew_size {
            if ship.crew_size > max_crew_size {
                return false;
            }
        }
        if let Some(min_rating) = self.min_rating {
            if ship.rating < min_rating {
                return false;
            }
        }
        if let Some(max_rating) = self.max_rating {
            if ship.rating > max_rating {
                return false;
            }
        }
        true
    }

    /// Select the ships satisfying the filter, preserving input order.
    pub fn apply(&self, ships: Vec<Ship>) -> Vec<Ship> {
        ships.into_iter().filter(|ship| self.matches(ship)).collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::ShipFilter;
    use crate::domain::{Ship, ShipType};
    use crate::rating::compute_rating;

    fn ship(id: i64, name: &str, planet: &str, ship_type: ShipType, year: i32) -> Ship {
        let speed = 0.10 + 0.10 * id as f64;
        let is_used = id % 2 == 0;
        Ship {
            id,
            name: name.to_string(),
            planet: planet.to_string(),
            ship_type,
            prod_date: Utc.with_ymd_and_hms(year, 3, 1, 0, 0, 0).single().expect("date"),
            is_used,
            speed,
            crew_size: (id * 100) as i32,
            rating: compute_rating(speed, is_used, year),
        }
    }

    fn fleet() -> Vec<Ship> {
        vec![
            ship(1, "Falcon", "Earth", ShipType::Transport, 2900),
            ship(2, "Falcon Heavy", "Mars", ShipType::Military, 2950),
            ship(3, "Nomad", "Earthlike", ShipType::Merchant, 3000),
            ship(4, "Drifter", "Venus", ShipType::Transport, 3019),
        ]
    }

    #[test]
    fn empty_filter_is_identity() {
        let ships = fleet();
        let result = ShipFilter::default().apply(ships.clone());
        assert_eq!(result, ships);
    }

    #[test]
    fn empty_collection_stays_empty() {
        let filter = ShipFilter {
            name: Some("Falcon".to_string()),
            ..ShipFilter::default()
        };
        assert!(filter.apply(Vec::new()).is_empty());
    }

    #[test]
    fn name_filter_is_case_sensitive_substring() {
        let filter = ShipFilter {
            name: Some("Falcon".to_string()),
            ..ShipFilter::default()
        };
        let result = filter.apply(fleet());
        assert_eq!(result.len(), 2);

        let lower = ShipFilter {
            name: Some("falcon".to_string()),
            ..ShipFilter::default()
        };
        assert!(lower.apply(fleet()).is_empty());
    }

    #[test]
    fn planet_substring_matches_partial_names() {
        let filter = ShipFilter {
            planet: Some("Earth".to_string()),
            ..ShipFilter::default()
        };
        let result = filter.apply(fleet());
        let ids: Vec<i64> = result.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn criteria_combine_with_and() {
        let filter = ShipFilter {
            ship_type: Some(ShipType::Transport),
            min_crew_size: Some(200),
            ..ShipFilter::default()
        };
        let result = filter.apply(fleet());
        let ids: Vec<i64> = result.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![4]);
    }

    #[test]
    fn date_bounds_are_inclusive_raw_timestamps() {
        let ships = fleet();
        let filter = ShipFilter {
            after: Some(ships[1].prod_date),
            before: Some(ships[2].prod_date),
            ..ShipFilter::default()
        };
        let ids: Vec<i64> = filter.apply(ships).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn timestamps_in_the_same_year_are_not_bucketed() {
        // A bound one second past a ship's timestamp excludes it even though
        // both fall in the same calendar year.
        let ships = fleet();
        let bound = ships[0].prod_date + chrono::Duration::seconds(1);
        let filter = ShipFilter {
            after: Some(bound),
            ..ShipFilter::default()
        };
        let ids: Vec<i64> = filter.apply(ships).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[test]
    fn contradictory_speed_bounds_yield_empty() {
        let filter = ShipFilter {
            min_speed: Some(0.9),
            max_speed: Some(0.1),
            ..ShipFilter::default()
        };
        assert!(filter.apply(fleet()).is_empty());
    }

    #[test]
    fn used_flag_and_rating_bounds_filter() {
        let ships = fleet();
        let filter = ShipFilter {
            is_used: Some(false),
            min_rating: Some(ships[2].rating),
            ..ShipFilter::default()
        };
        let ids: Vec<i64> = filter.apply(ships).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3]);
    }
}
