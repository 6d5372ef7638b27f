//! Field validation and draft application.

use chrono::{DateTime, Datelike, Utc};

use crate::domain::{NewShip, Ship, ShipDraft};
use crate::error::{Result, ShipError};
use crate::rating::{compute_rating, round2};

/// Maximum length of the name and planet fields, in characters.
pub const NAME_MAX_LEN: usize = 50;
/// Minimum allowed speed.
pub const MIN_SPEED: f64 = 0.01;
/// Maximum allowed speed.
pub const MAX_SPEED: f64 = 0.99;
/// Minimum allowed crew size.
pub const MIN_CREW_SIZE: i32 = 1;
/// Maximum allowed crew size.
pub const MAX_CREW_SIZE: i32 = 9999;
/// Earliest allowed production year.
pub const MIN_PROD_YEAR: i32 = 2800;
/// Latest allowed production year; also anchors the rating formula.
pub const MAX_PROD_YEAR: i32 = 3019;

/// Parse a path identifier; it must be a positive integer.
pub fn parse_ship_id(raw: &str) -> Result<i64> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ShipError::InvalidField("id")),
    }
}

/// Validate a creation draft and build the ship to insert.
///
/// Runs the two-phase creation contract: every required field must be
/// present, then every field must pass its range check. The used flag
/// defaults to false, speed is rounded to two decimals and the rating is
/// derived from the rounded speed.
pub fn validate_new(draft: &ShipDraft) -> Result<NewShip> {
    let name = draft.name.clone().ok_or(ShipError::MissingField("name"))?;
    let planet = draft
        .planet
        .clone()
        .ok_or(ShipError::MissingField("planet"))?;
    let ship_type = draft.ship_type.ok_or(ShipError::MissingField("shipType"))?;
    let prod_date = draft.prod_date.ok_or(ShipError::MissingField("prodDate"))?;
    let speed = round2(draft.speed.ok_or(ShipError::MissingField("speed"))?);
    let crew_size = draft
        .crew_size
        .ok_or(ShipError::MissingField("crewSize"))?;
    let is_used = draft.is_used.unwrap_or(false);
    check_ranges(draft)?;

    let rating = compute_rating(speed, is_used, prod_date.year());
    Ok(NewShip {
        name,
        planet,
        ship_type,
        prod_date,
        is_used,
        speed,
        crew_size,
        rating,
    })
}

/// Apply a partial update to an existing ship.
///
/// Only supplied fields are range-checked and overwrite the existing
/// values; the rating is recomputed after the merge. On error the input
/// ship is untouched.
pub fn apply_update(ship: &Ship, patch: &ShipDraft) -> Result<Ship> {
    check_ranges(patch)?;

    let mut updated = ship.clone();
    if let Some(name) = &patch.name {
        updated.name = name.clone();
    }
    if let Some(planet) = &patch.planet {
        updated.planet = planet.clone();
    }
    if let Some(ship_type) = patch.ship_type {
        updated.ship_type = ship_type;
    }
    if let Some(prod_date) = patch.prod_date {
        updated.prod_date = prod_date;
    }
    if let Some(is_used) = patch.is_used {
        updated.is_used = is_used;
    }
    if let Some(speed) = patch.speed {
        updated.speed = round2(speed);
    }
    if let Some(crew_size) = patch.crew_size {
        updated.crew_size = crew_size;
    }
    updated.rating = compute_rating(updated.speed, updated.is_used, updated.prod_year());
    Ok(updated)
}

/// Range-check every field present in a draft.
fn check_ranges(draft: &ShipDraft) -> Result<()> {
    if let Some(name) = &draft.name {
        check_text("name", name)?;
    }
    if let Some(planet) = &draft.planet {
        check_text("planet", planet)?;
    }
    if let Some(speed) = draft.speed {
        if !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
            return Err(ShipError::InvalidField("speed"));
        }
    }
    if let Some(crew_size) = draft.crew_size {
        if !(MIN_CREW_SIZE..=MAX_CREW_SIZE).contains(&crew_size) {
            return Err(ShipError::InvalidField("crewSize"));
        }
    }
    if let Some(prod_date) = draft.prod_date {
        check_prod_date(prod_date)?;
    }
    Ok(())
}

fn check_text(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() || value.chars().count() > NAME_MAX_LEN {
        return Err(ShipError::InvalidField(field));
    }
    Ok(())
}

fn check_prod_date(prod_date: DateTime<Utc>) -> Result<()> {
    if prod_date.timestamp_millis() < 0 {
        return Err(ShipError::InvalidField("prodDate"));
    }
    let year = prod_date.year();
    if !(MIN_PROD_YEAR..=MAX_PROD_YEAR).contains(&year) {
        return Err(ShipError::InvalidField("prodDate"));
    }
    Ok(())
}
