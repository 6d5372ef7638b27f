//! Stable ordering and zero-based pagination.

use crate::domain::{Ship, ShipOrder};

/// Sort ships ascending by the requested key.
///
/// The sort is stable, so ships comparing equal keep their original
/// relative order. Each key maps to one extraction closure feeding the
/// same stable routine.
pub fn sort_ships(ships: &mut [Ship], order: ShipOrder) {
    match order {
        ShipOrder::Id => ships.sort_by_key(|ship| ship.id),
        ShipOrder::Speed => ships.sort_by(|a, b| a.speed.total_cmp(&b.speed)),
        ShipOrder::Rating => ships.sort_by(|a, b| a.rating.total_cmp(&b.rating)),
        ShipOrder::Date => ships.sort_by_key(|ship| ship.prod_date),
    }
}

/// Return page `page_number` of size `page_size`, clipped to the bounds.
///
/// A page past the end of the collection is an empty sequence, not an
/// error. Callers guarantee a positive page size.
pub fn paginate(ships: Vec<Ship>, page_number: u32, page_size: u32) -> Vec<Ship> {
    let start = (page_number as usize).saturating_mul(page_size as usize);
    ships
        .into_iter()
        .skip(start)
        .take(page_size as usize)
        .collect()
}
