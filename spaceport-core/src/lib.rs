#![deny(missing_docs)]
//! Spaceport core library.
//!
//! This crate contains the domain types and the pure filter, sort, paginate
//! and rating pipeline behind the ship registry service. It performs no I/O;
//! the server crate feeds it snapshots fetched from the store.

pub mod domain;
pub mod error;
pub mod filter;
pub mod paging;
pub mod rating;
pub mod validate;

pub use domain::{NewShip, Ship, ShipDraft, ShipOrder, ShipType};
pub use error::{Result, ShipError};
pub use filter::ShipFilter;
pub use paging::{paginate, sort_ships};
pub use rating::{compute_rating, round2};
pub use validate::{
    MAX_CREW_SIZE, MAX_PROD_YEAR, MAX_SPEED, MIN_CREW_SIZE, MIN_PROD_YEAR, MIN_SPEED, NAME_MAX_LEN,
    apply_update, parse_ship_id, validate_new,
};
