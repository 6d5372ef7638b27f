//! Diesel schema definitions for the Spaceport server.

diesel::table! {
    ships (id) {
        id -> BigInt,
        name -> Text,
        planet -> Text,
        ship_type -> Text,
        prod_date -> Timestamptz,
        is_used -> Bool,
        speed -> Double,
        crew_size -> Integer,
        rating -> Double,
    }
}
