//! OpenAPI specification for the Spaceport server.

use utoipa::OpenApi;

use spaceport_core::{ShipOrder, ShipType};

use crate::routes::{ErrorResponse, ShipPayload, ShipResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::create_ship,
        crate::routes::get_ship,
        crate::routes::update_ship,
        crate::routes::delete_ship,
        crate::routes::list_ships,
        crate::routes::count_ships,
        crate::routes::openapi_json
    ),
    components(
        schemas(
            ShipPayload,
            ShipResponse,
            ErrorResponse,
            ShipType,
            ShipOrder
        )
    ),
    tags(
        (name = "ships", description = "Ship registry operations"),
        (name = "system", description = "System endpoints")
    )
)]
/// OpenAPI specification for the Spaceport server.
pub struct ApiDoc;
