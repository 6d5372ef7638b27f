//! HTTP handlers for the Spaceport server.

use actix_web::error::BlockingError;
use actix_web::{HttpResponse, Responder, delete, get, post, web};
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::OptionalExtension;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, OpenApi, ToSchema};

use spaceport_core::{
    Ship, ShipDraft, ShipError, ShipFilter, ShipOrder, ShipType, apply_update, paginate,
    parse_ship_id, sort_ships, validate_new,
};

use crate::db::DbPool;
use crate::models::{NewShipRow, ShipRow};
use crate::openapi::ApiDoc;
use crate::schema::ships;

#[derive(Clone)]
/// Shared application state for handlers.
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
}

/// Error response payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub message: String,
}

/// Incoming ship fields for create and partial update.
///
/// Fields the server derives (id, rating) have no counterpart here; a
/// client that sends them has them silently dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ShipPayload {
    /// Ship name, at most 50 characters.
    pub name: Option<String>,
    /// Home planet, at most 50 characters.
    pub planet: Option<String>,
    /// Ship type.
    pub ship_type: Option<ShipType>,
    /// Production date in epoch milliseconds.
    pub prod_date: Option<i64>,
    /// Whether the ship is second-hand; defaults to false on create.
    pub is_used: Option<bool>,
    /// Speed in [0.01, 0.99].
    pub speed: Option<f64>,
    /// Crew size in [1, 9999].
    pub crew_size: Option<i32>,
}

impl ShipPayload {
    fn into_draft(self) -> Result<ShipDraft, ShipError> {
        let prod_date = self
            .prod_date
            .map(|millis| parse_millis("prodDate", millis))
            .transpose()?;
        Ok(ShipDraft {
            name: self.name,
            planet: self.planet,
            ship_type: self.ship_type,
            prod_date,
            is_used: self.is_used,
            speed: self.speed,
            crew_size: self.crew_size,
        })
    }
}

/// Stored ship representation returned to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipResponse {
    /// Storage-assigned identifier.
    pub id: i64,
    /// Ship name.
    pub name: String,
    /// Home planet.
    pub planet: String,
    /// Ship type.
    pub ship_type: ShipType,
    /// Production date in epoch milliseconds.
    pub prod_date: i64,
    /// Whether the ship is second-hand.
    pub is_used: bool,
    /// Speed, rounded to two decimals.
    pub speed: f64,
    /// Crew size.
    pub crew_size: i32,
    /// Derived rating.
    pub rating: f64,
}

impl From<Ship> for ShipResponse {
    fn from(ship: Ship) -> Self {
        Self {
            id: ship.id,
            name: ship.name,
            planet: ship.planet,
            ship_type: ship.ship_type,
            prod_date: ship.prod_date.timestamp_millis(),
            is_used: ship.is_used,
            speed: ship.speed,
            crew_size: ship.crew_size,
            rating: ship.rating,
        }
    }
}

/// Query parameters for listing and counting ships.
///
/// The count endpoint ignores the order and paging fields.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase", default)]
#[into_params(parameter_in = Query)]
pub struct ShipQuery {
    /// Substring of the name (case-sensitive).
    pub name: Option<String>,
    /// Substring of the planet (case-sensitive).
    pub planet: Option<String>,
    /// Exact ship type.
    pub ship_type: Option<ShipType>,
    /// Inclusive lower production-date bound, epoch milliseconds.
    pub after: Option<i64>,
    /// Inclusive upper production-date bound, epoch milliseconds.
    pub before: Option<i64>,
    /// Exact used flag.
    pub is_used: Option<bool>,
    /// Inclusive lower speed bound.
    pub min_speed: Option<f64>,
    /// Inclusive upper speed bound.
    pub max_speed: Option<f64>,
    /// Inclusive lower crew-size bound.
    pub min_crew_size: Option<i32>,
    /// Inclusive upper crew-size bound.
    pub max_crew_size: Option<i32>,
    /// Inclusive lower rating bound.
    pub min_rating: Option<f64>,
    /// Inclusive upper rating bound.
    pub max_rating: Option<f64>,
    /// Sort key, default ID.
    pub order: Option<ShipOrder>,
    /// Zero-based page number, default 0.
    pub page_number: Option<u32>,
    /// Page size, default 3, must be positive.
    pub page_size: Option<u32>,
}

impl ShipQuery {
    fn filter(&self) -> Result<ShipFilter, ShipError> {
        Ok(ShipFilter {
            name: self.name.clone(),
            planet: self.planet.clone(),
            ship_type: self.ship_type,
            after: self
                .after
                .map(|millis| parse_millis("after", millis))
                .transpose()?,
            before: self
                .before
                .map(|millis| parse_millis("before", millis))
                .transpose()?,
            is_used: self.is_used,
            min_speed: self.min_speed,
            max_speed: self.max_speed,
            min_crew_size: self.min_crew_size,
            max_crew_size: self.max_crew_size,
            min_rating: self.min_rating,
            max_rating: self.max_rating,
        })
    }
}

fn parse_millis(field: &'static str, millis: i64) -> Result<DateTime<Utc>, ShipError> {
    DateTime::from_timestamp_millis(millis).ok_or(ShipError::InvalidField(field))
}

/// Failures a handler can surface.
#[derive(Debug)]
enum ApiError {
    /// Client-visible validation or lookup failure.
    Ship(ShipError),
    /// Storage or pool failure.
    Internal(String),
}

impl From<ShipError> for ApiError {
    fn from(err: ShipError) -> Self {
        Self::Ship(err)
    }
}

impl From<diesel::result::Error> for ApiError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<diesel::r2d2::PoolError> for ApiError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl ApiError {
    fn into_response(self) -> HttpResponse {
        match self {
            Self::Ship(err @ (ShipError::MissingField(_) | ShipError::InvalidField(_))) => {
                HttpResponse::BadRequest().json(ErrorResponse {
                    message: err.to_string(),
                })
            }
            Self::Ship(err @ ShipError::NotFound) => HttpResponse::NotFound().json(ErrorResponse {
                message: err.to_string(),
            }),
            Self::Internal(message) => {
                log::error!("storage failure: {message}");
                HttpResponse::InternalServerError().json(ErrorResponse { message })
            }
        }
    }
}

fn respond<T: Serialize>(result: Result<Result<T, ApiError>, BlockingError>) -> HttpResponse {
    match result {
        Ok(Ok(value)) => HttpResponse::Ok().json(value),
        Ok(Err(err)) => err.into_response(),
        Err(err) => HttpResponse::InternalServerError().json(ErrorResponse {
            message: format!("blocking task failed: {err}"),
        }),
    }
}

/// Load a fresh snapshot of the whole ship table.
fn load_ships(conn: &mut PgConnection) -> Result<Vec<Ship>, ApiError> {
    let rows = ships::table.load::<ShipRow>(conn)?;
    rows.into_iter()
        .map(|row| row.into_domain().map_err(ApiError::Internal))
        .collect()
}

fn find_ship(conn: &mut PgConnection, id: i64) -> Result<Ship, ApiError> {
    let row = ships::table
        .find(id)
        .first::<ShipRow>(conn)
        .optional()?
        .ok_or(ApiError::Ship(ShipError::NotFound))?;
    row.into_domain().map_err(ApiError::Internal)
}

#[utoipa::path(
    post,
    path = "/ships",
    request_body = ShipPayload,
    responses(
        (status = 200, description = "Created ship", body = ShipResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[post("/rest/ships")]
/// Create a ship; speed is rounded and the rating derived before storage.
pub async fn create_ship(
    state: web::Data<AppState>,
    payload: web::Json<ShipPayload>,
) -> impl Responder {
    let pool = state.pool.clone();
    let payload = payload.into_inner();
    let result = web::block(move || {
        let draft = payload.into_draft()?;
        let new_ship = validate_new(&draft)?;
        let mut conn = pool.get()?;
        let row = diesel::insert_into(ships::table)
            .values(NewShipRow::from(&new_ship))
            .get_result::<ShipRow>(&mut conn)?;
        let ship = row.into_domain().map_err(ApiError::Internal)?;
        Ok::<ShipResponse, ApiError>(ship.into())
    })
    .await;
    respond(result)
}

#[utoipa::path(
    get,
    path = "/ships/{id}",
    params(
        ("id" = String, Path, description = "Ship identifier, a positive integer")
    ),
    responses(
        (status = 200, description = "Stored ship", body = ShipResponse),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 404, description = "No such ship", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/rest/ships/{id}")]
/// Fetch a ship by identifier.
pub async fn get_ship(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let pool = state.pool.clone();
    let raw_id = path.into_inner();
    let result = web::block(move || {
        let id = parse_ship_id(&raw_id)?;
        let mut conn = pool.get()?;
        let ship = find_ship(&mut conn, id)?;
        Ok::<ShipResponse, ApiError>(ship.into())
    })
    .await;
    respond(result)
}

#[utoipa::path(
    post,
    path = "/ships/{id}",
    params(
        ("id" = String, Path, description = "Ship identifier, a positive integer")
    ),
    request_body = ShipPayload,
    responses(
        (status = 200, description = "Updated ship", body = ShipResponse),
        (status = 400, description = "Malformed identifier or invalid field", body = ErrorResponse),
        (status = 404, description = "No such ship", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[post("/rest/ships/{id}")]
/// Partially update a ship; only supplied fields overwrite, rating is recomputed.
pub async fn update_ship(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<ShipPayload>,
) -> impl Responder {
    let pool = state.pool.clone();
    let raw_id = path.into_inner();
    let payload = payload.into_inner();
    let result = web::block(move || {
        let id = parse_ship_id(&raw_id)?;
        let mut conn = pool.get()?;
        // Unknown id reports 404 before any field validation runs.
        let existing = find_ship(&mut conn, id)?;
        let draft = payload.into_draft()?;
        let updated = apply_update(&existing, &draft)?;
        let changeset = NewShipRow::from(&updated);
        let row = diesel::update(ships::table.find(id))
            .set(&changeset)
            .get_result::<ShipRow>(&mut conn)?;
        let ship = row.into_domain().map_err(ApiError::Internal)?;
        Ok::<ShipResponse, ApiError>(ship.into())
    })
    .await;
    respond(result)
}

#[utoipa::path(
    delete,
    path = "/ships/{id}",
    params(
        ("id" = String, Path, description = "Ship identifier, a positive integer")
    ),
    responses(
        (status = 200, description = "Ship deleted"),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 404, description = "No such ship", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[delete("/rest/ships/{id}")]
/// Delete a ship by identifier.
pub async fn delete_ship(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let pool = state.pool.clone();
    let raw_id = path.into_inner();
    let result = web::block(move || {
        let id = parse_ship_id(&raw_id)?;
        let mut conn = pool.get()?;
        let deleted = diesel::delete(ships::table.find(id)).execute(&mut conn)?;
        if deleted == 0 {
            return Err(ApiError::Ship(ShipError::NotFound));
        }
        Ok::<(), ApiError>(())
    })
    .await;
    match result {
        Ok(Ok(())) => HttpResponse::Ok().finish(),
        Ok(Err(err)) => err.into_response(),
        Err(err) => HttpResponse::InternalServerError().json(ErrorResponse {
            message: format!("blocking task failed: {err}"),
        }),
    }
}

#[utoipa::path(
    get,
    path = "/ships",
    params(ShipQuery),
    responses(
        (status = 200, description = "Ordered page of matching ships", body = [ShipResponse]),
        (status = 400, description = "Invalid query parameter", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/rest/ships")]
/// List ships matching the filters, sorted and paginated.
pub async fn list_ships(
    state: web::Data<AppState>,
    query: web::Query<ShipQuery>,
) -> impl Responder {
    let pool = state.pool.clone();
    let query = query.into_inner();
    let result = web::block(move || {
        let filter = query.filter()?;
        let order = query.order.unwrap_or_default();
        let page_number = query.page_number.unwrap_or(0);
        let page_size = query.page_size.unwrap_or(3);
        if page_size == 0 {
            return Err(ShipError::InvalidField("pageSize").into());
        }
        let mut conn = pool.get()?;
        let mut matching = filter.apply(load_ships(&mut conn)?);
        sort_ships(&mut matching, order);
        let page = paginate(matching, page_number, page_size);
        Ok::<Vec<ShipResponse>, ApiError>(page.into_iter().map(ShipResponse::from).collect())
    })
    .await;
    respond(result)
}

#[utoipa::path(
    get,
    path = "/ships/count",
    params(ShipQuery),
    responses(
        (status = 200, description = "Number of matching ships", body = i64),
        (status = 400, description = "Invalid query parameter", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/rest/ships/count")]
/// Count ships matching the filters; order and paging are ignored.
pub async fn count_ships(
    state: web::Data<AppState>,
    query: web::Query<ShipQuery>,
) -> impl Responder {
    let pool = state.pool.clone();
    let query = query.into_inner();
    let result = web::block(move || {
        let filter = query.filter()?;
        let mut conn = pool.get()?;
        let matching = filter.apply(load_ships(&mut conn)?);
        Ok::<usize, ApiError>(matching.len())
    })
    .await;
    respond(result)
}

#[utoipa::path(
    get,
    path = "/openapi.json",
    responses(
        (status = 200, description = "OpenAPI document", body = serde_json::Value)
    ),
    tag = "system"
)]
#[get("/rest/openapi.json")]
/// Serve the OpenAPI document.
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
