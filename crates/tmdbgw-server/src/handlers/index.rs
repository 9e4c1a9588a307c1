//! Static identity payload served at the root.

use axum::Json;
use serde::Serialize;

/// Fixed creator field.
const CREATED_BY: &str = "KEVIN KYLE GANADOS";

/// Fixed message field.
const MSG: &str = "TEST USING AXUM";

/// Body of `GET /`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ServiceInfo {
    /// Author of the gateway.
    pub created_by: &'static str,
    /// Fixed message.
    pub msg: &'static str,
}

/// `GET /` - answers without touching TMDB.
pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        created_by: CREATED_BY,
        msg: MSG,
    })
}
