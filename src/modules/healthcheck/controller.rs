use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct SystemInfo {
    pub environment: String,
    pub version: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthCheckResponse {
    pub status: String,
    pub system_info: SystemInfo,
}

/// Service liveness and build information
#[utoipa::path(
    get,
    path = "/api/healthcheck",
    responses(
        (status = 200, description = "Service is available", body = HealthCheckResponse),
    ),
    tag = "Healthcheck"
)]
pub async fn healthcheck() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "available".to_string(),
        system_info: SystemInfo {
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    })
}
