//! Middleware de CORS
//!
//! Este módulo maneja la configuración de CORS para permitir
//! requests desde el frontend de la agencia.

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tracing::warn;

/// Sin orígenes configurados: en desarrollo se permite cualquiera, fuera de
/// desarrollo no se habilita ningún origen cruzado.
pub fn cors_middleware(origins: &[String], is_development: bool) -> CorsLayer {
    match (origins.is_empty(), is_development) {
        (false, _) => cors_middleware_with_origins(origins),
        (true, true) => CorsLayer::very_permissive(),
        (true, false) => {
            warn!("⚠️ CORS_ORIGINS vacío fuera de desarrollo: requests cross-origin bloqueados");
            CorsLayer::new()
        }
    }
}

/// Crear middleware de CORS con orígenes específicos
pub fn cors_middleware_with_origins(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("⚠️ Origen CORS inválido ignorado: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            HeaderName::from_static("authorization"),
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
            HeaderName::from_static("x-requested-with"),
        ])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}
