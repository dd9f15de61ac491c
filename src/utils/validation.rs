//! Utilidades de validación
//!
//! Extractor de JSON validado y helpers para las actualizaciones parciales.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header,
    Json,
};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::errors::AppError;

/// Extrae el body como `axum::Json<T>` y además ejecuta `Validate`.
///
/// Un JSON mal formado, un tipo incorrecto o un valor fuera de un enum se
/// responden con 400 en lugar del 422 que devuelve axum por defecto.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        payload.validate()?;
        Ok(ValidatedJson(payload))
    }
}

/// Body de una actualización parcial.
///
/// Igual que `ValidatedJson`, pero un body vacío (con o sin `Content-Type`)
/// equivale a `T::default()`: no se modifica ningún campo.
#[derive(Debug, Clone, Copy)]
pub struct PartialJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for PartialJson<T>
where
    T: DeserializeOwned + Validate + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(is_json_content_type)
            .unwrap_or(false);

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(PartialJson(T::default()));
        }
        if !is_json {
            return Err(AppError::BadRequest(
                "Expected request with `Content-Type: application/json`".to_string(),
            ));
        }

        let Json(payload) = Json::<T>::from_bytes(&bytes)
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        payload.validate()?;
        Ok(PartialJson(payload))
    }
}

fn is_json_content_type(value: &str) -> bool {
    let mime = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Un número en 0 llega como `None`, así no pasa por las validaciones de rango
pub fn zero_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default + PartialEq,
{
    Ok(Option::<T>::deserialize(deserializer)?.filter(|value| *value != T::default()))
}

/// Validar y convertir el id de la URL
pub fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("Invalid id: '{}'", raw)))
}

/// Un texto ausente o vacío conserva el valor actual
pub fn merge_text(update: Option<String>, current: String) -> String {
    match update {
        Some(value) if !value.is_empty() => value,
        _ => current,
    }
}

pub fn merge_optional_text(update: Option<String>, current: Option<String>) -> Option<String> {
    match update {
        Some(value) if !value.is_empty() => Some(value),
        _ => current,
    }
}

/// Un valor ausente o igual a su `Default` (0 para números) conserva el actual
pub fn merge_value<T: PartialEq + Default>(update: Option<T>, current: T) -> T {
    match update {
        Some(value) if value != T::default() => value,
        _ => current,
    }
}

/// Validar que el precio no sea negativo
pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        let mut error = ValidationError::new("price");
        error.add_param("value".into(), &price.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que cada imagen sea una URL
pub fn validate_image_urls(images: &Vec<String>) -> Result<(), ValidationError> {
    for image in images {
        if !validator::validate_url(image.as_str()) {
            let mut error = ValidationError::new("url");
            error.add_param("value".into(), image);
            return Err(error);
        }
    }
    Ok(())
}
