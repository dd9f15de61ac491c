//! Configuración de variables de entorno
//!
//! Este módulo carga la configuración del servicio desde el entorno
//! (previamente completado con `.env` por `dotenvy`).

use std::env;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use super::database::DatabaseConfig;

/// Motor de almacenamiento a usar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(anyhow!("STORAGE_BACKEND must be 'postgres' or 'memory', got '{}'", other)),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub storage: StorageBackend,
    pub log_level: tracing::Level,
    /// Sólo presente con `StorageBackend::Postgres`
    pub database: Option<DatabaseConfig>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
            storage: StorageBackend::Memory,
            log_level: tracing::Level::DEBUG,
            database: None,
        }
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

pub(crate) fn parse_var<T>(name: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = var_or(name, default);
    raw.parse::<T>()
        .map_err(|e| anyhow!("{} has an invalid value '{}': {}", name, raw, e))
}

pub(crate) fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl EnvironmentConfig {
    /// Cargar la configuración desde variables de entorno
    pub fn from_env() -> Result<Self> {
        let storage: StorageBackend = parse_var("STORAGE_BACKEND", "postgres")?;
        let database = match storage {
            StorageBackend::Postgres => {
                Some(DatabaseConfig::from_env().context("Invalid database configuration")?)
            }
            StorageBackend::Memory => None,
        };

        Ok(Self {
            environment: var_or("ENVIRONMENT", "development"),
            port: parse_var("PORT", "3000")?,
            host: var_or("HOST", "0.0.0.0"),
            cors_origins: parse_origins(&var_or("CORS_ORIGINS", "")),
            storage,
            log_level: parse_var("LOG_LEVEL", "debug")?,
            database,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert!(parse_origins("").is_empty());
        assert_eq!(
            parse_origins("http://localhost:5173, https://agencia.com ,"),
            vec!["http://localhost:5173".to_string(), "https://agencia.com".to_string()]
        );
    }

    #[test]
    fn test_storage_backend_parse() {
        assert_eq!("Postgres".parse::<StorageBackend>().unwrap(), StorageBackend::Postgres);
        assert_eq!("memory".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert!("mongodb".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_parse_var_uses_default_and_reports_errors() {
        let port: u16 = parse_var("AGENCIA_TEST_UNSET_PORT", "3000").unwrap();
        assert_eq!(port, 3000);
        assert!(parse_var::<u16>("AGENCIA_TEST_UNSET_PORT", "not-a-port").is_err());
    }

    #[test]
    fn test_default_server_url() {
        let config = EnvironmentConfig::default();
        assert_eq!(config.server_url(), "0.0.0.0:3000");
        assert!(config.is_development());
    }
}
