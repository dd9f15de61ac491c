//! Servicios de dominio

pub mod vehicle_query;
