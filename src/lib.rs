//! Backend de la agencia de autos
//!
//! API REST para publicar vehículos (venta o alquiler), registrar clientes y
//! llevar las transacciones entre ambos.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
