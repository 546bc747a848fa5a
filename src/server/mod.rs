pub mod app;
mod deserializers;
pub mod error;
mod pagination;
pub mod quiz;
mod routes;
