pub mod config;
pub mod convert;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;
