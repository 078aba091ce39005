#![doc = "The `taskdesk` library crate."]
#![doc = ""]
#![doc = "Domain models, authentication, authorization, persistence, services, routing"]
#![doc = "and error handling for the taskdesk task-tracking backend. The binary in"]
#![doc = "`main.rs` wires these together into an actix-web server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;
pub mod seed;
pub mod services;

pub use crate::error::AppError;
pub use crate::services::AppServices;
