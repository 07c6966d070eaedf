#![doc = "The `taskpulse` library crate."]
#![doc = ""]
#![doc = "A multi-tenant task tracking backend: users register and log in with a password,"]
#![doc = "receive a signed bearer token, and move their own tasks through"]
#![doc = "`pending -> in_progress -> done`. The binary (`main.rs`) wires these modules"]
#![doc = "into an actix-web server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod service;
pub mod store;

pub use error::AppError;
pub use service::TaskService;
