// src/lib.rs

pub mod config;
pub mod db;
pub mod error;
pub mod fetcher;
pub mod handlers;
pub mod listing;
pub mod models;
pub mod routes;
pub mod seed;
pub mod state;
pub mod utils;

pub use routes::create_router;
