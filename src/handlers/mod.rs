// src/handlers/mod.rs

pub mod auth;
pub mod booking;
pub mod events;
pub mod posts;
