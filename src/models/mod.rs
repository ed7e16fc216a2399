// src/models/mod.rs

pub mod booking;
pub mod event;
pub mod post;
pub mod user;
