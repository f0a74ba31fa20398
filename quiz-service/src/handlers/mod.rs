//! HTTP handlers for the quiz service.

pub mod cors;
pub mod health;
pub mod quiz;
