//! Quiz generation service: turns a topic into a multiple-choice quiz using a
//! generative text model.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
