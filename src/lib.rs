pub mod config;
pub mod error;
pub mod gemini;
pub mod ingredients;
pub mod models;
pub mod prompt;
pub mod recipes;
pub mod routes;
pub mod state;
