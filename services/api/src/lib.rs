//! ML Concept Visualizer API Library Crate
//!
//! This library contains the web service logic: configuration, application
//! state, the explanation handler and routing. The `api` binary is a thin
//! wrapper around it.

pub mod config;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod router;
pub mod state;
