//! chat-service: conversational assistant microservice for the SIPORTS
//! maritime trade-show platform.
//!
//! The service holds all conversation state in memory: a session store keyed
//! by session id, a keyword-driven intent/sentiment classifier, a template
//! response generator fed by an editable catalog, and a deterministic
//! profile compatibility scorer for the networking endpoints.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod observability;
pub mod services;
pub mod startup;
