//! HTTP handlers. Thin by design: validation at the boundary, everything
//! else in the services layer.

pub mod chat;
pub mod matching;
