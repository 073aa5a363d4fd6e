pub mod catalog;
pub mod chat;
pub mod intent;
pub mod matching;
pub mod responder;
pub mod session_store;
pub mod suggestions;

pub use catalog::Catalog;
pub use chat::ChatEngine;
pub use intent::Intent;
pub use session_store::SessionStore;
