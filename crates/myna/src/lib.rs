pub mod credentials;
pub mod errors;
pub mod models;
pub mod prompt;
pub mod providers;
pub mod publisher;
pub mod room;
pub mod search;
pub mod session;
