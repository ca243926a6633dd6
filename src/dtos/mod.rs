pub mod module;
pub mod session;
pub mod user;
