pub mod account;
pub mod reset;
pub mod session;
