pub mod account;
pub mod registration;
