pub mod application;
pub mod opportunity;
pub mod user;
