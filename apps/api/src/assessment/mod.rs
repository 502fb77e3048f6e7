pub mod handlers;
pub mod ranking;
pub mod scoring;
