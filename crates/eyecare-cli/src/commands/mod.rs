pub mod advice;
pub mod config;
pub mod exercise;
pub mod history;
pub mod session;
