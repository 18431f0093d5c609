pub mod application;
pub mod cache;
pub mod commands;
pub mod docs;
pub mod http;
pub mod provider;
pub mod release;
pub mod runtime;
