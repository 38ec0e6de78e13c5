//! memberlink-crm - HTTP-backed CRM directory client and sync engine.

mod cache;
mod client;
mod config;
mod directory;
mod scan;

pub use client::CrmClient;
pub use config::Config;
pub use directory::CrmDirectory;
