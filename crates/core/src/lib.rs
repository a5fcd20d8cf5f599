pub mod config;
pub mod error;
pub mod repository;
pub mod types;

pub use config::{SiteConfig, parse_site_toml};
pub use error::{Error, Result};
pub use repository::PageRepository;
pub use types::*;
