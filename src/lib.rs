//! Deterministic configuration-source bootstrap for services.
//!
//! [`initialize`] rewrites a [`SourceList`] so that settings load with a
//! fixed precedence, lowest to highest:
//!
//! 1. chained views and command-line overrides preserved from the caller
//! 2. `appsettings.json`, or `appsettings.{environment}.json` when the
//!    deployment environment names a known stage
//! 3. process environment variables
//!
//! [`add_ocelot_config`] registers the gateway-routing file the same way,
//! without touching anything already in the list. File parsing, merging,
//! and environment-variable enumeration are the `config` crate's job;
//! this crate only decides which sources are registered and in what
//! order.
//!
//! ```no_run
//! use config_bootstrap::{initialize, SourceList};
//!
//! # fn main() -> Result<(), config_bootstrap::ConfigError> {
//! let mut sources = SourceList::new();
//! initialize(&mut sources, Some("Production"));
//! let settings = sources.build()?;
//! # Ok(())
//! # }
//! ```

pub mod environment;
pub mod error;
pub mod init;
pub mod source;

pub use environment::Environment;
pub use error::ConfigError;
pub use init::{
    add_ocelot_config, add_ocelot_config_with, app_settings_file_name, initialize,
    initialize_with, ocelot_file_name,
};
pub use source::{ConfigSource, FileOptions, SourceKind, SourceList};
