//! Default source layout for services and their gateway.
//!
//! Free functions that mutate a [`SourceList`] in place and return the
//! same handle, so calls chain the way builder extensions do. The layout
//! they install is deterministic: whatever implicit defaults a host put
//! in the list beforehand cannot survive [`initialize`].

use tracing::debug;

use crate::environment::Environment;
use crate::source::{ConfigSource, FileOptions, SourceKind, SourceList};

/// File-name stem for application settings.
const APP_SETTINGS_STEM: &str = "appsettings";

/// File-name stem for gateway-routing settings.
const OCELOT_STEM: &str = "ocelot";

/// Kinds that survive the initializer's filter: upstream chained views
/// and command-line overrides. Everything else is removed so host
/// defaults, environment-named files among them, cannot leak in.
const KEPT_KINDS: &[SourceKind] = &[SourceKind::Chained, SourceKind::CommandLine];

/// Application-settings file name for `environment`.
///
/// A known stage yields `appsettings.{environment}.json` with the input
/// casing preserved verbatim; anything else, `None` and the empty string
/// included, yields `appsettings.json`.
pub fn app_settings_file_name(environment: Option<&str>) -> String {
    file_name(APP_SETTINGS_STEM, environment)
}

/// Gateway-routing file name for `environment`, selected the same way as
/// [`app_settings_file_name`].
pub fn ocelot_file_name(environment: Option<&str>) -> String {
    file_name(OCELOT_STEM, environment)
}

fn file_name(stem: &str, environment: Option<&str>) -> String {
    match environment {
        Some(name) if Environment::matching(name).is_some() => {
            format!("{stem}.{name}.json")
        }
        _ => format!("{stem}.json"),
    }
}

/// Reset `sources` to the default layout for `environment`.
///
/// Keeps only chained and command-line entries, in their original
/// relative order, then appends the environment-selected application
/// settings file (optional, read once) and, last, the process
/// environment variables, which therefore override everything else.
///
/// Returns the same handle for chaining. Calling this again reapplies
/// the filter first, so the sources appended by a previous call are
/// removed before fresh ones go in; there is no deduplication guard.
pub fn initialize<'a>(
    sources: &'a mut SourceList,
    environment: Option<&str>,
) -> &'a mut SourceList {
    initialize_with(sources, environment, FileOptions::default())
}

/// [`initialize`] with explicit flags for the settings file, for callers
/// that want a missing file to fail the build.
pub fn initialize_with<'a>(
    sources: &'a mut SourceList,
    environment: Option<&str>,
    options: FileOptions,
) -> &'a mut SourceList {
    sources.retain_kinds(KEPT_KINDS);
    let file = app_settings_file_name(environment);
    debug!(file = %file, kept = sources.len(), "initializing configuration sources");
    sources.push(ConfigSource::json_file_with(file, options));
    sources.push(ConfigSource::env_vars());
    sources
}

/// Append the gateway-routing file for `environment`.
///
/// Independent of [`initialize`]: nothing is filtered and no
/// environment-variable source is added, so callers control where the
/// routing file sits relative to everything else.
pub fn add_ocelot_config<'a>(
    sources: &'a mut SourceList,
    environment: Option<&str>,
) -> &'a mut SourceList {
    add_ocelot_config_with(sources, environment, FileOptions::default())
}

/// [`add_ocelot_config`] with explicit flags for the routing file.
pub fn add_ocelot_config_with<'a>(
    sources: &'a mut SourceList,
    environment: Option<&str>,
    options: FileOptions,
) -> &'a mut SourceList {
    let file = ocelot_file_name(environment);
    debug!(file = %file, "adding gateway routing configuration");
    sources.push(ConfigSource::json_file_with(file, options));
    sources
}
