//! Configuration source descriptors and the ordered source list.
//!
//! [`SourceList`] is the mutable, ordered collection the functions in
//! [`crate::init`] operate on. Entries are descriptors only: no file is
//! opened and no environment variable is read until [`SourceList::build`]
//! lowers them, in list order, into the `config` crate. Its merge is
//! last-source-wins, so position in the list is precedence.

use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat, Map, Value};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ConfigError;

/// Separator for nested keys in environment variables, so `SERVER__PORT`
/// maps to `server.port`.
const ENV_SEPARATOR: &str = "__";

/// Separator between an environment-variable prefix and the key proper.
const ENV_PREFIX_SEPARATOR: &str = "_";

/// Classification of a [`ConfigSource`], used by the kind filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Forwards an already-built configuration view.
    Chained,
    /// Key/value overrides captured from the command line.
    CommandLine,
    /// A JSON settings file resolved at build time.
    JsonFile,
    /// Process environment variables.
    EnvVars,
}

/// Flags for a JSON file source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileOptions {
    /// Missing files are skipped instead of failing the build.
    pub optional: bool,
    /// Carried on the descriptor for callers that track it; builds read
    /// the file once either way.
    pub reload_on_change: bool,
}

impl Default for FileOptions {
    fn default() -> Self {
        FileOptions {
            optional: true,
            reload_on_change: false,
        }
    }
}

/// A registered configuration source awaiting build.
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// An already-built configuration merged in as-is, preserving
    /// whatever upstream setup produced it.
    Chained(Config),
    /// Command-line overrides as key/value pairs. Values stay strings,
    /// the way command-line providers deliver them; dotted keys nest.
    CommandLine(Vec<(String, String)>),
    /// A JSON settings file.
    JsonFile {
        name: String,
        optional: bool,
        reload_on_change: bool,
    },
    /// Process environment variables, optionally restricted to a prefix.
    EnvVars { prefix: Option<String> },
}

impl ConfigSource {
    /// An optional JSON file that is read once.
    pub fn json_file(name: impl Into<String>) -> Self {
        Self::json_file_with(name, FileOptions::default())
    }

    /// A JSON file with explicit flags.
    pub fn json_file_with(name: impl Into<String>, options: FileOptions) -> Self {
        ConfigSource::JsonFile {
            name: name.into(),
            optional: options.optional,
            reload_on_change: options.reload_on_change,
        }
    }

    /// All process environment variables.
    pub fn env_vars() -> Self {
        ConfigSource::EnvVars { prefix: None }
    }

    /// Environment variables whose names start with `prefix` followed by
    /// an underscore. The prefix is stripped from the resulting keys.
    pub fn env_vars_with_prefix(prefix: impl Into<String>) -> Self {
        ConfigSource::EnvVars {
            prefix: Some(prefix.into()),
        }
    }

    /// An already-built configuration view.
    pub fn chained(config: Config) -> Self {
        ConfigSource::Chained(config)
    }

    /// Command-line key/value overrides.
    pub fn command_line<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        ConfigSource::CommandLine(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// The kind used by [`SourceList::retain_kinds`].
    pub fn kind(&self) -> SourceKind {
        match self {
            ConfigSource::Chained(_) => SourceKind::Chained,
            ConfigSource::CommandLine(_) => SourceKind::CommandLine,
            ConfigSource::JsonFile { .. } => SourceKind::JsonFile,
            ConfigSource::EnvVars { .. } => SourceKind::EnvVars,
        }
    }
}

/// Ordered, mutable list of configuration sources.
///
/// The functions in [`crate::init`] mutate the list in place through
/// `&mut` and hand the same reference back for chaining; the list itself
/// is never replaced.
#[derive(Debug, Clone, Default)]
pub struct SourceList {
    entries: Vec<ConfigSource>,
    base_dir: Option<PathBuf>,
}

impl SourceList {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative JSON file names against `dir` at build time.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Base directory for relative JSON file names, if one is set.
    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    /// Number of registered sources.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no sources are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Source at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&ConfigSource> {
        self.entries.get(index)
    }

    /// Append a source. Later sources override earlier ones when built.
    pub fn push(&mut self, source: ConfigSource) {
        self.entries.push(source);
    }

    /// Remove and return the source at `index`, shifting the remainder
    /// left.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> ConfigSource {
        self.entries.remove(index)
    }

    /// Drop, in place, every source whose kind is not in `kinds`.
    ///
    /// Survivors keep their relative order; each entry is inspected
    /// exactly once. An empty list stays empty.
    pub fn retain_kinds(&mut self, kinds: &[SourceKind]) {
        self.entries.retain(|entry| kinds.contains(&entry.kind()));
    }

    /// Iterate over the registered sources in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ConfigSource> {
        self.entries.iter()
    }

    /// Lower every descriptor, in list order, into the `config` crate
    /// and build the merged view.
    ///
    /// # Errors
    ///
    /// [`ConfigError::FileNotFound`] when a non-optional JSON file is
    /// absent, [`ConfigError::Source`] for anything the underlying
    /// builder reports, malformed JSON included.
    pub fn build(&self) -> Result<Config, ConfigError> {
        debug!(sources = self.entries.len(), "building configuration");
        let mut builder = Config::builder();
        for entry in &self.entries {
            builder = match entry {
                ConfigSource::Chained(view) => builder.add_source(view.clone()),
                ConfigSource::CommandLine(pairs) => builder.add_source(CommandLineValues {
                    pairs: pairs.clone(),
                }),
                ConfigSource::JsonFile { name, optional, .. } => {
                    let path = self.resolve(name);
                    if !*optional && !path.exists() {
                        return Err(ConfigError::file_not_found(path.display().to_string()));
                    }
                    builder.add_source(
                        File::new(path.to_str().unwrap_or_default(), FileFormat::Json)
                            .required(!*optional),
                    )
                }
                ConfigSource::EnvVars { prefix } => {
                    builder.add_source(env_source(prefix.as_deref()))
                }
            };
        }
        builder.build().map_err(ConfigError::from)
    }

    /// Build and deserialize the merged view into `T`.
    ///
    /// # Errors
    ///
    /// Everything [`SourceList::build`] reports, plus
    /// [`ConfigError::Parse`] when the merged values do not fit `T`.
    pub fn load<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        self.build()?
            .try_deserialize()
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn resolve(&self, name: &str) -> PathBuf {
        match &self.base_dir {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        }
    }
}

/// Environment-variable source configured the way services expect:
/// `__` nests keys, empty values are skipped, scalar values are parsed.
fn env_source(prefix: Option<&str>) -> config::Environment {
    let source = match prefix {
        Some(prefix) => config::Environment::with_prefix(prefix)
            .prefix_separator(ENV_PREFIX_SEPARATOR),
        None => config::Environment::default(),
    };
    source
        .separator(ENV_SEPARATOR)
        .ignore_empty(true)
        .try_parsing(true)
}

/// Adapter exposing command-line pairs to the underlying builder.
#[derive(Debug, Clone)]
struct CommandLineValues {
    pairs: Vec<(String, String)>,
}

impl config::Source for CommandLineValues {
    fn clone_into_box(&self) -> Box<dyn config::Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, config::ConfigError> {
        let origin = "command line".to_owned();
        Ok(self
            .pairs
            .iter()
            .map(|(key, value)| (key.clone(), Value::new(Some(&origin), value.clone())))
            .collect())
    }
}
