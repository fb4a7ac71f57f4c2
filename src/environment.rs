//! Deployment environment names and matching.

use std::fmt;

/// Deployment stages recognized by the file-name selectors.
///
/// Matching is case-insensitive; the canonical names returned by
/// [`Environment::as_str`] keep the conventional capitalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Development environment
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

impl Environment {
    /// Environment variable consulted by [`Environment::from_env`].
    pub const ENV_VAR: &'static str = "APP_ENVIRONMENT";

    /// Match `name` against the known stages, ignoring ASCII case.
    ///
    /// Anything else ("QA", "local", the empty string) returns `None`.
    /// An unrecognized environment is not an error; it means the base
    /// configuration file names apply.
    pub fn matching(name: &str) -> Option<Self> {
        [Self::Development, Self::Staging, Self::Production]
            .into_iter()
            .find(|stage| name.eq_ignore_ascii_case(stage.as_str()))
    }

    /// Read the deployment stage from the `APP_ENVIRONMENT` variable.
    ///
    /// Returns `None` when the variable is unset or does not name a
    /// known stage.
    pub fn from_env() -> Option<Self> {
        std::env::var(Self::ENV_VAR)
            .ok()
            .as_deref()
            .and_then(Self::matching)
    }

    /// Canonical name of the stage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "Development",
            Environment::Staging => "Staging",
            Environment::Production => "Production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_env::EnvGuard;

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(
            Environment::matching("Production"),
            Some(Environment::Production)
        );
        assert_eq!(
            Environment::matching("production"),
            Some(Environment::Production)
        );
        assert_eq!(
            Environment::matching("PRODUCTION"),
            Some(Environment::Production)
        );
        assert_eq!(Environment::matching("sTaGiNg"), Some(Environment::Staging));
        assert_eq!(
            Environment::matching("development"),
            Some(Environment::Development)
        );
    }

    #[test]
    fn test_unknown_names_do_not_match() {
        assert_eq!(Environment::matching("QA"), None);
        assert_eq!(Environment::matching("local"), None);
        assert_eq!(Environment::matching(""), None);
        // No trimming at this boundary; padded input is not a stage name.
        assert_eq!(Environment::matching(" Production"), None);
    }

    #[test]
    fn test_canonical_names() {
        assert_eq!(Environment::Development.as_str(), "Development");
        assert_eq!(Environment::Staging.as_str(), "Staging");
        assert_eq!(Environment::Production.as_str(), "Production");
        assert_eq!(Environment::Production.to_string(), "Production");
    }

    #[test]
    fn test_from_env_reads_app_environment() {
        let mut env = EnvGuard::new();

        env.set(Environment::ENV_VAR, "staging");
        assert_eq!(Environment::from_env(), Some(Environment::Staging));

        env.set(Environment::ENV_VAR, "qa");
        assert_eq!(Environment::from_env(), None);

        env.remove(Environment::ENV_VAR);
        assert_eq!(Environment::from_env(), None);
    }
}
