use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the organization slug.
pub const ORG_ENV_VAR: &str = "BUILDKITE_ORGANIZATION_SLUG";
/// Environment variable holding the API token.
pub const TOKEN_ENV_VAR: &str = "BUILDKITE_TOKEN";

/// Configuration file structure.
///
/// Holds the static credential and endpoints the client is constructed
/// with. Files are loaded from the current directory or a given path, and
/// the two Buildkite environment variables override whatever the file says.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub buildkite: BuildkiteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildkiteConfig {
    /// Organization slug (e.g., 'acme-inc')
    pub organization_slug: Option<String>,

    /// Buildkite API access token
    pub api_token: Option<String>,

    /// REST API base URL
    #[serde(default = "default_rest_base_url")]
    pub rest_base_url: String,

    /// GraphQL API endpoint
    #[serde(default = "default_graphql_base_url")]
    pub graphql_base_url: String,
}

impl Default for BuildkiteConfig {
    fn default() -> Self {
        Self {
            organization_slug: None,
            api_token: None,
            rest_base_url: default_rest_base_url(),
            graphql_base_url: default_graphql_base_url(),
        }
    }
}

fn default_rest_base_url() -> String {
    "https://api.buildkite.com/v2".to_string()
}

fn default_graphql_base_url() -> String {
    "https://graphql.buildkite.com/v1".to_string()
}

impl Config {
    /// Load configuration from a file.
    ///
    /// Searches for configuration files in this order:
    /// 1. Specified path
    /// 2. ./buildkite.toml
    /// 3. ./buildkite.json
    /// 4. ./buildkite.yaml
    /// 5. ./buildkite.yml
    ///
    /// Returns default configuration if no file is found. Environment
    /// overrides are applied on top in every case.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    fn load_file(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            if path.exists() {
                return Self::load_from_path(path);
            }
            return Ok(Self::default());
        }

        let candidates = [
            "buildkite.toml",
            "buildkite.json",
            "buildkite.yaml",
            "buildkite.yml",
        ];

        for candidate in &candidates {
            let path = Path::new(candidate);
            if path.exists() {
                return Self::load_from_path(path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file path.
    fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        match extension {
            "toml" => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display())),
            "json" => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display())),
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display())),
            _ => toml::from_str(&contents)
                .or_else(|_| serde_json::from_str(&contents))
                .or_else(|_| serde_yaml::from_str(&contents))
                .with_context(|| format!("Failed to parse config file: {}", path.display())),
        }
    }

    /// Overlay the organization slug and token from the environment.
    ///
    /// Takes a lookup function so tests don't have to mutate the process
    /// environment.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(org) = lookup(ORG_ENV_VAR).filter(|v| !v.is_empty()) {
            self.buildkite.organization_slug = Some(org);
        }
        if let Some(token) = lookup(TOKEN_ENV_VAR).filter(|v| !v.is_empty()) {
            self.buildkite.api_token = Some(token);
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("yaml") | Some("yml") => serde_yaml::to_string(self)?,
            _ => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}
