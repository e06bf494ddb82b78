//! Stateless transforms between wire shapes and canonical values.

pub mod env;
pub mod optional;
pub mod provider;

pub use env::EnvMap;
pub use provider::{BitbucketSettings, GitHubSettings, ProviderSettings, SettingsMap};
