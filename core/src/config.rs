//! Policy file loading
//!
//! Policies are JSON files holding an [`RbacConfig`]. The default location is
//! `~/.dashgate/policy.json`, overridable with `DASHGATE_POLICY`.

use crate::error::{ConfigError, Result};
use crate::rbac::RbacConfig;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Environment variable naming an explicit policy file
pub const POLICY_PATH_ENV: &str = "DASHGATE_POLICY";

/// Get the default config directory
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".dashgate")
}

/// Get the policy file path, honoring `DASHGATE_POLICY`
pub fn default_policy_path() -> PathBuf {
    match std::env::var(POLICY_PATH_ENV) {
        Ok(path) if !path.is_empty() => {
            tracing::debug!("Policy path from {}: {}", POLICY_PATH_ENV, path);
            PathBuf::from(path)
        }
        _ => get_config_dir().join("policy.json"),
    }
}

/// Parse and validate a policy document.
pub fn parse_policy_config(contents: &str) -> Result<RbacConfig> {
    let config: RbacConfig = serde_json::from_str(contents)
        .map_err(|e| ConfigError::Parse(format!("Failed to parse policy JSON: {}", e)))?;

    // Unknown roles or permissions must fail at load time, not at query time.
    config.validate()?;
    Ok(config)
}

/// Load and validate a policy file
pub async fn load_policy_config(path: &Path) -> Result<RbacConfig> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()).into());
    }

    let contents = fs::read_to_string(path).await?;
    let config = parse_policy_config(&contents)?;

    tracing::info!(
        "Loaded policy from {} ({} roles configured)",
        path.display(),
        config.roles.len()
    );
    Ok(config)
}

/// Save a policy file
pub async fn save_policy_config(path: &Path, config: &RbacConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(config)
        .map_err(|e| ConfigError::Parse(format!("Failed to serialize policy: {}", e)))?;

    fs::write(path, json).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashgateError;
    use crate::rbac::Role;

    #[test]
    fn test_config_paths() {
        let config_dir = get_config_dir();
        assert!(config_dir.ends_with(".dashgate"));
    }

    #[test]
    fn test_parse_rejects_unknown_permission() {
        let err = parse_policy_config(r#"{"roles":{"admin":["projects.archive"]}}"#).unwrap_err();
        assert!(matches!(err, DashgateError::Config(ConfigError::Invalid(_))));
        assert!(err.is_configuration_error());

        let err = parse_policy_config("not json").unwrap_err();
        assert!(matches!(err, DashgateError::Config(ConfigError::Parse(_))));
    }

    #[test]
    fn test_parse_rejects_duplicate_role() {
        let err = parse_policy_config(r#"{"roles":{"admin":["billing.manage"],"admin":[]}}"#)
            .unwrap_err();
        assert!(matches!(err, DashgateError::Config(ConfigError::Parse(_))));
        assert!(err.is_configuration_error());
        assert!(err.to_string().contains("'admin' is configured more than once"));

        // Distinct roles still load.
        let config =
            parse_policy_config(r#"{"roles":{"admin":["billing.manage"],"member":[]}}"#).unwrap();
        assert_eq!(config.roles["admin"], vec!["billing.manage".to_string()]);
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("policy.json");

        let config = RbacConfig::default()
            .with_role(Role::Admin, ["projects.create", "billing.manage"])
            .with_role(Role::Member, Vec::<String>::new());
        save_policy_config(&path, &config).await.unwrap();

        let loaded = load_policy_config(&path).await.unwrap();
        assert_eq!(loaded, config);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_policy_config(&dir.path().join("absent.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, DashgateError::Config(ConfigError::NotFound(_))));
    }
}
