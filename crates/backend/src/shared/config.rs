use contracts::enums::dataset_kind::DatasetKind;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub host_api: HostApiConfig,
    pub reports: ReportsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HostApiConfig {
    /// Base URL of the host platform API
    pub base_url: String,
    /// Path of the account endpoint (relative to base_url)
    pub account_path: String,
    /// Path of the variable store endpoints (relative to base_url)
    pub variables_path: String,
    /// How long to wait for the account identifier before giving up
    pub account_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportsConfig {
    /// Report path for the materials pivot; `{account}` is substituted
    pub material_path: String,
    /// Report path for the customers pivot; `{account}` is substituted
    pub customer_path: String,
}

impl ReportsConfig {
    pub fn path_for(&self, kind: DatasetKind) -> &str {
        match kind {
            DatasetKind::Material => &self.material_path,
            DatasetKind::Customer => &self.customer_path,
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
port = 3000

[host_api]
base_url = "http://localhost:8080"
account_path = "account"
variables_path = "variables"
account_timeout_secs = 10

[reports]
material_path = "analytics/2/{account}/ds_Top_Material_Child_Table_Popula_A00/report/Child_table_top_material_Admin_A00"
customer_path = "process-report/2/{account}/Sales_Return_Process_A00/CUSTOMER_TOP_PIVOT_A00"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.host_api.account_timeout_secs, 10);
        assert!(config
            .reports
            .path_for(DatasetKind::Material)
            .contains("{account}"));
        assert!(config
            .reports
            .path_for(DatasetKind::Customer)
            .contains("CUSTOMER_TOP_PIVOT"));
    }
}
