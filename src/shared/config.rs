use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub backend: BackendConfig,
    pub shell: ShellConfig,
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// The backend consumed by the sync orchestrator. Treated as an opaque
/// HTTP/REST API; only the two replay endpoints are known here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub api_base: String,
    pub trips_path: String,
    pub documents_path: String,
}

/// App-shell parameters of the fetch proxy: the origin it intercepts,
/// the cache generation currently in service and the install manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    pub origin: String,
    pub cache_prefix: String,
    pub generation: String,
    pub static_assets: Vec<String>,
    pub push_server_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    pub auto_sync: bool,
    pub sync_interval: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: default_database_url(),
                max_connections: 5,
            },
            backend: BackendConfig {
                api_base: "https://triptuner.app".to_string(),
                trips_path: "/api/trips".to_string(),
                documents_path: "/api/documents".to_string(),
            },
            shell: ShellConfig {
                origin: "https://triptuner.app".to_string(),
                cache_prefix: "triptuner".to_string(),
                generation: "v1".to_string(),
                static_assets: vec![
                    "/".to_string(),
                    "/index.html".to_string(),
                    "/manifest.json".to_string(),
                    "/placeholder.svg".to_string(),
                ],
                push_server_key: None,
            },
            sync: SyncConfig {
                auto_sync: true,
                sync_interval: 300, // 5 minutes
            },
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("TRIPTUNER_DATABASE_URL") {
            if !v.trim().is_empty() {
                cfg.database.url = v;
            }
        }
        if let Ok(v) = std::env::var("TRIPTUNER_API_BASE") {
            if !v.trim().is_empty() {
                cfg.backend.api_base = v.trim_end_matches('/').to_string();
            }
        }
        if let Ok(v) = std::env::var("TRIPTUNER_ORIGIN") {
            if !v.trim().is_empty() {
                cfg.shell.origin = v.trim_end_matches('/').to_string();
            }
        }
        if let Ok(v) = std::env::var("TRIPTUNER_CACHE_GENERATION") {
            if !v.trim().is_empty() {
                cfg.shell.generation = v;
            }
        }
        if let Ok(v) = std::env::var("TRIPTUNER_PUSH_SERVER_KEY") {
            if !v.trim().is_empty() {
                cfg.shell.push_server_key = Some(v);
            }
        }
        if let Ok(v) = std::env::var("TRIPTUNER_AUTO_SYNC") {
            cfg.sync.auto_sync = parse_bool(&v, cfg.sync.auto_sync);
        }
        if let Ok(v) = std::env::var("TRIPTUNER_SYNC_INTERVAL") {
            if let Some(value) = parse_u64(&v) {
                cfg.sync.sync_interval = value.max(1);
            }
        }

        cfg
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.database.max_connections == 0 {
            return Err("Database max_connections must be greater than 0".to_string());
        }
        if url::Url::parse(&self.shell.origin).is_err() {
            return Err(format!("Shell origin is not a valid URL: {}", self.shell.origin));
        }
        if self.shell.generation.trim().is_empty() {
            return Err("Cache generation tag cannot be empty".to_string());
        }
        if self.shell.static_assets.is_empty() {
            return Err("Install manifest cannot be empty".to_string());
        }
        for asset in &self.shell.static_assets {
            if !asset.starts_with('/') {
                return Err(format!("Install manifest entry must be root-relative: {asset}"));
            }
        }
        Ok(())
    }
}

fn default_database_url() -> String {
    let dir = dirs::data_local_dir()
        .map(|d| d.join("triptuner"))
        .unwrap_or_else(|| std::path::PathBuf::from("./data"));
    format!("sqlite://{}?mode=rwc", dir.join("triptuner-sync.db").display())
}

fn parse_bool(s: &str, default: bool) -> bool {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

fn parse_u64(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}
