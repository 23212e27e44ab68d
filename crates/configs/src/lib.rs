use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

/// Where resource aggregates and collaborator maps live on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Subdirectory of `data_dir` holding `seed.json` and `data.json`.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// When false, data is loaded but never written back.
    #[serde(default = "default_persistent")]
    pub persistent: bool,
    #[serde(default = "default_contacts_file")]
    pub contacts_file: String,
    #[serde(default = "default_rates_file")]
    pub rates_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            prefix: default_prefix(),
            persistent: default_persistent(),
            contacts_file: default_contacts_file(),
            rates_file: default_rates_file(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Principal stamped into audit fields when a request names none.
    #[serde(default = "default_principal")]
    pub default_principal: String,
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { default_principal: default_principal(), default_page_size: default_page_size() }
    }
}

fn default_data_dir() -> String { "data".into() }
fn default_prefix() -> String { "resources".into() }
fn default_persistent() -> bool { true }
fn default_contacts_file() -> String { "contacts.json".into() }
fn default_rates_file() -> String { "rates.json".into() }
fn default_principal() -> String { "anonymous".into() }
fn default_page_size() -> usize { 25 }

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `CONFIG_PATH` (default `config.toml`); a missing file yields defaults.
    pub fn load_or_default() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_or_default_from(&path)
    }

    pub fn load_or_default_from(path: &str) -> Result<Self> {
        let mut cfg = if std::path::Path::new(path).exists() { load_from_file(path)? } else { AppConfig::default() };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize_from_env();
        self.server.normalize()?;
        self.storage.normalize_from_env();
        self.storage.validate()?;
        self.service.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize_from_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(dir) = std::env::var("DATA_DIR") {
            if !dir.trim().is_empty() {
                self.data_dir = dir;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.data_dir.trim().is_empty() {
            return Err(anyhow!("storage.data_dir is empty"));
        }
        let prefix = self.prefix.trim_matches('/');
        if prefix.is_empty() || prefix.contains("..") {
            return Err(anyhow!("storage.prefix must be a non-empty relative directory name"));
        }
        if self.contacts_file.trim().is_empty() || self.rates_file.trim().is_empty() {
            return Err(anyhow!("storage.contacts_file and storage.rates_file are required"));
        }
        Ok(())
    }

    pub fn contacts_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.data_dir).join(&self.contacts_file)
    }

    pub fn rates_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.data_dir).join(&self.rates_file)
    }
}

impl ServiceConfig {
    fn validate(&self) -> Result<()> {
        if self.default_principal.trim().is_empty() {
            return Err(anyhow!("service.default_principal is empty"));
        }
        if self.default_page_size == 0 {
            return Err(anyhow!("service.default_page_size must be >= 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let mut cfg: AppConfig = toml::from_str("").unwrap();
        cfg.storage.validate().unwrap();
        cfg.service.validate().unwrap();
        cfg.server.normalize().unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.storage.prefix, "resources");
        assert!(cfg.storage.persistent);
        assert_eq!(cfg.service.default_page_size, 25);
        assert_eq!(cfg.storage.contacts_path(), std::path::Path::new("data").join("contacts.json"));
    }

    #[test]
    fn partial_sections_fill_in_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [storage]
            prefix = "res"
            persistent = false
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.worker_threads, None);
        assert_eq!(cfg.storage.data_dir, "data");
        assert!(!cfg.storage.persistent);
        assert_eq!(cfg.service.default_principal, "anonymous");
    }

    #[test]
    fn load_or_default_from_reads_file_or_falls_back() {
        let missing = std::env::temp_dir().join(format!("configs_missing_{}.toml", std::process::id()));
        let cfg = AppConfig::load_or_default_from(&missing.to_string_lossy()).unwrap();
        assert_eq!(cfg.storage.prefix, "resources");
        assert_eq!(cfg.server.worker_threads, Some(4));

        let present = std::env::temp_dir().join(format!("configs_present_{}.toml", std::process::id()));
        std::fs::write(&present, "[service]\ndefault_page_size = 10\n").unwrap();
        let cfg = AppConfig::load_or_default_from(&present.to_string_lossy()).unwrap();
        assert_eq!(cfg.service.default_page_size, 10);

        std::fs::write(&present, "[service]\ndefault_page_size = 0\n").unwrap();
        assert!(AppConfig::load_or_default_from(&present.to_string_lossy()).is_err());
        let _ = std::fs::remove_file(&present);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut storage = StorageConfig::default();
        storage.prefix = "../etc".into();
        assert!(storage.validate().is_err());

        let service = ServiceConfig { default_principal: " ".into(), default_page_size: 10 };
        assert!(service.validate().is_err());

        let mut server = ServerConfig { host: "".into(), port: 0, worker_threads: None };
        assert!(server.normalize().is_err());
        server.port = 1;
        server.normalize().unwrap();
        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.worker_threads, Some(4));
    }
}
