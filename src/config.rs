use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub container: ContainerConfig,
    pub ledger_index: LedgerIndexConfig,
    pub validator: ValidatorConfig,
    pub probes: ProbesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    /// Directory served for any path not matched by a route.
    pub public_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".into(),
            public_dir: "public".into(),
        }
    }
}

/// How the container runtime is asked about the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerMode {
    /// Inspect the container and read its running flag.
    #[default]
    Inspect,
    /// List containers filtered by name and read the status text ("Up 3 hours").
    List,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    pub name: String,
    pub mode: ContainerMode,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            name: "mainnet".into(),
            mode: ContainerMode::default(),
        }
    }
}

/// Which Horizon endpoint feeds the ledger snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerIndexEndpoint {
    /// `GET /` root status document.
    #[default]
    Root,
    /// `GET /ledgers?order=desc&limit=1`, first record.
    LatestLedger,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LedgerIndexConfig {
    pub base_url: String,
    pub endpoint: LedgerIndexEndpoint,
}

impl Default for LedgerIndexConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:31401".into(),
            endpoint: LedgerIndexEndpoint::default(),
        }
    }
}

/// Deployment mode for reaching the validator's status interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidatorMode {
    /// No access; validator fields are derived from the Horizon snapshot.
    #[default]
    Disabled,
    /// Run `command` inside the container.
    Exec,
    /// Query `{url}/info` directly on the host.
    Http,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub mode: ValidatorMode,
    pub command: Vec<String>,
    pub url: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            mode: ValidatorMode::default(),
            command: vec![
                "stellar-core".into(),
                "http-command".into(),
                "info".into(),
            ],
            url: "http://localhost:11626".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbesConfig {
    /// Upper bound for each probe per request.
    pub timeout_ms: u64,
}

impl Default for ProbesConfig {
    fn default() -> Self {
        Self { timeout_ms: 5000 }
    }
}

impl ProbesConfig {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }
}

impl AppConfig {
    /// Load from `CONFIG_FILE` (default `config.toml`), falling back to defaults when
    /// the default file is absent, then apply environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let explicit = std::env::var("CONFIG_FILE").ok();
        let path = explicit.clone().unwrap_or_else(|| "config.toml".into());
        let mut config: AppConfig = match std::fs::read_to_string(&path) {
            Ok(s) => toml::from_str(&s)?,
            Err(e) if explicit.is_none() && e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("{} not found, using defaults", path);
                AppConfig::default()
            }
            Err(e) => return Err(anyhow::anyhow!("reading {}: {}", path, e)),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Override selected keys from the environment (`CONTAINER_NAME`, `LEDGER_INDEX_URL`, `PORT`).
    /// The lookup is injected so tests don't touch process env.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("CONTAINER_NAME") {
            self.container.name = name;
        }
        if let Some(url) = lookup("LEDGER_INDEX_URL") {
            self.ledger_index.base_url = url;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| anyhow::anyhow!("PORT must be a port number, got {:?}: {}", port, e))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.container.name.trim().is_empty(),
            "container.name must be non-empty"
        );
        anyhow::ensure!(
            reqwest::Url::parse(&self.ledger_index.base_url).is_ok(),
            "ledger_index.base_url must be a valid URL, got {:?}",
            self.ledger_index.base_url
        );
        if self.validator.mode == ValidatorMode::Exec {
            anyhow::ensure!(
                self.validator.command.first().is_some_and(|c| !c.is_empty()),
                "validator.command must be non-empty in exec mode"
            );
        }
        if self.validator.mode == ValidatorMode::Http {
            anyhow::ensure!(
                reqwest::Url::parse(&self.validator.url).is_ok(),
                "validator.url must be a valid URL, got {:?}",
                self.validator.url
            );
        }
        anyhow::ensure!(
            self.probes.timeout_ms > 0,
            "probes.timeout_ms must be > 0, got {}",
            self.probes.timeout_ms
        );
        Ok(())
    }
}
