use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn portfolio_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".portfolio")
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub log_level: String,
    pub access_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
    pub session_dir: PathBuf,
}

#[derive(Default)]
pub struct AppConfigOverrides {
    pub log_level: Option<String>,
    pub catalog_path: Option<PathBuf>,
    pub session_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn default_path() -> PathBuf {
        portfolio_dir().join("config.toml")
    }

    pub fn load_from(path: Option<PathBuf>) -> Self {
        let path = path.unwrap_or_else(Self::default_path);
        let cfg = config::Config::builder()
            .add_source(
                config::File::from(path.clone())
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .build()
            .unwrap_or_else(|e| {
                eprintln!("Ignoring unreadable config {}: {}", path.display(), e);
                config::Config::default()
            });

        let log_level = cfg
            .get_string("log_level")
            .unwrap_or_else(|_| "info".to_string());
        let access_code = cfg
            .get_string("access_code")
            .unwrap_or_else(|_| access::DEFAULT_ACCESS_CODE.to_string());
        let catalog_path = cfg.get_string("catalog_path").ok().map(PathBuf::from);
        let session_dir = cfg
            .get_string("session_dir")
            .map(PathBuf::from)
            .unwrap_or_else(|_| portfolio_dir());

        Self {
            log_level,
            access_code,
            catalog_path,
            session_dir,
        }
    }

    pub fn apply_overrides(mut self, ov: &AppConfigOverrides) -> Self {
        if let Some(l) = &ov.log_level {
            self.log_level = l.clone();
        }
        if let Some(c) = &ov.catalog_path {
            self.catalog_path = Some(c.clone());
        }
        if let Some(d) = &ov.session_dir {
            self.session_dir = d.clone();
        }
        self
    }

    pub fn save_to(&self, path: Option<PathBuf>) -> std::io::Result<()> {
        let path = path.unwrap_or_else(Self::default_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = toml::to_string(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, data)
    }
}
