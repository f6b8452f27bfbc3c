use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// JSON catalog replacing the embedded lineup.
    pub catalog_path: Option<PathBuf>,
    /// JSON blog feed replacing the embedded posts.
    pub blog_path: Option<PathBuf>,
    pub featured_count: usize,
    pub latest_posts: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 9000)),
            catalog_path: None,
            blog_path: None,
            featured_count: 3,
            latest_posts: 3,
        }
    }
}

impl ServerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading server config {}", path_ref.display()))?;
        let config: ServerConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing server config {}", path_ref.display()))?;
        Ok(config)
    }

    /// Command-line flags win over whatever the YAML file said.
    pub fn with_overrides(mut self, catalog: Option<PathBuf>, bind: Option<SocketAddr>) -> Self {
        if catalog.is_some() {
            self.catalog_path = catalog;
        }
        if let Some(bind) = bind {
            self.bind = bind;
        }
        self
    }
}
