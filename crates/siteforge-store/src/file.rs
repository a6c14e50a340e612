//! JSON-file-backed site store
//!
//! Keeps all records in a single versioned `sites.json` under the data
//! directory. A backup of the previous file is taken before every save,
//! and a tokio mutex serializes writers so the load-check-save cycle
//! (including the slug uniqueness check) is atomic within the process.

use crate::error::{Result, StoreError};
use crate::store::SiteStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use siteforge_core::Site;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

const STORE_VERSION: u32 = 1;
const STORE_FILE: &str = "sites.json";
const STORE_BACKUP: &str = "sites.json.backup";

#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    updated_at: DateTime<Utc>,
    /// Records indexed by site id
    sites: HashMap<String, Site>,
}

impl Default for StoreFile {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            updated_at: Utc::now(),
            sites: HashMap::new(),
        }
    }
}

/// File-backed [`SiteStore`]
pub struct JsonFileStore {
    data_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE)
    }

    fn backup_path(&self) -> PathBuf {
        self.data_dir.join(STORE_BACKUP)
    }

    async fn load(&self) -> Result<StoreFile> {
        let path = self.store_path();
        if !path.exists() {
            tracing::debug!("Store file not found, starting empty");
            return Ok(StoreFile::default());
        }

        let content = fs::read_to_string(&path).await?;
        let store: StoreFile = serde_json::from_str(&content)?;

        if store.version > STORE_VERSION {
            return Err(StoreError::StateError(format!(
                "store file version {} is newer than supported version {}",
                store.version, STORE_VERSION
            )));
        }

        Ok(store)
    }

    async fn save(&self, store: &mut StoreFile) -> Result<()> {
        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir).await?;
            tracing::debug!("Created store directory: {}", self.data_dir.display());
        }

        let path = self.store_path();
        let backup = self.backup_path();

        if path.exists() {
            if backup.exists() {
                fs::remove_file(&backup).await?;
            }
            fs::rename(&path, &backup).await?;
        }

        store.updated_at = Utc::now();
        let content = serde_json::to_string_pretty(store)?;
        fs::write(&path, content).await?;

        tracing::debug!("Saved store with {} records", store.sites.len());
        Ok(())
    }
}

#[async_trait]
impl SiteStore for JsonFileStore {
    async fn insert(&self, site: &Site) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut store = self.load().await?;

        if store.sites.contains_key(&site.id) {
            return Err(StoreError::Conflict(format!(
                "site id {} already exists",
                site.id
            )));
        }
        if store
            .sites
            .values()
            .any(|s| s.repository_slug == site.repository_slug)
        {
            return Err(StoreError::Conflict(format!(
                "repository slug {} is already taken",
                site.repository_slug
            )));
        }

        store.sites.insert(site.id.clone(), site.clone());
        self.save(&mut store).await
    }

    async fn update(&self, site: &Site) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut store = self.load().await?;

        if !store.sites.contains_key(&site.id) {
            return Err(StoreError::NotFound(site.id.clone()));
        }
        store.sites.insert(site.id.clone(), site.clone());
        self.save(&mut store).await
    }

    async fn remove(&self, id: &str) -> Result<Site> {
        let _guard = self.write_lock.lock().await;
        let mut store = self.load().await?;

        let site = store
            .sites
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        self.save(&mut store).await?;
        Ok(site)
    }

    async fn get(&self, id: &str) -> Result<Option<Site>> {
        Ok(self.load().await?.sites.get(id).cloned())
    }

    async fn find_by_slug(&self, repository_slug: &str) -> Result<Option<Site>> {
        Ok(self
            .load()
            .await?
            .sites
            .into_values()
            .find(|s| s.repository_slug == repository_slug))
    }

    async fn list(&self) -> Result<Vec<Site>> {
        let mut sites: Vec<Site> = self.load().await?.sites.into_values().collect();
        sites.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(sites)
    }
}
