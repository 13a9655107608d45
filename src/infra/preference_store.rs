use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use crate::domain::repository::PreferenceStore;

use super::json_store::JsonStoreError;

/// JSONファイルによるPreferenceStore実装。
/// 中身は `{"theme": "dark", "lang": "ar"}` のような文字列マップ。
pub struct JsonPreferenceStore {
    path: PathBuf,
}

impl JsonPreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, JsonStoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl PreferenceStore for JsonPreferenceStore {
    type Error = JsonStoreError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&entries)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, &content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// ファイルI/O不要のインメモリ実装。
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    entries: BTreeMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    type Error = std::convert::Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// 保存期間（1年）。
const COOKIE_MAX_AGE: u64 = 365 * 24 * 60 * 60;

/// HTTPクッキーによるPreferenceStore実装。
/// リクエストの`Cookie`ヘッダから読み、書き込んだキーだけを`Set-Cookie`として返す。
#[derive(Debug, Clone, Default)]
pub struct CookiePreferenceStore {
    entries: BTreeMap<String, String>,
    changed: BTreeSet<String>,
}

impl CookiePreferenceStore {
    /// `name=value; name2=value2` 形式のヘッダを読む。壊れた組は無視する。
    pub fn from_header(header: &str) -> Self {
        let entries = header
            .split(';')
            .filter_map(|pair| pair.split_once('='))
            .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
            .filter(|(name, _)| !name.is_empty())
            .collect();
        Self {
            entries,
            changed: BTreeSet::new(),
        }
    }

    /// 変更されたキーの`Set-Cookie`値。
    pub fn set_cookie_headers(&self) -> Vec<String> {
        self.changed
            .iter()
            .filter_map(|name| {
                self.entries.get(name).map(|value| {
                    format!("{name}={value}; Path=/; Max-Age={COOKIE_MAX_AGE}; SameSite=Lax")
                })
            })
            .collect()
    }
}

impl PreferenceStore for CookiePreferenceStore {
    type Error = std::convert::Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries.insert(key.to_string(), value.to_string());
        self.changed.insert(key.to_string());
        Ok(())
    }
}
