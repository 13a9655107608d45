use super::model::locale::{Language, Theme};
use super::repository::PreferenceStore;

pub const THEME_KEY: &str = "theme";
pub const LANG_KEY: &str = "lang";

/// UI設定。未保存・不明な値はデフォルト（light / en）。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub theme: Theme,
    pub language: Language,
}

impl Preferences {
    /// 保存済みの設定を読む。読めない値は無視してデフォルトを使う。
    pub fn restore<S: PreferenceStore>(store: &S) -> Self {
        let theme = read_key(store, THEME_KEY)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        let language = read_key(store, LANG_KEY)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        Self { theme, language }
    }

    pub fn persist_theme<S: PreferenceStore>(&self, store: &mut S) {
        write_key(store, THEME_KEY, self.theme.as_str());
    }

    pub fn persist_language<S: PreferenceStore>(&self, store: &mut S) {
        write_key(store, LANG_KEY, self.language.code());
    }
}

fn read_key<S: PreferenceStore>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read preference");
            None
        }
    }
}

fn write_key<S: PreferenceStore>(store: &mut S, key: &str, value: &str) {
    if let Err(e) = store.set(key, value) {
        tracing::warn!(key, value, error = %e, "failed to persist preference");
    }
}
