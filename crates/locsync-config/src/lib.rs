use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocSyncConfig {
    pub source_lang: Option<String>,
    pub provider: Option<String>,
    pub timeout_ms: Option<u64>,
    pub cache_size: Option<usize>,
    pub fill: Option<FillCfg>,
    pub translate: Option<TranslateCfg>,
    pub schema: Option<SchemaCfg>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FillCfg {
    pub backup: Option<bool>,
    pub out: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranslateCfg {
    pub google_endpoint: Option<String>,
    pub libre_endpoint: Option<String>,
    pub libre_api_key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaCfg {
    pub out_dir: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{0}")]
    Other(String),
}

pub fn load_config() -> Result<LocSyncConfig, ConfigError> {
    // Search order: CWD/locsync.toml, $HOME/.config/locsync/locsync.toml
    let mut merged = LocSyncConfig::default();
    if let Ok(p) = std::env::current_dir() {
        let path = p.join("locsync.toml");
        if let Ok(s) = std::fs::read_to_string(&path) {
            if let Ok(cfg) = toml::from_str::<LocSyncConfig>(&s) {
                merged = merge(merged, cfg);
            }
        }
    }
    if let Some(base) = dirs::config_dir() {
        let path = base.join("locsync").join("locsync.toml");
        if let Ok(s) = std::fs::read_to_string(&path) {
            if let Ok(cfg) = toml::from_str::<LocSyncConfig>(&s) {
                merged = merge(merged, cfg);
            }
        }
    }
    Ok(merged)
}

fn merge(mut a: LocSyncConfig, b: LocSyncConfig) -> LocSyncConfig {
    if a.source_lang.is_none() {
        a.source_lang = b.source_lang;
    }
    if a.provider.is_none() {
        a.provider = b.provider;
    }
    if a.timeout_ms.is_none() {
        a.timeout_ms = b.timeout_ms;
    }
    if a.cache_size.is_none() {
        a.cache_size = b.cache_size;
    }
    a.fill = merge_opt(a.fill, b.fill, merge_fill);
    a.translate = merge_opt(a.translate, b.translate, merge_translate);
    a.schema = merge_opt(a.schema, b.schema, merge_schema);
    a
}

fn merge_opt<T: Default>(a: Option<T>, b: Option<T>, f: fn(T, T) -> T) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(f(a, b)),
        (None, Some(b)) => Some(b),
        (Some(a), None) => Some(a),
        (None, None) => None,
    }
}

fn merge_fill(mut a: FillCfg, b: FillCfg) -> FillCfg {
    if a.backup.is_none() {
        a.backup = b.backup;
    }
    if a.out.is_none() {
        a.out = b.out;
    }
    a
}
fn merge_translate(mut a: TranslateCfg, b: TranslateCfg) -> TranslateCfg {
    if a.google_endpoint.is_none() {
        a.google_endpoint = b.google_endpoint;
    }
    if a.libre_endpoint.is_none() {
        a.libre_endpoint = b.libre_endpoint;
    }
    if a.libre_api_key.is_none() {
        a.libre_api_key = b.libre_api_key;
    }
    a
}
fn merge_schema(mut a: SchemaCfg, b: SchemaCfg) -> SchemaCfg {
    if a.out_dir.is_none() {
        a.out_dir = b.out_dir;
    }
    a
}
