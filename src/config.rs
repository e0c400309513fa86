use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct ConfigSnapshot {
    pub source: Option<String>,
    pub cluster: Option<String>,
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct KindtableConfigFile {
    #[serde(default)]
    cluster: Option<String>,
    #[serde(default)]
    namespace: Option<String>,
}

pub fn load() -> Result<ConfigSnapshot> {
    let Some(path) = discover_config_path() else {
        return Ok(ConfigSnapshot::default());
    };

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let parsed: KindtableConfigFile = serde_yaml::from_str(&raw)
        .with_context(|| format!("failed to parse config {}", path.display()))?;

    Ok(ConfigSnapshot {
        source: Some(path.display().to_string()),
        cluster: parsed.cluster,
        namespace: parsed.namespace,
    })
}

fn discover_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("KINDTABLE_CONFIG")
        && !path.trim().is_empty()
    {
        return Some(PathBuf::from(path));
    }

    let cwd_candidates = [
        PathBuf::from("kindtable.yaml"),
        PathBuf::from("kindtable.yml"),
        PathBuf::from(".kindtable.yaml"),
    ];
    for candidate in cwd_candidates {
        if candidate.exists() {
            return Some(candidate);
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        let user_candidates = [
            PathBuf::from(&home).join(".config/kindtable/config.yaml"),
            PathBuf::from(&home).join(".config/kindtable/config.yml"),
            PathBuf::from(&home).join(".kindtable.yaml"),
        ];
        for candidate in user_candidates {
            if candidate.exists() {
                return Some(candidate);
            }
        }
    }

    None
}
