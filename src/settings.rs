//! Host settings store and the values the tool reads from it.

use crate::render::Rgb;
use std::collections::BTreeMap;
use std::path::Path;

pub const UV_COLOR_SECTION: &str = "Screen";
pub const UV_COLOR_KEY: &str = "ColorUV";

/// Packed `0x00BBGGRR` wireframe color used when the setting is absent.
pub const DEFAULT_UV_COLOR: u32 = 14_270_285;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SettingsError>;

/// Read-only access to host-wide settings grouped by section.
pub trait SettingsStore {
    fn load_u32(&self, section: &str, key: &str) -> Option<u32>;
}

/// Wireframe color from `Screen/ColorUV`.
pub fn load_uv_color<S: SettingsStore + ?Sized>(settings: &S) -> Rgb {
    let packed = settings
        .load_u32(UV_COLOR_SECTION, UV_COLOR_KEY)
        .unwrap_or(DEFAULT_UV_COLOR);
    Rgb::from_packed_bgr(packed)
}

/// Settings kept as `{ "Section": { "Key": value } }` JSON.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct JsonSettings {
    sections: BTreeMap<String, BTreeMap<String, serde_json::Value>>,
}

impl JsonSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let settings: JsonSettings = serde_json::from_str(&json)?;
        Ok(settings)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn set_u32(&mut self, section: &str, key: &str, value: u32) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), serde_json::Value::from(value));
    }
}

impl SettingsStore for JsonSettings {
    fn load_u32(&self, section: &str, key: &str) -> Option<u32> {
        let value = self.sections.get(section)?.get(key)?;
        let parsed = match value {
            serde_json::Value::String(text) => text.trim().parse::<u64>().ok(),
            other => other.as_u64(),
        };
        match parsed.and_then(|v| u32::try_from(v).ok()) {
            Some(v) => Some(v),
            None => {
                log::warn!("setting {}/{} is not a 32-bit unsigned value: {}", section, key, value);
                None
            }
        }
    }
}
