use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::carousel::CarouselLabels;
use crate::paths::NameOverrides;

const SETTINGS_FILENAME: &str = "config.json";

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "folio", "folio")
}

/// User-visible strings. The defaults match the Spanish site copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub image_alt: String,
    pub image_unavailable: String,
    pub load_failed_tooltip: String,
    pub read_more: String,
    pub read_less: String,
    pub contact_subject: String,
    pub sending: String,
    pub thanks: String,
    pub clipboard_fallback: String,
    pub back_to_top: String,
    pub intro_hint: String,
    pub view_project: String,
    pub contact_title: String,
    pub name_label: String,
    pub email_label: String,
    pub message_label: String,
    pub send: String,
}

impl Default for Labels {
    fn default() -> Self {
        let carousel = CarouselLabels::default();
        Self {
            image_alt: carousel.image_alt,
            image_unavailable: carousel.image_unavailable,
            load_failed_tooltip: carousel.load_failed_tooltip,
            read_more: "VER MÁS".to_string(),
            read_less: "VER MENOS".to_string(),
            contact_subject: "Contacto desde portafolio".to_string(),
            sending: "✓ Enviando...".to_string(),
            thanks: "¡Gracias por tu mensaje! Se abrirá tu cliente de correo para enviar el mensaje."
                .to_string(),
            clipboard_fallback: "No se pudo abrir el cliente de correo. El enlace se copió al portapapeles."
                .to_string(),
            back_to_top: "Volver arriba".to_string(),
            intro_hint: "Pulsa cualquier tecla para continuar".to_string(),
            view_project: "Ver proyecto".to_string(),
            contact_title: "Contacto".to_string(),
            name_label: "Nombre".to_string(),
            email_label: "Email".to_string(),
            message_label: "Mensaje".to_string(),
            send: "Enviar".to_string(),
        }
    }
}

impl Labels {
    pub fn carousel(&self) -> CarouselLabels {
        CarouselLabels {
            image_alt: self.image_alt.clone(),
            image_unavailable: self.image_unavailable.clone(),
            load_failed_tooltip: self.load_failed_tooltip.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Recipient of the contact form.
    pub contact_address: String,
    /// Exact image paths mapped to the form they are served under.
    pub name_overrides: BTreeMap<String, String>,
    pub autoplay_secs: u64,
    /// Show the intro overlay on startup.
    pub intro_overlay: bool,
    pub labels: Labels,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            contact_address: "hola@example.com".to_string(),
            name_overrides: BTreeMap::new(),
            autoplay_secs: 5,
            intro_overlay: true,
            labels: Labels::default(),
        }
    }
}

impl Settings {
    /// `<config_dir>/config.json`, when a home directory can be found.
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(SETTINGS_FILENAME))
    }

    /// Read settings from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("read settings {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&content)
            .with_context(|| format!("parse settings {}", path.display()))?;
        info!("Loaded settings from {}", path.display());
        Ok(settings.sanitized())
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => match Self::default_path() {
                Some(path) => Self::load(&path),
                None => {
                    warn!("Could not resolve a config directory, using default settings");
                    Ok(Self::default())
                }
            },
        }
    }

    fn sanitized(mut self) -> Self {
        if self.autoplay_secs == 0 {
            warn!("autoplay_secs must be positive, using 5");
            self.autoplay_secs = 5;
        }
        self
    }

    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_secs(self.autoplay_secs)
    }

    pub fn name_overrides(&self) -> NameOverrides {
        self.name_overrides
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.autoplay_interval(), Duration::from_secs(5));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{
                "contact_address": "iris@example.com",
                "autoplay_secs": 0,
                "name_overrides": { "Img/A b.png": "Img/A b.png" },
                "labels": { "read_more": "MORE" }
            }"#,
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.contact_address, "iris@example.com");
        assert_eq!(settings.autoplay_secs, 5);
        assert_eq!(settings.labels.read_more, "MORE");
        assert_eq!(settings.labels.read_less, "VER MENOS");
        assert_eq!(settings.name_overrides().get("Img/A b.png"), Some("Img/A b.png"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        let err = Settings::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parse settings"));
    }
}
