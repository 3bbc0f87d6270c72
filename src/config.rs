//! src/config.rs
//!
//! Configuration (fichier TOML optionnel).
//!
//! ```toml
//! error_delay_ms = 1500
//! fraction_digits = 8
//! error_marker = "Error"
//! chain_result = false
//! ```
//!
//! Fichier absent à l’emplacement par défaut => valeurs par défaut.
//! Fichier explicite absent, ou TOML invalide => erreur.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::noyau::tampon::{
    Reglages, CHIFFRES_DEFAUT, CHIFFRES_MAX, DELAI_ERREUR_DEFAUT, MARQUEUR_ERREUR_DEFAUT,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("lecture de {chemin}: {source}")]
    Io {
        chemin: PathBuf,
        source: std::io::Error,
    },
    #[error("TOML invalide dans {chemin}: {source}")]
    Toml {
        chemin: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub error_delay_ms: u64,
    pub fraction_digits: usize,
    pub error_marker: String,
    pub chain_result: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            error_delay_ms: DELAI_ERREUR_DEFAUT.as_millis() as u64,
            fraction_digits: CHIFFRES_DEFAUT,
            error_marker: MARQUEUR_ERREUR_DEFAUT.to_string(),
            chain_result: false,
        }
    }
}

impl Config {
    /// `<config_dir>/calculatrice/config.toml`
    pub fn chemin_defaut() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("calculatrice").join("config.toml"))
    }

    pub fn depuis_toml(texte: &str, chemin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(texte).map_err(|source| ConfigError::Toml {
            chemin: chemin.to_path_buf(),
            source,
        })
    }

    /// Charge `explicite` s’il est donné, sinon le chemin par défaut s’il existe.
    pub fn charger(explicite: Option<&Path>) -> Result<Self, ConfigError> {
        let (chemin, requis) = match explicite {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::chemin_defaut() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };

        if !requis && !chemin.exists() {
            debug!(chemin = %chemin.display(), "pas de fichier de configuration");
            return Ok(Self::default());
        }

        let texte = std::fs::read_to_string(&chemin).map_err(|source| ConfigError::Io {
            chemin: chemin.clone(),
            source,
        })?;
        let config = Self::depuis_toml(&texte, &chemin)?;
        debug!(chemin = %chemin.display(), ?config, "configuration chargée");
        Ok(config)
    }

    pub fn reglages(&self) -> Reglages {
        Reglages {
            delai_erreur: Duration::from_millis(self.error_delay_ms),
            chiffres: self.fraction_digits.min(CHIFFRES_MAX),
            marqueur_erreur: self.error_marker.clone(),
            enchainer: self.chain_result,
        }
    }
}
