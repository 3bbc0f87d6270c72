//! Noyau de la calculatrice
//!
//! Organisation interne :
//! - jetons.rs    : jetons (chiffre, point, opérateur) + tokenize
//! - tampon.rs    : gestionnaire du tampon de saisie (commandes -> DisplayState)
//! - eval.rs      : évaluateur à descente récursive (rationnels exacts)
//! - format.rs    : affichage du résultat (8 décimales max)
//! - minuterie.rs : remise à zéro après erreur (une seule échéance)
//! - erreur.rs    : genres d’erreur de l’évaluateur

pub mod erreur;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod minuterie;
pub mod tampon;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::EvalError;
pub use eval::evaluate;
pub use format::format_resultat;
pub use jetons::tokenize;
pub use minuterie::{Horloge, HorlogeSysteme};
pub use tampon::{Command, DisplayState, Reglages, Tampon};
