//! src/noyau/tampon.rs
//!
//! Gestionnaire du tampon de saisie.
//!
//! Rôle : recevoir les commandes (touches), garder une suite de jetons toujours bien formée,
//! déléguer le calcul à eval.rs, et projeter le tout en un `DisplayState`.
//!
//! Contrats :
//! - Seul mutateur du tampon ; aucun calcul ici (l’évaluateur impose la précédence).
//! - Jamais deux opérateurs consécutifs ; au plus un point par nombre.
//! - Une erreur s’efface seule après `delai_erreur` (minuterie à une place).
//! - `DisplayState` est recalculé, jamais stocké.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::erreur::EvalError;
use super::eval::evaluate;
use super::format::format_resultat;
use super::jetons::{format_tokens, nombre_final_a_un_point, Op, Tok};
use super::minuterie::{Horloge, Minuterie};

/// Décimales affichées par défaut.
pub const CHIFFRES_DEFAUT: usize = 8;

/// Garde-fou : on borne la précision d’affichage.
pub const CHIFFRES_MAX: usize = 20;

pub const DELAI_ERREUR_DEFAUT: Duration = Duration::from_millis(1500);

pub const MARQUEUR_ERREUR_DEFAUT: &str = "Error";

/// Commandes reçues de la couche présentation, une à la fois.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    PressDigit(char),
    PressPoint,
    PressOperator(Op),
    Clear,
    Delete,
    Evaluate,
}

impl Command {
    /// Touche (pavé, clavier physique, `--keys`) -> commande.
    pub fn from_key(c: char) -> Option<Command> {
        match c {
            '0'..='9' => Some(Command::PressDigit(c)),
            '.' | ',' => Some(Command::PressPoint),
            '=' | '\n' | '\r' => Some(Command::Evaluate),
            'c' | 'C' => Some(Command::Clear),
            '<' | '⌫' => Some(Command::Delete),
            _ => Op::depuis_char(c).map(Command::PressOperator),
        }
    }
}

/// Vue en lecture seule consommée par l’affichage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisplayState {
    pub history: String,
    pub current: String,
    pub is_error: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reglages {
    pub delai_erreur: Duration,
    pub chiffres: usize,
    pub marqueur_erreur: String,
    /// true : une saisie juste après "=" repart du résultat affiché.
    pub enchainer: bool,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            delai_erreur: DELAI_ERREUR_DEFAUT,
            chiffres: CHIFFRES_DEFAUT,
            marqueur_erreur: MARQUEUR_ERREUR_DEFAUT.to_string(),
            enchainer: false,
        }
    }
}

pub struct Tampon {
    tokens: Vec<Tok>,
    historique: String,
    resultat: Option<String>,
    erreur: bool,
    derniere_erreur: Option<EvalError>,
    minuterie: Minuterie,
    horloge: Box<dyn Horloge>,
    reglages: Reglages,
}

impl Tampon {
    pub fn new(mut reglages: Reglages, horloge: Box<dyn Horloge>) -> Self {
        reglages.chiffres = reglages.chiffres.min(CHIFFRES_MAX);
        Self {
            tokens: Vec::new(),
            historique: String::new(),
            resultat: None,
            erreur: false,
            derniere_erreur: None,
            minuterie: Minuterie::default(),
            horloge,
            reglages,
        }
    }

    /// Applique une commande et renvoie l’affichage résultant.
    pub fn apply(&mut self, cmd: Command) -> DisplayState {
        // une échéance dépassée est traitée avant la commande
        self.tick();
        debug!(?cmd, tampon = %format_tokens(&self.tokens), "commande");

        match cmd {
            Command::Clear => self.clear(),
            Command::Evaluate => self.evaluer(),
            saisie => {
                self.quitter_erreur();
                if self.reglages.enchainer {
                    self.amorcer_depuis_resultat();
                }
                if self.saisir(saisie) {
                    self.resultat = None;
                }
            }
        }

        self.display()
    }

    /// À appeler périodiquement (chaque frame) : applique la remise à zéro échue.
    /// Renvoie true si l’affichage a changé.
    pub fn tick(&mut self) -> bool {
        if !self.minuterie.echue(self.horloge.maintenant()) {
            return false;
        }
        self.minuterie.annuler();
        self.erreur = false;
        debug!("erreur effacée (délai écoulé)");
        true
    }

    /// Changement d’écran : aucune échéance ne doit survivre.
    pub fn suspend(&mut self) {
        if self.minuterie.annuler() {
            debug!("minuterie annulée (suspension)");
        }
        self.erreur = false;
    }

    pub fn display(&self) -> DisplayState {
        let current = if self.erreur {
            self.reglages.marqueur_erreur.clone()
        } else if !self.tokens.is_empty() {
            format_tokens(&self.tokens)
        } else {
            self.resultat.clone().unwrap_or_default()
        };

        DisplayState {
            history: self.historique.clone(),
            current,
            is_error: self.erreur,
        }
    }

    /// Genre exact de la dernière erreur d’évaluation (canal annexe, hors affichage).
    pub fn last_error(&self) -> Option<EvalError> {
        self.derniere_erreur
    }

    /// Temps restant avant la remise à zéro (pour programmer un repaint).
    pub fn reset_in(&self) -> Option<Duration> {
        self.minuterie.restant(self.horloge.maintenant())
    }

    pub fn tokens(&self) -> &[Tok] {
        &self.tokens
    }

    /* ------------------------ Transitions ------------------------ */

    fn clear(&mut self) {
        self.tokens.clear();
        self.historique.clear();
        self.resultat = None;
        self.erreur = false;
        if self.minuterie.annuler() {
            debug!("minuterie annulée (AC)");
        }
    }

    fn quitter_erreur(&mut self) {
        if self.erreur {
            self.erreur = false;
            self.minuterie.annuler();
        }
    }

    /// Mode enchaîné : le résultat affiché devient le début du tampon.
    fn amorcer_depuis_resultat(&mut self) {
        if !self.tokens.is_empty() {
            return;
        }
        let Some(res) = self.resultat.take() else {
            return;
        };
        for c in res.chars() {
            if let Some(cmd) = Command::from_key(c) {
                self.saisir(cmd);
            }
        }
    }

    /// Saisie pure (chiffre, point, opérateur, DEL). Renvoie true si le tampon a changé.
    fn saisir(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::PressDigit(d) if d.is_ascii_digit() => {
                self.tokens.push(Tok::Digit(d));
                true
            }
            Command::PressDigit(d) => {
                warn!(touche = %d, "chiffre invalide ignoré");
                false
            }
            Command::PressPoint => {
                if nombre_final_a_un_point(&self.tokens) {
                    return false;
                }
                self.tokens.push(Tok::Point);
                true
            }
            Command::PressOperator(op) => {
                // dernier opérateur remplacé (correction sans DEL)
                if let Some(last) = self.tokens.last_mut().filter(|t| t.est_op()) {
                    *last = Tok::Op(op);
                } else {
                    self.tokens.push(Tok::Op(op));
                }
                true
            }
            Command::Delete => self.tokens.pop().is_some(),
            Command::Clear | Command::Evaluate => false,
        }
    }

    fn evaluer(&mut self) {
        if self.tokens.is_empty() {
            return;
        }

        let texte = format_tokens(&self.tokens);
        match evaluate(&self.tokens) {
            Ok(valeur) => {
                let affiche = format_resultat(&valeur, self.reglages.chiffres);
                info!(expression = %texte, resultat = %affiche, "évaluation");
                self.historique = format!("{texte} =");
                self.resultat = Some(affiche);
                self.derniere_erreur = None;
            }
            Err(e) => {
                warn!(expression = %texte, genre = ?e, "évaluation impossible: {e}");
                self.erreur = true;
                self.resultat = None;
                self.derniere_erreur = Some(e);
                let echeance = self.horloge.maintenant() + self.reglages.delai_erreur;
                if self.minuterie.armer(echeance) {
                    debug!("échéance précédente remplacée");
                }
            }
        }

        self.tokens.clear();
    }
}
