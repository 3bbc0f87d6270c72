//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : envelopper le `Tampon` du noyau et garder le dernier `DisplayState` à dessiner.
//!
//! Contrats :
//! - Aucune évaluation ici : tout passe par `Tampon::apply`.
//! - L’affichage n’est jamais modifié directement, seulement recopié du tampon.

use crate::noyau::{Command, DisplayState, Horloge, Reglages, Tampon};

pub struct AppCalc {
    tampon: Tampon,
    visible: bool,

    // --- sortie ---
    pub affichage: DisplayState,
}

impl AppCalc {
    pub fn new(reglages: Reglages, horloge: Box<dyn Horloge>) -> Self {
        let tampon = Tampon::new(reglages, horloge);
        let affichage = tampon.display();
        Self {
            tampon,
            visible: true,
            affichage,
        }
    }

    /// Une touche (pavé ou clavier) : une commande, un nouvel affichage.
    pub fn commande(&mut self, cmd: Command) {
        self.affichage = self.tampon.apply(cmd);
    }

    /// Appelé à chaque frame : remise à zéro échue ?
    pub fn tick(&mut self) {
        if self.tampon.tick() {
            self.affichage = self.tampon.display();
        }
    }

    /// L’écran n’est plus visible : pas d’échéance orpheline.
    pub fn suspendre(&mut self) {
        self.tampon.suspend();
        self.affichage = self.tampon.display();
    }

    /// Fenêtre réduite = écran quitté ; on suspend au passage visible -> caché.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible && !visible {
            self.suspendre();
        }
        self.visible = visible;
    }

    /// Délai avant le prochain changement spontané de l’affichage.
    pub fn repaint_dans(&self) -> Option<std::time::Duration> {
        self.tampon.reset_in()
    }

    /// L’affichage principal montre "0" plutôt qu’un champ vide.
    pub fn texte_courant(&self) -> &str {
        if self.affichage.current.is_empty() {
            "0"
        } else {
            &self.affichage.current
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::HorlogeSysteme;

    fn app() -> AppCalc {
        AppCalc::new(Reglages::default(), Box::new(HorlogeSysteme::new()))
    }

    #[test]
    fn affichage_vide_montre_zero() {
        let mut a = app();
        assert_eq!(a.texte_courant(), "0");
        a.commande(Command::PressDigit('4'));
        assert_eq!(a.texte_courant(), "4");
    }

    #[test]
    fn reduire_la_fenetre_efface_l_erreur() {
        let mut a = app();
        for c in "5÷0=".chars() {
            a.commande(Command::from_key(c).unwrap());
        }
        assert!(a.affichage.is_error);
        assert!(a.repaint_dans().is_some());

        a.set_visible(false);
        assert!(!a.affichage.is_error);
        assert_eq!(a.repaint_dans(), None);
    }
}
