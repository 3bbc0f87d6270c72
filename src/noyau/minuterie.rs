// src/noyau/minuterie.rs
//
// Minuterie à une seule place (remise à zéro après erreur).
//
// Contrats :
// - armer() remplace l’échéance en cours : jamais d’empilement.
// - annuler() est idempotent.
// - Le temps vient d’une Horloge (Duration depuis une origine libre) :
//   egui fournit la sienne (natif + web), std::time::Instant reste hors wasm.

use std::time::{Duration, Instant};

/// Source de temps monotone.
pub trait Horloge {
    fn maintenant(&self) -> Duration;
}

/// Horloge système (mode sans fenêtre, natif seulement).
#[derive(Debug, Clone, Copy)]
pub struct HorlogeSysteme {
    origine: Instant,
}

impl HorlogeSysteme {
    pub fn new() -> Self {
        Self {
            origine: Instant::now(),
        }
    }
}

impl Default for HorlogeSysteme {
    fn default() -> Self {
        Self::new()
    }
}

impl Horloge for HorlogeSysteme {
    fn maintenant(&self) -> Duration {
        self.origine.elapsed()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Minuterie {
    echeance: Option<Duration>,
}

impl Minuterie {
    /// Arme (ou ré-arme) l’échéance. Renvoie true si une échéance précédente a été remplacée.
    pub fn armer(&mut self, echeance: Duration) -> bool {
        self.echeance.replace(echeance).is_some()
    }

    /// Renvoie true si une échéance était en attente.
    pub fn annuler(&mut self) -> bool {
        self.echeance.take().is_some()
    }

    pub fn echue(&self, maintenant: Duration) -> bool {
        matches!(self.echeance, Some(e) if maintenant >= e)
    }

    /// Temps restant avant l’échéance (zéro si déjà échue).
    pub fn restant(&self, maintenant: Duration) -> Option<Duration> {
        self.echeance.map(|e| e.saturating_sub(maintenant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn rearmer_remplace_sans_empiler() {
        let mut m = Minuterie::default();
        assert!(!m.armer(ms(1500)));
        assert!(m.armer(ms(3000)));

        // seule la dernière échéance compte
        assert!(!m.echue(ms(2000)));
        assert!(m.echue(ms(3000)));
    }

    #[test]
    fn annuler_idempotent() {
        let mut m = Minuterie::default();
        assert!(!m.annuler());
        m.armer(ms(10));
        assert!(m.annuler());
        assert!(!m.annuler());
        assert!(!m.echue(ms(1_000_000)));
        assert_eq!(m.restant(ms(0)), None);
    }

    #[test]
    fn restant_sature_a_zero() {
        let mut m = Minuterie::default();
        m.armer(ms(1500));
        assert_eq!(m.restant(ms(500)), Some(ms(1000)));
        assert_eq!(m.restant(ms(2000)), Some(Duration::ZERO));
    }
}
