// src/app.rs
//
// Calculatrice — module App (racine)
// ----------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
// - Fournir l’horloge egui (std::time::Instant panique en wasm32)

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use std::time::Duration;

use eframe::egui;

use crate::noyau::{Command, Horloge};

/// Temps egui (secondes depuis le démarrage), natif + web.
pub struct HorlogeEgui(pub egui::Context);

impl Horloge for HorlogeEgui {
    fn maintenant(&self) -> Duration {
        Duration::from_secs_f64(self.0.input(|i| i.time).max(0.0))
    }
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let reduit = ctx.input(|i| i.viewport().minimized.unwrap_or(false));
        self.set_visible(!reduit);
        self.tick();

        // Clavier physique : texte tapé (chiffres, opérateurs) + touches spéciales.
        // Les clics du pavé sont gérés dans vue.rs.
        let commandes: Vec<Command> = ctx.input(|i| {
            let mut out = Vec::new();
            for ev in &i.events {
                match ev {
                    egui::Event::Text(t) => out.extend(t.chars().filter_map(Command::from_key)),
                    egui::Event::Key {
                        key, pressed: true, ..
                    } => match key {
                        egui::Key::Enter => out.push(Command::Evaluate),
                        egui::Key::Backspace => out.push(Command::Delete),
                        egui::Key::Escape => out.push(Command::Clear),
                        _ => {}
                    },
                    _ => {}
                }
            }
            out
        });
        for cmd in commandes {
            self.commande(cmd);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // méthode publique (dans vue.rs)
        });

        // Erreur affichée : on se réveille à l’échéance même sans événement.
        if let Some(d) = self.repaint_dans() {
            ctx.request_repaint_after(d);
        }
    }
}
