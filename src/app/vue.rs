// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Écran : historique (petit, grisé) au-dessus de l’entrée courante (grand)
// - Pavé tactile : AC DEL % ÷ / 7 8 9 × / 4 5 6 - / 1 2 3 + / 0 . =
// - Chaque bouton => une Command, rien d’autre (le noyau décide)

use eframe::egui;

use super::etat::AppCalc;
use crate::noyau::jetons::Op;
use crate::noyau::Command;

/// Disposition du pavé (ligne par ligne).
const PAVE: [&[Command]; 5] = [
    &[
        Command::Clear,
        Command::Delete,
        Command::PressOperator(Op::Percent),
        Command::PressOperator(Op::Divide),
    ],
    &[
        Command::PressDigit('7'),
        Command::PressDigit('8'),
        Command::PressDigit('9'),
        Command::PressOperator(Op::Times),
    ],
    &[
        Command::PressDigit('4'),
        Command::PressDigit('5'),
        Command::PressDigit('6'),
        Command::PressOperator(Op::Minus),
    ],
    &[
        Command::PressDigit('1'),
        Command::PressDigit('2'),
        Command::PressDigit('3'),
        Command::PressOperator(Op::Plus),
    ],
    &[Command::PressDigit('0'), Command::PressPoint, Command::Evaluate],
];

const ESPACE: f32 = 10.0;

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(ESPACE, ESPACE);

        self.ui_ecran(ui);

        ui.add_space(12.0);
        ui.separator();
        ui.add_space(12.0);

        self.ui_pave(ui);
    }

    fn ui_ecran(&self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                    ui.label(
                        egui::RichText::new(&self.affichage.history)
                            .size(22.0)
                            .color(ui.visuals().weak_text_color()),
                    );

                    let courant = egui::RichText::new(self.texte_courant()).size(44.0).monospace();
                    if self.affichage.is_error {
                        ui.label(courant.color(ui.visuals().error_fg_color));
                    } else {
                        ui.label(courant);
                    }
                });
            });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        // largeur d’une touche : 4 colonnes
        let cote = ((ui.available_width() - 3.0 * ESPACE) / 4.0).max(40.0);

        for ligne in PAVE {
            ui.horizontal(|ui| {
                for &cmd in ligne {
                    // "=" occupe deux colonnes (dernière ligne)
                    let largeur = if cmd == Command::Evaluate {
                        2.0 * cote + ESPACE
                    } else {
                        cote
                    };

                    let bouton = egui::Button::new(egui::RichText::new(libelle(cmd)).size(26.0));
                    if ui.add_sized([largeur, cote * 0.8], bouton).clicked() {
                        self.commande(cmd);
                    }
                }
            });
        }
    }
}

/// Libellé d’une touche du pavé.
fn libelle(cmd: Command) -> String {
    match cmd {
        Command::PressDigit(d) => d.to_string(),
        Command::PressPoint => ".".to_string(),
        Command::PressOperator(op) => op.to_string(),
        Command::Clear => "AC".to_string(),
        Command::Delete => "DEL".to_string(),
        Command::Evaluate => "=".to_string(),
    }
}
