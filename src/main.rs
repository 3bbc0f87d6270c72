// src/main.rs
//
// Calculatrice — point d’entrée NATIF + WEB (WASM)
// ------------------------------------------------
// But:
// - NATIF (Linux/Windows/macOS) : eframe::run_native + NativeOptions
//   + modes sans fenêtre (--keys / --expr) pour rejouer des touches ou évaluer une ligne
// - WEB  (wasm32)              : eframe::WebRunner + WebOptions + <canvas>
//
// Côté WEB (WASM) : index.html doit contenir un canvas :
//   <canvas id="the_canvas_id"></canvas>

#![cfg_attr(target_arch = "wasm32", allow(unused_imports, dead_code))]

use eframe::egui;

mod app;
mod config;
mod noyau;

use app::{AppCalc, HorlogeEgui};
use config::Config;

/// Titre unique (natif + web).
const TITRE_APP: &str = "Calculatrice";

/* ------------------------ Entrée NATIF (PC) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
mod natif {
    use std::path::PathBuf;

    use anyhow::{bail, Context};
    use clap::Parser;
    use tracing::info;
    use tracing_subscriber::EnvFilter;

    use super::{egui, AppCalc, Config, HorlogeEgui, TITRE_APP};
    use crate::noyau::{evaluate, format_resultat, tokenize, Command, HorlogeSysteme, Tampon};

    #[derive(Debug, Parser)]
    #[command(version, about = "Calculatrice à pavé tactile")]
    pub struct Args {
        /// Fichier de configuration TOML (défaut : <config_dir>/calculatrice/config.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Rejoue une suite de touches sans fenêtre (ex: "7+5=", C = AC, < = DEL)
        #[arg(long, conflicts_with = "expr")]
        keys: Option<String>,

        /// Évalue une expression sans fenêtre (ex: "2+3×4")
        #[arg(long)]
        expr: Option<String>,
    }

    pub fn run() -> anyhow::Result<()> {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .init();

        let args = Args::parse();
        let config = Config::charger(args.config.as_deref()).context("configuration")?;
        let reglages = config.reglages();

        if let Some(expr) = args.expr {
            let tokens = tokenize(&expr).with_context(|| format!("expression {expr:?}"))?;
            let valeur = evaluate(&tokens).with_context(|| format!("expression {expr:?}"))?;
            println!("{}", format_resultat(&valeur, reglages.chiffres));
            return Ok(());
        }

        if let Some(keys) = args.keys {
            let mut tampon = Tampon::new(reglages, Box::new(HorlogeSysteme::new()));
            for c in keys.chars().filter(|c| !c.is_whitespace()) {
                let Some(cmd) = Command::from_key(c) else {
                    bail!("touche inconnue: {c:?}");
                };
                let d = tampon.apply(cmd);
                let genre = tampon
                    .last_error()
                    .filter(|_| d.is_error)
                    .map(|e| format!("  ({e})"))
                    .unwrap_or_default();
                println!("{c}  | {:>16} | {}{genre}", d.history, d.current);
            }
            return Ok(());
        }

        info!("{TITRE_APP} démarre");

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(TITRE_APP)
                .with_inner_size([380.0, 640.0])
                .with_min_inner_size([300.0, 520.0]),
            ..Default::default()
        };

        eframe::run_native(
            TITRE_APP,
            options,
            Box::new(move |cc| {
                let horloge = HorlogeEgui(cc.egui_ctx.clone());
                Ok(Box::new(AppCalc::new(reglages, Box::new(horloge))))
            }),
        )
        .map_err(|e| anyhow::anyhow!("eframe: {e}"))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    natif::run()
}

/* ------------------------ Entrée WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {
    // En wasm32, le démarrage réel passe par `start()` (wasm_bindgen).
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AppCalc, Config, HorlogeEgui, TITRE_APP};

    use wasm_bindgen::JsCast;
    use web_sys::{window, HtmlCanvasElement};

    /// ID du canvas attendu dans index.html.
    const CANVAS_ID: &str = "the_canvas_id";

    /// Point d’entrée automatique au chargement de la page.
    /// - Fixe le titre de l’onglet (document.title)
    /// - Récupère le <canvas id="the_canvas_id">
    /// - Démarre eframe WebRunner dessus (réglages par défaut : pas de fichier côté web)
    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
        let w = window().ok_or_else(|| js_err("window() indisponible"))?;
        let d = w
            .document()
            .ok_or_else(|| js_err("document() indisponible"))?;

        d.set_title(TITRE_APP);

        let el = d
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| js_err("canvas introuvable (id incorrect dans index.html)"))?;

        let canvas: HtmlCanvasElement = el
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_err("l’élément trouvé n’est pas un <canvas>"))?;

        let web_options = eframe::WebOptions::default();
        let reglages = Config::default().reglages();

        eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(move |cc| {
                    let horloge = HorlogeEgui(cc.egui_ctx.clone());
                    Ok(Box::new(AppCalc::new(reglages, Box::new(horloge))))
                }),
            )
            .await
    }

    fn js_err(msg: &str) -> wasm_bindgen::JsValue {
        wasm_bindgen::JsValue::from_str(msg)
    }
}
