use std::path::{Path, PathBuf};

use clap::Parser;
use px_core::PixError;
use px_core::config::RenderOptions;

/// pixscii — Convertisseur d'images en ASCII pour le terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Chemin de l'image source (PNG, JPEG, BMP, GIF).
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Largeur de la sortie ASCII en caractères.
    #[arg(short, long)]
    pub width: Option<u32>,

    /// Désactiver la couleur ANSI 24-bit.
    #[arg(long, default_value_t = false)]
    pub no_color: bool,

    /// Sortie noir et blanc (# et espace). Prioritaire sur la couleur.
    #[arg(long, default_value_t = false)]
    pub bw: bool,

    /// Sortie au format Markdown (bloc de code, sans couleurs).
    #[arg(long, default_value_t = false)]
    pub markdown: bool,

    /// Enregistrer la sortie dans un fichier (ex : README.md).
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// FPS imposé pour les GIF (0 = délais natifs du GIF).
    #[arg(long)]
    pub fps: Option<u32>,

    /// Ne pas boucler les GIF dans le terminal.
    #[arg(long, default_value_t = false)]
    pub no_loop: bool,

    /// Fichier de configuration TOML optionnel.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Chemin d'entrée validé.
    ///
    /// # Errors
    /// `InputMissing` si aucun fichier n'a été fourni.
    pub fn input(&self) -> Result<&Path, PixError> {
        self.file.as_deref().ok_or(PixError::InputMissing)
    }

    /// Applique les overrides CLI sur des options déjà résolues (valeurs par
    /// défaut ou fichier de configuration). Un flag absent ne touche rien.
    pub fn apply(&self, opts: &mut RenderOptions) {
        if let Some(w) = self.width {
            opts.width = w;
        }
        if self.no_color {
            opts.color = false;
        }
        if self.bw {
            opts.bw = true;
        }
        if self.markdown {
            opts.markdown = true;
        }
        if let Some(fps) = self.fps {
            opts.fps = fps;
        }
        if self.no_loop {
            opts.looping = false;
        }
    }
}
