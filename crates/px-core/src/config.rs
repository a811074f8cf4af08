use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Configuration immuable d'une invocation, construite une fois au démarrage
/// puis passée par référence au pipeline. Remplace tout état global.
///
/// # Example
/// ```
/// use px_core::config::RenderOptions;
/// let opts = RenderOptions::default();
/// assert_eq!(opts.width, 100);
/// assert!(opts.color);
/// ```
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Largeur cible en caractères.
    pub width: u32,
    /// Couleur ANSI 24-bit.
    pub color: bool,
    /// Mode noir et blanc (`#` et espace). Prioritaire sur la couleur.
    pub bw: bool,
    /// Sortie Markdown (bloc de code, jamais de couleur).
    pub markdown: bool,
    /// FPS imposé pour les animations. 0 = délais natifs de la source.
    pub fps: u32,
    /// Boucler les animations dans le terminal.
    pub looping: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 100,
            color: true,
            bw: false,
            markdown: false,
            fps: 0,
            looping: true,
        }
    }
}

impl RenderOptions {
    /// `true` si les cellules doivent porter une couleur.
    ///
    /// Markdown et noir et blanc forcent la couleur à off.
    ///
    /// # Example
    /// ```
    /// use px_core::config::RenderOptions;
    /// let mut opts = RenderOptions::default();
    /// assert!(opts.color_active());
    /// opts.bw = true;
    /// assert!(!opts.color_active());
    /// ```
    #[must_use]
    pub fn color_active(&self) -> bool {
        self.color && !self.markdown && !self.bw
    }

    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization and CLI overrides.
    pub fn clamp_all(&mut self) {
        self.width = self.width.clamp(1, 4000);
        self.fps = self.fps.min(240);
    }
}

/// Structure TOML intermédiaire, toutes sections et valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    render: Option<RenderSection>,
    playback: Option<PlaybackSection>,
}

/// Render section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct RenderSection {
    width: Option<u32>,
    color: Option<bool>,
    bw: Option<bool>,
    markdown: Option<bool>,
}

/// Playback section of the TOML config, all fields optional.
#[derive(Deserialize)]
struct PlaybackSection {
    fps: Option<u32>,
    #[serde(rename = "loop")]
    looping: Option<bool>,
}

/// Fusionne un document TOML avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the document cannot be parsed.
pub fn from_toml_str(content: &str) -> Result<RenderOptions> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut opts = RenderOptions::default();

    if let Some(r) = file.render {
        if let Some(v) = r.width {
            opts.width = v;
        }
        if let Some(v) = r.color {
            opts.color = v;
        }
        if let Some(v) = r.bw {
            opts.bw = v;
        }
        if let Some(v) = r.markdown {
            opts.markdown = v;
        }
    }

    if let Some(p) = file.playback {
        if let Some(v) = p.fps {
            opts.fps = v;
        }
        if let Some(v) = p.looping {
            opts.looping = v;
        }
    }

    opts.clamp_all();
    Ok(opts)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use px_core::config::load_config;
/// use std::path::Path;
/// let opts = load_config(Path::new("pixscii.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<RenderOptions> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    log::debug!("configuration chargée depuis {}", path.display());
    from_toml_str(&content).with_context(|| format!("Dans {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let opts = from_toml_str("").unwrap();
        assert_eq!(opts, RenderOptions::default());
    }

    #[test]
    fn partial_sections_merge_over_defaults() {
        let opts = from_toml_str("[render]\nwidth = 60\nbw = true\n").unwrap();
        assert_eq!(opts.width, 60);
        assert!(opts.bw);
        // Champs absents : valeurs par défaut.
        assert!(opts.color);
        assert!(opts.looping);
    }

    #[test]
    fn playback_section_and_loop_rename() {
        let opts = from_toml_str("[playback]\nfps = 12\nloop = false\n").unwrap();
        assert_eq!(opts.fps, 12);
        assert!(!opts.looping);
    }

    #[test]
    fn clamp_applies_after_merge() {
        let opts = from_toml_str("[render]\nwidth = 0\n\n[playback]\nfps = 100000\n").unwrap();
        assert_eq!(opts.width, 1);
        assert_eq!(opts.fps, 240);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(from_toml_str("[render\nwidth = ").is_err());
    }

    #[test]
    fn color_resolution_precedence() {
        let markdown = RenderOptions {
            markdown: true,
            ..RenderOptions::default()
        };
        assert!(!markdown.color_active(), "markdown force la couleur à off");

        let bw = RenderOptions {
            bw: true,
            ..RenderOptions::default()
        };
        assert!(!bw.color_active(), "bw force la couleur à off");

        let no_color = RenderOptions {
            color: false,
            ..RenderOptions::default()
        };
        assert!(!no_color.color_active());
    }
}
