use std::io::Write;
use std::path::Path;

use px_core::PixError;
use px_core::ansi::strip_ansi;

/// Délimiteur de bloc de code Markdown.
const FENCE: &str = "```";

/// Assemble les lignes rendues en document final.
///
/// En mode brut, les lignes sont concaténées telles quelles (couleurs
/// comprises). En mode Markdown, chaque ligne passe par le filtre ANSI et le
/// tout est encadré d'un bloc de code — une destination Markdown ne porte
/// jamais de couleur.
///
/// # Example
/// ```
/// use px_render::sink::assemble;
/// let doc = assemble(&["@#".to_string()], true);
/// assert!(doc.starts_with("```\n"));
/// assert!(doc.ends_with("```\n"));
/// ```
#[must_use]
pub fn assemble(lines: &[String], markdown: bool) -> String {
    let mut doc = String::new();
    if markdown {
        doc.push_str(FENCE);
        doc.push('\n');
    }
    for line in lines {
        if markdown {
            doc.push_str(&strip_ansi(line));
        } else {
            doc.push_str(line);
        }
        doc.push('\n');
    }
    if markdown {
        doc.push_str(FENCE);
        doc.push('\n');
    }
    doc
}

/// Écrit une frame rendue vers sa destination finale.
///
/// `path` absent → sortie standard. Un échec d'écriture est remonté tel quel
/// à l'appelant, sans retentative.
///
/// # Errors
/// `WriteFailure` avec le chemin en contexte (`<stdout>` pour la sortie
/// standard).
pub fn write_output(lines: &[String], markdown: bool, path: Option<&Path>) -> Result<(), PixError> {
    let doc = assemble(lines, markdown);
    match path {
        Some(p) => {
            std::fs::write(p, &doc).map_err(|source| PixError::WriteFailure {
                path: p.display().to_string(),
                source,
            })?;
            log::info!("{} octets écrits dans {}", doc.len(), p.display());
            Ok(())
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(doc.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|source| PixError::WriteFailure {
                    path: "<stdout>".into(),
                    source,
                })
        }
    }
}
