use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use crossterm::cursor;
use crossterm::execute;
use crossterm::style::ResetColor;
use crossterm::terminal::{Clear, ClearType};
use crossterm::tty::IsTty;
use px_core::config::RenderOptions;
use px_core::frame::PixelFrame;
use px_render::animate::{CancelToken, play};
use px_render::render::render_grid;
use px_render::sampler::sample_frame;
use px_render::sink::write_output;
use px_source::decode::{Animation, Decoded, decode_file};

use crate::cli::Cli;

/// Garde RAII de session terminal : cache le curseur et efface l'écran à la
/// construction, restaure couleur et curseur à la destruction — erreurs et
/// annulation comprises. La restauration appartient au scope propriétaire,
/// jamais au handler de signal.
pub struct TermGuard;

impl TermGuard {
    /// Ouvre la session : curseur caché, écran effacé, curseur en haut à
    /// gauche.
    ///
    /// # Errors
    /// Propage les erreurs d'écriture terminal.
    pub fn new() -> io::Result<Self> {
        execute!(
            io::stdout(),
            cursor::Hide,
            Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        Ok(Self)
    }
}

impl Drop for TermGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), ResetColor, cursor::Show);
        let _ = writeln!(io::stdout());
    }
}

/// Point d'entrée applicatif : résolution des options, décodage, dispatch.
///
/// # Errors
/// Toute erreur est terminale pour l'invocation (code de sortie 1).
pub fn run(cli: &Cli) -> Result<()> {
    let path = cli.input()?;
    let opts = resolve_options(cli)?;
    log::debug!("options résolues : {opts:?}");

    // Le handler Ctrl-C ne fait que lever le jeton ; la boucle de lecture le
    // consulte à chaque frontière de frame et le nettoyage revient au guard.
    let token = CancelToken::new();
    {
        let t = token.clone();
        ctrlc::set_handler(move || t.cancel()).context("Installation du handler Ctrl-C")?;
    }

    match decode_file(path)? {
        Decoded::Animation(anim) if opts.markdown || cli.out.is_some() => {
            write_first_frame(&anim, &opts, cli.out.as_deref())
        }
        Decoded::Animation(anim) => play_animation(&anim, &opts, &token),
        Decoded::Still(frame) => show_still(&frame, &opts, cli.out.as_deref()),
    }
}

/// Résout les options : défauts ← fichier TOML (si fourni) ← flags CLI.
fn resolve_options(cli: &Cli) -> Result<RenderOptions> {
    let mut opts = match cli.config.as_deref() {
        Some(path) => px_core::config::load_config(path)?,
        None => RenderOptions::default(),
    };
    cli.apply(&mut opts);
    opts.clamp_all();
    Ok(opts)
}

/// Animation vers une destination non-terminale : seule la première frame
/// est émise, toujours en bloc Markdown. L'ASCII animé n'existe pas hors
/// terminal.
fn write_first_frame(anim: &Animation, opts: &RenderOptions, out: Option<&Path>) -> Result<()> {
    let first = anim.frames.first().context("Animation sans frame")?;
    let lines = render_grid(&sample_frame(first, opts));
    write_output(&lines, true, out)?;
    if let Some(p) = out {
        println!("Enregistré : {} (frame statique pour Markdown)", p.display());
    }
    Ok(())
}

/// Lecture animée dans le terminal : toutes les frames sont échantillonnées
/// et rendues avant le premier affichage, puis rejouées sur place.
fn play_animation(anim: &Animation, opts: &RenderOptions, token: &CancelToken) -> Result<()> {
    let mut stdout = io::stdout();
    if !stdout.is_tty() {
        log::warn!("la sortie standard n'est pas un terminal, séquences ANSI émises telles quelles");
    }

    let frames: Vec<Vec<String>> = anim
        .frames
        .iter()
        .map(|f| render_grid(&sample_frame(f, opts)))
        .collect();

    let _guard = TermGuard::new()?;
    play(&mut stdout, &frames, &anim.delays_cs, opts, token)?;
    Ok(())
}

/// Image fixe : fichier, stdout Markdown, ou affichage terminal unique.
fn show_still(frame: &PixelFrame, opts: &RenderOptions, out: Option<&Path>) -> Result<()> {
    let lines = render_grid(&sample_frame(frame, opts));

    if let Some(p) = out {
        write_output(&lines, opts.markdown, Some(p))?;
        println!("Enregistré : {}", p.display());
        return Ok(());
    }
    if opts.markdown {
        write_output(&lines, true, None)?;
        return Ok(());
    }

    // Affichage unique : effacement puis impression, pas de repaint.
    let mut stdout = io::stdout();
    execute!(stdout, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    for line in &lines {
        writeln!(stdout, "{line}")?;
    }
    stdout.flush()?;
    Ok(())
}
