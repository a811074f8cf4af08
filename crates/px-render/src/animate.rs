use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use px_core::ansi::CURSOR_HOME;
use px_core::config::RenderOptions;

/// Plancher appliqué aux frames dont le délai source est nul. Choix de
/// politique, pas un invariant : évite le busy-loop sur les GIF qui
/// déclarent un délai de 0.
pub const DEFAULT_FRAME_WAIT: Duration = Duration::from_millis(50);

/// Jeton d'annulation partagé entre le handler de signal et la boucle
/// d'affichage. Seul état mutable commun aux deux.
///
/// # Example
/// ```
/// use px_render::animate::CancelToken;
/// let token = CancelToken::default();
/// assert!(!token.is_cancelled());
/// token.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Crée un jeton non annulé.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Demande l'arrêt. Pris en compte à la prochaine frontière de frame.
    #[inline]
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// `true` si l'arrêt a été demandé.
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Attente après la frame `index`.
///
/// Un fps imposé (`fps > 0`) donne `1/fps` pour toutes les frames, quels que
/// soient les délais de la source. Sinon le délai source est lu cycliquement
/// (`index mod len`), en centièmes de seconde, avec plancher
/// [`DEFAULT_FRAME_WAIT`] pour les délais nuls.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use px_render::animate::frame_wait;
/// assert_eq!(frame_wait(0, &[10, 20, 5], 0), Duration::from_millis(100));
/// assert_eq!(frame_wait(0, &[10, 20, 5], 10), Duration::from_millis(100));
/// ```
#[must_use]
pub fn frame_wait(index: usize, delays_cs: &[u16], fps: u32) -> Duration {
    if fps > 0 {
        return Duration::from_secs(1) / fps;
    }
    let Some(&cs) = delays_cs.get(index % delays_cs.len().max(1)) else {
        return DEFAULT_FRAME_WAIT;
    };
    if cs == 0 {
        DEFAULT_FRAME_WAIT
    } else {
        Duration::from_millis(u64::from(cs) * 10)
    }
}

/// Rejoue des frames pré-rendues en repeignant le terminal sur place.
///
/// Avant chaque frame le curseur est ramené en haut à gauche (`ESC[H`), sans
/// effacement — les frames successives s'écrasent au lieu de défiler. Le
/// jeton est consulté à chaque frontière de frame ; le sommeil lui-même n'est
/// pas interrompu. En mode non bouclé, chaque frame passe exactement une fois
/// et l'attente après la dernière est omise. La restauration du terminal
/// (curseur, couleur) appartient au scope appelant.
///
/// # Errors
/// Propage les erreurs d'écriture sur `out`.
pub fn play<W: Write>(
    out: &mut W,
    frames: &[Vec<String>],
    delays_cs: &[u16],
    opts: &RenderOptions,
    token: &CancelToken,
) -> std::io::Result<()> {
    if frames.is_empty() {
        return Ok(());
    }
    log::debug!(
        "lecture : {} frames, fps={}, loop={}",
        frames.len(),
        opts.fps,
        opts.looping
    );

    let mut i: usize = 0;
    loop {
        if token.is_cancelled() {
            log::debug!("annulation reçue à la frame {i}");
            return Ok(());
        }

        out.write_all(CURSOR_HOME.as_bytes())?;
        for line in &frames[i % frames.len()] {
            out.write_all(line.as_bytes())?;
            out.write_all(b"\n")?;
        }
        out.flush()?;

        if !opts.looping && i + 1 >= frames.len() {
            return Ok(());
        }
        std::thread::sleep(frame_wait(i, delays_cs, opts.fps));
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_delays_are_cyclic_centiseconds() {
        let delays = [10u16, 20, 5];
        assert_eq!(frame_wait(0, &delays, 0), Duration::from_millis(100));
        assert_eq!(frame_wait(1, &delays, 0), Duration::from_millis(200));
        assert_eq!(frame_wait(2, &delays, 0), Duration::from_millis(50));
        // Lecture cyclique au-delà de la fin naturelle.
        assert_eq!(frame_wait(3, &delays, 0), Duration::from_millis(100));
        assert_eq!(frame_wait(7, &delays, 0), Duration::from_millis(200));
    }

    #[test]
    fn fps_override_ignores_source_delays() {
        let delays = [10u16, 20, 5];
        for i in 0..6 {
            assert_eq!(frame_wait(i, &delays, 10), Duration::from_millis(100));
        }
    }

    #[test]
    fn zero_delay_gets_the_default_floor() {
        assert_eq!(frame_wait(0, &[0], 0), DEFAULT_FRAME_WAIT);
        assert_eq!(frame_wait(0, &[], 0), DEFAULT_FRAME_WAIT);
    }

    #[test]
    fn single_pass_writes_each_frame_once() {
        let frames = vec![vec!["aaa".to_string()], vec!["bbb".to_string()]];
        let opts = RenderOptions {
            looping: false,
            fps: 100,
            ..RenderOptions::default()
        };
        let token = CancelToken::new();
        let mut out = Vec::new();
        play(&mut out, &frames, &[1, 1], &opts, &token).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("aaa").count(), 1);
        assert_eq!(text.matches("bbb").count(), 1);
        assert_eq!(text.matches(CURSOR_HOME).count(), 2, "un repositionnement par frame");
    }

    #[test]
    fn cancelled_token_stops_before_painting() {
        let frames = vec![vec!["aaa".to_string()]];
        let opts = RenderOptions::default();
        let token = CancelToken::new();
        token.cancel();
        let mut out = Vec::new();
        play(&mut out, &frames, &[1], &opts, &token).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn empty_frame_list_is_a_noop() {
        let opts = RenderOptions::default();
        let token = CancelToken::new();
        let mut out = Vec::new();
        play(&mut out, &[], &[], &opts, &token).unwrap();
        assert!(out.is_empty());
    }
}
