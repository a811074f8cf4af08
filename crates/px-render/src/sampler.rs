use px_core::charset::{bw_glyph, ramp_glyph};
use px_core::config::RenderOptions;
use px_core::frame::{AsciiCell, AsciiGrid, PixelFrame};

/// Texte affiché à la place d'une source dégénérée (largeur ou hauteur nulle).
pub const EMPTY_PLACEHOLDER: &str = "(empty image)";

/// Hauteur maximale de la grille, garde-fou contre les ratios extrêmes.
const MAX_TARGET_HEIGHT: u32 = 2000;

/// Hauteur de grille pour une largeur cible et des dimensions source.
///
/// `clamp(round(width / ratio / 2), 1, 2000)` — le facteur 2 compense les
/// cellules de caractères terminal environ deux fois plus hautes que larges.
///
/// # Example
/// ```
/// use px_render::sampler::target_height;
/// // Source carrée : la hauteur vaut la moitié de la largeur.
/// assert_eq!(target_height(100, 640, 640), 50);
/// ```
#[must_use]
pub fn target_height(width: u32, src_w: u32, src_h: u32) -> u32 {
    let ratio = f64::from(src_w) / f64::from(src_h);
    let raw = (f64::from(width) / ratio / 2.0).round() as i64;
    raw.clamp(1, i64::from(MAX_TARGET_HEIGHT)) as u32
}

/// Échantillonne une frame en grille de glyphes par plus proche voisin.
///
/// Chaque cellule `(x, y)` lit le pixel source
/// `(floor(x·w/width), floor(y·h/height))`, en déduit la luminance et choisit
/// un glyphe : seuil dur en mode noir et blanc, rampe de 10 caractères sinon.
/// En mode couleur la cellule porte le RGB échantillonné tel quel.
///
/// Une source vide produit une grille d'une ligne contenant le texte
/// `(empty image)`, sans couleur.
///
/// # Example
/// ```
/// use px_core::config::RenderOptions;
/// use px_core::frame::PixelFrame;
/// use px_render::sampler::sample_frame;
/// let frame = PixelFrame::new(64, 64);
/// let opts = RenderOptions { width: 32, ..RenderOptions::default() };
/// let grid = sample_frame(&frame, &opts);
/// assert_eq!((grid.width, grid.height), (32, 16));
/// ```
#[must_use]
pub fn sample_frame(frame: &PixelFrame, opts: &RenderOptions) -> AsciiGrid {
    if frame.is_empty() {
        return placeholder_grid();
    }

    let width = opts.width.max(1);
    let height = target_height(width, frame.width, frame.height);
    log::trace!(
        "échantillonnage {}×{} → {width}×{height}",
        frame.width,
        frame.height
    );

    let x_step = f64::from(frame.width) / f64::from(width);
    let y_step = f64::from(frame.height) / f64::from(height);
    let color = opts.color_active();

    let mut grid = AsciiGrid::new(width, height);
    for y in 0..height {
        let src_y = ((f64::from(y) * y_step) as u32).min(frame.height - 1);
        for x in 0..width {
            let src_x = ((f64::from(x) * x_step) as u32).min(frame.width - 1);
            let (r, g, b, _) = frame.pixel(src_x, src_y);
            let lum = frame.luminance(src_x, src_y);

            let ch = if opts.bw { bw_glyph(lum) } else { ramp_glyph(lum) };
            let fg = if color { Some((r, g, b)) } else { None };
            grid.set(x, y, AsciiCell { ch, fg });
        }
    }
    grid
}

/// Grille d'une ligne épelant le placeholder, sans couleur quel que soit le
/// mode demandé.
fn placeholder_grid() -> AsciiGrid {
    let chars: Vec<char> = EMPTY_PLACEHOLDER.chars().collect();
    let mut grid = AsciiGrid::new(chars.len() as u32, 1);
    for (x, &ch) in chars.iter().enumerate() {
        grid.set(x as u32, 0, AsciiCell { ch, fg: None });
    }
    grid
}
