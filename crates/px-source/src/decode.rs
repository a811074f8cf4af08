use std::io::Cursor;
use std::path::Path;

use image::AnimationDecoder;
use image::codecs::gif::GifDecoder;
use px_core::PixError;
use px_core::frame::PixelFrame;

/// Animation décodée : frames RGBA et délais natifs 1:1.
///
/// Les délais sont en centièmes de seconde (unité native du format GIF).
/// Un délai nul est remplacé par un minimum au moment de la lecture, pas ici.
#[derive(Debug)]
pub struct Animation {
    /// Frames dans l'ordre de la source.
    pub frames: Vec<PixelFrame>,
    /// Délai par frame, en centièmes de seconde.
    pub delays_cs: Vec<u16>,
}

/// Résultat du décodage d'un fichier d'entrée.
#[derive(Debug)]
pub enum Decoded {
    /// Image fixe (ou GIF à frame unique).
    Still(PixelFrame),
    /// GIF animé à plusieurs frames.
    Animation(Animation),
}

/// Lit et décode un fichier d'entrée.
///
/// Le fichier est lu en entier d'abord : une erreur de lecture et une erreur
/// de décodage sont deux échecs distincts.
///
/// # Errors
/// `FileUnreadable` si le fichier ne peut pas être lu, `Undecodable` si les
/// octets ne forment pas une image supportée (PNG, JPEG, BMP, GIF).
pub fn decode_file(path: &Path) -> Result<Decoded, PixError> {
    let bytes = std::fs::read(path).map_err(|source| PixError::FileUnreadable {
        path: path.display().to_string(),
        source,
    })?;
    decode_bytes(&bytes, path)
}

/// Décode des octets déjà lus. L'extension du chemin choisit le décodeur :
/// `.gif` passe par le décodeur multi-frame, tout le reste par le décodeur
/// générique.
///
/// # Errors
/// `Undecodable` si les octets ne forment pas une image supportée.
pub fn decode_bytes(bytes: &[u8], path: &Path) -> Result<Decoded, PixError> {
    if has_gif_extension(path) {
        let anim = decode_gif(bytes, path)?;
        log::debug!(
            "GIF décodé : {} frame(s), délais {:?} cs",
            anim.frames.len(),
            anim.delays_cs
        );
        if anim.frames.len() > 1 {
            return Ok(Decoded::Animation(anim));
        }
        // GIF à frame unique : traité comme une image fixe.
        return match anim.frames.into_iter().next() {
            Some(frame) => Ok(Decoded::Still(frame)),
            None => Err(undecodable(path, "GIF sans frame")),
        };
    }
    decode_still(bytes, path)
}

fn has_gif_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gif"))
}

fn undecodable(path: &Path, reason: impl ToString) -> PixError {
    PixError::Undecodable {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

fn decode_still(bytes: &[u8], path: &Path) -> Result<Decoded, PixError> {
    let img = image::load_from_memory(bytes).map_err(|e| undecodable(path, e))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!("Image décodée : {width}×{height}");
    Ok(Decoded::Still(PixelFrame {
        data: rgba.into_raw(),
        width,
        height,
    }))
}

fn decode_gif(bytes: &[u8], path: &Path) -> Result<Animation, PixError> {
    let decoder = GifDecoder::new(Cursor::new(bytes)).map_err(|e| undecodable(path, e))?;
    let frames = decoder
        .into_frames()
        .collect_frames()
        .map_err(|e| undecodable(path, e))?;

    let mut pixel_frames = Vec::with_capacity(frames.len());
    let mut delays_cs = Vec::with_capacity(frames.len());
    for frame in frames {
        let (numer, denom) = frame.delay().numer_denom_ms();
        let ms = if denom == 0 { 0 } else { numer / denom };
        delays_cs.push(u16::try_from(ms / 10).unwrap_or(u16::MAX));

        let buf = frame.into_buffer();
        let (width, height) = buf.dimensions();
        pixel_frames.push(PixelFrame {
            data: buf.into_raw(),
            width,
            height,
        });
    }

    Ok(Animation {
        frames: pixel_frames,
        delays_cs,
    })
}
