/// 10 caractères, du plus clair au plus dense. L'ordre et la longueur sont
/// un contrat de compatibilité : d'autres implémentations doivent produire
/// les mêmes glyphes pour les mêmes luminances.
pub const GRAY_RAMP: &[u8; 10] = b" .:-=+*#%@";

/// Glyphe « sombre » du mode noir et blanc.
pub const BW_DARK: char = '#';

/// Glyphe « clair » du mode noir et blanc.
pub const BW_LIGHT: char = ' ';

/// Sélectionne un glyphe de la rampe pour une luminance [0.0, 255.0].
///
/// Index = `floor((L / 255) * 9)`. Monotone : une luminance plus élevée ne
/// choisit jamais un glyphe plus clair.
///
/// # Example
/// ```
/// use px_core::charset::ramp_glyph;
/// assert_eq!(ramp_glyph(0.0), ' ');
/// assert_eq!(ramp_glyph(255.0), '@');
/// ```
#[inline]
#[must_use]
pub fn ramp_glyph(luminance: f32) -> char {
    let idx = ((luminance / 255.0) * (GRAY_RAMP.len() - 1) as f32) as usize;
    GRAY_RAMP[idx.min(GRAY_RAMP.len() - 1)] as char
}

/// Sélection noir et blanc : seuil dur à 127, sans anti-aliasing.
///
/// `L > 127` → glyphe clair (espace), sinon glyphe sombre (`#`).
///
/// # Example
/// ```
/// use px_core::charset::bw_glyph;
/// assert_eq!(bw_glyph(255.0), ' ');
/// assert_eq!(bw_glyph(0.0), '#');
/// ```
#[inline]
#[must_use]
pub fn bw_glyph(luminance: f32) -> char {
    if luminance > 127.0 { BW_LIGHT } else { BW_DARK }
}
