/// Configuration, types, and shared structures for pixscii.
///
/// This crate contains the shared types, the glyph ramp, the ANSI escape
/// vocabulary, and the configuration logic used across the pixscii workspace.

pub mod ansi;
pub mod charset;
pub mod config;
pub mod error;
pub mod frame;

pub use config::RenderOptions;
pub use error::PixError;
pub use frame::{AsciiCell, AsciiGrid, PixelFrame, Rgb};
