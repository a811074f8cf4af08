/// File decoding for pixscii (still images and animated GIFs).

pub mod decode;

pub use decode::{Animation, Decoded, decode_file};
