/// Rendering pipeline for pixscii.
///
/// Sampler (frame → grid), renderer (grid → lines), animator (timed
/// playback), and output sink (terminal / file / stdout).
pub mod animate;
pub mod render;
pub mod sampler;
pub mod sink;
