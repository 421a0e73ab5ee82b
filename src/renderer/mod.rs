//! Canvas2D rendering module
//!
//! Redraws the whole scene from simulation state every frame; additive
//! ("lighter") compositing for trails, sparks and explosion flashes.

pub mod canvas;

pub use canvas::CanvasRenderer;
