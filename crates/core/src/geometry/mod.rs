//! The shapes that make up a tiling, and the deformation that warps them.

pub mod deform;
pub mod hexagon;
