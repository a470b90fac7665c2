//! GPU shader sources

pub mod shaders;
