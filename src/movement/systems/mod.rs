//! Movement domain: system wiring for input, character frames and bodies.

pub mod avian;
pub(crate) mod frame;
pub(crate) mod input;
