//! Domain layer: pure clustering logic with no external state.

pub mod cluster;
pub(crate) mod template;
pub(crate) mod tokens;
pub(crate) mod tree;
pub mod volume;
