//! Domain layer: pure scroll logic with no OS dependencies.

pub mod accumulator;
pub mod direction;
pub mod settings;
