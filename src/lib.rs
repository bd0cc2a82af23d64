//! A small cluster of soft spheres that scatter away from the pointer, bump
//! off each other, and drift back into formation. The per-tick physics lives
//! in [`physics::engine`] and runs headless; everything else is Bevy glue.

pub mod config;
pub mod physics;
