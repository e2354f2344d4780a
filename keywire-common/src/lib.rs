#![no_std]
//! Constants shared between the Keywire configurator and keyboard firmware.

pub mod keycodes;
pub mod protocol;

/// Wire-format generation this configurator build speaks natively.
pub const PROTOCOL_VERSION: u8 = protocol::LATEST;
