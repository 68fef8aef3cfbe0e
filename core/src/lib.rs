#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod bmp;
pub mod display;
pub mod framebuffer;
pub mod fs;
pub mod i18n;
pub mod icons;
pub mod recent;
pub mod render;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;
