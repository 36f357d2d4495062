#![cfg_attr(not(test), no_std)]

pub mod drivers;
pub mod eyes;
pub mod platform;
