#![doc = include_str!("../README.md")]

pub mod consts;
pub mod error;
pub mod fmt;
pub mod numerical;
pub mod primitive;
pub mod symbolic;
