//! NetOverride Infrastructure Layer
pub mod control;
pub mod dns;
pub mod repositories;
