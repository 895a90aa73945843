//! Command-line front end for reef: reports the completion target under a cursor in a shell
//! script.

pub mod args;
pub mod config;
pub mod entry;
pub mod error;
pub mod events;
pub mod input;
mod productinfo;
