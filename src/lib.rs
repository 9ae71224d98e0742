#[macro_use]
extern crate lazy_static;

pub mod error;
pub mod fa;
pub mod grammar;
pub mod language;
