//! compdeps - component dependency manager
//!
//! This crate tracks named components, the dependencies declared between
//! them, and which of them are installed. Installing a component installs
//! its dependencies first; removing one also removes the dependencies
//! nothing else needs, and is refused while an installed component still
//! depends on it.

pub mod console;
pub mod export;
pub mod graph;
pub mod logging;
pub mod parser;
