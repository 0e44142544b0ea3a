//! Core component factory for Switchwire.

pub mod config;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod factory;
mod graph;
pub mod instance;
pub mod processor;
pub mod provider;
pub mod registry;
pub mod resolver;
pub mod scope;

pub use descriptor::{ComponentDescriptor, Instance};
pub use error::{Result, SwitchwireError};
pub use factory::{ComponentFactory, prelude};
