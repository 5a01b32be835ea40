//! Engine-facing contracts.
//!
//! Defines what a renderer must provide to be managed by a host application,
//! independent of what it draws. `destroy` is mandatory; pausing and resizing
//! are separate capability traits so generic code can require them at
//! compile time, while type-erased engines expose them through
//! [`Engine::as_pausable`] / [`Engine::as_resizable`].

mod engine;
mod factory;

pub use engine::{Capabilities, Engine, Pausable, Resizable};
pub use factory::{create_engine, EngineFactory};
