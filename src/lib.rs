#![no_std]

extern crate alloc;

pub(crate) mod any;
pub(crate) mod args;
pub(crate) mod blueprint;
pub(crate) mod cache;
pub(crate) mod container;
pub(crate) mod errors;
pub(crate) mod factory;
pub(crate) mod history;
pub(crate) mod inject;
pub(crate) mod macros;
pub(crate) mod plan;
pub(crate) mod registry;
pub(crate) mod resolver;
pub(crate) mod runner;
pub(crate) mod service;
pub(crate) mod state;

pub mod utils;

pub use any::{is_absent, value, Absent, AnyValue};
pub use args::{Args, ResolveArgs};
pub use blueprint::{instance, Blueprint, Specifier};
pub use container::Container;
pub use errors::{
    InstantiateErrorKind, InvokeErrorKind, ParseErrorKind, RegistryErrorKind, ResolveErrorKind,
    Traced,
};
pub use factory::{Factory, FactoryResult};
pub use history::{History, Visit};
pub use inject::{InjectRequest, PlaceholderArg};
pub use plan::Deferred;
pub use registry::RegisterOptions;
