mod inject;
mod instantiate;
mod registry;
mod resolver;
mod runner;
mod traced;

pub use inject::ParseErrorKind;
pub use instantiate::InstantiateErrorKind;
pub use registry::RegistryErrorKind;
pub use resolver::ResolveErrorKind;
pub use runner::InvokeErrorKind;
pub use traced::Traced;
