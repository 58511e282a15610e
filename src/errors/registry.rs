use alloc::string::String;

use super::inject::ParseErrorKind;

#[derive(thiserror::Error, Debug)]
pub enum RegistryErrorKind {
    #[error("Blueprint name is empty")]
    EmptyName,
    #[error("No register source set for `{name}`")]
    MissingRegisterSource { name: String },
    #[error("Invalid dependency declaration for `{name}`")]
    Depends {
        name: String,
        #[source]
        source: ParseErrorKind,
    },
}
