/// Registers several blueprints on a container in one expression.
///
/// Expands to sequential [`register`](crate::Container::register) calls and
/// stops at the first error.
///
/// # Examples
///
/// ```
/// use loomi::{value, wire, Args, Blueprint, Container, InstantiateErrorKind};
///
/// let container = Container::new();
/// container.set_register_source("docs");
/// wire!(container, {
///     "answer" => Blueprint::leaf(|_: Args| Ok::<_, InstantiateErrorKind>(value(42i32))),
///     "greeting" => Blueprint::leaf(|_: Args| Ok::<_, InstantiateErrorKind>(value("hi"))),
/// })
/// .unwrap();
///
/// assert!(container.is_registered("answer"));
/// assert!(container.is_registered("greeting"));
/// ```
#[macro_export]
macro_rules! wire {
    ($container:expr, { $($name:expr => $blueprint:expr),* $(,)? }) => {{
        let container = &$container;
        (|| -> ::core::result::Result<(), $crate::RegistryErrorKind> {
            $(container.register($name, $blueprint)?;)*
            Ok(())
        })()
    }};
}
