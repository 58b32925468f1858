//! Convenience macros for plugin development.

/// Macro for declaring a handler class.
///
/// Route methods are written as `verb "selector" => "path"`, where `verb` is
/// one of the [`RouteMethod`](routehub_core::types::RouteMethod) shorthand
/// constructors: `get`, `post`, `put`, `delete` or `any`.
///
/// # Example
/// ```rust,ignore
/// let users = handler_class!("UserController",
///     paths: ["/users"],
///     routes: [
///         get "list" => "",
///         get "show" => "{id}",
///         post "create" => "",
///     ],
///     instance: UserController::default()
/// );
/// ```
#[macro_export]
macro_rules! handler_class {
    (
        $name:expr,
        paths: [$($path:expr),* $(,)?],
        routes: [$($verb:ident $selector:literal => $route:expr),* $(,)?],
        instance: $instance:expr $(,)?
    ) => {{
        let builder = $crate::prelude::HandlerClass::builder($name);
        $(
            let builder = builder.path($path);
        )*
        $(
            let builder = builder.route($crate::prelude::RouteMethod::$verb($selector, $route));
        )*
        builder.instance($instance).build()
    }};
    (
        $name:expr,
        routes: [$($verb:ident $selector:literal => $route:expr),* $(,)?],
        instance: $instance:expr $(,)?
    ) => {
        $crate::handler_class!($name, paths: [], routes: [$($verb $selector => $route),*], instance: $instance)
    };
}
