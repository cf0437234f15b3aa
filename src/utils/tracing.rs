/// Log an error together with its chain of sources. Usable both as a
/// statement and as an expression of type `()`.
#[macro_export]
macro_rules! tracing_report {
    ($error:expr) => {{
        tracing::error!(err = %snafu::Report::from_error(&$error));
    }};
    ($level:ident, $error:expr, $message:expr) => {{
        tracing::$level!(err = %snafu::Report::from_error(&$error), $message);
    }};
}
