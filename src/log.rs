//! Debug messages about geometry that the library had to patch up.
//!
//! Nothing is printed unless the `SVGPATH_LOG` environment variable is set.
//! The variable is read once per process.

use once_cell::sync::Lazy;

/// Prints a message prefixed with `svgpath:` when logging is enabled.
///
/// Arguments are not evaluated when logging is disabled.
#[doc(hidden)]
#[macro_export]
macro_rules! svgpath_log {
    (
        $($arg:tt)+
    ) => {
        if $crate::log::log_enabled() {
            println!("svgpath: {}", format_args!($($arg)+));
        }
    };
}

static LOG_ENABLED: Lazy<bool> = Lazy::new(|| {
    std::env::var_os("SVGPATH_LOG").map_or(false, |v| !v.is_empty() && v != "0")
});

/// Whether `SVGPATH_LOG` is set to something other than an empty string or `0`.
pub fn log_enabled() -> bool {
    *LOG_ENABLED
}
