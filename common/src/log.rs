#[doc(hidden)]
pub use tracing;

/// Target used for terminal output that must be printed verbatim.
pub const PRINT_TARGET: &str = "ingestr::print";

/// Target used for positive outcomes, rendered with a `[+]` marker.
pub const SUCCESS_TARGET: &str = "ingestr::success";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::log::tracing::info!(target: "ingestr::success", $($arg)*)
    };
}
