//! Contract assertions.
//!
//! Every precondition in the container family is checked through one of
//! two macros:
//!
//! - [`contract_warning!`](crate::contract_warning): the violation is
//!   logged at `warn` level and the operation continues on its documented
//!   fallback path. With the `strict-contracts` feature the violation
//!   panics instead, which is how test builds surface misuse early.
//! - [`contract_error!`](crate::contract_error): the violation is logged
//!   at `error` level and the current thread panics. There is no
//!   continuation; callers must not use the panic for control flow.
//!
//! Both report the failed expression and the caller's source location.

use std::fmt;
use std::panic::Location;

/// Log target used for every contract violation.
pub const LOG_TARGET: &str = "quimera::contract";

/// Severity of a violated contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Logged; the operation continues on its fallback path.
    Warning,
    /// Logged, then the thread panics.
    Error,
}

impl Severity {
    /// Whether a violation of this severity panics in the current build.
    pub const fn halts(self) -> bool {
        match self {
            Self::Warning => cfg!(feature = "strict-contracts"),
            Self::Error => true,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Report a warning-severity violation.
///
/// Prefer the [`contract_warning!`](crate::contract_warning) macro, which
/// only evaluates the message when the condition fails.
#[track_caller]
#[cold]
pub fn warning(expression: &str, message: fmt::Arguments<'_>) {
    let location = Location::caller();
    log::warn!(target: LOG_TARGET, "{message} (`{expression}` at {location})");
    if Severity::Warning.halts() {
        panic!("contract warning: {message} (`{expression}` at {location})");
    }
}

/// Report an error-severity violation. Never returns.
#[track_caller]
#[cold]
pub fn error(expression: &str, message: fmt::Arguments<'_>) -> ! {
    let location = Location::caller();
    log::error!(target: LOG_TARGET, "{message} (`{expression}` at {location})");
    panic!("contract violation: {message} (`{expression}` at {location})");
}

/// Check a condition; on failure log a warning and continue.
///
/// Evaluates to `true` when the condition held, so call sites can branch
/// onto their fallback path:
///
/// ```
/// use quimera_core::contract_warning;
///
/// let count = 0usize;
/// if !contract_warning!(count > 0, "nothing to remove") {
///     // fallback: leave the container untouched
/// }
/// ```
#[macro_export]
macro_rules! contract_warning {
    ($cond:expr, $($arg:tt)+) => {{
        let held: bool = $cond;
        if !held {
            $crate::contract::warning(::core::stringify!($cond), ::core::format_args!($($arg)+));
        }
        held
    }};
    ($cond:expr $(,)?) => {
        $crate::contract_warning!($cond, "contract not satisfied")
    };
}

/// Check a condition; on failure log an error and panic.
///
/// ```should_panic
/// use quimera_core::contract_error;
///
/// let capacity = 0usize;
/// contract_error!(capacity > 0, "capacity must be positive, got {capacity}");
/// ```
#[macro_export]
macro_rules! contract_error {
    ($cond:expr, $($arg:tt)+) => {{
        if !($cond) {
            $crate::contract::error(::core::stringify!($cond), ::core::format_args!($($arg)+));
        }
    }};
    ($cond:expr $(,)?) => {
        $crate::contract_error!($cond, "contract not satisfied")
    };
}
