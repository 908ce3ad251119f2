//! Scoped capture of errors returned by the X server
use crate::{Error, Result};
use tracing::debug;

/// A scope within which errors from X requests are captured rather than propagated.
///
/// Requests are run as normal and their results passed through [ErrorTrap::capture],
/// which records any error and hands back the successful value (if there was one). Once
/// all of the requests in the scope have been made the trap is closed with either
/// [ErrorTrap::pop], to find out whether anything went wrong, or [ErrorTrap::pop_ignored]
/// when the caller has no use for that information.
///
/// ```
/// # use xembed_tray::{x::ErrorTrap, Error, Result};
/// let mut trap = ErrorTrap::new("example");
/// let ok: Result<u32> = Ok(1);
/// let failed: Result<u32> = Err(Error::NoPlugWindow);
///
/// assert_eq!(trap.capture(ok), Some(1));
/// assert_eq!(trap.capture(failed), None);
/// assert!(trap.pop());
/// ```
#[derive(Debug)]
#[must_use = "an ErrorTrap should be closed with pop or pop_ignored"]
pub struct ErrorTrap {
    scope: &'static str,
    errors: Vec<Error>,
}

impl ErrorTrap {
    /// Open a new trap. `scope` is used to identify the trap in logs.
    pub fn new(scope: &'static str) -> Self {
        Self {
            scope,
            errors: Vec::new(),
        }
    }

    /// Record the error from `res` if there was one, otherwise return the value.
    pub fn capture<T>(&mut self, res: Result<T>) -> Option<T> {
        match res {
            Ok(val) => Some(val),
            Err(e) => {
                self.errors.push(e);
                None
            }
        }
    }

    /// The number of errors captured so far.
    pub fn n_errors(&self) -> usize {
        self.errors.len()
    }

    /// Close this trap, returning whether or not any errors were captured.
    pub fn pop(self) -> bool {
        let had_errors = !self.errors.is_empty();
        self.discard();

        had_errors
    }

    /// Close this trap, discarding any errors that were captured.
    pub fn pop_ignored(self) {
        self.discard();
    }

    fn discard(self) {
        for e in self.errors {
            debug!(scope = self.scope, %e, "discarding trapped X error");
        }
    }
}
