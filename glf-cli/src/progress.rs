//! Spinner wrapper around remote operations.

use std::time::Duration;

use console::style;
use indicatif::ProgressBar;

use crate::error::Result;

/// Fixed note shown when a wrapped operation fails.
const FAILURE_NOTE: &str = "request failed";

/// Run `op` behind a spinner labeled `message`.
///
/// The spinner ends with a check mark on success and a cross plus a fixed
/// failure note otherwise. Errors are always propagated to the caller; a
/// failure is never converted into an empty success, so downstream code can
/// tell "zero items" apart from "request failed".
///
/// # Errors
///
/// Returns whatever `op` returned.
pub fn with_progress<T, F>(message: &str, op: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    match op() {
        Ok(value) => {
            spinner.finish_with_message(format!("{} {message}", style("✓").green()));
            Ok(value)
        }
        Err(err) => {
            spinner.abandon_with_message(format!("{} {FAILURE_NOTE}", style("✗").red()));
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn returns_the_operation_value() {
        let value = with_progress("working", || Ok(41 + 1)).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn propagates_the_operation_error() {
        let result: Result<()> =
            with_progress("working", || Err(Error::download_failed("boom")));
        assert!(matches!(
            result.unwrap_err(),
            Error::DownloadFailed { .. }
        ));
    }
}
