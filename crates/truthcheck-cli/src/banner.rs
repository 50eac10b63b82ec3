//! The shared error banner.

/// Show a failure to the user, always suffixed with the generic retry
/// instruction. Form validation failures never go through here; they mark
/// the offending controls inline instead.
pub fn show(message: &str) {
    eprintln!("{message} Please reload or try again later.");
}
