//! Listeners notified after every executed command.

/// Receives each command string together with its raw output.
///
/// Implemented for any `Fn(&str, &str)` closure, so callers can register
/// either a closure or a type with its own `on_command`.
#[cfg_attr(test, mockall::automock)]
pub trait CommandObserver {
    fn on_command(&self, command: &str, output: &str);
}

impl<F> CommandObserver for F
where
    F: Fn(&str, &str),
{
    fn on_command(&self, command: &str, output: &str) {
        self(command, output)
    }
}
