//! Change notification port.
//!
//! Write paths call [`ChangeNotifier::notify`] after every accepted edit so
//! downstream sinks can refresh. Notifications are fire-and-forget.

/// Receives "something changed" signals from write paths.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - `notify` must return immediately and never fail the caller
pub trait ChangeNotifier: Send + Sync {
    fn notify(&self);
}

/// Notifier that drops every signal. Used when no sink is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopChangeNotifier;

impl ChangeNotifier for NoopChangeNotifier {
    fn notify(&self) {}
}
