//! Routing of log events to an optional caller-supplied logger.
//!
//! Events are emitted with the `tracing` macros. When a [`Dispatch`] was
//! configured they go to it, otherwise to the process-wide default
//! subscriber.

use tracing::Dispatch;

/// Runs `event` with `logger` as the default dispatcher, if one is set.
pub(crate) fn emit(logger: Option<&Dispatch>, event: impl FnOnce()) {
    match logger {
        Some(dispatch) => tracing::dispatcher::with_default(dispatch, event),
        None => event(),
    }
}

/// Returns the unqualified name of `T` for log messages.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let name = std::any::type_name::<T>();
    name.rsplit("::").next().unwrap_or(name)
}
