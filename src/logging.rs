//! Internal logging helpers for structured pushdown events.

/// Single logging target for lakefilter.
pub(crate) const LOG_TARGET: &str = "lakefilter";

/// Emit `event=<name> <formatted key/value pairs>` under [`LOG_TARGET`].
///
/// Arguments are only formatted when the level is enabled.
macro_rules! lakefilter_log {
    ($level:expr, $event:expr, $fmt:expr $(, $args:expr)* $(,)?) => {{
        if log::log_enabled!(target: crate::logging::LOG_TARGET, $level) {
            log::log!(
                target: crate::logging::LOG_TARGET,
                $level,
                "event={} {}",
                $event,
                format_args!($fmt $(, $args)*)
            );
        }
    }};
}

pub(crate) use lakefilter_log;
