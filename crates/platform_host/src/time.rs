//! Clock helpers for hold timers and layout envelope stamps.

use std::{cell::Cell, time::Duration};

thread_local! {
    static ENVELOPE_STAMP_MS: Cell<u64> = const { Cell::new(0) };
}

/// Current wall-clock time in unix milliseconds.
pub fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |since_epoch| since_epoch.as_millis() as u64)
    }
}

/// Time elapsed since `started_ms`; zero when the wall clock stepped backwards.
pub fn elapsed_since(started_ms: u64) -> Duration {
    Duration::from_millis(unix_time_ms_now().saturating_sub(started_ms))
}

/// Stamp for a new layout envelope. Strictly increasing per thread even if the clock stalls.
pub fn next_monotonic_timestamp_ms() -> u64 {
    let now = unix_time_ms_now();
    ENVELOPE_STAMP_MS.with(|stamp| {
        let next = stamp.get().saturating_add(1).max(now);
        stamp.replace(next);
        next
    })
}
