//! # Live duration clock
//!
//! Open records show how long the vehicle has been parked. The label is
//! re-derived from `now - entry_time` on every tick; nothing accumulates
//! between ticks and nothing is sent to the server, so a backgrounded tab
//! shows the right value as soon as it ticks again.
//!
//! [`use_clock`] owns the timer. The task is spawned when the component first
//! renders and cancelled when it unmounts.

use std::time::Duration;

use api::ParkingRecord;
use chrono::{DateTime, Utc};
use dioxus::prelude::*;

/// Whole minutes between `entry` and `now`, never negative.
pub fn elapsed_minutes(entry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - entry).num_minutes().max(0)
}

/// `"<H>h <M>m"` from one hour up, `"<M>m"` below.
pub fn format_elapsed(minutes: i64) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    if hours > 0 {
        format!("{hours}h {rest}m")
    } else {
        format!("{rest}m")
    }
}

/// Time parked so far, or `None` for a closed record.
pub fn elapsed_label(record: &ParkingRecord, now: DateTime<Utc>) -> Option<String> {
    record
        .is_open()
        .then(|| format_elapsed(elapsed_minutes(record.entry_time, now)))
}

pub(crate) async fn sleep(period: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(period).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(period).await;
}

/// Current time, refreshed every `period` while the calling component is mounted.
pub fn use_clock(period: Duration) -> Signal<DateTime<Utc>> {
    let mut now = use_signal(Utc::now);

    let ticker = use_hook(move || {
        spawn(async move {
            loop {
                sleep(period).await;
                now.set(Utc::now());
            }
        })
    });
    use_drop(move || ticker.cancel());

    now
}
