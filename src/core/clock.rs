//! Trusted time: the device clock corrected by a measured offset against a
//! reference source. Raw local time is never used for punch decisions.

use crate::config::ClockPolicy;
use crate::errors::{AppError, AppResult};
use chrono::{Duration, NaiveDateTime};

/// One measurement of `reference - device` at device time `measured_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSync {
    pub measured_at: NaiveDateTime,
    pub offset_seconds: i64,
}

impl ClockSync {
    pub fn measure(reference: NaiveDateTime, device: NaiveDateTime) -> Self {
        Self {
            measured_at: device,
            offset_seconds: (reference - device).num_seconds(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrustedNow {
    pub corrected: NaiveDateTime,
    pub raw: NaiveDateTime,
}

impl TrustedNow {
    /// |corrected - raw| in whole minutes.
    pub fn skew_minutes(&self) -> i64 {
        (self.corrected - self.raw).num_minutes().abs()
    }

    pub fn is_suspicious(&self, policy: &ClockPolicy) -> bool {
        self.skew_minutes() > policy.suspicious_skew_minutes
    }
}

pub trait TrustedClock {
    fn now(&self) -> AppResult<TrustedNow>;
}

/// A clock pinned to one instant; corrected and raw agree.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl TrustedClock for FixedClock {
    fn now(&self) -> AppResult<TrustedNow> {
        Ok(TrustedNow {
            corrected: self.0,
            raw: self.0,
        })
    }
}

/// Device time corrected by the latest stored sync.
#[derive(Debug, Clone)]
pub struct SyncedClock {
    sync: Option<ClockSync>,
    raw: NaiveDateTime,
    max_age: Duration,
}

impl SyncedClock {
    pub fn new(sync: Option<ClockSync>, raw: NaiveDateTime, policy: &ClockPolicy) -> Self {
        Self {
            sync,
            raw,
            max_age: Duration::hours(policy.max_sync_age_hours),
        }
    }
}

impl TrustedClock for SyncedClock {
    fn now(&self) -> AppResult<TrustedNow> {
        let sync = self
            .sync
            .ok_or_else(|| AppError::ClockUntrusted("no time sync recorded".into()))?;

        if self.raw < sync.measured_at {
            return Err(AppError::ClockUntrusted(
                "device clock moved backwards since the last sync".into(),
            ));
        }
        if self.raw - sync.measured_at > self.max_age {
            return Err(AppError::ClockUntrusted(format!(
                "last sync at {} is stale",
                sync.measured_at.format("%Y-%m-%d %H:%M")
            )));
        }

        Ok(TrustedNow {
            corrected: self.raw + Duration::seconds(sync.offset_seconds),
            raw: self.raw,
        })
    }
}
