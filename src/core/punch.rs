use crate::config::Config;
use crate::core::attendance::evaluate;
use crate::core::attendance::matcher::wrap;
use crate::core::clock::TrustedClock;
use crate::core::logic::{Core, Evaluation};
use crate::core::store::AttendanceStore;
use crate::errors::{AppError, AppResult};
use crate::models::punch::{PunchEvent, ViolationKind};
use crate::models::punch_kind::PunchKind;
use crate::models::shift::ShiftSegment;
use crate::models::state::{PunchState, ShiftDay, StateReport};
use chrono::Days;
use tracing::{info, warn};

/// Result of a successful punch.
#[derive(Debug, Clone)]
pub struct PunchOutcome {
    pub event: PunchEvent,
    pub report: StateReport,
    pub consumed_override: bool,
}

/// High-level business logic for the `punch` command.
pub struct PunchLogic;

impl PunchLogic {
    /// Take the punch the current state allows (IN on READY_IN, OUT on
    /// READY_OUT). Refuses on any other state.
    pub fn apply<S, C>(store: &S, clock: &C, user: &str, cfg: &Config) -> AppResult<PunchOutcome>
    where
        S: AttendanceStore + ?Sized,
        C: TrustedClock + ?Sized,
    {
        // 1️⃣ trusted time, or nothing
        let now = clock.now()?;

        // 2️⃣ evaluate
        let eval = Core::evaluate(store, user, now.corrected, cfg)?;
        let mut report = eval.report.clone();
        if !report.can_punch {
            return Err(AppError::PunchNotAllowed(format!(
                "{} ({})",
                report.state, report.secondary
            )));
        }

        // 3️⃣ one-time override: consume before writing, never twice
        let mut consumed_override = false;
        if report.relies_on_override {
            let grant = eval
                .override_grant
                .as_ref()
                .ok_or_else(|| AppError::OverrideUnavailable(user.to_string()))?;

            if store.consume_override(grant.id, now.corrected)? {
                consumed_override = true;
                info!(user, grant = grant.id, "override grant consumed");
            } else {
                warn!(user, grant = grant.id, "override grant no longer valid, re-evaluating");
                report = evaluate(&eval.input(false), &cfg.windows);
                if !report.can_punch {
                    return Err(AppError::OverrideUnavailable(user.to_string()));
                }
            }
        }

        let kind = match report.state {
            PunchState::ReadyIn => PunchKind::In,
            PunchState::ReadyOut => PunchKind::Out,
            other => return Err(AppError::PunchNotAllowed(other.to_string())),
        };

        // 4️⃣ build the event
        let mut event = PunchEvent::new(user, kind, now.corrected);
        event.device_ts = Some(now.raw);

        if now.is_suspicious(&cfg.clock) {
            event.is_suspicious = true;
            event.flags.insert(ViolationKind::ClockSkew);
            warn!(user, skew = now.skew_minutes(), "device clock skew on punch");
        }
        if consumed_override {
            event.flags.insert(ViolationKind::OverridePunch);
        }
        if let Some(flag) = timing_flag(&eval, &report, &event, cfg) {
            event.flags.insert(flag);
        }

        event.id = store.record_punch(&event)?;

        Ok(PunchOutcome {
            event,
            report,
            consumed_override,
        })
    }
}

/// LateIn / EarlyOut relative to the active segment.
fn timing_flag(
    eval: &Evaluation,
    report: &StateReport,
    event: &PunchEvent,
    cfg: &Config,
) -> Option<ViolationKind> {
    let index = report.active_shift?;
    let (segments, anchor) = match report.shift_day {
        ShiftDay::Today => (&eval.segments_today, eval.date()),
        ShiftDay::Yesterday => (&eval.segments_yesterday, eval.date().checked_sub_days(Days::new(1))?),
    };
    let segment: &ShiftSegment = segments.get(index)?;

    let m = wrap(segment, event.minutes_from(anchor), &cfg.windows);

    match event.kind {
        PunchKind::In if m > segment.start_minute() + cfg.windows.late_grace => Some(ViolationKind::LateIn),
        PunchKind::Out if m < segment.end_minute() => Some(ViolationKind::EarlyOut),
        _ => None,
    }
}
