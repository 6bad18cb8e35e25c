use crate::config::Config;
use crate::core::attendance::{MatchedShift, StateInput, evaluate, match_days, resolve_with_holidays};
use crate::core::store::AttendanceStore;
use crate::errors::AppResult;
use crate::models::override_grant::OverrideGrant;
use crate::models::punch::PunchEvent;
use crate::models::shift::ShiftSegment;
use crate::models::state::{PunchState, StateReport};
use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Everything computed for one user at one instant, kept for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub user: String,
    pub now: NaiveDateTime,
    pub segments_today: Vec<ShiftSegment>,
    pub segments_yesterday: Vec<ShiftSegment>,
    pub today: Vec<MatchedShift>,
    pub yesterday: Vec<MatchedShift>,
    pub today_logs: Vec<PunchEvent>,
    #[serde(skip)]
    pub override_grant: Option<OverrideGrant>,
    pub report: StateReport,
}

impl Evaluation {
    pub fn input(&self, override_active: bool) -> StateInput<'_> {
        StateInput {
            now: self.now,
            today: &self.today,
            today_logs: &self.today_logs,
            yesterday: &self.yesterday,
            override_active,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.now.date()
    }
}

fn sorted(mut events: Vec<PunchEvent>) -> Vec<PunchEvent> {
    events.sort_by(|a, b| a.server_ts.cmp(&b.server_ts).then(a.id.cmp(&b.id)));
    events
}

pub struct Core;

impl Core {
    /// Resolve → match (yesterday and today) → state machine.
    ///
    /// `now` must already be trusted time. All reads happen before the
    /// state machine runs; nothing is written.
    pub fn evaluate<S: AttendanceStore + ?Sized>(
        store: &S,
        user: &str,
        now: NaiveDateTime,
        cfg: &Config,
    ) -> AppResult<Evaluation> {
        let today = now.date();
        let yesterday = today.checked_sub_days(Days::new(1)).unwrap_or(today);

        // 1️⃣ schedules, full history
        let records = store.schedules_for_user(user)?;
        let segments_today = resolve_with_holidays(&records, today, &cfg.holidays);
        let segments_yesterday = resolve_with_holidays(&records, yesterday, &cfg.holidays);

        // 2️⃣ punches; an OUT after midnight may still close yesterday's
        //    overnight segment
        let today_logs = sorted(store.punches_for_date(user, today)?);
        let yesterday_logs = sorted(store.punches_for_date(user, yesterday)?);
        let (matched_yesterday, matched_today) = match_days(
            &yesterday_logs,
            &today_logs,
            &segments_yesterday,
            &segments_today,
            today,
            &cfg.windows,
        );

        // 3️⃣ override validity against trusted time
        let override_grant = store.active_override(user, now)?;

        let mut eval = Evaluation {
            user: user.to_string(),
            now,
            segments_today,
            segments_yesterday,
            today: matched_today,
            yesterday: matched_yesterday,
            today_logs,
            override_grant,
            report: StateReport::new(PunchState::Off, "", ""),
        };

        // 4️⃣ state machine
        let report = evaluate(&eval.input(eval.override_grant.is_some()), &cfg.windows);
        eval.report = report;
        Ok(eval)
    }
}
