use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub const AVAILABILITY_NOTE: &str = "Slots open Mon/Tue/Thu/Fri from 2:00 PM to 4:00 PM. \
Wednesdays and Saturdays are open the whole day. Sundays are closed.";

/// Half-open daily window `[start_hour, end_hour)`, hours 0..=24.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenWindow {
    pub start_hour: u8,
    pub end_hour: u8,
}

impl OpenWindow {
    pub fn new(start_hour: u8, end_hour: u8) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    fn contains(&self, hour_value: f64) -> bool {
        f64::from(self.start_hour) <= hour_value && hour_value < f64::from(self.end_hour)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Preferred date and time must be in the future.")]
    InPast,

    #[error("We are closed on {day}s. Please pick another day.")]
    ClosedDay { day: &'static str },

    #[error("{note}")]
    OutsideWindows { note: String },
}

/// Weekly availability calendar, indexed Monday = 0. Evaluated in the shop's
/// local time (a fixed UTC offset).
#[derive(Debug, Clone)]
pub struct WeeklyCalendar {
    windows: [Vec<OpenWindow>; 7],
    note: String,
}

impl Default for WeeklyCalendar {
    fn default() -> Self {
        let slot = vec![OpenWindow::new(14, 16)];
        let whole_day = vec![OpenWindow::new(0, 24)];
        Self {
            windows: [
                slot.clone(),      // Monday
                slot.clone(),      // Tuesday
                whole_day.clone(), // Wednesday
                slot.clone(),      // Thursday
                slot,              // Friday
                whole_day,         // Saturday
                Vec::new(),        // Sunday
            ],
            note: AVAILABILITY_NOTE.to_string(),
        }
    }
}

impl WeeklyCalendar {
    /// Calendar from explicit per-day windows (configuration override). The
    /// note is derived from the windows so rejection messages stay accurate.
    pub fn from_windows(windows: [Vec<OpenWindow>; 7]) -> Self {
        let note = summarize_windows(&windows);
        Self { windows, note }
    }

    pub fn windows_for(&self, weekday: usize) -> &[OpenWindow] {
        &self.windows[weekday % 7]
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn is_open_at(&self, local: DateTime<FixedOffset>) -> bool {
        let weekday = local.weekday().num_days_from_monday() as usize;
        let hour_value = f64::from(local.hour()) + f64::from(local.minute()) / 60.0;
        self.windows[weekday].iter().any(|w| w.contains(hour_value))
    }

    /// 預約時間檢查：未來時間、當日有營業、落在時段內
    pub fn check_requested_time(
        &self,
        preferred: DateTime<Utc>,
        now: DateTime<Utc>,
        offset: FixedOffset,
    ) -> Result<(), ScheduleError> {
        if preferred < now {
            return Err(ScheduleError::InPast);
        }

        let local = preferred.with_timezone(&offset);
        let weekday = local.weekday().num_days_from_monday() as usize;
        if self.windows[weekday].is_empty() {
            return Err(ScheduleError::ClosedDay {
                day: DAY_NAMES[weekday],
            });
        }

        if !self.is_open_at(local) {
            return Err(ScheduleError::OutsideWindows {
                note: self.note.clone(),
            });
        }

        Ok(())
    }

    /// Earliest instant at or after `after` that falls inside a window,
    /// minute granularity. `None` when every day of the week is closed.
    pub fn next_opening(
        &self,
        after: DateTime<Utc>,
        offset: FixedOffset,
    ) -> Option<DateTime<Utc>> {
        if self.windows.iter().all(|day| day.is_empty()) {
            return None;
        }

        let local = after.with_timezone(&offset);
        // 進位到整分鐘
        let local = if local.second() > 0 || local.nanosecond() > 0 {
            (local + Duration::seconds(60 - i64::from(local.second())))
                .with_nanosecond(0)
                .unwrap_or(local)
        } else {
            local
        };

        for day_offset in 0..14 {
            let date = local.date_naive() + Duration::days(day_offset);
            let weekday = date.weekday().num_days_from_monday() as usize;

            let mut day_windows: Vec<OpenWindow> = self.windows[weekday].clone();
            day_windows.sort_by_key(|w| w.start_hour);

            for window in day_windows {
                let start = window_instant(date, window.start_hour, offset)?;
                let end = window_instant(date, window.end_hour, offset)?;
                if local < start {
                    return Some(start.with_timezone(&Utc));
                }
                if local < end {
                    return Some(local.with_timezone(&Utc));
                }
            }
        }

        None
    }
}

fn window_instant(date: NaiveDate, hour: u8, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    // 24 點視為隔日 00:00
    let naive = if hour >= 24 {
        (date + Duration::days(1)).and_hms_opt(0, 0, 0)?
    } else {
        date.and_hms_opt(u32::from(hour), 0, 0)?
    };
    naive.and_local_timezone(offset).single()
}

fn summarize_windows(windows: &[Vec<OpenWindow>; 7]) -> String {
    let mut parts = Vec::new();
    for (idx, day) in windows.iter().enumerate() {
        let short = &DAY_NAMES[idx][..3];
        if day.is_empty() {
            parts.push(format!("{} closed", short));
        } else if day.len() == 1 && day[0].start_hour == 0 && day[0].end_hour == 24 {
            parts.push(format!("{} all day", short));
        } else {
            let spans: Vec<String> = day
                .iter()
                .map(|w| format!("{:02}:00-{:02}:00", w.start_hour, w.end_hour))
                .collect();
            parts.push(format!("{} {}", short, spans.join(", ")));
        }
    }
    format!("Open hours: {}.", parts.join("; "))
}

/// Parse a `+08:00` / `-05:30` style offset string.
pub fn parse_utc_offset(value: &str) -> Option<FixedOffset> {
    let (sign, rest) = if let Some(rest) = value.strip_prefix('+') {
        (1i32, rest)
    } else if let Some(rest) = value.strip_prefix('-') {
        (-1i32, rest)
    } else {
        return None;
    };
    let (hours, minutes) = rest.split_once(':')?;
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 14 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
