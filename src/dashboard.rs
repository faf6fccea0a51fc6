// src/dashboard.rs
//! Calendar and weather view models and the dashboard layout

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime};
use duo_core::{
    Anchor, BBox, HorizontalAnchor, Layer, LayerComposer, TextSegment, VerticalAnchor,
};
use tracing::debug;

use crate::config::DashboardConfig;
use crate::constants::{AGENDA_LIMIT, LINE_GAP, RULE_THICKNESS};
use crate::error::DashboardResult;

pub const CONFIRMED: &str = "CONFIRMED";
pub const CANCELLED: &str = "CANCELLED";

#[derive(Clone, Debug, PartialEq)]
pub struct CalEvent {
    pub summary: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub status: String,
}

impl CalEvent {
    pub fn new(
        summary: impl Into<String>,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            summary: summary.into(),
            start,
            end,
            status: CONFIRMED.to_string(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.status.eq_ignore_ascii_case(CANCELLED)
    }

    pub fn is_in_progress(&self, now: DateTime<FixedOffset>) -> bool {
        self.start <= now && now < self.end
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WeatherViewModel {
    pub summary: String,
    pub high: i32,
    pub low: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CalendarViewModel {
    pub now: DateTime<FixedOffset>,
    pub events: Vec<CalEvent>,
    pub weather: Option<WeatherViewModel>,
}

impl CalendarViewModel {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            now,
            events: Vec::new(),
            weather: None,
        }
    }

    /// A plausible working day around `now`, plus the fixed daily events
    pub fn sample(now: DateTime<FixedOffset>) -> Self {
        let minutes = Duration::minutes;
        let mut events = vec![
            CalEvent::new("Daily standup", now - minutes(5), now + minutes(25)),
            CalEvent::new("Design review", now + minutes(40), now + minutes(60)),
            CalEvent::new("Lunch", now + minutes(80), now + minutes(120)),
            CalEvent::new("Team townhall", now + minutes(150), now + minutes(180)),
        ];
        events.extend(hardcoded_events(now));

        Self {
            now,
            events,
            weather: Some(WeatherViewModel {
                summary: "Mostly Sunny".to_string(),
                high: 27,
                low: 13,
            }),
        }
    }

    /// Events starting after `now`, soonest first
    pub fn upcoming(&self, now: DateTime<FixedOffset>) -> Vec<&CalEvent> {
        let mut events: Vec<&CalEvent> = self
            .events
            .iter()
            .filter(|e| !e.is_cancelled() && e.start > now)
            .collect();
        events.sort_by_key(|e| e.start);
        events
    }

    /// Events running at `now`, the one ending last first
    pub fn in_progress(&self, now: DateTime<FixedOffset>) -> Vec<&CalEvent> {
        let mut events: Vec<&CalEvent> = self
            .events
            .iter()
            .filter(|e| !e.is_cancelled() && e.is_in_progress(now))
            .collect();
        events.sort_by(|a, b| b.end.cmp(&a.end));
        events
    }
}

fn at(date: NaiveDate, hour: u32, minute: u32, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    date.and_time(time).and_local_timezone(offset).single()
}

/// Lunch and sleep on the day of `day`, in its offset
pub fn hardcoded_events(day: DateTime<FixedOffset>) -> Vec<CalEvent> {
    let date = day.date_naive();
    let offset = *day.offset();
    let mut events = Vec::with_capacity(2);

    if let (Some(start), Some(end)) = (at(date, 12, 0, offset), at(date, 13, 0, offset)) {
        events.push(CalEvent::new("Lunch time", start, end));
    }
    let wake = date.succ_opt().and_then(|next| at(next, 9, 0, offset));
    if let (Some(start), Some(end)) = (at(date, 23, 59, offset), wake) {
        events.push(CalEvent::new("Sleep", start, end));
    }
    events
}

/// Boxes of what [`render_dashboard`] drew
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardLayout {
    pub date_strip: BBox,
    pub agenda: Vec<BBox>,
    pub weather: Option<BBox>,
}

/// Lay the whole dashboard out on `composer`'s two layers.
pub fn render_dashboard(
    composer: &mut LayerComposer,
    view: &CalendarViewModel,
    config: &DashboardConfig,
) -> DashboardResult<DashboardLayout> {
    let canvas = composer.canvas();
    let (width, height) = (canvas.width as i32, canvas.height as i32);
    let margin = config.margin;
    let black = config.black();
    let accent = config.accent();

    composer
        .black_mut()
        .outline_box(BBox::new(0, 0, width - 1, height - 1), black.clone(), 2);

    // Date strip
    let weekday = view.now.format("%A").to_string();
    let date = view.now.format(", %-d %B").to_string();
    let (date_strip, _) = composer.text_series(
        Layer::Black,
        margin,
        margin,
        &[
            TextSegment::new(weekday)
                .with_color(accent.clone())
                .on_layer(Layer::Accent),
            TextSegment::new(date),
        ],
        config.title_size,
        Anchor::LEFT_ASCENDER,
        &black,
    )?;
    let rule = BBox::new(
        margin,
        date_strip.bottom() + LINE_GAP,
        width - 2 * margin,
        RULE_THICKNESS,
    );
    composer.black_mut().fill_box(rule, black.clone());

    // Agenda
    let mut agenda = Vec::new();
    let mut y = rule.bottom() + 2 * LINE_GAP;
    for event in view.in_progress(view.now) {
        let until = event.end.format(" until %H:%M").to_string();
        let (line, _) = composer.text_series(
            Layer::Black,
            margin,
            y,
            &[
                TextSegment::new(event.summary.clone())
                    .with_color(accent.clone())
                    .underlined()
                    .on_layer(Layer::Accent),
                TextSegment::new(until),
            ],
            config.body_size,
            Anchor::LEFT_ASCENDER,
            &black,
        )?;
        y = line.bottom() + LINE_GAP;
        agenda.push(line);
    }

    for event in view.upcoming(view.now).into_iter().take(AGENDA_LIMIT) {
        let start = event.start.format("%H:%M  ").to_string();
        let (line, _) = composer.text_series(
            Layer::Black,
            margin,
            y,
            &[TextSegment::new(start), TextSegment::new(event.summary.clone())],
            config.body_size,
            Anchor::LEFT_ASCENDER,
            &black,
        )?;
        y = line.bottom() + LINE_GAP;
        agenda.push(line);
    }

    if agenda.is_empty() {
        let line = composer.black_mut().draw_text(
            (margin, y).into(),
            "Nothing scheduled",
            config.small_size,
            black.clone(),
            Anchor::LEFT_ASCENDER,
            false,
        )?;
        agenda.push(line);
    }

    // Weather, pinned to the bottom-right corner
    let weather = match &view.weather {
        Some(weather) => {
            let (line, _) = composer.text_series(
                Layer::Black,
                width - margin,
                height - margin,
                &[
                    TextSegment::new(format!("{}, high ", weather.summary)),
                    TextSegment::new(format!("{}°", weather.high))
                        .with_color(accent.clone())
                        .on_layer(Layer::Accent),
                    TextSegment::new(format!(", low {}°", weather.low)),
                ],
                config.small_size,
                Anchor::new(HorizontalAnchor::Right, VerticalAnchor::Descender),
                &black,
            )?;
            Some(line)
        }
        None => None,
    };

    debug!(
        "Dashboard laid out: {} agenda lines, black {} / accent {} commands",
        agenda.len(),
        composer.layer(Layer::Black).len(),
        composer.layer(Layer::Accent).len()
    );

    Ok(DashboardLayout {
        date_strip,
        agenda,
        weather,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon_ish() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(-7 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 10, 17, 11, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_hardcoded_events() {
        let events = hardcoded_events(noon_ish());
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].summary, "Lunch time");
        assert_eq!(events[0].end - events[0].start, Duration::hours(1));
        assert_eq!(events[1].summary, "Sleep");
        assert_eq!(events[1].end.date_naive(), NaiveDate::from_ymd_opt(2024, 10, 18).unwrap());
    }

    #[test]
    fn test_upcoming_sorted_by_start() {
        let now = noon_ish();
        let view = CalendarViewModel::sample(now);
        let upcoming = view.upcoming(now);

        assert!(upcoming.iter().all(|e| e.start > now));
        assert!(upcoming.windows(2).all(|w| w[0].start <= w[1].start));
        assert_eq!(upcoming[0].summary, "Lunch time");
        assert_eq!(upcoming[1].summary, "Design review");
    }

    #[test]
    fn test_in_progress_latest_end_first() {
        let now = noon_ish();
        let mut view = CalendarViewModel::new(now);
        view.events = vec![
            CalEvent::new("short", now - Duration::minutes(10), now + Duration::minutes(5)),
            CalEvent::new("long", now - Duration::hours(1), now + Duration::hours(2)),
            CalEvent::new("over", now - Duration::hours(1), now),
            CalEvent::new("later", now + Duration::minutes(1), now + Duration::hours(1)),
        ];

        let running: Vec<&str> = view
            .in_progress(now)
            .iter()
            .map(|e| e.summary.as_str())
            .collect();
        assert_eq!(running, vec!["long", "short"]);
    }

    #[test]
    fn test_cancelled_events_are_hidden() {
        let now = noon_ish();
        let mut view = CalendarViewModel::new(now);
        let mut event = CalEvent::new("gone", now + Duration::hours(1), now + Duration::hours(2));
        event.status = "cancelled".to_string();
        view.events.push(event);

        assert!(view.upcoming(now).is_empty());
    }
}
