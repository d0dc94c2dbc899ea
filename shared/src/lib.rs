use serde::{Deserialize, Serialize};
use chrono::{Datelike, NaiveDate};

/// A meeting as returned by the research backend.
///
/// The backend fills `research_summary` and `preparation_questions` with
/// empty strings when generation fails, so "present" means non-blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    /// Meeting start as an RFC 3339 timestamp, if the event has one
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub attendees: Vec<Attendee>,
    #[serde(default)]
    pub research_summary: Option<String>,
    #[serde(default)]
    pub preparation_questions: Option<String>,
}

/// A meeting attendee with whatever research the backend managed to gather.
/// Every field is optional; rendering falls back across the naming fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendee {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub research_summary: Option<String>,
    #[serde(default)]
    pub found_info: bool,
}

fn non_blank(field: &Option<String>) -> bool {
    field.as_deref().map(|s| !s.trim().is_empty()).unwrap_or(false)
}

impl Meeting {
    /// Whether the research action should be offered for this meeting
    pub fn has_research(&self) -> bool {
        non_blank(&self.research_summary) || non_blank(&self.preparation_questions)
    }

    /// Display labels for all attendees, in backend order
    pub fn attendee_labels(&self) -> Vec<&str> {
        self.attendees.iter().map(|a| a.label()).collect()
    }
}

impl Attendee {
    /// Display label, falling back name -> display_name -> email
    pub fn label(&self) -> &str {
        for candidate in [&self.name, &self.display_name, &self.email] {
            if let Some(value) = candidate.as_deref() {
                if !value.trim().is_empty() {
                    return value;
                }
            }
        }
        "Unknown attendee"
    }
}

/// Response body of `GET /meetings/{YYYY-MM-DD}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingsResponse {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub meetings: Vec<Meeting>,
    #[serde(default)]
    pub count: usize,
}

/// Response body of `GET /next-meeting`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextMeetingResponse {
    #[serde(default)]
    pub meeting: Option<Meeting>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Request body of `POST /search-meetings`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchMeetingsRequest {
    pub keyword: String,
}

/// Response body of `POST /search-meetings`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchMeetingsResponse {
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub meetings: Vec<Meeting>,
    #[serde(default)]
    pub count: usize,
}

/// Response body of `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub calendar_agent_available: bool,
    #[serde(default)]
    pub meeting_agent_available: bool,
    #[serde(default)]
    pub timestamp: String,
}

/// The single offline slot persisted after each successful meetings fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfflineMeetings {
    pub date: String,
    pub meetings: Vec<Meeting>,
    /// Epoch millis at save time (browser clock)
    #[serde(default)]
    pub saved_at: Option<f64>,
}

/// Number of cells in the month grid: 6 rows x 7 columns, Sunday-first
pub const GRID_CELLS: usize = 42;

/// Type of calendar cell for explicit rendering logic
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CalendarDayType {
    /// Trailing days of the previous month shown before day 1
    PaddingBefore,
    /// Actual day within the month
    MonthDay,
    /// Leading days of the following month filling out the grid
    PaddingAfter,
}

/// A single cell in the 6x7 month grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarCell {
    pub day: u32,
    /// ISO `YYYY-MM-DD` date; only `MonthDay` cells carry one
    pub date: Option<String>,
    pub day_type: CalendarDayType,
}

impl CalendarCell {
    pub fn in_month(&self) -> bool {
        self.day_type == CalendarDayType::MonthDay
    }
}

/// An immutable snapshot of one month's grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarGrid {
    pub month: u32,
    pub year: i32,
    /// Weekday index of day 1 (0 = Sunday)
    pub first_weekday: u32,
    pub cells: Vec<CalendarCell>,
}

impl CalendarGrid {
    /// Heading such as "March 2024"
    pub fn title(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }
}

/// The month currently shown by the calendar. Navigation always returns a
/// new cursor with the month carried into the year where needed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthCursor {
    pub year: i32,
    /// 1 = January ... 12 = December
    pub month: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month: month.clamp(1, 12) }
    }

    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn grid(self) -> CalendarGrid {
        build_month_grid(self.year, self.month)
    }
}

/// Get the number of days in a given month and year
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 => if is_leap_year(year) { 29 } else { 28 },
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Check if a year is a leap year
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Weekday index of day 1 of the month (0 = Sunday, 1 = Monday, ...)
pub fn first_weekday_of_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

/// Format calendar fields as ISO `YYYY-MM-DD`. No timezone conversion is
/// involved, so the day never shifts across a midnight boundary.
pub fn iso_date(year: i32, month: u32, day: u32) -> String {
    format!("{:04}-{:02}-{:02}", year, month, day)
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January", 2 => "February", 3 => "March", 4 => "April",
        5 => "May", 6 => "June", 7 => "July", 8 => "August",
        9 => "September", 10 => "October", 11 => "November", 12 => "December",
        _ => "January",
    }
}

/// Build the 42-cell Sunday-first grid for one month.
///
/// Leading cells show the real trailing day numbers of the previous month;
/// trailing cells count up from 1 for the following month. Only `MonthDay`
/// cells carry a clickable date.
pub fn build_month_grid(year: i32, month: u32) -> CalendarGrid {
    let lead = first_weekday_of_month(year, month);
    let month_len = days_in_month(year, month);
    let prev = MonthCursor::new(year, month).prev();
    let prev_len = days_in_month(prev.year, prev.month);

    let mut cells = Vec::with_capacity(GRID_CELLS);
    for i in 0..lead {
        cells.push(CalendarCell {
            day: prev_len - lead + 1 + i,
            date: None,
            day_type: CalendarDayType::PaddingBefore,
        });
    }
    for day in 1..=month_len {
        cells.push(CalendarCell {
            day,
            date: Some(iso_date(year, month, day)),
            day_type: CalendarDayType::MonthDay,
        });
    }
    let mut trail = 1;
    while cells.len() < GRID_CELLS {
        cells.push(CalendarCell {
            day: trail,
            date: None,
            day_type: CalendarDayType::PaddingAfter,
        });
        trail += 1;
    }

    CalendarGrid { month, year, first_weekday: lead, cells }
}

/// Display state of the meetings panel for the selected date
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    /// Nothing selected yet
    Idle,
    /// A fetch is in flight
    Loading,
    /// At least one meeting came back
    Loaded(Vec<Meeting>),
    /// The fetch succeeded with zero meetings
    Empty,
    /// The fetch failed; the message is shown in the error panel
    Failed(String),
}

impl Default for LoadState {
    fn default() -> Self {
        LoadState::Idle
    }
}

/// Issues monotonically increasing request tokens. Only the most recently
/// issued token is current; anything older is a superseded fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestTracker {
    last_issued: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> u64 {
        self.last_issued += 1;
        self.last_issued
    }

    pub fn is_current(&self, token: u64) -> bool {
        token == self.last_issued
    }
}

/// The load/display state machine for the meetings panel.
///
/// `begin` starts a tokened fetch; `resolve` applies an outcome only when
/// its token is still current, and tells the caller whether it did - a
/// `true` return is the one point where the loading indicator must stop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeetingLoader {
    tracker: RequestTracker,
    state: LoadState,
}

impl MeetingLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Start a new fetch, superseding any fetch still in flight
    pub fn begin(&mut self) -> u64 {
        self.state = LoadState::Loading;
        self.tracker.begin()
    }

    /// Apply a fetch outcome. Returns `false` (and mutates nothing) when the
    /// token has been superseded by a newer `begin`.
    pub fn resolve(&mut self, token: u64, outcome: Result<Vec<Meeting>, String>) -> bool {
        if !self.tracker.is_current(token) {
            return false;
        }
        self.state = match outcome {
            Ok(meetings) if meetings.is_empty() => LoadState::Empty,
            Ok(meetings) => LoadState::Loaded(meetings),
            Err(message) => LoadState::Failed(message),
        };
        true
    }
}

/// Fixed ordered sequence the loading indicator cycles through while the
/// backend researches a date
pub const RESEARCH_SOURCES: [&str; 6] = [
    "Reading your calendar",
    "Searching Google",
    "Scanning LinkedIn",
    "Checking company pages",
    "Summarizing findings",
    "Writing prep questions",
];

/// Indicator advance period in milliseconds
pub const LOADING_TICK_MS: u32 = 500;

/// Cycles through `RESEARCH_SOURCES`, wrapping around indefinitely
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadingCycle {
    step: usize,
}

impl LoadingCycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&self) -> &'static str {
        RESEARCH_SOURCES[self.step % RESEARCH_SOURCES.len()]
    }

    pub fn advance(&mut self) -> &'static str {
        self.step = self.step.wrapping_add(1);
        self.message()
    }
}

/// Character cap for attendee research excerpts in the research view
pub const ATTENDEE_EXCERPT_CHARS: usize = 160;
/// Character cap for meeting-level analysis and preparation excerpts
pub const MEETING_EXCERPT_CHARS: usize = 400;

/// Truncate to at most `max_chars` characters, appending an ellipsis when
/// anything was cut. Operates on characters, never mid-codepoint.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

/// Light/dark display theme, persisted across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Dark
    }
}

impl Theme {
    /// Storage encoding, also used as the root css class suffix
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Decode the stored value; anything unrecognized falls back to dark
    pub fn from_storage(value: &str) -> Self {
        match value {
            "light" => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn css_class(self) -> String {
        format!("theme-{}", self.as_str())
    }
}

/// Explicit preferences object handed to the render layer at startup and
/// updated through `set_theme`; persistence happens at the storage boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub theme: Theme,
}

impl Preferences {
    pub fn with_theme(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_month_days(grid: &CalendarGrid) -> Vec<u32> {
        grid.cells
            .iter()
            .filter(|c| c.in_month())
            .map(|c| c.day)
            .collect()
    }

    #[test]
    fn test_grid_always_has_42_cells() {
        for (year, month) in [(2024, 2), (2025, 2), (2024, 3), (2025, 6), (2024, 12), (2025, 1)] {
            let grid = build_month_grid(year, month);
            assert_eq!(grid.cells.len(), GRID_CELLS, "{}-{}", year, month);
        }
    }

    #[test]
    fn test_month_days_contiguous_from_one() {
        for (year, month) in [(2024, 2), (2025, 2), (2024, 3), (2025, 6)] {
            let days = grid_month_days(&build_month_grid(year, month));
            let expected: Vec<u32> = (1..=days_in_month(year, month)).collect();
            assert_eq!(days, expected, "{}-{}", year, month);
        }
    }

    #[test]
    fn test_filler_count_is_42_minus_month_len() {
        for (year, month) in [(2024, 2), (2024, 3), (2025, 6), (2023, 2)] {
            let grid = build_month_grid(year, month);
            let filler = grid.cells.iter().filter(|c| !c.in_month()).count();
            assert_eq!(filler as u32, 42 - days_in_month(year, month));
        }
    }

    #[test]
    fn test_march_2024_leading_days() {
        // March 1, 2024 was a Friday; February 2024 had 29 days
        let grid = build_month_grid(2024, 3);
        assert_eq!(grid.first_weekday, 5);
        let leading: Vec<u32> = grid
            .cells
            .iter()
            .take_while(|c| c.day_type == CalendarDayType::PaddingBefore)
            .map(|c| c.day)
            .collect();
        assert_eq!(leading, vec![25, 26, 27, 28, 29]);
    }

    #[test]
    fn test_january_2025_leading_days_cross_year() {
        // January 1, 2025 was a Wednesday; December has 31 days
        let grid = build_month_grid(2025, 1);
        assert_eq!(grid.first_weekday, 3);
        let leading: Vec<u32> = grid
            .cells
            .iter()
            .take_while(|c| c.day_type == CalendarDayType::PaddingBefore)
            .map(|c| c.day)
            .collect();
        assert_eq!(leading, vec![29, 30, 31]);
    }

    #[test]
    fn test_trailing_days_count_up_from_one() {
        // June 1, 2025 was a Sunday: no leading filler, 12 trailing cells
        let grid = build_month_grid(2025, 6);
        assert_eq!(grid.first_weekday, 0);
        let trailing: Vec<u32> = grid
            .cells
            .iter()
            .filter(|c| c.day_type == CalendarDayType::PaddingAfter)
            .map(|c| c.day)
            .collect();
        assert_eq!(trailing, (1..=12).collect::<Vec<u32>>());
    }

    #[test]
    fn test_month_day_cells_carry_dates() {
        let grid = build_month_grid(2024, 3);
        for cell in &grid.cells {
            match cell.day_type {
                CalendarDayType::MonthDay => {
                    assert_eq!(cell.date.as_deref(), Some(iso_date(2024, 3, cell.day).as_str()));
                }
                _ => assert!(cell.date.is_none()),
            }
        }
    }

    #[test]
    fn test_cursor_december_rolls_into_next_year() {
        let cursor = MonthCursor::new(2024, 12).next();
        assert_eq!(cursor, MonthCursor { year: 2025, month: 1 });
    }

    #[test]
    fn test_cursor_january_rolls_into_prev_year() {
        let cursor = MonthCursor::new(2025, 1).prev();
        assert_eq!(cursor, MonthCursor { year: 2024, month: 12 });
    }

    #[test]
    fn test_cursor_mid_year_navigation() {
        let cursor = MonthCursor::new(2025, 6);
        assert_eq!(cursor.next(), MonthCursor { year: 2025, month: 7 });
        assert_eq!(cursor.prev(), MonthCursor { year: 2025, month: 5 });
    }

    #[test]
    fn test_iso_date_zero_pads() {
        assert_eq!(iso_date(2024, 3, 5), "2024-03-05");
        assert_eq!(iso_date(2024, 12, 15), "2024-12-15");
    }

    #[test]
    fn test_days_in_month_and_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 12), 31);
    }

    fn sample_meeting(title: &str) -> Meeting {
        Meeting {
            id: None,
            title: title.to_string(),
            start_time: None,
            end_time: None,
            location: None,
            description: None,
            attendees: Vec::new(),
            research_summary: None,
            preparation_questions: None,
        }
    }

    #[test]
    fn test_loader_empty_result_is_success() {
        let mut loader = MeetingLoader::new();
        let token = loader.begin();
        assert_eq!(loader.state(), &LoadState::Loading);
        assert!(loader.resolve(token, Ok(Vec::new())));
        assert_eq!(loader.state(), &LoadState::Empty);
    }

    #[test]
    fn test_loader_stale_token_is_rejected() {
        let mut loader = MeetingLoader::new();
        let first = loader.begin();
        let second = loader.begin();

        // The superseded fetch resolves first and must be ignored
        assert!(!loader.resolve(first, Ok(vec![sample_meeting("old")])));
        assert_eq!(loader.state(), &LoadState::Loading);

        assert!(loader.resolve(second, Ok(vec![sample_meeting("new")])));
        match loader.state() {
            LoadState::Loaded(meetings) => assert_eq!(meetings[0].title, "new"),
            other => panic!("unexpected state: {:?}", other),
        }

        // Even arriving after the newer resolution, the old token changes nothing
        assert!(!loader.resolve(first, Err("late failure".to_string())));
        match loader.state() {
            LoadState::Loaded(meetings) => assert_eq!(meetings[0].title, "new"),
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[test]
    fn test_loader_failure_carries_message() {
        let mut loader = MeetingLoader::new();
        let token = loader.begin();
        assert!(loader.resolve(token, Err("status: 500".to_string())));
        assert_eq!(loader.state(), &LoadState::Failed("status: 500".to_string()));
    }

    #[test]
    fn test_meetings_response_decodes_example() {
        let body = r#"{"meetings":[{"title":"Sync","start_time":"2024-03-15T14:00:00Z","attendees":[{"name":"A"}]}]}"#;
        let response: MeetingsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.meetings.len(), 1);
        let meeting = &response.meetings[0];
        assert_eq!(meeting.title, "Sync");
        assert_eq!(meeting.start_time.as_deref(), Some("2024-03-15T14:00:00Z"));
        assert_eq!(meeting.attendee_labels(), vec!["A"]);
    }

    #[test]
    fn test_attendee_label_fallback_chain() {
        let mut attendee = Attendee {
            name: None,
            display_name: None,
            email: None,
            company: None,
            title: None,
            research_summary: None,
            found_info: false,
        };
        assert_eq!(attendee.label(), "Unknown attendee");

        attendee.email = Some("ada@example.com".to_string());
        assert_eq!(attendee.label(), "ada@example.com");

        attendee.display_name = Some("Ada L.".to_string());
        assert_eq!(attendee.label(), "Ada L.");

        attendee.name = Some("Ada Lovelace".to_string());
        assert_eq!(attendee.label(), "Ada Lovelace");

        // Blank strings do not count as present
        attendee.name = Some("   ".to_string());
        assert_eq!(attendee.label(), "Ada L.");
    }

    #[test]
    fn test_has_research_treats_blank_as_absent() {
        let mut meeting = sample_meeting("Sync");
        assert!(!meeting.has_research());

        meeting.research_summary = Some(String::new());
        meeting.preparation_questions = Some("   ".to_string());
        assert!(!meeting.has_research());

        meeting.preparation_questions = Some("What shipped last quarter?".to_string());
        assert!(meeting.has_research());
    }

    #[test]
    fn test_loading_cycle_wraps_around() {
        let mut cycle = LoadingCycle::new();
        assert_eq!(cycle.message(), RESEARCH_SOURCES[0]);
        for expected in RESEARCH_SOURCES.iter().skip(1) {
            assert_eq!(cycle.advance(), *expected);
        }
        assert_eq!(cycle.advance(), RESEARCH_SOURCES[0]);
    }

    #[test]
    fn test_excerpt_short_text_untouched() {
        assert_eq!(excerpt("short note", 50), "short note");
        assert_eq!(excerpt("  padded  ", 50), "padded");
    }

    #[test]
    fn test_excerpt_truncates_with_ellipsis() {
        let result = excerpt("abcdefghij", 4);
        assert_eq!(result, "abcd...");
    }

    #[test]
    fn test_excerpt_respects_char_boundaries() {
        let result = excerpt("héllo wörld", 6);
        assert_eq!(result, "héllo...");
    }

    #[test]
    fn test_theme_storage_round_trip() {
        assert_eq!(Theme::from_storage("light"), Theme::Light);
        assert_eq!(Theme::from_storage("dark"), Theme::Dark);
        assert_eq!(Theme::from_storage("mauve"), Theme::Dark);
        assert_eq!(Theme::default(), Theme::Dark);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().as_str(), "light");
    }

    #[test]
    fn test_preferences_setter() {
        let mut prefs = Preferences::default();
        assert_eq!(prefs.theme, Theme::Dark);
        prefs.set_theme(Theme::Light);
        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(prefs.theme.css_class(), "theme-light");
    }
}
