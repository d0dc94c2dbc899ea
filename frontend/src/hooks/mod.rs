pub mod use_calendar;
pub mod use_meetings;
pub mod use_theme;
