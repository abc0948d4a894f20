use crate::domain::model::Trend;
use chrono::{NaiveDate, NaiveDateTime};

/// Day-first forms with a four-digit year.
const DAY_FIRST_FORMATS: &[&str] = &[
    "%d/%m/%Y",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d.%m.%Y",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

/// Day-first forms with a two-digit year; chrono maps 00-68 to 20xx and 69-99 to 19xx.
const SHORT_YEAR_FORMATS: &[&str] = &[
    "%d/%m/%y",
    "%d/%m/%y %H:%M:%S",
    "%d/%m/%y %H:%M",
    "%d-%m-%y",
    "%d-%m-%y %H:%M:%S",
    "%d-%m-%y %H:%M",
    "%d.%m.%y",
    "%d.%m.%y %H:%M:%S",
    "%d.%m.%y %H:%M",
];

/// ISO forms, which is what export writes.
const ISO_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_SEPARATORS: [char; 3] = ['/', '-', '.'];

pub const EXPORT_DATE_FORMAT: &str = "%Y-%m-%d";

pub const SUPPORTED_LOCALES: &[&str] = &["pt", "en"];

/// Parse a day-first date string ("15/03/2023", "15-03-23 10:42") into a calendar date.
/// Any time component is dropped. Returns None for empty or unparseable strings, and
/// for years that are neither two nor four digits wide.
pub fn parse_day_first(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    let date_part = trimmed.split([' ', 'T']).next()?;

    // chrono's %Y takes 1 to 4 digits, so pick the format family by the year token
    let tokens: Vec<&str> = date_part.split(DATE_SEPARATORS).collect();
    let formats = match tokens.as_slice() {
        [year, _, _] if year.len() == 4 => ISO_FORMATS,
        [_, _, year] if year.len() == 4 => DAY_FIRST_FORMATS,
        [_, _, year] if year.len() == 2 => SHORT_YEAR_FORMATS,
        _ => return None,
    };

    formats.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(trimmed, fmt)
            .ok()
            .or_else(|| NaiveDateTime::parse_from_str(trimmed, fmt).ok().map(|dt| dt.date()))
    })
}

pub fn format_export_date(date: NaiveDate) -> String {
    date.format(EXPORT_DATE_FORMAT).to_string()
}

/// Display table for month abbreviations and trend wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthLocale {
    code: &'static str,
    months: [(&'static str, &'static str); 12],
    trend_words: [&'static str; 3],
}

impl MonthLocale {
    pub fn portuguese() -> Self {
        Self {
            code: "pt",
            months: [
                ("Jan", "Jan"),
                ("Feb", "Fev"),
                ("Mar", "Mar"),
                ("Apr", "Abr"),
                ("May", "Mai"),
                ("Jun", "Jun"),
                ("Jul", "Jul"),
                ("Aug", "Ago"),
                ("Sep", "Set"),
                ("Oct", "Out"),
                ("Nov", "Nov"),
                ("Dec", "Dez"),
            ],
            trend_words: ["Subiu", "Caiu", "Estável"],
        }
    }

    pub fn english() -> Self {
        Self {
            code: "en",
            months: [
                ("Jan", "Jan"),
                ("Feb", "Feb"),
                ("Mar", "Mar"),
                ("Apr", "Apr"),
                ("May", "May"),
                ("Jun", "Jun"),
                ("Jul", "Jul"),
                ("Aug", "Aug"),
                ("Sep", "Sep"),
                ("Oct", "Oct"),
                ("Nov", "Nov"),
                ("Dec", "Dec"),
            ],
            trend_words: ["Up", "Down", "Flat"],
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "pt" => Some(Self::portuguese()),
            "en" => Some(Self::english()),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Unknown abbreviations pass through unchanged.
    pub fn translate<'a>(&self, abbreviation: &'a str) -> &'a str {
        self.months
            .iter()
            .find(|(en, _)| *en == abbreviation)
            .map(|(_, local)| *local)
            .unwrap_or(abbreviation)
    }

    /// "Mar 2023" style label with the month abbreviation localized.
    pub fn month_label(&self, date: NaiveDate) -> String {
        let english = date.format("%b %Y").to_string();
        match english.split_once(' ') {
            Some((month, year)) => format!("{} {}", self.translate(month), year),
            None => english,
        }
    }

    pub fn trend_word(&self, trend: Trend) -> &'static str {
        match trend {
            Trend::Up => self.trend_words[0],
            Trend::Down => self.trend_words[1],
            Trend::Flat => self.trend_words[2],
        }
    }
}

impl Default for MonthLocale {
    fn default() -> Self {
        Self::portuguese()
    }
}
