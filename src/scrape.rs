//! HTML Extraction
//!
//! Pulls racer profiles, per-racer schedules and race cards out of the
//! upstream boatrace pages. Extraction is regex based and tolerant: a field
//! that cannot be found is `None`, a row or card missing required cells is
//! skipped.
//!
//! All patterns are compiled once in `HtmlParser::new()`; share one parser
//! across requests.

use crate::types::ClassRank;
use crate::utils::{venue_code, VENUES};
use chrono::{Days, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Extracted types
// ============================================================================

/// Race grade as printed on the schedule pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    SG,
    G1,
    G2,
    G3,
    /// Ungraded meet, printed upstream as 一般
    #[serde(rename = "一般", alias = "General")]
    General,
}

impl Grade {
    /// SG or G1
    pub fn is_premier(&self) -> bool {
        matches!(self, Grade::SG | Grade::G1)
    }
}

/// Unknown grade label
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown grade: {0}")]
pub struct ParseGradeError(pub String);

impl FromStr for Grade {
    type Err = ParseGradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SG" => Ok(Grade::SG),
            "G1" => Ok(Grade::G1),
            "G2" => Ok(Grade::G2),
            "G3" => Ok(Grade::G3),
            "一般" | "General" => Ok(Grade::General),
            other => Err(ParseGradeError(other.to_string())),
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Grade::SG => "SG",
            Grade::G1 => "G1",
            Grade::G2 => "G2",
            Grade::G3 => "G3",
            Grade::General => "一般",
        };
        f.write_str(s)
    }
}

/// Racer profile header; every field may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RacerProfile {
    pub id: Option<String>,
    pub name: Option<String>,
    pub branch: Option<String>,
    pub rank: Option<ClassRank>,
    pub win_rate: Option<f64>,
}

/// One row of a racer's upcoming schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    /// `M/D`, no year
    pub date: String,
    pub venue_name: String,
    pub grade: Grade,
}

/// Schedule row resolved to calendar dates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledRace {
    pub id: String,
    pub venue_name: String,
    /// "00" when the venue is not in the table
    pub venue_code: String,
    pub race_name: String,
    pub grade: Grade,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: u64,
}

/// One race card from the race index page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceCard {
    pub race_name: String,
    pub venue_name: String,
    pub grade: Grade,
    /// Raw `M月D日` strings in page order
    pub dates: Vec<String>,
}

// ============================================================================
// Parser
// ============================================================================

pub struct HtmlParser {
    racer_name: Regex,
    racer_id: Regex,
    branch: Regex,
    class_rank: Regex,
    win_rate: Regex,
    table_row: Regex,
    kanji_date: Regex,
    venue_cell: Regex,
    schedule_grade: Regex,
    race_card: Regex,
    race_name: Regex,
    card_grade: Regex,
}

impl HtmlParser {
    pub fn new() -> Result<Self, regex::Error> {
        let venues = VENUES
            .iter()
            .map(|v| regex::escape(v.name))
            .collect::<Vec<_>>()
            .join("|");

        Ok(Self {
            racer_name: Regex::new(r#"<div[^>]*class="[^"]*racer_name[^"]*"[^>]*>([^<]+)</div>"#)?,
            racer_id: Regex::new(r"登録番号[：:]?\s*(\d{4})")?,
            branch: Regex::new(r"支部[：:]?\s*([^\s<]+)")?,
            class_rank: Regex::new(r"級別[：:]?\s*([AB][12])")?,
            win_rate: Regex::new(r"勝率[：:]?\s*([\d.]+)")?,
            table_row: Regex::new(r"(?s)<tr[^>]*>(.*?)</tr>")?,
            kanji_date: Regex::new(r"(\d{1,2})月(\d{1,2})日")?,
            venue_cell: Regex::new(&format!(">({})<", venues))?,
            schedule_grade: Regex::new(r">(SG|G1|G2|G3|一般)<")?,
            race_card: Regex::new(r#"(?s)<div[^>]*class="[^"]*race[-_]?card[^"]*"[^>]*>(.*?)</div>"#)?,
            race_name: Regex::new(r#"class="[^"]*race[-_]?name[^"]*">([^<]+)<"#)?,
            card_grade: Regex::new(r">(SG|G1|G2|G3)")?,
        })
    }

    fn first_capture<'h>(re: &Regex, haystack: &'h str) -> Option<&'h str> {
        re.captures(haystack)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    /// Profile header of a racer season page
    pub fn parse_racer_info(&self, html: &str) -> RacerProfile {
        RacerProfile {
            id: Self::first_capture(&self.racer_id, html).map(str::to_string),
            name: Self::first_capture(&self.racer_name, html)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            branch: Self::first_capture(&self.branch, html).map(str::to_string),
            rank: Self::first_capture(&self.class_rank, html).and_then(|s| s.parse().ok()),
            win_rate: Self::first_capture(&self.win_rate, html).and_then(|s| s.parse().ok()),
        }
    }

    /// Schedule rows: table rows with a date and a known venue
    pub fn parse_schedule(&self, html: &str) -> Vec<ScheduleEntry> {
        self.table_row
            .captures_iter(html)
            .filter_map(|row| {
                let row = row.get(1)?.as_str();
                let date = self.kanji_date.captures(row)?;
                let venue_name = Self::first_capture(&self.venue_cell, row)?;
                let grade = Self::first_capture(&self.schedule_grade, row)
                    .and_then(|g| g.parse().ok())
                    .unwrap_or(Grade::General);

                Some(ScheduleEntry {
                    date: format!("{}/{}", &date[1], &date[2]),
                    venue_name: venue_name.to_string(),
                    grade,
                })
            })
            .collect()
    }

    /// Race cards carrying a name, venue and graded title
    pub fn parse_race_list(&self, html: &str) -> Vec<RaceCard> {
        self.race_card
            .captures_iter(html)
            .filter_map(|card| {
                let card = card.get(1)?.as_str();
                let race_name = Self::first_capture(&self.race_name, card)?.trim();
                if race_name.is_empty() {
                    return None;
                }
                let venue_name = Self::first_capture(&self.venue_cell, card)?;
                let grade = Self::first_capture(&self.card_grade, card)?.parse().ok()?;
                let dates = self
                    .kanji_date
                    .find_iter(card)
                    .map(|m| m.as_str().to_string())
                    .collect();

                Some(RaceCard {
                    race_name: race_name.to_string(),
                    venue_name: venue_name.to_string(),
                    grade,
                    dates,
                })
            })
            .collect()
    }
}

/// Resolve an `M/D` schedule date against `year`, shifted by `offset_days`
pub fn resolve_schedule_date(date: &str, year: i32, offset_days: u64) -> Option<NaiveDate> {
    let (month, day) = date.trim().split_once('/')?;
    let start = NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)?;
    start.checked_add_days(Days::new(offset_days))
}

/// Meets are assumed to run six days from the listed start date
pub const MEET_DAYS: u64 = 6;

/// Resolve schedule rows against `year`
///
/// Rows whose date does not exist in `year` are dropped.
pub fn scheduled_races(entries: &[ScheduleEntry], year: i32) -> Vec<ScheduledRace> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let start_date = resolve_schedule_date(&entry.date, year, 0)?;
            let end_date = resolve_schedule_date(&entry.date, year, MEET_DAYS - 1)?;

            Some(ScheduledRace {
                id: format!("race-{}", index),
                venue_name: entry.venue_name.clone(),
                venue_code: venue_code(&entry.venue_name).to_string(),
                race_name: format!("{}{}", entry.venue_name, entry.grade),
                grade: entry.grade,
                start_date,
                end_date,
                days: MEET_DAYS,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const RACER_PAGE: &str = r#"
        <div class="racer_header">
          <div class="is-main racer_name is-fs20">  Synthetic Racer  </div>
          <dl><dt>登録番号：</dt><dd>登録番号：9001</dd></dl>
          <p>支部：東京</p>
          <p>級別：A1</p>
          <p>勝率： 7.45</p>
        </div>
        <table>
          <tr><th>日付</th><th>場</th><th>グレード</th></tr>
          <tr><td>10月27日</td><td>尼崎</td><td>SG</td></tr>
          <tr><td>11月3日</td><td>若松</td><td>一般</td></tr>
          <tr><td>11月9日</td><td>不明</td><td>G1</td></tr>
          <tr><td>11月15日</td><td>びわこ</td><td></td></tr>
        </table>
    "#;

    fn parser() -> HtmlParser {
        HtmlParser::new().unwrap()
    }

    #[test]
    fn test_parse_racer_info() {
        let profile = parser().parse_racer_info(RACER_PAGE);

        assert_eq!(profile.id.as_deref(), Some("9001"));
        assert_eq!(profile.name.as_deref(), Some("Synthetic Racer"));
        assert_eq!(profile.branch.as_deref(), Some("東京"));
        assert_eq!(profile.rank, Some(ClassRank::A1));
        assert_relative_eq!(profile.win_rate.unwrap(), 7.45);
    }

    #[test]
    fn test_parse_racer_info_missing_fields() {
        let profile = parser().parse_racer_info("<html><body>no profile here</body></html>");
        assert_eq!(profile, RacerProfile::default());
    }

    #[test]
    fn test_parse_schedule_skips_rows_without_venue() {
        let schedule = parser().parse_schedule(RACER_PAGE);

        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule[0].date, "10/27");
        assert_eq!(schedule[0].venue_name, "尼崎");
        assert_eq!(schedule[0].grade, Grade::SG);
        assert_eq!(schedule[1].grade, Grade::General);
        // no grade cell
        assert_eq!(schedule[2].venue_name, "びわこ");
        assert_eq!(schedule[2].grade, Grade::General);
    }

    #[test]
    fn test_parse_race_list() {
        let html = r#"
            <div class="race-card"><span class="race-name">Synthetic Cup</span>
              <span>大村</span><span>SG</span> 12月21日 - 12月26日</div>
            <div class="race_card is-small"><span class="race_name">Local Trophy</span>
              <span>戸田</span><span>G3</span> 1月2日</div>
            <div class="racecard"><span class="racename">Ungraded</span><span>津</span></div>
            <div class="race-card"><span class="race-name">No Venue</span><span>G1</span></div>
        "#;
        let cards = parser().parse_race_list(html);

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].race_name, "Synthetic Cup");
        assert_eq!(cards[0].venue_name, "大村");
        assert_eq!(cards[0].grade, Grade::SG);
        assert_eq!(cards[0].dates, vec!["12月21日", "12月26日"]);
        assert_eq!(cards[1].grade, Grade::G3);
        assert!(!cards[1].grade.is_premier());
    }

    #[test]
    fn test_resolve_schedule_date() {
        let d = resolve_schedule_date("2/25", 2026, 0).unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2026, 2, 25).unwrap());

        let end = resolve_schedule_date("12/28", 2026, 6).unwrap();
        assert_eq!(end, NaiveDate::from_ymd_opt(2027, 1, 3).unwrap());

        assert!(resolve_schedule_date("2/30", 2026, 0).is_none());
        assert!(resolve_schedule_date("garbage", 2026, 0).is_none());
    }

    #[test]
    fn test_scheduled_races_resolve_venue_and_dates() {
        let schedule = parser().parse_schedule(RACER_PAGE);
        let races = scheduled_races(&schedule, 2026);

        assert_eq!(races.len(), 3);
        assert_eq!(races[0].id, "race-0");
        assert_eq!(races[0].venue_code, "13");
        assert_eq!(races[0].race_name, "尼崎SG");
        assert_eq!(races[0].start_date, NaiveDate::from_ymd_opt(2026, 10, 27).unwrap());
        assert_eq!(races[0].end_date, NaiveDate::from_ymd_opt(2026, 11, 1).unwrap());
        assert_eq!(races[0].days, MEET_DAYS);
        assert_eq!(races[1].race_name, "若松一般");
        assert_eq!(races[2].venue_code, "11");
    }

    #[test]
    fn test_scheduled_races_drop_impossible_dates() {
        let entries = vec![ScheduleEntry {
            date: "2/29".to_string(),
            venue_name: "津".to_string(),
            grade: Grade::G3,
        }];
        assert!(scheduled_races(&entries, 2026).is_empty());
        assert_eq!(scheduled_races(&entries, 2028)[0].venue_code, "09");
    }

    #[test]
    fn test_grade_wire_value() {
        assert_eq!(serde_json::to_value(Grade::General).unwrap(), "一般");
        assert_eq!(serde_json::to_value(Grade::G1).unwrap(), "G1");
        let parsed: Grade = serde_json::from_str("\"一般\"").unwrap();
        assert_eq!(parsed, Grade::General);
        assert_eq!("一般".parse::<Grade>(), Ok(Grade::General));
        assert_eq!("G4".parse::<Grade>(), Err(ParseGradeError("G4".to_string())));
    }
}
