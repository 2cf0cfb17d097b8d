//! 2026 SG race calendar
//!
//! One race per tournament type. Prize money is the winner's prize in units
//! of 10,000 yen.

use crate::types::TournamentType;
use chrono::NaiveDate;
use serde::Serialize;

/// One scheduled SG race
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SgRace {
    pub id: &'static str,
    #[serde(rename = "type")]
    pub tournament: TournamentType,
    pub name: &'static str,
    pub full_name: &'static str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub venue: &'static str,
    pub venue_code: &'static str,
    pub prize_money: u32,
    pub qualification_criteria: &'static str,
}

impl SgRace {
    /// Inclusive day count
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

/// Invalid dates fail const evaluation
const fn ymd(month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(2026, month, day) {
        Some(d) => d,
        None => panic!("invalid schedule date"),
    }
}

pub static SG_SCHEDULE_2026: [SgRace; 8] = [
    SgRace {
        id: "classic-2026",
        tournament: TournamentType::Classic,
        name: "Boat Race Classic",
        full_name: "61st Boat Race Classic (Prime Minister's Cup)",
        start_date: ymd(3, 24),
        end_date: ymd(3, 29),
        venue: "Gamagori",
        venue_code: "07",
        prize_money: 4200,
        qualification_criteria: "Previous-year SG/G1/G2 winners, most general-race wins",
    },
    SgRace {
        id: "allstar-2026",
        tournament: TournamentType::AllStar,
        name: "Boat Race All Star",
        full_name: "53rd Boat Race All Star (Sasakawa Prize)",
        start_date: ymd(5, 26),
        end_date: ymd(5, 31),
        venue: "Hamanako",
        venue_code: "06",
        prize_money: 4200,
        qualification_criteria: "Top fan votes (A1 class)",
    },
    SgRace {
        id: "grandchampion-2026",
        tournament: TournamentType::GrandChampion,
        name: "Grand Champion",
        full_name: "36th Grand Champion",
        start_date: ymd(6, 23),
        end_date: ymd(6, 28),
        venue: "Naruto",
        venue_code: "14",
        prize_money: 3800,
        qualification_criteria: "SG final finishers and top qualifying points over the past year",
    },
    SgRace {
        id: "oceancup-2026",
        tournament: TournamentType::OceanCup,
        name: "Ocean Cup",
        full_name: "31st Ocean Cup",
        start_date: ymd(7, 28),
        end_date: ymd(8, 2),
        venue: "Biwako",
        venue_code: "11",
        prize_money: 3700,
        qualification_criteria: "Top G2+ final placement points",
    },
    SgRace {
        id: "memorial-2026",
        tournament: TournamentType::Memorial,
        name: "Boat Race Memorial",
        full_name: "72nd Boat Race Memorial",
        start_date: ymd(8, 25),
        end_date: ymd(8, 30),
        venue: "Kiryu",
        venue_code: "01",
        prize_money: 4200,
        qualification_criteria: "Racers recommended by all 24 venues",
    },
    SgRace {
        id: "derby-2026",
        tournament: TournamentType::Derby,
        name: "Boat Race Derby",
        full_name: "73rd Boat Race Derby (All Japan Championship)",
        start_date: ymd(10, 27),
        end_date: ymd(11, 1),
        venue: "Amagasaki",
        venue_code: "13",
        prize_money: 4200,
        qualification_criteria: "Top win rate over the selection period",
    },
    SgRace {
        id: "challenge-2026",
        tournament: TournamentType::ChallengeCup,
        name: "Challenge Cup",
        full_name: "32nd Challenge Cup",
        start_date: ymd(11, 24),
        end_date: ymd(11, 29),
        venue: "Tokoname",
        venue_code: "08",
        prize_money: 3700,
        qualification_criteria: "Top prize money ranking",
    },
    SgRace {
        id: "grandprix-2026",
        tournament: TournamentType::GrandPrix,
        name: "Grand Prix",
        full_name: "41st Grand Prix",
        start_date: ymd(12, 21),
        end_date: ymd(12, 26),
        venue: "Omura",
        venue_code: "24",
        prize_money: 11000,
        qualification_criteria: "Prize money ranking 1-18",
    },
];

/// Scheduled race for a tournament type
pub fn race_for(tournament: TournamentType) -> Option<&'static SgRace> {
    SG_SCHEDULE_2026.iter().find(|r| r.tournament == tournament)
}

/// Races that have not finished on `today`
pub fn upcoming(today: NaiveDate) -> impl Iterator<Item = &'static SgRace> {
    SG_SCHEDULE_2026.iter().filter(move |r| r.end_date >= today)
}
