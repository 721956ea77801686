use chrono::NaiveDate;

/// Date format used in ledger file names and in the Date column.
pub const LEDGER_DATE_FORMAT: &str = "%m-%d-%y";

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Source of "today". Evaluated every time a record is created or looked up,
/// so a long-running server rolls over to a new ledger at midnight.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        today()
    }
}

/// Always returns the same date (tests, replays).
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// `MM-DD-YY`
pub fn ledger_stamp(date: NaiveDate) -> String {
    date.format(LEDGER_DATE_FORMAT).to_string()
}

/// Accepts `YYYY-MM-DD` or the ledger's own `MM-DD-YY`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    // `%Y` would happily read "03" as year 3, so pick the format by shape.
    let fmt = match s.len() {
        10 => "%Y-%m-%d",
        8 => LEDGER_DATE_FORMAT,
        _ => return None,
    };
    NaiveDate::parse_from_str(s, fmt).ok()
}
