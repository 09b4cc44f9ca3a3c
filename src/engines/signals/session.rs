use crate::types::Session;
use chrono::{DateTime, TimeZone, Timelike};

pub struct SessionResolver;

impl SessionResolver {
    /// [0, 8) Asia, [8, 16) London, everything later New York.
    pub fn resolve(hour: u32) -> Session {
        match hour {
            0..=7 => Session::Asia,
            8..=15 => Session::London,
            _ => Session::NewYork,
        }
    }

    pub fn at<Tz: TimeZone>(time: &DateTime<Tz>) -> Session {
        Self::resolve(time.hour())
    }
}
