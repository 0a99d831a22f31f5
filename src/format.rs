//! Display stamping of capture timestamps
//!
//! Records keep the date and time as already formatted strings, plus the raw
//! instant. The default descriptions reproduce Finnish locale output
//! (`1.1.2024`, `12.00.00`).

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use time::{format_description, OffsetDateTime, UtcOffset};

pub const DEFAULT_DATE_FORMAT: &str = "[day padding:none].[month padding:none].[year]";
pub const DEFAULT_TIME_FORMAT: &str = "[hour padding:none].[minute].[second]";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayFormat {
    /// `time` format description for the date part
    pub date: String,
    /// `time` format description for the time part
    pub time: String,
    /// Minutes east of UTC. `None` uses the system offset, falling back to UTC.
    pub utc_offset: Option<i32>,
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self {
            date: DEFAULT_DATE_FORMAT.to_string(),
            time: DEFAULT_TIME_FORMAT.to_string(),
            utc_offset: None,
        }
    }
}

impl DisplayFormat {
    /// Offset used to render timestamps
    pub fn offset(&self) -> Result<UtcOffset> {
        match self.utc_offset {
            Some(minutes) => {
                let seconds = minutes
                    .checked_mul(60)
                    .ok_or_else(|| Error::Format(format!("utc_offset {} out of range", minutes)))?;
                UtcOffset::from_whole_seconds(seconds)
                    .map_err(|e| Error::Format(format!("utc_offset {}: {}", minutes, e)))
            }
            None => Ok(UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)),
        }
    }

    /// Format a capture timestamp into (date, time) display strings
    pub fn stamp(&self, timestamp: OffsetDateTime) -> Result<(String, String)> {
        let local = timestamp.to_offset(self.offset()?);
        Ok((render(&self.date, local)?, render(&self.time, local)?))
    }
}

fn render(description: &str, at: OffsetDateTime) -> Result<String> {
    let items = format_description::parse(description)
        .map_err(|e| Error::Format(format!("{}: {}", description, e)))?;
    at.format(&items).map_err(|e| Error::Format(e.to_string()))
}
