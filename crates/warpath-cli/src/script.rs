//! Free-text event script parsing.
//!
//! The core only accepts typed [`Event`] values; this adapter turns script
//! lines into them. One event per line:
//!
//! ```text
//! # tick  verb   args...
//! 0       mine   Duskwatch 30 1 10
//! 0       clan   Outpost Duskwatch:5
//! 3       block  Duskwatch 10
//! 11      attack Outpost 20 7
//! 40      status
//! 40      gold
//! 50      end
//! ```
//!
//! Blank lines and `#` comments are skipped. A malformed line or an
//! unrecognized verb yields an error the caller is expected to log and skip
//! -- bad script lines never stop a run.

use warpath_core::event::{Event, RoadSpec, Ticks};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a script line could not be turned into an event.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unrecognized verb '{0}'")]
    UnknownVerb(String),
    #[error("missing {0}")]
    Missing(&'static str),
    #[error("bad number for {what}: '{found}'")]
    BadNumber { what: &'static str, found: String },
    #[error("bad road '{0}', expected name:travel_time")]
    BadRoad(String),
}

// ---------------------------------------------------------------------------
// Line parsing
// ---------------------------------------------------------------------------

/// Parse one script line. Returns `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<(Ticks, Event)>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut fields = line.split_whitespace();
    let tick = number(fields.next(), "tick")?;
    let verb = fields.next().ok_or(ParseError::Missing("verb"))?;

    let event = match verb {
        "attack" => Event::Attack {
            target: word(fields.next(), "target clan")?,
            demand: number(fields.next(), "demand")?,
            value: number(fields.next(), "value")?,
        },
        "clan" => Event::NewClan {
            name: word(fields.next(), "clan name")?,
            roads: fields.map(road).collect::<Result<Vec<_>, _>>()?,
        },
        "mine" => Event::NewMine {
            name: word(fields.next(), "mine name")?,
            capacity: number(fields.next(), "capacity")?,
            unit_time: number(fields.next(), "unit_time")?,
            refill_delay: number(fields.next(), "refill_delay")?,
        },
        "block" => Event::Block {
            name: word(fields.next(), "clan name")?,
            duration: number(fields.next(), "duration")?,
        },
        "unblock" => Event::Unblock {
            name: word(fields.next(), "clan name")?,
        },
        "status" => Event::StatusQuery,
        "gold" => Event::GoldQuery,
        "end" => Event::Terminate,
        other => return Err(ParseError::UnknownVerb(other.to_string())),
    };

    Ok(Some((tick, event)))
}

/// Parse a whole script, logging and skipping lines that fail.
pub fn parse_script(text: &str) -> Vec<(Ticks, Event)> {
    let mut events = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(entry)) => events.push(entry),
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(line = lineno + 1, %err, "skipping script line");
            }
        }
    }
    events
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

fn word(field: Option<&str>, what: &'static str) -> Result<String, ParseError> {
    field
        .map(str::to_string)
        .ok_or(ParseError::Missing(what))
}

fn number<T: std::str::FromStr>(
    field: Option<&str>,
    what: &'static str,
) -> Result<T, ParseError> {
    let raw = field.ok_or(ParseError::Missing(what))?;
    raw.parse().map_err(|_| ParseError::BadNumber {
        what,
        found: raw.to_string(),
    })
}

fn road(field: &str) -> Result<RoadSpec, ParseError> {
    let (to, travel) = field
        .split_once(':')
        .ok_or_else(|| ParseError::BadRoad(field.to_string()))?;
    let travel_time = travel
        .parse()
        .map_err(|_| ParseError::BadRoad(field.to_string()))?;
    Ok(RoadSpec {
        to: to.to_string(),
        travel_time,
    })
}

// ===========================================================================
// Tests
// ===========================================================================
