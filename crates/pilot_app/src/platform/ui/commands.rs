//! Line commands typed at the prompt.

use pilot_core::{AgentKind, RecordId, ReviewInput, View};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show(View),
    /// Click on a day cell of the shown month.
    Day(u32),
    /// Click on the `index`-th (1-based) event of a day.
    Event { day: u32, index: usize },
    /// Click on a timeline card.
    Open(RecordId),
    /// Agents button on a card.
    Agents(RecordId),
    Run(AgentKind),
    /// Review button on a card.
    Review(RecordId),
    Save(ReviewInput),
    CloseReview,
    Add(String),
    MonthShift(i32),
    MonthSet { year: i32, month: u32 },
    Scroll(isize),
    Refresh,
    Dismiss,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command `{0}`; type `help`")]
    Unknown(String),
    #[error("`{command}` needs {what}")]
    Missing {
        command: &'static str,
        what: &'static str,
    },
    #[error("`{0}` is not a number")]
    NotANumber(String),
    #[error("unknown analysis `{0}`; pick one of progress, prep, review, decision")]
    UnknownAgent(String),
    #[error("`{0}` is not a month; use next, prev, +N, -N or YYYY-MM")]
    BadMonth(String),
}

pub const HELP: &[&str] = &[
    "calendar | timeline | agents      switch view",
    "day <d>                           select a day of the shown month",
    "event <d> <n>                     open the n-th interview of day d",
    "month next|prev|+N|-N|YYYY-MM     move the calendar",
    "open <id>                         focus a timeline card",
    "agents <id>                       open the workbench for a record",
    "run progress|prep|review|decision run an analysis on the selection",
    "review <id>                       open the review drawer",
    "save <summary> [--score N] [--improve text]",
    "close                             close the review drawer",
    "add <text>                        parse and store a new interview",
    "up [n] | down [n]                 scroll the timeline",
    "refresh | ok | help | quit",
];

pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let command = match head.to_ascii_lowercase().as_str() {
        "calendar" | "cal" => Command::Show(View::Calendar),
        "timeline" | "tl" => Command::Show(View::Timeline),
        "agents" => match rest.first() {
            Some(id) => Command::Agents(RecordId::from(*id)),
            None => Command::Show(View::Agents),
        },
        "day" => Command::Day(number(&rest, 0, "day", "a day number")?),
        "event" => Command::Event {
            day: number(&rest, 0, "event", "a day and an index")?,
            index: number(&rest, 1, "event", "a day and an index")?,
        },
        "month" => parse_month(&rest)?,
        "open" => Command::Open(record_id(&rest, "open")?),
        "review" => Command::Review(record_id(&rest, "review")?),
        "run" => {
            let segment = rest.first().ok_or(CommandError::Missing {
                command: "run",
                what: "an analysis name",
            })?;
            let kind = AgentKind::from_segment(segment)
                .ok_or_else(|| CommandError::UnknownAgent(segment.to_string()))?;
            Command::Run(kind)
        }
        "save" => Command::Save(parse_review(&rest)?),
        "close" => Command::CloseReview,
        "add" => {
            let text = line.trim_start()[head.len()..].trim();
            if text.is_empty() {
                return Err(CommandError::Missing {
                    command: "add",
                    what: "the interview text",
                });
            }
            Command::Add(text.to_string())
        }
        "up" => {
            let lines = scroll_amount(&rest)?;
            let back = lines
                .checked_neg()
                .ok_or_else(|| CommandError::NotANumber(lines.to_string()))?;
            Command::Scroll(back)
        }
        "down" => Command::Scroll(scroll_amount(&rest)?),
        "refresh" => Command::Refresh,
        "ok" => Command::Dismiss,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn number<T: std::str::FromStr>(
    rest: &[&str],
    position: usize,
    command: &'static str,
    what: &'static str,
) -> Result<T, CommandError> {
    let word = rest
        .get(position)
        .ok_or(CommandError::Missing { command, what })?;
    word.parse()
        .map_err(|_| CommandError::NotANumber(word.to_string()))
}

fn record_id(rest: &[&str], command: &'static str) -> Result<RecordId, CommandError> {
    rest.first()
        .map(|id| RecordId::from(*id))
        .ok_or(CommandError::Missing {
            command,
            what: "a record id",
        })
}

fn scroll_amount(rest: &[&str]) -> Result<isize, CommandError> {
    match rest.first() {
        None => Ok(5),
        Some(word) => word
            .parse()
            .map_err(|_| CommandError::NotANumber(word.to_string())),
    }
}

fn parse_month(rest: &[&str]) -> Result<Command, CommandError> {
    let word = rest.first().ok_or(CommandError::Missing {
        command: "month",
        what: "a direction or YYYY-MM",
    })?;
    let bad = || CommandError::BadMonth(word.to_string());
    match *word {
        "next" => Ok(Command::MonthShift(1)),
        "prev" => Ok(Command::MonthShift(-1)),
        _ if word.starts_with('+') || word.starts_with('-') => {
            word.parse().map(Command::MonthShift).map_err(|_| bad())
        }
        _ => {
            let (year, month) = word.split_once('-').ok_or_else(bad)?;
            let year: i32 = year.parse().map_err(|_| bad())?;
            let month: u32 = month.parse().map_err(|_| bad())?;
            if !(1..=12).contains(&month) {
                return Err(bad());
            }
            Ok(Command::MonthSet { year, month })
        }
    }
}

fn parse_review(rest: &[&str]) -> Result<ReviewInput, CommandError> {
    let mut summary = Vec::new();
    let mut score = None;
    let mut improvement = None;
    let mut words = rest.iter();
    while let Some(word) = words.next() {
        match *word {
            "--score" => {
                let value = words.next().ok_or(CommandError::Missing {
                    command: "save --score",
                    what: "a number",
                })?;
                score = Some(
                    value
                        .parse::<u8>()
                        .map_err(|_| CommandError::NotANumber(value.to_string()))?,
                );
            }
            "--improve" => {
                let text: Vec<&str> = words.by_ref().copied().collect();
                improvement = Some(text.join(" "));
            }
            other => summary.push(other),
        }
    }
    if summary.is_empty() {
        return Err(CommandError::Missing {
            command: "save",
            what: "a summary",
        });
    }
    Ok(ReviewInput {
        summary: summary.join(" "),
        score,
        improvement,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(line: &str) -> Command {
        parse_command(line).unwrap().unwrap()
    }

    #[test]
    fn blank_line_is_not_a_command() {
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn agents_without_id_switches_view() {
        assert_eq!(parse("agents"), Command::Show(View::Agents));
        assert_eq!(parse("agents 17"), Command::Agents(RecordId::from(17u64)));
    }

    #[test]
    fn event_takes_day_and_index() {
        assert_eq!(parse("event 5 2"), Command::Event { day: 5, index: 2 });
        assert!(matches!(
            parse_command("event 5"),
            Err(CommandError::Missing { command: "event", .. })
        ));
        assert_eq!(
            parse_command("day five"),
            Err(CommandError::NotANumber("five".to_string()))
        );
    }

    #[test]
    fn run_accepts_any_case() {
        assert_eq!(parse("run Decision"), Command::Run(AgentKind::Decision));
        assert_eq!(
            parse_command("run salary"),
            Err(CommandError::UnknownAgent("salary".to_string()))
        );
    }

    #[test]
    fn month_forms() {
        assert_eq!(parse("month next"), Command::MonthShift(1));
        assert_eq!(parse("month -3"), Command::MonthShift(-3));
        assert_eq!(parse("month 2024-03"), Command::MonthSet { year: 2024, month: 3 });
        assert!(matches!(
            parse_command("month 2024-13"),
            Err(CommandError::BadMonth(_))
        ));
    }

    #[test]
    fn add_keeps_the_text_verbatim() {
        assert_eq!(
            parse("add  Acme 一面 2024年3月5日 14:00"),
            Command::Add("Acme 一面 2024年3月5日 14:00".to_string())
        );
        assert!(parse_command("add   ").is_err());
    }

    #[test]
    fn save_splits_flags_from_summary() {
        assert_eq!(
            parse("save went well overall --score 4 --improve practice system design"),
            Command::Save(ReviewInput {
                summary: "went well overall".to_string(),
                score: Some(4),
                improvement: Some("practice system design".to_string()),
            })
        );
        assert!(parse_command("save --score 3").is_err());
    }

    #[test]
    fn scroll_defaults_to_five_lines() {
        assert_eq!(parse("down"), Command::Scroll(5));
        assert_eq!(parse("up 2"), Command::Scroll(-2));
        assert_eq!(parse("up -3"), Command::Scroll(3));
    }

    #[test]
    fn scroll_amount_that_cannot_be_negated_is_rejected() {
        let lowest = isize::MIN.to_string();
        assert_eq!(
            parse_command(&format!("up {lowest}")),
            Err(CommandError::NotANumber(lowest))
        );
        assert_eq!(parse(&format!("down {}", isize::MIN)), Command::Scroll(isize::MIN));
    }
}
