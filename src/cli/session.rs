use super::ui;
use crate::core::rates::parse_provider_timestamp;
use crate::core::session::{Frame, SyncController};
use crate::core::{Amount, ConversionState, CurrencyCode, Event, Notice, RateProvider, Side};
use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Utc};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

const HELP: &str = "\
Commands:
  left <amount>    set the left amount and convert to the right
  right <amount>   set the right amount and convert to the left
  from <CODE>      set the left currency
  to <CODE>        set the right currency
  swap             exchange the left and right sides
  help             show this help
  quit             leave the session
Separate commands with ';' to apply them in a single update,
e.g. `from EUR; left 20`.";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// Events applied together as one update cycle.
    Apply(Vec<Event>),
    Help,
    Quit,
}

fn parse_amount(text: &str) -> Result<Amount> {
    let value: f64 = text
        .replace(',', "")
        .parse()
        .with_context(|| format!("Invalid amount: {text}"))?;
    Ok(Amount::new(value)?)
}

fn parse_event(part: &str) -> Result<Event> {
    let mut words = part.split_whitespace();
    let keyword = words.next().unwrap_or_default().to_lowercase();
    let argument = words.next();
    if words.next().is_some() {
        bail!("Too many arguments in: {part}");
    }

    let require = |name: &str| argument.ok_or_else(|| anyhow!("'{name}' needs an argument"));
    let event = match keyword.as_str() {
        "left" => Event::EditLeftAmount(parse_amount(require("left")?)?),
        "right" => Event::EditRightAmount(parse_amount(require("right")?)?),
        "from" => Event::EditLeftCurrency(require("from")?.parse::<CurrencyCode>()?),
        "to" => Event::EditRightCurrency(require("to")?.parse::<CurrencyCode>()?),
        "swap" if argument.is_none() => Event::Swap,
        "swap" => bail!("'swap' takes no argument"),
        other => bail!("Unknown command: {other}. Type 'help' for the list of commands"),
    };
    Ok(event)
}

/// Parses one input line. An empty line applies nothing.
pub fn parse_command(line: &str) -> Result<SessionCommand> {
    let trimmed = line.trim();
    match trimmed.to_lowercase().as_str() {
        "help" | "?" => return Ok(SessionCommand::Help),
        "quit" | "exit" | "q" => return Ok(SessionCommand::Quit),
        _ => {}
    }

    let events = trimmed
        .split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_event)
        .collect::<Result<Vec<_>>>()?;
    Ok(SessionCommand::Apply(events))
}

fn side_text(side: &Side) -> String {
    format!(
        "{} {} ({})",
        ui::format_amount(side.amount.value()),
        side.currency.display_name(),
        side.currency
    )
}

/// Renders the result, the rates caption, the provider footer and notices.
pub fn render(
    state: &ConversionState,
    last_updated: Option<&str>,
    notices: &[Notice],
    now: DateTime<Utc>,
) -> String {
    let mut output = format!(
        "{} converts to:\n{}\n",
        side_text(&state.left),
        ui::style_text(&side_text(&state.right), ui::StyleType::Result)
    );
    if let Some(stamp) = last_updated {
        let caption = ui::staleness_caption(stamp, parse_provider_timestamp(stamp), now);
        output.push_str(&ui::style_text(&caption, ui::StyleType::Subtle));
        output.push('\n');
    }
    output.push_str(&ui::style_text(ui::PROVIDER_FOOTER, ui::StyleType::Subtle));
    for notice in notices {
        output.push('\n');
        output.push_str(&ui::notice_line(notice));
    }
    output
}

/// Runs the interactive loop until `quit` or end of input and returns the
/// final state.
pub async fn run_session<P, R, W>(
    controller: &SyncController<P>,
    initial: ConversionState,
    input: R,
    out: &mut W,
) -> Result<ConversionState>
where
    P: RateProvider,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let first = controller.initialize(&initial).await;
    let mut state = first.state;
    let mut last_updated = first.last_updated;

    writeln!(
        out,
        "{}\n",
        ui::style_text("Two-way currency converter", ui::StyleType::Title)
    )?;
    writeln!(
        out,
        "{}",
        render(&state, last_updated.as_deref(), &first.notices, Utc::now())
    )?;
    writeln!(
        out,
        "{}",
        ui::style_text("Type 'help' for commands.", ui::StyleType::Subtle)
    )?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };

        match parse_command(&line) {
            Ok(SessionCommand::Quit) => break,
            Ok(SessionCommand::Help) => writeln!(out, "{HELP}")?,
            Ok(SessionCommand::Apply(events)) if events.is_empty() => continue,
            Ok(SessionCommand::Apply(events)) => {
                debug!(?events, "Applying session input");
                let frame = Frame::from_events(&state, events);
                let update = controller.step(&state, frame).await;
                state = update.state;
                if update
                    .notices
                    .iter()
                    .any(|notice| matches!(notice, Notice::FetchFailed(_)))
                {
                    last_updated = None;
                } else if update.last_updated.is_some() {
                    last_updated = update.last_updated;
                }
                writeln!(
                    out,
                    "{}",
                    render(&state, last_updated.as_deref(), &update.notices, Utc::now())
                )?;
            }
            Err(e) => writeln!(
                out,
                "{}",
                ui::style_text(&format!("Error: {e}"), ui::StyleType::Error)
            )?,
        }
    }

    Ok(state)
}
