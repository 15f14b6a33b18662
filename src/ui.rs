// UI layer: interactive menu and rendering for the terminal front-end.
// All display output goes through `Screen`, which owns an explicit write
// handle instead of printing through globals, so tests can render into a
// buffer.

use crate::api::{ApiClient, ApiError, Recommendation};
use anyhow::Result;
use crossterm::style::Stylize;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;

/// Shown when the user submits a blank title. No request is made.
pub const MSG_EMPTY_INPUT: &str = "Please type a movie name first.";
/// Spinner label while the request is in flight.
pub const MSG_LOADING: &str = "Loading recommendations…";
/// Shown on a successful response that carries no recommendations.
pub const MSG_NO_RESULTS: &str = "No recommendations found for this movie.";
/// Fallback for a rejection whose body carried no usable error text.
pub const MSG_NOT_FOUND: &str = "Movie not found. Try another title.";
/// Fallback for network failures and undecodable success bodies.
pub const MSG_REQUEST_FAILED: &str = "Error fetching recommendations. Please try again.";

/// Severity of a status message, mirrored in the terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// Drop control characters from server-supplied text before it reaches the
/// terminal. Whitespace controls become plain spaces; everything else
/// (including ESC) is removed so a hostile field cannot inject escape
/// sequences.
pub fn sanitize(field: &str) -> String {
    field
        .chars()
        .filter_map(|c| match c {
            '\n' | '\t' | '\r' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// Render target for messages and recommendation cards. The write handle
/// is supplied by the caller: stdout in the binary, a `Vec<u8>` in tests.
pub struct Screen<W: Write> {
    out: W,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W) -> Self {
        Screen { out }
    }

    /// Print one status line, colored by severity (error red, info cyan).
    pub fn message(&mut self, severity: Severity, text: &str) -> Result<()> {
        let clean = sanitize(text);
        let styled = match severity {
            Severity::Error => clean.red(),
            Severity::Info => clean.cyan(),
        };
        writeln!(self.out, "{}", styled)?;
        Ok(())
    }

    /// Print one numbered card per recommendation, in the order received.
    pub fn cards(&mut self, recs: &[Recommendation]) -> Result<()> {
        for (idx, rec) in recs.iter().enumerate() {
            writeln!(self.out)?;
            writeln!(self.out, "{}. {}", idx + 1, sanitize(&rec.title).bold())?;
            writeln!(
                self.out,
                "   ⭐ IMDb: {}   📅 {}",
                sanitize(&rec.rating_text()),
                sanitize(&rec.year_text())
            )?;
            writeln!(self.out, "   {}", sanitize(&rec.plot))?;
            writeln!(self.out, "   {}", sanitize(&rec.poster).dim())?;
        }
        Ok(())
    }
}

/// The single submission path: trim and validate the raw title, issue the
/// request with a spinner, and render whichever branch the response lands
/// in. Menu selection and the Enter key both funnel through here.
pub fn submit_query<W: Write>(api: &ApiClient, screen: &mut Screen<W>, raw: &str) -> Result<()> {
    let movie = raw.trim();
    if movie.is_empty() {
        screen.message(Severity::Error, MSG_EMPTY_INPUT)?;
        return Ok(());
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message(MSG_LOADING);
    spinner.enable_steady_tick(Duration::from_millis(80));

    // Blocking call: the prompt is unavailable until this returns, so at
    // most one request is ever in flight.
    let outcome = api.recommend(movie);
    spinner.finish_and_clear();

    match outcome {
        Ok(recs) if recs.is_empty() => screen.message(Severity::Info, MSG_NO_RESULTS),
        Ok(recs) => screen.cards(&recs),
        Err(ApiError::Rejected { message, .. }) => {
            screen.message(Severity::Error, message.as_deref().unwrap_or(MSG_NOT_FOUND))
        }
        Err(err) => {
            // Surfaced to the user as a fixed message; the underlying error
            // goes to the log for diagnostics.
            log::error!("recommendation request failed: {}", err);
            screen.message(Severity::Error, MSG_REQUEST_FAILED)
        }
    }
}

/// Main interactive menu. Receives an `ApiClient` instance and runs a
/// simple select loop until the user chooses "Exit".
pub fn main_menu(api: ApiClient) -> Result<()> {
    let mut screen = Screen::new(io::stdout());
    loop {
        let items = vec!["Find similar movies", "Exit"];
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => {
                // Empty input is allowed through so the validation branch
                // in `submit_query` handles it like any other submission.
                let raw: String = Input::new()
                    .with_prompt("Movie title")
                    .allow_empty(true)
                    .interact_text()?;
                submit_query(&api, &mut screen, &raw)?;
            }
            1 => break,
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(title: &str) -> Recommendation {
        serde_json::from_value(json!({
            "title": title,
            "poster": format!("http://posters.example/{}.jpg", title.to_lowercase()),
            "rating": "7.5",
            "year": "1999",
            "plot": format!("Plot of {}.", title),
        }))
        .unwrap()
    }

    #[test]
    fn sanitize_strips_escape_sequences() {
        assert_eq!(sanitize("\x1b[31mred\x1b[0m"), "[31mred[0m");
    }

    #[test]
    fn sanitize_maps_whitespace_controls_to_spaces() {
        assert_eq!(sanitize("line one\nline\ttwo"), "line one line two");
    }

    #[test]
    fn message_renders_text() {
        let mut buf = Vec::new();
        let mut screen = Screen::new(&mut buf);
        screen.message(Severity::Error, MSG_EMPTY_INPUT).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains(MSG_EMPTY_INPUT));
    }

    #[test]
    fn cards_render_in_server_order() {
        let recs = vec![rec("Memento"), rec("Inception"), rec("Heat")];
        let mut buf = Vec::new();
        let mut screen = Screen::new(&mut buf);
        screen.cards(&recs).unwrap();
        let out = String::from_utf8(buf).unwrap();

        assert!(out.contains("1. "));
        assert!(out.contains("2. "));
        assert!(out.contains("3. "));
        assert!(!out.contains("4. "));

        let memento = out.find("Memento").unwrap();
        let inception = out.find("Inception").unwrap();
        let heat = out.find("Heat").unwrap();
        assert!(memento < inception && inception < heat);
    }

    #[test]
    fn cards_sanitize_server_fields() {
        let mut hostile = rec("Tricky");
        hostile.plot = "see\x1b[2Jnothing".into();
        let mut buf = Vec::new();
        let mut screen = Screen::new(&mut buf);
        screen.cards(&[hostile]).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("see[2Jnothing"));
    }

    #[test]
    fn blank_input_shows_error_without_issuing_request() {
        // Nothing listens on this address; if a request were issued the
        // transport fallback would be rendered instead.
        let api = ApiClient::new("http://127.0.0.1:1").unwrap();
        for raw in ["", "   ", " \t "] {
            let mut buf = Vec::new();
            let mut screen = Screen::new(&mut buf);
            submit_query(&api, &mut screen, raw).unwrap();
            let out = String::from_utf8(buf).unwrap();
            assert!(out.contains(MSG_EMPTY_INPUT));
            assert!(!out.contains(MSG_REQUEST_FAILED));
        }
    }

    #[test]
    fn network_failure_shows_transport_fallback() {
        let api = ApiClient::new("http://127.0.0.1:1").unwrap();
        let mut buf = Vec::new();
        let mut screen = Screen::new(&mut buf);
        submit_query(&api, &mut screen, "Inception").unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains(MSG_REQUEST_FAILED));
        assert!(!out.contains("1. "));
    }
}
