//! Registration form in the terminal, with values kept in memory only.

use dynform::{LogSink, MemoryStore};
use dynform_ratatui::{RatatuiForm, RatatuiFormError, Theme};
use ratatui::style::Color;

fn main() -> anyhow::Result<()> {
    let theme = Theme {
        primary: Color::Magenta,
        secondary: Color::LightMagenta,
        error: Color::LightRed,
        ..Theme::default()
    };

    let host = RatatuiForm::new()
        .with_title("Registration")
        .with_theme(theme);

    match host.run(example_forms::registration()?, MemoryStore::new(), LogSink) {
        Ok(submission) => println!("{}", serde_json::to_string_pretty(&submission)?),
        Err(RatatuiFormError::Cancelled) => println!("Cancelled"),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}
