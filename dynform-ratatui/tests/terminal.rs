//! Drawing tests for the terminal host

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dynform::{FormConfig, MemoryStore, RecordingSink};
use dynform_ratatui::{Page, RatatuiForm, RatatuiFormError};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::TestBackend};

fn screen(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|line| line.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn host(failure_probability: f64) -> RatatuiForm {
    RatatuiForm::new().with_title("Registration").with_config(
        FormConfig::new()
            .with_readiness_delay(Duration::from_millis(500))
            .with_failure_probability(failure_probability),
    )
}

fn ready_page(host: &RatatuiForm) -> Page<MemoryStore, RecordingSink> {
    let start = Instant::now();
    let fields = example_forms::registration().unwrap();
    let mut page = host.page(fields, MemoryStore::new(), RecordingSink::new(), start);
    page.tick(start + Duration::from_secs(1), &mut StdRng::seed_from_u64(3))
        .unwrap();
    page
}

fn press(page: &mut Page<MemoryStore, RecordingSink>, code: KeyCode) {
    page.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
        .unwrap();
}

#[test]
fn test_loading_then_ready() {
    let host = host(0.0);
    let start = Instant::now();
    let fields = example_forms::registration().unwrap();
    let mut page = host.page(fields, MemoryStore::new(), RecordingSink::new(), start);
    let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
    let mut rng = StdRng::seed_from_u64(3);

    terminal.draw(|frame| host.draw(frame, &mut page)).unwrap();
    let loading = screen(&terminal);
    assert!(loading.contains("Registration"));
    assert!(loading.contains("Loading..."));
    assert!(!loading.contains("Submit"));

    page.tick(start + Duration::from_secs(1), &mut rng).unwrap();
    terminal.draw(|frame| host.draw(frame, &mut page)).unwrap();
    let ready = screen(&terminal);
    assert!(ready.contains("Full name:"));
    assert!(ready.contains("Address"));
    assert!(ready.contains("Basic"));
    assert!(ready.contains("Pro"));
    assert!(ready.contains("Submit"));
    assert!(ready.contains("Reset"));
}

#[test]
fn test_inline_error_is_drawn() {
    let host = host(0.0);
    let mut page = ready_page(&host);
    let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();

    press(&mut page, KeyCode::Tab);
    press(&mut page, KeyCode::Tab);
    press(&mut page, KeyCode::Char('1'));
    press(&mut page, KeyCode::Char('5'));

    terminal.draw(|frame| host.draw(frame, &mut page)).unwrap();
    assert!(screen(&terminal).contains("Age should be at least 18."));

    press(&mut page, KeyCode::Backspace);
    press(&mut page, KeyCode::Backspace);
    press(&mut page, KeyCode::Char('3'));
    press(&mut page, KeyCode::Char('0'));

    terminal.draw(|frame| host.draw(frame, &mut page)).unwrap();
    assert!(!screen(&terminal).contains("should be at"));
}

#[test]
fn test_rejected_submit_reports_fields() {
    let host = host(0.0);
    let mut page = ready_page(&host);
    let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();

    press(&mut page, KeyCode::F(10));

    terminal.draw(|frame| host.draw(frame, &mut page)).unwrap();
    let screen = screen(&terminal);
    assert!(screen.contains("Full name is required."));
    assert!(screen.contains("field(s) need attention"));
}

#[test]
fn test_failure_message_is_drawn() {
    let host = host(1.0);
    let start = Instant::now();
    let fields = example_forms::registration().unwrap();
    let mut page = host.page(fields, MemoryStore::new(), RecordingSink::new(), start);
    page.tick(start + Duration::from_secs(1), &mut StdRng::seed_from_u64(3))
        .unwrap();
    let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();

    terminal.draw(|frame| host.draw(frame, &mut page)).unwrap();
    assert!(screen(&terminal).contains("Failed to load form data."));

    let result = page.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
    assert!(matches!(result, Err(RatatuiFormError::Unavailable(_))));
}

#[test]
fn test_unrenderable_field_is_fatal() {
    let host = host(0.0);
    let start = Instant::now();
    let fields = example_forms::radio().unwrap();
    let mut page = host.page(fields, MemoryStore::new(), RecordingSink::new(), start);

    let result = page.tick(start + Duration::from_secs(1), &mut StdRng::seed_from_u64(3));
    assert!(matches!(result, Err(RatatuiFormError::Form(_))));
}
