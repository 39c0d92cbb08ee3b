use dynform::{Border, Control, FieldContainer, FieldValues, Form, FormContainer, Phase};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::Theme;
use crate::page::{Page, Status, Target};

/// A line of the scrollable form area.
enum Row<'a> {
    Legend(&'a str),
    Field(&'a FieldContainer),
}

/// Rows in display order; groups become a legend followed by their fields.
fn rows(view: &FormContainer) -> Vec<Row<'_>> {
    let mut rows = Vec::new();
    for field in view.fields() {
        match &field.control {
            Control::Group { legend, fields } => {
                rows.push(Row::Legend(legend.as_str()));
                rows.extend(fields.iter().map(Row::Field));
            }
            _ => rows.push(Row::Field(field)),
        }
    }
    rows
}

fn row_height(row: &Row<'_>) -> u16 {
    match row {
        Row::Legend(_) => 1,
        Row::Field(field) => {
            let body = match &field.control {
                Control::Choice { options, .. } => 2 + options.len().max(1) as u16,
                _ => 3,
            };
            body + u16::from(field.has_error())
        }
    }
}

/// Keep the focused field inside a viewport of `viewport` rows.
fn adjust_scroll<S, K>(page: &mut Page<S, K>, viewport: u16) {
    let Some(form) = page.phase.form() else {
        return;
    };
    let Some(id) = page.targets.get(page.focus).and_then(Target::field_id) else {
        return;
    };

    let mut y = 0;
    let mut found = None;
    for row in rows(form.view()) {
        let height = row_height(&row);
        if let Row::Field(field) = row
            && field.id == id
        {
            found = Some((y, height));
            break;
        }
        y += height;
    }

    let Some((top, height)) = found else {
        return;
    };
    if top < page.scroll {
        page.scroll = top;
    } else if top + height > page.scroll + viewport {
        page.scroll = (top + height).saturating_sub(viewport);
    }
}

pub(crate) fn draw_page<S, K>(frame: &mut Frame, page: &mut Page<S, K>, title: &str, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(3),    // Form content
            Constraint::Length(3), // Buttons
            Constraint::Length(1), // Status
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    adjust_scroll(page, chunks[1].height);
    let page = &*page;

    let title = Paragraph::new(title)
        .style(
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(title, chunks[0]);

    let help_text = match &page.phase {
        Phase::Ready(form) => {
            draw_form(frame, page, form.as_ref(), chunks[1], theme);
            draw_buttons(frame, page, form.view(), chunks[2], theme);
            "Tab: Next  ↑/↓: Options  Space: Toggle  Enter: Press  F10: Submit  Esc: Quit"
        }
        Phase::Loading => {
            draw_phase_message(frame, page.phase.status_message(), chunks[1], theme.highlight);
            "Esc: Quit"
        }
        Phase::Error { message } => {
            draw_phase_message(frame, Some(message.as_str()), chunks[1], theme.error);
            "Enter/Esc: Quit"
        }
    };

    if let Some(status) = &page.status {
        let (text, color) = match status {
            Status::Info(text) => (text, theme.success),
            Status::Warning(text) => (text, theme.error),
        };
        let status = Paragraph::new(text.as_str()).style(Style::default().fg(color));
        frame.render_widget(status, chunks[3]);
    }

    let help = Paragraph::new(help_text).style(Style::default().fg(theme.border));
    frame.render_widget(help, chunks[4]);
}

fn draw_phase_message(frame: &mut Frame, message: Option<&str>, area: Rect, color: Color) {
    let message = Paragraph::new(message.unwrap_or_default())
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    let area = Rect {
        y: area.y + area.height / 2,
        height: area.height - area.height / 2,
        ..area
    };
    frame.render_widget(message, area);
}

fn draw_form<S, K>(frame: &mut Frame, page: &Page<S, K>, form: &Form<S, K>, area: Rect, theme: &Theme) {
    let focused_id = page.focused().and_then(Target::field_id);
    let content_width = area.width.saturating_sub(2);

    let mut virtual_y: u16 = 0;
    for row in rows(form.view()) {
        let height = row_height(&row);
        let top = virtual_y;
        virtual_y += height;

        // Skip rows scrolled above the viewport
        if top < page.scroll {
            continue;
        }
        let visible_top = top - page.scroll;
        if visible_top >= area.height {
            break;
        }

        let row_area = Rect {
            x: area.x + 1,
            y: area.y + visible_top,
            width: content_width,
            height: height.min(area.height - visible_top),
        };

        match row {
            Row::Legend(legend) => {
                let legend = Paragraph::new(format!("▸ {legend}")).style(
                    Style::default()
                        .fg(theme.secondary)
                        .add_modifier(Modifier::BOLD),
                );
                frame.render_widget(legend, row_area);
            }
            Row::Field(field) => {
                let is_focused = focused_id == Some(field.id.as_str());
                draw_field(frame, field, form.values(), row_area, is_focused, page.cursor, theme);
            }
        }
    }
}

fn draw_field(
    frame: &mut Frame,
    field: &FieldContainer,
    values: &FieldValues,
    area: Rect,
    is_focused: bool,
    cursor: usize,
    theme: &Theme,
) {
    let border_color = if field.border() == Border::Error {
        theme.error
    } else if is_focused {
        theme.primary
    } else {
        theme.border
    };

    let error_rows = u16::from(field.has_error());
    let box_area = Rect {
        height: area.height.saturating_sub(error_rows),
        ..area
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", field.label.text))
        .title_style(Style::default().fg(if is_focused {
            theme.highlight
        } else {
            theme.text
        }));

    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    match &field.control {
        Control::TextEntry { placeholder, .. } => {
            let value = values.text(&field.id);
            let text = if value.is_empty() {
                Paragraph::new(placeholder.as_str()).style(
                    Style::default()
                        .fg(theme.border)
                        .add_modifier(Modifier::ITALIC),
                )
            } else {
                Paragraph::new(value).style(Style::default().fg(theme.text))
            };
            frame.render_widget(text, inner);

            if is_focused {
                let cursor_x = inner.x.saturating_add(cursor as u16);
                if cursor_x < inner.x + inner.width {
                    frame.set_cursor_position((cursor_x, inner.y));
                }
            }
        }
        Control::Choice { options, .. } => {
            let current = values.text(&field.id);
            let items: Vec<ListItem> = options
                .iter()
                .map(|option| {
                    let selected = option == current;
                    let marker = if selected { "(●)" } else { "( )" };
                    let style = if selected && is_focused {
                        Style::default()
                            .fg(theme.text)
                            .bg(theme.selected_bg)
                            .add_modifier(Modifier::BOLD)
                    } else if selected {
                        Style::default().fg(theme.highlight)
                    } else {
                        Style::default().fg(theme.text)
                    };
                    ListItem::new(format!("{marker} {option}")).style(style)
                })
                .collect();
            frame.render_widget(List::new(items), inner);
        }
        Control::Toggle { .. } => {
            let checked = values.flag(&field.id);
            let checkbox = if checked { "[✓]" } else { "[ ]" };
            let text = Paragraph::new(format!("{checkbox} Yes"))
                .style(Style::default().fg(if checked { theme.success } else { theme.text }));
            frame.render_widget(text, inner);
        }
        // Groups are flattened into rows before drawing.
        Control::Group { .. } => {}
    }

    if let Some(error) = field.error_message()
        && area.height > box_area.height
    {
        let error_area = Rect {
            x: area.x + 1,
            y: box_area.y + box_area.height,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        let error_text =
            Paragraph::new(format!("⚠ {error}")).style(Style::default().fg(theme.error));
        frame.render_widget(error_text, error_area);
    }
}

fn draw_buttons<S, K>(frame: &mut Frame, page: &Page<S, K>, view: &FormContainer, area: Rect, theme: &Theme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(area);

    for (button, column) in view.buttons().iter().zip(columns.iter()) {
        let focused = page.focused() == Some(&Target::Button(button.kind));
        let style = if focused {
            Style::default()
                .fg(theme.text)
                .bg(theme.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD)
        };
        let text = if focused {
            format!("[ {} ]", button.text)
        } else {
            button.text.clone()
        };
        let widget = Paragraph::new(text)
            .style(style)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(if focused {
                        theme.primary
                    } else {
                        theme.border
                    })),
            );
        frame.render_widget(widget, *column);
    }
}
