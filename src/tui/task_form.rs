//! Task editor popup for the terminal user interface.
//!
//! Renders a `TaskEditor` as a modal form and maps key presses onto it.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::editor::{EditorField, TaskEditor};
use crate::input::InputField;
use crate::tui::colors::{label_color, priority_color};
use crate::user::{self, User};

/// What the owner should do after a key press in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
    Cancel,
}

/// Apply a key press to the editor.
pub fn handle_form_key(editor: &mut TaskEditor, key: KeyEvent, users: &[User]) -> FormAction {
    match key.code {
        KeyCode::Esc => return FormAction::Cancel,
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return FormAction::Submit
        }
        KeyCode::Tab | KeyCode::Down => editor.next_field(),
        KeyCode::BackTab | KeyCode::Up => editor.prev_field(),
        KeyCode::Left => editor.handle_left_right(false, users),
        KeyCode::Right => editor.handle_left_right(true, users),
        KeyCode::Enter => {
            if editor.current_field == EditorField::Labels {
                editor.confirm_label();
            } else {
                editor.next_field();
            }
        }
        KeyCode::Backspace => {
            // With nothing typed, backspace in the label field pops the last label.
            if editor.current_field == EditorField::Labels && editor.label_input.value.is_empty() {
                let last = editor.labels.len().checked_sub(1);
                if let Some(idx) = last {
                    editor.remove_label(idx);
                }
            } else {
                editor.handle_backspace();
            }
        }
        KeyCode::Delete => {
            if let Some(field) = editor.active_input() {
                field.handle_delete();
            }
        }
        KeyCode::Home => {
            if let Some(field) = editor.active_input() {
                field.move_home();
            }
        }
        KeyCode::End => {
            if let Some(field) = editor.active_input() {
                field.move_end();
            }
        }
        KeyCode::Char(c) => editor.handle_char(c),
        _ => {}
    }
    FormAction::None
}

/// Center a `percent_x` by `height` rectangle in `area`.
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Render the editor as a modal popup.
pub fn render_form(f: &mut Frame, editor: &TaskEditor, users: &[User], accent: Color) {
    let area = centered_rect(60, 20, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{} - {}", editor.heading(), editor.status().title()))
        .title_alignment(Alignment::Center)
        .title_bottom(Line::from(" Tab: next field | ←/→: change | Ctrl-S: save | Esc: discard ").centered())
        .border_style(Style::default().fg(accent).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Description
            Constraint::Length(3), // Priority + Assignee
            Constraint::Length(3), // Due date
            Constraint::Length(4), // Labels
            Constraint::Min(0),
        ])
        .split(inner);

    render_input(f, rows[0], EditorField::Title, &editor.title, editor, accent);
    render_input(f, rows[1], EditorField::Description, &editor.description, editor, accent);

    let selectors = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[2]);
    let priority = Line::from(vec![
        Span::raw("◀ "),
        Span::styled("● ", Style::default().fg(priority_color(editor.priority))),
        Span::raw(editor.priority.label()),
        Span::raw(" ▶"),
    ]);
    render_selector(f, selectors[0], EditorField::Priority, priority, editor, accent);
    let assignee = Line::from(format!(
        "◀ {} ▶",
        user::display_name(users, editor.assignee.as_deref())
    ));
    render_selector(f, selectors[1], EditorField::Assignee, assignee, editor, accent);

    render_input(f, rows[3], EditorField::DueDate, &editor.due_date, editor, accent);

    // Label entry plus the labels collected so far.
    let label_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(rows[4]);
    render_input(f, label_rows[0], EditorField::Labels, &editor.label_input, editor, accent);
    let mut chips: Vec<Span> = Vec::new();
    for label in &editor.labels {
        chips.push(Span::styled(
            format!(" {label} "),
            Style::default().bg(label_color(label)).fg(Color::White),
        ));
        chips.push(Span::raw(" "));
    }
    if chips.is_empty() {
        chips.push(Span::styled("no labels", Style::default().fg(Color::DarkGray)));
    }
    f.render_widget(Paragraph::new(Line::from(chips)), label_rows[1]);
}

fn field_block(field: EditorField, editor: &TaskEditor, accent: Color) -> Block<'static> {
    let style = if editor.current_field == field {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Block::default().borders(Borders::ALL).title(field.label()).border_style(style)
}

fn render_input(
    f: &mut Frame,
    area: Rect,
    field: EditorField,
    input: &InputField,
    editor: &TaskEditor,
    accent: Color,
) {
    let block = field_block(field, editor, accent);
    let inner = block.inner(area);
    f.render_widget(Paragraph::new(input.value.as_str()).block(block), area);
    if input.active {
        let x = inner.x + (input.cursor as u16).min(inner.width.saturating_sub(1));
        f.set_cursor_position((x, inner.y));
    }
}

fn render_selector(
    f: &mut Frame,
    area: Rect,
    field: EditorField,
    value: Line<'static>,
    editor: &TaskEditor,
    accent: Color,
) {
    let block = field_block(field, editor, accent);
    f.render_widget(Paragraph::new(value).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Priority, Status};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_labels_and_submit() {
        let users = user::directory();
        let mut editor = TaskEditor::create(Status::Todo);
        for c in "Fix".chars() {
            handle_form_key(&mut editor, press(KeyCode::Char(c)), users);
        }
        for _ in 0..5 {
            handle_form_key(&mut editor, press(KeyCode::Tab), users);
        }
        assert_eq!(editor.current_field, EditorField::Labels);
        for c in " bug ".chars() {
            handle_form_key(&mut editor, press(KeyCode::Char(c)), users);
        }
        handle_form_key(&mut editor, press(KeyCode::Enter), users);
        assert_eq!(editor.labels, vec!["bug"]);
        handle_form_key(&mut editor, press(KeyCode::Backspace), users);
        assert!(editor.labels.is_empty());

        let save = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(handle_form_key(&mut editor, save, users), FormAction::Submit);
        assert_eq!(editor.title.value, "Fix");
        assert_eq!(handle_form_key(&mut editor, press(KeyCode::Esc), users), FormAction::Cancel);
    }

    #[test]
    fn test_selectors_cycle() {
        let users = user::directory();
        let mut editor = TaskEditor::create(Status::Todo);
        handle_form_key(&mut editor, press(KeyCode::Down), users);
        handle_form_key(&mut editor, press(KeyCode::Down), users);
        handle_form_key(&mut editor, press(KeyCode::Left), users);
        assert_eq!(editor.priority, Priority::Low);
    }

    #[test]
    fn test_centered_rect_fits() {
        let area = Rect::new(0, 0, 100, 10);
        let r = centered_rect(60, 20, area);
        assert_eq!(r, Rect::new(20, 0, 60, 10));
    }
}
