//! Kanban board interface.
//!
//! Shows one project's tasks in the four status columns. Cards can be picked
//! up and dropped on another column with the keyboard (space, arrows, space)
//! or by dragging with the mouse. Adding and editing go through the task
//! editor popup.

use std::io;
use std::time::Duration;

use chrono::{Local, Utc};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::debug;

use crate::board::{Board, BoardEffect, BoardIntent, DropTarget, MoveIntent};
use crate::dates::format_due_relative;
use crate::editor::{EditorOutcome, TaskEditor};
use crate::fields::Status;
use crate::session::Session;
use crate::storage::SlotStore;
use crate::task::Task;
use crate::tui::colors::{column_color, label_color, priority_color, BLUE};
use crate::tui::task_form::{centered_rect, handle_form_key, render_form, FormAction};
use crate::user::{self, User};

const CARD_HEIGHT: u16 = 5;

/// Main board application state
pub struct BoardApp<S: SlotStore> {
    session: Session<S>,
    board: Board,
    users: &'static [User],
    selected_column: usize,
    selected_card: usize,
    column_scroll_offsets: [usize; 4],
    /// Column highlighted as the drop target while a card is picked up.
    drop_column: Option<usize>,
    /// Set once the pointer moves during a mouse drag.
    pointer_moved: bool,
    editor: Option<TaskEditor>,
    show_task_detail: bool,
    status_message: String,

    // Hit-test geometry from the last draw.
    column_areas: [Rect; 4],
    card_areas: Vec<(Rect, usize, String)>,
}

impl<S: SlotStore + 'static> BoardApp<S> {
    pub fn new(session: Session<S>) -> Self {
        BoardApp {
            session,
            board: Board::new(),
            users: user::directory(),
            selected_column: 0,
            selected_card: 0,
            column_scroll_offsets: [0; 4],
            drop_column: None,
            pointer_moved: false,
            editor: None,
            show_task_detail: false,
            status_message: String::new(),
            column_areas: [Rect::default(); 4],
            card_areas: Vec::new(),
        }
    }

    fn column_len(&self, column: usize) -> usize {
        self.session.columns.borrow().columns()[column].tasks.len()
    }

    /// The task under the keyboard cursor.
    fn selected_task(&self) -> Option<Task> {
        let view = self.session.columns.borrow();
        view.columns()[self.selected_column].tasks.get(self.selected_card).cloned()
    }

    /// Ensure the selected card index is valid
    fn clamp_selection(&mut self) {
        let len = self.column_len(self.selected_column);
        if len == 0 {
            self.selected_card = 0;
            self.column_scroll_offsets[self.selected_column] = 0;
        } else if self.selected_card >= len {
            self.selected_card = len - 1;
        }
    }

    /// Put the cursor on `task_id` wherever it now lives.
    fn select_task(&mut self, task_id: &str) {
        let found = {
            let view = self.session.columns.borrow();
            view.columns().iter().enumerate().find_map(|(c, col)| {
                col.tasks.iter().position(|t| t.id == task_id).map(|i| (c, i))
            })
        };
        match found {
            Some((column, card)) => {
                self.selected_column = column;
                self.selected_card = card;
            }
            None => self.clamp_selection(),
        }
    }

    fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    fn dispatch(&mut self, intent: BoardIntent) {
        match self.board.dispatch(intent, &mut self.session.store) {
            Ok(BoardEffect::OpenEditor(editor)) => self.editor = Some(editor),
            Ok(BoardEffect::Changed) => {}
            Ok(BoardEffect::Unchanged) => self.set_status_message("Task no longer exists"),
            Err(e) => self.set_status_message(format!("Error saving: {e}")),
        }
        self.clamp_selection();
    }

    fn finish_move(&mut self, intent: MoveIntent) {
        let task_id = intent.task_id.clone();
        let destination = intent.destination;
        self.dispatch(BoardIntent::Move(intent));
        self.select_task(&task_id);
        if self.status_message.is_empty() {
            self.set_status_message(format!("Moved task to {}", destination.title()));
        }
    }

    /// Drop the held card on the highlighted column, if any.
    fn drop_held(&mut self) {
        let target = self.drop_column.take().map(|c| DropTarget::column(Status::ALL[c]));
        match self.board.drop(target) {
            Some(intent) => self.finish_move(intent),
            None => self.set_status_message("Drop cancelled"),
        }
    }

    fn pick_up_selected(&mut self) {
        if let Some(task) = self.selected_task() {
            self.board.begin_drag(task.status, &task.id);
            self.drop_column = Some(self.selected_column);
            self.set_status_message(format!("Moving '{}': ←/→ choose column, space to drop", task.title));
        }
    }

    /// Move the selected card one column over without a separate drop.
    fn shift_selected(&mut self, right: bool) {
        let target = if right {
            self.selected_column + 1
        } else {
            match self.selected_column.checked_sub(1) {
                Some(c) => c,
                None => return,
            }
        };
        if target >= Status::ALL.len() {
            return;
        }
        if let Some(task) = self.selected_task() {
            self.board.begin_drag(task.status, &task.id);
            if let Some(intent) = self.board.drop(Some(DropTarget::column(Status::ALL[target]))) {
                self.finish_move(intent);
            }
        }
    }

    fn submit_editor(&mut self) {
        let Some(editor) = self.editor.as_ref() else {
            return;
        };
        let outcome = match editor.submit(self.session.project_id(), Utc::now()) {
            Ok(outcome) => outcome,
            Err(e) => {
                // Keep the draft open so the user can fix it.
                self.set_status_message(e.to_string());
                return;
            }
        };
        let task_id = match &outcome {
            EditorOutcome::Create(task) => task.id.clone(),
            EditorOutcome::Update { id, .. } => id.clone(),
        };
        match self.session.store.commit(outcome) {
            Ok(saved) => {
                self.editor = None;
                self.select_task(&task_id);
                self.set_status_message(if saved { "Task saved" } else { "Task no longer exists" });
            }
            Err(e) => self.set_status_message(format!("Error saving: {e}")),
        }
    }

    /// Handle a key press. Returns true when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if let Some(editor) = self.editor.as_mut() {
            match handle_form_key(editor, key, self.users) {
                FormAction::Submit => self.submit_editor(),
                FormAction::Cancel => {
                    self.editor = None;
                    self.set_status_message("Changes discarded");
                }
                FormAction::None => {}
            }
            return false;
        }

        if self.show_task_detail {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.show_task_detail = false;
            }
            return false;
        }

        self.status_message.clear();

        if self.board.is_dragging() {
            let last = Status::ALL.len() - 1;
            match key.code {
                KeyCode::Left | KeyCode::Char('h') => {
                    let c = self.drop_column.unwrap_or(self.selected_column);
                    self.drop_column = Some(c.saturating_sub(1));
                }
                KeyCode::Right | KeyCode::Char('l') => {
                    let c = self.drop_column.unwrap_or(self.selected_column);
                    self.drop_column = Some((c + 1).min(last));
                }
                KeyCode::Char(' ') | KeyCode::Enter => self.drop_held(),
                KeyCode::Esc => {
                    self.board.cancel();
                    self.drop_column = None;
                    self.set_status_message("Move cancelled");
                }
                _ => {}
            }
            return false;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Left if key.modifiers.contains(KeyModifiers::SHIFT) => self.shift_selected(false),
            KeyCode::Right if key.modifiers.contains(KeyModifiers::SHIFT) => self.shift_selected(true),
            KeyCode::Left | KeyCode::Char('h') => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                    self.selected_card = 0;
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.selected_column < Status::ALL.len() - 1 {
                    self.selected_column += 1;
                    self.selected_card = 0;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_card = self.selected_card.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_card + 1 < self.column_len(self.selected_column) {
                    self.selected_card += 1;
                }
            }
            KeyCode::Char(' ') => self.pick_up_selected(),
            KeyCode::Enter => {
                if self.selected_task().is_some() {
                    self.show_task_detail = true;
                }
            }
            KeyCode::Char('a') => {
                let column = Status::ALL[self.selected_column];
                self.dispatch(BoardIntent::Add { column });
            }
            KeyCode::Char('e') => {
                if let Some(task) = self.selected_task() {
                    self.dispatch(BoardIntent::Edit { task_id: task.id });
                }
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(task) = self.selected_task() {
                    self.dispatch(BoardIntent::Delete { task_id: task.id });
                    if self.status_message.is_empty() {
                        self.set_status_message(format!("Deleted '{}'", task.title));
                    }
                }
            }
            _ => {}
        }
        false
    }

    /// Column under a screen position.
    fn column_at(&self, x: u16, y: u16) -> Option<usize> {
        self.column_areas.iter().position(|r| r.contains(Position { x, y }))
    }

    /// Card under a screen position, as (column, id).
    fn card_at(&self, x: u16, y: u16) -> Option<(usize, &str)> {
        self.card_areas
            .iter()
            .find(|(r, _, _)| r.contains(Position { x, y }))
            .map(|(_, column, id)| (*column, id.as_str()))
    }

    /// Handle a mouse event: press picks a card up, release drops it.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.editor.is_some() || self.show_task_detail {
            return;
        }
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.status_message.clear();
                self.board.cancel();
                self.pointer_moved = false;
                if let Some((column, id)) = self.card_at(x, y) {
                    let id = id.to_string();
                    self.select_task(&id);
                    self.board.begin_drag(Status::ALL[column], &id);
                    self.drop_column = Some(column);
                } else if let Some(column) = self.column_at(x, y) {
                    self.selected_column = column;
                    self.clamp_selection();
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.board.is_dragging() {
                    self.pointer_moved = true;
                    self.drop_column = self.column_at(x, y);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if !self.board.is_dragging() {
                    return;
                }
                if !self.pointer_moved {
                    // A plain click only selects.
                    self.board.cancel();
                    self.drop_column = None;
                    return;
                }
                self.drop_column = self.column_at(x, y);
                self.drop_held();
            }
            _ => {}
        }
    }

    /// Render the board
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_board(f, chunks[1]);
        self.render_status_bar(f, chunks[2]);

        if self.show_task_detail {
            self.render_task_detail_popup(f);
        }
        if let Some(editor) = &self.editor {
            render_form(f, editor, self.users, column_color(editor.status()));
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let Some(project) = self.session.project() else {
            return;
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(project.title.clone(), Style::default().add_modifier(Modifier::BOLD)))
            .title_alignment(Alignment::Center);
        let gauge = Gauge::default()
            .block(block)
            .gauge_style(Style::default().fg(BLUE))
            .percent(u16::from(project.progress.min(100)))
            .label(format!(
                "{}% complete | {} | {} tasks",
                project.progress,
                project.status.label(),
                self.session.columns.borrow().total()
            ));
        f.render_widget(gauge, area);
    }

    fn render_board(&mut self, f: &mut Frame, area: Rect) {
        let columns_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(area);

        self.card_areas.clear();
        for (i, &column_area) in columns_layout.iter().enumerate() {
            self.column_areas[i] = column_area;
            self.render_column(f, column_area, i);
        }
    }

    fn render_column(&mut self, f: &mut Frame, area: Rect, column_index: usize) {
        let view = self.session.columns.clone();
        let view = view.borrow();
        let column = &view.columns()[column_index];

        let is_selected = column_index == self.selected_column;
        let is_drop_target = self.board.is_dragging() && self.drop_column == Some(column_index);
        let accent = column_color(column.status);
        let border_style = if is_drop_target {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else if is_selected {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("{} ({})", column.title, column.tasks.len()))
            .border_style(border_style);
        let inner = block.inner(area);
        f.render_widget(block, area);

        if column.tasks.is_empty() {
            f.render_widget(
                Paragraph::new("No tasks")
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center),
                inner,
            );
            return;
        }

        let visible_cards = (inner.height / CARD_HEIGHT).max(1) as usize;
        let mut offset = self.column_scroll_offsets[column_index];
        if is_selected {
            if self.selected_card < offset {
                offset = self.selected_card;
            } else if self.selected_card >= offset + visible_cards {
                offset = self.selected_card + 1 - visible_cards;
            }
        }
        offset = offset.min(column.tasks.len().saturating_sub(1));
        self.column_scroll_offsets[column_index] = offset;

        let today = Local::now().date_naive();
        let dragged = self.board.dragged_task();
        let mut y = inner.y;
        let mut rendered = 0;
        for (card_index, task) in column.tasks.iter().enumerate().skip(offset) {
            if y + CARD_HEIGHT > inner.y + inner.height {
                break;
            }
            let card_area = Rect { x: inner.x, y, width: inner.width, height: CARD_HEIGHT };
            let highlight = is_selected && card_index == self.selected_card;
            let lifted = dragged == Some(task.id.as_str());
            render_card(f, card_area, task, self.users, highlight, lifted, accent, today);
            self.card_areas.push((card_area, column_index, task.id.clone()));
            y += CARD_HEIGHT;
            rendered += 1;
        }

        if offset > 0 {
            let indicator = Paragraph::new(format!("▲ +{offset} above"))
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(indicator, Rect { height: 1, ..inner });
        }
        let remaining = column.tasks.len() - offset - rendered;
        if remaining > 0 {
            let indicator = Paragraph::new(format!("▼ +{remaining} below"))
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(
                indicator,
                Rect { y: inner.y + inner.height - 1, height: 1, ..inner },
            );
        }
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else if self.board.is_dragging() {
            "←/→: choose column | space: drop | esc: cancel".to_string()
        } else {
            "a: Add | e: Edit | x: Delete | space: Move | shift-←/→: Shift | enter: Details | q: Quit"
                .to_string()
        };
        let bar = Paragraph::new(text)
            .style(Style::default().bg(column_color(Status::ALL[self.selected_column])).fg(Color::Black))
            .alignment(Alignment::Left);
        f.render_widget(bar, area);
    }

    fn render_task_detail_popup(&self, f: &mut Frame) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let area = centered_rect(70, 18, f.area());
        f.render_widget(Clear, area);

        let today = Local::now().date_naive();
        let due = match task.due_date {
            Some(d) => format!("{d} ({})", format_due_relative(Some(d), today)),
            None => "-".to_string(),
        };
        let labels = if task.labels.is_empty() { "-".to_string() } else { task.labels.join(", ") };
        let lines = vec![
            Line::from(Span::styled(task.title.clone(), Style::default().add_modifier(Modifier::BOLD))),
            Line::from(""),
            Line::from(format!("Status:    {}", task.status.title())),
            Line::from(vec![
                Span::raw("Priority:  "),
                Span::styled(task.priority.label(), Style::default().fg(priority_color(task.priority))),
            ]),
            Line::from(format!(
                "Assignee:  {}",
                user::display_name(self.users, task.assignee.as_deref())
            )),
            Line::from(format!("Due:       {due}")),
            Line::from(format!("Labels:    {labels}")),
            Line::from(format!("Created:   {}", task.created_at.format("%Y-%m-%d %H:%M"))),
            Line::from(format!("Id:        {}", task.id)),
            Line::from(""),
            Line::from("Description:"),
            Line::from(task.description.clone().unwrap_or_else(|| "-".to_string())),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Task Details (Enter to close)")
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(column_color(task.status)).add_modifier(Modifier::BOLD));
        let popup = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
        f.render_widget(popup, area);
    }

    /// Main event loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if !event::poll(Duration::from_millis(50))? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if self.handle_key(key) {
                        debug!("board closed");
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                _ => {}
            }
        }
    }
}

/// Draw one task card: title, label chips, then priority, due date and assignee.
#[allow(clippy::too_many_arguments)]
fn render_card(
    f: &mut Frame,
    area: Rect,
    task: &Task,
    users: &[User],
    highlight: bool,
    lifted: bool,
    accent: Color,
    today: chrono::NaiveDate,
) {
    let border = if lifted {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else if highlight {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let title_style = if highlight {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut chips: Vec<Span> = Vec::new();
    for label in &task.labels {
        chips.push(Span::styled(label.clone(), Style::default().fg(label_color(label))));
        chips.push(Span::raw(" "));
    }

    let assignee = match task.assignee.as_deref().and_then(|id| user::find(users, id)) {
        Some(u) => u.initials(),
        None => task.assignee.clone().unwrap_or_default(),
    };
    let mut meta = vec![
        Span::styled("● ", Style::default().fg(priority_color(task.priority))),
        Span::raw(task.priority.label()),
    ];
    if task.due_date.is_some() {
        meta.push(Span::raw(format!("  {}", format_due_relative(task.due_date, today))));
    }
    if !assignee.is_empty() {
        meta.push(Span::styled(format!("  {assignee}"), Style::default().fg(Color::Cyan)));
    }

    let lines = vec![
        Line::from(Span::styled(task.title.clone(), title_style)),
        Line::from(chips),
        Line::from(meta),
    ];
    let card = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).border_style(border));
    f.render_widget(card, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::task::tests::sample;
    use ratatui::backend::TestBackend;

    fn app_with(tasks: &[Task]) -> BoardApp<MemoryStore> {
        let mut session = Session::open(MemoryStore::new(), MemoryStore::new(), "1").unwrap();
        for t in tasks {
            session.store.add(t.clone()).unwrap();
        }
        BoardApp::new(session)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, x: u16, y: u16) -> MouseEvent {
        MouseEvent { kind, column: x, row: y, modifiers: KeyModifiers::NONE }
    }

    fn draw(app: &mut BoardApp<MemoryStore>) {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
    }

    #[test]
    fn test_keyboard_drag_moves_card() {
        let mut app = app_with(&[sample("a", Status::Todo, "1")]);
        app.handle_key(press(KeyCode::Char(' ')));
        assert!(app.board.is_dragging());
        app.handle_key(press(KeyCode::Right));
        app.handle_key(press(KeyCode::Right));
        app.handle_key(press(KeyCode::Char(' ')));

        assert!(!app.board.is_dragging());
        assert_eq!(app.session.store.get("a").unwrap().status, Status::Review);
        assert_eq!(app.selected_column, Status::Review.index());
    }

    #[test]
    fn test_escape_cancels_drag() {
        let mut app = app_with(&[sample("a", Status::Todo, "1")]);
        app.handle_key(press(KeyCode::Char(' ')));
        app.handle_key(press(KeyCode::Right));
        app.handle_key(press(KeyCode::Esc));
        assert!(!app.board.is_dragging());
        assert_eq!(app.session.store.get("a").unwrap().status, Status::Todo);
    }

    #[test]
    fn test_mouse_drag_and_drop() {
        let mut app = app_with(&[sample("a", Status::Todo, "1")]);
        draw(&mut app);
        let (card, _, _) = app.card_areas[0].clone();
        let done = app.column_areas[Status::Done.index()];

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), card.x + 1, card.y + 1));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), done.x + 2, done.y + 2));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), done.x + 2, done.y + 2));
        assert_eq!(app.session.store.get("a").unwrap().status, Status::Done);
        assert_eq!(app.session.project().unwrap().progress, 100);
    }

    #[test]
    fn test_drop_outside_board_is_ignored() {
        let mut app = app_with(&[sample("a", Status::Todo, "1")]);
        draw(&mut app);
        let (card, _, _) = app.card_areas[0].clone();
        let writes = app.session.store.storage().writes();

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), card.x + 1, card.y + 1));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 0, 0));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 0, 0));
        assert_eq!(app.session.store.get("a").unwrap().status, Status::Todo);
        assert_eq!(app.session.store.storage().writes(), writes);
    }

    #[test]
    fn test_click_only_selects() {
        let mut app = app_with(&[sample("a", Status::Todo, "1"), sample("b", Status::Done, "1")]);
        draw(&mut app);
        let (card, column, _) = app.card_areas[1].clone();
        let writes = app.session.store.storage().writes();

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), card.x + 1, card.y + 1));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), card.x + 1, card.y + 1));
        assert_eq!(app.selected_column, column);
        assert!(!app.board.is_dragging());
        assert_eq!(app.session.store.storage().writes(), writes);
    }

    #[test]
    fn test_add_through_editor() {
        let mut app = app_with(&[]);
        app.handle_key(press(KeyCode::Right));
        app.handle_key(press(KeyCode::Char('a')));
        assert!(app.editor.is_some());

        // Blank title keeps the editor open.
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert!(app.editor.is_some());
        assert!(app.session.store.is_empty());

        for c in "Write docs".chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert!(app.editor.is_none());
        let task = &app.session.store.tasks()[0];
        assert_eq!(task.title, "Write docs");
        assert_eq!(task.status, Status::InProgress);
    }

    #[test]
    fn test_delete_is_immediate() {
        let mut app = app_with(&[sample("a", Status::Todo, "1"), sample("b", Status::Todo, "1")]);
        app.handle_key(press(KeyCode::Char('x')));
        assert_eq!(app.session.store.len(), 1);
        assert!(app.session.store.get("a").is_none());
        assert!(app.status_message.starts_with("Deleted"));

        app.handle_key(press(KeyCode::Delete));
        assert!(app.session.store.is_empty());
    }

    #[test]
    fn test_mouse_drop_replaces_stale_message() {
        let mut app = app_with(&[sample("a", Status::Todo, "1")]);
        app.set_status_message("Changes discarded");
        draw(&mut app);
        let (card, _, _) = app.card_areas[0].clone();
        let review = app.column_areas[Status::Review.index()];

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), card.x + 1, card.y + 1));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), review.x + 2, review.y + 2));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), review.x + 2, review.y + 2));
        assert_eq!(app.status_message, "Moved task to In Review");
    }

    #[test]
    fn test_failed_save_reports_error() {
        let mut app = app_with(&[sample("a", Status::Todo, "1")]);
        app.session.store.storage_mut().set_fail_writes(true);
        app.handle_key(KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT));
        assert_eq!(app.session.store.get("a").unwrap().status, Status::Todo);
        assert!(app.status_message.starts_with("Error saving"));
    }
}
