//! Three-column kanban board interface.
//!
//! Tasks are laid out in To Do / In Progress / Done columns computed from
//! [`BoardState::query`] with the active filter. Cards move one stage at a time
//! with Shift+Arrow (or `<` / `>`), mirroring the Start / Back / Done buttons of
//! a web board.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::board::{BoardState, SubscriptionId, TaskFilter};
use crate::error::Result;
use crate::fields::Status;
use crate::store::KeyValueStore;
use crate::task::Task;
use crate::tui::{
    add_form::AddForm,
    colors::{column_accent, tag_style, OVERDUE_RED},
    enums::{FormField, Mode},
    input::InputField,
};
use crate::util::{format_due_relative, parse_optional_due, truncate};

const CARD_HEIGHT: usize = 4;

/// Interactive board state wrapped around a `BoardState`.
pub struct BoardApp<S: KeyValueStore> {
    board: BoardState<S>,
    store_label: String,
    filter: TaskFilter,
    columns: [Vec<String>; 3],
    selected_column: usize,
    selected_card: usize,
    column_scroll_offsets: [usize; 3],
    mode: Mode,
    form: AddForm,
    filter_input: InputField,
    status_message: String,
    stale: Rc<Cell<bool>>,
    subscription: SubscriptionId,
}

impl<S: KeyValueStore> BoardApp<S> {
    /// Wrap `board`; `store_label` is shown in the header.
    pub fn new(mut board: BoardState<S>, store_label: impl Into<String>) -> Self {
        let stale = Rc::new(Cell::new(false));
        let flag = Rc::clone(&stale);
        let subscription = board.subscribe(move |_| flag.set(true));

        let mut app = BoardApp {
            board,
            store_label: store_label.into(),
            filter: TaskFilter::default(),
            columns: Default::default(),
            selected_column: 0,
            selected_card: 0,
            column_scroll_offsets: [0; 3],
            mode: Mode::Board,
            form: AddForm::new(),
            filter_input: InputField::new(),
            status_message: String::new(),
            stale,
            subscription,
        };
        app.refresh_columns();
        app
    }

    pub fn board(&self) -> &BoardState<S> {
        &self.board
    }

    /// Hand the board back, detaching the column observer.
    pub fn into_board(mut self) -> BoardState<S> {
        self.board.unsubscribe(self.subscription);
        self.board
    }

    pub fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Ids shown in column `status`, top to bottom.
    pub fn column(&self, status: Status) -> &[String] {
        &self.columns[status.column()]
    }

    /// (column, card) of the current selection.
    pub fn selection(&self) -> (usize, usize) {
        (self.selected_column, self.selected_card)
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    /// Recompute every column from the board and the active filter.
    fn refresh_columns(&mut self) {
        for status in Status::ALL {
            self.columns[status.column()] = self
                .board
                .query(status, &self.filter)
                .into_iter()
                .map(|t| t.id.clone())
                .collect();
        }
        self.clamp_selection();
    }

    /// Pick up board mutations signalled by the observer.
    fn sync(&mut self) {
        if self.stale.replace(false) {
            self.refresh_columns();
        }
    }

    fn clamp_selection(&mut self) {
        if self.selected_column >= self.columns.len() {
            self.selected_column = 0;
        }
        let len = self.columns[self.selected_column].len();
        if len == 0 {
            self.selected_card = 0;
            self.column_scroll_offsets[self.selected_column] = 0;
        } else if self.selected_card >= len {
            self.selected_card = len - 1;
        }
    }

    fn selected_task_id(&self) -> Option<String> {
        self.columns[self.selected_column]
            .get(self.selected_card)
            .cloned()
    }

    /// Put the selection on `id` if it is visible. Returns whether it was found.
    fn select_task(&mut self, id: &str) -> bool {
        for (col, ids) in self.columns.iter().enumerate() {
            if let Some(pos) = ids.iter().position(|t| t == id) {
                self.selected_column = col;
                self.selected_card = pos;
                return true;
            }
        }
        self.clamp_selection();
        false
    }

    /// Process one key press. Returns true when the user asked to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let quit = match self.mode {
            Mode::Board => self.handle_board_key(key),
            Mode::AddTask => {
                self.handle_form_key(key);
                false
            }
            Mode::FilterText | Mode::FilterTag => {
                self.handle_filter_key(key);
                false
            }
            Mode::ConfirmDelete => {
                self.handle_confirm_key(key);
                false
            }
            Mode::Help => {
                self.mode = Mode::Board;
                false
            }
        };
        self.sync();
        quit
    }

    fn handle_board_key(&mut self, key: KeyEvent) -> bool {
        self.status_message.clear();
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char('q') | KeyCode::Esc => return true,

            // Card movement between columns (check first, before regular navigation)
            KeyCode::Right if key.modifiers.contains(KeyModifiers::SHIFT) => self.move_selected(true),
            KeyCode::Left if key.modifiers.contains(KeyModifiers::SHIFT) => self.move_selected(false),
            KeyCode::Char('>') => self.move_selected(true),
            KeyCode::Char('<') => self.move_selected(false),

            KeyCode::Left | KeyCode::Char('h') => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.selected_column + 1 < self.columns.len() {
                    self.selected_column += 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_card = self.selected_card.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.columns[self.selected_column].len();
                if self.selected_card + 1 < len {
                    self.selected_card += 1;
                }
            }

            KeyCode::Char('a') => {
                self.form.reset();
                self.mode = Mode::AddTask;
            }
            KeyCode::Char('/') => {
                self.filter_input = InputField::with_value(&self.filter.text);
                self.mode = Mode::FilterText;
            }
            KeyCode::Char('#') => {
                self.filter_input = InputField::with_value(&self.filter.tag);
                self.mode = Mode::FilterTag;
            }
            KeyCode::Char('c') => {
                self.filter = TaskFilter::default();
                self.refresh_columns();
                self.set_status_message("Filters cleared");
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if self.selected_task_id().is_some() {
                    self.mode = Mode::ConfirmDelete;
                } else {
                    self.set_status_message("No task selected");
                }
            }
            KeyCode::Char('?') => self.mode = Mode::Help,
            _ => {}
        }
        false
    }

    /// Move the selected card one stage right (`forward`) or left.
    fn move_selected(&mut self, forward: bool) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        let Some(current) = Status::from_column(self.selected_column) else {
            return;
        };
        let target = if forward { current.next() } else { current.prev() };
        let Some(target) = target else {
            self.set_status_message(format!("Already in {}", current.title()));
            return;
        };

        match self.board.update_status(&id, target) {
            Ok(_) => self.set_status_message(format!("Moved task to {}", target.title())),
            Err(e) => self.set_status_message(format!("Error saving: {e}")),
        }
        self.sync();
        self.select_task(&id);
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.mode = Mode::Board;
            }
            KeyCode::Esc => {
                self.mode = Mode::Board;
                self.set_status_message("Add cancelled");
            }
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Backspace => self.form.active_mut().handle_backspace(),
            KeyCode::Delete => self.form.active_mut().handle_delete(),
            KeyCode::Left => self.form.active_mut().move_cursor_left(),
            KeyCode::Right => self.form.active_mut().move_cursor_right(),
            KeyCode::Char(c) => self.form.active_mut().handle_char(c),
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        let due = match parse_optional_due(&self.form.due.value) {
            Ok(due) => due,
            Err(e) => {
                self.form.current_field = FormField::Due;
                self.set_status_message(e.to_string());
                return;
            }
        };

        match self
            .board
            .add_task(&self.form.text.value, Some(self.form.tag.value.as_str()), due)
        {
            Ok(Some(id)) => {
                self.form.reset();
                self.mode = Mode::Board;
                self.sync();
                if self.select_task(&id) {
                    self.set_status_message("Task added");
                } else {
                    self.set_status_message("Task added (hidden by the current filter)");
                }
            }
            Ok(None) => {
                self.form.current_field = FormField::Text;
                self.set_status_message("Task text is empty");
            }
            Err(e) => {
                self.mode = Mode::Board;
                self.set_status_message(format!("Error saving: {e}"));
            }
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.mode = Mode::Board;
                return;
            }
            KeyCode::Esc => {
                self.filter_input.clear();
                self.apply_filter_input();
                self.mode = Mode::Board;
                self.set_status_message("Filter cleared");
                return;
            }
            KeyCode::Enter => {
                self.mode = Mode::Board;
                let shown: usize = self.columns.iter().map(Vec::len).sum();
                self.set_status_message(format!("{shown} tasks shown"));
                return;
            }
            KeyCode::Backspace => self.filter_input.handle_backspace(),
            KeyCode::Delete => self.filter_input.handle_delete(),
            KeyCode::Left => self.filter_input.move_cursor_left(),
            KeyCode::Right => self.filter_input.move_cursor_right(),
            KeyCode::Char(c) => self.filter_input.handle_char(c),
            _ => return,
        }
        self.apply_filter_input();
    }

    /// Copy the filter input into whichever criterion is being edited.
    fn apply_filter_input(&mut self) {
        let value = self.filter_input.value.clone();
        match self.mode {
            Mode::FilterText => self.filter.text = value,
            Mode::FilterTag => self.filter.tag = value,
            _ => return,
        }
        self.refresh_columns();
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        self.mode = Mode::Board;
        if !matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
            self.set_status_message("Delete cancelled");
            return;
        }
        let Some(id) = self.selected_task_id() else {
            return;
        };
        match self.board.delete_task(&id) {
            Ok(_) => self.set_status_message("Task deleted"),
            Err(e) => self.set_status_message(format!("Error saving: {e}")),
        }
    }

    /// Render the whole board plus any popup for the current mode.
    pub fn render(&mut self, f: &mut Frame) {
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

        match self.mode {
            Mode::AddTask => self.render_add_popup(f),
            Mode::ConfirmDelete => self.render_confirm_popup(f),
            Mode::Help => render_help_popup(f),
            _ => {}
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled("KANBAN BOARD", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                self.store_label.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ];
        if !self.filter.text.is_empty() {
            spans.push(Span::raw(format!("  text~\"{}\"", self.filter.text)));
        }
        if !self.filter.tag.is_empty() {
            spans.push(Span::raw(format!("  tag=\"{}\"", self.filter.tag)));
        }

        let header = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    fn render_board(&mut self, f: &mut Frame, area: Rect) {
        let columns_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area);

        let counts = self.board.counts(&self.filter.text, &self.filter.tag);
        let now = Utc::now();
        for status in Status::ALL {
            let title = format!(" {} ({}) ", status.title(), counts.get(status));
            self.render_column(f, columns_layout[status.column()], status, &title, now);
        }
    }

    fn render_column(
        &mut self,
        f: &mut Frame,
        area: Rect,
        status: Status,
        title: &str,
        now: DateTime<Utc>,
    ) {
        let column_index = status.column();
        let is_selected = column_index == self.selected_column;
        let accent = column_accent(status);

        let border_style = if is_selected {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title.to_string())
            .border_style(border_style);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let cards = &self.columns[column_index];
        if cards.is_empty() {
            return;
        }

        let available_height = inner.height as usize;
        let visible_cards = available_height / CARD_HEIGHT;

        let scroll_offset = if is_selected {
            let start_visible = self.column_scroll_offsets[column_index];
            let end_visible = start_visible + visible_cards;
            if self.selected_card < start_visible {
                self.selected_card
            } else if self.selected_card >= end_visible && visible_cards > 0 {
                self.selected_card + 1 - visible_cards
            } else {
                start_visible
            }
        } else {
            self.column_scroll_offsets[column_index].min(cards.len().saturating_sub(1))
        };
        self.column_scroll_offsets[column_index] = scroll_offset;

        let today = now.with_timezone(&Local).date_naive();
        let mut rendered = 0;
        for (card_index, id) in cards.iter().enumerate().skip(scroll_offset) {
            if (rendered + 1) * CARD_HEIGHT > available_height {
                break;
            }
            let Some(task) = self.board.get(id) else {
                continue;
            };
            let card_area = Rect {
                x: inner.x,
                y: inner.y + (rendered * CARD_HEIGHT) as u16,
                width: inner.width,
                height: CARD_HEIGHT as u16,
            };
            let selected = is_selected && card_index == self.selected_card;
            render_card(f, card_area, task, selected, now, today);
            rendered += 1;
        }

        if scroll_offset > 0 {
            let indicator = Paragraph::new(format!("▲ +{scroll_offset} above"))
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(indicator, Rect { height: 1, ..inner });
        }
        let remaining = cards.len().saturating_sub(scroll_offset + rendered);
        if remaining > 0 && inner.height > 0 {
            let indicator = Paragraph::new(format!("▼ +{remaining} below"))
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(
                indicator,
                Rect {
                    y: inner.y + inner.height - 1,
                    height: 1,
                    ..inner
                },
            );
        }
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let text = match self.mode {
            Mode::FilterText => format!(
                "Filter text: {}_ | Enter to apply, Esc to clear",
                self.filter_input.value
            ),
            Mode::FilterTag => format!(
                "Filter tag: {}_ | Enter to apply, Esc to clear",
                self.filter_input.value
            ),
            _ if !self.status_message.is_empty() => self.status_message.clone(),
            _ => {
                let shown: usize = self.columns.iter().map(Vec::len).sum();
                format!(
                    "Tasks: {shown} | a: Add | </>: Move | d: Delete | /: Text | #: Tag | c: Clear filters | ?: Help | q: Quit"
                )
            }
        };
        let accent = Status::from_column(self.selected_column)
            .map(column_accent)
            .unwrap_or(Color::Blue);
        let status = Paragraph::new(text)
            .style(Style::default().bg(accent).fg(Color::Black))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    fn render_add_popup(&self, f: &mut Frame) {
        let area = centered_rect(f.area(), 60, 7);
        f.render_widget(Clear, area);

        const LABEL_WIDTH: usize = 6;
        let mut lines = Vec::new();
        for field in [FormField::Text, FormField::Tag, FormField::Due] {
            let active = field == self.form.current_field;
            let label_style = if active {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<width$}", format!("{}:", field.label()), width = LABEL_WIDTH),
                    label_style,
                ),
                Span::raw(self.form.field(field).value.clone()),
            ]));
        }
        lines.push(Line::from(Span::styled(
            "Tab: next field | Enter: add | Esc: cancel",
            Style::default().fg(Color::DarkGray),
        )));

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Add Task ")
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        let inner = block.inner(area);
        f.render_widget(Paragraph::new(lines).block(block), area);

        let row = match self.form.current_field {
            FormField::Text => 0,
            FormField::Tag => 1,
            FormField::Due => 2,
        };
        let cursor = self.form.field(self.form.current_field).cursor;
        let x = inner.x + (LABEL_WIDTH + cursor) as u16;
        if x < inner.x + inner.width {
            f.set_cursor_position((x, inner.y + row));
        }
    }

    fn render_confirm_popup(&self, f: &mut Frame) {
        let Some(task) = self.selected_task_id().and_then(|id| self.board.get(&id)) else {
            return;
        };
        let area = centered_rect(f.area(), 50, 5);
        f.render_widget(Clear, area);
        let lines = vec![
            Line::from(format!("Delete \"{}\"?", truncate(&task.text, 40))),
            Line::from(""),
            Line::from("y: delete | any other key: cancel"),
        ];
        let popup = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Confirm ")
                    .border_style(Style::default().fg(OVERDUE_RED)),
            )
            .alignment(Alignment::Center);
        f.render_widget(popup, area);
    }

    fn handle_input(&mut self) -> Result<bool> {
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(self.handle_key(key));
                }
            }
        }
        Ok(false)
    }

    /// Main event loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;
            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

/// One card: text on the first line, tag badge and due date on the second.
fn render_card(
    f: &mut Frame,
    area: Rect,
    task: &Task,
    selected: bool,
    now: DateTime<Utc>,
    today: chrono::NaiveDate,
) {
    let overdue = task.is_overdue(now);
    let width = area.width.saturating_sub(2) as usize;

    let text_style = if overdue {
        Style::default().fg(OVERDUE_RED).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let mut meta = vec![Span::styled(format!(" {} ", task.tag), tag_style(&task.tag))];
    if let Some(due) = task.due_date {
        meta.push(Span::raw(format!(
            " Due {} ({})",
            due.format("%Y-%m-%d"),
            format_due_relative(Some(due), today)
        )));
    }

    let border_style = if overdue {
        Style::default().fg(OVERDUE_RED)
    } else if selected {
        Style::default().fg(column_accent(task.status))
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if selected { BorderType::Thick } else { BorderType::Plain })
        .border_style(border_style);
    let style = if selected {
        Style::default().bg(Color::Rgb(40, 40, 40))
    } else {
        Style::default()
    };

    let card = Paragraph::new(vec![
        Line::from(Span::styled(truncate(&task.text, width), text_style)),
        Line::from(meta),
    ])
    .block(block)
    .style(style);
    f.render_widget(card, area);
}

fn render_help_popup(f: &mut Frame) {
    let area = centered_rect(f.area(), 60, 14);
    f.render_widget(Clear, area);
    let lines: Vec<Line> = [
        "←/→ or h/l     change column",
        "↑/↓ or k/j     change card",
        "Shift+→ or >   move card to next stage",
        "Shift+← or <   move card to previous stage",
        "a              add a task",
        "d              delete the selected task",
        "/              filter by text",
        "#              filter by tag",
        "c              clear filters",
        "q / Esc        quit",
        "",
        "Press any key to close",
    ]
    .into_iter()
    .map(Line::from)
    .collect();
    let popup = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Help "))
        .wrap(Wrap { trim: false });
    f.render_widget(popup, area);
}

/// A rect `percent_x` wide and `height` tall centred in `area`.
fn centered_rect(area: Rect, percent_x: u16, height: u16) -> Rect {
    let width = (area.width * percent_x / 100).max(20).min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::store::MemoryStore;

    fn app() -> BoardApp<MemoryStore> {
        BoardApp::new(BoardState::initialize(MemoryStore::new()), "memory")
    }

    fn press(app: &mut BoardApp<MemoryStore>, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn shift(app: &mut BoardApp<MemoryStore>, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::SHIFT));
    }

    fn type_str(app: &mut BoardApp<MemoryStore>, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn add(app: &mut BoardApp<MemoryStore>, text: &str, tag: &str, due: &str) {
        press(app, KeyCode::Char('a'));
        type_str(app, text);
        press(app, KeyCode::Tab);
        type_str(app, tag);
        press(app, KeyCode::Tab);
        type_str(app, due);
        press(app, KeyCode::Enter);
    }

    fn screen(app: &mut BoardApp<MemoryStore>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn add_form_creates_todo_card() {
        let mut app = app();
        add(&mut app, "Write spec", "design", "2024-01-01");

        assert_eq!(app.mode(), Mode::Board);
        assert_eq!(app.board().len(), 1);
        let task = &app.board().tasks()[0];
        assert_eq!(task.tag, "design");
        assert_eq!(app.column(Status::Todo), [task.id.clone()]);
        assert_eq!(app.selection(), (0, 0));
    }

    #[test]
    fn empty_text_keeps_form_open() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode(), Mode::AddTask);
        assert!(app.board().is_empty());
        assert_eq!(app.status_message(), "Task text is empty");
    }

    #[test]
    fn bad_due_date_is_reported() {
        let mut app = app();
        add(&mut app, "Ship", "", "someday");
        assert_eq!(app.mode(), Mode::AddTask);
        assert!(app.board().is_empty());
        assert!(app.status_message().contains("someday"));
    }

    #[test]
    fn cards_move_through_stages() {
        let mut app = app();
        add(&mut app, "Card", "", "");
        let id = app.board().tasks()[0].id.clone();

        shift(&mut app, KeyCode::Right);
        assert_eq!(app.board().get(&id).unwrap().status, Status::InProgress);
        assert_eq!(app.selection(), (1, 0));

        press(&mut app, KeyCode::Char('>'));
        assert_eq!(app.board().get(&id).unwrap().status, Status::Done);
        assert_eq!(app.column(Status::Done), [id.clone()]);

        press(&mut app, KeyCode::Char('>'));
        assert_eq!(app.status_message(), "Already in Done");

        shift(&mut app, KeyCode::Left);
        assert_eq!(app.board().get(&id).unwrap().status, Status::InProgress);
    }

    #[test]
    fn filters_narrow_columns() {
        let mut app = app();
        add(&mut app, "Fix login", "Bug", "");
        add(&mut app, "New page", "feature", "");

        press(&mut app, KeyCode::Char('#'));
        type_str(&mut app, "BUG");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.filter().tag, "BUG");
        assert_eq!(app.column(Status::Todo).len(), 1);

        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "page");
        assert_eq!(app.column(Status::Todo).len(), 0);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.filter().text, "");
        assert_eq!(app.column(Status::Todo).len(), 1);

        press(&mut app, KeyCode::Char('c'));
        assert!(app.filter().is_empty());
        assert_eq!(app.column(Status::Todo).len(), 2);
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut app = app();
        add(&mut app, "Keep", "", "");
        add(&mut app, "Drop", "", "");
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selection(), (0, 1));

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.board().len(), 2);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.mode(), Mode::ConfirmDelete);
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.board().len(), 1);
        assert_eq!(app.board().tasks()[0].text, "Keep");
        assert_eq!(app.selection(), (0, 0));
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        assert!(press(&mut app, KeyCode::Char('q')));
        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        press(&mut app, KeyCode::Char('a'));
        assert!(!press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn renders_columns_with_counts() {
        let mut app = app();
        add(&mut app, "Write spec", "design", "yesterday");
        add(&mut app, "Review PR", "", "");
        let id = app.board().tasks()[1].id.clone();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('>'));
        assert_eq!(app.board().get(&id).unwrap().status, Status::InProgress);

        let out = screen(&mut app);
        assert!(out.contains("To Do (1)"));
        assert!(out.contains("In Progress (1)"));
        assert!(out.contains("Done (0)"));
        assert!(out.contains("Write spec"));
        assert!(out.contains("General"));
        assert!(out.contains("late"));
    }

    #[test]
    fn into_board_detaches_observer() {
        let mut app = app();
        add(&mut app, "One", "", "");
        let stale = Rc::clone(&app.stale);
        assert!(!stale.get());

        let mut board = app.into_board();
        assert_eq!(board.len(), 1);
        assert_eq!(Rc::strong_count(&stale), 1);
        board.add_task("Two", None, None).unwrap();
        assert!(!stale.get());
    }

    #[test]
    fn ctrl_c_leaves_filter_without_typing() {
        let mut app = app();
        add(&mut app, "Write spec", "", "");
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "wri");
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

        assert_eq!(app.mode(), Mode::Board);
        assert_eq!(app.filter().text, "wri");
        assert_eq!(app.column(Status::Todo).len(), 1);
    }
}
