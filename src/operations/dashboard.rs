use crate::db::store::BudgetStore;
use crate::models::budget::{BudgetCategory, BudgetItem};
use crate::operations::editor::ItemEditor;
use crate::operations::notify::ToastLog;
use crate::operations::panel::CategoryPanel;
use crate::operations::summary::format_money;
use crate::operations::tracker::{BudgetTracker, LoadState};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::{Alignment, Color, Constraint, Direction, Layout, Modifier, Rect, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
};
use std::cmp::max;
use std::io;

const SLIDER_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    List,
    Input(InputKind),
    Snapshots,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputKind {
    Amount,
    SnapshotName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowRef {
    Category(usize),
    Item(usize, usize),
}

struct DashboardState {
    mode: Mode,
    rows: Vec<RowRef>,
    table_state: TableState,
    snapshot_state: TableState,

    input_buffer: String,
    input_error: Option<String>,

    // Hints that never reach the notifier, e.g. "item is fixed".
    hint: Option<String>,

    last_page_size: usize,
}

impl DashboardState {
    fn new() -> Self {
        Self {
            mode: Mode::List,
            rows: Vec::new(),
            table_state: TableState::default(),
            snapshot_state: TableState::default(),
            input_buffer: String::new(),
            input_error: None,
            hint: None,
            last_page_size: 10,
        }
    }

    fn recompute(&mut self, categories: &[BudgetCategory]) {
        self.rows.clear();
        for (ci, category) in categories.iter().enumerate() {
            self.rows.push(RowRef::Category(ci));
            for ii in 0..category.items.len() {
                self.rows.push(RowRef::Item(ci, ii));
            }
        }

        let current = self.table_state.selected().unwrap_or(0);
        let selected = self
            .item_positions()
            .into_iter()
            .min_by_key(|&pos| pos.abs_diff(current));
        self.table_state.select(selected);
    }

    fn item_positions(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| matches!(row, RowRef::Item(..)))
            .map(|(pos, _)| pos)
            .collect()
    }

    fn move_selection(&mut self, delta: i32) {
        let positions = self.item_positions();
        if positions.is_empty() {
            self.table_state.select(None);
            return;
        }

        let current = self.table_state.selected().unwrap_or(positions[0]);
        let index = positions.iter().position(|&pos| pos == current).unwrap_or(0) as i32;
        let next = (index + delta).clamp(0, positions.len() as i32 - 1) as usize;
        self.table_state.select(Some(positions[next]));
    }

    fn page(&mut self, direction: i32) {
        let page = max(1, self.last_page_size) as i32;
        self.move_selection(direction * page);
    }

    fn selected_item<'a>(&self, categories: &'a [BudgetCategory]) -> Option<(&'a BudgetCategory, &'a BudgetItem)> {
        match self.rows.get(self.table_state.selected()?)? {
            RowRef::Item(ci, ii) => {
                let category = categories.get(*ci)?;
                Some((category, category.items.get(*ii)?))
            }
            RowRef::Category(_) => None,
        }
    }

    fn start_input(&mut self, kind: InputKind, prefill: String) {
        self.input_buffer = prefill;
        self.input_error = None;
        self.mode = Mode::Input(kind);
    }

    fn cancel_input(&mut self) {
        self.input_error = None;
        self.mode = Mode::List;
    }
}

pub fn run_dashboard<S: BudgetStore>(tracker: &mut BudgetTracker<S, ToastLog>) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("Failed to enable raw mode: {}", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| format!("Failed to enter alternate screen: {}", e))?;

    let result = (|| {
        let backend = ratatui::backend::CrosstermBackend::new(stdout);
        let mut terminal = ratatui::Terminal::new(backend)
            .map_err(|e| format!("Failed to initialize terminal: {}", e))?;

        let mut state = DashboardState::new();

        // Show the loading screen once before the (blocking) load.
        terminal
            .draw(|frame| render_loading(frame, frame.area()))
            .map_err(|e| format!("Failed to draw terminal UI: {}", e))?;
        // Failures are reported through the tracker's notifications.
        let _ = tracker.load();
        state.recompute(tracker.categories());

        loop {
            terminal
                .draw(|frame| {
                    let size = frame.area();
                    if tracker.state() == LoadState::Loading {
                        render_loading(frame, size);
                        return;
                    }

                    let layout = Layout::default()
                        .direction(Direction::Vertical)
                        .constraints([
                            Constraint::Length(4),
                            Constraint::Min(5),
                            Constraint::Length(3),
                        ])
                        .split(size);

                    render_header(frame, layout[0], tracker);
                    render_table(frame, layout[1], tracker.categories(), &mut state);
                    render_footer(frame, layout[2], tracker.notifier(), &state);

                    match state.mode {
                        Mode::Input(kind) => render_input_modal(frame, size, &state, kind),
                        Mode::Snapshots => render_snapshot_modal(frame, size, tracker, &mut state),
                        Mode::List => {}
                    }
                })
                .map_err(|e| format!("Failed to draw terminal UI: {}", e))?;

            if event::poll(std::time::Duration::from_millis(200))
                .map_err(|e| format!("Failed to poll input: {}", e))?
            {
                let event = event::read().map_err(|e| format!("Failed to read input: {}", e))?;
                if let Event::Key(key) = event {
                    if handle_key(tracker, &mut state, key) {
                        break;
                    }
                }
            }
        }

        Ok(())
    })();

    tracker.close();

    disable_raw_mode().map_err(|e| format!("Failed to disable raw mode: {}", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen)
        .map_err(|e| format!("Failed to leave alternate screen: {}", e))?;

    result
}

/// Applies one key press. Returns true when the dashboard should exit.
fn handle_key<S: BudgetStore>(tracker: &mut BudgetTracker<S, ToastLog>, state: &mut DashboardState, key: KeyEvent) -> bool {
    // Many terminals emit both a Press and a Release event. Only act on Press/Repeat.
    if key.kind == KeyEventKind::Release {
        return false;
    }

    match state.mode {
        Mode::List => {
            state.hint = None;
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return true,
                KeyCode::Up => state.move_selection(-1),
                KeyCode::Down => state.move_selection(1),
                KeyCode::PageUp => state.page(-1),
                KeyCode::PageDown => state.page(1),
                KeyCode::Left => nudge_selected(tracker, state, -1),
                KeyCode::Right => nudge_selected(tracker, state, 1),
                KeyCode::Char('-') => nudge_selected(tracker, state, -10),
                KeyCode::Char('+') | KeyCode::Char('=') => nudge_selected(tracker, state, 10),
                KeyCode::Enter | KeyCode::Char('e') => {
                    let selected = state
                        .selected_item(tracker.categories())
                        .map(|(_, item)| (item.is_fixed, item.amount()));
                    match selected {
                        Some((true, _)) => state.hint = Some("Fixed items cannot be edited".to_string()),
                        Some((false, amount)) => state.start_input(InputKind::Amount, amount.to_string()),
                        None => {}
                    }
                }
                KeyCode::Char('f') => {
                    let ids = state
                        .selected_item(tracker.categories())
                        .map(|(c, i)| (c.id.clone(), i.id.clone()));
                    if let Some((category_id, item_id)) = ids {
                        let _ = tracker.toggle_fixed(&category_id, &item_id);
                    }
                }
                KeyCode::Char('s') => state.start_input(InputKind::SnapshotName, String::new()),
                KeyCode::Char('l') => {
                    if tracker.snapshots().is_empty() {
                        state.hint = Some("No saved budgets yet".to_string());
                    } else {
                        state.snapshot_state.select(Some(0));
                        state.mode = Mode::Snapshots;
                    }
                }
                KeyCode::Char('r') => {
                    let _ = tracker.load();
                    state.recompute(tracker.categories());
                }
                _ => {}
            }
        }
        Mode::Input(kind) => {
            // Allow Ctrl+C / Ctrl+Q to cancel
            if key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
            {
                state.cancel_input();
                return false;
            }

            match key.code {
                KeyCode::Esc => state.cancel_input(),
                KeyCode::Enter => commit_input(tracker, state, kind),
                KeyCode::Backspace => {
                    state.input_buffer.pop();
                }
                KeyCode::Char(ch) => state.input_buffer.push(ch),
                _ => {}
            }
        }
        Mode::Snapshots => {
            let count = tracker.snapshots().len();
            let current = state.snapshot_state.selected().unwrap_or(0);
            match key.code {
                KeyCode::Esc | KeyCode::Char('q') => state.mode = Mode::List,
                KeyCode::Up => state.snapshot_state.select(Some(current.saturating_sub(1))),
                KeyCode::Down => {
                    state
                        .snapshot_state
                        .select(Some((current + 1).min(count.saturating_sub(1))));
                }
                KeyCode::Enter => {
                    let name = tracker.snapshots().get(current).map(|s| s.name.clone());
                    if let Some(name) = name {
                        let _ = tracker.select_snapshot(&name);
                        state.recompute(tracker.categories());
                    }
                    state.mode = Mode::List;
                }
                _ => {}
            }
        }
    }

    false
}

fn nudge_selected<S: BudgetStore>(tracker: &mut BudgetTracker<S, ToastLog>, state: &mut DashboardState, steps: i64) {
    let intent = match state.selected_item(tracker.categories()) {
        Some((category, item)) => {
            let editor = ItemEditor::new(item);
            if editor.disabled() {
                state.hint = Some(format!("{} is fixed", item.name));
                return;
            }
            editor
                .nudge(steps)
                .filter(|amount| *amount != item.amount())
                .map(|amount| (category.id.clone(), item.id.clone(), amount))
        }
        None => None,
    };

    if let Some((category_id, item_id, amount)) = intent {
        let _ = tracker.update_item_amount(&category_id, &item_id, amount);
    }
}

fn commit_input<S: BudgetStore>(tracker: &mut BudgetTracker<S, ToastLog>, state: &mut DashboardState, kind: InputKind) {
    match kind {
        InputKind::Amount => {
            let parsed = state.selected_item(tracker.categories()).map(|(category, item)| {
                ItemEditor::new(item)
                    .parse_entry(&state.input_buffer)
                    .map(|amount| amount.map(|a| (category.id.clone(), item.id.clone(), a)))
            });

            match parsed {
                Some(Ok(Some((category_id, item_id, amount)))) => {
                    let _ = tracker.update_item_amount(&category_id, &item_id, amount);
                    state.cancel_input();
                }
                Some(Err(e)) => state.input_error = Some(e.to_string()),
                Some(Ok(None)) | None => state.cancel_input(),
            }
        }
        InputKind::SnapshotName => {
            let _ = tracker.save_snapshot(&state.input_buffer);
            state.cancel_input();
        }
    }
}

fn slider_bar(fraction: f64, width: usize, disabled: bool) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    let (full, empty) = if disabled { ('▒', '·') } else { ('█', '░') };
    let mut bar = String::with_capacity(width * 3);
    bar.extend(std::iter::repeat_n(full, filled));
    bar.extend(std::iter::repeat_n(empty, width - filled));
    bar
}

fn render_loading(frame: &mut ratatui::Frame, area: Rect) {
    frame.render_widget(
        Paragraph::new("Loading budget data...")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn render_header<S: BudgetStore>(frame: &mut ratatui::Frame, area: Rect, tracker: &BudgetTracker<S, ToastLog>) {
    let summary = tracker.summary();
    let total_color = if summary.comparison.is_over() { Color::Red } else { Color::Green };
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(vec![
            Span::styled("Budget Tracker", bold.fg(Color::Cyan)),
            Span::raw("  |  "),
            Span::raw("Fixed: "),
            Span::styled(format_money(summary.totals.fixed), Style::default().fg(Color::Blue)),
            Span::raw("  |  "),
            Span::raw(format!("Variable: {}", format_money(summary.totals.variable))),
            Span::raw("  |  "),
            Span::raw("Total: "),
            Span::styled(format_money(summary.totals.grand), bold.fg(total_color)),
        ]),
        Line::from(vec![
            Span::raw(format!("Monthly income: {}  ", format_money(summary.income))),
            Span::styled(format!("({})", summary.comparison), Style::default().fg(total_color)),
        ]),
    ];

    let block = Block::default().borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block).alignment(Alignment::Left), area);
}

fn render_footer(frame: &mut ratatui::Frame, area: Rect, toasts: &ToastLog, state: &DashboardState) {
    let hint = match state.mode {
        Mode::List => "↑/↓ move  ←/→ ±10  -/+ ±100  Enter amount  f fixed  s save  l load  r reload  q quit",
        Mode::Input(_) => "Type, Enter apply, Esc cancel",
        Mode::Snapshots => "↑/↓ choose  Enter load  Esc back",
    };

    let mut spans = Vec::new();
    if let Some(message) = state.hint.as_ref() {
        spans.push(Span::styled(message.clone(), Style::default().fg(Color::Yellow)));
        spans.push(Span::raw("  |  "));
    } else if let Some(toast) = toasts.latest() {
        let color = if toast.is_error() { Color::Red } else { Color::Green };
        spans.push(Span::styled(
            format!("{}: {}", toast.title, toast.description),
            Style::default().fg(color),
        ));
        spans.push(Span::raw("  |  "));
    }
    spans.push(Span::styled(hint, Style::default().fg(Color::DarkGray)));

    let block = Block::default().borders(Borders::ALL);
    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_table(frame: &mut ratatui::Frame, area: Rect, categories: &[BudgetCategory], state: &mut DashboardState) {
    let block = Block::default().title("Categories").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new([
        Cell::from("Item").style(bold),
        Cell::from("Planned").style(bold),
        Cell::from("Actual").style(bold),
        Cell::from("Slider").style(bold),
        Cell::from("Type").style(bold),
    ])
    .style(Style::default().fg(Color::White));

    let rows = state.rows.iter().filter_map(|row| match *row {
        RowRef::Category(ci) => {
            let panel = CategoryPanel::new(categories.get(ci)?);
            let planned = if panel.shows_planned() {
                format_money(panel.planned_subtotal())
            } else {
                String::new()
            };
            Some(
                Row::new([
                    Cell::from(panel.name().to_string()),
                    Cell::from(planned),
                    Cell::from(format_money(panel.actual_subtotal())),
                    Cell::from(""),
                    Cell::from(""),
                ])
                .style(bold.fg(Color::Cyan)),
            )
        }
        RowRef::Item(ci, ii) => {
            let line = CategoryPanel::new(categories.get(ci)?).lines().nth(ii)?;
            let planned = if line.shows_planned() {
                format_money(line.item.planned_amount)
            } else {
                String::new()
            };
            let style = if line.editor.disabled() {
                Style::default().fg(Color::Blue)
            } else {
                Style::default()
            };
            Some(
                Row::new([
                    Cell::from(format!("  {}", line.item.name)),
                    Cell::from(planned),
                    Cell::from(format_money(line.editor.value())),
                    Cell::from(slider_bar(line.editor.fraction(), SLIDER_WIDTH, line.editor.disabled())),
                    Cell::from(line.status_label()),
                ])
                .style(style),
            )
        }
    });

    // Leave room for the header row.
    state.last_page_size = max(1, inner.height.saturating_sub(2) as usize);

    let widths = [
        Constraint::Percentage(30),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(SLIDER_WIDTH as u16 + 2),
        Constraint::Length(9),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(bold.bg(Color::DarkGray).fg(Color::White))
        .highlight_symbol("➤ ")
        .column_spacing(1);

    frame.render_stateful_widget(table, inner, &mut state.table_state);

    if state.rows.is_empty() {
        let empty = Paragraph::new("No budget data. Press r to reload.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
    }
}

fn render_input_modal(frame: &mut ratatui::Frame, area: Rect, state: &DashboardState, kind: InputKind) {
    let popup_area = centered_rect(60, 30, area);
    frame.render_widget(Clear, popup_area);

    let (title, help) = match kind {
        InputKind::Amount => ("Set Amount", "Enter the new actual amount"),
        InputKind::SnapshotName => ("Save Budget", "Enter a name for this budget"),
    };

    let mut lines = vec![
        Line::from(vec![Span::styled(title, Style::default().add_modifier(Modifier::BOLD))]),
        Line::from(help),
        Line::from(""),
        Line::from(vec![Span::styled(
            format!("> {}", state.input_buffer),
            Style::default().fg(Color::Yellow),
        )]),
    ];

    if let Some(ref err) = state.input_error {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![Span::styled(err.clone(), Style::default().fg(Color::Red))]));
    }

    let block = Block::default().borders(Borders::ALL).title("Input");
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true }),
        popup_area,
    );
}

fn render_snapshot_modal<S: BudgetStore>(
    frame: &mut ratatui::Frame,
    area: Rect,
    tracker: &BudgetTracker<S, ToastLog>,
    state: &mut DashboardState,
) {
    let popup_area = centered_rect(70, 50, area);
    frame.render_widget(Clear, popup_area);

    let rows = tracker.snapshots().into_iter().map(|snapshot| {
        Row::new([
            Cell::from(snapshot.name.clone()),
            Cell::from(snapshot.timestamp.format("%Y-%m-%d %H:%M").to_string()),
        ])
    });

    let table = Table::new(rows, [Constraint::Percentage(60), Constraint::Percentage(40)])
        .block(Block::default().borders(Borders::ALL).title("Saved Budgets"))
        .row_highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White))
        .highlight_symbol("➤ ");

    frame.render_stateful_widget(table, popup_area, &mut state.snapshot_state);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::budget_repository::SqliteBudgetStore;
    use crate::db::connection::establish_test_connection;
    use rust_decimal::Decimal;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn setup() -> (BudgetTracker<SqliteBudgetStore, ToastLog>, DashboardState) {
        let store = SqliteBudgetStore::new(establish_test_connection().unwrap(), Some("alice".to_string()));
        let mut tracker = BudgetTracker::new(store, ToastLog::default());
        tracker.load().unwrap();
        let mut state = DashboardState::new();
        state.recompute(tracker.categories());
        (tracker, state)
    }

    fn selected_name(tracker: &BudgetTracker<SqliteBudgetStore, ToastLog>, state: &DashboardState) -> String {
        state.selected_item(tracker.categories()).unwrap().1.name.clone()
    }

    fn select(tracker: &BudgetTracker<SqliteBudgetStore, ToastLog>, state: &mut DashboardState, name: &str) {
        for _ in 0..20 {
            if selected_name(tracker, state) == name {
                return;
            }
            state.move_selection(1);
        }
        panic!("item {} not found", name);
    }

    #[test]
    fn test_slider_bar() {
        assert_eq!(slider_bar(0.0, 4, false), "░░░░");
        assert_eq!(slider_bar(0.5, 4, false), "██░░");
        assert_eq!(slider_bar(1.5, 4, false), "████");
        assert_eq!(slider_bar(0.25, 4, true), "▒···");
    }

    #[test]
    fn test_rows_include_category_headers() {
        let (tracker, state) = setup();
        assert_eq!(state.rows.len(), 3 + 6);
        assert_eq!(state.rows[0], RowRef::Category(0));
        assert_eq!(state.rows[1], RowRef::Item(0, 0));
        assert_eq!(selected_name(&tracker, &state), "Rent/Mortgage");
    }

    #[test]
    fn test_selection_skips_category_rows() {
        let (tracker, mut state) = setup();
        state.move_selection(1);
        assert_eq!(selected_name(&tracker, &state), "Utilities");
        state.move_selection(1);
        assert_eq!(selected_name(&tracker, &state), "Car Payment");
        state.move_selection(-10);
        assert_eq!(selected_name(&tracker, &state), "Rent/Mortgage");
    }

    #[test]
    fn test_right_arrow_nudges_variable_item() {
        let (mut tracker, mut state) = setup();
        select(&tracker, &mut state, "Fuel");

        handle_key(&mut tracker, &mut state, key(KeyCode::Right));

        let (category_id, item_id) = tracker.find_by_name("Transportation", "Fuel").unwrap();
        assert_eq!(tracker.item(&category_id, &item_id).unwrap().amount(), Decimal::from(160));
    }

    #[test]
    fn test_arrow_on_fixed_item_is_ignored() {
        let (mut tracker, mut state) = setup();
        select(&tracker, &mut state, "Rent/Mortgage");

        handle_key(&mut tracker, &mut state, key(KeyCode::Left));

        let (category_id, item_id) = tracker.find_by_name("Housing & Utilities", "Rent/Mortgage").unwrap();
        assert_eq!(tracker.item(&category_id, &item_id).unwrap().amount(), Decimal::from(1500));
        assert!(state.hint.is_some());
        assert!(tracker.notifier().is_empty());
    }

    #[test]
    fn test_amount_entry_commits_snapped_value() {
        let (mut tracker, mut state) = setup();
        select(&tracker, &mut state, "Groceries");

        handle_key(&mut tracker, &mut state, key(KeyCode::Enter));
        assert_eq!(state.mode, Mode::Input(InputKind::Amount));
        state.input_buffer.clear();
        for ch in "437".chars() {
            handle_key(&mut tracker, &mut state, key(KeyCode::Char(ch)));
        }
        handle_key(&mut tracker, &mut state, key(KeyCode::Enter));

        assert_eq!(state.mode, Mode::List);
        let (category_id, item_id) = tracker.find_by_name("Food & Groceries", "Groceries").unwrap();
        assert_eq!(tracker.item(&category_id, &item_id).unwrap().amount(), Decimal::from(430));
    }

    #[test]
    fn test_invalid_amount_keeps_modal_open() {
        let (mut tracker, mut state) = setup();
        select(&tracker, &mut state, "Groceries");

        handle_key(&mut tracker, &mut state, key(KeyCode::Enter));
        state.input_buffer = "lots".to_string();
        handle_key(&mut tracker, &mut state, key(KeyCode::Enter));

        assert_eq!(state.mode, Mode::Input(InputKind::Amount));
        assert!(state.input_error.is_some());
    }

    #[test]
    fn test_toggle_fixed_key() {
        let (mut tracker, mut state) = setup();
        select(&tracker, &mut state, "Utilities");

        handle_key(&mut tracker, &mut state, key(KeyCode::Char('f')));

        let (category_id, item_id) = tracker.find_by_name("Housing & Utilities", "Utilities").unwrap();
        assert!(tracker.item(&category_id, &item_id).unwrap().is_fixed);
    }

    #[test]
    fn test_table_rows_come_from_panel_lines() {
        let (mut tracker, mut state) = setup();
        select(&tracker, &mut state, "Fuel");
        handle_key(&mut tracker, &mut state, key(KeyCode::Right));

        let mut terminal = ratatui::Terminal::new(ratatui::backend::TestBackend::new(100, 16)).unwrap();
        terminal
            .draw(|frame| render_table(frame, frame.area(), tracker.categories(), &mut state))
            .unwrap();

        let rendered: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(rendered.contains("Rent/Mortgage"));
        assert!(rendered.contains("Fixed"));
        assert!(rendered.contains("Variable"));
        assert!(rendered.contains("$160"));
        assert!(rendered.contains("$150"));
    }

    #[test]
    fn test_quit_keys() {
        let (mut tracker, mut state) = setup();
        assert!(handle_key(&mut tracker, &mut state, key(KeyCode::Char('q'))));

        state.mode = Mode::Input(InputKind::SnapshotName);
        assert!(!handle_key(&mut tracker, &mut state, key(KeyCode::Char('q'))));
        assert_eq!(state.input_buffer, "q");
    }
}
