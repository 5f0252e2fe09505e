use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Block, Borders, Cell, Chart, Clear, Dataset, GraphType, Paragraph, Row, Table,
        TableState,
    },
    Frame, Terminal,
};
use skill_tracker::{
    format_weight, TrackedWidget, TrackedWidgetStore, WeightChart, WeightProgress, WidgetCatalog,
    WidgetState, WidgetTemplate,
};
use std::io;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Pinned widgets
    Home,
    /// Catalog browser with search
    Picker,
    /// Quick-track dialog over Home
    Track { widget_id: String },
    /// Height, summary and history chart of a weight widget
    WeightDetails { widget_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailField {
    Height,
    Weight,
}

impl DetailField {
    fn toggle(&self) -> Self {
        match self {
            DetailField::Height => DetailField::Weight,
            DetailField::Weight => DetailField::Height,
        }
    }
}

pub struct App {
    pub store: TrackedWidgetStore,
    pub screen: Screen,
    pub home_state: TableState,
    pub picker_state: TableState,
    pub picker_query: String,
    /// Track dialog input
    pub draft: String,
    pub height_field: String,
    pub weight_field: String,
    /// Set once the user touches the field; untouched prefills are never saved
    pub height_dirty: bool,
    pub weight_dirty: bool,
    pub detail_focus: DetailField,
    pub should_quit: bool,
}

impl App {
    pub fn new(store: TrackedWidgetStore) -> Self {
        let mut home_state = TableState::default();
        if !store.is_empty() {
            home_state.select(Some(0));
        }

        Self {
            store,
            screen: Screen::Home,
            home_state,
            picker_state: TableState::default(),
            picker_query: String::new(),
            draft: String::new(),
            height_field: String::new(),
            weight_field: String::new(),
            height_dirty: false,
            weight_dirty: false,
            detail_focus: DetailField::Weight,
            should_quit: false,
        }
    }

    pub fn selected_widget(&self) -> Option<&TrackedWidget> {
        self.home_state.selected().and_then(|i| self.store.list().get(i))
    }

    pub fn picker_results(&self) -> Vec<Arc<WidgetTemplate>> {
        WidgetCatalog::search(&self.picker_query)
    }

    /// Widget the current screen is about, dropping back Home if it vanished
    fn focused_widget(&mut self) -> Option<TrackedWidget> {
        let id = match &self.screen {
            Screen::Track { widget_id } | Screen::WeightDetails { widget_id } => widget_id.clone(),
            _ => return None,
        };
        let widget = self.store.get(&id).cloned();
        if widget.is_none() {
            self.screen = Screen::Home;
        }
        widget
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    pub fn open_picker(&mut self) {
        self.picker_query.clear();
        self.picker_state.select(Some(0));
        self.screen = Screen::Picker;
    }

    pub fn open_track_dialog(&mut self) {
        let Some(widget) = self.selected_widget().cloned() else {
            return;
        };
        self.draft = match &widget.state {
            WidgetState::Simple { value } => value.clone(),
            WidgetState::Weight(w) => w.latest_weight().map(format_weight).unwrap_or_default(),
        };
        self.screen = Screen::Track {
            widget_id: widget.id.clone(),
        };
    }

    /// Only weight widgets have a detail screen; others get the track dialog
    pub fn open_details(&mut self) {
        let Some(widget) = self.selected_widget().cloned() else {
            return;
        };
        let Some(weight) = widget.state.as_weight() else {
            self.open_track_dialog();
            return;
        };

        self.height_field = weight.height_cm.map(format_weight).unwrap_or_default();
        self.weight_field = weight.latest_weight().map(format_weight).unwrap_or_default();
        self.height_dirty = false;
        self.weight_dirty = false;
        self.detail_focus = DetailField::Weight;
        self.screen = Screen::WeightDetails {
            widget_id: widget.id.clone(),
        };
    }

    /// Leave any overlay, discarding drafts
    pub fn close(&mut self) {
        self.draft.clear();
        self.height_field.clear();
        self.weight_field.clear();
        self.height_dirty = false;
        self.weight_dirty = false;
        self.screen = Screen::Home;
    }

    pub fn next(&mut self) {
        let (state, len) = self.active_list();
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let (state, len) = self.active_list();
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        state.select(Some(i));
    }

    fn active_list(&mut self) -> (&mut TableState, usize) {
        if self.screen == Screen::Picker {
            let len = self.picker_results().len();
            (&mut self.picker_state, len)
        } else {
            (&mut self.home_state, self.store.len())
        }
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    /// Pin the highlighted catalog template and return Home with it selected
    pub fn add_selected_template(&mut self) {
        let results = self.picker_results();
        let Some(template) = self.picker_state.selected().and_then(|i| results.get(i)).cloned() else {
            return;
        };

        let widget = self.store.add(template);
        info!(id = %widget.id, "pinned widget");
        self.home_state.select(Some(self.store.len() - 1));
        self.screen = Screen::Home;
    }

    pub fn confirm_track(&mut self) {
        if let Some(widget) = self.focused_widget() {
            let changed = self.store.track_value(&widget.id, &self.draft);
            debug!(id = %widget.id, changed, "track dialog confirmed");
        }
        self.close();
    }

    pub fn save_details(&mut self) {
        if let Some(widget) = self.focused_widget() {
            if let Some(weight) = widget.state.as_weight() {
                let label = self.store.today_label();
                let height_text = if self.height_dirty { self.height_field.as_str() } else { "" };
                let weight_text = if self.weight_dirty { self.weight_field.as_str() } else { "" };
                if let Some(updated) = weight.apply_detail_edits(height_text, weight_text, &label) {
                    self.store.update(&widget.id, WidgetState::Weight(updated));
                    debug!(id = %widget.id, "weight details saved");
                }
            }
        }
        self.close();
    }

    fn set_query(&mut self, query: String) {
        self.picker_query = query;
        let selection = if self.picker_results().is_empty() { None } else { Some(0) };
        self.picker_state.select(selection);
    }

    // ------------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen.clone() {
            Screen::Home => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Char('a') => self.open_picker(),
                KeyCode::Char('t') => self.open_track_dialog(),
                KeyCode::Char('d') | KeyCode::Enter => self.open_details(),
                KeyCode::Down | KeyCode::Char('j') => self.next(),
                KeyCode::Up | KeyCode::Char('k') => self.previous(),
                _ => {}
            },
            Screen::Picker => match key.code {
                KeyCode::Esc => self.close(),
                KeyCode::Enter => self.add_selected_template(),
                KeyCode::Down => self.next(),
                KeyCode::Up => self.previous(),
                KeyCode::Backspace => {
                    let mut query = self.picker_query.clone();
                    query.pop();
                    self.set_query(query);
                }
                KeyCode::Char(c) => {
                    let query = format!("{}{}", self.picker_query, c);
                    self.set_query(query);
                }
                _ => {}
            },
            Screen::Track { .. } => match key.code {
                KeyCode::Esc => self.close(),
                KeyCode::Enter => self.confirm_track(),
                KeyCode::Backspace => {
                    self.draft.pop();
                }
                KeyCode::Char(c) => self.draft.push(c),
                _ => {}
            },
            Screen::WeightDetails { .. } => {
                let (field, dirty) = match self.detail_focus {
                    DetailField::Height => (&mut self.height_field, &mut self.height_dirty),
                    DetailField::Weight => (&mut self.weight_field, &mut self.weight_dirty),
                };
                match key.code {
                    KeyCode::Esc => self.close(),
                    KeyCode::Enter => self.save_details(),
                    KeyCode::Tab | KeyCode::BackTab => self.detail_focus = self.detail_focus.toggle(),
                    KeyCode::Backspace => {
                        field.pop();
                        *dirty = true;
                    }
                    KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                        field.push(c);
                        *dirty = true;
                    }
                    _ => {}
                }
            }
        }
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }
    }
    Ok(())
}

// ============================================================================
// Rendering
// ============================================================================

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Title
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Key hints
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.screen.clone() {
        Screen::Home => render_home(f, chunks[1], app),
        Screen::Picker => render_picker(f, chunks[1], app),
        Screen::Track { .. } => {
            render_home(f, chunks[1], app);
            render_track_dialog(f, chunks[1], app);
        }
        Screen::WeightDetails { .. } => render_weight_details(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let subtitle = match app.screen {
        Screen::Picker => "Pick one of your go-to trackers to pin on the home screen",
        Screen::WeightDetails { .. } => "Weight details",
        _ => "Stay consistent by focusing on the widgets you care about",
    };

    let text = vec![
        Line::from(Span::styled(
            "Skill tracker",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, Style::default().fg(Color::DarkGray))),
    ];

    let header = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));
    f.render_widget(header, area);
}

fn widget_value(widget: &TrackedWidget) -> String {
    match &widget.state {
        WidgetState::Simple { value } if value.trim().is_empty() => "Not tracked yet".to_string(),
        WidgetState::Simple { value } => value.clone(),
        WidgetState::Weight(w) => match w.latest_weight() {
            Some(kg) => format!("{} kg", format_weight(kg)),
            None => "Not tracked yet".to_string(),
        },
    }
}

fn header_row(titles: &[&'static str]) -> Row<'static> {
    let cells = titles.iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    });
    Row::new(cells).style(Style::default().bg(Color::DarkGray)).height(1)
}

fn render_home(f: &mut Frame, area: Rect, app: &mut App) {
    if app.store.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No widgets yet", Style::default().add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(
                "Press \"a\" to track your first metric.",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Widgets "));
        f.render_widget(empty, area);
        return;
    }

    let rows: Vec<Row> = app
        .store
        .list()
        .iter()
        .map(|w| {
            Row::new(vec![
                Cell::from(truncate(&w.template.name, 24)),
                Cell::from(w.template.tag.display_name()).style(Style::default().fg(Color::Magenta)),
                Cell::from(truncate(&widget_value(w), 40)),
            ])
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(26), Constraint::Length(12), Constraint::Min(10)])
        .header(header_row(&["Widget", "Tag", "Value"]))
        .block(Block::default().borders(Borders::ALL).title(" Widgets "))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.home_state);
}

fn render_picker(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let query = Paragraph::new(Line::from(vec![
        Span::raw(&app.picker_query),
        Span::styled("▏", Style::default().fg(Color::Yellow)),
    ]))
    .block(Block::default().borders(Borders::ALL).title(" Search widgets "));
    f.render_widget(query, chunks[0]);

    let rows: Vec<Row> = app
        .picker_results()
        .iter()
        .map(|t| {
            Row::new(vec![
                Cell::from(t.name.clone()),
                Cell::from(t.tag.display_name()).style(Style::default().fg(Color::Magenta)),
                Cell::from(truncate(&t.description, 50)),
            ])
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(20), Constraint::Length(12), Constraint::Min(20)])
        .header(header_row(&["Widget", "Tag", "Description"]))
        .block(Block::default().borders(Borders::ALL).title(" Add a widget "))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("→ ");

    f.render_stateful_widget(table, chunks[1], &mut app.picker_state);
}

fn render_track_dialog(f: &mut Frame, area: Rect, app: &mut App) {
    let Some(widget) = app.focused_widget() else {
        return;
    };
    let (title, unit) = if widget.is_weight() {
        (" Track weight ".to_string(), " kg")
    } else {
        (format!(" {} ", widget.template.name), "")
    };

    let popup = centered_rect(50, 5, area);
    let input = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::raw(" "),
            Span::styled(app.draft.clone(), Style::default().fg(Color::White)),
            Span::styled("▏", Style::default().fg(Color::Yellow)),
            Span::styled(unit, Style::default().fg(Color::DarkGray)),
        ]),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(title),
    );

    f.render_widget(Clear, popup);
    f.render_widget(input, popup);
}

fn render_weight_details(f: &mut Frame, area: Rect, app: &mut App) {
    let Some(widget) = app.focused_widget() else {
        return;
    };
    let Some(weight) = widget.state.as_weight() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(4), Constraint::Min(8)])
        .split(area);

    // Inputs
    let inputs = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);
    for (i, (field, label, value)) in [
        (DetailField::Height, " Height (cm) ", &app.height_field),
        (DetailField::Weight, " Weight (kg) ", &app.weight_field),
    ]
    .into_iter()
    .enumerate()
    {
        let border = if field == app.detail_focus {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let input = Paragraph::new(value.as_str())
            .block(Block::default().borders(Borders::ALL).border_style(border).title(label));
        f.render_widget(input, inputs[i]);
    }

    // Summary row
    let summary = weight.summary();
    let hint = progress_hint(weight.progress());
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(1, 3), Constraint::Ratio(1, 3)])
        .split(chunks[1]);
    for (i, (title, value)) in [
        ("Current BMI", summary.bmi),
        ("Height", summary.height),
        ("Weight", summary.weight),
    ]
    .into_iter()
    .enumerate()
    {
        let mut block = Block::default().borders(Borders::ALL);
        if i == 0 {
            if let Some(hint) = hint {
                block = block.title(Span::styled(hint, Style::default().fg(Color::DarkGray)));
            }
        }
        let cell = Paragraph::new(vec![
            Line::from(Span::styled(title, Style::default().fg(Color::DarkGray))),
            Line::from(Span::styled(value, Style::default().add_modifier(Modifier::BOLD))),
        ])
        .block(block);
        f.render_widget(cell, cells[i]);
    }

    render_chart(f, chunks[2], &WeightChart::for_entries(&weight.entries));
}

/// What the user still has to enter before BMI shows up
fn progress_hint(progress: WeightProgress) -> Option<&'static str> {
    match progress {
        WeightProgress::NoData => Some(" enter height and weight "),
        WeightProgress::Partial => Some(" BMI needs both values "),
        WeightProgress::Complete => None,
    }
}

fn render_chart(f: &mut Frame, area: Rect, chart: &WeightChart) {
    let data: Vec<(f64, f64)> = chart.points.iter().map(|p| (p.x, p.y)).collect();
    let x_labels: Vec<Span> = match (chart.points.first(), chart.points.last()) {
        (Some(first), Some(last)) if chart.points.len() > 1 => {
            vec![Span::raw(first.label.clone()), Span::raw(last.label.clone())]
        }
        (Some(only), _) => vec![Span::raw(only.label.clone())],
        _ => vec![],
    };

    let title = if chart.is_sample {
        " Last 5 entries (sample) "
    } else {
        " Last 5 entries "
    };

    let datasets = vec![Dataset::default()
        .name("kg")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data)];

    let widget = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title(title))
        .x_axis(Axis::default().bounds([0.0, 1.0]).labels(x_labels))
        .y_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .labels(vec![
                    Span::raw(format_weight(chart.range_min)),
                    Span::raw(format_weight(chart.range_max)),
                ]),
        );

    f.render_widget(widget, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let hints: &[(&str, &str)] = match app.screen {
        Screen::Home => &[("a", "Add"), ("t", "Track"), ("Enter", "Details"), ("↑/↓", "Nav"), ("q", "Quit")],
        Screen::Picker => &[("type", "Search"), ("↑/↓", "Nav"), ("Enter", "Add"), ("Esc", "Cancel")],
        Screen::Track { .. } => &[("Enter", "Save"), ("Esc", "Cancel")],
        Screen::WeightDetails { .. } => &[("Tab", "Field"), ("Enter", "Save"), ("Esc", "Close")],
    };

    let mut spans = vec![Span::styled(
        format!(" Widgets: {} ", app.store.len()),
        Style::default().fg(Color::Cyan),
    )];
    for (key, label) in hints {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format!(" {}", label)));
    }

    let status_bar = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::White)));
    f.render_widget(status_bar, area);
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
