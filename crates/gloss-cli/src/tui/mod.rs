//! Interactive TUI (Terminal User Interface) for Gloss.
//!
//! Provides a responsive search interface with:
//! - Content search as you type (debounced by the search coordinator)
//! - Filename filtering over the folder tree (Tab switches modes)
//! - Navigation through results; Enter prints the chosen document on exit

use crate::app::App;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gloss_core::{Config, DocumentCategory};
use ratatui::{prelude::*, widgets::*};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// What the query box searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Document contents, through the search coordinator
    Contents,
    /// Filenames, through the tree's name filter
    Names,
}

/// One line in the results list.
#[derive(Debug, Clone)]
struct ResultRow {
    category: DocumentCategory,
    label: String,
    detail: String,
    path: PathBuf,
}

/// TUI application state.
struct TuiApp {
    /// The main application
    app: App,

    /// Current query string
    query_string: String,

    /// Which search the query drives
    mode: Mode,

    /// Filename matches for `Mode::Names`
    name_rows: Vec<ResultRow>,

    /// Selected result index
    selected: usize,

    /// Vertical scroll offset
    scroll_offset: usize,

    /// Whether we should quit
    should_quit: bool,

    /// Document chosen with Enter
    chosen: Option<PathBuf>,
}

impl TuiApp {
    fn new(app: App) -> Self {
        TuiApp {
            app,
            query_string: String::new(),
            mode: Mode::Contents,
            name_rows: Vec::new(),
            selected: 0,
            scroll_offset: 0,
            should_quit: false,
            chosen: None,
        }
    }

    /// Rows for the current mode.
    fn rows(&self) -> Vec<ResultRow> {
        match self.mode {
            Mode::Contents => self
                .app
                .search
                .results()
                .iter()
                .map(|m| ResultRow {
                    category: m.category,
                    label: format!("{}:{}", m.file_name, m.line_number),
                    detail: m.line_content.clone(),
                    path: m.path.clone(),
                })
                .collect(),
            Mode::Names => self.name_rows.clone(),
        }
    }

    /// Re-run the search for the current mode.
    fn refresh(&mut self) {
        match self.mode {
            Mode::Contents => {
                let query = self.query_string.clone();
                self.app.search_contents(&query);
            }
            Mode::Names => {
                let root = self.app.root().map(PathBuf::from);
                self.name_rows = self
                    .app
                    .tree
                    .name_filter_results(&self.query_string)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|node| ResultRow {
                        category: node.category,
                        label: node.name.clone(),
                        detail: relative_parent(&node.path, root.as_deref()),
                        path: node.path.clone(),
                    })
                    .collect();
            }
        }
        self.reset_selection();
    }

    /// Apply finished background searches. Called once per frame.
    fn poll(&mut self) {
        if self.app.search.poll() && self.mode == Mode::Contents {
            self.reset_selection();
        }
    }

    fn reset_selection(&mut self) {
        self.selected = 0;
        self.scroll_offset = 0;
    }

    /// Handle input character.
    fn on_char(&mut self, c: char) {
        self.query_string.push(c);
        self.refresh();
    }

    /// Handle backspace.
    fn on_backspace(&mut self) {
        self.query_string.pop();
        self.refresh();
    }

    /// Switch between content and filename search.
    fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            Mode::Contents => {
                self.app.search.cancel();
                Mode::Names
            }
            Mode::Names => Mode::Contents,
        };
        self.refresh();
    }

    /// Move selection up.
    fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// Move selection down.
    fn select_next(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    /// Choose the selected document and quit.
    fn choose_selected(&mut self) {
        if let Some(row) = self.rows().get(self.selected) {
            self.app.tree.select(row.path.clone());
            self.chosen = Some(row.path.clone());
            self.should_quit = true;
        }
    }

    /// Status line text.
    fn status(&self) -> String {
        match self.mode {
            Mode::Contents if self.app.search.is_searching() => "Searching…".to_string(),
            Mode::Contents if self.query_string.is_empty() => {
                "Type to search contents | Tab:Filenames ↑↓:Navigate Enter:Choose Esc:Quit"
                    .to_string()
            }
            Mode::Contents => format!(
                "{} matches in {} documents ({:.1}ms) | Tab:Filenames Enter:Choose Esc:Quit",
                self.app.search.results().len(),
                self.app.search.last_file_count(),
                self.app
                    .search
                    .last_duration()
                    .unwrap_or_default()
                    .as_secs_f64()
                    * 1000.0
            ),
            Mode::Names => format!(
                "{} documents | Tab:Contents Enter:Choose Esc:Quit",
                self.name_rows.len()
            ),
        }
    }
}

/// Parent folder of `path` relative to `root`, for display.
fn relative_parent(path: &std::path::Path, root: Option<&std::path::Path>) -> String {
    let parent = path.parent().unwrap_or(path);
    match root.and_then(|r| parent.strip_prefix(r).ok()) {
        Some(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Some(rel) => rel.display().to_string(),
        None => parent.display().to_string(),
    }
}

/// Run the TUI application.
pub fn run(config: Config, root: Option<PathBuf>) -> anyhow::Result<()> {
    let app = App::open(config, root)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut tui_app = TuiApp::new(app);

    // Main loop
    let result = run_loop(&mut terminal, &mut tui_app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Some(path) = &tui_app.chosen {
        println!("{}", path.display());
    }

    result
}

/// Main event loop.
fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut TuiApp) -> anyhow::Result<()> {
    loop {
        app.poll();
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Esc => {
                            app.should_quit = true;
                        }
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            app.should_quit = true;
                        }
                        KeyCode::Char(c) => {
                            if !key.modifiers.contains(KeyModifiers::CONTROL) {
                                app.on_char(c);
                            }
                        }
                        KeyCode::Backspace => {
                            app.on_backspace();
                        }
                        KeyCode::Tab => {
                            app.toggle_mode();
                        }
                        KeyCode::Up => {
                            app.select_previous();
                        }
                        KeyCode::Down => {
                            let len = app.rows().len();
                            app.select_next(len);
                        }
                        KeyCode::Enter => {
                            app.choose_selected();
                        }
                        _ => {}
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

mod ui {
    use super::*;

    /// Draw the UI.
    pub fn draw(f: &mut Frame, app: &mut TuiApp) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Search box
                Constraint::Min(10),   // Results
                Constraint::Length(2), // Status bar
            ])
            .split(f.area());

        draw_search_box(f, app, chunks[0]);
        draw_results(f, app, chunks[1]);
        draw_status_bar(f, app, chunks[2]);
    }

    /// Draw the search input box.
    fn draw_search_box(f: &mut Frame, app: &TuiApp, area: Rect) {
        let title = match app.mode {
            Mode::Contents => format!(" 🔍 Search contents of {} ", app.app.tree.folder_name()),
            Mode::Names => format!(" 📂 Filter filenames in {} ", app.app.tree.folder_name()),
        };
        let input = Paragraph::new(app.query_string.as_str())
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(input, area);

        f.set_cursor_position(Position::new(
            area.x + app.query_string.chars().count() as u16 + 1,
            area.y + 1,
        ));
    }

    /// Draw the results list.
    fn draw_results(f: &mut Frame, app: &mut TuiApp, area: Rect) {
        let visible_height = area.height.saturating_sub(2) as usize;
        let rows = app.rows();

        if app.selected < app.scroll_offset {
            app.scroll_offset = app.selected;
        } else if app.selected >= app.scroll_offset + visible_height {
            app.scroll_offset = app.selected + 1 - visible_height.max(1);
        }

        let items: Vec<ListItem> = rows
            .iter()
            .skip(app.scroll_offset)
            .take(visible_height)
            .enumerate()
            .map(|(i, row)| {
                let line = Line::from(vec![
                    Span::raw(format!("{} ", row.category.icon())),
                    Span::styled(row.label.clone(), Style::default().fg(Color::Cyan)),
                    Span::raw("  "),
                    Span::raw(row.detail.clone()),
                ]);

                let style = if i + app.scroll_offset == app.selected {
                    Style::default()
                        .bg(Color::Blue)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };

                ListItem::new(line).style(style)
            })
            .collect();

        let title = format!(" Results ({}) ", rows.len());
        let results = List::new(items).block(Block::default().borders(Borders::ALL).title(title));

        f.render_widget(results, area);
    }

    /// Draw the status bar.
    fn draw_status_bar(f: &mut Frame, app: &TuiApp, area: Rect) {
        let status_bar = Paragraph::new(app.status()).style(Style::default().fg(Color::Gray));
        f.render_widget(status_bar, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_app() -> (TempDir, TuiApp) {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("README.md"), "# Welcome\nroadmap lives in docs").unwrap();
        fs::create_dir(root.join("docs")).unwrap();
        fs::write(root.join("docs/roadmap.md"), "# Roadmap\nQ1 goals").unwrap();

        let mut config = Config::default();
        config.search.debounce_ms = 10;
        let app = App::open(config, Some(root.to_path_buf())).unwrap();
        (temp_dir, TuiApp::new(app))
    }

    #[test]
    fn test_typing_runs_content_search() {
        let (_temp_dir, mut tui) = make_app();
        for c in "ROADMAP".chars() {
            tui.on_char(c);
        }
        assert!(tui.app.search.is_searching());
        assert_eq!(tui.status(), "Searching…");

        assert!(tui.app.search.wait(Duration::from_secs(10)));
        let rows = tui.rows();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().any(|r| r.label == "README.md:2"));
        assert!(rows.iter().any(|r| r.label == "roadmap.md:1"));
    }

    #[test]
    fn test_backspace_to_empty_clears() {
        let (_temp_dir, mut tui) = make_app();
        tui.on_char('q');
        tui.on_backspace();
        assert!(!tui.app.search.is_searching());
        assert!(tui.rows().is_empty());
    }

    #[test]
    fn test_name_mode() {
        let (temp_dir, mut tui) = make_app();
        tui.toggle_mode();
        for c in "road".chars() {
            tui.on_char(c);
        }

        let rows = tui.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "roadmap.md");
        assert_eq!(rows[0].detail, "docs");

        tui.choose_selected();
        assert!(tui.should_quit);
        assert_eq!(tui.chosen, Some(temp_dir.path().join("docs/roadmap.md")));
        assert_eq!(tui.app.tree.selected, tui.chosen);
    }

    #[test]
    fn test_selection_bounds() {
        let (_temp_dir, mut tui) = make_app();
        tui.toggle_mode();
        tui.on_char('m');

        let len = tui.rows().len();
        assert_eq!(len, 2);
        tui.select_next(len);
        tui.select_next(len);
        assert_eq!(tui.selected, 1);
        tui.select_previous();
        tui.select_previous();
        assert_eq!(tui.selected, 0);
    }

    #[test]
    fn test_relative_parent() {
        let root = std::path::Path::new("/notes");
        assert_eq!(
            relative_parent(std::path::Path::new("/notes/a.md"), Some(root)),
            "."
        );
        assert_eq!(
            relative_parent(std::path::Path::new("/notes/docs/a.md"), Some(root)),
            "docs"
        );
    }
}
