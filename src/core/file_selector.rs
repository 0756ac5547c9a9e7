use crate::domain::models::AppState;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, info, warn};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::{io, time::Duration};

/// Checkbox list over the discovered files. The session state itself is a
/// value that gets replaced on every toggle; the widget only adds a cursor.
struct App {
    state: AppState,
    names: Vec<String>,
    cursor: ListState,
    title: String,
    help_message: String,
}

impl App {
    fn new(state: AppState, title: String) -> App {
        let names: Vec<String> = state.files.keys().cloned().collect();
        let mut cursor = ListState::default();
        if !names.is_empty() {
            cursor.select(Some(0));
        }

        App {
            state,
            names,
            cursor,
            title,
            help_message: String::from(
                "↑/↓: Navigate | Space: Toggle | Enter: Generate | a: All | n: None | q: Quit",
            ),
        }
    }

    fn next(&mut self) {
        let i = match self.cursor.selected() {
            Some(i) => {
                if i >= self.names.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.cursor.select(Some(i));
    }

    fn previous(&mut self) {
        let i = match self.cursor.selected() {
            Some(i) => {
                if i == 0 {
                    self.names.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.cursor.select(Some(i));
    }

    fn toggle_current(&mut self) {
        if let Some(i) = self.cursor.selected() {
            if let Some(name) = self.names.get(i) {
                debug!("Toggling inclusion of {}", name);
                self.state = self.state.clone().toggled(name);
            }
        }
    }

    fn include_all(&mut self) {
        self.state = self.state.clone().include_all();
    }

    fn exclude_all(&mut self) {
        self.state = self.state.clone().exclude_all();
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.area());

    // Title
    let title = Paragraph::new(Span::styled(
        app.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    f.render_widget(title, chunks[0]);

    let highlight_style = Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let items: Vec<ListItem> = app
        .names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let included = app.state.is_included(name);
            let prefix = if included { "[✓] " } else { "[ ] " };
            let content = format!("{}{}", prefix, name);

            let style = if app.cursor.selected() == Some(i) {
                highlight_style
            } else if included {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            ListItem::new(Span::styled(content, style))
        })
        .collect();

    let file_list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!(
            "Files ({} included of {})",
            app.state.included_count(),
            app.state.file_count()
        )))
        .highlight_style(highlight_style);

    f.render_stateful_widget(file_list, chunks[1], &mut app.cursor);

    // Controls help
    let controls = Paragraph::new(Span::styled(
        app.help_message.clone(),
        Style::default().fg(Color::DarkGray),
    ));
    f.render_widget(controls, chunks[3]);
}

/// Lets the user edit the inclusion set. Returns the updated state and
/// whether generation was requested. With `auto` set, everything stays
/// included and generation is requested immediately.
pub fn select_files(state: AppState, auto: bool) -> anyhow::Result<(AppState, bool)> {
    if state.file_count() == 0 {
        info!("No files to select");
        return Ok((state, false));
    }

    if auto {
        info!("Auto-including all {} files", state.file_count());
        return Ok((state, true));
    }

    run_tui(state)
}

fn run_tui(state: AppState) -> anyhow::Result<(AppState, bool)> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(
        state,
        "Uncheck files to exclude them from the combined output".to_string(),
    );

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match result {
        Ok(generate) => {
            info!(
                "Selection finished with {} of {} files included",
                app.state.included_count(),
                app.state.file_count()
            );
            Ok((app.state.clone(), generate))
        }
        Err(err) => {
            warn!("Error during file selection: {}", err);
            Err(anyhow::anyhow!("Selection cancelled: {}", err))
        }
    }
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<bool> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if crossterm::event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        return Ok(false);
                    }
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Err(anyhow::anyhow!("Selection cancelled"));
                    }
                    KeyCode::Char('a') => app.include_all(),
                    KeyCode::Char('n') => app.exclude_all(),
                    KeyCode::Char(' ') => app.toggle_current(),
                    KeyCode::Down => app.next(),
                    KeyCode::Up => app.previous(),
                    KeyCode::Enter => {
                        return Ok(true);
                    }
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::FileEntry;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn state_of(names: &[&str]) -> AppState {
        let files: BTreeMap<String, FileEntry> = names
            .iter()
            .map(|name| {
                (
                    name.to_string(),
                    FileEntry {
                        name: name.to_string(),
                        location: PathBuf::from(format!("/tmp/{}", name)),
                    },
                )
            })
            .collect();
        AppState::with_files(files).editable()
    }

    #[test]
    fn test_select_files_with_auto() {
        let (state, generate) = select_files(state_of(&["a.txt", "b.txt"]), true).unwrap();

        assert!(generate);
        assert_eq!(state.included_count(), 2);
    }

    #[test]
    fn test_select_files_with_empty_input() {
        let (_, generate) = select_files(AppState::new(), true).unwrap();
        assert!(!generate);
    }

    #[test]
    fn test_cursor_wraps_around() {
        let mut app = App::new(state_of(&["a.txt", "b.txt", "c.txt"]), "Test".to_string());

        assert_eq!(app.cursor.selected(), Some(0));
        app.previous();
        assert_eq!(app.cursor.selected(), Some(2));
        app.next();
        assert_eq!(app.cursor.selected(), Some(0));
    }

    #[test]
    fn test_toggle_current_updates_state() {
        let mut app = App::new(state_of(&["a.txt", "b.txt"]), "Test".to_string());

        app.toggle_current();
        assert!(!app.state.is_included("a.txt"));
        assert!(app.state.is_included("b.txt"));

        app.toggle_current();
        assert!(app.state.is_included("a.txt"));
    }

    #[test]
    fn test_include_and_exclude_all() {
        let mut app = App::new(state_of(&["a.txt", "b.txt"]), "Test".to_string());

        app.exclude_all();
        assert_eq!(app.state.included_count(), 0);

        app.include_all();
        assert_eq!(app.state.included_count(), 2);
    }

    #[test]
    fn test_names_follow_sorted_map_order() {
        let app = App::new(state_of(&["z.txt", "a.txt", "m.txt"]), "Test".to_string());
        assert_eq!(app.names, vec!["a.txt", "m.txt", "z.txt"]);
    }
}
