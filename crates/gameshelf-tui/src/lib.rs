// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use gameshelf_app::{
    AppCommand, AppEvent, AppState, CatalogLoad, Entry, LoadPhase, PAGE_SIZE, Pagination,
    format_address,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use std::io;
use std::time::Duration;
use time::OffsetDateTime;
use time::macros::format_description;

const GRID_COLUMNS: usize = 3;
const NO_COVER: &str = "[ NO COVER ]";

/// Side effects the controller needs from its host: the catalog fetch, the
/// address bar, and opening links.
pub trait AppRuntime {
    fn fetch_catalog(&mut self) -> Result<CatalogLoad>;
    fn current_address(&self) -> String;
    fn replace_address(&mut self, address: &str) -> Result<()>;
    fn open_link(&mut self, url: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Focus {
    #[default]
    Grid,
    Search,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewData {
    focus: Focus,
    search_input: String,
    cursor: usize,
    help_visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkKind {
    Play,
    Source,
}

/// Dispatches a command, then rewrites the address if the view changed.
pub fn apply_command<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    command: AppCommand,
) -> Vec<AppEvent> {
    let events = state.dispatch(command);
    if events.iter().any(AppEvent::changes_view) {
        sync_address(state, runtime);
    }
    events
}

/// Runs the load routine to completion: `BeginLoad` or `Retry`, then the
/// fetch, then the resulting success or failure transition.
pub fn load_catalog<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    command: AppCommand,
) -> Vec<AppEvent> {
    let mut events = apply_command(state, runtime, command);
    events.extend(complete_load(state, runtime));
    events
}

/// Performs the fetch for a state that is already `Loading`. Any other
/// phase is left alone so a second fetch never starts.
pub fn complete_load<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Vec<AppEvent> {
    if state.phase != LoadPhase::Loading {
        return Vec::new();
    }
    let command = match runtime.fetch_catalog() {
        Ok(load) => AppCommand::CatalogLoaded {
            load,
            address: runtime.current_address(),
        },
        Err(error) => AppCommand::LoadFailed(format!("{error:#}")),
    };
    apply_command(state, runtime, command)
}

fn sync_address<R: AppRuntime>(state: &mut AppState, runtime: &mut R) {
    let address = format_address(&state.view);
    tracing::debug!(%address, "replacing address");
    if let Err(error) = runtime.replace_address(&address) {
        tracing::warn!(error = %error, "address update failed");
        state.dispatch(AppCommand::SetStatus(format!(
            "address update failed: {error}"
        )));
    }
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    apply_command(state, runtime, AppCommand::BeginLoad);

    let mut result = Ok(());
    loop {
        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        // Draw the loading frame first, then block on the fetch.
        if state.phase == LoadPhase::Loading {
            complete_load(state, runtime);
            sync_search_input(state, &mut view_data);
            continue;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if !has_event {
            continue;
        }
        match event::read().context("read event") {
            Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                if handle_key_event(state, runtime, &mut view_data, key) {
                    break;
                }
            }
            Ok(_) => {}
            Err(error) => {
                result = Err(error);
                break;
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

/// The search box mirrors the restored query after a load.
fn sync_search_input(state: &AppState, view_data: &mut ViewData) {
    view_data.search_input = state.view.query.clone();
    view_data.cursor = 0;
}

/// Returns true when the app should quit.
fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    key: KeyEvent,
) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    if view_data.help_visible {
        view_data.help_visible = false;
        return false;
    }

    if view_data.focus == Focus::Search {
        handle_search_key(state, runtime, view_data, key);
        return false;
    }

    let command = match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('?') => {
            view_data.help_visible = true;
            return false;
        }
        KeyCode::Char('/') => {
            if state.is_ready() {
                view_data.focus = Focus::Search;
            }
            return false;
        }
        KeyCode::Char('r') => {
            if state.phase.is_failed() {
                apply_command(state, runtime, AppCommand::Retry);
            }
            return false;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            move_cursor(state, view_data, GRID_COLUMNS as isize);
            return false;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            move_cursor(state, view_data, -(GRID_COLUMNS as isize));
            return false;
        }
        KeyCode::Tab => {
            move_cursor(state, view_data, 1);
            return false;
        }
        KeyCode::BackTab => {
            move_cursor(state, view_data, -1);
            return false;
        }
        KeyCode::Char('o') | KeyCode::Enter => {
            open_selected(state, runtime, view_data, LinkKind::Play);
            return false;
        }
        KeyCode::Char('O') => {
            open_selected(state, runtime, view_data, LinkKind::Source);
            return false;
        }
        KeyCode::Esc => AppCommand::ClearStatus,
        KeyCode::Char('t') => AppCommand::NextTag,
        KeyCode::Char('T') => AppCommand::PrevTag,
        KeyCode::Char('s') => AppCommand::NextSort,
        KeyCode::Char('S') => AppCommand::PrevSort,
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('[') => AppCommand::PrevPage,
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(']') => AppCommand::NextPage,
        _ => return false,
    };

    let events = apply_command(state, runtime, command);
    if events.iter().any(AppEvent::changes_view) {
        view_data.cursor = 0;
    }
    false
}

fn handle_search_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            view_data.focus = Focus::Grid;
            return;
        }
        KeyCode::Backspace => {
            if view_data.search_input.pop().is_none() {
                return;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if view_data.search_input.is_empty() {
                return;
            }
            view_data.search_input.clear();
        }
        KeyCode::Char(ch) => view_data.search_input.push(ch),
        _ => return,
    }

    apply_command(
        state,
        runtime,
        AppCommand::SetQuery(view_data.search_input.clone()),
    );
    view_data.cursor = 0;
}

fn move_cursor(state: &AppState, view_data: &mut ViewData, delta: isize) {
    let len = state.derived().page_items().len();
    if len == 0 {
        view_data.cursor = 0;
        return;
    }
    let next = view_data.cursor as isize + delta;
    view_data.cursor = next.clamp(0, len as isize - 1) as usize;
}

fn open_selected<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &ViewData,
    kind: LinkKind,
) {
    let (title, target) = {
        let derived = state.derived();
        let Some(entry) = derived.page_items().get(view_data.cursor) else {
            return;
        };
        let target = match kind {
            LinkKind::Play => Some(entry.url.clone()),
            LinkKind::Source => entry.repo.clone(),
        };
        (entry.title.clone(), target)
    };

    let message = match target {
        None => format!("{title} has no source link"),
        Some(url) => match runtime.open_link(&url) {
            Ok(()) => format!("opened {url}"),
            Err(error) => {
                tracing::warn!(%url, error = %error, "open link failed");
                format!("open failed: {error}")
            }
        },
    };
    state.dispatch(AppCommand::SetStatus(message));
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let banner = banner_text(&state.phase);
    let featured = state.catalog.featured();

    let mut constraints = vec![Constraint::Length(4)];
    if banner.is_some() {
        constraints.push(Constraint::Length(4));
    }
    if featured.is_some() {
        constraints.push(Constraint::Length(8));
    }
    constraints.push(Constraint::Min(6));
    constraints.push(Constraint::Length(3));

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());
    let mut slot = 0;

    let controls = Paragraph::new(format!(
        "{}\n{}",
        controls_text(state, view_data),
        tag_options_text(state)
    ))
    .block(
        Block::default()
            .title("gameshelf")
            .borders(Borders::ALL)
            .border_style(focus_style(view_data.focus == Focus::Search)),
    );
    frame.render_widget(controls, layout[slot]);
    slot += 1;

    if let Some(text) = banner {
        let widget = Paragraph::new(text)
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true })
            .block(Block::default().title("error").borders(Borders::ALL));
        frame.render_widget(widget, layout[slot]);
        slot += 1;
    }

    if let Some(entry) = featured {
        let widget = Paragraph::new(featured_text(entry))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title("featured")
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Cyan)),
            );
        frame.render_widget(widget, layout[slot]);
        slot += 1;
    }

    render_grid(frame, layout[slot], state, view_data);
    slot += 1;

    let footer = Paragraph::new(footer_text(state))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, layout[slot]);

    if view_data.help_visible {
        let area = centered_rect(70, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_grid(frame: &mut ratatui::Frame<'_>, area: Rect, state: &AppState, view_data: &ViewData) {
    if state.phase == LoadPhase::Loading {
        let loading = Paragraph::new("loading catalog...")
            .block(Block::default().title("games").borders(Borders::ALL));
        frame.render_widget(loading, area);
        return;
    }

    let derived = state.derived();
    let items = derived.page_items();
    if items.is_empty() {
        let text = if state.is_ready() {
            "no games match the current search"
        } else {
            ""
        };
        let empty =
            Paragraph::new(text).block(Block::default().title("games").borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let rows = PAGE_SIZE.div_ceil(GRID_COLUMNS);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(area);

    for (index, entry) in items.iter().enumerate() {
        let row = index / GRID_COLUMNS;
        let column = index % GRID_COLUMNS;
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![
                Constraint::Ratio(1, GRID_COLUMNS as u32);
                GRID_COLUMNS
            ])
            .split(row_areas[row]);

        let selected = index == view_data.cursor;
        let card = Paragraph::new(card_text(entry))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(truncate_label(&entry.title, 40))
                    .borders(Borders::ALL)
                    .border_style(focus_style(selected)),
            );
        frame.render_widget(card, cells[column]);
    }
}

fn focus_style(active: bool) -> Style {
    if active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn controls_text(state: &AppState, view_data: &ViewData) -> String {
    let search = if view_data.focus == Focus::Search {
        format!("{}_", view_data.search_input)
    } else {
        state.view.query.clone()
    };
    format!(
        "search: [{search}]  tag: {}  sort: {}",
        state.view.tag.label(),
        state.view.sort.label()
    )
}

/// Every selectable tag, with the active one bracketed.
fn tag_options_text(state: &AppState) -> String {
    let options = state
        .catalog
        .tags()
        .options()
        .iter()
        .map(|option| {
            if *option == state.view.tag {
                format!("[{}]", option.label())
            } else {
                option.label().to_owned()
            }
        })
        .collect::<Vec<String>>()
        .join(" ");
    format!("tags: {options}")
}

fn banner_text(phase: &LoadPhase) -> Option<String> {
    match phase {
        LoadPhase::Failed { message } => Some(format!(
            "Could not load the game catalog ({message}). Press r to retry."
        )),
        _ => None,
    }
}

fn featured_text(entry: &Entry) -> String {
    let mut lines = vec![
        entry.title.clone(),
        entry.description.clone(),
        tag_line(entry),
        format!("Updated {}", format_date(entry.updated_at)),
        link_line(entry),
        cover_line(entry),
    ];
    lines.retain(|line| !line.is_empty());
    lines.join("\n")
}

fn card_text(entry: &Entry) -> String {
    let mut lines = vec![
        entry.description.clone(),
        tag_line(entry),
        format!("Updated {}", format_date(entry.updated_at)),
        link_line(entry),
        cover_line(entry),
    ];
    lines.retain(|line| !line.is_empty());
    lines.join("\n")
}

fn tag_line(entry: &Entry) -> String {
    entry
        .tags
        .iter()
        .map(|tag| format!("#{tag}"))
        .collect::<Vec<String>>()
        .join(" ")
}

fn link_line(entry: &Entry) -> String {
    match &entry.repo {
        Some(repo) => format!("play: {}  source: {repo}", entry.url),
        None => format!("play: {}", entry.url),
    }
}

fn cover_line(entry: &Entry) -> String {
    match &entry.cover {
        Some(cover) => format!("cover: {cover}"),
        None => NO_COVER.to_owned(),
    }
}

/// `Mar 4, 2025`; empty when the date cannot be formatted.
fn format_date(value: OffsetDateTime) -> String {
    value
        .format(format_description!(
            "[month repr:short] [day padding:none], [year]"
        ))
        .unwrap_or_default()
}

fn pagination_text(pagination: Pagination) -> String {
    let prev = if pagination.can_prev() { "< prev" } else { "  ----" };
    let next = if pagination.can_next() { "next >" } else { "----  " };
    format!("{prev}  {}  {next}", pagination.label())
}

fn footer_text(state: &AppState) -> String {
    let pagination = pagination_text(state.derived().pagination);
    match &state.status_line {
        Some(status) => format!("{pagination} | {status} | ? help"),
        None => format!("{pagination} | ? help"),
    }
}

fn truncate_label(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_owned();
    }
    let mut out = value
        .chars()
        .take(max_chars.saturating_sub(1))
        .collect::<String>();
    out.push('…');
    out
}

fn help_overlay_text() -> &'static str {
    "/        search (enter/esc to leave, ctrl+u clears)\n\
     t / T    next / previous tag\n\
     s / S    next / previous sort\n\
     h l [ ]  previous / next page\n\
     j k tab  move between cards\n\
     o enter  open game\n\
     O        open source repository\n\
     r        retry after a failed load\n\
     esc      clear the status line\n\
     q        quit"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

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
    use super::{
        AppRuntime, Focus, NO_COVER, ViewData, banner_text, card_text, complete_load,
        controls_text, featured_text, format_date, handle_key_event, load_catalog,
        pagination_text, tag_options_text, truncate_label,
    };
    use anyhow::{Result, anyhow};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use gameshelf_app::{
        AppCommand, AppEvent, AppState, Catalog, CatalogLoad, LoadPhase, Pagination, SortMode,
        TagFilter,
    };
    use gameshelf_testkit::{GameFaker, entry};
    use time::macros::datetime;

    #[derive(Debug, Default)]
    struct TestRuntime {
        catalog: Catalog,
        fail_with: Option<String>,
        fetch_count: usize,
        address: String,
        replaced: Vec<String>,
        opened: Vec<String>,
    }

    impl TestRuntime {
        fn with_catalog(catalog: Catalog) -> Self {
            Self {
                catalog,
                ..Self::default()
            }
        }
    }

    impl AppRuntime for TestRuntime {
        fn fetch_catalog(&mut self) -> Result<CatalogLoad> {
            self.fetch_count += 1;
            if let Some(message) = &self.fail_with {
                return Err(anyhow!("{message}"));
            }
            Ok(CatalogLoad {
                catalog: self.catalog.clone(),
                dropped: Vec::new(),
            })
        }

        fn current_address(&self) -> String {
            self.address.clone()
        }

        fn replace_address(&mut self, address: &str) -> Result<()> {
            self.address = address.to_owned();
            self.replaced.push(address.to_owned());
            Ok(())
        }

        fn open_link(&mut self, url: &str) -> Result<()> {
            self.opened.push(url.to_owned());
            Ok(())
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(
        state: &mut AppState,
        runtime: &mut TestRuntime,
        view_data: &mut ViewData,
        keys: &[KeyEvent],
    ) {
        for key in keys {
            let _ = handle_key_event(state, runtime, view_data, *key);
        }
    }

    fn loaded(count: usize, address: &str) -> (AppState, TestRuntime) {
        let mut runtime = TestRuntime::with_catalog(Catalog::new(GameFaker::new(5).entries(count)));
        runtime.address = address.to_owned();
        let mut state = AppState::default();
        load_catalog(&mut state, &mut runtime, AppCommand::BeginLoad);
        (state, runtime)
    }

    #[test]
    fn load_restores_view_and_writes_address() {
        let (state, runtime) = loaded(20, "?q=&sort=popular&page=9");
        assert!(state.is_ready());
        assert_eq!(state.view.sort, SortMode::Popular);
        assert_eq!(state.view.page, 3);
        assert_eq!(runtime.address, "?q=&sort=popular&page=3");
        assert_eq!(runtime.fetch_count, 1);
    }

    #[test]
    fn failed_fetch_shows_banner_and_retry_refetches() {
        let mut runtime = TestRuntime {
            fail_with: Some("connection refused".to_owned()),
            ..TestRuntime::default()
        };
        let mut state = AppState::default();
        let events = load_catalog(&mut state, &mut runtime, AppCommand::BeginLoad);

        assert!(state.phase.is_failed());
        assert!(events.iter().any(|event| matches!(event, AppEvent::LoadFailed(_))));
        assert!(state.derived().page_items().is_empty());
        assert!(runtime.replaced.is_empty());
        let banner = banner_text(&state.phase).expect("banner should be visible");
        assert!(banner.contains("connection refused"));
        assert!(banner.contains("retry"));

        runtime.fail_with = None;
        runtime.catalog = Catalog::new(GameFaker::new(1).entries(4));
        let mut view_data = ViewData::default();
        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Char('r'))]);
        assert_eq!(state.phase, LoadPhase::Loading);

        complete_load(&mut state, &mut runtime);
        assert!(state.is_ready());
        assert_eq!(runtime.fetch_count, 2);
        assert!(banner_text(&state.phase).is_none());
        assert_eq!(state.derived().page_items().len(), 4);
    }

    #[test]
    fn retry_key_is_ignored_when_ready() {
        let (mut state, mut runtime) = loaded(3, "");
        let mut view_data = ViewData::default();
        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Char('r'))]);
        assert!(state.is_ready());
        assert!(complete_load(&mut state, &mut runtime).is_empty());
        assert_eq!(runtime.fetch_count, 1);
    }

    #[test]
    fn typing_in_search_filters_on_every_keystroke() {
        let catalog = Catalog::new(vec![
            entry("Zelda Tribute", &["rpg"], 1, 5.0),
            entry("Kart Rush", &["racing"], 2, 9.0),
            entry("Mini zelda", &["puzzle"], 3, 1.0),
        ]);
        let mut runtime = TestRuntime::with_catalog(catalog);
        let mut state = AppState::default();
        load_catalog(&mut state, &mut runtime, AppCommand::BeginLoad);

        let mut view_data = ViewData::default();
        press(
            &mut state,
            &mut runtime,
            &mut view_data,
            &[
                key(KeyCode::Char('/')),
                key(KeyCode::Char('Z')),
                key(KeyCode::Char('e')),
            ],
        );
        assert_eq!(view_data.focus, Focus::Search);
        assert_eq!(state.view.query, "Ze");
        assert_eq!(state.derived().filtered.len(), 2);
        assert_eq!(runtime.address, "?q=Ze");

        press(
            &mut state,
            &mut runtime,
            &mut view_data,
            &[key(KeyCode::Backspace), key(KeyCode::Backspace), key(KeyCode::Enter)],
        );
        assert_eq!(view_data.focus, Focus::Grid);
        assert_eq!(state.view.query, "");
        assert_eq!(state.derived().filtered.len(), 3);
    }

    #[test]
    fn search_input_is_trimmed_into_state() {
        let (mut state, mut runtime) = loaded(5, "");
        let mut view_data = ViewData::default();
        press(
            &mut state,
            &mut runtime,
            &mut view_data,
            &[key(KeyCode::Char('/')), key(KeyCode::Char(' '))],
        );
        assert_eq!(view_data.search_input, " ");
        assert_eq!(state.view.query, "");
    }

    #[test]
    fn pagination_keys_move_and_clamp() {
        let (mut state, mut runtime) = loaded(20, "");
        let mut view_data = ViewData::default();

        press(
            &mut state,
            &mut runtime,
            &mut view_data,
            &[key(KeyCode::Right), key(KeyCode::Char('l')), key(KeyCode::Char(']'))],
        );
        assert_eq!(state.view.page, 3);
        assert_eq!(runtime.address, "?q=&page=3");

        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Left)]);
        assert_eq!(state.view.page, 2);

        press(
            &mut state,
            &mut runtime,
            &mut view_data,
            &[key(KeyCode::Char('h')), key(KeyCode::Char('['))],
        );
        assert_eq!(state.view.page, 1);
        assert_eq!(runtime.address, "?q=");
    }

    #[test]
    fn tag_and_sort_keys_reset_page() {
        let (mut state, mut runtime) = loaded(20, "?page=2");
        let mut view_data = ViewData::default();

        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Char('s'))]);
        assert_eq!(state.view.sort, SortMode::Popular);
        assert_eq!(state.view.page, 1);

        press(
            &mut state,
            &mut runtime,
            &mut view_data,
            &[key(KeyCode::Right), key(KeyCode::Char('t'))],
        );
        assert_ne!(state.view.tag, TagFilter::All);
        assert_eq!(state.view.page, 1);
        assert!(runtime.address.contains("tag="));
        assert!(runtime.address.contains("sort=popular"));
    }

    #[test]
    fn open_keys_use_selected_card() {
        let mut with_repo = entry("Alpha", &["arcade"], 0, 1.0);
        with_repo.repo = Some("https://github.com/example/alpha".to_owned());
        let catalog = Catalog::new(vec![with_repo, entry("Beta", &["arcade"], 1, 1.0)]);
        let mut runtime = TestRuntime::with_catalog(catalog);
        let mut state = AppState::default();
        load_catalog(&mut state, &mut runtime, AppCommand::BeginLoad);

        let mut view_data = ViewData::default();
        press(
            &mut state,
            &mut runtime,
            &mut view_data,
            &[key(KeyCode::Char('O')), key(KeyCode::Tab), key(KeyCode::Char('o'))],
        );
        assert_eq!(
            runtime.opened,
            vec![
                "https://github.com/example/alpha".to_owned(),
                "https://play.gameshelf.dev/beta/".to_owned(),
            ]
        );

        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Char('O'))]);
        assert_eq!(state.status_line.as_deref(), Some("Beta has no source link"));
    }

    #[test]
    fn cursor_stays_within_page() {
        let (mut state, mut runtime) = loaded(4, "");
        let mut view_data = ViewData::default();
        press(
            &mut state,
            &mut runtime,
            &mut view_data,
            &[key(KeyCode::Down), key(KeyCode::Down)],
        );
        assert_eq!(view_data.cursor, 3);
        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Up), key(KeyCode::Up)]);
        assert_eq!(view_data.cursor, 0);
    }

    #[test]
    fn quit_keys() {
        let (mut state, mut runtime) = loaded(1, "");
        let mut view_data = ViewData::default();
        assert!(handle_key_event(
            &mut state,
            &mut runtime,
            &mut view_data,
            key(KeyCode::Char('q'))
        ));
        assert!(handle_key_event(
            &mut state,
            &mut runtime,
            &mut view_data,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
        ));
    }

    #[test]
    fn help_overlay_swallows_next_key() {
        let (mut state, mut runtime) = loaded(20, "");
        let mut view_data = ViewData::default();
        press(
            &mut state,
            &mut runtime,
            &mut view_data,
            &[key(KeyCode::Char('?')), key(KeyCode::Right)],
        );
        assert!(!view_data.help_visible);
        assert_eq!(state.view.page, 1);
    }

    #[test]
    fn controls_show_labels() {
        let (mut state, _runtime) = loaded(3, "");
        state.view.query = "kart".to_owned();
        let text = controls_text(&state, &ViewData::default());
        assert_eq!(text, "search: [kart]  tag: All  sort: recently updated");
    }

    #[test]
    fn pagination_text_marks_disabled_buttons() {
        let first = pagination_text(Pagination {
            page: 1,
            total_pages: 3,
        });
        assert!(first.contains("Page 1 of 3"));
        assert!(!first.contains("< prev"));
        assert!(first.contains("next >"));

        let only = pagination_text(Pagination {
            page: 1,
            total_pages: 1,
        });
        assert!(!only.contains("< prev"));
        assert!(!only.contains("next >"));
    }

    #[test]
    fn tag_options_bracket_the_selection() {
        let catalog = Catalog::new(vec![
            entry("Runner", &["arcade"], 1, 1.0),
            entry("Maze", &["puzzle", "arcade"], 2, 1.0),
        ]);
        let mut runtime = TestRuntime::with_catalog(catalog);
        let mut state = AppState::default();
        load_catalog(&mut state, &mut runtime, AppCommand::BeginLoad);
        assert_eq!(tag_options_text(&state), "tags: [All] arcade puzzle");

        let mut view_data = ViewData::default();
        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Char('T'))]);
        assert_eq!(tag_options_text(&state), "tags: All arcade [puzzle]");
    }

    #[test]
    fn escape_clears_status_line() {
        let (mut state, mut runtime) = loaded(3, "");
        assert_eq!(state.status_line.as_deref(), Some("3 games loaded"));
        let mut view_data = ViewData::default();
        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Esc)]);
        assert_eq!(state.status_line, None);
    }

    #[test]
    fn cards_show_placeholder_without_cover() {
        let mut game = entry("Maze", &["puzzle", "retro"], 0, 1.0);
        game.updated_at = datetime!(2025-03-04 10:00 UTC);
        let text = card_text(&game);
        assert!(text.contains("Updated Mar 4, 2025"));
        assert!(text.contains(NO_COVER));
        assert!(text.contains("#puzzle #retro"));

        game.cover = Some("assets/maze.png".to_owned());
        assert!(card_text(&game).contains("cover: assets/maze.png"));
    }

    #[test]
    fn featured_text_includes_date_and_links() {
        let mut game = entry("Orbit", &["arcade"], 0, 1.0);
        game.updated_at = datetime!(2025-03-04 10:00 UTC);
        game.repo = Some("https://github.com/example/orbit".to_owned());
        let text = featured_text(&game);
        assert!(text.starts_with("Orbit\n"));
        assert!(text.contains("Updated Mar 4, 2025"));
        assert!(text.contains("source: https://github.com/example/orbit"));
    }

    #[test]
    fn format_date_is_short_month() {
        assert_eq!(format_date(datetime!(2024-12-25 23:00 UTC)), "Dec 25, 2024");
    }

    #[test]
    fn truncate_label_adds_ellipsis() {
        assert_eq!(truncate_label("short", 10), "short");
        assert_eq!(truncate_label("abcdefghijkl", 5), "abcd…");
    }
}
