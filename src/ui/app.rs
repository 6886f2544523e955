//! Application state and TUI event loop.
//!
//! Holds the canonical forest and the current query, re-running the
//! filter engine on every keystroke or filter change and re-rendering
//! from its output. Expand/collapse goes through the
//! [`NodeStateStore`], so duplicate name+version nodes move together.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::parser::{DependencyKind, Ecosystem};
use crate::query::{filter_forest, FilterOptions};
use crate::tree::{DependencyNode, NodeStateStore, Severity};

use super::rows::{flatten_forest, VisibleRow};

/// Scroll window over the row list, so large forests only render the
/// visible slice.
#[derive(Debug, Default, Clone)]
pub struct ScrollState {
    /// First visible row index
    pub offset: usize,
    /// Number of visible rows in the viewport
    pub viewport_height: usize,
}

impl ScrollState {
    /// Update offset so the selection stays inside the viewport.
    pub fn ensure_visible(&mut self, selected: usize, total: usize) {
        if total == 0 || self.viewport_height == 0 {
            return;
        }

        if selected < self.offset {
            self.offset = selected;
        } else if selected >= self.offset + self.viewport_height {
            self.offset = selected.saturating_sub(self.viewport_height - 1);
        }
    }

    /// The currently visible row range.
    pub fn visible_range(&self, total: usize) -> (usize, usize) {
        if total == 0 || self.viewport_height == 0 {
            return (0, 0);
        }
        let start = self.offset.min(total.saturating_sub(1));
        let end = (start + self.viewport_height).min(total);
        (start, end)
    }
}

/// Application state
pub struct App {
    /// The canonical dependency forest
    pub forest: Vec<DependencyNode>,
    /// Ecosystem of the loaded manifest
    pub ecosystem: Ecosystem,
    /// Name of the loaded manifest file
    pub file_name: String,
    /// Expand/collapse state store
    pub state: NodeStateStore,
    /// Current filter view of the forest
    pub filtered: Vec<DependencyNode>,
    /// Flattened rows for rendering
    pub rows: Vec<VisibleRow>,
    /// Whether search input mode is active
    pub search_active: bool,
    /// Current search query
    pub search_query: String,
    /// Structured filter options
    pub options: FilterOptions,
    /// Currently selected row index
    pub selected_index: usize,
    /// Whether the application should quit
    pub should_quit: bool,
    /// Scroll window state
    pub scroll: ScrollState,
    /// List state for ratatui
    list_state: ListState,
}

impl App {
    /// Create a new application for a parsed and normalized forest.
    pub fn new(forest: Vec<DependencyNode>, ecosystem: Ecosystem, file_name: String) -> Self {
        let mut app = Self {
            forest,
            ecosystem,
            file_name,
            state: NodeStateStore::new(),
            filtered: Vec::new(),
            rows: Vec::new(),
            search_active: false,
            search_query: String::new(),
            options: FilterOptions::default(),
            selected_index: 0,
            should_quit: false,
            scroll: ScrollState::default(),
            list_state: ListState::default(),
        };
        app.refresh();
        app.list_state.select(Some(0));
        app
    }

    /// Re-run the query engine and rebuild the visible rows.
    ///
    /// Called on every search keystroke and filter change.
    pub fn refresh(&mut self) {
        self.filtered = filter_forest(&self.forest, &self.search_query, &self.options);
        self.rows = flatten_forest(&self.filtered);

        if !self.rows.is_empty() && self.selected_index >= self.rows.len() {
            self.selected_index = self.rows.len() - 1;
        }
        self.list_state.select(Some(self.selected_index));
    }

    /// Move selection to the next row.
    pub fn select_next(&mut self) {
        if !self.rows.is_empty() {
            self.selected_index = (self.selected_index + 1).min(self.rows.len() - 1);
            self.after_selection_change();
        }
    }

    /// Move selection to the previous row.
    pub fn select_previous(&mut self) {
        if !self.rows.is_empty() && self.selected_index > 0 {
            self.selected_index -= 1;
            self.after_selection_change();
        }
    }

    /// Move selection down by a page.
    pub fn page_down(&mut self) {
        if !self.rows.is_empty() {
            let page = self.scroll.viewport_height.max(1);
            self.selected_index = (self.selected_index + page).min(self.rows.len() - 1);
            self.after_selection_change();
        }
    }

    /// Move selection up by a page.
    pub fn page_up(&mut self) {
        if !self.rows.is_empty() {
            let page = self.scroll.viewport_height.max(1);
            self.selected_index = self.selected_index.saturating_sub(page);
            self.after_selection_change();
        }
    }

    /// Jump to the first row.
    pub fn select_first(&mut self) {
        if !self.rows.is_empty() {
            self.selected_index = 0;
            self.scroll.offset = 0;
            self.list_state.select(Some(0));
        }
    }

    /// Jump to the last row.
    pub fn select_last(&mut self) {
        if !self.rows.is_empty() {
            self.selected_index = self.rows.len() - 1;
            self.after_selection_change();
        }
    }

    fn after_selection_change(&mut self) {
        self.list_state.select(Some(self.selected_index));
        self.scroll
            .ensure_visible(self.selected_index, self.rows.len());
    }

    /// Toggle expansion of the selected row on the canonical forest.
    pub fn toggle_selected(&mut self) {
        if let Some(row) = self.rows.get(self.selected_index) {
            let (name, version) = (row.name.clone(), row.version.clone());
            self.state.toggle(&mut self.forest, &name, &version);
            self.refresh();
        }
    }

    /// Expand every node in the forest.
    pub fn expand_all(&mut self) {
        self.state.expand_all(&mut self.forest);
        self.refresh();
    }

    /// Collapse every node in the forest.
    pub fn collapse_all(&mut self) {
        self.state.collapse_all(&mut self.forest);
        self.refresh();
    }

    /// Start search input mode.
    pub fn start_search(&mut self) {
        self.search_active = true;
        self.search_query.clear();
        self.refresh();
    }

    /// Clear search and return to normal mode.
    pub fn clear_search(&mut self) {
        self.search_active = false;
        self.search_query.clear();
        self.selected_index = 0;
        self.refresh();
    }

    /// Add a character to the search query.
    pub fn search_push(&mut self, c: char) {
        self.search_query.push(c);
        self.selected_index = 0;
        self.refresh();
    }

    /// Remove the last character from the search query.
    pub fn search_pop(&mut self) {
        self.search_query.pop();
        self.refresh();
    }

    /// Toggle a kind in the kind filter.
    pub fn toggle_kind_filter(&mut self, kind: DependencyKind) {
        self.options.toggle_kind(kind);
        self.refresh();
    }

    /// Toggle the outdated-only filter.
    pub fn toggle_outdated_filter(&mut self) {
        self.options.show_outdated_only = !self.options.show_outdated_only;
        self.refresh();
    }

    /// Toggle the vulnerabilities-only filter.
    pub fn toggle_vulnerability_filter(&mut self) {
        self.options.show_with_vulnerabilities_only =
            !self.options.show_with_vulnerabilities_only;
        self.refresh();
    }

    /// Cycle the version constraint mode.
    pub fn cycle_version_mode(&mut self) {
        self.options.version_constraint_mode = self.options.version_constraint_mode.next();
        self.refresh();
    }

    /// Reset all structured filters to defaults.
    pub fn clear_filters(&mut self) {
        self.options = FilterOptions::default();
        self.refresh();
    }

    /// Signal that the application should quit.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// The node behind the selected row, looked up in the filtered
    /// forest.
    fn selected_node(&self) -> Option<&DependencyNode> {
        let row = self.rows.get(self.selected_index)?;
        find_node(&self.filtered, &row.name, &row.version)
    }
}

fn find_node<'a>(
    nodes: &'a [DependencyNode],
    name: &str,
    version: &str,
) -> Option<&'a DependencyNode> {
    for node in nodes {
        if node.name == name && node.version == version {
            return Some(node);
        }
        if let Some(found) = find_node(&node.children, name, version) {
            return Some(found);
        }
    }
    None
}

/// Get the color for a dependency kind.
fn kind_color(kind: DependencyKind) -> Color {
    match kind {
        DependencyKind::Production => Color::Green,
        DependencyKind::Development => Color::Yellow,
        DependencyKind::Peer => Color::Cyan,
        DependencyKind::Optional => Color::Gray,
    }
}

/// Get the short indicator for a dependency kind.
fn kind_indicator(kind: DependencyKind) -> &'static str {
    match kind {
        DependencyKind::Production => "[P] ",
        DependencyKind::Development => "[D] ",
        DependencyKind::Peer => "[Pe] ",
        DependencyKind::Optional => "[O] ",
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Low => Color::Yellow,
        Severity::Moderate => Color::Rgb(255, 165, 0),
        Severity::High => Color::Red,
        Severity::Critical => Color::Magenta,
    }
}

/// Run the TUI application
pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                if app.search_active {
                    match key.code {
                        KeyCode::Esc => app.clear_search(),
                        KeyCode::Enter => app.search_active = false,
                        KeyCode::Backspace => app.search_pop(),
                        KeyCode::Char(c) => app.search_push(c),
                        KeyCode::Down | KeyCode::Tab => app.select_next(),
                        KeyCode::Up | KeyCode::BackTab => app.select_previous(),
                        _ => {}
                    }
                } else {
                    match key.code {
                        KeyCode::Char('q') => app.quit(),
                        KeyCode::Esc => {
                            if !app.search_query.is_empty() {
                                app.clear_search();
                            } else {
                                app.quit();
                            }
                        }
                        KeyCode::Char('/') => app.start_search(),
                        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
                        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
                        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected(),
                        KeyCode::Char('e') => app.expand_all(),
                        KeyCode::Char('c') => app.collapse_all(),
                        KeyCode::Char('1') => app.toggle_kind_filter(DependencyKind::Production),
                        KeyCode::Char('2') => app.toggle_kind_filter(DependencyKind::Development),
                        KeyCode::Char('3') => app.toggle_kind_filter(DependencyKind::Peer),
                        KeyCode::Char('4') => app.toggle_kind_filter(DependencyKind::Optional),
                        KeyCode::Char('o') => app.toggle_outdated_filter(),
                        KeyCode::Char('v') => app.toggle_vulnerability_filter(),
                        KeyCode::Char('m') => app.cycle_version_mode(),
                        KeyCode::Char('x') => app.clear_filters(),
                        KeyCode::PageDown | KeyCode::Char('d') => app.page_down(),
                        KeyCode::PageUp | KeyCode::Char('u') => app.page_up(),
                        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
                        KeyCode::End | KeyCode::Char('G') => app.select_last(),
                        _ => {}
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Render the application UI
fn render(frame: &mut Frame, app: &mut App) {
    let show_search = app.search_active || !app.search_query.is_empty();

    let constraints = if show_search {
        vec![
            Constraint::Length(3), // Header
            Constraint::Length(3), // Search bar
            Constraint::Min(0),    // Main area
            Constraint::Length(3), // Footer
        ]
    } else {
        vec![
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ]
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    let (main_area, footer_area) = if show_search {
        render_header(frame, app, chunks[0]);
        render_search_bar(frame, app, chunks[1]);
        (chunks[2], chunks[3])
    } else {
        render_header(frame, app, chunks[0]);
        (chunks[1], chunks[2])
    };

    // Tree on the left, details for the selected node on the right
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(44)])
        .split(main_area);

    render_tree(frame, app, main_chunks[0]);
    render_details(frame, app, main_chunks[1]);
    render_footer(frame, app, footer_area);
}

/// Render the header with file and filter summary
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let total: usize = app.forest.iter().map(|n| n.subtree_len()).sum();
    let mut spans = vec![
        Span::styled(
            "depviz",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "  {} ({})  {} dependencies",
            app.file_name, app.ecosystem, total
        )),
    ];

    if !app.options.is_unconstrained() {
        let mut active = Vec::new();
        if !app.options.dependency_kinds.is_empty() {
            let mut kinds: Vec<&str> = app
                .options
                .dependency_kinds
                .iter()
                .map(|k| k.label())
                .collect();
            kinds.sort_unstable();
            active.push(format!("kind={}", kinds.join("+")));
        }
        if app.options.show_outdated_only {
            active.push("outdated".to_string());
        }
        if app.options.show_with_vulnerabilities_only {
            active.push("vulnerable".to_string());
        }
        if app.options.version_constraint_mode != Default::default() {
            active.push(format!(
                "version={}",
                app.options.version_constraint_mode.label()
            ));
        }
        spans.push(Span::styled(
            format!("  [filters: {}]", active.join(", ")),
            Style::default().fg(Color::Yellow),
        ));
    }

    let header =
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

/// Render the search bar
fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (border_color, title) = if app.search_active {
        (Color::Yellow, "Search (Enter to confirm, Esc to cancel)")
    } else {
        (Color::Gray, "Filter (/ to edit, Esc to clear)")
    };

    let search_display = format!("/{}", app.search_query);
    let cursor = if app.search_active { "_" } else { "" };

    let result_count = if !app.search_query.is_empty() {
        format!(" ({} matches)", app.rows.len())
    } else {
        String::new()
    };

    let content = Line::from(vec![
        Span::styled(search_display, Style::default().fg(Color::White)),
        Span::styled(
            cursor,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::SLOW_BLINK),
        ),
        Span::styled(result_count, Style::default().fg(Color::DarkGray)),
    ]);

    let search_bar = Paragraph::new(content).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(search_bar, area);
}

/// Render the dependency tree, windowed to the visible rows.
fn render_tree(frame: &mut Frame, app: &mut App, area: Rect) {
    let has_search = !app.search_query.is_empty();
    let search_query = app.search_query.clone();
    let total_rows = app.rows.len();

    let viewport_height = (area.height as usize).saturating_sub(2);
    app.scroll.viewport_height = viewport_height;
    app.scroll.ensure_visible(app.selected_index, total_rows);
    let (start_idx, end_idx) = app.scroll.visible_range(total_rows);

    let items: Vec<ListItem> = app.rows[start_idx..end_idx]
        .iter()
        .map(|row| {
            let indent = "  ".repeat(row.depth);
            let color = kind_color(row.kind);

            let name_spans = if has_search {
                highlight_substring(&row.name, &search_query, color)
            } else {
                vec![Span::styled(row.name.clone(), Style::default().fg(color))]
            };

            let mut spans = vec![
                Span::raw(indent),
                Span::styled(
                    row.expansion_indicator(),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(kind_indicator(row.kind), Style::default().fg(color)),
            ];
            spans.extend(name_spans);
            spans.push(Span::styled(
                format!(" @{}", row.version),
                Style::default().fg(Color::DarkGray),
            ));

            if let Some(latest) = row
                .latest_version
                .as_ref()
                .filter(|l| *l != &row.version)
            {
                spans.push(Span::styled(
                    format!(" → {}", latest),
                    Style::default().fg(Color::Rgb(255, 165, 0)),
                ));
            }
            if let Some(severity) = row.max_severity {
                spans.push(Span::styled(
                    format!(" [{}]", severity.label()),
                    Style::default()
                        .fg(severity_color(severity))
                        .add_modifier(Modifier::BOLD),
                ));
            }
            if row.has_version_conflict {
                spans.push(Span::styled(
                    " [~]",
                    Style::default().fg(Color::Rgb(255, 165, 0)),
                ));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    let relative_selection = app.selected_index.saturating_sub(start_idx);
    app.list_state.select(Some(relative_selection));

    let title = if has_search {
        format!("Dependencies (filtered: {} rows)", total_rows)
    } else if total_rows > viewport_height {
        format!(
            "Dependencies ({}-{} of {})",
            start_idx + 1,
            end_idx,
            total_rows
        )
    } else {
        format!("Dependencies ({})", total_rows)
    };

    let tree_list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Gray)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("► ");

    frame.render_stateful_widget(tree_list, area, &mut app.list_state);
}

/// Render the details panel for the selected node
fn render_details(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    if let Some(node) = app.selected_node() {
        let field = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(
                    format!("{}: ", label),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(value),
            ])
        };

        lines.push(field("Name", node.name.clone()));
        lines.push(field("Version", node.version.clone()));
        lines.push(field("Kind", node.kind.to_string()));
        if let Some(latest) = &node.latest_version {
            lines.push(field("Latest", latest.clone()));
        }
        if let Some(license) = &node.license {
            lines.push(field("License", license.clone()));
        }
        if let Some(repo) = &node.repository_url {
            lines.push(field("Repository", repo.clone()));
        }
        if let Some(homepage) = &node.homepage {
            lines.push(field("Homepage", homepage.clone()));
        }
        if node.has_version_conflict {
            lines.push(Line::from(Span::styled(
                "Declared with conflicting versions",
                Style::default().fg(Color::Rgb(255, 165, 0)),
            )));
        }
        for vuln in &node.vulnerabilities {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("[{}] ", vuln.severity.label()),
                    Style::default()
                        .fg(severity_color(vuln.severity))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(vuln.title.clone()),
            ]));
            if let Some(url) = &vuln.url {
                lines.push(Line::from(Span::styled(
                    format!("  {}", url),
                    Style::default().fg(Color::Blue),
                )));
            }
        }
    } else {
        lines.push(Line::from(Span::styled(
            "No selection",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let details = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Details").borders(Borders::ALL));
    frame.render_widget(details, area);
}

/// Highlight case-insensitive occurrences of the query in a name.
fn highlight_substring(text: &str, query: &str, base_color: Color) -> Vec<Span<'static>> {
    if query.is_empty() {
        return vec![Span::styled(
            text.to_string(),
            Style::default().fg(base_color),
        )];
    }

    let text_lower = text.to_lowercase();
    let query_lower = query.to_lowercase();
    let mut spans = Vec::new();
    let mut pos = 0;

    while let Some(found) = text_lower[pos..].find(&query_lower) {
        let start = pos + found;
        let end = start + query_lower.len();
        if start > pos {
            spans.push(Span::styled(
                text[pos..start].to_string(),
                Style::default().fg(base_color),
            ));
        }
        spans.push(Span::styled(
            text[start..end].to_string(),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        ));
        pos = end;
    }
    if pos < text.len() {
        spans.push(Span::styled(
            text[pos..].to_string(),
            Style::default().fg(base_color),
        ));
    }

    spans
}

/// Render the footer with help text and legend
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = if app.search_active {
        Line::from(vec![
            Span::styled("Type", Style::default().fg(Color::Yellow)),
            Span::raw(" to search  "),
            Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
            Span::raw(" Navigate  "),
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(" Confirm  "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(" Cancel"),
        ])
    } else {
        Line::from(vec![
            Span::styled("/", Style::default().fg(Color::Yellow)),
            Span::raw(" Search  "),
            Span::styled("j/k", Style::default().fg(Color::Yellow)),
            Span::raw(" Nav  "),
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(" Toggle  "),
            Span::styled("e/c", Style::default().fg(Color::Yellow)),
            Span::raw(" Expand/Collapse all  "),
            Span::styled("1-4", Style::default().fg(Color::Yellow)),
            Span::raw(" Kinds  "),
            Span::styled("o", Style::default().fg(Color::Yellow)),
            Span::raw(" Outdated  "),
            Span::styled("v", Style::default().fg(Color::Yellow)),
            Span::raw(" Vulnerable  "),
            Span::styled("m", Style::default().fg(Color::Yellow)),
            Span::raw(format!(
                " Version:{}  ",
                app.options.version_constraint_mode.label()
            )),
            Span::styled("x", Style::default().fg(Color::Yellow)),
            Span::raw(" Clear  "),
            Span::styled("q", Style::default().fg(Color::Yellow)),
            Span::raw(" Quit"),
        ])
    };

    let footer = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::StaticResolver;
    use crate::tree::normalize;
    use crate::parser::DependencyRecord;

    fn create_test_app() -> App {
        let records = vec![
            DependencyRecord::new("react", "^18.2.0", DependencyKind::Production),
            DependencyRecord::new("lodash", "^4.17.21", DependencyKind::Production),
            DependencyRecord::new("typescript", "5.0.0", DependencyKind::Development),
        ];
        let forest = normalize(&records, Ecosystem::Npm, &StaticResolver::default());
        App::new(forest, Ecosystem::Npm, "package.json".to_string())
    }

    #[test]
    fn test_app_creation() {
        let app = create_test_app();
        assert_eq!(app.selected_index, 0);
        assert!(!app.should_quit);
        // All roots collapsed: react's demo children are hidden
        assert_eq!(app.rows.len(), 3);
    }

    #[test]
    fn test_select_next_and_previous() {
        let mut app = create_test_app();

        app.select_next();
        assert_eq!(app.selected_index, 1);
        app.select_next();
        app.select_next();
        // Clamped at the last row
        assert_eq!(app.selected_index, 2);

        app.select_previous();
        assert_eq!(app.selected_index, 1);
        app.select_previous();
        app.select_previous();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_toggle_selected_expands_children() {
        let mut app = create_test_app();

        // react is selected; toggling reveals its two demo children
        app.toggle_selected();
        assert_eq!(app.rows.len(), 5);
        assert_eq!(app.rows[1].name, "react-dom");

        app.toggle_selected();
        assert_eq!(app.rows.len(), 3);
    }

    #[test]
    fn test_expand_and_collapse_all() {
        let mut app = create_test_app();

        app.expand_all();
        assert_eq!(app.rows.len(), 5);
        assert!(app.forest[0].is_expanded);

        app.collapse_all();
        assert_eq!(app.rows.len(), 3);
    }

    #[test]
    fn test_search_filters_rows() {
        let mut app = create_test_app();
        app.start_search();
        for c in "lod".chars() {
            app.search_push(c);
        }

        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.rows[0].name, "lodash");

        app.clear_search();
        assert_eq!(app.rows.len(), 3);
    }

    #[test]
    fn test_search_keystroke_refreshes_each_time() {
        let mut app = create_test_app();
        app.start_search();

        // "t" matches react and typescript but not lodash
        app.search_push('t');
        assert_eq!(app.rows.len(), 2);

        // "ty" drops react's own match, but its "@types/react" child
        // still matches, so react stays visible as an ancestor
        app.search_push('y');
        assert_eq!(app.rows.len(), 2);
        assert!(app.rows.iter().any(|r| r.name == "react"));
        assert!(app.rows.iter().any(|r| r.name == "typescript"));

        // "typesc" outruns the child match too
        for c in "pesc".chars() {
            app.search_push(c);
        }
        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.rows[0].name, "typescript");

        app.search_pop();
        app.search_pop();
        app.search_pop();
        app.search_pop();
        assert_eq!(app.rows.len(), 2);
    }

    #[test]
    fn test_kind_filter_keys() {
        let mut app = create_test_app();

        app.toggle_kind_filter(DependencyKind::Development);
        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.rows[0].name, "typescript");

        app.toggle_kind_filter(DependencyKind::Development);
        assert_eq!(app.rows.len(), 3);
    }

    #[test]
    fn test_vulnerability_filter() {
        let mut app = create_test_app();

        app.toggle_vulnerability_filter();
        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.rows[0].name, "lodash");
    }

    #[test]
    fn test_clear_filters() {
        let mut app = create_test_app();
        app.toggle_outdated_filter();
        app.cycle_version_mode();
        assert!(!app.options.is_unconstrained());

        app.clear_filters();
        assert!(app.options.is_unconstrained());
        assert_eq!(app.rows.len(), 3);
    }

    #[test]
    fn test_selection_clamped_after_filter() {
        let mut app = create_test_app();
        app.select_last();
        assert_eq!(app.selected_index, 2);

        // Narrowing to one row pulls the selection back in range
        app.toggle_vulnerability_filter();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_selected_node_details() {
        let mut app = create_test_app();
        app.select_next();
        let node = app.selected_node().unwrap();
        assert_eq!(node.name, "lodash");
        assert_eq!(node.vulnerabilities.len(), 1);
    }

    #[test]
    fn test_duplicate_nodes_toggle_together_through_app() {
        let records = vec![
            DependencyRecord::new("x", "1.0.0", DependencyKind::Production),
            DependencyRecord::new("x", "1.0.0", DependencyKind::Peer),
        ];
        let forest = normalize(&records, Ecosystem::Pip, &StaticResolver::default());
        let mut app = App::new(forest, Ecosystem::Pip, "requirements.txt".to_string());

        app.toggle_selected();
        assert!(app.forest[0].is_expanded);
        assert!(app.forest[1].is_expanded);
    }

    #[test]
    fn test_quit() {
        let mut app = create_test_app();
        app.quit();
        assert!(app.should_quit);
    }

    #[test]
    fn test_scroll_ensure_visible() {
        let mut scroll = ScrollState {
            offset: 50,
            viewport_height: 10,
        };

        scroll.ensure_visible(40, 100);
        assert_eq!(scroll.offset, 40);

        scroll.offset = 0;
        scroll.ensure_visible(15, 100);
        assert!(scroll.offset > 0);
        assert!(scroll.offset + scroll.viewport_height > 15);
    }

    #[test]
    fn test_scroll_visible_range() {
        let scroll = ScrollState {
            offset: 0,
            viewport_height: 10,
        };

        assert_eq!(scroll.visible_range(100), (0, 10));
        assert_eq!(scroll.visible_range(5), (0, 5));
        assert_eq!(scroll.visible_range(0), (0, 0));
    }

    #[test]
    fn test_page_navigation() {
        let mut app = create_test_app();
        app.expand_all();
        app.scroll.viewport_height = 2;

        app.page_down();
        assert_eq!(app.selected_index, 2);

        app.page_up();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_highlight_substring() {
        let spans = highlight_substring("react-dom", "dom", Color::Green);
        // "react-" plain + "dom" highlighted
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].content, "react-");
        assert_eq!(spans[1].content, "dom");

        let spans = highlight_substring("React", "react", Color::Green);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "React");
    }
}
