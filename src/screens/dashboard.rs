/// Main dashboard screen
///
/// Holds what the list rows and the details pane currently display and
/// paints them. Navigation and background refresh both go through
/// `apply_result`, so a result looks the same whichever path delivered it.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::core::{FetchResult, MetricCatalog, MetricEntry, SanitizedError};
use crate::screens::viewport::WidthWarning;
use crate::utils::constants::*;
use crate::utils::AppConfig;
use crate::widgets::OkDialog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTone {
    Normal,
    Error,
}

/// Text and color flag of one list row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub primary: String,
    pub secondary: String,
    pub tone: RowTone,
}

impl RowView {
    fn persistent(entry: &MetricEntry) -> Self {
        Self {
            primary: entry.primary_text.to_string(),
            secondary: entry.description.to_string(),
            tone: RowTone::Normal,
        }
    }
}

/// What sits on top of the layout when the frame is drawn
#[derive(Debug, Clone, Copy)]
pub struct Overlays<'a> {
    pub error: Option<&'a SanitizedError>,
    pub width_warning: Option<&'a WidthWarning>,
}

pub struct Dashboard {
    rows: Vec<RowView>,
    details: String,
}

impl Dashboard {
    pub fn new(catalog: &MetricCatalog) -> Self {
        Self {
            rows: catalog.entries().iter().map(RowView::persistent).collect(),
            details: catalog
                .get(0)
                .map(|entry| entry.static_detail.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn rows(&self) -> &[RowView] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&RowView> {
        self.rows.get(index)
    }

    pub fn details(&self) -> &str {
        &self.details
    }

    /// Put a row back to its static description once it loses focus
    pub fn restore_row(&mut self, index: usize, entry: &MetricEntry) {
        if let Some(row) = self.rows.get_mut(index) {
            *row = RowView::persistent(entry);
        }
    }

    /// Show a fetch outcome. Failures only flag the row; the details pane
    /// keeps its last good content.
    pub fn apply_result(&mut self, index: usize, result: &FetchResult) {
        let Some(row) = self.rows.get_mut(index) else {
            return;
        };

        if result.error.is_some() {
            row.tone = RowTone::Error;
            return;
        }

        row.primary.clone_from(&result.primary_text);
        row.secondary.clone_from(&result.detail_text);
        row.tone = RowTone::Normal;
        self.details.clone_from(&result.detail_text);
    }

    /// Show a non-data entry's fixed text
    pub fn apply_static(&mut self, index: usize, entry: &MetricEntry) {
        self.apply_result(
            index,
            &FetchResult::ok(entry.primary_text, entry.static_detail),
        );
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        catalog: &MetricCatalog,
        config: &AppConfig,
        selected: usize,
        overlays: Overlays<'_>,
    ) {
        let area = frame.size();

        // Narrow terminal: the warning replaces the whole layout
        if let Some(warning) = overlays.width_warning {
            let message = warning.message();
            frame.render_widget(
                OkDialog::new(&message).title("Warning").accent(COLOR_SECONDARY),
                area,
            );
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(config.top_spacer_height),
                Constraint::Length(config.title_height),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Length(config.footer_height),
            ])
            .split(area);

        frame.render_widget(self.render_title(), rows[1]);
        self.render_columns(frame, rows[3], catalog, config, selected);
        frame.render_widget(self.render_footer(catalog, config), rows[5]);

        if let Some(err) = overlays.error {
            let message = err.to_string();
            frame.render_widget(
                OkDialog::new(&message).title("Error").accent(COLOR_ERROR),
                area,
            );
        }
    }

    fn render_title(&self) -> Paragraph<'static> {
        Paragraph::new(Line::from(vec![
            Span::styled(
                "⚡ current-state",
                Style::default().fg(COLOR_PRIMARY).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                " - System Information Dashboard",
                Style::default().fg(COLOR_TEXT),
            ),
        ]))
        .alignment(Alignment::Center)
    }

    fn render_footer(&self, catalog: &MetricCatalog, config: &AppConfig) -> Paragraph<'static> {
        let key_style = Style::default().fg(COLOR_PRIMARY);
        let text_style = Style::default().fg(COLOR_TEXT);

        let mut spans = vec![Span::styled(
            "Shortcuts:  ",
            Style::default().fg(COLOR_SECONDARY).add_modifier(Modifier::BOLD),
        )];
        for entry in catalog.entries() {
            spans.push(Span::styled(entry.shortcut.to_string(), key_style));
            spans.push(Span::styled(format!("={}  ", entry.label), text_style));
        }
        spans.push(Span::styled("↑↓", key_style));
        spans.push(Span::styled("=Navigate", text_style));
        spans.push(Span::styled(
            format!(
                "  | Layout:{}:{}",
                config.left_column_weight, config.right_column_weight
            ),
            text_style,
        ));

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_columns(
        &self,
        frame: &mut Frame,
        area: Rect,
        catalog: &MetricCatalog,
        config: &AppConfig,
        selected: usize,
    ) {
        let total = u32::from(config.left_column_weight) + u32::from(config.right_column_weight);
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(u32::from(config.left_column_weight), total),
                Constraint::Ratio(u32::from(config.right_column_weight), total),
            ])
            .split(area);

        let items: Vec<ListItem> = self
            .rows
            .iter()
            .zip(catalog.entries())
            .enumerate()
            .map(|(index, (row, entry))| Self::list_item(row, entry, index == selected))
            .collect();

        let mut state = ListState::default();
        state.select(Some(selected));
        frame.render_stateful_widget(List::new(items), cols[0], &mut state);

        let details = Paragraph::new(self.details.as_str())
            .block(Block::default().borders(Borders::ALL).title("Details"))
            .wrap(Wrap { trim: true });
        frame.render_widget(details, cols[1]);
    }

    fn list_item<'a>(row: &'a RowView, entry: &MetricEntry, selected: bool) -> ListItem<'a> {
        let primary_style = if selected {
            Style::default().fg(COLOR_SELECTED_TEXT).bg(COLOR_TEXT)
        } else {
            Style::default().fg(COLOR_TEXT)
        };
        let secondary_color = match (row.tone, selected) {
            (RowTone::Error, _) => COLOR_ERROR,
            (RowTone::Normal, true) => COLOR_ROW_SECONDARY_SELECTED,
            (RowTone::Normal, false) => COLOR_ROW_SECONDARY,
        };

        ListItem::new(vec![
            Line::from(vec![
                Span::styled(format!("({}) ", entry.shortcut), Style::default().fg(COLOR_PRIMARY)),
                Span::styled(row.primary.as_str(), primary_style),
            ]),
            Line::from(Span::styled(
                format!("    {}", row.secondary),
                Style::default().fg(secondary_color),
            )),
        ])
    }
}
