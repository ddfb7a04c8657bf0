//! Dashboard view: artifact status and navigation.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::styles::MedicalTheme;

/// Counts shown on the dashboard, captured once at startup.
pub struct DashboardState {
    /// Symptoms known to the lexicon
    pub symptom_count: usize,
    /// Keyword phrases in the lookup table
    pub keyword_count: usize,
    /// Weighted edges in the rule table
    pub rule_edges: usize,
    /// Trees in the loaded forest model
    pub tree_count: usize,
    /// Analyses completed this session
    pub analyses: usize,
}

/// Render the dashboard.
pub fn render_dashboard(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Status
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_header(f, chunks[0]);
    render_status(f, chunks[1], state);
    render_footer(f, chunks[2]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("VHT Triage Assistant", MedicalTheme::title()),
        Span::styled(
            " │ Childhood disease triage prototype",
            MedicalTheme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_status(f: &mut Frame, area: Rect, state: &DashboardState) {
    let lines = vec![
        Line::from(Span::styled("Loaded artifacts", MedicalTheme::subtitle())),
        Line::from(""),
        status_line("Symptom lexicon", format!("{} symptoms", state.symptom_count)),
        status_line(
            "Keyword lookup",
            format!("{} phrases (Luganda + English)", state.keyword_count),
        ),
        status_line("Rule table", format!("{} weighted edges", state.rule_edges)),
        status_line(
            "Classifier",
            format!("random forest, {} trees", state.tree_count),
        ),
        Line::from(""),
        status_line("Analyses this session", state.analyses.to_string()),
    ];

    let status = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(" Status ", MedicalTheme::focused()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(status, area);
}

fn status_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled("  ✓ ", MedicalTheme::success()),
        Span::styled(format!("{label}: "), MedicalTheme::text()),
        Span::styled(value, MedicalTheme::text_secondary()),
    ])
}

fn render_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("[N] ", MedicalTheme::key_hint()),
        Span::styled("New Analysis ", MedicalTheme::key_desc()),
        Span::styled("[Q] ", MedicalTheme::key_hint()),
        Span::styled("Quit", MedicalTheme::key_desc()),
    ]))
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
