//! Report view: fused diagnosis, risk tier, and explanation trail.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::{RiskLevel, TriageReport, DISEASES};
use crate::tui::styles::MedicalTheme;

/// Render one triage report.
pub fn render_report(f: &mut Frame, area: Rect, report: &TriageReport) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(5), // Diagnosis + risk
            Constraint::Min(8),    // Explanation trail
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_report_header(f, chunks[0], report);
    render_diagnosis(f, chunks[1], report);
    render_explanation(f, chunks[2], report);
    render_report_footer(f, chunks[3]);
}

fn render_report_header(f: &mut Frame, area: Rect, report: &TriageReport) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Triage Report", MedicalTheme::title()),
        Span::styled(
            format!(
                " │ {} │ {}",
                report.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
                &report.id[..8]
            ),
            MedicalTheme::text_muted(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_diagnosis(f: &mut Frame, area: Rect, report: &TriageReport) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Diagnosis: ", MedicalTheme::text()),
            Span::styled(
                report.final_prediction.to_uppercase(),
                MedicalTheme::success(),
            ),
        ]),
        Line::from(vec![
            Span::styled("Risk: ", MedicalTheme::text()),
            Span::styled(
                report.risk.to_string(),
                MedicalTheme::risk_level(report.risk),
            ),
            Span::styled(
                format!(" │ {}", report.risk.description()),
                MedicalTheme::text_secondary(),
            ),
        ]),
    ];

    if !report.danger_signs.is_empty() {
        lines.push(Line::from(Span::styled(
            format!(
                "⚠ DANGER SIGNS DETECTED: {}",
                report.danger_signs.join(", ")
            ),
            MedicalTheme::danger(),
        )));
    }

    let block_style = if report.risk == RiskLevel::High {
        MedicalTheme::danger()
    } else {
        MedicalTheme::border()
    };

    let p = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(block_style),
    );

    f.render_widget(p, area);
}

fn render_explanation(f: &mut Frame, area: Rect, report: &TriageReport) {
    let present: Vec<&str> = report.symptoms.present().collect();
    let symptoms_text = if present.is_empty() {
        "(none detected)".to_string()
    } else {
        present.join(", ")
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Symptoms: ", MedicalTheme::subtitle()),
            Span::styled(symptoms_text, MedicalTheme::text()),
        ]),
        Line::from(vec![
            Span::styled("Covariates: ", MedicalTheme::subtitle()),
            Span::styled(
                format!(
                    "age {} years, duration {} days",
                    report.covariates.age, report.covariates.duration
                ),
                MedicalTheme::text(),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled("Scores", MedicalTheme::subtitle())),
    ];

    for disease in DISEASES {
        let clf = report.clf_probs.get(disease).copied().unwrap_or(0.0);
        let rule = report.rule_scores.get(disease).copied().unwrap_or(0.0);
        let fused = report.final_scores.get(disease).copied().unwrap_or(0.0);
        let style = if disease == report.final_prediction {
            MedicalTheme::focused()
        } else {
            MedicalTheme::text_secondary()
        };
        lines.push(Line::from(Span::styled(
            format!(
                "  {disease:<10} classifier {:>5.1}%   rules {rule:.2}   fused {fused:.3}",
                clf * 100.0
            ),
            style,
        )));
    }

    lines.push(Line::from(vec![
        Span::styled("Classifier pick: ", MedicalTheme::text_secondary()),
        Span::styled(report.clf_prediction.clone(), MedicalTheme::info()),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Rules fired",
        MedicalTheme::subtitle(),
    )));

    if report.fired_rules.is_empty() {
        lines.push(Line::from(Span::styled(
            "  (no rules fired)",
            MedicalTheme::text_muted(),
        )));
    } else {
        for rule in &report.fired_rules {
            lines.push(Line::from(vec![
                Span::styled("  • ", MedicalTheme::info()),
                Span::styled(rule.clone(), MedicalTheme::text()),
            ]));
        }
    }

    let p = Paragraph::new(lines)
        .block(
            Block::default()
                .title(Span::styled(" Explanation ", MedicalTheme::focused()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(p, area);
}

fn render_report_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("[N] ", MedicalTheme::key_hint()),
        Span::styled("New Analysis ", MedicalTheme::key_desc()),
        Span::styled("[Enter/Esc] ", MedicalTheme::key_hint()),
        Span::styled("Dashboard", MedicalTheme::key_desc()),
    ]))
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
