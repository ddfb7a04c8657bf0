//! Symptom narrative entry form: free text plus preset test cases.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::MedicalTheme;

/// Fixed preset cases: the first entry is free-form entry, the rest are the
/// sample narratives shipped with the prototype.
pub const PRESET_CASES: [(&str, &str); 7] = [
    ("Free text entry", ""),
    (
        "Pneumonia (Fast Breathing)",
        "Omwana afuuya mangu era akyawa okukosora.",
    ),
    (
        "Malaria (Fever + Weakness)",
        "Omwana alina omusujja era alina obunafu.",
    ),
    (
        "Diarrhea Case",
        "Omwana alina endwadde y'ekidugavu era ali kusgala.",
    ),
    (
        "Danger Signs (Convulsions)",
        "Omwana alina obutonya obungi era tayinza kulya.",
    ),
    (
        "English Case (Malaria-like)",
        "The child has had a high fever for 3 days and is vomiting.",
    ),
    (
        "English Case (Pneumonia-like)",
        "The child is breathing very fast and coughing.",
    ),
];

/// Entry form state
pub struct EntryState {
    /// Current narrative text
    pub input: String,
    /// Selected preset index
    pub preset_index: usize,
    /// Warning or error shown in the footer
    pub message: Option<String>,
}

impl Default for EntryState {
    fn default() -> Self {
        Self {
            input: String::new(),
            preset_index: 0,
            message: None,
        }
    }
}

impl EntryState {
    /// Select the next preset and load its text.
    pub fn next_preset(&mut self) {
        self.preset_index = (self.preset_index + 1) % PRESET_CASES.len();
        self.load_preset();
    }

    /// Select the previous preset and load its text.
    pub fn prev_preset(&mut self) {
        if self.preset_index == 0 {
            self.preset_index = PRESET_CASES.len() - 1;
        } else {
            self.preset_index -= 1;
        }
        self.load_preset();
    }

    fn load_preset(&mut self) {
        self.input = PRESET_CASES[self.preset_index].1.to_string();
        self.message = None;
    }

    /// Append a character to the narrative.
    pub fn input_char(&mut self, c: char) {
        self.input.push(c);
        self.message = None;
    }

    /// Delete the last character.
    pub fn delete_char(&mut self) {
        self.input.pop();
    }

    /// Clear the narrative.
    pub fn clear(&mut self) {
        self.input.clear();
        self.message = None;
    }
}

/// Render the narrative entry form.
pub fn render_entry(f: &mut Frame, area: Rect, state: &EntryState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Preset selector
            Constraint::Min(5),    // Text input
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_entry_header(f, chunks[0]);
    render_preset_selector(f, chunks[1], state);
    render_text_input(f, chunks[2], state);
    render_entry_footer(f, chunks[3], state);
}

fn render_entry_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Symptom Entry", MedicalTheme::title()),
        Span::styled(
            " │ Luganda or English free text",
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

fn render_preset_selector(f: &mut Frame, area: Rect, state: &EntryState) {
    let (name, _) = PRESET_CASES[state.preset_index];
    let selector = Paragraph::new(Line::from(vec![
        Span::styled("Test case: ", MedicalTheme::text_secondary()),
        Span::styled("◀ ", MedicalTheme::key_hint()),
        Span::styled(format!(" {name} "), MedicalTheme::selected()),
        Span::styled(" ▶", MedicalTheme::key_hint()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(selector, area);
}

fn render_text_input(f: &mut Frame, area: Rect, state: &EntryState) {
    let block = Block::default()
        .title(Span::styled(" Symptoms ", MedicalTheme::focused()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());

    let content = if state.input.is_empty() {
        Line::from(Span::styled(
            "Describe the child's symptoms...",
            MedicalTheme::text_muted(),
        ))
    } else {
        Line::from(vec![
            Span::styled(state.input.as_str(), MedicalTheme::text()),
            Span::styled("▌", MedicalTheme::focused()),
        ])
    };

    let input = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(input, area);
}

fn render_entry_footer(f: &mut Frame, area: Rect, state: &EntryState) {
    let content = if let Some(message) = &state.message {
        Line::from(vec![
            Span::styled("! ", MedicalTheme::warning()),
            Span::styled(message.clone(), MedicalTheme::warning()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[◀▶] ", MedicalTheme::key_hint()),
            Span::styled("Test Case ", MedicalTheme::key_desc()),
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Analyze ", MedicalTheme::key_desc()),
            Span::styled("[Ctrl+U] ", MedicalTheme::key_hint()),
            Span::styled("Clear ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Back", MedicalTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_cycling_wraps() {
        let mut state = EntryState::default();
        for _ in 0..PRESET_CASES.len() {
            state.next_preset();
        }
        assert_eq!(state.preset_index, 0);
        assert!(state.input.is_empty());

        state.prev_preset();
        assert_eq!(state.preset_index, PRESET_CASES.len() - 1);
        assert_eq!(state.input, PRESET_CASES[PRESET_CASES.len() - 1].1);
    }

    #[test]
    fn test_editing_clears_message() {
        let mut state = EntryState {
            message: Some("warning".to_string()),
            ..EntryState::default()
        };
        state.input_char('x');
        assert!(state.message.is_none());
        assert_eq!(state.input, "x");
    }
}
