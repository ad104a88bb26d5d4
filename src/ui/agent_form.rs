//! Agent form view: collapsible settings sections and the test call panel

use super::components::{render_button, BUTTON_HEIGHT};
use super::forms::draw_field;
use crate::app::App;
use crate::state::{
    format_file_size, AgentFieldId, AgentPage, AgentSection, Form, UploadStatus,
    ACCEPTED_EXTENSIONS, CALL_TYPES, LATENCY_MAX, LATENCY_MIN, MAX_LONG_TEXT_CHARS, SPEED_MAX,
    SPEED_MIN,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const SLIDER_WIDTH: usize = 20;

/// Draw the agent form
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(page) = &app.state.agent_page else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(BUTTON_HEIGHT), Constraint::Min(0)])
        .split(area);

    draw_top_bar(frame, rows[0], page);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(42)])
        .split(rows[1]);

    draw_sections(frame, columns[0], page);
    draw_test_call_panel(frame, columns[1], page);
}

fn draw_top_bar(frame: &mut Frame, area: Rect, page: &AgentPage) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(20)])
        .split(area);

    let mut title = vec![Span::styled(
        page.form.mode().heading(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(id) = page.form.agent_id() {
        title.push(Span::styled(
            format!("  id: {id}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    let heading = Paragraph::new(vec![Line::from(""), Line::from(title)]);
    frame.render_widget(heading, chunks[0]);

    let label = if page.form.is_saving() {
        "Saving..."
    } else {
        page.form.mode().save_label()
    };
    render_button(
        frame,
        chunks[1],
        label,
        page.focused() == AgentFieldId::Save,
        page.can_save(),
    );
}

/// Lines of the sections column, remembering where the focused element is
struct SectionLines<'a> {
    lines: Vec<Line<'a>>,
    focused_line: usize,
    focused: AgentFieldId,
}

impl<'a> SectionLines<'a> {
    fn push(&mut self, id: Option<AgentFieldId>, line: Line<'a>) {
        if id == Some(self.focused) {
            self.focused_line = self.lines.len();
        }
        self.lines.push(line);
    }

    fn blank(&mut self) {
        self.lines.push(Line::from(""));
    }
}

fn focus_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

fn marker(is_focused: bool) -> &'static str {
    if is_focused {
        "▸ "
    } else {
        "  "
    }
}

fn draw_sections(frame: &mut Frame, area: Rect, page: &AgentPage) {
    let focused = page.focused();
    let mut out = SectionLines {
        lines: Vec::new(),
        focused_line: 0,
        focused,
    };

    for section in AgentSection::ALL {
        section_header(&mut out, page, section);
        if page.is_open(section) {
            match section {
                AgentSection::BasicSettings => basic_settings(&mut out, page),
                AgentSection::CallScript => long_text(
                    &mut out,
                    AgentFieldId::CallScript,
                    "Script",
                    &page.form.data().call_script,
                ),
                AgentSection::ServiceDescription => long_text(
                    &mut out,
                    AgentFieldId::ServiceDescription,
                    "Description",
                    &page.form.data().service_description,
                ),
                AgentSection::ReferenceData => reference_data(&mut out, page),
                AgentSection::Tools => tools(&mut out, page),
            }
        }
        out.blank();
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = out.focused_line.saturating_sub(visible / 3) as u16;

    let paragraph = Paragraph::new(out.lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn section_header(out: &mut SectionLines, page: &AgentPage, section: AgentSection) {
    let id = AgentFieldId::Section(section);
    let is_focused = out.focused == id;
    let arrow = if page.is_open(section) { "▾ " } else { "▸ " };

    let mut spans = vec![
        Span::styled(marker(is_focused), focus_style(is_focused)),
        Span::styled(arrow, Style::default().fg(Color::DarkGray)),
        Span::styled(
            section.title(),
            focus_style(is_focused).add_modifier(Modifier::BOLD),
        ),
    ];

    if section == AgentSection::BasicSettings {
        let missing = page.form.basic_settings_missing();
        if missing > 0 {
            spans.push(Span::styled(
                format!("  {missing} required"),
                Style::default().fg(Color::Red),
            ));
        }
    }
    if section == AgentSection::ReferenceData && !page.uploads.is_empty() {
        spans.push(Span::styled(
            format!("  {} file(s)", page.uploads.len()),
            Style::default().fg(Color::DarkGray),
        ));
    }

    out.push(Some(id), Line::from(spans));
    out.push(
        None,
        Line::from(Span::styled(
            format!("    {}", section.description()),
            Style::default().fg(Color::DarkGray),
        )),
    );
}

fn text_line<'a>(out: &mut SectionLines<'a>, id: AgentFieldId, label: &str, value: &str) {
    let is_focused = out.focused == id;
    let mut spans = vec![
        Span::styled(format!("  {}", marker(is_focused)), focus_style(is_focused)),
        Span::styled(format!("{label}: "), focus_style(is_focused)),
    ];
    if value.is_empty() && !is_focused {
        spans.push(Span::styled("(empty)", Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::raw(value.to_string()));
    }
    if is_focused {
        spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }
    out.push(Some(id), Line::from(spans));
}

fn select_line<'a>(
    out: &mut SectionLines<'a>,
    id: AgentFieldId,
    label: &str,
    selected: Option<String>,
    placeholder: &str,
) {
    let is_focused = out.focused == id;
    let value = match selected {
        Some(label) => Span::raw(format!("◂ {label} ▸")),
        None => Span::styled(
            format!("◂ {placeholder} ▸"),
            Style::default().fg(Color::DarkGray),
        ),
    };
    out.push(
        Some(id),
        Line::from(vec![
            Span::styled(format!("  {}", marker(is_focused)), focus_style(is_focused)),
            Span::styled(format!("{label}: "), focus_style(is_focused)),
            value,
        ]),
    );
}

/// A select that cannot be changed yet; keeps the focus marker only
fn disabled_line(out: &mut SectionLines, id: AgentFieldId, label: &str, reason: &str) {
    let is_focused = out.focused == id;
    let muted = Style::default().fg(Color::DarkGray);
    out.push(
        Some(id),
        Line::from(vec![
            Span::styled(format!("  {}", marker(is_focused)), focus_style(is_focused)),
            Span::styled(format!("{label}: "), muted),
            Span::styled(format!("({reason})"), muted.add_modifier(Modifier::ITALIC)),
        ]),
    );
}

fn slider_line<'a>(
    out: &mut SectionLines<'a>,
    id: AgentFieldId,
    label: &str,
    fraction: f64,
    value: String,
) {
    let is_focused = out.focused == id;
    let filled = (fraction.clamp(0.0, 1.0) * SLIDER_WIDTH as f64).round() as usize;
    let bar = format!(
        "[{}{}]",
        "=".repeat(filled),
        "-".repeat(SLIDER_WIDTH - filled)
    );
    out.push(
        Some(id),
        Line::from(vec![
            Span::styled(format!("  {}", marker(is_focused)), focus_style(is_focused)),
            Span::styled(format!("{label}: "), focus_style(is_focused)),
            Span::styled(bar, Style::default().fg(Color::Cyan)),
            Span::raw(format!(" {value}")),
        ]),
    );
}

fn basic_settings(out: &mut SectionLines, page: &AgentPage) {
    let data = page.form.data();
    let reference = &page.reference;
    let placeholder = if reference.loading {
        "loading..."
    } else {
        "select"
    };

    if let Some(error) = &reference.error {
        out.push(
            None,
            Line::from(Span::styled(
                format!("    ⚠ {error}"),
                Style::default().fg(Color::Red),
            )),
        );
    }

    text_line(out, AgentFieldId::Name, "Agent Name *", &data.name);
    text_line(out, AgentFieldId::Description, "Description", &data.description);

    let call_type = CALL_TYPES
        .iter()
        .find(|(value, _)| *value == data.call_type)
        .map(|(_, label)| label.to_string());
    select_line(out, AgentFieldId::CallType, "Call Type *", call_type, "select");

    select_line(
        out,
        AgentFieldId::Language,
        "Language *",
        reference.language_name(&data.language).map(str::to_string),
        placeholder,
    );
    if data.language.is_empty() {
        disabled_line(out, AgentFieldId::Voice, "Voice *", "pick a language first");
    } else {
        select_line(
            out,
            AgentFieldId::Voice,
            "Voice *",
            reference.voice_label(&data.voice),
            placeholder,
        );
    }
    select_line(
        out,
        AgentFieldId::Prompt,
        "Prompt *",
        reference.prompt_name(&data.prompt).map(str::to_string),
        placeholder,
    );
    select_line(
        out,
        AgentFieldId::Model,
        "Model *",
        reference.model_name(&data.model).map(str::to_string),
        placeholder,
    );

    slider_line(
        out,
        AgentFieldId::Latency,
        "Latency",
        (data.latency - LATENCY_MIN) / (LATENCY_MAX - LATENCY_MIN),
        format!("{:.1}s", data.latency),
    );
    slider_line(
        out,
        AgentFieldId::Speed,
        "Speed",
        f64::from(data.speed.saturating_sub(SPEED_MIN)) / f64::from(SPEED_MAX - SPEED_MIN),
        format!("{}%", data.speed),
    );
}

fn long_text<'a>(out: &mut SectionLines<'a>, id: AgentFieldId, label: &str, value: &str) {
    let is_focused = out.focused == id;
    let count = value.chars().count();
    out.push(
        Some(id),
        Line::from(vec![
            Span::styled(format!("  {}", marker(is_focused)), focus_style(is_focused)),
            Span::styled(label.to_string(), focus_style(is_focused)),
            Span::styled(
                format!("  {count}/{MAX_LONG_TEXT_CHARS}"),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    );

    if value.is_empty() && !is_focused {
        out.push(
            None,
            Line::from(Span::styled(
                "      (empty)",
                Style::default().fg(Color::DarkGray),
            )),
        );
        return;
    }

    let mut lines: Vec<Line> = value
        .split('\n')
        .map(|l| Line::from(format!("      {l}")))
        .collect();
    if is_focused {
        if let Some(last) = lines.last_mut() {
            last.spans
                .push(Span::styled("▌", Style::default().fg(Color::Cyan)));
        }
    }
    for line in lines {
        out.push(None, line);
    }
}

fn reference_data(out: &mut SectionLines, page: &AgentPage) {
    text_line(
        out,
        AgentFieldId::FilePath,
        "File path",
        page.editor.file_path.as_text(),
    );
    let accepted = ACCEPTED_EXTENSIONS
        .iter()
        .map(|ext| ext.to_uppercase())
        .collect::<Vec<_>>()
        .join(", ");
    out.push(
        None,
        Line::from(Span::styled(
            format!("      Enter to upload. {accepted}"),
            Style::default().fg(Color::DarkGray),
        )),
    );

    for (index, item) in page.uploads.items().iter().enumerate() {
        let id = AgentFieldId::UploadedFile(index);
        let is_focused = out.focused == id;
        let (icon, status) = match &item.status {
            UploadStatus::Uploading => (
                Span::styled("⟳ ", Style::default().fg(Color::Yellow)),
                Span::styled("Uploading...", Style::default().fg(Color::Yellow)),
            ),
            UploadStatus::Success { .. } => (
                Span::styled("✓ ", Style::default().fg(Color::Green)),
                Span::raw(""),
            ),
            UploadStatus::Error { message } => (
                Span::styled("✗ ", Style::default().fg(Color::Red)),
                Span::styled(message.clone(), Style::default().fg(Color::Red)),
            ),
        };
        let mut spans = vec![
            Span::styled(format!("  {}", marker(is_focused)), focus_style(is_focused)),
            icon,
            Span::styled(item.file_name.clone(), focus_style(is_focused)),
            Span::styled(
                format!(" ({}) ", format_file_size(item.file_size)),
                Style::default().fg(Color::DarkGray),
            ),
            status,
        ];
        if is_focused {
            spans.push(Span::styled(
                "  Del:remove",
                Style::default().fg(Color::DarkGray),
            ));
        }
        out.push(Some(id), Line::from(spans));
    }
}

fn tools(out: &mut SectionLines, page: &AgentPage) {
    let tools = page.form.data().tools;
    for (id, label, on) in [
        (AgentFieldId::AllowHangUp, "Allow hang up", tools.allow_hang_up),
        (AgentFieldId::AllowCallback, "Allow callback", tools.allow_callback),
        (AgentFieldId::LiveTransfer, "Live transfer", tools.live_transfer),
    ] {
        let is_focused = out.focused == id;
        let check = if on {
            Span::styled("[x] ", Style::default().fg(Color::Green))
        } else {
            Span::styled("[ ] ", Style::default().fg(Color::DarkGray))
        };
        out.push(
            Some(id),
            Line::from(vec![
                Span::styled(format!("  {}", marker(is_focused)), focus_style(is_focused)),
                check,
                Span::styled(label, focus_style(is_focused)),
            ]),
        );
    }
}

fn draw_test_call_panel(frame: &mut Frame, area: Rect, page: &AgentPage) {
    let block = Block::default()
        .title(" Test Call ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // First name
            Constraint::Length(3),             // Last name
            Constraint::Length(3),             // Gender
            Constraint::Length(3),             // Phone
            Constraint::Length(BUTTON_HEIGHT), // Start
            Constraint::Min(0),
        ])
        .split(inner);

    let form = &page.editor.test_call;
    let focused = page.focused();
    for index in 0..form.field_count() {
        if let Some(field) = form.get_field(index) {
            draw_field(
                frame,
                chunks[index],
                field,
                focused == AgentFieldId::TestCall(index),
            );
        }
    }

    let label = if page.testing {
        "Calling..."
    } else {
        "Start Test Call"
    };
    let enabled =
        form.has_phone_number() && !page.form.is_saving() && !page.testing;
    render_button(
        frame,
        chunks[4],
        label,
        focused == AgentFieldId::StartTestCall,
        enabled,
    );
}
