use pilot_core::{
    AgentKind, AgentReport, AgentsView, AppViewModel, DecisionAdvice, PrepPlan, ProgressReport,
    Rating, RecordCardView, ReviewAnalysis, ReviewDrawerView, View,
};

use crate::platform::viewport::Page;

use super::calendar::{self, MonthCursor};

const RULE_WIDTH: usize = 60;

pub fn header(view: &AppViewModel) -> Vec<String> {
    let tabs = [
        (View::Calendar, "Calendar"),
        (View::Timeline, "Timeline"),
        (View::Agents, "Agents"),
    ]
    .iter()
    .map(|(tab, name)| {
        if *tab == view.active_view {
            format!("[{name}]")
        } else {
            format!(" {name} ")
        }
    })
    .collect::<Vec<_>>()
    .join(" ");

    let mut status = format!("{} interviews", view.record_count);
    if view.submitting {
        status.push_str(" | parsing new interview...");
    }
    let mut lines = vec![format!("Interview Pilot  {tabs}  {status}")];
    if !view.input.is_empty() {
        let label = if view.submitting { "sending" } else { "not stored" };
        lines.push(format!("Intake ({label}): {}", view.input));
    }
    lines.push("-".repeat(RULE_WIDTH));
    lines
}

pub fn calendar_view(cursor: MonthCursor, view: &AppViewModel) -> Vec<String> {
    calendar::render_month(cursor, &view.events, &view.busy_days)
}

/// Timeline text with the line of every card heading recorded as its anchor.
pub fn timeline_page(view: &AppViewModel) -> Page {
    let mut page = Page::default();
    if view.timeline.is_empty() {
        page.lines
            .push("No interviews yet. Use `add <text>` to store one.".to_string());
        return page;
    }
    for card in &view.timeline {
        page.anchors.push((card.anchor.clone(), page.lines.len()));
        push_card(&mut page.lines, card);
        page.lines.push(String::new());
    }
    page
}

fn push_card(lines: &mut Vec<String>, card: &RecordCardView) {
    let marker = if card.selected { '>' } else { ' ' };
    lines.push(format!("{marker} {}  (#{})", card.heading, card.record_id));
    if let Some(department) = &card.department {
        lines.push(format!("    Department: {department}"));
    }
    if !card.keywords.is_empty() {
        lines.push(format!("    Keywords: {}", card.keywords.join(", ")));
    }
    if let Some(summary) = &card.jd_summary {
        lines.push(format!("    JD: {summary}"));
    }
    for entry in &card.entries {
        let check = if entry.completed { 'x' } else { ' ' };
        lines.push(format!("    [{check}] {}  {}", entry.headline, entry.status));
        if let Some(link) = &entry.link {
            lines.push(format!("        link: {link}"));
        }
    }
}

pub fn agents_view(view: &AppViewModel) -> Vec<String> {
    let AgentsView::Workbench {
        record_id,
        company,
        active_kind,
        loading,
        result,
    } = &view.agents
    else {
        return vec![
            "No interview selected.".to_string(),
            "Type `timeline` to pick one, then `agents <id>`.".to_string(),
        ];
    };

    let mut lines = vec![format!("Workbench: {company} (#{record_id})")];
    lines.push(
        AgentKind::ALL
            .iter()
            .map(|kind| {
                if kind == active_kind {
                    format!("[{}]", kind.label())
                } else {
                    format!(" {} ", kind.label())
                }
            })
            .collect::<Vec<_>>()
            .join(" "),
    );
    lines.push(String::new());

    if *loading {
        lines.push(format!("{} is working...", active_kind.label()));
        return lines;
    }
    let Some(result) = result else {
        lines.push("No analysis yet. Use `run <progress|prep|review|decision>`.".to_string());
        return lines;
    };
    if &result.record_id != record_id {
        lines.push(format!("(result below is for record #{})", result.record_id));
    }
    lines.extend(report_lines(&result.report));
    lines
}

pub fn report_lines(report: &AgentReport) -> Vec<String> {
    match report {
        AgentReport::Progress(progress) => progress_lines(progress),
        AgentReport::Prep(plan) => prep_lines(plan),
        AgentReport::Review(analysis) => review_lines(analysis),
        AgentReport::Decision(advice) => decision_lines(advice),
    }
}

fn bullets(lines: &mut Vec<String>, title: &str, items: &[String], empty: &str) {
    lines.push(format!("{title}:"));
    if items.is_empty() {
        lines.push(format!("  {empty}"));
    }
    lines.extend(items.iter().map(|item| format!("  - {item}")));
}

fn progress_lines(progress: &ProgressReport) -> Vec<String> {
    let mut lines = Vec::new();
    bullets(&mut lines, "Reminders", &progress.reminders, "Nothing to remind.");
    if !progress.conflicts.is_empty() {
        bullets(&mut lines, "Conflicts", &progress.conflicts, "");
    }
    lines
}

fn prep_lines(plan: &PrepPlan) -> Vec<String> {
    let mut lines = Vec::new();
    bullets(&mut lines, "Checklist", &plan.checklist, "Nothing to prepare.");
    if let Some(script) = plan.mock_script.as_deref().filter(|script| !script.is_empty()) {
        lines.push("Mock interview:".to_string());
        for (index, question) in script.iter().enumerate() {
            lines.push(format!("  {}. {}", index + 1, question.question));
            if !question.intent.is_empty() {
                lines.push(format!("     intent: {}", question.intent));
            }
            if !question.star_guide.is_empty() {
                lines.push(format!("     STAR: {}", question.star_guide));
            }
        }
    }
    lines
}

fn stars(rating: Rating) -> String {
    let filled = usize::from(rating.value());
    let empty = usize::from(Rating::MAX) - filled;
    format!("{}{}", "*".repeat(filled), ".".repeat(empty))
}

fn review_lines(analysis: &ReviewAnalysis) -> Vec<String> {
    let mut lines = vec!["Skills:".to_string()];
    if analysis.skills.is_empty() {
        lines.push("  No ratings.".to_string());
    }
    let name_width = analysis
        .skills
        .keys()
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0);
    for (name, rating) in &analysis.skills {
        let pad = name_width - name.chars().count();
        lines.push(format!(
            "  {name}{}  {} {}/{}",
            " ".repeat(pad),
            stars(*rating),
            rating.value(),
            Rating::MAX
        ));
    }
    if !analysis.weakness.is_empty() {
        lines.push(format!("Weakness: {}", analysis.weakness));
    }
    bullets(&mut lines, "Actions", &analysis.actions, "No actions suggested.");
    lines
}

fn decision_lines(advice: &DecisionAdvice) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(matrix) = advice.matrix.as_ref().filter(|m| !m.columns.is_empty()) {
        let rows = matrix.text_rows();
        let widths: Vec<usize> = matrix
            .columns
            .iter()
            .enumerate()
            .map(|(index, column)| {
                rows.iter()
                    .map(|row| row[index].chars().count())
                    .chain(std::iter::once(column.title.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();
        let titles: Vec<&str> = matrix.columns.iter().map(|c| c.title.as_str()).collect();
        lines.push(table_row(&titles, &widths));
        lines.push(
            widths
                .iter()
                .map(|width| "-".repeat(*width))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        for row in &rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            lines.push(table_row(&cells, &widths));
        }
    }
    match advice.recommendation.as_deref() {
        Some(text) if !text.is_empty() => lines.push(format!("Recommendation: {text}")),
        _ if lines.is_empty() => lines.push("No recommendation.".to_string()),
        _ => {}
    }
    lines
}

fn table_row(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

pub fn review_drawer(drawer: &ReviewDrawerView) -> Vec<String> {
    let mut lines = vec![
        "-".repeat(RULE_WIDTH),
        format!("Review: {} (#{})", drawer.company, drawer.record_id),
    ];
    if drawer.saving {
        lines.push("Saving review...".to_string());
    } else {
        lines.push("save <summary> [--score 0-5] [--improve text]   |   close".to_string());
    }
    lines
}

pub fn alert(message: &str) -> Vec<String> {
    vec![
        "!".repeat(RULE_WIDTH),
        format!("!! {message}"),
        "!! Type `ok` to continue.".to_string(),
        "!".repeat(RULE_WIDTH),
    ]
}
