use chrono::{Local, Utc};
use log::error;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::banner::AnimatedBanner;
use crate::components::banner_frames::team_color;
use crate::components::bubbles::BubbleBackground;
use crate::keys::ROSTER_COLUMNS;
use crate::state::app_state::RosterStatus;
use crate::state::countdown::Countdown;
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::state::scoreboard::{PanelContent, PanelView, SyncOutcome};
use crate::ui::layout::LayoutAreas;
use showdown_api::scoreboard::PLACEHOLDER_LABEL;
use showdown_api::{RosterEntry, Slot};

static TABS: &[&str; 4] = &["Home", "Scores", "Players", "Stream"];
const BANNER_HEIGHT: u16 = 7;
const MODAL_WIDTH: u16 = 54;
const MODAL_HEIGHT: u16 = 11;

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
            draw_status_bar(f, layout.status, app);
        }

        match app.state.active_tab {
            MenuItem::Home => draw_home(f, layout.main, app),
            MenuItem::Scores => draw_scores(f, layout.main, app),
            MenuItem::Players => draw_players(f, layout.main, app),
            MenuItem::Stream => draw_stream(f, layout.main, app),
            MenuItem::Help => draw_placeholder(
                f,
                layout.main,
                "Help: q=quit  1=Home  2=Scores  3=Players  4=Stream  h/j/k/l=move  Enter=player stats  r=refresh  f=full screen  \"=logs",
            ),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        if let Some(entry) = app.state.modal.as_ref() {
            draw_player_modal(f, f.area(), entry);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        error!("draw failed: {e:?}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Home => 0,
        MenuItem::Scores => 1,
        MenuItem::Players => 2,
        MenuItem::Stream => 3,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_status_bar(f: &mut Frame, area: Rect, app: &App) {
    if area.height == 0 {
        return;
    }
    let sync = match app.state.scoreboard.last_sync {
        Some((at, SyncOutcome::Live)) => Span::styled(
            format!(" scores updated {}", at.format("%H:%M:%S")),
            Style::default().fg(Color::Green),
        ),
        Some((at, SyncOutcome::Failed)) => Span::styled(
            format!(" score update failed {}", at.format("%H:%M:%S")),
            Style::default().fg(Color::Red),
        ),
        None => Span::styled(" waiting for first score update", Style::default().fg(Color::DarkGray)),
    };
    let every = Span::styled(
        format!("  (every {}s)", app.settings.poll_interval.as_secs()),
        Style::default().fg(Color::DarkGray),
    );
    let mut spans = vec![sync, every];
    if let Some(err) = app.state.last_error.as_ref() {
        spans.push(Span::styled(format!("  {err}"), Style::default().fg(Color::LightRed)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_home(f: &mut Frame, area: Rect, app: &App) {
    f.render_widget(BubbleBackground { field: &app.state.animation.bubbles }, area);

    let [_top_pad, banner_area, info_area, _bottom_pad] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(BANNER_HEIGHT),
        Constraint::Length(2),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, banner_area, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Max(90),
        Constraint::Fill(1),
    ])
    .areas(banner_area);

    f.render_widget(Clear, banner_area);
    f.render_widget(
        AnimatedBanner {
            frame: app.state.animation.frame,
            tick: app.state.animation.tick,
            countdown: Countdown::until(Utc::now(), app.settings.event_start),
        },
        banner_area,
    );

    let starts = app
        .settings
        .event_start
        .with_timezone(&Local)
        .format("%A %B %-d, %Y at %H:%M");
    f.render_widget(
        Paragraph::new(vec![
            Line::from(format!("Event start: {starts}")),
            Line::from("Press 2 for live scores, 3 for players, 4 for the stream"),
        ])
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center),
        info_area,
    );
}

fn draw_scores(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Live Scores ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [grid, footer] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);
    let (rows, cols) = if grid.width >= 100 { (2, 4) } else { (4, 2) };
    let row_areas = Layout::vertical(vec![Constraint::Fill(1); rows]).split(grid);
    let view = &app.state.scoreboard;
    f.render_widget(Paragraph::new(selection_line(view.selected_slot())), footer);

    for (idx, panel) in view.panels.iter().enumerate() {
        let Some(row) = row_areas.get(idx / cols) else {
            break;
        };
        let cells = Layout::horizontal(vec![Constraint::Fill(1); cols]).split(*row);
        let selected = idx == view.selected_team;
        draw_team_panel(f, cells[idx % cols], panel, selected.then_some(view.selected_slot));
    }
}

fn draw_team_panel(f: &mut Frame, area: Rect, panel: &PanelView, selected_slot: Option<usize>) {
    let color = team_color(panel.team);
    let border = if selected_slot.is_some() { Color::White } else { color };
    let block = default_border(border).title(Span::styled(
        format!(" {} ", panel.team.label()),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ));
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let mut lines = vec![Line::from(vec![
        Span::styled("Score ", Style::default().fg(Color::DarkGray)),
        Span::styled(panel.score.clone(), Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])];

    match &panel.content {
        PanelContent::Loading => lines.push(Line::from(Span::styled(
            "Loading...",
            Style::default().fg(Color::DarkGray),
        ))),
        PanelContent::Slots(slots) => {
            for (i, slot) in slots.iter().enumerate() {
                let marker = if selected_slot == Some(i) { '>' } else { ' ' };
                lines.push(slot_line(slot, marker, inner.width as usize));
            }
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn selection_line(selected: Option<&Slot>) -> Line<'static> {
    match selected {
        Some(Slot::Player(player)) => Line::from(vec![
            Span::styled(format!(" {}  ", player.username), Style::default().fg(Color::White)),
            Span::styled(player.avatar_url.clone(), Style::default().fg(Color::DarkGray)),
        ]),
        _ => Line::from(Span::styled(
            " h/j/k/l to move, Enter for player stats",
            Style::default().fg(Color::DarkGray),
        )),
    }
}

/// One player row: name on the left, score right-aligned. Roster-backed
/// players get a `*` to show they have stats.
fn slot_line(slot: &Slot, marker: char, width: usize) -> Line<'static> {
    match slot {
        Slot::Placeholder => Line::from(Span::styled(
            format!("{marker} {PLACEHOLDER_LABEL}"),
            Style::default().fg(Color::DarkGray),
        )),
        Slot::Player(player) => {
            let badge = if player.stats.is_some() { '*' } else { ' ' };
            let left = format!("{marker}{badge}{}", player.username);
            let pad = width.saturating_sub(left.chars().count() + player.score.chars().count());
            let name_style = if player.stats.is_some() {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(vec![
                Span::styled(left, name_style),
                Span::raw(" ".repeat(pad.max(1))),
                Span::styled(player.score.clone(), Style::default().fg(Color::Yellow)),
            ])
        }
    }
}

fn draw_players(f: &mut Frame, area: Rect, app: &App) {
    let roster_state = &app.state.roster;
    let block = default_border(Color::White).title(format!(" Players ({}) ", roster_state.roster.len()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if roster_state.roster.is_empty() {
        let (msg, color) = match &roster_state.status {
            RosterStatus::Loading => ("Loading players...".to_string(), Color::DarkGray),
            RosterStatus::Loaded => ("No players listed yet.".to_string(), Color::DarkGray),
            RosterStatus::Failed(_) => ("Failed to load player list.".to_string(), Color::LightRed),
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(color))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let [legend, grid] =
        Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner);
    // A failed reload keeps the old grid for enrichment but still says so.
    let legend_line = match &roster_state.status {
        RosterStatus::Failed(_) => Span::styled(
            "Failed to load player list.",
            Style::default().fg(Color::LightRed),
        ),
        _ => Span::styled(
            "h/j/k/l to move, Enter for player stats",
            Style::default().fg(Color::DarkGray),
        ),
    };
    f.render_widget(Paragraph::new(Line::from(legend_line)), legend);

    let cols = ROSTER_COLUMNS as usize;
    let col_width = (grid.width as usize / cols).max(1);
    let visible_rows = grid.height as usize;
    if visible_rows == 0 {
        return;
    }
    let selected_row = roster_state.selected / cols;
    let first_row = selected_row.saturating_sub(visible_rows - 1);

    for (idx, entry) in roster_state.roster.entries().iter().enumerate() {
        let row = idx / cols;
        if row < first_row || row >= first_row + visible_rows {
            continue;
        }
        let x = grid.x + ((idx % cols) * col_width) as u16;
        let y = grid.y + (row - first_row) as u16;
        let style = if idx == roster_state.selected {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        let label: String = format!(" {} ", entry.username)
            .chars()
            .take(col_width.saturating_sub(1))
            .collect();
        f.render_widget(
            Paragraph::new(Span::styled(label, style)),
            Rect::new(x, y, col_width as u16, 1),
        );
    }
}

fn draw_stream(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::Magenta).title(" Stream ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Channel  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                app.settings.stream_channel.clone(),
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Watch    ", Style::default().fg(Color::DarkGray)),
            Span::raw(app.settings.stream_url()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Open the link in a browser to watch live.",
            Style::default().fg(Color::Gray),
        )),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn draw_player_modal(f: &mut Frame, area: Rect, entry: &RosterEntry) {
    let popup = centered_rect(area, MODAL_WIDTH, MODAL_HEIGHT);
    f.render_widget(Clear, popup);
    let block = default_border(Color::Yellow).title(format!(" {} ", entry.username));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let stat = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<14}"), Style::default().fg(Color::DarkGray)),
            Span::styled(value, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        ])
    };
    let lines = vec![
        Line::from(Span::styled(entry.body_url(150), Style::default().fg(Color::Gray))),
        Line::from(""),
        stat("Events Won", entry.won.to_string()),
        stat("Events Played", entry.played.to_string()),
        stat("Win Rate", format!("{}%", entry.win_rate())),
        Line::from(""),
        Line::from(Span::styled("Esc to close", Style::default().fg(Color::DarkGray))),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let widget = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray))
        .style_debug(Style::default().fg(Color::DarkGray));
    f.render_widget(widget, area);
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        inner,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
