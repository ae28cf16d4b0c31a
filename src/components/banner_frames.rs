use showdown_api::TeamColor;
use tui::style::{Color, Modifier, Style};

pub const FRAME_COUNT: usize = 4;
pub const TITLE: &str = "SMP SHOWDOWN";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BannerColor {
    Primary,
    Accent,
    Shadow,
    Live,
}

pub fn resolve(color: BannerColor) -> Style {
    match color {
        BannerColor::Primary => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        BannerColor::Accent => Style::default().fg(Color::Rgb(255, 196, 0)).add_modifier(Modifier::BOLD),
        BannerColor::Shadow => Style::default().fg(Color::Indexed(240)),
        BannerColor::Live => Style::default().fg(Color::Rgb(255, 196, 0)).add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
    }
}

/// Terminal colour for each team.
pub fn team_color(team: TeamColor) -> Color {
    match team {
        TeamColor::Red => Color::Rgb(230, 57, 70),
        TeamColor::Orange => Color::Rgb(244, 140, 6),
        TeamColor::Yellow => Color::Rgb(255, 214, 10),
        TeamColor::Green => Color::Rgb(82, 183, 136),
        TeamColor::Aqua => Color::Rgb(72, 202, 228),
        TeamColor::Blue => Color::Rgb(58, 134, 255),
        TeamColor::Purple => Color::Rgb(157, 78, 221),
        TeamColor::Pink => Color::Rgb(255, 112, 166),
    }
}

/// Team colour for a title letter; the rainbow shifts one team per tick.
pub fn letter_color(index: usize, tick: u64) -> Color {
    let shift = (tick % TeamColor::ALL.len() as u64) as usize;
    team_color(TeamColor::ALL[(index + shift) % TeamColor::ALL.len()])
}

pub fn sparkle_frame(frame: usize) -> &'static str {
    const FRAMES: [&str; FRAME_COUNT] = ["*", "+", "x", "+"];
    FRAMES[frame % FRAME_COUNT]
}
