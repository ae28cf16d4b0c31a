use crate::components::banner_frames::{
    BannerColor, TITLE, letter_color, resolve, sparkle_frame,
};
use crate::state::countdown::Countdown;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Widget};

pub use crate::components::banner_frames::FRAME_COUNT;

const UNIT_LABELS: [&str; 4] = ["DAYS", "HOURS", "MINS", "SECS"];

pub struct AnimatedBanner {
    pub frame: usize,
    pub tick: u64,
    pub countdown: Countdown,
}

impl Widget for AnimatedBanner {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 3 {
            render_line(Line::from(format!(" {TITLE} ")), area.x, area.y, area.width, buf);
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(resolve(BannerColor::Shadow));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let title_y = inner.y + inner.height.saturating_sub(3) / 2;
        render_centered(title_line(&self), inner, title_y, buf);
        if inner.height > 2 {
            render_centered(countdown_line(&self), inner, title_y + 2, buf);
        }
    }
}

fn title_line(banner: &AnimatedBanner) -> Line<'static> {
    let sparkle = Span::styled(
        format!("{} ", sparkle_frame(banner.frame)),
        resolve(BannerColor::Accent),
    );
    let mut spans = vec![sparkle];
    for (i, ch) in TITLE.chars().enumerate() {
        spans.push(Span::styled(
            format!("{ch} "),
            Style::default()
                .fg(letter_color(i, banner.tick / 4))
                .add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::styled(
        sparkle_frame(banner.frame + 2).to_string(),
        resolve(BannerColor::Accent),
    ));
    Line::from(spans)
}

fn countdown_line(banner: &AnimatedBanner) -> Line<'static> {
    let Some(digits) = banner.countdown.digits() else {
        return Line::from(Span::styled("LIVE NOW!", resolve(BannerColor::Live)));
    };
    let mut spans = Vec::with_capacity(8);
    for (value, label) in digits.into_iter().zip(UNIT_LABELS) {
        spans.push(Span::styled(value, resolve(BannerColor::Primary)));
        spans.push(Span::styled(
            format!(" {label}   "),
            resolve(BannerColor::Shadow),
        ));
    }
    Line::from(spans)
}

fn render_centered(line: Line, area: Rect, y: u16, buf: &mut Buffer) {
    if y >= area.y + area.height {
        return;
    }
    let w = line.width() as u16;
    let x = area.x + area.width.saturating_sub(w) / 2;
    render_line(line, x, y, area.width, buf);
}

fn render_line(line: Line, x: u16, y: u16, max_width: u16, buf: &mut Buffer) {
    let mut cx = x;
    let limit = x.saturating_add(max_width);
    for span in &line.spans {
        let mut run = String::new();
        for ch in span.content.chars() {
            if cx >= limit {
                break;
            }
            run.push(ch);
            cx += 1;
        }
        let start = cx.saturating_sub(run.chars().count() as u16);
        if !run.is_empty() {
            buf.set_string(start, y, run, span.style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(banner: AnimatedBanner, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        banner.render(area, &mut buf);
        (0..height)
            .map(|y| (0..width).map(|x| buf[(x, y)].symbol().to_string()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn shows_countdown_before_start() {
        let banner = AnimatedBanner {
            frame: 0,
            tick: 0,
            countdown: Countdown::Remaining { days: 3, hours: 4, minutes: 5, seconds: 6 },
        };
        let out = rendered(banner, 80, 7);
        assert!(out.contains("S M P"));
        assert!(out.contains("03 DAYS"));
        assert!(out.contains("06 SECS"));
    }

    #[test]
    fn shows_live_after_start() {
        let banner = AnimatedBanner {
            frame: 1,
            tick: 9,
            countdown: Countdown::Live,
        };
        assert!(rendered(banner, 80, 7).contains("LIVE NOW!"));
    }

    #[test]
    fn tiny_area_falls_back_to_plain_title() {
        let banner = AnimatedBanner {
            frame: 0,
            tick: 0,
            countdown: Countdown::Live,
        };
        assert!(rendered(banner, 16, 2).contains("SMP SHOWDOWN"));
    }
}
