use rand::Rng;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::widgets::Widget;

pub const BUBBLE_COUNT: usize = 15;
/// Animation tick length in milliseconds.
pub const TICK_MS: u64 = 80;

#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    /// Horizontal position as a fraction of the area width.
    pub x: f32,
    /// Bubble diameter, 20 to 80; picks the glyph.
    pub size: f32,
    /// Ticks for one full rise.
    pub rise_ticks: u32,
    /// Ticks into the current rise; negative while still delayed.
    pub age: i64,
}

impl Bubble {
    fn random(rng: &mut impl Rng) -> Self {
        let duration_secs = rng.gen_range(10.0..20.0);
        let delay_secs = rng.gen_range(0.0..10.0);
        Self {
            x: rng.gen_range(0.0..1.0),
            size: rng.gen_range(20.0..80.0),
            rise_ticks: secs_to_ticks(duration_secs).max(1),
            age: -i64::from(secs_to_ticks(delay_secs)),
        }
    }

    /// Fraction of the rise completed, `None` while delayed.
    pub fn progress(&self) -> Option<f32> {
        (self.age >= 0).then(|| self.age as f32 / self.rise_ticks as f32)
    }

    fn glyph(&self) -> char {
        match self.size {
            s if s < 40.0 => '°',
            s if s < 60.0 => 'o',
            _ => 'O',
        }
    }
}

fn secs_to_ticks(secs: f64) -> u32 {
    (secs * 1000.0 / TICK_MS as f64).round() as u32
}

/// Decorative bubbles rising behind the banner.
#[derive(Debug, Clone, Default)]
pub struct BubbleField {
    pub bubbles: Vec<Bubble>,
}

impl BubbleField {
    pub fn new(rng: &mut impl Rng, count: usize) -> Self {
        Self {
            bubbles: (0..count).map(|_| Bubble::random(rng)).collect(),
        }
    }

    /// Advance one tick. A bubble that finished its rise starts over at a new
    /// horizontal position.
    pub fn advance(&mut self, rng: &mut impl Rng) {
        for bubble in &mut self.bubbles {
            bubble.age += 1;
            if bubble.age >= i64::from(bubble.rise_ticks) {
                bubble.age = 0;
                bubble.x = rng.gen_range(0.0..1.0);
            }
        }
    }
}

pub struct BubbleBackground<'a> {
    pub field: &'a BubbleField,
}

impl Widget for BubbleBackground<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let style = Style::default().fg(Color::Indexed(67));
        for bubble in &self.field.bubbles {
            let Some(progress) = bubble.progress() else {
                continue;
            };
            let rows = f32::from(area.height);
            let y_off = ((1.0 - progress) * rows).floor().min(rows - 1.0).max(0.0) as u16;
            let x_off = (bubble.x * f32::from(area.width)).floor().min(f32::from(area.width - 1)) as u16;
            buf.set_string(area.x + x_off, area.y + y_off, bubble.glyph().to_string(), style);
        }
    }
}
