use ratatui::style::Color;

// ── Drawing-surface contract ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

pub fn pt(x: f64, y: f64) -> Point {
    Point { x, y }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Rect {
    Rect { x, y, width, height }
}

/// The draw calls the geometry engines are allowed to make. Engines compute
/// positions and colors only; whoever implements this owns the pixels (or
/// terminal cells). Coordinates are surface-local with y growing downward.
pub trait Surface {
    fn resize(&mut self, width: f64, height: f64);
    fn clear_region(&mut self, region: Rect);
    fn fill_circle(&mut self, center: Point, radius: f64, fill: Color, stroke: Option<Color>);
    fn fill_rect(&mut self, region: Rect, fill: Color);
    fn stroke_rect(&mut self, region: Rect);
    /// Text is centered on `at`.
    fn draw_text(&mut self, text: &str, at: Point, color: Color);
    fn draw_line(&mut self, from: Point, to: Point);
}

// ── Recorded scene ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Clear(Rect),
    Circle { center: Point, radius: f64, fill: Color, stroke: Option<Color> },
    FillRect { region: Rect, fill: Color },
    StrokeRect(Rect),
    Text { text: String, at: Point, color: Color },
    Line { from: Point, to: Point },
}

/// A `Surface` that records instructions instead of drawing them. One full
/// redraw produces one scene; the TUI replays it onto a canvas and tests
/// inspect it directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    instructions: Vec<Instruction>,
}

impl Scene {
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Centers of every recorded filled circle, in draw order.
    pub fn circle_centers(&self) -> Vec<Point> {
        self.instructions
            .iter()
            .filter_map(|i| match i {
                Instruction::Circle { center, .. } => Some(*center),
                _ => None,
            })
            .collect()
    }
}

impl Surface for Scene {
    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.instructions.clear();
    }

    fn clear_region(&mut self, region: Rect) {
        self.instructions.push(Instruction::Clear(region));
    }

    fn fill_circle(&mut self, center: Point, radius: f64, fill: Color, stroke: Option<Color>) {
        self.instructions.push(Instruction::Circle { center, radius, fill, stroke });
    }

    fn fill_rect(&mut self, region: Rect, fill: Color) {
        self.instructions.push(Instruction::FillRect { region, fill });
    }

    fn stroke_rect(&mut self, region: Rect) {
        self.instructions.push(Instruction::StrokeRect(region));
    }

    fn draw_text(&mut self, text: &str, at: Point, color: Color) {
        self.instructions.push(Instruction::Text { text: text.to_string(), at, color });
    }

    fn draw_line(&mut self, from: Point, to: Point) {
        self.instructions.push(Instruction::Line { from, to });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_starts_a_fresh_scene() {
        let mut scene = Scene::default();
        scene.draw_line(pt(0.0, 0.0), pt(1.0, 1.0));
        scene.resize(100.0, 50.0);
        assert_eq!(scene.width, 100.0);
        assert_eq!(scene.height, 50.0);
        assert!(scene.instructions().is_empty());
    }

    #[test]
    fn records_in_draw_order() {
        let mut scene = Scene::default();
        scene.fill_circle(pt(5.0, 5.0), 2.0, Color::Blue, Some(Color::Black));
        scene.draw_text("0", pt(1.0, 1.0), Color::White);
        assert_eq!(scene.instructions().len(), 2);
        assert_eq!(scene.circle_centers(), vec![pt(5.0, 5.0)]);
    }
}
