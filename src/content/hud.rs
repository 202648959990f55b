//=========================================================================
// HUD
//=========================================================================
//
// Lives indicator and vector text labels.
//
// Both keep their own model (life count, text) and draw it from the
// node's global transform each frame; the game refreshes them through
// `update_lives` / `update_text` when the mirrored state changes.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{font, palette, shapes, NodeKind};
use crate::core::game::Game;
use crate::core::graph::{NodeKey, SceneNode};
use crate::core::math::Point;
use crate::core::render::Canvas;

//=== LivesDisplay ========================================================

/// Row of ship icons, one per spare life.
#[derive(Debug, Clone)]
pub struct LivesDisplay {
    lives: u32,
}

impl LivesDisplay {
    /// Horizontal distance between icons, in icon widths.
    const ICON_ADVANCE: f64 = 1.2;

    pub fn new(lives: u32) -> Self {
        Self { lives }
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn update_lives(&mut self, lives: u32) {
        self.lives = lives;
    }

    pub(crate) fn render(&self, node: &SceneNode, canvas: &mut dyn Canvas) {
        let icon = shapes::player();
        for i in 0..self.lives {
            let offset = f64::from(i) * Self::ICON_ADVANCE;
            let points: Vec<Point> = icon.iter().map(|p| Point::new(p.x + offset, -p.y)).collect();
            node.paint_points(canvas, &points, node.color());
        }
    }
}

//=== TextLabel ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

/// Single line of segment-font text. The node's `h` is the glyph height
/// and its position is the anchor picked by `align`.
#[derive(Debug, Clone)]
pub struct TextLabel {
    text: String,
    align: Align,
}

impl TextLabel {
    pub fn new(text: impl Into<String>, align: Align) -> Self {
        Self {
            text: text.into(),
            align,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn update_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub(crate) fn render(&self, node: &SceneNode, canvas: &mut dyn Canvas) {
        let width = font::text_width(self.text.chars().count());
        let shift = match self.align {
            Align::Start => 0.0,
            Align::Center => -width / 2.0,
            Align::End => -width,
        };
        for (a, b) in font::layout(&self.text) {
            let line = [Point::new(a.x + shift, a.y), Point::new(b.x + shift, b.y)];
            node.stroke_polyline(canvas, &line, node.color());
        }
    }
}

//=== Helpers =============================================================

/// Score as shown on screen.
pub fn format_score(score: u32) -> String {
    format!("{:06}", score)
}

/// Creates a detached text node; the caller adds it to a layer.
pub fn spawn_text(game: &mut Game, text: &str, x: f64, y: f64, height: f64, align: Align) -> NodeKey {
    let props = game
        .default_props()
        .at(x, y)
        .size(height, height)
        .color(palette::TEXT)
        .stroked();
    game.spawn(props, NodeKind::Text(TextLabel::new(text, align)))
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graph::NodeProps;
    use crate::core::render::{DrawCommand, PathCommand, RecordingCanvas};

    fn text_node(text: &str, align: Align) -> SceneNode {
        SceneNode::new(
            NodeProps::new().size(0.1, 0.1).stroked(),
            NodeKind::Text(TextLabel::new(text, align)),
        )
    }

    fn first_x(command: &DrawCommand) -> f64 {
        match command {
            DrawCommand::Stroke { path, .. } => match path[0] {
                PathCommand::MoveTo(p) => p.x,
                _ => panic!("path must start with a move"),
            },
            other => panic!("expected a stroke, got {:?}", other),
        }
    }

    #[test]
    fn score_is_padded_to_six_digits() {
        assert_eq!(format_score(0), "000000");
        assert_eq!(format_score(1250), "001250");
    }

    #[test]
    fn end_aligned_text_ends_at_anchor() {
        let mut canvas = RecordingCanvas::new(100, 100);
        let log = canvas.log();

        let start = text_node("T", Align::Start);
        let Some(NodeKind::Text(label)) = start.kind() else { unreachable!() };
        label.render(&start, &mut canvas);
        let start_x = first_x(&log.commands()[0]);

        log.clear();
        let end = text_node("T", Align::End);
        let Some(NodeKind::Text(label)) = end.kind() else { unreachable!() };
        label.render(&end, &mut canvas);
        let end_x = first_x(&log.commands()[0]);

        assert!(start_x > end_x, "end alignment shifts the text left of the anchor");
        assert!((start_x - end_x - 100.0 * 0.1 * font::text_width(1)).abs() < 1e-9);
    }

    #[test]
    fn lives_display_draws_one_icon_per_life() {
        let node = SceneNode::new(NodeProps::new().size(0.1, 0.1), NodeKind::Lives(LivesDisplay::new(3)));
        let mut canvas = RecordingCanvas::new(100, 100);
        let log = canvas.log();

        let Some(NodeKind::Lives(lives)) = node.kind() else { unreachable!() };
        lives.render(&node, &mut canvas);
        assert_eq!(log.len(), 3);
    }
}
