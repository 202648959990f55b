//=========================================================================
// Scene Node
//=========================================================================
//
// A single node of the scene tree.
//
// Responsibilities:
// - Own the local transform and the cached global transform
// - Hold tree edges as arena keys (children owned, parent lookup-only)
// - Carry presentation state: layer, visibility, geometry, paint
// - Map local points to device pixels and trace its geometry
//
// Tree mutation lives on `SceneGraph`, which can reach both ends of an
// edge. The node only exposes what a single node can answer alone.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::arena::NodeKey;
use crate::content::NodeKind;
use crate::core::math::{Point, Transform, TransformProps};
use crate::core::render::{Canvas, Color, Viewport};

//=== Constants ===========================================================

/// Stroke width in pixels used when a node does not set its own.
pub const DEFAULT_LINE_WIDTH: f64 = 2.0;

//=== PaintMode ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintMode {
    #[default]
    Fill,
    Stroke,
}

//=== NodeProps ===========================================================

/// Construction parameters for a [`SceneNode`].
///
/// # Examples
///
/// ```
/// use lanebound::core::graph::NodeProps;
/// use lanebound::core::render::Color;
///
/// let props = NodeProps::new().at(0.45, -0.43).size(0.05, 0.05).color(Color::WHITE).stroked();
/// assert!(props.visible);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeProps {
    pub id: Option<u32>,
    pub transform: TransformProps,
    pub color: Color,
    pub paint: PaintMode,
    pub line_width: f64,
    pub visible: bool,
}

impl NodeProps {
    pub const fn new() -> Self {
        Self {
            id: None,
            transform: TransformProps::new(),
            color: Color::WHITE,
            paint: PaintMode::Fill,
            line_width: DEFAULT_LINE_WIDTH,
            visible: true,
        }
    }

    pub const fn with_id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    pub const fn at(mut self, x: f64, y: f64) -> Self {
        self.transform = self.transform.position(x, y);
        self
    }

    pub const fn size(mut self, w: f64, h: f64) -> Self {
        self.transform = self.transform.scale(w, h);
        self
    }

    pub const fn depth(mut self, z: f64) -> Self {
        self.transform = self.transform.depth(z);
        self
    }

    pub const fn angle(mut self, angle: f64) -> Self {
        self.transform = self.transform.angle(angle);
        self
    }

    pub const fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub const fn stroked(mut self) -> Self {
        self.paint = PaintMode::Stroke;
        self
    }

    pub const fn line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }

    pub const fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

impl Default for NodeProps {
    fn default() -> Self {
        Self::new()
    }
}

//=== SceneNode ===========================================================

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub(crate) id: Option<u32>,
    pub(super) local: Transform,
    pub(super) global: Transform,
    pub(super) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,
    pub(crate) layer: u32,
    pub(crate) rendered: bool,
    visible: bool,
    points: Vec<Point>,
    geometry_ready: bool,
    paint: PaintMode,
    color: Color,
    line_width: f64,

    /// Behavior variant. Temporarily taken out while the node updates so
    /// the behavior can borrow the rest of the game mutably.
    pub(crate) kind: Option<NodeKind>,
}

impl SceneNode {
    //--- Construction -----------------------------------------------------

    /// Creates a detached node; its global transform equals its local one
    /// until it is attached to a parent.
    pub fn new(props: NodeProps, kind: NodeKind) -> Self {
        let local = Transform::new(props.transform);
        Self {
            id: props.id,
            local,
            global: super::arena::derive_global(&local, None),
            parent: None,
            children: Vec::new(),
            layer: 0,
            rendered: false,
            visible: props.visible,
            points: Vec::new(),
            geometry_ready: false,
            paint: props.paint,
            color: props.color,
            line_width: props.line_width,
            kind: Some(kind),
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn id(&self) -> Option<u32> {
        self.id
    }

    pub fn local(&self) -> &Transform {
        &self.local
    }

    pub fn global(&self) -> &Transform {
        &self.global
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    /// Layer stamped by the lifecycle manager when the node was added.
    pub fn layer(&self) -> u32 {
        self.layer
    }

    /// True while the node is registered with the layer collection.
    pub fn is_rendered(&self) -> bool {
        self.rendered
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn set_points(&mut self, points: Vec<Point>) {
        self.points = points;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn paint(&self) -> PaintMode {
        self.paint
    }

    pub fn kind(&self) -> Option<&NodeKind> {
        self.kind.as_ref()
    }

    pub fn kind_mut(&mut self) -> Option<&mut NodeKind> {
        self.kind.as_mut()
    }

    //--- Geometry ---------------------------------------------------------

    /// Marks one-time geometry initialization as done. Returns `true` only
    /// on the first call.
    pub(crate) fn claim_geometry_init(&mut self) -> bool {
        !std::mem::replace(&mut self.geometry_ready, true)
    }

    /// Maps a local point through the global transform to device pixels.
    pub fn to_screen_point(&self, x: f64, y: f64, viewport: Viewport) -> Point {
        viewport.to_pixels(self.global.transform_point(Point::new(x, y)))
    }

    /// Traces `points` as one path in screen space without painting it.
    /// Returns `false` when there is nothing to trace.
    pub fn trace(&self, canvas: &mut dyn Canvas, points: &[Point], close: bool) -> bool {
        let Some((first, rest)) = points.split_first() else {
            return false;
        };
        let viewport = canvas.viewport();

        canvas.begin_path();
        let start = self.to_screen_point(first.x, first.y, viewport);
        canvas.move_to(start.x, start.y);
        for point in rest {
            let p = self.to_screen_point(point.x, point.y, viewport);
            canvas.line_to(p.x, p.y);
        }
        if close {
            canvas.close_path();
        }
        true
    }

    /// Traces and paints `points` with the node's paint mode and `color`.
    pub fn paint_points(&self, canvas: &mut dyn Canvas, points: &[Point], color: Color) {
        if !self.trace(canvas, points, true) {
            return;
        }
        match self.paint {
            PaintMode::Fill => canvas.fill(color),
            PaintMode::Stroke => canvas.stroke(color, self.line_width),
        }
    }

    /// Draws an open polyline regardless of paint mode.
    pub fn stroke_polyline(&self, canvas: &mut dyn Canvas, points: &[Point], color: Color) {
        if self.trace(canvas, points, false) {
            canvas.stroke(color, self.line_width);
        }
    }

    /// Default render: the node's own geometry in its own color.
    pub fn render_geometry(&self, canvas: &mut dyn Canvas) {
        self.paint_points(canvas, &self.points, self.color);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::NodeKind;
    use crate::core::render::{DrawCommand, PathCommand, RecordingCanvas};

    fn unit_square() -> Vec<Point> {
        vec![
            Point::new(-0.5, -0.5),
            Point::new(0.5, -0.5),
            Point::new(0.5, 0.5),
            Point::new(-0.5, 0.5),
        ]
    }

    #[test]
    fn new_node_global_equals_local() {
        let node = SceneNode::new(NodeProps::new().at(0.1, 0.2).size(0.5, 0.5), NodeKind::Shape);
        assert_eq!(node.global(), node.local());
        assert!(node.parent().is_none());
        assert!(!node.is_rendered());
    }

    #[test]
    fn screen_point_normalizes_to_canvas() {
        let node = SceneNode::new(NodeProps::new().at(0.25, 0.0), NodeKind::Shape);
        let p = node.to_screen_point(0.0, 0.0, Viewport::new(400.0, 400.0));
        assert_eq!(p, Point::new(300.0, 200.0));
    }

    #[test]
    fn geometry_init_is_claimed_once() {
        let mut node = SceneNode::new(NodeProps::new(), NodeKind::Shape);
        assert!(node.claim_geometry_init());
        assert!(!node.claim_geometry_init());
    }

    #[test]
    fn render_geometry_fills_closed_path() {
        let mut node = SceneNode::new(NodeProps::new().size(0.5, 0.5).color(Color::rgb(1, 2, 3)), NodeKind::Shape);
        node.set_points(unit_square());

        let mut canvas = RecordingCanvas::new(100, 100);
        let log = canvas.log();
        node.render_geometry(&mut canvas);

        let commands = log.commands();
        assert_eq!(commands.len(), 1);
        let DrawCommand::Fill { color, path } = &commands[0] else {
            panic!("expected a fill, got {:?}", commands[0]);
        };
        assert_eq!(*color, Color::rgb(1, 2, 3));
        assert_eq!(path.len(), 5, "move + three lines + close");
        assert_eq!(path[0], PathCommand::MoveTo(Point::new(25.0, 25.0)));
        assert_eq!(path[4], PathCommand::Close);
    }

    #[test]
    fn stroked_node_strokes() {
        let mut node = SceneNode::new(NodeProps::new().stroked().line_width(3.0), NodeKind::Shape);
        node.set_points(unit_square());

        let mut canvas = RecordingCanvas::new(10, 10);
        let log = canvas.log();
        node.render_geometry(&mut canvas);

        assert!(matches!(log.commands()[0], DrawCommand::Stroke { width, .. } if width == 3.0));
    }

    #[test]
    fn empty_geometry_draws_nothing() {
        let node = SceneNode::new(NodeProps::new(), NodeKind::Shape);
        let mut canvas = RecordingCanvas::new(10, 10);
        let log = canvas.log();
        node.render_geometry(&mut canvas);
        assert!(log.is_empty());
    }
}
