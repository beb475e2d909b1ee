// Headless surface that records draw calls instead of painting them.

use crate::color::Color;
use crate::surface::Surface;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f64,
        height: f64,
    },
    Circle {
        center: [f64; 2],
        radius: f64,
        color: Color,
    },
    Line {
        from: [f64; 2],
        to: [f64; 2],
        color: Color,
        width: f64,
    },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    viewport: (u32, u32),
    size: (u32, u32),
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        RecordingSurface {
            viewport: (width, height),
            size: (0, 0),
            commands: Vec::new(),
        }
    }

    // Changes what the next `viewport_size` reports, like the user resizing the window.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    // Commands issued since the last clear, i.e. the most recent frame.
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|cmd| matches!(cmd, DrawCommand::Clear { .. }))
            .unwrap_or(0);
        &self.commands[start..]
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.last_frame()
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Line { .. }))
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.last_frame()
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Circle { .. }))
    }
}

impl Surface for RecordingSurface {
    fn viewport_size(&self) -> (u32, u32) {
        self.viewport
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn clear_rect(&mut self, _x: f64, _y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, width: f64) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }
}
