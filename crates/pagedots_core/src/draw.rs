//! Draw Context - Rendering API for widgets
//!
//! Widgets paint through the `DrawContext` trait. A backend maps the calls
//! onto its canvas; `RecordingContext` keeps them as `DrawCommand`s so tests
//! and tooling can inspect exactly what a widget drew.
//!
//! # Example
//!
//! ```ignore
//! fn paint(ctx: &mut dyn DrawContext) {
//!     ctx.push_transform(Transform::translate(10.0, 0.0));
//!     ctx.fill_rect(Rect::new(0.0, 0.0, 100.0, 50.0), 8.0.into(), Color::WHITE);
//!     ctx.pop_transform();
//! }
//! ```

use smallvec::SmallVec;

use crate::color::Color;
use crate::geometry::{CornerRadius, Rect, Size, Transform};

/// The drawing interface widgets render through
///
/// Transforms compose: a pushed transform applies on top of everything
/// already on the stack until the matching pop.
pub trait DrawContext {
    // ─────────────────────────────────────────────────────────────────────────
    // Transform Stack
    // ─────────────────────────────────────────────────────────────────────────

    /// Push a transform onto the stack
    fn push_transform(&mut self, transform: Transform);

    /// Pop the top transform from the stack
    fn pop_transform(&mut self);

    /// Get the current combined transform
    fn current_transform(&self) -> Transform;

    // ─────────────────────────────────────────────────────────────────────────
    // 2D Drawing Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Fill a (possibly rounded) rectangle
    fn fill_rect(&mut self, rect: Rect, corner_radius: CornerRadius, color: Color);

    /// Size of the drawable area
    fn viewport_size(&self) -> Size;
}

/// Convenience helpers available on every `DrawContext`
pub trait DrawContextExt: DrawContext {
    /// Run `f` with `transform` pushed, popping it afterwards
    fn with_transform<F: FnOnce(&mut Self)>(&mut self, transform: Transform, f: F) {
        self.push_transform(transform);
        f(self);
        self.pop_transform();
    }

    /// Fill a rectangle with the same radius on every corner
    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.fill_rect(rect, CornerRadius::uniform(radius), color);
    }
}

impl<T: DrawContext + ?Sized> DrawContextExt for T {}

// ─────────────────────────────────────────────────────────────────────────────
// Recording Draw Context
// ─────────────────────────────────────────────────────────────────────────────

/// A draw command that can be recorded and replayed
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    PushTransform(Transform),
    PopTransform,
    FillRect {
        rect: Rect,
        corner_radius: CornerRadius,
        color: Color,
    },
}

/// A recorded fill with the transform stack applied
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedFill {
    /// Bounds in viewport coordinates
    pub rect: Rect,
    pub corner_radius: CornerRadius,
    pub color: Color,
}

/// A draw context that records commands for later execution
#[derive(Debug, Default)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    transform_stack: SmallVec<[Transform; 4]>,
    viewport: Size,
}

impl RecordingContext {
    /// Create a new recording context
    pub fn new(viewport: Size) -> Self {
        let mut transform_stack = SmallVec::new();
        transform_stack.push(Transform::IDENTITY);
        Self {
            commands: Vec::new(),
            transform_stack,
            viewport,
        }
    }

    /// Get the recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Replay the recorded commands and return every fill in viewport space
    pub fn device_fills(&self) -> Vec<ResolvedFill> {
        let mut stack: SmallVec<[Transform; 4]> = SmallVec::new();
        stack.push(Transform::IDENTITY);
        let mut fills = Vec::new();

        for command in &self.commands {
            match command {
                DrawCommand::PushTransform(transform) => {
                    let current = stack.last().copied().unwrap_or_default();
                    stack.push(current.then(transform));
                }
                DrawCommand::PopTransform => {
                    if stack.len() > 1 {
                        stack.pop();
                    }
                }
                DrawCommand::FillRect {
                    rect,
                    corner_radius,
                    color,
                } => {
                    let current = stack.last().copied().unwrap_or_default();
                    fills.push(ResolvedFill {
                        rect: current.transform_rect(*rect),
                        corner_radius: *corner_radius,
                        color: *color,
                    });
                }
            }
        }

        fills
    }
}

impl DrawContext for RecordingContext {
    fn push_transform(&mut self, transform: Transform) {
        self.commands.push(DrawCommand::PushTransform(transform));
        let combined = self.current_transform().then(&transform);
        self.transform_stack.push(combined);
    }

    fn pop_transform(&mut self) {
        self.commands.push(DrawCommand::PopTransform);
        if self.transform_stack.len() > 1 {
            self.transform_stack.pop();
        } else {
            tracing::warn!("pop_transform called on an empty transform stack");
        }
    }

    fn current_transform(&self) -> Transform {
        self.transform_stack.last().copied().unwrap_or_default()
    }

    fn fill_rect(&mut self, rect: Rect, corner_radius: CornerRadius, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            corner_radius,
            color,
        });
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_context() {
        let mut ctx = RecordingContext::new(Size::new(800.0, 600.0));

        ctx.push_transform(Transform::translate(10.0, 20.0));
        ctx.fill_rect(Rect::new(0.0, 0.0, 100.0, 50.0), 8.0.into(), Color::BLUE);
        ctx.pop_transform();

        assert_eq!(ctx.commands().len(), 3);
        assert_eq!(ctx.viewport_size(), Size::new(800.0, 600.0));
    }

    #[test]
    fn test_transform_stack_composes() {
        let mut ctx = RecordingContext::new(Size::new(800.0, 600.0));

        ctx.push_transform(Transform::translate(10.0, 20.0));
        ctx.push_transform(Transform::translate(5.0, 0.0));
        assert_eq!(ctx.current_transform().translation(), (15.0, 20.0));

        ctx.pop_transform();
        ctx.pop_transform();
        assert!(ctx.current_transform().is_identity());

        // Should not panic when popping past the root
        ctx.pop_transform();
        assert!(ctx.current_transform().is_identity());
    }

    #[test]
    fn test_device_fills_apply_transforms() {
        let mut ctx = RecordingContext::new(Size::new(800.0, 600.0));

        ctx.fill_rounded_rect(Rect::new(20.0, 0.0, 100.0, 50.0), 10.0, Color::GRAY);
        ctx.with_transform(Transform::translate(120.0, 0.0), |ctx| {
            ctx.fill_rounded_rect(Rect::new(20.0, 0.0, 100.0, 50.0), 10.0, Color::WHITE);
        });

        let fills = ctx.device_fills();
        assert_eq!(fills.len(), 2);
        assert_eq!(fills[0].rect.x(), 20.0);
        assert_eq!(fills[1].rect.x(), 140.0);
        assert_eq!(fills[1].color, Color::WHITE);
        assert_eq!(fills[1].corner_radius, CornerRadius::uniform(10.0));
    }
}
