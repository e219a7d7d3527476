use vello_cpu::kurbo::Shape as _;

use crate::{
    foundation::{
        core::{Canvas, Point, StrokeStyle},
        error::{StrokecastError, StrokecastResult},
        math::EPSILON,
    },
    render::frame::FrameRGBA,
    shape::{
        descriptor::Segment,
        mapper::{ArcSweep, PathProgress, StrokeGeometry},
    },
};

/// Flattening tolerance for arcs and cap circles, in pixels.
const PATH_TOLERANCE: f64 = 0.1;

/// A fully transparent surface of the canvas size.
pub fn blank_canvas(canvas: Canvas) -> StrokecastResult<vello_cpu::Pixmap> {
    let (w, h) = surface_size(canvas)?;
    Ok(vello_cpu::Pixmap::new(w, h))
}

/// Strokes mapped geometry onto a fresh canvas with `vello_cpu`.
///
/// Strokes use butt caps; round ends and joints come from filled circles of
/// [`StrokeStyle::cap_radius`] centered on each cap point.
#[derive(Clone, Copy, Debug)]
pub struct CpuRasterizer {
    canvas: Canvas,
    width: u16,
    height: u16,
}

impl CpuRasterizer {
    /// Fails when `canvas` is empty or too large to rasterize.
    pub fn new(canvas: Canvas) -> StrokecastResult<Self> {
        let (width, height) = surface_size(canvas)?;
        Ok(Self {
            canvas,
            width,
            height,
        })
    }

    /// Rasterize one frame.
    pub fn render(
        &self,
        geometry: &StrokeGeometry,
        style: &StrokeStyle,
    ) -> StrokecastResult<FrameRGBA> {
        let mut pixmap = blank_canvas(self.canvas)?;
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        // Caps and joints overlap the strokes; paint opaque and apply alpha once for the
        // whole frame so overlaps do not darken.
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            style.color.r,
            style.color.g,
            style.color.b,
            255,
        ));
        ctx.set_stroke(
            vello_cpu::kurbo::Stroke::new(f64::from(style.width))
                .with_caps(vello_cpu::kurbo::Cap::Butt),
        );

        let translucent = style.color.a < 255;
        if translucent {
            ctx.push_opacity_layer(f32::from(style.color.a) / 255.0);
        }
        match geometry {
            StrokeGeometry::Arc(arc) => draw_arc(&mut ctx, arc, style),
            StrokeGeometry::Path(path) => draw_path(&mut ctx, path, style),
        }
        if translucent {
            ctx.pop_layer();
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        FrameRGBA::from_premul(
            self.canvas.width,
            self.canvas.height,
            pixmap.data_as_u8_slice(),
        )
    }
}

fn draw_arc(ctx: &mut vello_cpu::RenderContext, arc: &ArcSweep, style: &StrokeStyle) {
    // Centerline sits half a stroke inside the radius so the outer edge lands on it.
    let inset = style.half_width();
    if arc.sweep_angle > EPSILON {
        let r = (arc.radius - inset).max(0.0);
        let shape = vello_cpu::kurbo::Arc {
            center: point_to_cpu(arc.center),
            radii: vello_cpu::kurbo::Vec2::new(r, r),
            start_angle: arc.start_angle,
            sweep_angle: arc.sweep_angle,
            x_rotation: 0.0,
        };
        ctx.stroke_path(&shape.to_path(PATH_TOLERANCE));
    }
    for p in arc.cap_points(inset) {
        fill_cap(ctx, p, style.cap_radius());
    }
}

fn draw_path(ctx: &mut vello_cpu::RenderContext, path: &PathProgress, style: &StrokeStyle) {
    for seg in path.strokes() {
        if seg.length() > EPSILON {
            ctx.stroke_path(&segment_to_cpu(seg));
        }
    }
    for &p in &path.caps {
        fill_cap(ctx, p, style.cap_radius());
    }
}

fn fill_cap(ctx: &mut vello_cpu::RenderContext, center: Point, radius: f64) {
    let circle = vello_cpu::kurbo::Circle::new(point_to_cpu(center), radius);
    ctx.fill_path(&circle.to_path(PATH_TOLERANCE));
}

fn surface_size(canvas: Canvas) -> StrokecastResult<(u16, u16)> {
    canvas.validate()?;
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| StrokecastError::validation("canvas width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| StrokecastError::validation("canvas height exceeds u16"))?;
    Ok((w, h))
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn segment_to_cpu(seg: &Segment) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    out.move_to(point_to_cpu(seg.start));
    out.line_to(point_to_cpu(seg.end));
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
