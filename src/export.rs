//! Raster export: flattens the scene onto a fixed-size bitmap and encodes
//! it as the downloadable PNG. Camera pan/zoom is ignored; the export always
//! covers the same virtual canvas.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::Result;
use image::{DynamicImage, ImageOutputFormat, Rgba, RgbaImage};

use crate::drawing::{Element, Shape};
use crate::scene::Scene;

pub const EXPORT_WIDTH: u32 = 2000;
pub const EXPORT_HEIGHT: u32 = 1500;
pub const EXPORT_FILE_NAME: &str = "canvas-export.png";

const CIRCLE_SEGMENTS: u32 = 32;
const ARROW_HEAD_LEN: f32 = 20.0;
const ARROW_HEAD_ANGLE: f32 = 0.5;
const STICKY_FILL: [f32; 4] = [1.0, 0.9, 0.5, 1.0];
/// Glyph rasterization is the host's concern; exports mark text extents
/// using the same width approximation the hit-test uses.
const CHAR_WIDTH_FACTOR: f32 = 0.6;

/// Flattens the scene in paint order onto a white bitmap.
pub fn render_scene(scene: &Scene) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(EXPORT_WIDTH, EXPORT_HEIGHT, Rgba([255, 255, 255, 255]));
    for element in scene.elements() {
        draw_element(&mut image, element);
    }
    image
}

/// Renders and PNG-encodes the scene.
pub fn export_png(scene: &Scene) -> Result<Vec<u8>> {
    let image = render_scene(scene);
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(image).write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)?;
    Ok(bytes)
}

/// Writes the export into `dir` under the fixed download name.
pub fn write_export(scene: &Scene, dir: &Path) -> Result<PathBuf> {
    let bytes = export_png(scene)?;
    let path = dir.join(EXPORT_FILE_NAME);
    fs::write(&path, bytes)?;
    log::info!("exported canvas to {}", path.display());
    Ok(path)
}

fn draw_element(image: &mut RgbaImage, element: &Element) {
    let color = [
        element.color[0],
        element.color[1],
        element.color[2],
        element.color[3] * element.opacity,
    ];
    let width = element.stroke_width;

    match &element.shape {
        Shape::Rectangle {
            x,
            y,
            width: w,
            height: h,
        } => {
            stroke_rect(image, [*x, *y], [*w, *h], color, width);
        }
        Shape::Circle { x, y, radius } => {
            for i in 0..CIRCLE_SEGMENTS {
                let angle1 = (i as f32 * 2.0 * std::f32::consts::PI) / CIRCLE_SEGMENTS as f32;
                let angle2 =
                    ((i + 1) as f32 * 2.0 * std::f32::consts::PI) / CIRCLE_SEGMENTS as f32;
                let p1 = [x + angle1.cos() * radius, y + angle1.sin() * radius];
                let p2 = [x + angle2.cos() * radius, y + angle2.sin() * radius];
                draw_line(image, p1, p2, color, width);
            }
        }
        Shape::Line { x1, y1, x2, y2 } => {
            draw_line(image, [*x1, *y1], [*x2, *y2], color, width);
        }
        Shape::Arrow { x1, y1, x2, y2 } => {
            let start = [*x1, *y1];
            let end = [*x2, *y2];
            draw_line(image, start, end, color, width);

            let len = ((end[0] - start[0]).powi(2) + (end[1] - start[1]).powi(2)).sqrt();
            if len > 0.0 {
                let dir_x = (end[0] - start[0]) / len;
                let dir_y = (end[1] - start[1]) / len;
                let cos_angle = ARROW_HEAD_ANGLE.cos();
                let sin_angle = ARROW_HEAD_ANGLE.sin();

                let left = [
                    end[0] - ARROW_HEAD_LEN * (dir_x * cos_angle - dir_y * sin_angle),
                    end[1] - ARROW_HEAD_LEN * (dir_y * cos_angle + dir_x * sin_angle),
                ];
                let right = [
                    end[0] - ARROW_HEAD_LEN * (dir_x * cos_angle + dir_y * sin_angle),
                    end[1] - ARROW_HEAD_LEN * (dir_y * cos_angle - dir_x * sin_angle),
                ];
                draw_line(image, end, left, color, width);
                draw_line(image, end, right, color, width);
            }
        }
        Shape::Path { points } => {
            if points.len() == 1 {
                draw_line(image, points[0], points[0], color, width);
            }
            for pair in points.windows(2) {
                draw_line(image, pair[0], pair[1], color, width);
            }
        }
        Shape::Text {
            x,
            y,
            text,
            font_size,
        } => {
            let text_width = text.chars().count() as f32 * font_size * CHAR_WIDTH_FACTOR;
            let text_height = font_size * 1.2;
            stroke_rect(image, [*x, y - font_size], [text_width, text_height], color, 1.0);
            draw_line(image, [*x, *y], [x + text_width, *y], color, 1.5);
        }
        Shape::StickyNote {
            x,
            y,
            width: w,
            height: h,
            ..
        } => {
            let fill = [
                STICKY_FILL[0],
                STICKY_FILL[1],
                STICKY_FILL[2],
                STICKY_FILL[3] * element.opacity,
            ];
            fill_rect(image, [*x, *y], [*w, *h], fill);
            stroke_rect(image, [*x, *y], [*w, *h], color, width);
        }
        Shape::Image {
            x,
            y,
            width: w,
            height: h,
            ..
        } => {
            // Decoding embedded image data is the host's concern; the
            // export marks the reserved area with a frame.
            stroke_rect(image, [*x, *y], [*w, *h], color, width);
            draw_line(image, [*x, *y], [x + w, y + h], color, 1.0);
            draw_line(image, [x + w, *y], [*x, y + h], color, 1.0);
        }
    }
}

fn stroke_rect(image: &mut RgbaImage, pos: [f32; 2], size: [f32; 2], color: [f32; 4], width: f32) {
    let [x, y] = pos;
    let [w, h] = size;
    draw_line(image, [x, y], [x + w, y], color, width);
    draw_line(image, [x + w, y], [x + w, y + h], color, width);
    draw_line(image, [x + w, y + h], [x, y + h], color, width);
    draw_line(image, [x, y + h], [x, y], color, width);
}

fn fill_rect(image: &mut RgbaImage, pos: [f32; 2], size: [f32; 2], color: [f32; 4]) {
    if !(pos[0].is_finite() && pos[1].is_finite() && size[0].is_finite() && size[1].is_finite()) {
        return;
    }
    let x0 = (pos[0].floor() as i64).max(0);
    let y0 = (pos[1].floor() as i64).max(0);
    let x1 = ((pos[0] as f64 + size[0] as f64).ceil() as i64).min(image.width() as i64);
    let y1 = ((pos[1] as f64 + size[1] as f64).ceil() as i64).min(image.height() as i64);
    for py in y0..y1 {
        for px in x0..x1 {
            blend_pixel(image, px, py, color);
        }
    }
}

/// Portion of `t` in `0..=1` where `start + t * delta` stays within
/// `lo..=hi`. `None` when the segment never enters the band.
fn clip_span(start: f64, delta: f64, lo: f64, hi: f64) -> Option<(f64, f64)> {
    if delta == 0.0 {
        return (start >= lo && start <= hi).then_some((0.0, 1.0));
    }
    let (mut t0, mut t1) = ((lo - start) / delta, (hi - start) / delta);
    if t0 > t1 {
        std::mem::swap(&mut t0, &mut t1);
    }
    let t0 = t0.max(0.0);
    let t1 = t1.min(1.0);
    (t0 <= t1).then_some((t0, t1))
}

/// Stamps a round brush along the segment, one step per pixel of length.
/// The segment is clipped to the bitmap first, so only the visible stretch
/// is stepped; non-finite coordinates draw nothing. Loaded payloads can
/// carry both.
fn draw_line(image: &mut RgbaImage, a: [f32; 2], b: [f32; 2], color: [f32; 4], width: f32) {
    let finite = a[0].is_finite()
        && a[1].is_finite()
        && b[0].is_finite()
        && b[1].is_finite()
        && width.is_finite();
    if !finite {
        return;
    }
    let radius = (width / 2.0).max(0.5).min(image.width().max(image.height()) as f32);
    let reach = radius.ceil() as i64;
    let pad = radius as f64;

    let (ax, ay) = (a[0] as f64, a[1] as f64);
    let (dx, dy) = (b[0] as f64 - ax, b[1] as f64 - ay);
    let x_span = clip_span(ax, dx, -pad, image.width() as f64 + pad);
    let y_span = clip_span(ay, dy, -pad, image.height() as f64 + pad);
    let (t0, t1) = match (x_span, y_span) {
        (Some((x0, x1)), Some((y0, y1))) => (x0.max(y0), x1.min(y1)),
        _ => return,
    };
    if t0 > t1 {
        return;
    }

    let (sx, sy) = (ax + dx * t0, ay + dy * t0);
    let (ex, ey) = (ax + dx * t1, ay + dy * t1);
    let length = ((ex - sx).powi(2) + (ey - sy).powi(2)).sqrt();
    let steps = (length.ceil() as i64).max(1);

    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let cx = (sx + (ex - sx) * t).round() as i64;
        let cy = (sy + (ey - sy) * t).round() as i64;
        for py in (cy - reach).max(0)..=(cy + reach).min(image.height() as i64 - 1) {
            for px in (cx - reach).max(0)..=(cx + reach).min(image.width() as i64 - 1) {
                let fx = (px - cx) as f32;
                let fy = (py - cy) as f32;
                if fx * fx + fy * fy <= radius * radius {
                    blend_pixel(image, px, py, color);
                }
            }
        }
    }
}

fn blend_pixel(image: &mut RgbaImage, x: i64, y: i64, color: [f32; 4]) {
    if x < 0 || y < 0 || x >= image.width() as i64 || y >= image.height() as i64 {
        return;
    }
    let alpha = color[3].clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }
    let pixel = image.get_pixel_mut(x as u32, y as u32);
    for c in 0..3 {
        let src = color[c].clamp(0.0, 1.0) * 255.0;
        let dst = pixel.0[c] as f32;
        pixel.0[c] = (src * alpha + dst * (1.0 - alpha)).round() as u8;
    }
    pixel.0[3] = 255;
}
