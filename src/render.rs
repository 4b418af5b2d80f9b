use std::io::Cursor;

use anyhow::{Context, Result};
use eframe::egui::{Color32, Vec2, vec2};
use image::{ImageFormat, Rgba, RgbaImage};

use crate::encode::VisualGraph;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const OUTLINE: Color32 = Color32::from_rgb(40, 40, 40);
const AXIS: Color32 = Color32::from_rgb(120, 120, 120);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub margin: f32,
}

impl RenderOptions {
    pub const NETWORK: Self = Self {
        width: 1400,
        height: 1000,
        margin: 60.0,
    };

    pub const CHART: Self = Self {
        width: 1500,
        height: 600,
        margin: 40.0,
    };
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::NETWORK
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Nothing to draw; the caller shows its empty-state notice instead.
    Empty,
    Png(Vec<u8>),
}

impl RenderOutcome {
    pub fn into_png(self) -> Option<Vec<u8>> {
        match self {
            Self::Empty => None,
            Self::Png(bytes) => Some(bytes),
        }
    }
}

fn rgba(color: Color32) -> Rgba<u8> {
    Rgba([color.r(), color.g(), color.b(), 255])
}

fn to_canvas(options: &RenderOptions, position: Vec2) -> Vec2 {
    let span = vec2(
        (options.width as f32 - options.margin * 2.0).max(1.0),
        (options.height as f32 - options.margin * 2.0).max(1.0),
    );
    vec2(
        options.margin + (position.x + 1.0) * 0.5 * span.x,
        options.margin + (position.y + 1.0) * 0.5 * span.y,
    )
}

fn pixel_range(low: f32, high: f32, limit: u32) -> std::ops::Range<u32> {
    let start = low.floor().max(0.0) as u32;
    let end = (high.ceil().max(0.0) as u32).saturating_add(1).min(limit);
    start.min(end)..end
}

fn fill_disc(image: &mut RgbaImage, center: Vec2, radius: f32, color: Rgba<u8>) {
    let radius_sq = radius * radius;
    for y in pixel_range(center.y - radius, center.y + radius, image.height()) {
        for x in pixel_range(center.x - radius, center.x + radius, image.width()) {
            let offset = vec2(x as f32, y as f32) - center;
            if offset.length_sq() <= radius_sq {
                image.put_pixel(x, y, color);
            }
        }
    }
}

fn draw_segment(image: &mut RgbaImage, start: Vec2, end: Vec2, width: f32, color: Rgba<u8>) {
    let half = (width * 0.5).max(0.5);
    let span = end - start;
    let length_sq = span.length_sq();

    let xs = pixel_range(
        start.x.min(end.x) - half,
        start.x.max(end.x) + half,
        image.width(),
    );
    let ys = pixel_range(
        start.y.min(end.y) - half,
        start.y.max(end.y) + half,
        image.height(),
    );
    for y in ys {
        for x in xs.clone() {
            let point = vec2(x as f32, y as f32);
            let t = if length_sq > f32::EPSILON {
                ((point - start).dot(span) / length_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let closest = start + span * t;
            if (point - closest).length() <= half {
                image.put_pixel(x, y, color);
            }
        }
    }
}

fn fill_rect(image: &mut RgbaImage, min: Vec2, max: Vec2, color: Rgba<u8>) {
    for y in pixel_range(min.y, max.y - 1.0, image.height()) {
        for x in pixel_range(min.x, max.x - 1.0, image.width()) {
            image.put_pixel(x, y, color);
        }
    }
}

fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .context("failed to encode PNG")?;
    Ok(bytes)
}

/// Rasterizes the network: bucket-colored edges under outlined node discs.
pub fn render_network_png(visual: &VisualGraph, options: &RenderOptions) -> Result<RenderOutcome> {
    if visual.is_empty() {
        return Ok(RenderOutcome::Empty);
    }

    let mut image = RgbaImage::from_pixel(options.width, options.height, BACKGROUND);
    let canvas = visual
        .nodes
        .iter()
        .map(|node| to_canvas(options, node.position))
        .collect::<Vec<_>>();

    for edge in &visual.edges {
        let (Some(&start), Some(&end)) = (canvas.get(edge.from), canvas.get(edge.to)) else {
            continue;
        };
        draw_segment(&mut image, start, end, edge.width, rgba(edge.bucket.color()));
    }

    for (node, &center) in visual.nodes.iter().zip(&canvas) {
        fill_disc(&mut image, center, node.radius, rgba(OUTLINE));
        let inner = (node.radius - 1.5).max(1.0);
        fill_disc(&mut image, center, inner, rgba(node.color));
    }

    encode_png(&image).map(RenderOutcome::Png)
}

/// Rasterizes the score chart: one bar per filtered row, height proportional
/// to the score, colored by bucket.
pub fn render_score_chart_png(
    visual: &VisualGraph,
    options: &RenderOptions,
) -> Result<RenderOutcome> {
    if visual.bars.is_empty() {
        return Ok(RenderOutcome::Empty);
    }

    let mut image = RgbaImage::from_pixel(options.width, options.height, BACKGROUND);
    let left = options.margin;
    let right = options.width as f32 - options.margin;
    let top = options.margin;
    let baseline = options.height as f32 - options.margin;
    let plot_height = (baseline - top).max(1.0);

    let slot = (right - left).max(1.0) / visual.bars.len() as f32;
    let gap = (slot * 0.2).min(8.0);
    for (index, bar) in visual.bars.iter().enumerate() {
        let score = bar.score.unwrap_or(0.0).clamp(0.0, 1.0) as f32;
        let x = left + slot * index as f32;
        let height = score * plot_height;
        fill_rect(
            &mut image,
            vec2(x + gap * 0.5, baseline - height),
            vec2(x + slot - gap * 0.5, baseline),
            rgba(bar.bucket.color()),
        );
    }

    draw_segment(
        &mut image,
        vec2(left, baseline),
        vec2(right, baseline),
        1.5,
        rgba(AXIS),
    );
    draw_segment(&mut image, vec2(left, top), vec2(left, baseline), 1.5, rgba(AXIS));

    encode_png(&image).map(RenderOutcome::Png)
}
