//! Browser front-end
//!
//! Draws on a `<canvas>` 2D context and mirrors the score into a text
//! element. DOM wiring and the `setTimeout` loop live in `main.rs`.

use std::f64::consts::TAU;

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement};

use crate::render::{ScoreSink, Surface};

/// 2D canvas surface
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: i32,
    height: i32,
}

impl CanvasSurface {
    /// Wrap a canvas; `None` if it has no 2D context
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            ctx,
            width: canvas.width() as i32,
            height: canvas.height() as i32,
        })
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn stroke_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: &str) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.stroke_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        if self.ctx.arc(cx, cy, radius, 0.0, TAU).is_err() {
            log::warn!("Canvas rejected arc at ({}, {}) r={}", cx, cy, radius);
            return;
        }
        self.ctx.fill();
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: &str) {
        self.ctx.set_font(font);
        self.ctx.set_fill_style_str(color);
        self.ctx.set_text_align("center");
        let _ = self.ctx.fill_text(text, x, y);
    }
}

/// Element whose text content shows the score
pub struct ScoreText {
    el: Element,
}

impl ScoreText {
    pub fn new(el: Element) -> Self {
        Self { el }
    }
}

impl ScoreSink for ScoreText {
    fn set_score(&mut self, score: u32) {
        self.el.set_text_content(Some(&score.to_string()));
    }
}
