//! SVG document surface.
//!
//! Accumulates drawing calls as SVG elements so a scene can be written to disk
//! without a browser. [`SvgSurface::finish`] wraps the body in an `<svg>` root.

#[cfg(test)]
#[path = "svg_test.rs"]
mod svg_test;

use std::fmt::Write as _;

use crate::camera::Point;
use crate::input::Rect;
use crate::render::{Stroke, Surface};

#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    body: String,
}

impl SvgSurface {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, body: String::new() }
    }

    /// Element markup drawn since the last clear.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Complete standalone SVG document.
    #[must_use]
    pub fn finish(&self) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">{body}</svg>"#,
            w = self.width,
            h = self.height,
            body = self.body,
        )
    }

    fn stroke_attrs(&mut self, stroke: &Stroke) -> std::fmt::Result {
        write!(self.body, r#" stroke="{}" stroke-width="{}""#, stroke.color, stroke.width)?;
        if !stroke.dash.is_empty() {
            let dash = stroke
                .dash
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            write!(self.body, r#" stroke-dasharray="{dash}""#)?;
        }
        Ok(())
    }
}

impl Surface for SvgSurface {
    type Error = std::fmt::Error;

    fn clear(&mut self, width: f64, height: f64, fill: &str) -> std::fmt::Result {
        self.width = width;
        self.height = height;
        self.body.clear();
        write!(self.body, r#"<rect x="0" y="0" width="{width:.2}" height="{height:.2}" fill="{fill}"/>"#)
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke) -> std::fmt::Result {
        write!(
            self.body,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" fill="none""#,
            from.x, from.y, to.x, to.y
        )?;
        self.stroke_attrs(stroke)?;
        self.body.push_str("/>");
        Ok(())
    }

    fn fill_box(&mut self, rect: Rect, fill: &str) -> std::fmt::Result {
        write!(
            self.body,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{fill}"/>"#,
            rect.x, rect.y, rect.width, rect.height
        )
    }

    fn stroke_box(&mut self, rect: Rect, stroke: &Stroke) -> std::fmt::Result {
        write!(
            self.body,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none""#,
            rect.x, rect.y, rect.width, rect.height
        )?;
        self.stroke_attrs(stroke)?;
        self.body.push_str("/>");
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, radius: f64, fill: &str, outline: &Stroke) -> std::fmt::Result {
        write!(
            self.body,
            r#"<circle cx="{:.2}" cy="{:.2}" r="{radius:.2}" fill="{fill}""#,
            center.x, center.y
        )?;
        self.stroke_attrs(outline)?;
        self.body.push_str("/>");
        Ok(())
    }
}
