// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawable surface a chart renders into.
//!
//! A [`Surface`] is an ordered mark list with a fixed outer geometry. The
//! owning [`crate::Chart`] appends marks during `load`; everything else reads.
//! Serialization to an SVG document string is the embedding path for hosts.

use kurbo::{Cap, Join};
use peniko::Brush;

use crate::mark::{Mark, MarkId, MarkPayload, TextAnchor, TextBaseline};

/// An ordered mark list with fixed outer width/height.
#[derive(Debug)]
pub struct Surface {
    width: f64,
    height: f64,
    marks: Vec<Mark>,
    next_id: u64,
}

impl Surface {
    /// Creates an empty surface with the given outer geometry.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            marks: Vec::new(),
            next_id: 0,
        }
    }

    /// Outer width in surface coordinates.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Outer height in surface coordinates.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// The marks appended so far, in insertion order.
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// Appends one payload at the given z-index, assigning the next mark id.
    pub(crate) fn push(&mut self, z_index: i32, payload: MarkPayload) -> MarkId {
        let id = MarkId::from_raw(self.next_id);
        self.next_id += 1;
        self.marks.push(Mark {
            id,
            z_index,
            payload,
        });
        id
    }

    /// Appends a batch of payloads in order.
    pub(crate) fn extend(&mut self, payloads: impl IntoIterator<Item = (i32, MarkPayload)>) {
        for (z, payload) in payloads {
            self.push(z, payload);
        }
    }

    /// Removes every mark. Mark ids keep counting up across clears.
    pub(crate) fn clear(&mut self) {
        self.marks.clear();
    }

    /// Serializes the surface to a standalone SVG document string.
    ///
    /// Marks are emitted sorted by `(z_index, id)`; insertion order breaks
    /// ties only through the monotonically assigned ids.
    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        out.push_str(&format!(
            r#"width="{}" height="{}" viewBox="0 0 {} {}" style="max-width: 100%; height: auto;">"#,
            self.width, self.height, self.width, self.height
        ));
        out.push('\n');

        let mut order: Vec<usize> = (0..self.marks.len()).collect();
        order.sort_by_key(|&i| (self.marks[i].z_index, self.marks[i].id));

        for i in order {
            match &self.marks[i].payload {
                MarkPayload::Path(p) => {
                    let d = p.path.to_svg();
                    out.push_str(&format!(r#"<path d="{d}""#));
                    write_paint_attr(&mut out, "fill", &p.fill, p.fill_opacity);
                    if let Some(stroke) = &p.stroke
                        && p.stroke_width > 0.0
                    {
                        write_paint_attr(&mut out, "stroke", stroke, p.stroke_opacity);
                        out.push_str(&format!(r#" stroke-width="{}""#, p.stroke_width));
                        out.push_str(&format!(r#" stroke-linecap="{}""#, cap_name(p.cap)));
                        out.push_str(&format!(r#" stroke-linejoin="{}""#, join_name(p.join)));
                    }
                    out.push_str("/>\n");
                }
                MarkPayload::Text(t) => {
                    let baseline = match t.baseline {
                        TextBaseline::Alphabetic => "alphabetic",
                        TextBaseline::Middle => "middle",
                        TextBaseline::Hanging => "hanging",
                    };
                    let anchor = match t.anchor {
                        TextAnchor::Start => "start",
                        TextAnchor::Middle => "middle",
                        TextAnchor::End => "end",
                    };
                    out.push_str(&format!(
                        r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{baseline}" text-anchor="{anchor}""#,
                        t.pos.x, t.pos.y, t.font_size
                    ));
                    write_paint_attr(&mut out, "fill", &t.fill, 1.0);
                    out.push('>');
                    out.push_str(&escape_xml(&t.text));
                    out.push_str("</text>\n");
                }
            }
        }

        out.push_str("</svg>\n");
        out
    }
}

fn cap_name(cap: Cap) -> &'static str {
    match cap {
        Cap::Butt => "butt",
        Cap::Round => "round",
        Cap::Square => "square",
    }
}

fn join_name(join: Join) -> &'static str {
    match join {
        Join::Miter => "miter",
        Join::Round => "round",
        Join::Bevel => "bevel",
    }
}

/// Writes `name="#rrggbb"` plus `name-opacity` when the combined alpha is
/// below 1. A fully transparent paint is written as `name="none"`.
fn write_paint_attr(out: &mut String, name: &str, brush: &Brush, extra_opacity: f64) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let alpha = f64::from(rgba.a) / 255.0 * extra_opacity.clamp(0.0, 1.0);
            if alpha <= 0.0 {
                out.push_str(&format!(r#" {name}="none""#));
                return;
            }
            out.push_str(&format!(
                r##" {name}="#{:02x}{:02x}{:02x}""##,
                rgba.r, rgba.g, rgba.b
            ));
            if alpha < 1.0 {
                out.push_str(&format!(r#" {name}-opacity="{alpha}""#));
            }
        }
        _ => {
            out.push_str(&format!(r#" {name}="none""#));
        }
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use kurbo::BezPath;
    use peniko::color::palette::css;

    use super::*;
    use crate::mark::PathMark;

    fn line_payload(stroke_z: i32) -> (i32, MarkPayload) {
        let mut p = BezPath::new();
        p.move_to((0.0, 0.0));
        p.line_to((10.0, 10.0));
        (
            stroke_z,
            MarkPayload::Path(PathMark::stroked(p, css::BLACK, 1.0)),
        )
    }

    #[test]
    fn svg_output_sorts_by_z_index() {
        let mut s = Surface::new(100.0, 50.0);
        let mut series = BezPath::new();
        series.move_to((0.0, 0.0));
        series.line_to((5.0, 5.0));
        s.push(10, MarkPayload::Path(PathMark::stroked(series, css::RED, 1.0)));
        s.extend([line_payload(-50)]);

        let svg = s.to_svg_string();
        let grid_at = svg.find("#000000").expect("missing gridline stroke");
        let series_at = svg.find("#ff0000").expect("missing series stroke");
        assert!(grid_at < series_at, "lower z must serialize first");
    }

    #[test]
    fn transparent_fill_serializes_as_none() {
        let mut s = Surface::new(10.0, 10.0);
        s.extend([line_payload(0)]);
        let svg = s.to_svg_string();
        assert!(svg.contains(r#"fill="none""#), "stroke-only path must not fill");
        assert!(svg.contains(r##"stroke="#000000""##), "missing stroke paint");
    }

    #[test]
    fn text_is_escaped() {
        let mut s = Surface::new(10.0, 10.0);
        s.push(
            40,
            MarkPayload::Text(crate::mark::TextMark {
                pos: kurbo::Point::new(1.0, 2.0),
                text: "a<b&c".into(),
                font_size: 10.0,
                fill: Brush::Solid(css::BLACK),
                anchor: TextAnchor::Start,
                baseline: TextBaseline::Middle,
            }),
        );
        let svg = s.to_svg_string();
        assert!(svg.contains("a&lt;b&amp;c"), "text content must be escaped");
    }

    #[test]
    fn clear_removes_marks_but_ids_keep_counting() {
        let mut s = Surface::new(10.0, 10.0);
        s.extend([line_payload(0)]);
        s.clear();
        let id = s.push(0, line_payload(0).1);
        assert!(s.marks().len() == 1, "clear must empty the mark list");
        assert_eq!(id, MarkId::from_raw(1));
    }
}
