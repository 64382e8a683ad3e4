// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_surface::kurbo::{Circle, Ellipse, RoundedRect, Shape};
use canopy_surface::{
    Affine, Color, ImageView, PATH_TOLERANCE, Paint, PaintStyle, Point, Rect, Surface,
    SurfaceError, image_rect_transform, polygon_path,
};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Object, Stream, dictionary};

use crate::content::{self, bare, named, op};
use crate::{PdfDocument, PdfError};

/// One page of a [`PdfDocument`], drawn through the [`Surface`] trait.
///
/// The page starts with a y-flip so that the origin is the top-left corner
/// and y grows downward.
pub struct PdfPage<'a> {
    doc: &'a mut PdfDocument,
    ops: Vec<Operation>,
    current: Affine,
    stack: Vec<Affine>,
    ext_gstates: Dictionary,
    alpha_states: Vec<(u16, String)>,
    xobjects: Dictionary,
    image_count: usize,
}

impl core::fmt::Debug for PdfPage<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("PdfPage { .. }")
    }
}

impl<'a> PdfPage<'a> {
    pub(crate) fn new(doc: &'a mut PdfDocument) -> Self {
        let flip = Affine::new([1.0, 0.0, 0.0, -1.0, 0.0, doc.height]);
        Self {
            doc,
            ops: vec![content::concat(flip)],
            current: Affine::IDENTITY,
            stack: Vec::new(),
            ext_gstates: Dictionary::new(),
            alpha_states: Vec::new(),
            xobjects: Dictionary::new(),
            image_count: 0,
        }
    }

    /// Adds the page to its document.
    ///
    /// Outstanding saves are closed first.
    pub fn finish(mut self) -> Result<(), PdfError> {
        if !self.stack.is_empty() {
            log::warn!(
                "closing {} unbalanced save(s) at end of PDF page",
                self.stack.len()
            );
            for _ in 0..self.stack.len() {
                self.ops.push(bare("Q"));
            }
        }
        let bytes = Content {
            operations: self.ops,
        }
        .encode()?;
        let doc = self.doc;
        let (width, height) = doc.page_size();
        let content_id = doc.doc.add_object(Stream::new(Dictionary::new(), bytes));
        let page = dictionary! {
            "Type" => "Page",
            "Parent" => doc.pages_id,
            "MediaBox" => vec![Object::Integer(0), Object::Integer(0), width.into(), height.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "ExtGState" => self.ext_gstates,
                "XObject" => self.xobjects,
            },
        };
        doc.add_page(page);
        Ok(())
    }

    /// Name of an `ExtGState` that sets both fill and stroke opacity to `alpha`.
    fn alpha_state(&mut self, alpha: f32) -> String {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "alpha is clamped to 0..=1 before scaling"
        )]
        let key = (alpha.clamp(0.0, 1.0) * 1000.0).round() as u16;
        if let Some((_, name)) = self.alpha_states.iter().find(|(k, _)| *k == key) {
            return name.clone();
        }
        let name = format!("GA{key}");
        let value = f32::from(key) / 1000.0;
        self.ext_gstates.set(
            name.as_str(),
            dictionary! {
                "Type" => "ExtGState",
                "ca" => value,
                "CA" => value,
            },
        );
        self.alpha_states.push((key, name.clone()));
        name
    }

    fn set_color(&mut self, color: Color, stroke: bool) {
        let [r, g, b, a] = color.components;
        let operator = if stroke { "RG" } else { "rg" };
        self.ops.push(op(
            operator,
            &[f64::from(r), f64::from(g), f64::from(b)],
        ));
        if a < 1.0 {
            let name = self.alpha_state(a);
            self.ops.push(named("gs", &name));
        }
    }

    fn paint_with(&mut self, paint: &Paint, emit: impl FnOnce(&mut Vec<Operation>)) {
        self.ops.push(bare("q"));
        match paint.style {
            PaintStyle::Fill => self.set_color(paint.color, false),
            PaintStyle::Stroke { width } => {
                self.set_color(paint.color, true);
                self.ops.push(op("w", &[width]));
                // Round joins, butt caps.
                self.ops.push(op("j", &[1.0]));
                self.ops.push(op("J", &[0.0]));
            }
        }
        emit(&mut self.ops);
        self.ops.push(bare(match paint.style {
            PaintStyle::Fill => "f",
            PaintStyle::Stroke { .. } => "S",
        }));
        self.ops.push(bare("Q"));
    }

    fn paint_shape(&mut self, shape: &impl Shape, paint: &Paint) {
        let path = shape.to_path(PATH_TOLERANCE);
        self.paint_with(paint, |ops| content::path(&path, ops));
    }

    fn embed_image(&mut self, image: ImageView<'_>) -> String {
        let pixels = image.pixels();
        let mut rgb = Vec::with_capacity(pixels.len() / 4 * 3);
        let mut alpha = Vec::with_capacity(pixels.len() / 4);
        for px in pixels.chunks_exact(4) {
            rgb.extend_from_slice(&px[..3]);
            alpha.push(px[3]);
        }
        let (width, height) = (i64::from(image.width()), i64::from(image.height()));
        let smask_id = self.doc.doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width,
                "Height" => height,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
            },
            alpha,
        ));
        let image_id = self.doc.doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width,
                "Height" => height,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "SMask" => smask_id,
            },
            rgb,
        ));
        self.image_count += 1;
        let name = format!("Im{}", self.image_count);
        self.xobjects.set(name.as_str(), Object::Reference(image_id));
        name
    }
}

impl Surface for PdfPage<'_> {
    fn save(&mut self) {
        self.stack.push(self.current);
        self.ops.push(bare("q"));
    }

    fn restore(&mut self) {
        if let Some(transform) = self.stack.pop() {
            self.current = transform;
            self.ops.push(bare("Q"));
        }
    }

    fn save_count(&self) -> usize {
        self.stack.len()
    }

    fn concat(&mut self, transform: Affine) {
        if transform == Affine::IDENTITY {
            return;
        }
        self.current *= transform;
        self.ops.push(content::concat(transform));
    }

    fn clear(&mut self, color: Color) {
        if self.current.determinant().abs() < f64::EPSILON {
            log::warn!("cannot clear a PDF page under a degenerate transform");
            return;
        }
        let (width, height) = self.doc.page_size();
        let page = Rect::new(0.0, 0.0, width, height);
        let undo = self.current.inverse();
        self.ops.push(bare("q"));
        self.ops.push(content::concat(undo));
        self.set_color(color, false);
        self.ops.push(content::rect(page));
        self.ops.push(bare("f"));
        self.ops.push(bare("Q"));
    }

    fn draw_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        self.paint_shape(&Circle::new(center, radius), paint);
    }

    fn draw_oval(&mut self, bounds: Rect, paint: &Paint) {
        self.paint_shape(&Ellipse::from_rect(bounds), paint);
    }

    fn draw_polygon(&mut self, points: &[Point], closed: bool, paint: &Paint) {
        let path = polygon_path(points, closed);
        self.paint_with(paint, |ops| content::path(&path, ops));
    }

    fn draw_rect(&mut self, rect: Rect, paint: &Paint) {
        self.paint_with(paint, |ops| ops.push(content::rect(rect)));
    }

    fn draw_round_rect(&mut self, rect: Rect, radius: f64, paint: &Paint) {
        self.paint_shape(&RoundedRect::from_rect(rect, radius), paint);
    }

    fn draw_image_rect(
        &mut self,
        image: ImageView<'_>,
        src: Rect,
        dst: Rect,
    ) -> Result<(), SurfaceError> {
        image.check_source(src)?;
        if dst.width() == 0.0 || dst.height() == 0.0 {
            return Ok(());
        }
        let name = self.embed_image(image);
        // Image space is the unit square with the first row at the top.
        let (w, h) = (f64::from(image.width()), f64::from(image.height()));
        let placement = image_rect_transform(src, dst) * Affine::new([w, 0.0, 0.0, -h, 0.0, h]);

        self.ops.push(bare("q"));
        self.ops.push(content::rect(dst));
        self.ops.push(bare("W"));
        self.ops.push(bare("n"));
        self.ops.push(content::concat(placement));
        self.ops.push(named("Do", &name));
        self.ops.push(bare("Q"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::Document;

    fn page_operators(bytes: &[u8]) -> Vec<String> {
        let doc = Document::load_mem(bytes).unwrap();
        let (_, page_id) = doc.get_pages().into_iter().next().unwrap();
        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        content.operations.into_iter().map(|o| o.operator).collect()
    }

    #[test]
    fn page_starts_with_flip() {
        let mut doc = PdfDocument::new(200.0, 100.0).unwrap();
        let page = doc.begin_page();
        let first = &page.ops[0];
        assert_eq!(first.operator, "cm");
        let v: Vec<f32> = first.operands.iter().map(|o| o.as_float().unwrap()).collect();
        assert_eq!(v, vec![1.0, 0.0, 0.0, -1.0, 0.0, 100.0]);
    }

    #[test]
    fn stroke_sets_width_and_round_join() {
        let mut doc = PdfDocument::new(100.0, 100.0).unwrap();
        let mut page = doc.begin_page();
        page.draw_polygon(
            &[Point::new(0.0, 0.0), Point::new(10.0, 10.0)],
            false,
            &Paint::stroke(Color::BLACK, 4.0),
        );
        page.finish().unwrap();
        let ops = page_operators(&doc.finish().unwrap());
        assert_eq!(ops, ["cm", "q", "RG", "w", "j", "J", "m", "l", "S", "Q"]);
    }

    #[test]
    fn translucent_fill_uses_ext_gstate() {
        let mut doc = PdfDocument::new(100.0, 100.0).unwrap();
        let mut page = doc.begin_page();
        let paint = Paint::fill(Color::from_rgb8(255, 0, 0).with_alpha(0.5));
        page.draw_rect(Rect::new(0.0, 0.0, 10.0, 10.0), &paint);
        page.draw_rect(Rect::new(10.0, 0.0, 20.0, 10.0), &paint);
        assert_eq!(page.alpha_states.len(), 1, "alpha states are shared");
        page.finish().unwrap();
        let ops = page_operators(&doc.finish().unwrap());
        assert!(ops.iter().any(|o| o == "gs"));
    }

    #[test]
    fn images_embed_an_xobject_with_soft_mask() {
        let px = vec![255_u8, 0, 0, 128, 0, 255, 0, 255];
        let image = ImageView::new(2, 1, &px).unwrap();
        let mut doc = PdfDocument::new(100.0, 100.0).unwrap();
        let mut page = doc.begin_page();
        page.draw_image_rect(
            image,
            Rect::new(0.0, 0.0, 2.0, 1.0),
            Rect::new(10.0, 10.0, 30.0, 20.0),
        )
        .unwrap();
        page.finish().unwrap();
        let bytes = doc.finish().unwrap();

        let ops = page_operators(&bytes);
        assert_eq!(ops, ["cm", "q", "re", "W", "n", "cm", "Do", "Q"]);

        let parsed = Document::load_mem(&bytes).unwrap();
        let image_streams = parsed
            .objects
            .values()
            .filter_map(|o| o.as_stream().ok())
            .filter(|s| {
                s.dict
                    .get(b"Subtype")
                    .and_then(|v| v.as_name())
                    .is_ok_and(|n| n == b"Image")
            })
            .count();
        assert_eq!(image_streams, 2, "color image and soft mask");
    }

    #[test]
    fn placement_maps_source_corners_onto_destination() {
        let src = Rect::new(1.0, 0.0, 3.0, 2.0);
        let dst = Rect::new(10.0, 10.0, 30.0, 30.0);
        let (w, h) = (4.0, 2.0);
        let placement = image_rect_transform(src, dst) * Affine::new([w, 0.0, 0.0, -h, 0.0, h]);
        // Unit-square point (0.25, 1.0) is pixel (1, 0): the source's top-left.
        let top_left = placement * Point::new(0.25, 1.0);
        assert!((top_left - Point::new(10.0, 10.0)).hypot() < 1e-9);
        // (0.75, 0.0) is pixel (3, 2): the source's bottom-right.
        let bottom_right = placement * Point::new(0.75, 0.0);
        assert!((bottom_right - Point::new(30.0, 30.0)).hypot() < 1e-9);
    }

    #[test]
    fn unbalanced_saves_are_closed() {
        let mut doc = PdfDocument::new(100.0, 100.0).unwrap();
        let mut page = doc.begin_page();
        page.save();
        page.save();
        page.restore();
        page.finish().unwrap();
        let ops = page_operators(&doc.finish().unwrap());
        let q = ops.iter().filter(|o| *o == "q").count();
        let big_q = ops.iter().filter(|o| *o == "Q").count();
        assert_eq!(q, big_q);
    }

    #[test]
    fn clear_undoes_the_current_transform() {
        let mut doc = PdfDocument::new(100.0, 50.0).unwrap();
        let mut page = doc.begin_page();
        page.scale(2.0, 2.0);
        let before = page.ops.len();
        page.clear(Color::WHITE);
        let undo = &page.ops[before + 1];
        assert_eq!(undo.operator, "cm");
        let v: Vec<f32> = undo.operands.iter().map(|o| o.as_float().unwrap()).collect();
        assert_eq!(v, vec![0.5, 0.0, 0.0, 0.5, 0.0, 0.0]);
    }
}
