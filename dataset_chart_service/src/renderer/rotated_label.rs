use plotters::element::{Drawable, PointCollection};
use plotters::prelude::*;
use plotters_backend::{BackendColor, BackendCoord, BackendTextStyle, DrawingErrorKind};

use std::f64::consts::FRAC_1_SQRT_2;
use std::panic::{self, AssertUnwindSafe};

type LayoutBox = ((i32, i32), (i32, i32));

#[doc = r#"
    Tick label drawn at 45 degrees, reading upwards to the right and ending at `anchor`.

    The backend transform only rotates text in quarter turns, so the text is rasterised
    upright and every covered pixel is rotated into place. A label whose font cannot be
    rasterised is skipped.
"#]
pub struct RotatedLabel<'a> {
    text: String,
    anchor: BackendCoord,
    style: TextStyle<'a>,
}

impl<'a> RotatedLabel<'a> {
    pub fn new(text: impl Into<String>, anchor: BackendCoord, style: TextStyle<'a>) -> Self {
        Self {
            text: text.into(),
            anchor,
            style,
        }
    }

    fn rasterise(&self) -> Option<(LayoutBox, Vec<(i32, i32, BackendColor)>)> {
        let layout = panic::catch_unwind(AssertUnwindSafe(|| self.style.layout_box(&self.text)))
            .ok()?
            .ok()?;

        let mut pixels: Vec<(i32, i32, BackendColor)> = Vec::new();
        let drawn = panic::catch_unwind(AssertUnwindSafe(|| {
            self.style.draw(&self.text, (0, 0), |x, y, color| {
                pixels.push((x, y, color));
                Ok::<(), ()>(())
            })
        }));

        match drawn {
            Ok(Ok(Ok(()))) => Some((layout, pixels)),
            _ => None,
        }
    }
}

impl<'b, 'a> PointCollection<'b, BackendCoord> for &'b RotatedLabel<'a> {
    type Point = &'b BackendCoord;
    type IntoIter = std::iter::Once<&'b BackendCoord>;

    fn point_iter(self) -> Self::IntoIter {
        std::iter::once(&self.anchor)
    }
}

impl<'a, DB: DrawingBackend> Drawable<DB> for RotatedLabel<'a> {
    fn draw<I: Iterator<Item = BackendCoord>>(
        &self,
        mut points: I,
        backend: &mut DB,
        _parent_dim: (u32, u32),
    ) -> Result<(), DrawingErrorKind<DB::ErrorType>> {
        let Some((ax, ay)) = points.next() else {
            return Ok(());
        };

        if self.text.trim().is_empty() {
            return Ok(());
        }

        let Some((((min_x, min_y), (max_x, max_y)), pixels)) = self.rasterise() else {
            return Ok(());
        };

        let width: f64 = (max_x - min_x) as f64;
        let half_height: f64 = (max_y - min_y) as f64 / 2.0;
        let (w, h) = backend.get_size();

        for (x, y, color) in pixels {
            /* text-local offsets with the right end of the baseline box at the origin */
            let lx: f64 = (x - min_x) as f64 - width;
            let ly: f64 = (y - min_y) as f64 - half_height;

            let px: i32 = ax + ((lx + ly) * FRAC_1_SQRT_2).round() as i32;
            let py: i32 = ay + ((ly - lx) * FRAC_1_SQRT_2).round() as i32;

            /* rotation leaves holes between diagonal neighbours, a second pixel closes them */
            for px in [px, px + 1] {
                if px >= 0 && py >= 0 && (px as u32) < w && (py as u32) < h {
                    backend.draw_pixel((px, py), color.clone())?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_exposes_its_anchor_as_the_only_point() {
        let label: RotatedLabel<'_> =
            RotatedLabel::new("Laptop", (120, 400), ("sans-serif", 13).into_font().into());
        let points: Vec<&BackendCoord> = (&label).point_iter().collect();
        assert_eq!(points, vec![&(120, 400)]);
    }
}
