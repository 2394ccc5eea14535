use crate::common::*;

use plotters_backend::{
    BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend, DrawingErrorKind,
};
use std::panic::{self, AssertUnwindSafe};

/* Average glyph advance relative to the font size, used when no font can be measured */
const FALLBACK_ADVANCE_RATIO: f64 = 0.6;

#[doc = r#"
    Drawing backend wrapper that keeps rendering alive when text cannot be rasterised.

    Headless hosts often ship without any system font. The wrapped backend then fails (or
    panics) on the first caption or tick label; here such text is skipped and its size is
    estimated from the font size, so the rest of the chart is still drawn.
"#]
pub struct TextSafeBackend<DB> {
    inner: DB,
}

impl<DB> TextSafeBackend<DB> {
    pub fn new(inner: DB) -> Self {
        Self { inner }
    }
}

pub fn estimate_text_px(text: &str, font_size: f64) -> (u32, u32) {
    let width: f64 = text.chars().count() as f64 * font_size * FALLBACK_ADVANCE_RATIO;
    (width.ceil() as u32, font_size.ceil() as u32)
}

impl<DB: DrawingBackend> DrawingBackend for TextSafeBackend<DB> {
    type ErrorType = DB::ErrorType;

    fn get_size(&self) -> (u32, u32) {
        self.inner.get_size()
    }

    fn ensure_prepared(&mut self) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.ensure_prepared()
    }

    fn present(&mut self) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.present()
    }

    fn draw_pixel(
        &mut self,
        point: BackendCoord,
        color: BackendColor,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_pixel(point, color)
    }

    fn draw_line<S: BackendStyle>(
        &mut self,
        from: BackendCoord,
        to: BackendCoord,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_line(from, to, style)
    }

    fn draw_rect<S: BackendStyle>(
        &mut self,
        upper_left: BackendCoord,
        bottom_right: BackendCoord,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_rect(upper_left, bottom_right, style, fill)
    }

    fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_path(path, style)
    }

    fn draw_circle<S: BackendStyle>(
        &mut self,
        center: BackendCoord,
        radius: u32,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_circle(center, radius, style, fill)
    }

    fn fill_polygon<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        vert: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.fill_polygon(vert, style)
    }

    fn blit_bitmap(
        &mut self,
        pos: BackendCoord,
        (iw, ih): (u32, u32),
        src: &[u8],
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.blit_bitmap(pos, (iw, ih), src)
    }

    fn draw_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        if text.trim().is_empty() {
            return Ok(());
        }

        match panic::catch_unwind(AssertUnwindSafe(|| self.inner.draw_text(text, style, pos))) {
            Ok(Err(DrawingErrorKind::FontError(e))) => {
                debug!("[TextSafeBackend->draw_text] text '{}' skipped: {}", text, e);
                Ok(())
            }
            Ok(result) => result,
            Err(_) => {
                debug!("[TextSafeBackend->draw_text] font rasteriser panicked on '{}'", text);
                Ok(())
            }
        }
    }

    fn estimate_text_size<TStyle: BackendTextStyle>(
        &self,
        text: &str,
        style: &TStyle,
    ) -> Result<(u32, u32), DrawingErrorKind<Self::ErrorType>> {
        match panic::catch_unwind(AssertUnwindSafe(|| self.inner.estimate_text_size(text, style))) {
            Ok(Ok(size)) => Ok(size),
            Ok(Err(DrawingErrorKind::FontError(_))) | Err(_) => {
                Ok(estimate_text_px(text, style.size()))
            }
            Ok(Err(e)) => Err(e),
        }
    }
}
