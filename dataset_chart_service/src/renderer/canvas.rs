use crate::common::*;

use crate::renderer::{text_safe_backend::*, theme::*};

use plotters::coord::Shift;
use plotters::prelude::*;

/* 10 x 6 units at 100 px per unit */
pub const CANVAS_WIDTH: u32 = 1000;
pub const CANVAS_HEIGHT: u32 = 600;

pub type ChartBackend<'b> = TextSafeBackend<BitMapBackend<'b>>;
pub type CanvasArea<'b> = DrawingArea<ChartBackend<'b>, Shift>;

#[doc = r#"
    Per-call raster surface.

    The drawing area only lives inside `paint`, borrowing the pixel buffer, and the buffer
    itself is owned by the canvas. Whatever way a render exits, dropping the canvas is all
    the cleanup there is.
"#]
#[derive(Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize * 3],
        }
    }

    #[doc = "Fills the background, hands the root area to `painter` and flushes the result into the buffer."]
    pub fn paint<F>(&mut self, painter: F) -> anyhow::Result<()>
    where
        F: for<'b> FnOnce(&CanvasArea<'b>) -> anyhow::Result<()>,
    {
        let backend: ChartBackend<'_> = TextSafeBackend::new(BitMapBackend::with_buffer(
            &mut self.pixels,
            (self.width, self.height),
        ));
        let root: CanvasArea<'_> = backend.into_drawing_area();

        root.fill(&BACKGROUND)?;
        painter(&root)?;
        root.present()
            .context("[Canvas->paint] failed to flush the drawing area")?;

        Ok(())
    }

    #[doc = "Encodes the raster as an 8-bit RGB PNG."]
    pub fn into_png(self) -> anyhow::Result<Vec<u8>> {
        let mut encoded: Vec<u8> = Vec::new();

        {
            let mut encoder = png::Encoder::new(&mut encoded, self.width, self.height);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);

            let mut writer = encoder
                .write_header()
                .context("[Canvas->into_png] failed to write PNG header")?;
            writer
                .write_image_data(&self.pixels)
                .context("[Canvas->into_png] failed to write PNG data")?;
        }

        Ok(encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn painted_canvas_encodes_to_png_with_its_size() {
        let mut canvas: Canvas = Canvas::new(40, 30);
        canvas
            .paint(|root| {
                root.draw(&Rectangle::new([(5, 5), (20, 20)], RED.filled()))?;
                Ok(())
            })
            .unwrap();

        let png_bytes: Vec<u8> = canvas.into_png().unwrap();
        assert_eq!(&png_bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoder = png::Decoder::new(png_bytes.as_slice());
        let reader = decoder.read_info().unwrap();
        assert_eq!(reader.info().width, 40);
        assert_eq!(reader.info().height, 30);
    }

    #[test]
    fn painter_error_is_returned() {
        let mut canvas: Canvas = Canvas::new(10, 10);
        let err = canvas.paint(|_| Err(anyhow!("boom"))).unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
