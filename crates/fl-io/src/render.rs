//! Raster rendering of frames and GIF/still export.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use fl_core::{DenseField, FrameSink, FrameView, Viewport};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage, Frame, Rgb, RgbImage};

use crate::error::{IoError, Result};

pub const GRID_COLOR: Rgb<u8> = Rgb([0, 255, 255]);

/// Grid line spacing, in cells.
const GRID_STEP: i64 = 10;

/// More alive is darker.
pub fn color_of(value: f64) -> Rgb<u8> {
    let c = (255.0 * (1.0 - value.clamp(0.0, 1.0))) as u8;
    Rgb([c, c, c])
}

/// Maps cell coordinates to pixels: the viewport center lands on the canvas
/// center and the whole viewport fits on both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub cell_size: f64,
    pub center: (f64, f64),
    pub half: (f64, f64),
}

impl Camera {
    pub fn fit(viewport: &Viewport, width: u32, height: u32) -> Self {
        let (w, h) = (f64::from(width), f64::from(height));
        let cell_size = (w / viewport.width()).min(h / viewport.height());
        Self {
            cell_size,
            center: viewport.center(),
            half: (w / 2.0, h / 2.0),
        }
    }

    pub fn to_pixel(&self, x: f64, y: f64) -> (i64, i64) {
        (
            (self.half.0 + (x - self.center.0) * self.cell_size).floor() as i64,
            (self.half.1 + (y - self.center.1) * self.cell_size).floor() as i64,
        )
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pub grid: Option<Rgb<u8>>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            grid: None,
        }
    }

    pub fn with_grid(mut self, color: Rgb<u8>) -> Self {
        self.grid = Some(color);
        self
    }

    fn fill_rect(&self, img: &mut RgbImage, (x0, y0): (i64, i64), (x1, y1): (i64, i64), color: Rgb<u8>) {
        let clamp_x = |v: i64| v.clamp(0, i64::from(self.width)) as u32;
        let clamp_y = |v: i64| v.clamp(0, i64::from(self.height)) as u32;
        for py in clamp_y(y0)..clamp_y(y1) {
            for px in clamp_x(x0)..clamp_x(x1) {
                img.put_pixel(px, py, color);
            }
        }
    }

    fn draw_grid(&self, img: &mut RgbImage, camera: &Camera, color: Rgb<u8>) {
        // Lines closer than two pixels would just flood the frame.
        let spacing = camera.cell_size * GRID_STEP as f64;
        if spacing.is_nan() || spacing < 2.0 {
            return;
        }
        let span_x = camera.half.0 / camera.cell_size;
        let span_y = camera.half.1 / camera.cell_size;
        let first = |lo: f64| ((lo / GRID_STEP as f64) as i64) * GRID_STEP;

        let x_start = first(camera.center.0 - span_x);
        let x_end = (camera.center.0 + span_x) as i64;
        for x in (x_start..=x_end).step_by(GRID_STEP as usize) {
            let (px, _) = camera.to_pixel(x as f64 + 0.5, 0.0);
            if (0..i64::from(self.width)).contains(&px) {
                for py in 0..self.height {
                    img.put_pixel(px as u32, py, color);
                }
            }
        }

        let y_start = first(camera.center.1 - span_y);
        let y_end = (camera.center.1 + span_y) as i64;
        for y in (y_start..=y_end).step_by(GRID_STEP as usize) {
            let (_, py) = camera.to_pixel(0.0, y as f64 + 0.5);
            if (0..i64::from(self.height)).contains(&py) {
                for px in 0..self.width {
                    img.put_pixel(px, py as u32, color);
                }
            }
        }
    }

    /// Paint one frame: vacuum background, one filled square per live cell.
    pub fn paint(&self, frame: &FrameView<'_>) -> RgbImage {
        let mut img = RgbImage::from_pixel(self.width, self.height, color_of(frame.vacuum));
        let camera = Camera::fit(&frame.viewport, self.width, self.height);
        for (cell, &value) in frame.cells {
            let (x, y) = (cell.x as f64, cell.y as f64);
            let top_left = camera.to_pixel(x, y);
            let bottom_right = camera.to_pixel(x + 1.0, y + 1.0);
            self.fill_rect(&mut img, top_left, bottom_right, color_of(value));
        }
        if let Some(color) = self.grid {
            self.draw_grid(&mut img, &camera, color);
        }
        img
    }
}

/// Dense fields render alive as light, one pixel per cell.
pub fn render_dense(field: &DenseField) -> RgbImage {
    let gray = field.to_gray();
    let mut img = RgbImage::new(field.width() as u32, field.height() as u32);
    for (i, pixel) in img.pixels_mut().enumerate() {
        let v = gray[i];
        *pixel = Rgb([v, v, v]);
    }
    img
}

/// Write frames as a looping animated GIF.
pub fn write_gif(path: &Path, frames: &[RgbImage], delay_ms: u32) -> Result<()> {
    if frames.is_empty() {
        return Err(IoError::NoFrames);
    }
    let file = File::create(path).map_err(|e| IoError::io(path, e))?;
    let mut encoder = GifEncoder::new(BufWriter::new(file));
    encoder.set_repeat(Repeat::Infinite)?;
    let delay = Delay::from_numer_denom_ms(delay_ms, 1);
    encoder.encode_frames(frames.iter().map(|img| {
        let rgba = DynamicImage::ImageRgb8(img.clone()).into_rgba8();
        Frame::from_parts(rgba, 0, 0, delay)
    }))?;
    tracing::info!("wrote {} frames to {}", frames.len(), path.display());
    Ok(())
}

/// Collects painted frames for export.
pub struct GifRecorder {
    canvas: Canvas,
    frames: Vec<RgbImage>,
}

impl GifRecorder {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            frames: Vec::new(),
        }
    }

    pub fn frames(&self) -> &[RgbImage] {
        &self.frames
    }

    pub fn write_animation(&self, path: &Path, delay_ms: u32) -> Result<()> {
        write_gif(path, &self.frames, delay_ms)
    }

    /// Save the final frame; the format follows the file extension.
    pub fn write_last(&self, path: &Path) -> Result<()> {
        let last = self.frames.last().ok_or(IoError::NoFrames)?;
        last.save(path)?;
        tracing::info!("wrote last frame to {}", path.display());
        Ok(())
    }
}

impl FrameSink for GifRecorder {
    fn paint(&mut self, frame: &FrameView<'_>) {
        let img = self.canvas.paint(frame);
        self.frames.push(img);
    }
}
