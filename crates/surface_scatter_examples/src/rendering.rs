//! Shared helpers for the example binaries: tracing setup and a top-down
//! PNG rendering of placements.
use image::{Rgb, RgbImage};
use surface_scatter::prelude::Placement;
use tracing_subscriber::EnvFilter;

/// Initializes a fmt subscriber; `RUST_LOG` overrides the default `info`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
}

/// Top-down rendering configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output image size in pixels (width, height).
    pub image_size: (u32, u32),
    /// Half-extent of the rendered area in world units.
    pub area: f32,
    pub background: [u8; 3],
    pub dot_color: [u8; 3],
    /// Dot radius in pixels for a placement of scale 1.0.
    pub dot_radius: f32,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), area: f32) -> Self {
        Self {
            image_size,
            area,
            background: [26, 26, 26],
            dot_color: [120, 200, 120],
            dot_radius: 5.0,
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_dot(mut self, color: [u8; 3], radius: f32) -> Self {
        self.dot_color = color;
        self.dot_radius = radius;
        self
    }
}

/// Renders placements as filled circles (radius scaled by placement scale)
/// viewed from above, and writes a PNG.
pub fn render_placements_to_png(
    placements: &[Placement],
    config: &RenderConfig,
    path: &str,
) -> anyhow::Result<()> {
    let (width, height) = config.image_size;
    let mut img = RgbImage::from_pixel(width, height, Rgb(config.background));

    let extent = config.area * 2.0;
    for placement in placements {
        let cx = (placement.position.x / extent + 0.5) * width as f32;
        let cy = (0.5 - placement.position.y / extent) * height as f32;
        let radius = config.dot_radius * placement.scale;
        draw_disk(&mut img, cx, cy, radius, Rgb(config.dot_color));
    }

    img.save(path)?;
    Ok(())
}

fn draw_disk(img: &mut RgbImage, cx: f32, cy: f32, radius: f32, color: Rgb<u8>) {
    let r = radius.max(1.0);
    let min_x = (cx - r).floor() as i64;
    let max_x = (cx + r).ceil() as i64;
    let min_y = (cy - r).floor() as i64;
    let max_y = (cy + r).ceil() as i64;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            if x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
                continue;
            }
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= r * r {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}
