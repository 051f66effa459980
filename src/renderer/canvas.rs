//! Canvas 2D backend (WASM only)

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::{DrawCmd, Renderer};
use crate::assets::AssetCatalog;

const FONT_FAMILY: &str = "Matemasie, sans-serif";

/// Replays draw commands onto a 2D context using preloaded images
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    images: AssetCatalog<HtmlImageElement>,
    /// Last font set, to skip redundant `font` assignments
    font_size: u32,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, images: AssetCatalog<HtmlImageElement>) -> Self {
        Self {
            ctx,
            images,
            font_size: 0,
        }
    }

    fn set_font(&mut self, size: u32) {
        if self.font_size != size {
            self.ctx.set_font(&format!("{size}px {FONT_FAMILY}"));
            self.font_size = size;
        }
    }
}

impl Renderer for CanvasRenderer {
    fn draw(&mut self, commands: &[DrawCmd]) {
        for cmd in commands {
            match cmd {
                DrawCmd::Image { sprite, rect } => {
                    let Some(img) = self.images.sprite(*sprite) else {
                        log::warn!("No image for {sprite:?}");
                        continue;
                    };
                    if let Err(e) = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        img,
                        rect.left() as f64,
                        rect.top() as f64,
                        rect.size.x as f64,
                        rect.size.y as f64,
                    ) {
                        log::warn!("drawImage failed: {e:?}");
                    }
                }
                DrawCmd::Fill { rect, color } => {
                    self.ctx.set_fill_style_str(color);
                    self.ctx.fill_rect(
                        rect.left() as f64,
                        rect.top() as f64,
                        rect.size.x as f64,
                        rect.size.y as f64,
                    );
                }
                DrawCmd::Text {
                    text,
                    pos,
                    size,
                    color,
                } => {
                    self.set_font(*size);
                    self.ctx.set_fill_style_str(color);
                    if let Err(e) = self.ctx.fill_text(text, pos.x as f64, pos.y as f64) {
                        log::warn!("fillText failed: {e:?}");
                    }
                }
            }
        }
    }
}
