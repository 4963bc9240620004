//! Canvas 2D renderer
//!
//! Reads the state, never mutates it. Sprites that have not finished
//! loading are skipped for the frame; draw errors are ignored.

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::sprites::{
    CARRIED_SCALE, STATION_STACK, Sprite, carried_item_offset, carried_sprite, score_text,
};
use crate::sim::layout::{
    FLOOR_SIZE, STATION_X, TABLE_START_X, TABLE_Y, station_count, station_item, station_y,
};
use crate::sim::{Customer, CustomerState, GamePhase, GameState};

const STATION_GLOW: &str = "255, 255, 0";
const CUSTOMER_GLOW: &str = "0, 255, 0";

/// Owns the 2D context and the loaded images
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    images: Vec<(Sprite, HtmlImageElement)>,
}

impl CanvasRenderer {
    /// Size the canvas to the floor and start loading every sprite
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        canvas.set_width(FLOOR_SIZE as u32);
        canvas.set_height(FLOOR_SIZE as u32);

        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        let images = Sprite::all()
            .into_iter()
            .filter_map(|sprite| {
                let img = HtmlImageElement::new().ok()?;
                img.set_src(sprite.path());
                Some((sprite, img))
            })
            .collect();

        Some(Self { ctx, images })
    }

    fn image(&self, sprite: Sprite) -> Option<&HtmlImageElement> {
        self.images
            .iter()
            .find(|(s, img)| *s == sprite && img.complete() && img.natural_width() > 0)
            .map(|(_, img)| img)
    }

    /// Drawn size of a sprite, if loaded
    fn size(&self, sprite: Sprite) -> Option<(f64, f64)> {
        let img = self.image(sprite)?;
        let scale = sprite.scale() as f64;
        Some((
            img.natural_width() as f64 * scale,
            img.natural_height() as f64 * scale,
        ))
    }

    /// Draw a sprite centred on (x, y)
    fn draw_centered(&self, sprite: Sprite, x: f64, y: f64) {
        self.draw_scaled(sprite, x, y, sprite.scale());
    }

    /// Draw a sprite centred on (x, y) at an explicit scale
    fn draw_scaled(&self, sprite: Sprite, x: f64, y: f64, scale: f32) {
        let Some(img) = self.image(sprite) else {
            return;
        };
        let w = img.natural_width() as f64 * scale as f64;
        let h = img.natural_height() as f64 * scale as f64;
        let _ = self
            .ctx
            .draw_image_with_html_image_element_and_dw_and_dh(img, x - w / 2.0, y - h / 2.0, w, h);
    }

    /// Radial highlight fading out from the centre
    fn glow(&self, x: f64, y: f64, radius: f64, rgb: &str) {
        let ctx = &self.ctx;
        let Ok(gradient) = ctx.create_radial_gradient(x, y, 0.0, x, y, radius) else {
            return;
        };
        let _ = gradient.add_color_stop(0.0, &format!("rgba({rgb}, 0.8)"));
        let _ = gradient.add_color_stop(0.5, &format!("rgba({rgb}, 0.5)"));
        let _ = gradient.add_color_stop(1.0, &format!("rgba({rgb}, 0)"));

        ctx.set_image_smoothing_enabled(true);
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.begin_path();
        let _ = ctx.arc(x, y, radius, 0.0, TAU);
        ctx.fill();
        ctx.set_image_smoothing_enabled(false);
    }

    /// Render one frame
    pub fn render(&self, state: &GameState) {
        let ctx = &self.ctx;
        let size = FLOOR_SIZE as f64;
        ctx.clear_rect(0.0, 0.0, size, size);
        if let Some(bg) = self.image(Sprite::Background) {
            let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(bg, 0.0, 0.0, size, size);
        }

        match state.phase {
            GamePhase::NotStarted => {
                self.overlay(&[
                    ("bold 72px Arial", "Welcome to Catstaurant!", 300.0),
                    ("bold 32px Arial", "Serve the cats before they get impatient!", 380.0),
                    (
                        "bold 32px Arial",
                        "Use arrow keys to move, SPACE to pick up and serve food",
                        440.0,
                    ),
                    ("bold 40px Arial", "Press SPACE to start", 580.0),
                ]);
                return;
            }
            GamePhase::GameOver => {
                let served = format!("Cats Served: {}", state.score);
                self.overlay(&[
                    ("bold 72px Arial", "Game Over!", 400.0),
                    ("bold 32px Arial", served.as_str(), 450.0),
                    ("bold 40px Arial", "Press SPACE to restart", 500.0),
                ]);
                return;
            }
            GamePhase::Playing => {}
        }

        ctx.set_image_smoothing_enabled(false);
        self.draw_stations(state);
        for customer in &state.customers {
            self.draw_customer(state, customer);
        }
        self.draw_table();
        for customer in &state.customers {
            if let Some(kind) = customer.served_plate {
                self.draw_centered(
                    Sprite::Plate(kind),
                    customer.pos.x as f64,
                    TABLE_Y as f64 + 12.0,
                );
            }
        }
        self.draw_avatar(state);
        ctx.set_image_smoothing_enabled(true);

        self.draw_score(state.score);
    }

    /// Dimmed screen with centred lines of text
    fn overlay(&self, lines: &[(&str, &str, f64)]) {
        let ctx = &self.ctx;
        let size = FLOOR_SIZE as f64;
        ctx.set_fill_style_str("rgba(0, 0, 0, 0.6)");
        ctx.fill_rect(0.0, 0.0, size, size);

        ctx.set_fill_style_str("white");
        ctx.set_text_align("center");
        for (font, text, y) in lines {
            ctx.set_font(font);
            let _ = ctx.fill_text(text, size / 2.0, *y);
        }
    }

    fn draw_stations(&self, state: &GameState) {
        let x = STATION_X as f64;
        for i in 0..station_count() {
            let Some(kind) = station_item(i) else {
                continue;
            };
            let y = station_y(i) as f64;
            if state.nearby_station == Some(i) {
                self.glow(x, y, 120.0, STATION_GLOW);
            }
            for offset in STATION_STACK {
                self.draw_centered(Sprite::Plate(kind), x + offset.x as f64, y + offset.y as f64);
            }
        }
    }

    fn draw_customer(&self, state: &GameState, customer: &Customer) {
        let x = customer.pos.x as f64;
        let y = customer.pos.y as f64;
        let sprite = Sprite::Cat(customer.breed);

        if state.nearby_customer == Some(customer.id) && customer.state == CustomerState::Seated {
            self.glow(x, y, 80.0, CUSTOMER_GLOW);
        }
        self.draw_centered(sprite, x, y);

        if customer.state != CustomerState::Seated {
            return;
        }
        let (Some((_, cat_h)), Some((bubble_w, bubble_h))) =
            (self.size(sprite), self.size(Sprite::SpeechBubble))
        else {
            return;
        };

        let bubble_x = x + 20.0;
        let bubble_y = y - cat_h / 2.0 - bubble_h / 2.0 - 20.0;
        self.draw_centered(Sprite::SpeechBubble, bubble_x, bubble_y);
        self.draw_centered(Sprite::Icon(customer.order), bubble_x, bubble_y - 10.0);

        // Patience bar above the bubble
        let bar_x = bubble_x - bubble_w / 2.0;
        let bar_y = bubble_y - bubble_h / 2.0 - 15.0;
        let ctx = &self.ctx;
        ctx.set_fill_style_str("rgba(128, 128, 128, 0.8)");
        ctx.fill_rect(bar_x, bar_y, bubble_w, 8.0);
        ctx.set_fill_style_str("white");
        ctx.fill_rect(bar_x, bar_y, bubble_w * customer.patience_fraction() as f64, 8.0);
    }

    /// Tile the counter from its left edge to the right side of the floor
    fn draw_table(&self) {
        let (Some(img), Some((tile_w, tile_h))) =
            (self.image(Sprite::Table), self.size(Sprite::Table))
        else {
            return;
        };
        let scale = Sprite::Table.scale() as f64;
        let end = FLOOR_SIZE as f64;
        let mut x = TABLE_START_X as f64;
        while x < end {
            let w = tile_w.min(end - x);
            let _ = self
                .ctx
                .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                    img,
                    0.0,
                    0.0,
                    w / scale,
                    img.natural_height() as f64,
                    x,
                    TABLE_Y as f64,
                    w,
                    tile_h,
                );
            x += tile_w;
        }
    }

    fn draw_avatar(&self, state: &GameState) {
        let avatar = &state.avatar;
        let sprite = Sprite::Avatar(avatar.facing);
        let x = avatar.pos.x as f64;
        let y = avatar.pos.y as f64;
        self.draw_centered(sprite, x, y);

        if let (Some(kind), Some((_, h))) = (state.carried, self.size(sprite)) {
            let offset = carried_item_offset(avatar.facing, h as f32);
            self.draw_scaled(
                carried_sprite(kind),
                x + offset.x as f64,
                y + offset.y as f64,
                CARRIED_SCALE,
            );
        }
    }

    /// Scoreboard painted on the back wall
    fn draw_score(&self, score: u32) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str("black");
        ctx.set_text_align("center");
        ctx.set_font("bold 48px monospace");
        let _ = ctx.fill_text("SCORE", 245.0, 180.0);
        ctx.set_font("bold 64px monospace");
        let _ = ctx.fill_text(&score_text(score), 245.0, 240.0);
    }
}
