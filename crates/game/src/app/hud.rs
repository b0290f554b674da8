//! Software rendering of a [`FrameSnapshot`]: the tile layer, entity markers,
//! transient effects and every HUD panel drawn over them.

use engine::{line_height, text_width, with_alpha, Canvas, Rgba, Vec2};
use kingdom_quest::catalog::{difficulty_stars, SHOP_ITEMS, ZONES};
use kingdom_quest::item::Rarity;
use kingdom_quest::snapshot::{Sprite, SpriteKind};
use kingdom_quest::zone::TileKind;
use kingdom_quest::{FrameSink, FrameSnapshot, GamePhase, MessageLog, Severity};

use super::scene::Overlay;

const CLEAR: Rgba = [0x2d, 0x5a, 0x2d, 0xff];
const WHITE: Rgba = [0xff, 0xff, 0xff, 0xff];
const GREY: Rgba = [0xaa, 0xaa, 0xaa, 0xff];
const GOLD: Rgba = [0xff, 0xd7, 0x00, 0xff];
const ORANGE: Rgba = [0xff, 0xa5, 0x00, 0xff];
const RED: Rgba = [0xff, 0x44, 0x44, 0xff];
const GREEN: Rgba = [0x44, 0xff, 0x44, 0xff];
const PANEL: Rgba = [0x00, 0x00, 0x00, 0xb4];

const MINIMAP_SIZE: i32 = 120;
const MINIMAP_MARGIN: i32 = 10;
const TEXT_SCALE: i32 = 2;
const ATTACK_RING_RADIUS: i32 = 60;

pub(crate) fn tile_color(tile: TileKind) -> Rgba {
    match tile {
        TileKind::Grass => [0x4a, 0x7c, 0x59, 0xff],
        TileKind::Stone => [0x8b, 0x73, 0x55, 0xff],
        TileKind::Tree => [0x2d, 0x40, 0x16, 0xff],
        TileKind::DarkTree => [0x1a, 0x20, 0x10, 0xff],
        TileKind::Water => [0x46, 0x82, 0xb4, 0xff],
        TileKind::RuinsWall => [0x6b, 0x5b, 0x73, 0xff],
        TileKind::RuinsFloor => [0x9b, 0x8b, 0x93, 0xff],
        TileKind::CaveWall => [0x3b, 0x3b, 0x3b, 0xff],
        TileKind::CaveFloor => [0x5b, 0x5b, 0x5b, 0xff],
        TileKind::Lava => [0xff, 0x45, 0x00, 0xff],
    }
}

fn rarity_color(rarity: Rarity) -> Rgba {
    match rarity {
        Rarity::Common => [0xcc, 0xcc, 0xcc, 0xff],
        Rarity::Uncommon => [0x4c, 0xaf, 0x50, 0xff],
        Rarity::Rare => [0x21, 0x96, 0xf3, 0xff],
        Rarity::Epic => [0x9c, 0x27, 0xb0, 0xff],
        Rarity::Legendary => [0xff, 0x98, 0x00, 0xff],
        Rarity::Mythic => [0xe9, 0x1e, 0x63, 0xff],
    }
}

fn severity_color(severity: Severity) -> Rgba {
    match severity {
        Severity::Info => WHITE,
        Severity::Success => GREEN,
        Severity::Warning => ORANGE,
        Severity::Error => RED,
    }
}

fn sprite_color(kind: SpriteKind) -> Rgba {
    match kind {
        SpriteKind::Player => [0x3c, 0xb3, 0x71, 0xff],
        SpriteKind::Enemy => [0xb2, 0x22, 0x22, 0xff],
        SpriteKind::Sword => GOLD,
        SpriteKind::Treasure => ORANGE,
        SpriteKind::Item => [0x87, 0xce, 0xeb, 0xff],
        SpriteKind::Npc => [0x41, 0x69, 0xe1, 0xff],
        SpriteKind::Portal => [0x94, 0x00, 0xd3, 0xff],
    }
}

/// Paints snapshots onto a canvas, together with the scene-owned message
/// log and modal overlay.
pub(crate) struct HudPainter<'c, 'f, 'm> {
    canvas: &'c mut Canvas<'f>,
    messages: &'m MessageLog,
    overlay: Overlay,
}

impl<'c, 'f, 'm> HudPainter<'c, 'f, 'm> {
    pub(crate) fn new(canvas: &'c mut Canvas<'f>, messages: &'m MessageLog, overlay: Overlay) -> Self {
        Self {
            canvas,
            messages,
            overlay,
        }
    }

    fn width(&self) -> i32 {
        self.canvas.width() as i32
    }

    fn height(&self) -> i32 {
        self.canvas.height() as i32
    }

    fn draw_tiles(&mut self, frame: &FrameSnapshot<'_>) {
        let Some(range) = frame.visible_tiles else {
            return;
        };
        let size = frame.tiles.tile_size();
        for y in range.y_min..=range.y_max {
            for x in range.x_min..=range.x_max {
                let Some(tile) = frame.tiles.tile_at(x, y) else {
                    continue;
                };
                let world = Vec2::new((x * size) as f32, (y * size) as f32);
                let (sx, sy) = frame.camera.world_to_screen(world);
                self.canvas
                    .fill_rect(sx, sy, size as i32, size as i32, tile_color(tile));
            }
        }
    }

    fn draw_sprite(&mut self, frame: &FrameSnapshot<'_>, sprite: &Sprite<'_>) {
        if !frame.camera.is_visible(sprite.position, sprite.size) {
            return;
        }
        let (x, y) = frame.camera.world_to_screen(sprite.position);
        let (w, h) = (sprite.size.x as i32, sprite.size.y as i32);
        let mut color = sprite_color(sprite.kind);
        if sprite.kind == SpriteKind::Player && frame.player.hurt {
            color = RED;
        }

        if sprite.kind == SpriteKind::Portal {
            self.canvas.fill_circle(x + w / 2, y + h / 2, w / 2, with_alpha(color, 0.8));
        } else {
            self.canvas.fill_rect(x, y, w, h, color);
        }
        if let Some(rarity) = sprite.rarity {
            self.canvas.rect_outline(x - 1, y - 1, w + 2, h + 2, rarity_color(rarity));
        }
        let initial: String = sprite.label.chars().take(1).collect();
        self.canvas
            .draw_text_centered(x + w / 2, y + h / 2 - 5, &initial, TEXT_SCALE, WHITE);

        if let Some(fraction) = sprite.health_fraction {
            let bar = if sprite.kind == SpriteKind::Player { GREEN } else { RED };
            self.canvas.fill_rect(x, y - 8, w, 4, [0x33, 0x33, 0x33, 0xff]);
            self.canvas
                .fill_rect(x, y - 8, (w as f32 * fraction).round() as i32, 4, bar);
        }
    }

    fn draw_world(&mut self, frame: &FrameSnapshot<'_>) {
        if frame.combat.in_combat() {
            if let Some(player) = frame.player_sprite() {
                let center = player.position + player.size * 0.5;
                let (cx, cy) = frame.camera.world_to_screen(center);
                self.canvas.fill_circle(
                    cx,
                    cy,
                    ATTACK_RING_RADIUS,
                    with_alpha([0xff, 0x00, 0x00, 0xff], 0.12),
                );
            }
        }

        for sprite in &frame.sprites {
            self.draw_sprite(frame, sprite);
        }

        for particle in frame.attack_particles.iter().chain(frame.particles) {
            let (x, y) = frame.camera.world_to_screen(particle.position);
            self.canvas
                .fill_rect(x - 1, y - 1, 3, 3, with_alpha(particle.color, particle.alpha()));
        }

        for number in frame.damage_numbers {
            let (x, y) = frame.camera.world_to_screen(number.position);
            let (text, color, scale) = if number.critical {
                (format!("{}!", number.amount), GOLD, 3)
            } else {
                (number.amount.to_string(), RED, 2)
            };
            self.canvas
                .draw_text_centered(x, y, &text, scale, with_alpha(color, number.alpha()));
        }

        if let Some(kind) = frame.attack_kind {
            if let Some(player) = frame.player_sprite() {
                let (x, y) = frame.camera.world_to_screen(player.position);
                let label = if kind.is_critical() { "CRIT" } else { "HIT" };
                let color = if kind.is_critical() { GOLD } else { WHITE };
                self.canvas.draw_text(x, y - 20, label, 1, color);
            }
        }
    }

    fn draw_status(&mut self, frame: &FrameSnapshot<'_>) {
        let player = &frame.player;
        let step = line_height(TEXT_SCALE);
        let lines = [
            format!("HP {}/{}", player.health.current.max(0), player.health.max),
            format!("LV {}", player.level),
            format!("XP {}/{}", player.experience, player.experience_to_next),
            format!("GOLD {}", player.gold),
            format!("SCORE {}", player.score),
            format!("WEAPON {}", player.weapon.unwrap_or("NONE")),
            format!(
                "STR {} DEF {} AGI {} MAG {}",
                player.stats.strength, player.stats.defense, player.stats.agility, player.stats.magic
            ),
        ];
        let panel_width = lines
            .iter()
            .map(|line| text_width(line, TEXT_SCALE))
            .max()
            .unwrap_or(0)
            + 16;
        let panel_height = step * (lines.len() as i32 + 1) + 16;
        self.canvas.fill_rect(8, 8, panel_width, panel_height, PANEL);
        for (row, line) in lines.iter().enumerate() {
            self.canvas
                .draw_text(16, 16 + row as i32 * step, line, TEXT_SCALE, WHITE);
        }

        let bar_y = 16 + lines.len() as i32 * step;
        let bar_width = panel_width - 16;
        let ready = 1.0 - player.attack_cooldown.clamp(0.0, 1.0);
        self.canvas.fill_rect(16, bar_y, bar_width, 6, [0x33, 0x33, 0x33, 0xff]);
        self.canvas.fill_rect(
            16,
            bar_y,
            (bar_width as f32 * ready).round() as i32,
            6,
            if ready >= 1.0 { GREEN } else { ORANGE },
        );

        let zone = format!("ZONE: {}", frame.zone_name);
        self.canvas
            .draw_text_centered(self.width() / 2, 12, &zone, TEXT_SCALE, GOLD);
    }

    fn draw_minimap(&mut self, frame: &FrameSnapshot<'_>) {
        let origin_x = self.width() - MINIMAP_SIZE - MINIMAP_MARGIN;
        let origin_y = MINIMAP_MARGIN;
        let scale = MINIMAP_SIZE as f32 / frame.zone_size.x.max(frame.zone_size.y).max(1.0);
        self.canvas
            .fill_rect(origin_x, origin_y, MINIMAP_SIZE, MINIMAP_SIZE, PANEL);
        self.canvas
            .rect_outline(origin_x, origin_y, MINIMAP_SIZE, MINIMAP_SIZE, WHITE);

        let markers = [
            (SpriteKind::Sword, GOLD, 4),
            (SpriteKind::Treasure, ORANGE, 2),
            (SpriteKind::Enemy, RED, 2),
            (SpriteKind::Player, GREEN, 4),
        ];
        for (kind, color, size) in markers {
            for sprite in frame.sprites_of(kind) {
                let x = origin_x + (sprite.position.x * scale) as i32;
                let y = origin_y + (sprite.position.y * scale) as i32;
                self.canvas.fill_rect(x, y, size, size, color);
            }
        }
    }

    fn draw_quests(&mut self, frame: &FrameSnapshot<'_>) {
        let step = line_height(1);
        let x = self.width() - 230;
        let mut y = MINIMAP_MARGIN * 2 + MINIMAP_SIZE;
        self.canvas
            .fill_rect(x - 8, y - 8, 228, frame.quests.len() as i32 * step * 3 + 24, PANEL);
        self.canvas.draw_text(x, y, "QUESTS", 1, GOLD);
        y += step + 4;
        for quest in &frame.quests {
            let color = if quest.completed { GREEN } else { WHITE };
            self.canvas.draw_text(x, y, quest.title, 1, color);
            self.canvas.draw_text(x, y + step, quest.description, 1, GREY);
            self.canvas.draw_text(x, y + step * 2, &quest.text, 1, color);
            y += step * 3;
        }
    }

    fn draw_inventory(&mut self, frame: &FrameSnapshot<'_>) {
        let step = line_height(1);
        let visible = frame.inventory.len().min(10);
        let height = (visible as i32 + 1) * step + 16;
        let y0 = self.height() - height - 8;
        self.canvas.fill_rect(8, y0, 300, height, PANEL);
        let title = format!("INVENTORY {}/{}", frame.inventory.len(), frame.inventory_capacity);
        self.canvas.draw_text(16, y0 + 8, &title, 1, GOLD);
        for (row, line) in frame.inventory.iter().take(visible).enumerate() {
            let marker = if line.equipped { "*" } else { " " };
            let text = format!("{marker}{} - {}", line.name, line.summary);
            let y = y0 + 8 + (row as i32 + 1) * step;
            self.canvas
                .draw_text(16, y, &text, 1, rarity_color(line.rarity));
        }
    }

    fn draw_prompts(&mut self, frame: &FrameSnapshot<'_>) {
        let center = self.width() / 2;
        let bottom = self.height() - 24;
        let combat_color = if frame.combat.in_combat() { RED } else { GREEN };
        self.canvas
            .draw_text_centered(center, bottom, &frame.combat.text(), TEXT_SCALE, combat_color);
        if let Some(portal) = frame.near_portal {
            let prompt = format!("SPACE: {portal}");
            self.canvas
                .draw_text_centered(center, bottom - line_height(TEXT_SCALE) - 4, &prompt, TEXT_SCALE, GOLD);
        }
    }

    fn draw_messages(&mut self) {
        let step = line_height(1) + 4;
        let right = self.width() - 12;
        let mut y = self.height() - 12 - step;
        let messages: Vec<_> = self.messages.messages().collect();
        for message in messages.iter().rev() {
            let width = text_width(&message.text, 1);
            self.canvas
                .fill_rect(right - width - 6, y - 3, width + 12, step, PANEL);
            self.canvas.draw_text(
                right - width,
                y,
                &message.text,
                1,
                severity_color(message.severity),
            );
            y -= step;
        }
    }

    fn draw_modal(&mut self, title: &str, rows: &[(String, Rgba)]) {
        let step = line_height(TEXT_SCALE) + 2;
        let width = rows
            .iter()
            .map(|(text, _)| text_width(text, TEXT_SCALE))
            .chain([text_width(title, 3)])
            .max()
            .unwrap_or(0)
            + 32;
        let height = (rows.len() as i32 + 3) * step + 16;
        let x = (self.width() - width) / 2;
        let y = (self.height() - height) / 2;
        self.canvas.fill_rect(x, y, width, height, [0x10, 0x10, 0x20, 0xe6]);
        self.canvas.rect_outline(x, y, width, height, GOLD);
        self.canvas
            .draw_text_centered(x + width / 2, y + 10, title, 3, GOLD);
        for (row, (text, color)) in rows.iter().enumerate() {
            let row_y = y + 10 + (row as i32 + 2) * step;
            self.canvas.draw_text(x + 16, row_y, text, TEXT_SCALE, *color);
        }
        self.canvas.draw_text_centered(
            x + width / 2,
            y + height - step,
            "ESC to close",
            1,
            GREY,
        );
    }

    fn draw_overlay(&mut self, frame: &FrameSnapshot<'_>) {
        match self.overlay {
            Overlay::None => {}
            Overlay::Shop => {
                let rows: Vec<_> = SHOP_ITEMS
                    .iter()
                    .enumerate()
                    .map(|(index, entry)| {
                        let affordable = frame.player.gold >= entry.price;
                        (
                            format!("{}. {} - {} gold", index + 1, entry.item.name, entry.price),
                            if affordable { WHITE } else { GREY },
                        )
                    })
                    .collect();
                self.draw_modal("SHOP", &rows);
            }
            Overlay::ZoneSelect => {
                let rows: Vec<_> = ZONES
                    .iter()
                    .enumerate()
                    .map(|(index, zone)| {
                        let current = index == frame.zone_index;
                        let text = format!(
                            "{}. {} {}{}",
                            index + 1,
                            zone.name,
                            difficulty_stars(zone.difficulty),
                            if current { " (HERE)" } else { "" }
                        );
                        (text, if current { GREY } else { WHITE })
                    })
                    .collect();
                self.draw_modal("TRAVEL", &rows);
            }
        }
    }

    fn draw_game_over(&mut self, frame: &FrameSnapshot<'_>) {
        let (w, h) = (self.width(), self.height());
        self.canvas.fill_rect(0, 0, w, h, [0x00, 0x00, 0x00, 0xc8]);
        self.canvas.draw_text_centered(w / 2, h / 2 - 50, "GAME OVER", 6, RED);
        let summary = format!(
            "LEVEL {}   SCORE {}   GOLD {}",
            frame.player.level, frame.player.score, frame.player.gold
        );
        self.canvas
            .draw_text_centered(w / 2, h / 2 + 10, &summary, TEXT_SCALE, WHITE);
        self.canvas
            .draw_text_centered(w / 2, h / 2 + 40, "PRESS R TO RESTART", TEXT_SCALE, GOLD);
    }
}

impl FrameSink for HudPainter<'_, '_, '_> {
    fn present(&mut self, frame: &FrameSnapshot<'_>) {
        self.canvas.clear(CLEAR);
        self.draw_tiles(frame);
        self.draw_world(frame);
        self.draw_status(frame);
        self.draw_minimap(frame);
        self.draw_quests(frame);
        self.draw_inventory(frame);
        self.draw_prompts(frame);
        self.draw_messages();
        if frame.phase == GamePhase::Defeated {
            self.draw_game_over(frame);
        } else {
            self.draw_overlay(frame);
        }
    }
}
