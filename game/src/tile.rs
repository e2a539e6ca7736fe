use engine::graphics::Color;
use engine::ui::Rect;
use serde::{Deserialize, Serialize};

/// Identity of one of the four tiles. Stable for the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileId(pub u8);

pub const TILE_COUNT: u8 = 4;

const TILE_MARGIN: u32 = 20;
const TILE_GAP: u32 = 20;

#[derive(Debug, Clone)]
pub struct Tile {
    id: TileId,
    label: &'static str,
    rect: Rect,
    active: bool,
    tone_hz: f32,
    color_off: Color,
    color_on: Color,
}

impl Tile {
    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn tone_hz(&self) -> f32 {
        self.tone_hz
    }

    pub fn color(&self) -> Color {
        if self.active {
            self.color_on
        } else {
            self.color_off
        }
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.rect.contains(x, y)
    }
}

/// The fixed 2x2 tile layout. Created once per session; only the `active`
/// flags ever change.
#[derive(Debug, Clone)]
pub struct TileBoard {
    tiles: [Tile; TILE_COUNT as usize],
}

impl TileBoard {
    pub fn new(width: u32, height: u32) -> Self {
        let tile_w = width.saturating_sub(TILE_MARGIN * 2 + TILE_GAP) / 2;
        let tile_h = height.saturating_sub(TILE_MARGIN * 2 + TILE_GAP) / 2;
        let right_x = TILE_MARGIN + tile_w + TILE_GAP;
        let bottom_y = TILE_MARGIN + tile_h + TILE_GAP;

        let tile = |id: u8, label, x, y, tone_hz, color_off, color_on| Tile {
            id: TileId(id),
            label,
            rect: Rect::new(x, y, tile_w, tile_h),
            active: false,
            tone_hz,
            color_off,
            color_on,
        };

        Self {
            tiles: [
                tile(
                    1,
                    "red",
                    right_x,
                    TILE_MARGIN,
                    440.00,
                    [110, 30, 25, 255],
                    [235, 94, 42, 255],
                ),
                tile(
                    2,
                    "blue",
                    right_x,
                    bottom_y,
                    329.63,
                    [25, 45, 90, 255],
                    [64, 120, 230, 255],
                ),
                tile(
                    3,
                    "yellow",
                    TILE_MARGIN,
                    bottom_y,
                    277.18,
                    [110, 85, 10, 255],
                    [252, 186, 3, 255],
                ),
                tile(
                    4,
                    "green",
                    TILE_MARGIN,
                    TILE_MARGIN,
                    220.00,
                    [25, 80, 35, 255],
                    [70, 200, 90, 255],
                ),
            ],
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id == id)
    }

    pub fn tone_hz(&self, id: TileId) -> Option<f32> {
        self.tile(id).map(Tile::tone_hz)
    }

    /// The tile under the pointer; first match wins in tile order.
    pub fn tile_at(&self, x: u32, y: u32) -> Option<TileId> {
        self.tiles.iter().find(|t| t.contains(x, y)).map(|t| t.id)
    }

    pub fn set_lit(&mut self, id: TileId, lit: bool) {
        if let Some(tile) = self.tiles.iter_mut().find(|t| t.id == id) {
            tile.active = lit;
        }
    }

    pub fn deactivate_all(&mut self) {
        for tile in &mut self.tiles {
            tile.active = false;
        }
    }

    pub fn active_tile(&self) -> Option<TileId> {
        self.tiles.iter().find(|t| t.active).map(|t| t.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> TileBoard {
        TileBoard::new(560, 560)
    }

    #[test]
    fn four_tiles_with_stable_ids() {
        let board = board();
        let ids: Vec<u8> = board.tiles().iter().map(|t| t.id().0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn tiles_fit_inside_the_window() {
        let board = board();
        for tile in board.tiles() {
            let r = tile.rect();
            assert!(r.x + r.w <= 560);
            assert!(r.y + r.h <= 560);
        }
    }

    #[test]
    fn tiles_do_not_overlap() {
        let board = board();
        for (i, a) in board.tiles().iter().enumerate() {
            for b in board.tiles().iter().skip(i + 1) {
                let ar = a.rect();
                let br = b.rect();
                let disjoint = ar.x + ar.w <= br.x
                    || br.x + br.w <= ar.x
                    || ar.y + ar.h <= br.y
                    || br.y + br.h <= ar.y;
                assert!(disjoint, "tiles {:?} and {:?} overlap", a.id(), b.id());
            }
        }
    }

    #[test]
    fn tile_at_hits_tiles_and_misses_the_gap() {
        let board = board();
        // Top-left corner region belongs to green (id 4).
        assert_eq!(board.tile_at(25, 25), Some(TileId(4)));
        // The middle of the cross-shaped gap hits nothing.
        assert_eq!(board.tile_at(280, 280), None);
        assert_eq!(board.tile_at(0, 0), None);
    }

    #[test]
    fn set_lit_and_deactivate_all_round_trip() {
        let mut board = board();
        board.set_lit(TileId(2), true);
        assert_eq!(board.active_tile(), Some(TileId(2)));
        assert!(board.tile(TileId(2)).is_some_and(Tile::is_active));

        board.deactivate_all();
        assert_eq!(board.active_tile(), None);
    }

    #[test]
    fn unknown_id_is_ignored() {
        let mut board = board();
        board.set_lit(TileId(9), true);
        assert_eq!(board.active_tile(), None);
        assert_eq!(board.tone_hz(TileId(9)), None);
    }
}
