use rand::prelude::*;

use crate::model::*;

// 配牌・ツモ・補充牌を供給する牌山
pub trait Dealer {
    // 通常のツモ 牌山が尽きた場合はNone (流局)
    fn draw(&mut self) -> Option<Tile>;
    // 花牌,槓の補充牌 (牌山の末尾から)
    fn draw_replacement(&mut self) -> Option<Tile>;
    fn remaining(&self) -> usize;
}

// 全ての牌 (数牌,字牌は各4枚, 花牌は各1枚)
pub fn create_tile_set() -> Vec<Tile> {
    let mut tiles = Vec::new();
    for t in all_tile_kinds() {
        let n = if t.is_bonus() { 1 } else { TILE };
        for _ in 0..n {
            tiles.push(t);
        }
    }
    tiles
}

#[derive(Debug)]
pub struct Wall {
    tiles: Vec<Tile>, // 先頭からツモ, 末尾から補充
    head: usize,
    tail: usize,
}

impl Wall {
    pub fn new(seed: u64) -> Self {
        let mut tiles = create_tile_set();
        let mut rng: rand::rngs::StdRng = rand::SeedableRng::seed_from_u64(seed);
        tiles.shuffle(&mut rng);
        Self::from_tiles(tiles)
    }

    // 牌の並びを指定して生成 (テスト用の作為的な牌山)
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        let tail = tiles.len();
        Self {
            tiles,
            head: 0,
            tail,
        }
    }
}

impl Dealer for Wall {
    fn draw(&mut self) -> Option<Tile> {
        if self.head == self.tail {
            return None;
        }
        let t = self.tiles[self.head];
        self.head += 1;
        Some(t)
    }

    fn draw_replacement(&mut self) -> Option<Tile> {
        if self.head == self.tail {
            return None;
        }
        self.tail -= 1;
        Some(self.tiles[self.tail])
    }

    fn remaining(&self) -> usize {
        self.tail - self.head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_set() {
        let tiles = create_tile_set();
        assert_eq!(tiles.len(), 144);
        assert_eq!(tiles.iter().filter(|t| t.is_bonus()).count(), 8);
        assert_eq!(tiles.iter().filter(|t| t.is_honour()).count(), 28);
    }

    #[test]
    fn test_wall_is_seeded() {
        let mut w1 = Wall::new(1);
        let mut w2 = Wall::new(1);
        for _ in 0..10 {
            assert_eq!(w1.draw(), w2.draw());
        }
        assert_eq!(w1.remaining(), 134);
    }

    #[test]
    fn test_wall_exhaustion() {
        let t = [Tile(TB, 1), Tile(TB, 2), Tile(TB, 3)];
        let mut w = Wall::from_tiles(t.to_vec());
        assert_eq!(w.draw(), Some(t[0]));
        assert_eq!(w.draw_replacement(), Some(t[2]));
        assert_eq!(w.draw(), Some(t[1]));
        assert_eq!(w.remaining(), 0);
        assert_eq!(w.draw(), None);
        assert_eq!(w.draw_replacement(), None);
    }
}
