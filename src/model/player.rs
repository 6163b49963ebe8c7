use super::*;
use crate::util::misc::{vec_count, vec_to_compact_string};

// プレイヤーの手牌の状態 (1局の間のみ有効)
// 所持している牌は tiles, revealed, bonus のいずれか1箇所のみに存在する
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub tiles: Vec<Tile>,    // 手牌 (順序は表示用)
    pub revealed: Vec<Meld>, // 公開した面子 (鳴いた順)
    pub bonus: Vec<Tile>,    // 花牌
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self {
            tiles,
            ..Self::default()
        }
    }

    #[inline]
    pub fn count(&self, t: Tile) -> usize {
        vec_count(&self.tiles, &t)
    }

    #[inline]
    pub fn has(&self, t: Tile) -> bool {
        self.tiles.contains(&t)
    }

    // 指定した牌を1枚ずつ手牌から取り除く
    // 1枚でも足りない場合は何も変更せずにTileNotHeldを返却
    pub fn remove_tiles(&mut self, tiles: &[Tile]) -> RuleResult<()> {
        let mut rest = self.tiles.clone();
        for &t in tiles {
            match rest.iter().position(|&x| x == t) {
                Some(pos) => {
                    rest.remove(pos);
                }
                None => return Err(RuleError::TileNotHeld(t)),
            }
        }
        self.tiles = rest;
        Ok(())
    }

    pub fn reveal_meld(&mut self, meld: Meld) {
        self.revealed.push(meld);
    }

    // 手牌の花牌を花牌置き場に移動 (呼び出し側は移動した枚数の補充を行う)
    pub fn move_to_bonus(&mut self, tiles: &[Tile]) -> RuleResult<()> {
        if let Some(&t) = tiles.iter().find(|t| !t.is_bonus()) {
            return Err(RuleError::NotBonusTile(t));
        }
        self.remove_tiles(tiles)?;
        self.bonus.extend_from_slice(tiles);
        Ok(())
    }

    // 手牌の中に残っている花牌
    pub fn bonus_in_hand(&self) -> Vec<Tile> {
        self.tiles.iter().copied().filter(|t| t.is_bonus()).collect()
    }

    pub fn sorted_tiles(&self) -> Vec<Tile> {
        let mut v = self.tiles.clone();
        v.sort();
        v
    }

    // 所持している全ての牌 (手牌, 面子, 花牌)
    pub fn all_tiles(&self) -> Vec<Tile> {
        let mut v = self.tiles.clone();
        for m in &self.revealed {
            v.extend_from_slice(&m.tiles);
        }
        v.extend_from_slice(&self.bonus);
        v.sort();
        v
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let revealed = if self.revealed.is_empty() {
            "nothing on the table".to_string()
        } else {
            let v: Vec<String> = self.revealed.iter().map(|m| m.to_string()).collect();
            v.join(" ")
        };
        let bonus = if self.bonus.is_empty() {
            "no bonus tiles".to_string()
        } else {
            vec_to_compact_string(&self.bonus)
        };
        write!(
            f,
            "tiles: {}, open: {}, bonus: {}",
            vec_to_compact_string(&self.sorted_tiles()),
            revealed,
            bonus,
        )
    }
}
