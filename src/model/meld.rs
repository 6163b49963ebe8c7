use super::*;
use crate::util::misc::vec_to_compact_string;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeldType {
    Pair,
    Chow,
    Pung,
    Kong,
}

// 面子 (鳴きまたは暗槓により公開された牌の組)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meld {
    pub meld_type: MeldType,
    pub tiles: Vec<Tile>,
    pub concealed: bool, // 暗槓の場合のみtrue
}

impl Meld {
    // 同じ牌count枚の組 (雀頭,刻子,槓子). 2~4枚以外はNone
    pub fn set(t: Tile, count: usize) -> Option<Self> {
        let meld_type = match count {
            2 => MeldType::Pair,
            3 => MeldType::Pung,
            4 => MeldType::Kong,
            _ => return None,
        };
        Some(Self {
            meld_type,
            tiles: vec![t; count],
            concealed: false,
        })
    }

    pub fn concealed_kong(t: Tile) -> Self {
        Self {
            meld_type: MeldType::Kong,
            tiles: vec![t; 4],
            concealed: true,
        }
    }

    // lowは順子の最小の牌. 種別の範囲を超える場合はNone
    pub fn chow(low: Tile) -> Option<Self> {
        let tiles = vec![low, low.offset(1)?, low.offset(2)?];
        Some(Self {
            meld_type: MeldType::Chow,
            tiles,
            concealed: false,
        })
    }

    // 牌の並びから面子の形を推定
    pub fn from_tiles(mut tiles: Vec<Tile>, concealed: bool) -> Option<Self> {
        tiles.sort();
        let t0 = *tiles.first()?;
        let same = tiles.iter().all(|&t| t == t0);
        let meld = match tiles.len() {
            2 | 3 | 4 if same => Self::set(t0, tiles.len())?,
            3 => {
                let m = Self::chow(t0)?;
                if m.tiles != tiles {
                    return None;
                }
                m
            }
            _ => return None,
        };
        if concealed && meld.meld_type != MeldType::Kong {
            return None;
        }
        Some(Self { concealed, ..meld })
    }

    // 面子 (雀頭以外) として数えるかどうか
    #[inline]
    pub fn is_set(&self) -> bool {
        self.tiles.len() >= 3
    }

    #[inline]
    pub fn is_pair(&self) -> bool {
        self.tiles.len() == 2
    }
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", vec_to_compact_string(&self.tiles))?;
        if self.concealed {
            write!(f, "*")?;
        }
        Ok(())
    }
}
