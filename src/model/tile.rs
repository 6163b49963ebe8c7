use serde::{de, ser};

use super::*;

// 牌の種類 (同種の牌は区別しない)
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tile(pub Type, pub Tnum); // (type index, number index)

impl Tile {
    pub fn from_symbol(s: &str) -> Result<Self, RuleError> {
        let parse_err = |message: &str| RuleError::Parse {
            input: s.to_string(),
            message: message.to_string(),
        };

        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(parse_err("tile symbol must be 2 characters"));
        }
        let ti = tile_type_from_char(chars[0]).ok_or_else(|| parse_err("unknown tile type"))?;
        let ni = chars[1]
            .to_digit(10)
            .ok_or_else(|| parse_err("tile number is not a digit"))? as usize;
        let t = Self(ti, ni);
        if !t.is_valid() {
            return Err(parse_err("tile number out of range"));
        }
        Ok(t)
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.0 < TYPE && 1 <= self.1 && self.1 <= TNUM_MAX[self.0]
    }

    #[allow(dead_code)]
    #[inline]
    pub fn suit(&self) -> Type {
        self.0
    }

    // 数牌
    #[inline]
    pub fn is_numeral(&self) -> bool {
        self.0 < TZ
    }

    // 字牌
    #[allow(dead_code)]
    #[inline]
    pub fn is_honour(&self) -> bool {
        self.0 == TZ
    }

    // 花牌,季節牌
    #[inline]
    pub fn is_bonus(&self) -> bool {
        self.0 == TF
    }

    // 同じ種別の全ての牌の並び (tiles_of_suit) における位置
    pub fn rank_position_within_suit(&self) -> Option<usize> {
        tiles_of_suit(self.0).iter().position(|t| t == self)
    }

    // 同じ数牌の種別内でdだけ離れた牌
    // 字牌,花牌および種別の範囲外となる場合はNone
    pub fn offset(&self, d: isize) -> Option<Tile> {
        if !self.is_numeral() {
            return None;
        }
        let pos = self.rank_position_within_suit()? as isize + d;
        if pos < 0 || pos >= NUMMOD as isize {
            return None;
        }
        Some(tiles_of_suit(self.0)[pos as usize])
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = TYPE_CHARS.get(self.0).copied().unwrap_or('?');
        write!(f, "{}{}", c, self.1)
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl ser::Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

struct TileVisitor;

impl<'de> de::Visitor<'de> for TileVisitor {
    type Value = Tile;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("tile symbol")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Tile::from_symbol(v).map_err(E::custom)
    }
}

impl<'de> de::Deserialize<'de> for Tile {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as de::Deserializer<'de>>::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(TileVisitor)
    }
}

pub fn tile_type_from_char(c: char) -> Option<Type> {
    TYPE_CHARS.iter().position(|&tc| tc == c)
}

// 種別の全ての牌を数字の昇順で返却
pub fn tiles_of_suit(ti: Type) -> Vec<Tile> {
    if ti >= TYPE {
        return vec![];
    }
    (1..=TNUM_MAX[ti]).map(|ni| Tile(ti, ni)).collect()
}

// 全種類の牌 (ソート済み)
pub fn all_tile_kinds() -> Vec<Tile> {
    (0..TYPE).flat_map(tiles_of_suit).collect()
}

// [TileTable]
// 種別ごとの牌の枚数 table[ti][ni]
pub type TileRow = [usize; TNUM];
pub type TileTable = [TileRow; TYPE];

pub fn tiles_to_tile_table(tiles: &[Tile]) -> TileTable {
    let mut tt = TileTable::default();
    for t in tiles {
        tt[t.0][t.1] += 1;
    }
    tt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol() {
        assert_eq!(Tile::from_symbol("b1").unwrap(), Tile(TB, 1));
        assert_eq!(Tile::from_symbol("z7").unwrap(), Tile(TZ, DR));
        assert_eq!(Tile::from_symbol("f8").unwrap(), Tile(TF, 8));
        assert!(Tile::from_symbol("z8").is_err());
        assert!(Tile::from_symbol("b0").is_err());
        assert!(Tile::from_symbol("x1").is_err());
        assert!(Tile::from_symbol("b12").is_err());
        assert_eq!(Tile(TD, 9).to_string(), "d9");
    }

    #[test]
    fn test_order() {
        let mut v = vec![Tile(TZ, 1), Tile(TC, 9), Tile(TB, 3), Tile(TC, 1)];
        v.sort();
        assert_eq!(v, vec![Tile(TB, 3), Tile(TC, 1), Tile(TC, 9), Tile(TZ, 1)]);
    }

    #[test]
    fn test_kind() {
        assert!(Tile(TB, 5).is_numeral());
        assert!(Tile(TZ, WE).is_honour() && !Tile(TZ, WE).is_numeral());
        assert!(Tile(TZ, DG).is_honour() && !Tile(TZ, DG).is_bonus());
        assert!(Tile(TF, 1).is_bonus() && !Tile(TF, 1).is_honour());
        assert_eq!(Tile(TD, 4).suit(), TD);
    }

    #[test]
    fn test_rank_position() {
        assert_eq!(Tile(TC, 1).rank_position_within_suit(), Some(0));
        assert_eq!(Tile(TC, 9).rank_position_within_suit(), Some(8));
        assert_eq!(Tile(TZ, DR).rank_position_within_suit(), Some(6));
        assert_eq!(tiles_of_suit(TB).len(), NUMMOD);
        assert_eq!(tiles_of_suit(TZ).len(), 7);
        assert_eq!(tiles_of_suit(TF).len(), 8);
        assert_eq!(all_tile_kinds().len(), 9 * 3 + 7 + 8);
    }

    #[test]
    fn test_offset_stays_in_suit() {
        assert_eq!(Tile(TB, 7).offset(2), Some(Tile(TB, 9)));
        assert_eq!(Tile(TB, 8).offset(2), None);
        assert_eq!(Tile(TC, 9).offset(1), None);
        assert_eq!(Tile(TD, 1).offset(-1), None);
        assert_eq!(Tile(TD, 2).offset(-1), Some(Tile(TD, 1)));
        assert_eq!(Tile(TZ, WE).offset(1), None);
        assert_eq!(Tile(TF, 1).offset(1), None);
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&vec![Tile(TB, 1), Tile(TZ, DW)]).unwrap();
        assert_eq!(json, r#"["b1","z5"]"#);
        let v: Vec<Tile> = serde_json::from_str(&json).unwrap();
        assert_eq!(v, vec![Tile(TB, 1), Tile(TZ, DW)]);
        assert!(serde_json::from_str::<Tile>(r#""q1""#).is_err());
    }

    #[test]
    fn test_tile_table() {
        let tiles = vec![Tile(TB, 1), Tile(TB, 1), Tile(TZ, 3), Tile(TF, 2)];
        let tt = tiles_to_tile_table(&tiles);
        assert_eq!(tt[TB][1], 2);
        assert_eq!(tt[TZ][3] + tt[TF][2], 2);
        assert_eq!(tt.iter().flatten().sum::<usize>(), tiles.len());
    }
}
