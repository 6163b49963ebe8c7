use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimType {
    Nothing,
    // 順子 鳴いた牌の位置 (1: 最小, 2: 中央, 3: 最大)
    Chow1,
    Chow2,
    Chow3,
    Pair, // 和了時の雀頭としてのみ有効
    Pung,
    Kong,
    ConcealedKong, // 暗槓 捨て牌に対する鳴きではなく自家の宣言
    Win,
}

impl ClaimType {
    // 複数のプレイヤーが同じ捨て牌を要求した場合の優先度
    pub fn priority(&self) -> usize {
        match self {
            ClaimType::Win => 3,
            ClaimType::Kong | ClaimType::Pung => 2,
            ClaimType::Chow1 | ClaimType::Chow2 | ClaimType::Chow3 => 1,
            _ => 0,
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        Some(match s {
            "nothing" => ClaimType::Nothing,
            "chow1" => ClaimType::Chow1,
            "chow2" => ClaimType::Chow2,
            "chow3" => ClaimType::Chow3,
            "pair" => ClaimType::Pair,
            "pung" => ClaimType::Pung,
            "kong" => ClaimType::Kong,
            "ckong" => ClaimType::ConcealedKong,
            "win" => ClaimType::Win,
            _ => return None,
        })
    }
}

// 和了牌がどの形を完成させるか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinType {
    Pair,
    Chow1,
    Chow2,
    Chow3,
    Pung,
}

impl WinType {
    // 和了を除いた場合に対応する鳴き
    pub fn claim_type(&self) -> ClaimType {
        match self {
            WinType::Pair => ClaimType::Pair,
            WinType::Chow1 => ClaimType::Chow1,
            WinType::Chow2 => ClaimType::Chow2,
            WinType::Chow3 => ClaimType::Chow3,
            WinType::Pung => ClaimType::Pung,
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        Some(match s {
            "pair" => WinType::Pair,
            "chow1" => WinType::Chow1,
            "chow2" => WinType::Chow2,
            "chow3" => WinType::Chow3,
            "pung" => WinType::Pung,
            _ => return None,
        })
    }
}

// 鳴き要求 1回の判定の間だけ存在する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRequest {
    pub tile: Tile,
    pub claim_type: ClaimType,
    pub win_type: Option<WinType>,
}

impl ClaimRequest {
    #[inline]
    pub fn new(tile: Tile, claim_type: ClaimType) -> Self {
        let win_type = if claim_type == ClaimType::Pair {
            Some(WinType::Pair)
        } else {
            None
        };
        Self {
            tile,
            claim_type,
            win_type,
        }
    }

    #[inline]
    pub fn win(tile: Tile, win_type: WinType) -> Self {
        Self {
            tile,
            claim_type: ClaimType::Win,
            win_type: Some(win_type),
        }
    }

    #[inline]
    pub fn nothing(tile: Tile) -> Self {
        Self::new(tile, ClaimType::Nothing)
    }

    // "pung", "chow2", "win:pair" 形式の文字列から生成
    pub fn from_exp(exp: &str, tile: Tile) -> Result<Self, RuleError> {
        let parse_err = |message: &str| RuleError::Parse {
            input: exp.to_string(),
            message: message.to_string(),
        };

        let mut it = exp.split(':');
        let ct = it.next().unwrap_or("");
        let claim_type = ClaimType::from_name(ct).ok_or_else(|| parse_err("unknown claim type"))?;
        let req = match (claim_type, it.next()) {
            (ClaimType::Win, Some(wt)) => {
                let win_type = WinType::from_name(wt).ok_or_else(|| parse_err("unknown win type"))?;
                Self::win(tile, win_type)
            }
            (ClaimType::Win, None) => return Err(parse_err("win type missing")),
            (_, Some(_)) => return Err(parse_err("win type is only for win claims")),
            (_, None) => Self::new(tile, claim_type),
        };
        if it.next().is_some() {
            return Err(parse_err("too many ':'"));
        }
        Ok(req)
    }
}

impl fmt::Display for ClaimRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.win_type {
            Some(wt) if self.claim_type == ClaimType::Win => {
                write!(f, "{:?}({:?}) {}", self.claim_type, wt, self.tile)
            }
            _ => write!(f, "{:?} {}", self.claim_type, self.tile),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_exp() {
        let t = Tile(TB, 3);
        assert_eq!(
            ClaimRequest::from_exp("pung", t).unwrap(),
            ClaimRequest::new(t, ClaimType::Pung)
        );
        assert_eq!(
            ClaimRequest::from_exp("win:chow2", t).unwrap(),
            ClaimRequest::win(t, WinType::Chow2)
        );
        assert_eq!(
            ClaimRequest::from_exp("pair", t).unwrap().win_type,
            Some(WinType::Pair)
        );
        assert!(ClaimRequest::from_exp("win", t).is_err());
        assert!(ClaimRequest::from_exp("pung:pair", t).is_err());
        assert!(ClaimRequest::from_exp("win:kong", t).is_err());
        assert!(ClaimRequest::from_exp("steal", t).is_err());
    }

    #[test]
    fn test_priority() {
        assert!(ClaimType::Win.priority() > ClaimType::Pung.priority());
        assert_eq!(ClaimType::Kong.priority(), ClaimType::Pung.priority());
        assert!(ClaimType::Pung.priority() > ClaimType::Chow3.priority());
        assert_eq!(ClaimType::Nothing.priority(), 0);
        assert_eq!(ClaimType::Pair.priority(), 0);
    }
}
