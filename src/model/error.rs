use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// 手牌に存在しない牌を取り除こうとした (呼び出し側の契約違反)
    TileNotHeld(Tile),
    /// 花牌以外を花牌置き場に移動しようとした
    NotBonusTile(Tile),
    /// 手牌に適用できない鳴き要求
    InvalidClaim(ClaimRequest),
    /// 牌・手牌・鳴き文字列のパースエラー
    Parse { input: String, message: String },
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleError::TileNotHeld(t) => write!(f, "tile not held: {}", t),
            RuleError::NotBonusTile(t) => write!(f, "not a bonus tile: {}", t),
            RuleError::InvalidClaim(req) => write!(f, "invalid claim: {}", req),
            RuleError::Parse { input, message } => {
                write!(f, "parse error on '{}': {}", input, message)
            }
        }
    }
}

impl std::error::Error for RuleError {}

pub type RuleResult<T> = Result<T, RuleError>;
