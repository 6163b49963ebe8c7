use crate::model::*;

// "b123z11f1" 形式の文字列を牌のリストに変換
pub fn tiles_from_string(exp: &str) -> Result<Vec<Tile>, RuleError> {
    let parse_err = |message: String| RuleError::Parse {
        input: exp.to_string(),
        message,
    };

    let mut tiles = vec![];
    let mut ti = None;
    for c in exp.chars() {
        match c {
            '0'..='9' => {
                let ti = ti.ok_or_else(|| parse_err("tile number before tile type".to_string()))?;
                let ni = c.to_digit(10).unwrap_or(0) as usize;
                let t = Tile(ti, ni);
                if !t.is_valid() {
                    return Err(parse_err(format!("invalid tile: {}", t)));
                }
                tiles.push(t);
            }
            _ => match tile_type_from_char(c) {
                Some(t) => ti = Some(t),
                None => return Err(parse_err(format!("invalid char: '{}'", c))),
            },
        }
    }
    Ok(tiles)
}

// 公開された面子 末尾の'*'は暗槓
pub fn meld_from_string(exp: &str) -> Result<Meld, RuleError> {
    let (body, concealed) = match exp.strip_suffix('*') {
        Some(b) => (b, true),
        None => (exp, false),
    };
    let tiles = tiles_from_string(body)?;
    Meld::from_tiles(tiles, concealed).ok_or_else(|| RuleError::Parse {
        input: exp.to_string(),
        message: "invalid meld".to_string(),
    })
}

// "手牌,面子,面子,..." 形式の文字列からプレイヤーの手牌を生成
// 手牌に含まれる花牌は花牌置き場に移動する
pub fn player_from_string(exp: &str) -> Result<Player, RuleError> {
    let mut it = exp.split(',');
    let tiles = tiles_from_string(it.next().unwrap_or(""))?;
    let mut pl = Player::from_tiles(tiles);
    for m in it {
        pl.reveal_meld(meld_from_string(m)?);
    }
    let bonus = pl.bonus_in_hand();
    pl.move_to_bonus(&bonus)?;
    Ok(pl)
}
