use super::coverage::is_player_covered;
use crate::model::*;

// [鳴き判定]
// いずれの関数も手牌を変更しない. 和了判定の仮適用は手牌のコピーに対して行う.

pub fn can_claim(pl: &Player, req: &ClaimRequest) -> bool {
    let t = req.tile;
    match req.claim_type {
        ClaimType::Pair => req.win_type == Some(WinType::Pair) && can_claim_set(pl, t, 1),
        ClaimType::Chow1 | ClaimType::Chow2 | ClaimType::Chow3 => {
            can_claim_chow(pl, t, req.claim_type)
        }
        ClaimType::Pung => can_claim_set(pl, t, 2),
        ClaimType::Kong => can_claim_set(pl, t, 3),
        ClaimType::Win => can_claim_win(pl, req),
        ClaimType::Nothing | ClaimType::ConcealedKong => false,
    }
}

// 鳴いた牌と手牌の2枚で順子を作れるか
// 種別の範囲を超える組み合わせ (例: b8b9 + c1) は考慮しない
pub fn can_claim_chow(pl: &Player, t: Tile, claim_type: ClaimType) -> bool {
    if !t.is_numeral() {
        return false;
    }
    match chow_partners(t, claim_type) {
        Some((t1, t2)) => pl.has(t1) && pl.has(t2),
        None => false,
    }
}

// 手牌にn枚以上同じ牌があるか
pub fn can_claim_set(pl: &Player, t: Tile, n: usize) -> bool {
    pl.count(t) >= n
}

// 1. 和了の形を除いた鳴きとして成立するか
// 2. 成立する場合, その鳴きを適用した後の手牌が和了形か
pub fn can_claim_win(pl: &Player, req: &ClaimRequest) -> bool {
    let win_type = match req.win_type {
        Some(wt) => wt,
        None => return false,
    };
    let implied = ClaimRequest {
        tile: req.tile,
        claim_type: win_type.claim_type(),
        win_type: Some(win_type),
    };
    if !can_claim(pl, &implied) {
        return false;
    }

    let mut pl = pl.clone();
    if apply_claim(&mut pl, req).is_err() {
        return false;
    }
    is_player_covered(&pl)
}

// ツモ和了 和了牌は既に手牌に含まれている
pub fn can_claim_self_drawn_win(pl: &Player) -> bool {
    is_player_covered(pl)
}

// 暗槓 手牌に4枚必要
pub fn can_declare_concealed_kong(pl: &Player, t: Tile) -> bool {
    !t.is_bonus() && can_claim_set(pl, t, 4)
}

// 順子を構成する鳴いた牌以外の2枚
pub fn chow_partners(t: Tile, claim_type: ClaimType) -> Option<(Tile, Tile)> {
    match claim_type {
        ClaimType::Chow1 => Some((t.offset(1)?, t.offset(2)?)),
        ClaimType::Chow2 => Some((t.offset(-1)?, t.offset(1)?)),
        ClaimType::Chow3 => Some((t.offset(-2)?, t.offset(-1)?)),
        _ => None,
    }
}

// 鳴きによってできる面子
pub fn form_meld(req: &ClaimRequest) -> RuleResult<Meld> {
    let t = req.tile;
    let shape = match (req.claim_type, req.win_type) {
        (ClaimType::Win, Some(wt)) | (ClaimType::Pair, Some(wt @ WinType::Pair)) => {
            wt.claim_type()
        }
        (ClaimType::Win, None) | (ClaimType::Pair, _) | (ClaimType::Nothing, _) => {
            return Err(RuleError::InvalidClaim(*req));
        }
        (ct, _) => ct,
    };

    let meld = match shape {
        ClaimType::Pair => Meld::set(t, 2).ok_or(RuleError::InvalidClaim(*req))?,
        ClaimType::Chow1 | ClaimType::Chow2 | ClaimType::Chow3 => {
            let (t1, t2) = chow_partners(t, shape).ok_or(RuleError::InvalidClaim(*req))?;
            Meld::from_tiles(vec![t, t1, t2], false).ok_or(RuleError::InvalidClaim(*req))?
        }
        ClaimType::Pung => Meld::set(t, 3).ok_or(RuleError::InvalidClaim(*req))?,
        ClaimType::Kong => Meld::set(t, 4).ok_or(RuleError::InvalidClaim(*req))?,
        ClaimType::ConcealedKong => Meld::concealed_kong(t),
        _ => return Err(RuleError::InvalidClaim(*req)),
    };
    Ok(meld)
}

// 鳴きを手牌に適用し, 公開した面子を返却
// 暗槓以外は鳴いた牌を手牌に加えてから面子の牌を取り除く
// 失敗した場合は手牌を変更しない
pub fn apply_claim(pl: &mut Player, req: &ClaimRequest) -> RuleResult<Meld> {
    let meld = form_meld(req)?;
    let mut next = pl.clone();
    if req.claim_type != ClaimType::ConcealedKong {
        next.tiles.push(req.tile);
    }
    next.remove_tiles(&meld.tiles)?;
    next.reveal_meld(meld.clone());
    *pl = next;
    Ok(meld)
}
