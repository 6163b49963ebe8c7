use crate::model::*;

// [完成形判定 (面子, 雀頭)]
// 手牌をちょうどn_melds個の面子(刻子,順子)とn_pair個の雀頭に分割できるかを
// バックトラックで探索する. 探索の状態は(残りの牌のTileTable, n_melds, n_pair)のみ.

// 公開済みの面子を除いて手牌に必要な(面子, 雀頭)の数を返却
// 公開済みの面子が和了形の構成を超えている場合はNone
pub fn needed_sets(revealed: &[Meld]) -> Option<(usize, usize)> {
    let mut melds = WIN_MELDS as isize;
    let mut pairs = WIN_PAIRS as isize;
    for m in revealed {
        if m.is_set() {
            melds -= 1;
        }
        if m.is_pair() {
            pairs -= 1;
        }
    }

    if melds < 0 || pairs < 0 {
        return None;
    }
    Some((melds as usize, pairs as usize))
}

pub fn check_coverage(tiles: &[Tile], n_pair: usize, n_melds: usize) -> bool {
    if tiles.len() != 3 * n_melds + 2 * n_pair {
        return false;
    }
    // 花牌は面子にならない
    if tiles.iter().any(|t| t.is_bonus()) {
        return false;
    }

    let mut tt = tiles_to_tile_table(tiles);
    is_covered(&mut tt, n_pair, n_melds)
}

// 最も小さい牌は必ずいずれかの組に含まれるので,その牌を起点とする組のみを試す
// 試す順序: 雀頭 -> 刻子 -> 順子(起点の牌が最小)
fn is_covered(tt: &mut TileTable, n_pair: usize, n_melds: usize) -> bool {
    let t = match first_tile(tt) {
        Some(t) => t,
        None => return n_pair == 0 && n_melds == 0,
    };
    let Tile(ti, ni) = t;
    let n = tt[ti][ni];

    if n_pair > 0 && n >= 2 {
        tt[ti][ni] -= 2;
        let ok = is_covered(tt, n_pair - 1, n_melds);
        tt[ti][ni] += 2;
        if ok {
            return true;
        }
    }

    if n_melds > 0 && n >= 3 {
        tt[ti][ni] -= 3;
        let ok = is_covered(tt, n_pair, n_melds - 1);
        tt[ti][ni] += 3;
        if ok {
            return true;
        }
    }

    if n_melds > 0 {
        if let (Some(t1), Some(t2)) = (t.offset(1), t.offset(2)) {
            if tt[t1.0][t1.1] > 0 && tt[t2.0][t2.1] > 0 {
                for &Tile(ti, ni) in &[t, t1, t2] {
                    tt[ti][ni] -= 1;
                }
                let ok = is_covered(tt, n_pair, n_melds - 1);
                for &Tile(ti, ni) in &[t, t1, t2] {
                    tt[ti][ni] += 1;
                }
                if ok {
                    return true;
                }
            }
        }
    }

    false
}

fn first_tile(tt: &TileTable) -> Option<Tile> {
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            if tt[ti][ni] != 0 {
                return Some(Tile(ti, ni));
            }
        }
    }
    None
}

// 公開済みの面子を考慮した和了形判定
pub fn is_player_covered(pl: &Player) -> bool {
    match needed_sets(&pl.revealed) {
        Some((n_melds, n_pair)) => check_coverage(&pl.tiles, n_pair, n_melds),
        None => false,
    }
}

// [和了牌判定]
// 手牌に1枚加えると和了形になる牌のリスト (聴牌していない場合は空)
// 既に4枚使用している牌も含む
pub fn calc_winning_tiles(pl: &Player) -> Vec<Tile> {
    let (n_melds, n_pair) = match needed_sets(&pl.revealed) {
        Some(v) => v,
        None => return vec![],
    };
    if pl.tiles.len() + 1 != 3 * n_melds + 2 * n_pair {
        return vec![];
    }

    let mut res = vec![];
    let mut tiles = pl.tiles.clone();
    for t in all_tile_kinds() {
        if t.is_bonus() {
            continue;
        }
        tiles.push(t);
        if check_coverage(&tiles, n_pair, n_melds) {
            res.push(t);
        }
        tiles.pop();
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::common::tiles_from_string;

    fn check(exp: &str, n_pair: usize, n_melds: usize) -> bool {
        check_coverage(&tiles_from_string(exp).unwrap(), n_pair, n_melds)
    }

    #[test]
    fn test_empty_hand() {
        assert!(check_coverage(&[], 0, 0));
    }

    #[test]
    fn test_size_mismatch() {
        assert!(!check("b111", 0, 0));
        assert!(!check("b111", 1, 0));
        assert!(!check("b11", 0, 1));
        assert!(!check("b1112", 0, 1));
        assert!(!check("", 1, 0));
    }

    #[test]
    fn test_pungs_and_pair() {
        assert!(check("b11122233344455", 1, 4));
    }

    #[test]
    fn test_full_suit_run() {
        assert!(check("c123456789", 0, 3));
    }

    #[test]
    fn test_pair_must_be_backtracked() {
        assert!(check("b111123z11", 1, 2));
        // d11を雀頭にすると d123 d455 が残り失敗するので d111 の刻子に戻る
        assert!(check("d11123455", 1, 2));
    }

    #[test]
    fn test_honours_never_chow() {
        assert!(!check("z123", 0, 1));
        assert!(check("z555", 0, 1));
        assert!(check("z55", 1, 0));
    }

    #[test]
    fn test_no_cross_suit_chow() {
        // b8 b9 c1 は連続した数字に見えても順子ではない
        assert!(!check("b89c1", 0, 1));
        assert!(!check("c9d12", 0, 1));
    }

    #[test]
    fn test_fourth_copy_left_over() {
        assert!(!check("b1111z222z33", 0, 3));
        assert!(check("b111123456z11", 1, 3));
    }

    #[test]
    fn test_bonus_tiles_not_coverable() {
        assert!(!check("f111", 0, 1));
    }

    #[test]
    fn test_needed_sets() {
        assert_eq!(needed_sets(&[]), Some((4, 1)));
        let pung = Meld::set(Tile(TZ, 1), 3).unwrap();
        let kong = Meld::set(Tile(TZ, 2), 4).unwrap();
        let pair = Meld::set(Tile(TZ, 3), 2).unwrap();
        assert_eq!(needed_sets(&[pung.clone(), kong.clone()]), Some((2, 1)));
        assert_eq!(needed_sets(&[pair.clone()]), Some((4, 0)));
        assert_eq!(needed_sets(&[pair.clone(), pair]), None);
        let five = vec![pung.clone(), pung.clone(), pung.clone(), kong, pung];
        assert_eq!(needed_sets(&five), None);
    }

    #[test]
    fn test_winning_tiles() {
        // b2345678 z111 + c111: b2,b5,b8待ち
        let pl = Player {
            tiles: tiles_from_string("b2345678z111").unwrap(),
            revealed: vec![Meld::set(Tile(TC, 1), 3).unwrap()],
            bonus: vec![],
        };
        assert_eq!(
            calc_winning_tiles(&pl),
            vec![Tile(TB, 2), Tile(TB, 5), Tile(TB, 8)]
        );

        // 単騎待ち
        let pl = Player::from_tiles(tiles_from_string("b111222333c456z1").unwrap());
        assert_eq!(calc_winning_tiles(&pl), vec![Tile(TZ, 1)]);

        // 枚数が合わない場合は空
        let pl = Player::from_tiles(tiles_from_string("b11122").unwrap());
        assert!(calc_winning_tiles(&pl).is_empty());
    }

    #[test]
    fn test_player_covered() {
        let mut pl = Player::from_tiles(tiles_from_string("b123d456z55").unwrap());
        pl.reveal_meld(Meld::set(Tile(TZ, DR), 3).unwrap());
        pl.reveal_meld(Meld::chow(Tile(TC, 7)).unwrap());
        assert!(is_player_covered(&pl));
        pl.bonus.push(Tile(TF, 1));
        assert!(is_player_covered(&pl));
        pl.revealed.push(Meld::set(Tile(TZ, WE), 2).unwrap());
        assert!(!is_player_covered(&pl));
    }
}
