use crate::model::*;

// 点数計算に必要な局の終了時の情報
#[derive(Debug)]
pub struct ScoreContext<'a> {
    pub players: &'a [Player; SEAT],
    pub winner: Option<Seat>,    // 流局の場合はNone
    pub self_drawn: bool,        // ツモ和了
    pub discarder: Option<Seat>, // 和了牌を捨てたプレイヤー
    #[allow(dead_code)]
    pub wind_offset: Seat, // 親の座席
    #[allow(dead_code)]
    pub wind_of_the_round: usize, // 場風 (0: 東, 1: 南, ...)
}

// 点数計算 (Rulesetから委譲される外部の協力者)
pub trait Scorer {
    fn score(&self, ctx: &ScoreContext<'_>) -> [Point; SEAT];
    // 誤った和了宣言の罰符
    fn process_illegal_win(&self, players: &[Player; SEAT], offender: Seat) -> [Point; SEAT];
}

// 和了者に一定の点数を支払うだけの最小限の点数計算
// 点数 = base + 花牌の枚数
// ツモ和了は他家全員が支払い, 出和了は放銃者が3人分を支払う
#[derive(Debug, Clone)]
pub struct FlatScorer {
    pub base: Point,
}

impl Scorer for FlatScorer {
    fn score(&self, ctx: &ScoreContext<'_>) -> [Point; SEAT] {
        let mut deltas = [0; SEAT];
        let winner = match ctx.winner {
            Some(w) => w,
            None => return deltas,
        };
        let value = self.base + ctx.players[winner].bonus.len() as Point;

        for s in 0..SEAT {
            if s == winner {
                continue;
            }
            let payer = match ctx.discarder {
                Some(d) if !ctx.self_drawn => d,
                _ => s,
            };
            deltas[payer] -= value;
            deltas[winner] += value;
        }
        deltas
    }

    fn process_illegal_win(&self, _players: &[Player; SEAT], offender: Seat) -> [Point; SEAT] {
        let mut deltas = [0; SEAT];
        for s in 0..SEAT {
            if s != offender {
                deltas[s] += self.base;
                deltas[offender] -= self.base;
            }
        }
        deltas
    }
}
