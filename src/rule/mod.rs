// ルールセット
// 鳴きの可否判定,和了判定,鳴きの優先順位,点数計算,親の移動を1つの窓口にまとめる
mod minimal;
mod score;

pub use score::*;

use std::fmt;

use crate::actor::Actor;
use crate::model::*;
use crate::util::variant::*;

pub trait Ruleset {
    #[allow(dead_code)]
    fn name(&self) -> &str {
        &self.get_config().name
    }

    // 開始時の親の座席
    fn start_wind(&self) -> Seat {
        0
    }

    fn starting_points(&self) -> Score {
        0
    }

    // 誤った和了宣言で局を終了するか
    fn end_hand_on_illegal_win(&self) -> bool {
        true
    }

    // ルールセットに付属するAIを生成
    fn create_ai(&self) -> Box<dyn Actor>;

    fn can_claim(&self, pl: &Player, req: &ClaimRequest) -> bool;
    fn can_claim_self_drawn_win(&self, pl: &Player) -> bool;
    fn can_declare_concealed_kong(&self, pl: &Player, t: Tile) -> bool;

    // 鳴きを手牌に適用 (可否判定は呼び出し側の責任)
    fn process_claim(&self, pl: &mut Player, req: &ClaimRequest) -> RuleResult<Meld>;
    // 和了牌を手牌に取り込む 和了以外の要求はエラー
    fn award_winning_claim(&self, pl: &mut Player, req: &ClaimRequest) -> RuleResult<Meld>;

    fn check_coverage(&self, pl: &Player) -> bool;

    // 同じ捨て牌に対する複数の鳴きから1つを選択
    fn arbitrate(
        &self,
        discarder: Seat,
        claims: &[(Seat, ClaimRequest)],
    ) -> Option<(Seat, ClaimRequest)>;

    fn score(&self, ctx: &ScoreContext<'_>) -> [Point; SEAT];
    fn resolve_illegal_win(&self, players: &[Player; SEAT], offender: Seat) -> [Point; SEAT];

    // 局終了後に親が何席移動するか
    fn rotate(&self, won: bool) -> Seat;

    fn get_config(&self) -> &Config;
}

impl fmt::Debug for dyn Ruleset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get_config())
    }
}

// 鳴きの種類の優先度 (和了 > 槓,ポン > チー) が最も高い要求を選択
// 同じ優先度の場合は捨てたプレイヤーの下家から順に近い方を優先
// 捨てたプレイヤー自身の要求,優先度0の要求 (なし,雀頭) は無視
pub fn arbitrate_by_priority(
    discarder: Seat,
    claims: &[(Seat, ClaimRequest)],
) -> Option<(Seat, ClaimRequest)> {
    let mut best: Option<(usize, Seat, Seat, ClaimRequest)> = None; // (priority, distance, seat, req)
    for &(s, req) in claims {
        if s == discarder || s >= SEAT {
            continue;
        }
        let p = req.claim_type.priority();
        if p == 0 {
            continue;
        }
        let dist = (s + SEAT - discarder) % SEAT;
        match best {
            Some((bp, bd, _, _)) if bp > p || (bp == p && bd <= dist) => {}
            _ => best = Some((p, dist, s, req)),
        }
    }
    best.map(|(_, _, s, req)| (s, req))
}

trait RulesetBuilder {
    fn get_default_config(&self) -> Config;
    fn create(&self, config: Config) -> Result<Box<dyn Ruleset>, String>;
}

pub fn create_ruleset(exp: &str) -> Result<Box<dyn Ruleset>, String> {
    let builders: Vec<Box<dyn RulesetBuilder>> = vec![Box::new(minimal::MinimalBuilder {})];

    let (name, args) = split_expression(exp)?;
    for b in &builders {
        let mut conf = b.get_default_config();
        if name == conf.name {
            apply_args(&mut conf, &args)?;
            return b.create(conf);
        }
    }

    Err(format!("unknown ruleset name: {}", name))
}
