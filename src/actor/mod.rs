mod nop;
mod random;

use std::fmt;

use crate::model::*;
use crate::rule::Ruleset;
use crate::util::variant::*;

// 手番での行動
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    SelfDrawnWin,
    ConcealedKong(Tile),
    Discard(Tile),
}

// Actor trait
pub trait Actor {
    // 局開始時の初期化処理
    fn init(&mut self, _seat: Seat) {}

    // 手番での行動の選択
    // drawnはこの手番でツモった牌 (鳴いた直後の手番ではNone)
    fn select_turn_action(
        &mut self,
        pl: &Player,
        drawn: Option<Tile>,
        rule: &dyn Ruleset,
    ) -> TurnAction;

    // 他家の捨て牌に対する鳴きの選択
    fn select_claim(&mut self, pl: &Player, discard: Tile, rule: &dyn Ruleset) -> ClaimRequest;

    // Actorの詳細表示用
    fn get_config(&self) -> &Config;
}

impl fmt::Debug for dyn Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get_config())
    }
}

trait ActorBuilder {
    fn get_default_config(&self) -> Config;
    fn create(&self, config: Config) -> Box<dyn Actor>;
}

pub fn create_actor(exp: &str) -> Result<Box<dyn Actor>, String> {
    let builders: Vec<Box<dyn ActorBuilder>> = vec![
        Box::new(nop::NopBuilder {}),
        Box::new(random::RandomBuilder {}),
    ];

    let (name, args) = split_expression(exp)?;
    for b in &builders {
        let mut conf = b.get_default_config();
        if name == conf.name {
            apply_args(&mut conf, &args)?;
            return Ok(b.create(conf));
        }
    }

    Err(format!("unknown actor name: {}", name))
}

// ツモ牌があればツモ切り, なければ手牌の最後の牌
fn default_discard(pl: &Player, drawn: Option<Tile>) -> TurnAction {
    match drawn.or_else(|| pl.tiles.last().copied()) {
        Some(t) => TurnAction::Discard(t),
        None => TurnAction::SelfDrawnWin,
    }
}
