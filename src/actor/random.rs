use rand::prelude::*;

use super::*;

pub struct RandomBuilder;

impl ActorBuilder for RandomBuilder {
    fn get_default_config(&self) -> Config {
        Config {
            name: "Random".to_string(),
            args: vec![Arg::int("seed", 0)],
        }
    }

    fn create(&self, config: Config) -> Box<dyn Actor> {
        Box::new(Random::from_config(config))
    }
}

// 和了可能な場合は必ず和了し,それ以外は合法な行動からランダムに選択
pub struct Random {
    config: Config,
    rng: rand::rngs::StdRng,
}

impl Random {
    pub fn from_config(config: Config) -> Self {
        let seed = config.args[0].value.as_int() as u64;
        Self {
            config,
            rng: rand::SeedableRng::seed_from_u64(seed),
        }
    }
}

const WIN_TYPES: [WinType; 5] = [
    WinType::Pair,
    WinType::Chow1,
    WinType::Chow2,
    WinType::Chow3,
    WinType::Pung,
];

const CLAIM_TYPES: [ClaimType; 5] = [
    ClaimType::Chow1,
    ClaimType::Chow2,
    ClaimType::Chow3,
    ClaimType::Pung,
    ClaimType::Kong,
];

impl Actor for Random {
    fn select_turn_action(
        &mut self,
        pl: &Player,
        drawn: Option<Tile>,
        rule: &dyn Ruleset,
    ) -> TurnAction {
        if drawn.is_some() && rule.can_claim_self_drawn_win(pl) {
            return TurnAction::SelfDrawnWin;
        }

        let mut kongs: Vec<Tile> = pl.sorted_tiles();
        kongs.dedup();
        kongs.retain(|&t| rule.can_declare_concealed_kong(pl, t));
        if let Some(&t) = kongs.first() {
            if self.rng.gen_bool(0.5) {
                return TurnAction::ConcealedKong(t);
            }
        }

        match pl.tiles.choose(&mut self.rng) {
            Some(&t) => TurnAction::Discard(t),
            None => default_discard(pl, drawn),
        }
    }

    fn select_claim(&mut self, pl: &Player, discard: Tile, rule: &dyn Ruleset) -> ClaimRequest {
        for wt in WIN_TYPES {
            let req = ClaimRequest::win(discard, wt);
            if rule.can_claim(pl, &req) {
                return req;
            }
        }

        // 鳴かない選択肢を含めて等確率
        let mut cands = vec![ClaimRequest::nothing(discard)];
        for ct in CLAIM_TYPES {
            let req = ClaimRequest::new(discard, ct);
            if rule.can_claim(pl, &req) {
                cands.push(req);
            }
        }
        cands[self.rng.gen_range(0..cands.len())]
    }

    fn get_config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::common::player_from_string;
    use crate::rule::create_ruleset;

    fn random(seed: i32) -> Box<dyn Actor> {
        create_actor(&format!("Random({})", seed)).unwrap()
    }

    #[test]
    fn test_always_wins() {
        let rule = create_ruleset("Minimal").unwrap();
        let pl = player_from_string("b123456789c111z1").unwrap();
        for seed in 0..10 {
            let mut a = random(seed);
            let req = a.select_claim(&pl, Tile(TZ, 1), &*rule);
            assert_eq!(req, ClaimRequest::win(Tile(TZ, 1), WinType::Pair));
        }

        let pl = player_from_string("b123456789c111z11").unwrap();
        let act = random(0).select_turn_action(&pl, Some(Tile(TZ, 1)), &*rule);
        assert_eq!(act, TurnAction::SelfDrawnWin);
    }

    #[test]
    fn test_legal_choices_only() {
        let rule = create_ruleset("Minimal").unwrap();
        let pl = player_from_string("b2399c5555z1").unwrap();
        let mut a = random(3);
        for _ in 0..50 {
            let req = a.select_claim(&pl, Tile(TB, 9), &*rule);
            assert!(req.claim_type == ClaimType::Nothing || rule.can_claim(&pl, &req));

            match a.select_turn_action(&pl, Some(Tile(TZ, 1)), &*rule) {
                TurnAction::Discard(t) => assert!(pl.has(t)),
                TurnAction::ConcealedKong(t) => assert_eq!(t, Tile(TC, 5)),
                TurnAction::SelfDrawnWin => panic!("not a winning hand"),
            }
        }
    }

    #[test]
    fn test_seeded() {
        let rule = create_ruleset("Minimal").unwrap();
        let pl = player_from_string("b123456789c258z3").unwrap();
        let mut a1 = random(9);
        let mut a2 = random(9);
        for _ in 0..20 {
            assert_eq!(
                a1.select_turn_action(&pl, None, &*rule),
                a2.select_turn_action(&pl, None, &*rule)
            );
        }
    }
}
