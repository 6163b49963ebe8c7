use super::*;
use crate::actor::create_actor;
use crate::hand;

pub struct MinimalBuilder;

impl RulesetBuilder for MinimalBuilder {
    fn get_default_config(&self) -> Config {
        Config {
            name: "Minimal".to_string(),
            args: vec![Arg::string("ai", "Random"), Arg::int("base", 8)],
        }
    }

    fn create(&self, config: Config) -> Result<Box<dyn Ruleset>, String> {
        let ai = config.args[0].value.as_string();
        // 不正なAIの指定は生成時に検出
        create_actor(&ai)?;
        let scorer = FlatScorer {
            base: config.args[1].value.as_int(),
        };
        Ok(Box::new(MinimalRuleset::new(config, ai, Box::new(scorer))))
    }
}

// 基本的な和了形 (4面子1雀頭) のみを判定し,点数計算は外部のScorerに委譲するルールセット
pub struct MinimalRuleset {
    config: Config,
    ai: String,
    scorer: Box<dyn Scorer>,
}

impl MinimalRuleset {
    pub fn new(config: Config, ai: String, scorer: Box<dyn Scorer>) -> Self {
        Self { config, ai, scorer }
    }
}

impl Ruleset for MinimalRuleset {
    fn create_ai(&self) -> Box<dyn Actor> {
        match create_actor(&self.ai) {
            Ok(a) => a,
            Err(e) => crate::util::misc::error_exit(e),
        }
    }

    fn can_claim(&self, pl: &Player, req: &ClaimRequest) -> bool {
        hand::can_claim(pl, req)
    }

    fn can_claim_self_drawn_win(&self, pl: &Player) -> bool {
        hand::can_claim_self_drawn_win(pl)
    }

    fn can_declare_concealed_kong(&self, pl: &Player, t: Tile) -> bool {
        hand::can_declare_concealed_kong(pl, t)
    }

    fn process_claim(&self, pl: &mut Player, req: &ClaimRequest) -> RuleResult<Meld> {
        hand::apply_claim(pl, req)
    }

    fn award_winning_claim(&self, pl: &mut Player, req: &ClaimRequest) -> RuleResult<Meld> {
        if req.claim_type != ClaimType::Win {
            return Err(RuleError::InvalidClaim(*req));
        }
        hand::apply_claim(pl, req)
    }

    fn check_coverage(&self, pl: &Player) -> bool {
        hand::is_player_covered(pl)
    }

    fn arbitrate(
        &self,
        discarder: Seat,
        claims: &[(Seat, ClaimRequest)],
    ) -> Option<(Seat, ClaimRequest)> {
        arbitrate_by_priority(discarder, claims)
    }

    fn score(&self, ctx: &ScoreContext<'_>) -> [Point; SEAT] {
        self.scorer.score(ctx)
    }

    fn resolve_illegal_win(&self, players: &[Player; SEAT], offender: Seat) -> [Point; SEAT] {
        self.scorer.process_illegal_win(players, offender)
    }

    // 和了,流局に関わらず親は下家へ
    fn rotate(&self, _won: bool) -> Seat {
        1
    }

    fn get_config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::common::{player_from_string, tiles_from_string};
    use proptest::prelude::*;

    fn minimal() -> Box<dyn Ruleset> {
        create_ruleset("Minimal").unwrap()
    }

    #[test]
    fn test_defaults() {
        let r = minimal();
        assert_eq!(r.start_wind(), 0);
        assert_eq!(r.starting_points(), 0);
        assert!(r.end_hand_on_illegal_win());
        assert_eq!(r.rotate(true), 1);
        assert_eq!(r.rotate(false), 1);
        assert_eq!(r.create_ai().get_config().name, "Random");
    }

    #[test]
    fn test_award_winning_claim() {
        let r = minimal();
        let mut pl = player_from_string("b123456789c111z1").unwrap();
        let pung = ClaimRequest::new(Tile(TC, 1), ClaimType::Pung);
        assert_eq!(
            r.award_winning_claim(&mut pl, &pung),
            Err(RuleError::InvalidClaim(pung))
        );

        let win = ClaimRequest::win(Tile(TZ, 1), WinType::Pair);
        assert!(r.can_claim(&pl, &win));
        let m = r.award_winning_claim(&mut pl, &win).unwrap();
        assert!(m.is_pair());
        assert!(r.check_coverage(&pl));
    }

    #[test]
    fn test_process_unchecked_claim() {
        let r = minimal();
        let mut pl = player_from_string("b19").unwrap();
        let req = ClaimRequest::new(Tile(TB, 5), ClaimType::Pung);
        assert_eq!(
            r.process_claim(&mut pl, &req),
            Err(RuleError::TileNotHeld(Tile(TB, 5)))
        );
        assert_eq!(pl.tiles, tiles_from_string("b19").unwrap());
    }

    fn any_tile() -> impl Strategy<Value = Tile> {
        (0..TZ + 1).prop_flat_map(|ti| (1..=TNUM_MAX[ti]).prop_map(move |ni| Tile(ti, ni)))
    }

    fn any_claim() -> impl Strategy<Value = ClaimType> {
        prop_oneof![
            Just(ClaimType::Chow1),
            Just(ClaimType::Chow2),
            Just(ClaimType::Chow3),
            Just(ClaimType::Pung),
            Just(ClaimType::Kong),
        ]
    }

    proptest! {
        // 許可された鳴きは牌の総数を保存する (手牌 + 公開面子 = 元の手牌 + 鳴いた牌)
        #[test]
        fn claims_conserve_tiles(
            hand in proptest::collection::vec(any_tile(), 1..14),
            t in any_tile(),
            ct in any_claim(),
        ) {
            let r = minimal();
            let mut pl = Player::from_tiles(hand.clone());
            let req = ClaimRequest::new(t, ct);
            let allowed = r.can_claim(&pl, &req);
            let res = r.process_claim(&mut pl, &req);
            prop_assert_eq!(allowed, res.is_ok());

            let mut expected = hand;
            if allowed {
                expected.push(t);
            }
            expected.sort();
            prop_assert_eq!(pl.all_tiles(), expected);
        }
    }
}
