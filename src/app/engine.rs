use std::fmt;

use rand::prelude::*;
use serde::Serialize;

use crate::actor::{create_actor, Actor, TurnAction};
use crate::control::wall::{create_tile_set, Dealer, Wall};
use crate::model::*;
use crate::rule::{create_ruleset, Ruleset, ScoreContext};
use crate::util::misc::*;

use crate::{error, info, warn};

const HAND_SIZE: usize = 13;

// [App]
#[derive(Debug)]
pub struct EngineApp {
    seed: u64,
    n_hand: u32,
    rule: String,
    verbose: bool,
    json: bool,
    names: [String; SEAT], // actor names (空の場合はルールセットのAI)
}

impl EngineApp {
    pub fn new(args: Vec<String>) -> Self {
        let mut app = Self {
            seed: 0,
            n_hand: 4,
            rule: "Minimal".to_string(),
            verbose: false,
            json: false,
            names: Default::default(),
        };

        let mut it = args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-s" => app.seed = next_value(&mut it, s),
                "-n" => app.n_hand = next_value(&mut it, s),
                "-r" => app.rule = next_value(&mut it, s),
                "-v" => app.verbose = true,
                "-j" => app.json = true,
                "-0" => app.names[0] = next_value(&mut it, s),
                "-1" => app.names[1] = next_value(&mut it, s),
                "-2" => app.names[2] = next_value(&mut it, s),
                "-3" => app.names[3] = next_value(&mut it, s),
                opt => error_exit(format!("unknown option: {}", opt)),
            }
        }

        if app.seed == 0 {
            app.seed = unixtime_now() as u64;
            info!(
                "Random seed is not specified. Unix timestamp '{}' is used as seed.",
                app.seed
            );
        }

        app
    }

    pub fn run(self) {
        println!("seed: {}", self.seed);

        let rule = create_ruleset(&self.rule).unwrap_or_else(error_exit);
        println!("rule: {:?}", rule);

        let mut actors: [Box<dyn Actor>; SEAT] = [
            self.create_actor(&*rule, 0),
            self.create_actor(&*rule, 1),
            self.create_actor(&*rule, 2),
            self.create_actor(&*rule, 3),
        ];
        for s in 0..SEAT {
            println!("actor{}: {:?}", s, actors[s]);
        }
        println!();

        let mut rng: rand::rngs::StdRng = rand::SeedableRng::seed_from_u64(self.seed);
        let mut scores = [rule.starting_points(); SEAT];
        let mut dealer = rule.start_wind();
        let start = std::time::Instant::now();
        for i in 0..self.n_hand {
            let mut hand = HandEngine::new(
                &*rule,
                &mut actors,
                Box::new(Wall::new(rng.next_u64())),
                dealer,
                i as usize / SEAT,
            );
            hand.verbose = self.verbose;
            let outcome = hand.run();

            for s in 0..SEAT {
                scores[s] += outcome.deltas[s];
            }
            if self.json {
                match serde_json::to_string(&outcome) {
                    Ok(json) => println!("{}", json),
                    Err(e) => error!("{}", e),
                }
            } else {
                println!("hand {:3}: {}, scores: {:?}", i, outcome, scores);
            }

            let won = matches!(outcome.result, HandResult::Win { .. });
            dealer = (dealer + rule.rotate(won)) % SEAT;
        }
        println!(
            "total elapsed time: {:8.3}sec",
            start.elapsed().as_nanos() as f32 / 1000000000.0
        );
    }

    fn create_actor(&self, rule: &dyn Ruleset, seat: Seat) -> Box<dyn Actor> {
        if self.names[seat].is_empty() {
            rule.create_ai()
        } else {
            create_actor(&self.names[seat]).unwrap_or_else(error_exit)
        }
    }
}

// [Hand]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum HandResult {
    Win {
        winner: Seat,
        self_drawn: bool,
        discarder: Option<Seat>,
    },
    IllegalWin {
        offender: Seat,
    },
    Draw,
}

#[derive(Debug, Serialize)]
pub struct HandOutcome {
    pub dealer: Seat,
    pub result: HandResult,
    pub deltas: [Point; SEAT],
    pub players: [Player; SEAT],
}

impl fmt::Display for HandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            HandResult::Win {
                winner,
                self_drawn: true,
                ..
            } => write!(f, "seat {} self-drawn win", winner)?,
            HandResult::Win {
                winner,
                discarder: Some(d),
                ..
            } => write!(f, "seat {} win on discard of seat {}", winner, d)?,
            HandResult::Win { winner, .. } => write!(f, "seat {} win", winner)?,
            HandResult::IllegalWin { offender } => write!(f, "seat {} illegal win", offender)?,
            HandResult::Draw => write!(f, "draw")?,
        }
        write!(f, ", deltas: {:?}", self.deltas)
    }
}

// 1局分の進行
// 全ての牌は常に牌山,手牌,公開面子,花牌置き場,捨て牌のいずれか1箇所に存在する
pub struct HandEngine<'a> {
    rule: &'a dyn Ruleset,
    actors: &'a mut [Box<dyn Actor>; SEAT],
    wall: Box<dyn Dealer>,
    players: [Player; SEAT],
    discards: Vec<(Seat, Tile)>,
    dealer: Seat,
    wind_of_the_round: usize,
    turn: Seat,
    drawn: Option<Tile>,    // 手番のプレイヤーがツモった牌
    deltas: [Point; SEAT],  // 局の途中で確定した点数移動 (罰符)
    result: Option<HandResult>,
    pub verbose: bool,
}

impl<'a> HandEngine<'a> {
    pub fn new(
        rule: &'a dyn Ruleset,
        actors: &'a mut [Box<dyn Actor>; SEAT],
        wall: Box<dyn Dealer>,
        dealer: Seat,
        wind_of_the_round: usize,
    ) -> Self {
        Self {
            rule,
            actors,
            wall,
            players: Default::default(),
            discards: vec![],
            dealer,
            wind_of_the_round,
            turn: dealer,
            drawn: None,
            deltas: [0; SEAT],
            result: None,
            verbose: false,
        }
    }

    pub fn run(&mut self) -> HandOutcome {
        self.do_deal();
        if self.result.is_none() {
            self.do_draw(self.dealer);
        }
        while self.result.is_none() {
            if let Some(t) = self.do_turn() {
                self.do_call(t);
            }
        }
        self.do_hand_end()
    }

    fn do_deal(&mut self) {
        for i in 0..SEAT {
            let s = (self.dealer + i) % SEAT;
            self.actors[s].init(s);
            for _ in 0..HAND_SIZE {
                match self.wall.draw() {
                    Some(t) => self.players[s].tiles.push(t),
                    None => {
                        self.result = Some(HandResult::Draw);
                        return;
                    }
                }
            }
        }
        for i in 0..SEAT {
            if !self.compensate_bonus((self.dealer + i) % SEAT) {
                return;
            }
        }
    }

    // 手牌の花牌を花牌置き場に移動し,同じ枚数を補充
    // 補充牌が花牌の場合は繰り返す. 牌山が尽きた場合はfalse (流局)
    fn compensate_bonus(&mut self, s: Seat) -> bool {
        loop {
            let bonus = self.players[s].bonus_in_hand();
            if bonus.is_empty() {
                return true;
            }
            if let Err(e) = self.players[s].move_to_bonus(&bonus) {
                error_exit(e)
            }
            self.print(format_args!("seat {} bonus {}", s, vec_to_compact_string(&bonus)));
            for _ in &bonus {
                match self.wall.draw_replacement() {
                    Some(t) => self.players[s].tiles.push(t),
                    None => {
                        self.result = Some(HandResult::Draw);
                        return false;
                    }
                }
            }
        }
    }

    fn do_draw(&mut self, s: Seat) {
        self.draw_with(s, |w| w.draw());
    }

    fn do_replacement_draw(&mut self, s: Seat) {
        self.draw_with(s, |w| w.draw_replacement());
    }

    fn draw_with(&mut self, s: Seat, f: impl FnOnce(&mut dyn Dealer) -> Option<Tile>) {
        self.turn = s;
        self.drawn = None;
        match f(&mut *self.wall) {
            Some(t) => {
                self.players[s].tiles.push(t);
                if self.compensate_bonus(s) {
                    // 花牌の補充後は最後に加えた牌がツモ牌
                    self.drawn = self.players[s].tiles.last().copied();
                }
            }
            None => self.result = Some(HandResult::Draw),
        }
    }

    // 手番の行動 捨て牌があればその牌を返却
    fn do_turn(&mut self) -> Option<Tile> {
        let s = self.turn;
        let act = self.actors[s].select_turn_action(&self.players[s], self.drawn, self.rule);
        match act {
            TurnAction::SelfDrawnWin => {
                if self.drawn.is_some() && self.rule.can_claim_self_drawn_win(&self.players[s]) {
                    self.print(format_args!("seat {} self-drawn win", s));
                    self.result = Some(HandResult::Win {
                        winner: s,
                        self_drawn: true,
                        discarder: None,
                    });
                } else {
                    self.do_illegal_win(s);
                    if self.result.is_none() {
                        return self.do_discard(s, None);
                    }
                }
                None
            }
            TurnAction::ConcealedKong(t) => {
                if !self.rule.can_declare_concealed_kong(&self.players[s], t) {
                    warn!("seat {}: concealed kong is not allowed: {}", s, t);
                    return self.do_discard(s, None);
                }
                let req = ClaimRequest::new(t, ClaimType::ConcealedKong);
                self.process_claim(s, &req);
                self.do_replacement_draw(s);
                None
            }
            TurnAction::Discard(t) => self.do_discard(s, Some(t)),
        }
    }

    // tがNoneの場合はツモ切り (ツモ牌がなければ手牌の最後の牌)
    fn do_discard(&mut self, s: Seat, t: Option<Tile>) -> Option<Tile> {
        let t = match t.or(self.drawn).or_else(|| self.players[s].tiles.last().copied()) {
            Some(t) => t,
            None => error_exit(format!("seat {}: no tile to discard", s)),
        };
        if let Err(e) = self.players[s].remove_tiles(&[t]) {
            error_exit(format!("seat {}: {}", s, e))
        }
        self.print(format_args!("seat {} discard {}", s, t));
        self.discards.push((s, t));
        self.drawn = None;
        Some(t)
    }

    // 捨て牌に対する鳴きの受付と調停
    fn do_call(&mut self, t: Tile) {
        let discarder = self.turn;
        let mut claims = vec![];
        for i in 1..SEAT {
            let s = (discarder + i) % SEAT;
            let req = self.actors[s].select_claim(&self.players[s], t, self.rule);
            if req.claim_type == ClaimType::Nothing {
                continue;
            }
            if req.tile != t {
                warn!("seat {}: claim for a different tile: {}", s, req);
                continue;
            }
            claims.push((s, req));
        }

        while let Some((s, req)) = self.rule.arbitrate(discarder, &claims) {
            claims.retain(|&(s2, _)| s2 != s);
            if !self.rule.can_claim(&self.players[s], &req) {
                if req.claim_type == ClaimType::Win {
                    self.do_illegal_win(s);
                    if self.result.is_some() {
                        return;
                    }
                } else {
                    warn!("seat {}: claim is not allowed: {}", s, req);
                }
                continue;
            }

            // 鳴かれた牌は捨て牌から取り除く
            self.discards.pop();
            self.print(format_args!("seat {} claim {}", s, req));
            if req.claim_type == ClaimType::Win {
                if let Err(e) = self.rule.award_winning_claim(&mut self.players[s], &req) {
                    error_exit(format!("seat {}: {}", s, e))
                }
                self.result = Some(HandResult::Win {
                    winner: s,
                    self_drawn: false,
                    discarder: Some(discarder),
                });
                return;
            }

            self.process_claim(s, &req);
            if req.claim_type == ClaimType::Kong {
                self.do_replacement_draw(s);
            } else {
                self.turn = s;
                self.drawn = None;
            }
            return;
        }

        self.do_draw((discarder + 1) % SEAT);
    }

    fn process_claim(&mut self, s: Seat, req: &ClaimRequest) {
        match self.rule.process_claim(&mut self.players[s], req) {
            Ok(m) => self.print(format_args!("seat {} meld {}", s, m)),
            Err(e) => error_exit(format!("seat {}: {}", s, e)),
        }
    }

    fn do_illegal_win(&mut self, s: Seat) {
        warn!("seat {}: illegal win declaration", s);
        let d = self.rule.resolve_illegal_win(&self.players, s);
        for i in 0..SEAT {
            self.deltas[i] += d[i];
        }
        if self.rule.end_hand_on_illegal_win() {
            self.result = Some(HandResult::IllegalWin { offender: s });
        }
    }

    fn do_hand_end(&mut self) -> HandOutcome {
        if let Err(e) = self.check_conservation() {
            error_exit(e)
        }

        let result = self.result.clone().unwrap_or(HandResult::Draw);
        if let HandResult::Win {
            winner,
            self_drawn,
            discarder,
        } = result
        {
            let ctx = ScoreContext {
                players: &self.players,
                winner: Some(winner),
                self_drawn,
                discarder,
                wind_offset: self.dealer,
                wind_of_the_round: self.wind_of_the_round,
            };
            let d = self.rule.score(&ctx);
            for s in 0..SEAT {
                self.deltas[s] += d[s];
            }
        }

        HandOutcome {
            dealer: self.dealer,
            result,
            deltas: self.deltas,
            players: self.players.clone(),
        }
    }

    // 牌の総数と種類ごとの枚数が初期状態と一致するか
    fn check_conservation(&self) -> Result<(), String> {
        let mut tiles: Vec<Tile> = self.discards.iter().map(|&(_, t)| t).collect();
        for pl in &self.players {
            tiles.extend(pl.all_tiles());
        }
        let set = create_tile_set();
        if tiles.len() + self.wall.remaining() != set.len() {
            return Err(format!(
                "tile count mismatch: {} + {} (wall) != {}",
                tiles.len(),
                self.wall.remaining(),
                set.len()
            ));
        }
        let used = tiles_to_tile_table(&tiles);
        let all = tiles_to_tile_table(&set);
        for t in all_tile_kinds() {
            if used[t.0][t.1] > all[t.0][t.1] {
                return Err(format!("too many copies of {}", t));
            }
        }
        Ok(())
    }

    fn print(&self, args: fmt::Arguments<'_>) {
        if self.verbose {
            println!("{}", args);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::common::tiles_from_string;
    use crate::util::variant::Config;
    use proptest::prelude::*;

    // 常に雀頭での和了を宣言する
    struct Liar {
        config: Config,
    }

    impl Actor for Liar {
        fn select_turn_action(
            &mut self,
            pl: &Player,
            drawn: Option<Tile>,
            _rule: &dyn Ruleset,
        ) -> TurnAction {
            TurnAction::Discard(drawn.unwrap_or(pl.tiles[0]))
        }

        fn select_claim(&mut self, _pl: &Player, t: Tile, _rule: &dyn Ruleset) -> ClaimRequest {
            ClaimRequest::win(t, WinType::Pair)
        }

        fn get_config(&self) -> &Config {
            &self.config
        }
    }

    fn actors(names: [&str; SEAT]) -> [Box<dyn Actor>; SEAT] {
        names.map(|n| create_actor(n).unwrap())
    }

    // 各座席の配牌と親のツモ牌を指定した牌山 (残りは未使用の牌を順に並べる)
    fn rigged_wall(hands: [&str; SEAT], draws: &str) -> Box<dyn Dealer> {
        let mut rest = create_tile_set();
        let mut tiles = vec![];
        for exp in hands.iter().chain([draws].iter()) {
            for t in tiles_from_string(exp).unwrap() {
                let pos = rest.iter().position(|&x| x == t).unwrap();
                rest.remove(pos);
                tiles.push(t);
            }
        }
        // 補充牌は末尾から取られるので花牌は先頭側に置く
        rest.sort_by_key(|t| !t.is_bonus());
        tiles.extend(rest);
        Box::new(Wall::from_tiles(tiles))
    }

    const HANDS: [&str; SEAT] = [
        "b123456789c111z1",
        "c333444555666z2",
        "d111222333444z3",
        "d555666777888z4",
    ];

    #[test]
    fn test_self_drawn_win() {
        let rule = create_ruleset("Minimal").unwrap();
        let mut acts = actors(["Random", "Nop", "Nop", "Nop"]);
        let mut hand = HandEngine::new(&*rule, &mut acts, rigged_wall(HANDS, "z1"), 0, 0);
        let outcome = hand.run();
        assert_eq!(
            outcome.result,
            HandResult::Win {
                winner: 0,
                self_drawn: true,
                discarder: None
            }
        );
        assert_eq!(outcome.deltas, [24, -8, -8, -8]);
    }

    #[test]
    fn test_win_on_discard() {
        let rule = create_ruleset("Minimal").unwrap();
        let mut acts = actors(["Nop", "Random", "Random", "Random"]);
        let mut hand = HandEngine::new(&*rule, &mut acts, rigged_wall(HANDS, "z2"), 0, 0);
        let outcome = hand.run();
        assert_eq!(
            outcome.result,
            HandResult::Win {
                winner: 1,
                self_drawn: false,
                discarder: Some(0)
            }
        );
        assert_eq!(outcome.deltas, [-24, 24, 0, 0]);
        assert!(outcome.players[1].revealed[0].is_pair());
    }

    #[test]
    fn test_illegal_win() {
        let rule = create_ruleset("Minimal").unwrap();
        let mut acts = actors(["Nop", "Nop", "Nop", "Nop"]);
        acts[2] = Box::new(Liar {
            config: Config {
                name: "Liar".to_string(),
                args: vec![],
            },
        });
        let mut hand = HandEngine::new(&*rule, &mut acts, rigged_wall(HANDS, "b5"), 0, 0);
        let outcome = hand.run();
        assert_eq!(outcome.result, HandResult::IllegalWin { offender: 2 });
        assert_eq!(outcome.deltas, [8, 8, -24, 8]);
    }

    #[test]
    fn test_exhaustive_draw() {
        let rule = create_ruleset("Minimal").unwrap();
        let mut acts = actors(["Nop", "Nop", "Nop", "Nop"]);
        let mut hand = HandEngine::new(&*rule, &mut acts, Box::new(Wall::new(7)), 1, 0);
        let outcome = hand.run();
        assert_eq!(outcome.result, HandResult::Draw);
        assert_eq!(outcome.deltas, [0; SEAT]);
        assert_eq!(outcome.dealer, 1);
        let total: usize = outcome.players.iter().map(|p| p.all_tiles().len()).sum();
        assert!(total >= SEAT * HAND_SIZE);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        // 任意の牌山で局が終了し,点数の増減の合計は0
        #[test]
        fn random_hands_conserve_points(seed in any::<u64>(), actor_seed in 0..1000i32) {
            let rule = create_ruleset("Minimal").unwrap();
            let names: [String; SEAT] = [0, 1, 2, 3].map(|i| format!("Random({})", actor_seed + i));
            let mut acts = names.map(|n| create_actor(&n).unwrap());
            let mut hand = HandEngine::new(&*rule, &mut acts, Box::new(Wall::new(seed)), 0, 0);
            let outcome = hand.run();
            prop_assert_eq!(outcome.deltas.iter().sum::<Point>(), 0);
            for pl in &outcome.players {
                prop_assert!(pl.revealed.len() <= WIN_MELDS + WIN_PAIRS);
                prop_assert!(pl.tiles.iter().all(|t| !t.is_bonus()));
            }
            if let HandResult::Win { winner, .. } = outcome.result {
                prop_assert!(rule.check_coverage(&outcome.players[winner]));
            }
        }
    }

    #[test]
    fn test_seeded_hand_is_deterministic() {
        let rule = create_ruleset("Minimal").unwrap();
        let play = || {
            let mut acts = actors(["Random(5)", "Random(6)", "Random(7)", "Random(8)"]);
            let mut hand = HandEngine::new(&*rule, &mut acts, Box::new(Wall::new(42)), 0, 0);
            serde_json::to_string(&hand.run()).unwrap()
        };
        assert_eq!(play(), play());
    }
}
