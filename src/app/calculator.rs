use std::fs::File;
use std::io::{self, BufRead};

use serde::Serialize;

use crate::control::common::*;
use crate::hand::calc_winning_tiles;
use crate::model::*;
use crate::rule::{create_ruleset, Ruleset};
use crate::util::misc::*;

use crate::error;

#[derive(Debug)]
pub struct CalculatorApp {
    args: Vec<String>,
    detail: bool,
    json: bool,
    rule: String,
}

impl CalculatorApp {
    pub fn new(args: Vec<String>) -> Self {
        Self {
            args,
            detail: false,
            json: false,
            rule: "Minimal".to_string(),
        }
    }

    pub fn run(&mut self) {
        let mut file_path = "".to_string();
        let mut exp = "".to_string();
        let args = self.args.clone();
        let mut it = args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-d" => self.detail = true,
                "-j" => self.json = true,
                "-f" => file_path = next_value(&mut it, s),
                "-r" => self.rule = next_value(&mut it, s),
                _ => {
                    if s.starts_with('-') {
                        error!("unknown option: {}", s);
                        return;
                    }
                    if !exp.is_empty() {
                        error!("multiple expression is not allowed");
                        return;
                    }
                    exp = s.clone();
                }
            }
        }

        if (file_path.is_empty() && exp.is_empty()) || (!file_path.is_empty() && !exp.is_empty()) {
            print_usage();
            return;
        }

        let rule = match create_ruleset(&self.rule) {
            Ok(r) => r,
            Err(e) => {
                error!("{}", e);
                return;
            }
        };

        if !exp.is_empty() {
            if let Err(e) = self.process_expression(&*rule, &exp) {
                error!("{}", e);
            }
            return;
        }

        if let Err(e) = self.run_from_file(&*rule, &file_path) {
            error!("{}", e);
        }
    }

    fn run_from_file(&self, rule: &dyn Ruleset, file_path: &str) -> Res {
        let file = File::open(file_path)?;
        let lines = io::BufReader::new(file).lines();
        for exp in lines.map_while(Result::ok) {
            let e = exp.trim();
            if e.is_empty() || e.starts_with('#') {
                // 空行とコメント行はスキップ
                println!("> {}", exp);
            } else if let Err(e) = self.process_expression(rule, &exp) {
                error!("{}", e);
            }
            println!();
        }
        Ok(())
    }

    fn process_expression(&self, rule: &dyn Ruleset, exp: &str) -> Res {
        let mut calculator = Calculator::new(self.detail);
        calculator.parse(exp)?;
        let verdict = calculator.run(rule)?;
        if self.json {
            println!("{}", serde_json::to_string(&verdict)?);
        } else {
            verdict.print();
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
enum Verify {
    Ok,
    Error,
    Skip,
}

// 判定対象の行動
#[derive(Debug, Clone, Copy, PartialEq)]
enum Query {
    Waits,                 // 待ち牌の表示のみ
    SelfDrawnWin,          // ツモ和了
    ConcealedKong(Tile),   // 暗槓
    Claim(ClaimRequest),   // 捨て牌に対する鳴き
}

// 1つの式に対する判定結果
#[derive(Debug, Serialize)]
struct Verdict {
    input: String,
    query: String,
    legal: bool,
    before: Player,
    after: Option<Player>, // 合法な場合のみ適用後の手牌
    covered: bool,         // 適用後 (または現在) の手牌が和了形か
    waits: Vec<Tile>,
    verify: Verify,
}

impl Verdict {
    fn print(&self) {
        println!("hand: {}", self.before);
        println!("waits: {}", vec_to_compact_string(&self.waits));
        println!("{}: {}", self.query, if self.legal { "legal" } else { "illegal" });
        if let Some(after) = &self.after {
            println!("after: {}", after);
        }
        println!("covered: {}", self.covered);
        println!("verify: {:?}", self.verify);
    }
}

#[derive(Debug)]
struct Calculator {
    detail: bool,
    input: String,
    player: Player,
    query: Query,
    expected: Option<bool>,
}

impl Calculator {
    fn new(detail: bool) -> Self {
        Self {
            detail,
            input: "".to_string(),
            player: Player::new(),
            query: Query::Waits,
            expected: None,
        }
    }

    // HAND[,MELD...] [/ CLAIM [/ EXPECT]] # comment
    fn parse(&mut self, input: &str) -> Res {
        println!("> {}", input);
        self.input = input.to_string();

        let input = input.split('#').next().unwrap_or(""); // コメント削除
        let exps: Vec<&str> = input.split('/').map(|s| s.trim()).collect();
        if exps.len() > 3 {
            Err(format!("too many sections: {}", input))?;
        }
        self.player = player_from_string(&exps[0].replace(' ', ""))?;
        if let Some(exp) = exps.get(1) {
            self.parse_query(exp)?;
        }
        if let Some(exp) = exps.get(2) {
            self.expected = Some(exp.parse::<bool>()?);
        }

        if self.detail {
            println!("{:?}", self);
        }
        Ok(())
    }

    // "win:pair z1", "pung c1", "ckong b1", "self" または空
    fn parse_query(&mut self, input: &str) -> Res {
        let words: Vec<&str> = input.split_whitespace().collect();
        self.query = match words.as_slice() {
            [] => Query::Waits,
            ["self"] => Query::SelfDrawnWin,
            ["ckong", t] => Query::ConcealedKong(Tile::from_symbol(t)?),
            [exp, t] => Query::Claim(ClaimRequest::from_exp(exp, Tile::from_symbol(t)?)?),
            _ => Err(format!("invalid claim: {}", input))?,
        };
        Ok(())
    }

    fn run(&self, rule: &dyn Ruleset) -> Result<Verdict, RuleError> {
        let pl = &self.player;
        let (query, legal, after) = match self.query {
            Query::Waits => ("coverage".to_string(), rule.check_coverage(pl), None),
            Query::SelfDrawnWin => {
                let legal = rule.can_claim_self_drawn_win(pl);
                ("self".to_string(), legal, None)
            }
            Query::ConcealedKong(t) => {
                let legal = rule.can_declare_concealed_kong(pl, t);
                let req = ClaimRequest::new(t, ClaimType::ConcealedKong);
                let after = self.apply(rule, legal, &req)?;
                (format!("{}", req), legal, after)
            }
            Query::Claim(req) => {
                let legal = rule.can_claim(pl, &req);
                let after = self.apply(rule, legal, &req)?;
                (format!("{}", req), legal, after)
            }
        };

        let covered = rule.check_coverage(after.as_ref().unwrap_or(pl));
        let verify = match self.expected {
            Some(e) if e == legal => Verify::Ok,
            Some(_) => Verify::Error,
            None => Verify::Skip,
        };
        Ok(Verdict {
            input: self.input.clone(),
            query,
            legal,
            before: pl.clone(),
            after,
            covered,
            waits: calc_winning_tiles(pl),
            verify,
        })
    }

    // 合法な鳴きを手牌のコピーに適用
    fn apply(
        &self,
        rule: &dyn Ruleset,
        legal: bool,
        req: &ClaimRequest,
    ) -> Result<Option<Player>, RuleError> {
        if !legal {
            return Ok(None);
        }
        let mut pl = self.player.clone();
        if req.claim_type == ClaimType::Win {
            rule.award_winning_claim(&mut pl, req)?;
        } else {
            rule.process_claim(&mut pl, req)?;
        }
        Ok(Some(pl))
    }
}

fn print_usage() {
    error!(
        r"invalid input
Usage
    $ cargo run C EXPRESSION [-d] [-j] [-r RULESET]
    $ cargo run C -f FILE [-d] [-j] [-r RULESET]
Expression
    HAND[,MELD...] [/ CLAIM [/ EXPECT]]
    e.g. 'b123456789c111z1 / win:pair z1 / true'
Options
    -d: print debug info
    -f: read expressions from file instead of a commandline expression
    -j: print verdicts as json
    -r: ruleset (default: Minimal)
"
    );
}
