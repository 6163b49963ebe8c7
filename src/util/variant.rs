use std::fmt;

// Ruleset, Actorの引数の値
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    Int(i32),
    String(String),
}

impl Variant {
    pub fn as_int(&self) -> i32 {
        if let &Self::Int(v) = self {
            return v;
        }
        panic!("not an int variant: {}", self);
    }

    pub fn as_string(&self) -> String {
        if let Self::String(v) = self {
            return v.clone();
        }
        panic!("not a string variant: {}", self);
    }

    // 既存の値と同じ型として文字列をパース
    pub fn parse_as(&self, value: &str) -> Result<Variant, String> {
        Ok(match self {
            Variant::Int(_) => Variant::Int(value.parse::<i32>().map_err(|e| e.to_string())?),
            Variant::String(_) => Variant::String(value.to_string()),
        })
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::String(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Arg {
    pub name: String,
    pub value: Variant,
}

impl Arg {
    pub fn int(name: &str, value: i32) -> Self {
        Self {
            name: name.to_string(),
            value: Variant::Int(value),
        }
    }

    pub fn string(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: Variant::String(value.to_string()),
        }
    }
}

// 名前と引数リストの組 Ruleset, Actorの生成に使用
#[derive(Debug, Clone)]
pub struct Config {
    pub name: String,
    pub args: Vec<Arg>,
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arg_str = self
            .args
            .iter()
            .map(|a| format!("{}={}", a.name, a.value))
            .collect::<Vec<String>>()
            .join(",");
        write!(f, "{}({})", self.name, arg_str)
    }
}

// "Name(a0,a1,...)" 形式の文字列を名前と引数のリストに分解
// 括弧の入れ子は最も外側の括弧のみを解釈し, 引数はトップレベルのカンマで分割
pub fn split_expression(exp: &str) -> Result<(&str, Vec<&str>), String> {
    let paren_left = exp.find('(');
    let paren_right = exp.rfind(')');
    match (paren_left, paren_right) {
        (Some(l), Some(r)) => {
            if r < l {
                return Err(format!("invalid paren: {}", exp));
            }
            let inner = &exp[l + 1..r];
            let mut args = vec![];
            let mut depth = 0;
            let mut start = 0;
            for (i, c) in inner.char_indices() {
                match c {
                    '(' => depth += 1,
                    ')' => depth -= 1,
                    ',' if depth == 0 => {
                        args.push(&inner[start..i]);
                        start = i + 1;
                    }
                    _ => {}
                }
            }
            if !inner.is_empty() {
                args.push(&inner[start..]);
            }
            Ok((&exp[..l], args))
        }
        (None, None) => Ok((exp, vec![])),
        _ => Err(format!("invalid paren: {}", exp)),
    }
}

// デフォルト設定に引数を上書き
pub fn apply_args(conf: &mut Config, args: &[&str]) -> Result<(), String> {
    if conf.args.len() < args.len() {
        return Err(format!(
            "expected {} arguments for {}. but {} arguments are provided.",
            conf.args.len(),
            conf.name,
            args.len(),
        ));
    }

    for (i, &a) in args.iter().enumerate() {
        if !a.is_empty() {
            conf.args[i].value = conf.args[i]
                .value
                .parse_as(a)
                .map_err(|e| format!("{}: {}", e, a))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_expression() {
        assert_eq!(split_expression("Nop").unwrap(), ("Nop", vec![]));
        assert_eq!(split_expression("Random(7)").unwrap(), ("Random", vec!["7"]));
        assert_eq!(
            split_expression("Minimal(Random(3),x)").unwrap(),
            ("Minimal", vec!["Random(3)", "x"])
        );
        assert!(split_expression("Random)(").is_err());
        assert!(split_expression("Random(").is_err());
    }

    #[test]
    fn test_apply_args() {
        let mut conf = Config {
            name: "Random".to_string(),
            args: vec![Arg::int("seed", 0), Arg::string("name", "a")],
        };
        apply_args(&mut conf, &["5", ""]).unwrap();
        assert_eq!(conf.args[0].value.as_int(), 5);
        assert_eq!(conf.args[1].value.as_string(), "a");
        assert_eq!(conf.to_string(), "Random(seed=5,name=a)");

        assert!(apply_args(&mut conf, &["x"]).is_err());
        assert!(apply_args(&mut conf, &["1", "2", "3"]).is_err());
    }
}
