use super::*;

pub struct NopBuilder;

impl ActorBuilder for NopBuilder {
    fn get_default_config(&self) -> Config {
        Config {
            name: "Nop".to_string(),
            args: vec![],
        }
    }

    fn create(&self, config: Config) -> Box<dyn Actor> {
        Box::new(Nop::from_config(config))
    }
}

// 和了,鳴きを一切行わずツモ切りを続ける
#[derive(Clone)]
pub struct Nop {
    config: Config,
}

impl Nop {
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }
}

impl Actor for Nop {
    fn select_turn_action(
        &mut self,
        pl: &Player,
        drawn: Option<Tile>,
        _rule: &dyn Ruleset,
    ) -> TurnAction {
        default_discard(pl, drawn)
    }

    fn select_claim(&mut self, _pl: &Player, discard: Tile, _rule: &dyn Ruleset) -> ClaimRequest {
        ClaimRequest::nothing(discard)
    }

    fn get_config(&self) -> &Config {
        &self.config
    }
}
