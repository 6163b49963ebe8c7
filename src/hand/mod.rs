// 鳴きの可否判定と和了形判定を行うモジュール
mod claim;
mod coverage;

pub use self::{
    claim::{apply_claim, can_claim, can_claim_self_drawn_win, can_declare_concealed_kong},
    coverage::{calc_winning_tiles, is_player_covered},
};
