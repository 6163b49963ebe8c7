// 麻雀のデータモデル
mod claim;
mod define;
mod error;
mod meld;
mod player;
mod tile;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use claim::*;
pub use define::*;
pub use error::*;
pub use meld::*;
pub use player::*;
pub use tile::*;
