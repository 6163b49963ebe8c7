// 牌山と文字列表現の変換など,ルールの外側で使用する処理
pub mod common;
pub mod wall;
