// 型エイリアス
pub type Seat = usize; // 座席
pub type Type = usize; // 牌の種別部分 (索子,萬子,筒子,字牌,花牌)
pub type Tnum = usize; // 牌の数字部分 (1~9, 0は未使用)
pub type Point = i32; // 点数の増減
pub type Score = i32; // 持ち点

// Number
pub const SEAT: usize = 4; // 座席の数
pub const TYPE: usize = 5; // 牌の種別部分の数 (索子,萬子,筒子,字牌,花牌)
pub const TNUM: usize = 10; // 牌の数字部分の数 (0~9)
pub const TILE: usize = 4; // 同種の牌の数 (花牌は各1枚)
pub const NUMMOD: usize = 9; // 数牌の1種別あたりの数字の数

// 和了形の構成
pub const WIN_MELDS: usize = 4; // 面子の数
pub const WIN_PAIRS: usize = 1; // 雀頭の数

// Type Index
#[allow(dead_code)]
pub const TB: usize = 0; // Type: Bamboo     (索子)
#[allow(dead_code)]
pub const TC: usize = 1; // Type: Characters (萬子)
#[allow(dead_code)]
pub const TD: usize = 2; // Type: Dots       (筒子)
pub const TZ: usize = 3; // Type: Honours    (字牌)
pub const TF: usize = 4; // Type: Bonus      (花牌, 季節牌)

// Tnum Index (字牌)
#[allow(dead_code)]
pub const WE: usize = 1; // Wind:   East  (東)
#[allow(dead_code)]
pub const WS: usize = 2; // Wind:   South (南)
#[allow(dead_code)]
pub const WW: usize = 3; // Wind:   West  (西)
#[allow(dead_code)]
pub const WN: usize = 4; // Wind:   North (北)
#[allow(dead_code)]
pub const DW: usize = 5; // Dragon: White (白)
#[allow(dead_code)]
pub const DG: usize = 6; // Dragon: Green (發)
pub const DR: usize = 7; // Dragon: Red   (中)

// Tnum Index (花牌) 1~4: 花, 5~8: 季節
pub const FLOWERS: usize = 4;
pub const SEASONS: usize = 4;

// 種別ごとの数字の上限
pub const TNUM_MAX: [Tnum; TYPE] = [NUMMOD, NUMMOD, NUMMOD, DR, FLOWERS + SEASONS];

pub const TYPE_CHARS: [char; TYPE] = ['b', 'c', 'd', 'z', 'f'];
