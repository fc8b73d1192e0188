use super::types::{Player, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 1 手 = クイーンの移動 + 矢の設置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Move {
    pub player: Player,
    pub queen_from: Position,
    pub queen_to: Position,
    pub arrow: Position,
}

impl Move {
    pub fn new(player: Player, queen_from: Position, queen_to: Position, arrow: Position) -> Self {
        Move {
            player,
            queen_from,
            queen_to,
            arrow,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}: {} -> {}, arrow {}",
            self.player, self.queen_from, self.queen_to, self.arrow
        )
    }
}
