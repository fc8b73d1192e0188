use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 手番を持つプレイヤー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Player {
    #[default]
    None,
    White, // 先手
    Black,
}

impl Player {
    /// White と Black を入れ替える。None はそのまま返す。
    pub fn opponent(self) -> Player {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
            Player::None => Player::None,
        }
    }

    /// このプレイヤーのクイーンが置かれたマスの状態
    pub fn queen_tile(self) -> Option<TileContent> {
        match self {
            Player::White => Some(TileContent::WhiteQueen),
            Player::Black => Some(TileContent::BlackQueen),
            Player::None => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Player::None => write!(f, "None"),
            Player::White => write!(f, "White"),
            Player::Black => write!(f, "Black"),
        }
    }
}

/// マスの中身
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileContent {
    #[default]
    Empty,
    WhiteQueen,
    BlackQueen,
    Arrow,
}

impl TileContent {
    pub fn is_queen(self) -> bool {
        matches!(self, TileContent::WhiteQueen | TileContent::BlackQueen)
    }
}

/// 盤面座標 (0-indexed)。負の座標は「位置なし」を表す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const INVALID: Position = Position { row: -1, col: -1 };

    pub fn new(row: i32, col: i32) -> Self {
        Position { row, col }
    }

    pub fn is_valid(&self) -> bool {
        self.row >= 0 && self.col >= 0
    }

    pub fn offset(self, dr: i32, dc: i32) -> Position {
        Position::new(self.row + dr, self.col + dc)
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::INVALID
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// 対応する盤サイズ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BoardDimension {
    Six,
    Eight,
    #[default]
    Ten,
}

impl BoardDimension {
    pub const ALL: [BoardDimension; 3] = [
        BoardDimension::Six,
        BoardDimension::Eight,
        BoardDimension::Ten,
    ];

    pub fn size(self) -> usize {
        match self {
            BoardDimension::Six => 6,
            BoardDimension::Eight => 8,
            BoardDimension::Ten => 10,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BoardDimension::Six => "6x6",
            BoardDimension::Eight => "8x8",
            BoardDimension::Ten => "10x10",
        }
    }
}

impl TryFrom<usize> for BoardDimension {
    type Error = EngineError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        match size {
            6 => Ok(BoardDimension::Six),
            8 => Ok(BoardDimension::Eight),
            10 => Ok(BoardDimension::Ten),
            other => Err(EngineError::InvalidConfiguration(format!(
                "unsupported board dimension {}",
                other
            ))),
        }
    }
}

impl fmt::Display for BoardDimension {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// AI の強さ
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_is_involution() {
        assert_eq!(Player::White.opponent(), Player::Black);
        assert_eq!(Player::Black.opponent(), Player::White);
        assert_eq!(Player::White.opponent().opponent(), Player::White);
        assert_eq!(Player::None.opponent(), Player::None);
    }

    #[test]
    fn test_dimension_from_size() {
        assert_eq!(BoardDimension::try_from(8).unwrap(), BoardDimension::Eight);
        assert!(matches!(
            BoardDimension::try_from(7),
            Err(EngineError::InvalidConfiguration(_))
        ));
        assert_eq!(BoardDimension::Ten.size(), 10);
    }

    #[test]
    fn test_invalid_position_sentinel() {
        assert!(!Position::INVALID.is_valid());
        assert!(!Position::default().is_valid());
        assert!(Position::new(0, 0).is_valid());
    }
}
