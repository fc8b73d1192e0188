use super::state::GameState;
use super::types::{BoardDimension, Difficulty, Player, Position};

/// 盤サイズごとの初期配置 (白は下側、黒は上側)
pub struct BoardLayout {
    pub white: [(i32, i32); 4],
    pub black: [(i32, i32); 4],
}

pub fn layout_for(dimension: BoardDimension) -> BoardLayout {
    match dimension {
        BoardDimension::Six => BoardLayout {
            white: [(5, 1), (5, 4), (4, 0), (4, 5)],
            black: [(0, 1), (0, 4), (1, 0), (1, 5)],
        },
        BoardDimension::Eight => BoardLayout {
            white: [(7, 2), (7, 5), (5, 0), (5, 7)],
            black: [(0, 2), (0, 5), (2, 0), (2, 7)],
        },
        BoardDimension::Ten => BoardLayout {
            white: [(9, 3), (9, 6), (6, 0), (6, 9)],
            black: [(0, 3), (0, 6), (3, 0), (3, 9)],
        },
    }
}

/// 新しい対局を開始する。白番、矢と履歴は空。
pub fn start_new_game(dimension: BoardDimension, difficulty: Difficulty) -> GameState {
    let layout = layout_for(dimension);
    let to_positions = |cells: &[(i32, i32)]| -> Vec<Position> {
        cells.iter().map(|&(r, c)| Position::new(r, c)).collect()
    };

    match GameState::with_position(
        dimension,
        &to_positions(&layout.white),
        &to_positions(&layout.black),
        &[],
        Player::White,
    ) {
        Ok(mut state) => {
            state.set_difficulty(difficulty);
            state
        }
        Err(e) => unreachable!("built-in layout for {} is invalid: {}", dimension, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TileContent;

    #[test]
    fn test_start_positions_for_every_dimension() {
        for dimension in BoardDimension::ALL {
            let state = start_new_game(dimension, Difficulty::Hard);
            let board = state.board();
            assert_eq!(board.count(TileContent::WhiteQueen), 4);
            assert_eq!(board.count(TileContent::BlackQueen), 4);
            assert_eq!(board.count(TileContent::Arrow), 0);
            assert_eq!(state.current_player(), Player::White);
            assert!(!state.is_finished());
            assert!(state.history().is_empty());
            assert_eq!(state.difficulty(), Difficulty::Hard);

            for &pos in state.queen_positions(Player::White) {
                assert_eq!(board.get(pos), TileContent::WhiteQueen);
            }
            for &pos in state.queen_positions(Player::Black) {
                assert_eq!(board.get(pos), TileContent::BlackQueen);
            }
        }
    }

    #[test]
    fn test_six_by_six_layout() {
        let state = start_new_game(BoardDimension::Six, Difficulty::Easy);
        assert_eq!(
            state.queen_positions(Player::White),
            &[
                Position::new(5, 1),
                Position::new(5, 4),
                Position::new(4, 0),
                Position::new(4, 5)
            ]
        );
    }
}
