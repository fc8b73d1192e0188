use super::board::Board;
use super::r#move::Move;
use super::types::{BoardDimension, Difficulty, Player, Position, TileContent};
use crate::error::EngineError;
use serde::Serialize;

/// 対局状態
///
/// 盤面とクイーン位置リストは二重表現なので、変更は必ずこの型のメソッドを通して行い、
/// 両者を常に一致させる。外部データからの復元は `GameRecord::replay` 経由で行う。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    board: Board,
    current_player: Player,
    difficulty: Difficulty,
    /// 0 -> White, 1 -> Black
    queens: [Vec<Position>; 2],
    arrows: Vec<Position>,
    history: Vec<Move>,
    finished: bool,
    winner: Player,
}

impl GameState {
    /// 任意配置から局面を作る。配置が盤外や重複なら `InvalidConfiguration`。
    pub fn with_position(
        dimension: BoardDimension,
        white: &[Position],
        black: &[Position],
        arrows: &[Position],
        to_move: Player,
    ) -> Result<Self, EngineError> {
        if to_move == Player::None {
            return Err(EngineError::InvalidConfiguration(
                "side to move must be White or Black".to_string(),
            ));
        }

        let mut state = GameState {
            board: Board::new(dimension),
            current_player: to_move,
            difficulty: Difficulty::default(),
            queens: [Vec::new(), Vec::new()],
            arrows: Vec::new(),
            history: Vec::new(),
            finished: false,
            winner: Player::None,
        };

        let placements = white
            .iter()
            .map(|&p| (p, TileContent::WhiteQueen))
            .chain(black.iter().map(|&p| (p, TileContent::BlackQueen)))
            .chain(arrows.iter().map(|&p| (p, TileContent::Arrow)));

        for (pos, tile) in placements {
            if !state.board.is_inside(pos) {
                return Err(EngineError::InvalidConfiguration(format!(
                    "{} is outside of the {} board",
                    pos, dimension
                )));
            }
            if !state.board.is_empty_at(pos) {
                return Err(EngineError::InvalidConfiguration(format!(
                    "{} is occupied twice",
                    pos
                )));
            }
            state.board.set(pos, tile);
        }

        state.queens = [white.to_vec(), black.to_vec()];
        state.arrows = arrows.to_vec();
        Ok(state)
    }

    /// 探索用の複製。手順履歴は持ち越さない。
    pub fn search_clone(&self) -> Self {
        GameState {
            board: self.board.clone(),
            current_player: self.current_player,
            difficulty: self.difficulty,
            queens: self.queens.clone(),
            arrows: self.arrows.clone(),
            history: Vec::new(),
            finished: self.finished,
            winner: self.winner,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn dimension(&self) -> BoardDimension {
        self.board.dimension()
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// 対局開始時に選ばれた AI の強さ
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn queen_positions(&self, player: Player) -> &[Position] {
        match player {
            Player::White => &self.queens[0],
            Player::Black => &self.queens[1],
            Player::None => &[],
        }
    }

    pub fn arrow_positions(&self) -> &[Position] {
        &self.arrows
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// 終局時のみ意味を持つ
    pub fn winner(&self) -> Player {
        self.winner
    }

    /// 合法性確認済みの手を盤面・リスト・履歴・手番に反映する。
    ///
    /// 呼び出し側 (`logic::apply_move`) が合法性を保証する。
    pub(crate) fn commit_move(&mut self, mv: &Move) {
        let tile = match mv.player.queen_tile() {
            Some(tile) => tile,
            None => unreachable!("legal moves always belong to White or Black"),
        };

        let idx = player_index(mv.player);
        if let Some(slot) = self.queens[idx].iter_mut().find(|p| **p == mv.queen_from) {
            *slot = mv.queen_to;
        }
        self.board.set(mv.queen_from, TileContent::Empty);
        self.board.set(mv.queen_to, tile);

        self.board.set(mv.arrow, TileContent::Arrow);
        self.arrows.push(mv.arrow);

        self.history.push(*mv);
        self.current_player = mv.player.opponent();
    }

    pub(crate) fn mark_finished(&mut self, winner: Player) {
        self.finished = true;
        self.winner = winner;
    }
}

fn player_index(player: Player) -> usize {
    match player {
        Player::White => 0,
        Player::Black => 1,
        Player::None => unreachable!("Player::None has no queens"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_with_position_places_tiles() {
        let state = GameState::with_position(
            BoardDimension::Six,
            &[p(5, 1)],
            &[p(0, 1)],
            &[p(2, 2)],
            Player::White,
        )
        .unwrap();
        assert_eq!(state.board().get(p(5, 1)), TileContent::WhiteQueen);
        assert_eq!(state.board().get(p(0, 1)), TileContent::BlackQueen);
        assert_eq!(state.board().get(p(2, 2)), TileContent::Arrow);
        assert_eq!(state.queen_positions(Player::White), &[p(5, 1)]);
        assert!(state.queen_positions(Player::None).is_empty());
    }

    #[test]
    fn test_with_position_rejects_overlap_and_out_of_bounds() {
        let overlap = GameState::with_position(
            BoardDimension::Six,
            &[p(1, 1)],
            &[p(1, 1)],
            &[],
            Player::White,
        );
        assert!(matches!(overlap, Err(EngineError::InvalidConfiguration(_))));

        let outside =
            GameState::with_position(BoardDimension::Six, &[p(6, 0)], &[], &[], Player::White);
        assert!(matches!(outside, Err(EngineError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_commit_move_keeps_list_and_board_in_sync() {
        let mut state = GameState::with_position(
            BoardDimension::Six,
            &[p(5, 1)],
            &[p(0, 1)],
            &[],
            Player::White,
        )
        .unwrap();
        let mv = Move::new(Player::White, p(5, 1), p(3, 1), p(3, 3));
        state.commit_move(&mv);

        assert_eq!(state.queen_positions(Player::White), &[p(3, 1)]);
        assert_eq!(state.board().get(p(5, 1)), TileContent::Empty);
        assert_eq!(state.board().get(p(3, 1)), TileContent::WhiteQueen);
        assert_eq!(state.arrow_positions(), &[p(3, 3)]);
        assert_eq!(state.current_player(), Player::Black);
        assert_eq!(state.history(), &[mv]);
    }

    #[test]
    fn test_search_clone_drops_history_only() {
        let mut state = GameState::with_position(
            BoardDimension::Six,
            &[p(5, 1)],
            &[p(0, 1)],
            &[],
            Player::White,
        )
        .unwrap();
        state.commit_move(&Move::new(Player::White, p(5, 1), p(4, 1), p(4, 2)));
        state.mark_finished(Player::White);

        let copy = state.search_clone();
        assert!(copy.history().is_empty());
        assert_eq!(copy.board(), state.board());
        assert_eq!(copy.current_player(), state.current_player());
        assert!(copy.is_finished());
        assert_eq!(copy.winner(), Player::White);
    }
}
