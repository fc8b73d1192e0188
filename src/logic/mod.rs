use crate::core::{Board, GameState, Move, Player, Position, TileContent};
use crate::error::EngineError;

/// 8 方向 (縦横 → 斜め)。列挙順は決定的であること。
pub const DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// `start` から `(dr, dc)` 方向へ進み、最初の障害物か盤端の手前までの空きマスを集める。
/// `start` 自身は含まない。
pub fn ray_cast(board: &Board, start: Position, direction: (i32, i32)) -> Vec<Position> {
    let mut tiles = Vec::new();
    if !board.is_inside(start) {
        return tiles;
    }

    let (dr, dc) = direction;
    let mut curr = start.offset(dr, dc);
    while board.is_inside(curr) && board.is_empty_at(curr) {
        tiles.push(curr);
        curr = curr.offset(dr, dc);
    }
    tiles
}

/// クイーンの動きで到達できる全マス
pub fn gather_reachable_tiles(board: &Board, start: Position) -> Vec<Position> {
    DIRECTIONS
        .iter()
        .flat_map(|&dir| ray_cast(board, start, dir))
        .collect()
}

/// クイーンを移動させた仮の盤面を作る (元の盤面は変更しない)
fn board_after_queen_move(board: &Board, from: Position, to: Position, tile: TileContent) -> Board {
    let mut next = board.clone();
    next.set(from, TileContent::Empty);
    next.set(to, tile);
    next
}

/// 合法手生成
///
/// クイーン順 × 移動先順 × 矢の順で列挙する。`move_cap` に達した時点で打ち切る。
pub fn generate_moves_for_player(
    state: &GameState,
    player: Player,
    move_cap: Option<usize>,
) -> Vec<Move> {
    let mut moves = Vec::new();
    let cap = move_cap.unwrap_or(usize::MAX);
    let tile = match player.queen_tile() {
        Some(tile) => tile,
        None => return moves,
    };
    if cap == 0 {
        return moves;
    }

    let board = state.board();
    for &from in state.queen_positions(player) {
        for to in gather_reachable_tiles(board, from) {
            let simulated = board_after_queen_move(board, from, to, tile);
            for arrow in gather_reachable_tiles(&simulated, to) {
                moves.push(Move::new(player, from, to, arrow));
                if moves.len() >= cap {
                    return moves;
                }
            }
        }
    }
    moves
}

/// 1 手でも指せるか。指せない側は即負け。
pub fn has_any_legal_move(state: &GameState, player: Player) -> bool {
    !generate_moves_for_player(state, player, Some(1)).is_empty()
}

/// 合法手判定
pub fn is_move_legal(state: &GameState, mv: &Move) -> bool {
    if state.is_finished() || mv.player != state.current_player() {
        return false;
    }
    let tile = match mv.player.queen_tile() {
        Some(tile) => tile,
        None => return false,
    };

    let board = state.board();
    let cells = [mv.queen_from, mv.queen_to, mv.arrow];
    if !cells.iter().all(|&pos| board.is_inside(pos)) {
        return false;
    }
    if board.get(mv.queen_from) != tile {
        return false;
    }
    if !gather_reachable_tiles(board, mv.queen_from).contains(&mv.queen_to) {
        return false;
    }

    // 矢は移動後の盤面で判定する (空いた元のマスも通過できる)
    let simulated = board_after_queen_move(board, mv.queen_from, mv.queen_to, tile);
    gather_reachable_tiles(&simulated, mv.queen_to).contains(&mv.arrow)
}

/// 手番側が指せなければ相手の勝ちとして終局させる。終局していれば true。
pub fn evaluate_win_state(state: &mut GameState) -> bool {
    if state.is_finished() {
        return true;
    }
    let current = state.current_player();
    if !has_any_legal_move(state, current) {
        state.mark_finished(current.opponent());
        return true;
    }
    false
}

/// 移動適用
///
/// 非合法手なら状態を一切変更せずに `IllegalMove` を返す。
pub fn apply_move(state: &mut GameState, mv: &Move) -> Result<(), EngineError> {
    if !is_move_legal(state, mv) {
        return Err(EngineError::IllegalMove { mv: *mv });
    }
    state.commit_move(mv);
    evaluate_win_state(state);
    Ok(())
}

/// 終端局面か (終局済み、または手番側に合法手がない)
pub fn is_terminal(state: &GameState) -> bool {
    state.is_finished() || !has_any_legal_move(state, state.current_player())
}
