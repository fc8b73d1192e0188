use crate::core::{GameState, Move, Position, TileContent};
use crossterm::{cursor, execute, style::Stylize, terminal};
use std::fmt::Write as _;
use std::io::{stdout, Write};

fn tile_char(tile: TileContent) -> char {
    match tile {
        TileContent::Empty => '.',
        TileContent::WhiteQueen => 'W',
        TileContent::BlackQueen => 'B',
        TileContent::Arrow => 'x',
    }
}

/// 行末は raw モードでも崩れないよう `\r\n`
const EOL: &str = "\r\n";

/// 盤面をテキストにする。直前の手のマスは `{}` で囲む。
pub fn board_to_string(state: &GameState) -> String {
    let board = state.board();
    let n = board.size();
    let last = state.history().last();
    let mut out = String::new();

    out.push_str("    ");
    for col in 0..n {
        let _ = write!(out, "{:^3}", col + 1);
    }
    out.push_str(EOL);

    for row in 0..n {
        let _ = write!(out, "{:>3} ", row + 1);
        for col in 0..n {
            let pos = Position::new(row as i32, col as i32);
            let c = tile_char(board.get(pos));
            let touched = last.map_or(false, |mv| {
                mv.queen_from == pos || mv.queen_to == pos || mv.arrow == pos
            });
            if touched {
                let _ = write!(out, "{{{}}}", c);
            } else {
                let _ = write!(out, " {} ", c);
            }
        }
        out.push_str(EOL);
    }
    out
}

/// 1 手分のログ (座標は 1 始まり)
pub fn format_move(number: usize, mv: &Move) -> String {
    format!(
        "Move {}: Queen ({},{}) -> ({},{}), Arrow -> ({},{})",
        number,
        mv.queen_from.row + 1,
        mv.queen_from.col + 1,
        mv.queen_to.row + 1,
        mv.queen_to.col + 1,
        mv.arrow.row + 1,
        mv.arrow.col + 1
    )
}

/// 棋譜ログ
pub fn format_history(history: &[Move]) -> String {
    if history.is_empty() {
        return "No moves yet.".to_string();
    }
    history
        .iter()
        .enumerate()
        .map(|(i, mv)| format_move(i + 1, mv))
        .collect::<Vec<_>>()
        .join(EOL)
}

/// 画面をクリアして盤面と状況を表示する
pub fn render_board(state: &GameState, status_msg: Option<&str>) -> std::io::Result<()> {
    let mut out = stdout();
    execute!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;

    write!(out, "=== Game of the Amazons ({}) ==={}", state.dimension(), EOL)?;
    match status_msg {
        Some(msg) => write!(out, "{}{}", msg.to_string().bold().yellow(), EOL)?,
        None => write!(out, "{}", EOL)?,
    }
    write!(out, "{}{}", EOL, board_to_string(state))?;
    if let Some(mv) = state.history().last() {
        write!(out, "{}{}{}", EOL, format_move(state.history().len(), mv), EOL)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{start_new_game, BoardDimension, Difficulty, Player};
    use crate::logic::apply_move;

    #[test]
    fn test_board_text_marks_pieces_and_last_move() {
        let mut state = start_new_game(BoardDimension::Six, Difficulty::Easy);
        let text = board_to_string(&state);
        assert_eq!(text.lines().count(), 7);
        // 改行は全て CRLF
        assert_eq!(text.matches("\r\n").count(), 7);
        assert_eq!(text.matches('\n').count(), 7);
        assert_eq!(text.matches('W').count(), 4);
        assert_eq!(text.matches('B').count(), 4);
        assert!(!text.contains('{'));

        let mv = Move::new(
            Player::White,
            Position::new(5, 1),
            Position::new(3, 1),
            Position::new(3, 3),
        );
        apply_move(&mut state, &mv).unwrap();
        let text = board_to_string(&state);
        assert_eq!(text.matches('{').count(), 3);
        assert!(text.contains("{x}"));
        assert!(text.contains("{W}"));
    }

    #[test]
    fn test_history_log_uses_one_based_coordinates() {
        assert_eq!(format_history(&[]), "No moves yet.");
        let mv = Move::new(
            Player::White,
            Position::new(5, 1),
            Position::new(3, 1),
            Position::new(3, 3),
        );
        assert_eq!(
            format_history(&[mv, mv]),
            "Move 1: Queen (6,2) -> (4,2), Arrow -> (4,4)\r\nMove 2: Queen (6,2) -> (4,2), Arrow -> (4,4)"
        );
    }
}
