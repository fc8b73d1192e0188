use super::types::{BoardDimension, Position, TileContent};
use serde::Serialize;

/// 盤面
///
/// `N x N` のマスを行優先で平坦に持つ。範囲外アクセスはプログラムの誤りなので panic する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    dimension: BoardDimension,
    tiles: Vec<TileContent>,
}

impl Board {
    pub fn new(dimension: BoardDimension) -> Self {
        let n = dimension.size();
        Board {
            dimension,
            tiles: vec![TileContent::Empty; n * n],
        }
    }

    pub fn dimension(&self) -> BoardDimension {
        self.dimension
    }

    pub fn size(&self) -> usize {
        self.dimension.size()
    }

    pub fn is_inside(&self, pos: Position) -> bool {
        let n = self.size() as i32;
        pos.row >= 0 && pos.col >= 0 && pos.row < n && pos.col < n
    }

    pub fn get(&self, pos: Position) -> TileContent {
        self.tiles[self.index(pos)]
    }

    pub fn set(&mut self, pos: Position, tile: TileContent) {
        let idx = self.index(pos);
        self.tiles[idx] = tile;
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos) == TileContent::Empty
    }

    pub fn tiles(&self) -> &[TileContent] {
        &self.tiles
    }

    pub fn count(&self, tile: TileContent) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// 行優先で全座標を列挙する
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let n = self.size() as i32;
        (0..n).flat_map(move |row| (0..n).map(move |col| Position::new(row, col)))
    }

    fn index(&self, pos: Position) -> usize {
        assert!(
            self.is_inside(pos),
            "position {} is outside of the {} board",
            pos,
            self.dimension
        );
        pos.row as usize * self.size() + pos.col as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(BoardDimension::Six);
        assert_eq!(board.tiles().len(), 36);
        assert_eq!(board.count(TileContent::Empty), 36);
        assert_eq!(board.positions().count(), 36);
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::new(BoardDimension::Eight);
        board.set(Position::new(7, 3), TileContent::Arrow);
        assert_eq!(board.get(Position::new(7, 3)), TileContent::Arrow);
        assert!(board.is_empty_at(Position::new(3, 7)));
    }

    #[test]
    fn test_bounds() {
        let board = Board::new(BoardDimension::Six);
        assert!(board.is_inside(Position::new(5, 5)));
        assert!(!board.is_inside(Position::new(6, 0)));
        assert!(!board.is_inside(Position::INVALID));
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds_access_panics() {
        let board = Board::new(BoardDimension::Six);
        board.get(Position::new(0, 6));
    }
}
