use amazons_engine::display::render_board;
use amazons_engine::game::{GameRecord, Replay};
use crossterm::event::{self, Event, KeyCode};
use crossterm::{cursor, execute, terminal};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn wait_any_key() -> anyhow::Result<()> {
    loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(_) = event::read()? {
                return Ok(());
            }
        }
    }
}

/// `dir` 以下の棋譜ファイル (サブディレクトリも含む)
fn collect_records(dir: &Path, out: &mut Vec<PathBuf>) -> anyhow::Result<()> {
    for entry in fs::read_dir(dir)?.filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.is_dir() {
            collect_records(&path, out)?;
        } else if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            out.push(path);
        }
    }
    Ok(())
}

pub async fn run_replay_selector(record_dir: &Path) -> anyhow::Result<()> {
    execute!(
        std::io::stdout(),
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;
    print!("=== Record Replay ===\r\n\r\n");

    let mut files = Vec::new();
    if record_dir.exists() {
        collect_records(record_dir, &mut files)?;
    }
    files.sort();

    if files.is_empty() {
        print!("No records found in {}/\r\n", record_dir.display());
        print!("Watch or self-play a game first\r\n\r\n");
        print!("Press any key to return...\r\n");
        return wait_any_key();
    }

    // 新しいものから 9 件まで
    let recent: Vec<&PathBuf> = files.iter().rev().take(9).collect();
    for (i, path) in recent.iter().enumerate() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        print!("{}. {}\r\n", i + 1, name);
    }
    print!("\r\nSelect file (1-{}) or [q] to quit\r\n", recent.len());

    let path = loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char(c) => {
                        if let Some(path) = c
                            .to_digit(10)
                            .and_then(|d| (d as usize).checked_sub(1))
                            .and_then(|i| recent.get(i))
                        {
                            break (*path).clone();
                        }
                    }
                    _ => {}
                }
            }
        }
    };

    let record = GameRecord::load(&path)?;
    let winner = record.winner;
    let mut replay = Replay::new(record)?;

    loop {
        let status = format!(
            "Replay {}/{}  winner: {}  [←/→] step  [Home/End] jump  [q] quit",
            replay.index(),
            replay.len(),
            winner
        );
        render_board(replay.current(), Some(&status))?;

        loop {
            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Right | KeyCode::Char('l') => {
                            replay.step_forward();
                        }
                        KeyCode::Left | KeyCode::Char('h') => {
                            replay.step_back();
                        }
                        KeyCode::Home => replay.jump_to(0),
                        KeyCode::End => replay.jump_to(replay.len()),
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        _ => continue,
                    }
                    break;
                }
            }
        }
    }
}
