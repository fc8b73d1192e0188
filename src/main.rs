mod replay_selector;

use amazons_engine::core::{start_new_game, BoardDimension, Difficulty, GameState, Player};
use amazons_engine::display::{format_history, render_board};
use amazons_engine::error::EngineError;
use amazons_engine::game::GameRecord;
use amazons_engine::logic::apply_move;
use amazons_engine::player::ai::AIConfig;
use amazons_engine::selfplay::{run_selfplay, Opponent, SelfPlayConfig};
use amazons_engine::worker::AiWorker;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{execute, terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const RECORD_DIR: &str = "records";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG で上書きできる。画面を崩さないようログは stderr へ
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    // ターミナル初期化
    terminal::enable_raw_mode()?;
    execute!(io::stdout(), terminal::EnterAlternateScreen)?;

    let res = run().await;

    // ターミナル復帰
    execute!(io::stdout(), terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    res
}

/// 数字キーで選ぶ。`q` で `None`
fn select(title: &str, options: &[&str]) -> anyhow::Result<Option<usize>> {
    print!("\r\n{}\r\n", title);
    for (i, option) in options.iter().enumerate() {
        print!("{}. {}\r\n", i + 1, option);
    }
    io::Write::flush(&mut io::stdout())?;

    loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(None),
                    KeyCode::Char(c) => {
                        if let Some(i) = c.to_digit(10).and_then(|d| (d as usize).checked_sub(1)) {
                            if i < options.len() {
                                return Ok(Some(i));
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
    }
}

fn select_dimension() -> anyhow::Result<Option<BoardDimension>> {
    let names: Vec<&str> = BoardDimension::ALL.iter().map(|d| d.name()).collect();
    Ok(select("Select board size:", &names)?.map(|i| BoardDimension::ALL[i]))
}

fn select_difficulty(side: Player) -> anyhow::Result<Option<Difficulty>> {
    let title = format!("Select difficulty for {}:", side);
    Ok(select(&title, &["Easy", "Medium", "Hard"])?.map(|i| Difficulty::ALL[i]))
}

async fn run() -> anyhow::Result<()> {
    let config = AIConfig::load_or_default();

    loop {
        execute!(
            io::stdout(),
            terminal::Clear(terminal::ClearType::All),
            crossterm::cursor::MoveTo(0, 0)
        )?;
        print!("=== Game of the Amazons ===\r\n");

        let Some(mode) = select(
            "Select mode:",
            &["Watch AI vs AI", "Self-play batch", "Replay a record"],
        )?
        else {
            return Ok(());
        };

        match mode {
            0 => run_watch(&config).await?,
            1 => run_batch(&config).await?,
            _ => replay_selector::run_replay_selector(Path::new(RECORD_DIR)).await?,
        }
    }
}

/// 終了キー (q / Esc / raw モード中の Ctrl-C) を待つ
async fn quit_requested() -> io::Result<()> {
    loop {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                let ctrl_c = key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL);
                if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    return Ok(());
                }
            }
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

async fn run_watch(config: &AIConfig) -> anyhow::Result<()> {
    let Some(dimension) = select_dimension()? else {
        return Ok(());
    };
    let Some(white) = select_difficulty(Player::White)? else {
        return Ok(());
    };
    let Some(black) = select_difficulty(Player::Black)? else {
        return Ok(());
    };

    let mut state = start_new_game(dimension, white);
    let mut worker = AiWorker::new(config.clone());
    let mut status = String::from("[q] stop");

    while !state.is_finished() {
        let to_move = state.current_player();
        let difficulty = if to_move == Player::White { white } else { black };
        state.set_difficulty(difficulty);
        render_board(
            &state,
            Some(&format!("{} ({}) thinking...  {}", to_move, difficulty, status)),
        )?;

        worker.start(state.search_clone(), difficulty);

        // 探索の完了をポーリングしつつ中断キーを待つ
        let result = loop {
            if let Some(result) = worker.try_result() {
                break result;
            }
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_millis(50)) => {}
                _ = tokio::signal::ctrl_c() => worker.cancel(),
                res = quit_requested() => {
                    res?;
                    worker.cancel();
                }
            }
        };

        match result {
            Ok(Some(mv)) => {
                apply_move(&mut state, &mv)?;
                status = String::from("[q] stop");
            }
            Ok(None) => break,
            Err(EngineError::SearchCanceled) => {
                status = String::from("Stopped.");
                break;
            }
            Err(e) => return Err(e.into()),
        }

        tokio::time::sleep(Duration::from_millis(300)).await;
    }

    finish_game(&state, &status)
}

fn finish_game(state: &GameState, status: &str) -> anyhow::Result<()> {
    let headline = if state.is_finished() {
        format!("Winner: {}", state.winner())
    } else {
        status.to_string()
    };
    render_board(state, Some(&headline))?;

    let path = GameRecord::from_state(state).save(RECORD_DIR, "watch")?;
    print!("\r\n{}\r\n", format_history(state.history()));
    print!("\r\nRecord saved to {}\r\n", path.display());
    print!("Press any key to return to menu...\r\n");

    // 対局中に押されたキーを読み捨てる
    while event::poll(Duration::ZERO)? {
        let _ = event::read()?;
    }
    loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(_) = event::read()? {
                return Ok(());
            }
        }
    }
}

async fn run_batch(config: &AIConfig) -> anyhow::Result<()> {
    let Some(dimension) = select_dimension()? else {
        return Ok(());
    };
    let Some(white) = select_difficulty(Player::White)? else {
        return Ok(());
    };
    let Some(black) = select(
        "Select opponent for Black:",
        &["Easy", "Medium", "Hard", "Random"],
    )?
    else {
        return Ok(());
    };
    let black = match black {
        3 => Opponent::Random,
        i => Opponent::Search(Difficulty::ALL[i]),
    };
    let Some(count) = select("Number of games:", &["10", "50", "100"])? else {
        return Ok(());
    };
    let num_games = [10, 50, 100][count];

    print!("\r\nRunning {} games in parallel...\r\n", num_games);
    io::Write::flush(&mut io::stdout())?;

    let selfplay_config = SelfPlayConfig {
        num_games,
        dimension,
        white: Opponent::Search(white),
        black,
        record_dir: Some(PathBuf::from(RECORD_DIR).join("selfplay")),
        parallel: true,
        seed: None,
    };
    let ai_config = config.clone();
    let stats =
        tokio::task::spawn_blocking(move || run_selfplay(&selfplay_config, &ai_config)).await??;

    print!("\r\n=== Self-Play Results ({}) ===\r\n", stats.dimension);
    print!(
        "White ({}): {} wins ({:.1}%)\r\n",
        stats.white,
        stats.white_wins,
        stats.win_rate(Player::White) * 100.0
    );
    print!(
        "Black ({}): {} wins ({:.1}%)\r\n",
        stats.black,
        stats.black_wins,
        stats.win_rate(Player::Black) * 100.0
    );
    if stats.unfinished > 0 {
        print!("Unfinished: {}\r\n", stats.unfinished);
    }
    print!("Average plies: {:.1}\r\n", stats.avg_plies);
    print!("Average time: {:.0} ms\r\n", stats.avg_time_ms);
    print!("\r\nPress any key to return to menu...\r\n");

    loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(_) = event::read()? {
                return Ok(());
            }
        }
    }
}
