#![warn(clippy::all, clippy::pedantic)]

use std::io;

use anyhow::ensure;
use argh::FromArgs;
use tracing_subscriber::EnvFilter;

use otrio::console::Console;
use otrio::game::GameResult;
use otrio::gui;

/// Otrio: tic-tac-toe with three sizes of concentric rings.
#[derive(FromArgs, Debug)]
struct Args {
    /// play in a window instead of the terminal
    #[argh(switch)]
    gui: bool,

    /// pixel size of one board cell in the window
    #[argh(option, default = "gui::DEFAULT_CELL_SIZE")]
    cell_size: i32,

    /// window redraws per second
    #[argh(option, default = "gui::DEFAULT_FPS")]
    fps: u32,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the game on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Args = argh::from_env();

    if args.gui {
        ensure!(
            args.cell_size >= gui::MIN_CELL_SIZE,
            "--cell-size must be at least {} pixels",
            gui::MIN_CELL_SIZE
        );
        ensure!(args.fps > 0, "--fps must be positive");
        gui::run(args.cell_size, args.fps);
        return Ok(());
    }

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout().lock());
    match console.run()? {
        Some(GameResult::Win(player)) => tracing::info!(%player, "game finished with a winner"),
        Some(GameResult::Draw) => tracing::info!("game finished in a draw"),
        None => tracing::info!("game abandoned"),
    }
    Ok(())
}
