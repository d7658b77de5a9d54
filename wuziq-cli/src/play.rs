//! Play command - a game in the terminal
//!
//! ## Architecture
//!
//! - Level 1: run() - orchestration
//! - Level 2: Session::run() - read/dispatch loop
//! - Level 3: Session::execute() - one command
//! - Level 4: output helpers

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use wuziq_core::{AiSide, GameState, DEFAULT_BOARD_SIZE, MIN_BOARD_SIZE};

use crate::input::{coord_label, parse_command, Command};
use crate::persist::{load_game, save_game};
use crate::render::{format_board, status_line, MAX_TERMINAL_SIZE};

const HELP: &str = "\
Commands:
  H8 or 8 8        place a stone (column letter + row, or row and column)
  undo             take back the last move (and the computer's reply)
  ai off|black|white
                   choose the side the computer plays
  reset [SIZE]     start a new game
  save FILE        write the game to a JSON file
  load FILE        continue a saved game
  help             show this text
  quit             leave";

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Board dimension (at least 5, at most 26)
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    pub size: usize,

    /// Side played by the computer: off, black or white
    #[arg(long, default_value = "off")]
    pub ai: AiSide,

    /// Continue a game saved with `save`
    #[arg(long, value_name = "FILE")]
    pub load: Option<PathBuf>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs) -> Result<()> {
    let game = match &args.load {
        Some(path) => load_game(path)?,
        None => {
            check_terminal_size(args.size)?;
            GameState::with_ai(args.size, args.ai)?
        }
    };
    check_terminal_size(game.size())?;

    tracing::info!(size = game.size(), ai = %game.ai_side(), "starting terminal game");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    Session::new(game).run(stdin.lock(), &mut stdout)
}

fn check_terminal_size(size: usize) -> Result<()> {
    if size > MAX_TERMINAL_SIZE {
        anyhow::bail!(
            "board size {} is too large for the terminal (max {})",
            size,
            MAX_TERMINAL_SIZE
        );
    }
    if size < MIN_BOARD_SIZE {
        anyhow::bail!("board size must be at least {}", MIN_BOARD_SIZE);
    }
    Ok(())
}

// ============================================================================
// LEVEL 2 - SESSION LOOP
// ============================================================================

enum Flow {
    Continue,
    Quit,
}

/// One terminal game, read from any line source
pub struct Session {
    game: GameState,
}

impl Session {
    pub fn new(game: GameState) -> Self {
        Self { game }
    }

    #[cfg(test)]
    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        writeln!(out, "WuziQ Gomoku")?;
        writeln!(
            out,
            "Board size: {0}x{0}. Type 'help' for commands.\n",
            self.game.size()
        )?;
        self.ai_turn(out)?;
        self.show(out)?;

        let mut lines = input.lines();
        loop {
            self.prompt(out)?;
            let Some(line) = lines.next() else {
                writeln!(out, "\nInput ended. Exiting the game.")?;
                return Ok(());
            };
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let command = match parse_command(&line, self.game.size()) {
                Ok(command) => command,
                Err(err) => {
                    writeln!(out, "Invalid input: {}", err)?;
                    continue;
                }
            };

            match self.execute(command, out) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => {
                    writeln!(out, "Game aborted.")?;
                    return Ok(());
                }
                Err(err) => {
                    tracing::debug!(error = %err, "command failed");
                    writeln!(out, "Error: {:#}", err)?;
                }
            }
        }
    }

    // ========================================================================
    // LEVEL 3 - COMMANDS
    // ========================================================================

    fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        match command {
            Command::Move { row, col } => {
                self.game.apply_move(row, col)?;
                self.ai_turn(out)?;
                self.show(out)?;
            }
            Command::Undo => {
                let removed = self.game.undo()?;
                writeln!(out, "Took back {} move(s).", removed.len())?;
                self.ai_turn(out)?;
                self.show(out)?;
            }
            Command::Ai(side) => {
                self.game.configure_ai(side);
                writeln!(out, "Computer plays: {}", side)?;
                self.ai_turn(out)?;
                self.show(out)?;
            }
            Command::Reset(size) => {
                let size = size.unwrap_or(self.game.size());
                check_terminal_size(size)?;
                let ai_side = self.game.ai_side();
                self.game.reset(size, ai_side)?;
                writeln!(out, "New game on a {0}x{0} board.", size)?;
                self.ai_turn(out)?;
                self.show(out)?;
            }
            Command::Save(path) => {
                save_game(&path, &self.game)?;
                writeln!(out, "Saved to {}.", path.display())?;
            }
            Command::Load(path) => {
                let game = load_game(&path)?;
                check_terminal_size(game.size())?;
                self.game = game;
                writeln!(out, "Loaded {}.", path.display())?;
                self.ai_turn(out)?;
                self.show(out)?;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    // ========================================================================
    // LEVEL 4 - OUTPUT
    // ========================================================================

    fn ai_turn<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if let Some(mv) = self.game.play_ai_turn()? {
            let label = coord_label(mv.row, mv.col);
            writeln!(out, "Computer ({}) plays {}", mv.player, label)?;
        }
        Ok(())
    }

    fn show<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "{}", format_board(&self.game))?;
        writeln!(out, "{}", status_line(&self.game))?;
        if self.game.is_over() {
            writeln!(out, "Type 'undo', 'reset' or 'quit'.")?;
        }
        Ok(())
    }

    fn prompt<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.game.is_over() {
            write!(out, "> ")?;
        } else {
            let side = self.game.side_to_move().symbol();
            write!(out, "Player {}, enter your move: ", side)?;
        }
        out.flush()?;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
