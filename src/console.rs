use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::game::{GameResult, Otrio, Outcome, find_win};

/// One turn's worth of input.
enum Input {
    Move { size: String, row: usize, col: usize },
    Malformed,
    Closed,
}

/// Prompt loop playing a whole game over a text stream.
pub struct Console<R, W> {
    input: R,
    output: W,
    game: Otrio,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console {
            input,
            output,
            game: Otrio::new(),
        }
    }

    /// Plays until someone wins, the game is drawn or the input runs dry.
    pub fn run(&mut self) -> io::Result<Option<GameResult>> {
        writeln!(self.output, "*** Welcome to Digital Otrio! ***")?;
        self.print_board()?;

        while !self.game.is_game_over() {
            let player = self.game.current_player();
            writeln!(self.output, "\n{player}'s turn.")?;
            writeln!(
                self.output,
                "Remaining pieces: {}",
                self.game.inventory(player)
            )?;

            match self.read_move()? {
                Input::Closed => {
                    debug!("input closed before the game finished");
                    writeln!(self.output)?;
                    break;
                }
                Input::Malformed => writeln!(self.output, "Invalid input, try again.")?,
                Input::Move { size, row, col } => match self.game.apply_move(&size, row, col) {
                    Ok(outcome) => {
                        self.print_board()?;
                        self.announce(outcome)?;
                    }
                    Err(err) => writeln!(self.output, "{err}")?,
                },
            }
        }

        self.output.flush()?;
        Ok(self.game.result())
    }

    pub fn game(&self) -> &Otrio {
        &self.game
    }

    fn read_move(&mut self) -> io::Result<Input> {
        let Some(size) = self.prompt("Enter piece size (S/M/L): ")? else {
            return Ok(Input::Closed);
        };
        let Some(col) = self.prompt("Enter column (0-2): ")? else {
            return Ok(Input::Closed);
        };
        let Ok(col) = col.parse() else {
            return Ok(Input::Malformed);
        };
        let Some(row) = self.prompt("Enter row (0-2): ")? else {
            return Ok(Input::Closed);
        };
        let Ok(row) = row.parse() else {
            return Ok(Input::Malformed);
        };
        Ok(Input::Move { size, row, col })
    }

    /// Reads one trimmed line, `None` at end of input.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    fn print_board(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n{}", self.game)
    }

    fn announce(&mut self, outcome: Outcome) -> io::Result<()> {
        match outcome {
            Outcome::Continue => Ok(()),
            Outcome::Win(player) => {
                writeln!(self.output, "\n*** {player} wins! ***")?;
                if let Some(win) = find_win(self.game.board()) {
                    writeln!(self.output, "Completed {}.", win.pattern)?;
                }
                Ok(())
            }
            Outcome::Draw => writeln!(
                self.output,
                "\n*** {} has no legal move left. It's a draw! ***",
                self.game.current_player()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Player, Size};

    fn play(script: &str) -> (Option<GameResult>, Otrio, String) {
        let mut output = Vec::new();
        let mut console = Console::new(script.as_bytes(), &mut output);
        let result = console.run().unwrap();
        let game = console.game().clone();
        drop(console);
        (result, game, String::from_utf8(output).unwrap())
    }

    #[test]
    fn prompts_and_places_a_piece() {
        let (result, game, output) = play("s\n2\n0\n");
        assert_eq!(result, None);
        assert!(output.starts_with("*** Welcome to Digital Otrio! ***"));
        assert!(output.contains("Player 1's turn."));
        assert!(output.contains("Remaining pieces: S=3 M=3 L=3"));
        assert!(output.contains("Enter piece size (S/M/L): "));
        assert!(output.contains("Player 2's turn."));
        assert!(output.contains("[   S1   ]"));
        // Column is asked first, so "2" then "0" lands on row 0, column 2.
        assert_eq!(game.cell(0, 2).unwrap().len(), 1);
        assert_eq!(game.current_player(), Player::Two);
    }

    #[test]
    fn malformed_coordinates_do_not_use_a_turn() {
        let (_, game, output) = play("S\nx\nL\n1\nfoo\n");
        assert_eq!(output.matches("Invalid input, try again.").count(), 2);
        assert_eq!(game.pieces_on_board(), 0);
        assert_eq!(game.current_player(), Player::One);
    }

    #[test]
    fn rejections_are_reported() {
        let (_, game, output) = play("Q\n0\n0\nS\n3\n0\nS\n0\n0\nS\n0\n0\n");
        assert!(output.contains("Invalid size. Choose S, M, or L."));
        assert!(output.contains("Invalid coordinates."));
        assert!(output.contains("Cannot place piece there."));
        assert_eq!(game.pieces_on_board(), 1);
        assert_eq!(game.current_player(), Player::Two);
    }

    #[test]
    fn announces_the_winner_and_stops_reading() {
        // Player 1 takes row 0 with Large pieces, player 2 plays along row 2.
        let script = "L\n0\n0\nS\n0\n2\nL\n1\n0\nS\n2\n2\nL\n2\n0\nM\n1\n1\n";
        let (result, game, output) = play(script);
        assert_eq!(result, Some(GameResult::Win(Player::One)));
        assert!(output.contains("*** Player 1 wins! ***"));
        assert!(output.contains("Completed three Large pieces along row 0."));
        // The trailing move after the win is never read.
        assert!(game.cell(1, 1).unwrap().is_empty());
        assert_eq!(game.remaining(Player::One, Size::Large), 0);
    }
}
