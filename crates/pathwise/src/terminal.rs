//! Interactive game over any line-based reader and writer.

use anyhow::{Result, bail};
use pathwise_engine::{Coord, Engine, GameStatus, MoveError, Player};
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument};

/// One human against the engine, driven by text prompts.
pub struct TerminalGame<R, W> {
    engine: Engine,
    computer: Player,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalGame<R, W> {
    /// Sets up a game on a `size` board. The computer opens unless
    /// `human_first` is set.
    pub fn new(size: usize, human_first: bool, input: R, output: W) -> Result<Self> {
        let engine = Engine::new(size)?;
        let computer = if human_first { Player::O } else { Player::X };
        Ok(Self {
            engine,
            computer,
            input,
            output,
        })
    }

    /// Plays to the end and returns the winner, if any.
    #[instrument(skip(self), fields(size = self.engine.size(), computer = %self.computer))]
    pub fn play(&mut self) -> Result<Option<Player>> {
        let n = self.engine.size();
        writeln!(self.output, "Great, I'll set up a {n}x{n} playing board")?;
        if self.computer == Player::X {
            writeln!(self.output, "Ok, I'll go first")?;
        } else {
            writeln!(self.output, "That confident, eh? Ok, you'll go first")?;
        }
        writeln!(self.output, "\nGOOD LUCK!\n")?;

        while self.in_progress() {
            if self.engine.to_move() == self.computer {
                if !self.computer_turn()? {
                    break;
                }
            } else {
                self.human_turn()?;
            }
        }

        write!(self.output, "{}", self.engine)?;
        let winner = self.engine.winner();
        match winner {
            None => writeln!(self.output, "The game is a draw!")?,
            Some(player) => {
                writeln!(self.output, "Game Over! {player} has won!")?;
                let verdict = if player == self.computer { "LOST" } else { "WON" };
                writeln!(self.output, "YOU HAVE {verdict}")?;
            }
        }
        info!(?winner, moves = self.engine.history().len(), "Game finished");
        Ok(winner)
    }

    fn in_progress(&self) -> bool {
        self.engine.status() == GameStatus::Continue && !self.engine.is_draw()
    }

    /// Plays the engine's move. Returns false when it has none to offer.
    fn computer_turn(&mut self) -> Result<bool> {
        let Some(coord) = self.engine.suggest_move(self.computer) else {
            return Ok(false);
        };
        self.engine.apply_move(coord, self.computer)?;
        debug!(%coord, "Computer moved");
        Ok(true)
    }

    fn human_turn(&mut self) -> Result<()> {
        let human = self.computer.opponent();
        write!(self.output, "{}", self.engine)?;
        if let Some(last) = self
            .engine
            .history()
            .iter()
            .rev()
            .find(|mv| mv.player == self.computer)
        {
            writeln!(self.output, "My last move was at {}", last.coord)?;
        }
        writeln!(self.output, "Now it's your move")?;

        loop {
            let row = self.read_index("row")?;
            let col = self.read_index("column")?;
            let coord = Coord::new(row, col);
            match self.engine.apply_move(coord, human) {
                Ok(_) => {
                    writeln!(self.output, "Making move at {coord}")?;
                    writeln!(self.output, "[ END TURN ]")?;
                    return Ok(());
                }
                Err(MoveError::OccupiedCell(_)) => {
                    writeln!(self.output, "Oops. The position {coord} is unavailable")?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Prompts until a number in `0..size` is entered.
    fn read_index(&mut self, label: &str) -> Result<usize> {
        let max = self.engine.size() - 1;
        loop {
            write!(self.output, "Enter a {label} number (0-{max}): ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                bail!("Input closed before the game finished");
            }
            let entry = line.trim();
            match entry.parse::<usize>() {
                Ok(value) if value <= max => return Ok(value),
                _ => writeln!(self.output, "I'm sorry, {entry} is not a valid input")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Every cell in row-major order, one row and column per line.
    fn sweep(size: usize) -> String {
        let mut script = String::new();
        for row in 0..size {
            for col in 0..size {
                script.push_str(&format!("{row}\n{col}\n"));
            }
        }
        script
    }

    #[test]
    fn test_human_first_cannot_win() {
        let input = Cursor::new(sweep(3));
        let mut output = Vec::new();
        let winner = TerminalGame::new(3, true, input, &mut output)
            .unwrap()
            .play()
            .unwrap();
        assert_ne!(winner, Some(Player::X));

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("you'll go first"));
        assert!(text.contains("Making move at (0,0)"));
    }

    #[test]
    fn test_reprompts_on_bad_input() {
        let script = format!("abc\n7\n{}", sweep(3));
        let mut output = Vec::new();
        let winner = TerminalGame::new(3, false, Cursor::new(script), &mut output)
            .unwrap()
            .play()
            .unwrap();
        assert_ne!(winner, Some(Player::O));

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("I'm sorry, abc is not a valid input"));
        assert!(text.contains("I'm sorry, 7 is not a valid input"));
        assert!(text.contains("My last move was at (0,0)"));
        assert!(text.contains("Oops. The position (0,0) is unavailable"));
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let mut output = Vec::new();
        let mut game = TerminalGame::new(3, true, Cursor::new("1\n"), &mut output).unwrap();
        assert!(game.play().is_err());
    }

    #[test]
    fn test_rejects_small_board() {
        let result = TerminalGame::new(2, true, Cursor::new(""), Vec::new());
        assert!(result.is_err());
    }
}
