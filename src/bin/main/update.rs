//! The player's input parser.

/// Describes all the possible commands a player can type.
#[derive(Debug, PartialEq, Eq)]
pub enum PlayerCommand {
    /// A request to reveal a cell by its position.
    Reveal((u8, u8)),
    /// A request to cycle the mark of a cell by its position.
    CycleMark((u8, u8)),
    /// A request to leave the game.
    Quit,
}

/// Parses a line like `r 3,5` (reveal the 6th cell on the 4th row), `m 3,5` (cycle its mark) or `q` (quit).
pub fn parse_command(input: &str) -> Option<PlayerCommand> {
    let mut parts = input.split_whitespace();
    let action = parts.next()?;

    if action == "q" {
        return parts.next().is_none().then_some(PlayerCommand::Quit);
    }

    let cell_position = parse_position(parts.next()?)?;

    if parts.next().is_some() {
        return None;
    }

    match action {
        "r" => Some(PlayerCommand::Reveal(cell_position)),
        "m" | "f" => Some(PlayerCommand::CycleMark(cell_position)),
        _ => None,
    }
}

fn parse_position(input: &str) -> Option<(u8, u8)> {
    let (row_index, column_index) = input.split_once(',')?;
    Some((row_index.trim().parse().ok()?, column_index.trim().parse().ok()?))
}
