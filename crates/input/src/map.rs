//! Mapping from console lines to game commands.

use crate::types::{Command, Move};

/// Map one line of user input to a command.
///
/// The first character decides the single-letter commands (`q`, `r`, `a`, any case);
/// otherwise the line must look like `row,col`.
pub fn parse_command(line: &str) -> Command {
    let input = line.trim();

    match input.chars().next() {
        Some('q') | Some('Q') => return Command::Quit,
        Some('r') | Some('R') => return Command::Reset,
        Some('a') | Some('A') => return Command::ToggleAutoplay,
        _ => {}
    }

    match parse_coordinates(input) {
        Some((row, col)) => match (u8::try_from(row), u8::try_from(col)) {
            (Ok(r), Ok(c)) => Move::new(r, c)
                .map(Command::Move)
                .unwrap_or(Command::OutOfRange { row, col }),
            _ => Command::OutOfRange { row, col },
        },
        None => Command::Invalid(input.to_string()),
    }
}

/// Parse `"<int>,<int>"`, tolerating spaces around either number
fn parse_coordinates(input: &str) -> Option<(i64, i64)> {
    let (row, col) = input.split_once(',')?;
    let row = row.trim().parse().ok()?;
    let col = col.trim().parse().ok()?;
    Some((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_letter_commands() {
        assert_eq!(parse_command("q"), Command::Quit);
        assert_eq!(parse_command("Quit"), Command::Quit);
        assert_eq!(parse_command("r"), Command::Reset);
        assert_eq!(parse_command("R\n"), Command::Reset);
        assert_eq!(parse_command("a"), Command::ToggleAutoplay);
        assert_eq!(parse_command("A"), Command::ToggleAutoplay);
    }

    #[test]
    fn test_move_commands() {
        assert_eq!(
            parse_command("1,3"),
            Command::Move(Move::new(1, 3).unwrap())
        );
        assert_eq!(
            parse_command(" 2 , 2 \n"),
            Command::Move(Move::new(2, 2).unwrap())
        );
    }

    #[test]
    fn test_out_of_range_moves() {
        assert_eq!(
            parse_command("0,1"),
            Command::OutOfRange { row: 0, col: 1 }
        );
        assert_eq!(
            parse_command("4,3"),
            Command::OutOfRange { row: 4, col: 3 }
        );
        assert_eq!(
            parse_command("-1,300"),
            Command::OutOfRange { row: -1, col: 300 }
        );
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(parse_command(""), Command::Invalid(String::new()));
        assert_eq!(parse_command("x"), Command::Invalid("x".to_string()));
        assert_eq!(parse_command("1;2"), Command::Invalid("1;2".to_string()));
        assert_eq!(parse_command("1,b"), Command::Invalid("1,b".to_string()));
    }
}
