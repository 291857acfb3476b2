use shared::{
    domain::{CategorySummary, RoundView},
    protocol::GameAction,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(GameAction),
    Help,
    Quit,
    Nothing,
}

/// Turns one typed line into a command for the screen currently shown.
///
/// On the menu a line is a 1-based menu number or a category name (matched
/// case-insensitively). Names that match nothing are still forwarded so the
/// game can reject them. While playing, lines starting with `/` are commands
/// and everything else is a guess.
pub fn parse_command(line: &str, view: &RoundView, categories: &[CategorySummary]) -> Command {
    let trimmed = line.trim();
    if view.is_playing() {
        return match trimmed.to_ascii_lowercase().as_str() {
            "/next" | "/n" => Command::Dispatch(GameAction::NextWord),
            "/back" | "/b" => Command::Dispatch(GameAction::Reset),
            "/quit" | "/q" => Command::Quit,
            "/help" | "/h" | "/?" => Command::Help,
            _ => Command::Dispatch(GameAction::SubmitGuess {
                guess: line.trim_end_matches(['\r', '\n']).to_string(),
            }),
        };
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "" => Command::Nothing,
        "q" | "quit" | "/quit" | "/q" => Command::Quit,
        "?" | "help" | "/help" | "/h" => Command::Help,
        _ => Command::Dispatch(GameAction::StartGame {
            category: resolve_category(trimmed, categories),
        }),
    }
}

fn resolve_category(input: &str, categories: &[CategorySummary]) -> String {
    if let Ok(number) = input.parse::<usize>() {
        if let Some(category) = number.checked_sub(1).and_then(|index| categories.get(index)) {
            return category.name.clone();
        }
    }
    categories
        .iter()
        .find(|category| category.name.eq_ignore_ascii_case(input))
        .map_or_else(|| input.to_string(), |category| category.name.clone())
}
