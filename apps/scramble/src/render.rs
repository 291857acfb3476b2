use std::io::{self, Write};

use shared::domain::{CategorySummary, RoundView};

const MENU_COLUMNS: usize = 3;
const MENU_CELL_WIDTH: usize = 22;

pub fn render(
    out: &mut impl Write,
    view: &RoundView,
    categories: &[CategorySummary],
) -> io::Result<()> {
    if view.is_playing() {
        render_round(out, view)
    } else {
        render_menu(out, categories)
    }
}

fn render_menu(out: &mut impl Write, categories: &[CategorySummary]) -> io::Result<()> {
    writeln!(out, "🧩 Word Scramble Game")?;
    writeln!(out, "Select a category to start ✨")?;
    writeln!(out)?;
    for (row_index, row) in categories.chunks(MENU_COLUMNS).enumerate() {
        let mut line = String::new();
        for (column, category) in row.iter().enumerate() {
            let number = row_index * MENU_COLUMNS + column + 1;
            let cell = format!("[{number}] {} {}", category.icon, category.name);
            line.push_str(&format!("{cell:<MENU_CELL_WIDTH$}"));
        }
        writeln!(out, "{}", line.trim_end())?;
    }
    writeln!(out)?;
    write!(out, "Pick a number or name (q to quit) > ")?;
    out.flush()
}

fn render_round(out: &mut impl Write, view: &RoundView) -> io::Result<()> {
    let category = view.category.as_deref().unwrap_or_default();
    writeln!(out, "🔠 {category} Word Scramble")?;
    writeln!(out, "🌀 Unscramble this: {}", view.scrambled_word)?;
    if !view.last_message.is_empty() {
        writeln!(out, "{}", view.last_message)?;
    }
    if let (true, Some(answer)) = (view.reveal_answer, view.original_word.as_deref()) {
        writeln!(out, "✅ The correct answer was: {answer}")?;
    }
    writeln!(out, "(/next for another word, /back for categories, /quit to exit)")?;
    write!(out, "🔤 Enter your answer > ")?;
    out.flush()
}

pub fn render_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "On the menu: type a category number or name, or q to quit.")?;
    writeln!(out, "While playing: type your guess and press enter.")?;
    writeln!(out, "  /next  (/n)  deal another word from the same category")?;
    writeln!(out, "  /back  (/b)  return to the category menu")?;
    writeln!(out, "  /quit  (/q)  leave the game")
}

#[cfg(test)]
mod tests {
    use game::WordBank;
    use shared::domain::{GuessOutcome, Screen};

    use super::*;

    fn rendered(view: &RoundView) -> String {
        let mut out = Vec::new();
        render(&mut out, view, &WordBank::builtin().list_categories()).expect("render");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn menu_lists_every_category_in_three_columns() {
        let text = rendered(&RoundView::default());
        assert!(text.starts_with("🧩 Word Scramble Game"));
        let grid: Vec<&str> = text.lines().filter(|line| line.starts_with('[')).collect();
        assert_eq!(grid.len(), 3);
        assert!(grid[0].contains("[1] 🥦 Vegetables"));
        assert!(grid[0].contains("[3] 🍎 Fruits"));
        assert!(grid[2].contains("[9] 👩‍⚕️ Professions"));
    }

    #[test]
    fn round_shows_reveal_only_after_wrong_guess() {
        let mut view = RoundView {
            screen: Screen::Playing,
            category: Some("Fruits".into()),
            icon: Some("🍎".into()),
            scrambled_word: "oamng".into(),
            ..RoundView::default()
        };
        let text = rendered(&view);
        assert!(text.contains("🔠 Fruits Word Scramble"));
        assert!(text.contains("Unscramble this: oamng"));
        assert!(!text.contains("correct answer"));

        view.outcome = Some(GuessOutcome::Wrong);
        view.last_message = GuessOutcome::Wrong.message().into();
        view.reveal_answer = true;
        view.original_word = Some("mango".into());
        let text = rendered(&view);
        assert!(text.contains("❌ Wrong! Try again."));
        assert!(text.contains("The correct answer was: mango"));
    }
}
