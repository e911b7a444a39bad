use std::io::Write;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin},
    sync::Mutex,
};

use crate::types::{Choice, ChoiceItem};

const RULE: &str = "──────────────";

/// Interactive picker: shows `items` and returns the value of the chosen
/// entry.
#[async_trait]
pub trait Prompt: Send + Sync {
    async fn select(
        &self,
        message: &str,
        items: &[ChoiceItem],
        default: Option<&str>,
    ) -> Result<String>;
}

/// Items visible for `filter`: everything when it is empty, otherwise the
/// choices whose value contains it, ignoring case. Separators are hidden
/// while filtering.
pub fn filter_choices<'a>(items: &'a [ChoiceItem], filter: &str) -> Vec<&'a ChoiceItem> {
    if filter.is_empty() {
        return items.iter().collect();
    }
    let needle = filter.to_lowercase();
    items
        .iter()
        .filter(|item| {
            item.as_choice()
                .is_some_and(|choice| choice.value.to_lowercase().contains(&needle))
        })
        .collect()
}

fn selectable<'a>(visible: &[&'a ChoiceItem]) -> Vec<&'a Choice> {
    visible
        .iter()
        .copied()
        .filter_map(ChoiceItem::as_choice)
        .filter(|choice| !choice.disabled)
        .collect()
}

/// What a line of user input means for the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Selected(String),
    Filter(String),
}

pub fn interpret_input(input: &str, selectable: &[&Choice], default: Option<&str>) -> Input {
    if input.is_empty() {
        return match (default, selectable) {
            (Some(default), _) => Input::Selected(default.to_string()),
            (None, [only]) => Input::Selected(only.value.clone()),
            _ => Input::Filter(String::new()),
        };
    }

    if let Ok(index) = input.parse::<usize>() {
        if let Some(choice) = index.checked_sub(1).and_then(|i| selectable.get(i)) {
            return Input::Selected(choice.value.clone());
        }
    }

    Input::Filter(input.to_string())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Renders the numbered list; numbers count selectable choices only.
pub fn render_choices<W: Write>(visible: &[&ChoiceItem], width: usize, writer: &mut W) -> Result<()> {
    let mut number = 0;
    for item in visible {
        match item {
            ChoiceItem::Separator(Some(label)) => writeln!(writer, "  {}", truncate(label, width))?,
            ChoiceItem::Separator(None) => writeln!(writer, "  {RULE}")?,
            ChoiceItem::Choice(choice) if choice.disabled => {
                writeln!(writer, "   -) {}", truncate(&choice.name, width.saturating_sub(6)))?
            }
            ChoiceItem::Choice(choice) => {
                number += 1;
                let label = match &choice.description {
                    Some(description) => format!("{} - {}", choice.name, description),
                    None => choice.name.clone(),
                };
                writeln!(writer, "{number:>4}) {}", truncate(&label, width.saturating_sub(6)))?;
            }
        }
    }
    Ok(())
}

fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(usize::MAX)
}

/// Numbered-list picker on stderr/stdin.
///
/// Typing a number selects that entry, typing text narrows the list, and an
/// empty line accepts the default.
pub struct TerminalPrompt {
    input: Mutex<Lines<BufReader<Stdin>>>,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            input: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Prompt for TerminalPrompt {
    async fn select(
        &self,
        message: &str,
        items: &[ChoiceItem],
        default: Option<&str>,
    ) -> Result<String> {
        let mut input = self.input.lock().await;
        let mut stderr = tokio::io::stderr();
        let mut filter = String::new();

        loop {
            let visible = filter_choices(items, &filter);
            let candidates = selectable(&visible);

            let mut screen = Vec::new();
            writeln!(screen, "? {message}")?;
            render_choices(&visible, terminal_width(), &mut screen)?;
            if !filter.is_empty() {
                write!(screen, "(filter: {filter}) ")?;
            }
            match default {
                Some(default) => write!(screen, "number or text to filter [{default}]: ")?,
                None => write!(screen, "number or text to filter: ")?,
            }
            stderr.write_all(&screen).await?;
            stderr.flush().await?;

            let line = input
                .next_line()
                .await
                .context("Failed to read selection")?
                .context("Input closed before a selection was made")?;

            match interpret_input(line.trim(), &candidates, default) {
                Input::Selected(value) => return Ok(value),
                Input::Filter(text) => filter = text,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choices::{choices_from, sort_choices};

    fn items() -> Vec<ChoiceItem> {
        sort_choices(
            &choices_from(["acme/widgets", "acme/gadgets", "other/Widgets"]),
            &["acme/gadgets".to_string()],
            "Recent repos:",
            "Other repos:",
        )
    }

    #[test]
    fn filtering_hides_separators_and_ignores_case() {
        let items = items();
        let visible = filter_choices(&items, "WIDGET");

        let values: Vec<_> = visible
            .iter()
            .map(|item| item.as_choice().unwrap().value.as_str())
            .collect();
        assert_eq!(values, vec!["acme/widgets", "other/Widgets"]);
    }

    #[test]
    fn empty_filter_shows_everything() {
        let items = items();
        assert_eq!(filter_choices(&items, "").len(), items.len());
    }

    #[test]
    fn numbers_select_among_choices() {
        let items = items();
        let visible = filter_choices(&items, "");
        let candidates = selectable(&visible);

        assert_eq!(
            interpret_input("2", &candidates, None),
            Input::Selected("acme/widgets".to_string())
        );
        assert_eq!(
            interpret_input("9", &candidates, None),
            Input::Filter("9".to_string())
        );
        assert_eq!(
            interpret_input("0", &candidates, None),
            Input::Filter("0".to_string())
        );
    }

    #[test]
    fn empty_input_takes_default_or_single_match() {
        let items = items();
        let all = filter_choices(&items, "");
        let candidates = selectable(&all);
        assert_eq!(
            interpret_input("", &candidates, Some("acme/gadgets")),
            Input::Selected("acme/gadgets".to_string())
        );
        assert_eq!(
            interpret_input("", &candidates, None),
            Input::Filter(String::new())
        );

        let one = filter_choices(&items, "other");
        let candidates = selectable(&one);
        assert_eq!(
            interpret_input("", &candidates, None),
            Input::Selected("other/Widgets".to_string())
        );
    }

    #[test]
    fn renders_groups_and_numbers() {
        let items = items();
        let visible = filter_choices(&items, "");
        let mut output = Vec::new();

        render_choices(&visible, usize::MAX, &mut output).unwrap();

        let result = String::from_utf8(output).unwrap();
        assert_eq!(
            result,
            format!(
                "  Recent repos:\n   1) acme/gadgets\n  Other repos:\n   2) acme/widgets\n   3) other/Widgets\n  {RULE}\n"
            )
        );
    }

    #[test]
    fn long_labels_are_truncated() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
