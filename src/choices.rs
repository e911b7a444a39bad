use std::collections::{HashMap, HashSet};

use crate::types::{Choice, ChoiceItem};

/// Orders choices for display, surfacing recently used values first.
///
/// Values found in `history` are listed under `recent_label`, the rest under
/// `other_label`, followed by a closing rule. Both groups are sorted without
/// regard to case. When none of the history is present in `list` (or the
/// history is empty) the choices are returned sorted with no separators.
pub fn sort_choices(
    list: &[Choice],
    history: &[String],
    recent_label: &str,
    other_label: &str,
) -> Vec<ChoiceItem> {
    let lookup: HashMap<&str, &Choice> = list
        .iter()
        .map(|choice| (choice.value.as_str(), choice))
        .collect();

    let mut remaining: HashSet<&str> = lookup.keys().copied().collect();
    let mut recent = Vec::new();
    for item in history {
        if remaining.remove(item.as_str()) {
            recent.push(item.as_str());
        }
    }

    let remaining: Vec<&str> = remaining.into_iter().collect();
    let others = sorted_items(remaining, &lookup);
    if recent.is_empty() {
        return others;
    }

    let mut result = Vec::with_capacity(list.len() + 3);
    result.push(ChoiceItem::separator(recent_label));
    result.extend(sorted_items(recent, &lookup));
    result.push(ChoiceItem::separator(other_label));
    result.extend(others);
    result.push(ChoiceItem::Separator(None));
    result
}

fn sorted_items(mut values: Vec<&str>, lookup: &HashMap<&str, &Choice>) -> Vec<ChoiceItem> {
    values.sort_by_cached_key(|value| (value.to_lowercase(), value.to_string()));
    values
        .into_iter()
        .filter_map(|value| lookup.get(value))
        .map(|choice| ChoiceItem::Choice((*choice).clone()))
        .collect()
}

/// Builds plain choices whose label is their value.
pub fn choices_from<I, S>(values: I) -> Vec<Choice>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Choice::new).collect()
}
