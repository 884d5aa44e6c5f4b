// src/jobs/html.rs
//! Plain-text extraction from the HTML snippets job descriptions are stored as

use scraper::{Html, Selector};

/// Text content of an HTML fragment with whitespace collapsed
pub fn plain_text(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let fragment = Html::parse_fragment(html);
    let text: String = fragment.root_element().text().collect();
    clean_text(&text)
}

/// Entries of a description list.
///
/// When any entry carries `<li>` markup the list items are pulled out of all
/// entries; otherwise every entry is one item.
pub fn list_items(entries: &[String]) -> Vec<String> {
    let has_markup = entries.iter().any(|e| e.to_lowercase().contains("<li"));
    if !has_markup {
        return entries
            .iter()
            .map(|e| plain_text(e))
            .filter(|e| !e.is_empty())
            .collect();
    }

    let Ok(selector) = Selector::parse("li") else {
        return Vec::new();
    };

    entries
        .iter()
        .flat_map(|entry| {
            let fragment = Html::parse_fragment(entry);
            let items: Vec<String> = fragment
                .select(&selector)
                .map(|li| clean_text(&li.text().collect::<String>()))
                .filter(|text| !text.is_empty())
                .collect();
            items
        })
        .collect()
}

/// Entries flattened to plain text and joined with ", "
pub fn plain_text_list(entries: &[String]) -> String {
    entries
        .iter()
        .map(|e| plain_text(e))
        .filter(|e| !e.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        assert_eq!(
            plain_text("<p>Join <strong>our</strong>\n team</p>"),
            "Join our team"
        );
        assert_eq!(plain_text("no markup"), "no markup");
        assert_eq!(plain_text(""), "");
    }

    #[test]
    fn test_list_items_with_markup() {
        let entries = vec![
            "<ul><li>Rust</li><li>Tokio</li></ul>".to_string(),
            "<li>SQL</li>".to_string(),
        ];
        assert_eq!(list_items(&entries), vec!["Rust", "Tokio", "SQL"]);
    }

    #[test]
    fn test_list_items_without_markup() {
        let entries = vec!["Remote work".to_string(), "".to_string(), "<b>Bonus</b>".to_string()];
        assert_eq!(list_items(&entries), vec!["Remote work", "Bonus"]);
    }

    #[test]
    fn test_plain_text_list() {
        let entries = vec!["<p>3 years</p>".to_string(), "English".to_string()];
        assert_eq!(plain_text_list(&entries), "3 years, English");
    }
}
