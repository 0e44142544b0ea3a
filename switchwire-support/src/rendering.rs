//! Text rendering utilities for human-friendly error messages.
//!
//! Component names are dotted paths (`dao.PersonDAO`), type names are Rust
//! paths (`my_app::dao::PersonDao`). Both get shortened for display.

/// Renders a creation chain as a readable string.
///
/// # Examples
/// ```
/// use switchwire_support::rendering::render_chain;
///
/// let chain = vec!["HouseholdDAO", "PersonDAO", "HouseholdDAO"];
/// assert_eq!(render_chain(&chain), "HouseholdDAO → PersonDAO → HouseholdDAO");
/// ```
pub fn render_chain(chain: &[impl AsRef<str>]) -> String {
    chain
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Renders a list of names as a bulleted block, one per line.
///
/// ```
/// use switchwire_support::rendering::render_list;
///
/// assert_eq!(render_list(&["a", "b"], "    "), "    - a\n    - b");
/// ```
pub fn render_list(items: &[impl AsRef<str>], indent: &str) -> String {
    items
        .iter()
        .map(|item| format!("{indent}- {}", item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Returns the last segment of a dotted component name.
///
/// ```
/// use switchwire_support::rendering::local_name;
///
/// assert_eq!(local_name("dao.person.PersonDAO"), "PersonDAO");
/// assert_eq!(local_name("PersonDAO"), "PersonDAO");
/// ```
pub fn local_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// Shortens a fully qualified type name for display.
///
/// ```
/// use switchwire_support::rendering::shorten_type_name;
///
/// let short = shorten_type_name("my_app::dao::PersonDao");
/// assert_eq!(short, "PersonDao");
///
/// let short = shorten_type_name("alloc::sync::Arc<dyn my_app::traits::Logger>");
/// assert_eq!(short, "Arc<dyn Logger>");
/// ```
pub fn shorten_type_name(full_name: &str) -> String {
    let mut result = String::with_capacity(full_name.len());
    let mut chars = full_name.chars().peekable();
    let mut segment = String::new();

    while let Some(ch) = chars.next() {
        match ch {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                segment.clear();
            }
            '<' | '>' | ',' | ' ' => {
                result.push_str(&segment);
                result.push(ch);
                segment.clear();
            }
            _ => segment.push(ch),
        }
    }

    result.push_str(&segment);
    result
}

/// Suggests registered component names close to `requested`.
///
/// Matches are scored: whole-name substring, then local-name substring,
/// then a shared prefix of at least three characters. Exact matches are
/// skipped since they would not have failed the lookup.
pub fn suggest_similar(requested: &str, available: &[&str], max_suggestions: usize) -> Vec<String> {
    let requested_lower = requested.to_lowercase();
    let requested_local = local_name(requested).to_lowercase();

    let mut scored: Vec<(&str, usize)> = available
        .iter()
        .filter(|&&name| name != requested)
        .filter_map(|&name| {
            let name_lower = name.to_lowercase();
            let name_local = local_name(name).to_lowercase();

            if name_lower.contains(&requested_lower) || requested_lower.contains(&name_lower) {
                return Some((name, 100));
            }

            if name_local.contains(&requested_local) || requested_local.contains(&name_local) {
                return Some((name, 80));
            }

            let common = name_local
                .chars()
                .zip(requested_local.chars())
                .take_while(|(a, b)| a == b)
                .count();

            (common >= 3).then_some((name, common * 10))
        })
        .collect();

    // stable: equal scores keep registration order
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored
        .into_iter()
        .take(max_suggestions)
        .map(|(name, _)| name.to_string())
        .collect()
}
