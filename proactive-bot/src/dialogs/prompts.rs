//! Prompt recognizers and rendering for the wizard steps.
//!
//! Validators accept any recognized input; only unrecognizable input triggers the retry prompt.

/// Renders a choice prompt inline: `Make a choice. (1) Yes or (2) No`.
pub fn render_choices(prompt: &str, choices: &[&str]) -> String {
    let numbered: Vec<String> = choices
        .iter()
        .enumerate()
        .map(|(i, c)| format!("({}) {}", i + 1, c))
        .collect();

    let list = match numbered.len() {
        0 => return prompt.to_string(),
        1 => numbered[0].clone(),
        2 => format!("{} or {}", numbered[0], numbered[1]),
        n => format!("{}, or {}", numbered[..n - 1].join(", "), numbered[n - 1]),
    };
    format!("{} {}", prompt, list)
}

/// Matches the input against the choices by text (case-insensitive) or by 1-based index.
pub fn recognize_choice(input: &str, choices: &[&str]) -> Option<String> {
    let input = input.trim();
    if let Some(choice) = choices.iter().find(|c| c.eq_ignore_ascii_case(input)) {
        return Some((*choice).to_string());
    }
    input
        .parse::<usize>()
        .ok()
        .filter(|i| (1..=choices.len()).contains(i))
        .map(|i| choices[i - 1].to_string())
}

/// Any non-blank text.
pub fn recognize_text(input: &str) -> Option<String> {
    let input = input.trim();
    (!input.is_empty()).then(|| input.to_string())
}

/// A whole number, optionally signed.
pub fn recognize_number(input: &str) -> Option<i64> {
    input.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const YES_NO: &[&str] = &["Yes", "No"];

    #[test]
    fn test_render_choices() {
        assert_eq!(
            render_choices("Make a choice.", YES_NO),
            "Make a choice. (1) Yes or (2) No"
        );
        assert_eq!(
            render_choices("Pick.", &["A", "B", "C"]),
            "Pick. (1) A, (2) B, or (3) C"
        );
        assert_eq!(render_choices("Pick.", &["Only"]), "Pick. (1) Only");
        assert_eq!(render_choices("Pick.", &[]), "Pick.");
    }

    #[test]
    fn test_recognize_choice() {
        assert_eq!(recognize_choice("yes", YES_NO), Some("Yes".to_string()));
        assert_eq!(recognize_choice(" NO ", YES_NO), Some("No".to_string()));
        assert_eq!(recognize_choice("2", YES_NO), Some("No".to_string()));
        assert_eq!(recognize_choice("3", YES_NO), None);
        assert_eq!(recognize_choice("0", YES_NO), None);
        assert_eq!(recognize_choice("maybe", YES_NO), None);
    }

    #[test]
    fn test_recognize_text_and_number() {
        assert_eq!(recognize_text("  Alice "), Some("Alice".to_string()));
        assert_eq!(recognize_text("   "), None);
        assert_eq!(recognize_number("42"), Some(42));
        assert_eq!(recognize_number(" -7 "), Some(-7));
        assert_eq!(recognize_number("4.2"), None);
        assert_eq!(recognize_number("forty"), None);
    }
}
