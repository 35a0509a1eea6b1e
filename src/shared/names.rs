pub const MAX_PLAYER_NAME_LENGTH: usize = 20;
pub const DEFAULT_PLAYER_NAME: &str = "Anonymous";

/// Trims and truncates a submitted name, falling back when nothing is left.
pub fn sanitize_player_name(name: &str, fallback: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return fallback.to_string();
    }
    trimmed.chars().take(MAX_PLAYER_NAME_LENGTH).collect()
}

/// Folds a name into the lowercase letter-only form used for blocklist matching.
pub fn normalize_for_matching(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter_map(|ch| {
            let folded = match ch {
                '0' => 'o',
                '1' | '!' | '|' | '[' | ']' => 'i',
                '3' => 'e',
                '4' | '@' => 'a',
                '5' | '$' => 's',
                '7' | '+' => 't',
                '8' => 'b',
                other => other,
            };
            folded.is_ascii_lowercase().then_some(folded)
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct Blocklist {
    words: Vec<String>,
}

impl Blocklist {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Vec::new();
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if !word.is_empty() && !list.contains(&word) {
                list.push(word);
            }
        }
        Self { words: list }
    }

    /// Parses a comma-separated word list such as `LEADERBOARD_BLOCKLIST`.
    pub fn parse(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn matches(&self, name: &str) -> bool {
        if self.words.is_empty() {
            return false;
        }
        let normalized = normalize_for_matching(name);
        self.words.iter().any(|word| normalized.contains(word.as_str()))
    }
}
