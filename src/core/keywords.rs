/// Keywords used to relate a prospect's stated challenges to a case's challenges.
///
/// A case challenge counts as shared when one of these keywords occurs in both the
/// prospect text and the challenge text.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "健康",
    "食事",
    "野菜",
    "栄養",
    "食生活",
    "福利厚生",
    "コミュニケーション",
    "満足度",
    "採用",
    "エンゲージメント",
    "食環境",
    "健康経営",
];

/// Ordered keyword list for challenge matching
///
/// Keywords are stored lower-cased so lookups against lower-cased text are
/// case-insensitive for scripts that have case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordVocabulary {
    keywords: Vec<String>,
}

impl KeywordVocabulary {
    /// Build a vocabulary, dropping blanks and duplicates while keeping the first
    /// occurrence order.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && !normalized.contains(&keyword) {
                normalized.push(keyword);
            }
        }

        Self { keywords: normalized }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// First keyword (in vocabulary order) contained in both texts.
    ///
    /// Both arguments must already be lower-cased.
    #[inline]
    pub fn first_shared(&self, left: &str, right: &str) -> Option<&str> {
        self.keywords
            .iter()
            .find(|keyword| left.contains(keyword.as_str()) && right.contains(keyword.as_str()))
            .map(String::as_str)
    }
}

impl Default for KeywordVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary() {
        let vocabulary = KeywordVocabulary::default();
        assert_eq!(vocabulary.len(), DEFAULT_KEYWORDS.len());
        assert_eq!(vocabulary.keywords()[0], "健康");
    }

    #[test]
    fn test_normalizes_keywords() {
        let vocabulary = KeywordVocabulary::new(["  Diet ", "diet", "", "Benefits"]);
        assert_eq!(vocabulary.keywords(), &["diet".to_string(), "benefits".to_string()]);
    }

    #[test]
    fn test_first_shared_requires_both_sides() {
        let vocabulary = KeywordVocabulary::new(["health", "diet"]);

        assert_eq!(vocabulary.first_shared("health and diet", "diet plans"), Some("diet"));
        assert_eq!(vocabulary.first_shared("health", "diet"), None);
        assert_eq!(vocabulary.first_shared("health diet", "better health"), Some("health"));
    }

    #[test]
    fn test_empty_vocabulary_never_matches() {
        let vocabulary = KeywordVocabulary::new(Vec::<String>::new());
        assert!(vocabulary.is_empty());
        assert_eq!(vocabulary.first_shared("健康", "健康"), None);
    }
}
