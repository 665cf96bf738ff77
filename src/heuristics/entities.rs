use std::sync::LazyLock;

use regex::Regex;

use crate::models::Annotation;

/// Optional parentheses around a 2-digit area code, 4-5 digit prefix,
/// 4-digit suffix, optional space or hyphen between the groups
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(?\d{2}\)?[-\s]?\d{4,5}[-\s]?\d{4}").expect("phone pattern is a valid regex")
});

/// All non-overlapping phone-number-shaped substrings, left to right
pub fn find_phone_numbers(text: &str) -> Vec<String> {
    PHONE_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Phone numbers joined with ", " (empty when there are none)
pub fn joined_phone_numbers(text: &str) -> String {
    find_phone_numbers(text).join(", ")
}

/// First token the provider flags as e-mail-like
pub fn find_email(annotation: &Annotation) -> Option<String> {
    annotation
        .tokens()
        .iter()
        .find(|t| t.looks_like_email())
        .map(|t| t.text.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnnotationDocument;

    #[test]
    fn test_phone_with_area_code() {
        assert_eq!(
            find_phone_numbers("Meu telefone é (11) 98765-4321"),
            vec!["(11) 98765-4321"]
        );
    }

    #[test]
    fn test_phone_variants() {
        assert_eq!(find_phone_numbers("ligue 11 3456 7890"), vec!["11 3456 7890"]);
        assert_eq!(find_phone_numbers("ligue 1198765432"), vec!["1198765432"]);
        assert!(find_phone_numbers("tenho 42 anos").is_empty());
    }

    #[test]
    fn test_multiple_phones_joined() {
        let text = "casa (11) 3456-7890 ou celular (21) 99876-5432";
        assert_eq!(joined_phone_numbers(text), "(11) 3456-7890, (21) 99876-5432");
        assert_eq!(joined_phone_numbers("sem telefone"), "");
    }

    #[test]
    fn test_find_email_uses_provider_flag() {
        let json = r#"{
            "text": "escreva para ana@exemplo.com",
            "tokens": [
                {"text": "escreva", "pos": "VERB", "dep": "ROOT", "head": 0},
                {"text": "para", "pos": "ADP", "dep": "case", "head": 2},
                {"text": "ana@exemplo.com", "pos": "PROPN", "dep": "obl", "head": 0, "like_email": true}
            ]
        }"#;
        let doc: AnnotationDocument = serde_json::from_str(json).unwrap();
        let annotation = Annotation::from_document(doc).unwrap();

        assert_eq!(find_email(&annotation), Some("ana@exemplo.com".to_string()));
    }
}
