// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Test data generators for flood simulation.

/// Generate a pool of logical form ids.
pub fn generate_form_ids(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("form-{i}")).collect()
}

/// Generate sender names.
pub fn generate_names(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("Visitor {i}")).collect()
}

/// Generate well-formed sender emails.
pub fn generate_emails(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("visitor-{}@mail-{}.example.com", i % 10, i / 10))
        .collect()
}

/// Generate message bodies.
pub fn generate_messages(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("Hello! Message number {i} about your portfolio."))
        .collect()
}

/// Generate provider-shaped stored-file URLs.
pub fn generate_provider_urls(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            format!(
                "https://cloud.appwrite.io/v1/storage/buckets/gallery/files/photo-{i}/view?project=portfolio"
            )
        })
        .collect()
}

/// Malformed or non-email inputs the validator must reject.
pub fn generate_invalid_emails() -> Vec<&'static str> {
    vec![
        "",
        "   ",
        "not-an-email",
        "@example.com",
        "someone@",
        "someone@nodot",
        "some one@example.com",
        "someone@.example.com",
    ]
}

/// Malformed URL variations the media resolver must pass through verbatim.
pub fn generate_malformed_urls() -> Vec<&'static str> {
    vec![
        "",
        "   ",
        "not-a-url",
        "://missing-scheme.com/",
        "javascript:alert(1)",
        "data:text/html,<script>",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_form_ids() {
        let ids = generate_form_ids(50);
        assert_eq!(ids.len(), 50);
        let unique: std::collections::HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 50);
    }

    #[test]
    fn test_generate_emails_are_plausible() {
        for email in generate_emails(30) {
            assert!(email.contains('@'));
            assert!(email.split('@').nth(1).unwrap().contains('.'));
        }
    }

    #[test]
    fn test_generate_provider_urls() {
        let urls = generate_provider_urls(10);
        assert_eq!(urls.len(), 10);
        assert!(urls[0].contains("/storage/"));
        assert!(urls[0].starts_with("https://"));
    }
}
