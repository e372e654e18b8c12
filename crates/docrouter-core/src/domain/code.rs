//! Client code rules
//!
//! Pure functions that pull a [`ClientCode`] out of a document's file name
//! and decide whether a client folder name belongs to a given code.

use super::newtypes::ClientCode;

/// Extracts the client code embedded at the start of a file name.
///
/// The delimiter is a hyphen when the name contains one, an underscore
/// otherwise. The token before the first delimiter is trimmed and must be
/// made only of ASCII digits. A name with neither delimiter is taken whole
/// as the token, which rejects things like `report.pdf`.
///
/// Returns `None` when no valid code can be derived.
///
/// ```
/// use docrouter_core::domain::code::extract_client_code;
///
/// assert_eq!(extract_client_code("123-report.pdf").unwrap().as_str(), "123");
/// assert_eq!(extract_client_code("45_folha.pdf").unwrap().as_str(), "45");
/// assert!(extract_client_code("invoice_abc.pdf").is_none());
/// ```
pub fn extract_client_code(file_name: &str) -> Option<ClientCode> {
    let delimiter = if file_name.contains('-') { '-' } else { '_' };
    let token = file_name
        .split_once(delimiter)
        .map_or(file_name, |(head, _)| head)
        .trim();
    ClientCode::new(token).ok()
}

/// Returns true when `folder_name` names the client identified by `code`.
///
/// A folder matches if it contains `" - <code>"` anywhere or ends with
/// `" <code>"`. A folder named exactly `<code>` does not match.
pub fn client_folder_matches(folder_name: &str, code: &ClientCode) -> bool {
    let code = code.as_str();
    folder_name.contains(&format!(" - {code}")) || folder_name.ends_with(&format!(" {code}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> ClientCode {
        ClientCode::new(s).unwrap()
    }

    #[test]
    fn hyphen_takes_precedence_over_underscore() {
        assert_eq!(extract_client_code("12_34-x.pdf"), None);
        assert_eq!(extract_client_code("12-34_x.pdf"), Some(code("12")));
    }

    #[test]
    fn splits_on_first_hyphen_and_trims() {
        assert_eq!(extract_client_code(" 0042 - folha - 01.pdf"), Some(code("0042")));
        assert_eq!(extract_client_code("123-report.pdf"), Some(code("123")));
    }

    #[test]
    fn underscore_used_when_no_hyphen() {
        assert_eq!(extract_client_code("987_balancete.xlsx"), Some(code("987")));
        assert_eq!(extract_client_code("invoice_abc.pdf"), None);
    }

    #[test]
    fn no_delimiter_uses_whole_name() {
        assert_eq!(extract_client_code("report.pdf"), None);
        // Whole name is all digits: accepted
        assert_eq!(extract_client_code("555"), Some(code("555")));
    }

    #[test]
    fn empty_token_is_rejected() {
        assert_eq!(extract_client_code("-report.pdf"), None);
        assert_eq!(extract_client_code("   _x.pdf"), None);
        assert_eq!(extract_client_code(""), None);
    }

    #[test]
    fn matches_embedded_token() {
        assert!(client_folder_matches("Acme - 123", &code("123")));
        assert!(client_folder_matches("Acme - 123 (old)", &code("123")));
    }

    #[test]
    fn matches_space_suffix() {
        assert!(client_folder_matches("Acme Ltda 123", &code("123")));
    }

    #[test]
    fn bare_code_does_not_match() {
        assert!(!client_folder_matches("123", &code("123")));
    }

    #[test]
    fn unrelated_names_do_not_match() {
        assert!(!client_folder_matches("Acme-123", &code("123")));
        assert!(!client_folder_matches("Acme 1234x", &code("123")));
        assert!(!client_folder_matches("Acme 0123", &code("123")));
    }

    #[test]
    fn embedded_rule_is_prefix_based() {
        // " - 12" is a substring of "Acme - 123", so code 12 also matches it.
        assert!(client_folder_matches("Acme - 123", &code("12")));
        assert!(!client_folder_matches("Acme 123", &code("12")));
    }
}
