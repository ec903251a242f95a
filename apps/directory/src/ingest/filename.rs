//! Client filename handling for uploads.

use unicode_normalization::UnicodeNormalization;

/// What the upload should be read as, decided from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Csv,
    Zip,
}

/// Reduces a client-supplied filename to a safe ASCII name.
///
/// Accents are decomposed and dropped, path separators and whitespace runs
/// become `_`, anything outside `[A-Za-z0-9_.-]` is removed and leading or
/// trailing `.`/`_` are stripped. `"../../My Family.CSV"` becomes
/// `"My_Family.CSV"`.
pub fn secure_filename(name: &str) -> String {
    let ascii: String = name
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    kept.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Classifies a sanitised filename. The extension match is case-sensitive.
pub fn upload_kind(secure_name: &str) -> Option<UploadKind> {
    if secure_name.ends_with(".zip") {
        Some(UploadKind::Zip)
    } else if secure_name.ends_with(".csv") {
        Some(UploadKind::Csv)
    } else {
        None
    }
}
