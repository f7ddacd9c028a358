//! Filename generation and manipulation.

use crate::error::{Error, Result};
use crate::media::ImageLink;

/// Replace characters that are illegal in filenames on common platforms.
///
/// Control characters, path separators and `" < > | : * ?` become `_`.
/// Everything else, spaces included, is kept as is.
pub fn clean_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '"' | '<' | '>' | '|' | ':' | '*' | '?' | '\\' | '/' => '_',
            c if (c as u32) < 32 => '_',
            c => c,
        })
        .collect()
}

/// Sanitize a single path component such as a thread folder name.
///
/// The component is cleaned and trimmed. Empty names and the `.`/`..`
/// directory aliases are rejected.
pub fn sanitize_path_component(name: &str) -> Result<String> {
    let sanitized = clean_file_name(name).trim().to_string();

    if sanitized.is_empty() {
        return Err(Error::InvalidFilename(
            "Path component cannot be empty or whitespace-only".to_string(),
        ));
    }

    if sanitized == "." || sanitized == ".." {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    Ok(sanitized)
}

/// Name of the file an attachment is saved as.
///
/// With `use_original` the advertised filename is cleaned and used.
/// Otherwise the attachment id plus the URL extension is used.
pub fn output_filename(link: &ImageLink, use_original: bool) -> String {
    if use_original {
        clean_file_name(&link.original_filename)
    } else {
        format!("{}{}", link.id, link.extension())
    }
}
