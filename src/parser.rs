use anyhow::{bail, Result};

/// Parses the input string into the path under which the trigger routes are
/// mounted.
///
/// Parsing adheres to the following rules:
/// - A leading slash is added if it is missing.
/// - Trailing slashes are removed.
/// - An empty input or a lone `/` mounts the routes at the root, which is
///   returned as an empty string.
/// - Whitespace, queries and fragments are rejected, as are `*` and `:`,
///   which the router would treat as wildcards and path captures.
pub fn mount_path_parser(input: &str) -> Result<String> {
    let trimmed = input.trim_matches('/');

    if trimmed.is_empty() {
        return Ok(String::new());
    }

    if let Some(c) = trimmed
        .chars()
        .find(|c| c.is_whitespace() || matches!(c, '?' | '#' | '*' | ':'))
    {
        bail!("invalid character {c:?} in mount path {input:?}");
    }

    if trimmed.contains("//") {
        bail!("mount path {input:?} contains an empty segment");
    }

    Ok(format!("/{trimmed}"))
}
