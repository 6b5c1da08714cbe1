use anyhow::{Result, bail};

/// Longest name the API server accepts for a namespace or configmap.
const MAX_NAME_LEN: usize = 63;

/// Check a namespace or configmap name before it is put into a URL.
/// Rules: lowercase `[a-z0-9-]`, at most 63 chars, no leading/trailing hyphen.
pub fn validate_name(kind: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("{} name must not be empty", kind);
    }
    if name.len() > MAX_NAME_LEN {
        bail!(
            "{} name '{}' exceeds {} characters (got {})",
            kind,
            name,
            MAX_NAME_LEN,
            name.len()
        );
    }
    if name.starts_with('-') || name.ends_with('-') {
        bail!("{} name '{}' must not start or end with a hyphen", kind, name);
    }
    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
    {
        bail!(
            "{} name '{}' contains '{}'; only [a-z0-9-] is allowed",
            kind,
            name,
            c
        );
    }
    Ok(())
}

/// Parse a `key=value` label argument. The value may be empty and may contain `=`.
pub fn parse_label(raw: &str) -> Result<(String, String)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("label '{}' must have the form key=value", raw);
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("label '{}' has an empty key", raw);
    }
    Ok((key.to_string(), value.to_string()))
}
