//! Display helpers.

/// Shorten an address by replacing its middle with `...`.
///
/// Strings of at most `head + tail + 3` characters are returned unchanged.
pub fn shorten_address(address: &str, head: usize, tail: usize) -> String {
    let len = address.chars().count();
    if len <= head + tail + 3 {
        return address.to_string();
    }
    let start: String = address.chars().take(head).collect();
    let end: String = address.chars().skip(len - tail).collect();
    format!("{start}...{end}")
}

/// Text of the connect button for an optional connected address.
pub fn connect_label(address: Option<&str>) -> String {
    use crate::constants::{BUTTON_SHORTEN, CONNECT_LABEL};
    match address {
        Some(a) if !a.is_empty() => shorten_address(a, BUTTON_SHORTEN.0, BUTTON_SHORTEN.1),
        _ => CONNECT_LABEL.to_string(),
    }
}
