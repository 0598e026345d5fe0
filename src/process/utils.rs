/// Normalize a raw header cell: drop a UTF-8 BOM and trim whitespace.
///
/// Quoting is already resolved by the CSV reader, so quote characters that
/// survive are part of the label.
pub fn clean_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}
