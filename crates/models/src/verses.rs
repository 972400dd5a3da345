/// Splits lyrics into verses on blank lines (`"\n\n"`).
///
/// CRLF line endings are normalized first. Text without a blank line is a
/// single verse, so the result is never empty.
pub fn split_verses(lyrics: &str) -> Vec<String> {
    lyrics
        .replace("\r\n", "\n")
        .split("\n\n")
        .map(str::to_string)
        .collect()
}
