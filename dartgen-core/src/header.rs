//! Generated-file banner.

/// First line of every generated file.
pub const GENERATED_NOTICE: &str = "// GENERATED CODE - DO NOT MODIFY BY HAND";

/// Width of the star rule the generator name is centered in.
pub const BANNER_WIDTH: usize = 50;

/// Render the three-line banner naming the generator.
///
/// ```
/// let banner = dartgen_core::banner("JsonGenerator");
/// assert_eq!(
///     banner.lines().nth(1),
///     Some("// ***************** JsonGenerator ******************"),
/// );
/// ```
pub fn banner(generator: &str) -> String {
    let rule = "*".repeat(BANNER_WIDTH);
    let title = format!(" {} ", generator.trim());
    format!(
        "// {rule}\n// {title:*^width$}\n// {rule}\n",
        width = BANNER_WIDTH
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_has_three_lines_of_equal_width() {
        let text = banner("Gen");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.len() == BANNER_WIDTH + 3));
        assert!(lines[1].contains(" Gen "));
    }

    #[test]
    fn test_banner_centers_name() {
        let line = banner("ab").lines().nth(1).unwrap().to_string();
        let body = line.trim_start_matches("// ");
        let left = body.find(' ').unwrap();
        let right = body.len() - body.rfind(' ').unwrap() - 1;
        assert!(left.abs_diff(right) <= 1);
    }
}
