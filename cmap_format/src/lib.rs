//! Parser for NCL-style `.rgb` color table files.
//!
//! A color table file is plain text: an optional `ncolors <n>` count
//! declaration, then one RGB triplet per line. Channel values are either
//! 8-bit integers in 0..=255 or already-normalized floats in [0, 1];
//! the two styles are never mixed within a file. Trailing text on a data
//! line (units, comments) is ignored.

use std::io;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

/// An ordered color table. Every channel is in [0, 1] after parsing.
pub type ColorTable = Vec<[f32; 3]>;

lazy_static! {
    // A count declaration like "ncolors = 18" is metadata, not a triplet.
    static ref REGEX_NCOLORS: Regex = Regex::new(r"(?m)^.*ncolors.*\n?").unwrap();

    // Three decimal numbers at the start of a line. Horizontal whitespace
    // only, so a stray lone number never pairs up with the next line.
    static ref REGEX_TRIPLET: Regex =
        Regex::new(r"(?m)^[ \t]*(\d+\.?\d*)[ \t]+(\d+\.?\d*)[ \t]+(\d+\.?\d*)").unwrap();
}

#[derive(Debug, Error)]
pub enum RgbTableError {
    #[error("Colormap file {0} not found")]
    NotFound(PathBuf),
    #[error("Colormap file {0} is not valid text")]
    NotText(PathBuf),
    #[error("Failed to read colormap file {0}: {1}")]
    Unreadable(PathBuf, io::Error),
}

/// Parse the text of a color table file.
///
/// Values are interpreted as 0..=255 integers and divided by 255 unless
/// at least one matched value carries a decimal point, in which case all
/// values are taken verbatim. Lines that fail the triplet pattern
/// (comments, blank lines, malformed rows) are skipped. An input with no
/// triplets at all yields an empty table.
pub fn parse_color_table(src: &str) -> ColorTable {
    let src = REGEX_NCOLORS.replace_all(src, "");

    let mut table = ColorTable::new();
    let mut fractional = false;

    for caps in REGEX_TRIPLET.captures_iter(&src) {
        let mut triplet = [0.0f32; 3];
        for (i, chan) in triplet.iter_mut().enumerate() {
            let text = &caps[i + 1];
            fractional |= text.contains('.');
            // The capture groups only admit digits and a dot.
            *chan = text.parse().unwrap();
        }
        table.push(triplet);
    }

    if !fractional {
        for triplet in table.iter_mut() {
            for chan in triplet.iter_mut() {
                *chan /= 255.0;
            }
        }
    }

    table
}

/// Read and parse a color table file from disk.
pub fn read_color_table(path: &Path) -> Result<ColorTable, RgbTableError> {
    let src = match std::fs::read_to_string(path) {
        Ok(src) => src,
        Err(e) => {
            return Err(match e.kind() {
                io::ErrorKind::NotFound => RgbTableError::NotFound(path.to_path_buf()),
                io::ErrorKind::InvalidData => RgbTableError::NotText(path.to_path_buf()),
                _ => RgbTableError::Unreadable(path.to_path_buf(), e),
            });
        }
    };

    Ok(parse_color_table(&src))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_triplets_are_normalized() {
        let table = parse_color_table("255 0 0\n0 255 0\n");
        assert_eq!(table, vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    }

    #[test]
    fn integer_values_divide_by_255() {
        let table = parse_color_table("51 102 204\n");
        assert_eq!(table, vec![[51.0 / 255.0, 102.0 / 255.0, 204.0 / 255.0]]);
    }

    #[test]
    fn float_triplets_parse_verbatim() {
        let table = parse_color_table("0.0 0.5 1.0\n1.0 0.25 0.0\n");
        assert_eq!(table, vec![[0.0, 0.5, 1.0], [1.0, 0.25, 0.0]]);
    }

    #[test]
    fn one_fractional_value_switches_the_whole_file() {
        // "1" next to "0.5" must not be read as the integer 1/255.
        let table = parse_color_table("1 0.5 0\n");
        assert_eq!(table, vec![[1.0, 0.5, 0.0]]);
    }

    #[test]
    fn ncolors_header_is_stripped() {
        let mut src = String::from("ncolors = 18\n");
        for i in 0..18 {
            src.push_str(&format!("{} {} {}\n", i, i, i));
        }
        let table = parse_color_table(&src);
        assert_eq!(table.len(), 18);
        assert_eq!(table[0], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn header_without_equals_sign_is_stripped() {
        let table = parse_color_table("ncolors 2\n255 255 255\n0 0 0\n");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn trailing_line_content_is_ignored() {
        let table = parse_color_table("255 128 0 ; amber\n");
        assert_eq!(table, vec![[1.0, 128.0 / 255.0, 0.0]]);
    }

    #[test]
    fn comment_and_malformed_lines_are_skipped() {
        let src = "# generated table\n255 0 0\nnot a triplet\n128\n0 0 255\n";
        let table = parse_color_table(src);
        assert_eq!(table, vec![[1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
    }

    #[test]
    fn file_order_is_preserved() {
        let table = parse_color_table("10 20 30\n40 50 60\n70 80 90\n");
        let expected: Vec<[f32; 3]> = vec![
            [10.0 / 255.0, 20.0 / 255.0, 30.0 / 255.0],
            [40.0 / 255.0, 50.0 / 255.0, 60.0 / 255.0],
            [70.0 / 255.0, 80.0 / 255.0, 90.0 / 255.0],
        ];
        assert_eq!(table, expected);
    }

    #[test]
    fn empty_input_yields_empty_table() {
        assert!(parse_color_table("").is_empty());
        assert!(parse_color_table("# nothing but comments\n").is_empty());
    }

    #[test]
    fn missing_file_is_a_not_found_error() {
        let err = read_color_table(Path::new("/nonexistent/cmap.rgb")).unwrap_err();
        assert!(matches!(err, RgbTableError::NotFound(_)));
    }
}
