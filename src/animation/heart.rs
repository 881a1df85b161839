/// The heart silhouette. Every `*` is a cell that gets a character of the name.
pub const HEART_SHAPE: [&str; 15] = [
    "      *****       *****      ",
    "   *********** ***********   ",
    " *************************** ",
    "*****************************",
    "*****************************",
    "*****************************",
    " *************************** ",
    "  *************************  ",
    "    *********************    ",
    "      *****************      ",
    "        *************        ",
    "          *********          ",
    "            *****            ",
    "             ***             ",
    "              *              ",
];

/// The marker for cells that are filled with text.
pub const FILL_MARKER: char = '*';

/// The name used when none is given.
pub const DEFAULT_WORD: &str = "corazon";

/// The number of characters the name is repeated into before filling the heart.
pub const WORKING_LENGTH: usize = 200;

/// The number of rows in the heart.
pub fn rows() -> usize {
    HEART_SHAPE.len()
}

/// The width of every heart row, in characters.
pub fn width() -> usize {
    HEART_SHAPE[0].chars().count()
}

/// The number of cells in the heart that are filled with text.
pub fn fill_cell_count() -> usize {
    HEART_SHAPE.iter().flat_map(|row| row.chars()).filter(|c| *c == FILL_MARKER).count()
}

/// Build the lines of the heart by tiling `name` over its filled cells.
///
/// The name is repeated and truncated to [WORKING_LENGTH] characters, and that buffer is
/// walked cyclically over the filled cells, row by row. Blank cells stay blank.
pub fn build_heart_lines(name: &str) -> Vec<String> {
    let buffer = working_buffer(name);
    let mut index = 0;
    HEART_SHAPE
        .iter()
        .map(|row| {
            row.chars()
                .map(|c| {
                    if c == FILL_MARKER {
                        let next = buffer[index % buffer.len()];
                        index += 1;
                        next
                    } else {
                        ' '
                    }
                })
                .collect()
        })
        .collect()
}

fn working_buffer(name: &str) -> Vec<char> {
    let name = match name.trim() {
        "" => DEFAULT_WORD,
        name => name,
    };
    name.chars().cycle().take(WORKING_LENGTH).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn assert_matches_shape(lines: &[String]) {
        assert_eq!(lines.len(), HEART_SHAPE.len());
        for (line, row) in lines.iter().zip(HEART_SHAPE) {
            assert_eq!(line.chars().count(), row.chars().count());
            for (output, shape) in line.chars().zip(row.chars()) {
                assert_eq!(shape == FILL_MARKER, output != ' ', "row '{row}' rendered as '{line}'");
            }
        }
    }

    #[rstest]
    #[case::single("x")]
    #[case::short("Jo")]
    #[case::long(&"abcdefghij".repeat(50))]
    #[case::multibyte("Añoñ♥")]
    fn keeps_heart_shape(#[case] name: &str) {
        assert_matches_shape(&build_heart_lines(name));
    }

    #[rstest]
    #[case::single("x")]
    #[case::short("Jo")]
    #[case::long(&"abcdefghijklm".repeat(40))]
    fn fills_cyclically(#[case] name: &str) {
        let buffer: Vec<char> = name.chars().cycle().take(WORKING_LENGTH).collect();
        let filled: Vec<char> =
            build_heart_lines(name).iter().flat_map(|line| line.chars()).filter(|c| *c != ' ').collect();
        assert_eq!(filled.len(), fill_cell_count());
        for (index, c) in filled.iter().enumerate() {
            assert_eq!(*c, buffer[index % WORKING_LENGTH], "mismatch at fill cell {index}");
        }
    }

    #[rstest]
    #[case::empty("")]
    #[case::whitespace("   \t ")]
    fn falls_back_to_default_word(#[case] name: &str) {
        assert_eq!(build_heart_lines(name), build_heart_lines(DEFAULT_WORD));
        let first = &build_heart_lines(name)[0];
        assert_eq!(first.trim_start().chars().take(5).collect::<String>(), "coraz");
    }

    #[test]
    fn tiles_short_name() {
        let lines = build_heart_lines("Jo");
        let first: Vec<char> = lines[0].chars().collect();
        assert_eq!(first[6], 'J');
        assert_eq!(first[7], 'o');
        assert_eq!(lines[0], "      JoJoJ       oJoJo      ");
    }

    #[test]
    fn shape_dimensions() {
        assert_eq!(rows(), 15);
        assert_eq!(width(), 29);
        assert_eq!(fill_cell_count(), 267);
        assert!(HEART_SHAPE.iter().all(|row| row.chars().count() == width()));
    }
}
