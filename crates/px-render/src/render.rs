use px_core::ansi::{RESET, push_fg};
use px_core::frame::{AsciiCell, AsciiGrid};

/// Sérialise une ligne de cellules en texte imprimable.
///
/// Chaque cellule colorée émet sa séquence foreground puis son glyphe ; une
/// cellule sans couleur émet le glyphe seul. Un unique reset ferme la ligne
/// si au moins une couleur a été émise — jamais de reset par cellule, la
/// séquence suivante écrase l'état précédent.
fn render_row(cells: &[AsciiCell]) -> String {
    let mut line = String::with_capacity(cells.len());
    let mut painted = false;
    for cell in cells {
        if let Some((r, g, b)) = cell.fg {
            push_fg(&mut line, r, g, b);
            painted = true;
        }
        line.push(cell.ch);
    }
    if painted {
        line.push_str(RESET);
    }
    line
}

/// Sérialise une grille complète, une `String` par ligne.
///
/// Transformation pure : aucun état externe consommé.
///
/// # Example
/// ```
/// use px_core::frame::{AsciiCell, AsciiGrid};
/// use px_render::render::render_grid;
/// let mut grid = AsciiGrid::new(2, 1);
/// grid.set(0, 0, AsciiCell { ch: '#', fg: None });
/// grid.set(1, 0, AsciiCell { ch: '.', fg: None });
/// assert_eq!(render_grid(&grid), vec!["#.".to_string()]);
/// ```
#[must_use]
pub fn render_grid(grid: &AsciiGrid) -> Vec<String> {
    (0..grid.height).map(|y| render_row(grid.row(y))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use px_core::ansi::strip_ansi;

    fn colored_grid() -> AsciiGrid {
        let mut grid = AsciiGrid::new(3, 2);
        for y in 0..2 {
            for x in 0..3 {
                grid.set(
                    x,
                    y,
                    AsciiCell {
                        ch: char::from(b'a' + (y * 3 + x) as u8),
                        fg: Some((x as u8 * 10, y as u8 * 10, 0)),
                    },
                );
            }
        }
        grid
    }

    fn plain_grid() -> AsciiGrid {
        let mut grid = AsciiGrid::new(3, 2);
        for y in 0..2 {
            for x in 0..3 {
                grid.set(
                    x,
                    y,
                    AsciiCell {
                        ch: char::from(b'a' + (y * 3 + x) as u8),
                        fg: None,
                    },
                );
            }
        }
        grid
    }

    #[test]
    fn plain_rows_carry_no_escape_bytes() {
        let lines = render_grid(&plain_grid());
        assert_eq!(lines, vec!["abc".to_string(), "def".to_string()]);
        assert!(lines.iter().all(|l| !l.contains('\u{1b}')));
    }

    #[test]
    fn colored_rows_reset_once_at_end_of_line() {
        let lines = render_grid(&colored_grid());
        for line in &lines {
            assert!(line.ends_with(RESET));
            assert_eq!(line.matches(RESET).count(), 1, "un seul reset par ligne");
            assert_eq!(line.matches("\x1b[38;2;").count(), 3, "une séquence par cellule");
        }
    }

    #[test]
    fn stripping_colored_render_equals_plain_render() {
        let colored = render_grid(&colored_grid());
        let plain = render_grid(&plain_grid());
        let stripped: Vec<String> = colored.iter().map(|l| strip_ansi(l)).collect();
        assert_eq!(stripped, plain);
    }

    #[test]
    fn stripping_plain_render_is_a_noop() {
        let plain = render_grid(&plain_grid());
        let stripped: Vec<String> = plain.iter().map(|l| strip_ansi(l)).collect();
        assert_eq!(stripped, plain);
    }

    #[test]
    fn mixed_row_resets_only_when_painted() {
        let mut grid = AsciiGrid::new(2, 1);
        grid.set(0, 0, AsciiCell { ch: 'x', fg: None });
        grid.set(1, 0, AsciiCell { ch: 'y', fg: Some((1, 2, 3)) });
        let lines = render_grid(&grid);
        assert!(lines[0].ends_with(RESET));

        let mut bare = AsciiGrid::new(2, 1);
        bare.set(0, 0, AsciiCell { ch: 'x', fg: None });
        bare.set(1, 0, AsciiCell { ch: 'y', fg: None });
        assert!(!render_grid(&bare)[0].contains(RESET));
    }
}
