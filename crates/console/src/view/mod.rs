//! Text rendering of tables, drawers and toasts.

pub mod drawer;
pub mod rows;
pub mod table;
pub mod toast;

pub use drawer::render_drawer;
pub use rows::TableRow;
pub use table::{render_table, TableState};
pub use toast::render_toasts;

/// Pads or truncates `value` to exactly `width` characters.
pub(crate) fn fit(value: &str, width: usize) -> String {
    let count = value.chars().count();
    if count > width {
        let mut cut: String = value.chars().take(width.saturating_sub(1)).collect();
        cut.push('~');
        cut
    } else {
        format!("{}{}", value, " ".repeat(width - count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 4), "abc~");
        assert_eq!(fit("", 2), "  ");
    }
}
