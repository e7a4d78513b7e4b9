use crate::models::{RankedFilm, Selection};

pub const NO_MATCHES_MESSAGE: &str = "No films matched your filters.";

pub fn summary_line(selection: &Selection) -> String {
    match selection {
        Selection::Empty => NO_MATCHES_MESSAGE.to_string(),
        Selection::Matches {
            count,
            average_rating: Some(avg),
            ..
        } => format!("Found {count} films. Average rating: {avg:.2}"),
        Selection::Matches { count, .. } => {
            format!("Found {count} films. Average rating: n/a")
        }
    }
}

pub fn render_table(rows: &[RankedFilm]) -> String {
    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|row| {
            [
                row.title.clone(),
                row.year.map_or_else(|| "-".to_string(), |y| y.to_string()),
                row.rating.map_or_else(|| "-".to_string(), |r| format!("{r:.1}")),
                row.votes.map_or_else(|| "-".to_string(), |v| v.to_string()),
            ]
        })
        .collect();

    let headers = ["Title", "Year", "Rating", "Votes"];
    let mut widths = headers.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &headers.map(str::to_string), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in &cells {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, row: &[String; 4], widths: &[usize; 4]) {
    let line = format!(
        "{:<w0$}  {:>w1$}  {:>w2$}  {:>w3$}",
        row[0],
        row[1],
        row[2],
        row[3],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
        w3 = widths[3],
    );
    out.push_str(line.trim_end());
    out.push('\n');
}

pub fn render(selection: &Selection) -> String {
    let mut out = summary_line(selection);
    out.push('\n');
    if let Selection::Matches { top, .. } = selection {
        out.push('\n');
        out.push_str(&render_table(top));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(title: &str, year: Option<i32>, rating: Option<f64>, votes: Option<u64>) -> RankedFilm {
        RankedFilm {
            title: title.to_string(),
            year,
            rating,
            votes,
        }
    }

    #[test]
    fn summary_uses_two_decimals() {
        let selection = Selection::Matches {
            count: 2,
            average_rating: Some(8.8),
            top: vec![],
        };
        assert_eq!(summary_line(&selection), "Found 2 films. Average rating: 8.80");
        assert_eq!(summary_line(&Selection::Empty), NO_MATCHES_MESSAGE);
    }

    #[test]
    fn table_aligns_columns_and_marks_missing_values() {
        let table = render_table(&[
            row("The Shawshank Redemption", Some(1994), Some(9.3), Some(2343110)),
            row("Apollo 13", None, Some(7.6), None),
        ]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Title"));
        assert!(lines[2].starts_with("The Shawshank Redemption  1994     9.3  2343110"));
        assert!(lines[3].starts_with("Apollo 13"));
        assert!(lines[3].contains("  -  "));
        assert!(lines[3].ends_with('-'));
    }

    #[test]
    fn empty_selection_renders_message_only() {
        assert_eq!(render(&Selection::Empty), format!("{NO_MATCHES_MESSAGE}\n"));
    }
}
