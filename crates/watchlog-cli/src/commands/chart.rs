use watchlog_models::TitleCount;

/// Bar length for the most watched title
pub const DEFAULT_WIDTH: usize = 40;
const MAX_LABEL: usize = 28;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarRow {
    pub label: String, // Padded to a common width
    pub bar: String,
    pub count: usize,
}

/// Horizontal bar chart rows, bars scaled so the largest count fills `width`
pub fn bar_rows(top: &[TitleCount], width: usize) -> Vec<BarRow> {
    let max = top.iter().map(|t| t.count).max().unwrap_or(0);
    let labels: Vec<String> = top.iter().map(|t| truncate(&t.title, MAX_LABEL)).collect();
    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    top.iter()
        .zip(labels)
        .map(|(item, label)| {
            let len = if max == 0 {
                0
            } else {
                // every non-zero count gets at least one block
                ((item.count * width + max - 1) / max).max(1)
            };
            let padding = label_width - label.chars().count();
            BarRow {
                label: format!("{}{}", label, " ".repeat(padding)),
                bar: "█".repeat(len),
                count: item.count,
            }
        })
        .collect()
}

fn truncate(title: &str, max: usize) -> String {
    if title.chars().count() <= max {
        return title.to_string();
    }
    let mut cut: String = title.chars().take(max - 1).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_rows_scale_to_width() {
        let top = vec![
            TitleCount::new("A", 3),
            TitleCount::new("Bee", 2),
            TitleCount::new("C", 1),
        ];
        let rows = bar_rows(&top, 30);

        assert_eq!(rows[0].bar.chars().count(), 30);
        assert_eq!(rows[1].bar.chars().count(), 20);
        assert_eq!(rows[2].bar.chars().count(), 10);
        assert_eq!(rows[0].label, "A  ");
        assert_eq!(rows[1].label, "Bee");
        assert_eq!(rows[2].count, 1);
    }

    #[test]
    fn test_small_counts_still_visible() {
        let top = vec![TitleCount::new("Big", 1000), TitleCount::new("Small", 1)];
        let rows = bar_rows(&top, 10);
        assert_eq!(rows[1].bar.chars().count(), 1);
    }

    #[test]
    fn test_long_titles_truncated() {
        let long = "Stranger Things: Season 4: Chapter One: The Hellfire Club";
        let rows = bar_rows(&[TitleCount::new(long, 1)], 10);
        assert_eq!(rows[0].label.chars().count(), MAX_LABEL);
        assert!(rows[0].label.ends_with('…'));
    }

    #[test]
    fn test_empty_chart() {
        assert!(bar_rows(&[], DEFAULT_WIDTH).is_empty());
    }
}
