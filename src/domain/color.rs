use std::collections::HashMap;

/// Occurrence counts per color, iterated in first-seen order.
///
/// Ties in the analyzer are broken by this order, so it must stay stable
/// across runs over the same input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::default();
        for token in tokens {
            let token = token.as_ref();
            match table.index.get(token) {
                Some(&pos) => table.entries[pos].1 += 1,
                None => {
                    table.index.insert(token.to_string(), table.entries.len());
                    table.entries.push((token.to_string(), 1));
                }
            }
        }
        table
    }

    pub fn get(&self, color: &str) -> Option<u64> {
        self.index.get(color).map(|&pos| self.entries[pos].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(color, count)| (color.as_str(), *count))
    }

    pub fn counts(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.iter().map(|(_, count)| *count)
    }

    /// Number of distinct colors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts; equals the number of tokens the table was built from.
    pub fn total(&self) -> u64 {
        self.counts().sum()
    }
}

/// Statistics derived from one frequency table.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorAnalysis {
    /// Color whose count is closest to the mean count.
    pub mean_color: String,
    pub most_common: (String, u64),
    /// Colors whose count equals the median count exactly; may be empty.
    pub median_colors: Vec<String>,
    pub mean_frequency: f64,
    pub median_frequency: f64,
    /// Population variance of the counts.
    pub variance: f64,
    pub prob_red: f64,
    pub frequencies: FrequencyTable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_in_first_seen_order() {
        let table = FrequencyTable::from_tokens(["blue", "red", "blue", "green", "red", "blue"]);

        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![("blue", 3), ("red", 2), ("green", 1)]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("red"), Some(2));
        assert_eq!(table.get("pink"), None);
    }

    #[test]
    fn test_total_matches_token_count() {
        let tokens = vec!["a", "b", "a", "", "c", "", "a"];
        let table = FrequencyTable::from_tokens(&tokens);

        assert_eq!(table.total(), tokens.len() as u64);
    }

    #[test]
    fn test_empty_table() {
        let table = FrequencyTable::from_tokens(Vec::<String>::new());
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }
}
