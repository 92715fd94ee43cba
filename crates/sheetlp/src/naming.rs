/// Display name of the variable at `index`: `a`, `b`, ..., `z`, `aa`, `ab`, ...
///
/// Uses bijective base-26 like spreadsheet column labels, so every index
/// maps to exactly one name and names never repeat.
pub fn variable_name(index: usize) -> String {
    let mut n = index as u128 + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push((b'a' + (n % 26) as u8) as char);
        n /= 26;
    }
    letters.iter().rev().collect()
}

/// Names for the first `count` variables, in index order
pub fn variable_names(count: usize) -> Vec<String> {
    (0..count).map(variable_name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_letters() {
        assert_eq!(variable_name(0), "a");
        assert_eq!(variable_name(1), "b");
        assert_eq!(variable_name(25), "z");
    }

    #[test]
    fn test_multiple_letters() {
        assert_eq!(variable_name(26), "aa");
        assert_eq!(variable_name(27), "ab");
        assert_eq!(variable_name(51), "az");
        assert_eq!(variable_name(52), "ba");
        assert_eq!(variable_name(701), "zz");
        assert_eq!(variable_name(702), "aaa");
    }

    #[test]
    fn test_names_are_unique() {
        let names = variable_names(2000);
        let unique: std::collections::HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn test_largest_index() {
        let name = variable_name(usize::MAX);
        assert!(!name.is_empty());
        assert!(name.chars().all(|c| c.is_ascii_lowercase()));
    }
}
