//! Levenshtein edit distance over grapheme clusters

use unicode_segmentation::UnicodeSegmentation;

/// Levenshtein distance between two unit sequences.
///
/// Two-row dynamic program: only the previous row is kept, and rows are sized
/// by the shorter input, so space is O(min(|a|, |b|)).
pub fn levenshtein<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return long.len();
    }

    // prev[j] = distance(long[..i], short[..j])
    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr = vec![0usize; short.len() + 1];

    for (i, l) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, s) in short.iter().enumerate() {
            let substitution = prev[j] + usize::from(l != s);
            let deletion = prev[j + 1] + 1;
            let insertion = curr[j] + 1;
            curr[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

/// Number of extended grapheme clusters in `text`.
#[inline]
pub fn text_len(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Minimum number of single-grapheme insertions, deletions and substitutions
/// turning `a` into `b`.
pub fn edit_distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a: Vec<&str> = a.graphemes(true).collect();
    let b: Vec<&str> = b.graphemes(true).collect();

    // Common prefix and suffix never contribute edits
    let prefix = a.iter().zip(&b).take_while(|(x, y)| x == y).count();
    let (a, b) = (&a[prefix..], &b[prefix..]);
    let suffix = a
        .iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count();

    levenshtein(&a[..a.len() - suffix], &b[..b.len() - suffix])
}

/// Edit distance of two phrases taken whole, without tokenization.
#[inline]
pub fn phrase_distance(phrase_a: &str, phrase_b: &str) -> usize {
    edit_distance(phrase_a, phrase_b)
}
