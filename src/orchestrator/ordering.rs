/*!
 * Ordering and assembly of rewritten transcripts.
 *
 * Names that both contain digits are ordered by the value of their first
 * digit run (`part2` before `part10`); any other pair falls back to a
 * root-locale collation of the full names (`écho` before `fin`, `talk`
 * before `Talk`). The two branches do not
 * form a total order for mixed sets, so sorting uses a stable insertion
 * sort that never relies on transitivity.
 */

use icu_collator::{Collator, CollatorOptions};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;

/// Separator appended after every document, including the last one
pub const SEPARATOR: &str = "\n\n---\n\n";

/// File name suffixes that mark a transcript (case-sensitive)
pub const TRANSCRIPT_EXTENSIONS: [&str; 3] = [".txt", ".text", ".transcript"];

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("valid digit regex"));

thread_local! {
    // Root locale, tertiary strength
    static ROOT_COLLATOR: Option<Collator> =
        Collator::try_new(&Default::default(), CollatorOptions::new()).ok();
}

/// Whether a file name ends in one of the transcript extensions
pub fn is_transcript_name(name: &str) -> bool {
    TRANSCRIPT_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// The first maximal run of ASCII digits in a name
pub fn first_digit_run(name: &str) -> Option<&str> {
    DIGIT_RUN.find(name).map(|m| m.as_str())
}

// Numeric comparison of two digit strings of any length
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn compare_lexically(a: &str, b: &str) -> Ordering {
    ROOT_COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => a.cmp(b),
    })
}

/// Compare two file names with the numeric-then-lexical policy
pub fn compare_names(a: &str, b: &str) -> Ordering {
    match (first_digit_run(a), first_digit_run(b)) {
        (Some(a_digits), Some(b_digits)) => compare_digit_runs(a_digits, b_digits),
        _ => compare_lexically(a, b),
    }
}

/// Stable insertion sort by file name
///
/// Each element moves left past every predecessor that compares strictly
/// greater, so equal keys keep their original order.
pub fn sort_by_name<T, F>(items: &mut [T], name_of: F)
where
    F: Fn(&T) -> &str,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare_names(name_of(&items[j - 1]), name_of(&items[j])) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Concatenate documents, each followed by the separator
pub fn assemble<'a, I>(documents: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut output = String::new();
    for document in documents {
        output.push_str(document);
        output.push_str(SEPARATOR);
    }
    output
}
