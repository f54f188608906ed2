/*!
 * Tests for transcript ordering and document assembly
 */

use std::cmp::Ordering;
use scribedown::orchestrator::{assemble, compare_names, is_transcript_name, sort_by_name, SEPARATOR};
use scribedown::orchestrator::RewriteResult;

fn result(name: &str) -> RewriteResult {
    RewriteResult {
        file_name: name.to_string(),
        content: format!("# {}", name),
    }
}

#[test]
fn test_sortByName_withNumberedParts_shouldOrderNumerically() {
    let mut results = vec![
        result("part10.txt"),
        result("part2.txt"),
        result("part1.txt"),
    ];

    sort_by_name(&mut results, |r| r.file_name.as_str());

    let names: Vec<&str> = results.iter().map(|r| r.file_name.as_str()).collect();
    assert_eq!(names, vec!["part1.txt", "part2.txt", "part10.txt"]);
}

#[test]
fn test_sortByName_withIntroAndParts_shouldMatchPairwisePolicy() {
    let mut names = vec!["part10.txt", "intro.txt", "part2.txt"];

    sort_by_name(&mut names, |n| *n);

    // "intro" sorts lexically before "part10" and "part2" before "part10" numerically
    assert_eq!(names, vec!["intro.txt", "part2.txt", "part10.txt"]);
}

#[test]
fn test_sortByName_withoutDigits_shouldIgnoreCase() {
    let mut names = vec!["beta.txt", "Alpha.txt", "gamma.txt"];

    sort_by_name(&mut names, |n| *n);

    assert_eq!(names, vec!["Alpha.txt", "beta.txt", "gamma.txt"]);
}

#[test]
fn test_sortByName_withAccentedAndCasedNames_shouldUseLocaleOrder() {
    let mut names = vec!["zoo.txt", "Talk.txt", "fin.txt", "talk.txt", "écho.txt"];

    sort_by_name(&mut names, |n| *n);

    assert_eq!(names, vec!["écho.txt", "fin.txt", "talk.txt", "Talk.txt", "zoo.txt"]);
}

#[test]
fn test_sortByName_withEqualNumbers_shouldKeepEnumerationOrder() {
    let mut names = vec!["b1.txt", "a01.txt", "c001.txt"];

    sort_by_name(&mut names, |n| *n);

    assert_eq!(names, vec!["b1.txt", "a01.txt", "c001.txt"]);
}

#[test]
fn test_compareNames_shouldBeAntisymmetric() {
    let names = ["intro.txt", "part2.txt", "Part10.txt", "outro.text", "007.transcript"];
    for a in names {
        for b in names {
            assert_eq!(compare_names(a, b), compare_names(b, a).reverse(), "{} vs {}", a, b);
        }
    }
    assert_eq!(compare_names("x.txt", "x.txt"), Ordering::Equal);
}

#[test]
fn test_isTranscriptName_shouldRequireExactSuffix() {
    assert!(is_transcript_name("a.txt"));
    assert!(is_transcript_name("notes.v2.transcript"));
    assert!(!is_transcript_name("a.txt.bak"));
    assert!(!is_transcript_name("a.Text"));
}

#[test]
fn test_assemble_shouldTerminateEveryDocumentWithSeparator() {
    let document = assemble(["A", "B"]);
    assert_eq!(document, "A\n\n---\n\nB\n\n---\n\n");
    assert!(document.ends_with(SEPARATOR));
}

#[test]
fn test_assemble_withNoDocuments_shouldBeEmpty() {
    assert_eq!(assemble(Vec::<&str>::new()), "");
}
