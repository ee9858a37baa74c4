use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use console::style;
use indicatif::ProgressBar;
use structopt::StructOpt;
use suffix_tree::SuffixTree;

/// Built-in texts exercised when no positional text or `-f` file is given,
/// chosen to cover the empty string, long repeats, and overlapping suffixes.
const BUILTIN_TEXTS: &[&str] = &[
    "",
    "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
    "abracadabra",
    "bringst du opi opium bringt opium den opi um",
    "der inder in der inderin drin",
    "bismarck biss mark, bis mark bismarck biss",
];

/// One entry of the input list: either a literal string given on the
/// command line, or the contents of a file named after a preceding `-f`.
enum Input {
    Literal(String),
    File(PathBuf),
}

#[derive(StructOpt)]
#[structopt(
    name = "suffix-tree-cli",
    about = "Builds a suffix tree over each given text and validates it."
)]
struct CliInput {
    /// Texts and/or `-f <path>` file arguments to build trees over.
    /// If none are given, a fixed set of built-in texts is used instead.
    #[structopt(parse(from_os_str), allow_hyphen_values = true)]
    args: Vec<std::ffi::OsString>,
}

fn parse_inputs(raw: &[std::ffi::OsString]) -> Result<Vec<Input>> {
    let mut inputs = Vec::new();
    let mut iter = raw.iter();
    while let Some(arg) = iter.next() {
        if arg == "-f" {
            let path = iter
                .next()
                .context("-f must be followed by a file path")?;
            inputs.push(Input::File(PathBuf::from(path)));
        } else {
            let literal = arg
                .to_str()
                .with_context(|| format!("argument {:?} is not valid UTF-8", arg))?;
            inputs.push(Input::Literal(literal.to_owned()));
        }
    }
    Ok(inputs)
}

fn describe(text: &[u8]) -> String {
    if text.len() <= 50 {
        format!("text {:?}", String::from_utf8_lossy(text))
    } else {
        format!("text of size {}", text.len())
    }
}

fn main() -> Result<()> {
    let args = CliInput::from_args();
    let inputs = parse_inputs(&args.args)?;

    let texts: Vec<Vec<u8>> = if inputs.is_empty() {
        BUILTIN_TEXTS.iter().map(|s| s.as_bytes().to_vec()).collect()
    } else {
        inputs
            .into_iter()
            .map(|input| match input {
                Input::Literal(s) => Ok(s.into_bytes()),
                Input::File(path) => fs::read(&path)
                    .with_context(|| format!("could not read file `{}`", path.display())),
            })
            .collect::<Result<Vec<_>>>()?
    };

    for text in &texts {
        if let Err(err) = test_text(text) {
            eprintln!("Error with {}: {:#}", describe(text), err);
            std::process::exit(1);
        }
    }

    println!("{}", style("All tests successful").green().bold());
    Ok(())
}

fn test_text(text: &[u8]) -> Result<()> {
    println!("Testing {}", describe(text));
    println!("{} Building tree...", style("[1/4]").bold().dim());
    let mut tree = SuffixTree::new();
    tree.set_text(text.to_vec())
        .context("building suffix tree failed")?;

    println!("{} Testing suffixes...", style("[2/4]").bold().dim());
    test_suffixes(&tree)?;

    println!("{} Testing substrings...", style("[3/4]").bold().dim());
    test_substrings(&tree)?;

    println!("{} Testing non-contained substrings and suffix links...", style("[4/4]").bold().dim());
    test_not_contained(&tree)?;
    test_suffix_links(&tree)?;

    Ok(())
}

fn test_suffixes(tree: &SuffixTree) -> Result<()> {
    let text = tree.get_text();
    for i in 0..text.len() {
        let suffix = &text[i..];
        if !tree.ends_with(suffix) {
            bail!("suffix {:?} not in tree", String::from_utf8_lossy(suffix));
        }
    }
    Ok(())
}

fn test_substrings(tree: &SuffixTree) -> Result<()> {
    let text = tree.get_text().to_vec();
    let total_pairs = (text.len() * (text.len() + 1) / 2) as u64;
    let progress = ProgressBar::new(total_pairs);

    for i in 0..text.len() {
        for j in i + 1..=text.len() {
            let substring = &text[i..j];
            if !tree.contains(substring) {
                bail!(
                    "tree does not contain substring {:?}",
                    String::from_utf8_lossy(substring)
                );
            }

            let mut occurrences = tree.find(substring);
            occurrences.sort_unstable();
            let naive: Vec<usize> = naive_occurrences(&text, substring);
            if occurrences != naive {
                bail!(
                    "substring {:?} occurrences {:?} do not match naive scan {:?}",
                    String::from_utf8_lossy(substring),
                    occurrences,
                    naive
                );
            }
            progress.inc(1);
        }
    }
    progress.finish_and_clear();
    Ok(())
}

fn naive_occurrences(text: &[u8], needle: &[u8]) -> Vec<usize> {
    if needle.is_empty() || needle.len() > text.len() {
        return Vec::new();
    }
    (0..=text.len() - needle.len())
        .filter(|&i| &text[i..i + needle.len()] == needle)
        .collect()
}

fn test_not_contained(tree: &SuffixTree) -> Result<()> {
    const CANDIDATES: &[&[u8]] = &[b"zoeglfrex", b"kraxlburg", b"qvnts"];
    let text = tree.get_text();
    for &substring in CANDIDATES {
        let naively_found = !naive_occurrences(text, substring).is_empty();
        let tree_found = !tree.find(substring).is_empty();
        if naively_found != tree_found {
            bail!(
                "string {:?} found in tree: {}, found by naive scan: {}",
                String::from_utf8_lossy(substring),
                tree_found,
                naively_found
            );
        }
    }
    Ok(())
}

fn test_suffix_links(tree: &SuffixTree) -> Result<()> {
    tree.check_suffix_links().context("suffix link validation failed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn parses_literal_and_file_arguments() {
        let raw: Vec<std::ffi::OsString> = vec!["abc".into(), "-f".into(), "some/path".into()];
        let inputs = parse_inputs(&raw).unwrap();
        assert_eq!(inputs.len(), 2);
        assert!(matches!(inputs[0], Input::Literal(ref s) if s == "abc"));
        assert!(matches!(inputs[1], Input::File(ref p) if p == &PathBuf::from("some/path")));
    }

    #[test]
    fn dash_f_without_a_following_path_is_an_error() {
        let raw: Vec<std::ffi::OsString> = vec!["-f".into()];
        assert!(parse_inputs(&raw).is_err());
    }

    #[test]
    fn builtin_texts_all_pass_the_full_harness() {
        for text in BUILTIN_TEXTS {
            test_text(text.as_bytes()).unwrap();
        }
    }

    #[quickcheck]
    fn naive_occurrences_matches_tree_find(haystack: Vec<u8>, needle: Vec<u8>) -> bool {
        let haystack: Vec<u8> = haystack.into_iter().filter(|&b| b != suffix_tree::DEFAULT_END_MARKER).collect();
        let needle: Vec<u8> = needle.into_iter().filter(|&b| b != suffix_tree::DEFAULT_END_MARKER).collect();
        if needle.is_empty() {
            return true;
        }
        let mut tree = SuffixTree::new();
        if tree.set_text(haystack.clone()).is_err() {
            return true;
        }
        let mut occurrences = tree.find(&needle);
        occurrences.sort_unstable();
        occurrences == naive_occurrences(&haystack, &needle)
    }
}
