use std::fs;
use std::path::{Path, PathBuf};

use expect_test::expect_file;
use parseva_cst::RawNode;
use parseva_kinds::{Registry, TokenTable};

use crate::{flatten, render};

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct TestCase {
    input: PathBuf,
    expected: PathBuf,
    text: String,
}

impl TestCase {
    fn list(test_data_dir: &Path) -> Vec<Self> {
        let mut cases = fs::read_dir(test_data_dir)
            .unwrap_or_else(|err| {
                panic!("Cannot read directory {}: {err}", test_data_dir.display())
            })
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if path.extension()? == "json" {
                    let expected = path.with_extension("ast");
                    let text = fs::read_to_string(&path).ok()?;
                    Some(Self { input: path, expected, text })
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();

        cases.sort();
        cases
    }
}

fn test_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data")
}

fn java_registry(test_data_dir: &Path) -> Registry {
    let text = fs::read_to_string(test_data_dir.join("java.tokens")).unwrap();
    Registry::build(&TokenTable::parse(&text).unwrap()).unwrap()
}

#[test]
fn flatten_and_render() {
    let test_data_dir = test_data_dir();
    let registry = java_registry(&test_data_dir);
    let test_cases = TestCase::list(&test_data_dir);
    assert!(!test_cases.is_empty());

    for case in test_cases {
        let raw = RawNode::from_json(&case.text)
            .unwrap_or_else(|err| panic!("{}: {err}", case.input.display()));
        let actual = match flatten(&registry, &raw) {
            Ok(tree) => render(&tree),
            Err(err) => format!("error: {err}\n"),
        };
        expect_file![&case.expected].assert_eq(&actual);
    }
}

#[test]
fn trees_flatten_concurrently() {
    let test_data_dir = test_data_dir();
    let registry = java_registry(&test_data_dir);
    let test_cases = TestCase::list(&test_data_dir);
    let trees = test_cases
        .iter()
        .map(|case| RawNode::from_json(&case.text).unwrap())
        .collect::<Vec<_>>();

    let sequential = trees
        .iter()
        .map(|raw| flatten(&registry, raw).map(|tree| render(&tree)))
        .collect::<Vec<_>>();

    let concurrent = std::thread::scope(|scope| {
        let handles = trees
            .iter()
            .map(|raw| {
                let registry = &registry;
                scope.spawn(move || flatten(registry, raw).map(|tree| render(&tree)))
            })
            .collect::<Vec<_>>();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect::<Vec<_>>()
    });

    assert_eq!(sequential, concurrent);
}
