use std::fs;
use std::path::Path;
use pretty_assertions::assert_eq;
use tally::{execute, Options, Source};
use walkdir::WalkDir;

fn run_program(path: &Path) -> String {
  let source = Source::read(path).unwrap();
  let mut out = vec![];
  execute(&Options::default(), &source, &mut out)
    .unwrap_or_else(|err| panic!("{}: {}", path.display(), err));
  String::from_utf8(out).unwrap()
}

#[test]
fn golden_programs() {
  let _ = env_logger::builder().is_test(true).try_init();
  let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/programs");
  let mut count = 0;

  for entry in WalkDir::new(&dir).sort_by(|a, b| a.file_name().cmp(b.file_name())) {
    let entry = entry.unwrap();
    let path = entry.path();
    if path.extension().map_or(true, |ext| ext != "tly") {
      continue;
    }

    let expected = fs::read_to_string(path.with_extension("out")).unwrap();
    assert_eq!(run_program(path), expected, "{}", path.display());
    count += 1;
  }

  assert!(count > 0, "no programs under {}", dir.display());
}

#[test]
fn no_run_only_parses() {
  let source = Source {
    name: "t.tly".to_owned(),
    text: "number x; write x;".to_owned(),
  };
  let options = Options {
    no_run: true,
    dump_ast: true,
    ..Default::default()
  };
  let mut out = vec![];
  execute(&options, &source, &mut out).unwrap();

  let out = String::from_utf8(out).unwrap();
  assert!(out.starts_with("Program\n  StatementList\n    Declaration\n"), "{}", out);
  assert!(!out.contains('0'), "{}", out);
}

#[test]
fn token_and_state_dumps() {
  let source = Source {
    name: "t.tly".to_owned(),
    text: "number x;".to_owned(),
  };
  let options = Options {
    no_run: true,
    dump_tokens: true,
    dump_states: true,
    ..Default::default()
  };
  let mut out = vec![];
  execute(&options, &source, &mut out).unwrap();

  let out = String::from_utf8(out).unwrap();
  assert!(out.starts_with("State 0\n  S' -> . Program, $\n"), "{}", out);
  assert!(out.contains("t.tly:1:1 Number \"number\"\n"), "{}", out);
  assert!(out.contains("t.tly:1:8 Identifier \"x\" #0\n"), "{}", out);
}

#[test]
fn missing_file() {
  let err = Source::read(Path::new("tests/programs/does-not-exist.tly")).unwrap_err();
  assert!(matches!(err, tally::Error::Io { .. }));
}
