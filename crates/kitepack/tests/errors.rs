mod common;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
  time::{Duration, Instant},
};

use common::{bundler, options, project, SleepTransform};
use kitepack::{Bundler, BuildErrorKind, BundlerOptions, TransformRule, TransformSpec};
use kitepack_fs::{FileSystem, MemoryFileSystem};

fn sleepy_bundler(
  fs: &MemoryFileSystem,
  test: &str,
  delay: Duration,
  options: BundlerOptions,
) -> Bundler {
  Bundler::builder(BundlerOptions {
    rules: Some(vec![TransformRule::new(test, vec![TransformSpec::new("sleep")])]),
    ..options
  })
  .with_fs(fs.clone())
  .with_transform(Arc::new(SleepTransform(delay)))
  .build()
  .unwrap()
}

#[tokio::test]
async fn unresolved_import_reports_module_and_chain() {
  let fs = project(&[("src/index.js", "require('./b');"), ("src/b.js", "require('./missing');")]);
  let err = bundler(&fs, options(&["./src/index.js"])).scan().await.unwrap_err();

  assert_eq!(err.code(), "UNRESOLVED_IMPORT");
  assert_eq!(err.module_id.as_deref(), Some("src/b.js"));
  assert_eq!(err.import_chain, ["src/index.js", "./b"]);
  let BuildErrorKind::Resolve(resolve) = &err.kind else {
    panic!("unexpected error: {err}");
  };
  assert_eq!(resolve.specifier, "./missing");
  assert_eq!(resolve.from_dir, PathBuf::from("/project/src"));
  assert_eq!(resolve.searched_paths[0], PathBuf::from("/project/src/missing"));
  assert!(resolve.searched_paths.contains(&PathBuf::from("/project/src/missing.js")));
}

#[tokio::test]
async fn earliest_failure_in_discovery_order_wins() {
  let fs = project(&[
    ("src/index.js", "require('./a');\nrequire('./b');\n"),
    ("src/a.js", "require('./missing-a');"),
    ("src/b.js", "require('./missing-b');"),
  ]);
  // `a` fails last in time but first in discovery order.
  let bundler =
    sleepy_bundler(&fs, r"/a\.js$", Duration::from_millis(200), options(&["./src/index.js"]));
  let err = bundler.scan().await.unwrap_err();

  assert_eq!(err.module_id.as_deref(), Some("src/a.js"));
  assert_eq!(err.import_chain, ["src/index.js", "./a"]);
  assert!(err.to_string().contains("./missing-a"));
}

#[tokio::test]
async fn failures_in_later_entries_lose_to_earlier_entries() {
  let fs = project(&[
    ("src/first.js", "require('./slow');"),
    ("src/slow.js", "require('./gone');"),
    ("src/second.js", "require('./gone-too');"),
  ]);
  let bundler = sleepy_bundler(
    &fs,
    r"slow\.js$",
    Duration::from_millis(150),
    options(&["./src/first.js", "./src/second.js"]),
  );
  let err = bundler.scan().await.unwrap_err();
  assert_eq!(err.module_id.as_deref(), Some("src/slow.js"));
  assert_eq!(err.import_chain, ["src/first.js", "./slow"]);
}

#[tokio::test]
async fn failed_build_does_not_wait_for_later_modules() {
  let fs = project(&[
    ("src/index.js", "require('./a');\nrequire('./b');\n"),
    ("src/a.js", "require('./missing');"),
    ("src/b.js", ""),
  ]);
  let bundler = sleepy_bundler(
    &fs,
    r"/b\.js$",
    Duration::from_millis(1000),
    BundlerOptions { max_parallel_tasks: Some(4), ..options(&["./src/index.js"]) },
  );

  let started = Instant::now();
  let err = bundler.scan().await.unwrap_err();
  assert!(started.elapsed() < Duration::from_millis(800), "took {:?}", started.elapsed());
  assert_eq!(err.module_id.as_deref(), Some("src/a.js"));
}

#[tokio::test]
async fn binary_module_without_a_rule_is_rejected() {
  let fs = project(&[("src/index.js", "require('./data.bin');")]);
  fs.write(Path::new("/project/src/data.bin"), &[0xff, 0xfe, 0x00]).unwrap();

  let err = bundler(&fs, options(&["./src/index.js"])).scan().await.unwrap_err();
  assert_eq!(err.code(), "LOAD_FAILED");
  assert_eq!(err.module_id.as_deref(), Some("src/data.bin"));
  assert!(err.to_string().contains("not valid UTF-8"), "{err}");
}

#[tokio::test]
async fn unresolved_entry() {
  let fs = project(&[("src/index.js", "")]);
  let err = bundler(&fs, options(&["./src/nope.js"])).scan().await.unwrap_err();
  assert_eq!(err.code(), "UNRESOLVED_ENTRY");
  assert!(matches!(err.kind, BuildErrorKind::UnresolvedEntry(_)));
}

#[tokio::test]
async fn missing_input_is_an_invalid_option() {
  let Err(err) = Bundler::builder(BundlerOptions::default()).build() else {
    panic!("a bundler without input must be rejected");
  };
  assert_eq!(err.code(), "INVALID_OPTION");
}

#[tokio::test]
async fn unknown_transform_is_an_invalid_option() {
  let result = Bundler::builder(BundlerOptions {
    rules: Some(vec![TransformRule::new(r"\.js$", vec![TransformSpec::new("nope")])]),
    ..options(&["./src/index.js"])
  })
  .build();
  let Err(err) = result else {
    panic!("unknown transforms must be rejected");
  };
  assert_eq!(err.code(), "INVALID_OPTION");
  assert!(err.to_string().contains("\"nope\""));
}

#[tokio::test]
async fn overlapping_gated_rules_conflict() {
  let fs = project(&[("src/index.js", "")]);
  let rule = |name: &str, include: &str| {
    TransformRule::new(r"\.js$", vec![TransformSpec::new("raw")])
      .with_name(name)
      .with_include(vec![include.to_string()])
  };
  let bundler = bundler(
    &fs,
    BundlerOptions {
      rules: Some(vec![rule("app", "/src/"), rule("entry", "index")]),
      ..options(&["./src/index.js"])
    },
  );
  let err = bundler.scan().await.unwrap_err();

  assert_eq!(err.code(), "RULE_CONFLICT");
  assert_eq!(err.module_id.as_deref(), Some("src/index.js"));
  let BuildErrorKind::RuleConflict(conflict) = &err.kind else {
    panic!("unexpected error: {err}");
  };
  assert_eq!((conflict.first.as_str(), conflict.second.as_str()), ("app", "entry"));
}

#[tokio::test]
async fn slow_modules_time_out() {
  let fs = project(&[("src/index.js", "")]);
  let bundler = sleepy_bundler(
    &fs,
    r"index\.js$",
    Duration::from_millis(300),
    BundlerOptions { module_timeout_ms: Some(50), ..options(&["./src/index.js"]) },
  );
  let err = bundler.scan().await.unwrap_err();
  assert_eq!(err.code(), "MODULE_TIMEOUT");
  let BuildErrorKind::Timeout { elapsed } = err.kind else {
    panic!("unexpected error: {err}");
  };
  assert_eq!(elapsed, Duration::from_millis(50));
}

#[tokio::test]
async fn abort_before_build() {
  let fs = project(&[("src/index.js", "")]);
  let bundler = bundler(&fs, options(&["./src/index.js"]));
  bundler.abort_handle().cancel();
  let err = bundler.generate().await.unwrap_err();
  assert_eq!(err.code(), "ABORTED");
}

#[tokio::test]
async fn abort_during_build() {
  let fs = project(&[("src/index.js", "require('./slow');"), ("src/slow.js", "")]);
  let bundler =
    sleepy_bundler(&fs, r"slow\.js$", Duration::from_millis(300), options(&["./src/index.js"]));

  let abort_handle = bundler.abort_handle();
  tokio::spawn(async move {
    tokio::time::sleep(Duration::from_millis(20)).await;
    abort_handle.cancel();
  });

  let err = bundler.write().await.unwrap_err();
  assert_eq!(err.code(), "ABORTED");
  assert!(!fs.is_dir(Path::new("/project/dist")));
}
