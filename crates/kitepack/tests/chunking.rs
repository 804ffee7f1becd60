mod common;

use common::{bundler, options, project};
use kitepack::{BundlerOptions, ChunkIdx, ChunkKind, ChunkingKind};
use kitepack_fs::MemoryFileSystem;

fn shared_project() -> MemoryFileSystem {
  project(&[
    ("src/a.js", "require('./shared');\nrequire('./only-a');\n"),
    ("src/b.js", "require('./shared');\n"),
    ("src/c.js", "require('./shared');\nrequire('./ab');\n"),
    ("src/shared.js", "require('./leaf');\n"),
    ("src/leaf.js", "module.exports = 1;\n"),
    ("src/only-a.js", "require('./ab');\n"),
    ("src/ab.js", "module.exports = 2;\n"),
  ])
}

fn shared_options(threshold: Option<u32>) -> BundlerOptions {
  BundlerOptions {
    chunking: Some(ChunkingKind::Shared),
    shared_threshold: threshold,
    ..options(&["./src/a.js", "./src/b.js", "./src/c.js"])
  }
}

fn stable_ids(graph: &kitepack::ModuleGraph, chunk: &kitepack::Chunk) -> Vec<String> {
  chunk.modules.iter().map(|idx| graph.modules[*idx].stable_id.clone()).collect()
}

#[tokio::test]
async fn shared_modules_are_extracted_once() {
  let fs = shared_project();
  let bundler = bundler(&fs, shared_options(None));
  let graph = bundler.scan().await.unwrap();
  let chunk_graph = bundler.plan(&graph);

  let names = chunk_graph.chunk_table.iter().map(|chunk| chunk.name.as_str()).collect::<Vec<_>>();
  assert_eq!(names, ["a", "b", "c", "shared", "ab"]);

  let a = chunk_graph.chunk_by_name("a").unwrap();
  assert_eq!(stable_ids(&graph, a), ["src/a.js", "src/only-a.js"]);
  assert!(matches!(a.kind, ChunkKind::EntryPoint { bit: 0, .. }));
  assert_eq!(stable_ids(&graph, chunk_graph.chunk_by_name("b").unwrap()), ["src/b.js"]);

  let shared = chunk_graph.chunk_by_name("shared").unwrap();
  assert_eq!(shared.kind, ChunkKind::Common);
  assert_eq!(stable_ids(&graph, shared), ["src/shared.js", "src/leaf.js"]);
  assert_eq!(shared.bits.index_of_one(), [0, 1, 2]);
  assert!(shared.imports.is_empty());

  let ab = chunk_graph.chunk_by_name("ab").unwrap();
  assert_eq!(stable_ids(&graph, ab), ["src/ab.js"]);
  assert_eq!(ab.bits.index_of_one(), [0, 2]);

  let imports_of = |name: &str| {
    chunk_graph
      .chunk_by_name(name)
      .unwrap()
      .imports
      .iter()
      .map(|idx| chunk_graph.chunk_table[*idx].name.to_string())
      .collect::<Vec<_>>()
  };
  assert_eq!(imports_of("a"), ["shared", "ab"]);
  assert_eq!(imports_of("b"), ["shared"]);
  assert_eq!(imports_of("c"), ["shared", "ab"]);

  for chunks in &chunk_graph.module_to_chunks {
    assert_eq!(chunks.len(), 1);
  }
}

#[tokio::test]
async fn modules_below_the_threshold_are_duplicated() {
  let fs = shared_project();
  let bundler = bundler(&fs, shared_options(Some(3)));
  let graph = bundler.scan().await.unwrap();
  let chunk_graph = bundler.plan(&graph);

  let names = chunk_graph.chunk_table.iter().map(|chunk| chunk.name.as_str()).collect::<Vec<_>>();
  assert_eq!(names, ["a", "b", "c", "shared"]);
  assert_eq!(
    stable_ids(&graph, chunk_graph.chunk_by_name("a").unwrap()),
    ["src/a.js", "src/only-a.js", "src/ab.js"]
  );
  let c = chunk_graph.chunk_by_name("c").unwrap();
  assert_eq!(stable_ids(&graph, c), ["src/c.js", "src/ab.js"]);

  let shared_idx = ChunkIdx::from_usize(3);
  assert_eq!(chunk_graph.chunk_table[shared_idx].name.as_str(), "shared");
  for name in ["a", "b", "c"] {
    assert_eq!(chunk_graph.chunk_by_name(name).unwrap().imports, [shared_idx], "{name}");
  }
}

#[tokio::test]
async fn single_strategy_keeps_chunks_self_contained() {
  let fs = shared_project();
  let bundler = bundler(&fs, options(&["./src/a.js", "./src/b.js"]));
  let graph = bundler.scan().await.unwrap();
  let chunk_graph = bundler.plan(&graph);

  assert_eq!(chunk_graph.chunk_table.len(), 2);
  assert_eq!(
    stable_ids(&graph, &chunk_graph.chunk_table[ChunkIdx::from_usize(0)]),
    ["src/a.js", "src/shared.js", "src/leaf.js", "src/only-a.js", "src/ab.js"]
  );
  assert_eq!(
    stable_ids(&graph, &chunk_graph.chunk_table[ChunkIdx::from_usize(1)]),
    ["src/b.js", "src/shared.js", "src/leaf.js"]
  );
  assert!(chunk_graph.chunk_table.iter().all(|chunk| chunk.imports.is_empty()));

  let output = bundler.generate().await.unwrap();
  let filenames =
    output.artifacts.iter().map(|artifact| artifact.filename.as_str()).collect::<Vec<_>>();
  assert_eq!(filenames, ["a.js", "b.js"]);
  assert!(output.artifacts.iter().all(|artifact| artifact.imports.is_empty()));
}

#[tokio::test]
async fn entry_modules_stay_in_their_own_chunk() {
  let fs = project(&[
    ("src/main.js", "require('./admin');\nrequire('./util');\n"),
    ("src/admin.js", "require('./util');\n"),
    ("src/util.js", ""),
  ]);
  let bundler = bundler(
    &fs,
    BundlerOptions {
      chunking: Some(ChunkingKind::Shared),
      ..options(&["./src/main.js", "./src/admin.js"])
    },
  );
  let graph = bundler.scan().await.unwrap();
  let chunk_graph = bundler.plan(&graph);

  let names = chunk_graph.chunk_table.iter().map(|chunk| chunk.name.as_str()).collect::<Vec<_>>();
  assert_eq!(names, ["main", "admin", "util"]);
  assert_eq!(
    stable_ids(&graph, chunk_graph.chunk_by_name("main").unwrap()),
    ["src/main.js", "src/admin.js"]
  );
  assert_eq!(stable_ids(&graph, chunk_graph.chunk_by_name("admin").unwrap()), ["src/admin.js"]);
  assert_eq!(stable_ids(&graph, chunk_graph.chunk_by_name("util").unwrap()), ["src/util.js"]);

  let util_idx = ChunkIdx::from_usize(2);
  assert_eq!(chunk_graph.chunk_table[util_idx].name.as_str(), "util");
  assert_eq!(chunk_graph.chunk_by_name("main").unwrap().imports, [util_idx]);
  assert_eq!(chunk_graph.chunk_by_name("admin").unwrap().imports, [util_idx]);
}

#[tokio::test]
async fn chunk_names_are_unique() {
  let fs = project(&[
    ("src/pages/home/index.js", "require('../../components/button');"),
    ("src/home.js", "require('./components/button');"),
    ("src/components/button/index.js", ""),
  ]);
  let mut bundler_options = BundlerOptions {
    chunking: Some(ChunkingKind::Shared),
    ..options(&["./src/pages/home", "./src/home.js"])
  };
  bundler_options.input.as_mut().unwrap()[1].name = Some("index".to_string());
  let bundler = bundler(&fs, bundler_options);
  let graph = bundler.scan().await.unwrap();
  let chunk_graph = bundler.plan(&graph);

  // Unnamed entries use the file stem, common chunks the directory of an `index` file.
  let names = chunk_graph.chunk_table.iter().map(|chunk| chunk.name.as_str()).collect::<Vec<_>>();
  assert_eq!(names, ["index", "index2", "button"]);
}
