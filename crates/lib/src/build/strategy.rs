//! Detection and materialization for each [`Strategy`].
//!
//! Detection only looks; materialization writes `<out>/dist-types/index.d.ts`.

use std::path::{Path, PathBuf};

use serde_json::json;
use tracing::debug;

use crate::build::compiler::{compiler_bin, emit_declarations};
use crate::build::{BuildContext, BuildError, DeclarationSource, Strategy};
use crate::consts::{DECLARATION_FILE, INFERENCE_EXPORT, INFERRED_MODULE_NAME, MANIFEST_FILE, NODE_MODULES};
use crate::host::{ExportCheck, ModuleHost};
use crate::manifest::PackageManifest;
use crate::platform::Probe;
use crate::toolchain;
use crate::util::fs::{copy_file, write_atomic};

impl Strategy {
  /// Look for this strategy's source without writing anything.
  pub async fn detect(
    &self,
    cx: &BuildContext<'_>,
    probe: &dyn Probe,
    host: &dyn ModuleHost,
  ) -> Option<DeclarationSource> {
    match self {
      Strategy::RootDeclaration => hand_written(cx.cwd.join(DECLARATION_FILE), probe),
      Strategy::SrcDeclaration => hand_written(cx.cwd.join("src").join(DECLARATION_FILE), probe),
      Strategy::LocalCompiler => {
        let program = compiler_bin(&cx.cwd);
        let project = cx.cwd.join("tsconfig.json");
        (probe.exists(&program) && probe.exists(&project)).then_some(DeclarationSource::Compiler { program, project })
      }
      Strategy::PublishedTypes => {
        let Some(name) = cx.manifest.name() else {
          debug!("manifest has no name, skipping published types");
          return None;
        };
        let dir = published_candidates(&cx.cwd, name)
          .into_iter()
          .find(|dir| probe.exists(dir))?;
        let entry = published_entry(&dir);
        Some(DeclarationSource::Published { dir, entry })
      }
      Strategy::Inference => {
        // The first toolchain that loads decides; ones that fail to load are skipped.
        for toolchain in toolchain::candidates(&cx.cwd, probe) {
          match host.check_export(&toolchain, INFERENCE_EXPORT).await {
            ExportCheck::Exported => {
              return Some(DeclarationSource::Inferred {
                toolchain,
                entry: cx.node_entry(),
              });
            }
            ExportCheck::Missing => {
              debug!(toolchain = ?toolchain.dir, "toolchain cannot infer declarations");
              return None;
            }
            ExportCheck::LoadFailed => {
              debug!(toolchain = ?toolchain.dir, source = %toolchain.source, "toolchain failed to load, trying next");
            }
          }
        }
        None
      }
    }
  }
}

impl DeclarationSource {
  /// Write the declaration file for this source.
  pub async fn materialize(&self, cx: &BuildContext<'_>, host: &dyn ModuleHost) -> Result<(), BuildError> {
    let target = cx.target();

    match self {
      DeclarationSource::HandWritten { path } => {
        copy_file(path, &target).await?;
      }
      DeclarationSource::Compiler { program, .. } => {
        emit_declarations(program, &cx.cwd, &cx.out).await?;
      }
      DeclarationSource::Published { dir, entry } => {
        let entry = entry
          .as_ref()
          .ok_or_else(|| BuildError::PublishedTypesEntry { dir: dir.clone() })?;
        copy_file(entry, &target).await?;
      }
      DeclarationSource::Inferred { toolchain, entry } => {
        cx.reporter.warning(&format!(
          "dist-types/: no declarations found, inferring them from {}",
          entry.display()
        ));
        let text = host.generate(toolchain, INFERRED_MODULE_NAME, entry, &json!({})).await?;
        write_atomic(&target, text.as_bytes()).await?;
      }
    }

    Ok(())
  }
}

fn hand_written(path: PathBuf, probe: &dyn Probe) -> Option<DeclarationSource> {
  probe.exists(&path).then_some(DeclarationSource::HandWritten { path })
}

/// `@types` directories that may hold declarations for `name`.
///
/// Scoped packages are also checked under the `scope__name` spelling used by
/// published declaration packages.
fn published_candidates(cwd: &Path, name: &str) -> Vec<PathBuf> {
  let types_root = cwd.join(NODE_MODULES).join("@types");
  let mut candidates = vec![name.split('/').fold(types_root.clone(), |path, part| path.join(part))];

  if let Some(scoped) = name.strip_prefix('@')
    && let Some((scope, package)) = scoped.split_once('/')
  {
    candidates.push(types_root.join(format!("{}__{}", scope, package)));
  }

  candidates
}

/// The declaration file inside a published types package.
///
/// Uses the package's `types`/`typings` field, falling back to `index.d.ts`.
fn published_entry(dir: &Path) -> Option<PathBuf> {
  if dir.is_file() {
    return Some(dir.to_path_buf());
  }

  let declared = PackageManifest::load(&dir.join(MANIFEST_FILE)).ok().and_then(|m| {
    ["types", "typings"]
      .iter()
      .find_map(|key| m.get(key).and_then(|v| v.as_str()).map(str::to_string))
  });

  if let Some(rel) = declared {
    let path = dir.join(&rel);
    let candidates = [path.clone(), dir.join(format!("{}.d.ts", rel)), path.join(DECLARATION_FILE)];
    if let Some(found) = candidates.into_iter().find(|c| c.is_file()) {
      return Some(found);
    }
  }

  let index = dir.join(DECLARATION_FILE);
  index.is_file().then_some(index)
}
