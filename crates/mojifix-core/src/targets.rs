// crates/mojifix-core/src/targets.rs
//
// Collects the files a normalize pass touches, in processing order:
// root html files, scripts under the pages subtree, the stylesheet,
// then extra scripts. Listed paths may not exist; the caller skips them.
// Unreadable entries under the pages subtree are logged and skipped.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::NormalizeConfig;
use crate::error::{FixError, Result};

pub fn collect_targets(cfg: &NormalizeConfig) -> Result<Vec<PathBuf>> {
    let mut out = files_with_ext(&cfg.root, "html")?;

    let pages = cfg.resolve(&cfg.pages_dir);
    if pages.is_dir() {
        let mut scripts = Vec::new();
        let walk = WalkDir::new(&pages).follow_links(true).into_iter();
        for entry in walk.filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(%err, "skipping unreadable entry under pages");
                None
            }
        }) {
            if entry.file_type().is_file() && has_ext(entry.path(), "js") {
                scripts.push(entry.into_path());
            }
        }
        scripts.sort();
        out.extend(scripts);
    }

    out.push(cfg.stylesheet_path());
    out.extend(cfg.scripts.iter().map(|s| cfg.resolve(s)));

    let mut seen = std::collections::HashSet::new();
    out.retain(|p| seen.insert(p.clone()));
    Ok(out)
}

/// Regular files directly inside `dir` with the given extension, sorted.
pub(crate) fn files_with_ext(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let rd = std::fs::read_dir(dir).map_err(|e| FixError::io(dir, e))?;
    let mut out = Vec::new();
    for entry in rd {
        let entry = entry.map_err(|e| FixError::io(dir, e))?;
        let p = entry.path();
        if p.is_file() && has_ext(&p, ext) {
            out.push(p);
        }
    }
    out.sort();
    Ok(out)
}

fn has_ext(p: &Path, ext: &str) -> bool {
    p.extension().and_then(|e| e.to_str()) == Some(ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn targets_follow_site_layout_order() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("b.html"), "b").unwrap();
        fs::write(root.join("a.html"), "a").unwrap();
        fs::write(root.join("notes.txt"), "n").unwrap();
        fs::create_dir_all(root.join("pages/sub")).unwrap();
        fs::write(root.join("pages/home.js"), "h").unwrap();
        fs::write(root.join("pages/sub/deep.js"), "d").unwrap();
        fs::write(root.join("pages/readme.md"), "r").unwrap();
        fs::write(root.join("pages/nested.html"), "n").unwrap();

        let cfg = NormalizeConfig {
            root: root.to_path_buf(),
            ..Default::default()
        };
        let got = collect_targets(&cfg).unwrap();
        let want = vec![
            root.join("a.html"),
            root.join("b.html"),
            root.join("pages/home.js"),
            root.join("pages/sub/deep.js"),
            root.join("style.css"),
            root.join("script.js"),
        ];
        assert_eq!(got, want);
    }

    #[cfg(unix)]
    #[test]
    fn broken_entries_under_pages_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("pages")).unwrap();
        fs::write(root.join("pages/ok.js"), "ok").unwrap();
        // dangling link: the walk reports an error for this entry
        std::os::unix::fs::symlink(root.join("pages/gone"), root.join("pages/gone.js")).unwrap();

        let cfg = NormalizeConfig {
            root: root.to_path_buf(),
            ..Default::default()
        };
        let got = collect_targets(&cfg).unwrap();
        assert_eq!(
            got,
            vec![root.join("pages/ok.js"), root.join("style.css"), root.join("script.js")]
        );
    }

    #[test]
    fn missing_pages_dir_is_fine_and_duplicates_drop() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = NormalizeConfig {
            root: dir.path().to_path_buf(),
            scripts: vec![PathBuf::from("script.js"), PathBuf::from("script.js")],
            ..Default::default()
        };
        let got = collect_targets(&cfg).unwrap();
        assert_eq!(
            got,
            vec![dir.path().join("style.css"), dir.path().join("script.js")]
        );
    }
}
