// crates/mojifix-cli/src/io/status.rs
//
// Human readable status lines for stdout. Free-form, one per event.

use std::path::{Path, PathBuf};

use mojifix_core::normalize::Event;
use mojifix_core::reencode::ReencodeEvent;
use mojifix_core::FixError;

/// The line already names the file; path-carrying errors show only their cause.
fn detail(error: &FixError) -> String {
    match error {
        FixError::Io { source, .. } => source.to_string(),
        FixError::NotUtf8 { .. } => "not valid UTF-8".to_string(),
        other => other.to_string(),
    }
}

/// Paths are shown relative to the site root when they live under it.
fn shown(root: &Path, p: &Path) -> PathBuf {
    p.strip_prefix(root).unwrap_or(p).to_path_buf()
}

pub fn normalize_line(root: &Path, ev: &Event<'_>) -> Option<String> {
    let line = match ev {
        Event::Targeting { count } => format!("Targeting {count} files for encoding fix..."),
        Event::Skipped { .. } => return None,
        Event::Decoded { path, encoding } => {
            format!("  [OK] Decoded {} as {encoding}", shown(root, path).display())
        }
        Event::Fixed { path } => format!("  [SUCCESS] Fixed {}", shown(root, path).display()),
        Event::Undecodable { path } => {
            format!("  [ERROR] Could not decode {}", shown(root, path).display())
        }
        Event::Failed { path, error } => format!(
            "  [FATAL] Error processing {}: {}",
            shown(root, path).display(),
            detail(error)
        ),
        Event::StylesheetPatched { path } => format!(
            "  [PATCHED] Added emergency layout fixes to {}",
            shown(root, path).display()
        ),
        Event::StylesheetFailed { path, error } => format!(
            "  [FATAL] Error patching {}: {}",
            shown(root, path).display(),
            detail(error)
        ),
    };
    Some(line)
}

pub fn reencode_line(ev: &ReencodeEvent<'_>) -> String {
    match ev {
        ReencodeEvent::Fixed { path } => format!("Fixed: {}", file_name(path)),
        ReencodeEvent::Undecodable { path, encoding } => {
            format!("Failed {}: not valid {encoding}", file_name(path))
        }
        ReencodeEvent::Failed { path, error } => {
            format!("Failed {}: {}", file_name(path), detail(error))
        }
    }
}

fn file_name(p: &Path) -> String {
    p.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| p.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mojifix_core::Candidate;

    #[test]
    fn normalize_lines_use_root_relative_paths() {
        let root = Path::new("/site");
        let p = Path::new("/site/pages/home.js");
        assert_eq!(
            normalize_line(root, &Event::Decoded { path: p, encoding: Candidate::Cp949 }).unwrap(),
            "  [OK] Decoded pages/home.js as cp949"
        );
        assert_eq!(
            normalize_line(root, &Event::Fixed { path: p }).unwrap(),
            "  [SUCCESS] Fixed pages/home.js"
        );
        assert_eq!(
            normalize_line(root, &Event::Targeting { count: 3 }).unwrap(),
            "Targeting 3 files for encoding fix..."
        );
        assert!(normalize_line(root, &Event::Skipped { path: p }).is_none());
    }

    #[test]
    fn fatal_lines_name_the_path_once() {
        let root = Path::new("/site");
        let p = Path::new("/site/script.js");
        let error = FixError::Io {
            path: p.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let line = normalize_line(root, &Event::Failed { path: p, error: &error }).unwrap();
        assert_eq!(line, "  [FATAL] Error processing script.js: denied");
        assert_eq!(
            reencode_line(&ReencodeEvent::Failed { path: p, error: &error }),
            "Failed script.js: denied"
        );

        let not_utf8 = FixError::NotUtf8 { path: p.to_path_buf() };
        let line = normalize_line(root, &Event::StylesheetFailed { path: p, error: &not_utf8 }).unwrap();
        assert_eq!(line, "  [FATAL] Error patching script.js: not valid UTF-8");
    }

    #[test]
    fn reencode_lines_show_file_names() {
        let p = Path::new("/www/index.html");
        assert_eq!(reencode_line(&ReencodeEvent::Fixed { path: p }), "Fixed: index.html");
        assert_eq!(
            reencode_line(&ReencodeEvent::Undecodable {
                path: p,
                encoding: Candidate::Cp949
            }),
            "Failed index.html: not valid cp949"
        );
    }
}
