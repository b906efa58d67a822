//! Phase 6: Collation and Output
//!
//! The last stage of the pipeline. Rendered manifests arrive as a map keyed
//! by component, whose iteration order means nothing; everything the user
//! sees is produced from the component names sorted in ascending order.
//!
//! ## Output modes
//!
//! - **Stream**: [`sort_manifests`] yields one separator-terminated text per
//!   component, ready to be concatenated onto stdout as a YAML stream.
//! - **Directory**: [`write_manifests`] writes `<component>.yaml` files,
//!   creating the directory if needed and overwriting existing files.
//!
//! A failed write is returned as-is. Files written before it stay on disk.

use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use super::operator::ManifestSet;
use crate::config::ComponentName;
use crate::error::{Error, Result};

/// Separator placed between YAML documents.
pub const YAML_SEPARATOR: &str = "\n---\n";

fn sorted_names(manifests: &ManifestSet) -> Vec<ComponentName> {
    let mut names: Vec<ComponentName> = manifests.keys().copied().collect();
    names.sort_by_key(|name| name.as_str());
    names
}

/// Order manifests by component name, each ending with the YAML separator.
///
/// A separator is appended only when the text does not already end with one.
pub fn sort_manifests(manifests: &ManifestSet) -> Vec<String> {
    sorted_names(manifests)
        .into_iter()
        .filter_map(|name| manifests.get(&name))
        .map(|text| {
            if text.ends_with(YAML_SEPARATOR) {
                text.clone()
            } else {
                format!("{}{}", text, YAML_SEPARATOR)
            }
        })
        .collect()
}

/// Write one `<component>.yaml` per manifest into `output_dir`.
///
/// Returns the written paths in component name order.
pub fn write_manifests(manifests: &ManifestSet, output_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir).map_err(|source| Error::Write {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(manifests.len());
    for name in sorted_names(manifests) {
        let Some(text) = manifests.get(&name) else {
            continue;
        };
        let path = output_dir.join(format!("{}.yaml", name));
        fs::write(&path, text).map_err(|source| Error::Write {
            path: path.clone(),
            source,
        })?;
        info!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manifests(entries: &[(ComponentName, &str)]) -> ManifestSet {
        entries
            .iter()
            .map(|(name, text)| (*name, text.to_string()))
            .collect()
    }

    #[test]
    fn test_sort_orders_by_name() {
        let set = manifests(&[
            (ComponentName::Zookeeper, "kind: StatefulSet"),
            (ComponentName::Proxy, "kind: DaemonSet"),
            (ComponentName::Admin, "kind: Deployment"),
        ]);

        let sorted = sort_manifests(&set);

        assert_eq!(
            sorted,
            vec![
                "kind: Deployment\n---\n",
                "kind: DaemonSet\n---\n",
                "kind: StatefulSet\n---\n",
            ]
        );
    }

    #[test]
    fn test_sort_does_not_duplicate_separator() {
        let set = manifests(&[(ComponentName::Admin, "kind: Service\n---\n")]);
        assert_eq!(sort_manifests(&set), vec!["kind: Service\n---\n"]);
    }

    #[test]
    fn test_sort_is_independent_of_insertion_order() {
        let forward = manifests(&[
            (ComponentName::Admin, "a"),
            (ComponentName::Nacos, "n"),
            (ComponentName::Grafana, "g"),
        ]);
        let backward = manifests(&[
            (ComponentName::Grafana, "g"),
            (ComponentName::Nacos, "n"),
            (ComponentName::Admin, "a"),
        ]);
        assert_eq!(sort_manifests(&forward), sort_manifests(&backward));
    }

    #[test]
    fn test_sort_empty() {
        assert!(sort_manifests(&ManifestSet::new()).is_empty());
    }

    #[test]
    fn test_write_creates_directory_and_files() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out").join("manifests");
        let set = manifests(&[
            (ComponentName::Proxy, "kind: DaemonSet"),
            (ComponentName::Admin, "kind: Deployment"),
        ]);

        let written = write_manifests(&set, &output).unwrap();

        assert_eq!(
            written,
            vec![output.join("admin.yaml"), output.join("proxy.yaml")]
        );
        assert_eq!(
            fs::read_to_string(output.join("admin.yaml")).unwrap(),
            "kind: Deployment"
        );
    }

    #[test]
    fn test_write_is_idempotent_and_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("admin.yaml"), "stale").unwrap();
        let set = manifests(&[(ComponentName::Admin, "kind: Deployment")]);

        write_manifests(&set, temp_dir.path()).unwrap();
        write_manifests(&set, temp_dir.path()).unwrap();

        assert_eq!(
            fs::read_to_string(temp_dir.path().join("admin.yaml")).unwrap(),
            "kind: Deployment"
        );
    }

    #[test]
    fn test_write_into_file_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let set = manifests(&[(ComponentName::Admin, "kind: Deployment")]);

        let err = write_manifests(&set, &blocker).unwrap_err();

        assert!(matches!(err, Error::Write { .. }));
    }

    #[test]
    fn test_write_failure_keeps_earlier_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("proxy.yaml")).unwrap();
        let set = manifests(&[
            (ComponentName::Proxy, "kind: DaemonSet"),
            (ComponentName::Admin, "kind: Deployment"),
        ]);

        let err = write_manifests(&set, temp_dir.path()).unwrap_err();

        match err {
            Error::Write { path, .. } => assert_eq!(path, temp_dir.path().join("proxy.yaml")),
            other => panic!("expected write error, got {:?}", other),
        }
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("admin.yaml")).unwrap(),
            "kind: Deployment"
        );
    }
}
