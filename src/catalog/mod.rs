use crate::backend::BootStore;
use crate::error::{BackendError, Operation};
use crate::model::BootEntry;
use log::info;
use regex::Regex;
use std::sync::LazyLock;

pub mod classify;
pub mod lexer;
pub mod parser;

pub use parser::parse_entries;

/// Text bcdedit prints instead of records when it fails, sometimes with status 0.
pub const ERROR_MARKERS: &[&str] = &[r"^\s*an error occurred", r"could not be opened"];

static ERRORS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    ERROR_MARKERS
        .iter()
        .map(|m| Regex::new(&format!("(?im){}", m)).expect("valid error marker"))
        .collect()
});

pub fn has_error_marker(text: &str) -> bool {
    ERRORS.iter().any(|re| re.is_match(text))
}

/// Asks the store for every record and keeps the bootable ones, in emission order.
pub fn list_bootable_entries(store: &dyn BootStore) -> Result<Vec<BootEntry>, BackendError> {
    let output = store.enumerate().map_err(|source| BackendError::Spawn {
        operation: Operation::Enumerate,
        source,
    })?;

    if !output.success() || has_error_marker(&output.text) {
        return Err(BackendError::Rejected {
            operation: Operation::Enumerate,
            status: output.status,
            output: output.text,
        });
    }

    let entries = parse_entries(&output.text);
    info!("Catalog: found {} bootable entries", entries.len());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{failed, ok, FakeStore, DUAL_BOOT};

    #[test]
    fn lists_entries_from_store() {
        let store = FakeStore::new(vec![ok(DUAL_BOOT)]);
        let entries = list_bootable_entries(&store).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(store.enumerate_calls.get(), 1);
    }

    #[test]
    fn non_zero_status_is_rejected() {
        let store = FakeStore::new(vec![failed(1, "Access is denied.")]);
        let err = list_bootable_entries(&store).unwrap_err();
        match err {
            BackendError::Rejected { operation, status, output } => {
                assert_eq!(operation, Operation::Enumerate);
                assert_eq!(status, Some(1));
                assert_eq!(output, "Access is denied.");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn in_band_marker_is_rejected_even_with_zero_status() {
        let text = "The boot configuration data store could not be opened.\nThe requested system device cannot be found.\n";
        let store = FakeStore::new(vec![ok(text)]);
        assert!(matches!(
            list_bootable_entries(&store),
            Err(BackendError::Rejected { status: Some(0), .. })
        ));
    }

    #[test]
    fn missing_tool_is_a_spawn_error() {
        let store = FakeStore::new(vec![]);
        assert!(matches!(
            list_bootable_entries(&store),
            Err(BackendError::Spawn { operation: Operation::Enumerate, .. })
        ));
    }

    #[test]
    fn descriptions_mentioning_errors_are_not_markers() {
        assert!(!has_error_marker("description             Error Recovery Tools\n"));
        assert!(has_error_marker("An error occurred while attempting the specified operation.\n"));
    }
}
