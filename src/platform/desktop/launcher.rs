use std::path::Path;

/// Opens `path` in the default application, fire-and-forget.
///
/// Returns whether the launch succeeded; a failure is only logged.
pub fn open_document(path: &Path) -> bool {
    match open::that_detached(path) {
        Ok(()) => {
            log::info!("document opened: {}", path.display());
            true
        }
        Err(err) => {
            log::warn!(
                "could not open the document automatically ({err}), open it manually: {}",
                path.display()
            );
            false
        }
    }
}
