use std::{collections::HashMap, path::PathBuf, sync::RwLock};

use crate::span::SourceId;

/// The Source Engine manages a relationship between file paths and their
/// corresponding integer-based source IDs, so that spans can carry a compact
/// handle instead of a path. It also maintains the reverse map, tracing a
/// source ID back to its original file path.
/// Its internal structures are secured by the RwLock mechanism, which allows
/// its functions to be invoked using a straightforward non-mutable reference,
/// ensuring safe concurrent access.
#[derive(Debug, Default)]
pub struct SourceEngine {
    next_id: RwLock<u32>,
    source_map: RwLock<HashMap<PathBuf, SourceId>>,
    path_map: RwLock<HashMap<SourceId, PathBuf>>,
}

impl SourceEngine {
    /// Retrieves the source ID for a provided path. If an ID already exists
    /// for the given path, that existing ID is returned; otherwise a new one
    /// is created.
    pub fn get_source_id(&self, path: &PathBuf) -> SourceId {
        {
            let source_map = self.source_map.read().unwrap();
            if let Some(id) = source_map.get(path) {
                return *id;
            }
        }

        let mut next_id = self.next_id.write().unwrap();
        let source_id = SourceId { id: *next_id };
        *next_id += 1;

        let mut source_map = self.source_map.write().unwrap();
        source_map.insert(path.clone(), source_id);

        let mut path_map = self.path_map.write().unwrap();
        path_map.insert(source_id, path.clone());

        source_id
    }

    /// The file path corresponding to a specified source ID, if the ID was
    /// minted by this engine.
    pub fn get_path(&self, source_id: &SourceId) -> Option<PathBuf> {
        self.path_map.read().unwrap().get(source_id).cloned()
    }
}
