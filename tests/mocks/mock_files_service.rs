use async_trait::async_trait;
use groupware_client::clients::{FilesApi, RemoteFile};
use groupware_client::error::{ApiResult, GroupwareApiError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory stand-in for the remote file-storage service.
///
/// Root files live directly in the store; folder-scoped files are grouped
/// under their folder name. An unknown folder name raises the service's
/// not-found error, matching the behavior the facade propagates.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockFilesService {
    files: Arc<Mutex<HashMap<String, (RemoteFile, Vec<u8>)>>>,
    folders: Arc<Mutex<HashMap<String, Vec<String>>>>,
    next_id: Arc<Mutex<usize>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockFilesService {
    pub fn new() -> Self {
        Self {
            files: Arc::new(Mutex::new(HashMap::new())),
            folders: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(Mutex::new(1)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Create a folder containing the given file identifiers.
    pub fn add_folder(&self, name: &str, file_ids: Vec<String>) {
        let mut folders = self.folders.lock().unwrap();
        folders.insert(name.to_string(), file_ids);
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    fn assign_id(&self) -> String {
        let mut next = self.next_id.lock().unwrap();
        let id = format!("file-{}", *next);
        *next += 1;
        id
    }
}

impl Default for MockFilesService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FilesApi for MockFilesService {
    async fn list_files(&self) -> ApiResult<Vec<RemoteFile>> {
        self.track_call("list_files");

        let files = self.files.lock().unwrap();
        let folders = self.folders.lock().unwrap();
        let foldered: Vec<&String> = folders.values().flatten().collect();

        let mut root: Vec<RemoteFile> = files
            .iter()
            .filter(|(id, _)| !foldered.contains(id))
            .map(|(_, (file, _))| file.clone())
            .collect();
        root.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(root)
    }

    async fn list_folder(&self, folder_name: &str) -> ApiResult<Vec<RemoteFile>> {
        self.track_call("list_folder");

        let folders = self.folders.lock().unwrap();
        let ids = folders.get(folder_name).ok_or_else(|| {
            GroupwareApiError::NotFound(format!("Folder {} not found", folder_name))
        })?;

        let files = self.files.lock().unwrap();
        let mut listed = Vec::new();
        for id in ids {
            if let Some((file, _)) = files.get(id) {
                listed.push(file.clone());
            }
        }
        Ok(listed)
    }

    async fn get_file(&self, file_id: &str) -> ApiResult<RemoteFile> {
        self.track_call("get_file");

        let files = self.files.lock().unwrap();
        files
            .get(file_id)
            .map(|(file, _)| file.clone())
            .ok_or_else(|| GroupwareApiError::NotFound(format!("File {} not found", file_id)))
    }

    async fn create_file(
        &self,
        name: &str,
        overwrite: bool,
        content: &[u8],
    ) -> ApiResult<RemoteFile> {
        self.track_call("create_file");

        let mut files = self.files.lock().unwrap();

        if let Some(existing) = files
            .values()
            .map(|(file, _)| file.clone())
            .find(|file| file.name == name)
        {
            if !overwrite {
                return Err(GroupwareApiError::ApiError {
                    status: 409,
                    message: format!("File {} already exists", name),
                });
            }
            files.insert(existing.id.clone(), (existing.clone(), content.to_vec()));
            return Ok(existing);
        }

        let file = RemoteFile {
            id: self.assign_id(),
            name: name.to_string(),
        };
        files.insert(file.id.clone(), (file.clone(), content.to_vec()));
        Ok(file)
    }

    async fn update_metadata(&self, file_id: &str, name: &str) -> ApiResult<()> {
        self.track_call("update_metadata");

        let mut files = self.files.lock().unwrap();
        let (file, _) = files
            .get_mut(file_id)
            .ok_or_else(|| GroupwareApiError::NotFound(format!("File {} not found", file_id)))?;

        file.name = name.to_string();
        Ok(())
    }

    async fn update_content(&self, file_id: &str, content: &[u8]) -> ApiResult<()> {
        self.track_call("update_content");

        let mut files = self.files.lock().unwrap();
        let (_, stored) = files
            .get_mut(file_id)
            .ok_or_else(|| GroupwareApiError::NotFound(format!("File {} not found", file_id)))?;

        *stored = content.to_vec();
        Ok(())
    }

    async fn delete_file(&self, file_id: &str) -> ApiResult<()> {
        self.track_call("delete_file");

        let mut files = self.files.lock().unwrap();
        if files.remove(file_id).is_none() {
            return Err(GroupwareApiError::NotFound(format!(
                "File {} not found",
                file_id
            )));
        }

        let mut folders = self.folders.lock().unwrap();
        for ids in folders.values_mut() {
            ids.retain(|id| id != file_id);
        }
        Ok(())
    }

    async fn download(&self, file_id: &str) -> ApiResult<Vec<u8>> {
        self.track_call("download");

        let files = self.files.lock().unwrap();
        files
            .get(file_id)
            .map(|(_, content)| content.clone())
            .ok_or_else(|| GroupwareApiError::NotFound(format!("File {} not found", file_id)))
    }
}
