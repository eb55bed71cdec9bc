use crate::domain::video::VideoId;
use crate::ports::storage::{DataReader, StorageError, VideoDataPort};
use async_trait::async_trait;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

/// Suffix source for in-flight upload files
static UPLOAD_SEQ: AtomicU64 = AtomicU64::new(0);

/// Stores each video's payload as `<dir>/video<id>.mpg`.
///
/// Uploads stream into their own `video<id>.mpg.<n>.part` file and are renamed
/// into place once complete; with concurrent uploads to one video the last
/// completed one wins.
#[derive(Debug, Clone)]
pub struct FsVideoData {
    dir: PathBuf,
}

impl FsVideoData {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        if !path_is_valid(&dir) {
            return Err(StorageError::InvalidPath(dir.display().to_string()));
        }
        Ok(Self { dir })
    }

    pub fn data_path(&self, id: VideoId) -> PathBuf {
        self.dir.join(format!("video{}.mpg", id))
    }

    fn partial_path(&self, id: VideoId) -> PathBuf {
        let seq = UPLOAD_SEQ.fetch_add(1, Ordering::Relaxed);
        self.dir.join(format!("video{}.mpg.{}.part", id, seq))
    }
}

#[async_trait]
impl VideoDataPort for FsVideoData {
    async fn save_data(&self, id: VideoId, mut data: DataReader<'_>) -> Result<u64, StorageError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        // Readers never observe a half-written payload
        let path = self.data_path(id);
        let partial = self.partial_path(id);
        debug!("Saving payload of video {} to {:?}", id, path);

        let written = async {
            let mut file = BufWriter::new(File::create(&partial).await?);
            let written = tokio::io::copy(&mut data, &mut file).await?;
            file.flush().await?;
            drop(file);
            tokio::fs::rename(&partial, &path).await?;
            Ok::<_, io::Error>(written)
        }
        .await;

        if written.is_err() {
            let _ = tokio::fs::remove_file(&partial).await;
        }
        Ok(written?)
    }

    async fn load_data(&self, id: VideoId) -> Result<Option<DataReader<'static>>, StorageError> {
        match File::open(self.data_path(id)).await {
            Ok(file) => Ok(Some(Box::pin(file))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn has_data(&self, id: VideoId) -> Result<bool, StorageError> {
        match tokio::fs::metadata(self.data_path(id)).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

fn path_is_valid(path: &Path) -> bool {
    !path
        .components()
        .any(|component| matches!(component, Component::ParentDir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use tempfile::tempdir;
    use tokio::io::AsyncReadExt;

    async fn read_all(mut reader: DataReader<'_>) -> Vec<u8> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await.unwrap();
        buf
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let temp_dir = tempdir().unwrap();
        let store = FsVideoData::new(temp_dir.path().join("videos")).unwrap();

        let written = store
            .save_data(1, Box::pin(&b"Hello, world!"[..]))
            .await
            .unwrap();

        assert_eq!(written, 13);
        assert!(store.has_data(1).await.unwrap());
        assert!(store.data_path(1).ends_with("video1.mpg"));
        let reader = store.load_data(1).await.unwrap().unwrap();
        assert_eq!(read_all(reader).await, b"Hello, world!");
    }

    #[tokio::test]
    async fn test_save_replaces_previous_payload() {
        let temp_dir = tempdir().unwrap();
        let store = FsVideoData::new(temp_dir.path()).unwrap();

        store.save_data(2, Box::pin(&b"first"[..])).await.unwrap();
        store.save_data(2, Box::pin(&b"second"[..])).await.unwrap();

        let reader = store.load_data(2).await.unwrap().unwrap();
        assert_eq!(read_all(reader).await, b"second");
    }

    #[tokio::test]
    async fn test_missing_payload() {
        let temp_dir = tempdir().unwrap();
        let store = FsVideoData::new(temp_dir.path()).unwrap();

        assert!(!store.has_data(3).await.unwrap());
        assert!(store.load_data(3).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_stream_leaves_no_payload() {
        let temp_dir = tempdir().unwrap();
        let store = FsVideoData::new(temp_dir.path()).unwrap();

        let failing = tokio_util::io::StreamReader::new(futures::stream::iter(vec![
            Ok(bytes::Bytes::from_static(b"partial")),
            Err(io::Error::new(io::ErrorKind::Other, "Test error")),
        ]));
        let result = store.save_data(4, Box::pin(failing)).await;

        assert!(matches!(result, Err(StorageError::Io(_))));
        assert!(!store.has_data(4).await.unwrap());
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    fn slow_payload(byte: u8) -> DataReader<'static> {
        let chunks = futures::stream::iter(0..20).then(move |_| async move {
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
            Ok::<_, io::Error>(bytes::Bytes::from(vec![byte; 1000]))
        });
        Box::pin(tokio_util::io::StreamReader::new(chunks))
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_uploads_to_same_video() {
        let temp_dir = tempdir().unwrap();
        let store = FsVideoData::new(temp_dir.path()).unwrap();

        let (a, b) = tokio::join!(
            store.save_data(1, slow_payload(b'A')),
            store.save_data(1, slow_payload(b'B')),
        );
        assert_eq!(a.unwrap(), 20_000);
        assert_eq!(b.unwrap(), 20_000);

        let payload = read_all(store.load_data(1).await.unwrap().unwrap()).await;
        assert_eq!(payload.len(), 20_000);
        assert!(
            payload.iter().all(|&c| c == b'A') || payload.iter().all(|&c| c == b'B'),
            "payload mixes both uploads"
        );
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_valid_path() {
        assert!(path_is_valid(Path::new("videos")));
        assert!(path_is_valid(Path::new("/var/lib/vidcat/videos")));
    }

    #[test]
    fn test_invalid_path_with_parent() {
        assert!(!path_is_valid(Path::new("../videos")));
        assert!(matches!(
            FsVideoData::new("data/../../etc"),
            Err(StorageError::InvalidPath(_))
        ));
    }
}
