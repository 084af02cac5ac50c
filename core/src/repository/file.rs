use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::info;

use crate::model::snapshot::BoardSnapshot;
use crate::repository::traits::TaskRepository;

const DEFAULT_FILE_NAME: &str = "tasks.json";
const DEFAULT_DIR_NAME: &str = ".taskboard";

/// `~/.taskboard`, the data directory used when none is configured.
pub fn default_data_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(DEFAULT_DIR_NAME))
}

#[derive(Clone, Debug)]
pub struct FileTaskRepository {
    file_path: PathBuf,
}

impl FileTaskRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create data directory {}", path.display()))?;
        path.push(DEFAULT_FILE_NAME);

        let repo = FileTaskRepository { file_path: path };
        // Seed an empty snapshot so later reads never see a missing file
        if !repo.file_path.exists() {
            repo.write_snapshot(&BoardSnapshot::default())?;
        }
        Ok(repo)
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn read_snapshot(&self) -> Result<BoardSnapshot> {
        let file = File::open(&self.file_path)
            .with_context(|| format!("Failed to open {}", self.file_path.display()))?;
        let reader = BufReader::new(file);
        let snapshot = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse {}", self.file_path.display()))?;
        Ok(snapshot)
    }

    fn write_snapshot(&self, snapshot: &BoardSnapshot) -> Result<()> {
        let file = File::create(&self.file_path)
            .with_context(|| format!("Failed to write {}", self.file_path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, snapshot)?;
        writer.flush()?;
        Ok(())
    }
}

impl TaskRepository for FileTaskRepository {
    fn load(&self) -> Result<BoardSnapshot> {
        let snapshot = self.read_snapshot()?;
        info!(path = %self.file_path.display(), tasks = snapshot.tasks.len(), "loaded board");
        Ok(snapshot)
    }

    fn save(&self, snapshot: &BoardSnapshot) -> Result<()> {
        self.write_snapshot(snapshot)?;
        info!(path = %self.file_path.display(), tasks = snapshot.tasks.len(), "saved board");
        Ok(())
    }
}
