#![allow(dead_code)]

// filename according to https://doc.rust-lang.org/book/ch11-03-test-organization.html
use crosspoint_settings::Error;
use crosspoint_settings::platform::{Handle, Storage};
use embedded_storage::nor_flash::{
    ErrorType, NorFlash, NorFlashError, NorFlashErrorKind, ReadNorFlash,
};
use std::collections::{BTreeMap, BTreeSet};

pub const FLASH_SECTOR_SIZE: usize = 4096;
pub const WORD_SIZE: usize = 4;

/// In-memory file store with the same semantics as the SD card: files can only be created in
/// existing directories.
#[derive(Default)]
pub struct MemStorage {
    pub files: BTreeMap<String, Vec<u8>>,
    pub dirs: BTreeSet<String>,
    pub fail_mkdir: bool,
    pub fail_open_read: bool,
    pub fail_open_write: bool,
    pub operations: Vec<FileOperation>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum FileOperation {
    Mkdir { path: String },
    OpenRead { tag: String, path: String },
    OpenWrite { tag: String, path: String },
    Close { path: String, written: usize },
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(path: &str, data: &[u8]) -> Self {
        let mut storage = Self::default();
        storage.files.insert(path.to_string(), data.to_vec());
        if let Some((dir, _)) = path.rsplit_once('/') {
            storage.dirs.insert(dir.to_string());
        }
        storage
    }

    pub fn file(&self, path: &str) -> Option<&Vec<u8>> {
        self.files.get(path)
    }

    pub fn writes(&self) -> usize {
        self.operations
            .iter()
            .filter(|op| matches!(op, FileOperation::OpenWrite { .. }))
            .count()
    }
}

pub struct MemHandle<'a> {
    storage: &'a mut MemStorage,
    path: String,
    data: Vec<u8>,
    position: usize,
    writable: bool,
}

impl Storage for MemStorage {
    type Handle<'a>
        = MemHandle<'a>
    where
        Self: 'a;

    fn mkdir(&mut self, path: &str) -> Result<(), Error> {
        self.operations.push(FileOperation::Mkdir {
            path: path.to_string(),
        });
        if self.fail_mkdir {
            return Err(Error::OpenFailed);
        }
        self.dirs.insert(path.to_string());
        Ok(())
    }

    fn open_for_read(&mut self, tag: &str, path: &str) -> Result<MemHandle<'_>, Error> {
        self.operations.push(FileOperation::OpenRead {
            tag: tag.to_string(),
            path: path.to_string(),
        });
        if self.fail_open_read {
            return Err(Error::OpenFailed);
        }
        let data = self.files.get(path).ok_or(Error::NotFound)?.clone();
        Ok(MemHandle {
            storage: self,
            path: path.to_string(),
            data,
            position: 0,
            writable: false,
        })
    }

    fn open_for_write(&mut self, tag: &str, path: &str) -> Result<MemHandle<'_>, Error> {
        self.operations.push(FileOperation::OpenWrite {
            tag: tag.to_string(),
            path: path.to_string(),
        });
        let dir_exists = match path.rsplit_once('/') {
            Some(("", _)) | None => true,
            Some((dir, _)) => self.dirs.contains(dir),
        };
        if self.fail_open_write || !dir_exists {
            return Err(Error::OpenFailed);
        }
        Ok(MemHandle {
            storage: self,
            path: path.to_string(),
            data: Vec::new(),
            position: 0,
            writable: true,
        })
    }
}

impl Handle for MemHandle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let n = buf.len().min(self.data.len() - self.position);
        buf[..n].copy_from_slice(&self.data[self.position..self.position + n]);
        self.position += n;
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Error> {
        if !self.writable {
            return Err(Error::WriteFailed);
        }
        self.data.extend_from_slice(data);
        Ok(())
    }

    fn close(self) -> Result<(), Error> {
        let written = if self.writable { self.data.len() } else { 0 };
        self.storage.operations.push(FileOperation::Close {
            path: self.path.clone(),
            written,
        });
        if self.writable {
            self.storage.files.insert(self.path, self.data);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct Flash {
    pub buf: Vec<u8>,
    pub fail_after_operation: usize,
    pub operations: Vec<Operation>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Operation {
    Read { offset: u32, len: usize },
    Write { offset: u32, len: usize },
    Erase { offset: u32, len: usize },
}

impl Flash {
    pub fn new(pages: usize) -> Self {
        Self {
            buf: vec![0xffu8; FLASH_SECTOR_SIZE * pages],
            fail_after_operation: usize::MAX,
            ..Default::default()
        }
    }

    pub fn new_with_fault(pages: usize, fail_after_operation: usize) -> Self {
        Self {
            buf: vec![0xffu8; FLASH_SECTOR_SIZE * pages],
            fail_after_operation,
            ..Default::default()
        }
    }

    pub fn erases(&self) -> usize {
        self.operations
            .iter()
            .filter(|op| matches!(op, Operation::Erase { .. }))
            .count()
    }
}

#[derive(Debug)]
pub struct FlashError;

impl NorFlashError for FlashError {
    fn kind(&self) -> NorFlashErrorKind {
        NorFlashErrorKind::Other
    }
}

impl ErrorType for Flash {
    type Error = FlashError;
}

impl ReadNorFlash for Flash {
    const READ_SIZE: usize = WORD_SIZE;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        assert!(offset.is_multiple_of(Self::READ_SIZE as _));
        assert!(bytes.len().is_multiple_of(Self::READ_SIZE));

        if self.operations.len() >= self.fail_after_operation {
            return Err(FlashError);
        }
        self.operations.push(Operation::Read {
            offset,
            len: bytes.len(),
        });

        let offset = offset as usize;
        bytes.copy_from_slice(&self.buf[offset..offset + bytes.len()]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.buf.len()
    }
}

impl NorFlash for Flash {
    const WRITE_SIZE: usize = WORD_SIZE;

    const ERASE_SIZE: usize = FLASH_SECTOR_SIZE;

    fn erase(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
        assert!(from.is_multiple_of(Self::ERASE_SIZE as _));
        assert!(to.is_multiple_of(Self::ERASE_SIZE as _));

        if self.operations.len() >= self.fail_after_operation {
            return Err(FlashError);
        }

        self.operations.push(Operation::Erase {
            offset: from,
            len: (to - from) as usize,
        });

        for addr in from..to {
            self.buf[addr as usize] = 0xff;
        }
        Ok(())
    }

    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        assert!(offset.is_multiple_of(Self::WRITE_SIZE as _));
        assert!(bytes.len().is_multiple_of(Self::WRITE_SIZE));
        assert!(!bytes.is_empty());

        if self.operations.len() >= self.fail_after_operation {
            return Err(FlashError);
        }

        self.operations.push(Operation::Write {
            offset,
            len: bytes.len(),
        });

        let offset = offset as usize;
        for (i, &val) in bytes.iter().enumerate() {
            // NOR flash can only flip bits from 1 to 0
            self.buf[offset + i] &= val;
        }
        Ok(())
    }
}
