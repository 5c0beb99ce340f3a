//! Storage the settings file is persisted to.

use crate::error::Error;
use alloc::vec;
use alloc::vec::Vec;
use embedded_storage::nor_flash::NorFlash;

/// A minimal file store: create directories and open a file for reading or writing. `tag` names
/// the caller in the storage layer's diagnostics.
pub trait Storage {
    type Handle<'a>: Handle
    where
        Self: 'a;

    /// Creating an existing directory is not an error.
    fn mkdir(&mut self, path: &str) -> Result<(), Error>;

    /// Returns [`Error::NotFound`] if the file does not exist.
    fn open_for_read(&mut self, tag: &str, path: &str) -> Result<Self::Handle<'_>, Error>;

    /// Opens the file truncated to zero length.
    fn open_for_write(&mut self, tag: &str, path: &str) -> Result<Self::Handle<'_>, Error>;
}

/// An open file. Written data is only guaranteed to be persisted after a successful
/// [`Handle::close`].
pub trait Handle {
    /// Reads up to `buf.len()` bytes, `Ok(0)` signals the end of the file.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error>;

    fn write(&mut self, data: &[u8]) -> Result<(), Error>;

    fn close(self) -> Result<(), Error>;
}

/// Reads the remaining content of `handle` into `out`.
pub fn read_to_end<H: Handle>(handle: &mut H, out: &mut Vec<u8>) -> Result<(), Error> {
    let mut chunk = [0u8; 64];
    loop {
        match handle.read(&mut chunk)? {
            0 => return Ok(()),
            n => out.extend_from_slice(&chunk[..n]),
        }
    }
}

pub(crate) trait AlignedOps: NorFlash {
    fn align_read(size: usize) -> usize {
        align_ceil(size, Self::READ_SIZE)
    }

    fn align_write_ceil(size: usize) -> usize {
        align_ceil(size, Self::WRITE_SIZE)
    }
}

#[inline(always)]
const fn align_ceil(size: usize, alignment: usize) -> usize {
    if alignment.is_power_of_two() {
        size.saturating_add(alignment - 1) & !(alignment - 1)
    } else {
        size.saturating_add(alignment - 1) / alignment * alignment
    }
}

impl<T: NorFlash> AlignedOps for T {}

const LENGTH_HEADER_SIZE: usize = 4;
const ERASED_LENGTH: u32 = u32::MAX;

/// Keeps a single file in a dedicated, erase-aligned flash region.
///
/// Layout: `u32` LE payload length followed by the payload, padded with `0xff` to the write
/// size. An erased length header means no file has been written. Paths are ignored and
/// [`Storage::mkdir`] is a no-op. The region is only erased and rewritten when a write handle
/// is closed, an interrupted save keeps the previous file.
pub struct NorFlashStorage<F: NorFlash> {
    flash: F,
    offset: u32,
    size: usize,
}

impl<F: NorFlash> NorFlashStorage<F> {
    pub fn new(flash: F, offset: u32, size: usize) -> Result<Self, Error> {
        if !(offset as usize).is_multiple_of(F::ERASE_SIZE) {
            return Err(Error::InvalidRegionOffset);
        }

        if size == 0
            || !size.is_multiple_of(F::ERASE_SIZE)
            || size <= LENGTH_HEADER_SIZE
            || (offset as usize).saturating_add(size) > flash.capacity()
        {
            return Err(Error::InvalidRegionSize);
        }

        Ok(Self {
            flash,
            offset,
            size,
        })
    }

    /// Largest payload that fits into the region.
    pub fn max_file_size(&self) -> usize {
        self.size - LENGTH_HEADER_SIZE
    }

    pub fn into_inner(self) -> F {
        self.flash
    }

    fn read_region(&mut self, len: usize) -> Result<Vec<u8>, Error> {
        let mut buf = vec![0u8; F::align_read(len).min(self.size)];
        self.flash
            .read(self.offset, &mut buf)
            .map_err(|_| Error::FlashError)?;
        Ok(buf)
    }

    fn commit(&mut self, payload: &[u8]) -> Result<(), Error> {
        let total = LENGTH_HEADER_SIZE + payload.len();
        if total > self.size {
            return Err(Error::FileTooLarge);
        }

        let mut buf = vec![0xffu8; F::align_write_ceil(total)];
        buf[..LENGTH_HEADER_SIZE].copy_from_slice(&(payload.len() as u32).to_le_bytes());
        buf[LENGTH_HEADER_SIZE..total].copy_from_slice(payload);

        #[cfg(feature = "defmt")]
        defmt::trace!("flash: commit {} bytes at {:#x}", total, self.offset);
        #[cfg(feature = "debug-logs")]
        println!("  flash: commit {total} bytes at {:#08x}", self.offset);

        self.flash
            .erase(self.offset, self.offset + self.size as u32)
            .map_err(|_| Error::FlashError)?;
        self.flash
            .write(self.offset, &buf)
            .map_err(|_| Error::FlashError)
    }
}

impl<F: NorFlash> Storage for NorFlashStorage<F> {
    type Handle<'a>
        = NorFlashHandle<'a, F>
    where
        Self: 'a;

    fn mkdir(&mut self, _path: &str) -> Result<(), Error> {
        Ok(())
    }

    fn open_for_read(&mut self, _tag: &str, _path: &str) -> Result<Self::Handle<'_>, Error> {
        let header = self.read_region(LENGTH_HEADER_SIZE)?;
        let len = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
        if len == ERASED_LENGTH {
            return Err(Error::NotFound);
        }

        let len = len as usize;
        if len > self.max_file_size() {
            return Err(Error::OpenFailed);
        }

        let mut data = self.read_region(LENGTH_HEADER_SIZE + len)?;
        data.truncate(LENGTH_HEADER_SIZE + len);
        data.drain(..LENGTH_HEADER_SIZE);

        Ok(NorFlashHandle {
            storage: self,
            mode: Mode::Read { data, position: 0 },
        })
    }

    fn open_for_write(&mut self, _tag: &str, _path: &str) -> Result<Self::Handle<'_>, Error> {
        Ok(NorFlashHandle {
            storage: self,
            mode: Mode::Write { buffer: Vec::new() },
        })
    }
}

enum Mode {
    Read { data: Vec<u8>, position: usize },
    Write { buffer: Vec<u8> },
}

pub struct NorFlashHandle<'a, F: NorFlash> {
    storage: &'a mut NorFlashStorage<F>,
    mode: Mode,
}

impl<F: NorFlash> Handle for NorFlashHandle<'_, F> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        match &mut self.mode {
            Mode::Read { data, position } => {
                let n = buf.len().min(data.len() - *position);
                buf[..n].copy_from_slice(&data[*position..*position + n]);
                *position += n;
                Ok(n)
            }
            Mode::Write { .. } => Ok(0),
        }
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Error> {
        let max = self.storage.max_file_size();
        match &mut self.mode {
            Mode::Write { buffer } => {
                if buffer.len() + data.len() > max {
                    return Err(Error::FileTooLarge);
                }
                buffer.extend_from_slice(data);
                Ok(())
            }
            Mode::Read { .. } => Err(Error::WriteFailed),
        }
    }

    fn close(self) -> Result<(), Error> {
        match self.mode {
            Mode::Write { buffer } => self.storage.commit(&buffer),
            Mode::Read { .. } => Ok(()),
        }
    }
}
