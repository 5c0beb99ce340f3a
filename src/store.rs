use crate::codec::{self, Decoded};
use crate::error::Error;
use crate::platform::{self, Handle, Storage};
use crate::record::Settings;
use alloc::vec::Vec;
#[cfg(feature = "defmt")]
use defmt::{trace, warn};

pub const SETTINGS_DIR: &str = "/.crosspoint";
pub const SETTINGS_FILE: &str = "/.crosspoint/settings.bin";
/// Identifies the settings module towards the storage layer.
pub const STORAGE_TAG: &str = "CPS";

/// Owns the live [`Settings`] and the storage they are persisted to.
///
/// Load once at startup with [`SettingsStore::open`], then route every change through
/// [`SettingsStore::update`] so the file always reflects the live record. Saving takes
/// `&mut self`, so two saves can never race on the same file; share the store behind a mutex if
/// several tasks need to change settings.
pub struct SettingsStore<S: Storage> {
    storage: S,
    settings: Settings,
}

impl<S: Storage> SettingsStore<S> {
    /// Loads the settings file, falling back to defaults if it is missing or unreadable. The
    /// load error is returned alongside for diagnostics, it never prevents startup.
    pub fn open(storage: S) -> (Self, Option<Error>) {
        let mut store = Self::with_defaults(storage);
        let error = store.load().err();
        (store, error)
    }

    /// Starts from defaults without touching the storage.
    pub fn with_defaults(storage: S) -> Self {
        Self {
            storage,
            settings: Settings::default(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Applies `change` to the live settings and persists them. On a failed save the change is
    /// kept in memory, it just won't survive a restart.
    pub fn update<R>(&mut self, change: impl FnOnce(&mut Settings) -> R) -> Result<R, Error> {
        let result = change(&mut self.settings);
        self.save()?;
        Ok(result)
    }

    /// Replaces the live settings with the content of the settings file.
    ///
    /// On error the live settings are left untouched.
    pub fn load(&mut self) -> Result<Decoded, Error> {
        let data = self.read_file().inspect_err(|_e| {
            #[cfg(feature = "defmt")]
            warn!("settings: load failed: {}", _e);
            #[cfg(feature = "debug-logs")]
            println!("store: load: {_e}");
        })?;
        let decoded = codec::decode(&data)?;

        #[cfg(feature = "defmt")]
        trace!("settings: loaded {} fields", decoded.fields_read);
        #[cfg(feature = "debug-logs")]
        println!("store: load: {} fields", decoded.fields_read);

        self.settings = decoded.settings.clone();
        Ok(decoded)
    }

    /// Writes the live settings to the settings file.
    pub fn save(&mut self) -> Result<(), Error> {
        let data = codec::encode(&self.settings);

        if let Err(_e) = self.storage.mkdir(SETTINGS_DIR) {
            // opening the file below reports the actual failure
            #[cfg(feature = "defmt")]
            warn!("settings: mkdir failed: {}", _e);
            #[cfg(feature = "debug-logs")]
            println!("store: save: mkdir {SETTINGS_DIR}: {_e}");
        }

        let mut handle = self.storage.open_for_write(STORAGE_TAG, SETTINGS_FILE)?;
        handle.write(&data)?;
        handle.close()?;

        #[cfg(feature = "defmt")]
        trace!("settings: saved {} bytes", data.len());
        #[cfg(feature = "debug-logs")]
        println!("store: save: {} bytes", data.len());
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_parts(self) -> (S, Settings) {
        (self.storage, self.settings)
    }

    fn read_file(&mut self) -> Result<Vec<u8>, Error> {
        let mut handle = self.storage.open_for_read(STORAGE_TAG, SETTINGS_FILE)?;
        let mut data = Vec::new();
        let read = platform::read_to_end(&mut handle, &mut data);
        handle.close()?;
        read?;
        Ok(data)
    }
}
