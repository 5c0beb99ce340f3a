use crate::common::Operation::{Erase, Read, Write};
use crate::common::{FLASH_SECTOR_SIZE, Flash, WORD_SIZE};
use crosspoint_settings::options::{FontFamily, FontSize};
use crosspoint_settings::platform::{Handle, NorFlashStorage, Storage};
use crosspoint_settings::{Error, SETTINGS_FILE, STORAGE_TAG, Settings, SettingsStore, encode};
use pretty_assertions::assert_eq;

mod common;

#[test]
fn region_must_be_sector_aligned() {
    let mut flash = Flash::new(4);
    assert!(matches!(
        NorFlashStorage::new(&mut flash, 100, FLASH_SECTOR_SIZE),
        Err(Error::InvalidRegionOffset)
    ));
    assert!(matches!(
        NorFlashStorage::new(&mut flash, 0, 100),
        Err(Error::InvalidRegionSize)
    ));
    assert!(matches!(
        NorFlashStorage::new(&mut flash, 0, 0),
        Err(Error::InvalidRegionSize)
    ));
    assert!(matches!(
        NorFlashStorage::new(&mut flash, 3 * FLASH_SECTOR_SIZE as u32, 2 * FLASH_SECTOR_SIZE),
        Err(Error::InvalidRegionSize)
    ));
}

#[test]
fn erased_region_has_no_file() {
    let mut flash = Flash::new(2);
    let mut storage = NorFlashStorage::new(&mut flash, 0, FLASH_SECTOR_SIZE).unwrap();
    assert!(matches!(
        storage.open_for_read(STORAGE_TAG, SETTINGS_FILE),
        Err(Error::NotFound)
    ));
}

#[test]
fn write_is_deferred_until_close() {
    let mut flash = Flash::new(2);
    let offset = FLASH_SECTOR_SIZE as u32;
    {
        let mut storage = NorFlashStorage::new(&mut flash, offset, FLASH_SECTOR_SIZE).unwrap();
        let mut handle = storage.open_for_write(STORAGE_TAG, SETTINGS_FILE).unwrap();
        handle.write(b"hello").unwrap();
        handle.write(b" world").unwrap();
        handle.close().unwrap();
    }

    assert_eq!(
        flash.operations,
        vec![
            Erase {
                offset,
                len: FLASH_SECTOR_SIZE,
            },
            Write {
                offset,
                // 4 byte length + 11 bytes, padded to the word size
                len: 4 * WORD_SIZE,
            },
        ]
    );
    let start = offset as usize;
    assert_eq!(&flash.buf[start..start + 4], &11u32.to_le_bytes());
    assert_eq!(&flash.buf[start + 4..start + 15], b"hello world");
    assert_eq!(flash.buf[start + 15], 0xff);
}

#[test]
fn read_back() {
    let mut flash = Flash::new(1);
    let mut storage = NorFlashStorage::new(&mut flash, 0, FLASH_SECTOR_SIZE).unwrap();

    let mut handle = storage.open_for_write(STORAGE_TAG, SETTINGS_FILE).unwrap();
    handle.write(&[1, 2, 3, 4, 5, 6, 7]).unwrap();
    handle.close().unwrap();

    let mut handle = storage.open_for_read(STORAGE_TAG, SETTINGS_FILE).unwrap();
    let mut buf = [0u8; 4];
    assert_eq!(handle.read(&mut buf), Ok(4));
    assert_eq!(buf, [1, 2, 3, 4]);
    assert_eq!(handle.read(&mut buf), Ok(3));
    assert_eq!(&buf[..3], &[5, 6, 7]);
    assert_eq!(handle.read(&mut buf), Ok(0));
    assert_eq!(handle.write(&[1]), Err(Error::WriteFailed));
    handle.close().unwrap();
}

#[test]
fn file_too_large() {
    let mut flash = Flash::new(1);
    let mut storage = NorFlashStorage::new(&mut flash, 0, FLASH_SECTOR_SIZE).unwrap();
    let max = storage.max_file_size();

    let mut handle = storage.open_for_write(STORAGE_TAG, SETTINGS_FILE).unwrap();
    handle.write(&vec![0u8; max]).unwrap();
    assert_eq!(handle.write(&[0]), Err(Error::FileTooLarge));
}

#[test]
fn abandoned_write_keeps_previous_file() {
    let mut flash = Flash::new(1);
    let mut storage = NorFlashStorage::new(&mut flash, 0, FLASH_SECTOR_SIZE).unwrap();

    let mut handle = storage.open_for_write(STORAGE_TAG, SETTINGS_FILE).unwrap();
    handle.write(b"first").unwrap();
    handle.close().unwrap();

    let mut handle = storage.open_for_write(STORAGE_TAG, SETTINGS_FILE).unwrap();
    handle.write(b"second").unwrap();
    drop(handle);

    let mut handle = storage.open_for_read(STORAGE_TAG, SETTINGS_FILE).unwrap();
    let mut buf = [0u8; 16];
    assert_eq!(handle.read(&mut buf), Ok(5));
    assert_eq!(&buf[..5], b"first");
}

#[test]
fn flash_fault_on_save() {
    let mut flash = Flash::new_with_fault(1, 0);
    let storage = NorFlashStorage::new(&mut flash, 0, FLASH_SECTOR_SIZE).unwrap();
    let mut store = SettingsStore::with_defaults(storage);
    assert_eq!(store.save(), Err(Error::FlashError));
}

#[test]
fn flash_fault_on_load() {
    let mut flash = Flash::new_with_fault(1, 0);
    let storage = NorFlashStorage::new(&mut flash, 0, FLASH_SECTOR_SIZE).unwrap();
    let (store, error) = SettingsStore::open(storage);
    assert_eq!(error, Some(Error::FlashError));
    assert_eq!(store.settings(), &Settings::default());
}

#[test]
fn settings_round_trip_through_flash() {
    let mut flash = Flash::new(2);
    let region = FLASH_SECTOR_SIZE as u32;

    {
        let storage = NorFlashStorage::new(&mut flash, region, FLASH_SECTOR_SIZE).unwrap();
        let (mut store, error) = SettingsStore::open(storage);
        assert_eq!(error, Some(Error::NotFound));
        store
            .update(|s| {
                s.font_family = FontFamily::NotoSans;
                s.font_size = FontSize::Large;
                s.opds_server_url.set("http://192.168.1.10:8080/opds");
            })
            .unwrap();
    }
    assert_eq!(flash.erases(), 1);

    let mut expected = Settings::default();
    expected.font_family = FontFamily::NotoSans;
    expected.font_size = FontSize::Large;
    expected.opds_server_url.set("http://192.168.1.10:8080/opds");
    let len = encode(&expected).len();

    flash.operations.clear();
    let storage = NorFlashStorage::new(&mut flash, region, FLASH_SECTOR_SIZE).unwrap();
    let (store, error) = SettingsStore::open(storage);
    assert_eq!(error, None);
    assert_eq!(store.settings(), &expected);
    drop(store);

    assert_eq!(
        flash.operations,
        vec![
            Read {
                offset: region,
                len: WORD_SIZE,
            },
            Read {
                offset: region,
                len: (4 + len).div_ceil(WORD_SIZE) * WORD_SIZE,
            },
        ]
    );
}
