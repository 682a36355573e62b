mod common;

use odmeta::{Error, ZipArchive, ZipError, extract, extract_to_vec};

#[test]
fn test_extract_named_entry() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = common::write_odt(dir.path());

    let meta = extract_to_vec(&path, "meta.xml")?;
    assert_eq!(meta, common::META_XML.as_bytes());

    let mimetype = extract_to_vec(&path, "mimetype")?;
    assert_eq!(mimetype, b"application/vnd.oasis.opendocument.text");
    Ok(())
}

#[test]
fn test_extract_appends_across_calls() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = common::write_archive(dir.path(), "parts.zip", &[("a", b"first,"), ("b", b"second")]);

    let mut buffer = Vec::new();
    extract(&path, "a", &mut buffer)?;
    extract(&path, "b", &mut buffer)?;
    assert_eq!(buffer, b"first,second");
    Ok(())
}

#[test]
fn test_extract_is_idempotent() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = common::write_odt(dir.path());

    let mut first = Vec::new();
    let mut second = Vec::new();
    extract(&path, "styles.xml", &mut first)?;
    extract(&path, "styles.xml", &mut second)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_missing_entry_leaves_buffer_untouched() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = common::write_odt(dir.path());

    let mut buffer = b"existing".to_vec();
    let err = extract(&path, "nonexistent.xml", &mut buffer).unwrap_err();
    assert!(matches!(err, Error::EntryNotFound { ref entry } if entry == "nonexistent.xml"));
    assert_eq!(buffer, b"existing");
    Ok(())
}

#[test]
fn test_missing_archive_is_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut buffer = Vec::new();
    let err = extract(dir.path().join("absent.odt"), "meta.xml", &mut buffer).unwrap_err();
    assert!(matches!(err, Error::ArchiveOpen { source: ZipError::Io(_), .. }));
    assert!(buffer.is_empty());
}

#[test]
fn test_non_zip_file_is_open_error() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("notes.odt");
    std::fs::write(&path, "plain text pretending to be a document")?;

    let err = extract_to_vec(&path, "meta.xml").unwrap_err();
    assert!(matches!(err, Error::ArchiveOpen { source: ZipError::NotAZip, .. }));
    Ok(())
}

#[test]
fn test_truncated_archive_fails_cleanly() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = common::write_odt(dir.path());
    let bytes = std::fs::read(&path)?;
    std::fs::write(&path, &bytes[..bytes.len() / 2])?;

    let mut buffer = Vec::new();
    assert!(extract(&path, "meta.xml", &mut buffer).is_err());
    assert!(buffer.is_empty());
    Ok(())
}

#[test]
fn test_corrupt_deflate_data_is_extraction_error() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let payload = "<office:document-content>".repeat(64);
    let path = common::write_archive(dir.path(), "broken.odt", &[("content.xml", payload.as_bytes())]);

    // Overwrite the start of the compressed stream, right after the local header
    let mut bytes = std::fs::read(&path)?;
    let name_len = u16::from_le_bytes([bytes[26], bytes[27]]) as usize;
    let extra_len = u16::from_le_bytes([bytes[28], bytes[29]]) as usize;
    let data_start = 30 + name_len + extra_len;
    for b in &mut bytes[data_start..data_start + 8] {
        *b = 0xFF;
    }
    std::fs::write(&path, &bytes)?;

    let err = extract_to_vec(&path, "content.xml").unwrap_err();
    assert!(matches!(err, Error::Extraction { ref entry, .. } if entry == "content.xml"));
    Ok(())
}

#[test]
fn test_archive_handle_lists_entries() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = common::write_odt(dir.path());

    let archive = ZipArchive::open(&path)?;
    let names: Vec<_> = archive.entries().iter().map(|e| e.file_name.as_str()).collect();
    assert_eq!(names, vec!["mimetype", "meta.xml", "styles.xml", "content.xml"]);
    Ok(())
}
