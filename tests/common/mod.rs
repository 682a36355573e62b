#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

use zip::CompressionMethod;
use zip::write::FileOptions;

pub const META_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-meta xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0"
                      xmlns:dc="http://purl.org/dc/elements/1.1/"
                      xmlns:meta="urn:oasis:names:tc:opendocument:xmlns:meta:1.0"
                      office:version="1.3">
  <office:meta>
    <meta:generator>LibreOffice/24.2</meta:generator>
    <dc:title>Quarterly Report</dc:title>
    <dc:subject>Finance</dc:subject>
    <dc:creator>Alice</dc:creator>
    <meta:initial-creator>Bob</meta:initial-creator>
    <meta:keyword>revenue</meta:keyword>
    <meta:keyword>forecast</meta:keyword>
    <dc:language>en-US</dc:language>
    <meta:creation-date>2024-01-01T10:00:00</meta:creation-date>
    <meta:user-defined meta:name="Client">ACME</meta:user-defined>
    <meta:document-statistic meta:page-count="3" meta:word-count="1200" meta:table-count="2"/>
  </office:meta>
</office:document-meta>"#;

pub const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-styles xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0"
                        xmlns:style="urn:oasis:names:tc:opendocument:xmlns:style:1.0"
                        xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0">
  <office:master-styles>
    <style:master-page style:name="Standard">
      <style:header><text:p>Confidential</text:p></style:header>
      <style:header-left><text:p>Draft<text:span>v2</text:span></text:p></style:header-left>
      <style:footer><text:p>Page footer</text:p></style:footer>
    </style:master-page>
  </office:master-styles>
</office:document-styles>"#;

/// Write a zip archive with the given members to `dir/name`.
pub fn write_archive(dir: &Path, name: &str, files: &[(&str, &[u8])]) -> PathBuf {
    let path = dir.join(name);
    let file = std::fs::File::create(&path).unwrap();
    let mut zip = zip::ZipWriter::new(file);

    for (entry, content) in files {
        // The mimetype member is stored uncompressed in real documents
        let method = if *entry == "mimetype" {
            CompressionMethod::Stored
        } else {
            CompressionMethod::Deflated
        };
        let options = FileOptions::<()>::default().compression_method(method);
        zip.start_file(*entry, options).unwrap();
        zip.write_all(content).unwrap();
    }

    zip.finish().unwrap();
    path
}

/// Write a minimal OpenDocument text file with meta.xml and styles.xml.
pub fn write_odt(dir: &Path) -> PathBuf {
    write_archive(
        dir,
        "report.odt",
        &[
            ("mimetype", b"application/vnd.oasis.opendocument.text"),
            ("meta.xml", META_XML.as_bytes()),
            ("styles.xml", STYLES_XML.as_bytes()),
            ("content.xml", b"<office:document-content/>"),
        ],
    )
}
