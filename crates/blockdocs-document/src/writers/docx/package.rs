/*
 * package.rs
 * Copyright (c) 2025 blockdocs contributors
 */

//! OOXML zip assembly.

use super::{parts, HyperlinkTable};
use crate::error::DocxResult;
use blockdocs_types::DocumentOptions;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Assemble the package from the rendered `word/document.xml` part and the
/// relationship table collected while rendering it.
pub(super) fn pack(
    document: &[u8],
    hyperlinks: &HyperlinkTable,
    options: &DocumentOptions,
) -> DocxResult<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let file_options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts: [(&str, Vec<u8>); 8] = [
        ("[Content_Types].xml", parts::CONTENT_TYPES.into()),
        ("_rels/.rels", parts::ROOT_RELS.into()),
        ("docProps/core.xml", parts::core_props(options)?),
        ("docProps/app.xml", parts::APP_PROPS.into()),
        ("word/document.xml", document.to_vec()),
        ("word/_rels/document.xml.rels", parts::document_rels(hyperlinks)?),
        ("word/styles.xml", parts::styles()?),
        ("word/numbering.xml", parts::numbering()?),
    ];

    for (name, bytes) in parts {
        zip.start_file(name, file_options)?;
        zip.write_all(&bytes)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use zip::ZipArchive;

    #[test]
    fn test_package_contains_expected_parts() {
        let hyperlinks = HyperlinkTable::new();
        let bytes = pack(b"<w:document/>", &hyperlinks, &DocumentOptions::default()).unwrap();

        // Zip local-file-header magic.
        assert_eq!(&bytes[..4], b"PK\x03\x04");

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        for name in [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/core.xml",
            "docProps/app.xml",
            "word/document.xml",
            "word/_rels/document.xml.rels",
            "word/styles.xml",
            "word/numbering.xml",
        ] {
            assert!(archive.by_name(name).is_ok(), "missing part {}", name);
        }
    }
}
