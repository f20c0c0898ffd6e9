/*!
 * XML writer implementation for CodeDigest
 */

use std::io::Write;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::config::Config;
use crate::error::{DigestError, Result};
use crate::types::{Digest, DigestEntry, FolderRecord};

/// XML writer for a digest
pub struct XmlWriter {
    /// Writer configuration
    config: Config,
}

impl XmlWriter {
    /// Create a new XML writer
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Render the digest as an indented XML document
    pub fn render(&self, digest: &Digest) -> Result<String> {
        let mut xml_writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut start_tag = BytesStart::new("repository");
        start_tag.push_attribute(("name", digest.name()));
        xml_writer.write_event(Event::Start(start_tag))?;

        if self.config.include_summary {
            self.write_summary(digest, &mut xml_writer)?;
        }
        if self.config.include_structure {
            self.write_structure(digest, &mut xml_writer)?;
        }
        for folder in digest.folders() {
            self.write_folder(folder, &mut xml_writer)?;
        }

        xml_writer.write_event(Event::End(BytesEnd::new("repository")))?;

        let mut bytes = xml_writer.into_inner();
        bytes.push(b'\n');
        String::from_utf8(bytes).map_err(|e| DigestError::Writer(e.to_string()))
    }

    /// Write the per-type and per-extension counters
    fn write_summary<W: Write>(&self, digest: &Digest, writer: &mut Writer<W>) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("summary")))?;

        for (file_type, count) in digest.type_counts() {
            let mut tag = BytesStart::new("stat");
            tag.push_attribute(("type", file_type.as_str()));
            self.write_text_element(tag, &count.to_string(), writer)?;
        }

        let extensions = digest.extension_counts();
        if extensions.is_empty() {
            writer.write_event(Event::Empty(BytesStart::new("extension_stats")))?;
        } else {
            writer.write_event(Event::Start(BytesStart::new("extension_stats")))?;
            for (ext, count) in extensions {
                let mut tag = BytesStart::new("ext");
                tag.push_attribute(("name", ext.as_str()));
                self.write_text_element(tag, &count.to_string(), writer)?;
            }
            writer.write_event(Event::End(BytesEnd::new("extension_stats")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("summary")))?;
        Ok(())
    }

    /// Write the sorted path listing
    fn write_structure<W: Write>(&self, digest: &Digest, writer: &mut Writer<W>) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("directory_structure")))?;
        for path in digest.sorted_paths() {
            self.write_text_element(BytesStart::new("entry"), path, writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new("directory_structure")))?;
        Ok(())
    }

    /// Write one folder and its files
    fn write_folder<W: Write>(&self, folder: &FolderRecord, writer: &mut Writer<W>) -> Result<()> {
        let mut start_tag = BytesStart::new("folder");
        start_tag.push_attribute(("path", folder.path.as_str()));

        if folder.files.is_empty() {
            writer.write_event(Event::Empty(start_tag))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start_tag))?;
        for file in &folder.files {
            self.write_file(file, writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new("folder")))?;
        Ok(())
    }

    /// Write a file element, embedding text content as CDATA
    fn write_file<W: Write>(&self, file: &DigestEntry, writer: &mut Writer<W>) -> Result<()> {
        let mut start_tag = BytesStart::new("file");
        start_tag.push_attribute(("path", file.path.as_str()));
        start_tag.push_attribute(("type", file.file_type.as_str()));
        if let Some(error) = &file.error {
            start_tag.push_attribute(("error", error.as_str()));
        }

        let Some(content) = &file.content else {
            writer.write_event(Event::Empty(start_tag))?;
            return Ok(());
        };

        writer.write_event(Event::Start(start_tag))?;
        writer.write_event(Event::Start(BytesStart::new("code")))?;
        for section in cdata_sections(content) {
            writer.write_event(Event::CData(BytesCData::new(section)))?;
        }
        writer.write_event(Event::End(BytesEnd::new("code")))?;
        writer.write_event(Event::End(BytesEnd::new("file")))?;
        Ok(())
    }

    /// Write `<tag>text</tag>` with escaped text
    fn write_text_element<W: Write>(
        &self,
        tag: BytesStart<'_>,
        text: &str,
        writer: &mut Writer<W>,
    ) -> Result<()> {
        let end = tag.to_end().into_owned();
        writer.write_event(Event::Start(tag))?;
        writer.write_event(Event::Text(BytesText::new(text)))?;
        writer.write_event(Event::End(end))?;
        Ok(())
    }
}

/// Split content so that no section contains the CDATA terminator `]]>`.
///
/// Sections are emitted back to back, so a parser concatenates them into the
/// original text.
fn cdata_sections(content: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut rest = content;
    while let Some(pos) = rest.find("]]>") {
        // Break between "]]" and ">"
        sections.push(&rest[..pos + 2]);
        rest = &rest[pos + 2..];
    }
    sections.push(rest);
    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cdata_sections() {
        assert_eq!(cdata_sections("plain"), vec!["plain"]);
        assert_eq!(cdata_sections(""), vec![""]);
        assert_eq!(cdata_sections("a]]>b"), vec!["a]]", ">b"]);
        assert_eq!(cdata_sections("]]>]]>"), vec!["]]", ">]]", ">"]);
        assert_eq!(cdata_sections("x]]>y").concat(), "x]]>y");
    }
}
