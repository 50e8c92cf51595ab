//! Markup document scanning
//!
//! Interface XML wires addon code together through `<Include file="..."/>`
//! and `<Script file="..."/>` elements. The scanner streams a document and
//! yields each `file` attribute in document order, nested elements
//! included. It makes no attempt to understand the rest of the markup.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::Result;

/// Streaming scanner yielding every file reference in a markup document.
///
/// Element and attribute names are matched case-insensitively; the game
/// client accepts `<include>`, `<Include>` and `<INCLUDE>` alike. Malformed
/// markup surfaces as an `Err` item - interface documents come from the
/// same trusted archive as everything else, so a parse failure is fatal
/// rather than recoverable.
///
/// # Example
///
/// ```
/// use cascframe::markup::MarkupScanner;
///
/// let doc = br#"<Ui><Include file="Foo.xml"/><Script file="Bar.lua"/></Ui>"#;
/// let refs: Vec<String> = MarkupScanner::new(doc).collect::<Result<_, _>>().unwrap();
/// assert_eq!(refs, ["Foo.xml", "Bar.lua"]);
/// ```
pub struct MarkupScanner<'a> {
    reader: Reader<&'a [u8]>,
    buf: Vec<u8>,
    done: bool,
}

impl<'a> MarkupScanner<'a> {
    /// Create a scanner over raw document bytes.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            reader: Reader::from_reader(bytes),
            buf: Vec::new(),
            done: false,
        }
    }

    /// Pull the `file` attribute off a referencing element, if present.
    fn file_attribute(element: &BytesStart<'_>) -> Result<Option<String>> {
        for attr in element.attributes() {
            let attr = attr?;
            if attr.key.as_ref().eq_ignore_ascii_case(b"file") {
                return Ok(Some(String::from_utf8_lossy(&attr.value).into_owned()));
            }
        }
        Ok(None)
    }

    /// True for the element names that carry file references.
    fn is_reference_element(name: &[u8]) -> bool {
        name.eq_ignore_ascii_case(b"include") || name.eq_ignore_ascii_case(b"script")
    }
}

impl Iterator for MarkupScanner<'_> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf) {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                    if Self::is_reference_element(e.name().as_ref()) =>
                {
                    match Self::file_attribute(e) {
                        Ok(Some(reference)) => return Some(Ok(reference)),
                        Ok(None) => {}
                        Err(err) => {
                            self.done = true;
                            return Some(Err(err));
                        }
                    }
                }
                Ok(Event::Eof) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {}
                Err(err) => {
                    self.done = true;
                    return Some(Err(err.into()));
                }
            }
        }
    }
}
