//! Structured XML (de)serialization for the value types.
//!
//! Writes emit exactly the `X`, `Y`, `Z` fields as attributes of a single
//! element. Reads tolerate either attribute encoding
//! (`<Vector3D X=".." Y=".." Z=".."/>`) or child-element encoding
//! (`<Vector3D><X>..</X><Y>..</Y><Z>..</Z></Vector3D>`) and fail if a
//! required field is absent or non-numeric. A [`UnitVector3D`] read goes
//! back through the validating constructor, so the unit invariant holds
//! for deserialized values too.

use std::io::{BufRead, Write};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Result, XmlError};
use crate::geometry::{Point3D, UnitVector3D, Vector3D};

const FIELDS: [&str; 3] = ["X", "Y", "Z"];

fn get_attr(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .map(|a| String::from_utf8_lossy(&a.value).to_string())
}

fn parse_field(field: &'static str, value: &str) -> Result<f64> {
    value.trim().parse().map_err(|_| {
        XmlError::NonNumeric {
            field,
            value: value.to_string(),
        }
        .into()
    })
}

/// Reads `X`, `Y`, `Z` from the first element in the stream, accepting
/// attribute or child-element encoding.
fn read_components<R: BufRead>(reader: R) -> Result<[f64; 3]> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut fields: [Option<f64>; 3] = [None; 3];
    let mut text = String::new();
    let mut root_seen = false;

    loop {
        match xml
            .read_event_into(&mut buf)
            .map_err(|e| XmlError::Malformed(e.to_string()))?
        {
            Event::Start(e) | Event::Empty(e) => {
                if !root_seen {
                    root_seen = true;
                    for (slot, field) in fields.iter_mut().zip(FIELDS) {
                        if let Some(value) = get_attr(&e, field.as_bytes()) {
                            *slot = Some(parse_field(field, &value)?);
                        }
                    }
                }
                text.clear();
            }
            Event::End(e) => {
                let name = e.name();
                if let Some(index) = FIELDS.iter().position(|f| f.as_bytes() == name.as_ref()) {
                    fields[index] = Some(parse_field(FIELDS[index], &text)?);
                }
            }
            Event::Text(e) => {
                let decoded = e
                    .decode()
                    .map_err(|err| XmlError::Malformed(err.to_string()))?;
                text.push_str(&decoded);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    let mut components = [0.0_f64; 3];
    for ((slot, value), field) in components.iter_mut().zip(fields).zip(FIELDS) {
        *slot = value.ok_or(XmlError::MissingField(field))?;
    }
    Ok(components)
}

fn write_components<W: Write>(writer: &mut W, element: &str, x: f64, y: f64, z: f64) -> Result<()> {
    write!(writer, r#"<{element} X="{x}" Y="{y}" Z="{z}"/>"#).map_err(XmlError::Io)?;
    Ok(())
}

impl Vector3D {
    /// Writes this vector as a single XML element with `X`, `Y`, `Z`
    /// attributes.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn write_xml<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_components(writer, "Vector3D", self.x, self.y, self.z)
    }

    /// Reads a vector from XML in attribute or child-element encoding.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed XML or a missing/non-numeric field.
    pub fn read_xml<R: BufRead>(reader: R) -> Result<Self> {
        let [x, y, z] = read_components(reader)?;
        Ok(Self::new(x, y, z))
    }
}

impl Point3D {
    /// Writes this point as a single XML element with `X`, `Y`, `Z`
    /// attributes.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn write_xml<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_components(writer, "Point3D", self.x, self.y, self.z)
    }

    /// Reads a point from XML in attribute or child-element encoding.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed XML or a missing/non-numeric field.
    pub fn read_xml<R: BufRead>(reader: R) -> Result<Self> {
        let [x, y, z] = read_components(reader)?;
        Ok(Self::new(x, y, z))
    }
}

impl UnitVector3D {
    /// Writes this direction as a single XML element with `X`, `Y`, `Z`
    /// attributes.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn write_xml<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_components(writer, "UnitVector3D", self.x(), self.y(), self.z())
    }

    /// Reads a direction from XML in attribute or child-element encoding,
    /// re-entering the validating constructor.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed XML, a missing/non-numeric field, or
    /// components that normalize to a degenerate direction.
    pub fn read_xml<R: BufRead>(reader: R) -> Result<Self> {
        let [x, y, z] = read_components(reader)?;
        Self::new(x, y, z)
    }
}
