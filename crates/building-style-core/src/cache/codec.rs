//! JSON encoding for building style records and whole catalogs.
//!
//! A record is an object with `name`, `author` and `description` string
//! properties. The encoder always writes them in that order. The decoder
//! accepts any order, defaults missing properties to empty strings and
//! skips unknown ones, but a known property holding anything other than
//! a string is an error.
//!
//! A catalog is an object keyed by the decimal form of each style id.

use std::fmt;
use std::io::{self, Read};

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Unexpected, Visitor};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

use crate::models::{BuildingStyleInfo, Catalog};

const NAME: &str = "name";
const AUTHOR: &str = "author";
const DESCRIPTION: &str = "description";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

impl Serialize for BuildingStyleInfo {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("BuildingStyleInfo", 3)?;
        state.serialize_field(NAME, self.name())?;
        state.serialize_field(AUTHOR, self.author())?;
        state.serialize_field(DESCRIPTION, self.description())?;
        state.end()
    }
}

/// Property names recognised inside a record object.
enum Field {
    Name,
    Author,
    Description,
    Unknown,
}

impl Field {
    fn from_bytes(name: &[u8]) -> Self {
        match name {
            b"name" => Field::Name,
            b"author" => Field::Author,
            b"description" => Field::Description,
            _ => Field::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldVisitor;

        impl<'de> Visitor<'de> for FieldVisitor {
            type Value = Field;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a building style property name")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Field::from_bytes(v.as_bytes()))
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Field::from_bytes(v))
            }
        }

        deserializer.deserialize_identifier(FieldVisitor)
    }
}

impl<'de> Deserialize<'de> for BuildingStyleInfo {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BuildingStyleVisitor;

        impl<'de> Visitor<'de> for BuildingStyleVisitor {
            type Value = BuildingStyleInfo;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a building style object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut name = None;
                let mut author = None;
                let mut description = None;

                while let Some(field) = map.next_key::<Field>()? {
                    match field {
                        Field::Name => name = Some(map.next_value::<String>()?),
                        Field::Author => author = Some(map.next_value::<String>()?),
                        Field::Description => description = Some(map.next_value::<String>()?),
                        Field::Unknown => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }

                Ok(BuildingStyleInfo::from_parts(name, author, description))
            }
        }

        deserializer.deserialize_map(BuildingStyleVisitor)
    }
}

/// Parse a catalog key: plain decimal digits, no sign, no leading zeros
/// other than `"0"` itself, and within `u32` range.
pub fn parse_style_key(key: &str) -> Option<u32> {
    let bytes = key.as_bytes();
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return None;
    }
    key.parse().ok()
}

struct StyleKey(u32);

impl<'de> Deserialize<'de> for StyleKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StyleKeyVisitor;

        impl<'de> Visitor<'de> for StyleKeyVisitor {
            type Value = StyleKey;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a decimal u32 style id")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                parse_style_key(v)
                    .map(StyleKey)
                    .ok_or_else(|| E::invalid_value(Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_str(StyleKeyVisitor)
    }
}

struct CatalogVisitor;

impl<'de> Visitor<'de> for CatalogVisitor {
    type Value = Catalog;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object of building styles keyed by id")
    }

    // `null` at the top level is an empty catalog.
    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Catalog::new())
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Catalog::new())
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        if seq.next_element::<IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(1, &"an empty array"));
        }
        Ok(Catalog::new())
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut catalog = Catalog::new();
        while let Some(StyleKey(key)) = map.next_key()? {
            let info: BuildingStyleInfo = map.next_value()?;
            catalog.insert(key, info);
        }
        Ok(catalog)
    }
}

/// Drop a leading UTF-8 byte order mark, if any.
fn skip_utf8_bom<R: Read>(mut reader: R) -> io::Result<io::Chain<io::Cursor<Vec<u8>>, R>> {
    let mut head = Vec::with_capacity(UTF8_BOM.len());
    (&mut reader).take(UTF8_BOM.len() as u64).read_to_end(&mut head)?;
    if head == UTF8_BOM {
        head.clear();
    }
    Ok(io::Cursor::new(head).chain(reader))
}

/// Decode a whole catalog document. A leading byte order mark is skipped;
/// trailing content after the top-level value is rejected.
pub fn decode_catalog<R: Read>(reader: R) -> serde_json::Result<Catalog> {
    let reader = skip_utf8_bom(reader).map_err(serde_json::Error::io)?;
    let mut de = serde_json::Deserializer::from_reader(reader);
    let catalog = (&mut de).deserialize_any(CatalogVisitor)?;
    de.end()?;
    Ok(catalog)
}

/// Encode a catalog as pretty-printed JSON in ascending key order.
pub fn encode_catalog<W: io::Write>(writer: W, catalog: &Catalog) -> serde_json::Result<()> {
    let mut ser = serde_json::Serializer::pretty(writer);
    catalog.serialize(&mut ser)
}

// ============================================================================
// Tests
// ============================================================================
