//! Ordered document model and adapters for access point XML responses.
//!
//! AirWave reports access point state as XML whose element order is
//! meaningful to operators (the appliance lists fields in the same order
//! the UI displays them), so these types keep fields in document order
//! instead of collapsing them into a hash map:
//!
//! - element text becomes [`Value::Text`]
//! - nested elements become [`Value::Fields`], a list of key/value pairs
//!   in document order where repeated elements repeat their key
//! - attributes are recorded under `@`-prefixed keys, and text mixed
//!   with attributes or children under a `#text` key
//!
//! [`ApList`] adapts `ap_list.xml` responses and [`ApDetail`] adapts
//! `ap_detail.xml` responses. Both serialize to JSON preserving the
//! document order.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::error::{AirWaveError, Result};

/// One value in a parsed document: leaf text or a nested field list.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text content of a leaf element (empty string for empty elements)
    Text(String),
    /// Nested element with attributes and/or children
    Fields(Fields),
}

impl Value {
    /// The value as leaf text, if it is one
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            Value::Fields(_) => None,
        }
    }

    /// The value as a nested field list, if it is one
    pub fn as_fields(&self) -> Option<&Fields> {
        match self {
            Value::Text(_) => None,
            Value::Fields(fields) => Some(fields),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Text(text) => serializer.serialize_str(text),
            Value::Fields(fields) => fields.serialize(serializer),
        }
    }
}

/// Key/value pairs of one element, in document order.
///
/// Unlike a map, repeated keys are kept: an access point with two
/// radios has two `radio` entries. [`get`](Fields::get) returns the
/// first match and [`get_all`](Fields::get_all) iterates every match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Vec<(String, Value)>);

impl Fields {
    /// First value recorded under `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Every value recorded under `key`, in document order
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.0.iter().filter(move |(k, _)| k == key).map(|(_, v)| v)
    }

    /// First value under `key`, as leaf text
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_text)
    }

    /// Iterate all pairs in document order
    pub fn iter(&self) -> std::slice::Iter<'_, (String, Value)> {
        self.0.iter()
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the element had no attributes or children
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&mut self, key: String, value: Value) {
        self.0.push((key, value));
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = &'a (String, Value);
    type IntoIter = std::slice::Iter<'a, (String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Lookup key for [`ApList::search`]: a numeric access point id or an
/// access point name. Built via `From`, so `list.search(3)` and
/// `list.search("AP001")` both work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKey<'a> {
    /// Match on the `@id` attribute
    Id(u64),
    /// Match on the `name` field
    Name(&'a str),
}

impl From<u64> for SearchKey<'static> {
    fn from(id: u64) -> Self {
        SearchKey::Id(id)
    }
}

impl<'a> From<&'a str> for SearchKey<'a> {
    fn from(name: &'a str) -> Self {
        SearchKey::Name(name)
    }
}

/// One access point from an `ap_list.xml` response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApEntry {
    /// Access point id, from the `@id` attribute
    pub id: u64,
    /// All fields of the `<ap>` element, in document order
    pub fields: Fields,
}

impl ApEntry {
    fn from_fields(fields: Fields) -> Result<Self> {
        let raw = fields
            .text("@id")
            .ok_or_else(|| AirWaveError::missing_element("@id attribute on <ap>"))?;
        let id = raw
            .parse::<u64>()
            .map_err(|_| AirWaveError::missing_element("numeric @id attribute on <ap>"))?;
        Ok(Self { id, fields })
    }

    /// The access point's `name` field
    pub fn name(&self) -> Option<&str> {
        self.fields.text("name")
    }

    /// First value under `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// First value under `key`, as leaf text
    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields.text(key)
    }
}

impl Serialize for ApEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

/// Access point inventory parsed from an `ap_list.xml` response.
///
/// # Examples
///
/// ```no_run
/// use airwave_xml::{AirWaveClient, ApList, Result};
///
/// # async fn run(client: &AirWaveClient) -> Result<()> {
/// let response = client.ap_list(&[]).await?;
/// let inventory = ApList::parse(&response.body)?;
///
/// for ap in &inventory {
///     println!("{}: {}", ap.id, ap.name().unwrap_or("(unnamed)"));
/// }
/// if let Some(ap) = inventory.search("AP001") {
///     println!("uptime: {:?}", ap.text("snmp_uptime"));
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ApList {
    entries: Vec<ApEntry>,
}

impl ApList {
    /// Parse an `ap_list.xml` response body.
    ///
    /// Fails with [`AirWaveError::MissingElement`] when the
    /// `amp_ap_list` root or its `<ap>` children are absent, and with
    /// [`AirWaveError::Xml`] when the document is not well-formed.
    pub fn parse(xml: &str) -> Result<Self> {
        let (root, value) = parse_document(xml)?;
        if root != "amp_ap_list" {
            return Err(AirWaveError::missing_element("amp:amp_ap_list root element"));
        }
        let fields = value
            .as_fields()
            .ok_or_else(|| AirWaveError::missing_element("<ap> elements in amp:amp_ap_list"))?;

        let mut entries = Vec::new();
        for ap in fields.get_all("ap") {
            let ap_fields = ap
                .as_fields()
                .ok_or_else(|| AirWaveError::missing_element("@id attribute on <ap>"))?;
            entries.push(ApEntry::from_fields(ap_fields.clone())?);
        }
        if entries.is_empty() {
            return Err(AirWaveError::missing_element("<ap> elements in amp:amp_ap_list"));
        }
        Ok(Self { entries })
    }

    /// Find an access point by id or by name.
    ///
    /// Returns the first match in document order, or `None`.
    pub fn search<'a>(&self, key: impl Into<SearchKey<'a>>) -> Option<&ApEntry> {
        match key.into() {
            SearchKey::Id(id) => self.entries.iter().find(|ap| ap.id == id),
            SearchKey::Name(name) => self.entries.iter().find(|ap| ap.name() == Some(name)),
        }
    }

    /// Iterate access points in document order
    pub fn iter(&self) -> std::slice::Iter<'_, ApEntry> {
        self.entries.iter()
    }

    /// Access points as a slice
    pub fn entries(&self) -> &[ApEntry] {
        &self.entries
    }

    /// Number of access points in the inventory
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the inventory is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ApList {
    type Item = &'a ApEntry;
    type IntoIter = std::slice::Iter<'a, ApEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for ApList {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for entry in &self.entries {
            seq.serialize_element(entry)?;
        }
        seq.end()
    }
}

/// Full field set for one access point, parsed from an `ap_detail.xml`
/// response. Fields stay in document order, including the repeated
/// `radio`, `interface`, and `client` blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct ApDetail {
    fields: Fields,
}

impl ApDetail {
    /// Parse an `ap_detail.xml` response body.
    ///
    /// Fails with [`AirWaveError::MissingElement`] when the
    /// `amp_ap_detail` root or its `<ap>` child is absent.
    pub fn parse(xml: &str) -> Result<Self> {
        let (root, value) = parse_document(xml)?;
        if root != "amp_ap_detail" {
            return Err(AirWaveError::missing_element(
                "amp:amp_ap_detail root element",
            ));
        }
        let ap = value
            .as_fields()
            .and_then(|fields| fields.get("ap"))
            .ok_or_else(|| AirWaveError::missing_element("<ap> element in amp:amp_ap_detail"))?;
        let fields = ap
            .as_fields()
            .ok_or_else(|| AirWaveError::missing_element("fields on <ap>"))?
            .clone();
        Ok(Self { fields })
    }

    /// First value under `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Every value under `key`, e.g. one entry per radio
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.fields.get_all(key)
    }

    /// First value under `key`, as leaf text
    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields.text(key)
    }

    /// Iterate all fields in document order
    pub fn iter(&self) -> std::slice::Iter<'_, (String, Value)> {
        self.fields.iter()
    }

    /// Number of fields, repeated elements counted individually
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The underlying field list
    pub fn fields(&self) -> &Fields {
        &self.fields
    }
}

impl Serialize for ApDetail {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

struct Frame {
    name: String,
    fields: Fields,
    text: String,
}

/// Parse a whole XML document into its root's local name and value.
///
/// Element names are recorded without namespace prefix, so both
/// `<amp:amp_ap_list>` and `<amp_ap_list>` roots match.
fn parse_document(xml: &str) -> Result<(String, Value)> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => stack.push(open_frame(&e)?),
            Event::Empty(e) => {
                let (name, value) = close_frame(open_frame(&e)?);
                match stack.last_mut() {
                    Some(parent) => parent.fields.push(name, value),
                    None => return Ok((name, value)),
                }
            }
            Event::Text(t) => {
                let text = t.unescape().map_err(quick_xml::Error::from)?;
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&text);
                }
            }
            Event::CData(t) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&t.into_inner()));
                }
            }
            Event::End(_) => {
                let frame = match stack.pop() {
                    Some(frame) => frame,
                    None => continue,
                };
                let (name, value) = close_frame(frame);
                match stack.last_mut() {
                    Some(parent) => parent.fields.push(name, value),
                    None => return Ok((name, value)),
                }
            }
            Event::Eof => return Err(AirWaveError::missing_element("XML root element")),
            _ => {}
        }
    }
}

fn open_frame(e: &BytesStart<'_>) -> Result<Frame> {
    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
    let mut fields = Fields::default();
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = format!("@{}", String::from_utf8_lossy(attr.key.as_ref()));
        let value = attr
            .unescape_value()
            .map_err(quick_xml::Error::from)?
            .into_owned();
        fields.push(key, Value::Text(value));
    }
    Ok(Frame {
        name,
        fields,
        text: String::new(),
    })
}

fn close_frame(frame: Frame) -> (String, Value) {
    let Frame {
        name,
        mut fields,
        text,
    } = frame;
    let value = if fields.is_empty() {
        Value::Text(text)
    } else {
        if !text.is_empty() {
            fields.push("#text".to_string(), Value::Text(text));
        }
        Value::Fields(fields)
    };
    (name, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_AP_LIST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<amp:amp_ap_list xmlns:amp="http://www.airwave.com/amp" version="1">
  <ap id="1">
    <firmware>7.3.2.1</firmware>
    <group id="3">HQ Wireless</group>
    <is_up>true</is_up>
    <lan_ip>192.168.0.1</lan_ip>
    <lan_mac>12:34:56:78:90:AB</lan_mac>
    <mfgr>Aruba</mfgr>
    <model id="70"><![CDATA[AP 105]]></model>
    <name>AP001</name>
    <radio index="1" phy="g"/>
  </ap>
  <ap id="2">
    <firmware>7.3.2.1</firmware>
    <group id="3">HQ Wireless</group>
    <is_up>false</is_up>
    <lan_ip>192.168.0.2</lan_ip>
    <lan_mac>12:34:56:78:90:AC</lan_mac>
    <mfgr>Aruba</mfgr>
    <model id="70"><![CDATA[AP 105]]></model>
    <name>AP002</name>
  </ap>
</amp:amp_ap_list>"#;

    const SAMPLE_AP_DETAIL: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<amp:amp_ap_detail xmlns:amp="http://www.airwave.com/amp" version="1">
  <ap id="1">
    <ap_folder>Top</ap_folder>
    <device_category>ap</device_category>
    <firmware>7.3.2.1</firmware>
    <lan_ip>192.168.0.1</lan_ip>
    <name>AP001</name>
    <radio index="0">
      <radio_interface>1</radio_interface>
      <radio_type>b/g/n</radio_type>
    </radio>
    <radio index="1">
      <radio_interface>2</radio_interface>
      <radio_type>a/n</radio_type>
    </radio>
    <snmp_uptime>63072000</snmp_uptime>
  </ap>
</amp:amp_ap_detail>"#;

    #[test]
    fn test_ap_list_parsing() {
        let list = ApList::parse(SAMPLE_AP_LIST).unwrap();
        assert_eq!(list.len(), 2);

        let first = &list.entries()[0];
        assert_eq!(first.id, 1);
        assert_eq!(first.name(), Some("AP001"));
        assert_eq!(first.text("lan_mac"), Some("12:34:56:78:90:AB"));
        assert_eq!(first.text("is_up"), Some("true"));
    }

    #[test]
    fn test_ap_list_search_by_id_or_name() {
        let list = ApList::parse(SAMPLE_AP_LIST).unwrap();

        assert_eq!(list.search(2).map(|ap| ap.name()), Some(Some("AP002")));
        assert_eq!(list.search("AP001").map(|ap| ap.id), Some(1));
        assert!(list.search(99).is_none());
        assert!(list.search("AP999").is_none());
    }

    #[test]
    fn test_nested_elements_keep_attributes_and_text() {
        let list = ApList::parse(SAMPLE_AP_LIST).unwrap();
        let first = &list.entries()[0];

        let group = first.get("group").and_then(Value::as_fields).unwrap();
        assert_eq!(group.text("@id"), Some("3"));
        assert_eq!(group.text("#text"), Some("HQ Wireless"));

        // CDATA is plain text to the model
        let model = first.get("model").and_then(Value::as_fields).unwrap();
        assert_eq!(model.text("#text"), Some("AP 105"));
    }

    #[test]
    fn test_ap_list_rejects_wrong_or_empty_root() {
        let wrong_root = "<amp:amp_ap_detail xmlns:amp=\"a\"><ap id=\"1\"/></amp:amp_ap_detail>";
        assert!(matches!(
            ApList::parse(wrong_root),
            Err(AirWaveError::MissingElement { .. })
        ));

        let no_aps = "<amp:amp_ap_list xmlns:amp=\"a\"></amp:amp_ap_list>";
        assert!(matches!(
            ApList::parse(no_aps),
            Err(AirWaveError::MissingElement { .. })
        ));
    }

    #[test]
    fn test_malformed_xml_is_an_xml_error() {
        let truncated = "<amp:amp_ap_list xmlns:amp=\"a\"><ap id=\"1\">";
        assert!(matches!(
            ApList::parse(truncated),
            Err(AirWaveError::Xml(_)) | Err(AirWaveError::MissingElement { .. })
        ));

        let mismatched = "<amp:amp_ap_list xmlns:amp=\"a\"><ap></amp:amp_ap_list>";
        assert!(matches!(
            ApList::parse(mismatched),
            Err(AirWaveError::Xml(_))
        ));
    }

    #[test]
    fn test_ap_detail_preserves_document_order() {
        let detail = ApDetail::parse(SAMPLE_AP_DETAIL).unwrap();
        assert_eq!(detail.len(), 9);

        let keys: Vec<&str> = detail.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "@id",
                "ap_folder",
                "device_category",
                "firmware",
                "lan_ip",
                "name",
                "radio",
                "radio",
                "snmp_uptime",
            ]
        );

        // Serialization streams in the same order
        let json = serde_json::to_string(&detail).unwrap();
        assert!(json.starts_with("{\"@id\":\"1\",\"ap_folder\":\"Top\""));
        let radio = json.find("\"radio_type\":\"b/g/n\"").unwrap();
        let uptime = json.find("\"snmp_uptime\"").unwrap();
        assert!(radio < uptime);
    }

    #[test]
    fn test_ap_detail_repeated_radios() {
        let detail = ApDetail::parse(SAMPLE_AP_DETAIL).unwrap();

        let radios: Vec<&Fields> = detail
            .get_all("radio")
            .filter_map(Value::as_fields)
            .collect();
        assert_eq!(radios.len(), 2);
        assert_eq!(radios[0].text("@index"), Some("0"));
        assert_eq!(radios[0].text("radio_type"), Some("b/g/n"));
        assert_eq!(radios[1].text("radio_interface"), Some("2"));
    }

    #[test]
    fn test_ap_detail_requires_ap_child() {
        let empty = "<amp:amp_ap_detail xmlns:amp=\"a\"></amp:amp_ap_detail>";
        assert!(matches!(
            ApDetail::parse(empty),
            Err(AirWaveError::MissingElement { .. })
        ));
    }

    #[test]
    fn test_ap_list_serializes_as_array() {
        let list = ApList::parse(SAMPLE_AP_LIST).unwrap();
        let json = serde_json::to_string(&list).unwrap();
        assert!(json.starts_with("[{\"@id\":\"1\""));
        assert!(json.contains("\"name\":\"AP002\""));
    }
}
