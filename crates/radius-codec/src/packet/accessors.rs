//! Name-based access to a packet's attributes
//!
//! Names are resolved through the packet's dictionary, attribute by
//! attribute, so attributes whose type has no registered name are never
//! returned here.

use super::Packet;
use crate::attributes::{Attribute, Value};
use crate::dictionary::DictionaryError;

impl Packet {
    /// Values of every attribute named `name`, in wire order
    pub fn values(&self, name: &str) -> Vec<&Value> {
        self.attributes
            .iter()
            .filter(|attr| self.dictionary.is_named(attr.attr_type, name))
            .map(|attr| &attr.value)
            .collect()
    }

    /// Value of the first attribute named `name`
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.attribute(name).map(|attr| &attr.value)
    }

    /// First attribute named `name`
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|attr| self.dictionary.is_named(attr.attr_type, name))
    }

    /// Display string of the first attribute named `name`, or `""` if there
    /// is none. See [`Packet::render_attribute`].
    pub fn render(&self, name: &str) -> String {
        self.attribute(name)
            .map(|attr| self.render_attribute(attr))
            .unwrap_or_default()
    }

    /// Display string of an attribute value.
    ///
    /// Rules, first match wins:
    ///
    /// - the codec's renderer, if the codec has one
    /// - the value's own string conversion (addresses, custom values)
    /// - text as-is
    /// - raw bytes read as UTF-8, invalid sequences replaced
    /// - `""`
    pub fn render_attribute(&self, attr: &Attribute) -> String {
        let codec = self.dictionary.codec(attr.attr_type);
        if let Some(renderer) = codec.renderer() {
            return renderer.render(&attr.value);
        }

        if let Some(text) = attr.value.to_text() {
            return text;
        }

        match &attr.value {
            Value::Text(text) => text.clone(),
            Value::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            _ => String::new(),
        }
    }

    /// Append an attribute built by [`Dictionary::attribute`](crate::Dictionary::attribute)
    pub fn add(&mut self, name: &str, value: impl Into<Value>) -> Result<(), DictionaryError> {
        let attribute = self.dictionary.attribute(name, value)?;
        self.attributes.push(attribute);
        Ok(())
    }

    /// Replace every attribute named `name` with a single new one.
    ///
    /// The new attribute takes the position of the first one removed, or goes
    /// last if there was none.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), DictionaryError> {
        let attribute = self.dictionary.attribute(name, value)?;
        let position = self
            .attributes
            .iter()
            .position(|attr| self.dictionary.is_named(attr.attr_type, name));
        self.remove(name);
        match position {
            Some(index) => self.attributes.insert(index, attribute),
            None => self.attributes.push(attribute),
        }
        Ok(())
    }

    /// Drop every attribute named `name`; returns how many were removed
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.attributes.len();
        let dictionary = &self.dictionary;
        self.attributes
            .retain(|attr| !dictionary.is_named(attr.attr_type, name));
        before - self.attributes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{
        AddressCodec, AttributeCodec, AttributeRenderer, BytesCodec, CodecError, IntegerCodec,
        PacketContext, TextCodec, UnknownCodec,
    };
    use crate::packet::Code;
    use crate::Dictionary;
    use std::net::Ipv4Addr;
    use std::sync::Arc;

    /// Integer codec without a renderer
    struct PlainInteger;

    impl AttributeCodec for PlainInteger {
        fn decode(&self, ctx: &PacketContext<'_>, wire: &[u8]) -> Result<Value, CodecError> {
            IntegerCodec.decode(ctx, wire)
        }

        fn encode(&self, ctx: &PacketContext<'_>, value: &Value) -> Result<Vec<u8>, CodecError> {
            IntegerCodec.encode(ctx, value)
        }
    }

    struct Shouting;

    impl AttributeCodec for Shouting {
        fn decode(&self, ctx: &PacketContext<'_>, wire: &[u8]) -> Result<Value, CodecError> {
            TextCodec.decode(ctx, wire)
        }

        fn encode(&self, ctx: &PacketContext<'_>, value: &Value) -> Result<Vec<u8>, CodecError> {
            TextCodec.encode(ctx, value)
        }

        fn renderer(&self) -> Option<&dyn AttributeRenderer> {
            Some(self)
        }
    }

    impl AttributeRenderer for Shouting {
        fn render(&self, value: &Value) -> String {
            value.as_str().unwrap_or_default().to_uppercase()
        }
    }

    fn packet() -> Packet {
        let dictionary = Dictionary::new();
        dictionary.register("Reply-Message", 18, TextCodec).unwrap();
        dictionary.register("Class", 25, BytesCodec).unwrap();
        dictionary.register("NAS-IP-Address", 4, AddressCodec).unwrap();
        dictionary.register("Session-Timeout", 27, IntegerCodec).unwrap();
        dictionary.register("Port-Limit", 62, PlainInteger).unwrap();
        dictionary.register("Filter-Id", 11, Shouting).unwrap();
        dictionary.register("Proxy-State", 33, UnknownCodec).unwrap();

        let mut packet = Packet::with_dictionary(Code::AccessAccept, "s", Arc::new(dictionary));
        packet.add("Reply-Message", "one").unwrap();
        packet.add("Class", b"cls".as_slice()).unwrap();
        packet.add_attribute(Attribute::new(200, vec![1u8]));
        packet.add("Reply-Message", "two").unwrap();
        packet.add("NAS-IP-Address", Ipv4Addr::new(10, 0, 0, 1)).unwrap();
        packet.add("Session-Timeout", 30u32).unwrap();
        packet.add("Port-Limit", 4u32).unwrap();
        packet.add("Filter-Id", "gold").unwrap();
        packet
    }

    #[test]
    fn test_values_in_wire_order() {
        let packet = packet();
        assert_eq!(
            packet.values("Reply-Message"),
            vec![&Value::from("one"), &Value::from("two")]
        );
        assert!(packet.values("Callback-Id").is_empty());
    }

    #[test]
    fn test_value_and_attribute_pick_first_match() {
        let packet = packet();
        assert_eq!(packet.value("Reply-Message"), Some(&Value::from("one")));
        let first = packet.attribute("Reply-Message").unwrap();
        assert_eq!(Some(&first.value), packet.values("Reply-Message").first().copied());
        assert!(packet.value("Callback-Id").is_none());
    }

    #[test]
    fn test_render_fallback_chain() {
        let packet = packet();
        // codec renderer
        assert_eq!(packet.render("Filter-Id"), "GOLD");
        assert_eq!(packet.render("Session-Timeout"), "30");
        // value string conversion
        assert_eq!(packet.render("NAS-IP-Address"), "10.0.0.1");
        // text
        assert_eq!(packet.render("Reply-Message"), "one");
        // raw bytes as text
        assert_eq!(packet.render("Class"), "cls");
        // integer with no renderer
        assert_eq!(packet.render("Port-Limit"), "");
        // no such attribute
        assert_eq!(packet.render("Callback-Id"), "");
    }

    #[test]
    fn test_unnamed_attribute_is_invisible_by_name() {
        let packet = packet();
        assert_eq!(packet.attributes[2].attr_type, 200);
        assert_eq!(packet.render_attribute(&packet.attributes[2]), "\u{1}");
        assert!(packet.values("Attr-200").is_empty());
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut packet = packet();
        packet.set("Reply-Message", "only").unwrap();
        assert_eq!(packet.values("Reply-Message"), vec![&Value::from("only")]);
        assert_eq!(packet.attributes[0].value, Value::from("only"));

        packet.set("Proxy-State", vec![9u8]).unwrap();
        assert_eq!(packet.attributes.last().unwrap().attr_type, 33);
    }

    #[test]
    fn test_remove() {
        let mut packet = packet();
        assert_eq!(packet.remove("Reply-Message"), 2);
        assert_eq!(packet.remove("Reply-Message"), 0);
        assert!(packet.value("Reply-Message").is_none());
    }

    #[test]
    fn test_add_unknown_name() {
        let mut packet = packet();
        assert!(matches!(
            packet.add("Nope", "x"),
            Err(DictionaryError::UnknownAttributeName(_))
        ));
    }
}
