//! Attribute dictionary
//!
//! Maps an attribute type to its name and codec, and a name back to its type
//! and codec. The packet codec resolves every TLV through a dictionary, so a
//! new attribute type is supported by registering a codec for it.
//!
//! # Example
//!
//! ```rust
//! use radius_codec::codec::IntegerCodec;
//! use radius_codec::Dictionary;
//!
//! let dictionary = Dictionary::new();
//! dictionary.register("Acct-Interim-Interval", 85, IntegerCodec).unwrap();
//!
//! assert_eq!(dictionary.name(85).as_deref(), Some("Acct-Interim-Interval"));
//! assert!(dictionary.register("Other", 85, IntegerCodec).is_err());
//! ```

use crate::attributes::{Attribute, AttributeType, Value};
use crate::codec::{
    AddressCodec, AttributeCodec, BytesCodec, CodecError, IntegerCodec, TextCodec, UnknownCodec,
    UserPasswordCodec, VendorSpecificCodec,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("Attribute type {0} is already registered")]
    AlreadyRegistered(u8),
    #[error("Unknown attribute name: {0}")]
    UnknownAttributeName(String),
    #[error("Invalid value for {name}: {source}")]
    Transform {
        name: String,
        #[source]
        source: CodecError,
    },
}

/// Registered attribute
#[derive(Clone)]
pub struct DictEntry {
    pub attr_type: u8,
    pub name: String,
    pub codec: Arc<dyn AttributeCodec>,
}

impl fmt::Debug for DictEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictEntry")
            .field("attr_type", &self.attr_type)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

struct Indices {
    by_type: [Option<Arc<DictEntry>>; 256],
    by_name: HashMap<String, Arc<DictEntry>>,
}

/// Thread-safe, append-only attribute registry
///
/// Both indices sit behind one reader/writer lock: lookups run concurrently,
/// a registration excludes everything else and becomes visible in both
/// indices at once.
pub struct Dictionary {
    indices: RwLock<Indices>,
    unknown: Arc<dyn AttributeCodec>,
}

static BUILTIN: OnceLock<Arc<Dictionary>> = OnceLock::new();

impl Dictionary {
    pub fn new() -> Self {
        Dictionary {
            indices: RwLock::new(Indices {
                by_type: std::array::from_fn(|_| None),
                by_name: HashMap::new(),
            }),
            unknown: Arc::new(UnknownCodec),
        }
    }

    /// Process-wide dictionary loaded with the RFC 2865, 2866 and 2869
    /// attributes.
    ///
    /// Built on first use; every caller gets a handle to the same instance.
    pub fn builtin() -> Arc<Dictionary> {
        Arc::clone(BUILTIN.get_or_init(|| Arc::new(Dictionary::with_rfc_attributes())))
    }

    /// A fresh dictionary with the same content as [`Dictionary::builtin`]
    pub fn with_rfc_attributes() -> Self {
        let dictionary = Dictionary::new();
        for &attr_type in AttributeType::ALL {
            let codec = standard_codec(attr_type);
            if let Err(e) = dictionary.register_arc(attr_type.name(), attr_type.as_u8(), codec) {
                debug!(error = %e, "Skipping built-in attribute");
            }
        }
        dictionary
    }

    /// Register `codec` for attribute `attr_type` under `name`.
    ///
    /// Fails without changing anything if the type is taken. A name that is
    /// already in use is re-pointed at the new entry; the older type keeps
    /// its name in the type index.
    pub fn register<C>(
        &self,
        name: impl Into<String>,
        attr_type: u8,
        codec: C,
    ) -> Result<(), DictionaryError>
    where
        C: AttributeCodec + 'static,
    {
        self.register_arc(name, attr_type, Arc::new(codec))
    }

    /// Same as [`Dictionary::register`] for a codec that is already shared
    pub fn register_arc(
        &self,
        name: impl Into<String>,
        attr_type: u8,
        codec: Arc<dyn AttributeCodec>,
    ) -> Result<(), DictionaryError> {
        let name = name.into();
        let mut indices = self.indices.write().unwrap_or_else(PoisonError::into_inner);

        let slot = &mut indices.by_type[usize::from(attr_type)];
        if slot.is_some() {
            debug!(attr_type, name = %name, "Attribute type already registered");
            return Err(DictionaryError::AlreadyRegistered(attr_type));
        }

        let entry = Arc::new(DictEntry {
            attr_type,
            name: name.clone(),
            codec,
        });
        *slot = Some(Arc::clone(&entry));
        indices.by_name.insert(name, entry);
        Ok(())
    }

    /// Codec for `attr_type`, or the opaque-bytes fallback if unregistered
    pub fn codec(&self, attr_type: u8) -> Arc<dyn AttributeCodec> {
        self.entry(attr_type)
            .map(|entry| Arc::clone(&entry.codec))
            .unwrap_or_else(|| Arc::clone(&self.unknown))
    }

    pub fn name(&self, attr_type: u8) -> Option<String> {
        self.entry(attr_type).map(|entry| entry.name.clone())
    }

    pub fn attr_type(&self, name: &str) -> Option<u8> {
        self.entry_by_name(name).map(|entry| entry.attr_type)
    }

    /// Build an attribute from a registered name.
    ///
    /// The codec's transform capability, when present, normalizes the value
    /// first.
    pub fn attribute(
        &self,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<Attribute, DictionaryError> {
        let entry = self
            .entry_by_name(name)
            .ok_or_else(|| DictionaryError::UnknownAttributeName(name.to_string()))?;

        let value = value.into();
        let value = match entry.codec.transformer() {
            Some(transformer) => {
                transformer
                    .transform(value)
                    .map_err(|source| DictionaryError::Transform {
                        name: name.to_string(),
                        source,
                    })?
            }
            None => value,
        };

        Ok(Attribute {
            attr_type: entry.attr_type,
            value,
        })
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        let indices = self.indices.read().unwrap_or_else(PoisonError::into_inner);
        indices.by_type.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if `attr_type` is registered under `name`
    pub(crate) fn is_named(&self, attr_type: u8, name: &str) -> bool {
        let indices = self.indices.read().unwrap_or_else(PoisonError::into_inner);
        indices.by_type[usize::from(attr_type)]
            .as_ref()
            .is_some_and(|entry| entry.name == name)
    }

    fn entry(&self, attr_type: u8) -> Option<Arc<DictEntry>> {
        let indices = self.indices.read().unwrap_or_else(PoisonError::into_inner);
        indices.by_type[usize::from(attr_type)].clone()
    }

    fn entry_by_name(&self, name: &str) -> Option<Arc<DictEntry>> {
        let indices = self.indices.read().unwrap_or_else(PoisonError::into_inner);
        indices.by_name.get(name).cloned()
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dictionary")
            .field("entries", &self.len())
            .finish()
    }
}

fn standard_codec(attr_type: AttributeType) -> Arc<dyn AttributeCodec> {
    use AttributeType::*;

    match attr_type {
        UserPassword => Arc::new(UserPasswordCodec),
        VendorSpecific => Arc::new(VendorSpecificCodec),
        NasIpAddress | FramedIpAddress | FramedIpNetmask | LoginIpHost => Arc::new(AddressCodec),
        NasPort | ServiceType | FramedProtocol | FramedRouting | FramedMtu | FramedCompression
        | LoginService | LoginTcpPort | FramedIpxNetwork | SessionTimeout | IdleTimeout
        | TerminationAction | FramedAppleTalkLink | FramedAppleTalkNetwork | AcctStatusType
        | AcctDelayTime | AcctInputOctets | AcctOutputOctets | AcctAuthentic
        | AcctSessionTime | AcctInputPackets | AcctOutputPackets | AcctTerminateCause
        | AcctLinkCount | AcctInputGigawords | AcctOutputGigawords | NasPortType | PortLimit
        | AcctInterimInterval => Arc::new(IntegerCodec),
        ChapPassword | State | Class | ProxyState | LoginLatGroup | ChapChallenge
        | EapMessage | MessageAuthenticator => Arc::new(BytesCodec),
        UserName | FilterId | ReplyMessage | CallbackNumber | CallbackId | FramedRoute
        | CalledStationId | CallingStationId | NasIdentifier | LoginLatService
        | LoginLatNode | FramedAppleTalkZone | AcctSessionId | AcctMultiSessionId
        | LoginLatPort | NasPortId => Arc::new(TextCodec),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_register_and_lookup() {
        let dictionary = Dictionary::new();
        assert!(dictionary.is_empty());
        dictionary.register("NAS-Port-Id", 87, TextCodec).unwrap();

        assert_eq!(dictionary.name(87).as_deref(), Some("NAS-Port-Id"));
        assert_eq!(dictionary.attr_type("NAS-Port-Id"), Some(87));
        assert_eq!(dictionary.name(88), None);
        assert_eq!(dictionary.len(), 1);
    }

    #[test]
    fn test_duplicate_type_keeps_first_registration() {
        let dictionary = Dictionary::new();
        dictionary.register("First", 10, TextCodec).unwrap();

        let err = dictionary.register("Second", 10, IntegerCodec).unwrap_err();
        assert!(matches!(err, DictionaryError::AlreadyRegistered(10)));
        assert_eq!(dictionary.name(10).as_deref(), Some("First"));
        assert_eq!(dictionary.attr_type("Second"), None);
        // still a text codec
        assert!(dictionary.attribute("First", "abc").is_ok());
    }

    #[test]
    fn test_duplicate_name_overwrites_name_index_only() {
        let dictionary = Dictionary::new();
        dictionary.register("Dup", 1, TextCodec).unwrap();
        dictionary.register("Dup", 2, IntegerCodec).unwrap();

        assert_eq!(dictionary.attr_type("Dup"), Some(2));
        assert_eq!(dictionary.name(1).as_deref(), Some("Dup"));
        assert_eq!(dictionary.name(2).as_deref(), Some("Dup"));
        assert_eq!(dictionary.attribute("Dup", 5u32).unwrap().attr_type, 2);
    }

    #[test]
    fn test_unregistered_type_uses_fallback_codec() {
        let dictionary = Dictionary::new();
        let codec = dictionary.codec(200);
        assert!(codec.transformer().is_none());
        assert!(codec.renderer().is_none());
    }

    #[test]
    fn test_attribute_applies_transform() {
        let dictionary = Dictionary::new();
        dictionary.register("Session-Timeout", 27, IntegerCodec).unwrap();

        let attr = dictionary.attribute("Session-Timeout", "3600").unwrap();
        assert_eq!(attr.attr_type, 27);
        assert_eq!(attr.value, Value::Integer(3600));

        let err = dictionary.attribute("Session-Timeout", "soon").unwrap_err();
        assert!(matches!(err, DictionaryError::Transform { .. }));
    }

    #[test]
    fn test_attribute_without_transform_wraps_value() {
        let dictionary = Dictionary::new();
        dictionary.register("Opaque", 190, UnknownCodec).unwrap();

        let attr = dictionary.attribute("Opaque", 12u32).unwrap();
        assert_eq!(attr.value, Value::Integer(12));
    }

    #[test]
    fn test_attribute_unknown_name() {
        let dictionary = Dictionary::new();
        let err = dictionary.attribute("Nope", "x").unwrap_err();
        assert!(matches!(err, DictionaryError::UnknownAttributeName(name) if name == "Nope"));
    }

    #[test]
    fn test_builtin_is_shared_and_populated() {
        let a = Dictionary::builtin();
        let b = Dictionary::builtin();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.len(), AttributeType::ALL.len());
        assert_eq!(a.attr_type("NAS-Port-Id"), Some(87));
        assert_eq!(a.attr_type("Acct-Input-Gigawords"), Some(52));
        assert_eq!(a.attr_type("Acct-Output-Gigawords"), Some(53));
        assert_eq!(a.attr_type("Acct-Interim-Interval"), Some(85));
    }

    #[test]
    fn test_concurrent_registration_and_lookup() {
        let dictionary = Arc::new(Dictionary::new());
        let handles: Vec<_> = (0..8u8)
            .map(|worker| {
                let dictionary = Arc::clone(&dictionary);
                thread::spawn(move || {
                    for i in 0..32u8 {
                        let attr_type = worker * 32 + i;
                        dictionary
                            .register(format!("Attr-{}", attr_type), attr_type, BytesCodec)
                            .unwrap();
                        assert_eq!(dictionary.attr_type(&format!("Attr-{}", attr_type)), Some(attr_type));
                        let _ = dictionary.name(attr_type.wrapping_add(1));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(dictionary.len(), 256);
    }
}
