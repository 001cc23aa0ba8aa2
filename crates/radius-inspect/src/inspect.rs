//! Packet inspection
//!
//! Decodes captured packets one at a time, pairs each reply with the request
//! that shares its identifier, and reports authenticator checks alongside the
//! rendered attributes.

use crate::config::InspectConfig;
use crate::session_cache::SessionCache;
use crate::speed_map::SpeedMap;
use radius_codec::{Code, Dictionary, Packet, PacketError};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum InspectError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed packet: {0}")]
    Packet(#[from] PacketError),
}

/// Decoded view of one packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub code: Code,
    pub identifier: u8,
    /// Length field from the header
    pub length: usize,
    /// Bytes in the capture, which may run past `length`
    pub captured: usize,
    pub authenticator: [u8; 16],
    /// Authenticator check; `None` when it cannot be checked
    pub authentic: Option<bool>,
    /// Message-Authenticator check; `None` when absent or uncheckable
    pub message_authenticator: Option<bool>,
    /// Attribute names (`Attr-<n>` for unknown types) and rendered values
    pub attributes: Vec<(String, String)>,
    /// Speed tier of the service profile, if the packet carries one
    pub speed: Option<String>,
}

fn check_label(check: Option<bool>) -> &'static str {
    match check {
        Some(true) => "ok",
        Some(false) => "FAILED",
        None => "unchecked",
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:?} (code {}) id={} length={}",
            self.code,
            self.code.as_u8(),
            self.identifier,
            self.length
        )?;
        if self.captured != self.length {
            writeln!(f, "  captured: {} bytes", self.captured)?;
        }
        write!(f, "  authenticator: ")?;
        for byte in &self.authenticator {
            write!(f, "{:02x}", byte)?;
        }
        writeln!(f, " [{}]", check_label(self.authentic))?;
        if self.message_authenticator.is_some() {
            writeln!(
                f,
                "  message-authenticator: [{}]",
                check_label(self.message_authenticator)
            )?;
        }
        for (name, value) in &self.attributes {
            writeln!(f, "  {} = {}", name, value)?;
        }
        if let Some(ref speed) = self.speed {
            writeln!(f, "  speed: {}", speed)?;
        }
        Ok(())
    }
}

pub struct Inspector {
    dictionary: Arc<Dictionary>,
    secret: Vec<u8>,
    sessions: SessionCache,
    speeds: SpeedMap,
    speed_attribute: String,
}

impl Inspector {
    /// Inspector with the built-in dictionary and speed table
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Inspector {
            dictionary: Dictionary::builtin(),
            secret: secret.into(),
            sessions: SessionCache::new(),
            speeds: SpeedMap::builtin(),
            speed_attribute: "Filter-Id".to_string(),
        }
    }

    pub fn from_config(config: &InspectConfig) -> Self {
        Inspector {
            speeds: config.speed_map(),
            speed_attribute: config.speed_attribute.clone(),
            ..Inspector::new(config.secret.as_bytes())
        }
    }

    pub fn with_dictionary(mut self, dictionary: Arc<Dictionary>) -> Self {
        self.dictionary = dictionary;
        self
    }

    pub fn with_speed_map(mut self, speeds: SpeedMap, speed_attribute: impl Into<String>) -> Self {
        self.speeds = speeds;
        self.speed_attribute = speed_attribute.into();
        self
    }

    /// Number of requests still waiting for a reply
    pub fn pending(&self) -> usize {
        self.sessions.len()
    }

    pub fn inspect_file<P: AsRef<Path>>(&self, path: P) -> Result<Report, InspectError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| InspectError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.inspect(&data)
    }

    /// Decode one packet.
    ///
    /// Requests are remembered by identifier until a reply with the same
    /// identifier is inspected; the reply is then checked against the
    /// remembered authenticator.
    pub fn inspect(&self, data: &[u8]) -> Result<Report, InspectError> {
        let packet = Packet::parse(data, &self.secret, Arc::clone(&self.dictionary)).map_err(|e| {
            debug!(error = %e, length = data.len(), "Failed to parse packet");
            e
        })?;

        let (authentic, message_authenticator) = if packet.code.is_request() {
            self.sessions.set(packet.identifier, packet.authenticator);
            let authentic = match packet.code {
                Code::AccessRequest | Code::StatusServer => None,
                _ => Some(packet.is_authentic_request()),
            };
            (authentic, packet.verify_message_authenticator(None))
        } else if packet.code.is_response() {
            match self.sessions.take(packet.identifier) {
                Some(request_authenticator) => (
                    Some(packet.is_authentic_response_to(&request_authenticator)),
                    packet.verify_message_authenticator(Some(&request_authenticator)),
                ),
                None => {
                    debug!(
                        identifier = packet.identifier,
                        "No request seen for reply"
                    );
                    (None, None)
                }
            }
        } else {
            (None, None)
        };

        if authentic == Some(false) {
            warn!(
                code = ?packet.code,
                identifier = packet.identifier,
                "Authenticator check failed"
            );
        }

        let attributes = packet
            .attributes
            .iter()
            .map(|attr| {
                let name = self
                    .dictionary
                    .name(attr.attr_type)
                    .unwrap_or_else(|| format!("Attr-{}", attr.attr_type));
                (name, packet.render_attribute(attr))
            })
            .collect();

        let speed = packet
            .attribute(&self.speed_attribute)
            .map(|attr| self.speeds.get(&packet.render_attribute(attr)).to_string());

        Ok(Report {
            code: packet.code,
            identifier: packet.identifier,
            length: usize::from(u16::from_be_bytes([data[2], data[3]])),
            captured: data.len(),
            authenticator: packet.authenticator,
            authentic,
            message_authenticator,
            attributes,
            speed,
        })
    }
}
