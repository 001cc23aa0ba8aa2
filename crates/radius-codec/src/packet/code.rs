/// RADIUS packet codes (RFC 2865 Section 4, RFC 2866, RFC 5176, RFC 5997)
///
/// Codes without an assignment are kept as `Unassigned` so that parsing never
/// rejects a packet because of its code. Such packets cannot be encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code {
    /// Access-Request (1)
    AccessRequest,
    /// Access-Accept (2)
    AccessAccept,
    /// Access-Reject (3)
    AccessReject,
    /// Accounting-Request (4) - RFC 2866
    AccountingRequest,
    /// Accounting-Response (5) - RFC 2866
    AccountingResponse,
    /// Access-Challenge (11)
    AccessChallenge,
    /// Status-Server (12) - RFC 5997
    StatusServer,
    /// Status-Client (13) - RFC 5997
    StatusClient,
    /// Disconnect-Request (40) - RFC 5176
    DisconnectRequest,
    /// Disconnect-ACK (41) - RFC 5176
    DisconnectAck,
    /// Disconnect-NAK (42) - RFC 5176
    DisconnectNak,
    /// CoA-Request (43) - RFC 5176
    CoaRequest,
    /// CoA-ACK (44) - RFC 5176
    CoaAck,
    /// CoA-NAK (45) - RFC 5176
    CoaNak,
    /// Reserved (255)
    Reserved,
    /// Any other code value
    Unassigned(u8),
}

/// How the authenticator field of an outgoing packet is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AuthenticatorRule {
    /// Caller-supplied value is sent as-is
    Verbatim,
    /// MD5 over the packet with 16 zero bytes in place of the authenticator
    Request,
    /// MD5 over the packet with the request authenticator in place
    Response,
}

impl Code {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => Code::AccessRequest,
            2 => Code::AccessAccept,
            3 => Code::AccessReject,
            4 => Code::AccountingRequest,
            5 => Code::AccountingResponse,
            11 => Code::AccessChallenge,
            12 => Code::StatusServer,
            13 => Code::StatusClient,
            40 => Code::DisconnectRequest,
            41 => Code::DisconnectAck,
            42 => Code::DisconnectNak,
            43 => Code::CoaRequest,
            44 => Code::CoaAck,
            45 => Code::CoaNak,
            255 => Code::Reserved,
            other => Code::Unassigned(other),
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Code::AccessRequest => 1,
            Code::AccessAccept => 2,
            Code::AccessReject => 3,
            Code::AccountingRequest => 4,
            Code::AccountingResponse => 5,
            Code::AccessChallenge => 11,
            Code::StatusServer => 12,
            Code::StatusClient => 13,
            Code::DisconnectRequest => 40,
            Code::DisconnectAck => 41,
            Code::DisconnectNak => 42,
            Code::CoaRequest => 43,
            Code::CoaAck => 44,
            Code::CoaNak => 45,
            Code::Reserved => 255,
            Code::Unassigned(other) => other,
        }
    }

    /// True for codes sent by a client to start a transaction
    pub fn is_request(self) -> bool {
        matches!(
            self,
            Code::AccessRequest
                | Code::AccountingRequest
                | Code::StatusServer
                | Code::DisconnectRequest
                | Code::CoaRequest
        )
    }

    /// True for codes sent in reply to a request
    pub fn is_response(self) -> bool {
        matches!(
            self,
            Code::AccessAccept
                | Code::AccessReject
                | Code::AccessChallenge
                | Code::AccountingResponse
                | Code::DisconnectAck
                | Code::DisconnectNak
                | Code::CoaAck
                | Code::CoaNak
        )
    }

    pub(crate) fn authenticator_rule(self) -> Option<AuthenticatorRule> {
        match self {
            Code::AccessRequest | Code::StatusServer => Some(AuthenticatorRule::Verbatim),
            Code::AccountingRequest | Code::CoaRequest | Code::DisconnectRequest => {
                Some(AuthenticatorRule::Request)
            }
            Code::AccessAccept
            | Code::AccessReject
            | Code::AccessChallenge
            | Code::AccountingResponse
            | Code::CoaAck
            | Code::CoaNak
            | Code::DisconnectAck
            | Code::DisconnectNak => Some(AuthenticatorRule::Response),
            Code::StatusClient | Code::Reserved | Code::Unassigned(_) => None,
        }
    }
}

impl From<u8> for Code {
    fn from(value: u8) -> Self {
        Code::from_u8(value)
    }
}

impl From<Code> for u8 {
    fn from(code: Code) -> Self {
        code.as_u8()
    }
}
