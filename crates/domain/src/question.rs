use crate::protocol::{FIELD_SEPARATOR, TAG_AXFR, TAG_PING, TAG_QUERY};
use crate::{AbiVersion, DomainError, QueryType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionTag {
    Query,
    Axfr,
    Ping,
}

impl QuestionTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionTag::Query => TAG_QUERY,
            QuestionTag::Axfr => TAG_AXFR,
            QuestionTag::Ping => TAG_PING,
        }
    }
}

/// One parsed request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub tag: QuestionTag,
    /// Query name; for `AXFR` the zone name, empty when the ABI does not send one.
    pub qname: String,
    pub qclass: String,
    pub qtype: String,
    pub id: String,
    pub remote_ip: String,
    pub local_ip: Option<String>,
    pub subnet: Option<String>,
}

impl Question {
    fn tagged(tag: QuestionTag) -> Self {
        Self {
            tag,
            qname: String::new(),
            qclass: String::new(),
            qtype: String::new(),
            id: String::new(),
            remote_ip: String::new(),
            local_ip: None,
            subnet: None,
        }
    }

    pub fn query_type(&self) -> QueryType {
        QueryType::from_wire(&self.qtype)
    }

    /// Parses a request line (without its terminator) under the negotiated ABI.
    ///
    /// `Q` lines need at least six fields whatever the version; the optional
    /// local-ip and subnet fields are picked up only when the version defines
    /// them and the line carries them.
    pub fn parse(line: &[u8], abi: AbiVersion) -> Result<Self, DomainError> {
        let line = std::str::from_utf8(line)
            .map_err(|_| DomainError::InvalidQuestion("line is not valid UTF-8".to_string()))?;
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR as char).collect();

        match fields[0] {
            TAG_QUERY => Self::parse_query(&fields, abi),
            TAG_AXFR => Self::parse_axfr(&fields, abi),
            TAG_PING => Ok(Self::tagged(QuestionTag::Ping)),
            other => Err(DomainError::InvalidQuestion(format!(
                "unknown tag {:?}",
                other
            ))),
        }
    }

    fn parse_query(fields: &[&str], abi: AbiVersion) -> Result<Self, DomainError> {
        if fields.len() < 6 {
            return Err(DomainError::InvalidQuestion(format!(
                "Q needs at least 6 fields, got {}",
                fields.len()
            )));
        }

        let question = Self {
            tag: QuestionTag::Query,
            qname: fields[1].to_string(),
            qclass: fields[2].to_string(),
            qtype: fields[3].to_string(),
            id: fields[4].to_string(),
            remote_ip: fields[5].to_string(),
            local_ip: optional_field(fields, 6, abi.carries_local_ip()),
            subnet: optional_field(fields, 7, abi.carries_subnet()),
        };

        for (name, value) in [
            ("qname", &question.qname),
            ("qclass", &question.qclass),
            ("qtype", &question.qtype),
            ("id", &question.id),
        ] {
            if value.is_empty() {
                return Err(DomainError::InvalidQuestion(format!("empty {}", name)));
            }
        }

        Ok(question)
    }

    fn parse_axfr(fields: &[&str], abi: AbiVersion) -> Result<Self, DomainError> {
        let id = fields.get(1).copied().unwrap_or_default();
        if id.is_empty() {
            return Err(DomainError::InvalidQuestion("AXFR without id".to_string()));
        }

        let mut question = Self::tagged(QuestionTag::Axfr);
        question.id = id.to_string();
        question.qtype = TAG_AXFR.to_string();
        if abi.axfr_carries_zone() {
            question.qname = fields.get(2).copied().unwrap_or_default().to_string();
        }
        Ok(question)
    }
}

fn optional_field(fields: &[&str], index: usize, defined: bool) -> Option<String> {
    if !defined {
        return None;
    }
    fields
        .get(index)
        .filter(|value| !value.is_empty())
        .map(|value| value.to_string())
}
