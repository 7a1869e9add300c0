use crate::QueryType;

pub const CLASS_IN: &str = "IN";

/// One record to hand back to the DNS server as a `DATA` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsAnswer {
    pub qname: String,
    pub qclass: &'static str,
    pub qtype: QueryType,
    pub ttl: String,
    /// Zone discriminator of the zone that owns this record.
    pub id: String,
    pub content: String,
}

impl DnsAnswer {
    /// Builds an answer, or `None` when `content` is empty or either text field
    /// would not fit in a single DATA field.
    pub fn new(
        qname: impl Into<String>,
        qtype: QueryType,
        ttl: impl Into<String>,
        id: impl Into<String>,
        content: impl Into<String>,
    ) -> Option<Self> {
        let qname = qname.into();
        let content = content.into();
        if content.is_empty() || !fits_in_field(&qname) || !fits_in_field(&content) {
            return None;
        }
        Some(Self {
            qname,
            qclass: CLASS_IN,
            qtype,
            ttl: ttl.into(),
            id: id.into(),
            content,
        })
    }
}

/// True when `text` contains no field separator or line break, so it cannot
/// split a DATA line or forge another one.
pub fn fits_in_field(text: &str) -> bool {
    !text.contains(['\t', '\r', '\n'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_content_is_no_answer() {
        assert!(DnsAnswer::new("example.com", QueryType::A, "1", "7", "").is_none());
    }

    #[test]
    fn test_content_with_separator_or_line_break_is_no_answer() {
        for content in ["192.0.2.10\tEVIL", "ns1\nEND", "host\r"] {
            assert!(
                DnsAnswer::new("example.com", QueryType::Ns, "1", "7", content).is_none(),
                "{:?} should be rejected",
                content
            );
        }
    }

    #[test]
    fn test_plain_content_is_an_answer() {
        let answer = DnsAnswer::new("example.com", QueryType::A, "1", "7", "192.0.2.10").unwrap();
        assert_eq!(answer.qclass, CLASS_IN);
        assert_eq!(answer.content, "192.0.2.10");
    }
}
