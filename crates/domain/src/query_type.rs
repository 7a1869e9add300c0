use std::fmt;
use std::str::FromStr;

/// Record type requested by a question, as far as the resolver cares.
///
/// `Srv` and `Txt` are accepted but have no lookup behind them yet; they resolve
/// to an empty answer set. Anything else lands in `Unsupported`, which also
/// resolves to an empty set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryType {
    Soa,
    Ns,
    A,
    Cname,
    Any,
    Srv,
    Txt,
    Unsupported,
}

impl QueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::Soa => "SOA",
            QueryType::Ns => "NS",
            QueryType::A => "A",
            QueryType::Cname => "CNAME",
            QueryType::Any => "ANY",
            QueryType::Srv => "SRV",
            QueryType::Txt => "TXT",
            QueryType::Unsupported => "UNSUPPORTED",
        }
    }

    /// Types that have a lookup algorithm behind them.
    pub fn is_implemented(&self) -> bool {
        matches!(
            self,
            QueryType::Soa | QueryType::Ns | QueryType::A | QueryType::Cname | QueryType::Any
        )
    }

    /// Lenient mapping from the wire text; unknown mnemonics become `Unsupported`.
    pub fn from_wire(s: &str) -> Self {
        s.parse().unwrap_or(QueryType::Unsupported)
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SOA" => Ok(QueryType::Soa),
            "NS" => Ok(QueryType::Ns),
            "A" => Ok(QueryType::A),
            "CNAME" => Ok(QueryType::Cname),
            "ANY" => Ok(QueryType::Any),
            "SRV" => Ok(QueryType::Srv),
            "TXT" => Ok(QueryType::Txt),
            other => Err(format!("Unsupported query type: {}", other)),
        }
    }
}
