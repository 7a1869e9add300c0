use crate::ports::{KeyValueStore, KEY_SEPARATOR};
use pipedns_domain::{fits_in_field, zone_discriminator, DnsAnswer, DomainError, QueryType};
use std::sync::Arc;
use tracing::{debug, warn};

/// SOA timers: serial, refresh, retry, expire, minimum.
const SOA_TIMERS: &str = "0 1800 600 3600 300";

/// Turns a question into answers by reading the record namespace.
///
/// Layout under the store root:
///
/// ```text
/// <domain>                   zone exists
/// <domain>/NS/<nameserver>   one NS record per child key
/// <domain>/A/<qname>         value is the address
/// <domain>/CNAME/<qname>     value is the target
/// ```
pub struct ResolveRecordsUseCase {
    store: Arc<dyn KeyValueStore>,
    ttl: String,
}

impl ResolveRecordsUseCase {
    pub fn new(store: Arc<dyn KeyValueStore>, ttl: impl Into<String>) -> Self {
        Self {
            store,
            ttl: ttl.into(),
        }
    }

    pub fn ttl(&self) -> &str {
        &self.ttl
    }

    /// Answers for `qname`/`qtype`. `zone_id` is the discriminator the DNS
    /// server echoes back from an earlier answer; only A and CNAME use it.
    ///
    /// "No data" is an empty vector, which includes values that cannot be
    /// decoded. Errors are reserved for store failures.
    pub async fn fetch_results(
        &self,
        qname: &str,
        qtype: QueryType,
        zone_id: &str,
    ) -> Result<Vec<DnsAnswer>, DomainError> {
        if qname.is_empty() {
            return Ok(vec![]);
        }
        if !qtype.is_implemented() {
            debug!(qname, qtype = %qtype, "No lookup for query type");
            return Ok(vec![]);
        }

        let answers = match qtype {
            QueryType::Any => self.fetch_any(qname, zone_id).await?,
            QueryType::Soa => self.fetch_soa(qname).await?,
            QueryType::Ns => self.fetch_ns(qname).await?,
            QueryType::A | QueryType::Cname => {
                self.fetch_zone_value(qname, qtype, zone_id).await?
            }
            QueryType::Srv | QueryType::Txt | QueryType::Unsupported => vec![],
        };

        debug!(qname, qtype = %qtype, zone_id, answers = answers.len(), "Resolved question");
        Ok(answers)
    }

    /// SOA, NS, A and CNAME answers concatenated in that order.
    pub async fn fetch_any(
        &self,
        qname: &str,
        zone_id: &str,
    ) -> Result<Vec<DnsAnswer>, DomainError> {
        let mut answers = self.fetch_soa(qname).await?;
        answers.extend(self.fetch_ns(qname).await?);

        if let Some(domain) = self.find_zone(zone_id).await? {
            answers.extend(self.read_zone_value(&domain, qname, QueryType::A).await?);
            answers.extend(
                self.read_zone_value(&domain, qname, QueryType::Cname)
                    .await?,
            );
        }
        Ok(answers)
    }

    pub async fn fetch_soa(&self, domain: &str) -> Result<Vec<DnsAnswer>, DomainError> {
        if !self.store.exists(domain).await? {
            return Ok(vec![]);
        }

        let content = format!("{} hostmaster.{} {}", domain, domain, SOA_TIMERS);
        Ok(self
            .answer(domain, QueryType::Soa, zone_discriminator(domain), content)
            .into_iter()
            .collect())
    }

    pub async fn fetch_ns(&self, domain: &str) -> Result<Vec<DnsAnswer>, DomainError> {
        let prefix = format!("{}{}NS{}", domain, KEY_SEPARATOR, KEY_SEPARATOR);
        let nameservers = self.store.list_children(&prefix, KEY_SEPARATOR).await?;
        let id = zone_discriminator(domain);

        Ok(nameservers
            .into_iter()
            .filter_map(|ns| self.answer(domain, QueryType::Ns, id.clone(), ns))
            .collect())
    }

    /// A and CNAME lookups. The zone is found by hashing every top-level domain
    /// and comparing against `zone_id`; the scan stops at the first match
    /// whether or not it holds a value for `qname`.
    async fn fetch_zone_value(
        &self,
        qname: &str,
        qtype: QueryType,
        zone_id: &str,
    ) -> Result<Vec<DnsAnswer>, DomainError> {
        let Some(domain) = self.find_zone(zone_id).await? else {
            debug!(qname, zone_id, "No zone matches discriminator");
            return Ok(vec![]);
        };
        self.read_zone_value(&domain, qname, qtype).await
    }

    async fn read_zone_value(
        &self,
        domain: &str,
        qname: &str,
        qtype: QueryType,
    ) -> Result<Vec<DnsAnswer>, DomainError> {
        let key = format!(
            "{}{sep}{}{sep}{}",
            domain,
            qtype.as_str(),
            qname,
            sep = KEY_SEPARATOR
        );
        let Some(raw) = self.store.get(&key).await? else {
            return Ok(vec![]);
        };

        let value = match decode_value(&key, raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Ignoring stored value");
                return Ok(vec![]);
            }
        };
        Ok(self
            .answer(qname, qtype, zone_discriminator(domain), value)
            .into_iter()
            .collect())
    }

    async fn find_zone(&self, zone_id: &str) -> Result<Option<String>, DomainError> {
        let domains = self.store.list_children("", KEY_SEPARATOR).await?;
        Ok(domains
            .into_iter()
            .find(|domain| zone_discriminator(domain) == zone_id))
    }

    /// Stored text that would break the DATA line layout is dropped like an
    /// empty value.
    fn answer(
        &self,
        qname: &str,
        qtype: QueryType,
        id: String,
        content: String,
    ) -> Option<DnsAnswer> {
        if !fits_in_field(&content) {
            warn!(qname, qtype = %qtype, content = ?content, "Dropping record with tab or line break");
            return None;
        }
        DnsAnswer::new(qname, qtype, self.ttl.as_str(), id, content)
    }
}

/// Stored values are UTF-8 text on a single line; surrounding whitespace
/// (e.g. a trailing newline from `consul kv put @file`) is dropped.
fn decode_value(key: &str, raw: Vec<u8>) -> Result<String, DomainError> {
    let text = String::from_utf8(raw).map_err(|_| DomainError::MalformedValue {
        key: key.to_string(),
        reason: "value is not valid UTF-8".to_string(),
    })?;

    let value = text.trim();
    if value.contains(['\n', '\r']) {
        return Err(DomainError::MalformedValue {
            key: key.to_string(),
            reason: "value spans multiple lines".to_string(),
        });
    }
    Ok(value.to_string())
}
