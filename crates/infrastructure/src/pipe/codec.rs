//! Response line encoding. Field order is fixed by the ABI.
use pipedns_domain::protocol::{END_REPLY, FAIL_REPLY};
use pipedns_domain::DnsAnswer;

pub fn greeting_reply(identity: &str) -> String {
    format!("OK\t{}\n", identity)
}

/// `DATA\t<qname>\t<qclass>\t<qtype>\t<ttl>\t<id>\t<content>\n`
pub fn data_line(answer: &DnsAnswer) -> String {
    format!(
        "DATA\t{}\t{}\t{}\t{}\t{}\t{}\n",
        answer.qname, answer.qclass, answer.qtype, answer.ttl, answer.id, answer.content
    )
}

/// Advisory `LOG` line; tabs and line breaks in `message` become spaces so it
/// stays a single line.
pub fn log_line(message: &str) -> String {
    let message: String = message
        .chars()
        .map(|c| if matches!(c, '\t' | '\n' | '\r') { ' ' } else { c })
        .collect();
    format!("LOG\t{}\n", message)
}

pub fn end_line() -> &'static str {
    END_REPLY
}

pub fn fail_line() -> &'static str {
    FAIL_REPLY
}
