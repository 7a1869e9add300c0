use super::codec;
use super::framing::{Frame, LineReader};
use pipedns_application::use_cases::ResolveRecordsUseCase;
use pipedns_domain::config::PipeConfig;
use pipedns_domain::{AbiVersion, DomainError, QueryType, Question, QuestionTag};
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, trace, warn};

#[derive(Debug, Clone)]
pub struct PipeSettings {
    pub abi: AbiVersion,
    pub identity: String,
    pub max_line_length: usize,
}

impl PipeSettings {
    pub fn from_config(config: &PipeConfig) -> Result<Self, DomainError> {
        Ok(Self {
            abi: AbiVersion::new(config.abi_version)?,
            identity: config.identity.clone(),
            max_line_length: config.max_line_length,
        })
    }
}

/// Counters reported when a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub lines: u64,
    pub answers: u64,
    pub failures: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    AwaitingHandshake,
    Ready,
}

/// Request/response loop of the pipe backend.
///
/// Every line read gets exactly one terminal line back (`OK`/`FAIL` during the
/// handshake, `END`/`FAIL` afterwards), written and flushed before the next
/// line is read. Bad input never ends the session; only end of input or an
/// I/O error on the streams does.
pub struct PipeBackend {
    resolver: Arc<ResolveRecordsUseCase>,
    settings: PipeSettings,
}

impl PipeBackend {
    pub fn new(resolver: Arc<ResolveRecordsUseCase>, settings: PipeSettings) -> Self {
        Self { resolver, settings }
    }

    pub fn settings(&self) -> &PipeSettings {
        &self.settings
    }

    pub async fn serve<R, W>(&self, input: R, mut output: W) -> io::Result<SessionSummary>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut reader = LineReader::new(BufReader::new(input), self.settings.max_line_length);
        let mut state = SessionState::AwaitingHandshake;
        let mut summary = SessionSummary::default();

        info!(abi = %self.settings.abi, "Pipe session started");

        loop {
            let frame = reader.next_frame().await?;
            let response = match frame {
                Frame::Eof => break,
                Frame::Line(line) => {
                    trace!(line = %String::from_utf8_lossy(&line), "INPUT");
                    match state {
                        SessionState::AwaitingHandshake => {
                            let (response, accepted) = self.handshake(&line);
                            if accepted {
                                state = SessionState::Ready;
                            }
                            response
                        }
                        SessionState::Ready => self.answer_line(&line, &mut summary).await,
                    }
                }
                Frame::TooLong => {
                    let error = DomainError::LineTooLong(self.settings.max_line_length);
                    warn!(error = %error, "Rejected input line");
                    codec::fail_line().to_string()
                }
                Frame::Unterminated(fragment) => {
                    warn!(
                        error = %DomainError::UnterminatedLine,
                        fragment = %String::from_utf8_lossy(&fragment),
                        "Rejected input line"
                    );
                    codec::fail_line().to_string()
                }
            };

            summary.lines += 1;
            if response.ends_with(codec::fail_line()) {
                summary.failures += 1;
            }

            trace!(response = %response.trim_end(), "OUTPUT");
            output.write_all(response.as_bytes()).await?;
            output.flush().await?;
        }

        info!(
            lines = summary.lines,
            answers = summary.answers,
            failures = summary.failures,
            "Pipe session ended"
        );
        Ok(summary)
    }

    fn handshake(&self, line: &[u8]) -> (String, bool) {
        let expected = self.settings.abi.greeting();
        if line == expected.as_bytes() {
            debug!(identity = %self.settings.identity, "Handshake accepted");
            (codec::greeting_reply(&self.settings.identity), true)
        } else {
            let error = DomainError::HandshakeMismatch {
                expected,
                received: String::from_utf8_lossy(line).into_owned(),
            };
            warn!(error = %error, "Handshake failed");
            (codec::fail_line().to_string(), false)
        }
    }

    async fn answer_line(&self, line: &[u8], summary: &mut SessionSummary) -> String {
        let question = match Question::parse(line, self.settings.abi) {
            Ok(question) => question,
            Err(e) => {
                warn!(error = %e, "Failed to parse question");
                return codec::fail_line().to_string();
            }
        };

        match question.tag {
            QuestionTag::Query => {
                self.lookup(&question.qname, question.query_type(), &question, summary)
                    .await
            }
            QuestionTag::Axfr if question.qname.is_empty() => {
                debug!(id = %question.id, "AXFR without zone name, nothing to transfer");
                codec::end_line().to_string()
            }
            QuestionTag::Axfr => {
                self.lookup(&question.qname, QueryType::Any, &question, summary)
                    .await
            }
            QuestionTag::Ping => codec::end_line().to_string(),
        }
    }

    async fn lookup(
        &self,
        qname: &str,
        qtype: QueryType,
        question: &Question,
        summary: &mut SessionSummary,
    ) -> String {
        match self.resolver.fetch_results(qname, qtype, &question.id).await {
            Ok(answers) => {
                debug!(
                    tag = question.tag.as_str(),
                    qname,
                    qtype = %question.qtype,
                    remote = %question.remote_ip,
                    answers = answers.len(),
                    "Question answered"
                );
                summary.answers += answers.len() as u64;
                let mut response: String = answers.iter().map(codec::data_line).collect();
                response.push_str(codec::end_line());
                response
            }
            Err(e) => {
                warn!(error = %e, qname, qtype = %question.qtype, "Failed to answer question");
                let mut response =
                    codec::log_line(&format!("Query error {} {}: {}", qname, question.qtype, e));
                response.push_str(codec::fail_line());
                response
            }
        }
    }
}
